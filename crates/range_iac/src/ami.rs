//! Jump host machine image resolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use range_spec::{Environment, JumpFlavor};

use crate::error::{IacError, IacResult};

/// Read-only lookup of image identifiers by image key and region.
pub trait ImageCatalog {
    fn image(&self, key: &str, region: &str) -> Option<String>;
}

/// One image and its identifier in each region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub regions: BTreeMap<String, String>,
}

/// Image table decoded from YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticImageTable {
    images: BTreeMap<String, ImageEntry>,
}

impl StaticImageTable {
    /// The table shipped with ranger.
    pub fn builtin() -> IacResult<Self> {
        Self::from_yaml(include_str!("../assets/ami_map.yml"))
    }

    pub fn from_yaml(content: &str) -> IacResult<Self> {
        let table: Self = serde_yaml::from_str(content)?;
        if table.images.is_empty() {
            return Err(IacError::InvalidImageTable("no images defined".to_string()));
        }
        Ok(table)
    }

    pub fn get(&self, key: &str) -> Option<&ImageEntry> {
        self.images.get(key)
    }

    /// Image keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        self.images.keys().map(String::as_str).collect()
    }
}

impl ImageCatalog for StaticImageTable {
    fn image(&self, key: &str, region: &str) -> Option<String> {
        self.images.get(key)?.regions.get(region).cloned()
    }
}

/// Picks the image for a jump host flavor of an environment.
pub struct AmiResolver<'a> {
    catalog: &'a dyn ImageCatalog,
}

impl<'a> AmiResolver<'a> {
    pub fn new(catalog: &'a dyn ImageCatalog) -> Self {
        Self { catalog }
    }

    /// The environment's override for `flavor`, else the default image for
    /// the environment's region.
    pub fn resolve_image(&self, flavor: JumpFlavor, env: &Environment) -> IacResult<String> {
        if let Some(ami) = env.jump_hosts.flavor(flavor).image_override() {
            debug!("Using {} image override {} for {}", flavor, ami, env.name);
            return Ok(ami.to_string());
        }

        let key = flavor.default_image_key();
        let region = env.aws_config.region.as_str();
        self.catalog
            .image(key, region)
            .ok_or_else(|| IacError::AmiLookup {
                flavor: flavor.to_string(),
                image: key.to_string(),
                region: region.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(region: &str) -> Environment {
        let mut env = Environment::new("blue");
        env.aws_config.region = region.to_string();
        env
    }

    #[test]
    fn test_builtin_table() {
        let table = StaticImageTable::builtin().unwrap();
        assert_eq!(table.keys(), vec!["ubuntu", "w2k16"]);
        for flavor in JumpFlavor::all() {
            assert!(table.image(flavor.default_image_key(), "us-east-1").is_some());
        }
    }

    #[test]
    fn test_default_image_for_region() {
        let table = StaticImageTable::from_yaml(
            "ubuntu:\n  regions:\n    us-east-1: ami-kali\nw2k16:\n  regions:\n    us-east-1: ami-win\n",
        )
        .unwrap();
        let resolver = AmiResolver::new(&table);
        let env = environment("us-east-1");

        assert_eq!(resolver.resolve_image(JumpFlavor::Kali, &env).unwrap(), "ami-kali");
        assert_eq!(resolver.resolve_image(JumpFlavor::Windows, &env).unwrap(), "ami-win");
    }

    #[test]
    fn test_override_wins_over_table() {
        let table = StaticImageTable::from_yaml("w2k16:\n  regions:\n    us-east-1: ami-win\n").unwrap();
        let mut env = environment("us-east-1");
        env.jump_hosts.windows.ami = "ami-custom".to_string();

        let image = AmiResolver::new(&table).resolve_image(JumpFlavor::Windows, &env).unwrap();
        assert_eq!(image, "ami-custom");
    }

    #[test]
    fn test_override_without_region() {
        let table = StaticImageTable::from_yaml("ubuntu:\n  regions: {}\n").unwrap();
        let mut env = environment("mars-north-1");
        env.jump_hosts.kali.ami = "ami-kali-custom".to_string();

        let image = AmiResolver::new(&table).resolve_image(JumpFlavor::Kali, &env).unwrap();
        assert_eq!(image, "ami-kali-custom");
    }

    #[test]
    fn test_unknown_region_fails() {
        let table = StaticImageTable::builtin().unwrap();
        let err = AmiResolver::new(&table)
            .resolve_image(JumpFlavor::Kali, &environment("mars-north-1"))
            .unwrap_err();

        assert!(matches!(err, IacError::AmiLookup { ref image, ref region, .. }
            if image == "ubuntu" && region == "mars-north-1"));
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(StaticImageTable::from_yaml("{}").is_err());
    }
}
