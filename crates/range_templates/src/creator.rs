//! Creation of new network and host definitions from templates.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use range_spec::{Definition, DefinitionReader, EnvironmentLayout, Host, Network, SpecError};

use crate::error::{TemplateError, TemplateResult};
use crate::renderer::TemplateRenderer;
use crate::source::{TemplateSource, HOST_TEMPLATE, NETWORK_TEMPLATE};

/// A network to be written as a new definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkDraft {
    pub name: String,
    pub included_hosts: Vec<String>,
}

impl NetworkDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            included_hosts: Vec::new(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.included_hosts.push(host.into());
        self
    }

    fn variables(&self) -> HashMap<String, String> {
        HashMap::from([
            ("name".to_string(), self.name.clone()),
            ("included_hosts".to_string(), quoted_list(&self.included_hosts)),
        ])
    }
}

/// A host to be written as a new definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostDraft {
    pub hostname: String,
    pub tcp_ports: Vec<u16>,
    pub udp_ports: Vec<u16>,
}

impl HostDraft {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ..Default::default()
        }
    }

    pub fn with_tcp(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        self.tcp_ports.extend(ports);
        self
    }

    pub fn with_udp(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        self.udp_ports.extend(ports);
        self
    }

    fn variables(&self) -> HashMap<String, String> {
        HashMap::from([
            ("hostname".to_string(), self.hostname.clone()),
            ("tcp_ports".to_string(), port_list(&self.tcp_ports)),
            ("udp_ports".to_string(), port_list(&self.udp_ports)),
        ])
    }
}

/// A definition file written by [`DefinitionCreator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub kind: &'static str,
    pub name: String,
    pub path: PathBuf,
}

/// Renders and writes new definitions into an environment.
///
/// Creations are serialized per target directory, and the final rename
/// refuses to replace an existing file, so two creators racing on the same
/// name cannot both succeed.
pub struct DefinitionCreator {
    layout: EnvironmentLayout,
    source: Arc<dyn TemplateSource>,
    renderer: TemplateRenderer,
    networks_lock: Mutex<()>,
    hosts_lock: Mutex<()>,
}

impl DefinitionCreator {
    pub fn new(layout: EnvironmentLayout, source: Arc<dyn TemplateSource>) -> Self {
        Self {
            layout,
            source,
            renderer: TemplateRenderer::new(),
            networks_lock: Mutex::new(()),
            hosts_lock: Mutex::new(()),
        }
    }

    pub fn layout(&self) -> &EnvironmentLayout {
        &self.layout
    }

    /// Write `networks/<name>.yml` for a new network.
    pub fn create_network(&self, draft: &NetworkDraft) -> TemplateResult<Created> {
        validate_identifier(Network::KIND, &draft.name)?;
        for host in &draft.included_hosts {
            validate_identifier(Host::KIND, host)?;
        }

        let _guard = self.networks_lock.lock();
        let created = self.create::<Network>(
            &self.layout.networks_dir(),
            &draft.name,
            NETWORK_TEMPLATE,
            &draft.variables(),
        )?;
        info!("Network created: {}", draft.name);
        Ok(created)
    }

    /// Write `hosts/<hostname>.yml` for a new host.
    pub fn create_host(&self, draft: &HostDraft) -> TemplateResult<Created> {
        validate_identifier(Host::KIND, &draft.hostname)?;

        let _guard = self.hosts_lock.lock();
        let created = self.create::<Host>(
            &self.layout.hosts_dir(),
            &draft.hostname,
            HOST_TEMPLATE,
            &draft.variables(),
        )?;
        info!("Host created: {}", draft.hostname);
        Ok(created)
    }

    fn create<T: Definition>(
        &self,
        dir: &Path,
        name: &str,
        template_key: &str,
        variables: &HashMap<String, String>,
    ) -> TemplateResult<Created> {
        if !dir.is_dir() {
            return Err(SpecError::NotFound(dir.to_path_buf()).into());
        }

        // Every file on disk counts, including ones that fail to decode.
        let name = name.to_lowercase();
        let existing = DefinitionReader::definition_names(dir);
        debug!("Found {} existing {} definitions in {:?}", existing.len(), T::KIND, dir);
        if existing.contains(&name) {
            return Err(TemplateError::AlreadyExists { kind: T::KIND, name });
        }

        let template = self.source.template(template_key)?;
        let rendered = self.renderer.render(template_key, &template, variables)?;
        serde_yaml::from_str::<T>(&rendered).map_err(|e| {
            TemplateError::RenderingFailed(format!(
                "{} produced an invalid {} definition: {}",
                template_key,
                T::KIND,
                e
            ))
        })?;

        let path = dir.join(format!("{}.yml", name));
        write_new_file(dir, &path, rendered.as_bytes()).map_err(|e| match e {
            TemplateError::WriteFailed { ref source, .. } if source.kind() == ErrorKind::AlreadyExists => {
                TemplateError::AlreadyExists { kind: T::KIND, name: name.clone() }
            }
            other => other,
        })?;

        Ok(Created {
            kind: T::KIND,
            name,
            path,
        })
    }
}

/// Write `content` to `path` through a temporary file in `dir`.
///
/// The file appears complete or not at all, and an existing `path` is never
/// replaced.
fn write_new_file(dir: &Path, path: &Path, content: &[u8]) -> TemplateResult<()> {
    let write_failed = |source: std::io::Error| TemplateError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_failed)?;
    file.write_all(content).map_err(write_failed)?;
    file.as_file().sync_all().map_err(write_failed)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(write_failed)?;
    }

    file.persist_noclobber(path).map_err(|e| write_failed(e.error))?;
    Ok(())
}

fn validate_identifier(kind: &'static str, name: &str) -> TemplateResult<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(TemplateError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}

fn quoted_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("\"{}\"", item)).collect();
    format!("[{}]", quoted.join(", "))
}

fn port_list(ports: &[u16]) -> String {
    let ports: Vec<String> = ports.iter().map(u16::to_string).collect();
    format!("[{}]", ports.join(", "))
}
