//! # range_iac
//!
//! Infrastructure facts derived from resolved ranger environments.
//!
//! - Jump host image resolution with per-environment overrides
//! - Per-pod plans (resource names, passwords, exposed ports) handed to
//!   infrastructure generation
//!
//! ## Example
//!
//! ```rust,no_run
//! use range_iac::{AmiResolver, InfraPlan, StaticImageTable};
//! use range_spec::{EnvironmentLoader, JumpFlavor};
//!
//! let loader = EnvironmentLoader::new("/srv/ranger");
//! let env = loader.load("blue-team").unwrap();
//!
//! let table = StaticImageTable::builtin().unwrap();
//! let images = AmiResolver::new(&table);
//! let kali = images.resolve_image(JumpFlavor::Kali, &env).unwrap();
//!
//! let plan = InfraPlan::build(&env, &loader.layout("blue-team").unwrap(), &images).unwrap();
//! println!("{} -> {}", kali, plan.to_json().unwrap());
//! ```

pub mod ami;
pub mod error;
pub mod plan;

pub use ami::{AmiResolver, ImageCatalog, ImageEntry, StaticImageTable};
pub use error::{IacError, IacResult};
pub use plan::{InfraPlan, JumpHostPlan, NetworkPlan, PodPlan};
