//! # range_spec
//!
//! Resolution of competition range definitions for ranger.
//!
//! An environment lives in its own directory and references networks by
//! name; networks reference hosts by name. Loading an environment resolves
//! the whole graph eagerly, skipping (and reporting) definitions that fail
//! to decode.
//!
//! ## Layout
//!
//! ```text
//! <root>/environments/<name>/
//! ├── env.yml
//! ├── networks/<network>.yml
//! ├── hosts/<host>.yml
//! └── terraform/
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use range_spec::{EnvironmentLoader, PortAggregator};
//!
//! let loader = EnvironmentLoader::new("/srv/ranger");
//! let env = loader.load("blue-team").unwrap();
//!
//! for (network, host) in env.hosts() {
//!     println!("{}/{}", network.name, host.hostname);
//! }
//!
//! let tcp = PortAggregator::public_tcp_ports(&env);
//! let namer = env.pod_namer();
//! println!("{} ports, pod 0 is {}", tcp.len(), namer.suffix(0));
//! ```

pub mod error;
pub mod layout;
pub mod loader;
pub mod models;
pub mod naming;
pub mod ports;
pub mod reader;
pub mod resolver;
pub mod validator;

pub use error::{SpecError, SpecResult};
pub use layout::EnvironmentLayout;
pub use loader::EnvironmentLoader;
pub use models::*;
pub use naming::{determined_password, PodNamer};
pub use ports::PortAggregator;
pub use reader::{definition_name, normalize_name, Definition, DefinitionReader, Resolution};
pub use resolver::{HostResolver, NetworkResolver};
pub use validator::{EnvironmentValidator, ValidationResult};
