//! # range_templates
//!
//! Template rendering and definition creation for ranger.
//!
//! New networks and hosts are rendered from keyed templates and written
//! into an environment's directories. A creation either produces exactly one
//! new definition file or fails with no change on disk:
//!
//! - names are checked case-insensitively against every file on disk
//! - rendered output is decoded before anything is written
//! - the file is written to a temporary path and renamed into place
//!   without replacing anything
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use range_spec::EnvironmentLayout;
//! use range_templates::{DefinitionCreator, EmbeddedTemplates, HostDraft, NetworkDraft};
//!
//! let layout = EnvironmentLayout::new("/srv/ranger", "blue-team").unwrap();
//! let creator = DefinitionCreator::new(layout, Arc::new(EmbeddedTemplates));
//!
//! creator.create_host(&HostDraft::new("web").with_tcp([22, 80])).unwrap();
//! creator.create_network(&NetworkDraft::new("dmz").with_host("web")).unwrap();
//! ```

pub mod creator;
pub mod error;
pub mod renderer;
pub mod source;

pub use creator::{Created, DefinitionCreator, HostDraft, NetworkDraft};
pub use error::{TemplateError, TemplateResult};
pub use renderer::TemplateRenderer;
pub use source::{DirectoryTemplates, EmbeddedTemplates, TemplateSource, HOST_TEMPLATE, NETWORK_TEMPLATE};
