//! pdconfig - PingDirectory configuration as code
//!
//! A library for planning and applying PingDirectory configuration objects through
//! the server's REST configuration API, with a Terraform-style lifecycle.

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod diff;
pub mod handler;
pub mod output;
pub mod plan;
pub mod resource;
pub mod resources;
pub mod schema;
pub mod terraform;
pub mod validate;
pub mod value;
pub mod version;

mod error;

pub use api::{ConfigApi, ConfigApiError, ConfigClient};
pub use config::ProviderConfig;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::PdError;
pub use handler::{HandlerError, ResourceHandler};
pub use plan::{Action, Plan, plan};
pub use resource::{ResourceConfig, ResourceModel};
pub use value::AttrValue;
pub use version::ProductVersion;
