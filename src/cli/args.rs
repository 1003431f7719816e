use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pdconfig::{PdError, ProductVersion, ProviderConfig};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub provider: ProviderArgs,

    /// State file. Defaults to the platform data directory.
    #[arg(long, global = true, env = "PDCONFIG_STATE_FILE")]
    pub state: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug)]
pub struct ProviderArgs {
    #[arg(long, global = true, env = "PINGDIRECTORY_PROVIDER_HTTPS_HOST")]
    pub https_host: Option<String>,

    #[arg(long, global = true, env = "PINGDIRECTORY_PROVIDER_USERNAME")]
    pub username: Option<String>,

    #[arg(
        long,
        global = true,
        env = "PINGDIRECTORY_PROVIDER_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// e.g. 9.3 or 9.3.0.0
    #[arg(long, global = true, env = "PINGDIRECTORY_PROVIDER_PRODUCT_VERSION")]
    pub product_version: Option<String>,

    #[arg(long, global = true, env = "PINGDIRECTORY_PROVIDER_INSECURE_TRUST_ALL_TLS")]
    pub insecure_trust_all_tls: bool,
}

impl ProviderArgs {
    /// Full connection settings, for commands that talk to the server.
    pub fn config(&self) -> Result<ProviderConfig, PdError> {
        ProviderConfig::from_parts(
            self.https_host.clone(),
            self.username.clone(),
            self.password.clone(),
            self.product_version.clone(),
            self.insecure_trust_all_tls,
        )
    }

    /// Planning is offline and only needs the product version.
    pub fn product_version(&self) -> Result<ProductVersion, PdError> {
        let version = self.product_version.as_deref().ok_or_else(|| {
            PdError::Config(
                "missing provider settings: product_version (PINGDIRECTORY_PROVIDER_PRODUCT_VERSION)"
                    .to_string(),
            )
        })?;
        Ok(ProductVersion::parse_supported(version)?)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the supported resource types.
    Resources,
    /// Show the attributes of a resource type.
    Schema { resource: String },
    /// Show what applying the configuration documents would do.
    Plan(DocumentArgs),
    Apply(DocumentArgs),
    /// Re-read every tracked object from the server.
    Refresh,
    /// Delete a tracked object and stop tracking it.
    Destroy { address: String },
    /// Start tracking an existing object by name (or parent name).
    Import {
        resource: String,
        /// Ignored for singleton objects.
        id: Option<String>,
    },
    /// Look up an object on the server without tracking it.
    Read {
        resource: String,
        id: Option<String>,
    },
    /// Show tracked state, or one tracked object.
    Show { address: Option<String> },
}

#[derive(clap::Args, Debug)]
pub struct DocumentArgs {
    /// JSON file with one configuration document or an array of them.
    pub file: PathBuf,
}
