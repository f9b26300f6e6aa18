//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Runtime settings for the `keyforge` binary.
///
/// Every flag can also come from a `KEYFORGE_*` environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "keyforge", version, about = "Issues signed session tokens for multiplayer games")]
pub struct Args {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "KEYFORGE_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// PKCS#8 PEM file holding the RSA private key.
    #[arg(long, env = "KEYFORGE_PRIVATE_KEY", default_value = "keys/private.pem")]
    pub private_key: PathBuf,

    /// X.509 SubjectPublicKeyInfo PEM file holding the RSA public key.
    #[arg(long, env = "KEYFORGE_PUBLIC_KEY", default_value = "keys/public.pem")]
    pub public_key: PathBuf,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "KEYFORGE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// `RUST_LOG` if set and valid, otherwise `--log-level`.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}
