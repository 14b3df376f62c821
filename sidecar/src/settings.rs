//! Runtime settings: built-in defaults, then an optional settings file, then
//! the process environment (`ETCD_ENDPOINT`, `ETCD_USERNAME`,
//! `ETCD_PASSWORD`, `SIDECAR_PREFIX`, `LOOP`, ...), then command-line flags.

use crate::args::SidecarArgs;
use crate::error::{SidecarError, SidecarResult};
use common::EndpointStrategy;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_ETCD_ENDPOINT: &str = "http://localhost:2379";
pub const DEFAULT_LOOP_SECS: i64 = 60;
pub const DEFAULT_LISTEN: &str = "0.0.0.0:5000";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub etcd_endpoint: String,
    pub etcd_username: String,
    pub etcd_password: String,
    /// Single path segment the app is mounted under; empty means `/`.
    pub sidecar_prefix: String,
    #[serde(rename = "loop")]
    pub loop_secs: u64,
    pub listen: SocketAddr,
    pub static_dir: PathBuf,
    pub endpoint_strategy: EndpointStrategy,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("etcd_endpoint", &self.etcd_endpoint)
            .field("etcd_username", &self.etcd_username)
            .field("etcd_password", &"<redacted>")
            .field("sidecar_prefix", &self.sidecar_prefix)
            .field("loop_secs", &self.loop_secs)
            .field("listen", &self.listen)
            .field("static_dir", &self.static_dir)
            .field("endpoint_strategy", &self.endpoint_strategy)
            .finish()
    }
}

impl Settings {
    pub fn defaults() -> SidecarResult<ConfigBuilder<DefaultState>> {
        Ok(config::Config::builder()
            .set_default("etcd_endpoint", DEFAULT_ETCD_ENDPOINT)?
            .set_default("etcd_username", "")?
            .set_default("etcd_password", "")?
            .set_default("sidecar_prefix", "/")?
            .set_default("loop", DEFAULT_LOOP_SECS)?
            .set_default("listen", DEFAULT_LISTEN)?
            .set_default("static_dir", DEFAULT_STATIC_DIR)?
            .set_default("endpoint_strategy", "origin_prefix")?)
    }

    pub fn load(config_file: Option<&str>) -> SidecarResult<Self> {
        let mut builder = Self::defaults()?;
        if let Some(path) = config_file {
            builder = builder.add_source(config::File::with_name(path));
        }
        Self::from_builder(builder.add_source(config::Environment::default()))
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> SidecarResult<Self> {
        let mut settings: Settings = builder.build()?.try_deserialize()?;
        settings.sidecar_prefix = normalize_prefix(&settings.sidecar_prefix)?;
        Ok(settings)
    }

    pub fn apply_args(&mut self, args: &SidecarArgs) {
        if let Some(listen) = args.listen {
            self.listen = listen;
        }
        if let Some(dir) = &args.static_dir {
            self.static_dir = dir.clone();
        }
    }

    /// Path the app is served under, `""` at the root, `"/netswatch"` otherwise.
    pub fn mount_path(&self) -> String {
        if self.sidecar_prefix.is_empty() {
            String::new()
        } else {
            format!("/{}", self.sidecar_prefix)
        }
    }
}

/// `"/netswatch/"`, `"netswatch"` and `"/netswatch"` all become `"netswatch"`.
pub fn normalize_prefix(raw: &str) -> SidecarResult<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.contains('/') {
        return Err(SidecarError::InvalidPrefix(raw.to_string()));
    }
    Ok(trimmed.to_string())
}
