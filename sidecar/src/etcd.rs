//! Minimal etcd v2 keys API client: recursive directory listings and key
//! deletion, with optional basic auth.

use crate::error::{SidecarError, SidecarResult};
use crate::settings::Settings;
use serde::Deserialize;
use std::net::Ipv4Addr;
use std::time::Duration;

pub const SUBNETS_DIR: &str = "netswatch/network/subnets";
pub const NODES_DIR: &str = "netswatch/network/nodes";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One node of a v2 keys listing. Directories carry children in `nodes`,
/// leaves carry a `value`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct EtcdNode {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub dir: bool,
    #[serde(default)]
    pub nodes: Vec<EtcdNode>,
}

#[derive(Deserialize)]
struct Listing {
    node: EtcdNode,
}

/// Children of the listed directory. An empty directory has no `nodes` key.
pub fn parse_listing(body: &str) -> SidecarResult<Vec<EtcdNode>> {
    Ok(serde_json::from_str::<Listing>(body)?.node.nodes)
}

/// Subnet address encoded in the last segment of a lease key, e.g.
/// `/netswatch/network/subnets/10.14.128.0-20` gives `10.14.128.0`.
pub fn extract_ip(key: &str) -> SidecarResult<Ipv4Addr> {
    let last = key.rsplit('/').next().unwrap_or_default();
    let addr = last.split_once('-').map_or(last, |(addr, _)| addr);
    addr.parse()
        .map_err(|_| SidecarError::InvalidKey(key.to_string()))
}

pub struct EtcdClient {
    http: reqwest::Client,
    endpoint: String,
    username: String,
    password: String,
}

impl EtcdClient {
    pub fn new(settings: &Settings) -> SidecarResult<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            endpoint: settings.etcd_endpoint.trim_end_matches('/').to_string(),
            username: settings.etcd_username.clone(),
            password: settings.etcd_password.clone(),
        })
    }

    pub fn key_url(&self, key: &str) -> String {
        format!("{}/v2/keys/{}", self.endpoint, key.trim_start_matches('/'))
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.username.is_empty() {
            request
        } else {
            request.basic_auth(&self.username, Some(&self.password))
        }
    }

    async fn list(&self, dir: &str) -> SidecarResult<Vec<EtcdNode>> {
        let url = format!("{}?recursive=true", self.key_url(dir));
        let response = self.authorized(self.http.get(&url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%url, %body, "etcd listing refused");
            return Err(SidecarError::Status {
                status: status.as_u16(),
                url,
            });
        }
        let entries = parse_listing(&response.text().await?)?;
        tracing::trace!(%url, entries = entries.len(), "etcd listing");
        Ok(entries)
    }

    /// Subnet leases, one leaf per lease.
    pub async fn subnets(&self) -> SidecarResult<Vec<EtcdNode>> {
        self.list(SUBNETS_DIR).await
    }

    /// Registered nodes, one directory per organisation.
    pub async fn node_groups(&self) -> SidecarResult<Vec<EtcdNode>> {
        self.list(NODES_DIR).await
    }

    pub async fn delete(&self, key: &str) -> SidecarResult<()> {
        let url = self.key_url(key);
        let response = self.authorized(self.http.delete(&url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SidecarError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(())
    }
}
