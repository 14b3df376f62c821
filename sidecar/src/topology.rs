//! Turns subnet leases into the `/topo` document the dashboard draws.

use crate::etcd::{extract_ip, EtcdClient, EtcdNode};
use crate::error::{SidecarError, SidecarResult};
use common::{EdgeRecord, NodeRecord, SummaryCounters, TopologyPayload};
use itertools::Itertools;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::net::Ipv4Addr;

pub const ROUTER: &str = "router";
pub const NODE: &str = "node";
pub const INTERNAL: &str = "internal";

const ROUTER_EDGE_WIDTH: u32 = 1;
const ROUTER_BACKGROUND: &str = "#1982C4";
const ROUTER_BORDER: &str = "#8AC926";
const ROUTER_SIZE: u32 = 20;

#[derive(Deserialize)]
struct LeaseValue {
    #[serde(rename = "Meta")]
    meta: LeaseMeta,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LeaseMeta {
    org_name: String,
    node_type: String,
    node_name: String,
    #[serde(rename = "HostIP")]
    host_ip: String,
}

/// What a subnet lease says about the host holding it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubnetLease {
    pub ip: Ipv4Addr,
    pub org: String,
    pub node_type: String,
    pub hostname: String,
    pub host_ip: String,
}

impl SubnetLease {
    pub fn from_entry(entry: &EtcdNode) -> SidecarResult<Self> {
        let ip = extract_ip(&entry.key)?;
        let value = entry
            .value
            .as_deref()
            .ok_or_else(|| SidecarError::MissingValue(entry.key.clone()))?;
        let LeaseValue { meta } = serde_json::from_str(value)?;
        Ok(Self {
            ip,
            org: meta.org_name,
            node_type: meta.node_type,
            hostname: meta.node_name,
            host_ip: meta.host_ip,
        })
    }
}

/// A lease with its graph identity: `id` counts from 1 in listing order,
/// `group` numbers organisations from 1 in order of first appearance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawNode {
    pub id: i64,
    pub group: i64,
    pub lease: SubnetLease,
}

impl RawNode {
    pub fn is_router(&self) -> bool {
        self.lease.node_type == ROUTER
    }
}

/// Parses and numbers a subnet listing. Unreadable entries are skipped.
pub fn raw_nodes(entries: &[EtcdNode]) -> Vec<RawNode> {
    let mut orgs: HashMap<String, i64> = HashMap::new();
    entries
        .iter()
        .filter_map(|entry| match SubnetLease::from_entry(entry) {
            Ok(lease) => Some(lease),
            Err(error) => {
                tracing::warn!(key = %entry.key, %error, "skipping subnet lease");
                None
            }
        })
        .zip(1..)
        .map(|(lease, id)| {
            let next = orgs.len() as i64 + 1;
            let group = *orgs.entry(lease.org.clone()).or_insert(next);
            RawNode { id, group, lease }
        })
        .collect()
}

pub fn build_nodes(raw: &[RawNode]) -> Vec<NodeRecord> {
    raw.iter()
        .map(|node| {
            let lease = &node.lease;
            let mut record = NodeRecord {
                label: Some(lease.hostname.clone()),
                location: Some(lease.org.clone()),
                hostname: Some(lease.hostname.clone()),
                hostip: Some(lease.host_ip.clone()),
                net: Some(lease.ip.to_string()),
                nodetype: Some(lease.node_type.clone()),
                ..NodeRecord::new(node.id)
            };
            record.extra.insert("group".into(), json!(node.group));
            record.extra.insert(
                "title".into(),
                json!(format!(
                    "<h4>Hostname: {}</h4><h4>Host IP: {}</h4><h4>Net: {}</h4>",
                    lease.hostname, lease.host_ip, lease.ip
                )),
            );

            match lease.node_type.as_str() {
                ROUTER => {
                    record.label = Some(format!("{}({})", lease.org, lease.ip));
                    record.extra.insert("size".into(), json!(ROUTER_SIZE));
                    record.extra.insert(
                        "color".into(),
                        json!({"background": ROUTER_BACKGROUND, "border": ROUTER_BORDER}),
                    );
                    record.extra.insert("shape".into(), json!("square"));
                }
                INTERNAL => {
                    record
                        .extra
                        .insert("shapeProperties".into(), json!({"borderDashes": [5, 5]}));
                }
                _ => {}
            }
            record
        })
        .collect()
}

/// Every non-router links to the routers of its organisation, and every pair
/// of routers is linked once.
pub fn build_edges(raw: &[RawNode]) -> Vec<EdgeRecord> {
    let routers = raw.iter().filter(|node| node.is_router()).collect_vec();

    let members = routers.iter().flat_map(|router| {
        raw.iter()
            .filter(move |node| !node.is_router() && node.lease.org == router.lease.org)
            .map(move |node| EdgeRecord::new(node.id, router.id))
    });

    let backbone = routers
        .iter()
        .map(|router| router.id)
        .array_combinations::<2>()
        .map(|[from, to]| {
            let mut edge = EdgeRecord::new(from, to);
            edge.extra.insert("value".into(), json!(ROUTER_EDGE_WIDTH));
            edge.extra
                .insert("scaling".into(), json!({"min": 1, "max": 6}));
            edge
        });

    members.chain(backbone).collect()
}

/// Anything that is neither a router nor a plain node counts as internal.
pub fn build_info(raw: &[RawNode]) -> SummaryCounters {
    raw.iter().fold(
        SummaryCounters {
            total: raw.len() as u64,
            ..Default::default()
        },
        |mut info, node| {
            match node.lease.node_type.as_str() {
                ROUTER => info.router += 1,
                NODE => info.node += 1,
                _ => info.internal += 1,
            }
            info
        },
    )
}

pub fn build_topology(raw: &[RawNode]) -> TopologyPayload {
    TopologyPayload {
        nodes: build_nodes(raw),
        edges: build_edges(raw),
        info: build_info(raw),
    }
}

/// Reads the current leases and builds the document. If etcd can't be read
/// the dashboard gets an empty topology rather than an error page.
pub async fn load_topology(client: &EtcdClient) -> TopologyPayload {
    match client.subnets().await {
        Ok(entries) => {
            let raw = raw_nodes(&entries);
            tracing::debug!(leases = entries.len(), nodes = raw.len(), "topology loaded");
            build_topology(&raw)
        }
        Err(error) => {
            tracing::error!(%error, "Error loading nodes");
            build_topology(&[])
        }
    }
}
