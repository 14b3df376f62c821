//! Removes node registrations whose subnet lease has gone away.

use crate::error::SidecarResult;
use crate::etcd::{extract_ip, EtcdClient, EtcdNode};
use std::collections::{BTreeMap, HashSet};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

/// Keys under the nodes directory whose address has no subnet lease, in
/// address order. Keys that don't end in an address are left alone.
pub fn find_orphans(subnets: &[EtcdNode], node_groups: &[EtcdNode]) -> Vec<String> {
    let leased: HashSet<Ipv4Addr> = subnets
        .iter()
        .filter_map(|entry| extract_ip(&entry.key).ok())
        .collect();

    let registered: BTreeMap<Ipv4Addr, &str> = node_groups
        .iter()
        .flat_map(|org| {
            if org.nodes.is_empty() {
                tracing::debug!(org = %org.key, "no registered nodes");
            }
            org.nodes.iter()
        })
        .filter_map(|node| match extract_ip(&node.key) {
            Ok(ip) => Some((ip, node.key.as_str())),
            Err(error) => {
                tracing::warn!(%error, "ignoring node key");
                None
            }
        })
        .collect();

    registered
        .into_iter()
        .filter(|(ip, _)| !leased.contains(ip))
        .map(|(_, key)| key.to_string())
        .collect()
}

/// One reconciliation pass. Returns how many orphans were deleted.
///
/// A failed subnet listing aborts the pass: with no leases known every node
/// would look orphaned.
pub async fn sync_once(client: &EtcdClient) -> SidecarResult<usize> {
    tracing::info!("Synchronize nodes and subnets");
    let subnets = client.subnets().await?;
    let node_groups = client.node_groups().await?;
    if node_groups.is_empty() {
        return Ok(0);
    }

    let mut deleted = 0;
    for key in find_orphans(&subnets, &node_groups) {
        tracing::info!(%key, "found orphan node");
        match client.delete(&key).await {
            Ok(()) => {
                tracing::info!(%key, "orphan node deleted");
                deleted += 1;
            }
            Err(error) => tracing::error!(%key, %error, "error while deleting orphan node"),
        }
    }
    Ok(deleted)
}

/// Runs [`sync_once`] every `period` until the task is dropped.
pub async fn run(client: Arc<EtcdClient>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if let Err(error) = sync_once(&client).await {
            tracing::error!(%error, "node/subnet sync failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(key: &str) -> EtcdNode {
        EtcdNode {
            key: key.to_string(),
            value: Some("{}".into()),
            ..Default::default()
        }
    }

    fn org(name: &str, ips: &[&str]) -> EtcdNode {
        EtcdNode {
            key: format!("/netswatch/network/nodes/{name}"),
            dir: true,
            nodes: ips
                .iter()
                .map(|ip| leaf(&format!("/netswatch/network/nodes/{name}/{ip}-20")))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn nodes_without_lease_are_orphans() {
        let subnets = [
            leaf("/netswatch/network/subnets/10.1.0.0-20"),
            leaf("/netswatch/network/subnets/10.2.0.0-20"),
        ];
        let groups = [
            org("acme", &["10.1.0.0", "10.1.16.0"]),
            org("globex", &["10.2.0.0", "10.0.16.0"]),
        ];
        assert_eq!(
            find_orphans(&subnets, &groups),
            vec![
                "/netswatch/network/nodes/globex/10.0.16.0-20".to_string(),
                "/netswatch/network/nodes/acme/10.1.16.0-20".to_string(),
            ]
        );
    }

    #[test]
    fn fully_leased_has_no_orphans() {
        let subnets = [leaf("/netswatch/network/subnets/10.1.0.0-20")];
        let groups = [org("acme", &["10.1.0.0"]), org("empty", &[])];
        assert!(find_orphans(&subnets, &groups).is_empty());
    }

    #[test]
    fn unparseable_node_keys_are_left_alone() {
        let mut group = org("acme", &[]);
        group.nodes.push(leaf("/netswatch/network/nodes/acme/not-an-ip"));
        assert!(find_orphans(&[], &[group]).is_empty());
    }
}
