//! In-process stand-ins shared by the integration tests: a fake etcd v2 keys
//! API and helpers to run warp servers on ephemeral ports.

#![allow(dead_code)]

use serde_json::{json, Value};
use sidecar::Settings;
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use warp::Filter;

pub const SUBNETS: &str = "/netswatch/network/subnets";
pub const NODES: &str = "/netswatch/network/nodes";

/// Picks a port nothing is listening on.
pub fn free_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr")
}

pub async fn wait_ready(addr: SocketAddr) {
    for _ in 0..200 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("server on {addr} never came up");
}

pub fn lease(ip: &str, org: &str, node_type: &str, hostname: &str) -> Value {
    json!({
        "key": format!("{SUBNETS}/{ip}-20"),
        "value": json!({
            "PublicIP": "203.0.113.7",
            "Meta": {
                "OrgName": org,
                "NodeType": node_type,
                "NodeName": hostname,
                "HostIP": format!("172.16.0.{}", hostname.len()),
            }
        }).to_string(),
        "modifiedIndex": 10,
        "createdIndex": 10
    })
}

pub fn node_group(org: &str, ips: &[&str]) -> Value {
    json!({
        "key": format!("{NODES}/{org}"),
        "dir": true,
        "nodes": ips
            .iter()
            .map(|ip| json!({"key": format!("{NODES}/{org}/{ip}-20"), "value": "{}"}))
            .collect::<Vec<_>>(),
    })
}

/// Serves recursive listings of the subnets and nodes directories and records
/// every DELETE. A directory left as `None` answers 404 like a missing key.
#[derive(Default)]
pub struct FakeEtcd {
    pub subnets: Option<Vec<Value>>,
    pub node_groups: Option<Vec<Value>>,
    pub deleted: Mutex<Vec<String>>,
    pub authorization: Mutex<Vec<Option<String>>>,
}

impl FakeEtcd {
    pub fn with_subnets(subnets: Vec<Value>) -> Self {
        Self {
            subnets: Some(subnets),
            ..Default::default()
        }
    }

    fn listing(&self, dir: &str) -> Option<Value> {
        let nodes = match dir {
            SUBNETS => self.subnets.as_ref(),
            NODES => self.node_groups.as_ref(),
            _ => None,
        }?;
        let mut node = json!({"key": dir, "dir": true});
        if !nodes.is_empty() {
            node["nodes"] = json!(nodes);
        }
        Some(json!({"action": "get", "node": node}))
    }

    pub async fn start(self) -> (Arc<Self>, SocketAddr) {
        let etcd = Arc::new(self);

        let get = {
            let etcd = etcd.clone();
            warp::get()
                .and(warp::path!("v2" / "keys" / ..))
                .and(warp::path::tail())
                .and(warp::header::optional::<String>("authorization"))
                .map(move |tail: warp::path::Tail, auth: Option<String>| {
                    etcd.authorization.lock().unwrap().push(auth);
                    let dir = format!("/{}", tail.as_str());
                    match etcd.listing(&dir) {
                        Some(body) => warp::reply::with_status(
                            warp::reply::json(&body),
                            warp::http::StatusCode::OK,
                        ),
                        None => warp::reply::with_status(
                            warp::reply::json(
                                &json!({"errorCode": 100, "message": "Key not found", "cause": dir}),
                            ),
                            warp::http::StatusCode::NOT_FOUND,
                        ),
                    }
                })
        };

        let delete = {
            let etcd = etcd.clone();
            warp::delete()
                .and(warp::path!("v2" / "keys" / ..))
                .and(warp::path::tail())
                .map(move |tail: warp::path::Tail| {
                    let key = format!("/{}", tail.as_str());
                    etcd.deleted.lock().unwrap().push(key.clone());
                    warp::reply::json(&json!({"action": "delete", "node": {"key": key}}))
                })
        };

        let addr = free_addr();
        tokio::spawn(warp::serve(get.or(delete)).run(addr));
        wait_ready(addr).await;
        (etcd, addr)
    }
}

pub fn settings_for(etcd: SocketAddr, prefix: &str) -> Settings {
    let mut settings = Settings::from_builder(Settings::defaults().expect("defaults"))
        .expect("default settings");
    settings.etcd_endpoint = format!("http://{etcd}");
    settings.sidecar_prefix = prefix.to_string();
    settings
}
