//! Wire model of the topology document served at `/topo`.
//!
//! Records keep every field they do not interpret in a flattened `extra`
//! map so that styling hints (`group`, `title`, `size`, `color`, `shape`,
//! `shapeProperties`, `value`, `scaling`, ...) reach the rendering surface
//! exactly as the backend sent them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Identity of a node. The backend emits integers; strings are accepted too.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Number(i64),
    Text(String),
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub hostip: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub net: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub nodetype: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Scalars become their text form; arrays, objects and null become `None`.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => Some(s),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

impl Default for NodeId {
    fn default() -> Self {
        Self::Number(0)
    }
}

impl NodeRecord {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Grouping key. A record without a location lands in the `""` group.
    pub fn location_key(&self) -> &str {
        self.location.as_deref().unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl EdgeRecord {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            extra: Map::new(),
        }
    }
}

/// Aggregate figures computed by the backend. Shown as-is, never re-derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCounters {
    pub total: u64,
    pub router: u64,
    pub node: u64,
    pub internal: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyPayload {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    pub info: SummaryCounters,
}

impl TopologyPayload {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_keeps_styling_hints() {
        let raw = json!({
            "id": 3,
            "label": "edge-gw(10.14.128.0)",
            "group": 2,
            "size": 20,
            "shape": "square",
            "color": { "background": "#1982C4", "border": "#8AC926" },
            "location": "telecom",
            "hostname": "edge-gw",
            "hostip": "192.168.7.4",
            "net": "10.14.128.0",
            "nodetype": "router"
        });
        let node: NodeRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(node.id, NodeId::Number(3));
        assert_eq!(node.location_key(), "telecom");
        assert_eq!(node.extra.get("shape"), Some(&json!("square")));
        assert_eq!(serde_json::to_value(&node).unwrap(), raw);
    }

    #[test]
    fn missing_or_null_location_is_empty_key() {
        let missing: NodeRecord = serde_json::from_value(json!({ "id": 1 })).unwrap();
        let null: NodeRecord =
            serde_json::from_value(json!({ "id": 2, "location": null })).unwrap();
        assert_eq!(missing.location_key(), "");
        assert_eq!(null.location_key(), "");
    }

    #[test]
    fn numeric_location_becomes_group_key() {
        let payload = TopologyPayload::from_json(
            r#"{"nodes": [
                {"id": 1, "location": "A", "hostname": "h1"},
                {"id": 2, "location": 7, "hostname": "h2"}
            ], "edges": [], "info": {"total": 2, "router": 0, "node": 2, "internal": 0}}"#,
        )
        .unwrap();
        assert_eq!(payload.nodes[1].location_key(), "7");
        assert_eq!(payload.nodes[1].hostname.as_deref(), Some("h2"));
    }

    #[test]
    fn numeric_hostname_is_kept_as_text() {
        let payload = TopologyPayload::from_json(
            r#"{"nodes": [{"id": 1, "location": "A", "hostname": 42, "nodetype": true}],
                "edges": [], "info": {"total": 1, "router": 0, "node": 1, "internal": 0}}"#,
        )
        .unwrap();
        assert_eq!(payload.nodes[0].hostname.as_deref(), Some("42"));
        assert_eq!(payload.nodes[0].nodetype.as_deref(), Some("true"));
    }

    #[test]
    fn structured_fields_fall_back_to_empty() {
        let node: NodeRecord = serde_json::from_value(json!({
            "id": 1,
            "location": {"site": "A"},
            "net": [10, 0, 0, 0],
            "hostip": null
        }))
        .unwrap();
        assert_eq!(node.location_key(), "");
        assert!(node.net.is_none());
        assert!(node.hostip.is_none());
    }

    #[test]
    fn string_ids_are_accepted() {
        let edge: EdgeRecord =
            serde_json::from_value(json!({ "from": "a", "to": 7, "value": 1 })).unwrap();
        assert_eq!(edge.from, NodeId::from("a"));
        assert_eq!(edge.to, NodeId::from(7));
        assert_eq!(edge.extra.get("value"), Some(&json!(1)));
    }

    #[test]
    fn payload_requires_all_sections() {
        let err = TopologyPayload::from_json(r#"{"nodes": [], "edges": []}"#);
        assert!(err.is_err());

        let ok = TopologyPayload::from_json(
            r#"{"nodes": [], "edges": [], "info": {"total": 0, "router": 0, "node": 0, "internal": 0}}"#,
        )
        .unwrap();
        assert!(ok.nodes.is_empty());
    }
}
