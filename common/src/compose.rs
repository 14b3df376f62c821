//! Turns a fetched payload into render-ready values: the node/edge dataset for
//! the graph surface and the structured summary + location table for the
//! info panel.

use crate::aggregate::LocationGroups;
use crate::model::{EdgeRecord, NodeRecord, SummaryCounters, TopologyPayload};
use serde::Serialize;

pub const TABLE_HEADERS: [&str; 5] = ["Location", "Hostname", "Host IP", "Net", "Node Type"];

/// Node and edge collections for the rendering surface, passed through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GraphDataset {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SummaryView {
    pub counters: SummaryCounters,
}

impl SummaryView {
    /// Label and figure pairs in display order.
    pub fn entries(&self) -> [(&'static str, u64); 4] {
        let c = self.counters;
        [
            ("Total", c.total),
            ("router", c.router),
            ("node", c.node),
            ("internal", c.internal),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostRow {
    pub hostname: String,
    pub host_ip: String,
    pub net: String,
    pub node_type: String,
}

impl From<&NodeRecord> for HostRow {
    fn from(node: &NodeRecord) -> Self {
        Self {
            hostname: node.hostname.clone().unwrap_or_default(),
            host_ip: node.hostip.clone().unwrap_or_default(),
            net: node.net.clone().unwrap_or_default(),
            node_type: node.nodetype.clone().unwrap_or_default(),
        }
    }
}

impl HostRow {
    pub fn cells(&self) -> [&str; 4] {
        [
            self.hostname.as_str(),
            self.host_ip.as_str(),
            self.net.as_str(),
            self.node_type.as_str(),
        ]
    }
}

/// One location's contiguous block of table rows.
///
/// The location cell sits alone in a leading row and spans that row plus
/// every host row, hence `row_span == rows.len() + 1`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocationSection {
    pub location: String,
    pub row_span: usize,
    pub rows: Vec<HostRow>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocationTable {
    pub sections: Vec<LocationSection>,
}

impl LocationTable {
    pub fn from_groups(groups: &LocationGroups<'_>) -> Self {
        let sections = groups
            .iter()
            .map(|(location, members)| LocationSection {
                location: location.to_string(),
                row_span: members.len() + 1,
                rows: members.iter().map(|node| HostRow::from(*node)).collect(),
            })
            .collect();
        Self { sections }
    }

    /// Host rows across all sections.
    pub fn data_row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }
}

/// Structured content of the info panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InfoPanel {
    pub summary: SummaryView,
    pub table: LocationTable,
}

/// Everything one pipeline run hands to its sinks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Presentation {
    pub dataset: GraphDataset,
    pub panel: InfoPanel,
}

/// Consume a payload and build both render artifacts from it.
pub fn compose(payload: TopologyPayload) -> Presentation {
    let table = {
        let groups = LocationGroups::from_nodes(&payload.nodes);
        LocationTable::from_groups(&groups)
    };
    let panel = InfoPanel {
        summary: SummaryView {
            counters: payload.info,
        },
        table,
    };
    Presentation {
        dataset: GraphDataset {
            nodes: payload.nodes,
            edges: payload.edges,
        },
        panel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeId;

    fn host(id: i64, location: &str, hostname: &str, nodetype: &str) -> NodeRecord {
        NodeRecord {
            location: Some(location.to_string()),
            hostname: Some(hostname.to_string()),
            hostip: Some(format!("192.168.0.{id}")),
            net: Some(format!("10.{id}.0.0")),
            nodetype: Some(nodetype.to_string()),
            ..NodeRecord::new(id)
        }
    }

    fn payload() -> TopologyPayload {
        TopologyPayload {
            nodes: vec![
                host(1, "A", "h1", "router"),
                host(2, "B", "h2", "node"),
                host(3, "A", "h3", "internal"),
            ],
            edges: vec![EdgeRecord::new(3, 1), EdgeRecord::new(2, 99)],
            info: SummaryCounters {
                total: 10,
                router: 2,
                node: 7,
                internal: 1,
            },
        }
    }

    #[test]
    fn summary_reports_counters_verbatim() {
        let presentation = compose(payload());
        let entries = presentation.panel.summary.entries();
        assert_eq!(
            entries,
            [("Total", 10), ("router", 2), ("node", 7), ("internal", 1)]
        );
    }

    #[test]
    fn table_sections_follow_groups() {
        let table = compose(payload()).panel.table;

        assert_eq!(table.sections.len(), 2);
        let a = &table.sections[0];
        assert_eq!(a.location, "A");
        assert_eq!(a.row_span, 3);
        assert_eq!(
            a.rows.iter().map(|r| r.hostname.as_str()).collect::<Vec<_>>(),
            vec!["h1", "h3"]
        );
        assert_eq!(a.rows[1].cells(), ["h3", "192.168.0.3", "10.3.0.0", "internal"]);

        let b = &table.sections[1];
        assert_eq!(b.location, "B");
        assert_eq!(b.row_span, 2);
        assert_eq!(table.data_row_count(), 3);
    }

    #[test]
    fn dataset_passes_records_through() {
        let original = payload();
        let dataset = compose(original.clone()).dataset;
        assert_eq!(dataset.nodes, original.nodes);
        assert_eq!(dataset.edges, original.edges);
        // dangling endpoint survives untouched
        assert_eq!(dataset.edges[1].to, NodeId::Number(99));
    }

    #[test]
    fn missing_fields_become_empty_cells() {
        let row = HostRow::from(&NodeRecord::new(5));
        assert_eq!(row.cells(), ["", "", "", ""]);
    }
}
