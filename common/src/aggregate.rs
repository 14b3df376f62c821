use crate::model::NodeRecord;
use indexmap::IndexMap;

/// Nodes partitioned by `location`.
///
/// Groups iterate in the order their key first appeared and members keep
/// their relative input order. Nothing is sorted or deduplicated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocationGroups<'a> {
    groups: IndexMap<&'a str, Vec<&'a NodeRecord>>,
}

impl<'a> LocationGroups<'a> {
    pub fn from_nodes(nodes: &'a [NodeRecord]) -> Self {
        let mut groups: IndexMap<&'a str, Vec<&'a NodeRecord>> = IndexMap::new();
        for node in nodes {
            groups.entry(node.location_key()).or_default().push(node);
        }
        tracing::debug!(nodes = nodes.len(), groups = groups.len(), "grouped nodes by location");
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, location: &str) -> Option<&[&'a NodeRecord]> {
        self.groups.get(location).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a NodeRecord])> + '_ {
        self.groups
            .iter()
            .map(|(location, members)| (*location, members.as_slice()))
    }

    /// Total number of grouped records; equals the input length.
    pub fn member_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
