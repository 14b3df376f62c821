use serde::{Deserialize, Serialize};

/// Path the backend serves the topology document under.
pub const TOPOLOGY_SUFFIX: &str = "topo";

/// The parts of `window.location` the resolver needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLocation {
    pub origin: String,
    pub pathname: String,
    pub href: String,
}

impl PageLocation {
    pub fn new(
        origin: impl Into<String>,
        pathname: impl Into<String>,
        href: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            pathname: pathname.into(),
            href: href.into(),
        }
    }

    /// First non-root path segment, `""` when the page sits at `/`.
    pub fn first_segment(&self) -> &str {
        self.pathname.split('/').nth(1).unwrap_or_default()
    }
}

/// How the topology address is derived from the page address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointStrategy {
    /// `{origin}/{first path segment}/topo`
    #[default]
    OriginPrefix,
    /// `{href}topo`
    DirectAppend,
}

impl EndpointStrategy {
    pub fn resolve(self, location: &PageLocation) -> String {
        match self {
            Self::OriginPrefix => {
                let origin = location.origin.trim_end_matches('/');
                match location.first_segment() {
                    "" => format!("{origin}/{TOPOLOGY_SUFFIX}"),
                    prefix => format!("{origin}/{prefix}/{TOPOLOGY_SUFFIX}"),
                }
            }
            Self::DirectAppend => format!("{}{TOPOLOGY_SUFFIX}", location.href),
        }
    }
}
