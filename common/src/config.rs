use crate::endpoint::EndpointStrategy;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GRAPH_CONTAINER: &str = "topo";
pub const DEFAULT_PANEL: &str = "info";

/// Options handed to the rendering surface, serialized in its own key casing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Auto-layout simulation
    pub physics: bool,
    pub nodes: NodeStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            physics: true,
            nodes: NodeStyle::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeStyle {
    pub shape: String,
    pub size: u32,
    pub border_width: u32,
    pub color: NodeColor,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            shape: "dot".to_string(),
            size: 15,
            border_width: 2,
            color: NodeColor::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeColor {
    pub background: String,
}

impl Default for NodeColor {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
        }
    }
}

/// Everything a page load needs to know to run the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub endpoint: EndpointStrategy,
    pub graph_container: String,
    pub panel: String,
    pub render: RenderOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointStrategy::default(),
            graph_container: DEFAULT_GRAPH_CONTAINER.to_string(),
            panel: DEFAULT_PANEL.to_string(),
            render: RenderOptions::default(),
        }
    }
}
