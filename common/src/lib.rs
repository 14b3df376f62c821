pub mod aggregate;
pub mod compose;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod model;
pub mod pipeline;

pub use aggregate::LocationGroups;
pub use compose::{compose, GraphDataset, InfoPanel, LocationTable, Presentation};
pub use config::{PipelineConfig, RenderOptions};
pub use endpoint::{EndpointStrategy, PageLocation};
pub use error::{TopologyError, TopologyResult};
pub use model::{EdgeRecord, NodeId, NodeRecord, SummaryCounters, TopologyPayload};
pub use pipeline::{Diagnostics, PanelSink, Pipeline, RenderSurface, TopologySource};

/// Initialize a tracing subscriber for tests. Safe to call multiple times.
#[cfg(test)]
pub(crate) fn init_test_tracing() {
    use std::sync::Once;
    static START: Once = Once::new();
    START.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}
