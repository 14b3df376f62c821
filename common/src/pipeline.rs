//! One fetch-and-render pass over the topology endpoint.
//!
//! The transport, the graph surface and the page are collaborators behind
//! traits; the browser crate supplies the real ones and tests supply fakes.
//! No state outlives a run except the surface handle, which is returned.

use crate::compose::{compose, GraphDataset, InfoPanel};
use crate::config::{PipelineConfig, RenderOptions};
use crate::endpoint::PageLocation;
use crate::error::{TopologyError, TopologyResult};
use crate::model::TopologyPayload;

/// Context attached to every reported failure.
pub const FAILURE_CONTEXT: &str = "Error loading topology data";

/// Performs the single topology request.
#[allow(async_fn_in_trait)]
pub trait TopologySource {
    async fn fetch(&self, endpoint: &str) -> TopologyResult<TopologyPayload>;
}

/// Graph engine that takes ownership of a dataset and runs its own
/// layout/interaction loop from then on.
pub trait RenderSurface {
    type Handle;

    fn draw(
        &self,
        container: &str,
        dataset: GraphDataset,
        options: &RenderOptions,
    ) -> TopologyResult<Self::Handle>;
}

/// Page insertion point for the info panel.
pub trait PanelSink {
    type Target;

    fn find(&self, id: &str) -> Option<Self::Target>;
    fn write(&self, target: Self::Target, panel: InfoPanel);
}

/// Developer-facing failure log.
pub trait Diagnostics {
    fn report(&self, error: &TopologyError, context: &str);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, error: &TopologyError, context: &str) {
        tracing::error!(%error, "{context}");
    }
}

impl<T: TopologySource + ?Sized> TopologySource for &T {
    async fn fetch(&self, endpoint: &str) -> TopologyResult<TopologyPayload> {
        (**self).fetch(endpoint).await
    }
}

impl<T: RenderSurface + ?Sized> RenderSurface for &T {
    type Handle = T::Handle;

    fn draw(
        &self,
        container: &str,
        dataset: GraphDataset,
        options: &RenderOptions,
    ) -> TopologyResult<Self::Handle> {
        (**self).draw(container, dataset, options)
    }
}

impl<T: PanelSink + ?Sized> PanelSink for &T {
    type Target = T::Target;

    fn find(&self, id: &str) -> Option<Self::Target> {
        (**self).find(id)
    }

    fn write(&self, target: Self::Target, panel: InfoPanel) {
        (**self).write(target, panel)
    }
}

impl<T: Diagnostics + ?Sized> Diagnostics for &T {
    fn report(&self, error: &TopologyError, context: &str) {
        (**self).report(error, context)
    }
}

#[derive(Debug)]
pub struct Rendered<H> {
    pub handle: H,
    pub panel_written: bool,
}

pub struct Pipeline<S, R, P, D = TracingDiagnostics> {
    source: S,
    surface: R,
    panel: P,
    diagnostics: D,
}

impl<S, R, P> Pipeline<S, R, P, TracingDiagnostics>
where
    S: TopologySource,
    R: RenderSurface,
    P: PanelSink,
{
    pub fn new(source: S, surface: R, panel: P) -> Self {
        Self::with_diagnostics(source, surface, panel, TracingDiagnostics)
    }
}

impl<S, R, P, D> Pipeline<S, R, P, D>
where
    S: TopologySource,
    R: RenderSurface,
    P: PanelSink,
    D: Diagnostics,
{
    pub fn with_diagnostics(source: S, surface: R, panel: P, diagnostics: D) -> Self {
        Self {
            source,
            surface,
            panel,
            diagnostics,
        }
    }

    /// Resolve, fetch, compose, then hand the results to the surface and the
    /// panel. Any failure is reported once and nothing is written to the page.
    pub async fn run(
        &self,
        config: &PipelineConfig,
        location: &PageLocation,
    ) -> TopologyResult<Rendered<R::Handle>> {
        let endpoint = config.endpoint.resolve(location);
        tracing::debug!(%endpoint, strategy = ?config.endpoint, "fetching topology");

        let payload = self
            .source
            .fetch(&endpoint)
            .await
            .inspect_err(|e| self.diagnostics.report(e, FAILURE_CONTEXT))?;
        tracing::info!(
            nodes = payload.nodes.len(),
            edges = payload.edges.len(),
            "topology received"
        );

        let presentation = compose(payload);

        let handle = self
            .surface
            .draw(
                &config.graph_container,
                presentation.dataset,
                &config.render,
            )
            .inspect_err(|e| self.diagnostics.report(e, FAILURE_CONTEXT))?;

        let panel_written = match self.panel.find(&config.panel) {
            Some(target) => {
                self.panel.write(target, presentation.panel);
                true
            }
            None => {
                tracing::debug!(panel = %config.panel, "no info panel on page, skipping table");
                false
            }
        };

        Ok(Rendered {
            handle,
            panel_written,
        })
    }
}
