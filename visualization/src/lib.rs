//! Browser side of the topology dashboard: reads the page, fetches `/topo`,
//! draws the graph with vis-network and fills the info panel.

pub mod fetch;
pub mod page;
pub mod panel;
pub mod surface;

use common::Pipeline;
use fetch::HttpSource;
use panel::DocumentPanel;
use surface::{NetworkHandle, VisNetwork};
use tracing_subscriber::fmt::format::Pretty;
use tracing_subscriber::prelude::*;
use tracing_web::{performance_layer, MakeWebConsoleWriter};
#[cfg(not(test))]
use wasm_bindgen::prelude::*;

/// Module entry point: console logging, then one load of the page.
#[cfg_attr(not(test), wasm_bindgen(start))]
pub fn start() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false) // Only partially supported across browsers
        .without_time() // std::time is not available in browsers
        .with_writer(MakeWebConsoleWriter::new());
    let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(perf_layer)
        .init();

    wasm_bindgen_futures::spawn_local(async {
        // the network lives on in JS; nothing else to do with the handle
        let _ = load().await;
    });
}

/// One fetch-and-render pass for the current page. Failures are already
/// logged by the pipeline, so `None` only tells the caller nothing was drawn.
pub async fn load() -> Option<NetworkHandle> {
    let Some(window) = web_sys::window() else {
        tracing::error!("no window, not running in a browser page");
        return None;
    };
    let Some(document) = window.document() else {
        tracing::error!("window has no document");
        return None;
    };
    let Some(location) = page::page_location(&window) else {
        tracing::error!("could not read window.location");
        return None;
    };
    let config = page::pipeline_config(&window);

    let pipeline = Pipeline::new(
        HttpSource,
        VisNetwork::new(window),
        DocumentPanel::new(document),
    );
    let rendered = pipeline.run(&config, &location).await.ok()?;
    tracing::info!(panel_written = rendered.panel_written, "topology rendered");
    Some(rendered.handle)
}
