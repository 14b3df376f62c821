//! HTTP surface of the sidecar, everything mounted under one path segment:
//! - GET /{prefix}/ - dashboard page
//! - GET /{prefix}/topo - topology document built from etcd
//! - GET /{prefix}/static/... - wasm bundle and other assets
//!
//! Anything else, inside or outside the prefix, gets a plain-text 404, so the
//! combined filter never rejects.

use crate::error::SidecarResult;
use crate::etcd::EtcdClient;
use crate::settings::Settings;
use crate::topology::load_topology;
use common::PipelineConfig;
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use warp::filters::BoxedFilter;
use warp::Filter;

pub const NOT_IN_APP: &str = "This url does not belong to the app.";

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Everything the routes need, assembled once at startup.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<EtcdClient>,
    pub prefix: String,
    pub static_dir: PathBuf,
    pub index: Arc<String>,
}

impl AppState {
    pub fn new(settings: &Settings, client: Arc<EtcdClient>) -> SidecarResult<Self> {
        let config = PipelineConfig {
            endpoint: settings.endpoint_strategy,
            ..Default::default()
        };
        Ok(Self {
            client,
            prefix: settings.sidecar_prefix.clone(),
            static_dir: settings.static_dir.clone(),
            index: Arc::new(render_index(&settings.mount_path(), &config)?),
        })
    }
}

/// Fills the page template. The config lands inside a `<script>` element, so
/// `</` is escaped to keep it from closing the element early.
pub fn render_index(mount: &str, config: &PipelineConfig) -> SidecarResult<String> {
    let config = serde_json::to_string(config)?.replace("</", "<\\/");
    Ok(INDEX_TEMPLATE
        .replace("{{mount}}", mount)
        .replace("{{config}}", &config))
}

fn scope(prefix: &str) -> BoxedFilter<()> {
    if prefix.is_empty() {
        warp::any().boxed()
    } else {
        warp::path(prefix.to_string()).boxed()
    }
}

fn with_client(
    client: Arc<EtcdClient>,
) -> impl Filter<Extract = (Arc<EtcdClient>,), Error = Infallible> + Clone {
    warp::any().map(move || client.clone())
}

pub fn setup_routes(
    state: AppState,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let app = scope(&state.prefix);

    let index_endpoint = {
        let index = state.index.clone();
        app.clone()
            .and(warp::get())
            .and(warp::path::end())
            .map(move || warp::reply::html(index.as_str().to_owned()))
    };

    let topo_endpoint = app
        .clone()
        .and(warp::get())
        .and(warp::path("topo"))
        .and(warp::path::end())
        .and(with_client(state.client.clone()))
        .and_then(topology_fn);

    let static_endpoint = app
        .and(warp::path("static"))
        .and(warp::fs::dir(state.static_dir.clone()));

    let fallback = warp::any().map(|| {
        warp::reply::with_status(
            warp::reply::with_header(NOT_IN_APP, "content-type", "text/plain"),
            warp::http::StatusCode::NOT_FOUND,
        )
    });

    index_endpoint
        .or(topo_endpoint)
        .or(static_endpoint)
        .or(fallback)
}

/// Handler for GET /{prefix}/topo
async fn topology_fn(client: Arc<EtcdClient>) -> Result<impl warp::Reply, warp::Rejection> {
    let payload = load_topology(&client).await;
    tracing::info!(
        nodes = payload.nodes.len(),
        edges = payload.edges.len(),
        "serving topology"
    );
    Ok(warp::reply::json(&payload))
}
