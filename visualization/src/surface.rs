//! vis-network as the rendering surface.
//!
//! The page loads vis-network as a global `vis`; we construct
//! `new vis.Network(container, {nodes: new vis.DataSet(..), edges: new vis.DataSet(..)}, options)`
//! through `Reflect` so there is no compile-time binding to the library.

use common::{GraphDataset, RenderOptions, RenderSurface, TopologyError, TopologyResult};
use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

/// Handle to the constructed `vis.Network`, owned by JS from here on.
#[derive(Debug)]
pub struct NetworkHandle(pub JsValue);

pub struct VisNetwork {
    window: Window,
}

impl VisNetwork {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn constructor(vis: &JsValue, name: &str) -> TopologyResult<Function> {
        Reflect::get(vis, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.dyn_into::<Function>().ok())
            .ok_or_else(|| TopologyError::Render(format!("vis.{name} is not available")))
    }
}

fn js_error(context: &str, err: JsValue) -> TopologyError {
    TopologyError::Render(format!("{context}: {err:?}"))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> TopologyResult<JsValue> {
    // plain objects, not ES Maps, for the flattened record fields
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| TopologyError::Render(e.to_string()))
}

impl RenderSurface for VisNetwork {
    type Handle = NetworkHandle;

    fn draw(
        &self,
        container: &str,
        dataset: GraphDataset,
        options: &RenderOptions,
    ) -> TopologyResult<NetworkHandle> {
        let element = self
            .window
            .document()
            .and_then(|d| d.get_element_by_id(container))
            .ok_or_else(|| TopologyError::Render(format!("no element with id `{container}`")))?;

        let vis = Reflect::get(&self.window, &JsValue::from_str("vis"))
            .ok()
            .filter(|v| v.is_object())
            .ok_or_else(|| TopologyError::Render("vis-network is not loaded".to_string()))?;
        let data_set = Self::constructor(&vis, "DataSet")?;
        let network = Self::constructor(&vis, "Network")?;

        let nodes = Reflect::construct(&data_set, &Array::of1(&to_js(&dataset.nodes)?))
            .map_err(|e| js_error("building node DataSet", e))?;
        let edges = Reflect::construct(&data_set, &Array::of1(&to_js(&dataset.edges)?))
            .map_err(|e| js_error("building edge DataSet", e))?;

        let data = Object::new();
        Reflect::set(&data, &JsValue::from_str("nodes"), &nodes)
            .map_err(|e| js_error("assembling network data", e))?;
        Reflect::set(&data, &JsValue::from_str("edges"), &edges)
            .map_err(|e| js_error("assembling network data", e))?;

        let handle = Reflect::construct(
            &network,
            &Array::of3(&element, &data, &to_js(options)?),
        )
        .map_err(|e| js_error("constructing vis.Network", e))?;

        tracing::debug!(
            nodes = dataset.nodes.len(),
            edges = dataset.edges.len(),
            container,
            "network drawn"
        );
        Ok(NetworkHandle(handle))
    }
}
