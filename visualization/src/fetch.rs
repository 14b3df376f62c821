use common::{TopologyError, TopologyPayload, TopologyResult, TopologySource};
use gloo_net::http::Request;

/// Browser `fetch` transport for the topology document.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpSource;

impl TopologySource for HttpSource {
    async fn fetch(&self, endpoint: &str) -> TopologyResult<TopologyPayload> {
        let response = Request::get(endpoint)
            .send()
            .await
            .map_err(|e| TopologyError::Transport(e.to_string()))?;

        if !response.ok() {
            return Err(TopologyError::Status {
                status: response.status(),
                url: endpoint.to_string(),
            });
        }

        response
            .json::<TopologyPayload>()
            .await
            .map_err(|e| TopologyError::Parse(e.to_string()))
    }
}
