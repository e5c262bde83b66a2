//! Server-sent event stream of broadcast results

use crate::HttpState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::Stream;
use pplx_mcp::jsonrpc::success_response;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tracing::info;

/// GET /mcp/events
///
/// The subscription is taken before the response is returned and released
/// when the client goes away and the stream is dropped.
pub async fn stream_events(
    State(state): State<HttpState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut subscription = state.broadcaster.subscribe();
    info!("SSE client {} connected", subscription.id());

    let connected = success_response(
        None,
        json!({"status": "connected", "timestamp": chrono::Utc::now().to_rfc3339()}),
    );
    let greeting = serde_json::to_string(&connected).unwrap_or_default();

    let stream = async_stream::stream! {
        yield Ok(Event::default().data(greeting));
        while let Some(payload) = subscription.recv().await {
            yield Ok(Event::default().data(payload));
        }
    };

    Sse::new(stream)
        .keep_alive(KeepAlive::new().interval(Duration::from_secs(15)).text("keep-alive"))
}
