//! Start the selected transport

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::{cli::Transport, config::GatewayConfig};
use pplx_server::{serve_http, serve_stdio, AppState};

pub async fn execute(config: GatewayConfig) -> Result<()> {
    info!("Backend endpoint: {}", config.backend.endpoint);
    if let Some(timeout) = config.backend.timeout {
        info!("Backend timeout: {:?}", timeout);
    }

    let app_state =
        AppState::from_backend_config(config.backend).context("Failed to build tool catalog")?;

    match config.transport {
        Transport::Http => {
            info!("Starting HTTP transport on {}", config.http.addr());
            if let Err(e) = serve_http(app_state, config.http).await {
                error!("HTTP transport stopped: {}", e);
                return Err(e).context("HTTP transport failed");
            }
        }
        Transport::Stdio => {
            info!("Starting stdio transport");
            if let Err(e) = serve_stdio(app_state).await {
                error!("stdio transport stopped: {}", e);
                return Err(e).context("stdio transport failed");
            }
        }
    }

    Ok(())
}
