//! Runtime configuration assembled from flags and environment

use crate::{
    cli::{Cli, Transport},
    error::{CliError, CliResult},
};
use pplx_core::BackendConfig;
use pplx_server::HttpConfig;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub backend: BackendConfig,
    pub transport: Transport,
    pub http: HttpConfig,
}

impl GatewayConfig {
    /// Fails when no API key was supplied; the process must not start without one.
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(CliError::MissingApiKey)?;

        let backend = BackendConfig::new(api_key)
            .with_endpoint(cli.api_url.clone())
            .with_timeout(cli.timeout_secs.map(Duration::from_secs));

        Ok(Self {
            backend,
            transport: cli.transport,
            http: HttpConfig { host: cli.host.clone(), port: cli.port },
        })
    }
}
