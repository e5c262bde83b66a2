//! CLI argument definitions using clap

use clap::Parser;
use pplx_core::backend::DEFAULT_ENDPOINT;

#[derive(Parser, Debug)]
#[command(
    name = "pplx-gateway",
    about = "Perplexity tools over MCP stdio or HTTP/SSE",
    version
)]
pub struct Cli {
    /// Perplexity API key
    #[arg(long, env = "PERPLEXITY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Transport to serve on: `http`, or stdio for anything else
    #[arg(
        long,
        env = "MCP_TRANSPORT_MODE",
        default_value = "stdio",
        value_parser = parse_transport
    )]
    pub transport: Transport,

    /// HTTP port (http transport only)
    #[arg(long, env = "MCP_HTTP_PORT", default_value_t = 3000)]
    pub port: u16,

    /// HTTP bind host (http transport only)
    #[arg(long, env = "MCP_HTTP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Chat completions endpoint
    #[arg(long, env = "PERPLEXITY_API_URL", default_value = DEFAULT_ENDPOINT)]
    pub api_url: String,

    /// Per-request timeout for backend calls; unset means no explicit timeout
    #[arg(long, env = "PERPLEXITY_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Disable colored output
    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Single client over stdin/stdout
    Stdio,
    /// HTTP endpoints plus an SSE event stream
    Http,
}

/// Only `http` selects the HTTP transport; every other value means stdio.
fn parse_transport(value: &str) -> Result<Transport, String> {
    if value.trim().eq_ignore_ascii_case("http") {
        Ok(Transport::Http)
    } else {
        Ok(Transport::Stdio)
    }
}
