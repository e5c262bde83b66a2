//! Protocol-agnostic tool DTOs and the traits transports program against.
//!
//! Transports (stdio MCP, HTTP/SSE) only ever see [`ToolSpec`], [`InvokeRequest`]
//! and [`InvokeResult`]; they never reach into the dispatcher's internals.

pub mod dto;
#[cfg(feature = "mcp")]
pub mod mcp;
pub mod traits;

pub use dto::{ContentItem, InvokeRequest, InvokeResult, RenderedResult, ToolSpec};
pub use traits::{ToolCatalog, ToolInvoker};
