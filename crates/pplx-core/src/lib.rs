pub mod backend;
pub mod dispatcher;
pub mod error;
pub mod message;
pub mod registry;

// Re-export commonly used types
pub use backend::{
    append_citations, BackendConfig, BackendError, CompletionBackend, PerplexityClient,
};
pub use dispatcher::{Dispatcher, ValidatedCall};
pub use error::{CoreError, CoreResult, DispatchError};
pub use message::Message;
pub use registry::{ToolDescriptor, ToolRegistry};

pub use pplx_protocol_adapter::{InvokeRequest, InvokeResult, ToolSpec};
