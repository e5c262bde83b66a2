use crate::dto::{InvokeRequest, InvokeResult, ToolSpec};

/// Ordered catalog of the tools a transport may advertise
pub trait ToolCatalog: Send + Sync {
    fn list_tools(&self) -> Vec<ToolSpec>;
}

/// Invoke a tool with structured arguments.
///
/// Infallible by contract: every request yields exactly one [`InvokeResult`],
/// failures included.
pub trait ToolInvoker: Send + Sync {
    fn invoke<'a>(
        &'a self,
        req: InvokeRequest,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = InvokeResult> + Send + 'a>>;
}
