pub mod args;
pub mod response;

pub use args::{require_params, ApiKeyArgs, CallbackArgs, StartOAuthArgs};
pub use response::{ToolContent, ToolResponse};
