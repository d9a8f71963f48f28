pub mod auth;
pub mod base;
pub mod factory;
pub mod health;
pub mod routes;

pub use auth::AuthHandler;
pub use factory::{AuthTool, AuthToolRouter, ToolDefinition};
pub use health::health_check;
pub use routes::build_router;
