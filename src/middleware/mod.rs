//! Request middleware: bearer-token gate and request audit logging.

pub mod auth;
pub mod request_logger;

pub use auth::{require_bearer_token, AuthError};
pub use request_logger::log_request;
