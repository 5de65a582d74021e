//! External service integrations.

pub mod webhook_client {
    pub use crate::webhook_client::*;
}

pub mod webhook_models {
    pub use crate::webhook_models::*;
}
