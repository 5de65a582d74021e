// Domain-layer modules and shared errors/models
pub mod eligibility {
    pub use crate::eligibility::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
