pub mod error;
pub mod models;
pub mod validation;

pub use error::{PollError, Result};
pub use models::*;
