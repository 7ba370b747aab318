//! User domain module.
//!
//! - `model`: the backend-issued profile and its bearer token

mod model;

pub use model::{SessionToken, UserProfile};
