mod manager;

pub use manager::{DISPOSED_MESSAGE, SessionManager};
