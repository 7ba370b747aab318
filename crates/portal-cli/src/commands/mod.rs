pub mod catalog;
pub mod config;
pub mod guard;
pub mod session;
