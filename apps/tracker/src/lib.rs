pub mod config;
pub mod events;
pub mod main_lib;

pub use main_lib::{build_tracker, init_tracing};
