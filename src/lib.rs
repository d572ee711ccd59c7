pub mod config;
pub mod dispatcher;
pub mod error;
pub mod line;
pub mod server;
pub mod session;
pub mod vision;

pub use error::{Error, Result};
