mod config;
mod signaling;

pub use config::*;
pub use signaling::*;
