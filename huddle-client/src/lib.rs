mod config;
mod engine;
mod error;
mod media;
mod peer;
mod presenter;
mod signaling;
mod transport;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use media::*;
pub use peer::*;
pub use presenter::*;
pub use signaling::*;
pub use transport::*;

pub use huddle_core::model;
