mod signaling_channel;
mod signaling_output;
mod ws_signaling;

pub use signaling_channel::*;
pub use signaling_output::*;
pub use ws_signaling::*;
