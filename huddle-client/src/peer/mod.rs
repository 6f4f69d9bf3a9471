mod registry;
mod session;
mod worker;

pub use registry::*;
pub use session::*;
pub(crate) use worker::*;
