mod connection;
mod rtc_connection;
mod transport_event;

pub use connection::*;
pub use rtc_connection::*;
pub use transport_event::*;
