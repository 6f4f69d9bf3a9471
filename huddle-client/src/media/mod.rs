mod capture;
mod local_media;
mod stream;

pub use capture::*;
pub use local_media::*;
pub use stream::*;
