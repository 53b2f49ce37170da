pub mod channel;
pub mod source;

pub use channel::*;
pub use source::*;
