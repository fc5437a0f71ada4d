mod message;
mod product;
mod segment;

pub use message::{DecodedMessage, MessageKind, Sender};
pub use product::Product;
pub use segment::RenderedSegment;
