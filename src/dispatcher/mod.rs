mod event;
mod handler;
pub mod replies;

pub use event::{EventKind, InboundEvent};
pub use handler::Dispatcher;
