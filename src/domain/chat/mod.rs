//! Chat domain - the messages the relay fans out.

mod message;

pub use message::{ChatMessage, MessageKind, SYSTEM_AUTHOR};
