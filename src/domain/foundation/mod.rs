//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects and identifiers that form the vocabulary
//! of the relay: member and message identities, room codes, timestamps.

mod ids;
mod timestamp;

pub use ids::{MemberId, MessageId, RoomCode};
pub use timestamp::Timestamp;
