//! Foundation types shared across the domain.
//!
//! Value objects (ids, timestamps), the domain error taxonomy, and the
//! event envelope infrastructure used by the publish/subscribe ports.

mod errors;
mod events;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{CourseKey, RefundId, UserId};
pub use timestamp::Timestamp;
