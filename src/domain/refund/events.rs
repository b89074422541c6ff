//! Inbound domain events the refund handlers subscribe to.
//!
//! Both events carry the product's owner, identifier and mode plus a
//! `refundable` flag computed upstream by the platform's eligibility rules.
//! This crate consumes that flag as an opaque boolean and never re-derives
//! eligibility.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{CourseKey, EventId, Timestamp};
use crate::domain_event;

use super::{EnrollmentMode, RefundableProduct, Student};

/// Event type for completed unenrollments.
pub const UNENROLLMENT_COMPLETED: &str = "enrollment.unenrolled.v1";

/// Event type for explicit entitlement refund requests.
pub const ENTITLEMENT_REFUND_REQUESTED: &str = "entitlement.refund_requested.v1";

/// A learner was unenrolled from a course run.
///
/// Fired after the unenrollment itself has completed; refund handling never
/// affects the unenrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnenrollmentCompleted {
    pub event_id: EventId,
    pub user: Student,
    pub course_id: CourseKey,
    pub mode: EnrollmentMode,
    /// Whether the released seat is refund-eligible, per upstream rules.
    pub refundable: bool,
    pub occurred_at: Timestamp,
}

domain_event!(
    UnenrollmentCompleted,
    event_type = "enrollment.unenrolled.v1",
    schema_version = 1,
    aggregate_id = course_id,
    aggregate_type = "Enrollment",
    occurred_at = occurred_at,
    event_id = event_id
);

impl UnenrollmentCompleted {
    /// The refundable product this event describes.
    pub fn product(&self) -> RefundableProduct {
        RefundableProduct::Enrollment {
            user: self.user.clone(),
            course_id: self.course_id.clone(),
            mode: self.mode,
        }
    }
}

/// A refund was requested for a course entitlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitlementRefundRequested {
    pub event_id: EventId,
    pub user: Student,
    pub entitlement_uuid: Uuid,
    pub order_number: String,
    pub mode: EnrollmentMode,
    /// Whether the entitlement is refund-eligible, per upstream rules.
    pub refundable: bool,
    pub occurred_at: Timestamp,
}

domain_event!(
    EntitlementRefundRequested,
    event_type = "entitlement.refund_requested.v1",
    schema_version = 1,
    aggregate_id = entitlement_uuid,
    aggregate_type = "CourseEntitlement",
    occurred_at = occurred_at,
    event_id = event_id
);

impl EntitlementRefundRequested {
    /// The refundable product this event describes.
    pub fn product(&self) -> RefundableProduct {
        RefundableProduct::Entitlement {
            user: self.user.clone(),
            entitlement_uuid: self.entitlement_uuid,
            order_number: self.order_number.clone(),
            mode: self.mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent, UserId};

    fn student() -> Student {
        Student {
            id: UserId::new(7),
            username: "learner".to_string(),
            email: "learner@example.com".to_string(),
            full_name: None,
        }
    }

    #[test]
    fn unenrollment_event_round_trips_through_envelope() {
        let event = UnenrollmentCompleted {
            event_id: EventId::new(),
            user: student(),
            course_id: CourseKey::new("course-v1:AcmeX+CS101+2026").unwrap(),
            mode: EnrollmentMode::Verified,
            refundable: true,
            occurred_at: Timestamp::now(),
        };

        assert_eq!(event.event_type(), UNENROLLMENT_COMPLETED);

        let envelope = event.to_envelope();
        assert_eq!(envelope.aggregate_type, "Enrollment");
        assert_eq!(envelope.aggregate_id, "course-v1:AcmeX+CS101+2026");

        let restored: UnenrollmentCompleted = envelope.payload_as().unwrap();
        assert!(restored.refundable);
        assert_eq!(restored.user.username, "learner");
    }

    #[test]
    fn entitlement_event_round_trips_through_envelope() {
        let uuid = Uuid::new_v4();
        let event = EntitlementRefundRequested {
            event_id: EventId::new(),
            user: student(),
            entitlement_uuid: uuid,
            order_number: "EDX-100042".to_string(),
            mode: EnrollmentMode::Verified,
            refundable: true,
            occurred_at: Timestamp::now(),
        };

        assert_eq!(event.event_type(), ENTITLEMENT_REFUND_REQUESTED);

        let envelope = event.to_envelope();
        assert_eq!(envelope.aggregate_type, "CourseEntitlement");
        assert_eq!(envelope.aggregate_id, uuid.to_string());

        let restored: EntitlementRefundRequested = envelope.payload_as().unwrap();
        assert_eq!(restored.order_number, "EDX-100042");
    }

    #[test]
    fn events_project_into_products() {
        let event = UnenrollmentCompleted {
            event_id: EventId::new(),
            user: student(),
            course_id: CourseKey::new("course-v1:AcmeX+CS101+2026").unwrap(),
            mode: EnrollmentMode::Honor,
            refundable: true,
            occurred_at: Timestamp::now(),
        };

        let product = event.product();
        assert_eq!(product.mode(), EnrollmentMode::Honor);
        assert_eq!(product.identifier(), "course-v1:AcmeX+CS101+2026");
    }
}
