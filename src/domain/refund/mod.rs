//! Refund domain: products, payloads, policy and notification text.

mod events;
mod notification;
mod policy;
mod product;
mod request;

pub use events::{
    EntitlementRefundRequested, UnenrollmentCompleted, ENTITLEMENT_REFUND_REQUESTED,
    UNENROLLMENT_COMPLETED,
};
pub use notification::{
    refund_notification_body, refund_review_url, REFUND_NOTIFICATION_SUBJECT,
};
pub use policy::RefundPolicy;
pub use product::{EnrollmentMode, RefundableProduct, Student};
pub use request::RefundRequest;
