//! Refund creation payloads sent to the commerce service.

use serde::Serialize;

use super::RefundableProduct;

/// Payload for `POST /refunds/` on the commerce service.
///
/// Built fresh per call and never persisted. The two shapes serialize to
/// exactly the bodies the commerce service expects:
///
/// - seats: `{"course_id": ..., "username": ...}`
/// - entitlements: `{"order_number": ..., "username": ..., "entitlement_uuid": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RefundRequest {
    Seat {
        course_id: String,
        username: String,
    },
    Entitlement {
        order_number: String,
        username: String,
        entitlement_uuid: String,
    },
}

impl RefundRequest {
    /// Builds the refund-creation payload for a product.
    pub fn for_product(product: &RefundableProduct) -> Self {
        match product {
            RefundableProduct::Enrollment {
                user, course_id, ..
            } => RefundRequest::Seat {
                course_id: course_id.to_string(),
                username: user.username.clone(),
            },
            RefundableProduct::Entitlement {
                user,
                entitlement_uuid,
                order_number,
                ..
            } => RefundRequest::Entitlement {
                order_number: order_number.clone(),
                username: user.username.clone(),
                entitlement_uuid: entitlement_uuid.to_string(),
            },
        }
    }
}
