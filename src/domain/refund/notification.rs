//! Support notification text for refunds awaiting manual approval.

use crate::domain::foundation::RefundId;

use super::Student;

/// Subject line for refund support tickets.
pub const REFUND_NOTIFICATION_SUBJECT: &str = "[Refund] User-Requested Refund";

/// Builds the review URL for a single refund on the commerce service's
/// public dashboard.
pub fn refund_review_url(public_url_root: &str, refund_id: RefundId) -> String {
    format!(
        "{}/dashboard/refunds/{}/",
        public_url_root.trim_end_matches('/'),
        refund_id
    )
}

/// Builds the ticket body for a refund notification: a summary line for the
/// requesting student followed by one review link per refund id,
/// newline-separated.
pub fn refund_notification_body(
    student: &Student,
    refund_ids: &[RefundId],
    public_url_root: &str,
) -> String {
    let msg = format!(
        "A refund request has been initiated for {username} ({email}). \
         To process this request, please visit the link(s) below.",
        username = student.username,
        email = student.email,
    );

    let urls: Vec<String> = refund_ids
        .iter()
        .map(|id| refund_review_url(public_url_root, *id))
        .collect();

    format!("{}\n\n{}", msg, urls.join("\n"))
}
