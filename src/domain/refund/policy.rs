//! Refund processing policy.

use super::EnrollmentMode;

/// Snapshot of the refund-processing decisions in effect for one
/// orchestration pass.
///
/// Event handlers derive a policy from their configuration snapshot per
/// event and pass it into the orchestrator, so the orchestrator never reads
/// mutable global configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefundPolicy {
    /// When true, opened refunds are payment-approved automatically and only
    /// failed approvals flow to the manual support queue.
    pub automatic_approval: bool,

    /// The one enrollment mode for which refund support notifications are
    /// sent.
    ///
    /// Provisional rule carried over from the platform: free and
    /// non-monetary modes would otherwise generate support tickets for $0
    /// transactions, so notifications are suppressed for every mode except
    /// this one until the commerce service handles zero-value reversals
    /// properly.
    pub notified_mode: EnrollmentMode,
}

impl RefundPolicy {
    /// Builds a policy with the platform default notification rule
    /// (verified mode only).
    pub fn new(automatic_approval: bool) -> Self {
        Self {
            automatic_approval,
            notified_mode: EnrollmentMode::Verified,
        }
    }

    /// Overrides the notified mode.
    pub fn with_notified_mode(mut self, mode: EnrollmentMode) -> Self {
        self.notified_mode = mode;
        self
    }

    /// Whether a needs-approval refund for a product of the given mode
    /// should notify the support queue.
    pub fn should_notify(&self, mode: EnrollmentMode) -> bool {
        mode == self.notified_mode
    }
}

impl Default for RefundPolicy {
    fn default() -> Self {
        Self::new(false)
    }
}
