//! Refundable products and their owning users.
//!
//! A `RefundableProduct` is the unit the orchestrator works on: either a
//! course seat the learner just unenrolled from, or a course entitlement a
//! refund was requested for. Both variants share an owning user and an
//! enrollment mode; eligibility is decided upstream and never re-checked
//! here.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::foundation::{CourseKey, UserId};

/// The platform user who owns a refundable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Platform user id.
    pub id: UserId,

    /// Login name; also the identity sent to the commerce service.
    pub username: String,

    /// Contact email, used as the ticket requester address.
    pub email: String,

    /// Profile display name, if the user has set one.
    pub full_name: Option<String>,
}

impl Student {
    /// Name to display on support tickets: the profile name when present,
    /// otherwise the username.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

/// Enrollment mode / product classifier.
///
/// Carried on both product variants; the refund notification policy keys
/// off this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentMode {
    Audit,
    Honor,
    Verified,
    Professional,
    NoIdProfessional,
    Credit,
    Masters,
}

impl EnrollmentMode {
    /// Returns the mode's wire slug.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentMode::Audit => "audit",
            EnrollmentMode::Honor => "honor",
            EnrollmentMode::Verified => "verified",
            EnrollmentMode::Professional => "professional",
            EnrollmentMode::NoIdProfessional => "no_id_professional",
            EnrollmentMode::Credit => "credit",
            EnrollmentMode::Masters => "masters",
        }
    }
}

impl fmt::Display for EnrollmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A product a refund can be opened for.
///
/// Tagged variant over the two refundable shapes; the orchestrator is
/// parameterized over this type instead of having two near-duplicate paths.
///
/// Invariant: a `RefundableProduct` is only constructed from events whose
/// `refundable` flag was already confirmed true by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefundableProduct {
    /// A course seat released by an unenrollment.
    Enrollment {
        user: Student,
        course_id: CourseKey,
        mode: EnrollmentMode,
    },

    /// A course entitlement a refund was explicitly requested for.
    Entitlement {
        user: Student,
        entitlement_uuid: Uuid,
        order_number: String,
        mode: EnrollmentMode,
    },
}

impl RefundableProduct {
    /// The user who owns the product.
    pub fn owner(&self) -> &Student {
        match self {
            RefundableProduct::Enrollment { user, .. } => user,
            RefundableProduct::Entitlement { user, .. } => user,
        }
    }

    /// The product's enrollment mode.
    pub fn mode(&self) -> EnrollmentMode {
        match self {
            RefundableProduct::Enrollment { mode, .. } => *mode,
            RefundableProduct::Entitlement { mode, .. } => *mode,
        }
    }

    /// Stable external-facing identifier: the course key for enrollments,
    /// the entitlement UUID for entitlements.
    pub fn identifier(&self) -> String {
        match self {
            RefundableProduct::Enrollment { course_id, .. } => course_id.to_string(),
            RefundableProduct::Entitlement {
                entitlement_uuid, ..
            } => entitlement_uuid.to_string(),
        }
    }

    /// Short kind label for log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RefundableProduct::Enrollment { .. } => "course",
            RefundableProduct::Entitlement { .. } => "course entitlement",
        }
    }
}
