//! ActingUserResolver port - who initiated the current action.

use async_trait::async_trait;

use crate::domain::refund::Student;

/// The user credited with initiating an unenrollment or refund request.
///
/// Resolved per invocation and never stored. If the requester of an
/// unenrollment is not the student being unenrolled, the commerce calls are
/// still made on the requester's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActingUser {
    /// A signed-in platform user.
    Authenticated(Student),

    /// The anonymous placeholder: an inbound context exists but carries no
    /// authenticated user. On the unenrollment path this signals a
    /// server-to-server call from the commerce service itself.
    Anonymous,
}

impl ActingUser {
    /// Whether this is the anonymous placeholder.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, ActingUser::Anonymous)
    }

    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&Student> {
        match self {
            ActingUser::Authenticated(user) => Some(user),
            ActingUser::Anonymous => None,
        }
    }
}

/// Port for resolving the acting user of the current inbound context.
///
/// Returning `None` means no inbound request context exists at all (e.g. a
/// background trigger); that is a valid outcome, not an error. This port has
/// no failure modes and no side effects.
#[async_trait]
pub trait ActingUserResolver: Send + Sync {
    /// The user associated with the currently active inbound context.
    async fn resolve_acting_user(&self) -> Option<ActingUser>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    // Compile-time check that the trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ActingUserResolver) {}

    #[test]
    fn anonymous_has_no_user() {
        assert!(ActingUser::Anonymous.is_anonymous());
        assert!(ActingUser::Anonymous.user().is_none());
    }

    #[test]
    fn authenticated_exposes_user() {
        let student = Student {
            id: UserId::new(7),
            username: "learner".to_string(),
            email: "learner@example.com".to_string(),
            full_name: None,
        };
        let acting = ActingUser::Authenticated(student.clone());
        assert!(!acting.is_anonymous());
        assert_eq!(acting.user(), Some(&student));
    }
}
