//! Request-scoped context: acting user and site theming.
//!
//! The event bus carries no transport detail, so whatever front door
//! received the triggering request records who made it (and whether it hit
//! a themed site) in a `RequestScope` before publishing. Handlers read the
//! scope back through the `ActingUserResolver` and `ThemingProbe` ports.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::refund::Student;
use crate::ports::{ActingUser, ActingUserResolver, ThemingProbe};

/// Holder for the context of the currently-processed inbound request.
///
/// An empty scope (no acting user recorded) models a trigger with no inbound
/// request at all, such as a scheduled job.
#[derive(Debug, Default)]
pub struct RequestScope {
    acting_user: RwLock<Option<ActingUser>>,
    themed: RwLock<bool>,
}

impl RequestScope {
    /// Creates an empty scope: no inbound request context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scope for a request from an authenticated user.
    pub fn for_user(user: Student) -> Self {
        let scope = Self::new();
        scope.set_acting_user(ActingUser::Authenticated(user));
        scope
    }

    /// Creates a scope for an unauthenticated (server-to-server) request.
    pub fn anonymous() -> Self {
        let scope = Self::new();
        scope.set_acting_user(ActingUser::Anonymous);
        scope
    }

    /// Records the acting user for the current request.
    pub fn set_acting_user(&self, acting_user: ActingUser) {
        *self
            .acting_user
            .write()
            .expect("RequestScope: acting_user lock poisoned") = Some(acting_user);
    }

    /// Marks the current request as having hit a themed site.
    pub fn set_themed(&self, themed: bool) {
        *self.themed.write().expect("RequestScope: themed lock poisoned") = themed;
    }

    /// Clears the scope between requests.
    pub fn clear(&self) {
        *self
            .acting_user
            .write()
            .expect("RequestScope: acting_user lock poisoned") = None;
        *self.themed.write().expect("RequestScope: themed lock poisoned") = false;
    }
}

#[async_trait]
impl ActingUserResolver for RequestScope {
    async fn resolve_acting_user(&self) -> Option<ActingUser> {
        self.acting_user
            .read()
            .expect("RequestScope: acting_user lock poisoned")
            .clone()
    }
}

impl ThemingProbe for RequestScope {
    fn is_themed_request(&self) -> bool {
        *self.themed.read().expect("RequestScope: themed lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    fn student() -> Student {
        Student {
            id: UserId::new(7),
            username: "learner".to_string(),
            email: "learner@example.com".to_string(),
            full_name: None,
        }
    }

    #[tokio::test]
    async fn empty_scope_resolves_to_none() {
        let scope = RequestScope::new();
        assert!(scope.resolve_acting_user().await.is_none());
        assert!(!scope.is_themed_request());
    }

    #[tokio::test]
    async fn user_scope_resolves_to_that_user() {
        let scope = RequestScope::for_user(student());

        let acting = scope.resolve_acting_user().await.unwrap();
        assert_eq!(acting.user(), Some(&student()));
    }

    #[tokio::test]
    async fn anonymous_scope_resolves_to_anonymous() {
        let scope = RequestScope::anonymous();

        let acting = scope.resolve_acting_user().await.unwrap();
        assert!(acting.is_anonymous());
    }

    #[tokio::test]
    async fn clear_resets_user_and_theming() {
        let scope = RequestScope::for_user(student());
        scope.set_themed(true);

        scope.clear();

        assert!(scope.resolve_acting_user().await.is_none());
        assert!(!scope.is_themed_request());
    }
}
