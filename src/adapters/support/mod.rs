//! Support desk adapters.

mod zendesk;

pub use zendesk::ZendeskSupportNotifier;
