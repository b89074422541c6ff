//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Refund Ports
//!
//! - `RefundGateway` - Refund creation/approval on the commerce service
//! - `SupportNotifier` - Support queue notification for manual approvals
//!
//! ## Context Ports
//!
//! - `ActingUserResolver` - Who initiated the current action
//! - `ThemingProbe` - Themed-site detection for the current request
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events

mod actor_resolver;
mod event_publisher;
mod event_subscriber;
mod refund_gateway;
mod support_notifier;
mod theming;

pub use actor_resolver::{ActingUser, ActingUserResolver};
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use refund_gateway::{GatewayError, RefundGateway};
pub use support_notifier::{NotificationError, SupportNotifier};
pub use theming::ThemingProbe;
