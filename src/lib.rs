//! Commerce Bridge - refund orchestration for the learning platform.
//!
//! Listens for unenrollments and entitlement refund requests, opens refunds
//! on the external commerce service, approves them automatically where policy
//! allows, and files support tickets for the rest.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
