//! ThemingProbe port - themed-site detection for the current context.

/// Port for detecting whether the current inbound request originated on a
/// themed (white-labeled) site.
///
/// Theming detection lives in the host platform; this crate consumes it as
/// a single boolean. The support notifier refuses to file tickets for
/// themed requests.
pub trait ThemingProbe: Send + Sync {
    /// Whether the current request came from a themed site.
    fn is_themed_request(&self) -> bool;
}
