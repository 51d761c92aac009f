//! tabkit Core
//!
//! Explicit setup entry point for the tab widget. The host hands over a
//! document and the root elements to scan; setup normalizes tabpanel
//! container heights first, while every panel is still visible, and only
//! then initializes the tabs, which hides all but the first panel of each
//! group.

mod config;
mod error;
mod widget;

pub use config::Config;
pub use error::CoreError;
pub use widget::TabWidget;

// Re-export core components
pub use tabkit_dom::{Document, DomError, Element, NodeId, NodeKind};
pub use tabkit_layout::{
    ComputedStyle, InlineStyleMetrics, LayoutError, Metrics, NormalizeOptions, NormalizedContainer,
};
pub use tabkit_tabs::{
    EventOutcome, GroupId, Key, TabController, TabError, TabEvent, TabGroup, TabOptions, TabState,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
