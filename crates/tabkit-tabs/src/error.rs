//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab {tab} has no aria-controls attribute")]
    MissingControls { tab: String },

    #[error("Tab {tab} controls {panel_id:?}, but no element has that id")]
    PanelNotFound { tab: String, panel_id: String },

    #[error("Not a managed tab: {0}")]
    UnknownTab(String),

    #[error("Tab group not found: {0}")]
    GroupNotFound(usize),

    #[error("Document error: {0}")]
    Dom(#[from] tabkit_dom::DomError),
}
