//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Document error: {0}")]
    Dom(#[from] tabkit_dom::DomError),

    #[error("Layout error: {0}")]
    Layout(#[from] tabkit_layout::LayoutError),

    #[error("Tab error: {0}")]
    Tab(#[from] tabkit_tabs::TabError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
