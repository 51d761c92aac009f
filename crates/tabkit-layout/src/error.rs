//! Layout error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Tabpanel container has no tabpanels: {0}")]
    EmptyContainer(String),

    #[error("Invalid length for {property}: {value:?}")]
    InvalidLength { property: String, value: String },

    #[error("Invalid font size on {node}: {value}px")]
    InvalidFontSize { node: String, value: f64 },

    #[error("Document error: {0}")]
    Dom(#[from] tabkit_dom::DomError),
}
