//! tabkit Document Model
//!
//! A small arena-backed element tree standing in for the browser DOM.
//! The tab behavior layer only reads and mutates attributes, classes,
//! inline style and focus; nodes are created by the host, either through
//! the HTML loader or the builder methods on [`Document`].

mod document;
mod error;
mod html;
mod node;
mod style;

pub use document::Document;
pub use error::DomError;
pub use node::{Element, NodeId, NodeKind};
pub use style::{parse_declarations, serialize_declarations};

pub type Result<T> = std::result::Result<T, DomError>;
