//! Document error types

use thiserror::Error;

use crate::node::NodeId;

#[derive(Error, Debug)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node is not an element: {0}")]
    NotAnElement(NodeId),

    #[error("Cannot append {child} to {parent}: {reason}")]
    InvalidAppend {
        parent: NodeId,
        child: NodeId,
        reason: &'static str,
    },

    #[error("Invalid attribute name: {0:?}")]
    InvalidAttributeName(String),
}
