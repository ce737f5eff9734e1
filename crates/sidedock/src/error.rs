//! Error types for layout operations.

use crate::types::{ContainerId, PanelId};
use std::fmt;

/// Errors raised by [`LayoutSystem`](crate::LayoutSystem) operations.
///
/// Registration errors are configuration mistakes and should abort
/// initialization. Size and placement clamps never produce errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Two panels were registered under the same name.
    DuplicatePanelName(String),
    /// Two containers were registered under the same name.
    DuplicateContainerName(String),
    /// A lookup by panel name found nothing.
    UnknownPanel(String),
    /// A lookup by container name found nothing.
    UnknownContainer(String),
    /// Panel id does not belong to this system.
    InvalidPanel(PanelId),
    /// Container id does not belong to this system.
    InvalidContainer(ContainerId),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::DuplicatePanelName(name) => {
                write!(f, "Two panels registered with the same name: {}", name)
            }
            LayoutError::DuplicateContainerName(name) => {
                write!(f, "Two containers registered with the same name: {}", name)
            }
            LayoutError::UnknownPanel(name) => write!(f, "Panel '{}' does not exist", name),
            LayoutError::UnknownContainer(name) => {
                write!(f, "Container '{}' does not exist", name)
            }
            LayoutError::InvalidPanel(id) => write!(f, "Invalid panel id {:?}", id),
            LayoutError::InvalidContainer(id) => write!(f, "Invalid container id {:?}", id),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
