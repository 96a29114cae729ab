//! Synthetic DOM backed by `kuchiki` node trees.
//!
//! Only the surface the fixtures and the event trigger need is exposed:
//! element creation, attribute access, `append_child`, parent/children
//! traversal and `query_selector_all`.

mod document;
mod element;
mod event;

use thiserror::Error;

pub use document::{MockDocument, MockGlobal, DEFAULT_BASE_URI};
pub use element::{Element, ElementKey};
pub use event::{EventContext, EventDescriptor};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("invalid selector: {0}")]
    InvalidSelector(String),
}
