use url::Url;

use super::element::Element;

/// The only event data handlers get: there is no real event system underneath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDescriptor {
    /// Kebab-case event name, e.g. `click` or `key-up`.
    pub event_type: String,
}

impl EventDescriptor {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
        }
    }
}

/// Transient `(element, event, locator)` triple a document carries while a
/// handler is being resolved and invoked.
#[derive(Debug, Clone, PartialEq)]
pub struct EventContext {
    pub element: Element,
    pub event: EventDescriptor,
    pub locator: Url,
}
