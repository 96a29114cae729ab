//! Seams into the component runtime under test: the runtime-global
//! "current document" slot and the context/handler lookup.

mod registry;

use std::cell::RefCell;

use tokio::sync::{Mutex, MutexGuard};

use crate::dom::{EventContext, MockDocument};

pub use registry::{ComponentRuntime, ElementContext, EventHandler, HandlerFuture, HandlerRegistry};

/// Runtime-global state read by handler resolution code.
///
/// Tests create one and hand it to every trigger that should share it.
/// Triggers against the same global are serialized while they start
/// handlers; handlers may only rely on the ambient document while their
/// synchronous part runs.
#[derive(Default)]
pub struct RuntimeGlobal {
    document: RefCell<Option<MockDocument>>,
    trigger_lock: Mutex<()>,
}

impl RuntimeGlobal {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active document, if any.
    pub fn document(&self) -> Option<MockDocument> {
        self.document.borrow().clone()
    }

    /// Replace the active document, returning the previous one.
    pub fn set_document(&self, document: Option<MockDocument>) -> Option<MockDocument> {
        self.document.replace(document)
    }

    /// Event context of the active document.
    pub fn current_event(&self) -> Option<EventContext> {
        self.document()?.event_context()
    }

    /// Install `document` as the active document with `context` as its event
    /// context until the returned scope is dropped.
    pub fn enter(&self, document: &MockDocument, context: EventContext) -> AmbientScope<'_> {
        let previous_document = self.set_document(Some(document.clone()));
        let previous_context = document.set_event_context(Some(context));
        AmbientScope {
            global: self,
            document: document.clone(),
            previous_document,
            previous_context,
        }
    }

    pub(crate) async fn serialize(&self) -> MutexGuard<'_, ()> {
        self.trigger_lock.lock().await
    }
}

/// Restores the ambient document and its event context on drop, including
/// during unwinding.
pub struct AmbientScope<'a> {
    global: &'a RuntimeGlobal,
    document: MockDocument,
    previous_document: Option<MockDocument>,
    previous_context: Option<EventContext>,
}

impl Drop for AmbientScope<'_> {
    fn drop(&mut self) {
        self.document.set_event_context(self.previous_context.take());
        self.global.set_document(self.previous_document.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::EventDescriptor;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use url::Url;

    fn click_on(document: &MockDocument) -> EventContext {
        EventContext {
            element: document.body(),
            event: EventDescriptor::new("click"),
            locator: Url::parse("http://mock-test/handler").unwrap(),
        }
    }

    #[test]
    fn scope_installs_and_restores_unset_state() {
        let global = RuntimeGlobal::new();
        let document = MockDocument::new();

        {
            let _scope = global.enter(&document, click_on(&document));
            assert_eq!(global.document(), Some(document.clone()));
            assert_eq!(global.current_event(), Some(click_on(&document)));
        }

        assert_eq!(global.document(), None);
        assert_eq!(document.event_context(), None);
    }

    #[test]
    fn scope_restores_previous_values() {
        let global = RuntimeGlobal::new();
        let outer = MockDocument::new();
        let document = MockDocument::new();
        let earlier = EventContext {
            event: EventDescriptor::new("focus"),
            ..click_on(&document)
        };
        global.set_document(Some(outer.clone()));
        document.set_event_context(Some(earlier.clone()));

        drop(global.enter(&document, click_on(&document)));

        assert_eq!(global.document(), Some(outer));
        assert_eq!(document.event_context(), Some(earlier));
    }

    #[test]
    fn scope_restores_when_unwinding() {
        let global = RuntimeGlobal::new();
        let document = MockDocument::new();

        let result = catch_unwind(AssertUnwindSafe(|| {
            let _scope = global.enter(&document, click_on(&document));
            panic!("handler blew up");
        }));

        assert!(result.is_err());
        assert_eq!(global.document(), None);
        assert_eq!(document.event_context(), None);
    }
}
