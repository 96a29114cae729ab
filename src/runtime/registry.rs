use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use anyhow::Result;
use futures_util::future::{FutureExt, LocalBoxFuture};
use tracing::trace;

use crate::dom::{Element, ElementKey};

/// Pending result of a handler invocation.
pub type HandlerFuture = LocalBoxFuture<'static, Result<Element>>;

/// A resolved event handler.
///
/// Calling it runs the handler's synchronous part under whatever ambient
/// context is installed at that moment; the returned future is polled later,
/// after the context has been restored.
pub type EventHandler = Rc<dyn Fn() -> HandlerFuture>;

/// Context and handler lookup of the runtime being exercised.
pub trait ComponentRuntime {
    type Context;

    fn resolve_context(&self, element: &Element) -> Self::Context;

    fn lookup_handler(&self, context: &Self::Context, key: &str) -> Option<EventHandler>;
}

/// Per-element runtime context holding the element's event handlers.
pub struct ElementContext {
    element: Element,
    handlers: RefCell<HashMap<String, EventHandler>>,
}

impl ElementContext {
    fn new(element: Element) -> Self {
        Self {
            element,
            handlers: RefCell::new(HashMap::new()),
        }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn handler(&self, key: &str) -> Option<EventHandler> {
        self.handlers.borrow().get(key).cloned()
    }

    pub fn set_handler(&self, key: &str, handler: EventHandler) {
        self.handlers.borrow_mut().insert(key.to_string(), handler);
    }
}

/// Runtime whose contexts are created on first resolution, keyed by element
/// identity, and whose handlers are registered directly by tests.
#[derive(Default)]
pub struct HandlerRegistry {
    contexts: RefCell<HashMap<ElementKey, Rc<ElementContext>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `key` (e.g. `on-click`) on `element`'s context.
    pub fn on<F, Fut>(&self, element: &Element, key: &str, handler: F)
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<Element>> + 'static,
    {
        let handler: EventHandler = Rc::new(move || handler().boxed_local());
        self.resolve_context(element).set_handler(key, handler);
    }

    pub fn context_count(&self) -> usize {
        self.contexts.borrow().len()
    }
}

impl ComponentRuntime for HandlerRegistry {
    type Context = Rc<ElementContext>;

    fn resolve_context(&self, element: &Element) -> Self::Context {
        let mut contexts = self.contexts.borrow_mut();
        let context = contexts.entry(element.key()).or_insert_with(|| {
            trace!(target: "runtime", element = ?element, "created element context");
            Rc::new(ElementContext::new(element.clone()))
        });
        Rc::clone(context)
    }

    fn lookup_handler(&self, context: &Self::Context, key: &str) -> Option<EventHandler> {
        context.handler(key)
    }
}
