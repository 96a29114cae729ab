use futures_util::future::join_all;
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

use crate::case::camel_to_kebab;
use crate::dom::{DomError, Element, EventContext, EventDescriptor};
use crate::locator::{resolve_handler_ref, split_handler_refs};
use crate::runtime::{ComponentRuntime, HandlerFuture, RuntimeGlobal};

/// Prefix of the attribute carrying an element's handler references.
pub const BINDING_ATTRIBUTE_PREFIX: &str = "on:";
/// Prefix of the key handlers are registered under in a runtime context.
pub const HANDLER_KEY_PREFIX: &str = "on-";

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("dom error: {0}")]
    Dom(#[from] DomError),
    #[error("invalid handler locator: {0}")]
    Locator(#[from] url::ParseError),
    #[error("event handler failed: {0}")]
    Handler(anyhow::Error),
    #[error("platform flush failed: {0}")]
    Flush(anyhow::Error),
}

/// Simulates events by calling the handlers an element's `on:*` attribute
/// points at, through the runtime's own context lookup.
pub struct EventTrigger<'a, R: ComponentRuntime> {
    runtime: &'a R,
    global: &'a RuntimeGlobal,
}

impl<'a, R: ComponentRuntime> EventTrigger<'a, R> {
    pub fn new(runtime: &'a R, global: &'a RuntimeGlobal) -> Self {
        Self { runtime, global }
    }

    /// Trigger `event_name_camel` on every element matching `selector`
    /// within `root` (`root` included).
    ///
    /// All handlers are started before anything is awaited, and triggers
    /// sharing the global are serialized only for that phase. The owning
    /// document's platform is then flushed while the handler futures are
    /// driven, and their elements are returned in invocation order.
    /// Elements without a binding and bindings without a registered handler
    /// contribute nothing.
    pub async fn trigger(
        &self,
        root: &Element,
        selector: &str,
        event_name_camel: &str,
    ) -> Result<Vec<Element>, TriggerError> {
        let serial = self.global.serialize().await;

        let event_type = camel_to_kebab(event_name_camel);
        let attribute = format!("{BINDING_ATTRIBUTE_PREFIX}{event_type}");
        let handler_key = format!("{HANDLER_KEY_PREFIX}{event_name_camel}");

        let mut pending = Vec::new();
        for element in root.query_selector_all(selector)? {
            let binding = match element.get_attribute(&attribute) {
                Some(binding) if !binding.is_empty() => binding,
                _ => continue,
            };
            for reference in split_handler_refs(&binding) {
                let locator = resolve_handler_ref(reference)?;
                if let Some(result) = self.invoke(&element, &event_type, &handler_key, locator) {
                    pending.push(result);
                }
            }
        }

        // Ambient state is only mutated above; handler futures may trigger again.
        drop(serial);

        debug!(
            target: "trigger",
            event = %event_type,
            selector,
            handlers = pending.len(),
            "handlers started, flushing platform"
        );

        let document = root.owner_document();
        let (flushed, results) = futures_util::join!(document.platform().flush(), join_all(pending));
        flushed.map_err(TriggerError::Flush)?;
        results
            .into_iter()
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(TriggerError::Handler)
    }

    fn invoke(
        &self,
        element: &Element,
        event_type: &str,
        handler_key: &str,
        locator: Url,
    ) -> Option<HandlerFuture> {
        let document = element.owner_document();
        let _scope = self.global.enter(
            &document,
            EventContext {
                element: element.clone(),
                event: EventDescriptor::new(event_type),
                locator,
            },
        );

        let context = self.runtime.resolve_context(element);
        match self.runtime.lookup_handler(&context, handler_key) {
            Some(handler) => Some(handler()),
            None => {
                error!(
                    target: "trigger",
                    element = ?element,
                    key = %handler_key,
                    "handler not available"
                );
                None
            }
        }
    }
}
