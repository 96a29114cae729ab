//! Synthetic element fixtures and simulated event dispatch for testing a
//! component runtime without a browser.

pub mod case;
pub mod config;
pub mod dom;
pub mod fixture;
pub mod locator;
pub mod logging;
pub mod platform;
pub mod runtime;
pub mod trigger;

pub use config::{apply_document_config, ConfigError, FixtureOptions};
pub use dom::{DomError, Element, EventContext, EventDescriptor, MockDocument, MockGlobal};
pub use fixture::ElementFixture;
pub use platform::TestPlatform;
pub use runtime::{ComponentRuntime, EventHandler, HandlerRegistry, RuntimeGlobal};
pub use trigger::{EventTrigger, TriggerError};
