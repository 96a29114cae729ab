use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use html5ever::{LocalName, Namespace, QualName};
use kuchiki::{Attribute, ExpandedName, NodeRef};

use super::element::Element;
use super::event::EventContext;
use super::DomError;
use crate::config::PROTOCOL_LINK_REL_PREFIX;
use crate::platform::TestPlatform;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Base URI every synthetic document starts with.
pub const DEFAULT_BASE_URI: &str = "http://mock-test/";

struct DocumentInner {
    root: NodeRef,
    html: NodeRef,
    head: NodeRef,
    body: NodeRef,
    base_uri: RefCell<String>,
    event_context: RefCell<Option<EventContext>>,
    platform: TestPlatform,
}

/// In-memory document owning a `<html><head/><body/></html>` tree, the
/// transient event context read by handler code, and the test platform
/// whose queue `flush` drains.
#[derive(Clone)]
pub struct MockDocument {
    inner: Rc<DocumentInner>,
}

impl MockDocument {
    pub fn new() -> Self {
        let root = NodeRef::new_document();
        let html = new_html_node("html");
        let head = new_html_node("head");
        let body = new_html_node("body");
        root.append(html.clone());
        html.append(head.clone());
        html.append(body.clone());

        Self {
            inner: Rc::new(DocumentInner {
                root,
                html,
                head,
                body,
                base_uri: RefCell::new(DEFAULT_BASE_URI.to_string()),
                event_context: RefCell::new(None),
                platform: TestPlatform::default(),
            }),
        }
    }

    /// Create a detached element owned by this document. Tag names are
    /// lowercased the way HTML documents do.
    pub fn create_element(&self, tag_name: &str) -> Element {
        Element::new(new_html_node(&tag_name.to_ascii_lowercase()), self.clone())
    }

    pub fn document_element(&self) -> Element {
        Element::new(self.inner.html.clone(), self.clone())
    }

    pub fn head(&self) -> Element {
        Element::new(self.inner.head.clone(), self.clone())
    }

    pub fn body(&self) -> Element {
        Element::new(self.inner.body.clone(), self.clone())
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>, DomError> {
        select_elements(&self.inner.root, selector, self)
    }

    pub fn base_uri(&self) -> String {
        self.inner.base_uri.borrow().clone()
    }

    pub fn set_base_uri(&self, base_uri: &str) {
        *self.inner.base_uri.borrow_mut() = base_uri.to_string();
    }

    /// Protocol mocks registered through `<link rel="q.protocol.*">`
    /// elements in `<head>`, keyed by scheme.
    pub fn protocols(&self) -> BTreeMap<String, String> {
        self.head()
            .children()
            .into_iter()
            .filter(|link| link.tag_name() == "link")
            .filter_map(|link| {
                let rel = link.get_attribute("rel")?;
                let scheme = rel.strip_prefix(PROTOCOL_LINK_REL_PREFIX)?.to_string();
                Some((scheme, link.get_attribute("href").unwrap_or_default()))
            })
            .collect()
    }

    pub fn platform(&self) -> &TestPlatform {
        &self.inner.platform
    }

    /// The event context installed while a handler is being resolved.
    pub fn event_context(&self) -> Option<EventContext> {
        self.inner.event_context.borrow().clone()
    }

    /// Replace the event context, returning the previous one.
    pub fn set_event_context(&self, context: Option<EventContext>) -> Option<EventContext> {
        self.inner.event_context.replace(context)
    }
}

impl Default for MockDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for MockDocument {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for MockDocument {}

impl fmt::Debug for MockDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockDocument")
            .field("base_uri", &*self.inner.base_uri.borrow())
            .field("pending_tasks", &self.inner.platform.pending())
            .finish()
    }
}

/// Synthetic global object; the window a fixture's document hangs off.
#[derive(Debug, Clone, Default)]
pub struct MockGlobal {
    document: MockDocument,
}

impl MockGlobal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &MockDocument {
        &self.document
    }
}

fn new_html_node(tag_name: &str) -> NodeRef {
    NodeRef::new_element(
        QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(tag_name)),
        Vec::<(ExpandedName, Attribute)>::new(),
    )
}

/// Evaluate `selector` over `scope` and its descendants in document order.
pub(super) fn select_elements(
    scope: &NodeRef,
    selector: &str,
    document: &MockDocument,
) -> Result<Vec<Element>, DomError> {
    let matches = scope
        .select(selector)
        .map_err(|_| DomError::InvalidSelector(selector.to_string()))?;
    Ok(matches
        .map(|element| Element::new(element.as_node().clone(), document.clone()))
        .collect())
}
