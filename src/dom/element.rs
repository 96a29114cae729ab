use std::fmt;

use kuchiki::{Node, NodeRef};

use super::document::{select_elements, MockDocument};
use super::DomError;

/// Identity of an element node, stable for as long as the node is alive.
pub type ElementKey = usize;

/// Handle to an element node together with the document that owns it.
///
/// Cloning is cheap and yields a handle to the same node; equality is node
/// identity.
#[derive(Clone)]
pub struct Element {
    node: NodeRef,
    document: MockDocument,
}

impl Element {
    pub(super) fn new(node: NodeRef, document: MockDocument) -> Self {
        Self { node, document }
    }

    pub fn key(&self) -> ElementKey {
        let node: &Node = &self.node;
        node as *const Node as usize
    }

    pub fn tag_name(&self) -> String {
        self.node
            .as_element()
            .map(|data| data.name.local.to_string())
            .unwrap_or_default()
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        let data = self.node.as_element()?;
        let attributes = data.attributes.borrow();
        attributes.get(name).map(str::to_string)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.node
            .as_element()
            .map(|data| data.attributes.borrow().contains(name))
            .unwrap_or(false)
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        if let Some(data) = self.node.as_element() {
            data.attributes
                .borrow_mut()
                .insert(name, value.to_string());
        }
    }

    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        let data = self.node.as_element()?;
        let removed = data.attributes.borrow_mut().remove(name);
        removed.map(|attribute| attribute.value)
    }

    /// Append `child` as the last child, detaching it from any previous parent.
    pub fn append_child(&self, child: &Element) {
        self.node.append(child.node.clone());
    }

    pub fn children(&self) -> Vec<Element> {
        self.node
            .children()
            .filter(|node| node.as_element().is_some())
            .map(|node| Element::new(node, self.document.clone()))
            .collect()
    }

    pub fn parent_element(&self) -> Option<Element> {
        self.node
            .parent()
            .filter(|node| node.as_element().is_some())
            .map(|node| Element::new(node, self.document.clone()))
    }

    /// Match `selector` against this element and its descendants, in
    /// document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>, DomError> {
        select_elements(&self.node, selector, &self.document)
    }

    pub fn owner_document(&self) -> MockDocument {
        self.document.clone()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.tag_name())
    }
}
