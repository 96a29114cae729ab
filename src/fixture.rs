use tracing::debug;

use crate::config::{apply_document_config, FixtureOptions};
use crate::dom::{Element, MockDocument, MockGlobal};

const DEFAULT_HOST_TAG: &str = "host";

/// A small fixed DOM for exercising components.
///
/// ```text
/// <body>
///   <super-parent>
///     <parent>
///       <host>          (tag name configurable)
///         <child></child>
///       </host>
///     </parent>
///   </super-parent>
/// </body>
/// ```
///
/// Every fixture gets its own global and document; nothing is shared between
/// fixtures and no runtime-global state is touched.
#[derive(Debug, Clone)]
pub struct ElementFixture {
    pub global: MockGlobal,
    pub document: MockDocument,
    pub super_parent: Element,
    pub parent: Element,
    pub host: Element,
    pub child: Element,
}

impl ElementFixture {
    pub fn new(options: &FixtureOptions) -> Self {
        let global = MockGlobal::new();
        let document = global.document().clone();
        let super_parent = document.create_element("super-parent");
        let parent = document.create_element("parent");
        let host_tag = options
            .tag_name
            .as_deref()
            .filter(|tag| !tag.is_empty())
            .unwrap_or(DEFAULT_HOST_TAG);
        let host = document.create_element(host_tag);
        let child = document.create_element("child");
        super_parent.append_child(&parent);
        parent.append_child(&host);
        host.append_child(&child);
        document.body().append_child(&super_parent);

        apply_document_config(&document, options);
        debug!(target: "fixture", host = %host.tag_name(), "built element fixture");

        Self {
            global,
            document,
            super_parent,
            parent,
            host,
            child,
        }
    }
}

impl Default for ElementFixture {
    fn default() -> Self {
        Self::new(&FixtureOptions::default())
    }
}
