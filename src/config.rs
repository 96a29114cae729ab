use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::dom::MockDocument;

/// `rel` prefix of the protocol links written into `<head>`.
pub(crate) const PROTOCOL_LINK_REL_PREFIX: &str = "q.protocol.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read fixture config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options applied to a fixture's document. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureOptions {
    /// Tag name of the `host` element.
    #[serde(rename = "tagName")]
    pub tag_name: Option<String>,
    #[serde(rename = "baseURI")]
    pub base_uri: Option<String>,
    /// Protocol scheme to mock handler location.
    pub protocol: BTreeMap<String, String>,
}

impl FixtureOptions {
    pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = Some(tag_name.into());
        self
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    pub fn with_protocol(mut self, scheme: impl Into<String>, handler: impl Into<String>) -> Self {
        self.protocol.insert(scheme.into(), handler.into());
        self
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Load options from a `.json` file, or YAML for any other extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }
}

/// Apply `options` to `document`: the base URI override and one
/// `<link rel="q.protocol.<scheme>">` per protocol mock. Values are not
/// validated.
pub fn apply_document_config(document: &MockDocument, options: &FixtureOptions) {
    if let Some(base_uri) = &options.base_uri {
        document.set_base_uri(base_uri);
    }
    for (scheme, handler) in &options.protocol {
        append_protocol_link(
            document,
            &format!("{PROTOCOL_LINK_REL_PREFIX}{scheme}"),
            handler,
        );
    }
    debug!(
        target: "fixture",
        base_uri = %document.base_uri(),
        protocols = options.protocol.len(),
        "applied document config"
    );
}

fn append_protocol_link(document: &MockDocument, rel: &str, href: &str) {
    let link = document.create_element("link");
    link.set_attribute("rel", rel);
    link.set_attribute("href", href);
    document.head().append_child(&link);
}
