use url::Url;

/// Authority handler references are resolved against.
pub const MOCK_BASE: &str = "http://mock-test/";

/// Separator between handler references in a binding attribute.
///
/// This is the two characters `/` and `n`, not a newline.
pub const HANDLER_REF_SEPARATOR: &str = "/n";

/// Split a binding attribute value into handler references. Empty pieces are
/// kept.
pub fn split_handler_refs(value: &str) -> impl Iterator<Item = &str> {
    value.split(HANDLER_REF_SEPARATOR)
}

/// Resolve a relative or absolute handler reference against [`MOCK_BASE`].
pub fn resolve_handler_ref(reference: &str) -> Result<Url, url::ParseError> {
    Url::parse(MOCK_BASE)?.join(reference)
}
