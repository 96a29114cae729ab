/// Convert a camelCase event name to kebab-case: a `-` is inserted before
/// every ASCII uppercase letter, then the whole name is lowercased (non-ASCII
/// letters included).
pub fn camel_to_kebab(name: &str) -> String {
    let mut kebab = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            kebab.push('-');
        }
        kebab.push(ch);
    }
    kebab.to_lowercase()
}
