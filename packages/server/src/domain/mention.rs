//! `@member` highlighting.

/// Placeholder in the highlight template replaced by the member name
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Wrap every `@<member>` occurrence in `text` with `template`.
///
/// Only names in `members` are highlighted. When several names match at the
/// same position the longest wins. The scan is a single left-to-right pass, so
/// replaced text is never scanned again.
pub fn highlight_mentions<S: AsRef<str>>(text: &str, members: &[S], template: &str) -> String {
    if members.is_empty() || !text.contains('@') {
        return text.to_string();
    }

    let mut names: Vec<&str> = members
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| !name.is_empty())
        .collect();
    names.sort_by_key(|name| std::cmp::Reverse(name.len()));

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find('@') {
        out.push_str(&rest[..at]);
        let after = &rest[at + 1..];
        match names.iter().find(|name| after.starts_with(**name)) {
            Some(name) => {
                out.push_str(&template.replace(NAME_PLACEHOLDER, name));
                rest = &after[name.len()..];
            }
            None => {
                out.push('@');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
