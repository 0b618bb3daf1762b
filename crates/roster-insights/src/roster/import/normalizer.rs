use super::aliases::canonical_alias;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn punctuation_re() -> &'static Regex {
    static PUNCTUATION_RE: OnceLock<Regex> = OnceLock::new();
    PUNCTUATION_RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("valid header punctuation regex"))
}

fn whitespace_re() -> &'static Regex {
    static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("valid header whitespace regex"))
}

/// Lower-cases a header, drops punctuation and joins words with underscores.
pub fn slugify(header: &str) -> String {
    let lowered = header.to_lowercase();
    let stripped = punctuation_re().replace_all(&lowered, "");
    whitespace_re().replace_all(&stripped, "_").into_owned()
}

/// Maps raw headers onto canonical column names, one-to-one and in order.
///
/// The first header resolving to an alias keeps it. A later header that would
/// resolve to the same alias keeps its own slug instead, so two distinct source
/// columns never merge. Repeated slugs get a `_2`, `_3`, ... suffix.
pub fn normalize_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    let mut assigned: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut normalized = Vec::with_capacity(headers.len());

    for header in headers {
        let slug = slugify(header.as_ref());
        let preferred = canonical_alias(&slug).unwrap_or(slug.as_str());

        let name = if !assigned.contains(preferred) {
            preferred.to_string()
        } else if !assigned.contains(&slug) {
            slug.clone()
        } else {
            (2..)
                .map(|suffix| format!("{slug}_{suffix}"))
                .find(|candidate| !assigned.contains(candidate))
                .unwrap_or_else(|| slug.clone())
        };

        assigned.insert(name.clone());
        normalized.push(name);
    }

    normalized
}

#[cfg(test)]
pub(crate) fn slugify_for_tests(header: &str) -> String {
    slugify(header)
}
