//! Project title derivation from a base branch name

use crate::types::ProjectNameSpec;

/// Derive the project title (and search key) from a base branch.
///
/// Steps run in a fixed order, each on the output of the previous one:
/// prefix strip, suffix strip, then character-to-space replacement.
/// Prefix and suffix are compared literally and case-insensitively.
/// The result is not trimmed.
pub fn derive_project_name(spec: &ProjectNameSpec<'_>) -> String {
    let mut name = spec.base_branch;

    if let Some(prefix) = spec.prefix_remove.filter(|p| !p.is_empty()) {
        name = strip_prefix_ignore_case(name, prefix).unwrap_or(name);
    }

    if let Some(suffix) = spec.suffix_remove.filter(|s| !s.is_empty()) {
        name = strip_suffix_ignore_case(name, suffix).unwrap_or(name);
    }

    let mut name = name.to_string();
    if let Some(chars) = spec.replace_with_spaces.filter(|c| !c.is_empty()) {
        for ch in chars.chars() {
            if name.contains(ch) {
                name = name.replace(ch, " ");
            }
        }
    }

    name
}

#[inline]
fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Strip `prefix` from the start of `s`, ignoring case
fn strip_prefix_ignore_case<'s>(s: &'s str, prefix: &str) -> Option<&'s str> {
    let mut haystack = s.char_indices();
    let mut end = 0;
    for p in prefix.chars() {
        let (idx, c) = haystack.next()?;
        if !chars_eq_ignore_case(c, p) {
            return None;
        }
        end = idx + c.len_utf8();
    }
    Some(&s[end..])
}

/// Strip `suffix` from the end of `s`, ignoring case
fn strip_suffix_ignore_case<'s>(s: &'s str, suffix: &str) -> Option<&'s str> {
    let mut haystack = s.char_indices().rev();
    let mut start = s.len();
    for p in suffix.chars().rev() {
        let (idx, c) = haystack.next()?;
        if !chars_eq_ignore_case(c, p) {
            return None;
        }
        start = idx;
    }
    Some(&s[..start])
}
