// src/core/sanitize.rs
//
// Field cleaner: every text fragment taken from a page passes through here
// before it becomes a name, a title or a header.

/// Collapse whitespace runs (newlines included) to one space and trim.
/// Total: never fails, empty in → empty out.
pub fn clean(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&").replace('\u{a0}', " ")
}

/// Remove footnote markers such as `[1]`, `[a]`, `[note 2]`, `[citation needed]`.
pub fn strip_footnotes(s: &str) -> String {
    re!(r"\[[^\[\]]{0,24}\]").replace_all(s, "").into_owned()
}

/// Remove `( ... )` asides, non-nested.
pub fn strip_parentheticals(s: &str) -> String {
    re!(r"\([^()]*\)").replace_all(s, "").into_owned()
}

/// Footnotes and asides out, whitespace collapsed.
pub fn clean_name(s: &str) -> String {
    clean(&strip_parentheticals(&strip_footnotes(&normalize_entities(s))))
}

/// `Best_Picture` → `Best Picture`
pub fn display_category(key: &str) -> String {
    clean(&key.replace('_', " "))
}

/// True for strings made only of ASCII digits (after trimming).
pub fn is_numeric(s: &str) -> bool {
    let t = s.trim();
    !t.is_empty() && t.chars().all(|c| c.is_ascii_digit())
}

/// URL-safe file stem for cache keys: `https://x/wiki/A_(b)` → `x_wiki_A__b`.
pub fn file_stem_for_url(url: &str) -> String {
    let trimmed = url
        .split('#')
        .next()
        .unwrap_or(url)
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let mut out = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' { out.push(ch); }
        else { out.push('_'); }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!("page") } else { out }
}
