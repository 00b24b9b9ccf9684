// src/core/sanitize.rs

/// Collapse every whitespace run (tabs, newlines, nbsp) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Normalized table cell text, or `None` for empty and `-` placeholder cells.
pub fn normalize_cell(s: &str) -> Option<String> {
    let out = normalize_ws(s);
    if out.is_empty() || out == "-" { None } else { Some(out) }
}
