//! Line-oriented `KEY=value` patching of `.env` files.
//!
//! An existing `KEY=` line is rewritten in place. A new key goes right after
//! the last line sharing its prefix (`DB_` for `DB_PORT`), or at the end of
//! the file when no such line exists.

use regex::{NoExpand, Regex};

/// Quote values holding whitespace or quote characters.
pub fn format_env_value(value: &str) -> String {
    if value.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
        let escaped = value
            .replace('"', "\\\"")
            .replace('\r', "\\r")
            .replace('\n', "\\n");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

pub fn set_env_value(content: &str, key: &str, value: &str) -> String {
    let line = format!("{}={}", key, format_env_value(value));

    let existing = Regex::new(&format!(r"(?m)^{}=[^\r\n]*", regex::escape(key)));
    if let Ok(existing) = existing {
        if existing.is_match(content) {
            return existing.replace_all(content, NoExpand(&line)).into_owned();
        }
    }

    let prefix = key.split('_').next().unwrap_or(key);
    let siblings = Regex::new(&format!(r"(?m)^{}_[^\n]*\n?", regex::escape(prefix)));
    if let Some(last) = siblings.ok().and_then(|re| re.find_iter(content).last()) {
        let mut out = String::with_capacity(content.len() + line.len() + 2);
        out.push_str(&content[..last.end()]);
        if !last.as_str().ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&line);
        out.push('\n');
        out.push_str(&content[last.end()..]);
        return out;
    }

    let mut out = content.trim_end_matches(['\r', '\n']).to_string();
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&line);
    out.push('\n');
    out
}

/// Apply updates in order.
pub fn apply_env_updates<'a, I>(content: &str, updates: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    updates
        .into_iter()
        .fold(content.to_string(), |acc, (key, value)| {
            set_env_value(&acc, key, value)
        })
}
