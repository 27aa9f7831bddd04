//! Surgical edits to one driver block of Laravel's `config/database.php`.

use regex::Regex;

use crate::core::values::ScalarValue;

const DEFAULT_INDENT: &str = "        ";

/// Rewrite `updates` inside the `'driver' => [ ... ],` block.
///
/// Existing `'key' => value,` lines keep their key quoting and any trailing
/// `//` comment; missing keys are appended before the block's closing
/// bracket. Returns `None` when the block cannot be found.
pub fn patch_driver_block<'a, I>(content: &str, driver: &str, updates: I) -> Option<String>
where
    I: IntoIterator<Item = (&'a str, &'a ScalarValue)>,
{
    let block = Regex::new(&format!(
        r#"(?s)(['"]{}['"]\s*=>\s*\[)(.*?)(\n\s*\],)"#,
        regex::escape(driver)
    ))
    .ok()?;
    let caps = block.captures(content)?;
    let whole = caps.get(0)?;
    let header = caps.get(1)?.as_str();
    let footer = caps.get(3)?.as_str();
    let mut body = caps.get(2)?.as_str().to_string();

    let indent = entry_indent(&body);
    for (key, value) in updates {
        body = set_entry(&body, key, value, &indent);
    }

    let mut out = String::with_capacity(content.len() + 64);
    out.push_str(&content[..whole.start()]);
    out.push_str(header);
    out.push_str(&body);
    out.push_str(footer);
    out.push_str(&content[whole.end()..]);
    Some(out)
}

fn set_entry(body: &str, key: &str, value: &ScalarValue, indent: &str) -> String {
    let literal = value.to_php_literal();
    let entry = Regex::new(&format!(
        r#"(?m)(['"]{}['"]\s*=>\s*)([^\n]*?)(,?)([ \t]+//[^\n]*)?[ \t]*$"#,
        regex::escape(key)
    ));

    if let Ok(entry) = entry {
        if let Some(caps) = entry.captures(body) {
            let (Some(whole), Some(lead)) = (caps.get(0), caps.get(1)) else {
                return body.to_string();
            };
            let comment = caps.get(4).map_or("", |c| c.as_str());
            let mut out = String::with_capacity(body.len() + literal.len());
            out.push_str(&body[..whole.start()]);
            out.push_str(lead.as_str());
            out.push_str(&literal);
            out.push(',');
            out.push_str(comment);
            out.push_str(&body[whole.end()..]);
            return out;
        }
    }

    format!("{body}\n{indent}'{key}' => {literal},")
}

/// Indentation of the block's existing entries.
fn entry_indent(body: &str) -> String {
    body.lines()
        .find(|line| {
            let trimmed = line.trim_start();
            trimmed.starts_with('\'') || trimmed.starts_with('"')
        })
        .map(|line| line[..line.len() - line.trim_start().len()].to_string())
        .unwrap_or_else(|| DEFAULT_INDENT.to_string())
}
