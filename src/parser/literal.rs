//! Decoding of PHP literal tokens into [`ScalarValue`]s.

use crate::core::values::ScalarValue;

/// Decode a single-quoted string token, quotes included.
pub fn single_quoted(raw: &str) -> Option<String> {
    let inner = strip_quotes(raw, '\'')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('\\') | Some('\'') => {
                    out.extend(chars.next());
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    Some(out)
}

/// Decode a double-quoted string token without interpolation.
pub fn double_quoted(raw: &str) -> Option<String> {
    let inner = strip_quotes(raw, '"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&next) = chars.peek() else {
            out.push('\\');
            break;
        };
        match next {
            'n' => push_escape(&mut out, &mut chars, '\n'),
            't' => push_escape(&mut out, &mut chars, '\t'),
            'r' => push_escape(&mut out, &mut chars, '\r'),
            'v' => push_escape(&mut out, &mut chars, '\u{0B}'),
            'e' => push_escape(&mut out, &mut chars, '\u{1B}'),
            'f' => push_escape(&mut out, &mut chars, '\u{0C}'),
            '\\' | '$' | '"' => push_escape(&mut out, &mut chars, next),
            '0'..='7' => {
                let mut digits = String::new();
                while digits.len() < 3 {
                    match chars.peek() {
                        Some(d @ '0'..='7') => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                let code = u32::from_str_radix(&digits, 8).unwrap_or(0) & 0xFF;
                out.extend(char::from_u32(code));
            }
            'x' => {
                chars.next();
                let mut digits = String::new();
                while digits.len() < 2 {
                    match chars.peek() {
                        Some(d) if d.is_ascii_hexdigit() => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(ch) => out.push(ch),
                    None => out.push_str("\\x"),
                }
            }
            'u' => {
                chars.next();
                if chars.peek() != Some(&'{') {
                    out.push_str("\\u");
                    continue;
                }
                chars.next();
                let digits: String = chars.by_ref().take_while(|d| *d != '}').collect();
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(ch) => out.push(ch),
                    None => {
                        out.push_str("\\u{");
                        out.push_str(&digits);
                        out.push('}');
                    }
                }
            }
            _ => out.push('\\'),
        }
    }
    Some(out)
}

fn push_escape(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    decoded: char,
) {
    chars.next();
    out.push(decoded);
}

fn strip_quotes(raw: &str, quote: char) -> Option<&str> {
    let raw = raw.strip_prefix(['b', 'B']).unwrap_or(raw);
    raw.strip_prefix(quote)?.strip_suffix(quote)
}

/// Decode an integer token. Values that overflow become floats, as in PHP.
pub fn integer(raw: &str) -> Option<ScalarValue> {
    let text: String = raw.chars().filter(|c| *c != '_').collect();
    let lower = text.to_ascii_lowercase();
    let (digits, radix) = if let Some(hex) = lower.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (bin, 2)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        (oct, 8)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (&lower[1..], 8)
    } else {
        (lower.as_str(), 10)
    };

    match i64::from_str_radix(digits, radix) {
        Ok(value) => Some(ScalarValue::Int(value)),
        Err(_) => u128::from_str_radix(digits, radix)
            .ok()
            .map(|wide| ScalarValue::Float(wide as f64)),
    }
}

pub fn float(raw: &str) -> Option<ScalarValue> {
    let text: String = raw.chars().filter(|c| *c != '_').collect();
    text.parse::<f64>().ok().map(ScalarValue::Float)
}

/// `true`, `false` and `null` in any letter case.
pub fn keyword(raw: &str) -> Option<ScalarValue> {
    match raw.trim_start_matches('\\').to_ascii_lowercase().as_str() {
        "true" => Some(ScalarValue::Bool(true)),
        "false" => Some(ScalarValue::Bool(false)),
        "null" => Some(ScalarValue::Null),
        _ => None,
    }
}
