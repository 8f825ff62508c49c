//! INI codec
//!
//! Each settings group becomes a section named by its full path; keys at the
//! top level go to `[General]`:
//!
//! ```text
//! [Form]
//! Name=Alice
//!
//! [Form/Options]
//! Enabled=true
//! ```
//!
//! Values are stored as text and read back as `Value::Text`; typed reads go
//! through the value conversions. Text that would not survive a plain
//! `key=value` line is double-quoted with backslash escapes. Characters with
//! meaning in section headers or keys are percent-encoded.

use std::collections::BTreeMap;

use formstate_core::{MemorySettings, Value};

use crate::errors::{parse_error, Result};

/// Section holding keys that live directly at the top level
pub const GENERAL_SECTION: &str = "General";

/// Header used for a real top-level group named `General`
const ESCAPED_GENERAL: &str = "%General";

/// Serialize every entry of `settings`
pub fn write(settings: &MemorySettings) -> String {
    let mut sections: BTreeMap<&str, Vec<(&str, &Value)>> = BTreeMap::new();
    for (path, value) in settings.entries() {
        let (section, key) = path.rsplit_once('/').unwrap_or(("", path.as_str()));
        sections.entry(section).or_default().push((key, value));
    }

    let mut out = String::new();
    for (section, entries) in &sections {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push('[');
        out.push_str(&section_header(section));
        out.push_str("]\n");
        for (key, value) in entries {
            out.push_str(&encode_key(key));
            out.push('=');
            out.push_str(&encode_value(&value.to_text()));
            out.push('\n');
        }
    }
    out
}

/// Parse INI text into a settings map
///
/// Blank lines and lines starting with `;` or `#` are skipped. Keys before
/// the first section belong to the top level.
///
/// # Errors
///
/// Returns a `Serialization` error naming the line for unterminated section
/// headers, lines without `=`, empty keys and malformed quoted values.
pub fn parse(text: &str) -> Result<MemorySettings> {
    let mut settings = MemorySettings::new();
    let mut section = String::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .ok_or_else(|| parse_error(line_no, "unterminated section header"))?;
            section = decode_section(name, line_no)?;
            continue;
        }

        let (key, raw_value) = line
            .split_once('=')
            .ok_or_else(|| parse_error(line_no, "expected key=value"))?;
        let key = decode_key(key.trim(), line_no)?;
        if key.is_empty() {
            return Err(parse_error(line_no, "empty key"));
        }
        let value = decode_value(raw_value.trim(), line_no)?;

        let path = if section.is_empty() {
            key
        } else {
            format!("{}/{}", section, key)
        };
        settings.insert_path(&path, Value::Text(value));
    }

    Ok(settings)
}

fn section_header(group: &str) -> String {
    match group {
        "" => GENERAL_SECTION.to_string(),
        GENERAL_SECTION => ESCAPED_GENERAL.to_string(),
        _ => group
            .split('/')
            .map(encode_key)
            .collect::<Vec<_>>()
            .join("/"),
    }
}

fn decode_section(name: &str, line_no: usize) -> Result<String> {
    match name {
        GENERAL_SECTION => Ok(String::new()),
        ESCAPED_GENERAL => Ok(GENERAL_SECTION.to_string()),
        _ => decode_key(name, line_no),
    }
}

fn encode_key(key: &str) -> String {
    let last = key.chars().count().saturating_sub(1);
    let mut out = String::with_capacity(key.len());
    for (i, c) in key.chars().enumerate() {
        let edge_space = c == ' ' && (i == 0 || i == last);
        let special = matches!(c, '%' | '[' | ']' | '=' | ';' | '#' | '"' | '\\' | '/');
        if edge_space || special || c.is_control() || (c.is_whitespace() && c != ' ') {
            let mut buf = [0u8; 4];
            for b in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{:02X}", b));
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn decode_key(encoded: &str, line_no: usize) -> Result<String> {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let escaped = (bytes[i] == b'%')
            .then(|| bytes.get(i + 1..i + 3))
            .flatten()
            .and_then(|hex| std::str::from_utf8(hex).ok())
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        match escaped {
            Some(b) => {
                out.push(b);
                i += 3;
            }
            None => {
                out.push(bytes[i]);
                i += 1;
            }
        }
    }
    String::from_utf8(out).map_err(|_| parse_error(line_no, "invalid UTF-8 in key"))
}

fn needs_quotes(text: &str) -> bool {
    text != text.trim()
        || text
            .chars()
            .any(|c| matches!(c, '"' | '\\' | ';' | '#') || c.is_control())
}

fn encode_value(text: &str) -> String {
    if !needs_quotes(text) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn decode_value(raw: &str, line_no: usize) -> Result<String> {
    let Some(body) = raw.strip_prefix('"') else {
        return Ok(raw.to_string());
    };

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    loop {
        match chars.next() {
            None => return Err(parse_error(line_no, "unterminated quoted value")),
            Some('"') => {
                let rest = chars.as_str().trim();
                if !(rest.is_empty() || rest.starts_with(';') || rest.starts_with('#')) {
                    return Err(parse_error(line_no, "unexpected text after quoted value"));
                }
                return Ok(out);
            }
            Some('\\') => {
                let unescaped = match chars.next() {
                    Some('"') => '"',
                    Some('\\') => '\\',
                    Some('n') => '\n',
                    Some('r') => '\r',
                    Some('t') => '\t',
                    Some('u') => decode_unicode_escape(&mut chars)
                        .ok_or_else(|| parse_error(line_no, "invalid unicode escape"))?,
                    _ => return Err(parse_error(line_no, "invalid escape sequence")),
                };
                out.push(unescaped);
            }
            Some(c) => out.push(c),
        }
    }
}

/// Parse the `{hex}` part of a `\u{hex}` escape
fn decode_unicode_escape(chars: &mut std::str::Chars<'_>) -> Option<char> {
    if chars.next()? != '{' {
        return None;
    }
    let mut hex = String::new();
    loop {
        match chars.next()? {
            '}' => break,
            c if c.is_ascii_hexdigit() && hex.len() < 6 => hex.push(c),
            _ => return None,
        }
    }
    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
}
