//! `.properties` text format.
//!
//! Follows `java.util.Properties`: `#`/`!` comment lines, a key ending at the
//! first unescaped `=`, `:` or whitespace, logical lines continued by an odd
//! number of trailing backslashes, `\uXXXX` escapes, and any other escaped
//! character standing for itself. Leading whitespace of a value is dropped,
//! trailing whitespace is kept.

use super::PropertyBundle;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct PropertiesError {
    pub line: usize,
    pub message: String,
}

pub fn parse_properties(text: &str) -> Result<PropertyBundle, PropertiesError> {
    let mut bundle = PropertyBundle::new();
    for (line, logical) in logical_lines(text) {
        let (key, value) = split_entry(&logical);
        let key = unescape(key).map_err(|message| PropertiesError { line, message })?;
        let value = unescape(value).map_err(|message| PropertiesError { line, message })?;
        // later entries of the same file replace earlier ones
        bundle.insert(key, value);
    }
    Ok(bundle)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Joins continued lines; yields the 1-based number of the first natural line of each entry.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (index, raw) in text.lines().enumerate() {
        let trimmed = raw.trim_start_matches(is_blank);
        let continues = ends_with_continuation(trimmed);
        let body = if continues {
            &trimmed[..trimmed.len() - 1]
        } else {
            trimmed
        };

        match current.as_mut() {
            Some((_, buffer)) => buffer.push_str(body),
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                current = Some((index + 1, body.to_string()));
            }
        }

        if !continues {
            out.extend(current.take());
        }
    }
    // a continuation on the last line just ends the entry
    out.extend(current);
    out
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = index;
                break;
            }
            c if is_blank(c) => {
                key_end = index;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(&['=', ':'][..]) {
        rest = stripped.trim_start_matches(is_blank);
    }
    (key, rest)
}

fn unescape(text: &str) -> Result<String, String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let unit = read_unit(&mut chars)?;
                match unit {
                    0xD800..=0xDBFF => {
                        let low = read_low_surrogate(&mut chars)?;
                        let decoded = char::decode_utf16([unit, low])
                            .next()
                            .and_then(Result::ok)
                            .unwrap_or(char::REPLACEMENT_CHARACTER);
                        out.push(decoded);
                    }
                    _ => out.push(char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER)),
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn read_unit(chars: &mut impl Iterator<Item = char>) -> Result<u16, String> {
    let digits: String = chars.take(4).collect();
    if digits.len() != 4 {
        return Err(format!("malformed \\uxxxx encoding '\\u{}'", digits));
    }
    u16::from_str_radix(&digits, 16).map_err(|_| format!("malformed \\uxxxx encoding '\\u{}'", digits))
}

fn read_low_surrogate(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<u16, String> {
    if chars.next_if_eq(&'\\').is_none() || chars.next_if_eq(&'u').is_none() {
        return Err("high surrogate escape without a following low surrogate".to_string());
    }
    read_unit(chars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn separators_and_comments() {
        let bundle = parse_properties(
            "# comment\n! also a comment\nstring = string\nintOne:1\nspaced value\n\n  indented=yes\n",
        )
        .unwrap();
        assert_eq!(bundle.get("string"), Some("string"));
        assert_eq!(bundle.get("intOne"), Some("1"));
        assert_eq!(bundle.get("spaced"), Some("value"));
        assert_eq!(bundle.get("indented"), Some("yes"));
        assert_eq!(bundle.len(), 4);
    }

    #[test]
    fn trailing_whitespace_of_values_is_kept() {
        let bundle = parse_properties("stringTrailingWhitespace = trailing   \n").unwrap();
        assert_eq!(bundle.get("stringTrailingWhitespace"), Some("trailing   "));
    }

    #[test]
    fn continuation_lines_join_without_leading_blanks() {
        let bundle = parse_properties("mapABCD = A, \\\n     B, C, \\\n  D\nnext=1\n").unwrap();
        assert_eq!(bundle.get("mapABCD"), Some("A, B, C, D"));
        assert_eq!(bundle.get("next"), Some("1"));
    }

    #[test]
    fn escaped_backslash_does_not_continue() {
        let bundle = parse_properties("path = C:\\\\\nother = x\n").unwrap();
        assert_eq!(bundle.get("path"), Some("C:\\"));
        assert_eq!(bundle.get("other"), Some("x"));
    }

    #[test]
    fn escapes_in_keys_and_values() {
        let bundle =
            parse_properties("key\\ with\\=sep = tab\\there\nlist = X,\\\\, Y\njp = \\u65e5\\u672c\nemoji = \\uD83D\\uDE00\n")
                .unwrap();
        assert_eq!(bundle.get("key with=sep"), Some("tab\there"));
        assert_eq!(bundle.get("list"), Some("X,\\, Y"));
        assert_eq!(bundle.get("jp"), Some("日本"));
        assert_eq!(bundle.get("emoji"), Some("\u{1F600}"));
    }

    #[test]
    fn malformed_unicode_escape_reports_line() {
        let err = parse_properties("ok = 1\nbad = \\u12G4\n").unwrap_err();
        assert_eq!(err.line, 2);
    }
}
