use lc_core::{bail, debug};
use lc_core::config::LookupCachePolicy;
use lc_core::Result;
use proc_macro2::{Ident, TokenStream};
use quote::format_ident;

mod item;
mod ty;
mod value;

pub mod rustfmt;

const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "else", "enum", "extern", "false", "fn", "for", "if",
    "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static",
    "struct", "trait", "true", "type", "unsafe", "use", "where", "while", "async", "await", "dyn",
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "typeof", "unsized",
    "virtual", "yield", "try", "gen",
];

/// Keywords that cannot be written as raw identifiers either.
const RESERVED: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Lays out token output when rustfmt is unavailable: one item or statement per line,
/// four-space indentation by brace depth, string literals left untouched.
fn fallback_layout(code: &str) -> String {
    let mut out = String::with_capacity(code.len() + code.len() / 8);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = code.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => {
                indent(&mut out, depth);
                out.push('"');
                in_string = true;
            }
            '{' => {
                trim_trailing_blanks(&mut out);
                indent(&mut out, depth);
                out.push_str(" {\n");
                depth += 1;
            }
            '}' => {
                depth = depth.saturating_sub(1);
                trim_trailing_blanks(&mut out);
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                indent(&mut out, depth);
                out.push('}');
                let next = chars.clone().find(|c| !c.is_whitespace());
                match next {
                    Some(';') | Some(',') | Some(')') | None => {}
                    Some(_) => out.push('\n'),
                }
            }
            ';' => out.push_str(";\n"),
            ',' => {
                out.push(',');
                if matches!(chars.peek(), Some('}')) {
                    out.push('\n');
                }
            }
            ' ' | '\t' | '\n' | '\r' => {
                if !out.is_empty() && !out.ends_with(|c: char| c.is_whitespace() || c == '(') {
                    out.push(' ');
                }
            }
            _ => {
                indent(&mut out, depth);
                out.push(ch);
            }
        }
    }

    let mut formatted = out.trim_end().to_string();
    formatted.push('\n');
    formatted
}

fn indent(buf: &mut String, depth: usize) {
    if buf.is_empty() || buf.ends_with('\n') {
        buf.push_str(&"    ".repeat(depth));
    }
}

fn trim_trailing_blanks(buf: &mut String) {
    while buf.ends_with(&[' ', '\t'][..]) {
        buf.pop();
    }
}

/// Prints constants interfaces as Rust modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantsPrinter {
    pub rustfmt: bool,
    /// Which by-name lookup categories remember their answer.
    pub lookup_cache: LookupCachePolicy,
}

impl Default for ConstantsPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstantsPrinter {
    pub fn new() -> Self {
        Self {
            rustfmt: false,
            lookup_cache: LookupCachePolicy::default(),
        }
    }

    pub fn new_with_rustfmt() -> Self {
        Self {
            rustfmt: true,
            ..Self::new()
        }
    }

    pub fn with_lookup_cache(mut self, policy: LookupCachePolicy) -> Self {
        self.lookup_cache = policy;
        self
    }

    pub fn set_rustfmt(&mut self, rustfmt: bool) {
        self.rustfmt = rustfmt;
    }

    pub fn maybe_rustfmt_token_stream(&self, code: &TokenStream) -> Result<String> {
        self.maybe_rustfmt(&code.to_string())
    }

    pub fn maybe_rustfmt(&self, code: &str) -> Result<String> {
        if self.rustfmt {
            match rustfmt::format_code(code) {
                Ok(formatted) => return Ok(formatted),
                Err(err) => debug!("rustfmt unavailable, using fallback layout: {}", err),
            }
        }
        Ok(fallback_layout(code))
    }

    /// Identifier for a declared name; keywords become raw identifiers.
    pub fn print_ident(&self, raw: &str) -> Result<Ident> {
        if RESERVED.contains(&raw) {
            bail!("'{}' cannot be used as a generated identifier", raw)
        }
        if RUST_KEYWORDS.contains(&raw) {
            return Ok(format_ident!("r#{}", raw));
        }
        match syn::parse_str::<Ident>(raw) {
            Ok(ident) => Ok(ident),
            Err(_) => Err(eyre::eyre!("'{}' is not a valid Rust identifier", raw).into()),
        }
    }
}

/// `TestConstantsWithLookup` -> `test_constants_with_lookup`
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (index, ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if ch.is_uppercase() && index > 0 && !out.ends_with('_') {
            let previous = chars[index - 1];
            let next_is_lower = chars.get(index + 1).is_some_and(|c| c.is_lowercase());
            if previous.is_lowercase() || previous.is_ascii_digit() || (previous.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.extend(ch.to_lowercase());
    }
    out.trim_end_matches('_').to_string()
}

/// Module name of the per-locale file of an artifact.
pub fn artifact_module_name(type_prefix: &str, locale: &str) -> String {
    format!("{}_{}", snake_case(type_prefix), snake_case(locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_layout_puts_items_on_separate_lines() {
        let formatted = fallback_layout("impl A { fn a (& self) -> i32 { 1i32 } fn b (& self) -> & str { \"x { y\" } }");
        let lines: Vec<_> = formatted.lines().collect();
        assert!(lines.len() > 4, "expected multiple lines, got: {formatted}");
        assert!(lines.iter().any(|line| line.contains("\"x { y\"")));
    }

    #[test]
    fn keywords_become_raw_identifiers() {
        let printer = ConstantsPrinter::new();
        assert_eq!(printer.print_ident("type").unwrap().to_string(), "r#type");
        assert_eq!(printer.print_ident("mapABCD").unwrap().to_string(), "mapABCD");
        assert!(printer.print_ident("page-title").is_err());
        assert!(printer.print_ident("self").is_err());
    }

    #[test]
    fn snake_case_names() {
        assert_eq!(snake_case("TestConstantsWithLookup"), "test_constants_with_lookup");
        assert_eq!(snake_case("Page_Labels"), "page_labels");
        assert_eq!(snake_case("HTTPStatus"), "http_status");
        assert_eq!(artifact_module_name("TestConstants", "en_US"), "test_constants_en_us");
        assert_eq!(artifact_module_name("TestConstants", "default"), "test_constants_default");
    }
}
