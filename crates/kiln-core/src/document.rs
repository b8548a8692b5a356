//! Textual lookups over JSON-shaped documents.
//!
//! Nothing here builds a tree. A key is located by its first textual
//! occurrence in the searched window, so a key that also appears inside an
//! earlier nested object shadows the intended one. Narrow the window with
//! [`Scanner::nested_value_of`] or [`Scanner::section_of`] when that matters.
//!
//! Every lookup reports a missing value as `None`. Callers decide whether
//! absence is an error.

use serde::{Deserialize, Serialize};

/// How brackets and quotes inside string literals are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BracketMatching {
    /// Every bracket character counts towards the depth and a string value
    /// ends at the first `"`.
    Literal,
    /// Brackets inside string literals are skipped and `\"` does not end a
    /// string.
    #[default]
    QuoteAware,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scanner {
    matching: BracketMatching,
}

impl Scanner {
    pub fn new(matching: BracketMatching) -> Self {
        Self { matching }
    }

    /// Returns the quoted scalar following the first `"key"` in `doc`.
    ///
    /// Escape sequences are returned as they appear in the document.
    pub fn value_of<'a>(&self, doc: &'a str, key: &str) -> Option<&'a str> {
        let key_end = find_key(doc, key)?;
        let colon = key_end + doc[key_end..].find(':')?;

        let value = doc[colon + 1..].trim_start().strip_prefix('"')?;
        let end = self.string_end(value)?;

        Some(&value[..end])
    }

    /// Returns the index of the bracket closing the one at `start`.
    ///
    /// `start` must point at `{` or `[`. Only that bracket pair is counted.
    /// Unbalanced input yields `None`.
    pub fn span_of(&self, doc: &str, start: usize) -> Option<usize> {
        let bytes = doc.as_bytes();
        let open = *bytes.get(start)?;
        let close = match open {
            b'{' => b'}',
            b'[' => b']',
            _ => return None,
        };

        let quote_aware = self.matching == BracketMatching::QuoteAware;
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;

        for (index, &byte) in bytes.iter().enumerate().skip(start) {
            if in_string {
                match byte {
                    _ if escaped => escaped = false,
                    b'\\' => escaped = true,
                    b'"' => in_string = false,
                    _ => {}
                }
                continue;
            }

            if byte == b'"' && quote_aware {
                in_string = true;
            } else if byte == open {
                depth += 1;
            } else if byte == close {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
        }

        None
    }

    /// Narrows the window to the object following each key but the last one,
    /// then extracts the last key's scalar from it.
    ///
    /// ```rust
    /// # use kiln_core::document::Scanner;
    /// let doc = r#"{"downloads": {"client": {"url": "https://h/a.jar"}}}"#;
    /// let url = Scanner::default().nested_value_of(doc, &["downloads", "client", "url"]);
    /// assert_eq!(url, Some("https://h/a.jar"));
    /// ```
    pub fn nested_value_of<'a>(&self, doc: &'a str, keys: &[&str]) -> Option<&'a str> {
        let (last, path) = keys.split_last()?;
        let window = self.narrow_all(doc, path)?;
        self.value_of(window, last)
    }

    /// Narrows like [`Scanner::nested_value_of`] and returns the span opened
    /// by the first `open` bracket after the last key, brackets included.
    pub fn section_of<'a>(&self, doc: &'a str, keys: &[&str], open: char) -> Option<&'a str> {
        let (last, path) = keys.split_last()?;
        let window = self.narrow_all(doc, path)?;

        let key_end = find_key(window, last)?;
        let start = key_end + window[key_end..].find(open)?;
        let end = self.span_of(window, start)?;

        Some(&window[start..=end])
    }

    /// Iterates over the consecutive top-level objects of an array span.
    pub fn objects<'a>(&self, array: &'a str) -> Objects<'a> {
        Objects {
            scanner: *self,
            doc: array,
            pos: 0,
        }
    }

    fn narrow_all<'a>(&self, doc: &'a str, keys: &[&str]) -> Option<&'a str> {
        keys.iter().try_fold(doc, |window, key| self.narrow(window, key))
    }

    fn narrow<'a>(&self, doc: &'a str, key: &str) -> Option<&'a str> {
        let key_end = find_key(doc, key)?;
        let start = key_end + doc[key_end..].find('{')?;
        let end = self.span_of(doc, start)?;
        Some(&doc[start..=end])
    }

    fn string_end(&self, s: &str) -> Option<usize> {
        match self.matching {
            BracketMatching::Literal => s.find('"'),
            BracketMatching::QuoteAware => {
                let mut escaped = false;
                for (index, byte) in s.bytes().enumerate() {
                    match byte {
                        _ if escaped => escaped = false,
                        b'\\' => escaped = true,
                        b'"' => return Some(index),
                        _ => {}
                    }
                }
                None
            }
        }
    }
}

/// Index right after the closing quote of the first `"key"`.
fn find_key(doc: &str, key: &str) -> Option<usize> {
    let pattern = format!("\"{key}\"");
    doc.find(&pattern).map(|pos| pos + pattern.len())
}

pub struct Objects<'a> {
    scanner: Scanner,
    doc: &'a str,
    pos: usize,
}

impl<'a> Iterator for Objects<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos + self.doc.get(self.pos..)?.find('{')?;
        let Some(end) = self.scanner.span_of(self.doc, start) else {
            self.pos = self.doc.len();
            return None;
        };
        self.pos = end + 1;
        Some(&self.doc[start..=end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUOTE_AWARE: Scanner = Scanner {
        matching: BracketMatching::QuoteAware,
    };
    const LITERAL: Scanner = Scanner {
        matching: BracketMatching::Literal,
    };

    #[test]
    fn value_of_test() {
        let doc = r#"{"id": "1.20.1",   "type":"release", "size": 42}"#;

        assert_eq!(QUOTE_AWARE.value_of(doc, "id"), Some("1.20.1"));
        assert_eq!(QUOTE_AWARE.value_of(doc, "type"), Some("release"));
        assert_eq!(QUOTE_AWARE.value_of(doc, "size"), None);
        assert_eq!(QUOTE_AWARE.value_of(doc, "url"), None);
    }

    #[test]
    fn first_textual_match_wins() {
        let doc = r#"{"downloads": {"client": {"url": "a"}}, "url": "b"}"#;

        assert_eq!(QUOTE_AWARE.value_of(doc, "url"), Some("a"));
        assert_eq!(
            QUOTE_AWARE.nested_value_of(doc, &["downloads", "client", "url"]),
            Some("a")
        );
        assert_eq!(QUOTE_AWARE.nested_value_of(doc, &["assetIndex", "id"]), None);
    }

    #[test]
    fn escaped_quotes() {
        let doc = r#"{"v": "a\"b"}"#;

        assert_eq!(QUOTE_AWARE.value_of(doc, "v"), Some(r#"a\"b"#));
        assert_eq!(LITERAL.value_of(doc, "v"), Some(r"a\"));
    }

    #[test]
    fn span_of_test() {
        let doc = r#"{"a": {"b": [1, [2]]}}"#;

        assert_eq!(QUOTE_AWARE.span_of(doc, 0), Some(doc.len() - 1));

        let array = doc.find('[').unwrap();
        assert_eq!(QUOTE_AWARE.span_of(doc, array), Some(doc.len() - 3));

        assert_eq!(QUOTE_AWARE.span_of(doc, 1), None);
        assert_eq!(QUOTE_AWARE.span_of("{\"a\": {", 0), None);
        assert_eq!(QUOTE_AWARE.span_of(doc, doc.len()), None);
    }

    #[test]
    fn brackets_inside_strings() {
        let doc = r#"{"msg":"}"}"#;

        assert_eq!(QUOTE_AWARE.span_of(doc, 0), Some(10));
        assert_eq!(LITERAL.span_of(doc, 0), Some(8));
    }

    #[test]
    fn section_of_test() {
        let doc = r#"{"jvm": "shadow", "arguments": {"game": ["--demo"], "jvm": ["-Xss1M", {"rules": []}]}}"#;

        assert_eq!(
            QUOTE_AWARE.section_of(doc, &["arguments", "jvm"], '['),
            Some(r#"["-Xss1M", {"rules": []}]"#)
        );
        assert_eq!(QUOTE_AWARE.section_of(doc, &["libraries"], '['), None);
    }

    #[test]
    fn objects_test() {
        let doc = r#"[{"id": "a"}, {"id": "b", "nested": {"id": "c"}}, {"id": "d"}]"#;

        let ids = QUOTE_AWARE
            .objects(doc)
            .filter_map(|object| QUOTE_AWARE.value_of(object, "id"))
            .collect::<Vec<_>>();

        assert_eq!(ids, ["a", "b", "d"]);
        assert_eq!(QUOTE_AWARE.objects("[]").count(), 0);
        assert_eq!(QUOTE_AWARE.objects(r#"[{"id": "a"}, {"id""#).count(), 1);
    }
}
