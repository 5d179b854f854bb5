//! Glob pattern translation.
//!
//! Only `*` and `?` are wildcards. Everything else is a literal, with one
//! caveat: unless [`ScanFlags::ESCAPE_META`] is set, literals other than `.`
//! reach the regex engine unescaped, so `a|b` matches `a` or `b` and a stray
//! `(` makes the pattern invalid.

use regex::{Regex, RegexBuilder};

use crate::error::GlobError;
use crate::flags::ScanFlags;

/// Translates a glob pattern into the body of a regular expression.
///
/// The result is not anchored; [`Pattern::new`] wraps it so that it has to
/// match the whole file name.
///
/// ```
/// use dirglob::{translate, ScanFlags};
///
/// assert_eq!(translate("*.txt", ScanFlags::empty()), r".*\.txt");
/// assert_eq!(translate("file?.log", ScanFlags::empty()), r"file.\.log");
/// assert_eq!(translate("a+b?", ScanFlags::ESCAPE_META), r"a\+b.");
/// ```
pub fn translate(pattern: &str, flags: ScanFlags) -> String {
    let escape_meta = flags.contains(ScanFlags::ESCAPE_META);
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut literal = String::new();

    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                flush_literal(&mut out, &mut literal, escape_meta);
                out.push_str(if c == '*' { ".*" } else { "." });
            }
            '.' if !escape_meta => out.push_str(r"\."),
            _ if escape_meta => literal.push(c),
            _ => out.push(c),
        }
    }
    flush_literal(&mut out, &mut literal, escape_meta);
    out
}

fn flush_literal(out: &mut String, literal: &mut String, escape_meta: bool) {
    if literal.is_empty() {
        return;
    }
    if escape_meta {
        out.push_str(&regex::escape(literal));
    } else {
        out.push_str(literal);
    }
    literal.clear();
}

/// A compiled file name predicate.
///
/// # Example
///
/// ```
/// use dirglob::{Pattern, ScanFlags};
///
/// let pattern = Pattern::new("file?.log", ScanFlags::empty())?;
/// assert!(pattern.is_match("file1.log"));
/// assert!(!pattern.is_match("file12.log"));
/// assert!(!pattern.is_match("file.log"));
/// # Ok::<(), dirglob::GlobError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `pattern`. Only [`ScanFlags::ESCAPE_META`] and
    /// [`ScanFlags::CASE_INSENSITIVE`] affect the result.
    pub fn new(pattern: &str, flags: ScanFlags) -> Result<Self, GlobError> {
        let body = translate(pattern, flags);
        let regex = RegexBuilder::new(&format!("^(?:{body})$"))
            .dot_matches_new_line(true)
            .case_insensitive(flags.contains(ScanFlags::CASE_INSENSITIVE))
            .build()
            .map_err(|source| GlobError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Pattern {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns `true` if `name` matches the whole pattern.
    #[inline]
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The glob pattern this predicate was built from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The anchored regular expression used for matching.
    pub fn regex_str(&self) -> &str {
        self.regex.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, name: &str) -> bool {
        Pattern::new(pattern, ScanFlags::empty())
            .unwrap()
            .is_match(name)
    }

    #[test]
    fn test_translate_wildcards() {
        assert_eq!(translate("*", ScanFlags::empty()), ".*");
        assert_eq!(translate("?", ScanFlags::empty()), ".");
        assert_eq!(translate("a.b", ScanFlags::empty()), r"a\.b");
        assert_eq!(translate("", ScanFlags::empty()), "");
    }

    #[test]
    fn test_translate_leaves_other_metacharacters_alone() {
        assert_eq!(translate("a|b(c)", ScanFlags::empty()), "a|b(c)");
        assert_eq!(translate("a|b(c)", ScanFlags::ESCAPE_META), r"a\|b\(c\)");
    }

    #[test]
    fn test_star_matches_any_run() {
        assert!(matches("*.txt", "a.txt"));
        assert!(matches("*.txt", ".txt"));
        assert!(!matches("*.txt", "a.txt.bak"));
        assert!(!matches("*.txt", "b.TXT"));
        assert!(matches("*", ""));
        assert!(matches("a*b*c", "abc"));
        assert!(matches("a*b*c", "aXXbYYc"));
    }

    #[test]
    fn test_question_mark_matches_exactly_one() {
        assert!(matches("file?.log", "file1.log"));
        assert!(matches("file?.log", "fileA.log"));
        assert!(!matches("file?.log", "file12.log"));
        assert!(!matches("file?.log", "file.log"));
        assert!(matches("?", "é"));
    }

    #[test]
    fn test_dot_is_literal() {
        assert!(matches("a.c", "a.c"));
        assert!(!matches("a.c", "abc"));
    }

    #[test]
    fn test_match_spans_whole_name() {
        assert!(!matches("abc", "xabc"));
        assert!(!matches("abc", "abcx"));
        assert!(matches("abc", "abc"));
    }

    #[test]
    fn test_wildcards_cross_newlines() {
        assert!(matches("a*b", "a\nb"));
        assert!(matches("a?b", "a\nb"));
    }

    #[test]
    fn test_legacy_mode_leaks_alternation() {
        // Anchoring wraps the alternation, so both branches must span the name.
        assert!(matches("a|b", "a"));
        assert!(matches("a|b", "b"));
        assert!(!matches("a|b", "ab"));

        let strict = Pattern::new("a|b", ScanFlags::ESCAPE_META).unwrap();
        assert!(strict.is_match("a|b"));
        assert!(!strict.is_match("a"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = Pattern::new("report(1", ScanFlags::empty()).unwrap_err();
        match err {
            GlobError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "report(1"),
            other => panic!("unexpected error: {other}"),
        }

        // The same pattern is fine once metacharacters are escaped.
        let ok = Pattern::new("report(1", ScanFlags::ESCAPE_META).unwrap();
        assert!(ok.is_match("report(1"));
    }

    #[test]
    fn test_escape_meta_never_fails() {
        for pattern in ["[", "(", ")", "\\", "{", "+", "^$", "a\\", "*[*", "??|"] {
            assert!(
                Pattern::new(pattern, ScanFlags::ESCAPE_META).is_ok(),
                "pattern {pattern:?} should compile"
            );
        }
    }

    #[test]
    fn test_case_insensitive() {
        let pattern = Pattern::new("*.txt", ScanFlags::CASE_INSENSITIVE).unwrap();
        assert!(pattern.is_match("b.TXT"));
        assert!(pattern.is_match("a.txt"));
    }

    #[test]
    fn test_accessors() {
        let pattern = Pattern::new("*.rs", ScanFlags::empty()).unwrap();
        assert_eq!(pattern.as_str(), "*.rs");
        assert_eq!(pattern.regex_str(), r"^(?:.*\.rs)$");
    }
}
