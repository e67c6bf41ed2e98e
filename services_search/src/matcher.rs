//! Literal and pattern matching over node content

use crate::scope::SearchOptions;
use regex::{NoExpand, Regex, RegexBuilder};
use std::ops::Range;

/// A compiled query
///
/// Case-sensitive plain text stays a borrowed literal and uses `str::find`.
/// Everything else (ignoring case, whole word, regex) is compiled into a
/// `Regex`; only whole-word and regex queries expand `$n` in replacements.
#[derive(Debug, Clone)]
pub enum Matcher<'q> {
    Literal(&'q str),
    Pattern { regex: Regex, expand: bool },
}

impl<'q> Matcher<'q> {
    pub fn new(query: &'q str, options: SearchOptions) -> Result<Self, regex::Error> {
        if options.match_case && !options.is_pattern() {
            return Ok(Matcher::Literal(query));
        }

        let pattern = match (options.use_regex, options.whole_word) {
            (true, true) => format!(r"\b(?:{})\b", query),
            (true, false) => query.to_string(),
            (false, true) => format!(r"\b{}\b", regex::escape(query)),
            (false, false) => regex::escape(query),
        };
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(!options.match_case)
            .build()?;
        Ok(Matcher::Pattern {
            regex,
            expand: options.is_pattern(),
        })
    }

    /// First match starting at or after `start`
    ///
    /// `start` is moved forward to the next char boundary; past the end of
    /// the haystack nothing matches.
    pub fn find_at(&self, haystack: &str, start: usize) -> Option<Range<usize>> {
        let start = ceil_char_boundary(haystack, start)?;
        match self {
            Matcher::Literal(needle) => haystack[start..]
                .find(needle)
                .map(|index| start + index..start + index + needle.len()),
            Matcher::Pattern { regex, .. } => regex.find_at(haystack, start).map(|m| m.range()),
        }
    }

    /// The text that replaces the match at `range`
    pub fn replacement_for(&self, haystack: &str, range: Range<usize>, replacement: &str) -> String {
        match self {
            Matcher::Pattern { regex, expand: true } => match regex.captures_at(haystack, range.start) {
                Some(caps) if caps.get(0).map(|m| m.range()) == Some(range) => {
                    let mut expanded = String::new();
                    caps.expand(replacement, &mut expanded);
                    expanded
                }
                _ => replacement.to_string(),
            },
            _ => replacement.to_string(),
        }
    }

    pub fn count(&self, haystack: &str) -> usize {
        match self {
            Matcher::Literal(needle) => haystack.matches(needle).count(),
            Matcher::Pattern { regex, .. } => regex.find_iter(haystack).count(),
        }
    }

    /// Replace every match in one left-to-right pass
    ///
    /// Replacement text is never rescanned, so a replacement containing the
    /// query does not cascade. Returns `None` when nothing matched.
    pub fn replace_all(&self, haystack: &str, replacement: &str) -> Option<(String, usize)> {
        let count = self.count(haystack);
        if count == 0 {
            return None;
        }
        let replaced = match self {
            Matcher::Literal(needle) => haystack.replace(needle, replacement),
            Matcher::Pattern { regex, expand: true } => {
                regex.replace_all(haystack, replacement).into_owned()
            }
            Matcher::Pattern { regex, expand: false } => {
                regex.replace_all(haystack, NoExpand(replacement)).into_owned()
            }
        };
        Some((replaced, count))
    }
}

/// Smallest char boundary at or after `index`, or `None` past the end
pub(crate) fn ceil_char_boundary(text: &str, index: usize) -> Option<usize> {
    if index > text.len() {
        return None;
    }
    let mut index = index;
    while !text.is_char_boundary(index) {
        index += 1;
    }
    Some(index)
}
