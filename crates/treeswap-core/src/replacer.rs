use regex::{NoExpand, Regex};
use tracing::debug;

use crate::config::FindReplacePairs;
use crate::{Result, SweepError};

/// Applies an ordered list of find/replace pairs to a string.
///
/// Find strings are compiled as regular expressions exactly as given; they are
/// not escaped. A plain word such as `Foo` behaves as a literal substring, but
/// `a.b` also matches `axb`. Replacement strings are inserted literally, so `$1`
/// is not expanded.
#[derive(Debug, Clone)]
pub struct PatternReplacer {
    rules: Vec<ReplaceRule>,
}

#[derive(Debug, Clone)]
struct ReplaceRule {
    find: String,
    pattern: Regex,
    replace: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub text: String,
    // Patterns that did not match are omitted.
    pub counts: Vec<(String, usize)>,
}

impl Replacement {
    pub fn total_matches(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn is_match(&self) -> bool {
        !self.counts.is_empty()
    }
}

impl PatternReplacer {
    pub fn new(pairs: &FindReplacePairs) -> Result<Self> {
        let rules = pairs
            .iter()
            .map(|(find, replace)| {
                let pattern = Regex::new(find).map_err(|source| SweepError::InvalidPattern {
                    pattern: find.to_string(),
                    source,
                })?;
                Ok(ReplaceRule {
                    find: find.to_string(),
                    pattern,
                    replace: replace.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, text: &str) -> Replacement {
        let mut current = text.to_string();
        let mut counts = Vec::new();

        for rule in &self.rules {
            let matches = rule.pattern.find_iter(&current).count();
            if matches == 0 {
                continue;
            }

            debug!("Pattern '{}' matched {} time(s)", rule.find, matches);
            current = rule
                .pattern
                .replace_all(&current, NoExpand(&rule.replace))
                .into_owned();
            counts.push((rule.find.clone(), matches));
        }

        Replacement { text: current, counts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacer(values: &[&str]) -> PatternReplacer {
        PatternReplacer::new(&FindReplacePairs::from_flat(values).unwrap()).unwrap()
    }

    #[test]
    fn test_content_replacement() {
        let replacer = replacer(&["example-name", "project-name"]);

        let result = replacer.apply("This is an example-name project with example-name references.");

        assert_eq!(
            result.text,
            "This is an project-name project with project-name references."
        );
        assert_eq!(result.counts, vec![("example-name".to_string(), 2)]);
        assert_eq!(result.total_matches(), 2);
    }

    #[test]
    fn test_no_content_replacement() {
        let replacer = replacer(&["example-name", "project-name"]);

        let content = "This is a test project with no matching tokens.";
        let result = replacer.apply(content);

        assert_eq!(result.text, content);
        assert!(!result.is_match());
        assert_eq!(result.total_matches(), 0);
    }

    #[test]
    fn test_empty_pairs_is_noop() {
        let replacer = PatternReplacer::new(&FindReplacePairs::new()).unwrap();

        let result = replacer.apply("anything");

        assert!(replacer.is_empty());
        assert_eq!(result.text, "anything");
        assert!(result.counts.is_empty());
    }

    #[test]
    fn test_pairs_apply_in_order() {
        // The second pair sees the output of the first.
        let replacer = replacer(&["Foo", "Bar", "Bar", "Baz"]);

        let result = replacer.apply("Foo Bar");

        assert_eq!(result.text, "Baz Baz");
        assert_eq!(
            result.counts,
            vec![("Foo".to_string(), 1), ("Bar".to_string(), 2)]
        );
    }

    #[test]
    fn test_find_is_regex_source() {
        let replacer = replacer(&["a.c", "X"]);

        let result = replacer.apply("abc a.c");

        assert_eq!(result.text, "X X");
        assert_eq!(result.counts, vec![("a.c".to_string(), 2)]);
    }

    #[test]
    fn test_replacement_is_literal() {
        let replacer = replacer(&["(\\w+)", "$1!"]);

        let result = replacer.apply("hi");

        assert_eq!(result.text, "$1!");
    }

    #[test]
    fn test_invalid_pattern() {
        let pairs = FindReplacePairs::from_flat(&["(unclosed", "x"]).unwrap();

        let result = PatternReplacer::new(&pairs);

        assert!(matches!(result, Err(SweepError::InvalidPattern { .. })));
    }
}
