//! Command-line style tag filters.
//!
//! An expression is built from a list of arguments. Each argument is an
//! OR-group of comma-separated terms and the groups are ANDed together, so
//! `["@foo,@bar", "~@zap"]` reads as `(@foo or @bar) and not @zap`. A term
//! may carry a limit suffix (`@wip:3`) recording how many scenarios a runner
//! should allow for that tag; limits are collected but not enforced here.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::errors::{TagExpressionError, invalid_term};
use crate::tag::Tag;

static TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<negated>~)?(?P<tag>@[^\s@]+?)(?::(?P<limit>[0-9]+))?$")
        .unwrap_or_else(|_| unreachable!())
});

#[derive(Debug, Clone, PartialEq, Eq)]
struct Term {
    tag: Tag,
    negated: bool,
}

impl Term {
    fn matches(&self, tags: &HashSet<&str>) -> bool {
        tags.contains(self.tag.as_str()) != self.negated
    }
}

/// Parsed tag filter.
///
/// # Examples
/// ```
/// use gherkin_tag_lexer::TagExpression;
/// let expr = TagExpression::new(["@foo,@bar", "~@zap"]).expect("valid expression");
/// assert!(expr.evaluate(["@foo"]));
/// assert!(!expr.evaluate(["@foo", "@zap"]));
/// assert!(!expr.evaluate(["@other"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagExpression {
    groups: Vec<Vec<Term>>,
    limits: BTreeMap<Tag, usize>,
}

impl TagExpression {
    /// Build an expression from its argument list.
    ///
    /// An empty list matches every tag set.
    ///
    /// # Errors
    /// Returns [`TagExpressionError::InvalidTerm`] for a term that is not
    /// `[~]@tag[:limit]`, and [`TagExpressionError::InconsistentLimit`] when
    /// one tag is given two different limits.
    pub fn new<I, S>(arguments: I) -> Result<Self, TagExpressionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut expression = Self::default();
        for argument in arguments {
            let group = argument
                .as_ref()
                .split(',')
                .map(|term| expression.parse_term(term))
                .collect::<Result<Vec<_>, _>>()?;
            expression.groups.push(group);
        }
        debug!(
            "parsed tag expression with {} group(s) and {} limit(s)",
            expression.groups.len(),
            expression.limits.len()
        );
        Ok(expression)
    }

    fn parse_term(&mut self, raw: &str) -> Result<Term, TagExpressionError> {
        let term = raw.trim();
        if term.is_empty() {
            return Err(invalid_term(term, "empty term"));
        }
        let caps = TERM_RE
            .captures(term)
            .ok_or_else(|| invalid_term(term, "expected `[~]@tag[:limit]`"))?;
        let tag_text = caps
            .name("tag")
            .map(|m| m.as_str())
            .ok_or_else(|| invalid_term(term, "missing tag"))?;
        let tag = tag_text
            .parse::<Tag>()
            .map_err(|_| invalid_term(term, "not a single tag"))?;
        if let Some(limit) = caps.name("limit") {
            let limit = limit
                .as_str()
                .parse::<usize>()
                .map_err(|_| invalid_term(term, "limit out of range"))?;
            self.record_limit(&tag, limit)?;
        }
        Ok(Term {
            tag,
            negated: caps.name("negated").is_some(),
        })
    }

    fn record_limit(&mut self, tag: &Tag, limit: usize) -> Result<(), TagExpressionError> {
        match self.limits.get(tag.as_str()) {
            Some(&existing) if existing != limit => Err(TagExpressionError::InconsistentLimit {
                tag: tag.to_string(),
                first: existing,
                second: limit,
            }),
            Some(_) => Ok(()),
            None => {
                self.limits.insert(tag.clone(), limit);
                Ok(())
            }
        }
    }

    /// Whether the expression places no constraint at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Limits declared per tag, for both positive and negated terms.
    #[must_use]
    pub fn limits(&self) -> &BTreeMap<Tag, usize> {
        &self.limits
    }

    /// Evaluate the expression against a set of tags.
    pub fn evaluate<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let set: HashSet<&str> = tags.into_iter().collect();
        self.groups
            .iter()
            .all(|group| group.iter().any(|term| term.matches(&set)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn expression(arguments: &[&str]) -> TagExpression {
        TagExpression::new(arguments.iter().copied())
            .unwrap_or_else(|err| panic!("parse expression {arguments:?}: {err}"))
    }

    fn limits(expr: &TagExpression) -> Vec<(&str, usize)> {
        expr.limits()
            .iter()
            .map(|(tag, limit)| (tag.as_str(), *limit))
            .collect()
    }

    #[rstest]
    #[case(&["@foo"], true)]
    #[case(&[], true)]
    fn empty_expression_matches_everything(#[case] tags: &[&str], #[case] expected: bool) {
        assert_eq!(expression(&[]).evaluate(tags.iter().copied()), expected);
    }

    #[rstest]
    #[case(&["@foo"], &["@foo"], true)]
    #[case(&["@foo"], &["@bar"], false)]
    #[case(&["@foo"], &[], false)]
    #[case(&["~@foo"], &["@bar"], true)]
    #[case(&["~@foo"], &["@foo"], false)]
    #[case(&["@foo,@bar"], &["@foo"], true)]
    #[case(&["@foo,@bar"], &["@bar"], true)]
    #[case(&["@foo,@bar"], &["@zap"], false)]
    #[case(&["@foo,@bar", "~@zap"], &["@foo"], true)]
    #[case(&["@foo,@bar", "~@zap"], &["@foo", "@zap"], false)]
    #[case(&["@foo:3,~@bar", "@zap:5"], &["@foo", "@zap"], true)]
    fn evaluates_tag_sets(
        #[case] arguments: &[&str],
        #[case] tags: &[&str],
        #[case] expected: bool,
    ) {
        assert_eq!(
            expression(arguments).evaluate(tags.iter().copied()),
            expected
        );
    }

    #[test]
    fn collects_limits_from_positive_and_negative_terms() {
        let expr = expression(&["@foo:3,~@bar", "@zap:5"]);
        assert_eq!(limits(&expr), [("@foo", 3), ("@zap", 5)]);
        assert_eq!(limits(&expression(&["~@todo:3"])), [("@todo", 3)]);
    }

    #[test]
    fn trims_whitespace_around_terms() {
        let expr = expression(&[" @foo:3 , ~@bar ", " @zap:5 "]);
        assert_eq!(limits(&expr), [("@foo", 3), ("@zap", 5)]);
    }

    #[test]
    fn allows_duplicate_consistent_limits() {
        let expr = expression(&["@todo:3", "~@todo:3"]);
        assert_eq!(limits(&expr), [("@todo", 3)]);
    }

    #[test]
    fn rejects_inconsistent_limits() {
        let Err(err) = TagExpression::new(["@todo:3", "~@todo:4"]) else {
            panic!("expected inconsistent limits to be rejected");
        };
        assert_eq!(
            err,
            TagExpressionError::InconsistentLimit {
                tag: "@todo".into(),
                first: 3,
                second: 4,
            }
        );
    }

    #[rstest]
    #[case("foo")]
    #[case("@")]
    #[case("@@foo")]
    #[case("@one@two")]
    #[case("@foo,,@bar")]
    #[case("~ @foo")]
    fn rejects_malformed_terms(#[case] argument: &str) {
        let Err(err) = TagExpression::new([argument]) else {
            panic!("expected `{argument}` to be rejected");
        };
        assert!(matches!(err, TagExpressionError::InvalidTerm { .. }), "{err}");
    }

    #[test]
    fn colons_without_digits_stay_in_the_tag() {
        let expr = expression(&["@ns:key"]);
        assert!(expr.evaluate(["@ns:key"]));
        assert!(expr.limits().is_empty());
    }
}
