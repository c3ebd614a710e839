use regex::Regex;

use crate::error::Result;

/// Optional name filter, compiled once per invocation.
///
/// Matching is unanchored: `Foo` selects `NewFooBar`. Anchor the pattern
/// (`^New`) to restrict it.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    pattern: Option<Regex>,
}

impl NameFilter {
    /// `None` and the empty pattern both select every name.
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let pattern = match pattern {
            None | Some("") => None,
            Some(p) => Some(Regex::new(p)?),
        };
        Ok(Self { pattern })
    }

    /// Filter that selects everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.pattern.as_ref().map_or(true, |re| re.is_match(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn anchored_prefix() {
        let filter = NameFilter::new(Some("^New")).unwrap();
        assert!(filter.is_match("NewFoo"));
        assert!(!filter.is_match("OldFoo"));
    }

    #[test]
    fn unanchored_by_default() {
        let filter = NameFilter::new(Some("Foo")).unwrap();
        assert!(filter.is_match("NewFooBar"));
        assert!(!filter.is_match("foo"));
    }

    #[test]
    fn empty_pattern_selects_all() {
        for filter in [NameFilter::new(None).unwrap(), NameFilter::new(Some("")).unwrap()] {
            assert!(filter.is_match("anything"));
            assert!(filter.is_match(""));
        }
    }

    #[test]
    fn malformed_pattern_is_rejected() {
        let err = NameFilter::new(Some("(unclosed")).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)), "{err:?}");
    }
}
