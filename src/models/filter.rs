use std::fmt;

/// Words that mean "every category" in the export and month forms
const ALL_SENTINELS: [&str; 2] = ["all", "toutes"];

/// Restricts a month query to one category, or not at all
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse user input.
    ///
    /// Blank input and the sentinels "all"/"Toutes" (any case) mean no filter.
    /// Anything else is an exact, case-sensitive category name.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty()
            || ALL_SENTINELS
                .iter()
                .any(|s| trimmed.eq_ignore_ascii_case(s))
        {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all categories"),
            Self::Only(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_case_insensitive() {
        assert_eq!(CategoryFilter::parse("Toutes"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("TOUTES"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(" All "), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
    }

    #[test]
    fn test_category_name_kept_verbatim() {
        let filter = CategoryFilter::parse("U15");
        assert_eq!(filter, CategoryFilter::Only("U15".to_string()));
        assert_ne!(filter, CategoryFilter::parse("u15"));
        assert_eq!(CategoryFilter::parse("  U15 "), filter);
    }
}
