use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One record of a documentation search index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocEntry {
    /// Anchor within the documentation site (`""` is the page root)
    pub location: String,

    /// Human-readable page name
    pub page: String,

    /// Section or symbol title, possibly empty
    pub title: String,

    /// Prose or docstring content
    pub text: String,

    /// Kind of documentation unit
    pub category: Category,
}

impl DocEntry {
    #[must_use]
    pub fn new(
        location: impl Into<String>,
        page: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            location: location.into(),
            page: page.into(),
            title: title.into(),
            text: text.into(),
            category,
        }
    }

    /// First non-empty paragraph of `text`, trimmed.
    ///
    /// Generated docstrings end with long runs of blank lines and usually open
    /// with the call signature, so this is what a one-line listing should show.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.text
            .split("\n\n")
            .map(str::trim)
            .find(|paragraph| !paragraph.is_empty())
            .unwrap_or("")
    }

    /// Symbol title without its module path (`Pkg.blue_band` -> `blue_band`)
    #[must_use]
    pub fn symbol_name(&self) -> Option<&str> {
        if !self.category.is_symbol() || self.title.is_empty() {
            return None;
        }
        Some(
            self.title
                .rsplit_once('.')
                .map_or(self.title.as_str(), |(_, name)| name),
        )
    }
}

/// Kind of documentation unit an entry represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Whole page or free prose block on a page
    Page,
    /// Heading within a page
    Section,
    /// Documented type
    Type,
    /// Documented function (all methods together)
    Function,
    /// One method of a function
    Method,
}

impl Category {
    pub const ALL: [Self; 5] = [
        Self::Page,
        Self::Section,
        Self::Type,
        Self::Function,
        Self::Method,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Section => "section",
            Self::Type => "type",
            Self::Function => "function",
            Self::Method => "method",
        }
    }

    /// Check if this entry documents a code symbol rather than prose
    #[must_use]
    pub const fn is_symbol(self) -> bool {
        matches!(self, Self::Type | Self::Function | Self::Method)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category name outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}` (expected one of: page, section, type, function, method)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
