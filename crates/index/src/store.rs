use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, IndexError, Result};
use crate::source;
use crate::types::{Category, DocEntry};

/// Immutable, ordered collection of documentation entries.
///
/// Queries are linear scans in load order over lowercased copies of each
/// entry's `title` and `text`, computed once at load time.
#[derive(Debug, Clone, Default)]
pub struct IndexStore {
    entries: Vec<DocEntry>,
    folded: Vec<FoldedEntry>,
}

#[derive(Debug, Clone)]
struct FoldedEntry {
    title: String,
    text: String,
}

impl FoldedEntry {
    fn new(entry: &DocEntry) -> Self {
        Self {
            title: fold_case(&entry.title),
            text: fold_case(&entry.text),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.title.contains(needle) || self.text.contains(needle)
    }
}

/// Lowercase one character at a time.
///
/// `str::to_lowercase` maps a word-final capital sigma to `ς`, so a needle and
/// a haystack containing it could fold differently.
fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

fn decode_utf8(raw: Vec<u8>) -> std::result::Result<String, FormatError> {
    String::from_utf8(raw)
        .map_err(|err| FormatError::document(format!("index is not valid UTF-8: {err}")))
}

impl IndexStore {
    /// Parse an index document (`{"docs": [...]}`, a bare array, or the
    /// `var documenterSearchIndex = ...` script form).
    pub fn load(source: &str) -> Result<Self> {
        let entries = source::parse_document(source)?;
        Ok(Self::from_entries(entries)?)
    }

    /// Read and parse an index document from any reader
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        Self::load(&decode_utf8(raw)?)
    }

    /// Read and parse an index file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|err| IndexError::open(path, err))?;
        let store = Self::load(&decode_utf8(raw)?)?;
        log::debug!(
            "Loaded {} documentation entries ({} pages) from {}",
            store.len(),
            store.pages().len(),
            path.display()
        );
        Ok(store)
    }

    /// Build a store from entries constructed in code
    pub fn from_entries(entries: Vec<DocEntry>) -> std::result::Result<Self, FormatError> {
        if let Some(index) = entries.iter().position(|entry| entry.page.is_empty()) {
            return Err(FormatError::record(index, "field `page` is empty"));
        }
        let folded = entries.iter().map(FoldedEntry::new).collect();
        Ok(Self { entries, folded })
    }

    /// Every entry whose title or text contains `query`, ignoring case, in load order.
    ///
    /// An empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&DocEntry> {
        self.query(&SearchQuery::new(query))
    }

    /// Substring search narrowed by category and page, optionally truncated
    #[must_use]
    pub fn query(&self, query: &SearchQuery) -> Vec<&DocEntry> {
        let needle = fold_case(&query.text);
        let limit = query.limit.unwrap_or(usize::MAX);

        self.entries
            .iter()
            .zip(&self.folded)
            .filter(|(entry, _)| query.accepts_category(entry.category))
            .filter(|(entry, _)| query.page.as_deref().map_or(true, |page| entry.page == page))
            .filter(|(_, folded)| needle.is_empty() || folded.contains(&needle))
            .map(|(entry, _)| entry)
            .take(limit)
            .collect()
    }

    #[must_use]
    pub fn entries(&self) -> &[DocEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DocEntry> {
        self.entries.get(index)
    }

    /// All entries anchored at exactly `location`, in load order
    #[must_use]
    pub fn by_location(&self, location: &str) -> Vec<&DocEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.location == location)
            .collect()
    }

    /// Distinct page names in first-seen order
    #[must_use]
    pub fn pages(&self) -> Vec<&str> {
        let mut pages: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !pages.contains(&entry.page.as_str()) {
                pages.push(&entry.page);
            }
        }
        pages
    }

    #[must_use]
    pub fn stats(&self) -> IndexStats {
        let mut categories: BTreeMap<Category, usize> =
            Category::ALL.into_iter().map(|category| (category, 0)).collect();
        for entry in &self.entries {
            *categories.entry(entry.category).or_default() += 1;
        }
        IndexStats {
            entries: self.entries.len(),
            pages: self.pages().len(),
            categories,
        }
    }
}

/// Parameters for [`IndexStore::query`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against title and text
    pub text: String,

    /// Allowed categories (empty = all)
    pub categories: Vec<Category>,

    /// Exact page name filter
    pub page: Option<String>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Builder: allow one more category
    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self
    }

    /// Builder: restrict to one page
    #[must_use]
    pub fn page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Builder: cap the number of results
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn accepts_category(&self, category: Category) -> bool {
        self.categories.is_empty() || self.categories.contains(&category)
    }
}

/// Summary counts for a loaded index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub entries: usize,
    pub pages: usize,
    pub categories: BTreeMap<Category, usize>,
}
