//! Page-local search and category filtering

/// Category value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "all";

/// Something a list view can show, search and remove
pub trait ListItem {
    /// Stable id used by [`remove_local`](super::ListController::remove_local)
    fn id(&self) -> &str;

    /// Text fields the search box matches against
    fn haystacks(&self) -> Vec<&str>;

    /// Category for the category filter, if the type has one
    fn category(&self) -> Option<&str> {
        None
    }
}

/// Predicate deciding whether an item matches a normalized query
pub type Matcher<T> = fn(&T, &str) -> bool;

/// Default matcher: case-insensitive substring over [`ListItem::haystacks`]
///
/// `query` is expected already trimmed and lowercased.
pub fn matches_query<T: ListItem>(item: &T, query: &str) -> bool {
    item.haystacks()
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}

/// Search text plus category selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    query: String,
    category: Option<String>,
}

impl Filter {
    /// Create an empty filter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text (trimmed; blank means "show everything")
    pub fn set_query(&mut self, text: &str) {
        self.query = text.trim().to_lowercase();
    }

    /// Set the category; `"all"` or blank clears it
    pub fn set_category(&mut self, category: &str) {
        let category = category.trim();
        self.category = (!category.is_empty() && category != ALL_CATEGORIES)
            .then(|| category.to_string());
    }

    /// Normalized search text
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Selected category
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Check whether the filter lets everything through
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.category.is_none()
    }

    /// Reset search text and category
    pub fn clear(&mut self) {
        self.query.clear();
        self.category = None;
    }

    /// Apply both predicates to one item
    pub fn accepts<T: ListItem>(&self, item: &T, matcher: Matcher<T>) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|wanted| item.category() == Some(wanted));
        category_ok && (self.query.is_empty() || matcher(item, &self.query))
    }
}

/// Distinct non-empty categories in order of first appearance
pub fn distinct_categories<T: ListItem>(items: &[T]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for category in items.iter().filter_map(|item| item.category()) {
        if !category.is_empty() && !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}
