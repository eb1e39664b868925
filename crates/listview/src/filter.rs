/// Categorical facet: admit every value, or exactly one label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Facet {
    #[default]
    All,
    Only(String),
}

impl Facet {
    pub fn only(label: impl Into<String>) -> Self {
        Self::Only(label.into())
    }

    /// The selected label, if the facet is narrowed.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(label) => Some(label.as_str()),
        }
    }

    /// Exact-match admission. A missing field never matches a narrowed
    /// facet, it just fails the clause.
    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(want) => value.is_some_and(|v| v == want),
        }
    }
}

/// Items a [`FilterState`] can judge.
pub trait Filterable {
    /// String fields scanned by the free-text clause. Absent fields are
    /// simply not returned.
    fn search_fields(&self) -> Vec<&str>;

    fn status_label(&self) -> Option<&str>;

    fn category_label(&self) -> Option<&str>;
}

/// Free-text query plus two categorical facets.
///
/// Lives for a screen's lifetime and is never persisted; all mutation goes
/// through [`FilterState::apply`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub status: Facet,
    pub category: Facet,
}

/// Partial update merged into a [`FilterState`].
#[derive(Clone, Debug, Default)]
pub struct FilterPatch {
    pub query: Option<String>,
    pub status: Option<Facet>,
    pub category: Option<Facet>,
}

impl FilterPatch {
    pub fn query(value: impl Into<String>) -> Self {
        Self {
            query: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn status(facet: Facet) -> Self {
        Self {
            status: Some(facet),
            ..Self::default()
        }
    }

    pub fn category(facet: Facet) -> Self {
        Self {
            category: Some(facet),
            ..Self::default()
        }
    }
}

impl FilterState {
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(query) = patch.query {
            self.query = query;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
    }

    pub fn is_default(&self) -> bool {
        self.query.is_empty() && self.status == Facet::All && self.category == Facet::All
    }

    /// True iff the query clause and both facet clauses all hold.
    ///
    /// The query is a case-insensitive substring scan over the item's
    /// searchable fields (plain lowercasing, not locale collation). Pure
    /// and total; never reorders anything.
    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        let query = self.query.trim().to_lowercase();
        let query_ok = query.is_empty()
            || item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&query));

        query_ok
            && self.status.admits(item.status_label())
            && self.category.admits(item.category_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: Option<String>,
        id: String,
        status: Option<String>,
        category: Option<String>,
    }

    impl Row {
        fn new(id: &str, name: Option<&str>) -> Self {
            Self {
                name: name.map(str::to_string),
                id: id.to_string(),
                status: None,
                category: None,
            }
        }
    }

    impl Filterable for Row {
        fn search_fields(&self) -> Vec<&str> {
            let mut fields = vec![self.id.as_str()];
            if let Some(name) = self.name.as_deref() {
                fields.push(name);
            }
            fields
        }

        fn status_label(&self) -> Option<&str> {
            self.status.as_deref()
        }

        fn category_label(&self) -> Option<&str> {
            self.category.as_deref()
        }
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let rohit = Row::new("WEC001", Some("Rohit Rajput"));
        let priya = Row::new("WEC002", Some("Priya Sharma"));

        let mut filter = FilterState::default();
        filter.apply(FilterPatch::query("roh"));

        assert!(filter.matches(&rohit));
        assert!(!filter.matches(&priya));
    }

    #[test]
    fn query_scans_every_search_field() {
        let row = Row::new("WEC042", Some("Amit Verma"));
        let mut filter = FilterState::default();
        filter.apply(FilterPatch::query("042"));
        assert!(filter.matches(&row));
    }

    #[test]
    fn missing_fields_fail_the_clause_without_panicking() {
        let bare = Row::new("WEC003", None);

        let mut by_status = FilterState::default();
        by_status.apply(FilterPatch::status(Facet::only("Active")));
        assert!(!by_status.matches(&bare));

        let mut by_category = FilterState::default();
        by_category.apply(FilterPatch::category(Facet::only("AC")));
        assert!(!by_category.matches(&bare));

        assert!(FilterState::default().matches(&bare));
    }

    #[test]
    fn facets_require_exact_equality() {
        let mut row = Row::new("WEC004", Some("Sneha Gupta"));
        row.status = Some("Active".to_string());

        let mut filter = FilterState::default();
        filter.apply(FilterPatch::status(Facet::only("Act")));
        assert!(!filter.matches(&row));

        filter.apply(FilterPatch::status(Facet::only("Active")));
        assert!(filter.matches(&row));
    }

    #[test]
    fn patch_merges_only_named_fields() {
        let mut filter = FilterState::default();
        filter.apply(FilterPatch::query("kent"));
        filter.apply(FilterPatch::status(Facet::only("Expired")));

        assert_eq!(filter.query, "kent");
        assert_eq!(filter.status, Facet::only("Expired"));
        assert_eq!(filter.category, Facet::All);
        assert!(!filter.is_default());
    }
}
