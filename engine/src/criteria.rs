use crate::sort::SortMethod;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Inclusive window over the entity's ranged numeric field.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NumericRange {
    min: i64,
    max: i64,
}

impl NumericRange {
    /// Inverted bounds are clamped onto `max`, never rejected.
    pub fn new(min: i64, max: i64) -> Self {
        Self {
            min: min.min(max),
            max,
        }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Description of the view a consumer wants: search text per field, active
/// facet toggles, an optional numeric range, the favorites restriction and a
/// sort method.
///
/// Value object: consumers build a new one and replace the old wholesale.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterCriteria {
    /// Search text keyed by the record field it applies to. Entries compose
    /// with AND.
    pub search: BTreeMap<String, String>,
    /// Names of the active facets. Facets compose with OR.
    pub facets: BTreeSet<String>,
    pub range: Option<NumericRange>,
    pub favorites_only: bool,
    pub sort: SortMethod,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one search field; empty text clears the entry instead.
    pub fn with_search(mut self, field: impl Into<String>, text: impl Into<String>) -> Self {
        let field = field.into();
        let text = text.into();
        if text.is_empty() {
            self.search.remove(&field);
        } else {
            self.search.insert(field, text);
        }
        self
    }

    pub fn with_facet(mut self, name: impl Into<String>, active: bool) -> Self {
        let name = name.into();
        if active {
            self.facets.insert(name);
        } else {
            self.facets.remove(&name);
        }
        self
    }

    pub fn with_range(mut self, range: Option<NumericRange>) -> Self {
        self.range = range;
        self
    }

    pub fn favorites_only(mut self, on: bool) -> Self {
        self.favorites_only = on;
        self
    }

    pub fn sorted_by(mut self, sort: SortMethod) -> Self {
        self.sort = sort;
        self
    }
}
