use crate::criteria::FilterCriteria;
use crate::facet::Facet;
use crate::record::Record;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Derives the visible, ordered subset of `records` for `criteria`.
///
/// Total over its inputs: malformed criteria degrade to broader views, never
/// to an error. The pipeline order is fixed: text search (AND across
/// fields), numeric range, facets (OR across active facets), favorites,
/// stable sort with ties keeping the stored order.
pub fn derive_view<R: Record>(
    records: &[R],
    criteria: &FilterCriteria,
    facets: &[Facet<R>],
    favorites: &HashSet<String>,
) -> Vec<R> {
    let mut view: Vec<&R> = records.iter().collect();

    for (field, query) in &criteria.search {
        if query.is_empty() {
            continue;
        }
        let needle = query.to_lowercase();
        view.retain(|record| {
            record
                .search_field(field)
                .map(|value| value.to_lowercase().contains(&needle))
                .unwrap_or(false)
        });
    }

    if let Some(range) = criteria.range {
        view.retain(|record| {
            record
                .range_value()
                .map(|value| range.contains(value))
                .unwrap_or(false)
        });
    }

    if !criteria.facets.is_empty() {
        let active: Vec<&Facet<R>> = facets
            .iter()
            .filter(|facet| criteria.facets.contains(facet.name))
            .collect();
        view.retain(|record| active.iter().any(|facet| (facet.matches)(record)));
    }

    if criteria.favorites_only {
        view.retain(|record| favorites.contains(record.id()));
    }

    // Vec::sort_by is stable, so equal keys keep the stored order and a
    // comparator miss keeps the incoming order entirely.
    view.sort_by(|a, b| R::compare(criteria.sort, a, b).unwrap_or(Ordering::Equal));

    debug!(
        total = records.len(),
        visible = view.len(),
        "derived listing view"
    );
    view.into_iter().cloned().collect()
}
