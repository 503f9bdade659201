//! Filter → Sort → Paginate
//!
//! The stages always run in this order: paging before filtering would
//! count elements the caller never sees. The offset is validated against the
//! unfiltered size and the page is then clamped to what the filter kept, so an
//! offset past the filtered elements yields an empty page.

use super::fields::{lookup, sortable_keys, Field};
use super::params::{QueryParams, ResolvedPageSpec, SortDir, SORT_KEY_KEY};
use std::cmp::Reverse;
use tracing::debug;

/// Run the full pipeline and return one page
pub fn apply<T>(items: Vec<T>, params: &QueryParams, fields: &[Field<T>]) -> Vec<T> {
    let total = items.len();
    let filtered = filter(items, params, fields);
    let spec = ResolvedPageSpec::resolve(params, total, &sortable_keys(fields));
    let sorted = sort(filtered, params, fields, spec.sort_dir);
    paginate(sorted, &spec)
}

/// Keep elements matching every field filter in `params`
///
/// Filter names that match no field are ignored. Values compare by their
/// string form, case-insensitively, against the first supplied value.
pub fn filter<T>(mut items: Vec<T>, params: &QueryParams, fields: &[Field<T>]) -> Vec<T> {
    let active: Vec<(&Field<T>, String)> = params
        .filter_keys()
        .filter_map(|key| {
            let field = lookup(fields, key);
            if field.is_none() {
                debug!("Ignoring filter on unknown field {}", key);
            }
            Some((field?, params.first(key)?.to_lowercase()))
        })
        .collect();

    if active.is_empty() {
        return items;
    }

    items.retain(|item| {
        active
            .iter()
            .all(|(field, expected)| field.value(item).to_string().to_lowercase() == *expected)
    });
    items
}

/// Stable sort by the requested `sortKey`, if it names a sortable field
///
/// Without a usable sort key the input order is kept as is.
pub fn sort<T>(mut items: Vec<T>, params: &QueryParams, fields: &[Field<T>], dir: SortDir) -> Vec<T> {
    let Some(field) = params
        .first(SORT_KEY_KEY)
        .and_then(|key| lookup(fields, key))
        .filter(|f| f.sortable)
    else {
        return items;
    };

    match dir {
        SortDir::Asc => items.sort_by_cached_key(|item| field.value(item)),
        SortDir::Desc => items.sort_by_cached_key(|item| Reverse(field.value(item))),
    }
    items
}

/// Slice `[begin, end)`, clamped to the collection
pub fn paginate<T>(items: Vec<T>, spec: &ResolvedPageSpec) -> Vec<T> {
    let begin = spec.begin.min(items.len());
    let end = spec.end.clamp(begin, items.len());
    items.into_iter().skip(begin).take(end - begin).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BaseModel, Dock, Stored, StoragePool};

    fn dock(id: &str, name: &str, driver: &str) -> Dock {
        Dock {
            base: BaseModel::with_id(id),
            name: name.into(),
            driver_name: driver.into(),
            ..Default::default()
        }
    }

    fn ids(docks: &[Dock]) -> Vec<&str> {
        docks.iter().map(|d| d.base.id.as_str()).collect()
    }

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().copied().collect()
    }

    fn five_docks() -> Vec<Dock> {
        vec![
            dock("1", "echo", "lvm"),
            dock("2", "alpha", "ceph"),
            dock("3", "delta", "lvm"),
            dock("4", "charlie", "nfs"),
            dock("5", "bravo", "LVM"),
        ]
    }

    #[test]
    fn test_sort_and_page_by_name() {
        let page = apply(
            five_docks(),
            &params(&[("sortKey", "NAME"), ("sortDir", "asc"), ("limit", "2"), ("offset", "1")]),
            Dock::fields(),
        );
        // alpha, bravo, charlie, delta, echo -> skip one, take two
        assert_eq!(ids(&page), vec!["5", "4"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let page = apply(five_docks(), &params(&[("driverName", "lvm")]), Dock::fields());
        assert_eq!(ids(&page), vec!["1", "3", "5"]);

        let page = apply(five_docks(), &params(&[("Name", "ALPHA")]), Dock::fields());
        assert_eq!(ids(&page), vec!["2"]);
    }

    #[test]
    fn test_unknown_filter_is_ignored() {
        let page = apply(five_docks(), &params(&[("capacity", "10")]), Dock::fields());
        assert_eq!(page.len(), 5);
    }

    #[test]
    fn test_numeric_filter_uses_decimal_form() {
        let pools = vec![
            StoragePool { used_capacity: 10, ..Default::default() },
            StoragePool { used_capacity: 100, ..Default::default() },
        ];
        let page = apply(pools, &params(&[("usedCapacity", "100")]), StoragePool::fields());
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].used_capacity, 100);
    }

    #[test]
    fn test_without_sort_key_order_is_preserved() {
        let page = apply(five_docks(), &params(&[("sortDir", "asc")]), Dock::fields());
        assert_eq!(ids(&page), vec!["1", "2", "3", "4", "5"]);

        // Not sortable for docks: order is kept
        let page = apply(five_docks(), &params(&[("sortKey", "nodeId")]), Dock::fields());
        assert_eq!(ids(&page), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_sort_is_stable_both_directions() {
        let docks = vec![
            dock("a", "x", "lvm"),
            dock("b", "y", "ceph"),
            dock("c", "x", "ceph"),
            dock("d", "y", "lvm"),
        ];
        let asc = apply(docks.clone(), &params(&[("sortKey", "name"), ("sortDir", "asc")]), Dock::fields());
        assert_eq!(ids(&asc), vec!["a", "c", "b", "d"]);

        // Default direction is desc; ties still keep their input order
        let desc = apply(docks, &params(&[("sortKey", "name")]), Dock::fields());
        assert_eq!(ids(&desc), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_paging_runs_after_filtering() {
        // Three lvm docks remain after filtering, offset 1 yields the second
        let page = apply(
            five_docks(),
            &params(&[("driverName", "lvm"), ("offset", "1"), ("limit", "1"), ("sortKey", "id"), ("sortDir", "asc")]),
            Dock::fields(),
        );
        assert_eq!(ids(&page), vec!["3"]);
    }

    #[test]
    fn test_offset_at_end_yields_empty_page() {
        let page = apply(five_docks(), &params(&[("driverName", "ceph"), ("offset", "1")]), Dock::fields());
        assert!(page.is_empty());
    }

    #[test]
    fn test_offset_past_filtered_size_yields_empty_page() {
        // One ceph dock survives the filter; offset 3 is past it
        let page = apply(five_docks(), &params(&[("driverName", "ceph"), ("offset", "3")]), Dock::fields());
        assert!(page.is_empty());

        // Offset beyond the unfiltered size is invalid and falls back to 0
        let page = apply(five_docks(), &params(&[("driverName", "ceph"), ("offset", "9")]), Dock::fields());
        assert_eq!(ids(&page), vec!["2"]);
    }

    #[test]
    fn test_limit_equal_to_default_returns_everything() {
        let docks: Vec<Dock> = (0..60).map(|i| dock(&format!("{:02}", i), "n", "lvm")).collect();
        let page = apply(docks, &params(&[("limit", "50")]), Dock::fields());
        assert_eq!(page.len(), 60);
    }

    #[test]
    fn test_invalid_paging_falls_back() {
        let page = apply(five_docks(), &params(&[("offset", "-1"), ("limit", "lots")]), Dock::fields());
        assert_eq!(page.len(), 5);

        let page = apply(Vec::<Dock>::new(), &params(&[("offset", "3"), ("limit", "2")]), Dock::fields());
        assert!(page.is_empty());
    }

    #[test]
    fn test_page_is_contiguous_subsequence() {
        let all = apply(five_docks(), &params(&[("sortKey", "driverName"), ("sortDir", "asc")]), Dock::fields());
        for offset in 0..=5 {
            for limit in 0..=6 {
                let offset_s = offset.to_string();
                let limit_s = limit.to_string();
                let page = apply(
                    five_docks(),
                    &params(&[
                        ("sortKey", "driverName"),
                        ("sortDir", "asc"),
                        ("offset", offset_s.as_str()),
                        ("limit", limit_s.as_str()),
                    ]),
                    Dock::fields(),
                );
                assert!(page.len() <= limit);
                assert_eq!(page.as_slice(), &all[offset..(offset + page.len())]);
            }
        }
    }

    #[test]
    fn test_paginate_clamps_bounds() {
        let spec = ResolvedPageSpec {
            begin: 7,
            end: 12,
            sort_dir: SortDir::Asc,
            sort_key: "ID".into(),
        };
        assert!(paginate(vec![1, 2, 3], &spec).is_empty());

        let spec = ResolvedPageSpec { begin: 1, end: 12, ..spec };
        assert_eq!(paginate(vec![1, 2, 3], &spec), vec![2, 3]);
    }
}
