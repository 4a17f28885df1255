//! Row-to-entity aggregation.
//!
//! Read endpoints issue one left-joined query per request and get back flat
//! rows, one per parent×child combination. The fold here groups those rows
//! into nested entities: first sight of a parent key materializes the parent
//! with an empty child list, every non-null child key appends a child.
//! Duplicate child keys are NOT deduplicated; the query shape makes them
//! structurally impossible, and silently dropping them would hide a broken
//! join.

use std::collections::HashMap;

/// An aggregated parent entity that carries an ordered child list.
pub trait Grouped {
    type Child;

    /// Ordering among siblings under the shared grandparent
    fn position(&self) -> i32;

    fn children_mut(&mut self) -> &mut Vec<Self::Child>;
}

/// Fold flat joined rows into nested parents.
///
/// Parents keep first-seen order during grouping, then both parents and
/// children are stable-sorted by `position` (ties keep arrival order).
/// Zero rows produce zero parents; whether that is an error is the
/// caller's decision.
pub fn fold_rows<R, P: Grouped>(
    rows: &[R],
    parent_key: impl Fn(&R) -> i64,
    make_parent: impl Fn(&R) -> P,
    make_child: impl Fn(&R) -> Option<(i32, P::Child)>,
) -> Vec<P> {
    let mut order: Vec<i64> = Vec::new();
    let mut grouped: HashMap<i64, (P, Vec<(i32, P::Child)>)> = HashMap::new();

    for row in rows {
        let key = parent_key(row);
        let entry = grouped.entry(key).or_insert_with(|| {
            order.push(key);
            (make_parent(row), Vec::new())
        });
        if let Some(child) = make_child(row) {
            entry.1.push(child);
        }
    }

    let mut parents: Vec<P> = order
        .into_iter()
        .filter_map(|key| grouped.remove(&key))
        .map(|(mut parent, mut children)| {
            children.sort_by_key(|(position, _)| *position);
            parent
                .children_mut()
                .extend(children.into_iter().map(|(_, child)| child));
            parent
        })
        .collect();

    parents.sort_by_key(|parent| parent.position());
    parents
}
