use std::collections::HashMap;
use std::hash::Hash;

/// An entity and its 1-based position in descending magnitude order.
#[derive(Debug)]
pub struct Ranked<'a, E> {
    pub entity: &'a E,
    pub rank: usize,
    pub value: f64,
}

impl<'a, E> Clone for Ranked<'a, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, E> Copy for Ranked<'a, E> {}

/// Entities ordered by magnitude, largest first.
///
/// Equal magnitudes keep their relative input order, so ranks computed on two
/// calls over the same input always agree. Views that filter or paginate the
/// same entities can join ranks back by id through [`RankedList::lookup`].
#[derive(Debug)]
pub struct RankedList<'a, E> {
    pub entries: Vec<Ranked<'a, E>>,
}

/// Rank `entities` by `magnitude`, descending. NaN and `-0.0` rank as zero.
pub fn rank<'a, E, M>(entities: &[&'a E], magnitude: M) -> RankedList<'a, E>
where
    M: Fn(&E) -> f64,
{
    let mut keyed: Vec<(usize, f64, &'a E)> = entities
        .iter()
        .enumerate()
        .map(|(i, &e)| {
            let v = magnitude(e);
            // total_cmp orders -0.0 below 0.0; fold both into one key.
            (i, if v.is_nan() || v == 0.0 { 0.0 } else { v }, e)
        })
        .collect();

    // `sort_by` is stable; the index tie-break pins the order regardless.
    keyed.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let entries = keyed
        .into_iter()
        .enumerate()
        .map(|(pos, (_, value, entity))| Ranked {
            entity,
            rank: pos + 1,
            value,
        })
        .collect();
    RankedList { entries }
}

impl<'a, E> RankedList<'a, E> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ranked<'a, E>> {
        self.entries.iter()
    }

    /// Id → rank table for joining onto another view of the same entities.
    pub fn lookup<K, F>(&self, id: F) -> HashMap<K, usize>
    where
        K: Eq + Hash,
        F: Fn(&'a E) -> K,
    {
        self.entries.iter().map(|r| (id(r.entity), r.rank)).collect()
    }

    /// Rank of the first entity matching `pred`.
    pub fn rank_of<P>(&self, pred: P) -> Option<usize>
    where
        P: Fn(&E) -> bool,
    {
        self.entries.iter().find(|r| pred(r.entity)).map(|r| r.rank)
    }

    /// Entities immediately above and below `rank`, for previous/next navigation.
    pub fn neighbours(&self, rank: usize) -> (Option<&'a E>, Option<&'a E>) {
        if rank == 0 || rank > self.entries.len() {
            return (None, None);
        }
        let idx = rank - 1;
        let prev = idx.checked_sub(1).map(|i| self.entries[i].entity);
        let next = self.entries.get(idx + 1).map(|r| r.entity);
        (prev, next)
    }

    pub fn top(&self, n: usize) -> &[Ranked<'a, E>] {
        &self.entries[..n.min(self.entries.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        id: u32,
        v: f64,
    }

    fn ids(list: &RankedList<'_, Item>) -> Vec<(usize, u32)> {
        list.iter().map(|r| (r.rank, r.entity.id)).collect()
    }

    #[test]
    fn ties_keep_input_order_across_calls() {
        let items = [Item { id: 1, v: 10.0 }, Item { id: 2, v: 10.0 }, Item { id: 3, v: 5.0 }];
        let refs: Vec<&Item> = items.iter().collect();
        let first = rank(&refs, |e| e.v);
        let second = rank(&refs, |e| e.v);
        assert_eq!(ids(&first), vec![(1, 1), (2, 2), (3, 3)]);
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn signed_zeros_tie_in_input_order() {
        let items = [Item { id: 1, v: -0.0 }, Item { id: 2, v: 0.0 }, Item { id: 3, v: -0.0 }];
        let refs: Vec<&Item> = items.iter().collect();
        let ranked = rank(&refs, |e| e.v);
        assert_eq!(ids(&ranked), vec![(1, 1), (2, 2), (3, 3)]);
        assert!(ranked.entries.iter().all(|r| r.value.is_sign_positive()));
    }

    #[test]
    fn long_runs_of_ties_stay_stable() {
        let items: Vec<Item> = (0..200).map(|i| Item { id: i, v: (i % 3) as f64 }).collect();
        let refs: Vec<&Item> = items.iter().collect();
        let ranked = rank(&refs, |e| e.v);
        for w in ranked.entries.windows(2) {
            if w[0].value == w[1].value {
                assert!(w[0].entity.id < w[1].entity.id);
            } else {
                assert!(w[0].value > w[1].value);
            }
        }
    }

    #[test]
    fn nan_ranks_as_zero() {
        let items = [Item { id: 1, v: f64::NAN }, Item { id: 2, v: 1.0 }, Item { id: 3, v: 0.0 }];
        let refs: Vec<&Item> = items.iter().collect();
        let ranked = rank(&refs, |e| e.v);
        assert_eq!(ids(&ranked), vec![(1, 2), (2, 1), (3, 3)]);
    }

    #[test]
    fn lookup_and_neighbours() {
        let items = [Item { id: 7, v: 1.0 }, Item { id: 8, v: 3.0 }, Item { id: 9, v: 2.0 }];
        let refs: Vec<&Item> = items.iter().collect();
        let ranked = rank(&refs, |e| e.v);
        let table = ranked.lookup(|e| e.id);
        assert_eq!(table[&8], 1);
        assert_eq!(table[&7], 3);
        assert_eq!(ranked.rank_of(|e| e.id == 9), Some(2));

        let (prev, next) = ranked.neighbours(2);
        assert_eq!(prev.map(|e| e.id), Some(8));
        assert_eq!(next.map(|e| e.id), Some(7));
        assert_eq!(ranked.neighbours(1).0, None);
        assert_eq!(ranked.neighbours(4), (None, None));
        assert_eq!(ranked.top(10).len(), 3);
    }

    #[test]
    fn empty_input() {
        let ranked = rank::<Item, _>(&[], |e| e.v);
        assert!(ranked.is_empty());
        assert_eq!(ranked.neighbours(1), (None, None));
    }
}
