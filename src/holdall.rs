//! Provides `Holdall`, an ordered collection of references (handles, ids,
//! borrowed pointers) that never owns what its references point at.
//!
//! A `Holdall` remembers the order in which references were inserted, lets a
//! caller walk them with early termination, and can sort itself by a merge
//! sort that only moves references around. `split` and `merge` consume their
//! inputs, so a reference belongs to exactly one `Holdall` at a time.
use std::cmp::Ordering;
use std::collections::{vec_deque, TryReserveError, VecDeque};

/// Where `Holdall::insert` puts a new reference. Chosen once, when the
/// `Holdall` is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Each new reference becomes the first one
    #[default]
    Head,
    /// Each new reference becomes the last one
    Tail,
}

/// An ordered sequence of references of type `T`.
#[derive(Debug, Clone)]
pub struct Holdall<T> {
    refs: VecDeque<T>,
    placement: Placement,
}

impl<T> Default for Holdall<T> {
    fn default() -> Self {
        Holdall::new(Placement::default())
    }
}

impl<T> Holdall<T> {
    /// An empty `Holdall` inserting at the head or tail, according to
    /// `placement`.
    #[must_use]
    pub fn new(placement: Placement) -> Self {
        Holdall { refs: VecDeque::new(), placement }
    }

    /// The insertion policy chosen at construction.
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Adds `reference` at the head or the tail. On failure the `Holdall` is
    /// unchanged.
    pub fn insert(&mut self, reference: T) -> Result<(), TryReserveError> {
        self.refs.try_reserve(1)?;
        match self.placement {
            Placement::Head => self.refs.push_front(reference),
            Placement::Tail => self.refs.push_back(reference),
        }
        Ok(())
    }

    /// Number of references held.
    #[must_use]
    pub fn count(&self) -> usize {
        self.refs.len()
    }

    /// Same as `count`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Is the `Holdall` empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Releases every slot (but not the referents) and leaves an empty
    /// `Holdall`. Calling it again does nothing.
    pub fn dispose(&mut self) {
        self.refs = VecDeque::new();
    }

    /// The references, in list order.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.refs.iter()
    }

    /// Calls `fun` on each reference in list order. The first `Err` stops the
    /// walk and is returned.
    pub fn apply<E>(&self, fun: impl FnMut(&T) -> Result<(), E>) -> Result<(), E> {
        self.refs.iter().try_for_each(fun)
    }

    /// For each reference `r`, computes `fun1(context, r)` and hands it,
    /// along with `r`, to `fun2`. Stops at the first `Err`, like `apply`.
    pub fn apply_context<'c, C: ?Sized, R, E>(
        &self,
        context: &'c C,
        fun1: impl Fn(&'c C, &T) -> R,
        mut fun2: impl FnMut(&T, R) -> Result<(), E>,
    ) -> Result<(), E> {
        self.refs.iter().try_for_each(|r| fun2(r, fun1(context, r)))
    }

    /// Like `apply_context`, but `fun2` also gets mutable access to a second
    /// context, typically an output sink.
    pub fn apply_context2<'c, C1: ?Sized, C2: ?Sized, R, E>(
        &self,
        context1: &'c C1,
        fun1: impl Fn(&'c C1, &T) -> R,
        context2: &mut C2,
        mut fun2: impl FnMut(&mut C2, &T, R) -> Result<(), E>,
    ) -> Result<(), E> {
        self.refs.iter().try_for_each(|r| fun2(context2, r, fun1(context1, r)))
    }

    /// Deals the references alternately into two new `Holdall`s, the first
    /// reference to the left one, so that the left holds `(n + 1) / 2` and the
    /// right `n / 2` of the `n` it held.
    #[must_use]
    pub fn split(self) -> (Holdall<T>, Holdall<T>) {
        let n = self.refs.len();
        let mut left = VecDeque::with_capacity(n - n / 2);
        let mut right = VecDeque::with_capacity(n / 2);
        let mut to_left = true;
        for r in self.refs {
            if to_left {
                left.push_back(r);
            } else {
                right.push_back(r);
            }
            to_left = !to_left;
        }
        let placement = self.placement;
        (Holdall { refs: left, placement }, Holdall { refs: right, placement })
    }

    /// Merges `left` and `right`, each already sorted by `compare`, into one
    /// sorted `Holdall`. When `compare` calls two references equal, the one
    /// from `left` comes first.
    #[must_use]
    pub fn merge(
        left: Holdall<T>,
        right: Holdall<T>,
        mut compare: impl FnMut(&T, &T) -> Ordering,
    ) -> Holdall<T> {
        let placement = left.placement;
        let (mut left, mut right) = (left.refs, right.refs);
        let mut merged = VecDeque::with_capacity(left.len() + right.len());
        while let (Some(a), Some(b)) = (left.front(), right.front()) {
            let next = if compare(a, b) == Ordering::Greater {
                right.pop_front()
            } else {
                left.pop_front()
            };
            merged.extend(next);
        }
        merged.append(&mut left);
        merged.append(&mut right);
        Holdall { refs: merged, placement }
    }

    /// Sorts the references by `compare` with a recursive merge sort.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.merge_sort(&mut compare);
    }

    fn merge_sort<F>(&mut self, compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.count() < 2 {
            return;
        }
        let placement = self.placement;
        let whole = std::mem::replace(self, Holdall::new(placement));
        let (mut left, mut right) = whole.split();
        if left.count() > 1 {
            left.merge_sort(compare);
        }
        if right.count() > 1 {
            right.merge_sort(compare);
        }
        *self = Holdall::merge(left, right, &mut *compare);
    }
}

impl<T> IntoIterator for Holdall<T> {
    type Item = T;
    type IntoIter = vec_deque::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.refs.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Holdall<T> {
    type Item = &'a T;
    type IntoIter = vec_deque::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.refs.iter()
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    fn holdall_of(placement: Placement, items: &[u32]) -> Holdall<u32> {
        let mut h = Holdall::new(placement);
        for &item in items {
            h.insert(item).unwrap();
        }
        h
    }

    fn contents<T: Copy>(h: &Holdall<T>) -> Vec<T> {
        h.iter().copied().collect()
    }

    #[test]
    fn count_equals_number_of_inserts_for_either_placement() {
        for placement in [Placement::Head, Placement::Tail] {
            let mut h = Holdall::new(placement);
            for n in 0..50_usize {
                assert_eq!(h.count(), n);
                h.insert(n).unwrap();
            }
            assert_eq!(h.count(), 50);
            assert_eq!(h.len(), h.count());
        }
    }

    #[test]
    fn head_placement_prepends_and_tail_placement_appends() {
        assert_eq!(contents(&holdall_of(Placement::Head, &[1, 2, 3])), vec![3, 2, 1]);
        assert_eq!(contents(&holdall_of(Placement::Tail, &[1, 2, 3])), vec![1, 2, 3]);
        assert_eq!(Holdall::<u32>::default().placement(), Placement::Head);
    }

    #[test]
    fn apply_stops_at_the_first_error_and_returns_it() {
        let h = holdall_of(Placement::Tail, &[1, 2, 3, 4, 5]);
        let mut seen = Vec::new();
        let status = h.apply(|&x| {
            seen.push(x);
            if x == 3 {
                Err(x * 10)
            } else {
                Ok(())
            }
        });
        assert_eq!(status, Err(30));
        assert_eq!(seen, vec![1, 2, 3]);

        let mut total = 0;
        let status: Result<(), ()> = h.apply(|&x| {
            total += x;
            Ok(())
        });
        assert_eq!(status, Ok(()));
        assert_eq!(total, 15);
    }

    #[test]
    fn apply_context_passes_the_computed_value_along_with_the_reference() {
        let h = holdall_of(Placement::Tail, &[0, 2, 1]);
        let names = ["zero", "one", "two"];
        let mut pairs = Vec::new();
        let status: Result<(), ()> = h.apply_context(
            &names[..],
            |names, &i| names[i as usize],
            |&i, name| {
                pairs.push((i, name));
                Ok(())
            },
        );
        assert_eq!(status, Ok(()));
        assert_eq!(pairs, vec![(0, "zero"), (2, "two"), (1, "one")]);
    }

    #[test]
    fn apply_context2_writes_into_its_second_context_and_short_circuits() {
        let h = holdall_of(Placement::Tail, &[1, 2, 3]);
        let mut out = String::new();
        let status = h.apply_context2(
            &100_u32,
            |offset, &x| offset + x,
            &mut out,
            |out, &x, shifted| {
                if x == 3 {
                    return Err("stop");
                }
                out.push_str(&format!("{x}:{shifted} "));
                Ok(())
            },
        );
        assert_eq!(status, Err("stop"));
        assert_eq!(out, "1:101 2:102 ");
    }

    #[test]
    fn split_deals_alternately_with_the_left_side_never_smaller() {
        for n in 0..12 {
            let items: Vec<u32> = (0..n).collect();
            let (left, right) = holdall_of(Placement::Tail, &items).split();
            assert_eq!(left.count() + right.count(), n as usize);
            assert!(left.count() - right.count() <= 1);
            assert!(contents(&left).iter().all(|x| x % 2 == 0));
            assert!(contents(&right).iter().all(|x| x % 2 == 1));
        }
    }

    #[test]
    fn merge_of_sorted_inputs_is_sorted_and_keeps_left_first_on_ties() {
        let mut left = Holdall::new(Placement::Tail);
        for pair in [(1, 'l'), (3, 'l'), (5, 'l')] {
            left.insert(pair).unwrap();
        }
        let mut right = Holdall::new(Placement::Tail);
        for pair in [(1, 'r'), (2, 'r'), (5, 'r'), (7, 'r')] {
            right.insert(pair).unwrap();
        }
        let merged = Holdall::merge(left, right, |a, b| a.0.cmp(&b.0));
        assert_eq!(merged.count(), 7);
        assert_eq!(
            contents(&merged),
            vec![(1, 'l'), (1, 'r'), (2, 'r'), (3, 'l'), (5, 'l'), (5, 'r'), (7, 'r')]
        );
    }

    #[test]
    fn sort_orders_every_permutation() {
        for permutation in [1_u32, 2, 3, 4, 5, 6].iter().copied().permutations(6) {
            let mut h = holdall_of(Placement::Tail, &permutation);
            h.sort_by(|a, b| a.cmp(b));
            assert_eq!(contents(&h), vec![1, 2, 3, 4, 5, 6], "sorting {permutation:?}");
        }
    }

    #[test]
    fn sort_uses_the_given_comparator_and_keeps_duplicates() {
        let mut h = holdall_of(Placement::Head, &[4, 9, 1, 9, 0, 4, 4]);
        h.sort_by(|a, b| b.cmp(a));
        assert_eq!(contents(&h), vec![9, 9, 4, 4, 4, 1, 0]);
    }

    #[test]
    fn sort_is_idempotent() {
        let mut h = holdall_of(Placement::Tail, &[8, 3, 5, 1, 9, 2]);
        h.sort_by(|a, b| a.cmp(b));
        let once = contents(&h);
        h.sort_by(|a, b| a.cmp(b));
        assert_eq!(contents(&h), once);
    }

    #[test]
    fn sort_of_zero_or_one_element_changes_nothing() {
        let mut empty = Holdall::<u32>::new(Placement::Tail);
        empty.sort_by(|_, _| panic!("nothing to compare"));
        assert!(empty.is_empty());

        let mut one = holdall_of(Placement::Tail, &[42]);
        one.sort_by(|_, _| panic!("nothing to compare"));
        assert_eq!(contents(&one), vec![42]);
    }

    #[test]
    fn sort_keeps_the_placement() {
        let mut h = holdall_of(Placement::Tail, &[3, 1, 2]);
        h.sort_by(|a, b| a.cmp(b));
        h.insert(0).unwrap();
        assert_eq!(contents(&h), vec![1, 2, 3, 0]);
    }

    #[test]
    fn dispose_empties_and_may_be_repeated() {
        let mut h = holdall_of(Placement::Tail, &[1, 2, 3]);
        h.dispose();
        assert_eq!(h.count(), 0);
        h.dispose();
        assert!(h.is_empty());

        let mut never_filled = Holdall::<u32>::default();
        never_filled.dispose();
        assert!(never_filled.is_empty());
    }

    #[test]
    fn dispose_leaves_the_referents_alone() {
        let referents = vec![String::from("a"), String::from("b")];
        let mut h = Holdall::new(Placement::Tail);
        for r in &referents {
            h.insert(r).unwrap();
        }
        h.dispose();
        assert_eq!(referents, ["a", "b"]);
    }

    #[test]
    fn into_iter_yields_list_order() {
        let h = holdall_of(Placement::Head, &[1, 2, 3]);
        let borrowed: Vec<u32> = (&h).into_iter().copied().collect();
        assert_eq!(borrowed, vec![3, 2, 1]);
        assert_eq!(h.into_iter().collect::<Vec<_>>(), vec![3, 2, 1]);
    }
}
