//! Provides `LineIndex`, which finds the `Line` for a given text and makes
//! sure there is only one `Line` per distinct text.
//!
//! The lines live in an `IndexSet` hashed with `FxBuildHasher`, looked up by
//! their bytes. An `EntryId` is a line's position in the set, which never
//! changes because lines are never removed.
use std::borrow::{Borrow, Cow};
use std::hash::{Hash, Hasher};
use std::ops;

use fxhash::FxBuildHasher;
use indexmap::set::MutableValues;
use indexmap::IndexSet;
use tracing::trace;

use crate::error::{LnidError, Result};
use crate::line::{Comparator, Line};

/// Identifies a `Line` within its `LineIndex`.
pub type EntryId = usize;

/// The outcome of `LineIndex::add`: which line was updated, and whether it
/// had to be created first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Found {
    /// The line's id
    pub id: EntryId,
    /// `true` if this was the first time the text was seen
    pub inserted: bool,
}

/// Maps line text to the one `Line` recording it.
pub struct LineIndex<'data, N> {
    lines: IndexSet<Line<'data, N>, FxBuildHasher>,
    comparator: Comparator<N>,
    file_count_max: usize,
}

impl<'data, N> LineIndex<'data, N> {
    /// An empty index whose lines use `comparator` to tell file names apart
    /// and accept at most `file_count_max` files each.
    #[must_use]
    pub fn new(comparator: Comparator<N>, file_count_max: usize) -> Self {
        LineIndex { lines: IndexSet::default(), comparator, file_count_max }
    }

    /// The id of the line with text `text`, if there is one.
    #[must_use]
    pub fn find(&self, text: &[u8]) -> Option<EntryId> {
        self.lines.get_index_of(text)
    }

    /// The line with id `id`.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&Line<'data, N>> {
        self.lines.get_index(id)
    }

    /// Inserts a line with text `text` seen in no file yet, or returns the id
    /// of the existing one.
    pub fn insert(&mut self, text: Cow<'data, [u8]>) -> Result<Found> {
        match self.find(&text) {
            Some(id) => Ok(Found { id, inserted: false }),
            None => self.insert_new(text),
        }
    }

    /// Records that `text` occurs at `line_number` of file `name`, creating
    /// its line (with its own copy of `text`) if need be.
    pub fn add(&mut self, text: &[u8], name: N, line_number: usize) -> Result<Found> {
        let found = match self.find(text) {
            Some(id) => Found { id, inserted: false },
            None => {
                let mut owned = Vec::new();
                owned.try_reserve_exact(text.len())?;
                owned.extend_from_slice(text);
                self.insert_new(Cow::Owned(owned))?
            }
        };
        let line = self.lines.get_index_mut2(found.id).ok_or(LnidError::NoSuchLine { id: found.id })?;
        line.add(name, line_number)?;
        Ok(found)
    }

    // The caller has checked that no line has this text.
    fn insert_new(&mut self, text: Cow<'data, [u8]>) -> Result<Found> {
        self.lines.try_reserve(1)?;
        trace!(id = self.lines.len(), "new line");
        let line = Line::new(Some(text), self.comparator, self.file_count_max);
        let (id, inserted) = self.lines.insert_full(line);
        Ok(Found { id, inserted })
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Has no line been recorded?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Releases every line. Disposing of an empty index does nothing.
    pub fn dispose(&mut self) {
        self.lines = IndexSet::default();
    }
}

impl<'data, N> ops::Index<EntryId> for LineIndex<'data, N> {
    type Output = Line<'data, N>;
    fn index(&self, id: EntryId) -> &Self::Output {
        &self.lines[id]
    }
}

// A `Line` is identified by its text alone, so that the set can be searched
// with a plain byte slice. Changing a stored line's files is fine; changing
// its text is not, which is why the index never calls `set_value`.
impl<N> Borrow<[u8]> for Line<'_, N> {
    fn borrow(&self) -> &[u8] {
        self.value().unwrap_or_default()
    }
}

impl<N> Hash for Line<'_, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        <Self as Borrow<[u8]>>::borrow(self).hash(state);
    }
}

impl<N> PartialEq for Line<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl<N> Eq for Line<'_, N> {}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use std::cmp::Ordering;

    fn by_name(a: &&str, b: &&str) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn equal_text_always_maps_to_the_same_line() {
        let mut index = LineIndex::new(by_name, 2);
        let first = index.add(b"a", "f2", 1).unwrap();
        let second = index.add(b"b", "f2", 2).unwrap();
        let third = index.add(b"a", "f2", 3).unwrap();
        let fourth = index.add(b"a", "f1", 1).unwrap();
        assert!(first.inserted && second.inserted);
        assert!(!third.inserted && !fourth.inserted);
        assert_eq!(first.id, third.id);
        assert_eq!(first.id, fourth.id);
        assert_ne!(first.id, second.id);
        assert_eq!(index.len(), 2);

        let a = &index[first.id];
        assert_eq!(a.value(), Some(&b"a"[..]));
        assert_eq!(a.file_count(), 2);
        assert_eq!(a.occurrences_in_file(&"f2"), 2);
        assert_eq!(a.occurrences_in_file(&"f1"), 1);
    }

    #[test]
    fn find_and_get_agree() {
        let mut index = LineIndex::new(by_name, 1);
        assert_eq!(index.find(b"x"), None);
        let found = index.add(b"x", "f1", 1).unwrap();
        assert_eq!(index.find(b"x"), Some(found.id));
        assert_eq!(index.get(found.id).and_then(Line::value), Some(&b"x"[..]));
        assert!(index.get(found.id + 1).is_none());
    }

    #[test]
    fn insert_does_not_duplicate_text() {
        let mut index: LineIndex<&str> = LineIndex::new(by_name, 1);
        let first = index.insert(Cow::Borrowed(&b"same"[..])).unwrap();
        let again = index.insert(Cow::Owned(b"same".to_vec())).unwrap();
        assert!(first.inserted);
        assert_eq!(again, Found { id: first.id, inserted: false });
        assert_eq!(index.len(), 1);
        assert_eq!(index[first.id].file_count(), 0);
    }

    #[test]
    fn add_records_on_a_line_made_by_insert() {
        let mut index = LineIndex::new(by_name, 1);
        let made = index.insert(Cow::Owned(b"t".to_vec())).unwrap();
        let found = index.add(b"t", "f1", 3).unwrap();
        assert_eq!(found, Found { id: made.id, inserted: false });
        assert_eq!(index.len(), 1);
        assert_eq!(index[made.id].occurrences_in_file(&"f1"), 1);
        assert_eq!(index[made.id].head_occurrence(), 1);
    }

    #[test]
    fn every_add_lands_on_its_line() {
        let mut index = LineIndex::new(by_name, 1);
        for (n, text) in [&b"p"[..], &b"q"[..], &b"p"[..], &b"r"[..], &b"p"[..]].into_iter().enumerate() {
            let found = index.add(text, "f1", n + 1).unwrap();
            assert_eq!(index[found.id].value(), Some(text));
        }
        let p = index.find(b"p").unwrap();
        assert_eq!(index[p].files().next().unwrap().line_numbers(), &[1, 3, 5]);
    }

    #[test]
    fn lines_differing_only_in_case_are_distinct() {
        let mut index = LineIndex::new(by_name, 1);
        index.add(b"abc", "f1", 1).unwrap();
        index.add(b"ABC", "f1", 2).unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn dispose_empties_the_index() {
        let mut index = LineIndex::new(by_name, 1);
        index.add(b"abc", "f1", 1).unwrap();
        index.dispose();
        assert!(index.is_empty());
        index.dispose();
        assert!(index.is_empty());
    }
}
