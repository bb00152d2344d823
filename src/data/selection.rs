//! Normalized index sets and the additive merge rule.

/// A set of point indices, kept sorted and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    inds: Vec<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from indices in any order, with repeats allowed.
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        let mut inds: Vec<usize> = indices.into_iter().collect();
        inds.sort_unstable();
        inds.dedup();
        Self { inds }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.inds
    }

    pub fn len(&self) -> usize {
        self.inds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inds.is_empty()
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.inds.binary_search(&idx).is_ok()
    }

    pub fn is_subset_of(&self, other: &Selection) -> bool {
        self.inds.iter().all(|i| other.contains(*i))
    }

    pub fn union(&self, other: &Selection) -> Selection {
        Self::from_indices(self.inds.iter().chain(other.inds.iter()).copied())
    }

    pub fn difference(&self, other: &Selection) -> Selection {
        Self {
            inds: self
                .inds
                .iter()
                .copied()
                .filter(|i| !other.contains(*i))
                .collect(),
        }
    }

    /// Split into the indices below `len` and the count of those dropped.
    pub fn bounded(self, len: usize) -> (Selection, usize) {
        let before = self.inds.len();
        let inds: Vec<usize> = self.inds.into_iter().filter(|i| *i < len).collect();
        let dropped = before - inds.len();
        (Self { inds }, dropped)
    }

    /// Combine `incoming` with this selection.
    ///
    /// Without `additive` the incoming set replaces the current one. With it,
    /// an incoming subset of the current selection is removed from it and
    /// anything else is added.
    pub fn merge(&self, incoming: &Selection, additive: bool) -> Selection {
        if !additive {
            return incoming.clone();
        }
        if incoming.is_subset_of(self) {
            self.difference(incoming)
        } else {
            self.union(incoming)
        }
    }
}

impl FromIterator<usize> for Selection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::from_indices(iter)
    }
}

impl From<Vec<usize>> for Selection {
    fn from(v: Vec<usize>) -> Self {
        Self::from_indices(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(v: &[usize]) -> Selection {
        Selection::from_indices(v.iter().copied())
    }

    #[test]
    fn construction_sorts_and_dedups() {
        assert_eq!(sel(&[5, 1, 5, 3, 1]).as_slice(), &[1, 3, 5]);
    }

    #[test]
    fn replace_when_not_additive() {
        assert_eq!(sel(&[1, 2]).merge(&sel(&[7]), false), sel(&[7]));
        assert_eq!(sel(&[1, 2]).merge(&sel(&[]), false), sel(&[]));
    }

    #[test]
    fn additive_subset_subtracts() {
        assert_eq!(sel(&[1, 2, 3]).merge(&sel(&[2]), true), sel(&[1, 3]));
        assert_eq!(sel(&[1, 2, 3]).merge(&sel(&[1, 2, 3]), true), sel(&[]));
    }

    #[test]
    fn additive_non_subset_unions() {
        assert_eq!(sel(&[1, 2]).merge(&sel(&[3, 4]), true), sel(&[1, 2, 3, 4]));
        // a partial overlap is not a subset, so it adds
        assert_eq!(sel(&[1, 2]).merge(&sel(&[2, 3]), true), sel(&[1, 2, 3]));
    }

    #[test]
    fn additive_empty_is_noop() {
        assert_eq!(sel(&[4, 9]).merge(&sel(&[]), true), sel(&[4, 9]));
    }

    #[test]
    fn bounded_drops_out_of_range() {
        let (kept, dropped) = sel(&[0, 3, 10, 11]).bounded(4);
        assert_eq!(kept, sel(&[0, 3]));
        assert_eq!(dropped, 2);
    }
}
