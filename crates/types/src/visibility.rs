/// One notification from a visibility observer.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityChange<N> {
    pub target: N,
    pub is_intersecting: bool,
}

impl<N> VisibilityChange<N> {
    pub fn new(target: N, is_intersecting: bool) -> Self {
        Self {
            target,
            is_intersecting,
        }
    }
}

/// Per-row active membership, indexed like the heading/row pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSet {
    members: Vec<bool>,
}

impl ActiveSet {
    /// A set over `len` rows with none active.
    pub fn empty(len: usize) -> Self {
        Self {
            members: vec![false; len],
        }
    }

    /// A set over `len` rows where only `index` is active.
    pub fn only(len: usize, index: usize) -> Self {
        let mut set = Self::empty(len);
        if let Some(slot) = set.members.get_mut(index) {
            *slot = true;
        }
        set
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.members.get(index).copied().unwrap_or(false)
    }

    /// Indices of active rows, ascending.
    pub fn active_indices(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter_map(|(i, active)| active.then_some(i))
            .collect()
    }

    /// Iterates `(index, active)` for every row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.members.iter().copied().enumerate()
    }
}
