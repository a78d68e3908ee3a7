use crate::geometries::AttributeKind;

/// Color given to positions declared without one, in files where other
/// positions do carry colors.
pub(crate) const FALLBACK_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Append-only list of fixed-size attribute tuples, addressed by OBJ reference
/// numbers.
///
/// The pool is seeded with one zero tuple at index 0 so that 1-based reference
/// numbers index it directly.
#[derive(Debug)]
pub(crate) struct AttributePool {
    components: usize,
    data: Vec<f32>,
}

impl AttributePool {
    fn new(components: usize) -> Self {
        Self {
            components,
            data: vec![0.0; components],
        }
    }

    /// Number of tuples, including the seed.
    pub fn len(&self) -> usize {
        self.data.len() / self.components
    }

    fn push(&mut self, tuple: &[f32]) {
        debug_assert_eq!(tuple.len(), self.components);
        self.data.extend_from_slice(tuple);
    }

    /// Converts a reference number to an index into this pool. Negative
    /// reference numbers count back from the current end of the pool.
    pub fn resolve(&self, reference_number: i32) -> Option<usize> {
        let len = self.len() as i64;
        let index = match i64::from(reference_number) {
            n if n < 0 => n + len,
            n => n,
        };

        (0..len).contains(&index).then_some(index as usize)
    }

    pub fn get(&self, index: usize) -> &[f32] {
        let start = index * self.components;
        &self.data[start..start + self.components]
    }
}

/// Attributes that `f` vertex references address, in reference order
/// (`v/vt/vn`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndexedKind {
    Position,
    Texcoord,
    Normal,
}

impl IndexedKind {
    pub const ALL: [IndexedKind; 3] = [IndexedKind::Position, IndexedKind::Texcoord, IndexedKind::Normal];

    pub fn attribute(self) -> AttributeKind {
        match self {
            IndexedKind::Position => AttributeKind::Position,
            IndexedKind::Texcoord => AttributeKind::Texcoord,
            IndexedKind::Normal => AttributeKind::Normal,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Every attribute tuple seen so far in a file.
///
/// Positions, texture vertices and normals are addressed by the `f` command
/// and live in [`indexed`](Self::indexed), in that order. Colors are never
/// addressed directly: the color pool runs parallel to the position pool, so a
/// resolved position index is also the index of its color.
#[derive(Debug)]
pub(crate) struct AttributePools {
    indexed: [AttributePool; 3],
    colors: AttributePool,
    has_colors: bool,
}

impl AttributePools {
    pub fn new() -> Self {
        Self {
            indexed: IndexedKind::ALL.map(|kind| AttributePool::new(kind.attribute().components())),
            colors: AttributePool::new(AttributeKind::Color.components()),
            has_colors: false,
        }
    }

    pub fn pool(&self, kind: IndexedKind) -> &AttributePool {
        &self.indexed[kind.index()]
    }

    pub fn push_position(&mut self, position: [f32; 3], color: Option<[f32; 3]>) {
        self.indexed[IndexedKind::Position.index()].push(&position);
        self.colors.push(&color.unwrap_or(FALLBACK_COLOR));
        self.has_colors |= color.is_some();
    }

    pub fn push_texcoord(&mut self, texcoord: [f32; 2]) {
        self.indexed[IndexedKind::Texcoord.index()].push(&texcoord);
    }

    pub fn push_normal(&mut self, normal: [f32; 3]) {
        self.indexed[IndexedKind::Normal.index()].push(&normal);
    }

    /// Whether any position so far was declared with a color.
    pub fn has_colors(&self) -> bool {
        self.has_colors
    }

    /// Returns the color of the position at the resolved `position_index`.
    pub fn color(&self, position_index: usize) -> &[f32] {
        self.colors.get(position_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pools_with_positions(count: usize) -> AttributePools {
        let mut pools = AttributePools::new();
        for i in 0..count {
            pools.push_position([i as f32 + 1.0, 0.0, 0.0], None);
        }
        pools
    }

    #[test]
    fn seeded_with_a_zero_tuple() {
        let pools = AttributePools::new();

        for kind in IndexedKind::ALL {
            let pool = pools.pool(kind);
            assert_eq!(pool.len(), 1);
            assert!(pool.get(0).iter().all(|&c| c == 0.0));
        }
    }

    #[test]
    fn indexed_kinds_address_their_own_pools() {
        let mut pools = AttributePools::new();
        pools.push_texcoord([0.5, 0.25]);
        pools.push_normal([0.0, 1.0, 0.0]);

        for kind in IndexedKind::ALL {
            assert_eq!(pools.pool(kind).get(0).len(), kind.attribute().components());
        }

        assert_eq!(pools.pool(IndexedKind::Position).len(), 1);
        assert_eq!(pools.pool(IndexedKind::Texcoord).get(1), [0.5, 0.25]);
        assert_eq!(pools.pool(IndexedKind::Normal).get(1), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn relative_references_count_back_from_the_end() {
        let pools = pools_with_positions(5);
        let positions = pools.pool(IndexedKind::Position);

        assert_eq!(positions.resolve(-1), Some(5));
        assert_eq!(positions.resolve(-2), Some(4));
        assert_eq!(positions.resolve(-5), Some(1));
        assert_eq!(positions.resolve(3), Some(3));
        assert_eq!(positions.get(5), [5.0, 0.0, 0.0]);
    }

    #[test]
    fn out_of_range_references() {
        let pools = pools_with_positions(2);
        let positions = pools.pool(IndexedKind::Position);

        assert_eq!(positions.resolve(0), Some(0));
        assert_eq!(positions.resolve(3), None);
        assert_eq!(positions.resolve(-4), None);
        assert_eq!(positions.resolve(i32::MIN), None);
        assert_eq!(positions.resolve(i32::MAX), None);
    }

    #[test]
    fn colors_run_parallel_to_positions() {
        let mut pools = AttributePools::new();
        pools.push_position([0.0, 0.0, 0.0], None);
        assert!(!pools.has_colors());

        pools.push_position([1.0, 0.0, 0.0], Some([1.0, 0.0, 0.0]));
        assert!(pools.has_colors());

        assert_eq!(pools.color(1), FALLBACK_COLOR);
        assert_eq!(pools.color(2), [1.0, 0.0, 0.0]);
    }
}
