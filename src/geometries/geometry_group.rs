use std::fmt;

/// Kinds of per-vertex attributes a [`GeometryGroup`] can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeKind {
    /// Vertex positions, 3 floats per vertex.
    Position,
    /// Texture coordinates, 2 floats per vertex.
    Texcoord,
    /// Vertex normals, 3 floats per vertex.
    Normal,
    /// RGB vertex colors, 3 floats per vertex.
    Color,
}

impl AttributeKind {
    /// Every attribute kind, in shader location order.
    pub const ALL: [AttributeKind; 4] = [
        AttributeKind::Position,
        AttributeKind::Texcoord,
        AttributeKind::Normal,
        AttributeKind::Color,
    ];

    /// The attribute name, which is also the name the vertex shader is
    /// expected to use for it.
    pub fn name(self) -> &'static str {
        match self {
            AttributeKind::Position => "position",
            AttributeKind::Texcoord => "texcoord",
            AttributeKind::Normal => "normal",
            AttributeKind::Color => "color",
        }
    }

    /// Number of floats per vertex.
    pub fn components(self) -> usize {
        match self {
            AttributeKind::Texcoord => 2,
            AttributeKind::Position | AttributeKind::Normal | AttributeKind::Color => 3,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flat attribute arrays of a [`GeometryGroup`].
///
/// Every present array holds consecutive per-vertex tuples (see
/// [`AttributeKind::components`]) and all present arrays describe the same
/// number of vertices. Attributes that were never supplied are absent, never
/// empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    attributes: [Option<Vec<f32>>; 4],
}

impl GeometryData {
    /// Builds the data from raw arrays, dropping every empty one.
    pub fn from_arrays(arrays: [Vec<f32>; 4]) -> Self {
        Self {
            attributes: arrays.map(|array| (!array.is_empty()).then_some(array)),
        }
    }

    /// Returns the array for the given attribute, if present.
    pub fn get(&self, kind: AttributeKind) -> Option<&[f32]> {
        self.attributes[kind.index()].as_deref()
    }

    pub fn contains(&self, kind: AttributeKind) -> bool {
        self.attributes[kind.index()].is_some()
    }

    /// Iterates over the present attributes in shader location order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKind, &[f32])> {
        AttributeKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|array| (kind, array)))
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.iter().all(Option::is_none)
    }
}

/// One drawable unit of parsed geometry: a contiguous run of faces sharing the
/// same object, group and material association.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryGroup {
    /// Object name, from the `o` command.
    pub object: String,
    /// Group names, from the `g` command, in first-insertion order.
    pub groups: Vec<String>,
    /// Material name, from the `usemtl` command.
    pub material: String,
    /// Triangle-list vertex data, three vertices per triangle.
    pub data: GeometryData,
}

impl GeometryGroup {
    /// Number of vertices, i.e. the vertex count to draw with.
    pub fn vertex_count(&self) -> usize {
        self.data
            .get(AttributeKind::Position)
            .map_or(0, |position| position.len() / 3)
    }

    /// Returns the position array, or an empty slice if there is none.
    pub fn positions(&self) -> &[f32] {
        self.data.get(AttributeKind::Position).unwrap_or_default()
    }
}
