use std::mem;

use crate::geometries::{AttributeKind, GeometryData, GeometryGroup};

use super::{
    attribute_pools::{AttributePools, IndexedKind},
    directive::{Directive, VertexReference},
};

/// Successful OBJ file parse result.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjParseResult {
    /// The parsed geometry groups, in the order they were started.
    pub geometries: Vec<GeometryGroup>,
    /// Arguments of every `mtllib` command, verbatim.
    pub material_libraries: Vec<String>,
    /// Commands that were skipped because the parser does not handle them.
    pub unhandled: Vec<UnhandledDirective>,
}

/// A command the parser skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnhandledDirective {
    /// Line number.
    pub line_num: usize,
    /// Command name.
    pub keyword: String,
}

/// Contains OBJ parse errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObjParseError {
    /// Wrong number of arguments.
    #[error("line {line_num}: `{command}` expects {expected}, found {found} argument(s)")]
    InvalidSyntax {
        /// Line number.
        line_num: usize,
        /// Command name.
        command: String,
        /// Description of the expected arguments.
        expected: &'static str,
        /// Number of arguments found.
        found: usize,
    },
    /// A numeric argument could not be parsed.
    #[error("line {line_num}: `{command}` argument {value:?} is not a number")]
    InvalidNumber {
        /// Line number.
        line_num: usize,
        /// Command name.
        command: String,
        /// The offending argument.
        value: String,
    },
    /// Malformed vertex reference in an `f` command.
    #[error("line {line_num}: malformed vertex reference {reference:?}")]
    InvalidReference {
        /// Line number.
        line_num: usize,
        /// The offending reference, as written.
        reference: String,
    },
    /// A reference number that does not name an existing attribute.
    #[error("line {line_num}: {attribute} reference {reference_number} is out of range, {len} defined")]
    IndexOutOfRange {
        /// Line number.
        line_num: usize,
        /// Attribute the reference number was for.
        attribute: AttributeKind,
        /// Invalid reference number.
        reference_number: i32,
        /// Number of attributes of that kind defined before the line.
        len: usize,
    },
    /// A face vertex supplies an attribute that other vertices of the same
    /// geometry group do not, or the other way around.
    #[error("line {line_num}: {attribute} is supplied for some vertices of the group but not others")]
    MixedAttributes {
        /// Line number.
        line_num: usize,
        /// The attribute that is inconsistently supplied.
        attribute: AttributeKind,
    },
    /// The command is not supported by the parser. Only returned when
    /// [`ObjParseOptions::error_on_unsupported_commands`] is set.
    #[error("line {line_num}: unsupported command `{command}`")]
    UnsupportedCommand {
        /// Line number.
        line_num: usize,
        /// Command name.
        command: String,
    },
    /// A face with fewer than 3 vertices. Only returned when
    /// [`ObjParseOptions::error_on_degenerate_faces`] is set.
    #[error("line {line_num}: face has {count} vertices, at least 3 are needed")]
    DegenerateFace {
        /// Line number.
        line_num: usize,
        /// Number of vertex references.
        count: usize,
    },
}

/// Configures the [`ObjParser`]'s behavior.
#[derive(Debug, Clone, Default)]
pub struct ObjParseOptions {
    /// If `true`, returns an error when an unsupported command is encountered.
    /// If `false`, unsupported commands are logged, recorded in
    /// [`ObjParseResult::unhandled`], and otherwise ignored.
    pub error_on_unsupported_commands: bool,
    /// If `true`, faces with fewer than 3 vertices are an error. If `false`,
    /// they are logged and ignored.
    pub error_on_degenerate_faces: bool,
}

/// Parser for ASCII OBJ files.
///
/// This is not a full OBJ parser: it reads the subset needed to build
/// triangle-list vertex buffers.
///
/// ## Supported commands
///
/// - [x] Geometric vertices (`v`), with optional trailing RGB vertex colors
/// - [x] Texture vertices (`vt`)
/// - [x] Vertex normals (`vn`)
/// - [x] Face (`f`), fan-triangulated
/// - [x] Group name (`g`)
/// - [x] Object name (`o`)
/// - [x] Material name (`usemtl`)
/// - [x] Material library (`mtllib`), recorded but not loaded
/// - [x] Smoothing group (`s`), accepted and ignored
///
/// Everything else (free-form curves and surfaces, points, lines, rendering
/// attributes) is reported as unhandled.
pub struct ObjParser {}

/// Attribute buffers of the geometry group being filled.
#[derive(Debug)]
struct GroupBuilder {
    object: String,
    groups: Vec<String>,
    material: String,
    /// Position, texcoord and normal output, in [`IndexedKind`] order.
    buffers: [Vec<f32>; 3],
    /// Resolved position index of every vertex, used to fill in colors once the
    /// whole file is read.
    position_indices: Vec<usize>,
    /// Which of texcoord and normal the vertices of this group supply.
    supplied: Option<[bool; 2]>,
}

impl GroupBuilder {
    fn new(object: &str, groups: &[String], material: &str) -> Self {
        Self {
            object: object.to_string(),
            groups: groups.to_vec(),
            material: material.to_string(),
            buffers: Default::default(),
            position_indices: Vec::new(),
            supplied: None,
        }
    }

    /// Resolves a vertex reference against the pools and appends the
    /// referenced attributes.
    fn push_vertex(
        &mut self,
        pools: &AttributePools,
        reference: &VertexReference,
        line_num: usize,
    ) -> Result<(), ObjParseError> {
        let resolve = |kind: IndexedKind, reference_number: i32| {
            let pool = pools.pool(kind);

            pool.resolve(reference_number)
                .ok_or(ObjParseError::IndexOutOfRange {
                    line_num,
                    attribute: kind.attribute(),
                    reference_number,
                    len: pool.len() - 1,
                })
        };

        let position = resolve(IndexedKind::Position, reference.position)?;
        let texcoord = reference
            .texcoord
            .map(|t| resolve(IndexedKind::Texcoord, t))
            .transpose()?;
        let normal = reference
            .normal
            .map(|n| resolve(IndexedKind::Normal, n))
            .transpose()?;

        // Every vertex of a group must supply the same attributes, or the
        // arrays would describe different vertex counts.
        let supplied = [texcoord.is_some(), normal.is_some()];
        let expected = *self.supplied.get_or_insert(supplied);

        for (attribute, (expected, supplied)) in [AttributeKind::Texcoord, AttributeKind::Normal]
            .into_iter()
            .zip(expected.into_iter().zip(supplied))
        {
            if expected != supplied {
                return Err(ObjParseError::MixedAttributes {
                    line_num,
                    attribute,
                });
            }
        }

        for (kind, index) in IndexedKind::ALL.into_iter().zip([Some(position), texcoord, normal])
        {
            if let Some(index) = index {
                self.buffers[kind.index()].extend_from_slice(pools.pool(kind).get(index));
            }
        }

        self.position_indices.push(position);

        Ok(())
    }

    fn has_vertices(&self) -> bool {
        !self.position_indices.is_empty()
    }

    fn finish(self, pools: &AttributePools) -> GeometryGroup {
        let [position, texcoord, normal] = self.buffers;

        let color = if pools.has_colors() {
            self.position_indices
                .iter()
                .flat_map(|&index| pools.color(index).iter().copied())
                .collect()
        } else {
            Vec::new()
        };

        GeometryGroup {
            object: self.object,
            groups: self.groups,
            material: self.material,
            data: GeometryData::from_arrays([position, texcoord, normal, color]),
        }
    }
}

/// Whether faces are currently being added to a geometry group.
#[derive(Debug)]
enum GroupState {
    NoActiveGroup,
    Active(GroupBuilder),
}

impl GroupState {
    /// Takes the active group out of the state, or starts one with `start` if
    /// there is none. The caller puts it back with [`GroupState::Active`].
    fn take_or_start(&mut self, start: impl FnOnce() -> GroupBuilder) -> GroupBuilder {
        match mem::replace(self, GroupState::NoActiveGroup) {
            GroupState::Active(builder) => builder,
            GroupState::NoActiveGroup => start(),
        }
    }
}

struct ObjParseState {
    /// Every attribute tuple defined so far.
    pools: AttributePools,
    /// Groups that have been closed, in the order they were started.
    finished: Vec<GroupBuilder>,
    /// Group that faces are being added to.
    active: GroupState,
    object: String,
    groups: Vec<String>,
    material: String,
    material_libraries: Vec<String>,
}

impl ObjParseState {
    /// Creates a new parse state for the parser. Must be created for every file
    /// that will be parsed.
    fn new() -> Self {
        Self {
            pools: AttributePools::new(),
            finished: Vec::new(),
            active: GroupState::NoActiveGroup,
            object: String::from("default"),
            groups: vec![String::from("default")],
            material: String::from("default"),
            material_libraries: Vec::new(),
        }
    }

    /// Closes the active group if it already has vertices, so that the next
    /// face starts a new group with the current object, groups and material.
    fn close_group(&mut self) {
        if !matches!(&self.active, GroupState::Active(builder) if builder.has_vertices()) {
            return;
        }

        if let GroupState::Active(builder) = mem::replace(&mut self.active, GroupState::NoActiveGroup) {
            tracing::debug!(
                object = %builder.object,
                material = %builder.material,
                vertices = builder.position_indices.len(),
                "closing geometry group"
            );
            self.finished.push(builder);
        }
    }

    /// Fan-triangulates a face around its first vertex and adds the triangles
    /// to the active group, starting one if needed.
    fn add_face(&mut self, face: &[VertexReference], line_num: usize) -> Result<(), ObjParseError> {
        let Some((first, rest)) = face.split_first() else {
            return Ok(());
        };

        let Self {
            pools,
            active,
            object,
            groups,
            material,
            ..
        } = self;

        let mut builder = active.take_or_start(|| {
            tracing::debug!(object = %object, material = %material, "starting geometry group");
            GroupBuilder::new(object, groups, material)
        });

        // On error the parse is abandoned, so the builder need not go back.
        for pair in rest.windows(2) {
            for reference in [first, &pair[0], &pair[1]] {
                builder.push_vertex(pools, reference, line_num)?;
            }
        }

        *active = GroupState::Active(builder);

        Ok(())
    }

    /// Closes the active group and builds the output geometry. Vertex colors
    /// are filled in for every group if any position in the file had one.
    fn finish(mut self, unhandled: Vec<UnhandledDirective>) -> ObjParseResult {
        if let GroupState::Active(builder) = mem::replace(&mut self.active, GroupState::NoActiveGroup) {
            self.finished.push(builder);
        }

        let pools = &self.pools;
        let geometries: Vec<GeometryGroup> = self
            .finished
            .into_iter()
            .filter(GroupBuilder::has_vertices)
            .map(|builder| builder.finish(pools))
            .collect();

        tracing::debug!(
            geometries = geometries.len(),
            material_libraries = self.material_libraries.len(),
            unhandled = unhandled.len(),
            "parsed OBJ"
        );

        ObjParseResult {
            geometries,
            material_libraries: self.material_libraries,
            unhandled,
        }
    }
}

/// Collects names into a set that keeps first-insertion order.
fn group_names(names: &[&str]) -> Vec<String> {
    let mut groups: Vec<String> = Vec::with_capacity(names.len());

    for name in names {
        if !groups.iter().any(|group| group == name) {
            groups.push(name.to_string());
        }
    }

    groups
}

impl ObjParser {
    /// Parses the content of an OBJ file into geometry groups.
    ///
    /// Every face is fan-triangulated around its first vertex, and the
    /// position, texture vertex, normal and (if present) color of each of its
    /// vertices are copied into flat per-attribute arrays. A new geometry group
    /// is started whenever the object (`o`), group (`g`) or material (`usemtl`)
    /// changes after the current group received faces.
    ///
    /// Parsing stops at the first error. Unsupported commands are not errors
    /// unless [`ObjParseOptions::error_on_unsupported_commands`] is set.
    ///
    /// ## Parameters
    ///
    /// * `text`: The content of the OBJ file. Can be included using e.g. the
    ///   [`include_str!`] macro.
    /// * `options`: Optional parser configuration. Will use sensible defaults
    ///   if `None`.
    pub fn parse(text: &str, options: Option<ObjParseOptions>) -> Result<ObjParseResult, ObjParseError> {
        let options = options.unwrap_or_default();

        let mut state = ObjParseState::new();
        let mut unhandled = Vec::new();

        for (line_num, line) in text.split('\n').enumerate() {
            let line_num = line_num + 1;

            let Some(directive) = Directive::parse(line, line_num)? else {
                continue;
            };

            match directive {
                Directive::Vertex { position, color } => state.pools.push_position(position, color),
                Directive::TextureVertex(texcoord) => state.pools.push_texcoord(texcoord),
                Directive::VertexNormal(normal) => state.pools.push_normal(normal),
                Directive::Face(face) => {
                    if face.len() < 3 {
                        if options.error_on_degenerate_faces {
                            return Err(ObjParseError::DegenerateFace {
                                line_num,
                                count: face.len(),
                            });
                        }

                        tracing::warn!(line_num, count = face.len(), "skipping face with fewer than 3 vertices");
                        continue;
                    }

                    state.add_face(&face, line_num)?;
                }
                Directive::Group(names) => {
                    state.groups = group_names(&names);
                    state.close_group();
                }
                Directive::Object(name) => {
                    state.object = name.to_string();
                    state.close_group();
                }
                Directive::UseMaterial(name) => {
                    state.material = name.to_string();
                    state.close_group();
                }
                Directive::MaterialLibrary(library) => state.material_libraries.push(library.to_string()),
                Directive::SmoothingGroup => {}
                Directive::Unsupported(keyword) => {
                    if options.error_on_unsupported_commands {
                        return Err(ObjParseError::UnsupportedCommand {
                            line_num,
                            command: keyword.to_string(),
                        });
                    }

                    tracing::warn!(line_num, keyword, "unhandled OBJ command");
                    unhandled.push(UnhandledDirective {
                        line_num,
                        keyword: keyword.to_string(),
                    });
                }
            }
        }

        Ok(state.finish(unhandled))
    }
}
