use super::ObjParseError;

/// A vertex reference of the `f` command, e.g. `3/1/2`, `3//2`, or `-1`.
///
/// Reference numbers are kept as written: 1-based, or negative for relative
/// references. They are resolved against the attribute pools when the face is
/// added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VertexReference {
    pub position: i32,
    pub texcoord: Option<i32>,
    pub normal: Option<i32>,
}

impl VertexReference {
    fn parse(s: &str, line_num: usize) -> Result<Self, ObjParseError> {
        let invalid = || ObjParseError::InvalidReference {
            line_num,
            reference: s.to_string(),
        };

        let mut components = s.split('/');

        let position = components
            .next()
            .and_then(|p| p.parse::<i32>().ok())
            .ok_or_else(invalid)?;

        let mut optional = || -> Result<Option<i32>, ObjParseError> {
            match components.next() {
                None | Some("") => Ok(None),
                Some(n) => n.parse::<i32>().map(Some).map_err(|_| invalid()),
            }
        };

        let texcoord = optional()?;
        let normal = optional()?;

        if components.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            position,
            texcoord,
            normal,
        })
    }
}

/// One parsed line of an OBJ file.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Directive<'a> {
    /// `v x y z [w | r g b]`
    Vertex {
        position: [f32; 3],
        color: Option<[f32; 3]>,
    },
    /// `vt u [v [w]]`
    TextureVertex([f32; 2]),
    /// `vn i j k`
    VertexNormal([f32; 3]),
    /// `f v1 v2 v3 ...`
    Face(Vec<VertexReference>),
    /// `g name1 name2 ...`
    Group(Vec<&'a str>),
    /// `o name`
    Object(&'a str),
    /// `usemtl name`
    UseMaterial(&'a str),
    /// `mtllib file name.mtl`
    MaterialLibrary(&'a str),
    /// `s group_number`
    SmoothingGroup,
    /// Any command this parser does not handle.
    Unsupported(&'a str),
}

impl<'a> Directive<'a> {
    /// Parses one line. Returns `Ok(None)` for blank lines and comments.
    pub fn parse(line: &'a str, line_num: usize) -> Result<Option<Self>, ObjParseError> {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (keyword, raw_args) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim_start()),
            None => (line, ""),
        };

        let args = Arguments {
            keyword,
            line_num,
            raw: raw_args,
        };

        let directive = match keyword {
            "v" => {
                let numbers = args.numbers()?;

                // A tail of 1 or 2 numbers is a homogeneous weight, not a color.
                match numbers[..] {
                    [x, y, z, r, g, b, ..] => Directive::Vertex {
                        position: [x, y, z],
                        color: Some([r, g, b]),
                    },
                    [x, y, z, ..] => Directive::Vertex {
                        position: [x, y, z],
                        color: None,
                    },
                    _ => return Err(args.syntax_error("at least 3 numbers", numbers.len())),
                }
            }
            "vt" => {
                let numbers = args.numbers()?;

                match numbers[..] {
                    [u, v, ..] => Directive::TextureVertex([u, v]),
                    [u] => Directive::TextureVertex([u, 0.0]),
                    [] => return Err(args.syntax_error("at least 1 number", 0)),
                }
            }
            "vn" => {
                let numbers = args.numbers()?;

                match numbers[..] {
                    [i, j, k, ..] => Directive::VertexNormal([i, j, k]),
                    _ => return Err(args.syntax_error("at least 3 numbers", numbers.len())),
                }
            }
            "f" => Directive::Face(
                args.parts()
                    .map(|reference| VertexReference::parse(reference, line_num))
                    .collect::<Result<_, _>>()?,
            ),
            "g" => Directive::Group(args.parts().collect()),
            "o" => Directive::Object(args.raw),
            "usemtl" => Directive::UseMaterial(args.raw),
            "mtllib" => Directive::MaterialLibrary(args.raw),
            "s" => Directive::SmoothingGroup,
            other => Directive::Unsupported(other),
        };

        Ok(Some(directive))
    }
}

/// Arguments following the command of a line.
struct Arguments<'a> {
    keyword: &'a str,
    line_num: usize,
    raw: &'a str,
}

impl<'a> Arguments<'a> {
    fn parts(&self) -> std::str::SplitWhitespace<'a> {
        self.raw.split_whitespace()
    }

    fn numbers(&self) -> Result<Vec<f32>, ObjParseError> {
        self.parts()
            .map(|part| {
                part.parse::<f32>()
                    .map_err(|_| ObjParseError::InvalidNumber {
                        line_num: self.line_num,
                        command: self.keyword.to_string(),
                        value: part.to_string(),
                    })
            })
            .collect()
    }

    fn syntax_error(&self, expected: &'static str, found: usize) -> ObjParseError {
        ObjParseError::InvalidSyntax {
            line_num: self.line_num,
            command: self.keyword.to_string(),
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Directive<'_> {
        Directive::parse(line, 1).unwrap().unwrap()
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        assert_eq!(Directive::parse("", 1).unwrap(), None);
        assert_eq!(Directive::parse("   \t ", 1).unwrap(), None);
        assert_eq!(Directive::parse("  # v 1 2 3", 1).unwrap(), None);
    }

    #[test]
    fn vertex_with_and_without_color() {
        assert_eq!(
            parse("v 1 2 3"),
            Directive::Vertex {
                position: [1.0, 2.0, 3.0],
                color: None
            }
        );
        assert_eq!(
            parse("v  1\t2 3   0.5 0.25 1\r"),
            Directive::Vertex {
                position: [1.0, 2.0, 3.0],
                color: Some([0.5, 0.25, 1.0])
            }
        );
    }

    #[test]
    fn vertex_weight_is_not_a_color() {
        for line in ["v 1 2 3 1", "v 1 2 3 1 0.5"] {
            assert_eq!(
                parse(line),
                Directive::Vertex {
                    position: [1.0, 2.0, 3.0],
                    color: None
                }
            );
        }
    }

    #[test]
    fn vertex_needs_three_coordinates() {
        assert!(matches!(
            Directive::parse("v 1 2", 4),
            Err(ObjParseError::InvalidSyntax {
                line_num: 4,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn unparsable_numbers_are_errors() {
        assert_eq!(
            Directive::parse("vn 0 one 0", 7),
            Err(ObjParseError::InvalidNumber {
                line_num: 7,
                command: String::from("vn"),
                value: String::from("one"),
            })
        );
    }

    #[test]
    fn texture_vertex_ignores_w() {
        assert_eq!(parse("vt 0.5 0.75 0"), Directive::TextureVertex([0.5, 0.75]));
    }

    #[test]
    fn texture_vertex_v_defaults_to_zero() {
        assert_eq!(parse("vt 0.5"), Directive::TextureVertex([0.5, 0.0]));
        assert!(matches!(
            Directive::parse("vt", 3),
            Err(ObjParseError::InvalidSyntax {
                line_num: 3,
                found: 0,
                ..
            })
        ));
    }

    #[test]
    fn face_references() {
        assert_eq!(
            parse("f 1 2/3 -1//4 5/6/7"),
            Directive::Face(vec![
                VertexReference {
                    position: 1,
                    texcoord: None,
                    normal: None
                },
                VertexReference {
                    position: 2,
                    texcoord: Some(3),
                    normal: None
                },
                VertexReference {
                    position: -1,
                    texcoord: None,
                    normal: Some(4)
                },
                VertexReference {
                    position: 5,
                    texcoord: Some(6),
                    normal: Some(7)
                },
            ])
        );
    }

    #[test]
    fn malformed_face_references() {
        for reference in ["/1/2", "1/2/3/4", "a", "1/b", "1.5"] {
            let line = format!("f {reference} 2 3");

            assert_eq!(
                Directive::parse(&line, 2),
                Err(ObjParseError::InvalidReference {
                    line_num: 2,
                    reference: reference.to_string(),
                })
            );
        }
    }

    #[test]
    fn names_keep_the_raw_remainder() {
        assert_eq!(parse("mtllib my  materials.mtl"), Directive::MaterialLibrary("my  materials.mtl"));
        assert_eq!(parse("usemtl   Red Paint"), Directive::UseMaterial("Red Paint"));
        assert_eq!(parse("o Body"), Directive::Object("Body"));
        assert_eq!(parse("g left  right"), Directive::Group(vec!["left", "right"]));
        assert_eq!(parse("g"), Directive::Group(vec![]));
    }

    #[test]
    fn unknown_commands() {
        assert_eq!(parse("s off"), Directive::SmoothingGroup);
        assert_eq!(parse("vp 0.5"), Directive::Unsupported("vp"));
    }
}
