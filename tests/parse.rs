use nalgebra::Point3;
use poli_obj::{extents, AttributeKind, ObjParser, SceneFraming};

const CUBE: &str = include_str!("data/cube.obj");

#[test]
fn cube() {
    let result = ObjParser::parse(CUBE, None).unwrap();

    assert_eq!(result.material_libraries, ["cube.mtl"]);
    assert!(result.unhandled.is_empty());
    assert_eq!(result.geometries.len(), 2);

    let sides = &result.geometries[0];
    let caps = &result.geometries[1];

    assert_eq!(sides.object, "Cube");
    assert_eq!(sides.groups, ["sides"]);
    assert_eq!(sides.material, "Paint");
    assert_eq!(caps.groups, ["caps"]);
    assert_eq!(caps.material, "Metal");

    // Quads become two triangles each.
    assert_eq!(sides.vertex_count(), 4 * 6);
    assert_eq!(caps.vertex_count(), 2 * 6);

    for geometry in &result.geometries {
        let vertices = geometry.vertex_count();

        assert_eq!(geometry.data.get(AttributeKind::Texcoord).map(<[f32]>::len), Some(vertices * 2));
        assert_eq!(geometry.data.get(AttributeKind::Normal).map(<[f32]>::len), Some(vertices * 3));
        assert!(!geometry.data.contains(AttributeKind::Color));
    }

    // The bottom face uses relative references to the last normal and the
    // bottom four positions.
    let bottom = &caps.positions()[18..];
    assert_eq!(&bottom[..3], [-0.5, -0.5, -0.5]);
    assert_eq!(
        &caps.data.get(AttributeKind::Normal).unwrap()[18..21],
        [0.0, -1.0, 0.0]
    );
}

#[test]
fn cube_extents_and_framing() {
    let result = ObjParser::parse(CUBE, None).unwrap();
    let extents = extents(&result.geometries);

    assert_eq!(extents.min, Point3::new(-0.5, -0.5, -0.5));
    assert_eq!(extents.max, Point3::new(0.5, 0.5, 0.5));

    let framing = SceneFraming::from_extents(&extents).unwrap();
    assert_eq!(framing.target, Point3::origin());
    assert!((framing.radius - 3.0f32.sqrt() * 1.2).abs() < 1e-5);
    assert!(framing.near < framing.far);
}

#[test]
fn unhandled_commands_do_not_stop_parsing() {
    let text = "v 0 0 0\nv 1 0 0\ncstype bspline\nv 0 1 0\nf 1 2 3\nend\n";
    let result = ObjParser::parse(text, None).unwrap();

    let keywords: Vec<_> = result.unhandled.iter().map(|u| u.keyword.as_str()).collect();
    assert_eq!(keywords, ["cstype", "end"]);
    assert_eq!(result.geometries[0].vertex_count(), 3);
}

#[test]
fn errors_name_the_line() {
    let error = ObjParser::parse("v 0 0 0\n\nf 1 1 9\n", None).unwrap_err();

    assert_eq!(
        error.to_string(),
        "line 3: position reference 9 is out of range, 1 defined"
    );
}
