//! # Diagram Integration Tests
//!
//! Whole documents built through the standard library and rendered end to
//! end: noise wiring, incremental rendering, per-output rendering, normal
//! maps, inputs and build errors.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use texel_flow::{
    Color, Diagram, FlowError, FunctionKind, FunctionLibrary, Pixel, Value, ValueType,
};
use texel_shared::Vec2;

const TWO_OUTPUTS: &str = r#"
    [diagram]
    name = "two"
    width = 8
    height = 4

    [[nodes]]
    id = "uv"
    function = "coordinates.uv"

    [[nodes]]
    id = "noise"
    function = "noise2d.perlin_tiled_xy"
    args = { point = { node = "uv" }, frequency = 2, octaves = 3 }

    [[nodes]]
    id = "v"
    function = "coordinates.v"

    [[nodes]]
    id = "ramp"
    function = "input.gradient"
    args = { name = "Ramp", value = { keys = [
        { time = 0.0, color = [0.0, 0.0, 0.0] },
        { time = 1.0, color = [1.0, 0.5, 0.25, 1.0] },
    ] } }

    [[nodes]]
    id = "colored"
    function = "colors.gradient"
    args = { gradient = { node = "ramp" }, t = { node = "noise" } }

    [[nodes]]
    id = "noise_out"
    function = "output.color"
    args = { color = { node = "colored" } }

    [[nodes]]
    id = "v_out"
    function = "output.value"
    args = { value = { node = "v" } }

    [[outputs]]
    name = "Noise"
    node = "noise_out"

    [[outputs]]
    name = "V"
    node = "v_out"
    kind = "alpha"
"#;

fn build(text: &str) -> Result<Diagram, FlowError> {
    Diagram::from_toml_str(text, &FunctionLibrary::standard())
}

fn buffers_for(diagram: &Diagram) -> Vec<Vec<Color>> {
    vec![vec![Color::CLEAR; diagram.pixel_count()]; diagram.outputs().len()]
}

#[test]
fn test_document_renders_every_output() {
    let diagram = build(TWO_OUTPUTS).expect("diagram builds");
    assert_eq!(diagram.name(), "two");
    assert_eq!(diagram.outputs().len(), 2);
    assert_eq!(diagram.input_type("Ramp"), Some(ValueType::Gradient));

    let buffers = diagram.render().expect("render succeeds");
    for pixel in &buffers[0] {
        assert!(
            (0.0..=1.0).contains(&pixel.r) && pixel.a == 1.0,
            "gradient colors stay inside the ramp: {pixel:?}"
        );
    }
    for row in 0..4 {
        let v = (row as f32 + 0.5) * 0.25;
        assert_eq!(buffers[1][row * 8 + 3], Color::splat(v), "row {row}");
    }
}

#[test]
fn test_incremental_rows_match_full_fill() {
    let diagram = build(TWO_OUTPUTS).expect("diagram builds");
    let mut full = buffers_for(&diagram);
    diagram.fill(&mut full).expect("fill");

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut chunked = buffers_for(&diagram);
    let mut row = 0;
    while row < diagram.height() {
        let count = rng.gen_range(1..3);
        row = diagram.fill_rows(&mut chunked, row, count).expect("fill rows");
    }
    assert_eq!(row, diagram.height());
    assert_eq!(full, chunked, "row-by-row rendering must match a single pass");
}

#[test]
fn test_fill_output_matches_fill() {
    let diagram = build(TWO_OUTPUTS).expect("diagram builds");
    let mut full = buffers_for(&diagram);
    diagram.fill(&mut full).expect("fill");

    let mut single = vec![Color::CLEAR; diagram.pixel_count()];
    diagram.fill_output(&mut single, 1).expect("fill output");
    assert_eq!(single, full[1]);

    diagram.fill_output(&mut single, 42).expect("out of range index");
    assert_eq!(single, full[0], "out-of-range index falls back to output 0");
}

#[test]
fn test_clones_render_independently_across_threads() {
    let diagram = build(TWO_OUTPUTS).expect("diagram builds");
    let mut inverted = diagram.clone();
    let reversed = texel_flow::Gradient::new(vec![
        texel_flow::GradientKey {
            time: 0.0,
            color: Color::WHITE,
        },
        texel_flow::GradientKey {
            time: 1.0,
            color: Color::BLACK,
        },
    ]);
    inverted
        .set_input("Ramp", Value::Gradient(std::sync::Arc::new(reversed)))
        .expect("gradient input");

    let (a, b) = std::thread::scope(|scope| {
        let a = scope.spawn(|| diagram.render().expect("render"));
        let b = scope.spawn(|| inverted.render().expect("render"));
        (a.join().expect("thread a"), b.join().expect("thread b"))
    });
    assert_eq!(a[1], b[1], "untouched output is identical");
    assert_ne!(a[0], b[0], "changed input changes the colored output");
    assert_eq!(a, diagram.render().expect("render"), "rendering is deterministic");
}

#[test]
fn test_normal_map_outputs() {
    let document = |format: &str| {
        format!(
            r#"
            [diagram]
            width = 4
            height = 4
            normal_format = "{format}"

            [[nodes]]
            id = "flat"
            function = "output.color"
            args = {{ color = [0.2, 0.4, 0.6, 0.5] }}

            [[outputs]]
            name = "Normals"
            node = "flat"
            kind = "normal_map"
            filtering = "smooth"
            strength = 4.0
            "#
        )
    };

    let dxt = build(&document("automatic")).expect("diagram builds").render().expect("render");
    assert!(dxt[0].iter().all(|&c| c == Color::new(1.0, 0.5, 1.0, 0.5)), "{:?}", dxt[0][0]);

    let rgb = build(&document("rgb")).expect("diagram builds").render().expect("render");
    assert!(rgb[0].iter().all(|&c| c == Color::new(0.5, 0.5, 1.0, 0.5)), "{:?}", rgb[0][0]);
}

#[test]
fn test_every_function_computes_its_return_type() {
    let library = FunctionLibrary::standard();
    let pixel = Pixel {
        x: 3,
        y: 5,
        uv: Vec2::new(0.3, 0.7),
    };
    for (id, kind) in library.iter() {
        let args: Vec<Value> = (0..kind.properties().len())
            .filter_map(|index| kind.default_argument(index))
            .collect();
        let result = kind.compute(&args, &pixel);
        assert_eq!(result.value_type(), kind.return_type(), "{id}");
        if matches!(kind, FunctionKind::Output(_)) {
            assert!(id.starts_with("output."), "{id}");
        }
    }
}

#[test]
fn test_build_errors() {
    let cases = [
        (
            r#"
            [[nodes]]
            id = "a"
            function = "floats.nothing"
            "#,
            "unknown function",
        ),
        (
            r#"
            [[nodes]]
            id = "a"
            function = "floats.add"
            [[nodes]]
            id = "a"
            function = "floats.add"
            "#,
            "duplicate node",
        ),
        (
            r#"
            [[nodes]]
            id = "a"
            function = "floats.add"
            args = { z = 1.0 }
            "#,
            "unknown argument",
        ),
        (
            r#"
            [[nodes]]
            id = "a"
            function = "ints.add"
            args = { a = 1.5 }
            "#,
            "invalid literal",
        ),
        (
            r#"
            [[nodes]]
            id = "a"
            function = "floats.add"
            args = { a = { node = "ghost" } }
            "#,
            "unknown node",
        ),
        (
            r#"
            [[nodes]]
            id = "a"
            function = "floats.add"
            [[outputs]]
            name = "A"
            node = "a"
            "#,
            "not an output",
        ),
        (
            r#"
            [[nodes]]
            id = "i"
            function = "input.float"
            args = { value = 1.0 }
            "#,
            "input without a name",
        ),
        (
            r#"
            [diagram]
            width = 0
            "#,
            "zero width",
        ),
        ("nodes = 3", "schema mismatch"),
    ];
    for (text, label) in cases {
        let result = build(text);
        assert!(result.is_err(), "{label} must be rejected");
    }

    assert!(matches!(
        build(cases[4].0),
        Err(FlowError::UnknownNode { reference, .. }) if reference == "ghost"
    ));
    assert!(matches!(build(cases[5].0), Err(FlowError::NotAnOutput { .. })));
    assert!(matches!(build(cases[8].0), Err(FlowError::Parse(_))));
}

#[test]
fn test_document_without_outputs_renders_nothing() {
    let diagram = build(
        r#"
        [[nodes]]
        id = "a"
        function = "floats.add"
        "#,
    )
    .expect("diagram builds");
    assert!(diagram.outputs().is_empty());
    let mut none: Vec<Vec<Color>> = Vec::new();
    assert_eq!(diagram.fill_rows(&mut none, 0, 1), Ok(diagram.height()));
}

#[test]
fn test_load_reports_missing_file() {
    let err = Diagram::load("/definitely/not/here.toml", &FunctionLibrary::standard())
        .expect_err("missing file");
    assert!(matches!(err, FlowError::Io { .. }), "{err}");
}

const MASK: &str = r#"
    [diagram]
    name = "mask"
    width = 8
    height = 2

    [[nodes]]
    id = "x"
    function = "coordinates.x"

    [[nodes]]
    id = "left"
    function = "booleans.int_less"
    args = { a = { node = "x" }, b = 4 }

    [[nodes]]
    id = "invert"
    function = "input.bool"
    args = { name = "Invert", value = false }

    [[nodes]]
    id = "pick"
    function = "booleans.not_equal"
    args = { a = { node = "left" }, b = { node = "invert" } }

    [[nodes]]
    id = "shade"
    function = "booleans.choose_color"
    args = { pick_a = { node = "pick" }, a = [1.0, 1.0, 1.0], b = [0.0, 0.0, 0.0, 1.0] }

    [[nodes]]
    id = "out"
    function = "output.color"
    args = { color = { node = "shade" } }
"#;

#[test]
fn test_boolean_input_switches_branches() {
    let mut diagram = build(MASK).expect("diagram builds");
    assert_eq!(diagram.input_type("Invert"), Some(ValueType::Bool));

    let plain = diagram.render().expect("render");
    for (index, pixel) in plain[0].iter().enumerate() {
        let expected = if index % 8 < 4 { Color::WHITE } else { Color::BLACK };
        assert_eq!(*pixel, expected, "pixel {index}");
    }

    diagram.set_input("Invert", Value::Bool(true)).expect("bool input");
    let inverted = diagram.render().expect("render");
    for (index, pixel) in inverted[0].iter().enumerate() {
        let expected = if index % 8 < 4 { Color::BLACK } else { Color::WHITE };
        assert_eq!(*pixel, expected, "inverted pixel {index}");
    }
}
