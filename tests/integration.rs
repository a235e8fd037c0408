use polyviz_engine::Engine;
use polyviz_engine::complex::Arity;
use polyviz_engine::parse::model_json;
use polyviz_engine::scene::{DEFAULT_SHRINK_FACTOR, SceneData};

const MODEL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/model.json"));
const ATOMS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/result.json"));
const COLORS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/colors.json"));

fn sample_scene() -> SceneData {
    let complex = model_json::parse_model_str(MODEL).expect("parse model");
    let valuations = model_json::parse_valuations_str(ATOMS).expect("parse valuations");
    let colors = model_json::parse_colors_str(COLORS).expect("parse colors");
    SceneData::load(complex, valuations, Some(colors), DEFAULT_SHRINK_FACTOR).expect("build scene")
}

#[test]
fn engine_initializes() {
    let engine = Engine::new();
    assert!(engine.is_initialized());
}

#[test]
fn sample_model_counts_per_arity() {
    let complex = model_json::parse_model_str(MODEL).expect("parse model");

    assert_eq!(complex.points().len(), 5);
    assert_eq!(complex.simplex_count(), 7);
    assert_eq!(complex.count_of(Arity::Point), 2);
    assert_eq!(complex.count_of(Arity::Edge), 2);
    assert_eq!(complex.count_of(Arity::Triangle), 1);
    assert_eq!(complex.count_of(Arity::Tetrahedron), 1);

    // het vijfpuntige simplex telt mee in het totaal maar krijgt geen ariteit
    let drawn: usize = Arity::ALL.iter().map(|a| complex.count_of(*a)).sum();
    assert_eq!(drawn, 6);
}

#[test]
fn property_layers_follow_declaration_order() {
    let scene = sample_scene();
    let atoms: Vec<&str> = scene.properties().map(|(atom, _)| atom).collect();
    assert_eq!(atoms, ["reachable", "safe"]);
}

#[test]
fn reachable_layer_partitions_each_arity() {
    let scene = sample_scene();
    let layer = scene.property("reachable").expect("laag voor reachable");

    assert_eq!(layer.set.points.satisfying_count, 1);
    assert_eq!(layer.set.edges.satisfying_count, 2);
    assert_eq!(layer.set.triangles.satisfying_count, 0);
    assert_eq!(layer.set.tetrahedra.satisfying_count, 1);

    // buffergroottes volgen het aantal hoekpunten per ariteit
    assert_eq!(layer.set.points.positions.len(), 2);
    assert_eq!(layer.set.edges.positions.len(), 4);
    assert_eq!(layer.set.triangles.positions.len(), 3);
    assert_eq!(layer.set.tetrahedra.positions.len(), 12);
}

#[test]
fn safe_layer_keeps_simplex_counts_not_coordinate_counts() {
    let scene = sample_scene();
    let layer = scene.property("safe").expect("laag voor safe");

    // grenzen zijn simplexaantallen, nooit afgeleid van bufferlengtes
    assert_eq!(layer.set.edges.satisfying_count, 1);
    assert_eq!(layer.set.edges.colors.len(), 2);
    assert_eq!(layer.set.edges.positions.len(), 4);
    assert_eq!(layer.set.triangles.satisfying_count, 1);
}

#[test]
fn first_declared_color_wins_for_doubly_satisfied_simplices() {
    let scene = sample_scene();
    let layer = scene.property("safe").expect("laag voor safe");

    // randindex 3 vervult safe én reachable; safe staat eerst in de tabel
    assert_eq!(layer.set.edges.colors[0], 0x0000ff);
    // randindex 2 vervult alleen reachable
    assert_eq!(layer.set.edges.colors[1], 0x00ff00);
}

#[test]
fn unmatched_simplices_fall_back_to_the_arity_default() {
    let scene = sample_scene();
    let base = scene.base();

    // puntindex 1 vervult geen enkele propositie uit de kleurtabel
    assert_eq!(base.set.points.colors[1], 0x00ff00);
}

#[test]
fn engine_load_exposes_the_same_scene() {
    let mut engine = Engine::new();
    engine
        .load(MODEL, ATOMS, Some(COLORS.to_owned()))
        .expect("geldige documenten");

    let scene = engine.scene().expect("scène aanwezig");
    assert_eq!(scene.properties().count(), 2);
    assert_eq!(scene.shrink_factor(), DEFAULT_SHRINK_FACTOR);

    engine.set_shrink_factor(1.0).expect("geldige factor");
    let scene = engine.scene().unwrap();
    assert_eq!(scene.shrink_factor(), 1.0);

    // factor 1.0 reproduceert de oorspronkelijke hoekpunten van de tetraëder
    assert_eq!(scene.base().set.tetrahedra.positions[0], [0.0, 0.0, 0.0]);
}

#[test]
fn engine_load_refuses_mismatched_documents() {
    let mut engine = Engine::new();
    assert!(
        engine
            .load(MODEL, r#"{ "p": [true, false] }"#, None)
            .is_err()
    );
    assert!(engine.scene().is_none());
}
