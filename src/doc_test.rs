#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn stroke(points: &[(f64, f64)]) -> Stroke {
    Stroke {
        points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        line_width: 3.0,
        line_color: "#000000".to_owned(),
        timestamp: 1_700_000_000_000,
    }
}

fn document(strokes: Vec<Stroke>) -> SignatureDocument {
    SignatureDocument {
        strokes,
        width: 600.0,
        height: 200.0,
        background_color: "#ffffff".to_owned(),
        version: "1.0".to_owned(),
    }
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_serde_roundtrip() {
    let p = Point::new(10.5, -3.25);
    let serialized = serde_json::to_string(&p).unwrap();
    let back: Point = serde_json::from_str(&serialized).unwrap();
    assert_eq!(back, p);
}

#[test]
fn point_wire_shape() {
    let value = serde_json::to_value(Point::new(1.0, 2.0)).unwrap();
    assert_eq!(value, json!({"x": 1.0, "y": 2.0}));
}

// =============================================================
// Stroke serde
// =============================================================

#[test]
fn stroke_wire_field_names_are_camel_case() {
    let value = serde_json::to_value(stroke(&[(0.0, 0.0)])).unwrap();
    let obj = value.as_object().unwrap();
    assert!(obj.contains_key("points"));
    assert!(obj.contains_key("lineWidth"));
    assert!(obj.contains_key("lineColor"));
    assert!(obj.contains_key("timestamp"));
}

#[test]
fn stroke_serde_roundtrip() {
    let s = stroke(&[(10.0, 10.0), (20.0, 12.0)]);
    let serialized = serde_json::to_string(&s).unwrap();
    let back: Stroke = serde_json::from_str(&serialized).unwrap();
    assert_eq!(back, s);
}

#[test]
fn stroke_missing_style_takes_defaults() {
    let back: Stroke = serde_json::from_str(r#"{"points":[{"x":1.0,"y":2.0}]}"#).unwrap();
    assert_eq!(back.points.len(), 1);
    assert_eq!(back.line_width, 3.0);
    assert_eq!(back.line_color, "#000000");
    assert_eq!(back.timestamp, 0);
}

#[test]
fn single_point_stroke_is_not_a_polyline() {
    assert!(!stroke(&[(0.0, 0.0)]).is_polyline());
    assert!(stroke(&[(0.0, 0.0), (1.0, 1.0)]).is_polyline());
}

// =============================================================
// SignatureDocument serde
// =============================================================

#[test]
fn document_wire_field_names_are_camel_case() {
    let value = serde_json::to_value(document(vec![stroke(&[(0.0, 0.0)])])).unwrap();
    let obj = value.as_object().unwrap();
    assert!(obj.contains_key("strokes"));
    assert!(obj.contains_key("width"));
    assert!(obj.contains_key("height"));
    assert!(obj.contains_key("backgroundColor"));
    assert!(obj.contains_key("version"));
}

#[test]
fn document_serde_roundtrip() {
    let doc = document(vec![stroke(&[(10.0, 10.0), (20.0, 12.0), (30.0, 15.0)])]);
    let serialized = serde_json::to_string(&doc).unwrap();
    let back: SignatureDocument = serde_json::from_str(&serialized).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn document_defaults_fill_missing_fields() {
    let back: SignatureDocument = serde_json::from_str("{}").unwrap();
    assert!(back.strokes.is_empty());
    assert_eq!(back.width, 600.0);
    assert_eq!(back.height, 200.0);
    assert_eq!(back.background_color, "#ffffff");
    assert_eq!(back.version, "1.0");
}

#[test]
fn document_parses_published_wire_sample() {
    let input = r##"{ "strokes": [ { "points": [{"x":0,"y":0}], "lineWidth": 3,
        "lineColor": "#000000", "timestamp": 1234567890 } ],
        "width": 600, "height": 200, "backgroundColor": "#ffffff", "version": "1.0" }"##;
    let doc: SignatureDocument = serde_json::from_str(input).unwrap();
    assert_eq!(doc.strokes.len(), 1);
    assert_eq!(doc.strokes[0].points, vec![Point::new(0.0, 0.0)]);
    assert_eq!(doc.strokes[0].line_width, 3.0);
    assert_eq!(doc.strokes[0].timestamp, 1_234_567_890);
    assert_eq!(doc.width, 600.0);
}

// =============================================================
// is_valid
// =============================================================

#[test]
fn missing_document_is_never_valid() {
    assert!(!is_valid(None, 0));
    assert!(!is_valid(None, 1));
}

#[test]
fn zero_threshold_accepts_any_present_document() {
    let empty = document(Vec::new());
    assert!(is_valid(Some(&empty), 0));
}

#[test]
fn threshold_compares_stroke_count() {
    let doc = document(vec![stroke(&[(0.0, 0.0)]), stroke(&[(1.0, 1.0)])]);
    assert!(is_valid(Some(&doc), 1));
    assert!(is_valid(Some(&doc), 2));
    assert!(!is_valid(Some(&doc), 3));
}

// =============================================================
// DocState
// =============================================================

#[test]
fn new_state_is_empty() {
    let state = DocState::new(600.0, 200.0, "#ffffff".to_owned());
    assert!(!state.has_signature());
    assert!(state.is_empty());
    assert_eq!(state.len(), 0);
    assert!(state.snapshot().is_none());
}

#[test]
fn default_state_uses_crate_geometry() {
    let state = DocState::default();
    assert_eq!(state.width(), 600.0);
    assert_eq!(state.height(), 200.0);
    assert_eq!(state.background_color(), "#ffffff");
}

#[test]
fn push_stroke_sets_has_signature() {
    let mut state = DocState::default();
    state.push_stroke(stroke(&[(1.0, 1.0)]));
    assert!(state.has_signature());
    assert_eq!(state.len(), 1);
}

#[test]
fn snapshot_none_iff_empty() {
    let mut state = DocState::default();
    assert!(state.snapshot().is_none());
    state.push_stroke(stroke(&[(1.0, 1.0)]));
    assert!(state.snapshot().is_some());
    state.clear();
    assert!(state.snapshot().is_none());
}

#[test]
fn snapshot_copies_strokes_and_geometry() {
    let mut state = DocState::new(300.0, 100.0, "#eeeeee".to_owned());
    let s = stroke(&[(10.0, 10.0), (20.0, 12.0)]);
    state.push_stroke(s.clone());

    let snap = state.snapshot().unwrap();
    assert_eq!(snap.strokes, vec![s]);
    assert_eq!(snap.width, 300.0);
    assert_eq!(snap.height, 100.0);
    assert_eq!(snap.background_color, "#eeeeee");
    assert_eq!(snap.version, "1.0");
}

#[test]
fn clear_keeps_geometry() {
    let mut state = DocState::new(300.0, 100.0, "#eeeeee".to_owned());
    state.push_stroke(stroke(&[(1.0, 1.0)]));
    state.clear();
    assert!(state.is_empty());
    assert_eq!(state.width(), 300.0);
    assert_eq!(state.background_color(), "#eeeeee");
}

#[test]
fn load_replaces_strokes_wholesale() {
    let mut state = DocState::default();
    state.push_stroke(stroke(&[(1.0, 1.0)]));

    let incoming = document(vec![
        stroke(&[(5.0, 5.0), (6.0, 6.0)]),
        stroke(&[(7.0, 7.0)]),
    ]);
    state.load(incoming.clone());
    assert_eq!(state.strokes(), incoming.strokes.as_slice());
}

#[test]
fn load_adopts_document_geometry() {
    let mut state = DocState::default();
    let mut incoming = document(vec![stroke(&[(5.0, 5.0)])]);
    incoming.width = 320.0;
    incoming.height = 120.0;
    incoming.background_color = "#fafafa".to_owned();

    state.load(incoming);
    assert_eq!(state.width(), 320.0);
    assert_eq!(state.height(), 120.0);
    assert_eq!(state.background_color(), "#fafafa");
}

#[test]
fn set_geometry_keeps_strokes() {
    let mut state = DocState::default();
    state.push_stroke(stroke(&[(1.0, 1.0)]));
    state.set_geometry(800.0, 400.0, "#f0f0f0".to_owned());
    assert_eq!(state.width(), 800.0);
    assert_eq!(state.height(), 400.0);
    assert_eq!(state.len(), 1);
}
