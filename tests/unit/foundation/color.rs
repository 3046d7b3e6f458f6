use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    let c = Color::parse("#a855f7").unwrap();
    assert_eq!(c.to_rgba8(), [0xa8, 0x55, 0xf7, 255]);

    let c = Color::parse("#fff").unwrap();
    assert_eq!(c.to_rgba8(), [255, 255, 255, 255]);

    let c = Color::parse("#0000ff80").unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);
}

#[test]
fn parses_rgba_function() {
    let c = Color::parse("rgba(168, 85, 247, 0.2)").unwrap();
    assert_eq!(c.to_rgba8()[..3], [168, 85, 247]);
    assert!((c.a - 0.2).abs() < 1e-9);

    let c = Color::parse("rgb(10,20,30)").unwrap();
    assert_eq!(c.to_rgba8(), [10, 20, 30, 255]);
}

#[test]
fn rejects_garbage() {
    assert!(Color::parse("purple").is_err());
    assert!(Color::parse("#12345").is_err());
    assert!(Color::parse("#zzzzzz").is_err());
    assert!(Color::parse("rgba(1, 2)").is_err());
}

#[test]
fn json_accepts_string_object_and_array() {
    let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Color::rgba(1.0, 0.0, 0.0, 1.0));

    let c: Color = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 1.0));

    let c: Color = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 0.9));
}

#[test]
fn css_text_survives_json() {
    let opaque = Color::parse("#a855f7").unwrap();
    assert_eq!(opaque.to_css(), "#a855f7");
    assert_eq!(serde_json::to_value(opaque).unwrap(), json!("#a855f7"));

    let faded = Color::from_rgb8(168, 85, 247).with_alpha(0.2);
    assert_eq!(faded.to_css(), "rgba(168, 85, 247, 0.2)");
    let back: Color = serde_json::from_value(serde_json::to_value(faded).unwrap()).unwrap();
    assert_eq!(back.to_rgba8(), faded.to_rgba8());
}
