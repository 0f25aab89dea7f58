mod common;

use common::*;
use replica_clone::{quiet, CloneConfig, FieldScope, ShapeDispatcher};
use replica_types::{Object, Value};

fn red_car_with_wheels(wheels: i64) -> Value {
    let car = Object::blank(car_type())
        .with("model", "Roadster")
        .and_then(|c| c.with("wheels", wheels))
        .unwrap();
    Value::from(car)
}

#[test]
fn test_declared_scope_skips_inherited_fields() {
    init_logging();
    let original = red_car_with_wheels(3);
    let clone = ShapeDispatcher::new().duplicate(&original).unwrap().unwrap();

    assert_eq!(clone.field("model"), Some(Value::text("Roadster")));
    // inherited slot keeps the constructor's value
    assert_eq!(clone.field("wheels"), Some(Value::Integer(4)));
}

#[test]
fn test_hierarchy_scope_copies_inherited_fields() {
    let config = CloneConfig::new().with_field_scope(FieldScope::Hierarchy);
    let original = red_car_with_wheels(3);
    let clone = ShapeDispatcher::with_config(config)
        .duplicate(&original)
        .unwrap()
        .unwrap();

    assert_eq!(clone.field("wheels"), Some(Value::Integer(3)));
    assert_eq!(clone, original);
}

#[test]
fn test_config_loaded_from_json() {
    let config = CloneConfig::from_json_str(
        r#"{ "access_override": false, "field_scope": "hierarchy" }"#,
    )
    .unwrap();
    let dispatcher = ShapeDispatcher::with_config(config);

    // private constructor is now out of reach
    assert_eq!(dispatcher.duplicate(&new_company()), Ok(None));

    let clone = dispatcher.duplicate(&red_car_with_wheels(6)).unwrap().unwrap();
    assert_eq!(clone.field("wheels"), Some(Value::Integer(6)));
}

#[test]
fn test_quiet_clone_with_config() {
    let dispatcher =
        ShapeDispatcher::with_config(CloneConfig::new().with_field_scope(FieldScope::Hierarchy));
    let clone = quiet::clone_with(&dispatcher, &red_car_with_wheels(2))
        .unwrap()
        .unwrap();
    assert_eq!(clone.field("wheels"), Some(Value::Integer(2)));
}
