use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tweenkit_core::{
    parse_stored_timeline_json, parse_stored_timeline_json_with, AnimationHandle, Animatable,
    Config, Curve, Diagnostic, Direction, Family, Stage, TargetRef, Value,
};
use tweenkit_test_fixtures as fixtures;

#[derive(Default)]
struct Sprite {
    props: HashMap<String, Value>,
}

impl Animatable for Sprite {
    fn read(&self, property: &str) -> Option<Value> {
        self.props.get(property).copied()
    }
    fn write(&mut self, property: &str, value: Value) {
        self.props.insert(property.to_string(), value);
    }
}

fn sprite() -> Rc<RefCell<Sprite>> {
    let mut s = Sprite::default();
    s.props.insert("scale".into(), Value::Vec2([1.0, 1.0]));
    s.props.insert("alpha".into(), Value::Float(1.0));
    Rc::new(RefCell::new(s))
}

#[test]
fn every_fixture_parses_against_a_live_sprite() {
    let node = sprite();
    let target = TargetRef::new(&node);
    for key in fixtures::timelines::keys() {
        let json = fixtures::timelines::json(&key).expect("fixture json");
        let tl = parse_stored_timeline_json(&json, &target)
            .unwrap_or_else(|e| panic!("fixture {key} failed: {e}"));
        assert!(tl.stage_count() > 0, "{key} has stages");
    }
}

#[test]
fn fade_out_fixture_plays_to_zero() {
    let node = sprite();
    let json = fixtures::timelines::json("fade_out").unwrap();
    let tl = parse_stored_timeline_json(&json, &TargetRef::new(&node)).unwrap();
    assert_eq!(tl.name(), Some("fade_out"));
    let mut handle = AnimationHandle::new(tl);
    for _ in 0..4 {
        handle.poll(0.1);
    }
    assert!(handle.is_finished());
    assert_eq!(node.borrow().props["alpha"], Value::Float(0.0));
}

#[test]
fn pulse_reads_missing_start_from_the_target() {
    let node = sprite();
    node.borrow_mut()
        .props
        .insert("scale".into(), Value::Vec2([0.5, 0.5]));
    let json = fixtures::timelines::json("pulse").unwrap();
    let tl = parse_stored_timeline_json(&json, &TargetRef::new(&node)).unwrap();
    let Some(Stage::Single(first)) = tl.stage(0) else {
        panic!("pulse starts with a single step");
    };
    assert_eq!(first.from(), Value::Vec2([0.5, 0.5]));
    assert_eq!(first.curve(), Curve::new(Family::Quadratic, Direction::Out));
}

#[test]
fn host_style_tokens_are_understood() {
    let node = sprite();
    let json = fixtures::timelines::json("slide_and_tint").unwrap();
    let tl = parse_stored_timeline_json(&json, &TargetRef::new(&node)).unwrap();
    let Some(Stage::Parallel(steps)) = tl.stage(0) else {
        panic!("parallel first stage");
    };
    assert_eq!(steps[0].curve(), Curve::new(Family::Cubic, Direction::Out));
    assert_eq!(steps[1].to(), Value::Color([1.0, 0.5, 0.5, 1.0]));
    assert_eq!(tl.total_duration(), 1.0);
    assert!(tl.diagnostics().is_empty());
}

#[test]
fn unknown_tokens_surface_as_diagnostics() {
    let node = sprite();
    let json = fixtures::timelines::json("unknown_tokens").unwrap();
    let tl = parse_stored_timeline_json(&json, &TargetRef::new(&node)).unwrap();
    let Some(Stage::Single(step)) = tl.stage(0) else {
        panic!("single stage");
    };
    assert_eq!(step.curve(), Curve::default());
    let tokens: Vec<&str> = tl
        .diagnostics()
        .iter()
        .filter_map(|d| match d {
            Diagnostic::UnrecognizedCurveToken { token, .. } => Some(token.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(tokens, vec!["spiral", "sideways"]);
}

#[test]
fn config_default_curve_applies_when_tokens_missing() {
    let cfg = Config {
        default_curve: Curve::new(Family::Bounce, Direction::Out),
        ..Config::default()
    };
    let json = r#"{ "stages": [ { "property": "alpha", "from": 1, "to": 0, "duration": 1 } ] }"#;
    let tl = parse_stored_timeline_json_with(json, &TargetRef::detached(), &cfg).unwrap();
    let Some(Stage::Single(step)) = tl.stage(0) else {
        panic!("single stage");
    };
    assert_eq!(step.curve(), cfg.default_curve);
}

#[test]
fn config_fixtures_deserialize() {
    let slow: Config = fixtures::configs::load("slow_motion").unwrap();
    assert_eq!(slow.time_scale, 0.5);
    let immediate: Config = fixtures::configs::load("immediate_cancel").unwrap();
    assert_eq!(immediate.max_events_per_tick, 8);
}
