use std::cell::RefCell;
use std::rc::Rc;

use tweenkit_core::{
    Animatable, CancelPolicy, Config, CoreEvent, Curve, Diagnostic, Inputs, LoopSpec,
    PropertyStep, Repeat, Runner, TargetRef, Timeline, TweenCommand, TweenId, Value,
};

#[derive(Default)]
struct Slider {
    x: f32,
    freed: bool,
}

impl Animatable for Slider {
    fn is_alive(&self) -> bool {
        !self.freed
    }
    fn read(&self, _property: &str) -> Option<Value> {
        Some(Value::Float(self.x))
    }
    fn write(&mut self, _property: &str, value: Value) {
        if let Value::Float(v) = value {
            self.x = v;
        }
    }
}

fn slider() -> Rc<RefCell<Slider>> {
    Rc::new(RefCell::new(Slider::default()))
}

fn slide(node: &Rc<RefCell<Slider>>, to: f32, duration: f32) -> Timeline {
    let step = PropertyStep::new(
        TargetRef::new(node),
        "x",
        Value::Float(0.0),
        Value::Float(to),
        duration,
        Curve::LINEAR,
    )
    .expect("float step");
    Timeline::builder().then(step).build()
}

fn nudge_loop(node: &Rc<RefCell<Slider>>, repeat: Repeat) -> LoopSpec {
    let target = TargetRef::new(node);
    let t = target.clone();
    LoopSpec::new(target, repeat, move || {
        let x = t.read("x")?.as_float()?;
        let step = PropertyStep::new(t.clone(), "x", Value::Float(x), Value::Float(x + 1.0), 0.5, Curve::LINEAR).ok()?;
        Some(Timeline::builder().then(step).build())
    })
}

fn tick(runner: &mut Runner, dt: f32) -> Vec<CoreEvent> {
    runner.update(dt, Inputs::none()).events.clone()
}

#[test]
fn independent_tweens_finish_on_their_own_schedule() {
    let (a_node, b_node) = (slider(), slider());
    let mut runner = Runner::default();
    let a = runner.play(slide(&a_node, 1.0, 0.5));
    let b = runner.play(slide(&b_node, 1.0, 1.0));

    assert_eq!(
        tick(&mut runner, 0.25),
        vec![CoreEvent::Started { id: a }, CoreEvent::Started { id: b }]
    );
    assert_eq!(tick(&mut runner, 0.25), vec![CoreEvent::Finished { id: a }]);
    assert!(!runner.is_active(a));
    assert_eq!(runner.active_count(), 1);
    assert!(tick(&mut runner, 0.25).is_empty());
    assert_eq!(tick(&mut runner, 0.25), vec![CoreEvent::Finished { id: b }]);
    assert_eq!(a_node.borrow().x, 1.0);
    assert_eq!(b_node.borrow().x, 1.0);
    assert_eq!(runner.active_count(), 0);
}

#[test]
fn ids_are_not_reused() {
    let node = slider();
    let mut runner = Runner::default();
    let first = runner.play(Timeline::default());
    tick(&mut runner, 0.1);
    let second = runner.play(slide(&node, 1.0, 1.0));
    assert_ne!(first, second);
}

#[test]
fn cancel_command_stops_one_shot_without_further_writes() {
    let node = slider();
    let mut runner = Runner::default();
    let id = runner.play(slide(&node, 1.0, 1.0));
    tick(&mut runner, 0.25);
    let out = runner.update(0.25, Inputs::none().with(TweenCommand::Cancel { id }));
    assert_eq!(out.events, vec![CoreEvent::Cancelled { id }]);
    assert_eq!(node.borrow().x, 0.25);
    tick(&mut runner, 0.25);
    assert_eq!(node.borrow().x, 0.25);
    assert!(!runner.is_active(id));
}

#[test]
fn pause_resume_and_speed_commands() {
    let node = slider();
    let mut runner = Runner::default();
    let id = runner.play(slide(&node, 1.0, 1.0));
    runner.update(0.25, Inputs::none().with(TweenCommand::Pause { id }));
    assert_eq!(node.borrow().x, 0.0);
    tick(&mut runner, 0.25);
    assert_eq!(node.borrow().x, 0.0);

    let inputs = Inputs::none()
        .with(TweenCommand::Resume { id })
        .with(TweenCommand::SetSpeed { id, speed: 2.0 });
    runner.update(0.25, inputs);
    assert_eq!(node.borrow().x, 0.5);
    assert_eq!(tick(&mut runner, 0.25), vec![CoreEvent::Finished { id }]);
}

#[test]
fn time_scale_slows_every_tween() {
    let node = slider();
    let cfg = Config {
        time_scale: 0.5,
        ..Config::default()
    };
    let mut runner = Runner::new(cfg);
    let id = runner.play(slide(&node, 1.0, 0.5));
    for _ in 0..3 {
        tick(&mut runner, 0.25);
    }
    assert!(runner.is_active(id));
    assert_eq!(node.borrow().x, 0.75);
    assert_eq!(tick(&mut runner, 0.25), vec![CoreEvent::Finished { id }]);
}

#[test]
fn loop_reports_each_iteration_then_stops() {
    let node = slider();
    let mut runner = Runner::default();
    let id = runner.play_loop(nudge_loop(&node, Repeat::Times(2)));
    assert_eq!(tick(&mut runner, 0.25), vec![CoreEvent::Started { id }]);
    assert_eq!(
        tick(&mut runner, 0.25),
        vec![CoreEvent::LoopIteration { id, completed: 1 }]
    );
    assert!(tick(&mut runner, 0.25).is_empty());
    assert_eq!(
        tick(&mut runner, 0.25),
        vec![
            CoreEvent::LoopIteration { id, completed: 2 },
            CoreEvent::LoopStopped { id, completed: 2 },
        ]
    );
    assert_eq!(node.borrow().x, 2.0);
    assert!(!runner.is_active(id));
}

#[test]
fn loop_cancel_follows_configured_policy() {
    let node = slider();
    let cfg = Config {
        cancel_policy: CancelPolicy::Immediate,
        ..Config::default()
    };
    let mut runner = Runner::new(cfg);
    let id = runner.play_loop(nudge_loop(&node, Repeat::Infinite));
    tick(&mut runner, 0.25);
    runner.cancel(id);
    assert_eq!(
        tick(&mut runner, 0.25),
        vec![CoreEvent::LoopStopped { id, completed: 0 }]
    );
    assert_eq!(node.borrow().x, 0.5);

    let node = slider();
    let mut runner = Runner::default();
    let id = runner.play_loop(nudge_loop(&node, Repeat::Infinite));
    tick(&mut runner, 0.25);
    runner.cancel(id);
    // the single stage still runs to its end value, completing the cycle
    assert!(tick(&mut runner, 0.125).is_empty());
    assert_eq!(
        tick(&mut runner, 0.125),
        vec![
            CoreEvent::LoopIteration { id, completed: 1 },
            CoreEvent::LoopStopped { id, completed: 1 },
        ]
    );
    assert_eq!(node.borrow().x, 1.0);
}

#[test]
fn degenerate_duration_is_reported_as_an_event() {
    let node = slider();
    let mut runner = Runner::default();
    let id = runner.play(slide(&node, 3.0, 0.0));
    let events = tick(&mut runner, 0.016);
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], CoreEvent::Started { id });
    assert!(matches!(
        &events[1],
        CoreEvent::Diagnostic {
            diagnostic: Diagnostic::DegenerateDuration { .. },
            ..
        }
    ));
    assert_eq!(events[2], CoreEvent::Finished { id });
    assert_eq!(node.borrow().x, 3.0);
}

#[test]
fn freed_target_cancels_with_a_diagnostic() {
    let node = slider();
    let mut runner = Runner::default();
    let id = runner.play(slide(&node, 1.0, 1.0));
    tick(&mut runner, 0.25);
    node.borrow_mut().freed = true;
    let events = tick(&mut runner, 0.25);
    assert!(matches!(
        events.as_slice(),
        [
            CoreEvent::Diagnostic {
                diagnostic: Diagnostic::InvalidTarget { .. },
                ..
            },
            CoreEvent::Cancelled { .. },
        ]
    ));
    assert_eq!(node.borrow().x, 0.25);
    assert!(!runner.is_active(id));
}

#[test]
fn events_over_the_cap_are_counted_not_kept() {
    let cfg = Config {
        max_events_per_tick: 1,
        ..Config::default()
    };
    let mut runner = Runner::new(cfg);
    let a = runner.play(Timeline::default());
    runner.play(Timeline::default());
    let out = runner.update(0.1, Inputs::none());
    assert_eq!(out.events, vec![CoreEvent::Started { id: a }]);
    assert_eq!(out.dropped_events, 3);
    assert_eq!(runner.active_count(), 0);
}

#[test]
fn commands_for_finished_tweens_are_ignored() {
    let mut runner = Runner::default();
    let id = runner.play(Timeline::default());
    tick(&mut runner, 0.1);
    let out = runner.update(0.1, Inputs::none().with(TweenCommand::Pause { id }));
    assert!(out.is_empty());
    let out = runner.update(0.1, Inputs::none().with(TweenCommand::Cancel { id: TweenId(42) }));
    assert!(out.is_empty());
}
