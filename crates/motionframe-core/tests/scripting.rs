//! Scripting Tests
//!
//! Builds projects through the Rhai API and checks the resulting documents.

use motionframe_core::scripting::{self, ProjectHandle};
use motionframe_core::{Easing, MotionError, ShapeKind};
use rhai::Engine;

/// Authoring workflow.
///
/// Validates:
/// - Project settings and shape creation
/// - Keyframes with explicit and default easing
/// - Canned animations land in the keyframe list
#[test]
fn script_builds_project() {
    let script = r##"
let p = new_project("Intro", 1280, 720, 24);
p.set_duration(3000);
p.set_background("#101010");

let ball = p.add_circle(#{ id: "ball", x: 100, y: 300, fill: "#ff0000" });
ball.key(0, #{ x: 100 }, "linear");
ball.key(1000, #{ x: 500 }, "linear");

let label = p.add_text("Hello", #{ x: 640, y: 80 });
label.fade(2000, 1000);

let panel = p.add_rect(#{});
panel.rotate(0, 1000, 2);
p
"##;

    let project = scripting::run_script(script).unwrap();
    assert_eq!(project.name, "Intro");
    assert_eq!((project.width, project.height, project.fps), (1280, 720, 24));
    assert_eq!(project.duration, 3000.0);
    assert_eq!(project.background_color, "#101010");
    assert_eq!(project.shapes.len(), 3);

    let ball = project.shape("ball").unwrap();
    assert_eq!(ball.kind, ShapeKind::Circle);
    assert_eq!(ball.fill, "#ff0000");
    assert_eq!(project.keyframes_for("ball").count(), 2);
    assert!(project
        .keyframes_for("ball")
        .all(|k| k.easing == Easing::Linear));

    let label_id = &project.shapes[1].id;
    assert_eq!(project.shapes[1].text.as_deref(), Some("Hello"));
    assert_eq!(project.keyframes_for(label_id).count(), 2);
    assert_eq!(project.keyframes.len(), 6);
}

#[test]
fn sample_returns_interpolated_map() {
    let mut engine = Engine::new();
    scripting::register_rhai_api(&mut engine);

    let x = engine
        .eval::<f64>(
            r#"
let p = new_project();
let s = p.add_circle(#{});
s.key(0, #{ x: 0.0 }, "linear");
s.key(1000, #{ x: 100.0 }, "linear");
s.sample(250).x
"#,
        )
        .unwrap();
    assert!((x - 25.0).abs() < 1e-9);

    let empty = engine
        .eval::<i64>("let p = new_project(); let s = p.add_rect(#{}); s.sample(0).len()")
        .unwrap();
    assert_eq!(empty, 0);
}

#[test]
fn default_key_easing_is_ease_in_out() {
    let mut engine = Engine::new();
    scripting::register_rhai_api(&mut engine);

    let handle = engine
        .eval::<ProjectHandle>(
            r#"
let p = new_project();
let s = p.add_circle(#{ x: 10 });
s.key(500, #{ opacity: 0.5 });
s.capture(900);
p
"#,
        )
        .unwrap();
    let project = handle.with(|s| s.project().clone());
    assert_eq!(project.keyframes.len(), 2);
    assert!(project
        .keyframes
        .iter()
        .all(|k| k.easing == Easing::EaseInOut));
    let captured = project.keyframes.iter().find(|k| k.time == 900.0).unwrap();
    assert_eq!(captured.properties.x, Some(10.0));
}

#[test]
fn deleting_shape_drops_its_keyframes() {
    let project = scripting::run_script(
        r#"
let p = new_project();
let a = p.add_circle(#{});
let b = p.add_rect(#{});
a.bounce(0, 800);
b.pulse(0, 600);
a.delete();
p
"#,
    )
    .unwrap();
    assert_eq!(project.shapes.len(), 1);
    assert_eq!(project.keyframes.len(), 3);
}

#[test]
fn bad_property_is_a_script_error() {
    let result = scripting::run_script(
        r#"
let p = new_project();
p.add_circle(#{ wobble: 3 });
p
"#,
    );
    match result {
        Err(MotionError::Script(message)) => assert!(message.contains("wobble")),
        other => panic!("expected script error, got {:?}", other.map(|p| p.name)),
    }
}

#[test]
fn duplicate_shape_id_is_rejected() {
    let result = scripting::run_script(
        r#"
let p = new_project();
p.add_circle(#{ id: "dup" });
p.add_rect(#{ id: "dup" });
p
"#,
    );
    assert!(matches!(result, Err(MotionError::Script(_))));
}

#[test]
fn polygon_points_become_vertices() {
    let project = scripting::run_script(
        r#"
let p = new_project();
p.add_polygon([#{ x: 0, y: 0 }, #{ x: 40, y: 0 }, #{ x: 20.5, y: 30 }], #{ id: "tri" });
p
"#,
    )
    .unwrap();
    let vertices = project.shape("tri").unwrap().vertices.clone().unwrap();
    assert_eq!(vertices.len(), 3);
    assert_eq!((vertices[2].x, vertices[2].y), (20.5, 30.0));

    let missing_y = scripting::run_script(
        r#"
let p = new_project();
p.add_polygon([#{ x: 0 }], #{});
p
"#,
    );
    match missing_y {
        Err(MotionError::Script(message)) => assert!(message.contains("'y'")),
        other => panic!("expected script error, got {:?}", other.map(|p| p.name)),
    }
}
