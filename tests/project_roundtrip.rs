use motionframe::scripting::ProjectHandle;
use motionframe::{CannedAnimation, Easing, Project, PropertyPatch, Session, Shape};
use rhai::Engine;

#[test]
fn saved_project_reloads_with_same_animation() {
    let mut session = Session::new(Project::new("Roundtrip"));
    session.add_shape(Shape::circle("ball", 100.0, 200.0));
    session.add_shape(Shape::rectangle("card", 400.0, 300.0).with_z_index(1));
    session
        .apply_animation("ball", &CannedAnimation::bounce(), 0.0, 800.0)
        .unwrap();
    session
        .add_keyframe("card", 0.0, PropertyPatch::opacity(0.0), Easing::EaseOut)
        .unwrap();
    session
        .add_keyframe(
            "card",
            600.0,
            PropertyPatch::opacity(1.0).with_fill("#ff00ff"),
            Easing::EaseOut,
        )
        .unwrap();

    let json = session.project().to_json().unwrap();
    assert!(json.contains("\"shapeId\""));
    assert!(json.contains("\"ease-out\""));

    let reloaded = Session::new(Project::from_json(&json).unwrap());
    for time in [0.0, 100.0, 333.0, 600.0, 1200.0] {
        let before = session.frame_at(time);
        let after = reloaded.frame_at(time);
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(&after) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.fill, b.fill);
            assert!((a.y - b.y).abs() < 1e-9);
            assert!((a.opacity - b.opacity).abs() < 1e-9);
        }
    }
}

#[test]
fn editor_json_loads_with_defaults() {
    let json = r##"{
        "id": "p1",
        "name": "From Editor",
        "shapes": [
            { "id": "s1", "type": "circle", "x": 10, "y": 20, "radius": 30,
              "fill": "#4c6ef5", "stroke": "#364fc7", "strokeWidth": 2 }
        ],
        "keyframes": [
            { "id": "k1", "time": 0, "shapeId": "s1", "properties": { "x": 10 }, "easing": "linear" },
            { "id": "k2", "time": 1000, "shapeId": "s1", "properties": { "x": 110 }, "easing": "spring-ish" }
        ]
    }"##;

    let project = Project::from_json(json).unwrap();
    assert_eq!(project.fps, 30);
    assert_eq!((project.width, project.height), (1920, 1080));
    assert_eq!(project.background_color, "#000000");
    assert_eq!(project.keyframes[1].easing, Easing::Linear);

    let session = Session::new(project);
    let x = session.evaluate("s1", 250.0).unwrap().x.unwrap();
    assert!((x - 35.0).abs() < 1e-9);
}

#[test]
fn script_session_plays_back() {
    let mut engine = Engine::new();
    motionframe::scripting::register_rhai_api(&mut engine);

    let handle = engine
        .eval::<ProjectHandle>(
            r#"
let p = new_project("Playback");
p.set_duration(2000);
let s = p.add_circle(#{ id: "dot" });
s.key(0, #{ x: 0 }, "linear");
s.key(2000, #{ x: 200 }, "linear");
p
"#,
        )
        .unwrap();

    handle.with(|session| {
        session.playhead.play();
        session.tick(500.0);
        let frame = session.current_frame();
        assert!((frame[0].x - 50.0).abs() < 1e-9);

        session.tick(1600.0);
        assert_eq!(session.playhead.current_time, 0.0);
        assert!(!session.playhead.playing);
    });
}
