//! Frame Export Tests
//!
//! Frame stepping, progress reporting and cancellation.

use anyhow::Result;
use motionframe_core::export::{frame_count, FrameCollector, JsonLinesSink};
use motionframe_core::{
    export_frames, CancelToken, Easing, ExportSettings, Frame, FrameSink, MotionError, Project,
    PropertyPatch, Session, Shape,
};

fn session() -> Session {
    let mut project = Project::new("Export");
    project.duration = 1000.0;
    project.fps = 10;
    let mut session = Session::new(project);
    session.add_shape(Shape::circle("dot", 0.0, 0.0));
    session
        .add_keyframe("dot", 0.0, PropertyPatch::new().with_x(0.0), Easing::Linear)
        .unwrap();
    session
        .add_keyframe("dot", 1000.0, PropertyPatch::new().with_x(100.0), Easing::Linear)
        .unwrap();
    session
}

#[test]
fn exports_every_frame_with_progress() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let session = session();
    let settings = ExportSettings::from_project(session.project());
    let mut sink = FrameCollector::new();
    let mut progress = Vec::new();

    let written = export_frames(
        &session,
        &settings,
        &mut sink,
        |p| progress.push(p),
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(written, 10);
    assert!(sink.finished);
    assert_eq!(sink.frames.len(), 10);
    assert_eq!(progress.len(), 10);
    assert_eq!(progress.last().copied(), Some(1.0));

    let frame = &sink.frames[5];
    assert!((frame.time - 500.0).abs() < 1e-9);
    assert!((frame.shapes[0].x - 50.0).abs() < 1e-9);
}

#[test]
fn frame_count_rounds_up() {
    assert_eq!(frame_count(1050.0, 10), 11);
}

/// Cancels the shared token once `after` frames have arrived.
struct CancelAfter {
    token: CancelToken,
    after: usize,
    seen: usize,
}

impl FrameSink for CancelAfter {
    fn write_frame(&mut self, _frame: &Frame) -> Result<()> {
        self.seen += 1;
        if self.seen == self.after {
            self.token.cancel();
        }
        Ok(())
    }
}

#[test]
fn cancel_stops_before_next_frame() {
    let session = session();
    let token = CancelToken::new();
    let mut sink = CancelAfter {
        token: token.clone(),
        after: 3,
        seen: 0,
    };

    let result = export_frames(
        &session,
        &ExportSettings::from_project(session.project()),
        &mut sink,
        |_| {},
        &token,
    );

    assert!(matches!(result, Err(MotionError::Cancelled { frame: 3 })));
    assert_eq!(sink.seen, 3);
}

#[test]
fn invalid_settings_write_nothing() {
    let session = session();
    let settings = ExportSettings {
        fps: 0,
        ..Default::default()
    };
    let mut sink = FrameCollector::new();
    let result = export_frames(&session, &settings, &mut sink, |_| {}, &CancelToken::new());
    assert!(matches!(result, Err(MotionError::InvalidSettings(_))));
    assert!(sink.frames.is_empty());
}

#[test]
fn json_lines_sink_carries_background() {
    let mut session = session();
    session.set_background("#123456");
    let mut sink = JsonLinesSink::new(Vec::new());
    let settings = ExportSettings {
        fps: 2,
        duration: 1000.0,
        ..ExportSettings::from_project(session.project())
    };
    export_frames(&session, &settings, &mut sink, |_| {}, &CancelToken::new()).unwrap();

    let out = String::from_utf8(sink.into_inner()).unwrap();
    let frames: Vec<Frame> = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(frames.len(), 2);
    assert!(frames.iter().all(|f| f.background_color == "#123456"));
}
