//! # Project API
//!
//! Project and shape lifecycle for Rhai scripts.
//!
//! ## Responsibilities
//! - **Project Creation**: `new_project` overloads
//! - **Configuration**: `set_duration`, `set_fps`, `set_background`
//! - **Shapes**: `add_circle`, `add_rect`, `add_text`, `add_polygon`, `shape`, `set`, `delete`

use crate::project::Project;
use crate::session::Session;
use crate::shape::Shape;
use rhai::{Array, Dynamic, Engine, Map};

use super::super::types::{ProjectHandle, ShapeHandle};
use super::super::utils::{
    as_number, map_string, patch_from_map, points_to_vertices, script_error, RhaiResult,
};

fn next_shape_id(session: &Session, prefix: &str) -> String {
    let taken = |id: &str| session.project().shape(id).is_some();
    let mut n = session.project().shapes.len() + 1;
    while taken(&format!("{}-{}", prefix, n)) {
        n += 1;
    }
    format!("{}-{}", prefix, n)
}

/// Adds `shape` after applying the optional style map; the map may carry an `id`.
fn add_styled(
    project: &ProjectHandle,
    prefix: &str,
    props: &Map,
    make: impl FnOnce(String) -> Shape,
) -> RhaiResult<ShapeHandle> {
    let patch = patch_from_map(props)?;
    let id = project.with(|session| {
        let id = map_string(props, "id").unwrap_or_else(|| next_shape_id(session, prefix));
        if session.project().shape(&id).is_some() {
            return Err(script_error(format!("duplicate shape id '{}'", id)));
        }
        let z_index = session.project().shapes.len() as i64;
        let mut shape = make(id).with_z_index(z_index);
        shape.apply(&patch);
        Ok(session.add_shape(shape))
    })?;
    Ok(project.shape(id))
}

/// Register project-related Rhai functions.
pub fn register(engine: &mut Engine) {
    // 1. Project
    engine.register_type_with_name::<ProjectHandle>("Project");

    engine.register_fn("new_project", || {
        ProjectHandle::new(Session::new(Project::new("Untitled")))
    });
    engine.register_fn("new_project", |name: &str| {
        ProjectHandle::new(Session::new(Project::new(name)))
    });
    engine.register_fn(
        "new_project",
        |name: &str, width: i64, height: i64, fps: i64| -> RhaiResult<ProjectHandle> {
            if width <= 0 || height <= 0 || fps <= 0 {
                return Err(script_error("width, height and fps must be positive"));
            }
            let mut project = Project::new(name);
            project.width = width as u32;
            project.height = height as u32;
            project.fps = fps as u32;
            Ok(ProjectHandle::new(Session::new(project)))
        },
    );

    engine.register_fn(
        "set_duration",
        |project: &mut ProjectHandle, ms: Dynamic| -> RhaiResult<()> {
            let ms = as_number(&ms)?;
            if ms < 0.0 {
                return Err(script_error("duration must not be negative"));
            }
            project.with(|s| s.set_duration(ms));
            Ok(())
        },
    );

    engine.register_fn(
        "set_fps",
        |project: &mut ProjectHandle, fps: i64| -> RhaiResult<()> {
            if fps <= 0 {
                return Err(script_error("fps must be positive"));
            }
            project.with(|s| s.set_fps(fps as u32));
            Ok(())
        },
    );

    engine.register_fn("set_background", |project: &mut ProjectHandle, color: &str| {
        project.with(|s| s.set_background(color));
    });

    engine.register_fn("shape_count", |project: &mut ProjectHandle| {
        project.with(|s| s.project().shapes.len() as i64)
    });

    engine.register_fn(
        "shape",
        |project: &mut ProjectHandle, id: &str| -> RhaiResult<ShapeHandle> {
            if project.with(|s| s.project().shape(id).is_none()) {
                return Err(script_error(format!("no shape with id '{}'", id)));
            }
            Ok(project.shape(id))
        },
    );

    // 2. Shapes
    engine.register_type_with_name::<ShapeHandle>("Shape");
    engine.register_get("id", |shape: &mut ShapeHandle| shape.id.clone());

    engine.register_fn(
        "add_circle",
        |project: &mut ProjectHandle, props: Map| -> RhaiResult<ShapeHandle> {
            add_styled(project, "circle", &props, |id| Shape::circle(id, 0.0, 0.0))
        },
    );

    engine.register_fn(
        "add_rect",
        |project: &mut ProjectHandle, props: Map| -> RhaiResult<ShapeHandle> {
            add_styled(project, "rect", &props, |id| Shape::rectangle(id, 0.0, 0.0))
        },
    );

    engine.register_fn(
        "add_text",
        |project: &mut ProjectHandle, content: &str, props: Map| -> RhaiResult<ShapeHandle> {
            let content = content.to_string();
            add_styled(project, "text", &props, move |id| {
                Shape::text(id, 0.0, 0.0, content)
            })
        },
    );

    engine.register_fn(
        "add_polygon",
        |project: &mut ProjectHandle, points: Array, props: Map| -> RhaiResult<ShapeHandle> {
            let vertices = points_to_vertices(&points)?;
            add_styled(project, "polygon", &props, move |id| {
                Shape::polygon(id, 0.0, 0.0, vertices)
            })
        },
    );

    // Base (un-animated) property edits
    engine.register_fn(
        "set",
        |shape: &mut ShapeHandle, props: Map| -> RhaiResult<()> {
            let patch = patch_from_map(&props)?;
            shape
                .with(|s| s.update_shape(&shape.id, &patch))
                .map_err(script_error)
        },
    );

    engine.register_fn("delete", |shape: &mut ShapeHandle| -> RhaiResult<()> {
        shape
            .with(|s| s.delete_shape(&shape.id))
            .map(|_| ())
            .map_err(script_error)
    });
}
