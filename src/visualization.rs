//! Interactive 3D view of a room session using kiss3d.

use std::time::Instant;

use cgmath::{Rotation, Vector2, Vector3};
use kiss3d::prelude::*;

use cuberoom::{Face, FrameTime, Immediate, InputFrame, RoomSession};

/// Returns the display color for a wall, dimmed when its content is hidden.
fn face_color(face: Face, content_active: bool, is_floor: bool) -> Color {
    let (r, g, b) = match face {
        Face::Top => (0.9, 0.9, 0.9),    // white
        Face::Bottom => (1.0, 0.9, 0.2), // yellow
        Face::Front => (0.2, 0.8, 0.2),  // green
        Face::Back => (0.2, 0.4, 1.0),   // blue
        Face::Left => (1.0, 0.5, 0.1),   // orange
        Face::Right => (0.9, 0.1, 0.1),  // red
    };
    let shade = if is_floor {
        1.0
    } else if content_active {
        0.75
    } else {
        0.25
    };
    Color::new(r * shade, g * shade, b * shade, 1.0)
}

/// One tile of a wall in the 3D scene.
struct RenderedTile {
    node: SceneNode3d,
    /// Tile center in the room's local frame.
    local_position: Vector3<f32>,
}

/// Builds a 3x3 grid of tiles on each interior wall.
///
/// Coordinate conventions:
/// - The room's local frame matches the world at the identity pose: +Y up,
///   +Z forward, +X right.
/// - Each wall sits `WALL_OFFSET` from the origin along its outward normal.
fn build_scene(scene: &mut SceneNode3d, session: &RoomSession) -> Vec<RenderedTile> {
    /// Size of each tile (slightly smaller than the spacing for visible gaps).
    const TILE_SIZE: f32 = 0.9;
    /// Distance from the room center to each wall.
    const WALL_OFFSET: f32 = 1.5;

    let room = session.room();
    let floor = session.floor();

    let mut tiles = Vec::new();
    for face in Face::ALL {
        let Some(wall) = room.interior_wall(face) else {
            continue;
        };
        let [nx, ny, nz] = face.local_normal().map(f32::from);
        let normal = Vector3::new(nx, ny, nz);
        // two unit vectors spanning the wall plane
        let (u, v) = if nx != 0.0 {
            (Vector3::unit_y(), Vector3::unit_z())
        } else if ny != 0.0 {
            (Vector3::unit_x(), Vector3::unit_z())
        } else {
            (Vector3::unit_x(), Vector3::unit_y())
        };
        let color = face_color(face, wall.is_content_active(), floor == Some(face));

        for i in -1..=1 {
            for j in -1..=1 {
                let local_position = normal * WALL_OFFSET + u * i as f32 + v * j as f32;
                let node = scene
                    .add_cube(TILE_SIZE, TILE_SIZE, TILE_SIZE)
                    .set_color(color)
                    .set_position(world_position(session, local_position))
                    .set_rotation(world_rotation(session));
                tiles.push(RenderedTile {
                    node,
                    local_position,
                });
            }
        }
    }
    tiles
}

fn world_position(session: &RoomSession, local: Vector3<f32>) -> Vec3 {
    let world = session.controller().pose().0.rotate_vector(local);
    Vec3::new(world.x, world.y, world.z)
}

fn world_rotation(session: &RoomSession) -> Quat {
    let pose = session.controller().pose().0;
    Quat::from_xyzw(pose.v.x, pose.v.y, pose.v.z, pose.s)
}

fn title(session: &RoomSession) -> String {
    format!(
        "{} - {} - floor {} - [Arrows] step, [Q/E] roll, [Tab] inspect, [WASD] rotate, [R] reset",
        session.room().name(),
        session.controller().mode(),
        session.controller().current_floor_face()
    )
}

/// Keys currently held down.
#[derive(Default)]
struct HeldKeys {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    roll_left: bool,
    roll_right: bool,
    yaw_left: bool,
    yaw_right: bool,
    pitch_up: bool,
    pitch_down: bool,
}

fn axis_value(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

impl HeldKeys {
    fn input_frame(&self) -> InputFrame {
        InputFrame {
            step: Vector2::new(
                axis_value(self.left, self.right),
                axis_value(self.down, self.up),
            ),
            roll: axis_value(self.roll_left, self.roll_right),
            keyboard_rotate: Vector2::new(
                axis_value(self.yaw_left, self.yaw_right),
                axis_value(self.pitch_down, self.pitch_up),
            ),
            ..InputFrame::default()
        }
    }
}

/// Displays the room in an interactive 3D viewer.
pub fn display(session: RoomSession) {
    pollster::block_on(display_async(session));
}

async fn display_async(mut session: RoomSession) {
    let mut window = Window::new(&title(&session)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(9.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    let mut tiles = build_scene(&mut scene, &session);
    let mut keys = HeldKeys::default();
    let mut last_frame = Instant::now();
    // whether the tiles need rebuilding (after a floor or mode change)
    let mut needs_rebuild = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                let pressed = action != Action::Release;
                match key {
                    Key::Left => keys.left = pressed,
                    Key::Right => keys.right = pressed,
                    Key::Up => keys.up = pressed,
                    Key::Down => keys.down = pressed,
                    Key::Q => keys.roll_left = pressed,
                    Key::E => keys.roll_right = pressed,
                    Key::A => keys.yaw_left = pressed,
                    Key::D => keys.yaw_right = pressed,
                    Key::W => keys.pitch_up = pressed,
                    Key::S => keys.pitch_down = pressed,
                    Key::Tab if action == Action::Press => {
                        let mode = session.controller().mode().toggled();
                        session.set_mode(mode, &mut Immediate);
                        needs_rebuild = true;
                    }
                    Key::R if action == Action::Press => {
                        session.reset();
                        needs_rebuild = true;
                    }
                    _ => {}
                }
            }
        }

        let now = Instant::now();
        let delta = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        for event in session.update(FrameTime::uniform(delta), &keys.input_frame()) {
            log::info!("{event:?}");
            needs_rebuild |= event.floor_update().is_some();
        }

        if needs_rebuild {
            for mut tile in tiles.drain(..) {
                tile.node.remove();
            }
            tiles = build_scene(&mut scene, &session);
            window.set_title(&title(&session));
            needs_rebuild = false;
        }

        let rotation = world_rotation(&session);
        for tile in &mut tiles {
            tile.node
                .set_position(world_position(&session, tile.local_position))
                .set_rotation(rotation);
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
