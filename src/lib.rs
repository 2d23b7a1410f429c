//! Cube Room Rotation Library
//!
//! Rotates a cube-shaped room through its 24 orientations, either one quarter
//! turn at a time or by free rotation that snaps back to the nearest
//! orientation, and keeps the room's wall content in sync with whichever face
//! is currently the floor.

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod input;
pub mod mode;
pub mod orientation;
pub mod persistence;
pub mod pose;
pub mod room;
pub mod session;
pub mod visibility;

pub use config::RotationConfig;
pub use controller::{ControllerState, RotationController};
pub use error::{ConfigError, ContentDefect};
pub use events::RotationEvent;
pub use input::{FrameTime, InputFrame};
pub use mode::{Immediate, Transition, ViewMode};
pub use orientation::{Axis, Face, Generator, OrientationState, Role, Sign};
pub use pose::Pose;
pub use room::{Room, SceneNode};
pub use session::RoomSession;
pub use visibility::RoomFaceVisibility;
