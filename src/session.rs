//! One loaded room together with the controller and visibility bound to it.

use crate::config::RotationConfig;
use crate::controller::RotationController;
use crate::events::RotationEvent;
use crate::input::{FrameTime, InputFrame};
use crate::mode::{Transition, ViewMode};
use crate::orientation::{Face, Generator};
use crate::room::{Room, SceneNode};
use crate::visibility::RoomFaceVisibility;

/// Wires a [`RotationController`]'s events to a [`Room`]'s wall content.
#[derive(Debug, Clone)]
pub struct RoomSession {
    room: Room,
    controller: RotationController,
    visibility: RoomFaceVisibility,
}

impl RoomSession {
    /// Caches `root` and shows the content of the starting floor.
    pub fn new(root: &SceneNode, config: RotationConfig) -> Self {
        let mut session = Self {
            room: Room::initialize(root),
            controller: RotationController::new(config),
            visibility: RoomFaceVisibility::new(),
        };
        session.apply_current_floor();
        session
    }

    /// Replaces the room and resets the controller to identity.
    pub fn reload(&mut self, root: &SceneNode) {
        self.room = Room::initialize(root);
        self.reset();
    }

    /// Returns the controller to identity and shows the starting floor again.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.visibility = RoomFaceVisibility::new();
        self.apply_current_floor();
    }

    fn apply_current_floor(&mut self) {
        let floor = self.controller.current_floor_face();
        self.visibility.apply_floor_face(&mut self.room, floor);
    }

    pub fn room(&self) -> &Room {
        &self.room
    }
    pub fn controller(&self) -> &RotationController {
        &self.controller
    }

    /// The floor face the room currently shows.
    pub fn floor(&self) -> Option<Face> {
        self.visibility.floor()
    }

    pub fn step(&mut self, generator: Generator) -> bool {
        self.controller.step_generator(generator)
    }

    /// Switches mode inside `transition`, e.g. between a fade out and in.
    pub fn set_mode(&mut self, mode: ViewMode, transition: &mut dyn Transition) -> bool {
        let controller = &mut self.controller;
        let mut changed = false;
        transition.run(&mut || changed = controller.set_mode(mode));
        changed
    }

    /// Ticks the controller, applies any floor change to the room and
    /// returns the events raised this frame.
    pub fn update(&mut self, time: FrameTime, input: &InputFrame) -> Vec<RotationEvent> {
        self.controller.update(time, input);
        let events: Vec<_> = self.controller.drain_events().collect();
        for event in &events {
            self.visibility.handle_event(&mut self.room, event);
        }
        events
    }

    /// Ticks with no input until the controller is idle and its end event
    /// has fired, up to `max_frames`. Returns every event raised.
    pub fn run_until_settled(&mut self, time: FrameTime, max_frames: usize) -> Vec<RotationEvent> {
        let idle = InputFrame::default();
        let mut events = Vec::new();
        for _ in 0..max_frames {
            if self.controller.is_settled() && !self.controller.is_active() {
                break;
            }
            events.extend(self.update(time, &idle));
        }
        events
    }
}
