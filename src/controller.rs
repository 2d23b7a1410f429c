//! Rotation controller: discrete steps, free rotation and snap-back.
//!
//! The controller is the only writer of a room's [`Pose`] and
//! [`OrientationState`]. Its state machine is:
//!
//! ```text
//! Idle -> SteppingDiscrete -> Idle
//! Idle -> FreeRotating -> Snapping -> Idle
//! Idle -> FreeRotating -> Idle            (already within the snap epsilon)
//! ```
//!
//! Whenever it is `Idle`, the pose is exactly the canonical pose of the
//! orientation (or a rounded pose equivalent to it).

use crate::config::RotationConfig;
use crate::events::{EventQueue, RotationEvent};
use crate::input::{resolve_step, FrameTime, InputFrame, MIN_INPUT_SQUARED};
use crate::mode::ViewMode;
use crate::orientation::{Axis, Face, Generator, OrientationState, Sign};
use crate::pose::Pose;

/// Floor for animation durations so a zero duration completes in one tick.
const MIN_DURATION: f32 = 1e-4;

/// Interpolation between two fixed poses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: Pose,
    to: Pose,
    progress: f32,
    duration: f32,
}

impl Tween {
    fn new(from: Pose, to: Pose, duration: f32) -> Self {
        Self {
            from,
            to,
            progress: 0.0,
            duration: duration.max(MIN_DURATION),
        }
    }

    /// Advances by `delta` seconds, returning the new pose and whether the
    /// tween is complete. The final pose is exactly `to`.
    fn advance(&mut self, delta: f32) -> (Pose, bool) {
        self.progress += delta / self.duration;
        let amount = self.progress.clamp(0.0, 1.0);
        if amount >= 1.0 {
            (self.to, true)
        } else {
            (Pose::slerp(self.from, self.to, amount), false)
        }
    }

    pub fn target(&self) -> Pose {
        self.to
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress.clamp(0.0, 1.0)
    }
}

/// What the controller is doing right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerState {
    Idle,
    /// Animating to the canonical pose of an already-updated orientation.
    SteppingDiscrete(Tween),
    /// Pose follows continuous input; the orientation is frozen.
    FreeRotating,
    /// Animating from a free-rotation endpoint to its rounded pose.
    Snapping(Tween),
}

/// Which kind of motion settled most recently, deciding the end event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Settle {
    Step,
    Snap,
}

/// Owns one room's pose and orientation and drives them from input.
#[derive(Debug, Clone)]
pub struct RotationController {
    config: RotationConfig,
    mode: ViewMode,
    enabled: bool,

    pose: Pose,
    orientation: OrientationState,
    state: ControllerState,

    /// Whether `Started` has fired without a matching end event.
    active: bool,
    /// Scaled seconds spent idle since the last motion.
    idle: f32,
    floor_at_start: Face,
    last_settle: Settle,

    step_cooldown: f32,
    /// Pointer drag in progress.
    dragging: bool,
    /// Unscaled seconds since keyboard free rotation last moved, if it is
    /// waiting to snap.
    key_idle: Option<f32>,

    events: EventQueue,
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new(RotationConfig::default())
    }
}

impl RotationController {
    pub fn new(config: RotationConfig) -> Self {
        Self {
            config,
            mode: ViewMode::Inside,
            enabled: true,

            pose: Pose::identity(),
            orientation: OrientationState::IDENTITY,
            state: ControllerState::Idle,

            active: false,
            idle: 0.0,
            floor_at_start: Face::Bottom,
            last_settle: Settle::Step,

            step_cooldown: 0.0,
            dragging: false,
            key_idle: None,

            events: EventQueue::default(),
        }
    }

    /// Returns to the identity orientation and pose, dropping any motion,
    /// transient input state and undelivered events. The mode is kept.
    pub fn reset(&mut self) {
        log::debug!("controller reset");
        *self = Self {
            mode: self.mode,
            enabled: self.enabled,
            ..Self::new(self.config.clone())
        };
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }
    pub fn pose(&self) -> Pose {
        self.pose
    }
    pub fn orientation(&self) -> OrientationState {
        self.orientation
    }
    pub fn state(&self) -> &ControllerState {
        &self.state
    }
    pub fn mode(&self) -> ViewMode {
        self.mode
    }
    /// The face bound to the Down role as of the last settled motion.
    pub fn current_floor_face(&self) -> Face {
        self.orientation.down_face()
    }
    /// Whether no motion is in flight.
    pub fn is_settled(&self) -> bool {
        self.state == ControllerState::Idle
    }
    /// Whether `Started` fired and the end event has not yet.
    pub fn is_active(&self) -> bool {
        self.active
    }
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
    /// A disabled controller ignores input and commands and freezes any
    /// motion in flight until it is enabled again.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Removes and returns every pending event, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = RotationEvent> + '_ {
        self.events.drain()
    }

    /// Starts a quarter turn about `axis`.
    ///
    /// Only accepted while idle and off cooldown. The orientation changes
    /// immediately; the pose follows over `step_duration`. Returns whether
    /// the step was accepted.
    pub fn step_discrete(&mut self, axis: Axis, sign: Sign) -> bool {
        if !self.enabled {
            return false;
        }
        if self.state != ControllerState::Idle {
            log::debug!("step ignored: motion in flight");
            return false;
        }
        if self.step_cooldown > 0.0 {
            log::debug!("step ignored: cooling down");
            return false;
        }

        let generator = Generator::from_axis_sign(axis, sign);
        self.begin_if_needed();
        self.orientation = self.orientation.apply(generator);

        let target = Pose::canonical(self.orientation);
        self.state =
            ControllerState::SteppingDiscrete(Tween::new(self.pose, target, self.config.step_duration));
        self.step_cooldown = self.config.step_repeat_delay;
        self.idle = 0.0;
        log::debug!("step {generator}: floor is now {}", self.orientation.down_face());
        true
    }

    /// Applies a generator directly; same rules as [`Self::step_discrete`].
    pub fn step_generator(&mut self, generator: Generator) -> bool {
        self.step_discrete(generator.axis(), generator.sign())
    }

    /// Enters free rotation. Returns whether the controller is now
    /// free-rotating.
    pub fn begin_free_rotation(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        match self.state {
            ControllerState::Idle => {
                log::debug!("free rotation begun");
                self.state = ControllerState::FreeRotating;
                true
            }
            ControllerState::FreeRotating => true,
            ControllerState::SteppingDiscrete(_) | ControllerState::Snapping(_) => {
                log::debug!("free rotation ignored: motion in flight");
                false
            }
        }
    }

    /// Rotates the pose by a pointer delta in input units.
    ///
    /// Yaw turns about world up, then pitch about world right. Gain, boost
    /// and inversion come from the config. Ignored unless free-rotating;
    /// returns whether the pose moved.
    pub fn apply_free_delta(&mut self, d_pitch: f32, d_yaw: f32) -> bool {
        if !self.enabled || self.state != ControllerState::FreeRotating {
            return false;
        }
        if d_pitch * d_pitch + d_yaw * d_yaw < MIN_INPUT_SQUARED {
            return false;
        }

        let gain = self.config.pointer_degrees_per_unit * self.config.pointer_boost;
        let sign_x = if self.config.invert_x { -1.0 } else { 1.0 };
        let sign_y = if self.config.invert_y { -1.0 } else { 1.0 };
        self.rotate_free(d_pitch * gain * sign_y, d_yaw * gain * sign_x);
        true
    }

    /// Leaves free rotation and snaps to the rounded pose.
    ///
    /// Snaps shorter than `snap_epsilon_degrees` are applied at once and the
    /// controller goes straight back to `Idle`. Returns whether the
    /// controller was free-rotating.
    pub fn end_free_rotation(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        if self.state != ControllerState::FreeRotating {
            log::debug!("end of free rotation ignored: not free-rotating");
            return false;
        }
        self.dragging = false;
        self.key_idle = None;

        let target = self.pose.rounded(self.config.snap_increment);
        let distance = self.pose.angle_to(target);
        if distance < self.config.snap_epsilon_degrees {
            log::debug!("snap applied immediately ({distance:.3} degrees)");
            self.pose = target;
            self.settle_snap();
        } else {
            log::debug!("snapping {distance:.1} degrees");
            self.state =
                ControllerState::Snapping(Tween::new(self.pose, target, self.config.snap_duration));
            self.begin_if_needed();
        }
        true
    }

    /// Switches between inside and inspect behavior.
    ///
    /// Motion in flight is settled at once, transient drag and key state is
    /// dropped, then `InspectEntered` or `InspectExited` fires. Returns
    /// whether the mode changed.
    pub fn set_mode(&mut self, mode: ViewMode) -> bool {
        if mode == self.mode {
            return false;
        }
        self.settle_in_flight();
        self.dragging = false;
        self.key_idle = None;
        self.mode = mode;
        log::debug!("mode is now {mode}");

        match mode {
            ViewMode::Inspect => self.events.push(RotationEvent::InspectEntered),
            ViewMode::Inside => self.events.push(RotationEvent::InspectExited {
                floor: self.orientation.down_face(),
            }),
        }
        true
    }

    /// Mode change coming from outside; ignored unless `auto_mode` is set.
    pub fn handle_mode_signal(&mut self, mode: ViewMode) -> bool {
        self.config.auto_mode && self.set_mode(mode)
    }

    /// Advances one frame.
    pub fn update(&mut self, time: FrameTime, input: &InputFrame) {
        if !self.enabled {
            return;
        }
        if self.step_cooldown > 0.0 {
            self.step_cooldown -= time.scaled;
        }

        match self.state {
            ControllerState::SteppingDiscrete(mut tween) => {
                let (pose, done) = tween.advance(time.scaled);
                self.pose = pose;
                self.state = if done {
                    self.last_settle = Settle::Step;
                    ControllerState::Idle
                } else {
                    ControllerState::SteppingDiscrete(tween)
                };
                self.idle = 0.0;
                return;
            }
            ControllerState::Snapping(mut tween) => {
                let (pose, done) = tween.advance(time.scaled);
                self.pose = pose;
                if done {
                    self.settle_snap();
                } else {
                    self.state = ControllerState::Snapping(tween);
                }
                self.idle = 0.0;
                return;
            }
            ControllerState::Idle | ControllerState::FreeRotating => {}
        }

        let rotated = match self.mode {
            ViewMode::Inspect => {
                let pointer = self.pointer_input(input);
                let keys = self.keyboard_input(input, time.unscaled);
                if !keys {
                    self.tick_keyboard_snap(time.unscaled);
                }
                pointer || keys
            }
            ViewMode::Inside => self.step_input(input),
        };

        if rotated || self.state != ControllerState::Idle {
            self.idle = 0.0;
        } else if self.active {
            self.idle += time.scaled;
            if self.idle >= self.config.idle_to_finish {
                self.end_if_active();
            }
        }
    }

    fn pointer_input(&mut self, input: &InputFrame) -> bool {
        if !input.pointer_held {
            if self.dragging {
                self.dragging = false;
                self.end_free_rotation();
            }
            return false;
        }

        if !self.dragging {
            if !self.begin_free_rotation() {
                return false;
            }
            self.dragging = true;
            self.key_idle = None;
        }
        // pointer up moves the near face up, which is a negative pitch
        self.apply_free_delta(-input.pointer_delta.y, input.pointer_delta.x)
    }

    fn keyboard_input(&mut self, input: &InputFrame, unscaled: f32) -> bool {
        if !input.has_keyboard_rotation() {
            return false;
        }
        if !self.begin_free_rotation() {
            return false;
        }

        let speed = self.config.keyboard_degrees_per_second * unscaled;
        self.rotate_free(-input.keyboard_rotate.y * speed, input.keyboard_rotate.x * speed);
        self.key_idle = Some(0.0);
        true
    }

    fn tick_keyboard_snap(&mut self, unscaled: f32) {
        if self.dragging {
            return;
        }
        let Some(waited) = self.key_idle else {
            return;
        };
        let waited = waited + unscaled;
        if waited < self.config.key_snap_delay {
            self.key_idle = Some(waited);
            return;
        }
        self.key_idle = None;
        self.end_free_rotation();
    }

    fn step_input(&mut self, input: &InputFrame) -> bool {
        if self.step_cooldown > 0.0 {
            return false;
        }
        match resolve_step(input.step, input.roll, self.config.step_deadzone) {
            Some((axis, sign)) => self.step_discrete(axis, sign),
            None => false,
        }
    }

    fn rotate_free(&mut self, pitch_degrees: f32, yaw_degrees: f32) {
        self.begin_if_needed();
        self.pose = self
            .pose
            .rotated_world(Axis::Y, yaw_degrees)
            .rotated_world(Axis::X, pitch_degrees);
        self.idle = 0.0;
    }

    /// Finishes any motion in flight without animating.
    fn settle_in_flight(&mut self) {
        match self.state {
            ControllerState::Idle => {}
            ControllerState::SteppingDiscrete(tween) => {
                self.pose = tween.target();
                self.state = ControllerState::Idle;
                self.last_settle = Settle::Step;
            }
            ControllerState::Snapping(tween) => {
                self.pose = tween.target();
                self.settle_snap();
            }
            ControllerState::FreeRotating => {
                self.pose = self.pose.rounded(self.config.snap_increment);
                self.settle_snap();
            }
        }
    }

    /// Ends a snap: back to `Idle` with the orientation read off the pose.
    fn settle_snap(&mut self) {
        self.state = ControllerState::Idle;
        self.last_settle = Settle::Snap;
        self.dragging = false;
        self.key_idle = None;

        match self.pose.nearest_orientation() {
            Some(orientation) => {
                if orientation != self.orientation {
                    log::debug!("orientation resynced: {orientation}");
                }
                self.orientation = orientation;
            }
            None => {
                log::error!(
                    "snapped pose {:?} is not a cube orientation; restoring {}",
                    self.pose,
                    self.orientation
                );
                self.pose = Pose::canonical(self.orientation);
            }
        }
    }

    fn begin_if_needed(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.floor_at_start = self.orientation.down_face();
        self.events.push(RotationEvent::Started);
    }

    fn end_if_active(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.idle = 0.0;

        let floor = self.orientation.down_face();
        self.events.push(match self.last_settle {
            Settle::Snap => RotationEvent::Snapped { floor },
            Settle::Step => RotationEvent::Finished {
                floor,
                floor_changed: floor != self.floor_at_start,
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector2;
    use pretty_assertions::assert_eq;

    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn tick(controller: &mut RotationController, input: &InputFrame) {
        controller.update(FrameTime::uniform(FRAME), input);
    }

    /// Ticks with no input until settled and all events are out.
    fn settle(controller: &mut RotationController) -> Vec<RotationEvent> {
        let idle = InputFrame::default();
        for _ in 0..600 {
            if controller.is_settled() && !controller.is_active() {
                break;
            }
            tick(controller, &idle);
        }
        assert!(controller.is_settled() && !controller.is_active());
        controller.drain_events().collect()
    }

    fn held(dx: f32, dy: f32) -> InputFrame {
        InputFrame {
            pointer_held: true,
            pointer_delta: Vector2::new(dx, dy),
            ..InputFrame::default()
        }
    }

    fn inspecting() -> RotationController {
        let mut controller = RotationController::default();
        controller.set_mode(ViewMode::Inspect);
        controller.drain_events().for_each(drop);
        controller
    }

    #[test]
    fn test_step_updates_orientation_immediately() {
        let mut controller = RotationController::default();
        assert!(controller.step_discrete(Axis::X, Sign::Positive));
        assert_eq!(controller.current_floor_face(), Face::Back);
        assert!(matches!(
            controller.state(),
            ControllerState::SteppingDiscrete(_)
        ));
    }

    #[test]
    fn test_step_lands_exactly_on_canonical_pose() {
        let mut controller = RotationController::default();
        controller.step_discrete(Axis::X, Sign::Positive);
        let events = settle(&mut controller);

        let expected = Pose::canonical(controller.orientation());
        assert_eq!(controller.pose(), expected);
        assert_eq!(
            events,
            vec![
                RotationEvent::Started,
                RotationEvent::Finished {
                    floor: Face::Back,
                    floor_changed: true
                }
            ]
        );
    }

    #[test]
    fn test_y_steps_keep_the_floor() {
        let mut controller = RotationController::default();
        let mut events = Vec::new();
        for _ in 0..2 {
            for _ in 0..60 {
                if controller.step_discrete(Axis::Y, Sign::Positive) {
                    break;
                }
                tick(&mut controller, &InputFrame::default());
            }
            assert_eq!(controller.current_floor_face(), Face::Bottom);
            events.extend(settle(&mut controller));
        }
        assert!(events.iter().all(|event| event.floor_update().is_none()));
        assert_eq!(controller.current_floor_face(), Face::Bottom);
    }

    #[test]
    fn test_step_ignored_while_in_flight() {
        let mut controller = RotationController::default();
        assert!(controller.step_discrete(Axis::X, Sign::Positive));
        assert!(!controller.step_discrete(Axis::Z, Sign::Positive));
        assert_eq!(controller.current_floor_face(), Face::Back);
    }

    #[test]
    fn test_step_cooldown_rate_limits() {
        let config = RotationConfig {
            step_duration: 0.0,
            step_repeat_delay: 0.5,
            ..RotationConfig::default()
        };
        let mut controller = RotationController::new(config);
        assert!(controller.step_discrete(Axis::Y, Sign::Positive));
        tick(&mut controller, &InputFrame::default());
        assert!(controller.is_settled());
        assert!(!controller.step_discrete(Axis::Y, Sign::Positive));

        for _ in 0..40 {
            tick(&mut controller, &InputFrame::default());
        }
        assert!(controller.step_discrete(Axis::Y, Sign::Positive));
    }

    #[test]
    fn test_held_step_input_repeats_after_cooldown() {
        let mut controller = RotationController::default();
        let input = InputFrame {
            step: Vector2::new(1.0, 0.0),
            ..InputFrame::default()
        };
        let mut started_steps = 0;
        let mut previous = controller.orientation();
        // 0.5 seconds of holding right: one step every 0.18 seconds
        for _ in 0..30 {
            tick(&mut controller, &input);
            if controller.orientation() != previous {
                started_steps += 1;
                previous = controller.orientation();
            }
        }
        assert_eq!(started_steps, 3);
    }

    #[test]
    fn test_diagonal_input_makes_one_step() {
        let mut controller = RotationController::default();
        let input = InputFrame {
            step: Vector2::new(1.0, 1.0),
            roll: 1.0,
            ..InputFrame::default()
        };
        tick(&mut controller, &input);
        assert_eq!(
            controller.orientation(),
            OrientationState::IDENTITY.apply(Generator::RotY90)
        );
    }

    #[test]
    fn test_started_fires_once_and_finish_is_debounced() {
        let mut controller = RotationController::default();
        controller.step_discrete(Axis::Z, Sign::Positive);
        let idle = InputFrame::default();

        // step animation plus less than the debounce
        for _ in 0..10 {
            tick(&mut controller, &idle);
        }
        assert!(controller.is_settled());
        assert!(controller.is_active());
        let early: Vec<_> = controller.drain_events().collect();
        assert_eq!(early, vec![RotationEvent::Started]);

        let late = settle(&mut controller);
        assert_eq!(
            late,
            vec![RotationEvent::Finished {
                floor: Face::Left,
                floor_changed: true
            }]
        );
    }

    #[test]
    fn test_free_delta_ignored_outside_free_rotation() {
        let mut controller = RotationController::default();
        assert!(!controller.apply_free_delta(10.0, 10.0));
        assert_eq!(controller.pose(), Pose::identity());
        assert!(controller.drain_events().next().is_none());
    }

    #[test]
    fn test_free_rotation_keeps_orientation_frozen() {
        let mut controller = RotationController::default();
        assert!(controller.begin_free_rotation());
        // 200 units at 0.25 * 1.35 degrees each is 67.5 degrees of yaw
        assert!(controller.apply_free_delta(0.0, 200.0));
        assert_eq!(controller.orientation(), OrientationState::IDENTITY);
        assert!((controller.pose().angle_to(Pose::identity()) - 67.5).abs() < 1e-2);
    }

    #[test]
    fn test_small_drag_snaps_immediately() {
        let mut controller = RotationController::default();
        controller.begin_free_rotation();
        controller.apply_free_delta(0.1, 0.0);
        assert!(controller.end_free_rotation());

        assert_eq!(controller.state(), &ControllerState::Idle);
        assert_eq!(controller.pose(), Pose::identity().rounded(90.0));
        assert_eq!(controller.orientation(), OrientationState::IDENTITY);
    }

    #[test]
    fn test_large_drag_snaps_exactly_to_rounded_target() {
        let mut controller = RotationController::default();
        controller.begin_free_rotation();
        // 70 degrees of pitch, then 30 degrees of yaw on top
        controller.apply_free_delta(70.0 / 0.3375, 0.0);
        controller.apply_free_delta(0.0, 30.0 / 0.3375);
        let target = controller.pose().rounded(90.0);

        assert!(controller.end_free_rotation());
        assert!(matches!(controller.state(), ControllerState::Snapping(_)));

        let events = settle(&mut controller);
        assert_eq!(controller.pose(), target);
        assert_eq!(controller.pose().nearest_orientation(), Some(controller.orientation()));
        assert_eq!(events.first(), Some(&RotationEvent::Started));
        assert_eq!(
            events.last(),
            Some(&RotationEvent::Snapped {
                floor: controller.current_floor_face()
            })
        );
    }

    #[test]
    fn test_pointer_release_cancels_into_snap() {
        let mut controller = inspecting();
        tick(&mut controller, &held(0.0, 0.0));
        assert!(controller.is_dragging());
        tick(&mut controller, &held(0.0, -150.0));
        assert_eq!(controller.state(), &ControllerState::FreeRotating);

        tick(&mut controller, &InputFrame::default());
        assert!(matches!(controller.state(), ControllerState::Snapping(_)));
        settle(&mut controller);
        assert_eq!(controller.pose().nearest_orientation(), Some(controller.orientation()));
        assert!(controller.pose().angle_to(Pose::canonical(controller.orientation())) < 1e-3);
    }

    #[test]
    fn test_press_during_snap_waits_for_completion() {
        let mut controller = inspecting();
        tick(&mut controller, &held(0.0, 150.0));
        tick(&mut controller, &InputFrame::default());
        assert!(matches!(controller.state(), ControllerState::Snapping(_)));

        tick(&mut controller, &held(50.0, 0.0));
        assert!(!controller.is_dragging());
        assert!(matches!(controller.state(), ControllerState::Snapping(_)));
    }

    #[test]
    fn test_keyboard_rotation_snaps_after_delay() {
        let mut controller = inspecting();
        let keys = InputFrame {
            keyboard_rotate: Vector2::new(1.0, 0.0),
            ..InputFrame::default()
        };
        // 0.5 seconds at 120 degrees per second
        for _ in 0..30 {
            tick(&mut controller, &keys);
        }
        assert_eq!(controller.state(), &ControllerState::FreeRotating);

        let events = settle(&mut controller);
        assert_eq!(controller.orientation(), OrientationState::IDENTITY.apply(Generator::RotY90));
        assert_eq!(
            events.last(),
            Some(&RotationEvent::Snapped {
                floor: Face::Bottom
            })
        );
    }

    #[test]
    fn test_step_input_ignored_in_inspect_mode() {
        let mut controller = inspecting();
        let input = InputFrame {
            step: Vector2::new(1.0, 0.0),
            ..InputFrame::default()
        };
        tick(&mut controller, &input);
        assert_eq!(controller.orientation(), OrientationState::IDENTITY);
        assert!(controller.is_settled());
    }

    #[test]
    fn test_mode_switch_settles_free_rotation() {
        let mut controller = inspecting();
        tick(&mut controller, &held(0.0, 0.0));
        tick(&mut controller, &held(0.0, 300.0));
        assert_eq!(controller.state(), &ControllerState::FreeRotating);

        assert!(controller.set_mode(ViewMode::Inside));
        assert!(controller.is_settled());
        assert!(!controller.is_dragging());
        assert_eq!(controller.pose().nearest_orientation(), Some(controller.orientation()));

        let events: Vec<_> = controller.drain_events().collect();
        assert_eq!(
            events.last(),
            Some(&RotationEvent::InspectExited {
                floor: controller.current_floor_face()
            })
        );
        assert!(!controller.set_mode(ViewMode::Inside));
    }

    #[test]
    fn test_mode_signal_respects_auto_mode() {
        let config = RotationConfig {
            auto_mode: false,
            ..RotationConfig::default()
        };
        let mut controller = RotationController::new(config);
        assert!(!controller.handle_mode_signal(ViewMode::Inspect));
        assert_eq!(controller.mode(), ViewMode::Inside);
    }

    #[test]
    fn test_disabled_controller_ignores_commands() {
        let mut controller = RotationController::default();
        controller.set_enabled(false);
        assert!(!controller.step_discrete(Axis::X, Sign::Positive));
        assert!(!controller.begin_free_rotation());
        assert_eq!(controller.orientation(), OrientationState::IDENTITY);
    }

    #[test]
    fn test_disabled_controller_ignores_end_free_rotation() {
        let mut controller = RotationController::default();
        assert!(controller.begin_free_rotation());
        assert!(controller.apply_free_delta(0.0, 150.0));
        controller.set_enabled(false);

        assert!(!controller.end_free_rotation());
        assert_eq!(controller.state(), &ControllerState::FreeRotating);

        controller.set_enabled(true);
        assert!(controller.end_free_rotation());
        assert!(matches!(controller.state(), ControllerState::Snapping(_)));
    }

    #[test]
    fn test_paused_time_still_drives_keyboard_rotation() {
        let mut controller = inspecting();
        let keys = InputFrame {
            keyboard_rotate: Vector2::new(1.0, 0.0),
            ..InputFrame::default()
        };
        // 0.25 unscaled seconds at 120 degrees per second
        controller.update(FrameTime::new(0.0, 0.25), &keys);
        assert_eq!(controller.state(), &ControllerState::FreeRotating);
        assert!((controller.pose().angle_to(Pose::identity()) - 30.0).abs() < 1e-2);
    }

    #[test]
    fn test_paused_time_freezes_step_animation() {
        let mut controller = RotationController::default();
        assert!(controller.step_discrete(Axis::X, Sign::Positive));
        for _ in 0..30 {
            controller.update(FrameTime::new(0.0, FRAME), &InputFrame::default());
        }
        match controller.state() {
            ControllerState::SteppingDiscrete(tween) => assert_eq!(tween.progress(), 0.0),
            state => panic!("expected a frozen step, got {state:?}"),
        }
        assert!(controller.pose().angle_to(Pose::identity()) < 1e-3);
    }

    #[test]
    fn test_paused_time_holds_cooldown_and_finish() {
        let config = RotationConfig {
            step_duration: 0.0,
            ..RotationConfig::default()
        };
        let mut controller = RotationController::new(config);
        assert!(controller.step_discrete(Axis::Y, Sign::Positive));
        // one scaled frame completes the zero-length step
        tick(&mut controller, &InputFrame::default());
        assert!(controller.is_settled());
        controller.drain_events().for_each(drop);

        for _ in 0..120 {
            controller.update(FrameTime::new(0.0, FRAME), &InputFrame::default());
        }
        assert!(controller.is_active());
        assert!(controller.drain_events().next().is_none());
        assert!(!controller.step_discrete(Axis::Y, Sign::Positive));
    }

    #[test]
    fn test_reset_returns_to_identity() {
        let mut controller = RotationController::default();
        controller.step_discrete(Axis::X, Sign::Positive);
        controller.reset();
        assert_eq!(controller.orientation(), OrientationState::IDENTITY);
        assert_eq!(controller.pose(), Pose::identity());
        assert!(controller.is_settled());
        assert!(controller.drain_events().next().is_none());
    }
}
