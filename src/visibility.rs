//! Decides which interior walls show their content for a given floor face.

use crate::events::RotationEvent;
use crate::orientation::Face;
use crate::room::Room;

/// Owns the content activation flags of a room's interior walls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomFaceVisibility {
    floor: Option<Face>,
}

impl RoomFaceVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// The floor face applied last, if any.
    pub fn floor(&self) -> Option<Face> {
        self.floor
    }

    /// Shows content on walkable walls that are enabled by default, then
    /// always shows the interior wall on `floor`.
    ///
    /// Exterior walls are never touched. A room without an interior wall on
    /// `floor` only gets the policy pass.
    pub fn apply_floor_face(&mut self, room: &mut Room, floor: Face) {
        let floor_index = room.interior_wall_index(floor);
        if floor_index.is_none() {
            log::warn!("room `{}` has no interior wall on {floor}", room.name());
        }

        for (index, wall) in room.walls_mut().iter_mut().enumerate() {
            if !wall.is_interior() {
                continue;
            }
            let active = Some(index) == floor_index
                || (wall.is_walkable() && wall.is_enabled_by_default());
            wall.set_content_active(active);
        }

        if self.floor != Some(floor) {
            log::debug!("floor face {:?} -> {floor}", self.floor);
        }
        self.floor = Some(floor);
    }

    /// Applies the floor carried by `event` when it asks for one. Returns
    /// whether the room was updated.
    pub fn handle_event(&mut self, room: &mut Room, event: &RotationEvent) -> bool {
        match event.floor_update() {
            Some(floor) => {
                self.apply_floor_face(room, floor);
                true
            }
            None => false,
        }
    }
}
