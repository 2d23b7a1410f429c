//! Discrete cube orientation: which physical face occupies each logical role.
//!
//! A cube has 24 proper rotations (6 choices of the face pointing up, times 4
//! turns around the vertical). An [`OrientationState`] is always one of them:
//! it starts at the identity and only ever changes by applying one of the six
//! [`Generator`]s, each of which is itself a rotation.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::ParseMoveError;

/// One of the six physical sides of the room/cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Top,
    Bottom,
    Front,
    Back,
    Left,
    Right,
}

impl Face {
    /// All six faces in declaration order.
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
    ];

    /// Returns the face on the other side of the cube.
    pub const fn opposite(self) -> Face {
        match self {
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Left => Face::Right,
            Face::Right => Face::Left,
        }
    }

    /// Outward normal of this face in the room's local frame.
    ///
    /// Uses the same axis convention as [`Role::world_direction`], so the
    /// identity orientation puts every face on the role of the same name.
    pub const fn local_normal(self) -> [i8; 3] {
        match self {
            Face::Top => [0, 1, 0],
            Face::Bottom => [0, -1, 0],
            Face::Front => [0, 0, 1],
            Face::Back => [0, 0, -1],
            Face::Left => [-1, 0, 0],
            Face::Right => [1, 0, 0],
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A logical, world-fixed slot that one face occupies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Up,
    Down,
    Forward,
    Back,
    Left,
    Right,
}

impl Role {
    /// All six roles, in the order used to index [`OrientationState`].
    pub const ALL: [Role; 6] = [
        Role::Up,
        Role::Down,
        Role::Forward,
        Role::Back,
        Role::Left,
        Role::Right,
    ];

    /// Position of this role in [`Role::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// World-space direction this role points in (+Y up, +Z forward, +X right).
    pub const fn world_direction(self) -> [i8; 3] {
        match self {
            Role::Up => [0, 1, 0],
            Role::Down => [0, -1, 0],
            Role::Forward => [0, 0, 1],
            Role::Back => [0, 0, -1],
            Role::Left => [-1, 0, 0],
            Role::Right => [1, 0, 0],
        }
    }
}

/// A principal world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Direction of a quarter turn about an [`Axis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub const fn flipped(self) -> Sign {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

/// One of the six primitive quarter turns.
///
/// The `90` variants are the positive step about their axis and the `270`
/// variants undo them. A half turn is two applications of the same generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Generator {
    RotX90,
    RotX270,
    RotY90,
    RotY270,
    RotZ90,
    RotZ270,
}

impl Generator {
    pub const ALL: [Generator; 6] = [
        Generator::RotX90,
        Generator::RotX270,
        Generator::RotY90,
        Generator::RotY270,
        Generator::RotZ90,
        Generator::RotZ270,
    ];

    /// Looks up the generator for a step about `axis` in direction `sign`.
    pub const fn from_axis_sign(axis: Axis, sign: Sign) -> Generator {
        match (axis, sign) {
            (Axis::X, Sign::Positive) => Generator::RotX90,
            (Axis::X, Sign::Negative) => Generator::RotX270,
            (Axis::Y, Sign::Positive) => Generator::RotY90,
            (Axis::Y, Sign::Negative) => Generator::RotY270,
            (Axis::Z, Sign::Positive) => Generator::RotZ90,
            (Axis::Z, Sign::Negative) => Generator::RotZ270,
        }
    }

    pub const fn axis(self) -> Axis {
        match self {
            Generator::RotX90 | Generator::RotX270 => Axis::X,
            Generator::RotY90 | Generator::RotY270 => Axis::Y,
            Generator::RotZ90 | Generator::RotZ270 => Axis::Z,
        }
    }

    pub const fn sign(self) -> Sign {
        match self {
            Generator::RotX90 | Generator::RotY90 | Generator::RotZ90 => Sign::Positive,
            Generator::RotX270 | Generator::RotY270 | Generator::RotZ270 => Sign::Negative,
        }
    }

    /// Returns the paired generator about the same axis.
    pub const fn inverse(self) -> Generator {
        Generator::from_axis_sign(self.axis(), self.sign().flipped())
    }

    /// For each role (in [`Role::ALL`] order), the role whose face moves into it.
    ///
    /// `RotX90` reads as: Up takes the Forward face, Down takes Back, Forward
    /// takes Down, Back takes Up.
    const fn source_roles(self) -> [Role; 6] {
        use Role::*;
        match self {
            Generator::RotX90 => [Forward, Back, Down, Up, Left, Right],
            Generator::RotX270 => [Back, Forward, Up, Down, Left, Right],
            Generator::RotY90 => [Up, Down, Left, Right, Back, Forward],
            Generator::RotY270 => [Up, Down, Right, Left, Forward, Back],
            Generator::RotZ90 => [Right, Left, Forward, Back, Up, Down],
            Generator::RotZ270 => [Left, Right, Forward, Back, Down, Up],
        }
    }

    /// Right-handed angle about the positive world axis that moves faces the
    /// way [`OrientationState::apply`] does.
    ///
    /// The X generators turn the opposite way to Y and Z: `RotX90` lifts the
    /// forward face to the top, which is a negative turn about +X.
    pub const fn world_angle_degrees(self) -> f32 {
        match self {
            Generator::RotX90 => -90.0,
            Generator::RotX270 => 90.0,
            Generator::RotY90 => 90.0,
            Generator::RotY270 => -90.0,
            Generator::RotZ90 => 90.0,
            Generator::RotZ270 => -90.0,
        }
    }

    /// Move notation: `X`, `Y`, `Z` for the 90° turns and a trailing `'` for 270°.
    pub const fn notation(self) -> &'static str {
        match self {
            Generator::RotX90 => "X",
            Generator::RotX270 => "X'",
            Generator::RotY90 => "Y",
            Generator::RotY270 => "Y'",
            Generator::RotZ90 => "Z",
            Generator::RotZ270 => "Z'",
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

impl FromStr for Generator {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Generator::ALL
            .into_iter()
            .find(|generator| generator.notation().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseMoveError(trimmed.to_owned()))
    }
}

/// Assignment of physical faces to the six logical roles.
///
/// Indexed by [`Role::index`]. Only the 24 proper cube rotations are
/// constructible; there is no way to write the mapping directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrientationState {
    faces: [Face; 6],
}

impl Default for OrientationState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl OrientationState {
    /// Every face on the role of the same name.
    pub const IDENTITY: Self = Self {
        faces: [
            Face::Top,
            Face::Bottom,
            Face::Front,
            Face::Back,
            Face::Left,
            Face::Right,
        ],
    };

    /// Builds a state from a role-indexed face array.
    ///
    /// Returns `None` unless the array is one of the 24 proper rotations:
    /// every face used once, opposite roles holding opposite faces, and a
    /// right-handed frame (a mirror image is rejected).
    pub fn from_roles(faces: [Face; 6]) -> Option<Self> {
        let candidate = Self { faces };
        for role in [Role::Up, Role::Forward, Role::Right] {
            let opposite_role = match role {
                Role::Up => Role::Down,
                Role::Forward => Role::Back,
                _ => Role::Left,
            };
            if candidate.face_at(role).opposite() != candidate.face_at(opposite_role) {
                return None;
            }
        }

        // columns are the local normals of the faces on Right, Up and Forward;
        // a proper rotation has determinant +1, a reflection -1, a degenerate
        // assignment (two faces sharing an axis) 0
        let a = candidate.face_at(Role::Right).local_normal();
        let b = candidate.face_at(Role::Up).local_normal();
        let c = candidate.face_at(Role::Forward).local_normal();
        let det = a[0] * (b[1] * c[2] - b[2] * c[1]) - b[0] * (a[1] * c[2] - a[2] * c[1])
            + c[0] * (a[1] * b[2] - a[2] * b[1]);

        (det == 1).then_some(candidate)
    }

    /// Applies one quarter turn, returning the new state.
    #[must_use]
    pub fn apply(self, generator: Generator) -> Self {
        let sources = generator.source_roles();
        let mut faces = self.faces;
        for role in Role::ALL {
            faces[role.index()] = self.faces[sources[role.index()].index()];
        }
        Self { faces }
    }

    /// Applies a sequence of quarter turns in order.
    #[must_use]
    pub fn apply_all(self, generators: impl IntoIterator<Item = Generator>) -> Self {
        generators
            .into_iter()
            .fold(self, |state, generator| state.apply(generator))
    }

    /// Returns the face currently occupying `role`.
    pub fn face_at(&self, role: Role) -> Face {
        self.faces[role.index()]
    }

    /// Returns the role `face` currently occupies.
    pub fn role_of(&self, face: Face) -> Role {
        Role::ALL
            .into_iter()
            .find(|&role| self.face_at(role) == face)
            .unwrap_or_else(|| unreachable!("orientation is a bijection"))
    }

    /// The floor face: whatever is bound to the Down role.
    pub fn down_face(&self) -> Face {
        self.face_at(Role::Down)
    }

    pub fn up_face(&self) -> Face {
        self.face_at(Role::Up)
    }

    /// Role-indexed faces.
    pub fn faces(&self) -> [Face; 6] {
        self.faces
    }

    /// Enumerates all 24 reachable orientations.
    ///
    /// Breadth-first closure of [`Generator::ALL`] from the identity, so the
    /// order is deterministic and the identity comes first.
    pub fn all() -> Vec<OrientationState> {
        let mut seen: FxHashSet<OrientationState> = FxHashSet::default();
        let mut ordered = vec![Self::IDENTITY];
        let mut queue = VecDeque::from([Self::IDENTITY]);
        seen.insert(Self::IDENTITY);

        while let Some(state) = queue.pop_front() {
            for generator in Generator::ALL {
                let next = state.apply(generator);
                if seen.insert(next) {
                    ordered.push(next);
                    queue.push_back(next);
                }
            }
        }

        ordered
    }
}

impl fmt::Display for OrientationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, role) in Role::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{role:?}={}", self.face_at(role))?;
        }
        Ok(())
    }
}
