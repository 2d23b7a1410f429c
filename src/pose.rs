//! Continuous room rotation and its link to the discrete orientation.
//!
//! A [`Pose`] is a unit quaternion that can hold any in-between value while
//! the room is being dragged or animated. Snapping rounds it back to a
//! 90°-aligned rotation, and [`Pose::nearest_orientation`] reads the discrete
//! [`OrientationState`] off such a pose by checking which face normal lands
//! closest to each role's world direction.
//!
//! Euler angles follow the yaw-pitch-roll convention `Ry * Rx * Rz` with every
//! angle reported in `[0, 360)`.

use cgmath::{Deg, InnerSpace, Matrix3, Quaternion, Rad, Rotation, Rotation3, Vector3};

use crate::orientation::{Axis, Face, Generator, OrientationState, Role};

/// Below this `|cos(pitch)|` the yaw and roll axes coincide and roll is folded
/// into yaw.
const GIMBAL_LOCK_THRESHOLD: f32 = 1e-4;

/// Euler angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerDegrees {
    /// Rotation about X.
    pub pitch: f32,
    /// Rotation about Y.
    pub yaw: f32,
    /// Rotation about Z.
    pub roll: f32,
}

impl EulerDegrees {
    /// Rounds each component independently to the nearest multiple of
    /// `increment`, wrapped into `[0, 360)`.
    pub fn snapped(self, increment: f32) -> Self {
        Self {
            pitch: snap_angle(self.pitch, increment),
            yaw: snap_angle(self.yaw, increment),
            roll: snap_angle(self.roll, increment),
        }
    }
}

/// Rounds an angle to the nearest multiple of `increment`, wrapped into
/// `[0, 360)`. A non-positive increment leaves the angle unrounded.
pub fn snap_angle(degrees: f32, increment: f32) -> f32 {
    if increment <= 1e-4 {
        return degrees;
    }
    let snapped = (degrees / increment).round() * increment;
    wrap_degrees(snapped)
}

fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn axis_vector(direction: [i8; 3]) -> Vector3<f32> {
    Vector3::new(
        f32::from(direction[0]),
        f32::from(direction[1]),
        f32::from(direction[2]),
    )
}

/// Continuous orientation of the room's visual transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose(pub Quaternion<f32>);

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    pub fn identity() -> Self {
        Self(Quaternion::new(1.0, 0.0, 0.0, 0.0))
    }

    /// Exact 90°-aligned pose for a discrete orientation.
    ///
    /// Built from the rotation matrix whose columns are the world directions
    /// of the Right, Top and Front faces, so it does not accumulate error from
    /// composing turns.
    pub fn canonical(orientation: OrientationState) -> Self {
        let column = |face: Face| axis_vector(orientation.role_of(face).world_direction());
        let matrix = Matrix3::from_cols(column(Face::Right), column(Face::Top), column(Face::Front));
        Self(Quaternion::from(matrix).normalize())
    }

    /// Pose from yaw-pitch-roll Euler angles.
    pub fn from_euler(euler: EulerDegrees) -> Self {
        let q = Quaternion::from_angle_y(Deg(euler.yaw))
            * Quaternion::from_angle_x(Deg(euler.pitch))
            * Quaternion::from_angle_z(Deg(euler.roll));
        Self(q.normalize())
    }

    /// Decomposes the pose into yaw-pitch-roll Euler angles in `[0, 360)`.
    pub fn euler(&self) -> EulerDegrees {
        // cgmath matrices are column-major: `m.z.x` is row 0, column 2
        let m = Matrix3::from(self.0);
        let sin_pitch = (-m.z.y).clamp(-1.0, 1.0);
        let pitch = sin_pitch.asin();

        let (yaw, roll) = if pitch.cos().abs() > GIMBAL_LOCK_THRESHOLD {
            (m.z.x.atan2(m.z.z), m.x.y.atan2(m.y.y))
        } else {
            ((-m.x.z).atan2(m.x.x), 0.0)
        };

        EulerDegrees {
            pitch: wrap_degrees(Deg::from(Rad(pitch)).0),
            yaw: wrap_degrees(Deg::from(Rad(yaw)).0),
            roll: wrap_degrees(Deg::from(Rad(roll)).0),
        }
    }

    /// Target of a snap: every Euler component rounded to `increment`.
    pub fn rounded(&self, increment: f32) -> Self {
        Self::from_euler(self.euler().snapped(increment))
    }

    /// Angle in degrees of the shortest rotation between two poses.
    pub fn angle_to(&self, other: Pose) -> f32 {
        let relative = self.0.conjugate() * other.0;
        let half_angle = relative.v.magnitude().atan2(relative.s.abs());
        Deg::from(Rad(2.0 * half_angle)).0
    }

    /// Spherical interpolation along the shortest arc.
    pub fn slerp(from: Pose, to: Pose, amount: f32) -> Pose {
        let to = if from.0.dot(to.0) < 0.0 { -to.0 } else { to.0 };
        Pose(from.0.slerp(to, amount).normalize())
    }

    /// Rotates about a world axis (extrinsic), in degrees.
    #[must_use]
    pub fn rotated_world(&self, axis: Axis, degrees: f32) -> Pose {
        let turn = match axis {
            Axis::X => Quaternion::from_angle_x(Deg(degrees)),
            Axis::Y => Quaternion::from_angle_y(Deg(degrees)),
            Axis::Z => Quaternion::from_angle_z(Deg(degrees)),
        };
        Pose((turn * self.0).normalize())
    }

    /// Applies a generator's quarter turn in world space.
    #[must_use]
    pub fn apply_generator(&self, generator: Generator) -> Pose {
        self.rotated_world(generator.axis(), generator.world_angle_degrees())
    }

    /// World-space outward normal of `face` under this pose.
    pub fn face_normal(&self, face: Face) -> Vector3<f32> {
        self.0.rotate_vector(axis_vector(face.local_normal()))
    }

    /// Discrete orientation this pose is closest to.
    ///
    /// Each role takes the face whose rotated normal has the largest dot
    /// product with the role's world direction. Returns `None` if that
    /// assignment is not one of the 24 rotations, which only happens for
    /// poses far from any aligned one.
    pub fn nearest_orientation(&self) -> Option<OrientationState> {
        let normals = Face::ALL.map(|face| (face, self.face_normal(face)));
        let faces = Role::ALL.map(|role| {
            let direction = axis_vector(role.world_direction());
            normals
                .iter()
                .max_by(|(_, a), (_, b)| a.dot(direction).total_cmp(&b.dot(direction)))
                .map_or(Face::Top, |&(face, _)| face)
        });
        OrientationState::from_roles(faces)
    }
}
