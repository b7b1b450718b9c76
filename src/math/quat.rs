use nalgebra::Vector3;

/// Unit quaternion (w, x, y, z) representing a rotation.
///
/// Invariant: `norm() == 1` to within `1e-6`, re-normalized by the
/// integrator after every committed step. `normalize` of a zero-length
/// value returns the identity rather than signalling — callers must not
/// rely on preserving direction in that degenerate case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quat {
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    pub fn norm(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns the identity quaternion if `self` has (near) zero norm.
    pub fn normalize(&self) -> Self {
        let n = self.norm();
        if n < 1e-12 {
            Self::identity()
        } else {
            Self::new(self.w / n, self.x / n, self.y / n, self.z / n)
        }
    }

    /// Hamilton product `self ⊗ rhs`.
    pub fn hamilton(&self, rhs: &Quat) -> Quat {
        Quat::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }

    /// Conjugate `q* = (w, -x, -y, -z)`.
    pub fn conjugate(&self) -> Quat {
        Quat::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Construct a unit quaternion from an axis and angle (rad).
    ///
    /// The axis is normalized first; a zero-length axis yields the
    /// identity rotation (no direction to preserve).
    pub fn from_axis_angle(axis: &Vector3<f64>, angle: f64) -> Quat {
        let n = axis.norm();
        if n < 1e-12 {
            return Quat::identity();
        }
        let half = angle * 0.5;
        let s = half.sin();
        let u = axis / n;
        Quat::new(half.cos(), u.x * s, u.y * s, u.z * s)
    }

    /// `rotate(q, v) = q ⊗ (0, v) ⊗ q*`
    pub fn rotate(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let qv = Quat::new(0.0, v.x, v.y, v.z);
        let r = self.hamilton(&qv).hamilton(&self.conjugate());
        Vector3::new(r.x, r.y, r.z)
    }

    /// ZYX intrinsic Euler angles (yaw, pitch, roll), radians.
    ///
    /// Pitch is clamped into `[-1, 1]` before `asin` to guard the
    /// gimbal-lock singularity; at the clamp boundary yaw/roll both
    /// degenerate to a single combined rotation about the vertical axis,
    /// and this returns `roll = 0` by convention.
    pub fn to_euler_zyx(&self) -> (f64, f64, f64) {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);

        let sin_pitch = 2.0 * (w * y - z * x);
        if sin_pitch.abs() >= 1.0 - 1e-9 {
            let pitch = sin_pitch.clamp(-1.0, 1.0).asin();
            let yaw = 2.0 * x.atan2(w) * sin_pitch.signum();
            return (yaw, pitch, 0.0);
        }
        let pitch = sin_pitch.clamp(-1.0, 1.0).asin();

        let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));
        let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));

        (yaw, pitch, roll)
    }

    /// Build a quaternion from ZYX intrinsic Euler angles (yaw, pitch, roll).
    pub fn from_euler_zyx(yaw: f64, pitch: f64, roll: f64) -> Quat {
        let (cy, sy) = ((yaw * 0.5).cos(), (yaw * 0.5).sin());
        let (cp, sp) = ((pitch * 0.5).cos(), (pitch * 0.5).sin());
        let (cr, sr) = ((roll * 0.5).cos(), (roll * 0.5).sin());

        Quat::new(
            cr * cp * cy + sr * sp * sy,
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
        )
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}
