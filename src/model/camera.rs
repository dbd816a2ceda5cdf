use glam::{Mat4, Vec3};

/// Where the player wants to go, each axis in {-1, 0, 1}.
///
/// `forward_back` is -1 for forward and 1 for backward, `left_right` is -1 for left and 1 for right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Strafe {
    pub forward_back: i8,
    pub left_right: i8,
}

impl Strafe {
    pub fn new(forward_back: i8, left_right: i8) -> Self {
        Self {
            forward_back: forward_back.signum(),
            left_right: left_right.signum(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.forward_back == 0 && self.left_right == 0
    }
}

/// Orientation of the player, in degrees.
///
/// `yaw` turns around the vertical axis, `pitch` is the angle from the ground plane:
/// -90 looks straight down, 90 straight up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotate by the given deltas. Pitch stays within [-90, 90].
    pub fn look(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-90.0, 90.0);
    }

    /// Unit vector in the direction the player is looking
    pub fn sight_vector(&self) -> Vec3 {
        // shrink the horizontal part when looking up or down
        let m = self.pitch.to_radians().cos();
        let dy = self.pitch.to_radians().sin();
        let yaw = (self.yaw - 90.0).to_radians();
        Vec3::new(yaw.cos() * m, dy, yaw.sin() * m)
    }

    /// Direction of travel for `strafe`; zero when not moving.
    ///
    /// Walking stays in the ground plane. Flying forward or backward follows the pitch,
    /// flying sideways does not.
    pub fn motion_vector(&self, strafe: Strafe, flying: bool) -> Vec3 {
        if strafe.is_idle() {
            return Vec3::ZERO;
        }
        let strafe_angle = (strafe.forward_back as f32)
            .atan2(strafe.left_right as f32)
            .to_degrees();
        let x_angle = (self.yaw + strafe_angle).to_radians();

        if !flying {
            return Vec3::new(x_angle.cos(), 0.0, x_angle.sin());
        }

        let pitch = self.pitch.to_radians();
        let (mut m, mut dy) = (pitch.cos(), pitch.sin());
        if strafe.left_right != 0 {
            dy = 0.0;
            m = 1.0;
        }
        if strafe.forward_back > 0 {
            // moving backwards
            dy = -dy;
        }
        Vec3::new(x_angle.cos() * m, dy, x_angle.sin() * m)
    }

    /// View matrix for an eye at `eye` looking along the sight vector
    pub fn view_matrix(&self, eye: Vec3) -> Mat4 {
        let forward = self.sight_vector();
        // looking straight up or down leaves no horizontal part to orient by
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-6 {
            let yaw = (self.yaw - 90.0).to_radians();
            Vec3::new(yaw.cos(), 0.0, yaw.sin()) * -forward.y.signum()
        } else {
            Vec3::Y
        };
        Mat4::look_to_rh(eye, forward, up)
    }
}
