use glam::Vec3;

/// World-space pose for gameplay entities. Rotation is stored as Euler angles
/// in radians with a Z-up convention: yaw about +Z (from +X toward +Y), pitch
/// about the local right axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Horizontal facing direction (pitch/roll ignored).
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), self.yaw.sin(), 0.0)
    }

    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), -self.yaw.cos(), 0.0)
    }
}

/// View pose the host camera system writes every frame. The core only reads
/// it: pickup interpolation targets, crosshair traces and weapon aim all
/// derive from this pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub location: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl CameraRig {
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.cos(),
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
        )
    }

    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), -self.yaw.cos(), 0.0)
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }
}

/// Velocity state mirrored in from the host movement component. Drives the
/// crosshair velocity and in-air spread factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub velocity: Vec3,
    pub grounded: bool,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            grounded: true,
        }
    }
}

impl Kinematics {
    pub fn planar_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, self.velocity.y, 0.0).length()
    }
}
