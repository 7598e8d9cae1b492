//! Perspective camera with orbit controls and bounding-box framing

use cadview_core::Aabb;
use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

const MIN_TARGET_DISTANCE: f32 = 1e-3;
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
const FALLBACK_FRAME_OFFSET: f32 = 50.0;

/// A perspective camera orbiting a target point
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Perspective3::new(self.aspect_ratio, self.fov_y, self.near, self.far).into_inner()
    }

    pub fn distance_to_target(&self) -> f32 {
        (self.position - self.target).norm()
    }

    /// Rotate around the target; yaw about the up axis, pitch clamped short
    /// of the poles so the view never flips
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let offset = self.position - self.target;
        let radius = offset.norm().max(MIN_TARGET_DISTANCE);
        let mut cur_yaw = offset.x.atan2(offset.z);
        let mut cur_pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();

        cur_yaw -= yaw;
        cur_pitch = (cur_pitch + pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let horizontal = radius * cur_pitch.cos();
        self.position = self.target
            + Vector3::new(
                horizontal * cur_yaw.sin(),
                radius * cur_pitch.sin(),
                horizontal * cur_yaw.cos(),
            );
    }

    /// Slide position and target in the view plane, scaled by the distance
    /// to the target so panning feels uniform at any zoom level
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(&self.up).normalize();
        let view_up = right.cross(&forward);
        let translation = (right * -dx + view_up * dy) * self.distance_to_target();
        self.position += translation;
        self.target += translation;
    }

    /// Dolly along the view direction; positive zooms in, never crossing
    /// the target
    pub fn zoom(&mut self, amount: f32) {
        let offset = self.position - self.target;
        let scale = (1.0 - amount).max(MIN_TARGET_DISTANCE / offset.norm().max(1e-6));
        self.position = self.target + offset * scale;
    }

    /// Frame a bounding box: look at its center from a diagonal offset of
    /// half the largest dimension on each axis
    pub fn frame(&mut self, aabb: &Aabb) {
        let center = aabb.center();
        let d = aabb.largest_dim();
        let offset = if d > 0.0 { d / 2.0 } else { FALLBACK_FRAME_OFFSET };
        self.target = center;
        self.position = center + Vector3::new(offset, offset, offset);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point3::new(50.0, 50.0, 50.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov_y: 75.0_f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 100_000.0,
        }
    }
}
