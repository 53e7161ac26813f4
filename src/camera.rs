use glam::{Mat4, Vec3};

use crate::player::{Player, Rotation};

/// Perspective projection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 65.0,
            near: 0.1,
            far: 60.0,
        }
    }
}

impl Projection {
    /// Right-handed perspective with wgpu's `[0, 1]` depth range.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), aspect, self.near, self.far)
    }
}

/// A snapshot of where the player is and where it looks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Rotation,
    pub projection: Projection,
}

impl Camera {
    pub fn from_player(player: &Player) -> Self {
        Self {
            position: player.position,
            rotation: player.rotation,
            projection: Projection::default(),
        }
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// World to camera space.
    ///
    /// Turns the world by yaw about +Y, tilts it by `-pitch` about the
    /// yawed X axis `(cos yaw, 0, sin yaw)`, then moves it by `-position`.
    pub fn view_matrix(&self) -> Mat4 {
        let yaw = self.rotation.yaw.to_radians();
        let pitch = self.rotation.pitch.to_radians();
        let tilt_axis = Vec3::new(yaw.cos(), 0.0, yaw.sin());

        Mat4::from_axis_angle(Vec3::Y, yaw)
            * Mat4::from_axis_angle(tilt_axis, -pitch)
            * Mat4::from_translation(-self.position)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection.matrix(aspect)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Unit vector the camera looks along, in world space.
    pub fn forward(&self) -> Vec3 {
        self.view_matrix()
            .inverse()
            .transform_vector3(Vec3::NEG_Z)
            .normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::Movement;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::default();
        assert!(camera.forward().abs_diff_eq(Vec3::NEG_Z, 1e-5));
        let vp = camera.view_projection(800.0 / 480.0);
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn view_moves_world_opposite_to_camera() {
        let player = Player::new().at([1.0, 2.0, 3.0]);
        let view = Camera::from_player(&player).view_matrix();
        assert!(
            view.transform_point3(Vec3::new(1.0, 2.0, 3.0))
                .abs_diff_eq(Vec3::ZERO, 1e-5)
        );
    }

    #[test]
    fn forward_motion_matches_look_direction() {
        for yaw in [0.0, 30.0, 90.0, 135.0, 270.0, 359.0] {
            let mut player = Player::new().facing(yaw, 0.0);
            player.press(Movement::Forward);
            let camera = Camera::from_player(&player);
            assert!(
                camera.forward().abs_diff_eq(player.motion_vector(), 1e-4),
                "yaw {yaw}: {:?} vs {:?}",
                camera.forward(),
                player.motion_vector()
            );
        }
    }

    #[test]
    fn positive_pitch_looks_up() {
        for yaw in [0.0, 45.0, 200.0] {
            let player = Player::new().facing(yaw, 30.0);
            let forward = Camera::from_player(&player).forward();
            assert!((forward.y - 30.0_f32.to_radians().sin()).abs() < 1e-4);
        }
    }

    #[test]
    fn block_in_front_is_inside_the_frustum() {
        let camera = Camera::default();
        let clip = camera.view_projection(800.0 / 480.0) * Vec3::new(0.5, 0.5, -1.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn far_plane_clips_distant_points() {
        let camera = Camera::default();
        let clip = camera.view_projection(1.0) * Vec3::new(0.0, 0.0, -61.0).extend(1.0);
        assert!(clip.z / clip.w > 1.0);
    }
}
