//! First-person fly player: position, look angles and movement intent.
//!
//! The player knows nothing about windows or keys. The app shell feeds it
//! mouse deltas and [`Movement`] presses, then calls [`Player::update`] once
//! per frame with the elapsed time.
//!
//! # Conventions
//!
//! Angles are in degrees. With `yaw = 0` and `pitch = 0` the player looks
//! down `-Z`; increasing yaw turns right, increasing pitch looks up.
//!
//! ```
//! use blockview::{Movement, Player};
//!
//! let mut player = Player::new();
//! player.press(Movement::Forward);
//! player.update(0.2);
//! assert!((player.position.z + 1.0).abs() < 1e-5);
//! ```

use glam::Vec3;

use crate::controls::Movement;

/// Degrees of rotation per unit of mouse motion.
pub const MOUSE_SENSITIVITY: f32 = 0.15;

/// Movement speed in units per second.
pub const MOVE_SPEED: f32 = 5.0;

/// Pitch limit in degrees, both up and down.
pub const PITCH_LIMIT: f32 = 90.0;

/// Look direction in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    /// Horizontal angle, kept in `[0, 360)`.
    pub yaw: f32,
    /// Vertical angle, kept in `[-90, 90]`.
    pub pitch: f32,
}

/// Movement intent, one axis per component, each -1, 0 or 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Strafe {
    /// -1 moves forward, 1 moves backward.
    pub longitudinal: i8,
    /// 1 moves up, -1 moves down.
    pub vertical: i8,
    /// -1 moves left, 1 moves right.
    pub lateral: i8,
}

/// Fold `yaw` into `[0, 360)`.
///
/// `rem_euclid` on `f32` can round a tiny negative angle up to exactly 360.
fn wrap_yaw(yaw: f32) -> f32 {
    let wrapped = yaw.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Player {
    pub position: Vec3,
    pub rotation: Rotation,
    pub strafe: Strafe,
}

impl Player {
    /// A player at the origin looking down `-Z`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, position: impl Into<Vec3>) -> Self {
        self.position = position.into();
        self
    }

    pub fn facing(mut self, yaw: f32, pitch: f32) -> Self {
        self.rotation = Rotation {
            yaw: wrap_yaw(yaw),
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
        };
        self
    }

    /// Apply a mouse delta. `dy` is positive when the mouse moves up.
    pub fn mouse_motion(&mut self, dx: f32, dy: f32) {
        let Rotation { yaw, pitch } = self.rotation;
        self.rotation = Rotation {
            yaw: wrap_yaw(yaw + dx * MOUSE_SENSITIVITY),
            pitch: (pitch + dy * MOUSE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT),
        };
    }

    /// Start moving along `movement`, replacing any intent on that axis.
    pub fn press(&mut self, movement: Movement) {
        let (axis, value) = self.axis(movement);
        *axis = value;
    }

    /// Stop moving on the axis of `movement`.
    ///
    /// This clears the whole axis, even if the opposite key is still held.
    pub fn release(&mut self, movement: Movement) {
        let (axis, _) = self.axis(movement);
        *axis = 0;
    }

    fn axis(&mut self, movement: Movement) -> (&mut i8, i8) {
        match movement {
            Movement::Forward => (&mut self.strafe.longitudinal, -1),
            Movement::Backward => (&mut self.strafe.longitudinal, 1),
            Movement::Left => (&mut self.strafe.lateral, -1),
            Movement::Right => (&mut self.strafe.lateral, 1),
            Movement::Up => (&mut self.strafe.vertical, 1),
            Movement::Down => (&mut self.strafe.vertical, -1),
        }
    }

    /// World-space direction of the current intent.
    ///
    /// Horizontal movement is a unit vector turned by yaw and ignores pitch;
    /// vertical movement is added on top unscaled.
    pub fn motion_vector(&self) -> Vec3 {
        let Strafe {
            longitudinal,
            vertical,
            lateral,
        } = self.strafe;
        let (mut x, y, mut z) = (longitudinal as f32, vertical as f32, lateral as f32);

        if longitudinal != 0 || lateral != 0 {
            let strafe = x.atan2(z).to_degrees();
            let angle = (self.rotation.yaw + strafe).to_radians();
            x = angle.cos();
            z = angle.sin();
        }

        Vec3::new(x, y, z)
    }

    /// Advance the position by `dt` seconds of movement.
    pub fn update(&mut self, dt: f32) {
        self.position += self.motion_vector() * dt * MOVE_SPEED;
    }
}
