use std::time::Duration;

use crate::scale::Scale;
use crate::timing::{CAMERA_TRANSITION_UNITS, units};

const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        Vec3::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    pub fn scaled(self, factor: f32) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Where the camera sits for each scale, always looking at the origin.
pub fn camera_preset(scale: Scale) -> Vec3 {
    match scale {
        Scale::Earth => Vec3::new(0.0, 2.0, 12.0),
        Scale::Solar => Vec3::new(0.0, 40.0, 100.0),
        Scale::Galaxy => Vec3::new(0.0, 120.0, 280.0),
        Scale::Universe => Vec3::new(0.0, 350.0, 800.0),
    }
}

/// Quadratic ease-in-out on `0.0..=1.0`.
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Animates the camera between scale presets.
///
/// A new target always starts from wherever the camera currently is, which
/// replaces any move still in flight. Under user control the camera holds
/// still and only manual zoom applies; releasing control resumes the move
/// toward the latest target.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    from: Vec3,
    to: Vec3,
    started: Duration,
    user_control: bool,
    held: Vec3,
    zoom: f32,
}

impl CameraRig {
    /// A rig resting at the preset of `scale`.
    pub fn new(scale: Scale) -> Self {
        let preset = camera_preset(scale);
        Self {
            from: preset,
            to: preset,
            started: Duration::ZERO,
            user_control: false,
            held: preset,
            zoom: 1.0,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.to
    }

    pub fn user_control(&self) -> bool {
        self.user_control
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Starts moving toward the preset of `scale`.
    pub fn retarget(&mut self, scale: Scale, now: Duration) {
        if !self.user_control {
            self.from = self.animated_position(now);
            self.started = now;
        }
        self.to = camera_preset(scale);
    }

    pub fn set_user_control(&mut self, enabled: bool, now: Duration) {
        match (self.user_control, enabled) {
            (false, true) => {
                self.held = self.animated_position(now);
                self.zoom = 1.0;
            }
            (true, false) => {
                self.from = self.position(now);
                self.started = now;
            }
            _ => {}
        }
        self.user_control = enabled;
    }

    /// Multiplies the manual zoom; ignored unless the user has control.
    pub fn apply_zoom(&mut self, factor: f32) {
        if self.user_control && factor > 0.0 {
            self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn position(&self, now: Duration) -> Vec3 {
        if self.user_control {
            self.held.scaled(1.0 / self.zoom)
        } else {
            self.animated_position(now)
        }
    }

    /// Distance from the camera to the origin.
    pub fn distance(&self, now: Duration) -> f32 {
        self.position(now).length()
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        !self.user_control && self.from != self.to && now < self.started + transition()
    }

    fn animated_position(&self, now: Duration) -> Vec3 {
        let elapsed = now.saturating_sub(self.started).as_secs_f32();
        let progress = elapsed / transition().as_secs_f32();
        self.from.lerp(self.to, ease_in_out_quad(progress))
    }
}

fn transition() -> Duration {
    units(CAMERA_TRANSITION_UNITS)
}
