//! Per-frame scene update.
//!
//! [`FrameUpdater::update`] runs once per rendered frame. It reads the latest
//! pointer sample, the elapsed clock and the canvas size, and writes derived
//! transforms into whatever [`SceneNodes`] are attached. The only state kept
//! across frames is the spin frame counter; the smoothed spotlight target
//! lives in the spotlight node itself.

use crate::config::{Behavior, LookAt, SecondaryCameraConfig, TextMotion};
use crate::error::ConfigError;
use crate::pointer::PointerState;
use crate::scene::{CameraPose, SceneNodes};
use crate::viewport::{secondary_viewport, CanvasSize, ViewportRect};
use glam::Vec3;
use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub pointer: PointerState,
    pub elapsed_sec: f32,
    pub canvas: CanvasSize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameOutput {
    /// Region for the secondary render pass, if a secondary camera is live.
    pub secondary_viewport: Option<ViewportRect>,
    /// Aim point derived from the pointer this frame (unsmoothed).
    pub aim: Vec3,
    /// Headline emissive multiplier.
    pub glow: f32,
}

pub struct FrameUpdater {
    behavior: Behavior,
    frames: u64,
}

impl FrameUpdater {
    pub fn new(behavior: Behavior) -> Result<Self, ConfigError> {
        behavior.validate()?;
        Ok(Self {
            behavior,
            frames: 0,
        })
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Swap behavior at runtime. The spin counter is kept so switching
    /// presets does not snap the headline back to its rest pose.
    pub fn reconfigure(&mut self, behavior: Behavior) -> Result<(), ConfigError> {
        if let Err(e) = behavior.validate() {
            log::warn!("[update] rejected behavior: {}", e);
            return Err(e);
        }
        log::debug!("[update] behavior changed: {:?}", behavior);
        self.behavior = behavior;
        Ok(())
    }

    pub fn update(&mut self, input: FrameInput, nodes: &mut SceneNodes) -> FrameOutput {
        self.frames += 1;
        let pointer = input.pointer;
        let light = self.behavior.light;

        if let Some(text) = nodes.text.as_mut() {
            match self.behavior.motion {
                TextMotion::Spin { radians_per_frame } => {
                    // pitch/roll left over from pointer-follow must not survive
                    let yaw = spin_angle(self.frames, radians_per_frame);
                    text.rotation = Vec3::new(0.0, yaw, 0.0);
                }
                TextMotion::PointerFollow { max_yaw, max_pitch } => {
                    text.rotation = follow_rotation(pointer, max_yaw, max_pitch);
                }
            }
        }

        let aim = aim_point(pointer, light.sensitivity);
        if let Some(spot) = nodes.spotlight.as_mut() {
            spot.target = match light.smoothing {
                Some(blend) => lerp_toward(spot.target, aim, blend),
                None => aim,
            };
            spot.position = if light.follow_position {
                Vec3::new(spot.target.x, spot.target.y, light.position.z)
            } else {
                light.position
            };
        }

        for label in nodes.labels.iter_mut() {
            label.visible = label_visible(aim, label.anchor, label.radius);
        }

        let secondary_viewport = match (&self.behavior.secondary, nodes.secondary_camera.as_mut()) {
            (Some(cfg), Some(pose)) => {
                *pose = secondary_pose(pointer, cfg);
                Some(secondary_viewport(pointer, input.canvas, &cfg.viewport))
            }
            _ => None,
        };

        FrameOutput {
            secondary_viewport,
            aim,
            glow: glow_level(
                input.elapsed_sec,
                self.behavior.glow.base,
                self.behavior.glow.amplitude,
                self.behavior.glow.hz,
            ),
        }
    }
}

/// Pointer scaled onto the z = 0 plane.
#[inline]
pub fn aim_point(pointer: PointerState, sensitivity: f32) -> Vec3 {
    Vec3::new(pointer.x * sensitivity, pointer.y * sensitivity, 0.0)
}

#[inline]
pub fn lerp_toward(previous: Vec3, target: Vec3, blend: f32) -> Vec3 {
    previous + (target - previous) * blend
}

/// `frames * increment` wrapped into `[0, 2pi)`.
#[inline]
pub fn spin_angle(frames: u64, radians_per_frame: f32) -> f32 {
    (frames as f64 * radians_per_frame as f64).rem_euclid(TAU) as f32
}

#[inline]
pub fn follow_rotation(pointer: PointerState, max_yaw: f32, max_pitch: f32) -> Vec3 {
    Vec3::new(-pointer.y * max_pitch, pointer.x * max_yaw, 0.0)
}

/// Strict: a point exactly on the radius is not visible.
#[inline]
pub fn label_visible(point: Vec3, anchor: Vec3, radius: f32) -> bool {
    point.distance(anchor) < radius
}

pub fn secondary_pose(pointer: PointerState, cfg: &SecondaryCameraConfig) -> CameraPose {
    let ground = aim_point(pointer, cfg.sensitivity);
    let target = match cfg.look_at {
        LookAt::Fixed(p) => p,
        LookAt::Aim => ground,
    };
    let mut eye = Vec3::new(ground.x, ground.y, cfg.height);
    if eye.abs_diff_eq(target, 1e-4) {
        // look_at_rh degenerates when eye == target
        eye.z += 1.0;
    }
    CameraPose { eye, target }
}

#[inline]
pub fn glow_level(elapsed_sec: f32, base: f32, amplitude: f32, hz: f32) -> f32 {
    let phase = std::f32::consts::TAU * hz * elapsed_sec;
    (base + amplitude * phase.sin()).max(0.0)
}
