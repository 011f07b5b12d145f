//! Scene node handles written by the frame update loop.
//!
//! Handles are optional: the renderer mounts asynchronously and attaches them
//! once it exists, so the first frames may run against empty slots.

use crate::config::SceneConfig;
use glam::{EulerRot, Mat4, Quat, Vec3};
use smallvec::SmallVec;

/// Position plus Euler XYZ orientation (radians).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_rotation_translation(q, self.position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub target: Vec3,
}

impl SpotLight {
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelNode {
    pub anchor: Vec3,
    pub radius: f32,
    pub visible: bool,
}

#[derive(Clone, Debug, Default)]
pub struct SceneNodes {
    pub text: Option<Transform>,
    pub spotlight: Option<SpotLight>,
    pub secondary_camera: Option<CameraPose>,
    pub labels: SmallVec<[LabelNode; 4]>,
}

impl SceneNodes {
    pub fn attach_text(&mut self, transform: Transform) {
        self.text = Some(transform);
    }

    pub fn attach_spotlight(&mut self, light: SpotLight) {
        self.spotlight = Some(light);
    }

    /// Replaces any previous secondary camera; there is never more than one.
    pub fn attach_secondary_camera(&mut self, pose: CameraPose) {
        self.secondary_camera = Some(pose);
    }

    pub fn detach_secondary_camera(&mut self) {
        self.secondary_camera = None;
    }

    pub fn attach_labels(&mut self, config: &SceneConfig) {
        self.labels = config
            .layout
            .labels
            .iter()
            .map(|l| LabelNode {
                anchor: l.anchor,
                radius: l.radius,
                visible: false,
            })
            .collect();
    }

    /// Attach every node the config describes, in their rest pose.
    pub fn attach_from_config(&mut self, config: &SceneConfig) {
        self.attach_text(Transform::default());
        let light = &config.behavior.light;
        self.attach_spotlight(SpotLight {
            position: light.position,
            target: Vec3::ZERO,
        });
        match &config.behavior.secondary {
            Some(sec) => self.attach_secondary_camera(CameraPose {
                eye: Vec3::new(0.0, 0.0, sec.height),
                target: Vec3::ZERO,
            }),
            None => self.detach_secondary_camera(),
        }
        self.attach_labels(config);
    }

    pub fn detach_all(&mut self) {
        *self = Self::default();
    }
}
