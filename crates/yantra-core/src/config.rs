//! Scene configuration.
//!
//! A [`SceneConfig`] splits into what is placed in the scene
//! ([`SceneLayout`]) and how it reacts to the pointer and the clock
//! ([`Behavior`]). The page iterations that only differ in tuning are
//! expressed as [`Preset`]s of the same behavior type.

use crate::constants::*;
use crate::error::ConfigError;
use glam::Vec3;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub struct LabelConfig {
    pub text: String,
    pub anchor: Vec3,
    /// Visible while the aim point is strictly closer than this.
    pub radius: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavBox {
    pub title: String,
    pub center: Vec3,
    pub half_extents: Vec3,
    /// Fragment navigated to when the box is clicked, e.g. `#contact`.
    pub target: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneLayout {
    pub headline: String,
    pub font_size: f32,
    pub labels: Vec<LabelConfig>,
    pub nav_boxes: Vec<NavBox>,
}

impl Default for SceneLayout {
    fn default() -> Self {
        let mut labels = Vec::with_capacity(NAV_ITEMS.len());
        let mut nav_boxes = Vec::with_capacity(NAV_ITEMS.len());
        for (i, (title, target)) in NAV_ITEMS.iter().enumerate() {
            let center = nav_box_center(i);
            nav_boxes.push(NavBox {
                title: (*title).to_string(),
                center,
                half_extents: Vec3::splat(NAV_BOX_HALF_EXTENT),
                target: (*target).to_string(),
            });
            labels.push(LabelConfig {
                text: (*title).to_string(),
                anchor: center + Vec3::new(0.0, LABEL_OFFSET_Y, 0.0),
                radius: LABEL_RADIUS,
            });
        }
        Self {
            headline: HEADLINE.to_string(),
            font_size: HEADLINE_FONT_SIZE,
            labels,
            nav_boxes,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextMotion {
    /// Constant increment around +Y every frame.
    Spin { radians_per_frame: f32 },
    /// Yaw/pitch mapped directly from the pointer.
    PointerFollow { max_yaw: f32, max_pitch: f32 },
}

impl TextMotion {
    pub fn default_spin() -> Self {
        Self::Spin {
            radians_per_frame: SPIN_RADIANS_PER_FRAME,
        }
    }

    pub fn default_follow() -> Self {
        Self::PointerFollow {
            max_yaw: FOLLOW_MAX_YAW,
            max_pitch: FOLLOW_MAX_PITCH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightConfig {
    pub sensitivity: f32,
    /// Per-frame blend toward the aim point; `None` snaps.
    pub smoothing: Option<f32>,
    pub position: Vec3,
    /// Track the target in x/y, keeping `position.z`.
    pub follow_position: bool,
    /// Full aperture of the spotlight cone.
    pub cone_radians: f32,
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            sensitivity: AIM_SENSITIVITY,
            smoothing: None,
            position: Vec3::from_array(SPOTLIGHT_POSITION),
            follow_position: false,
            cone_radians: SPOTLIGHT_CONE_RADIANS,
            intensity: SPOTLIGHT_INTENSITY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LookAt {
    Fixed(Vec3),
    /// The camera's own pointer-derived point on the z = 0 plane.
    Aim,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Bottom-right corner, inset by a margin.
    Corner { margin_px: u32 },
    /// Centered on the pointer, clamped inside the canvas.
    FollowPointer,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Share of each canvas dimension covered by the sub-viewport.
    pub fraction: f32,
    pub placement: Placement,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SecondaryCameraConfig {
    pub sensitivity: f32,
    pub height: f32,
    pub look_at: LookAt,
    pub viewport: ViewportConfig,
}

impl Default for SecondaryCameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: SECONDARY_SENSITIVITY,
            height: SECONDARY_HEIGHT,
            look_at: LookAt::Fixed(Vec3::ZERO),
            viewport: ViewportConfig {
                fraction: SECONDARY_VIEWPORT_FRACTION,
                placement: Placement::Corner {
                    margin_px: SECONDARY_VIEWPORT_MARGIN_PX,
                },
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowConfig {
    pub base: f32,
    pub amplitude: f32,
    pub hz: f32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            base: GLOW_BASE,
            amplitude: GLOW_AMPLITUDE,
            hz: GLOW_HZ,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Behavior {
    pub motion: TextMotion,
    pub light: LightConfig,
    pub secondary: Option<SecondaryCameraConfig>,
    pub glow: GlowConfig,
}

impl Default for Behavior {
    fn default() -> Self {
        Self::preset(Preset::Classic)
    }
}

impl Behavior {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Classic => Self {
                motion: TextMotion::default_spin(),
                light: LightConfig::default(),
                secondary: None,
                glow: GlowConfig::default(),
            },
            Preset::Torch => Self {
                motion: TextMotion::default_follow(),
                light: LightConfig {
                    smoothing: Some(SMOOTHING_BLEND),
                    follow_position: true,
                    ..LightConfig::default()
                },
                secondary: None,
                glow: GlowConfig::default(),
            },
            Preset::Explorer => Self {
                motion: TextMotion::default_spin(),
                light: LightConfig {
                    smoothing: Some(SMOOTHING_BLEND),
                    ..LightConfig::default()
                },
                secondary: Some(SecondaryCameraConfig {
                    look_at: LookAt::Aim,
                    viewport: ViewportConfig {
                        fraction: SECONDARY_VIEWPORT_FRACTION,
                        placement: Placement::FollowPointer,
                    },
                    ..SecondaryCameraConfig::default()
                }),
                glow: GlowConfig::default(),
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_sensitivity("light", self.light.sensitivity)?;
        check_spot("cone", self.light.cone_radians)?;
        check_spot("intensity", self.light.intensity)?;
        if let Some(blend) = self.light.smoothing {
            if !(blend > 0.0 && blend <= 1.0) {
                return Err(ConfigError::BlendOutOfRange(blend));
            }
        }
        if let Some(sec) = &self.secondary {
            check_sensitivity("secondary camera", sec.sensitivity)?;
            let f = sec.viewport.fraction;
            if !(f > 0.0 && f <= 1.0) {
                return Err(ConfigError::ViewportFraction(f));
            }
        }
        Ok(())
    }
}

fn check_sensitivity(what: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSensitivity { what, value })
    }
}

fn check_spot(what: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::SpotLight { what, value })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Preset {
    /// Spinning headline, fixed spotlight.
    #[default]
    Classic,
    /// Pointer-follow headline with a smoothed torch.
    Torch,
    /// Spinning headline plus a pointer-following mini-map camera.
    Explorer,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Classic, Preset::Torch, Preset::Explorer];
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" | "spin" => Ok(Preset::Classic),
            "torch" => Ok(Preset::Torch),
            "explorer" | "minimap" => Ok(Preset::Explorer),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Preset::Classic => "classic",
            Preset::Torch => "torch",
            Preset::Explorer => "explorer",
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneConfig {
    pub layout: SceneLayout,
    pub behavior: Behavior,
}

impl SceneConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            layout: SceneLayout::default(),
            behavior: Behavior::preset(preset),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.headline.trim().is_empty() {
            return Err(ConfigError::EmptyHeadline);
        }
        for label in &self.layout.labels {
            if !(label.radius > 0.0) {
                return Err(ConfigError::LabelRadius {
                    label: label.text.clone(),
                    radius: label.radius,
                });
            }
        }
        for nav in &self.layout.nav_boxes {
            if !nav.half_extents.cmpgt(Vec3::ZERO).all() {
                return Err(ConfigError::NavBoxExtents {
                    title: nav.title.clone(),
                });
            }
        }
        self.behavior.validate()
    }
}
