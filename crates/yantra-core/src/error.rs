use thiserror::Error;

/// Reasons a [`crate::SceneConfig`] or [`crate::Behavior`] is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("smoothing blend factor must be in (0, 1], got {0}")]
    BlendOutOfRange(f32),
    #[error("{what} sensitivity must be finite and non-negative, got {value}")]
    InvalidSensitivity { what: &'static str, value: f32 },
    #[error("spotlight {what} must be finite and positive, got {value}")]
    SpotLight { what: &'static str, value: f32 },
    #[error("secondary viewport fraction must be in (0, 1], got {0}")]
    ViewportFraction(f32),
    #[error("label {label:?} needs a positive radius, got {radius}")]
    LabelRadius { label: String, radius: f32 },
    #[error("nav box {title:?} needs positive half extents")]
    NavBoxExtents { title: String },
    #[error("headline text is empty")]
    EmptyHeadline,
    #[error("unknown preset {0:?} (expected classic, torch or explorer)")]
    UnknownPreset(String),
}
