// Presets, parsing and validation.

use glam::Vec3;
use yantra_core::*;

#[test]
fn every_preset_validates() {
    for p in Preset::ALL {
        let config = SceneConfig::from_preset(p);
        assert_eq!(config.validate(), Ok(()), "preset {p}");
    }
}

#[test]
fn classic_spins_with_fixed_light() {
    let b = Behavior::preset(Preset::Classic);
    assert_eq!(
        b.motion,
        TextMotion::Spin {
            radians_per_frame: 0.01
        }
    );
    assert!(b.secondary.is_none());
    assert!(b.light.smoothing.is_none());
    assert_eq!(Behavior::default(), b);
}

#[test]
fn presets_parse_and_print() {
    for p in Preset::ALL {
        assert_eq!(p.to_string().parse::<Preset>(), Ok(p));
    }
    assert_eq!(" Torch ".parse::<Preset>(), Ok(Preset::Torch));
    assert_eq!("minimap".parse::<Preset>(), Ok(Preset::Explorer));
    assert_eq!(
        "disco".parse::<Preset>(),
        Err(ConfigError::UnknownPreset("disco".to_string()))
    );
}

#[test]
fn validation_rejects_bad_values() {
    let mut c = SceneConfig::default();
    c.behavior.light.smoothing = Some(0.0);
    assert_eq!(c.validate(), Err(ConfigError::BlendOutOfRange(0.0)));

    let mut c = SceneConfig::default();
    c.behavior.light.sensitivity = f32::NAN;
    assert!(matches!(
        c.validate(),
        Err(ConfigError::InvalidSensitivity { what: "light", .. })
    ));

    let mut c = SceneConfig::from_preset(Preset::Explorer);
    if let Some(sec) = c.behavior.secondary.as_mut() {
        sec.viewport.fraction = 1.5;
    }
    assert_eq!(c.validate(), Err(ConfigError::ViewportFraction(1.5)));

    let mut c = SceneConfig::default();
    c.layout.labels[1].radius = 0.0;
    assert!(matches!(c.validate(), Err(ConfigError::LabelRadius { .. })));

    let mut c = SceneConfig::default();
    c.layout.nav_boxes[0].half_extents = Vec3::new(1.0, 0.0, 1.0);
    assert!(matches!(c.validate(), Err(ConfigError::NavBoxExtents { .. })));

    let mut c = SceneConfig::default();
    c.behavior.light.cone_radians = f32::NAN;
    assert!(matches!(
        c.validate(),
        Err(ConfigError::SpotLight { what: "cone", .. })
    ));

    let mut c = SceneConfig::default();
    c.behavior.light.intensity = -1.0;
    assert_eq!(
        c.validate(),
        Err(ConfigError::SpotLight {
            what: "intensity",
            value: -1.0
        })
    );

    let mut c = SceneConfig::default();
    c.layout.headline = "   ".to_string();
    assert_eq!(c.validate(), Err(ConfigError::EmptyHeadline));
}

#[test]
fn default_layout_pairs_labels_with_boxes() {
    let layout = SceneLayout::default();
    assert_eq!(layout.labels.len(), layout.nav_boxes.len());
    for (label, nav) in layout.labels.iter().zip(&layout.nav_boxes) {
        assert_eq!(label.text, nav.title);
        assert!(label.anchor.y > nav.center.y);
        assert!(nav.target.starts_with('#'));
    }
}
