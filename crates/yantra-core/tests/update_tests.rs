// Frame update loop: aim, smoothing, spin, labels and node handling.

use glam::Vec3;
use std::f32::consts::TAU;
use yantra_core::*;

fn input(x: f32, y: f32) -> FrameInput {
    FrameInput {
        pointer: PointerState::new(x, y),
        elapsed_sec: 0.0,
        canvas: CanvasSize::new(800, 600),
    }
}

fn attached(config: &SceneConfig) -> SceneNodes {
    let mut nodes = SceneNodes::default();
    nodes.attach_from_config(config);
    nodes
}

#[test]
fn aim_point_is_pointer_times_sensitivity() {
    assert_eq!(aim_point(PointerState::new(0.0, 0.0), 10.0), Vec3::ZERO);
    assert_eq!(
        aim_point(PointerState::new(1.0, 1.0), 10.0),
        Vec3::new(10.0, 10.0, 0.0)
    );

    // sweep the whole pointer range
    for i in 0..=20 {
        for j in 0..=20 {
            let x = -1.0 + i as f32 * 0.1;
            let y = -1.0 + j as f32 * 0.1;
            let p = PointerState::new(x, y);
            let aim = aim_point(p, 7.5);
            assert!((aim.x - p.x * 7.5).abs() < 1e-5);
            assert!((aim.y - p.y * 7.5).abs() < 1e-5);
            assert_eq!(aim.z, 0.0);
        }
    }
}

#[test]
fn unsmoothed_spotlight_snaps_to_aim() {
    let config = SceneConfig::from_preset(Preset::Classic);
    let mut nodes = attached(&config);
    let mut updater = FrameUpdater::new(config.behavior).unwrap();

    updater.update(input(1.0, 1.0), &mut nodes);
    let spot = nodes.spotlight.unwrap();
    assert_eq!(spot.target, Vec3::new(10.0, 10.0, 0.0));
    // fixed position unless follow_position is set
    assert_eq!(spot.position, config.behavior.light.position);
}

#[test]
fn smoothed_spotlight_blends_one_step() {
    let mut behavior = Behavior::preset(Preset::Classic);
    behavior.light.smoothing = Some(0.05);
    let config = SceneConfig {
        behavior,
        ..SceneConfig::default()
    };
    let mut nodes = attached(&config);
    let previous = Vec3::new(2.0, -3.0, 0.0);
    nodes.spotlight.as_mut().unwrap().target = previous;

    let mut updater = FrameUpdater::new(behavior).unwrap();
    updater.update(input(0.5, 0.25), &mut nodes);

    let target = Vec3::new(5.0, 2.5, 0.0);
    let expected = previous + (target - previous) * 0.05;
    let got = nodes.spotlight.unwrap().target;
    assert!(got.abs_diff_eq(expected, 1e-5), "{got:?} vs {expected:?}");
}

#[test]
fn smoothed_spotlight_converges() {
    let config = SceneConfig::from_preset(Preset::Torch);
    let mut nodes = attached(&config);
    let mut updater = FrameUpdater::new(config.behavior).unwrap();
    for _ in 0..400 {
        updater.update(input(-1.0, 0.5), &mut nodes);
    }
    let spot = nodes.spotlight.unwrap();
    assert!(spot.target.abs_diff_eq(Vec3::new(-10.0, 5.0, 0.0), 1e-3));
    // torch keeps its height while tracking in x/y
    assert_eq!(spot.position.z, config.behavior.light.position.z);
    assert!((spot.position.x - spot.target.x).abs() < 1e-6);
}

#[test]
fn spin_after_n_frames_is_n_increments_mod_tau() {
    let config = SceneConfig::from_preset(Preset::Classic);
    let mut nodes = attached(&config);
    let mut updater = FrameUpdater::new(config.behavior).unwrap();

    let frames = 1000u64;
    for k in 0..frames {
        // pointer must not matter
        let x = if k % 2 == 0 { 0.9 } else { -0.4 };
        updater.update(input(x, -x), &mut nodes);
    }
    let expected = (frames as f32 * 0.01).rem_euclid(TAU);
    let got = nodes.text.unwrap().rotation.y;
    assert!((got - expected).abs() < 1e-4, "{got} vs {expected}");
    assert!((0.0..TAU).contains(&got));
    assert_eq!(updater.frames(), frames);
}

#[test]
fn spin_angle_wraps() {
    assert_eq!(spin_angle(0, 0.01), 0.0);
    let a = spin_angle(700, 0.01); // 7 rad
    assert!((a - (7.0 - TAU)).abs() < 1e-5);
}

#[test]
fn pointer_follow_maps_pointer_to_angles() {
    let config = SceneConfig::from_preset(Preset::Torch);
    let mut nodes = attached(&config);
    let mut updater = FrameUpdater::new(config.behavior).unwrap();
    let TextMotion::PointerFollow { max_yaw, max_pitch } = config.behavior.motion else {
        panic!("torch preset should follow the pointer");
    };

    updater.update(input(1.0, 0.5), &mut nodes);
    let rot = nodes.text.unwrap().rotation;
    assert!((rot.y - max_yaw).abs() < 1e-6);
    assert!((rot.x + 0.5 * max_pitch).abs() < 1e-6);

    updater.update(input(0.0, 0.0), &mut nodes);
    assert_eq!(nodes.text.unwrap().rotation, Vec3::ZERO);
}

#[test]
fn label_visibility_is_strict() {
    let anchor = Vec3::new(3.0, 4.0, 0.0);
    assert!(label_visible(Vec3::ZERO, anchor, 5.01));
    // distance exactly equal to the radius is hidden
    assert!(!label_visible(Vec3::ZERO, anchor, 5.0));
    assert!(!label_visible(Vec3::ZERO, anchor, 4.0));
}

#[test]
fn labels_follow_aim_point() {
    let config = SceneConfig::from_preset(Preset::Classic);
    let mut nodes = attached(&config);
    let mut updater = FrameUpdater::new(config.behavior).unwrap();

    // center: every label sits far below the headline
    updater.update(input(0.0, 0.0), &mut nodes);
    assert!(nodes.labels.iter().all(|l| !l.visible));

    // aim straight at the first label's anchor
    let anchor = config.layout.labels[0].anchor;
    let s = config.behavior.light.sensitivity;
    updater.update(input(anchor.x / s, anchor.y / s), &mut nodes);
    assert!(nodes.labels[0].visible);
    assert!(!nodes.labels[2].visible);
}

#[test]
fn detached_nodes_are_skipped() {
    let config = SceneConfig::from_preset(Preset::Explorer);
    let mut nodes = SceneNodes::default();
    let mut updater = FrameUpdater::new(config.behavior).unwrap();

    let out = updater.update(input(0.3, 0.3), &mut nodes);
    assert!(nodes.text.is_none());
    assert!(nodes.spotlight.is_none());
    assert!(out.secondary_viewport.is_none());
    // aim is still reported
    assert!(out.aim.abs_diff_eq(Vec3::new(3.0, 3.0, 0.0), 1e-5));
}

#[test]
fn secondary_camera_tracks_pointer() {
    let config = SceneConfig::from_preset(Preset::Explorer);
    let sec = config.behavior.secondary.unwrap();
    let mut nodes = attached(&config);
    let mut updater = FrameUpdater::new(config.behavior).unwrap();

    let out = updater.update(input(0.5, -0.5), &mut nodes);
    let pose = nodes.secondary_camera.unwrap();
    let s = sec.sensitivity;
    assert!(pose.eye.abs_diff_eq(Vec3::new(0.5 * s, -0.5 * s, sec.height), 1e-5));
    assert!(pose.target.abs_diff_eq(Vec3::new(0.5 * s, -0.5 * s, 0.0), 1e-5));

    let rect = out.secondary_viewport.unwrap();
    assert!(rect.is_within(CanvasSize::new(800, 600)));
}

#[test]
fn fixed_look_at_is_respected() {
    let cfg = SecondaryCameraConfig {
        look_at: LookAt::Fixed(Vec3::new(1.0, 2.0, 0.0)),
        ..SecondaryCameraConfig::default()
    };
    let pose = secondary_pose(PointerState::new(-1.0, 1.0), &cfg);
    assert_eq!(pose.target, Vec3::new(1.0, 2.0, 0.0));
    assert_eq!(pose.eye.z, cfg.height);
}

#[test]
fn glow_follows_clock() {
    assert!((glow_level(0.0, 0.9, 0.25, 0.4) - 0.9).abs() < 1e-6);
    // quarter period: peak
    assert!((glow_level(0.625, 0.9, 0.25, 0.4) - 1.15).abs() < 1e-4);
    // never negative
    assert_eq!(glow_level(1.875, 0.1, 0.5, 0.4), 0.0);
}

#[test]
fn reconfigure_rejects_bad_blend_and_keeps_old() {
    let mut updater = FrameUpdater::new(Behavior::preset(Preset::Classic)).unwrap();
    let mut bad = Behavior::preset(Preset::Torch);
    bad.light.smoothing = Some(1.5);
    assert_eq!(
        updater.reconfigure(bad),
        Err(ConfigError::BlendOutOfRange(1.5))
    );
    assert_eq!(*updater.behavior(), Behavior::preset(Preset::Classic));

    updater.reconfigure(Behavior::preset(Preset::Torch)).unwrap();
    assert_eq!(*updater.behavior(), Behavior::preset(Preset::Torch));
}

#[test]
fn spin_after_follow_drops_pointer_tilt() {
    let config = SceneConfig::from_preset(Preset::Torch);
    let mut nodes = attached(&config);
    let mut updater = FrameUpdater::new(config.behavior).unwrap();
    updater.update(input(0.0, 1.0), &mut nodes);
    assert!(nodes.text.unwrap().rotation.x < 0.0);

    let mut spin = config.behavior;
    spin.motion = TextMotion::default_spin();
    updater.reconfigure(spin).unwrap();
    updater.update(input(0.0, 0.0), &mut nodes);
    let rot = nodes.text.unwrap().rotation;
    assert_eq!(rot.x, 0.0);
    assert_eq!(rot.z, 0.0);
    let expected = spin_angle(updater.frames(), constants::SPIN_RADIANS_PER_FRAME);
    assert!((rot.y - expected).abs() < 1e-6);
}
