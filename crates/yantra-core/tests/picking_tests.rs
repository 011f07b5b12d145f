// Ray construction and nav box picking.

use glam::Vec3;
use yantra_core::*;

#[test]
fn center_pixel_ray_points_at_origin() {
    let canvas = CanvasSize::new(800, 600);
    let cam = Camera::primary(canvas.aspect());
    let ray = screen_to_world_ray(&cam, canvas, 400.0, 300.0);
    assert_eq!(ray.origin, cam.eye);
    assert!(ray.dir.abs_diff_eq(Vec3::NEG_Z, 1e-4), "{:?}", ray.dir);
}

#[test]
fn ray_aabb_hit_and_miss() {
    let ray = Ray {
        origin: Vec3::new(0.0, 0.0, 10.0),
        dir: Vec3::NEG_Z,
    };
    let t = ray_aabb(ray, Vec3::ZERO, Vec3::splat(1.0)).unwrap();
    assert!((t - 9.0).abs() < 1e-5);

    assert!(ray_aabb(ray, Vec3::new(5.0, 0.0, 0.0), Vec3::splat(1.0)).is_none());

    // box behind the origin
    let away = Ray {
        origin: Vec3::new(0.0, 0.0, 10.0),
        dir: Vec3::Z,
    };
    assert!(ray_aabb(away, Vec3::ZERO, Vec3::splat(1.0)).is_none());
}

#[test]
fn ray_starting_inside_box_hits_at_zero() {
    let ray = Ray {
        origin: Vec3::ZERO,
        dir: Vec3::X,
    };
    assert_eq!(ray_aabb(ray, Vec3::ZERO, Vec3::splat(1.0)), Some(0.0));
}

#[test]
fn pick_returns_nearest_box() {
    let boxes = vec![
        NavBox {
            title: "far".into(),
            center: Vec3::new(0.0, 0.0, -5.0),
            half_extents: Vec3::splat(1.0),
            target: "#far".into(),
        },
        NavBox {
            title: "near".into(),
            center: Vec3::new(0.0, 0.0, 2.0),
            half_extents: Vec3::splat(1.0),
            target: "#near".into(),
        },
    ];
    let ray = Ray {
        origin: Vec3::new(0.0, 0.0, 10.0),
        dir: Vec3::NEG_Z,
    };
    assert_eq!(pick_nav_box(ray, &boxes), Some(1));
    assert_eq!(pick_nav_box(ray, &[]), None);
}

#[test]
fn clicking_a_projected_box_center_picks_it() {
    let config = SceneConfig::default();
    let canvas = CanvasSize::new(1280, 720);
    let cam = Camera::primary(canvas.aspect());
    for (i, nav) in config.layout.nav_boxes.iter().enumerate() {
        let clip = cam.view_proj() * nav.center.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        let px = (ndc.x + 1.0) * 0.5 * canvas.width as f32;
        let py = (1.0 - ndc.y) * 0.5 * canvas.height as f32;
        let ray = screen_to_world_ray(&cam, canvas, px, py);
        assert_eq!(pick_nav_box(ray, &config.layout.nav_boxes), Some(i));
    }
}
