// Secondary viewport placement must stay inside the canvas.

use yantra_core::*;

fn follow(fraction: f32) -> ViewportConfig {
    ViewportConfig {
        fraction,
        placement: Placement::FollowPointer,
    }
}

#[test]
fn follow_viewport_never_leaves_canvas() {
    let canvases = [
        CanvasSize::new(800, 600),
        CanvasSize::new(1, 1),
        CanvasSize::new(3, 1000),
        CanvasSize::new(2561, 1441),
    ];
    for canvas in canvases {
        for fraction in [0.01, 0.25, 0.5, 1.0] {
            for i in 0..=10 {
                for j in 0..=10 {
                    let p = PointerState::new(-1.0 + i as f32 * 0.2, -1.0 + j as f32 * 0.2);
                    let rect = secondary_viewport(p, canvas, &follow(fraction));
                    assert!(
                        rect.is_within(canvas),
                        "{rect:?} outside {canvas:?} (fraction {fraction})"
                    );
                    assert!(!rect.is_empty());
                }
            }
        }
    }
}

#[test]
fn follow_viewport_centers_on_pointer() {
    let canvas = CanvasSize::new(800, 600);
    let rect = secondary_viewport(PointerState::CENTER, canvas, &follow(0.25));
    assert_eq!(rect.width, 200);
    assert_eq!(rect.height, 150);
    assert_eq!(rect.x, 300);
    assert_eq!(rect.y, 225);
}

#[test]
fn follow_viewport_clamps_at_corners() {
    let canvas = CanvasSize::new(800, 600);
    let top_left = secondary_viewport(PointerState::new(-1.0, 1.0), canvas, &follow(0.25));
    assert_eq!((top_left.x, top_left.y), (0, 0));
    let bottom_right = secondary_viewport(PointerState::new(1.0, -1.0), canvas, &follow(0.25));
    assert_eq!((bottom_right.x, bottom_right.y), (600, 450));
}

#[test]
fn corner_viewport_respects_margin() {
    let canvas = CanvasSize::new(800, 600);
    let cfg = ViewportConfig {
        fraction: 0.25,
        placement: Placement::Corner { margin_px: 16 },
    };
    let rect = secondary_viewport(PointerState::new(0.7, 0.7), canvas, &cfg);
    assert_eq!(rect, ViewportRect { x: 584, y: 434, width: 200, height: 150 });

    // margin collapses instead of overflowing on a tiny canvas
    let tiny = CanvasSize::new(10, 10);
    let rect = secondary_viewport(PointerState::CENTER, tiny, &cfg);
    assert!(rect.is_within(tiny));
}

#[test]
fn empty_canvas_yields_empty_rect() {
    let rect = secondary_viewport(PointerState::CENTER, CanvasSize::new(0, 600), &follow(0.5));
    assert!(rect.is_empty());
    assert!(rect.is_within(CanvasSize::new(0, 600)));
}
