//! Property tests for the camera transform and the affine builder.

use glam::Vec2;
use loupe_draw::prelude::*;
use proptest::prelude::*;

fn arb_camera() -> impl Strategy<Value = Camera> {
    (
        -100.0f32..100.0,
        -100.0f32..100.0,
        -360.0f32..360.0,
        0.5f32..50.0,
        (64u32..2048, 64u32..2048),
    )
        .prop_map(|(x, y, rotation, zoom, (w, h))| {
            Camera::new(&CameraSetup {
                position: Vec2::new(x, y),
                rotation,
                zoom,
                viewport_width: w,
                viewport_height: h,
                ..CameraSetup::default()
            })
        })
}

proptest! {
    #[test]
    fn world_screen_round_trip(
        camera in arb_camera(),
        px in -500.0f32..500.0,
        py in -500.0f32..500.0,
    ) {
        let p = Vec2::new(px, py);
        let round_trip = camera.screen_to_world(camera.world_to_screen(p));
        prop_assert!(
            (round_trip - p).length() < 0.05,
            "{p} round-tripped to {round_trip}"
        );
    }

    #[test]
    fn screen_world_round_trip(
        camera in arb_camera(),
        px in 0.0f32..2048.0,
        py in 0.0f32..2048.0,
    ) {
        let p = Vec2::new(px, py);
        let round_trip = camera.world_to_screen(camera.screen_to_world(p));
        prop_assert!(
            (round_trip - p).length() < 0.05,
            "{p} round-tripped to {round_trip}"
        );
    }

    #[test]
    fn directions_ignore_pan(
        mut camera in arb_camera(),
        dx in -10.0f32..10.0,
        dy in -10.0f32..10.0,
        shift_x in -500.0f32..500.0,
        shift_y in -500.0f32..500.0,
    ) {
        let d = Vec2::new(dx, dy);
        let before = camera.world_to_screen_dir(d);

        camera.position += Vec2::new(shift_x, shift_y);
        camera.update();

        // The linear part only depends on rotation and zoom, so this is
        // exact, not just approximate.
        prop_assert_eq!(camera.world_to_screen_dir(d), before);
    }

    #[test]
    fn build_transform_origin_fixpoint(
        ox in -100.0f32..100.0,
        oy in -100.0f32..100.0,
        rotation in -360.0f32..360.0,
        scale in 0.1f32..20.0,
        px in -1000.0f32..1000.0,
        py in -1000.0f32..1000.0,
    ) {
        let origin = Vec2::new(ox, oy);
        let position = Vec2::new(px, py);
        let xf = build_transform(origin, rotation, Vec2::splat(scale), position);
        let mapped = xf.transform_point2(origin);
        prop_assert!(
            (mapped - position).length() < 0.01,
            "origin {origin} mapped to {mapped}, expected {position}"
        );
    }
}
