//! Tests for the 2D camera transform model.
//!
//! Everything here runs headless: the camera is pure math over its
//! viewport and transform parameters.

use glam::{Vec2, Vec4};
use loupe_draw::prelude::*;

/// A camera with every transform parameter off its default.
fn busy_camera() -> Camera {
    Camera::new(&CameraSetup {
        position: Vec2::new(5.0, -3.0),
        rotation: 30.0,
        zoom: 7.5,
        viewport_width: 1280,
        viewport_height: 720,
        ..CameraSetup::default()
    })
}

// ---------------------------------------------------------------------------
// Point conversions
// ---------------------------------------------------------------------------

#[test]
fn world_to_screen_maps_camera_position_to_center() {
    let camera = Camera::new(&CameraSetup {
        viewport_width: 1024,
        viewport_height: 640,
        ..CameraSetup::default()
    });
    assert_eq!(camera.world_to_screen(Vec2::ZERO), Vec2::new(512.0, 320.0));
}

#[test]
fn zoom_pivots_on_screen_center() {
    // Changing zoom alone keeps the centered world point on the screen
    // center; everything else moves proportionally away from it.
    let mut camera = Camera::new(&CameraSetup::default());

    camera.zoom = 2.0;
    camera.update();
    assert_eq!(camera.world_to_screen(Vec2::ZERO), Vec2::new(512.0, 320.0));

    let p = camera.world_to_screen(Vec2::new(10.0, 0.0));
    assert_eq!(p, Vec2::new(512.0 + 20.0, 320.0));
}

#[test]
fn screen_to_world_inverts_world_to_screen() {
    let camera = busy_camera();
    for p in [
        Vec2::ZERO,
        Vec2::new(12.5, -40.0),
        Vec2::new(-300.0, 170.25),
    ] {
        let round_trip = camera.screen_to_world(camera.world_to_screen(p));
        assert!(
            (round_trip - p).length() < 1e-3,
            "round trip of {p} drifted to {round_trip}"
        );
    }
}

#[test]
fn rotation_is_counter_clockwise_in_screen_space() {
    let camera = Camera::new(&CameraSetup {
        rotation: 90.0,
        zoom: 2.0,
        ..CameraSetup::default()
    });
    // With a 90 degree CCW rotation, world +X shows up pointing along
    // screen +Y, scaled by the zoom.
    let d = camera.world_to_screen_dir(Vec2::X);
    assert!((d - Vec2::new(0.0, 2.0)).length() < 1e-5, "got {d}");
}

// ---------------------------------------------------------------------------
// Direction conversions
// ---------------------------------------------------------------------------

#[test]
fn directions_are_unaffected_by_pan() {
    let mut camera = busy_camera();
    let d = Vec2::new(3.0, -1.5);
    let before = camera.world_to_screen_dir(d);

    camera.position += Vec2::new(250.0, -90.0);
    camera.update();

    assert_eq!(camera.world_to_screen_dir(d), before);
}

#[test]
fn direction_round_trip() {
    let camera = busy_camera();
    let d = Vec2::new(-7.0, 2.0);
    let round_trip = camera.screen_to_world_dir(camera.world_to_screen_dir(d));
    assert!((round_trip - d).length() < 1e-4, "got {round_trip}");
}

// ---------------------------------------------------------------------------
// Viewport and projection
// ---------------------------------------------------------------------------

#[test]
fn width_and_height_report_last_resize() {
    let mut camera = Camera::new(&CameraSetup::default());
    assert_eq!(camera.width(), 1024.0);
    assert_eq!(camera.height(), 640.0);

    camera.resize_viewport(800, 600);
    assert_eq!(camera.width(), 800.0);
    assert_eq!(camera.height(), 600.0);
    assert_eq!(camera.viewport_center(), Vec2::new(400.0, 300.0));
}

#[test]
fn projection_view_depth_bias() {
    // With the default [-10, 10] depth range, geometry at z = 0 sits at
    // depth 0.5; a bias shifts it within the range.
    let camera = Camera::new(&CameraSetup::default());

    let at_origin = camera.projection_view(0.0) * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!((at_origin.z - 0.5).abs() < 1e-6, "got {}", at_origin.z);

    let biased = camera.projection_view(2.0) * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!((biased.z - 0.4).abs() < 1e-6, "got {}", biased.z);
}

#[test]
fn setup_copies_all_parameters() {
    let setup = CameraSetup {
        position: Vec2::new(1.0, 2.0),
        rotation: 45.0,
        zoom: 3.0,
        viewport_width: 512,
        viewport_height: 512,
        z_near: -1.0,
        z_far: 1.0,
    };
    let camera = Camera::new(&setup);

    assert_eq!(camera.position, setup.position);
    assert_eq!(camera.zoom, setup.zoom);
    assert_eq!(camera.rotation, setup.rotation);
    assert_eq!(camera.width(), 512.0);
    // Derived state is immediately consistent: the configured world
    // position maps to the new viewport center.
    let center = camera.world_to_screen(setup.position);
    assert!((center - Vec2::new(256.0, 256.0)).length() < 1e-4);
}
