//! Interactive debug-draw demo -- a rolling ball and a tumbling crate
//! over a ground slab, drawn entirely through the debug-draw callbacks.
//!
//! Run with:
//!   cargo run --example sandbox_visual -p loupe-render
//!
//! An optional first argument names a JSON sandbox config:
//!   cargo run --example sandbox_visual -p loupe-render -- sandbox.json
//!
//! Controls:
//!   Arrow keys -- pan
//!   Z / X or mouse wheel -- zoom
//!   Right-button drag -- pan
//!   Home -- reset view
//!   Escape -- quit

use glam::Vec2;
use loupe_draw::prelude::*;
use loupe_render::{run_windowed, SandboxConfig, Scene};

const STATIC_COLOR: Color = Color::rgb(0.5, 0.9, 0.5);
const DYNAMIC_COLOR: Color = Color::rgb(0.9, 0.7, 0.7);
const SENSOR_COLOR: Color = Color::rgb(0.5, 0.5, 0.9);
const ROPE_COLOR: Color = Color::rgb(0.8, 0.8, 0.8);
const AABB_COLOR: Color = Color::rgb(0.9, 0.3, 0.9);
const CONTACT_COLOR: Color = Color::rgb(0.3, 0.95, 0.3);

const GROUND_HALF_WIDTH: f32 = 20.0;
const BALL_RADIUS: f32 = 2.0;
const CRATE_HALF_EXTENT: f32 = 1.5;

/// Hand-animated stand-in for a physics step: enough moving bodies to
/// exercise every debug-draw callback.
struct DemoScene {
    flags: DrawFlags,
    time: f32,
}

impl DemoScene {
    fn new(flags: DrawFlags) -> Self {
        Self { flags, time: 0.0 }
    }
}

impl Scene for DemoScene {
    fn frame(&mut self, draw: &mut GeometryBatcher, overlay: &mut TextOverlay, dt: f32) {
        self.time += dt;
        let t = self.time;

        overlay.draw_string(Vec2::new(10.0, 10.0), "loupe sandbox demo");

        // A ball rolling back and forth along the ground.
        let ball_x = (t * 0.5).sin() * 10.0;
        let ball_center = Vec2::new(ball_x, BALL_RADIUS);
        let ball_angle = -ball_x / BALL_RADIUS;
        let ball_axis = Vec2::new(ball_angle.cos(), ball_angle.sin());

        // A crate bobbing on an invisible spring, tumbling as it goes.
        let pose = Transform2::new(
            Vec2::new(4.0, 8.0 + (t * 0.9).sin() * 2.0),
            t * 0.8,
        );
        let local = [
            Vec2::new(-CRATE_HALF_EXTENT, -CRATE_HALF_EXTENT),
            Vec2::new(CRATE_HALF_EXTENT, -CRATE_HALF_EXTENT),
            Vec2::new(CRATE_HALF_EXTENT, CRATE_HALF_EXTENT),
            Vec2::new(-CRATE_HALF_EXTENT, CRATE_HALF_EXTENT),
        ];
        let corners = local.map(|c| pose.position + c.x * pose.x_axis() + c.y * pose.y_axis());

        if self.flags.shapes {
            let ground = [
                Vec2::new(-GROUND_HALF_WIDTH, -1.0),
                Vec2::new(GROUND_HALF_WIDTH, -1.0),
                Vec2::new(GROUND_HALF_WIDTH, 0.0),
                Vec2::new(-GROUND_HALF_WIDTH, 0.0),
            ];
            draw.draw_solid_polygon(&ground, STATIC_COLOR);

            draw.draw_solid_circle(ball_center, BALL_RADIUS, ball_axis, DYNAMIC_COLOR);
            overlay.draw_string_world(ball_center + Vec2::new(0.0, BALL_RADIUS + 0.5), "ball");

            draw.draw_solid_polygon(&corners, DYNAMIC_COLOR);

            // A sensor region, outline only.
            draw.draw_circle(Vec2::new(-8.0, 6.0), 3.0, SENSOR_COLOR);
        }

        if self.flags.joints {
            // The crate's spring anchor.
            draw.draw_segment(Vec2::new(4.0, 14.0), pose.position, ROPE_COLOR);
        }

        if self.flags.center_of_mass {
            draw.draw_transform(&pose);
            draw.draw_transform(&Transform2::new(ball_center, ball_angle));
        }

        if self.flags.aabbs {
            let (min, max) = corners
                .iter()
                .fold((corners[0], corners[0]), |(mn, mx), &c| {
                    (mn.min(c), mx.max(c))
                });
            draw.draw_aabb(&Aabb { min, max }, AABB_COLOR);
        }

        if self.flags.contact_points {
            // The ball grazes the ground at all times.
            draw.draw_point(Vec2::new(ball_x, 0.0), 5.0, CONTACT_COLOR);
        }
    }
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = match std::env::args().nth(1) {
        Some(path) => SandboxConfig::load(&path)?,
        None => SandboxConfig::default(),
    };

    // The demo is more interesting with everything visible unless a
    // config said otherwise.
    if std::env::args().nth(1).is_none() {
        config.flags.joints = true;
        config.flags.aabbs = true;
        config.flags.contact_points = true;
        config.flags.center_of_mass = true;
    }

    run_windowed(Box::new(DemoScene::new(config.flags)), config)
}
