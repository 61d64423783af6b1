//! 2D affine transform construction.
//!
//! The camera derives its world-to-screen mapping from a single affine
//! transform: move `origin` to local zero, scale, rotate, then translate
//! so the transformed origin lands on `position`. Building the matrix
//! directly keeps the linear part and the translation separately
//! accessible, which is exactly what [`Camera::update`] stores.
//!
//! [`Camera::update`]: crate::camera::Camera::update

use glam::{Affine2, Mat2, Mat3, Vec2};

/// Build the affine transform that scales by `scale`, rotates by
/// `rotation_deg` degrees (positive = counter-clockwise), and maps
/// `origin` onto `position`.
///
/// The linear part is rotation times scale, so applying the result to
/// `origin` yields `position` up to float rounding.
pub fn build_transform(origin: Vec2, rotation_deg: f32, scale: Vec2, position: Vec2) -> Affine2 {
    let linear = Mat2::from_scale_angle(scale, rotation_deg.to_radians());
    Affine2::from_mat2_translation(linear, position - linear * origin)
}

/// Lift a 2D affine transform into a homogeneous 3x3 matrix for
/// composition with other homogeneous transforms. The translation sits in
/// the last column and the last row is (0, 0, 1).
pub fn to_mat3(transform: Affine2) -> Mat3 {
    Mat3::from(transform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_position() {
        let origin = Vec2::new(3.0, -2.0);
        let position = Vec2::new(512.0, 320.0);
        let xf = build_transform(origin, 37.0, Vec2::splat(10.0), position);
        let mapped = xf.transform_point2(origin);
        assert!(
            (mapped - position).length() < 1e-3,
            "origin should land on position, got {mapped}"
        );
    }

    #[test]
    fn positive_rotation_is_counter_clockwise() {
        // 90 degrees CCW sends +X to +Y.
        let xf = build_transform(Vec2::ZERO, 90.0, Vec2::ONE, Vec2::ZERO);
        let rotated = xf.transform_vector2(Vec2::X);
        assert!((rotated - Vec2::Y).length() < 1e-6, "got {rotated}");
    }

    #[test]
    fn to_mat3_embeds_translation_in_last_column() {
        let xf = build_transform(Vec2::ZERO, 0.0, Vec2::splat(2.0), Vec2::new(7.0, -3.0));
        let m = to_mat3(xf);
        assert_eq!(m.z_axis.x, 7.0);
        assert_eq!(m.z_axis.y, -3.0);
        assert_eq!(m.z_axis.z, 1.0);
        assert_eq!(m.x_axis.z, 0.0);
        assert_eq!(m.y_axis.z, 0.0);
    }
}
