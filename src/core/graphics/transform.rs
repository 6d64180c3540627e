//=========================================================================
// Transform
//=========================================================================
//
// Position, origin, scale and rotation of a 2D drawable.
//
// The world transform of a local point `p` is
//   translate(position) · rotate(rotation) · scale(scale) · (p - origin)
// with rotation in degrees, clockwise in screen space (y down).
//
//=========================================================================

//=== External Dependencies ===============================================

use kurbo::{Affine, Point, Rect, Size, Vec2};

//=== Internal Dependencies ===============================================

use crate::core::render::{Flip, Placement};

//=== Transform ===========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    position: Point,
    origin: Point,
    scale: Vec2,
    rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            origin: Point::ZERO,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Accessors --------------------------------------------------------

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Local point that `position` refers to; also the rotation pivot.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Per-axis scale. Negative components mirror along that axis.
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    /// Rotation in degrees, normalised to `[0, 360)`.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees.rem_euclid(360.0);
    }

    //--- Relative Changes -------------------------------------------------

    pub fn move_by(&mut self, offset: Vec2) {
        self.position += offset;
    }

    pub fn rotate_by(&mut self, degrees: f64) {
        self.set_rotation(self.rotation + degrees);
    }

    pub fn scale_by(&mut self, factor: Vec2) {
        self.scale = Vec2::new(self.scale.x * factor.x, self.scale.y * factor.y);
    }

    //--- Geometry ---------------------------------------------------------

    /// Local → world transform.
    pub fn affine(&self) -> Affine {
        Affine::translate(self.position.to_vec2())
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * Affine::translate(-self.origin.to_vec2())
    }

    /// Axis-aligned world bounds of the local rectangle `local`.
    pub fn global_bounds(&self, local: Rect) -> Rect {
        self.affine().transform_rect_bbox(local)
    }

    /// Backend placement of a quad of `size` local units.
    ///
    /// Mirroring is expressed as flip flags on an unflipped destination
    /// rectangle, with the pivot mirrored to match.
    pub fn placement(&self, size: Size) -> Placement {
        let width = size.width * self.scale.x.abs();
        let height = size.height * self.scale.y.abs();

        let mut x = self.position.x - self.origin.x * self.scale.x;
        let mut y = self.position.y - self.origin.y * self.scale.y;
        let mut pivot = Point::new(
            self.origin.x * self.scale.x.abs(),
            self.origin.y * self.scale.y.abs(),
        );

        let flip = Flip {
            horizontal: self.scale.x < 0.0,
            vertical: self.scale.y < 0.0,
        };
        if flip.horizontal {
            x -= width;
            pivot.x = width - pivot.x;
        }
        if flip.vertical {
            y -= height;
            pivot.y = height - pivot.y;
        }

        Placement {
            destination: Rect::new(x, y, x + width, y + height),
            pivot,
            rotation: self.rotation,
            flip,
        }
    }
}

//=== Transformable Trait =================================================

/// Drawables positioned by a [`Transform`].
pub trait Transformable {
    fn transform(&self) -> &Transform;

    fn transform_mut(&mut self) -> &mut Transform;

    /// Untransformed bounds, with the top-left corner at `(0, 0)`.
    fn local_bounds(&self) -> Rect;

    /// `local_bounds` mapped through the transform.
    fn global_bounds(&self) -> Rect {
        self.transform().global_bounds(self.local_bounds())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f64 = 1e-9;

    fn assert_rect_eq(actual: Rect, expected: Rect) {
        assert_abs_diff_eq!(actual.x0, expected.x0, epsilon = EPSILON);
        assert_abs_diff_eq!(actual.y0, expected.y0, epsilon = EPSILON);
        assert_abs_diff_eq!(actual.x1, expected.x1, epsilon = EPSILON);
        assert_abs_diff_eq!(actual.y1, expected.y1, epsilon = EPSILON);
    }

    fn local(width: f64, height: f64) -> Rect {
        Rect::from_origin_size(Point::ZERO, Size::new(width, height))
    }

    //=====================================================================
    // Accessors
    //=====================================================================

    #[test]
    fn default_is_identity() {
        let transform = Transform::default();
        assert_eq!(transform.position(), Point::ZERO);
        assert_eq!(transform.scale(), Vec2::new(1.0, 1.0));
        assert_eq!(transform.rotation(), 0.0);
        assert_rect_eq(transform.global_bounds(local(4.0, 3.0)), local(4.0, 3.0));
    }

    #[test]
    fn rotation_is_normalised() {
        let mut transform = Transform::new();
        transform.set_rotation(450.0);
        assert_abs_diff_eq!(transform.rotation(), 90.0, epsilon = EPSILON);

        transform.rotate_by(-180.0);
        assert_abs_diff_eq!(transform.rotation(), 270.0, epsilon = EPSILON);
    }

    #[test]
    fn relative_changes_accumulate() {
        let mut transform = Transform::new();
        transform.move_by(Vec2::new(3.0, 4.0));
        transform.move_by(Vec2::new(1.0, -1.0));
        transform.scale_by(Vec2::new(2.0, 3.0));
        transform.scale_by(Vec2::new(0.5, 2.0));

        assert_eq!(transform.position(), Point::new(4.0, 3.0));
        assert_eq!(transform.scale(), Vec2::new(1.0, 6.0));
    }

    //=====================================================================
    // Global Bounds
    //=====================================================================

    #[test]
    fn bounds_follow_position_and_scale() {
        let mut transform = Transform::new();
        transform.set_position(Point::new(10.0, 20.0));
        transform.set_scale(Vec2::new(2.0, 2.0));

        assert_rect_eq(
            transform.global_bounds(local(4.0, 3.0)),
            Rect::new(10.0, 20.0, 18.0, 26.0),
        );
    }

    #[test]
    fn origin_is_subtracted_before_scaling() {
        let mut transform = Transform::new();
        transform.set_origin(Point::new(2.0, 1.0));
        transform.set_scale(Vec2::new(2.0, 2.0));

        assert_rect_eq(
            transform.global_bounds(local(4.0, 2.0)),
            Rect::new(-4.0, -2.0, 4.0, 2.0),
        );
    }

    #[test]
    fn quarter_turn_rotates_clockwise() {
        let mut transform = Transform::new();
        transform.set_rotation(90.0);

        assert_rect_eq(
            transform.global_bounds(local(4.0, 2.0)),
            Rect::new(-2.0, 0.0, 0.0, 4.0),
        );
    }

    #[test]
    fn rotation_around_centre_keeps_centre() {
        let mut transform = Transform::new();
        transform.set_origin(Point::new(2.0, 2.0));
        transform.set_position(Point::new(50.0, 50.0));
        transform.set_rotation(45.0);

        let bounds = transform.global_bounds(local(4.0, 4.0));
        let half_diagonal = 8.0_f64.sqrt();

        assert_abs_diff_eq!(bounds.center().x, 50.0, epsilon = EPSILON);
        assert_abs_diff_eq!(bounds.center().y, 50.0, epsilon = EPSILON);
        assert_abs_diff_eq!(bounds.width(), 2.0 * half_diagonal, epsilon = EPSILON);
    }

    //=====================================================================
    // Placement
    //=====================================================================

    #[test]
    fn placement_scales_destination_and_pivot() {
        let mut transform = Transform::new();
        transform.set_position(Point::new(100.0, 50.0));
        transform.set_origin(Point::new(8.0, 4.0));
        transform.set_scale(Vec2::new(2.0, 3.0));

        let placement = transform.placement(Size::new(16.0, 8.0));

        assert_rect_eq(placement.destination, Rect::new(84.0, 38.0, 116.0, 62.0));
        assert_eq!(placement.pivot, Point::new(16.0, 12.0));
        assert_eq!(placement.flip, Flip::default());
    }

    #[test]
    fn negative_scale_flips_and_mirrors() {
        let mut transform = Transform::new();
        transform.set_position(Point::new(100.0, 0.0));
        transform.set_scale(Vec2::new(-1.0, 1.0));

        let placement = transform.placement(Size::new(10.0, 5.0));

        assert_rect_eq(placement.destination, Rect::new(90.0, 0.0, 100.0, 5.0));
        assert_eq!(placement.pivot, Point::new(10.0, 0.0));
        assert!(placement.flip.horizontal);
        assert!(!placement.flip.vertical);
    }

    #[test]
    fn placement_carries_rotation() {
        let mut transform = Transform::new();
        transform.set_rotation(30.0);
        assert_abs_diff_eq!(transform.placement(Size::new(1.0, 1.0)).rotation, 30.0, epsilon = EPSILON);
    }
}
