use bytemuck::{Pod, Zeroable};
use vello::kurbo::{Affine, Point, Vec2};

use crate::{Bounds, Camera, Viewport};

const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;
const DEPTH: f32 = -1.0;

/// Data-to-screen mapping derived from a camera and a viewport.
///
/// The visible box is the camera box grown by the border, converted from
/// pixels into data units, so that the camera box lands exactly on the
/// inner plot area of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    view: Bounds,
    viewport: Viewport,
    data_to_clip: Affine,
}

impl Projection {
    pub fn derive(camera: &Camera, viewport: &Viewport) -> Self {
        // Extents come from the fov alone; subtracting the box corners
        // cancels to zero once the fov is tiny next to the origin.
        let (inner_width, inner_height) = viewport.inner_size();
        let extent = Vec2::new(
            camera.fov.width * viewport.width() as f64 / inner_width,
            camera.fov.height * viewport.height() as f64 / inner_height,
        );

        let half = 0.5 * extent;
        let view = Bounds::new(camera.origin - half, camera.origin + half);

        let scale = Vec2::new(2.0 / extent.x, 2.0 / extent.y);
        let data_to_clip = Affine::new([
            scale.x,
            0.0,
            0.0,
            scale.y,
            -camera.origin.x * scale.x,
            -camera.origin.y * scale.y,
        ]);

        Self {
            view,
            viewport: *viewport,
            data_to_clip,
        }
    }

    /// Data-space box covering the whole viewport, border included.
    #[inline]
    pub fn view_bounds(&self) -> Bounds {
        self.view
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Maps the visible box onto `[-1, 1]²`, y up.
    #[inline]
    pub fn data_to_clip(&self) -> Affine {
        self.data_to_clip
    }

    /// Maps `[-1, 1]²` onto physical pixels, y down.
    pub fn clip_to_screen(&self) -> Affine {
        let half_width = 0.5 * self.viewport.width() as f64;
        let half_height = 0.5 * self.viewport.height() as f64;
        Affine::new([half_width, 0.0, 0.0, -half_height, half_width, half_height])
    }

    #[inline]
    pub fn data_to_screen(&self) -> Affine {
        self.clip_to_screen() * self.data_to_clip
    }

    #[inline]
    pub fn to_screen(&self, point: Point) -> Point {
        self.data_to_screen() * point
    }

    /// Column-major 4×4 equivalent for pipelines that draw 2D data on a
    /// fixed depth plane.
    pub fn clip_matrix(&self) -> ClipMatrix {
        let [a, b, c, d, e, f] = self.data_to_clip.as_coeffs().map(|v| v as f32);
        let z_scale = -2.0 / (FAR - NEAR);
        let z_offset = -(FAR + NEAR) / (FAR - NEAR) + z_scale * DEPTH;

        ClipMatrix([
            [a, b, 0.0, 0.0],
            [c, d, 0.0, 0.0],
            [0.0, 0.0, z_scale, 0.0],
            [e, f, z_offset, 1.0],
        ])
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ClipMatrix(pub [[f32; 4]; 4]);

impl ClipMatrix {
    pub fn transform(&self, point: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (column, &value) in self.0.iter().zip(point.iter()) {
            for (out, entry) in out.iter_mut().zip(column) {
                *out += entry * value;
            }
        }
        out
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use vello::kurbo::Size;

    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    fn camera(origin: Point, fov: Size) -> Camera {
        Camera { origin, fov }
    }

    #[test]
    fn camera_box_fills_inner_area() {
        let viewport = Viewport::new(500, 300, 50).unwrap();
        let projection = Projection::derive(
            &camera(Point::new(1.0, 2.0), Size::new(4.0, 2.0)),
            &viewport,
        );

        assert!(close(
            projection.to_screen(Point::new(-1.0, 1.0)),
            Point::new(50.0, 250.0)
        ));
        assert!(close(
            projection.to_screen(Point::new(3.0, 3.0)),
            Point::new(450.0, 50.0)
        ));
        assert!(close(
            projection.to_screen(Point::new(1.0, 2.0)),
            Point::new(250.0, 150.0)
        ));
    }

    #[test]
    fn view_bounds_are_inflated_by_border() {
        let viewport = Viewport::new(400, 400, 100).unwrap();
        let projection =
            Projection::derive(&camera(Point::ORIGIN, Size::new(2.0, 2.0)), &viewport);
        let view = projection.view_bounds();
        assert_eq!(view.min(), Point::new(-2.0, -2.0));
        assert_eq!(view.max(), Point::new(2.0, 2.0));
        assert!(close(
            projection.data_to_clip() * view.max(),
            Point::new(1.0, 1.0)
        ));
    }

    #[test]
    fn clip_matrix_agrees_with_affine() {
        let viewport = Viewport::new(640, 480, 20).unwrap();
        let projection = Projection::derive(
            &camera(Point::new(-3.0, 7.0), Size::new(10.0, 0.5)),
            &viewport,
        );
        let matrix = projection.clip_matrix();
        let point = Point::new(-1.0, 7.1);
        let expected = projection.data_to_clip() * point;
        let [x, y, z, w] = matrix.transform([point.x as f32, point.y as f32, 0.0, 1.0]);

        assert!((x as f64 - expected.x).abs() < 1e-4);
        assert!((y as f64 - expected.y).abs() < 1e-4);
        assert!(z > -1.0 && z < 1.0);
        assert_eq!(w, 1.0);
        assert_eq!(matrix.as_bytes().len(), 64);
    }

    #[test]
    fn tiny_fov_far_from_origin_stays_finite() {
        let viewport = Viewport::new(500, 500, 100).unwrap();
        let projection = Projection::derive(
            &camera(Point::new(1e12, 1e12), Size::new(1e-6, 1e-6)),
            &viewport,
        );
        let coeffs = projection.data_to_clip().as_coeffs();
        assert!(coeffs.iter().all(|c| c.is_finite()), "{coeffs:?}");
        // 1e-6 of fov spans the 300px plot area of a 500px viewport.
        assert!((coeffs[0] - 2.0 * 300.0 / (1e-6 * 500.0)).abs() < 1e-3);
    }

    #[test]
    fn constructible_viewports_give_finite_projections() {
        assert!(Viewport::new(200, 200, 100).is_err());

        let viewport = Viewport::new(200, 200, Viewport::max_border(200, 200)).unwrap();
        let projection = Projection::derive(&Camera::default(), &viewport);
        let coeffs = projection.data_to_clip().as_coeffs();
        assert!(coeffs.iter().all(|c| c.is_finite()), "{coeffs:?}");
    }
}
