use tracing::{debug, trace, warn};
use vello::kurbo::{Point, Size, Vec2};

use crate::{FovLimits, PlotError, PlotLayout, Projection, Result, SeriesStore};

/// Fov substituted on an axis where the fitted data has no extent.
const DEGENERATE_FIT_FOV: f64 = 1.0;

/// Center and extent of the visible data-space box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub origin: Point,
    pub fov: Size,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            origin: Point::ORIGIN,
            fov: Size::new(1.0, 1.0),
        }
    }
}

/// Pixel size of the drawing surface and the margin kept around the plot.
///
/// `2 * border` is strictly less than both `width` and `height`; only
/// [`Viewport::new`] and the controller construct one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
    border: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, border: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PlotError::EmptyViewport { width, height });
        }
        if !Self::fits(width, height, border) {
            return Err(PlotError::BorderTooLarge {
                border,
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            border,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn border(&self) -> u32 {
        self.border
    }

    #[inline]
    fn fits(width: u32, height: u32, border: u32) -> bool {
        2 * (border as u64) < width.min(height) as u64
    }

    /// Largest border that still leaves a plot area.
    #[inline]
    pub fn max_border(width: u32, height: u32) -> u32 {
        width.min(height).saturating_sub(1) / 2
    }

    /// Size of the plot area inside the border.
    #[inline]
    pub fn inner_size(&self) -> (f64, f64) {
        let border = 2.0 * self.border as f64;
        (self.width as f64 - border, self.height as f64 - border)
    }

    /// Inner size with y negated: screen y grows downward, data y upward.
    #[inline]
    pub fn extent(&self) -> Vec2 {
        let (width, height) = self.inner_size();
        Vec2::new(width, -height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Owns the camera and viewport and keeps their projection current.
#[derive(Debug, Clone)]
pub struct ViewController {
    camera: Camera,
    viewport: Viewport,
    zoom_sensitivity: f64,
    fit_margin: f64,
    fov_limits: FovLimits,
    drag: DragState,
    cursor: Option<Point>,
    projection: Projection,
}

impl ViewController {
    pub fn new(layout: &PlotLayout, width: u32, height: u32) -> Result<Self> {
        layout.validate()?;
        let viewport = Viewport::new(width, height, layout.border)?;
        let camera = Camera::default();

        Ok(Self {
            camera,
            viewport,
            zoom_sensitivity: layout.zoom_sensitivity,
            fit_margin: layout.fit_margin,
            fov_limits: layout.fov_limits,
            drag: DragState::Idle,
            cursor: None,
            projection: Projection::derive(&camera, &viewport),
        })
    }

    #[inline]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    #[inline]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    fn update_projection(&mut self) {
        self.projection = Projection::derive(&self.camera, &self.viewport);
    }

    /// Moves the camera by a screen-space displacement while dragging.
    ///
    /// Returns whether the camera moved.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        if self.drag != DragState::Dragging {
            return false;
        }

        let extent = self.viewport.extent();
        let delta = Vec2::new(
            delta.x * self.camera.fov.width / extent.x,
            delta.y * self.camera.fov.height / extent.y,
        );
        self.camera.origin -= delta;
        trace!(origin = ?self.camera.origin, "pan");

        self.update_projection();
        true
    }

    pub fn zoom(&mut self, scroll: f64) {
        if !scroll.is_finite() {
            warn!(scroll, "ignoring non-finite scroll");
            return;
        }

        let factor = (-self.zoom_sensitivity * scroll).exp();
        self.camera.fov = self.clamp_fov(self.camera.fov * factor);
        trace!(fov = ?self.camera.fov, "zoom");

        self.update_projection();
    }

    /// Applies a new surface size. A border that no longer fits is shrunk
    /// to the largest one that does.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(PlotError::EmptyViewport { width, height });
        }

        let mut border = self.viewport.border;
        if !Viewport::fits(width, height, border) {
            border = Viewport::max_border(width, height);
            warn!(
                requested = self.viewport.border,
                border, width, height, "border clamped to fit viewport"
            );
        }

        self.viewport = Viewport {
            width,
            height,
            border,
        };
        self.update_projection();
        Ok(())
    }

    pub fn set_border(&mut self, border: u32) -> Result<()> {
        let Viewport { width, height, .. } = self.viewport;
        self.viewport = Viewport::new(width, height, border)?;
        debug!(border, "border changed");

        self.update_projection();
        Ok(())
    }

    /// Frames every stored series with the configured margin. Does nothing
    /// for a store without bounds.
    pub fn fit(&mut self, store: &SeriesStore) {
        let Some(bounds) = store.bounds() else {
            debug!("nothing to fit");
            return;
        };

        let size = bounds.size() * self.fit_margin;
        let fov = Size::new(
            if size.width > 0.0 {
                size.width
            } else {
                DEGENERATE_FIT_FOV
            },
            if size.height > 0.0 {
                size.height
            } else {
                DEGENERATE_FIT_FOV
            },
        );

        self.camera = Camera {
            origin: bounds.center(),
            fov: self.clamp_fov(fov),
        };
        debug!(origin = ?self.camera.origin, fov = ?self.camera.fov, "fit to data");

        self.update_projection();
    }

    fn clamp_fov(&self, fov: Size) -> Size {
        Size::new(
            self.fov_limits.clamp(fov.width),
            self.fov_limits.clamp(fov.height),
        )
    }

    pub fn begin_drag(&mut self) {
        self.drag = DragState::Dragging;
    }

    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Records the pointer position and pans by its displacement while
    /// dragging. Returns whether the camera moved.
    pub fn cursor_moved(&mut self, position: Point) -> bool {
        let prior = self.cursor.replace(position);
        match prior {
            Some(prior) => self.pan(position - prior),
            None => false,
        }
    }

    /// Forgets the pointer so re-entering the window does not jump.
    pub fn cursor_left(&mut self) {
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Series;

    fn controller(width: u32, height: u32, border: u32) -> ViewController {
        let layout = PlotLayout::new()
            .with_width(width as f64)
            .with_height(height as f64)
            .with_border(border);
        ViewController::new(&layout, width, height).unwrap()
    }

    #[test]
    fn starts_idle_with_unit_camera() {
        let view = controller(500, 500, 100);
        assert_eq!(view.camera(), Camera::default());
        assert_eq!(view.drag_state(), DragState::Idle);
    }

    #[test]
    fn pan_requires_drag() {
        let mut view = controller(456, 456, 100);
        assert!(!view.pan(Vec2::new(10.0, 10.0)));
        assert_eq!(view.camera().origin, Point::ORIGIN);

        view.begin_drag();
        assert!(view.pan(Vec2::new(64.0, 64.0)));
        // 64px of a 256px plot area at fov 1; screen y is flipped.
        assert_eq!(view.camera().origin, Point::new(-0.25, 0.25));

        view.end_drag();
        assert!(!view.pan(Vec2::new(64.0, 64.0)));
    }

    #[test]
    fn cursor_moves_pan_only_while_dragging() {
        let mut view = controller(456, 456, 100);
        assert!(!view.cursor_moved(Point::new(10.0, 10.0)));
        assert!(!view.cursor_moved(Point::new(42.0, 10.0)));
        assert_eq!(view.camera().origin, Point::ORIGIN);

        view.begin_drag();
        assert!(view.cursor_moved(Point::new(74.0, 10.0)));
        assert_eq!(view.camera().origin, Point::new(-0.125, 0.0));

        view.cursor_left();
        assert!(!view.cursor_moved(Point::new(400.0, 400.0)));
        assert_eq!(view.camera().origin, Point::new(-0.125, 0.0));
    }

    #[test]
    fn zoom_clamps_to_limits() {
        let mut view = controller(500, 500, 100);
        view.zoom(1e6);
        assert_eq!(view.camera().fov, Size::new(1e-6, 1e-6));
        view.zoom(-1e6);
        assert_eq!(view.camera().fov, Size::new(1e12, 1e12));

        let before = view.camera();
        view.zoom(f64::NAN);
        assert_eq!(view.camera(), before);
    }

    #[test]
    fn resize_rejects_empty_and_clamps_border() {
        let mut view = controller(500, 500, 100);
        assert!(matches!(
            view.resize(0, 400),
            Err(PlotError::EmptyViewport { width: 0, height: 400 })
        ));
        assert_eq!(view.viewport().width(), 500);

        view.resize(150, 400).unwrap();
        assert_eq!(view.viewport(), Viewport::new(150, 400, 74).unwrap());
        assert!(view.projection().data_to_clip().as_coeffs().iter().all(|c| c.is_finite()));
    }

    #[test]
    fn set_border_rejects_oversized() {
        let mut view = controller(500, 400, 100);
        assert!(matches!(
            view.set_border(200),
            Err(PlotError::BorderTooLarge { border: 200, .. })
        ));
        assert_eq!(view.viewport().border(), 100);

        view.set_border(0).unwrap();
        assert_eq!(view.viewport().border(), 0);
    }

    #[test]
    fn fit_single_point_uses_unit_fov() {
        let mut view = controller(500, 500, 100);
        let mut store = SeriesStore::new();
        store.add(Series::new(vec![Point::new(3.0, -2.0)]));
        view.fit(&store);
        assert_eq!(
            view.camera(),
            Camera {
                origin: Point::new(3.0, -2.0),
                fov: Size::new(1.0, 1.0)
            }
        );
    }

    #[test]
    fn fit_flat_line_guards_one_axis() {
        let mut view = controller(500, 500, 100);
        let mut store = SeriesStore::new();
        store.add(Series::new(vec![Point::new(0.0, 5.0), Point::new(10.0, 5.0)]));
        view.fit(&store);
        assert_eq!(view.camera().origin, Point::new(5.0, 5.0));
        assert!((view.camera().fov.width - 12.0).abs() < 1e-12);
        assert_eq!(view.camera().fov.height, 1.0);
    }

    #[test]
    fn max_border() {
        assert_eq!(Viewport::max_border(150, 400), 74);
        assert_eq!(Viewport::max_border(1, 1), 0);
        assert!(Viewport::new(1, 1, 0).is_ok());
    }
}
