use vello::{
    Scene,
    kurbo::{Affine, BezPath, Cap, Circle, Join, PathEl, Stroke},
    peniko::{self, Color, Fill},
};

use crate::{Projection, Series};

/// Drawing backend for stored series.
///
/// `upload` runs once per series when it becomes visible to the renderer;
/// `draw` runs once per frame with every handle in insertion order.
pub trait Renderer {
    type Handle;

    fn upload(&mut self, series: &Series) -> Self::Handle;

    fn draw<'h, I>(&mut self, handles: I, projection: &Projection)
    where
        I: IntoIterator<Item = &'h Self::Handle>,
        Self::Handle: 'h;
}

#[derive(Debug, Clone, Copy)]
pub struct PlotStyle {
    pub background: Color,
    pub line: Color,
    pub marker: Color,
    /// Stroke width in physical pixels.
    pub line_width: f64,
    /// Marker radius in physical pixels.
    pub marker_radius: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            background: Color::new([0.9, 0.9, 0.9, 1.0]),
            line: Color::new([0.1, 0.1, 0.1, 1.0]),
            marker: Color::new([0.1, 0.3, 0.7, 1.0]),
            line_width: 2.0,
            marker_radius: 3.5,
        }
    }
}

/// A series polyline in data space, built once at upload.
#[derive(Debug, Clone, Default)]
pub struct SeriesPath {
    path: BezPath,
}

impl SeriesPath {
    /// Non-finite samples break the line: the next finite sample starts a
    /// new subpath.
    pub fn new(series: &Series) -> Self {
        let mut path = BezPath::new();
        let mut gap = true;
        for &point in series.points() {
            if !(point.x.is_finite() && point.y.is_finite()) {
                gap = true;
            } else if gap {
                path.move_to(point);
                gap = false;
            } else {
                path.line_to(point);
            }
        }
        Self { path }
    }

    #[inline]
    pub fn path(&self) -> &BezPath {
        &self.path
    }
}

/// Builds a vello [`Scene`] with a stroked line strip and a marker per
/// sample for every series.
pub struct SceneRenderer {
    scene: Scene,
    style: PlotStyle,
}

impl SceneRenderer {
    pub fn new(style: PlotStyle) -> Self {
        Self {
            scene: Scene::new(),
            style,
        }
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    fn draw_series(&mut self, handle: &SeriesPath, to_screen: Affine) {
        // Transform the geometry rather than the stroke so line width and
        // marker size stay in pixels.
        let path = to_screen * handle.path();

        let style = Stroke::new(self.style.line_width)
            .with_join(Join::Round)
            .with_caps(Cap::Round);
        self.scene.stroke(
            &style,
            Affine::IDENTITY,
            peniko::BrushRef::Solid(self.style.line),
            None,
            &path,
        );

        for element in path.elements() {
            if let PathEl::MoveTo(point) | PathEl::LineTo(point) = element {
                self.scene.fill(
                    Fill::NonZero,
                    Affine::IDENTITY,
                    peniko::BrushRef::Solid(self.style.marker),
                    None,
                    &Circle::new(*point, self.style.marker_radius),
                );
            }
        }
    }
}

impl Renderer for SceneRenderer {
    type Handle = SeriesPath;

    fn upload(&mut self, series: &Series) -> SeriesPath {
        SeriesPath::new(series)
    }

    fn draw<'h, I>(&mut self, handles: I, projection: &Projection)
    where
        I: IntoIterator<Item = &'h SeriesPath>,
    {
        self.scene.reset();

        let to_screen = projection.data_to_screen();
        for handle in handles {
            self.draw_series(handle, to_screen);
        }
    }
}

#[cfg(test)]
mod tests {
    use vello::kurbo::Point;

    use super::*;

    #[test]
    fn path_breaks_at_non_finite_samples() {
        let series = Series::new(vec![
            Point::new(f64::NAN, 0.0),
            Point::new(0.0, 0.0),
            Point::new(f64::NAN, 1.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
        ]);
        let handle = SeriesPath::new(&series);
        assert_eq!(
            handle.path().elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::MoveTo(Point::new(1.0, 1.0)),
                PathEl::LineTo(Point::new(2.0, 0.0)),
            ]
        );
    }

    #[test]
    fn pole_splits_line_into_two_branches() {
        // Samples -2, -1, 0, 1, 2; 1/0 is infinite.
        let series = Series::from_fn(|x| 1.0 / x, -2.0, 2.0, 5).unwrap();
        let handle = SeriesPath::new(&series);
        let moves = handle
            .path()
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
        assert_eq!(handle.path().elements().len(), 4);
    }

    #[test]
    fn empty_series_has_empty_path() {
        let handle = SeriesPath::new(&Series::new(Vec::new()));
        assert!(handle.path().elements().is_empty());
    }
}
