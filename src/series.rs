use itertools::zip_eq;
use tracing::debug;
use vello::kurbo::Point;

use crate::{Bounds, PlotError, Result};

/// Position of a series in its store; also its render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesId(pub usize);

/// An immutable sequence of samples together with its data-space box.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    points: Vec<Point>,
    bounds: Option<Bounds>,
}

impl Series {
    pub fn new(points: Vec<Point>) -> Self {
        let bounds = Bounds::from_points(&points);
        Self { points, bounds }
    }

    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(PlotError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        let points = zip_eq(xs, ys).map(|(&x, &y)| Point::new(x, y)).collect();
        Ok(Self::new(points))
    }

    /// Samples `f` at `n` evenly spaced abscissae from `a` to `b` inclusive.
    ///
    /// Returns `None` when `n < 2`, since no spacing can be derived.
    pub fn from_fn<F>(mut f: F, a: f64, b: f64, n: usize) -> Option<Self>
    where
        F: FnMut(f64) -> f64,
    {
        if n < 2 {
            return None;
        }

        let points = (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                let x = a * (1.0 - t) + b * t;
                Point::new(x, f(x))
            })
            .collect();
        Some(Self::new(points))
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `None` for a series without any finite sample.
    #[inline]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

/// Append-only list of series with a running union of their bounds.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    series: Vec<Series>,
    bounds: Option<Bounds>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, series: Series) -> SeriesId {
        let id = SeriesId(self.series.len());

        self.bounds = match (self.bounds, series.bounds()) {
            (Some(global), Some(local)) => Some(global.union(local)),
            (global, local) => global.or(local),
        };
        debug!(
            id = id.0,
            samples = series.len(),
            bounds = ?self.bounds,
            "added series"
        );

        self.series.push(series);
        id
    }

    /// Union of every stored series' box; `None` while nothing with a
    /// finite sample has been added.
    #[inline]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    #[inline]
    pub fn get(&self, id: SeriesId) -> Option<&Series> {
        self.series.get(id.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeriesId, &Series)> {
        self.series
            .iter()
            .enumerate()
            .map(|(i, series)| (SeriesId(i), series))
    }
}
