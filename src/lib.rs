//! Interactive 2D plotting of sampled `(x, y)` series.
//!
//! Series are collected in a [`SeriesStore`], framed by a
//! [`ViewController`] and drawn through a [`Renderer`]. [`Plot::show`]
//! wires these to a window: drag with the left button to pan, scroll to
//! zoom, `f` to fit, `[`/`]` to shrink or grow the border.

mod bounds;
mod error;
mod layout;
pub mod logging;
mod projection;
mod render;
mod series;
mod view;
mod winit;

use tracing::debug;

pub use bounds::{Bounds, Interval};
pub use error::{PlotError, Result};
pub use layout::{FovLimits, PlotLayout};
pub use projection::{ClipMatrix, Projection};
pub use render::{PlotStyle, Renderer, SceneRenderer, SeriesPath};
pub use series::{Series, SeriesId, SeriesStore};
pub use view::{Camera, DragState, ViewController, Viewport};

pub use vello::kurbo::{Point, Size, Vec2};

pub struct Plot {
    pub layout: PlotLayout,
    pub store: SeriesStore,
}

impl Plot {
    pub fn new(layout: PlotLayout) -> Self {
        Self {
            layout,
            store: SeriesStore::new(),
        }
    }

    pub fn add_series(&mut self, series: Series) -> SeriesId {
        self.store.add(series)
    }

    pub fn add_xy(&mut self, xs: &[f64], ys: &[f64]) -> Result<SeriesId> {
        Ok(self.store.add(Series::from_xy(xs, ys)?))
    }

    /// Samples `f` over `[a, b]`; fewer than two samples adds nothing.
    pub fn add_fn<F>(&mut self, f: F, a: f64, b: f64, n: usize) -> Option<SeriesId>
    where
        F: FnMut(f64) -> f64,
    {
        match Series::from_fn(f, a, b, n) {
            Some(series) => Some(self.store.add(series)),
            None => {
                debug!(n, "not enough samples to plot a function");
                None
            }
        }
    }

    #[inline]
    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    /// Opens the window, fits the view to the data and blocks until the
    /// window is closed.
    pub fn show(self) -> Result<()> {
        winit::PlotApp::new(self)?.display()
    }
}

impl Default for Plot {
    fn default() -> Self {
        Self::new(PlotLayout::default())
    }
}
