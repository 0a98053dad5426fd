use crate::{PlotError, PlotStyle, Result};

/// Startup configuration of a plot window.
#[derive(Debug, Clone)]
pub struct PlotLayout {
    pub width: f64,
    pub height: f64,
    pub title: String,
    /// Margin in physical pixels kept around the plotted area.
    pub border: u32,
    pub zoom_sensitivity: f64,
    /// Proportional padding applied by fit-to-data.
    pub fit_margin: f64,
    pub fov_limits: FovLimits,
    pub style: PlotStyle,
}

impl PlotLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    pub fn with_zoom_sensitivity(mut self, zoom_sensitivity: f64) -> Self {
        self.zoom_sensitivity = zoom_sensitivity;
        self
    }

    pub fn with_fit_margin(mut self, fit_margin: f64) -> Self {
        self.fit_margin = fit_margin;
        self
    }

    pub fn with_fov_limits(mut self, fov_limits: FovLimits) -> Self {
        self.fov_limits = fov_limits;
        self
    }

    pub fn with_style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width >= 1.0)
            || !(self.height.is_finite() && self.height >= 1.0)
        {
            return Err(PlotError::InvalidLayout(format!(
                "window size {}x{} is not drawable",
                self.width, self.height
            )));
        }
        if 2.0 * self.border as f64 >= self.width.min(self.height) {
            return Err(PlotError::InvalidLayout(format!(
                "border {} does not fit a {}x{} window",
                self.border, self.width, self.height
            )));
        }
        if !(self.zoom_sensitivity.is_finite() && self.zoom_sensitivity > 0.0) {
            return Err(PlotError::InvalidLayout(format!(
                "zoom sensitivity must be positive, got {}",
                self.zoom_sensitivity
            )));
        }
        if !(self.fit_margin.is_finite() && self.fit_margin > 0.0) {
            return Err(PlotError::InvalidLayout(format!(
                "fit margin must be positive, got {}",
                self.fit_margin
            )));
        }
        self.fov_limits.validate()
    }
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            title: String::from("plotview"),
            border: 100,
            zoom_sensitivity: 0.1,
            fit_margin: 1.2,
            fov_limits: FovLimits::default(),
            style: PlotStyle::default(),
        }
    }
}

/// Range every fov component is kept within.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FovLimits {
    pub min: f64,
    pub max: f64,
}

impl FovLimits {
    #[inline]
    pub fn clamp(self, fov: f64) -> f64 {
        if fov.is_nan() {
            return self.min;
        }
        fov.clamp(self.min, self.max)
    }

    pub fn validate(self) -> Result<()> {
        if self.min > 0.0 && self.min <= self.max && self.max.is_finite() {
            Ok(())
        } else {
            Err(PlotError::InvalidLayout(format!(
                "fov limits [{}, {}] must be finite, positive and ordered",
                self.min, self.max
            )))
        }
    }
}

impl Default for FovLimits {
    fn default() -> Self {
        Self {
            min: 1e-6,
            max: 1e12,
        }
    }
}
