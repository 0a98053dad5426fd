use vello::kurbo::{Point, Size};

/// Axis-aligned box in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: Interval,
    pub y: Interval,
}

impl Bounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self {
            x: Interval {
                min: min.x,
                max: max.x,
            },
            y: Interval {
                min: min.y,
                max: max.y,
            },
        }
    }

    /// Smallest box holding every finite point, or `None` if there is none.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        points
            .into_iter()
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .fold(None, |bounds: Option<Bounds>, &p| {
                let point = Bounds::new(p, p);
                Some(match bounds {
                    Some(bounds) => bounds.union(point),
                    None => point,
                })
            })
    }

    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self {
            x: self.x.union(other.x),
            y: self.y.union(other.y),
        }
    }

    #[inline]
    pub fn min(self) -> Point {
        Point::new(self.x.min, self.y.min)
    }

    #[inline]
    pub fn max(self) -> Point {
        Point::new(self.x.max, self.y.max)
    }

    #[inline]
    pub fn center(self) -> Point {
        Point::new(self.x.center(), self.y.center())
    }

    #[inline]
    pub fn size(self) -> Size {
        Size::new(self.x.size(), self.y.size())
    }

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.x.contains(other.x) && self.y.contains(other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    #[inline]
    pub fn size(self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn center(self) -> f64 {
        0.5 * (self.min + self.max)
    }

    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.min <= other.min && other.max <= self.max
    }
}
