use crate::utils::Float;

/// A point on the plane in panel-pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// X coordinate.
    pub x: Float,
    /// Y coordinate.
    pub y: Float,
}

impl Point {
    /// Creates a new instance of `Point`.
    pub const fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }

    /// Returns squared euclidian distance to other point.
    #[inline]
    pub fn sqr_distance(&self, other: &Point) -> Float {
        let dx = self.x - other.x;
        let dy = self.y - other.y;

        dx * dx + dy * dy
    }

    /// Returns euclidian distance to other point.
    #[inline]
    pub fn distance(&self, other: &Point) -> Float {
        self.sqr_distance(other).sqrt()
    }

    /// Returns a middle point between this and other point.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Checks whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A drawing area size. Signals, nodes and clipped segments live inside `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    /// Width of the area.
    pub width: Float,
    /// Height of the area.
    pub height: Float,
}

impl Canvas {
    /// Creates a new instance of `Canvas`.
    pub const fn new(width: Float, height: Float) -> Self {
        Self { width, height }
    }

    /// Returns the center of the area.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2., self.height / 2.)
    }

    /// Returns area bounds as a rectangle.
    pub fn bounds(&self) -> Bounds {
        Bounds { min: Point::new(0., 0.), max: Point::new(self.width, self.height) }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(550., 310.)
    }
}

/// An axis aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Lower left corner.
    pub min: Point,
    /// Upper right corner.
    pub max: Point,
}

impl Bounds {
    /// Checks whether the point is inside of bounds (inclusive).
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}
