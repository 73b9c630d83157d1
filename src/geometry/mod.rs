//! Geometric primitives for fragment and element positioning.
//!
//! Coordinates throughout the crate are PDF user-space values as emitted by
//! the upstream content reader, with the origin at the top-left of the page
//! (y grows downward).

use serde::{Deserialize, Serialize};

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use drawing_oxide::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    ///
    /// # Examples
    ///
    /// ```
    /// use drawing_oxide::geometry::Point;
    ///
    /// let p1 = Point::new(0.0, 0.0);
    /// let p2 = Point::new(3.0, 4.0);
    /// assert_eq!(p1.distance_to(&p2), 5.0);
    /// ```
    pub fn distance_to(&self, other: &Point) -> f32 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned bounding box in corner form.
///
/// Stored as the two corner points `(x0, y0)`-`(x1, y1)` because that is the
/// shape the fragment contract carries (`bbox: [x0, y0, x1, y1]`). A valid
/// box satisfies `x0 <= x1` and `y0 <= y1`. Serializes as the 4-element
/// array of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Left edge x-coordinate
    pub x0: f32,
    /// Top edge y-coordinate
    pub y0: f32,
    /// Right edge x-coordinate
    pub x1: f32,
    /// Bottom edge y-coordinate
    pub y1: f32,
}

impl BoundingBox {
    /// Create a bounding box from its corner coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use drawing_oxide::geometry::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(bbox.width(), 100.0);
    /// assert_eq!(bbox.height(), 50.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Center point of the box.
    ///
    /// # Examples
    ///
    /// ```
    /// use drawing_oxide::geometry::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
    /// let center = bbox.center();
    /// assert_eq!(center.x, 50.0);
    /// assert_eq!(center.y, 25.0);
    /// ```
    pub fn center(&self) -> Point {
        Point {
            x: (self.x0 + self.x1) / 2.0,
            y: (self.y0 + self.y1) / 2.0,
        }
    }

    /// Smallest box containing both `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use drawing_oxide::geometry::BoundingBox;
    ///
    /// let a = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
    /// let b = BoundingBox::new(25.0, 25.0, 75.0, 75.0);
    /// let union = a.union(&b);
    ///
    /// assert_eq!(union, BoundingBox::new(0.0, 0.0, 75.0, 75.0));
    /// ```
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Whether `other` lies entirely inside this box (edges included).
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }

    /// Whether a point lies inside this box (edges included).
    ///
    /// # Examples
    ///
    /// ```
    /// use drawing_oxide::geometry::{BoundingBox, Point};
    ///
    /// let bbox = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
    /// assert!(bbox.contains_point(&Point::new(50.0, 50.0)));
    /// assert!(!bbox.contains_point(&Point::new(150.0, 50.0)));
    /// ```
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }

    /// Whether all four coordinates are finite and the corners are not
    /// inverted.
    pub fn is_valid(&self) -> bool {
        self.x0.is_finite()
            && self.y0.is_finite()
            && self.x1.is_finite()
            && self.y1.is_finite()
            && self.x0 <= self.x1
            && self.y0 <= self.y1
    }
}

impl Serialize for BoundingBox {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (self.x0, self.y0, self.x1, self.y1).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let (x0, y0, x1, y1) = <(f32, f32, f32, f32)>::deserialize(deserializer)?;
        Ok(Self { x0, y0, x1, y1 })
    }
}
