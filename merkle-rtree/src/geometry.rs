//! Points and axis-aligned rectangles.
//!
//! All comparisons are closed: a point on the edge of a rectangle is inside
//! it, and two rectangles that only share an edge or a corner intersect.

use std::fmt;

use bincode::{Decode, Encode};

use crate::MerkleRTreeError;

/// An identified point on the integer plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub id: u32,
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a point.
    pub const fn new(id: u32, x: i32, y: i32) -> Self {
        Point { id, x, y }
    }

    /// `true` if this point lies inside `rect`, edges included.
    pub fn is_inside(&self, rect: &Rect) -> bool {
        rect.contains(self)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}({}, {})", self.id, self.x, self.y)
    }
}

/// An axis-aligned rectangle given by its lower-left `(lx, ly)` and
/// upper-right `(ux, uy)` corners.
///
/// [`Rect::EMPTY`] is inverted on both axes and acts as the identity for
/// [`Rect::enlarge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub lx: i32,
    pub ly: i32,
    pub ux: i32,
    pub uy: i32,
}

impl Rect {
    /// The rectangle enclosing nothing.
    pub const EMPTY: Rect = Rect {
        lx: i32::MAX,
        ly: i32::MAX,
        ux: i32::MIN,
        uy: i32::MIN,
    };

    /// Create a rectangle, rejecting inverted corners.
    pub fn new(lx: i32, ly: i32, ux: i32, uy: i32) -> Result<Self, MerkleRTreeError> {
        let rect = Rect { lx, ly, ux, uy };
        rect.validate()?;
        Ok(rect)
    }

    /// The degenerate rectangle covering a single point.
    pub const fn from_point(point: &Point) -> Self {
        Rect {
            lx: point.x,
            ly: point.y,
            ux: point.x,
            uy: point.y,
        }
    }

    /// Minimum bounding rectangle of `points`; [`Rect::EMPTY`] if there are
    /// none.
    pub fn bounding<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        points
            .into_iter()
            .fold(Rect::EMPTY, |rect, point| rect.enlarge_point(point))
    }

    /// `true` if the rectangle is inverted on some axis (encloses nothing).
    pub fn is_empty(&self) -> bool {
        self.lx > self.ux || self.ly > self.uy
    }

    /// Fails with `InvalidInput` for an inverted rectangle.
    pub fn validate(&self) -> Result<(), MerkleRTreeError> {
        if self.is_empty() {
            return Err(MerkleRTreeError::InvalidInput(format!(
                "rectangle {} has inverted corners",
                self
            )));
        }
        Ok(())
    }

    /// `true` if `point` is inside, edges included.
    pub fn contains(&self, point: &Point) -> bool {
        self.lx <= point.x && point.x <= self.ux && self.ly <= point.y && point.y <= self.uy
    }

    /// `true` if `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        !other.is_empty()
            && self.lx <= other.lx
            && other.ux <= self.ux
            && self.ly <= other.ly
            && other.uy <= self.uy
    }

    /// `true` unless the rectangles are disjoint on some axis.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let disjoint = self.ux < other.lx
            || other.ux < self.lx
            || self.uy < other.ly
            || other.uy < self.ly;
        !disjoint
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn enlarge(&self, other: &Rect) -> Rect {
        Rect {
            lx: self.lx.min(other.lx),
            ly: self.ly.min(other.ly),
            ux: self.ux.max(other.ux),
            uy: self.uy.max(other.uy),
        }
    }

    /// Smallest rectangle covering both `self` and `point`.
    pub fn enlarge_point(&self, point: &Point) -> Rect {
        self.enlarge(&Rect::from_point(point))
    }

    /// Area of the rectangle; 0 for [`Rect::EMPTY`] or a degenerate one.
    pub fn area(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let width = (self.ux as i64 - self.lx as i64) as u64;
        let height = (self.uy as i64 - self.ly as i64) as u64;
        width.saturating_mul(height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[({}, {}) to ({}, {})]",
            self.lx, self.ly, self.ux, self.uy
        )
    }
}
