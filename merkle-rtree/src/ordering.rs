//! Sort keys used to cluster points into leaves before bulk loading.
//!
//! The ordering only affects which points share a leaf (and so how well
//! queries prune). Sorting is stable, so for a given input sequence and
//! ordering the resulting tree is always the same.

use std::{cmp::Ordering, fmt};

use crate::Point;

/// Strategy for ordering points before they are chunked into leaves.
#[derive(Clone, Copy, Default)]
pub enum SortOrder {
    /// By `x`, then by `y`.
    #[default]
    Lexicographic,
    /// By Morton (Z-order) code of the location.
    ZOrder,
    /// By a caller-supplied comparison.
    Custom(fn(&Point, &Point) -> Ordering),
}

impl SortOrder {
    /// Compare two points under this ordering.
    pub fn compare(&self, a: &Point, b: &Point) -> Ordering {
        match self {
            SortOrder::Lexicographic => (a.x, a.y).cmp(&(b.x, b.y)),
            SortOrder::ZOrder => morton_encode(a.x, a.y).cmp(&morton_encode(b.x, b.y)),
            SortOrder::Custom(cmp) => cmp(a, b),
        }
    }

    /// Stable sort of `points` under this ordering.
    pub fn sort(&self, points: &mut [Point]) {
        match self {
            // Compute each code once instead of twice per comparison.
            SortOrder::ZOrder => points.sort_by_cached_key(|p| morton_encode(p.x, p.y)),
            _ => points.sort_by(|a, b| self.compare(a, b)),
        }
    }
}

impl fmt::Debug for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Lexicographic => write!(f, "Lexicographic"),
            SortOrder::ZOrder => write!(f, "ZOrder"),
            SortOrder::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Map a signed coordinate to an unsigned one with the same ordering.
fn order_preserving(v: i32) -> u32 {
    (v as u32) ^ 0x8000_0000
}

fn from_order_preserving(v: u32) -> i32 {
    (v ^ 0x8000_0000) as i32
}

/// Spread the 32 bits of `v` over the even bit positions of a `u64`.
fn spread_bits(v: u32) -> u64 {
    let mut x = v as u64;
    x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & 0x5555_5555_5555_5555;
    x
}

fn compact_bits(v: u64) -> u32 {
    let mut x = v & 0x5555_5555_5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x | (x >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x >> 4)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x >> 8)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x >> 16)) & 0x0000_0000_FFFF_FFFF;
    x as u32
}

/// Morton code of `(x, y)`: bits of `x` on even positions, bits of `y` on
/// odd positions.
///
/// Coordinates are shifted so that negative values order before positive
/// ones.
pub fn morton_encode(x: i32, y: i32) -> u64 {
    spread_bits(order_preserving(x)) | (spread_bits(order_preserving(y)) << 1)
}

/// Inverse of [`morton_encode`].
pub fn morton_decode(code: u64) -> (i32, i32) {
    (
        from_order_preserving(compact_bits(code)),
        from_order_preserving(compact_bits(code >> 1)),
    )
}
