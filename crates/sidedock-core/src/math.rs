//! Vector math re-exported from [`glam`].
//!
//! Sidedock works in whole layout units, so pointer positions and deltas
//! are [`IVec2`]. The float types are re-exported for hosts that convert
//! from platform pointer events.
//!
//! ```
//! use sidedock_core::math::IVec2;
//!
//! let start = IVec2::new(10, 20);
//! let now = IVec2::new(14, 11);
//! assert_eq!((now - start).abs().element_sum(), 13);
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{IVec2, Vec2};

/// Manhattan length of a delta (`|x| + |y|`).
#[inline]
pub fn manhattan(delta: IVec2) -> i32 {
    delta.abs().element_sum()
}

/// Round a float pointer position to layout units.
#[inline]
pub fn to_layout_units(pos: Vec2) -> IVec2 {
    pos.round().as_ivec2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan(IVec2::new(-5, 7)), 12);
        assert_eq!(manhattan(IVec2::ZERO), 0);
    }

    #[test]
    fn test_to_layout_units() {
        assert_eq!(to_layout_units(Vec2::new(10.4, -3.6)), IVec2::new(10, -4));
    }
}
