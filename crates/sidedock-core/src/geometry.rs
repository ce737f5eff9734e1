//! Integer geometry primitives.
//!
//! Layout values are whole units. Positions inside a container are measured
//! from the container's anchored edge, so `x` grows away from that edge.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Size { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos<T> {
    pub x: T,
    pub y: T,
}

impl<T> Pos<T> {
    pub const fn new(x: T, y: T) -> Self {
        Pos { x, y }
    }
}

impl<T: Add<Output = T>> Add for Pos<T> {
    type Output = Pos<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Pos {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl From<IVec2> for Pos<i32> {
    fn from(v: IVec2) -> Self {
        Pos { x: v.x, y: v.y }
    }
}

impl From<Pos<i32>> for IVec2 {
    fn from(p: Pos<i32>) -> Self {
        IVec2::new(p.x, p.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl Rect<i32> {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos_size(pos: Pos<i32>, size: Size<i32>) -> Self {
        Rect::new(pos.x, pos.y, size.width, size.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Edge-inclusive containment test.
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Grow the rect by `dx` on the left and right and `dy` on the top and bottom.
    pub fn inflate(&self, dx: i32, dy: i32) -> Self {
        Rect::new(self.x - dx, self.y - dy, self.width + 2 * dx, self.height + 2 * dy)
    }
}
