//! Axis-aligned rectangles and points used for mine placement.

use serde::{Deserialize, Serialize};

/// A 2D point or size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Which way a rectangle is cut in half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cut {
    /// Cut line runs vertically, halving the width.
    Vertical,
    /// Cut line runs horizontally, halving the height.
    Horizontal,
}

/// Axis-aligned rectangle anchored at its minimum corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` whose centre sits on `centre`.
    pub fn centred(centre: Vec2, size: Vec2) -> Self {
        Self::new(
            centre.x - size.x / 2.0,
            centre.y - size.y / 2.0,
            size.x,
            size.y,
        )
    }

    /// Finite position and a positive finite size.
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn x_max(&self) -> f32 {
        self.x + self.width
    }

    pub fn y_max(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Cut along the longer axis; a square is cut vertically.
    pub fn longer_axis_cut(&self) -> Cut {
        if self.width >= self.height {
            Cut::Vertical
        } else {
            Cut::Horizontal
        }
    }

    /// Split into two equal halves along the longer axis.
    pub fn halve(&self) -> (Rect, Rect) {
        match self.longer_axis_cut() {
            Cut::Vertical => {
                let half = self.width / 2.0;
                (
                    Rect::new(self.x, self.y, half, self.height),
                    Rect::new(self.center().x, self.y, half, self.height),
                )
            }
            Cut::Horizontal => {
                let half = self.height / 2.0;
                (
                    Rect::new(self.x, self.y, self.width, half),
                    Rect::new(self.x, self.center().y, self.width, half),
                )
            }
        }
    }

    /// True when the interiors intersect; shared edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x_max()
            && other.x < self.x_max()
            && self.y < other.y_max()
            && other.y < self.y_max()
    }

    /// True when `p` lies inside or on the boundary.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x_max() && p.y >= self.y && p.y <= self.y_max()
    }

    /// Smallest distance from `p` to any edge along x and along y.
    pub fn edge_distance(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            (p.x - self.x).min(self.x_max() - p.x),
            (p.y - self.y).min(self.y_max() - p.y),
        )
    }
}
