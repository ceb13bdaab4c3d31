//! Axis-aligned bounding box — position, size and collision all in one
//! integer rectangle.  Pure value semantics; mutation is translation only,
//! a box is never resized after construction.

/// An axis-aligned rectangle in screen pixels.
///
/// `right` and `bottom` are exclusive in the usual raster sense: a box of
/// width w at x covers columns `x .. x + w`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Bounds { left, top, right, bottom }
    }

    /// Build from a top-left corner and a size.
    pub fn from_origin(x: i32, y: i32, width: i32, height: i32) -> Self {
        Bounds::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> i32 {
        (self.left + self.right) / 2
    }

    pub fn center_y(&self) -> i32 {
        (self.top + self.bottom) / 2
    }

    /// Translate in place by (dx, dy).
    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.left += dx;
        self.top += dy;
        self.right += dx;
        self.bottom += dy;
    }

    /// Reposition in place so the top-left corner lands on (x, y).
    pub fn offset_to(&mut self, x: i32, y: i32) {
        let w = self.width();
        let h = self.height();
        self.left = x;
        self.top = y;
        self.right = x + w;
        self.bottom = y + h;
    }

    /// True iff the two rectangles overlap on both axes.  Touching edges do
    /// not count as overlap.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}
