/*
Implements:
 - points of the unit square with a tolerance-based equality
 - line segments (slope-intercept form) and the crossing test used to keep maps planar
*/

/// two floats closer than this are considered equal
pub const EPSILON:f64 = 1e-4;

/** 2D point.
Equality is tolerance-based (both coordinates closer than [`EPSILON`]). This relation is
not transitive, so `Point` is neither `Eq` nor `Hash`: quantizing before hashing would
split two equal points lying on both sides of a grid line.
*/
#[derive(Debug, Clone, Copy)]
pub struct Point {
    /// x coordinate
    pub x: f64,
    /// y coordinate
    pub y: f64,
}

impl PartialEq for Point {
    fn eq(&self, other:&Self) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl Point {
    /// creates a point
    pub fn new(x:f64, y:f64) -> Self { Self { x, y } }

    /// squared euclidean distance
    pub fn dist(&self, other:&Self) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }
}


/** line segment [p1,p2] lying on the line y = b.x + a.

Vertical segments (p1.x == p2.x) get a slope of 0: they cannot be represented in this form
and crossings involving them are not detected exactly.
*/
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    p1: Point,
    p2: Point,
    /// slope
    b: f64,
    /// intercept
    a: f64,
}

impl Segment {
    /// builds the segment and its line coefficients
    pub fn new(p1:Point, p2:Point) -> Self {
        #[allow(clippy::float_cmp)]
        let b = if p1.x == p2.x { 0. } else { (p2.y - p1.y) / (p2.x - p1.x) };
        let a = p2.y - b * p2.x;
        Self { p1, p2, b, a }
    }

    /// first endpoint
    pub fn p1(&self) -> Point { self.p1 }

    /// second endpoint
    pub fn p2(&self) -> Point { self.p2 }

    /// slope of the supporting line
    pub fn slope(&self) -> f64 { self.b }

    /// intercept of the supporting line
    pub fn intercept(&self) -> f64 { self.a }

    fn min_x(&self) -> f64 { self.p1.x.min(self.p2.x) }

    fn max_x(&self) -> f64 { self.p1.x.max(self.p2.x) }

    /// true iff both segments have a common endpoint
    pub fn shares_endpoint(&self, other:&Self) -> bool {
        self.p1 == other.p1 || self.p1 == other.p2 || self.p2 == other.p1 || self.p2 == other.p2
    }

    /** true iff the two segments cross at a point interior to both of them.
    Segments sharing an endpoint never intersect (normal situation in a planar graph).
    Parallel segments never intersect.
    */
    pub fn intersects(&self, other:&Self) -> bool {
        if self.shares_endpoint(other) { return false; }
        // disjoint x-ranges
        if other.max_x() < self.min_x() || self.max_x() < other.min_x() { return false; }
        if (self.b - other.b).abs() < EPSILON { return false; }
        // x coordinate where the two lines meet
        let x = (other.a - self.a) / (self.b - other.b);
        self.min_x() < x && x < self.max_x() && other.min_x() < x && x < other.max_x()
    }
}

/// true iff segments a and b cross (see [`Segment::intersects`])
pub fn intersects(a:&Segment, b:&Segment) -> bool { a.intersects(b) }
