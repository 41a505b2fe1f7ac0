use crate::Point;

/// A Cartesian product of 2 integer ranges: `[x_min..x_max] * [y_min..y_max]`, in cell
/// coordinates.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Extent {
    /// Point in the extent that's lesser than all other points in the extent.
    minimum: Point,

    /// A strict supremum is the least point that's strictly greater than all points in the extent.
    world_sup: Point,
}

impl Extent {
    /// The extent with `minimum` as the least element and `world_sup` as the least upper bound.
    pub fn from_min_and_world_supremum(minimum: Point, world_sup: Point) -> Self {
        Self { minimum, world_sup }
    }

    /// The extent with `minimum` as the least element and `world_max` as the greatest element.
    pub fn from_min_and_world_max(minimum: Point, world_max: Point) -> Self {
        Self::from_min_and_world_supremum(minimum, world_max + [1, 1].into())
    }

    /// Get the least element.
    pub fn get_minimum(&self) -> Point {
        self.minimum
    }

    /// Get the greatest element.
    pub fn get_world_max(&self) -> Point {
        self.world_sup - [1, 1].into()
    }

    /// Get the least upper bound in local coordinates (i.e. the size).
    pub fn get_local_supremum(&self) -> Point {
        self.world_sup - self.minimum
    }

    pub fn width(&self) -> i32 {
        self.get_local_supremum().x.max(0)
    }

    pub fn height(&self) -> i32 {
        self.get_local_supremum().y.max(0)
    }

    /// Number of lattice points in the extent.
    pub fn volume(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Returns `true` iff `self` contains no points.
    pub fn is_empty(&self) -> bool {
        self.volume() == 0
    }

    /// Returns true iff `p` is an element of `self`.
    pub fn contains_world(&self, p: &Point) -> bool {
        self.minimum.x <= p.x
            && p.x < self.world_sup.x
            && self.minimum.y <= p.y
            && p.y < self.world_sup.y
    }

    /// Iterates over the rows of `self` from least to greatest `y`.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Point>> {
        let Extent { minimum, world_sup } = *self;

        (minimum.y..world_sup.y)
            .map(move |y| (minimum.x..world_sup.x).map(move |x| Point::new(x, y)))
    }
}

/// Returns the smallest extent containing all of the given points, or `None` if there are none.
pub fn bounding_extent<I>(points: I) -> Option<Extent>
where
    I: IntoIterator<Item = Point>,
{
    let mut points = points.into_iter();
    let first = points.next()?;
    let (min_point, max_point) =
        points.fold((first, first), |(lo, hi), p| (lo.meet(&p), hi.join(&p)));

    Some(Extent::from_min_and_world_max(min_point, max_point))
}

/// Visits each point of an extent in row-major order (`x` fastest).
#[derive(Debug)]
pub struct ExtentIterator {
    extent: Extent,
    cursor: Point,
    completed: bool,
}

impl ExtentIterator {
    pub fn new(extent: Extent) -> Self {
        ExtentIterator {
            extent,
            cursor: extent.minimum,
            completed: extent.is_empty(),
        }
    }
}

impl Iterator for ExtentIterator {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.completed {
            return None;
        }

        let old_cursor = self.cursor;

        self.cursor.x += 1;
        if self.cursor.x == self.extent.world_sup.x {
            self.cursor.x = self.extent.minimum.x;
            self.cursor.y += 1;
            if self.cursor.y == self.extent.world_sup.y {
                self.completed = true;
            }
        }

        Some(old_cursor)
    }
}

impl IntoIterator for Extent {
    type Item = Point;
    type IntoIter = ExtentIterator;

    fn into_iter(self) -> Self::IntoIter {
        ExtentIterator::new(self)
    }
}

impl IntoIterator for &Extent {
    type Item = Point;
    type IntoIter = ExtentIterator;

    fn into_iter(self) -> Self::IntoIter {
        ExtentIterator::new(*self)
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
