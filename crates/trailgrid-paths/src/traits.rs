use trailgrid_core::Point;

/// Something searches can walk: a set of nodes and the moves between them.
pub trait Pather {
    /// Push the nodes one move away from `p` onto `buf`, in a fixed order.
    /// `buf` is cleared by the caller.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);

    /// Whether `p` is a node. Searches starting elsewhere find nothing.
    fn contains(&self, p: Point) -> bool;
}

/// A [`Pather`] whose moves have a price.
pub trait WeightedPather: Pather {
    /// Price of the move from `from` onto the neighbor `to`. Never negative.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// A [`WeightedPather`] that can guess the remaining cost, for A*.
pub trait AstarPather: WeightedPather {
    /// Lower bound on the cost of any route from `from` to `to`.
    fn estimate(&self, from: Point, to: Point) -> i32;
}
