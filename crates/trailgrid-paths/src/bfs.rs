use trailgrid_core::Point;

use crate::space::{SearchSpace, UNREACHABLE};
use crate::traits::Pather;

impl SearchSpace {
    /// Every node reachable from `start`, in breadth-first (level) order.
    ///
    /// Uses a FIFO queue: all nodes `d` steps away are listed before any node
    /// `d + 1` steps away. Each point appears once. A `start` that is not a
    /// node yields an empty list. Step counts are kept for
    /// [`bfs_at`](Self::bfs_at).
    pub fn bfs<P: Pather>(&mut self, pather: &P, start: Point) -> Vec<Point> {
        for v in self.bfs_map.iter_mut() {
            *v = UNREACHABLE;
        }
        let mut visited = Vec::new();
        let Some(si) = self.idx(start) else {
            return visited;
        };
        if !pather.contains(start) {
            return visited;
        }

        self.queue.clear();
        self.bfs_map[si] = 0;
        self.queue.push_back(si);
        visited.push(start);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = self.queue.pop_front() {
            let depth = self.bfs_map[ci];
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_map[ni] != UNREACHABLE {
                    continue;
                }
                self.bfs_map[ni] = depth + 1;
                self.queue.push_back(ni);
                visited.push(np);
            }
        }

        self.nbuf = nbuf;
        log::debug!("BFS from {start} reached {} nodes", visited.len());
        visited
    }

    /// Number of steps from the last [`bfs`](Self::bfs) start to `p`.
    ///
    /// Returns [`UNREACHABLE`] if `p` is outside the range or was not
    /// reached.
    pub fn bfs_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.bfs_map[i],
            None => UNREACHABLE,
        }
    }
}
