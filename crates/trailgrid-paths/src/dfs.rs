//! Depth-first reachability and connected-component labelling.

use trailgrid_core::Point;

use crate::space::SearchSpace;
use crate::traits::Pather;

impl SearchSpace {
    /// Every node reachable from `start`, in depth-first pre-order.
    ///
    /// Iterative and stack-based; the first neighbor listed by `pather` is
    /// explored first. Each point appears once. A `start` that is not a node
    /// yields an empty list.
    pub fn dfs<P: Pather>(&mut self, pather: &P, start: Point) -> Vec<Point> {
        let mut visited = Vec::new();
        let Some(si) = self.idx(start) else {
            return visited;
        };
        if !pather.contains(start) {
            return visited;
        }

        for v in self.seen.iter_mut() {
            *v = false;
        }
        let mut nbuf = std::mem::take(&mut self.nbuf);

        self.stack.clear();
        self.stack.push(si);

        while let Some(ci) = self.stack.pop() {
            if self.seen[ci] {
                continue;
            }
            self.seen[ci] = true;
            let cp = self.point(ci);
            visited.push(cp);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);
            // Reversed so the first neighbor ends on top of the stack.
            for &np in nbuf.iter().rev() {
                if let Some(ni) = self.idx(np) {
                    if !self.seen[ni] {
                        self.stack.push(ni);
                    }
                }
            }
        }

        self.nbuf = nbuf;
        log::debug!("DFS from {start} reached {} nodes", visited.len());
        visited
    }

    /// Label every node with a connected-component ID and return the number
    /// of components.
    ///
    /// Two nodes share a component if there is a path of neighbors (as
    /// defined by `pather`) between them. IDs are assigned in row-major order
    /// of each component's first node. Use
    /// [`component_at`](Self::component_at) to query the label of a point.
    pub fn components<P: Pather>(&mut self, pather: &P) -> usize {
        let len = self.bounds.len();
        for v in self.cc_labels.iter_mut() {
            *v = -1;
        }

        let mut label: i32 = 0;
        let mut nbuf = std::mem::take(&mut self.nbuf);

        for first in 0..len {
            if self.cc_labels[first] >= 0 || !pather.contains(self.point(first)) {
                continue;
            }

            self.stack.clear();
            self.stack.push(first);
            self.cc_labels[first] = label;

            while let Some(ci) = self.stack.pop() {
                let cp = self.point(ci);
                nbuf.clear();
                pather.neighbors(cp, &mut nbuf);

                for &np in nbuf.iter() {
                    if let Some(ni) = self.idx(np) {
                        if self.cc_labels[ni] < 0 {
                            self.cc_labels[ni] = label;
                            self.stack.push(ni);
                        }
                    }
                }
            }

            label += 1;
        }

        self.nbuf = nbuf;
        label as usize
    }

    /// The component ID of `p` from the last [`components`](Self::components)
    /// call, or `None` if `p` is not a node or was never labelled.
    pub fn component_at(&self, p: Point) -> Option<usize> {
        let i = self.idx(p)?;
        let label = self.cc_labels[i];
        if label < 0 {
            None
        } else {
            Some(label as usize)
        }
    }
}
