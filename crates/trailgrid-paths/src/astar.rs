use std::collections::BinaryHeap;
use std::time::Instant;

use trailgrid_core::Point;

use crate::config::SearchBudget;
use crate::node::{Path, PathNode};
use crate::space::{OpenEntry, SearchOutcome, SearchSpace};
use crate::traits::AstarPather;

impl SearchSpace {
    /// Compute the lowest-cost path from `from` to `to` using A*.
    ///
    /// Returns [`SearchOutcome::Found`] with the full path (both endpoints
    /// included), [`SearchOutcome::NoPath`] when `to` cannot be reached or
    /// either endpoint is not a node, and [`SearchOutcome::Aborted`] when
    /// `budget` runs out first. `from == to` yields a one-node path of cost 0.
    ///
    /// Among equal-`f` candidates the one with the smaller estimate is
    /// expanded first, then the one discovered first, so the returned path is
    /// deterministic.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
        budget: &SearchBudget,
    ) -> SearchOutcome {
        self.expanded = 0;
        let (Some(start_idx), Some(goal_idx)) = (self.idx(from), self.idx(to)) else {
            return SearchOutcome::NoPath;
        };
        if !pather.contains(from) || !pather.contains(to) {
            return SearchOutcome::NoPath;
        }
        if start_idx == goal_idx {
            return SearchOutcome::Found(Path::new(vec![PathNode { pos: from, cost: 0 }]));
        }

        log::debug!("starting A* from {from} to {to}");
        let started = Instant::now();
        let cur_gen = self.next_generation();

        let h = pather.estimate(from, to);
        {
            let node = &mut self.astar_nodes[start_idx];
            node.g = 0;
            node.h = h;
            node.f = h;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
        open.push(OpenEntry {
            idx: start_idx,
            g: 0,
            h,
            f: h,
            seq: self.next_seq(),
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let verdict = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search None;
            };

            let ci = current.idx;

            // Skip stale entries.
            let cn = &self.astar_nodes[ci];
            if cn.generation != cur_gen || !cn.open || cn.g != current.g {
                continue;
            }

            if ci == goal_idx {
                break 'search Some(Ok(()));
            }

            if let Some(reason) = budget.exhausted(self.expanded) {
                break 'search Some(Err(reason));
            }

            self.astar_nodes[ci].open = false;
            self.expanded += 1;
            let current_g = current.g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g.saturating_add(pather.cost(current_point, np));

                let n = &mut self.astar_nodes[ni];
                if n.generation == cur_gen {
                    if tentative_g >= n.g {
                        continue;
                    }
                    if !n.open {
                        log::trace!("reopening {np}: {} -> {tentative_g}", n.g);
                    }
                } else {
                    n.generation = cur_gen;
                    n.h = pather.estimate(np, to);
                }

                n.g = tentative_g;
                n.f = tentative_g.saturating_add(n.h);
                n.parent = ci;
                n.open = true;
                let (h, f) = (n.h, n.f);

                let seq = self.next_seq();
                open.push(OpenEntry {
                    idx: ni,
                    g: tentative_g,
                    h,
                    f,
                    seq,
                });
            }
        };

        self.nbuf = nbuf;

        let outcome = match verdict {
            None => SearchOutcome::NoPath,
            Some(Err(reason)) => SearchOutcome::Aborted(reason),
            Some(Ok(())) => SearchOutcome::Found(self.retrace(pather, goal_idx)),
        };
        log::debug!(
            "A* from {from} to {to}: {} after {} expansions in {:?}",
            match &outcome {
                SearchOutcome::Found(path) => format!("cost {}", path.total_cost()),
                SearchOutcome::NoPath => "no path".to_string(),
                SearchOutcome::Aborted(reason) => reason.to_string(),
            },
            self.expanded,
            started.elapsed()
        );
        outcome
    }

    /// Follow parent links back from `goal_idx` and return the path in
    /// start-to-goal order.
    fn retrace<P: AstarPather>(&self, pather: &P, goal_idx: usize) -> Path {
        let mut steps = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            let node = &self.astar_nodes[ci];
            let pos = self.point(ci);
            let cost = match node.parent {
                usize::MAX => 0,
                pi => pather.cost(self.point(pi), pos),
            };
            steps.push(PathNode { pos, cost });
            ci = node.parent;
        }
        steps.reverse();
        Path::new(steps)
    }
}
