//! Per-frame queries for a track of obstacles, indexed by
//! (distance, lane). The caller advances `position` every frame, asks for
//! the [`visible`](Avl::visible) obstacles ahead of it and evicts the
//! ones it has [passed](Avl::evict_passed).

use tracing::debug;

use crate::avl::Avl;
use crate::entry::{Entry, Key};
use crate::obstacle::{Obstacle, ObstacleKind};

/// Query window relative to the current track position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Distance visible ahead of the position.
    pub lookahead: i64,
    /// Distance behind the position after which obstacles are evicted.
    pub trail: i64,
    pub lane_min: i64,
    pub lane_max: i64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            lookahead: 1000,
            trail: 200,
            lane_min: 0,
            lane_max: 5,
        }
    }
}

impl Viewport {
    pub fn set_lookahead(mut self, lookahead: i64) -> Viewport {
        self.lookahead = lookahead;
        self
    }

    pub fn set_trail(mut self, trail: i64) -> Viewport {
        self.trail = trail;
        self
    }

    pub fn set_lanes(mut self, lane_min: i64, lane_max: i64) -> Viewport {
        self.lane_min = lane_min;
        self.lane_max = lane_max;
        self
    }

    /// Range query window, `(primary_min, primary_max, secondary_min,
    /// secondary_max)`, for `position`.
    pub fn window(&self, position: i64) -> (i64, i64, i64, i64) {
        let max = position.saturating_add(self.lookahead);
        (position, max, self.lane_min, self.lane_max)
    }

    /// Window covering everything at or behind `position - trail`.
    pub fn passed(&self, position: i64) -> (i64, i64, i64, i64) {
        let max = position.saturating_sub(self.trail);
        (i64::MIN, max, self.lane_min, self.lane_max)
    }
}

impl Avl<Obstacle> {
    /// Place an obstacle at distance `x` on lane `y`. Return false if
    /// the spot is already taken.
    pub fn place(&mut self, x: i64, y: i64, kind: ObstacleKind, width: i64, height: i64) -> bool {
        let obstacle = Obstacle::with_size(kind, width, height);
        self.insert(Entry::new(x, y, obstacle))
    }

    /// Obstacles ahead of `position`, within the viewport.
    pub fn visible(&self, viewport: &Viewport, position: i64) -> Vec<Entry<Obstacle>> {
        let (pmin, pmax, smin, smax) = viewport.window(position);
        self.range_query(pmin, pmax, smin, smax)
    }

    /// Delete obstacles left behind `position`, return the number
    /// deleted.
    pub fn evict_passed(&mut self, viewport: &Viewport, position: i64) -> usize {
        let (pmin, pmax, smin, smax) = viewport.passed(position);
        let passed: Vec<Key> = self
            .range_query(pmin, pmax, smin, smax)
            .iter()
            .map(Entry::key)
            .collect();

        let mut n = 0;
        for key in passed.iter() {
            if self.delete(key) {
                n += 1;
            }
        }
        if n > 0 {
            debug!("{}: evicted {} obstacles, {} left", self.id(), n, self.len());
        }
        n
    }
}
