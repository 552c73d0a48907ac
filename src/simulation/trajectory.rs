//! Bounded trajectory history with derived aggregates
//!
//! Retains at most `limit` points with FIFO eviction (ring-buffer
//! semantics). Two kinds of aggregates with different lifetimes:
//! - `total_distance` / `total_time` are cumulative session metrics since
//!   the last reset, unaffected by eviction,
//! - the min/max statistics are windowed display metrics describing only
//!   the points currently retained, recomputed whenever a point is evicted.

use std::collections::VecDeque;

use crate::simulation::states::{KinematicState, NVec3};

/// One retained kinematic snapshot
pub type TrajectoryPoint = KinematicState;

/// Componentwise position bounds and speed range over retained points.
/// Zeroed while the trajectory is empty.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrajectoryStats {
    pub min_position: NVec3,
    pub max_position: NVec3,
    pub min_speed: f64,
    pub max_speed: f64,
}

impl TrajectoryStats {
    /// Recompute from scratch over the retained set
    fn compute(points: &VecDeque<TrajectoryPoint>) -> Self {
        let mut iter = points.iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        let mut stats = Self {
            min_position: first.position,
            max_position: first.position,
            min_speed: first.speed(),
            max_speed: first.speed(),
        };
        for p in iter {
            stats.absorb(p);
        }
        stats
    }

    /// Widen the bounds to cover one more point
    fn absorb(&mut self, p: &TrajectoryPoint) {
        self.min_position = self.min_position.inf(&p.position);
        self.max_position = self.max_position.sup(&p.position);
        let s = p.speed();
        self.min_speed = self.min_speed.min(s);
        self.max_speed = self.max_speed.max(s);
    }
}

/// Aggregate snapshot of the trajectory, cheap to copy into the composed
/// engine state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrajectorySummary {
    pub point_count: usize,
    pub total_time: f64, // elapsed simulated time (s) since reset
    pub total_distance: f64, // cumulative path length since reset
    pub average_speed: f64, // total_distance / total_time, 0 when no time elapsed
    pub stats: TrajectoryStats,
}

/// Time-ascending history of kinematic states, bounded to `limit` points
#[derive(Debug, Clone)]
pub struct Trajectory {
    points: VecDeque<TrajectoryPoint>,
    limit: usize, // retention bound, >= 1
    total_time: f64,
    total_distance: f64,
    stats: TrajectoryStats,
}

impl Trajectory {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            points: VecDeque::with_capacity(limit),
            limit,
            total_time: 0.0,
            total_distance: 0.0,
            stats: TrajectoryStats::default(),
        }
    }

    /// Append a snapshot, applying the retention limit
    ///
    /// Distance and elapsed time only accumulate when time strictly
    /// increased versus the previous record; a stale or repeated timestamp
    /// still retains the point for positional display.
    pub fn record(&mut self, state: KinematicState) {
        if let Some(prev) = self.points.back() {
            if state.t > prev.t {
                self.total_distance += (state.position - prev.position).norm();
                self.total_time += state.t - prev.t;
            }
        }

        self.points.push_back(state);

        let mut evicted = false;
        while self.points.len() > self.limit {
            self.points.pop_front();
            evicted = true;
        }

        if evicted || self.points.len() == 1 {
            self.stats = TrajectoryStats::compute(&self.points);
        } else {
            self.stats.absorb(&state);
        }
    }

    /// Apply a new retention bound, evicting oldest points as needed
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        if self.points.len() > self.limit {
            while self.points.len() > self.limit {
                self.points.pop_front();
            }
            self.stats = TrajectoryStats::compute(&self.points);
        }
    }

    /// Clear all retained points and zero every aggregate
    pub fn reset(&mut self) {
        self.points.clear();
        self.total_time = 0.0;
        self.total_distance = 0.0;
        self.stats = TrajectoryStats::default();
    }

    pub fn points(&self) -> &VecDeque<TrajectoryPoint> {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn average_speed(&self) -> f64 {
        if self.total_time > 0.0 {
            self.total_distance / self.total_time
        } else {
            0.0
        }
    }

    pub fn stats(&self) -> TrajectoryStats {
        self.stats
    }

    pub fn summary(&self) -> TrajectorySummary {
        TrajectorySummary {
            point_count: self.points.len(),
            total_time: self.total_time,
            total_distance: self.total_distance,
            average_speed: self.average_speed(),
            stats: self.stats,
        }
    }
}
