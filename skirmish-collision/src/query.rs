use cgmath::{EuclideanSpace, Point3};

/// Entry and exit candidates of a continuous volume query.
///
/// Points and parameters are expressed in the local space of the tested
/// volume; mapping them back to world space is the caller's concern. Which
/// slot holds the entry and which the exit depends on the solver branch
/// that produced them, so callers interested in the impact should use
/// [`nearest_hit`](Self::nearest_hit).
#[derive(Debug, Clone, Copy)]
pub struct Intersection {
    /// Whether the first candidate lies on the tested segment.
    pub hit0: bool,
    /// Whether the second candidate lies on the tested segment.
    pub hit1: bool,
    /// Ray parameter of the first candidate.
    pub t0: f32,
    /// Ray parameter of the second candidate.
    pub t1: f32,
    /// Local-space position of the first candidate.
    pub point0: Point3<f32>,
    /// Local-space position of the second candidate.
    pub point1: Point3<f32>,
}

impl Intersection {
    /// Creates a record with both candidates invalid.
    pub fn miss() -> Self {
        Intersection {
            hit0: false,
            hit1: false,
            t0: 0.0,
            t1: 0.0,
            point0: Point3::origin(),
            point1: Point3::origin(),
        }
    }

    /// Creates the record reported when the segment origin already lies
    /// inside the volume: both candidates valid at parameter zero.
    pub fn origin_inside() -> Self {
        Intersection {
            hit0: true,
            hit1: true,
            t0: 0.0,
            t1: 0.0,
            point0: Point3::origin(),
            point1: Point3::origin(),
        }
    }

    /// True if either candidate is valid.
    pub fn any_hit(&self) -> bool {
        self.hit0 || self.hit1
    }

    /// Nearest valid candidate as a parameter and local-space point pair.
    pub fn nearest_hit(&self) -> Option<(f32, Point3<f32>)> {
        match (self.hit0, self.hit1) {
            (true, true) if self.t1 < self.t0 => Some((self.t1, self.point1)),
            (true, _) => Some((self.t0, self.point0)),
            (false, true) => Some((self.t1, self.point1)),
            (false, false) => None,
        }
    }
}

impl Default for Intersection {
    fn default() -> Self {
        Self::miss()
    }
}

/// Diagnostic counters for collision queries.
///
/// Incremented once per dispatched query. The counters carry no
/// correctness semantics; batches running on worker threads keep one
/// record per worker and merge them afterwards instead of sharing one.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryStats {
    /// Number of discrete (point in volume) tests dispatched.
    pub discrete_tests: u64,
    /// Number of continuous (segment) tests dispatched.
    pub continuous_tests: u64,
}

impl QueryStats {
    /// Creates a zeroed record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds another record into this one.
    pub fn merge(&mut self, other: &QueryStats) {
        self.discrete_tests += other.discrete_tests;
        self.continuous_tests += other.continuous_tests;
    }
}
