use super::constants::LINK_DISTANCE;
use glam::Vec3;

/// Unordered point pair with `a < b`. Edges carry no identity across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { a: i, b: j }
        } else {
            Self { a: j, b: i }
        }
    }
}

/// Upper bound on the number of pairs among `n` points.
#[inline]
pub fn max_pairs(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Points closer than [`LINK_DISTANCE`], rebuilt from scratch every frame.
///
/// The pair scan is O(N²); at 150–190 points that is 11k–18k distance checks
/// per frame. Growing the point count much further needs a spatial index.
#[derive(Clone, Debug, Default)]
pub struct ProximityGraph {
    edges: Vec<Edge>,
    segments: Vec<Vec3>,
}

impl ProximityGraph {
    pub fn with_capacity(points: usize) -> Self {
        // Typical fields connect a small fraction of all pairs.
        let guess = (max_pairs(points) / 16).max(64);
        Self {
            edges: Vec::with_capacity(guess),
            segments: Vec::with_capacity(guess * 2),
        }
    }

    pub fn rebuild(&mut self, positions: &[Vec3]) {
        self.edges.clear();
        self.segments.clear();
        let threshold_sq = LINK_DISTANCE * LINK_DISTANCE;
        for (i, &pi) in positions.iter().enumerate() {
            for (j, &pj) in positions.iter().enumerate().skip(i + 1) {
                if pi.distance_squared(pj) < threshold_sq {
                    self.edges.push(Edge { a: i, b: j });
                    self.segments.push(pi);
                    self.segments.push(pj);
                }
            }
        }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Two vertices per edge, in edge order.
    pub fn segment_vertices(&self) -> &[Vec3] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        let e = Edge::new(i, j);
        self.edges.binary_search_by(|x| (x.a, x.b).cmp(&(e.a, e.b))).is_ok()
    }
}
