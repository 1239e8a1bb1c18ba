use super::{Point2, Vector2, TOLERANCE};

/// Computes the signed area of a closed 2D ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(ring: &[Point2]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += ring[i].x * ring[j].y - ring[j].x * ring[i].y;
    }
    sum * 0.5
}

/// Collapses consecutive duplicate vertices and drops an explicit closing
/// vertex, returning the open ring.
#[must_use]
pub fn dedup_ring(points: &[Point2]) -> Vec<Point2> {
    let mut ring: Vec<Point2> = Vec::with_capacity(points.len());
    for &pt in points {
        if ring.last().is_some_and(|prev| (pt - prev).norm() < TOLERANCE) {
            continue;
        }
        ring.push(pt);
    }
    while ring.len() > 1 && (ring[ring.len() - 1] - ring[0]).norm() < TOLERANCE {
        ring.pop();
    }
    ring
}

/// Returns the outward unit normal of the directed edge `a → b` of a
/// counter-clockwise ring, or `None` for a zero-length edge.
#[must_use]
pub fn outward_edge_normal(a: &Point2, b: &Point2) -> Option<Vector2> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return None;
    }
    Some(Vector2::new(d.y / len, -d.x / len))
}
