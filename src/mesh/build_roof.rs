use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::FixedFaceHandle;
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{MeshError, Result};
use crate::footprint::Footprint;
use crate::math::{Point3, Vector3};

use super::TriangleMesh;

/// Triangulates a footprint interior into the horizontal roof cap at the
/// resolved height.
pub struct BuildRoof<'a> {
    footprint: &'a Footprint,
    height: f64,
}

impl<'a> BuildRoof<'a> {
    /// Creates a new `BuildRoof` operation.
    #[must_use]
    pub fn new(footprint: &'a Footprint, height: f64) -> Self {
        Self { footprint, height }
    }

    /// Executes the triangulation, returning the roof mesh.
    ///
    /// The ring is inserted as constraint edges into a CDT and interior
    /// triangles are selected by flood fill. Every vertex sits at the
    /// resolved height; triangles wind counter-clockwise seen from above,
    /// so all normals are +z.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Triangulation`] if the ring cannot be inserted
    /// into the constrained triangulation.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<TriangleMesh> {
        let ring: Vec<SpadePoint2<f64>> = self
            .footprint
            .ring()
            .iter()
            .map(|p| SpadePoint2::new(p.x, p.y))
            .collect();

        let mut cdt = ConstrainedDelaunayTriangulation::<SpadePoint2<f64>>::new();
        insert_constraint_loop(&mut cdt, &ring)?;

        let interior_faces = classify_interior_faces(&cdt);

        let mut mesh = TriangleMesh::default();
        let mut vertex_map: HashMap<usize, u32> = HashMap::new();

        for face_handle in cdt.inner_faces() {
            if !interior_faces.contains(&face_handle.fix().index()) {
                continue;
            }

            let mut tri_indices = [0u32; 3];
            for (i, vh) in face_handle.vertices().iter().enumerate() {
                let idx = vh.fix().index();
                let mesh_idx = if let Some(&existing) = vertex_map.get(&idx) {
                    existing
                } else {
                    let pos = vh.position();
                    let new_idx = mesh.vertices.len() as u32;
                    mesh.vertices.push(Point3::new(pos.x, pos.y, self.height));
                    mesh.normals.push(Vector3::z());
                    vertex_map.insert(idx, new_idx);
                    new_idx
                };
                tri_indices[i] = mesh_idx;
            }

            mesh.indices.push(tri_indices);
        }

        Ok(mesh)
    }
}

/// Inserts a closed ring as constraint edges into the CDT.
fn insert_constraint_loop(
    cdt: &mut ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
    points: &[SpadePoint2<f64>],
) -> Result<()> {
    if points.len() < 3 {
        return Err(
            MeshError::Triangulation("constraint loop needs at least 3 points".into()).into(),
        );
    }

    let mut handles = Vec::with_capacity(points.len());
    for &pt in points {
        let h = cdt
            .insert(pt)
            .map_err(|e: InsertionError| MeshError::Triangulation(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }

    Ok(())
}

/// Classifies which inner faces of the CDT are inside the ring using
/// flood fill.
///
/// Starts from faces adjacent to the outer (infinite) face at depth 0. Each
/// time a constraint edge is crossed, depth increments. Odd depth = interior.
fn classify_interior_faces(
    cdt: &ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<spade::handles::InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    // Seed: inner faces adjacent to the outer face via directed edges
    for edge in cdt.directed_edges() {
        if edge.face().fix() == outer_fix {
            let rev_face = edge.rev().face();
            if let Some(inner) = rev_face.as_inner() {
                let idx = inner.fix().index();
                if depth_map.contains_key(&idx) {
                    continue;
                }
                let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
                depth_map.insert(idx, depth);
                if depth % 2 == 1 {
                    interior.insert(idx);
                }
                queue.push_back((inner.fix(), depth));
            }
        }
    }

    // BFS flood fill
    while let Some((face_fix, depth)) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            let neighbor = edge.rev().face();
            if let Some(inner_neighbor) = neighbor.as_inner() {
                let n_idx = inner_neighbor.fix().index();
                if depth_map.contains_key(&n_idx) {
                    continue;
                }
                let new_depth = if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                    depth + 1
                } else {
                    depth
                };
                depth_map.insert(n_idx, new_depth);
                if new_depth % 2 == 1 {
                    interior.insert(n_idx);
                }
                queue.push_back((inner_neighbor.fix(), new_depth));
            }
        }
    }

    interior
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point2, TOLERANCE};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn footprint(points: Vec<Point2>) -> Footprint {
        Footprint::new(points).unwrap()
    }

    #[test]
    fn triangle_produces_1_triangle() {
        let fp = footprint(vec![p(0.0, 0.0), p(4.0, 0.0), p(2.0, 3.0)]);
        let mesh = BuildRoof::new(&fp, 2.5).execute().unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.normals.len(), 3);
    }

    #[test]
    fn square_produces_2_triangles() {
        let fp = footprint(vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)]);
        let mesh = BuildRoof::new(&fp, 1.0).execute().unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertices.len(), 4);
    }

    #[test]
    fn l_shape_concave_triangulates() {
        let fp = footprint(vec![
            p(0.0, 0.0),
            p(4.0, 0.0),
            p(4.0, 2.0),
            p(2.0, 2.0),
            p(2.0, 4.0),
            p(0.0, 4.0),
        ]);
        let mesh = BuildRoof::new(&fp, 1.0).execute().unwrap();
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.vertices.len(), 6);
    }

    #[test]
    fn concave_roof_stays_inside_footprint() {
        // No triangle centroid may land in the notch of the L.
        let fp = footprint(vec![
            p(0.0, 0.0),
            p(4.0, 0.0),
            p(4.0, 2.0),
            p(2.0, 2.0),
            p(2.0, 4.0),
            p(0.0, 4.0),
        ]);
        let mesh = BuildRoof::new(&fp, 1.0).execute().unwrap();
        for [a, b, c] in mesh.triangles() {
            let cx = (a.x + b.x + c.x) / 3.0;
            let cy = (a.y + b.y + c.y) / 3.0;
            let in_notch = cx > 2.0 && cy > 2.0;
            assert!(!in_notch, "triangle centroid ({cx}, {cy}) is in the notch");
        }
    }

    #[test]
    fn roof_area_matches_footprint_area() {
        let fp = footprint(vec![
            p(0.0, 0.0),
            p(4.0, 0.0),
            p(4.0, 2.0),
            p(2.0, 2.0),
            p(2.0, 4.0),
            p(0.0, 4.0),
        ]);
        let mesh = BuildRoof::new(&fp, 7.0).execute().unwrap();
        assert!((mesh.surface_area() - fp.area()).abs() < 1e-9);
    }

    #[test]
    fn every_roof_vertex_sits_at_height() {
        let fp = footprint(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]);
        let mesh = BuildRoof::new(&fp, 11.6).execute().unwrap();
        for v in &mesh.vertices {
            assert!((v.z - 11.6).abs() < TOLERANCE);
        }
    }

    #[test]
    fn roof_winds_upward() {
        let fp = footprint(vec![p(0.0, 0.0), p(3.0, 0.0), p(3.0, 2.0), p(0.0, 2.0)]);
        let mesh = BuildRoof::new(&fp, 5.0).execute().unwrap();
        for [a, b, c] in mesh.triangles() {
            let n = (b - a).cross(&(c - a));
            assert!(n.z > 0.0, "roof triangle winds downward: {n:?}");
        }
    }
}
