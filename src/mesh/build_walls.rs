use crate::error::{MeshError, Result};
use crate::footprint::Footprint;
use crate::math::{polygon_2d, Point3, Vector3};

use super::TriangleMesh;

/// Builds the vertical wall faces of an extruded footprint.
pub struct BuildWalls<'a> {
    footprint: &'a Footprint,
    top: f64,
    base: f64,
}

impl<'a> BuildWalls<'a> {
    /// Creates a new `BuildWalls` operation from base elevation up to the
    /// resolved height.
    #[must_use]
    pub fn new(footprint: &'a Footprint, top: f64, base: f64) -> Self {
        Self {
            footprint,
            top,
            base,
        }
    }

    /// Executes the wall construction.
    ///
    /// One vertical quad per ring edge, the closing edge included, split
    /// along the `a_base–b_top` diagonal into two triangles. Quads wind
    /// outward for the counter-clockwise ring.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::DegenerateEdge`] for a zero-length ring edge,
    /// which a validated footprint rules out.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<TriangleMesh> {
        let n = self.footprint.vertex_count();

        let mut mesh = TriangleMesh::default();
        mesh.vertices.reserve(n * 4);
        mesh.normals.reserve(n * 4);
        mesh.indices.reserve(n * 2);

        for (i, (a, b)) in self.footprint.edges().enumerate() {
            let flat = polygon_2d::outward_edge_normal(a, b)
                .ok_or(MeshError::DegenerateEdge { index: i })?;
            let normal = Vector3::new(flat.x, flat.y, 0.0);

            let first = mesh.vertices.len() as u32;
            mesh.vertices.push(Point3::new(a.x, a.y, self.base));
            mesh.vertices.push(Point3::new(b.x, b.y, self.base));
            mesh.vertices.push(Point3::new(b.x, b.y, self.top));
            mesh.vertices.push(Point3::new(a.x, a.y, self.top));
            for _ in 0..4 {
                mesh.normals.push(normal);
            }

            // Split along the a_base–b_top diagonal
            mesh.indices.push([first, first + 1, first + 2]);
            mesh.indices.push([first, first + 2, first + 3]);
        }

        Ok(mesh)
    }
}
