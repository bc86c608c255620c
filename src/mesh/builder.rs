//! Conversion between indexed face-vertex soup and the half-edge structure.

use nalgebra::Point3;

use super::halfedge::HalfEdgeMesh;
use super::index::{MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a mesh from positions and triangle indices.
///
/// Triangles are stitched in input order; counter-clockwise winding gives
/// outward normals. Fails on out-of-range indices, degenerate triangles, or
/// connectivity that is not manifold.
pub fn build_from_triangles<I: MeshIndex>(
    positions: &[Point3<f64>],
    triangles: &[[usize; 3]],
) -> Result<HalfEdgeMesh<I>> {
    let mut mesh = HalfEdgeMesh::with_capacity(positions.len(), triangles.len());
    let ids: Vec<VertexId<I>> = positions.iter().map(|&p| mesh.add_vertex(p)).collect();

    for (face, tri) in triangles.iter().enumerate() {
        validate_face(face, tri, positions.len())?;
        mesh.add_face(&[ids[tri[0]], ids[tri[1]], ids[tri[2]]])?;
    }
    Ok(mesh)
}

/// Build a mesh from positions and arbitrary-degree polygon indices.
///
/// Same rules as [`build_from_triangles`]; every polygon needs at least
/// three distinct in-range indices.
pub fn build_from_polygons<I: MeshIndex>(
    positions: &[Point3<f64>],
    polygons: &[Vec<usize>],
) -> Result<HalfEdgeMesh<I>> {
    let mut mesh = HalfEdgeMesh::with_capacity(positions.len(), polygons.len());
    let ids: Vec<VertexId<I>> = positions.iter().map(|&p| mesh.add_vertex(p)).collect();

    for (face, poly) in polygons.iter().enumerate() {
        validate_face(face, poly, positions.len())?;
        let loop_ids: Vec<VertexId<I>> = poly.iter().map(|&i| ids[i]).collect();
        mesh.add_face(&loop_ids)?;
    }
    Ok(mesh)
}

fn validate_face(face: usize, indices: &[usize], num_positions: usize) -> Result<()> {
    if indices.len() < 3 {
        return Err(MeshError::DegenerateFace { face });
    }
    for (i, &v) in indices.iter().enumerate() {
        if v >= num_positions {
            return Err(MeshError::InvalidVertexIndex { face, vertex: v });
        }
        if indices[..i].contains(&v) {
            return Err(MeshError::DegenerateFace { face });
        }
    }
    Ok(())
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Export the mesh as an indexed face-vertex list.
    ///
    /// Vertices come out in storage iteration order with dense indices;
    /// faces list their vertices in loop order. The inverse of
    /// [`build_from_polygons`] up to index renumbering.
    pub fn to_face_vertex(&self) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
        let mut dense = vec![usize::MAX; self.vertices.slot_count()];
        let mut positions = Vec::with_capacity(self.num_vertices());
        for (i, (id, v)) in self.vertices().enumerate() {
            dense[id.index()] = i;
            positions.push(v.position);
        }

        let faces = self
            .face_ids()
            .map(|f| {
                self.face_vertices(f)
                    .map(|v| dense[v.index()])
                    .collect::<Vec<usize>>()
            })
            .collect();
        (positions, faces)
    }
}
