//! Face and vertex normals, face areas.
//!
//! Face normals come from the face plane; vertex normals average the
//! surrounding face planes under one of four [`NormalWeighting`] strategies.
//! The `compute_*` passes cache their results on the entities
//! ([`Vertex::normal`](super::Vertex), [`Face::normal`](super::Face)); the
//! per-entity functions are pure queries.

use nalgebra::Vector3;
use rayon::prelude::*;

use super::halfedge::HalfEdgeMesh;
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};

/// How the surrounding faces are weighted when averaging a vertex normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalWeighting {
    /// Every incident face counts the same.
    Uniform,

    /// Faces weighted by their area. Cheap and stable on meshes with
    /// well-shaped elements, but a sliver with a large neighbor is drowned
    /// out.
    #[default]
    Area,

    /// Faces weighted by the interior angle at the vertex. Insensitive to
    /// how a neighborhood happens to be triangulated.
    Angle,

    /// Sector normals weighted by the inverse product of the squared edge
    /// lengths, approximating the normal of the largest inscribed sphere
    /// tangent at the vertex. Robust against slivers.
    InscribedSphere,
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Compute the unit normal of a face from its plane.
    ///
    /// Uses the first three vertices of the loop. Returns the zero vector
    /// for a degenerate (collinear) face.
    pub fn face_normal(&self, f: FaceId<I>) -> Vector3<f64> {
        let mut loop_vs = self.face_vertices(f);
        let (Some(v0), Some(v1), Some(v2)) = (loop_vs.next(), loop_vs.next(), loop_vs.next())
        else {
            return Vector3::zeros();
        };
        let p0 = self.position(v0);
        let n = (self.position(v1) - p0).cross(&(self.position(v2) - p0));
        let len = n.norm();
        if len > f64::EPSILON {
            n / len
        } else {
            Vector3::zeros()
        }
    }

    /// Compute the area vector of a face (normal direction, face area
    /// magnitude).
    ///
    /// Sums the cross products of a triangle fan from the first loop vertex,
    /// which is exact for planar convex faces.
    pub fn face_area_vector(&self, f: FaceId<I>) -> Vector3<f64> {
        let verts: Vec<VertexId<I>> = self.face_vertices(f).collect();
        if verts.len() < 3 {
            return Vector3::zeros();
        }
        let p0 = self.position(verts[0]);
        let mut sum = Vector3::zeros();
        for w in verts[1..].windows(2) {
            sum += (self.position(w[0]) - p0).cross(&(self.position(w[1]) - p0));
        }
        sum * 0.5
    }

    /// Compute the area of a face.
    pub fn face_area(&self, f: FaceId<I>) -> f64 {
        self.face_area_vector(f).norm()
    }

    /// Compute the unit normal at a vertex by averaging the surrounding
    /// faces under the given weighting.
    ///
    /// Boundary vertices average only their real faces. Returns the zero
    /// vector if no incident face contributes (isolated or dangling
    /// vertices, or a fully degenerate neighborhood).
    pub fn vertex_normal(&self, v: VertexId<I>, weighting: NormalWeighting) -> Vector3<f64> {
        let mut sum = Vector3::zeros();
        for he in self.vertex_halfedges(v) {
            let f = self.face_of(he);
            if !f.is_valid() {
                continue;
            }
            sum += match weighting {
                NormalWeighting::Uniform => self.face_normal(f),
                NormalWeighting::Area => self.face_area_vector(f),
                NormalWeighting::Angle => {
                    let (d1, d2) = self.sector_vectors(he);
                    let cross = d1.cross(&d2);
                    let len = cross.norm();
                    if len > f64::EPSILON {
                        cross * (d1.angle(&d2) / len)
                    } else {
                        Vector3::zeros()
                    }
                }
                NormalWeighting::InscribedSphere => {
                    let (d1, d2) = self.sector_vectors(he);
                    let denom = d1.norm_squared() * d2.norm_squared();
                    if denom > f64::EPSILON {
                        d1.cross(&d2) / denom
                    } else {
                        Vector3::zeros()
                    }
                }
            };
        }
        let len = sum.norm();
        if len > f64::EPSILON {
            sum / len
        } else {
            Vector3::zeros()
        }
    }

    /// The two face edges spanning the sector at the source vertex of an
    /// outgoing half-edge, both pointing away from the vertex.
    fn sector_vectors(&self, he: HalfEdgeId<I>) -> (Vector3<f64>, Vector3<f64>) {
        (self.edge_vector(he), -self.edge_vector(self.prev(he)))
    }

    // ==================== Caching passes ====================

    /// Compute and cache normals for all vertices in parallel.
    pub fn compute_vertex_normals(&mut self, weighting: NormalWeighting) {
        let ids: Vec<VertexId<I>> = self.vertex_ids().collect();
        let snapshot: &Self = self;
        let normals: Vec<Vector3<f64>> = ids
            .par_iter()
            .map(|&v| snapshot.vertex_normal(v, weighting))
            .collect();
        for (v, n) in ids.into_iter().zip(normals) {
            self.vertex_mut(v).normal = Some(n);
        }
    }

    /// Sequential version of [`compute_vertex_normals`](Self::compute_vertex_normals).
    pub fn compute_vertex_normals_sequential(&mut self, weighting: NormalWeighting) {
        let ids: Vec<VertexId<I>> = self.vertex_ids().collect();
        for v in ids {
            let n = self.vertex_normal(v, weighting);
            self.vertex_mut(v).normal = Some(n);
        }
    }

    /// Compute and cache normals for all faces.
    pub fn compute_face_normals(&mut self) {
        let ids: Vec<FaceId<I>> = self.face_ids().collect();
        for f in ids {
            let n = self.face_normal(f);
            self.face_mut(f).normal = Some(n);
        }
    }
}
