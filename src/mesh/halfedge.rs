//! Half-edge mesh data structure.
//!
//! This module provides a half-edge (doubly-connected edge list)
//! representation for manifold polygon meshes. The structure enables O(1)
//! adjacency queries and supports incremental construction and local
//! topological mutation.
//!
//! # Structure
//!
//! - Each undirected **edge** is split into two **half-edges** pointing in
//!   opposite directions; they are co-created and reach each other via `twin`
//! - Each half-edge knows its **target vertex** (the source is the twin's
//!   target), its **next**/**prev** half-edges around the face loop, its
//!   incident **face**, and its owning **edge**
//! - Each vertex stores one representative outgoing half-edge
//! - Each face stores one half-edge on its boundary loop
//!
//! # Boundary Handling
//!
//! Boundary half-edges have an invalid face id. An edge is a boundary edge if
//! either of its half-edges is boundary. Boundary loops are traversed using
//! `next` on boundary half-edges. For boundary vertices, the representative
//! half-edge is kept pointing at a boundary half-edge.

use nalgebra::{Point3, Vector2, Vector3};

use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
use super::store::Arena;

/// Cached discrete curvature scalars at a vertex.
///
/// Filled by [`compute_curvatures`](crate::algo::curvature::compute_curvatures);
/// never invalidated automatically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexCurvature {
    /// Gaussian curvature (angle defect over local area).
    pub gaussian: f64,
    /// Mean curvature (cotangent Laplacian magnitude, signed).
    pub mean: f64,
}

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// Cached unit normal, filled by the normal computation passes.
    ///
    /// Memoization only: mutating topology or positions does not clear it.
    pub normal: Option<Vector3<f64>>,

    /// Cached curvature scalars, filled by the curvature pass.
    pub curvature: Option<VertexCurvature>,

    /// Selection flag for caller-driven marking. Never read by the kernel.
    pub selected: bool,

    /// Dense storage index, correct only immediately after
    /// [`HalfEdgeMesh::refresh_indices`].
    pub index: usize,

    /// One outgoing half-edge from this vertex. Invalid for isolated vertices.
    /// For boundary vertices, this is kept pointing at a boundary half-edge.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create a new unconnected vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: None,
            curvature: None,
            selected: false,
            index: 0,
            halfedge: HalfEdgeId::invalid(),
        }
    }

    /// Create a new vertex from coordinates.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Check if this vertex has no incident edges.
    #[inline]
    pub fn is_isolated(&self) -> bool {
        !self.halfedge.is_valid()
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge points to. The source vertex is
    /// `twin.target`.
    pub target: VertexId<I>,

    /// The opposite half-edge. Co-created with this one, never invalid in a
    /// complete mesh.
    pub twin: HalfEdgeId<I>,

    /// The next half-edge around the face loop (counter-clockwise), or around
    /// the boundary loop for boundary half-edges. Invalid until placed in a
    /// loop.
    pub next: HalfEdgeId<I>,

    /// The previous half-edge in the loop. Redundant with `next` but speeds
    /// up splicing.
    pub prev: HalfEdgeId<I>,

    /// The face this half-edge belongs to. Invalid for boundary half-edges.
    pub face: FaceId<I>,

    /// The undirected edge shared with the twin.
    pub edge: EdgeId<I>,

    /// Per-corner texture coordinate. Attribute storage for importers; never
    /// touched by topology operations.
    pub uv: Option<Vector2<f64>>,

    /// Dense storage index, correct only immediately after
    /// [`HalfEdgeMesh::refresh_indices`].
    pub index: usize,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create a new unlinked half-edge.
    pub fn new() -> Self {
        Self {
            target: VertexId::invalid(),
            twin: HalfEdgeId::invalid(),
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
            edge: EdgeId::invalid(),
            uv: None,
            index: 0,
        }
    }

    /// Check if this half-edge is on the boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.face.is_valid()
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// An undirected edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct Edge<I: MeshIndex = u32> {
    /// One of the edge's two half-edges; the other is its twin.
    pub halfedge: HalfEdgeId<I>,

    /// Dense storage index, correct only immediately after
    /// [`HalfEdgeMesh::refresh_indices`].
    pub index: usize,
}

impl<I: MeshIndex> Edge<I> {
    /// Create a new edge holding the given half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge, index: 0 }
    }
}

/// A face in the half-edge mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// One half-edge on the boundary loop of this face. The full loop is the
    /// `next` chain from here.
    pub halfedge: HalfEdgeId<I>,

    /// Cached unit normal, filled by
    /// [`compute_face_normals`](HalfEdgeMesh::compute_face_normals).
    pub normal: Option<Vector3<f64>>,

    /// Dense storage index, correct only immediately after
    /// [`HalfEdgeMesh::refresh_indices`].
    pub index: usize,
}

impl<I: MeshIndex> Face<I> {
    /// Create a new face with the given boundary-loop half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self {
            halfedge,
            normal: None,
            index: 0,
        }
    }
}

/// A half-edge mesh for manifold polygon surfaces.
///
/// The mesh exclusively owns all of its vertices, edges, half-edges, and
/// faces; callers refer to them through typed ids. Construction is
/// incremental: create vertices with [`add_vertex`](HalfEdgeMesh::add_vertex),
/// then stitch faces with [`add_face`](HalfEdgeMesh::add_face). Local removal
/// is supported through [`remove_face`](HalfEdgeMesh::remove_face),
/// [`remove_edge`](HalfEdgeMesh::remove_edge) and
/// [`remove_vertex`](HalfEdgeMesh::remove_vertex).
///
/// Removal tombstones storage slots; run
/// [`refresh_indices`](HalfEdgeMesh::refresh_indices) before relying on dense
/// indices. All operations assume exclusive access for their duration;
/// interleave mutation and traversal in distinct phases.
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    /// All vertices in the mesh.
    pub(crate) vertices: Arena<Vertex<I>>,

    /// All half-edges in the mesh.
    pub(crate) halfedges: Arena<HalfEdge<I>>,

    /// All undirected edges in the mesh.
    pub(crate) edges: Arena<Edge<I>>,

    /// All faces in the mesh.
    pub(crate) faces: Arena<Face<I>>,
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Arena::new(),
            halfedges: Arena::new(),
            edges: Arena::new(),
            faces: Arena::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        // For a closed triangle mesh E = 3F/2; with boundary slightly more.
        let num_edges = num_faces * 3 / 2 + num_faces / 4;

        Self {
            vertices: Arena::with_capacity(num_vertices),
            halfedges: Arena::with_capacity(num_edges * 2),
            edges: Arena::with_capacity(num_edges),
            faces: Arena::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of live vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of live half-edges.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of live edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of live faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Check whether the mesh has no entities at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
            && self.halfedges.is_empty()
            && self.edges.is_empty()
            && self.faces.is_empty()
    }

    /// Get a vertex by id.
    ///
    /// # Panics
    /// Panics if the id refers to a removed vertex.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        self.vertices.get(id.index()).expect("stale vertex id")
    }

    /// Get a mutable vertex by id.
    ///
    /// # Panics
    /// Panics if the id refers to a removed vertex.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        self.vertices.get_mut(id.index()).expect("stale vertex id")
    }

    /// Get a half-edge by id.
    ///
    /// # Panics
    /// Panics if the id refers to a removed half-edge.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        self.halfedges.get(id.index()).expect("stale half-edge id")
    }

    /// Get a mutable half-edge by id.
    ///
    /// # Panics
    /// Panics if the id refers to a removed half-edge.
    #[inline]
    pub fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        self.halfedges
            .get_mut(id.index())
            .expect("stale half-edge id")
    }

    /// Get an edge by id.
    ///
    /// # Panics
    /// Panics if the id refers to a removed edge.
    #[inline]
    pub fn edge(&self, id: EdgeId<I>) -> &Edge<I> {
        self.edges.get(id.index()).expect("stale edge id")
    }

    /// Get a face by id.
    ///
    /// # Panics
    /// Panics if the id refers to a removed face.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        self.faces.get(id.index()).expect("stale face id")
    }

    /// Get a mutable face by id.
    ///
    /// # Panics
    /// Panics if the id refers to a removed face.
    #[inline]
    pub fn face_mut(&mut self, id: FaceId<I>) -> &mut Face<I> {
        self.faces.get_mut(id.index()).expect("stale face id")
    }

    /// Check whether a vertex id is live.
    #[inline]
    pub fn contains_vertex(&self, id: VertexId<I>) -> bool {
        id.is_valid() && self.vertices.contains(id.index())
    }

    /// Check whether an edge id is live.
    #[inline]
    pub fn contains_edge(&self, id: EdgeId<I>) -> bool {
        id.is_valid() && self.edges.contains(id.index())
    }

    /// Check whether a face id is live.
    #[inline]
    pub fn contains_face(&self, id: FaceId<I>) -> bool {
        id.is_valid() && self.faces.contains(id.index())
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point3<f64>) {
        self.vertex_mut(v).position = pos;
    }

    // ==================== Topology Queries ====================

    /// Get the twin (opposite) half-edge.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).twin
    }

    /// Get the next half-edge around the loop.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the previous half-edge around the loop.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// Get the target vertex of a half-edge.
    #[inline]
    pub fn target(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).target
    }

    /// Get the source vertex of a half-edge (the twin's target).
    #[inline]
    pub fn source(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.target(self.twin(he))
    }

    /// Get the face of a half-edge. Invalid for boundary half-edges.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Get the undirected edge of a half-edge.
    #[inline]
    pub fn edge_of(&self, he: HalfEdgeId<I>) -> EdgeId<I> {
        self.halfedge(he).edge
    }

    /// Check if a half-edge is on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Check if an edge is on the boundary (either half-edge is boundary).
    #[inline]
    pub fn is_boundary_edge(&self, e: EdgeId<I>) -> bool {
        let he = self.edge(e).halfedge;
        self.is_boundary_halfedge(he) || self.is_boundary_halfedge(self.twin(he))
    }

    /// Check if a vertex is on the boundary. Isolated vertices count as
    /// boundary.
    pub fn is_boundary_vertex(&self, v: VertexId<I>) -> bool {
        if self.vertex(v).is_isolated() {
            return true;
        }
        self.vertex_halfedges(v)
            .any(|he| self.is_boundary_halfedge(he))
    }

    /// Find the half-edge from `a` to `b`, if the edge exists.
    pub fn find_halfedge(&self, a: VertexId<I>, b: VertexId<I>) -> Option<HalfEdgeId<I>> {
        self.vertex_halfedges(a).find(|&he| self.target(he) == b)
    }

    // ==================== Iteration ====================

    /// Iterate over all live vertex ids.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertices.iter().map(|(i, _)| VertexId::new(i))
    }

    /// Iterate over all live vertices with their ids.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId<I>, &Vertex<I>)> + '_ {
        self.vertices.iter().map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over all live half-edge ids.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        self.halfedges.iter().map(|(i, _)| HalfEdgeId::new(i))
    }

    /// Iterate over all live half-edges with their ids.
    pub fn halfedges(&self) -> impl Iterator<Item = (HalfEdgeId<I>, &HalfEdge<I>)> + '_ {
        self.halfedges.iter().map(|(i, h)| (HalfEdgeId::new(i), h))
    }

    /// Iterate over all live edge ids.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.edges.iter().map(|(i, _)| EdgeId::new(i))
    }

    /// Iterate over all live face ids.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.faces.iter().map(|(i, _)| FaceId::new(i))
    }

    /// Iterate over all live faces with their ids.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId<I>, &Face<I>)> + '_ {
        self.faces.iter().map(|(i, f)| (FaceId::new(i), f))
    }

    /// Iterate over the ids of vertices whose selection flag is set.
    pub fn selected_vertices(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertices
            .iter()
            .filter_map(|(i, v)| v.selected.then(|| VertexId::new(i)))
    }

    /// Iterate over the outgoing half-edges around a vertex (the one-ring).
    ///
    /// The rotation is `next(twin(he))` starting at the representative
    /// half-edge, stopping on return to it. Empty for isolated vertices.
    pub fn vertex_halfedges(&self, v: VertexId<I>) -> VertexHalfEdgeIter<'_, I> {
        VertexHalfEdgeIter::new(self, v)
    }

    /// Iterate over the vertices adjacent to a vertex.
    pub fn vertex_neighbors(&self, v: VertexId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertex_halfedges(v).map(|he| self.target(he))
    }

    /// Iterate over the edges incident to a vertex.
    pub fn vertex_edges(&self, v: VertexId<I>) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.vertex_halfedges(v).map(|he| self.edge_of(he))
    }

    /// Iterate over the faces incident to a vertex, skipping the boundary.
    pub fn vertex_faces(&self, v: VertexId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.vertex_halfedges(v).filter_map(|he| {
            let f = self.face_of(he);
            f.is_valid().then_some(f)
        })
    }

    /// Compute the valence (degree) of a vertex.
    pub fn valence(&self, v: VertexId<I>) -> usize {
        self.vertex_halfedges(v).count()
    }

    /// Iterate over the half-edges of a face's boundary loop.
    pub fn face_halfedges(&self, f: FaceId<I>) -> FaceHalfEdgeIter<'_, I> {
        FaceHalfEdgeIter::new(self, f)
    }

    /// Iterate over the vertices of a face in loop order.
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_halfedges(f).map(|he| self.target(he))
    }

    /// Compute the number of vertices of a face.
    pub fn face_degree(&self, f: FaceId<I>) -> usize {
        self.face_halfedges(f).count()
    }

    // ==================== Geometry ====================

    /// Compute the length of a half-edge.
    pub fn edge_length(&self, he: HalfEdgeId<I>) -> f64 {
        let p0 = self.position(self.source(he));
        let p1 = self.position(self.target(he));
        (p1 - p0).norm()
    }

    /// Compute the vector of a half-edge (source to target).
    pub fn edge_vector(&self, he: HalfEdgeId<I>) -> Vector3<f64> {
        let p0 = self.position(self.source(he));
        let p1 = self.position(self.target(he));
        p1 - p0
    }

    /// Compute the midpoint of a half-edge.
    pub fn edge_midpoint(&self, he: HalfEdgeId<I>) -> Point3<f64> {
        let p0 = self.position(self.source(he));
        let p1 = self.position(self.target(he));
        Point3::from((p0.coords + p1.coords) * 0.5)
    }

    /// Compute the centroid of a face.
    pub fn face_centroid(&self, f: FaceId<I>) -> Point3<f64> {
        let mut sum = Vector3::zeros();
        let mut count = 0;
        for v in self.face_vertices(f) {
            sum += self.position(v).coords;
            count += 1;
        }
        Point3::from(sum / count.max(1) as f64)
    }

    /// Compute the bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let mut iter = self.vertices.iter();
        let (_, first) = iter.next()?;

        let mut min = first.position;
        let mut max = first.position;
        for (_, v) in iter {
            for i in 0..3 {
                min[i] = min[i].min(v.position[i]);
                max[i] = max[i].max(v.position[i]);
            }
        }
        Some((min, max))
    }

    /// Compute the total surface area of the mesh.
    pub fn surface_area(&self) -> f64 {
        self.face_ids().map(|f| self.face_area(f)).sum()
    }

    // ==================== Construction ====================

    /// Add a new unconnected vertex and return its id.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId<I> {
        let mut vertex = Vertex::new(position);
        vertex.index = self.vertices.slot_count();
        VertexId::new(self.vertices.push(vertex))
    }

    // ==================== Validation ====================

    /// Check that all connectivity is consistent.
    ///
    /// Verifies twin involution, next/prev symmetry, face-loop closure with
    /// face membership and degree at least 3, half-edge/edge pairing, and
    /// that representative half-edges originate at their vertex.
    pub fn is_valid(&self) -> bool {
        // Vertices: representative must be live and outgoing
        for (vid, v) in self.vertices() {
            if v.halfedge.is_valid() {
                if !self.halfedges.contains(v.halfedge.index()) {
                    return false;
                }
                if self.source(v.halfedge) != vid {
                    return false;
                }
            }
        }

        // Half-edges
        for (heid, he) in self.halfedges() {
            if !he.twin.is_valid() || self.halfedge(he.twin).twin != heid {
                return false;
            }
            if he.next.is_valid() && self.halfedge(he.next).prev != heid {
                return false;
            }
            if he.prev.is_valid() && self.halfedge(he.prev).next != heid {
                return false;
            }
            // Edge shared with the twin
            if !he.edge.is_valid() || self.halfedge(he.twin).edge != he.edge {
                return false;
            }
            if !he.target.is_valid() || !self.vertices.contains(he.target.index()) {
                return false;
            }
        }

        // Edges: exactly two half-edges each
        if self.num_halfedges() != 2 * self.num_edges() {
            return false;
        }
        for (eid, e) in self.edges.iter() {
            if !e.halfedge.is_valid() {
                return false;
            }
            if self.halfedge(e.halfedge).edge != EdgeId::new(eid) {
                return false;
            }
        }

        // Faces: loop closes with consistent membership and degree >= 3
        for f in self.face_ids() {
            let mut degree = 0;
            for he in self.face_halfedges(f) {
                if self.face_of(he) != f {
                    return false;
                }
                degree += 1;
            }
            if degree < 3 {
                return false;
            }
        }

        true
    }
}

/// Iterator over the outgoing half-edges around a vertex.
///
/// The starting half-edge is captured by value at creation, so the iterator
/// is restartable and external mutation during iteration is not silently
/// followed. Iteration is bounded by the half-edge count to stay finite even
/// on a mesh with violated invariants.
pub struct VertexHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    remaining: usize,
    done: bool,
}

impl<'a, I: MeshIndex> VertexHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, v: VertexId<I>) -> Self {
        let start = mesh.vertex(v).halfedge;
        Self {
            mesh,
            start,
            current: start,
            remaining: mesh.halfedges.slot_count(),
            done: !start.is_valid(),
        }
    }
}

impl<I: MeshIndex> Iterator for VertexHalfEdgeIter<'_, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let result = self.current;

        // If he leaves v, twin(he) arrives at v and next(twin(he)) leaves v
        // again: the next outgoing half-edge in the rotation.
        self.current = self.mesh.next(self.mesh.twin(self.current));

        if self.current == self.start || !self.current.is_valid() {
            self.done = true;
        }

        Some(result)
    }
}

/// Iterator over the half-edges of a face's boundary loop.
///
/// Follows `next` from the face's half-edge back to itself; the length equals
/// the face degree. Bounded by the half-edge count as a guard against broken
/// loops.
pub struct FaceHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    remaining: usize,
    done: bool,
}

impl<'a, I: MeshIndex> FaceHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, f: FaceId<I>) -> Self {
        let start = mesh.face(f).halfedge;
        Self {
            mesh,
            start,
            current: start,
            remaining: mesh.halfedges.slot_count(),
            done: !start.is_valid(),
        }
    }
}

impl<I: MeshIndex> Iterator for FaceHalfEdgeIter<'_, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let result = self.current;
        self.current = self.mesh.next(self.current);

        if self.current == self.start || !self.current.is_valid() {
            self.done = true;
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_creation() {
        let v = Vertex::<u32>::from_coords(1.0, 2.0, 3.0);
        assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
        assert!(v.is_isolated());
        assert!(v.normal.is_none());
        assert!(v.curvature.is_none());
        assert!(!v.selected);
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh::<u32>::new();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_halfedges(), 0);
        assert_eq!(mesh.num_edges(), 0);
        assert_eq!(mesh.num_faces(), 0);
        assert!(mesh.is_empty());
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_add_vertex() {
        let mut mesh = HalfEdgeMesh::<u32>::new();
        let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));

        assert_eq!(mesh.num_vertices(), 2);
        assert_eq!(v0.index(), 0);
        assert_eq!(v1.index(), 1);
        assert!(mesh.vertex(v0).is_isolated());
        assert!(mesh.is_boundary_vertex(v0));
    }

    #[test]
    fn test_one_ring_of_isolated_vertex_is_empty() {
        let mut mesh = HalfEdgeMesh::<u32>::new();
        let v = mesh.add_vertex(Point3::origin());
        assert_eq!(mesh.vertex_halfedges(v).count(), 0);
        assert_eq!(mesh.valence(v), 0);
    }

    #[test]
    fn test_selected_vertices() {
        let mut mesh = HalfEdgeMesh::<u32>::new();
        let v0 = mesh.add_vertex(Point3::origin());
        let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.vertex_mut(v1).selected = true;

        let selected: Vec<_> = mesh.selected_vertices().collect();
        assert_eq!(selected, vec![v1]);
        assert!(!mesh.vertex(v0).selected);
    }
}
