//! Local topological mutation.
//!
//! This module implements incremental face insertion and entity removal on
//! the half-edge structure. Faces are stitched in one at a time with
//! [`HalfEdgeMesh::add_face`]; removal peels them back out with
//! [`HalfEdgeMesh::remove_face`], [`HalfEdgeMesh::remove_edge`] and
//! [`HalfEdgeMesh::remove_vertex`].
//!
//! Every operation re-establishes the connectivity invariants before
//! returning `Ok`: twin involution, next/prev symmetry, closed face loops,
//! twin-paired edges, and boundary-pointing representative half-edges. None
//! of the removal operations renumber storage; callers run
//! [`HalfEdgeMesh::refresh_indices`] explicitly once a batch of removals is
//! done.

use super::halfedge::{Edge, Face, HalfEdge, HalfEdgeMesh};
use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Insert a face over the given vertices (counter-clockwise order).
    ///
    /// For each cyclic pair of vertices the insertion reuses the existing
    /// half-edge if the edge is already present, or co-creates a twin pair
    /// otherwise, then splices the surrounding boundary loops so the new
    /// face sits consistently inside each vertex's fan.
    ///
    /// # Errors
    ///
    /// - [`MeshError::TooFewVertices`] for fewer than three vertices.
    /// - [`MeshError::RepeatedVertex`] if a vertex appears twice.
    /// - [`MeshError::StaleHandle`] if a vertex id is no longer live.
    /// - [`MeshError::NonManifoldEdge`] if an edge of the face already
    ///   borders two faces.
    /// - [`MeshError::NonManifoldVertex`] if a vertex's fan offers no
    ///   boundary opening to relink through.
    ///
    /// The first four conditions are checked before anything is mutated. A
    /// [`MeshError::NonManifoldVertex`] failure surfaces mid-splice and can
    /// leave partial links at the vertex pairs already processed; callers
    /// that need atomicity should test [`can_add_face`](Self::can_add_face)
    /// first.
    pub fn add_face(&mut self, vertices: &[VertexId<I>]) -> Result<FaceId<I>> {
        let n = vertices.len();
        if n < 3 {
            return Err(MeshError::TooFewVertices { count: n });
        }
        for (i, &v) in vertices.iter().enumerate() {
            if !self.contains_vertex(v) {
                return Err(MeshError::StaleHandle {
                    entity: "vertex",
                    index: v.index(),
                });
            }
            if vertices[..i].contains(&v) {
                return Err(MeshError::RepeatedVertex { vertex: v.index() });
            }
        }

        // Reusable half-edges must all be boundary: an edge cannot border a
        // third face.
        let mut existing: Vec<Option<HalfEdgeId<I>>> = Vec::with_capacity(n);
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let found = self.find_halfedge(a, b);
            if let Some(he) = found {
                if self.face_of(he).is_valid() {
                    return Err(MeshError::NonManifoldEdge {
                        v0: a.index(),
                        v1: b.index(),
                    });
                }
            }
            existing.push(found);
        }

        // Gather the loop, creating twin pairs for the missing edges.
        let mut loop_hes: Vec<(HalfEdgeId<I>, bool)> = Vec::with_capacity(n);
        for (i, found) in existing.into_iter().enumerate() {
            match found {
                Some(he) => loop_hes.push((he, false)),
                None => {
                    let he = self.create_edge(vertices[i], vertices[(i + 1) % n]);
                    loop_hes.push((he, true));
                }
            }
        }

        let face = {
            let mut f = Face::new(loop_hes[0].0);
            f.index = self.faces.slot_count();
            FaceId::new(self.faces.push(f))
        };
        for &(he, _) in &loop_hes {
            self.halfedge_mut(he).face = face;
        }

        // Splice each consecutive pair at its shared vertex. The boundary
        // relinking depends on which of the two half-edges already existed.
        for i in 0..n {
            let (cur, cur_new) = loop_hes[i];
            let (nxt, nxt_new) = loop_hes[(i + 1) % n];
            let v = vertices[(i + 1) % n];

            match (cur_new, nxt_new) {
                (true, true) => self.splice_new_pair(cur, nxt, v)?,
                (true, false) => {
                    // nxt leaves the boundary; its old predecessor now feeds
                    // the new outgoing boundary half-edge.
                    let p = self.prev(nxt);
                    let out = self.twin(cur);
                    self.link(p, out);
                }
                (false, true) => {
                    // cur leaves the boundary; the new incoming boundary
                    // half-edge takes over its old successor.
                    let q = self.next(cur);
                    let inc = self.twin(nxt);
                    self.link(inc, q);
                }
                (false, false) => self.relink_gap(cur, nxt, v)?,
            }
            self.link(cur, nxt);
        }

        // Keep representatives pointing at the boundary where one remains.
        for &v in vertices {
            self.adjust_vertex_halfedge(v);
        }

        Ok(face)
    }

    /// Check whether [`add_face`](Self::add_face) can succeed, without
    /// mutating anything.
    ///
    /// Conservative: verifies arity, repeats, liveness, per-edge manifold
    /// availability and that every non-isolated vertex still lies on the
    /// boundary. A `true` result can in rare multi-gap configurations still
    /// fail to relink; a `false` result always means `add_face` would fail.
    pub fn can_add_face(&self, vertices: &[VertexId<I>]) -> bool {
        let n = vertices.len();
        if n < 3 {
            return false;
        }
        for (i, &v) in vertices.iter().enumerate() {
            if !self.contains_vertex(v) || vertices[..i].contains(&v) {
                return false;
            }
            if !self.is_boundary_vertex(v) {
                return false;
            }
        }
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            if let Some(he) = self.find_halfedge(a, b) {
                if self.face_of(he).is_valid() {
                    return false;
                }
            }
        }
        true
    }

    /// Remove a face, demoting its boundary loop.
    ///
    /// Every half-edge of the loop gets an invalid face reference and the
    /// face leaves the store. Edges and vertices are untouched; storage is
    /// not renumbered.
    pub fn remove_face(&mut self, f: FaceId<I>) -> Result<()> {
        if !self.contains_face(f) {
            return Err(MeshError::StaleHandle {
                entity: "face",
                index: f.index(),
            });
        }
        let loop_hes: Vec<HalfEdgeId<I>> = self.face_halfedges(f).collect();
        for he in loop_hes {
            self.halfedge_mut(he).face = FaceId::invalid();
        }
        self.faces.remove(f.index());
        Ok(())
    }

    /// Remove an edge together with both of its half-edges.
    ///
    /// Faces bordering the edge are removed first. The surviving boundary
    /// chains are spliced past the deleted pair, and endpoint
    /// representatives are redirected to surviving boundary half-edges (or
    /// cleared when an endpoint becomes isolated). Storage is not
    /// renumbered.
    pub fn remove_edge(&mut self, e: EdgeId<I>) -> Result<()> {
        if !self.contains_edge(e) {
            return Err(MeshError::StaleHandle {
                entity: "edge",
                index: e.index(),
            });
        }
        let h0 = self.edge(e).halfedge;
        let h1 = self.twin(h0);

        let f0 = self.face_of(h0);
        if f0.is_valid() {
            self.remove_face(f0)?;
        }
        let f1 = self.face_of(h1);
        if f1.is_valid() {
            self.remove_face(f1)?;
        }

        let v = self.target(h0);
        let u = self.target(h1);
        let n0 = self.next(h0);
        let n1 = self.next(h1);
        if !n0.is_valid() || !n1.is_valid() {
            return Err(MeshError::broken_link(format!(
                "edge {:?} has half-edges outside any loop",
                e
            )));
        }

        if n0 == h1 && n1 == h0 {
            // Free-floating edge: both endpoints become isolated.
            if self.vertex(u).halfedge == h0 {
                self.vertex_mut(u).halfedge = HalfEdgeId::invalid();
            }
            if self.vertex(v).halfedge == h1 {
                self.vertex_mut(v).halfedge = HalfEdgeId::invalid();
            }
        } else if n0 == h1 {
            // The boundary turns straight back at v: this edge is v's only
            // connection.
            let p = self.prev(h0);
            self.link(p, n1);
            self.vertex_mut(v).halfedge = HalfEdgeId::invalid();
            if self.vertex(u).halfedge == h0 {
                self.vertex_mut(u).halfedge = n1;
            }
        } else if n1 == h0 {
            let p = self.prev(h1);
            self.link(p, n0);
            self.vertex_mut(u).halfedge = HalfEdgeId::invalid();
            if self.vertex(v).halfedge == h1 {
                self.vertex_mut(v).halfedge = n0;
            }
        } else {
            // Bypass the pair in both loops.
            let p0 = self.prev(h0);
            let p1 = self.prev(h1);
            self.link(p0, n1);
            self.link(p1, n0);
            if self.vertex(v).halfedge == h1 {
                self.vertex_mut(v).halfedge = n0;
            }
            if self.vertex(u).halfedge == h0 {
                self.vertex_mut(u).halfedge = n1;
            }
        }

        self.halfedges.remove(h0.index());
        self.halfedges.remove(h1.index());
        self.edges.remove(e.index());
        Ok(())
    }

    /// Remove a vertex together with every edge and face touching it.
    ///
    /// The incident edges are collected from the one-ring and removed one by
    /// one (each removal takes its bordering faces with it), leaving the
    /// vertex isolated before it is deleted itself. Storage is not
    /// renumbered; run [`refresh_indices`](Self::refresh_indices) once a
    /// batch of removals is done.
    pub fn remove_vertex(&mut self, v: VertexId<I>) -> Result<()> {
        if !self.contains_vertex(v) {
            return Err(MeshError::StaleHandle {
                entity: "vertex",
                index: v.index(),
            });
        }
        let incident: Vec<EdgeId<I>> = self.vertex_edges(v).collect();
        for e in incident {
            self.remove_edge(e)?;
        }
        if self.vertex(v).halfedge.is_valid() {
            return Err(MeshError::broken_link(format!(
                "vertex {:?} still connected after incident edge removal",
                v
            )));
        }
        self.vertices.remove(v.index());
        Ok(())
    }

    // ==================== Internals ====================

    /// Link `a -> b` in a loop (`a.next = b`, `b.prev = a`).
    fn link(&mut self, a: HalfEdgeId<I>, b: HalfEdgeId<I>) {
        self.halfedge_mut(a).next = b;
        self.halfedge_mut(b).prev = a;
    }

    /// Co-create an edge with its twin half-edge pair between `a` and `b`.
    ///
    /// Returns the half-edge from `a` to `b`. Neither half-edge is placed in
    /// a loop yet. Isolated endpoints adopt their new outgoing half-edge as
    /// representative.
    fn create_edge(&mut self, a: VertexId<I>, b: VertexId<I>) -> HalfEdgeId<I> {
        let slot = self.halfedges.slot_count();
        let h_ab = HalfEdgeId::new(slot);
        let h_ba = HalfEdgeId::new(slot + 1);
        let edge = {
            let mut e = Edge::new(h_ab);
            e.index = self.edges.slot_count();
            EdgeId::new(self.edges.push(e))
        };

        let mut ab = HalfEdge::new();
        ab.target = b;
        ab.twin = h_ba;
        ab.edge = edge;
        ab.index = slot;
        self.halfedges.push(ab);

        let mut ba = HalfEdge::new();
        ba.target = a;
        ba.twin = h_ab;
        ba.edge = edge;
        ba.index = slot + 1;
        self.halfedges.push(ba);

        if self.vertex(a).is_isolated() {
            self.vertex_mut(a).halfedge = h_ab;
        }
        if self.vertex(b).is_isolated() {
            self.vertex_mut(b).halfedge = h_ba;
        }
        h_ab
    }

    /// Splice two freshly created loop half-edges into the fan at their
    /// shared vertex `v` (`cur` arrives at `v`, `nxt` leaves it).
    fn splice_new_pair(
        &mut self,
        cur: HalfEdgeId<I>,
        nxt: HalfEdgeId<I>,
        v: VertexId<I>,
    ) -> Result<()> {
        let out = self.twin(cur); // leaves v along cur's edge
        let inc = self.twin(nxt); // arrives at v along nxt's edge

        let rep = self.vertex(v).halfedge;
        if !rep.is_valid() || rep == out || rep == nxt {
            // v had no other edges: the twins become each other's sole
            // boundary neighbors.
            self.link(inc, out);
            return Ok(());
        }

        // v already carries a fan: insert the twin pair immediately before
        // its first boundary half-edge.
        let b_out = self
            .first_boundary_out(rep)
            .ok_or(MeshError::NonManifoldVertex { vertex: v.index() })?;
        let b_in = self.prev(b_out);
        self.link(inc, b_out);
        self.link(b_in, out);
        Ok(())
    }

    /// Close the boundary gap between two pre-existing loop half-edges at
    /// their shared vertex `v` (`cur` arrives, `nxt` leaves).
    ///
    /// If the two were not already adjacent on the boundary, the chain that
    /// hangs between them is moved into another boundary opening of the fan.
    fn relink_gap(&mut self, cur: HalfEdgeId<I>, nxt: HalfEdgeId<I>, v: VertexId<I>) -> Result<()> {
        let patch_start = self.next(cur);
        if patch_start == nxt {
            return Ok(());
        }
        let patch_end = self.prev(nxt);

        // Rotate through the half-edges arriving at v until a boundary one
        // opens up. Reaching the patch end (or coming all the way around)
        // means the fan has no other opening.
        let start = self.twin(nxt);
        let mut b_in = start;
        let mut budget = self.halfedges.slot_count();
        loop {
            b_in = self.twin(self.next(b_in));
            if self.is_boundary_halfedge(b_in) {
                break;
            }
            if b_in == start || budget == 0 {
                return Err(MeshError::NonManifoldVertex { vertex: v.index() });
            }
            budget -= 1;
        }
        if b_in == patch_end {
            return Err(MeshError::NonManifoldVertex { vertex: v.index() });
        }

        let b_out = self.next(b_in);
        self.link(b_in, patch_start);
        self.link(patch_end, b_out);
        Ok(())
    }

    /// Rotate the fan from an outgoing half-edge and return its first
    /// boundary outgoing half-edge, if any.
    fn first_boundary_out(&self, start: HalfEdgeId<I>) -> Option<HalfEdgeId<I>> {
        let mut he = start;
        let mut budget = self.halfedges.slot_count();
        loop {
            if self.is_boundary_halfedge(he) {
                return Some(he);
            }
            he = self.next(self.twin(he));
            if he == start || !he.is_valid() || budget == 0 {
                return None;
            }
            budget -= 1;
        }
    }

    /// Re-aim a vertex's representative at a boundary half-edge when its fan
    /// still has one.
    fn adjust_vertex_halfedge(&mut self, v: VertexId<I>) {
        let rep = self.vertex(v).halfedge;
        if !rep.is_valid() || self.is_boundary_halfedge(rep) {
            return;
        }
        if let Some(b_out) = self.first_boundary_out(rep) {
            self.vertex_mut(v).halfedge = b_out;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn triangle_mesh() -> (HalfEdgeMesh<u32>, [VertexId<u32>; 3]) {
        let mut mesh = HalfEdgeMesh::new();
        let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let v2 = mesh.add_vertex(Point3::new(0.5, 1.0, 0.0));
        (mesh, [v0, v1, v2])
    }

    fn tetrahedron() -> (HalfEdgeMesh<u32>, [VertexId<u32>; 4]) {
        let mut mesh = HalfEdgeMesh::new();
        let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let v2 = mesh.add_vertex(Point3::new(0.5, 1.0, 0.0));
        let v3 = mesh.add_vertex(Point3::new(0.5, 0.5, 1.0));
        mesh.add_face(&[v0, v2, v1]).unwrap();
        mesh.add_face(&[v0, v1, v3]).unwrap();
        mesh.add_face(&[v1, v2, v3]).unwrap();
        mesh.add_face(&[v2, v0, v3]).unwrap();
        (mesh, [v0, v1, v2, v3])
    }

    #[test]
    fn test_single_triangle_counts() {
        let (mut mesh, [v0, v1, v2]) = triangle_mesh();
        let f = mesh.add_face(&[v0, v1, v2]).unwrap();

        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_edges(), 3);
        assert_eq!(mesh.num_halfedges(), 6);
        assert!(mesh.is_valid());

        let interior = mesh
            .halfedge_ids()
            .filter(|&he| mesh.face_of(he) == f)
            .count();
        let boundary = mesh
            .halfedge_ids()
            .filter(|&he| mesh.is_boundary_halfedge(he))
            .count();
        assert_eq!(interior, 3);
        assert_eq!(boundary, 3);

        for e in mesh.edge_ids() {
            assert!(mesh.is_boundary_edge(e));
        }
        assert_eq!(mesh.face_degree(f), 3);
    }

    #[test]
    fn test_twin_involution() {
        let (mesh, _) = tetrahedron();
        for he in mesh.halfedge_ids() {
            assert_eq!(mesh.twin(mesh.twin(he)), he);
            assert_eq!(mesh.edge_of(he), mesh.edge_of(mesh.twin(he)));
        }
    }

    #[test]
    fn test_face_loop_closure() {
        let (mesh, _) = tetrahedron();
        for f in mesh.face_ids() {
            let mut steps = 0;
            let start = mesh.face(f).halfedge;
            let mut he = start;
            loop {
                assert_eq!(mesh.face_of(he), f);
                he = mesh.next(he);
                steps += 1;
                if he == start {
                    break;
                }
                assert!(steps <= mesh.num_halfedges());
            }
            assert_eq!(steps, mesh.face_degree(f));
        }
    }

    #[test]
    fn test_shared_edge_opposite_winding() {
        let (mut mesh, [v0, v1, v2]) = triangle_mesh();
        let v3 = mesh.add_vertex(Point3::new(0.5, -1.0, 0.0));
        let f0 = mesh.add_face(&[v0, v1, v2]).unwrap();
        let f1 = mesh.add_face(&[v1, v0, v3]).unwrap();

        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_edges(), 5);
        assert_eq!(mesh.num_halfedges(), 10);
        assert!(mesh.is_valid());

        let interior_edges: Vec<_> = mesh
            .edge_ids()
            .filter(|&e| !mesh.is_boundary_edge(e))
            .collect();
        assert_eq!(interior_edges.len(), 1);

        let shared = mesh.edge(interior_edges[0]).halfedge;
        let fa = mesh.face_of(shared);
        let fb = mesh.face_of(mesh.twin(shared));
        assert!(fa.is_valid() && fb.is_valid());
        assert_ne!(fa, fb);
        assert!(fa == f0 || fa == f1);
    }

    #[test]
    fn test_third_face_on_edge_is_rejected() {
        let (mut mesh, [v0, v1, v2]) = triangle_mesh();
        let v3 = mesh.add_vertex(Point3::new(0.5, -1.0, 0.0));
        let v4 = mesh.add_vertex(Point3::new(0.5, -2.0, 0.0));
        mesh.add_face(&[v0, v1, v2]).unwrap();
        mesh.add_face(&[v1, v0, v3]).unwrap();

        assert!(!mesh.can_add_face(&[v0, v1, v4]));
        let err = mesh.add_face(&[v0, v1, v4]).unwrap_err();
        assert!(matches!(err, MeshError::NonManifoldEdge { .. }));
    }

    #[test]
    fn test_input_validation() {
        let (mut mesh, [v0, v1, v2]) = triangle_mesh();

        assert!(matches!(
            mesh.add_face(&[v0, v1]).unwrap_err(),
            MeshError::TooFewVertices { count: 2 }
        ));
        assert!(matches!(
            mesh.add_face(&[v0, v1, v0]).unwrap_err(),
            MeshError::RepeatedVertex { .. }
        ));
        assert!(matches!(
            mesh.add_face(&[v0, v1, VertexId::new(99)]).unwrap_err(),
            MeshError::StaleHandle { entity: "vertex", .. }
        ));
        // Nothing was mutated by the failed calls
        assert_eq!(mesh.num_edges(), 0);
        assert!(mesh.can_add_face(&[v0, v1, v2]));
    }

    #[test]
    fn test_tetrahedron_euler_formula() {
        let (mesh, _) = tetrahedron();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_edges(), 6);
        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.num_halfedges(), 12);
        assert!(mesh.is_valid());

        let euler = mesh.num_vertices() as i64 - mesh.num_edges() as i64 + mesh.num_faces() as i64;
        assert_eq!(euler, 2);

        // Closed surface: nothing is boundary
        for v in mesh.vertex_ids() {
            assert!(!mesh.is_boundary_vertex(v));
        }
        for e in mesh.edge_ids() {
            assert!(!mesh.is_boundary_edge(e));
        }
    }

    #[test]
    fn test_fan_completion() {
        // Fan of three triangles around c, then close the remaining sector.
        let mut mesh = HalfEdgeMesh::<u32>::new();
        let c = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let r0 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let r1 = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        let r2 = mesh.add_vertex(Point3::new(-1.0, 0.0, 0.0));
        let r3 = mesh.add_vertex(Point3::new(0.0, -1.0, 0.0));

        mesh.add_face(&[c, r0, r1]).unwrap();
        mesh.add_face(&[c, r1, r2]).unwrap();
        mesh.add_face(&[c, r2, r3]).unwrap();
        assert!(mesh.is_boundary_vertex(c));

        mesh.add_face(&[c, r3, r0]).unwrap();
        assert!(mesh.is_valid());
        assert!(!mesh.is_boundary_vertex(c));
        assert_eq!(mesh.valence(c), 4);
        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.num_edges(), 8);
    }

    #[test]
    fn test_two_triangles_sharing_only_a_vertex() {
        // Two faces touching at c only, then a bridging face that exercises
        // the both-existing relink across the two boundary loops.
        let mut mesh = HalfEdgeMesh::<u32>::new();
        let c = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let r0 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let r1 = mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
        let r2 = mesh.add_vertex(Point3::new(-1.0, 1.0, 0.0));
        let r3 = mesh.add_vertex(Point3::new(-1.0, 0.0, 0.0));

        mesh.add_face(&[c, r0, r1]).unwrap();
        mesh.add_face(&[c, r2, r3]).unwrap();
        assert_eq!(mesh.valence(c), 4);

        mesh.add_face(&[c, r1, r2]).unwrap();
        assert!(mesh.is_valid());
        assert_eq!(mesh.num_faces(), 3);
        assert_eq!(mesh.num_edges(), 7);
        assert_eq!(mesh.vertex_faces(c).count(), 3);
        assert!(mesh.is_boundary_vertex(c));
    }

    #[test]
    fn test_remove_face_demotes_loop() {
        let (mut mesh, [v0, v1, v2]) = triangle_mesh();
        let v3 = mesh.add_vertex(Point3::new(0.5, -1.0, 0.0));
        let f0 = mesh.add_face(&[v0, v1, v2]).unwrap();
        let loop_hes: Vec<_> = mesh.face_halfedges(f0).collect();
        mesh.add_face(&[v1, v0, v3]).unwrap();

        mesh.remove_face(f0).unwrap();
        assert_eq!(mesh.num_faces(), 1);
        assert!(!mesh.contains_face(f0));
        for he in loop_hes {
            assert!(mesh.is_boundary_halfedge(he));
        }
        // Edges and vertices untouched
        assert_eq!(mesh.num_edges(), 5);
        assert_eq!(mesh.num_vertices(), 4);

        // Stale id is rejected the second time
        assert!(matches!(
            mesh.remove_face(f0).unwrap_err(),
            MeshError::StaleHandle { entity: "face", .. }
        ));
    }

    #[test]
    fn test_remove_interior_edge() {
        let (mut mesh, [v0, v1, v2]) = triangle_mesh();
        let v3 = mesh.add_vertex(Point3::new(0.5, -1.0, 0.0));
        mesh.add_face(&[v0, v1, v2]).unwrap();
        mesh.add_face(&[v1, v0, v3]).unwrap();

        let shared = mesh
            .edge_ids()
            .find(|&e| !mesh.is_boundary_edge(e))
            .unwrap();
        mesh.remove_edge(shared).unwrap();

        // Both bordering faces go with the edge
        assert_eq!(mesh.num_faces(), 0);
        assert_eq!(mesh.num_edges(), 4);
        assert_eq!(mesh.num_halfedges(), 8);
        assert!(mesh.is_valid());
        for v in mesh.vertex_ids() {
            assert!(mesh.is_boundary_vertex(v));
            assert!(!mesh.vertex(v).is_isolated());
        }
    }

    #[test]
    fn test_remove_boundary_edge_then_dangling_chain() {
        let (mut mesh, [v0, v1, v2]) = triangle_mesh();
        mesh.add_face(&[v0, v1, v2]).unwrap();

        let e01 = mesh.edge_of(mesh.find_halfedge(v0, v1).unwrap());
        mesh.remove_edge(e01).unwrap();
        assert_eq!(mesh.num_faces(), 0);
        assert_eq!(mesh.num_edges(), 2);
        assert!(mesh.is_valid());

        // The two remaining edges form a path v0 - v2 - v1
        let e02 = mesh.edge_of(mesh.find_halfedge(v0, v2).unwrap());
        mesh.remove_edge(e02).unwrap();
        assert!(mesh.vertex(v0).is_isolated());
        assert!(!mesh.vertex(v2).is_isolated());

        let e12 = mesh.edge_of(mesh.find_halfedge(v1, v2).unwrap());
        mesh.remove_edge(e12).unwrap();
        assert_eq!(mesh.num_edges(), 0);
        assert_eq!(mesh.num_halfedges(), 0);
        for v in [v0, v1, v2] {
            assert!(mesh.vertex(v).is_isolated());
        }
    }

    #[test]
    fn test_remove_vertex_from_tetrahedron() {
        let (mut mesh, [v0, v1, v2, v3]) = tetrahedron();
        assert_eq!(mesh.valence(v3), 3);

        mesh.remove_vertex(v3).unwrap();
        assert!(!mesh.contains_vertex(v3));
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_edges(), 3);
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_halfedges(), 6);
        assert!(mesh.is_valid());

        // No surviving half-edge references the removed vertex
        for (_, he) in mesh.halfedges() {
            assert_ne!(he.target, v3);
        }
        for v in [v0, v1, v2] {
            assert!(mesh.is_boundary_vertex(v));
        }
    }

    #[test]
    fn test_remove_vertex_from_fan() {
        let mut mesh = HalfEdgeMesh::<u32>::new();
        let c = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let ring: Vec<_> = (0..5)
            .map(|i| {
                let a = i as f64;
                mesh.add_vertex(Point3::new(a.cos(), a.sin(), 0.0))
            })
            .collect();
        for i in 0..4 {
            mesh.add_face(&[c, ring[i], ring[i + 1]]).unwrap();
        }
        let degree = mesh.valence(c);
        assert_eq!(degree, 5);
        let edges_before = mesh.num_edges();

        mesh.remove_vertex(c).unwrap();
        assert_eq!(mesh.num_edges(), edges_before - degree);
        assert_eq!(mesh.num_faces(), 0);
        assert_eq!(mesh.num_vertices(), 5);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_refresh_indices_after_removal() {
        let (mut mesh, _) = tetrahedron();
        let f = mesh.face_ids().next().unwrap();
        mesh.remove_face(f).unwrap();
        let e = mesh
            .edge_ids()
            .find(|&e| mesh.is_boundary_edge(e))
            .unwrap();
        mesh.remove_edge(e).unwrap();

        mesh.refresh_indices();
        assert!(mesh.is_valid());

        // Dense 0..n-1 in every collection
        for (expect, (id, v)) in mesh.vertices().enumerate() {
            assert_eq!(id.index(), expect);
            assert_eq!(v.index, expect);
        }
        for (expect, (id, he)) in mesh.halfedges().enumerate() {
            assert_eq!(id.index(), expect);
            assert_eq!(he.index, expect);
        }
        for (expect, (id, f)) in mesh.faces().enumerate() {
            assert_eq!(id.index(), expect);
            assert_eq!(f.index, expect);
        }
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_edges(), 5);
        assert_eq!(mesh.num_faces(), 2);
    }

    #[test]
    fn test_one_ring_is_restartable() {
        let (mesh, [_, v1, _, _]) = tetrahedron();
        let first: Vec<_> = mesh.vertex_halfedges(v1).collect();
        let second: Vec<_> = mesh.vertex_halfedges(v1).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);

        // Every one-ring half-edge leaves v1
        for he in first {
            assert_eq!(mesh.source(he), v1);
        }
    }

    #[test]
    fn test_vertex_neighbors_and_faces() {
        let (mesh, [v0, v1, v2, v3]) = tetrahedron();
        let neighbors: Vec<_> = mesh.vertex_neighbors(v0).collect();
        assert_eq!(neighbors.len(), 3);
        for v in [v1, v2, v3] {
            assert!(neighbors.contains(&v));
        }
        assert_eq!(mesh.vertex_faces(v0).count(), 3);
        assert_eq!(mesh.vertex_edges(v0).count(), 3);
    }

    #[test]
    fn test_clear() {
        let (mut mesh, _) = tetrahedron();
        mesh.clear();
        assert!(mesh.is_empty());
        assert!(mesh.is_valid());
    }
}
