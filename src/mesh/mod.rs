//! Core mesh data structures.
//!
//! This module provides the half-edge mesh representation and related types
//! for representing and manipulating manifold polygon meshes.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`], which represents a polygon mesh
//! using a half-edge (doubly-connected edge list) data structure. This
//! representation provides O(1) adjacency queries, making it efficient for
//! geometry processing algorithms.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`EdgeId`] - Identifies a full edge
//! - [`FaceId`] - Identifies a face
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`]
//! trait), allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! Meshes can be stitched incrementally with
//! [`add_vertex`](HalfEdgeMesh::add_vertex) and
//! [`add_face`](HalfEdgeMesh::add_face), or built from face-vertex lists:
//!
//! ```
//! use tessella::mesh::{HalfEdgeMesh, build_from_triangles};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//! ```
//!
//! # Removal
//!
//! [`remove_face`](HalfEdgeMesh::remove_face),
//! [`remove_edge`](HalfEdgeMesh::remove_edge) and
//! [`remove_vertex`](HalfEdgeMesh::remove_vertex) delete entities in place,
//! leaving tombstoned storage slots behind. Surviving ids stay stable until
//! [`refresh_indices`](HalfEdgeMesh::refresh_indices) compacts the storage.

mod builder;
mod halfedge;
mod index;
mod normals;
mod ops;
mod store;

pub use builder::{build_from_polygons, build_from_triangles};
pub use halfedge::{
    Edge, Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, Vertex, VertexCurvature,
    VertexHalfEdgeIter,
};
pub use index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
pub use normals::NormalWeighting;
