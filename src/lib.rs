//! # Tessella
//!
//! A half-edge mesh kernel for geometry processing.
//!
//! Tessella provides a manifold polygon mesh built on the half-edge
//! (doubly-connected edge list) representation, with incremental
//! construction, local removal, restartable adjacency traversal, and
//! normal and measure queries.
//!
//! ## Features
//!
//! - **Half-edge data structure**: O(1) adjacency queries with type-safe indices
//! - **Flexible indexing**: Support for 16-bit, 32-bit, and 64-bit indices
//! - **Incremental topology**: Stitch faces one at a time, remove them locally
//! - **Normals**: Face normals plus four vertex-normal weighting strategies
//!
//! ## Quick Start
//!
//! ```
//! use tessella::prelude::*;
//!
//! // Define vertices and faces
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! let faces = vec![
//!     [0, 2, 1],  // bottom
//!     [0, 1, 3],  // front
//!     [1, 2, 3],  // right
//!     [2, 0, 3],  // left
//! ];
//!
//! // Build the mesh
//! let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//! assert_eq!(mesh.num_vertices(), 4);
//! assert_eq!(mesh.num_faces(), 4);
//!
//! // Query mesh properties
//! println!("Surface area: {}", mesh.surface_area());
//! for f in mesh.face_ids() {
//!     println!("Face {:?}: normal={:?}", f, mesh.face_normal(f));
//! }
//!
//! // Cache vertex normals
//! mesh.compute_vertex_normals(NormalWeighting::Angle);
//! ```
//!
//! ## Mesh Traversal
//!
//! The half-edge structure enables efficient traversal of mesh elements:
//!
//! ```
//! use tessella::prelude::*;
//!
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(0.5, 1.0, 0.0),
//! # ];
//! # let faces = vec![[0, 1, 2]];
//! # let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//! // Iterate over neighbors of a vertex
//! let v = VertexId::new(0);
//! for neighbor in mesh.vertex_neighbors(v) {
//!     println!("Neighbor: {:?}", neighbor);
//! }
//!
//! // Iterate over faces around a vertex
//! for face in mesh.vertex_faces(v) {
//!     println!("Adjacent face: {:?}", face);
//! }
//!
//! // Walk a face loop
//! let f = mesh.face_ids().next().unwrap();
//! for he in mesh.face_halfedges(f) {
//!     println!("{:?} -> {:?}", mesh.source(he), mesh.target(he));
//! }
//! ```
//!
//! ## Removal and Compaction
//!
//! Removal operations splice the surrounding connectivity locally and leave
//! tombstoned storage slots behind; surviving ids stay stable. When dense
//! indices matter again, compact explicitly:
//!
//! ```
//! use tessella::prelude::*;
//!
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(0.5, 1.0, 0.0),
//! #     Point3::new(0.5, 0.5, 1.0),
//! # ];
//! # let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
//! let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//! let f = mesh.face_ids().next().unwrap();
//! mesh.remove_face(f).unwrap();
//! mesh.refresh_indices();
//! assert!(mesh.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;

pub use nalgebra;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use tessella::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_polygons, build_from_triangles, Edge, EdgeId, Face, FaceId, HalfEdge,
        HalfEdgeId, HalfEdgeMesh, MeshIndex, NormalWeighting, Vertex, VertexCurvature, VertexId,
    };
    pub use nalgebra::{Point3, Vector3};
}
