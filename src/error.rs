//! Error types for tessella.
//!
//! This module defines all error types used throughout the library.
//!
//! Errors fall into three classes:
//!
//! - **Validation**: the caller handed a mutator input that can never form a
//!   face ([`MeshError::TooFewVertices`], [`MeshError::RepeatedVertex`], plus
//!   the builder-level index checks).
//! - **Manifold violation**: the requested mutation would break the
//!   2-manifold-with-boundary assumption ([`MeshError::NonManifoldEdge`],
//!   [`MeshError::NonManifoldVertex`]).
//! - **Structural inconsistency**: the mesh was asked to operate on an entity
//!   it no longer owns, or removal bookkeeping hit a missing reference
//!   ([`MeshError::StaleHandle`], [`MeshError::BrokenLink`]). These fail
//!   loudly rather than silently corrupt connectivity.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A face was requested with fewer than three vertices.
    #[error("face needs at least 3 vertices, got {count}")]
    TooFewVertices {
        /// Number of vertices supplied.
        count: usize,
    },

    /// A face was requested with the same vertex appearing twice.
    #[error("face repeats vertex {vertex}")]
    RepeatedVertex {
        /// The repeated vertex index.
        vertex: usize,
    },

    /// A face references a vertex index outside the supplied vertex list.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index in the input list.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face in a face-vertex list has duplicate vertex indices or too few
    /// of them.
    #[error("face {face} is degenerate")]
    DegenerateFace {
        /// The face index in the input list.
        face: usize,
    },

    /// Inserting the face would give an edge a third incident face.
    #[error("edge ({v0}, {v1}) already borders two faces")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// No boundary opening was found at a vertex during splicing, so the
    /// surrounding half-edge fan cannot be relinked consistently.
    #[error("no boundary opening at vertex {vertex}")]
    NonManifoldVertex {
        /// The vertex whose fan has no opening.
        vertex: usize,
    },

    /// An id refers to an entity the mesh no longer owns.
    #[error("stale {entity} id {index}")]
    StaleHandle {
        /// The kind of entity ("vertex", "half-edge", "edge", "face").
        entity: &'static str,
        /// The raw index of the stale id.
        index: usize,
    },

    /// Connectivity bookkeeping encountered a missing or inconsistent link.
    #[error("broken connectivity: {details}")]
    BrokenLink {
        /// Description of the inconsistency.
        details: String,
    },
}

impl MeshError {
    /// Create a [`MeshError::BrokenLink`] from a message.
    pub fn broken_link<S: Into<String>>(details: S) -> Self {
        MeshError::BrokenLink {
            details: details.into(),
        }
    }
}
