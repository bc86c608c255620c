//! Mesh processing algorithms.
//!
//! Algorithms live on top of the mesh kernel and use only its public
//! traversal and geometry queries. Currently implemented:
//!
//! - **Curvature**: Discrete Gaussian and mean curvature estimation

pub mod curvature;
