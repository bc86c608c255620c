//! Discrete curvature estimation on triangle meshes.
//!
//! Gaussian curvature comes from the angle defect, mean curvature from the
//! cotangent Laplace-Beltrami operator, both normalized by the mixed Voronoi
//! area of Meyer et al.
//!
//! # Example
//!
//! ```
//! use tessella::prelude::*;
//! use tessella::algo::curvature::compute_curvatures;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//! let triangles = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
//! let mut mesh: HalfEdgeMesh = build_from_triangles(&positions, &triangles).unwrap();
//!
//! compute_curvatures(&mut mesh);
//! for (_, v) in mesh.vertices() {
//!     let c = v.curvature.unwrap();
//!     println!("K={:.4} H={:.4}", c.gaussian, c.mean);
//! }
//! ```
//!
//! # References
//!
//! - Meyer, M., et al. (2003). "Discrete Differential-Geometry Operators for
//!   Triangulated 2-Manifolds." Visualization and Mathematics III.

use std::f64::consts::PI;

use nalgebra::Vector3;
use rayon::prelude::*;

use crate::mesh::{HalfEdgeMesh, MeshIndex, NormalWeighting, VertexCurvature, VertexId};

const AREA_EPS: f64 = 1e-10;

/// Cotangent of the angle between two vectors.
fn cotangent(u: &Vector3<f64>, w: &Vector3<f64>) -> f64 {
    let cross_norm = u.cross(w).norm();
    if cross_norm < AREA_EPS {
        0.0
    } else {
        u.dot(w) / cross_norm
    }
}

/// Mixed Voronoi area around a vertex (Meyer et al.).
///
/// Non-obtuse triangles contribute their Voronoi cell; triangles obtuse at
/// the vertex contribute half their area, obtuse elsewhere a quarter.
fn mixed_area<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>) -> f64 {
    let mut area = 0.0;

    for he in mesh.vertex_halfedges(v) {
        if !mesh.face_of(he).is_valid() {
            continue;
        }
        // Triangle corner at v: d1 and d2 point to the other two vertices.
        let d1 = mesh.edge_vector(he);
        let d2 = -mesh.edge_vector(mesh.prev(he));
        let tri_area = 0.5 * d1.cross(&d2).norm();
        if tri_area < AREA_EPS {
            continue;
        }

        let e12 = d2 - d1; // from the d1 corner to the d2 corner
        let obtuse_at_v = d1.dot(&d2) < 0.0;
        let obtuse_elsewhere = (-d1).dot(&e12) < 0.0 || (-d2).dot(&(-e12)) < 0.0;

        if obtuse_at_v {
            area += tri_area * 0.5;
        } else if obtuse_elsewhere {
            area += tri_area * 0.25;
        } else {
            let cot_1 = cotangent(&(-d1), &e12);
            let cot_2 = cotangent(&(-d2), &(-e12));
            area += 0.125 * (d2.norm_squared() * cot_1 + d1.norm_squared() * cot_2);
        }
    }
    area
}

/// Sum of the face corner angles at a vertex.
fn angle_sum<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>) -> f64 {
    mesh.vertex_halfedges(v)
        .filter(|&he| mesh.face_of(he).is_valid())
        .map(|he| {
            let d1 = mesh.edge_vector(he);
            let d2 = -mesh.edge_vector(mesh.prev(he));
            d1.angle(&d2)
        })
        .sum()
}

/// Cotangent Laplacian of the position at a vertex (the mean curvature
/// normal, up to area normalization).
fn laplacian<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>) -> Vector3<f64> {
    let mut sum = Vector3::zeros();

    for he in mesh.vertex_halfedges(v) {
        let to_neighbor = mesh.edge_vector(he);
        let mut weight = 0.0;

        // Opposite corner in the face on each side of the edge.
        if mesh.face_of(he).is_valid() {
            let opp = mesh.target(mesh.next(he));
            let p_opp = mesh.position(opp);
            weight += cotangent(
                &(mesh.position(v) - p_opp),
                &(mesh.position(mesh.target(he)) - p_opp),
            );
        }
        let twin = mesh.twin(he);
        if mesh.face_of(twin).is_valid() {
            let opp = mesh.target(mesh.next(twin));
            let p_opp = mesh.position(opp);
            weight += cotangent(
                &(mesh.position(v) - p_opp),
                &(mesh.position(mesh.target(he)) - p_opp),
            );
        }

        // Degenerate triangles can push the weight negative
        sum += weight.max(0.0) * to_neighbor;
    }
    0.5 * sum
}

/// Compute the discrete curvature scalars at a single vertex.
///
/// Gaussian curvature is the angle defect over the mixed area, using a full
/// turn for interior vertices and a half turn on the boundary. Mean
/// curvature is the half-magnitude of the area-normalized Laplacian, signed
/// by agreement with the vertex normal. Vertices without incident faces get
/// zeros.
pub fn vertex_curvature<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>) -> VertexCurvature {
    let area = mixed_area(mesh, v);
    if area < AREA_EPS {
        return VertexCurvature {
            gaussian: 0.0,
            mean: 0.0,
        };
    }

    let full_angle = if mesh.is_boundary_vertex(v) { PI } else { 2.0 * PI };
    let gaussian = (full_angle - angle_sum(mesh, v)) / area;

    let lap = laplacian(mesh, v) / area;
    let mut mean = 0.5 * lap.norm();
    if lap.dot(&mesh.vertex_normal(v, NormalWeighting::Area)) < 0.0 {
        mean = -mean;
    }

    VertexCurvature { gaussian, mean }
}

/// Compute and cache curvatures for all vertices in parallel.
pub fn compute_curvatures<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) {
    let ids: Vec<VertexId<I>> = mesh.vertex_ids().collect();
    let snapshot: &HalfEdgeMesh<I> = mesh;
    let curvatures: Vec<VertexCurvature> = ids
        .par_iter()
        .map(|&v| vertex_curvature(snapshot, v))
        .collect();
    for (v, c) in ids.into_iter().zip(curvatures) {
        mesh.vertex_mut(v).curvature = Some(c);
    }
}

/// Sequential version of [`compute_curvatures`].
pub fn compute_curvatures_sequential<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) {
    let ids: Vec<VertexId<I>> = mesh.vertex_ids().collect();
    for v in ids {
        let c = vertex_curvature(mesh, v);
        mesh.vertex_mut(v).curvature = Some(c);
    }
}
