//! Benchmarks for mesh operations.

use criterion::{criterion_group, criterion_main, Criterion};
use tessella::prelude::*;

fn grid_soup(n: usize) -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n * 2);

    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }
    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            faces.push([v00, v10, v11]);
            faces.push([v00, v11, v01]);
        }
    }
    (vertices, faces)
}

fn grid_mesh(n: usize) -> HalfEdgeMesh {
    let (vertices, faces) = grid_soup(n);
    build_from_triangles(&vertices, &faces).unwrap()
}

fn bench_mesh_construction(c: &mut Criterion) {
    let (vertices, faces) = grid_soup(10);

    c.bench_function("build_grid_10x10", |b| {
        b.iter(|| {
            let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
            mesh
        });
    });

    c.bench_function("add_face_incremental_10x10", |b| {
        b.iter(|| {
            let mut mesh: HalfEdgeMesh = HalfEdgeMesh::with_capacity(vertices.len(), faces.len());
            let ids: Vec<VertexId> = vertices.iter().map(|&p| mesh.add_vertex(p)).collect();
            for tri in &faces {
                mesh.add_face(&[ids[tri[0]], ids[tri[1]], ids[tri[2]]]).unwrap();
            }
            mesh
        });
    });
}

fn bench_mesh_traversal(c: &mut Criterion) {
    let mesh = grid_mesh(50);

    c.bench_function("vertex_neighbors_all", |b| {
        b.iter(|| {
            let mut count = 0;
            for v in mesh.vertex_ids() {
                count += mesh.vertex_neighbors(v).count();
            }
            count
        });
    });

    c.bench_function("face_normals_all", |b| {
        b.iter(|| {
            let mut sum = Vector3::zeros();
            for f in mesh.face_ids() {
                sum += mesh.face_normal(f);
            }
            sum
        });
    });
}

fn bench_vertex_normals(c: &mut Criterion) {
    let mesh = grid_mesh(50);

    for (name, weighting) in [
        ("vertex_normals_area", NormalWeighting::Area),
        ("vertex_normals_angle", NormalWeighting::Angle),
        (
            "vertex_normals_inscribed_sphere",
            NormalWeighting::InscribedSphere,
        ),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut sum = Vector3::zeros();
                for v in mesh.vertex_ids() {
                    sum += mesh.vertex_normal(v, weighting);
                }
                sum
            });
        });
    }

    c.bench_function("compute_vertex_normals_parallel", |b| {
        b.iter_batched(
            || mesh.clone(),
            |mut m| {
                m.compute_vertex_normals(NormalWeighting::Area);
                m
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_removal(c: &mut Criterion) {
    c.bench_function("remove_all_faces_20x20", |b| {
        b.iter_batched(
            || grid_mesh(20),
            |mut mesh| {
                let faces: Vec<FaceId> = mesh.face_ids().collect();
                for f in faces {
                    mesh.remove_face(f).unwrap();
                }
                mesh
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_mesh_construction,
    bench_mesh_traversal,
    bench_vertex_normals,
    bench_removal
);
criterion_main!(benches);
