use std::iter;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use rand::{rngs::StdRng, Rng, SeedableRng};

use glam::Vec3A;

use rayon::prelude::*;

use tri_bvh::sampling::UniformHemisphere;
use tri_bvh::*;

static TRIANGLES_NUM: usize = 4096;

static CAM_POS: Vec3A = Vec3A::new(0.0, 0.0, -18.0);
static P0: Vec3A = Vec3A::new(-1.0, 1.0, -15.0);
static P1: Vec3A = Vec3A::new(1.0, 1.0, -15.0);
static P2: Vec3A = Vec3A::new(-1.0, -1.0, -15.0);

static RESOLUTION_X: i32 = 160;
static RESOLUTION_Y: i32 = 160;

fn random_triangles(count: usize) -> Vec<Triangle> {
    let mut rng = StdRng::seed_from_u64(0);
    iter::repeat(0)
        .take(count)
        .enumerate()
        .map(|(id, _)| {
            let tri: Triangle = rng.gen();
            let offset = rng.gen::<Vec3A>() * 9.0 - Vec3A::splat(5.5);
            Triangle {
                origin: tri.origin + offset,
                ..tri
            }
            .with_id(id as u32)
        })
        .collect()
}

/// One ray per pixel through the P0/P1/P2 image plane
fn camera_ray(x: i32, y: i32) -> Ray {
    let pixel_pos: Vec3A = P0
        + (P1 - P0) * (x as f32 / RESOLUTION_X as f32)
        + (P2 - P0) * (y as f32 / RESOLUTION_Y as f32);
    Ray::infinite_ray(CAM_POS, (pixel_pos - CAM_POS).normalize_or_zero())
}

fn build(c: &mut Criterion) {
    let triangles = random_triangles(TRIANGLES_NUM);

    let mut group = c.benchmark_group("build");
    group.throughput(Throughput::Elements(TRIANGLES_NUM as u64));
    group.bench_function("centroid_midpoint", |b| {
        b.iter(|| Bvh::build(black_box(triangles.clone())))
    });
    group.bench_function("median_sort", |b| {
        b.iter(|| {
            Bvh::build_with::<MedianSortStrategy>(
                black_box(triangles.clone()),
                BvhConfig::default(),
            )
        })
    });
    group.finish();
}

fn nearest_hit(c: &mut Criterion) {
    let triangles = random_triangles(TRIANGLES_NUM);
    let ordered = Bvh::build(triangles.clone()).unwrap();
    let naive = Bvh::build_with::<CentroidMidpointStrategy>(
        triangles,
        BvhConfig::default().with_traversal(TraversalOrder::Naive),
    )
    .unwrap();

    let mut group = c.benchmark_group("nearest_hit");
    group.throughput(Throughput::Elements((RESOLUTION_X * RESOLUTION_Y) as u64));

    for (name, bvh) in [("ordered", &ordered), ("naive", &naive)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                for y in 0..RESOLUTION_Y {
                    for x in 0..RESOLUTION_X {
                        black_box(bvh.nearest_hit(&camera_ray(x, y)));
                    }
                }
            })
        });
    }

    group.bench_function("ordered_multithread", |b| {
        b.iter(|| {
            (0..RESOLUTION_Y).into_par_iter().for_each(|y| {
                for x in 0..RESOLUTION_X {
                    black_box(ordered.nearest_hit(&camera_ray(x, y)));
                }
            });
        })
    });

    group.finish();
}

fn occlusion(c: &mut Criterion) {
    let bvh = Bvh::build(random_triangles(TRIANGLES_NUM)).unwrap();

    let mut rng = StdRng::seed_from_u64(1);
    let hemisphere = UniformHemisphere::new(Vec3A::Z);
    let rays: Vec<Ray> = iter::repeat(0)
        .take(1024)
        .map(|_| {
            let dir: Vec3A = rng.sample(hemisphere);
            Ray::infinite_ray(Vec3A::ZERO, dir)
        })
        .collect();

    let mut group = c.benchmark_group("occlusion");
    group.throughput(Throughput::Elements(rays.len() as u64));
    group.bench_function("bvh", |b| {
        b.iter(|| rays.iter().filter(|ray| bvh.is_occluded(ray)).count())
    });
    group.bench_function("linear_scan", |b| {
        b.iter(|| {
            rays.iter()
                .filter(|ray| linear_is_occluded(bvh.triangles(), ray))
                .count()
        })
    });
    group.finish();
}

criterion_group!(benches, build, nearest_hit, occlusion);
criterion_main!(benches);
