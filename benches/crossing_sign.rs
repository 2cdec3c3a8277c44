use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sgeometry::data::Point;
use sgeometry::{crossing_sign, sign, Crossing, EdgeCrosser};

pub fn crossing_benchmark(c: &mut Criterion) {
  let mut rng = SmallRng::seed_from_u64(0x1dea);
  let points: Vec<Point> = (0..1024).map(|_| rng.gen()).collect();

  c.bench_function("sign", |b| {
    b.iter(|| {
      let mut acc = 0;
      for chunk in points.chunks_exact(3) {
        acc += sign(black_box(&chunk[0]), black_box(&chunk[1]), black_box(&chunk[2]));
      }
      acc
    })
  });

  c.bench_function("crossing_sign", |b| {
    b.iter(|| {
      let mut crossings = 0;
      for chunk in points.chunks_exact(4) {
        if crossing_sign(&chunk[0], &chunk[1], &chunk[2], &chunk[3]) == Crossing::DoesCross {
          crossings += 1;
        }
      }
      crossings
    })
  });

  c.bench_function("edge_crosser_chain", |b| {
    b.iter(|| {
      let mut crossings = 0;
      let mut crosser = EdgeCrosser::new_chain(&points[0], &points[1], &points[2]);
      for d in &points[3..] {
        if crosser.chain_crossing_sign(d) == Crossing::DoesCross {
          crossings += 1;
        }
      }
      crossings
    })
  });
}

criterion_group!(benches, crossing_benchmark);
criterion_main!(benches);
