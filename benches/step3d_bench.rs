//! Benchmarks for the tracer step and its column solvers.
//!
//! Run with: `cargo bench --bench step3d_bench`
//!
//! With `--features parallel` the full step is also timed on the Rayon path.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use step3d_rs::grid::{Field2D, Field3D};
use step3d_rs::step3d::{
    Diffusivity, DiffusionScratch, SplineScratch, Step3dConfig, Step3dInputs, step3d_t,
    vertical_advection_column, vertical_diffusion_column,
};
use step3d_rs::types::GridExtents;
use step3d_rs::vertical::{SCoordinate, SongHaidvogelStretching};

#[cfg(feature = "parallel")]
use step3d_rs::step3d::step3d_t_parallel;

/// Owned fields of a shelf-sea test problem.
struct Problem {
    ext: GridExtents,
    rmask: Field2D,
    pm: Field2D,
    pn: Field2D,
    z_w: Field3D,
    akt: Field3D,
    u: Field3D,
    v: Field3D,
    told: Field3D,
}

impl Problem {
    fn new(nx_int: usize, ny_int: usize, n: usize) -> Self {
        let ext = GridExtents::with_interior(nx_int, ny_int, n);
        let (nx, ny, _) = ext.rho_shape();
        let h = Field2D::from_fn(nx, ny, |i, j| 50.0 + 2.0 * i as f64 + 1.0 * j as f64);
        let z_w = SCoordinate::new(n, 10.0, SongHaidvogelStretching::new(5.0, 0.4))
            .interface_depths(&h, None);

        Self {
            ext,
            rmask: Field2D::for_extents(&ext, 1.0),
            pm: Field2D::for_extents(&ext, 1.0 / 1000.0),
            pn: Field2D::for_extents(&ext, 1.0 / 1000.0),
            z_w,
            akt: Field3D::from_fn(nx, ny, n + 1, |_, _, k| 1.0e-4 + 1.0e-3 * (k % 3) as f64),
            u: Field3D::from_fn(nx, ny, n, |i, j, k| 0.3 * ((i + j) as f64 * 0.1 + k as f64 * 0.2).sin()),
            v: Field3D::from_fn(nx, ny, n, |i, j, k| 0.2 * ((i as f64 - j as f64) * 0.1 + k as f64 * 0.3).cos()),
            told: Field3D::from_fn(nx, ny, n, |i, j, k| 10.0 + 0.01 * (i + 2 * j) as f64 + 0.3 * k as f64),
        }
    }

    fn inputs(&self) -> Step3dInputs<'_> {
        Step3dInputs {
            extents: self.ext,
            rmask: &self.rmask,
            pm: &self.pm,
            pn: &self.pn,
            z_w: &self.z_w,
            akt: Diffusivity::Field(&self.akt),
            u: &self.u,
            v: &self.v,
            told: &self.told,
        }
    }
}

/// Benchmark the full step at different grid sizes.
fn bench_step_grid_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("step3d_grid_size");
    group.sample_size(20);

    let config = Step3dConfig::new(60.0);
    for (nx, ny, n) in [(32, 32, 20), (64, 64, 30), (128, 96, 40)] {
        let problem = Problem::new(nx, ny, n);
        let label = format!("{}x{}x{}", nx, ny, n);

        group.bench_with_input(BenchmarkId::new("serial", &label), &problem, |b, p| {
            b.iter(|| step3d_t(black_box(&config), black_box(&p.inputs())));
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", &label), &problem, |b, p| {
            b.iter(|| step3d_t_parallel(black_box(&config), black_box(&p.inputs())));
        });
    }

    group.finish();
}

/// Benchmark the per-column vertical stages.
fn bench_column_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_stages");

    for n in [10, 30, 60] {
        let hz: Vec<f64> = (0..n).map(|k| 1.0 + 0.1 * k as f64).collect();
        let hz_inv: Vec<f64> = hz.iter().map(|h| 1.0 / h).collect();
        let told: Vec<f64> = (0..n).map(|k| 5.0 + 0.2 * k as f64).collect();
        let w: Vec<f64> = (0..=n)
            .map(|k| if k == 0 || k == n { 0.0 } else { 0.5 })
            .collect();
        let akt = vec![1.0e-3; n + 1];

        let mut spline = SplineScratch::new(n);
        group.bench_with_input(BenchmarkId::new("vertical_advection", n), &n, |b, _| {
            let mut t = told.clone();
            b.iter(|| {
                vertical_advection_column(
                    60.0,
                    1.0e-6,
                    black_box(&hz),
                    black_box(&told),
                    black_box(&w),
                    &mut t,
                    &mut spline,
                )
            });
        });

        let mut diffusion = DiffusionScratch::new(n);
        group.bench_with_input(BenchmarkId::new("vertical_diffusion", n), &n, |b, _| {
            let mut t = told.clone();
            b.iter(|| {
                vertical_diffusion_column(
                    60.0,
                    black_box(&hz),
                    black_box(&hz_inv),
                    black_box(&akt),
                    &mut t,
                    &mut diffusion,
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step_grid_size, bench_column_stages);
criterion_main!(benches);
