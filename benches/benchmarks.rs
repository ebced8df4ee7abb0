use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use linstat::{
    EigenConfig, EigenDecomposer, GaussEliminationSolver, LassoRegression, LinearRegression,
    Matrix, MatrixKind, PrincipalComponentAnalysis, ValueTable, Vector,
};

fn diagonally_dominant(n: usize, seed: u64) -> Matrix<f64> {
    let mut m: Matrix<f64> = Matrix::random(n, n, seed);
    m.add_diagonal(n as f64);
    m
}

fn regression_data(n: usize, k: usize) -> (Vector<f64>, ValueTable<f64>) {
    let x: Matrix<f64> = Matrix::random(n, k, 7);
    let truth: Vector<f64> = (0..k).map(|j| (j as f64) - 1.5).collect();
    let noise: Vector<f64> = Vector::random(n, 8);
    let y = &(&x * &truth) + &(&noise * 0.1);
    (y, ValueTable::from_matrix(&x))
}

fn bench_gauss_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("gauss_solver");

    for n in [8, 32, 128].iter() {
        let a = diagonally_dominant(*n, 1);
        let b: Vector<f64> = Vector::random(*n, 2);

        group.bench_with_input(BenchmarkId::from_parameter(n), n, |bench, _| {
            let mut solver = GaussEliminationSolver::new();
            bench.iter(|| {
                let _ = black_box(solver.solve(black_box(&a), black_box(&b)));
            });
        });
    }

    group.finish();
}

fn bench_inversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_inversion");

    for n in [8, 32, 128].iter() {
        let a = diagonally_dominant(*n, 3);
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |bench, _| {
            bench.iter(|| black_box(black_box(&a).inverted()));
        });
    }

    group.finish();
}

fn bench_eigen_symmetric(c: &mut Criterion) {
    let mut group = c.benchmark_group("eigen_symmetric");

    for n in [4, 16, 64].iter() {
        let a: Matrix<f64> = Matrix::random(*n, *n, 4);
        let m = &a + &a.transposed();

        group.bench_with_input(BenchmarkId::from_parameter(n), n, |bench, _| {
            bench.iter(|| {
                black_box(EigenDecomposer::with_config(
                    black_box(&m),
                    MatrixKind::Symmetric,
                    EigenConfig::default(),
                ))
            });
        });
    }

    group.finish();
}

fn bench_eigen_asymmetric(c: &mut Criterion) {
    let mut group = c.benchmark_group("eigen_asymmetric");

    for n in [4, 16, 64].iter() {
        let m: Matrix<f64> = Matrix::random(*n, *n, 5);

        group.bench_with_input(BenchmarkId::from_parameter(n), n, |bench, _| {
            bench.iter(|| {
                black_box(EigenDecomposer::with_config(
                    black_box(&m),
                    MatrixKind::Asymmetric,
                    EigenConfig::default(),
                ))
            });
        });
    }

    group.finish();
}

fn bench_regression(c: &mut Criterion) {
    let mut group = c.benchmark_group("regression");

    for n in [100, 1000].iter() {
        let (y, table) = regression_data(*n, 4);
        group.throughput(Throughput::Elements(*n as u64));

        group.bench_with_input(BenchmarkId::new("ols", n), n, |bench, _| {
            let mut model = LinearRegression::new();
            bench.iter(|| black_box(model.fit(black_box(&y), black_box(&table))));
        });

        group.bench_with_input(BenchmarkId::new("lasso", n), n, |bench, _| {
            let mut model = LassoRegression::new();
            model.set_complexity(0.01);
            bench.iter(|| black_box(model.fit(black_box(&y), black_box(&table))));
        });
    }

    group.finish();
}

fn bench_pca(c: &mut Criterion) {
    let mut group = c.benchmark_group("pca_fit");

    for (n, p) in [(200, 4), (1000, 16)].iter() {
        let data: Matrix<f64> = Matrix::random(*n, *p, 6);
        group.throughput(Throughput::Elements((*n * *p) as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", n, p)),
            &data,
            |bench, data| {
                let mut pca = PrincipalComponentAnalysis::new(0);
                bench.iter(|| black_box(pca.fit(black_box(data))));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_gauss_solver,
    bench_inversion,
    bench_eigen_symmetric,
    bench_eigen_asymmetric,
    bench_regression,
    bench_pca
);
criterion_main!(benches);
