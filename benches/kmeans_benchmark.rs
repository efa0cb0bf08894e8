use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lloyd_kmeans::{euclidean, KMeans, KMeansConfig};
use ndarray::{s, Array1, Array2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use std::time::Duration;

fn fitted_model(data: &Array2<f64>, k: usize, max_iters: usize) -> KMeans {
    let initial = data.slice(s![..k, ..]).to_owned();
    let config = KMeansConfig::new(k).with_max_iters(max_iters).with_tol(0.0);
    let mut kmeans = KMeans::with_config(config);
    kmeans.fit(&data.view(), &initial.view()).unwrap();
    kmeans
}

fn benchmark_euclidean(c: &mut Criterion) {
    let mut group = c.benchmark_group("euclidean");

    for dim in [2usize, 128, 1024].iter() {
        group.throughput(Throughput::Elements(*dim as u64));
        group.bench_with_input(BenchmarkId::from_parameter(dim), dim, |b, &dim| {
            let a = Array1::random(dim, Uniform::new(-1.0, 1.0));
            let other = Array1::random(dim, Uniform::new(-1.0, 1.0));
            b.iter(|| euclidean(black_box(&a.view()), black_box(&other.view())));
        });
    }
    group.finish();
}

fn benchmark_kmeans_varying_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_samples");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_features = 32;
    let k = 20;

    for n_samples in [1_000, 5_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*n_samples as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_samples),
            n_samples,
            |b, &n_samples| {
                let data = Array2::random((n_samples, n_features), Uniform::new(-1.0, 1.0));
                b.iter(|| fitted_model(black_box(&data), k, 5));
            },
        );
    }
    group.finish();
}

fn benchmark_kmeans_varying_clusters(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_clusters");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_samples = 5_000;
    let n_features = 32;

    for k in [5, 20, 50].iter() {
        group.throughput(Throughput::Elements(*k as u64));
        group.bench_with_input(BenchmarkId::from_parameter(k), k, |b, &k| {
            let data = Array2::random((n_samples, n_features), Uniform::new(-1.0, 1.0));
            b.iter(|| fitted_model(black_box(&data), k, 5));
        });
    }
    group.finish();
}

fn benchmark_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_predict");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let train_data = Array2::random((5_000, 32), Uniform::new(-1.0, 1.0));
    let kmeans = fitted_model(&train_data, 20, 10);

    for n_predict in [1_000, 5_000].iter() {
        group.throughput(Throughput::Elements(*n_predict as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_predict),
            n_predict,
            |b, &n_predict| {
                let test_data = Array2::random((n_predict, 32), Uniform::new(-1.0, 1.0));
                b.iter(|| kmeans.predict(black_box(&test_data.view())).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_euclidean,
    benchmark_kmeans_varying_samples,
    benchmark_kmeans_varying_clusters,
    benchmark_predict,
);

criterion_main!(benches);
