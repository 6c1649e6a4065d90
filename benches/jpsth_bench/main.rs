use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, SeedableRng};
use jpsth::{
    analysis::JointPeriStimulusTimeHistogram,
    normalization::Normalization,
    psth::build_psth_with,
    settings::{AnalysisSettings, ScanStrategy},
    spike_train::poisson_spike_train,
    window::WindowSpec,
};


fn trains(trials: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(42);
    let reference: Vec<f64> = (1..=trials).map(|i| i as f64).collect();
    let duration = trials as f64 + 1.;

    let select = poisson_spike_train(30., duration, &mut rng).expect("Could not generate select train");
    let bottom = poisson_spike_train(40., duration, &mut rng).expect("Could not generate bottom train");

    (reference, select, bottom)
}

fn bench_psth_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("psth");
    let window = WindowSpec::default();

    for trials in [100, 1000].iter() {
        let (reference, select, _) = trains(*trials);
        group.throughput(Throughput::Elements(*trials as u64));

        for (name, strategy, parallel) in [
            ("forward_cursor", ScanStrategy::ForwardCursor, false),
            ("binary_search", ScanStrategy::BinarySearch, false),
            ("binary_search_par", ScanStrategy::BinarySearch, true),
        ] {
            let settings = AnalysisSettings { strategy, parallel, ..Default::default() };

            group.bench_with_input(
                BenchmarkId::new(name, trials),
                trials,
                |b, _| {
                    b.iter(|| {
                        build_psth_with(black_box(&reference), black_box(&select), &window, &settings)
                            .expect("Could not build psth")
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_normalizations(c: &mut Criterion) {
    let mut group = c.benchmark_group("jpsth");
    let window = WindowSpec::default();
    let (reference, select, bottom) = trains(500);

    for parallel in [false, true] {
        let settings = AnalysisSettings { parallel, ..Default::default() };
        let jpsth = JointPeriStimulusTimeHistogram::with_settings(&reference, &select, &bottom, &window, settings.clone())
            .expect("Could not build jpsth");

        group.bench_function(BenchmarkId::new("build", parallel), |b| {
            b.iter(|| {
                JointPeriStimulusTimeHistogram::with_settings(
                    black_box(&reference), black_box(&select), black_box(&bottom), &window, settings.clone()
                ).expect("Could not build jpsth")
            });
        });

        for mode in [Normalization::Raw, Normalization::MeanSubtracted, Normalization::VarianceNormalized] {
            group.bench_function(BenchmarkId::new(format!("{}", mode), parallel), |b| {
                b.iter(|| jpsth.get_processed(black_box(mode)).expect("Could not process jpsth"));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_psth_strategies, bench_normalizations);
criterion_main!(benches);
