//! Aggregation of timing samples into bucket summaries.

use overhead_oracle::statistics::{summarize, z_score, Stats};
use overhead_oracle::{Error, Timing};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_xoshiro::Xoshiro256PlusPlus;

fn normal_samples(n: usize, seed: u64) -> Vec<Timing> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let wall = Normal::new(500e-6, 100e-6).unwrap();
    let user = Normal::new(300e-6, 50e-6).unwrap();
    let sys = Normal::new(100e-6, 20e-6).unwrap();
    (0..n)
        .map(|_| {
            Timing::new(
                wall.sample(&mut rng),
                user.sample(&mut rng),
                sys.sample(&mut rng),
            )
        })
        .collect()
}

#[test]
fn streaming_mean_matches_naive_mean() {
    let samples = normal_samples(10_000, 1);
    let stats = summarize(&samples);
    let n = samples.len() as f64;
    let naive_wall = samples.iter().map(|t| t.wall).sum::<f64>() / n;
    let naive_sys = samples.iter().map(|t| t.sys).sum::<f64>() / n;

    assert_eq!(stats.count(), 10_000);
    assert!((stats.mean().wall - naive_wall).abs() < 1e-12);
    assert!((stats.mean().sys - naive_sys).abs() < 1e-12);
    assert!((stats.mean().wall - 500e-6).abs() < 5e-6);
}

#[test]
fn streaming_variance_matches_two_pass() {
    let samples = normal_samples(2_000, 2);
    let walls: Vec<f64> = samples.iter().map(|t| t.wall).collect();
    let mean = walls.iter().sum::<f64>() / walls.len() as f64;
    let two_pass =
        walls.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (walls.len() - 1) as f64;

    let stats: Stats = walls.iter().copied().collect();
    let variance = stats.variance().unwrap();
    assert!((variance - two_pass).abs() / two_pass < 1e-9);
}

#[test]
fn interval_narrows_with_sample_size() {
    let small = summarize(&normal_samples(2_500, 3));
    let large = summarize(&normal_samples(10_000, 4));

    let (lo_s, hi_s) = small.normal_confidence_interval(0.95).unwrap();
    let (lo_l, hi_l) = large.normal_confidence_interval(0.95).unwrap();
    let ratio = (hi_s.wall - lo_s.wall) / (hi_l.wall - lo_l.wall);
    assert!((1.8..=2.2).contains(&ratio), "width ratio {ratio}");
}

#[test]
fn interval_is_mean_plus_minus_z_stderr() {
    let samples = normal_samples(1_000, 5);
    let stats = summarize(&samples);
    let (low, high) = stats.normal_confidence_interval(0.95).unwrap();
    let mean = stats.mean();
    let half = z_score(0.95) * stats.wall.std_err().unwrap();

    assert!((mean.wall - low.wall - half).abs() < 1e-15);
    assert!((high.wall - mean.wall - half).abs() < 1e-15);
    assert!(low.user < mean.user && mean.user < high.user);
}

#[test]
fn single_sample_has_no_interval() {
    let stats = summarize(&[Timing::new(1e-3, 0.0, 0.0)]);
    assert!(matches!(
        stats.normal_confidence_interval(0.95),
        Err(Error::InsufficientSamples {
            available: 1,
            required: 2
        })
    ));
}
