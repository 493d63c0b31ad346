//! Integration tests for NHPP generation by thinning

use proptest::prelude::*;
use stochastic_sim_core::arrivals::{
    homogeneous_by_gaps, homogeneous_by_order_stats, GaussianPeak, IntensityProfile,
    PiecewiseConstant, ThinningGenerator,
};
use stochastic_sim_core::estimation::SummaryStats;
use stochastic_sim_core::{derive_seed, generate_nhpp, Intensity, RngManager, SimulationError};

#[test]
fn test_constant_intensity_reference_values() {
    let generator = ThinningGenerator::new(24.0).unwrap();
    let constant = IntensityProfile::Constant { rate: 50.0 };

    let outcomes: Vec<_> = (0..20)
        .map(|i| {
            generator
                .generate(&constant, &mut RngManager::new(derive_seed(50, i)))
                .unwrap()
        })
        .collect();

    for outcome in &outcomes {
        assert!((outcome.lambda_max - 55.0).abs() < 1e-9);
    }

    let counts: Vec<f64> = outcomes.iter().map(|o| o.times.len() as f64).collect();
    let ratios: Vec<f64> = outcomes.iter().map(|o| o.acceptance_ratio()).collect();
    let count_stats = SummaryStats::from_slice(&counts);
    let ratio_stats = SummaryStats::from_slice(&ratios);

    assert!((count_stats.mean - 1200.0).abs() < 30.0, "mean count {}", count_stats.mean);
    assert!((ratio_stats.mean - 1.0 / 1.1).abs() < 0.01, "ratio {}", ratio_stats.mean);
}

#[test]
fn test_constant_count_variance_matches_mean() {
    // Poisson counts: variance ≈ mean ≈ c · h = 200
    let constant = IntensityProfile::Constant { rate: 20.0 };
    let counts: Vec<f64> = (0..400)
        .map(|i| {
            generate_nhpp(&constant, 10.0, &mut RngManager::new(derive_seed(77, i)))
                .unwrap()
                .len() as f64
        })
        .collect();

    let stats = SummaryStats::from_slice(&counts);
    assert!((stats.mean - 200.0).abs() < 5.0, "mean {}", stats.mean);
    assert!(
        stats.sample_variance() > 150.0 && stats.sample_variance() < 260.0,
        "variance {}",
        stats.sample_variance()
    );
}

#[test]
fn test_festival_count_tracks_integral() {
    let festival = IntensityProfile::festival_day();
    let counts: Vec<f64> = (0..20)
        .map(|i| {
            generate_nhpp(&festival, 24.0, &mut RngManager::new(derive_seed(9, i)))
                .unwrap()
                .len() as f64
        })
        .collect();
    let mean = SummaryStats::from_slice(&counts).mean;

    let h = 24.0 / 10_000.0;
    let integral: f64 = (0..10_000)
        .map(|k| festival.rate((k as f64 + 0.5) * h) * h)
        .sum();

    assert!((mean - integral).abs() < 0.03 * integral, "{} vs {}", mean, integral);
}

#[test]
fn test_arrivals_concentrate_under_peak() {
    let profile = IntensityProfile::GaussianPeaks {
        base: 1.0,
        peaks: vec![GaussianPeak {
            amplitude: 500.0,
            center: 12.0,
            width: 0.5,
        }],
    };
    let times = generate_nhpp(&profile, 24.0, &mut RngManager::new(3)).unwrap();

    let near_peak = times.iter().filter(|t| (10.5..13.5).contains(*t)).count();
    assert!(near_peak as f64 > 0.9 * times.len() as f64);
}

#[test]
fn test_zero_intensity_yields_no_arrivals() {
    let outcome = ThinningGenerator::new(10.0)
        .unwrap()
        .generate(&|_t: f64| 0.0, &mut RngManager::new(1))
        .unwrap();

    assert!(outcome.times.is_empty());
    assert_eq!(outcome.candidate_count, 0);
    assert_eq!(outcome.acceptance_ratio(), 0.0);
}

#[test]
fn test_negative_intensity_fails_fast() {
    let dips = |t: f64| 10.0 - t;
    let mut rng = RngManager::new(1);
    let before = rng.get_state();

    let err = generate_nhpp(&dips, 20.0, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::InvalidParameter { name: "intensity", .. }
    ));
    assert_eq!(rng.get_state(), before);
}

#[test]
fn test_nan_intensity_rejected() {
    let err = generate_nhpp(&|_t: f64| f64::NAN, 5.0, &mut RngManager::new(1)).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::InvalidParameter { name: "intensity", .. }
    ));
}

#[test]
fn test_non_positive_horizon_rejected() {
    let constant = IntensityProfile::Constant { rate: 1.0 };
    for horizon in [0.0, -3.0, f64::NAN] {
        assert!(matches!(
            generate_nhpp(&constant, horizon, &mut RngManager::new(1)),
            Err(SimulationError::InvalidParameter { name: "horizon", .. })
        ));
    }
}

#[test]
fn test_piecewise_profile_generates_per_bin() {
    let steps = PiecewiseConstant::new(6.0, vec![0.0, 100.0, 0.0, 0.0]).unwrap();
    let times = generate_nhpp(&steps, 24.0, &mut RngManager::new(12)).unwrap();

    assert!(!times.is_empty());
    assert!(times.iter().all(|t| (6.0..12.0).contains(t)));
}

#[test]
fn test_generator_builders_validate() {
    let generator = ThinningGenerator::new(1.0).unwrap();
    assert!(generator.clone().with_grid_points(1).is_err());
    assert!(generator.clone().with_safety_factor(0.9).is_err());

    let custom = generator.with_grid_points(11).unwrap().with_safety_factor(2.0).unwrap();
    let bound = custom.bound(&|t: f64| 1.0 + t).unwrap();
    assert!((bound - 4.0).abs() < 1e-12);
}

#[test]
fn test_homogeneous_constructions_agree_in_mean() {
    let mean_count = |f: fn(f64, f64, &mut RngManager) -> Result<Vec<f64>, SimulationError>| {
        let counts: Vec<f64> = (0..200)
            .map(|i| f(4.0, 25.0, &mut RngManager::new(derive_seed(5, i))).unwrap().len() as f64)
            .collect();
        SummaryStats::from_slice(&counts).mean
    };

    assert!((mean_count(homogeneous_by_gaps) - 100.0).abs() < 3.0);
    assert!((mean_count(homogeneous_by_order_stats) - 100.0).abs() < 3.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn output_sorted_and_inside_horizon(
        base in 0.0f64..20.0,
        amplitude in 0.0f64..200.0,
        center in 0.0f64..24.0,
        width in 0.1f64..5.0,
        horizon in 0.5f64..48.0,
        seed in any::<u64>(),
    ) {
        let profile = IntensityProfile::GaussianPeaks {
            base,
            peaks: vec![GaussianPeak { amplitude, center, width }],
        };
        let times = generate_nhpp(&profile, horizon, &mut RngManager::new(seed)).unwrap();

        prop_assert!(times.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(times.iter().all(|t| *t >= 0.0 && *t < horizon));
    }

    #[test]
    fn accepted_never_exceed_candidates(rate in 0.1f64..100.0, seed in any::<u64>()) {
        let outcome = ThinningGenerator::new(5.0)
            .unwrap()
            .generate(&IntensityProfile::Constant { rate }, &mut RngManager::new(seed))
            .unwrap();

        prop_assert!(outcome.times.len() <= outcome.candidate_count);
        prop_assert!(outcome.acceptance_ratio() <= 1.0);
    }
}
