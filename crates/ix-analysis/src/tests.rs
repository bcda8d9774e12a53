//! Unit tests for ix-analysis.

#[cfg(test)]
mod saturation_tests {
    use ix_model::{IntersectionModel, Phase, presets};

    use crate::saturation::saturation;
    use crate::{AnalysisError, Saturation, SaturationEstimator};

    #[test]
    fn nominal_plus_layout() {
        // 1800 veh/h × 30/60 = 900 veh/h capacity per arm.
        let sats = SaturationEstimator::default()
            .estimate(&presets::plus(4), &[450.0; 4])
            .unwrap();
        for s in sats {
            assert!((s.ratio() - 0.5).abs() < 1e-12);
            assert!(!s.is_oversaturated());
        }
    }

    #[test]
    fn zero_green_is_unserved_and_reads_as_zero() {
        let model = IntersectionModel::new(2, vec![Phase::new("only-0", 40, [0])]);
        let sats = SaturationEstimator::default().estimate(&model, &[600.0, 600.0]).unwrap();
        assert_eq!(sats[1], Saturation::Unserved);
        assert_eq!(sats[1].ratio(), 0.0);
        assert!(sats[1].is_unserved());
        assert!(!sats[1].is_oversaturated());
        assert!(matches!(sats[0], Saturation::Ratio(_)));
    }

    #[test]
    fn zero_cycle_and_zero_flow_are_unserved() {
        assert_eq!(saturation(500.0, 0, 0, 1_800.0), Saturation::Unserved);
        assert_eq!(saturation(500.0, 30, 60, 0.0), Saturation::Unserved);
    }

    #[test]
    fn increases_strictly_with_demand() {
        let demands = [0.0, 100.0, 400.0, 900.0, 1_500.0];
        let ratios: Vec<f64> = demands.iter().map(|&d| saturation(d, 30, 60, 1_800.0).ratio()).collect();
        assert!(ratios.windows(2).all(|w| w[0] < w[1]), "{ratios:?}");
    }

    #[test]
    fn decreases_strictly_with_green() {
        let ratios: Vec<f64> = [5, 15, 30, 45, 60]
            .iter()
            .map(|&g| saturation(600.0, g, 60, 1_800.0).ratio())
            .collect();
        assert!(ratios.windows(2).all(|w| w[0] > w[1]), "{ratios:?}");
    }

    #[test]
    fn oversaturation_threshold() {
        assert!(saturation(900.0, 30, 60, 1_800.0).is_oversaturated());
        assert!(!saturation(899.0, 30, 60, 1_800.0).is_oversaturated());
    }

    #[test]
    fn per_arm_flow() {
        let est = SaturationEstimator::per_arm(vec![1_800.0, 900.0, 1_800.0]);
        let sats = est.estimate(&presets::tee(), &[350.0, 350.0, 250.0]).unwrap();
        // Arm 1: 900 × 35/60 = 525.
        assert!((sats[1].ratio() - 350.0 / 525.0).abs() < 1e-12);
        // Arm 2: 1800 × 25/60 = 750.
        assert!((sats[2].ratio() - 250.0 / 750.0).abs() < 1e-12);
    }

    #[test]
    fn length_mismatches_error() {
        let m = presets::tee();
        assert_eq!(
            SaturationEstimator::default().estimate(&m, &[1.0, 2.0]),
            Err(AnalysisError::ArmCountMismatch { expected: 3, got: 2, what: "demand rates" })
        );
        assert_eq!(
            SaturationEstimator::per_arm(vec![1_800.0]).estimate(&m, &[1.0, 2.0, 3.0]),
            Err(AnalysisError::ArmCountMismatch { expected: 3, got: 1, what: "max flow rates" })
        );
    }
}

#[cfg(test)]
mod stats_tests {
    use ix_core::{ArmId, ArrivalSampling, RunConfig, Tick};
    use ix_model::presets;
    use ix_sim::sweep::replicate;
    use ix_sim::{ArmMetrics, RunReport};

    use crate::{ReportStats, SummaryStats, across_runs};

    fn arm(i: u32, mean_delay: f64, max_queue: usize, served: u64) -> ArmMetrics {
        ArmMetrics {
            arm:             ArmId(i),
            mean_delay_secs: mean_delay,
            max_delay_secs:  0,
            max_queue,
            served,
            arrivals:        served,
            remaining_queue: 0,
        }
    }

    fn report(arms: Vec<ArmMetrics>) -> RunReport {
        RunReport { arms, elapsed: Tick(60), passes_completed: 1, sampling: ArrivalSampling::PerTick }
    }

    #[test]
    fn summary_of_known_values() {
        let s = SummaryStats::from_values([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(s.count, 8);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
        // Sample variance = 32 / 7.
        assert!((s.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_value_has_zero_spread() {
        let s = SummaryStats::from_values([3.5]).unwrap();
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.min, s.max);
    }

    #[test]
    fn empty_is_none() {
        assert!(SummaryStats::from_values(Vec::<f64>::new()).is_none());
        assert!(ReportStats::from_report(&report(vec![])).is_none());
    }

    #[test]
    fn report_columns() {
        let r = report(vec![arm(0, 10.0, 3, 100), arm(1, 20.0, 5, 50)]);
        let s = ReportStats::from_report(&r).unwrap();
        assert_eq!(s.mean_delay.mean, 15.0);
        assert_eq!(s.max_queue.max, 5.0);
        assert_eq!(s.served.min, 50.0);
    }

    #[test]
    fn across_runs_per_arm() {
        let runs = vec![
            report(vec![arm(0, 10.0, 1, 1), arm(1, 30.0, 1, 1)]),
            report(vec![arm(0, 20.0, 1, 1), arm(1, 50.0, 1, 1)]),
        ];
        let stats = across_runs(&runs, |a| a.mean_delay_secs);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].mean, 15.0);
        assert_eq!(stats[1].mean, 40.0);
        assert!(across_runs(&[], |a| a.served as f64).is_empty());
    }

    #[test]
    fn replicated_nominal_delay_is_stable() {
        let config = RunConfig::uniform(4, 400.0, 1_800).with_sampling(ArrivalSampling::PerTick);
        let reports: Vec<RunReport> = replicate(&presets::plus(4), &config, 8, 2024)
            .into_iter()
            .map(Result::unwrap)
            .collect();
        for s in across_runs(&reports, |a| a.mean_delay_secs) {
            assert_eq!(s.count, 8);
            assert!(s.mean > 2.0 && s.mean < 60.0, "mean delay {}", s.mean);
            assert!(s.std_dev < s.mean, "spread {} vs mean {}", s.std_dev, s.mean);
        }
    }
}
