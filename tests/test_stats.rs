use treedist::DistError;
use treedist::distance::tree_to_matrix;
use treedist::newick::parse_str;
use treedist::stats::{
    MAD_MULTIPLIER, NominalSizeWarning, Spread, StatConfig, summarize, tree_statistics,
};

const EPSILON: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

// --- TESTS SUMMARIZE ---
#[test]
fn test_mean_and_sd() {
    let summary = summarize(&[1.0, 2.0, 3.0], &StatConfig::new()).unwrap();
    assert_eq!(summary.centre, 2.0);
    assert_eq!(summary.spread, Spread::StandardDeviation(1.0));
    assert_eq!(summary.count, 3);
    assert_eq!(summary.nominal_size_warning, None);
}

#[test]
fn test_median_and_mad() {
    let config = StatConfig::new().with_median();
    let summary = summarize(&[1.0, 2.0, 3.0, 100.0], &config).unwrap();
    assert_eq!(summary.centre, 2.5);

    // Deviations 1.5, 0.5, 0.5, 97.5 have median 1.0
    let Spread::MedianAbsoluteDeviation(mad) = summary.spread else {
        panic!("expected MAD, got {:?}", summary.spread);
    };
    assert_close(mad, MAD_MULTIPLIER);
    assert_eq!(format!("{mad:.4}"), "1.4826");
}

#[test]
fn test_median_of_odd_list() {
    let config = StatConfig::new().with_median();
    let summary = summarize(&[10.0, 1.0, 4.0, 2.0, 3.0], &config).unwrap();
    assert_eq!(summary.centre, 3.0);
    // Deviations 7, 2, 1, 1, 0
    assert_close(summary.spread.value(), MAD_MULTIPLIER);
}

#[test]
fn test_nominal_size_adjusts_mean() {
    let config = StatConfig::new().with_nominal_n(6).unwrap();
    let summary = summarize(&[1.0, 2.0, 3.0], &config).unwrap();
    assert_eq!(summary.centre, 2.0);
    assert_eq!(summary.spread, Spread::AdjustedMean(1.0));
    assert_eq!(summary.nominal_size_warning, None);

    // Equal to the count is no reason to warn
    let config = StatConfig::new().with_nominal_n(3).unwrap();
    let summary = summarize(&[1.0, 2.0, 3.0], &config).unwrap();
    assert_eq!(summary.spread, Spread::AdjustedMean(2.0));
    assert_eq!(summary.nominal_size_warning, None);
}

#[test]
fn test_nominal_size_below_count_warns() {
    let config = StatConfig::new().with_nominal_n(2).unwrap();
    let summary = summarize(&[1.0, 2.0, 3.0], &config).unwrap();
    assert_eq!(summary.spread, Spread::AdjustedMean(2.0));
    assert_eq!(
        summary.nominal_size_warning,
        Some(NominalSizeWarning {
            nominal: 2,
            observed: 3
        })
    );
}

#[test]
fn test_median_ignores_nominal_size() {
    let config = StatConfig::new().with_median().with_nominal_n(1).unwrap();
    let summary = summarize(&[1.0, 2.0, 3.0], &config).unwrap();
    assert_eq!(summary.centre, 2.0);
    assert_eq!(summary.nominal_size_warning, None);
}

#[test]
fn test_empty_sample() {
    for config in [StatConfig::new(), StatConfig::new().with_median()] {
        let err = summarize(&[], &config).unwrap_err();
        assert!(matches!(err, DistError::EmptySample { found: 0, .. }));
    }
}

#[test]
fn test_single_value() {
    // No sample standard deviation of a single value
    let err = summarize(&[4.0], &StatConfig::new()).unwrap_err();
    assert!(matches!(
        err,
        DistError::EmptySample {
            required: 2,
            found: 1,
            ..
        }
    ));

    let config = StatConfig::new().with_nominal_n(4).unwrap();
    let summary = summarize(&[4.0], &config).unwrap();
    assert_eq!(summary.spread, Spread::AdjustedMean(1.0));
}

#[test]
fn test_zero_is_not_a_size() {
    assert!(matches!(
        StatConfig::new().with_nominal_n(0),
        Err(DistError::InvalidArgument { .. })
    ));
    assert!(StatConfig::new().with_misl(0).is_err());
}

// --- TESTS TREE STATISTICS ---
const STAR: &str = "(A:1.0,B:2.0,C:3.0);";

#[test]
fn test_per_leaf_statistics() {
    let tree = parse_str(STAR).unwrap();
    let matrix = tree_to_matrix(&tree, false).unwrap();
    let stats = tree_statistics(&matrix, &tree, &StatConfig::new()).unwrap();

    let labels: Vec<_> = stats.leaves.iter().map(|leaf| leaf.label.as_str()).collect();
    assert_eq!(labels, ["A", "B", "C"]);
    let centres: Vec<_> = stats.leaves.iter().map(|leaf| leaf.summary.centre).collect();
    assert_eq!(centres, [3.5, 4.0, 4.5]);
    assert_close(stats.leaves[0].summary.spread.value(), 0.5_f64.sqrt());
    assert_close(stats.leaves[1].summary.spread.value(), 2.0_f64.sqrt());
}

#[test]
fn test_aggregate_mean() {
    let tree = parse_str(STAR).unwrap();
    let matrix = tree_to_matrix(&tree, false).unwrap();

    let stats = tree_statistics(&matrix, &tree, &StatConfig::new()).unwrap();
    assert_eq!(stats.n, 3);
    assert_eq!(stats.nominal_n, 3);
    assert_eq!(stats.centre, 4.0);
    // Without nominal size the mean is reported again, not the SD
    assert_eq!(stats.adjusted, 4.0);
    assert_eq!(stats.per_site100, 4.0);

    let config = StatConfig::new().with_misl(200).unwrap();
    let stats = tree_statistics(&matrix, &tree, &config).unwrap();
    assert_close(stats.per_site100, 2.0);
}

#[test]
fn test_aggregate_with_nominal_size_and_misl() {
    let tree = parse_str(STAR).unwrap();
    let matrix = tree_to_matrix(&tree, false).unwrap();
    let config = StatConfig::new()
        .with_nominal_n(6)
        .unwrap()
        .with_misl(200)
        .unwrap();

    let stats = tree_statistics(&matrix, &tree, &config).unwrap();
    assert_eq!(stats.nominal_n, 6);
    assert_eq!(stats.centre, 4.0);
    assert_close(stats.adjusted, 2.0);
    assert_close(stats.per_site100, 1.0);
}

#[test]
fn test_aggregate_median() {
    let tree = parse_str(STAR).unwrap();
    let matrix = tree_to_matrix(&tree, false).unwrap();
    let config = StatConfig::new().with_median().with_misl(400).unwrap();

    let stats = tree_statistics(&matrix, &tree, &config).unwrap();
    assert!(stats.median);
    assert_eq!(stats.centre, 4.0);
    assert_close(stats.adjusted, 0.5 * MAD_MULTIPLIER);
    // Per site is based on the median, not the MAD
    assert_close(stats.per_site100, 1.0);
}

#[test]
fn test_branches_do_not_change_statistics() {
    let tree = parse_str("((A:1,B:2):0.5,(C:3,D:1.5):1,E:2);").unwrap();
    let config = StatConfig::new();
    let with_branches = tree_to_matrix(&tree, true).unwrap();
    let without = tree_to_matrix(&tree, false).unwrap();

    assert_eq!(
        tree_statistics(&with_branches, &tree, &config).unwrap(),
        tree_statistics(&without, &tree, &config).unwrap()
    );
}

#[test]
fn test_two_leaves_need_nominal_size_for_mean() {
    let tree = parse_str("(A:1,B:2);").unwrap();
    let matrix = tree_to_matrix(&tree, false).unwrap();
    assert!(matches!(
        tree_statistics(&matrix, &tree, &StatConfig::new()),
        Err(DistError::EmptySample { .. })
    ));

    let config = StatConfig::new().with_nominal_n(2).unwrap();
    let stats = tree_statistics(&matrix, &tree, &config).unwrap();
    assert_eq!(stats.centre, 3.0);
    assert_eq!(stats.adjusted, 3.0);
}
