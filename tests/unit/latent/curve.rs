use super::*;

fn straight_line() -> CubicCurve {
    CubicCurve::new(
        vec![0.0, 0.0],
        vec![1.0, 0.0],
        vec![9.0, 0.0],
        vec![10.0, 0.0],
    )
    .unwrap()
}

#[test]
fn eval_hits_endpoints() {
    let c = CubicCurve::new(
        vec![1.0, 2.0, 3.0],
        vec![4.0, -1.0, 0.0],
        vec![0.0, 5.0, 2.0],
        vec![-2.0, 0.5, 1.0],
    )
    .unwrap();
    assert_eq!(c.eval(0.0), vec![1.0, 2.0, 3.0]);
    assert_eq!(c.eval(1.0), vec![-2.0, 0.5, 1.0]);
}

#[test]
fn mismatched_dimensions_are_rejected() {
    assert!(CubicCurve::new(vec![0.0], vec![0.0, 1.0], vec![0.0], vec![0.0]).is_err());
}

#[test]
fn arc_length_samples_are_evenly_spaced() {
    // Control points bunch parameter speed near the middle; arc-length sampling must undo it.
    let pts = straight_line().sample_by_arc_length(5);
    assert_eq!(pts.len(), 5);
    for (i, p) in pts.iter().enumerate() {
        let expected = 2.5 * i as f64;
        assert!((p[0] - expected).abs() < 0.05, "{i}: {p:?}");
        assert_eq!(p[1], 0.0);
    }
}

#[test]
fn total_length_of_straight_curve() {
    let table = straight_line().arc_length_table();
    assert!((table.total_length() - 10.0).abs() < 1e-6);
    assert_eq!(table.param_at_fraction(0.0), 0.0);
    assert_eq!(table.param_at_fraction(1.0), 1.0);
}

#[test]
fn degenerate_curve_samples_repeat_the_point() {
    let p = vec![2.0, 2.0];
    let c = CubicCurve::new(p.clone(), p.clone(), p.clone(), p.clone()).unwrap();
    let pts = c.sample_by_arc_length(3);
    assert_eq!(pts, vec![p.clone(), p.clone(), p]);
}

#[test]
fn sample_counts_zero_and_one() {
    let c = straight_line();
    assert!(c.sample_by_arc_length(0).is_empty());
    assert_eq!(c.sample_by_arc_length(1), vec![vec![0.0, 0.0]]);
}
