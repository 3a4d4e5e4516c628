use super::*;

#[test]
fn buckets_count_thresholds_at_or_below_progress() {
    let t = Thresholds::new(&[0.25, 0.6]).unwrap();
    let got: Vec<usize> = [0.1, 0.3, 0.6, 0.99].iter().map(|p| t.select(*p)).collect();
    assert_eq!(got, vec![0, 1, 2, 2]);
    assert_eq!(t.buckets(), 3);
}

#[test]
fn boundaries_and_extremes() {
    let t = Thresholds::new(&[0.25, 0.6]).unwrap();
    assert_eq!(t.select(0.0), 0);
    assert_eq!(t.select(0.25), 1);
    assert_eq!(t.select(1.0), 2);
    let empty = Thresholds::new(&[]).unwrap();
    assert_eq!(empty.select(0.7), 0);
    assert_eq!(empty.buckets(), 1);
}

#[test]
fn non_increasing_thresholds_are_rejected() {
    assert!(matches!(
        Thresholds::new(&[0.5, 0.3]),
        Err(ScrollError::InvalidThresholds(_))
    ));
    assert!(matches!(
        Thresholds::new(&[0.5, 0.5]),
        Err(ScrollError::InvalidThresholds(_))
    ));
    assert!(matches!(
        select_state(0.4, &[0.1, f64::NAN]),
        Err(ScrollError::InvalidThresholds(_))
    ));
}

#[test]
fn tracker_reports_only_changes() {
    let mut tr = BucketTracker::new(Thresholds::new(&[0.25, 0.6]).unwrap(), 0);
    assert_eq!(tr.update(0.1), None);
    assert_eq!(tr.update(0.3), Some(1));
    assert_eq!(tr.update(0.4), None);
    assert_eq!(tr.update(0.9), Some(2));
    assert_eq!(tr.update(0.0), Some(0));
    assert_eq!(tr.current(), 0);
}

#[test]
fn serde_validates() {
    let t: Thresholds = serde_json::from_str("[0.3, 0.65]").unwrap();
    assert_eq!(t.as_slice(), &[0.3, 0.65]);
    assert!(serde_json::from_str::<Thresholds>("[0.65, 0.3]").is_err());
}
