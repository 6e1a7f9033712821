use crate::core::TimePoint;

/// Default number of samples handed to the renderer per dataset.
pub const DEFAULT_SAMPLE_BUDGET: usize = 500;

/// Largest-triangle-three-buckets downsampling.
///
/// Keeps the first and last point and, for every bucket in between, the point
/// forming the largest triangle with the previously kept point and the average
/// of the next bucket. Inputs at or below `threshold`, or thresholds below 3,
/// are returned unchanged.
#[must_use]
pub fn lttb(points: &[TimePoint], threshold: usize) -> Vec<TimePoint> {
    let len = points.len();
    if threshold >= len || threshold < 3 {
        return points.to_vec();
    }

    // Timestamps are rebased on the first point to keep the f64 area math precise.
    let origin = i128::from(points[0].timestamp);
    let x = |point: &TimePoint| (i128::from(point.timestamp) - origin) as f64;
    let y = |point: &TimePoint| point.value as f64;

    let bucket_size = (len - 2) as f64 / (threshold - 2) as f64;
    let mut sampled = Vec::with_capacity(threshold);
    sampled.push(points[0]);
    let mut anchor = 0_usize;

    for bucket in 0..threshold - 2 {
        let avg_start = (((bucket + 1) as f64 * bucket_size).floor() as usize + 1).min(len - 1);
        let avg_end = (((bucket + 2) as f64 * bucket_size).floor() as usize + 1)
            .min(len)
            .max(avg_start + 1);
        let next = &points[avg_start..avg_end];
        let count = next.len() as f64;
        let avg_x = next.iter().map(x).sum::<f64>() / count;
        let avg_y = next.iter().map(y).sum::<f64>() / count;

        let range_start = (bucket as f64 * bucket_size).floor() as usize + 1;
        let range_end = (((bucket + 1) as f64 * bucket_size).floor() as usize + 1).min(len - 1);

        let ax = x(&points[anchor]);
        let ay = y(&points[anchor]);
        let mut best_index = range_start;
        let mut best_area = f64::NEG_INFINITY;
        for (index, point) in points
            .iter()
            .enumerate()
            .take(range_end.max(range_start + 1))
            .skip(range_start)
        {
            let area = ((ax - avg_x) * (y(point) - ay) - (ax - x(point)) * (avg_y - ay)).abs();
            if area > best_area {
                best_area = area;
                best_index = index;
            }
        }

        sampled.push(points[best_index]);
        anchor = best_index;
    }

    sampled.push(points[len - 1]);
    sampled
}

#[cfg(test)]
mod tests {
    use super::lttb;
    use crate::core::TimePoint;

    fn ramp(len: usize) -> Vec<TimePoint> {
        (0..len as i64)
            .map(|i| TimePoint::new(i * 1_000, (i % 17) * 3))
            .collect()
    }

    #[test]
    fn small_inputs_pass_through() {
        let points = ramp(10);
        assert_eq!(lttb(&points, 10), points);
        assert_eq!(lttb(&points, 2), points);
    }

    #[test]
    fn output_respects_threshold_and_keeps_endpoints() {
        let points = ramp(5_000);
        let sampled = lttb(&points, 500);
        assert_eq!(sampled.len(), 500);
        assert_eq!(sampled.first(), points.first());
        assert_eq!(sampled.last(), points.last());
        assert!(sampled.windows(2).all(|pair| pair[0].timestamp < pair[1].timestamp));
    }

    #[test]
    fn spike_survives_downsampling() {
        let mut points: Vec<TimePoint> = (0..1_000).map(|i| TimePoint::new(i, 10)).collect();
        points[437].value = 10_000;
        let sampled = lttb(&points, 50);
        assert!(sampled.iter().any(|point| point.value == 10_000));
    }

    #[test]
    fn extreme_timestamp_spread_is_handled() {
        let mut points = vec![TimePoint::new(i64::MIN, 1)];
        points.extend((0..600).map(|i| TimePoint::new(1_700_000_000_000 + i * 1_000, i)));
        points.push(TimePoint::new(i64::MAX, 2));

        let sampled = lttb(&points, 500);

        assert_eq!(sampled.len(), 500);
        assert_eq!(sampled.first().map(|p| p.timestamp), Some(i64::MIN));
        assert_eq!(sampled.last().map(|p| p.timestamp), Some(i64::MAX));
    }
}
