use super::PrefixSums;

/// Centred rectangular window over `[s - half_width, s + half_width)`.
///
/// The window total is always divided by the full width `2 * half_width`, so
/// samples near either end of the timeline are attenuated.
pub fn rectangular_smooth(values: &[f64], half_width: usize) -> Vec<f64> {
    let len = values.len();
    let scale = 1.0 / (2 * half_width).max(1) as f64;
    let sums = PrefixSums::new(values);

    (0..len)
        .map(|s| scale * sums.range_sum(s.saturating_sub(half_width), s + half_width))
        .collect()
}

/// Running mean over `[s - half_width, s + half_width)`, maintained
/// incrementally as the window slides.
///
/// Unlike [`rectangular_smooth`] the total is divided by the number of samples
/// actually inside the window, so the timeline ends are not attenuated.
pub fn running_average(values: &[f64], half_width: usize) -> Vec<f64> {
    let len = values.len();
    let mut averaged = Vec::with_capacity(len);

    let initial = half_width.min(len);
    let mut window_sum: f64 = values[..initial].iter().sum();
    let mut window_len = initial;

    for s in 0..len {
        averaged.push(if window_len > 0 {
            window_sum / window_len as f64
        } else {
            0.0
        });

        if s + half_width < len {
            window_sum += values[s + half_width];
            window_len += 1;
        }
        if s >= half_width {
            window_sum -= values[s - half_width];
            window_len -= 1;
        }
    }

    averaged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_rectangular_constant_signal() {
        let smoothed = rectangular_smooth(&[2.0; 3000], 500);
        assert_close(smoothed[0], 1.0);
        assert_close(smoothed[250], 1.5);
        assert_close(smoothed[1500], 2.0);
        // [2499, 3000) holds 501 samples.
        assert_close(smoothed[2999], 1.002);
    }

    #[test]
    fn test_running_average_constant_signal() {
        let averaged = running_average(&[2.0; 3000], 500);
        assert_close(averaged[0], 2.0);
        assert_close(averaged[1500], 2.0);
        assert_close(averaged[2999], 2.0);
    }

    #[test]
    fn test_smoothers_agree_in_the_interior() {
        let values: Vec<f64> = (0..4000).map(|i| ((i % 37) as f64).sin()).collect();
        let rectangular = rectangular_smooth(&values, 500);
        let running = running_average(&values, 500);
        for s in [500, 1200, 2750, 3499] {
            assert_close(rectangular[s], running[s]);
        }
    }

    #[test]
    fn test_impulse_spreads_over_window() {
        let mut values = vec![0.0; 2000];
        values[1000] = 1000.0;
        let smoothed = rectangular_smooth(&values, 500);
        assert_close(smoothed[500], 0.0);
        assert_close(smoothed[501], 1.0);
        assert_close(smoothed[1500], 1.0);
        assert_close(smoothed[1501], 0.0);
    }

    #[test]
    fn test_short_and_empty_inputs() {
        assert!(rectangular_smooth(&[], 500).is_empty());
        assert!(running_average(&[], 500).is_empty());

        let averaged = running_average(&[1.0, 3.0], 500);
        assert_close(averaged[0], 2.0);
        assert_close(averaged[1], 2.0);
    }
}
