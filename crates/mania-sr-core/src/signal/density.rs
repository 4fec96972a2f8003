/// Number of heads within `[t - half_width, t + half_width)` for every
/// millisecond `t` of the timeline. `head_times` must be ascending.
pub fn note_density(head_times: &[u32], len: usize, half_width: usize) -> Vec<f64> {
    let mut density = Vec::with_capacity(len);
    let mut left = 0;
    let mut right = 0;

    for t in 0..len {
        let lower = t.saturating_sub(half_width);
        let upper = t + half_width;
        while left < head_times.len() && (head_times[left] as usize) < lower {
            left += 1;
        }
        while right < head_times.len() && (head_times[right] as usize) < upper {
            right += 1;
        }
        density.push((right - left) as f64);
    }

    density
}
