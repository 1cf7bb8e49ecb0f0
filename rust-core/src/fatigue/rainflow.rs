//! Rainflow cycle counting (ASTM E1049-85, three-point method)
//!
//! Turning points are extracted first; cycles are then closed on a stack.
//! Whatever remains on the stack at the end is reported as half cycles.

/// One counted cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cycle {
    /// Peak-to-valley range
    pub range: f64,

    /// Mean level
    pub mean: f64,

    /// 1.0 for a closed cycle, 0.5 for a residual half cycle
    pub count: f64,
}

impl Cycle {
    fn between(a: f64, b: f64, count: f64) -> Self {
        Self {
            range: (a - b).abs(),
            mean: 0.5 * (a + b),
            count,
        }
    }

    /// Half of the range
    pub fn amplitude(&self) -> f64 {
        0.5 * self.range
    }
}

/// Turning points of a series
///
/// Keeps the first and last samples and every sample where the slope changes
/// sign. Flat runs are collapsed.
pub fn reversals(series: &[f64]) -> Vec<f64> {
    if series.len() < 2 {
        return series.to_vec();
    }

    let mut points = Vec::with_capacity(series.len() / 2 + 2);
    points.push(series[0]);

    let mut x = series[1];
    let mut d_last = series[1] - series[0];

    for &x_next in &series[2..] {
        if x_next == x {
            continue;
        }
        let d_next = x_next - x;
        if d_last * d_next < 0.0 {
            points.push(x);
        }
        x = x_next;
        d_last = d_next;
    }
    points.push(x);

    points
}

/// Extract full and half cycles from a load history
pub fn extract_cycles(series: &[f64]) -> Vec<Cycle> {
    let mut cycles = Vec::new();
    let mut stack: Vec<f64> = Vec::new();

    for point in reversals(series) {
        stack.push(point);

        while stack.len() >= 3 {
            let n = stack.len();
            let x = (stack[n - 1] - stack[n - 2]).abs();
            let y = (stack[n - 2] - stack[n - 3]).abs();

            if x < y {
                break;
            }

            if n == 3 {
                // Range Y contains the starting point: half cycle
                cycles.push(Cycle::between(stack[0], stack[1], 0.5));
                stack.remove(0);
            } else {
                cycles.push(Cycle::between(stack[n - 3], stack[n - 2], 1.0));
                let last = stack[n - 1];
                stack.truncate(n - 3);
                stack.push(last);
            }
        }
    }

    // Residue
    for pair in stack.windows(2) {
        cycles.push(Cycle::between(pair[0], pair[1], 0.5));
    }

    cycles
}

/// Histogram-free summary: (range, count) pairs of every counted cycle
pub fn count_cycles(series: &[f64]) -> Vec<(f64, f64)> {
    extract_cycles(series)
        .into_iter()
        .map(|c| (c.range, c.count))
        .collect()
}

/// Means and ranges of every counted cycle, counting half cycles once
pub fn rainflow(series: &[f64]) -> (Vec<f64>, Vec<f64>) {
    extract_cycles(series)
        .into_iter()
        .map(|c| (c.mean, c.range))
        .unzip()
}
