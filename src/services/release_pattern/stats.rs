/// Mean and population standard deviation of a set of day gaps
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntervalStats {
    pub avg: f64,
    pub std_dev: f64,
}

impl IntervalStats {
    /// Relative dispersion (`std_dev / avg`); zero when the mean is zero
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.avg > 0.0 {
            self.std_dev / self.avg
        } else {
            0.0
        }
    }
}

pub fn summarize(intervals: &[i64]) -> IntervalStats {
    if intervals.is_empty() {
        return IntervalStats::default();
    }

    let n = intervals.len() as f64;
    let avg = intervals.iter().sum::<i64>() as f64 / n;

    if intervals.len() < 2 {
        return IntervalStats { avg, std_dev: 0.0 };
    }

    let variance = intervals
        .iter()
        .map(|&x| {
            let diff = x as f64 - avg;
            diff * diff
        })
        .sum::<f64>()
        / n;

    IntervalStats {
        avg,
        std_dev: variance.sqrt(),
    }
}
