#[derive(Clone, Debug, Default)]
/// Counts how many attempted moves were accepted.
///
/// Every [`Movetype`](crate::Movetype) holds an [AcceptanceStatistics] and
/// updates its counters according to the outcome of each attempt. The total
/// number of attempted moves is `n_succ + n_failed`.
pub struct AcceptanceStatistics {
    /// number of accepted moves
    pub n_succ: u64,
    /// number of rejected moves
    pub n_failed: u64,
}

impl AcceptanceStatistics {
    /// The fraction of attempts that were accepted.
    ///
    /// Simply returns `n_succ / (n_succ + n_failed)`
    pub fn success_rate(&self) -> f64 {
        let sum = self.n_succ + self.n_failed;
        if sum == 0 {
            return 0.0;
        }

        return self.n_succ as f64 / (sum as f64);
    }

    /// The acceptance fraction accumulated since a given point of the simulation.
    ///
    /// The rate is computed from the attempts made after `prev_stats` was recorded.
    pub fn recent_success_rate(&self, prev_stats: &AcceptanceStatistics) -> f64 {
        let succ = self.n_succ - prev_stats.n_succ;
        let fail = self.n_failed - prev_stats.n_failed;
        let sum = succ + fail;
        if sum == 0 {
            return 0.0;
        }

        return succ as f64 / (sum as f64);
    }
}
