use std::time::{Duration, Instant};

/// Statistics for one batch classification run.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    /// Total execution time.
    pub total_time: Duration,
    /// Number of items in the batch, gated ones included.
    pub items_processed: usize,
    /// Items short-circuited by the emoji gate and never scored.
    pub items_gated: usize,
}

impl PipelineStats {
    /// Create a new stats tracker (call at start of operation).
    pub(crate) fn start() -> PipelineStatsBuilder {
        PipelineStatsBuilder {
            start_time: Instant::now(),
        }
    }
}

/// Tracks timing from creation to finalize.
pub(crate) struct PipelineStatsBuilder {
    start_time: Instant,
}

impl PipelineStatsBuilder {
    pub fn finish(self, items_processed: usize, items_gated: usize) -> PipelineStats {
        PipelineStats {
            total_time: self.start_time.elapsed(),
            items_processed,
            items_gated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineStats;

    #[test]
    fn records_counts_and_elapsed_time() {
        let builder = PipelineStats::start();
        let stats = builder.finish(5, 2);
        assert_eq!(stats.items_processed, 5);
        assert_eq!(stats.items_gated, 2);
        assert!(stats.total_time.as_nanos() > 0);
    }
}
