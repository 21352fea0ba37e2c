use std::time::Instant;
use tracing::info;

#[derive(Debug)]
pub struct SearchStatistics {
    /// Number of nodes expanded
    expanded_nodes: i64,
    /// Number of nodes pushed onto the frontier, duplicates included
    generated_nodes: i64,
    /// Number of popped nodes discarded because their state was already
    /// expanded
    duplicate_pops: i64,
    /// Largest frontier size seen
    peak_frontier_size: usize,
    /// Time when the search started
    search_start_time: Instant,
    /// Time when the last log was printed, used for periodic logging
    last_log_time: Instant,
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStatistics {
    pub fn new() -> Self {
        info!("starting search");
        Self {
            expanded_nodes: 0,
            generated_nodes: 0,
            duplicate_pops: 0,
            peak_frontier_size: 0,
            search_start_time: Instant::now(),
            last_log_time: Instant::now(),
        }
    }

    pub fn increment_expanded_nodes(&mut self) {
        self.expanded_nodes += 1;
        self.log_if_needed();
    }

    pub fn increment_generated_nodes(&mut self, num_nodes: usize) {
        self.generated_nodes += num_nodes as i64;
        self.log_if_needed();
    }

    pub fn increment_duplicate_pops(&mut self) {
        self.duplicate_pops += 1;
        self.log_if_needed();
    }

    pub fn register_frontier_size(&mut self, frontier_size: usize) {
        self.peak_frontier_size = self.peak_frontier_size.max(frontier_size);
    }

    pub fn get_expanded_nodes(&self) -> i64 {
        self.expanded_nodes
    }

    pub fn get_generated_nodes(&self) -> i64 {
        self.generated_nodes
    }

    pub fn get_duplicate_pops(&self) -> i64 {
        self.duplicate_pops
    }

    pub fn get_peak_frontier_size(&self) -> usize {
        self.peak_frontier_size
    }

    fn log_if_needed(&mut self) {
        if self.last_log_time.elapsed().as_secs() > 10 {
            self.last_log_time = Instant::now();
            self.log();
        }
    }

    fn log(&self) {
        info!(
            expanded_nodes = self.expanded_nodes,
            generated_nodes = self.generated_nodes,
            duplicate_pops = self.duplicate_pops,
            peak_frontier_size = self.peak_frontier_size,
        );
    }

    pub fn finalise_search(&self) {
        info!("finalising search");
        self.log();
        info!(search_duration = self.search_start_time.elapsed().as_secs_f64());
    }
}
