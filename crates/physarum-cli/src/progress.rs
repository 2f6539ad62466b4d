//! Progress bar driven by optimizer events.

use indicatif::{ProgressBar, ProgressStyle};
use physarum::prelude::*;

/// Advances one tick per completed iteration.
pub struct ProgressObserver {
    bar: ProgressBar,
    verbose: bool,
}

impl ProgressObserver {
    pub fn new(iterations: usize, verbose: bool) -> Self {
        let bar = ProgressBar::new(iterations as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} iterations")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar, verbose }
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}

impl Observer for ProgressObserver {
    fn on_event(&mut self, event: &OptimizationEvent, _pheromone: &PheromoneMap) {
        if let OptimizationEvent::IterationComplete { iteration, total_pheromone, agents_arrived } = event {
            if self.verbose {
                self.bar.println(format!(
                    "  iteration {iteration}: {agents_arrived} arrived, total pheromone {total_pheromone:.3}"
                ));
            }
            self.bar.inc(1);
        }
    }
}
