//! Episode recorder for capturing planner diagnostics.
//!
//! Collects one record per planning decision and persists completed
//! episodes through the CSV writer. Single-threaded on purpose: the planner
//! itself runs cooperative batches on the host thread, so the recorder
//! follows the same model.

use crate::mcts::MctsDecision;
use crate::recording::csv_writer::CsvWriter;
use crate::recording::episode_record::{DecisionRecord, EpisodeRecord};
use std::path::Path;

/// Recorder for planning episodes
pub struct EpisodeRecorder {
    /// The episode currently being recorded, if any
    active: Option<EpisodeRecord>,
    /// CSV writer for persisting completed episodes
    csv_writer: Option<CsvWriter>,
    /// Whether recording is enabled
    enabled: bool,
}

impl EpisodeRecorder {
    /// Create a new recorder persisting to the given directory
    pub fn new<P: AsRef<Path>>(output_dir: P) -> std::io::Result<Self> {
        let csv_writer = CsvWriter::new(output_dir)?;
        Ok(Self {
            active: None,
            csv_writer: Some(csv_writer),
            enabled: true,
        })
    }

    /// Create a disabled recorder (for testing or when recording is not needed)
    pub fn disabled() -> Self {
        Self {
            active: None,
            csv_writer: None,
            enabled: false,
        }
    }

    /// Check if recording is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start recording a new episode
    pub fn start_episode(&mut self, episode_id: &str) {
        if !self.enabled {
            return;
        }

        if let Some(unfinished) = self.active.take() {
            log::warn!(
                "episode {} was never finalized, dropping {} decisions",
                unfinished.episode_id,
                unfinished.decision_count()
            );
        }

        self.active = Some(EpisodeRecord::new(episode_id.to_string()));
        log::info!("started recording episode: {}", episode_id);
    }

    /// Record one planner decision in the active episode
    pub fn record_decision<A>(
        &mut self,
        step: usize,
        chosen_action: &str,
        decision: &MctsDecision<A>,
    ) {
        if !self.enabled {
            return;
        }

        match self.active.as_mut() {
            Some(record) => {
                record.record_decision(DecisionRecord {
                    step,
                    chosen_action: chosen_action.to_string(),
                    completed_iterations: decision.completed_iterations,
                    max_selection_depth: decision.max_selection_depth_reached,
                    max_playout_depth: decision.max_playout_depth_reached,
                    processing_time_ms: decision.total_processing_time.as_secs_f64() * 1000.0,
                    timestamp: chrono::Utc::now().timestamp(),
                });
                log::debug!(
                    "recorded decision step={} action={} iterations={}",
                    step,
                    chosen_action,
                    decision.completed_iterations
                );
            }
            None => {
                log::warn!("attempted to record a decision with no active episode");
            }
        }
    }

    /// Finalize and persist the active episode
    pub fn finalize_episode(&mut self, final_score: f64) -> std::io::Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let Some(mut record) = self.active.take() else {
            log::warn!("attempted to finalize with no active episode");
            return Ok(());
        };

        record.finalize(final_score);

        if let Some(ref mut writer) = self.csv_writer {
            writer.write_episode(&record)?;
        }

        log::info!(
            "finalized episode {}: {} decisions, final score {:.1}",
            record.episode_id,
            record.decision_count(),
            final_score
        );
        Ok(())
    }
}
