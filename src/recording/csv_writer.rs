//! CSV writer for episode recordings.
//!
//! Writes one row per planner decision so recorded runs can be compared
//! across budget configurations.
//! Format: episode_id,step,chosen_action,completed_iterations,
//! max_selection_depth,max_playout_depth,processing_time_ms,final_score

use crate::recording::episode_record::EpisodeRecord;
use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// CSV writer for episode recordings with daily rotation
pub struct CsvWriter {
    base_dir: PathBuf,
    current_file: Option<BufWriter<File>>,
    current_date: String,
}

impl CsvWriter {
    /// Create a new CSV writer
    pub fn new<P: AsRef<Path>>(base_dir: P) -> std::io::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;

        Ok(Self {
            base_dir,
            current_file: None,
            current_date: String::new(),
        })
    }

    /// Get the current date string for file naming
    fn get_date_string() -> String {
        Utc::now().format("%Y%m%d").to_string()
    }

    /// Get the file path for a given date
    fn get_file_path(&self, date: &str) -> PathBuf {
        self.base_dir.join(format!("plans_{}.csv", date))
    }

    /// Ensure the file is open for the current date, with rotation
    fn ensure_file_open(&mut self) -> std::io::Result<()> {
        let today = Self::get_date_string();

        if self.current_date != today || self.current_file.is_none() {
            if let Some(mut file) = self.current_file.take() {
                file.flush()?;
            }

            let file_path = self.get_file_path(&today);
            let file_exists = file_path.exists();

            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&file_path)?;

            let mut writer = BufWriter::new(file);

            if !file_exists {
                Self::write_header(&mut writer)?;
            }

            self.current_file = Some(writer);
            self.current_date = today;
        }

        Ok(())
    }

    /// Write the CSV header
    fn write_header<W: Write>(writer: &mut W) -> std::io::Result<()> {
        writeln!(
            writer,
            "episode_id,step,chosen_action,completed_iterations,\
             max_selection_depth,max_playout_depth,processing_time_ms,final_score"
        )
    }

    /// Write a complete episode record, one row per decision
    pub fn write_episode(&mut self, record: &EpisodeRecord) -> std::io::Result<()> {
        self.ensure_file_open()?;

        if let Some(ref mut writer) = self.current_file {
            let final_score = record.final_score.unwrap_or(0.0);

            for decision in &record.decisions {
                writeln!(
                    writer,
                    "{},{},{},{},{},{},{:.3},{}",
                    record.episode_id,
                    decision.step,
                    decision.chosen_action,
                    decision.completed_iterations,
                    decision.max_selection_depth,
                    decision.max_playout_depth,
                    decision.processing_time_ms,
                    final_score
                )?;
            }
            writer.flush()?;
        }

        Ok(())
    }

    /// Flush any buffered data
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.current_file {
            writer.flush()?;
        }
        Ok(())
    }

    /// Close the writer
    pub fn close(&mut self) -> std::io::Result<()> {
        if let Some(mut writer) = self.current_file.take() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for CsvWriter {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// A decision row loaded back from a CSV file
#[derive(Debug, Clone)]
pub struct LoadedDecisionRecord {
    pub episode_id: String,
    pub step: usize,
    pub chosen_action: String,
    pub completed_iterations: usize,
    pub max_selection_depth: usize,
    pub max_playout_depth: usize,
    pub processing_time_ms: f64,
    pub final_score: f64,
}

/// Load recorded decisions from a CSV file
pub fn load_decisions_from_csv<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<LoadedDecisionRecord>, Box<dyn std::error::Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result?;

        records.push(LoadedDecisionRecord {
            episode_id: record.get(0).unwrap_or("").to_string(),
            step: record.get(1).unwrap_or("0").parse().unwrap_or(0),
            chosen_action: record.get(2).unwrap_or("").to_string(),
            completed_iterations: record.get(3).unwrap_or("0").parse().unwrap_or(0),
            max_selection_depth: record.get(4).unwrap_or("0").parse().unwrap_or(0),
            max_playout_depth: record.get(5).unwrap_or("0").parse().unwrap_or(0),
            processing_time_ms: record.get(6).unwrap_or("0").parse().unwrap_or(0.0),
            final_score: record.get(7).unwrap_or("0").parse().unwrap_or(0.0),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::episode_record::DecisionRecord;
    use tempfile::tempdir;

    #[test]
    fn test_csv_writer_round_trip() -> std::io::Result<()> {
        let dir = tempdir()?;
        let mut writer = CsvWriter::new(dir.path())?;

        let mut record = EpisodeRecord::new("episode-1".to_string());
        record.record_decision(DecisionRecord {
            step: 0,
            chosen_action: "Right".to_string(),
            completed_iterations: 100,
            max_selection_depth: 4,
            max_playout_depth: 9,
            processing_time_ms: 1.5,
            timestamp: 0,
        });
        record.record_decision(DecisionRecord {
            step: 1,
            chosen_action: "Left".to_string(),
            completed_iterations: 100,
            max_selection_depth: 3,
            max_playout_depth: 7,
            processing_time_ms: 1.1,
            timestamp: 1,
        });
        record.finalize(8.0);

        writer.write_episode(&record)?;
        writer.close()?;

        let files: Vec<_> = fs::read_dir(dir.path())?.filter_map(|e| e.ok()).collect();
        assert_eq!(files.len(), 1);

        let loaded = load_decisions_from_csv(files[0].path()).expect("load csv");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].episode_id, "episode-1");
        assert_eq!(loaded[0].chosen_action, "Right");
        assert_eq!(loaded[1].step, 1);
        assert_eq!(loaded[1].final_score, 8.0);

        Ok(())
    }
}
