pub mod csv_writer;
pub mod episode_record;
pub mod episode_recorder;

pub use csv_writer::{load_decisions_from_csv, CsvWriter, LoadedDecisionRecord};
pub use episode_record::{DecisionRecord, EpisodeRecord};
pub use episode_recorder::EpisodeRecorder;
