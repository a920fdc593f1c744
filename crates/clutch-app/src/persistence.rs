//! Match results written as pretty JSON, one file per fixture.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use clutch_core::error::ProviderError;
use clutch_core::providers::PersistenceSink;
use clutch_core::results::MatchResult;

fn result_path(dir: &Path, fixture_id: u64) -> PathBuf {
    dir.join(format!("match-{fixture_id}.json"))
}

pub fn save_result(dir: &Path, result: &MatchResult) -> Result<PathBuf, ProviderError> {
    fs::create_dir_all(dir)?;
    let path = result_path(dir, result.fixture_id);
    let json = serde_json::to_string_pretty(result)?;
    fs::write(&path, json)?;
    Ok(path)
}

pub fn load_result(dir: &Path, fixture_id: u64) -> Result<MatchResult, ProviderError> {
    let json = fs::read_to_string(result_path(dir, fixture_id))?;
    Ok(serde_json::from_str(&json)?)
}

/// Every readable result in `dir`, ordered by fixture id.
pub fn list_results(dir: &Path) -> Vec<MatchResult> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut results: Vec<MatchResult> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| fs::read_to_string(path).ok())
        .filter_map(|json| serde_json::from_str(&json).ok())
        .collect();
    results.sort_by_key(|r| r.fixture_id);
    results
}

/// Sink handed to the engine.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PersistenceSink for JsonFileSink {
    fn save_match_result(&mut self, result: &MatchResult) -> Result<(), ProviderError> {
        let path = save_result(&self.dir, result)?;
        info!(path = %path.display(), "match result saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(fixture_id: u64) -> MatchResult {
        MatchResult {
            fixture_id,
            home_team: 1,
            away_team: 2,
            map: Some(3),
            winner: None,
            home_score: 0,
            away_score: 0,
            rounds_played: 0,
            duration: 0,
            mvp: None,
            player_stats: Vec::new(),
            analysis: vec!["No rounds were played.".to_string()],
        }
    }

    #[test]
    fn test_sink_writes_loadable_file() {
        let dir = std::env::temp_dir().join("clutch_test_sink");
        let _ = fs::remove_dir_all(&dir);

        let mut sink = JsonFileSink::new(&dir);
        sink.save_match_result(&make_result(12)).unwrap();
        let loaded = load_result(sink.dir(), 12).unwrap();
        assert_eq!(loaded, make_result(12));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_list_results_sorted() {
        let dir = std::env::temp_dir().join("clutch_test_list_results");
        let _ = fs::remove_dir_all(&dir);

        save_result(&dir, &make_result(5)).unwrap();
        save_result(&dir, &make_result(2)).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let ids: Vec<u64> = list_results(&dir).iter().map(|r| r.fixture_id).collect();
        assert_eq!(ids, vec![2, 5]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let dir = std::env::temp_dir().join("clutch_test_no_results_here");
        assert!(list_results(&dir).is_empty());
    }

    #[test]
    fn test_load_missing_is_io_error() {
        let dir = std::env::temp_dir().join("clutch_test_no_results_here");
        assert!(matches!(load_result(&dir, 1), Err(ProviderError::Io(_))));
    }
}
