//! Driver configuration, read from a TOML file.
//!
//! Every field has a default, so an empty file (or no file at all) runs the
//! stock demonstrations.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::PuzzleError;
use crate::puzzle::PuzzleState;
use crate::search::SearchConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub puzzle: PuzzleConfig,
    pub points: PointsConfig,
}

/// When the driver should replay the solution board by board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShowPath {
    #[default]
    Ask,
    Always,
    Never,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Flat row-major start board; the value `n*n` is the blank.
    pub start: Vec<u32>,
    /// Goal board. Defaults to the canonical goal of the start's size.
    pub goal: Option<Vec<u32>>,
    /// Expansion budget for a single search.
    pub max_nodes: Option<usize>,
    pub show_path: ShowPath,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            start: vec![6, 11, 2, 3, 9, 16, 5, 10, 13, 1, 15, 4, 14, 8, 12, 7],
            goal: None,
            max_nodes: None,
            show_path: ShowPath::Ask,
        }
    }
}

impl PuzzleConfig {
    pub fn start_state(&self) -> Result<PuzzleState, PuzzleError> {
        PuzzleState::new(self.start.clone())
    }

    pub fn goal_state(&self, start: &PuzzleState) -> Result<PuzzleState, PuzzleError> {
        match &self.goal {
            Some(tiles) => PuzzleState::new(tiles.clone()),
            None => PuzzleState::goal(start.size()),
        }
    }

    pub fn search(&self) -> SearchConfig {
        SearchConfig {
            max_nodes: self.max_nodes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PointsConfig {
    pub files: Vec<PathBuf>,
    /// Also run the quadratic search and report whether both agree.
    pub compare_brute_force: bool,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            files: vec![
                "datos_100.txt".into(),
                "datos_1000.txt".into(),
                "datos_10000.txt".into(),
            ],
            compare_brute_force: false,
        }
    }
}

impl Config {
    /// Loads `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config at {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn sections_override_fields_independently() {
        let config = Config::from_toml(
            r#"
            [puzzle]
            start = [2, 1, 3, 4, 5, 6, 7, 8, 9]
            max_nodes = 500
            show_path = "never"

            [points]
            compare_brute_force = true
            "#,
        )
        .unwrap();

        let start = config.puzzle.start_state().unwrap();
        assert_eq!(start.size(), 3);
        assert_eq!(
            config.puzzle.goal_state(&start).unwrap(),
            PuzzleState::goal(3).unwrap()
        );
        assert_eq!(config.puzzle.search().max_nodes, Some(500));
        assert_eq!(config.puzzle.show_path, ShowPath::Never);
        assert!(config.points.compare_brute_force);
        assert_eq!(config.points.files, PointsConfig::default().files);
    }

    #[test]
    fn default_start_is_a_valid_board() {
        let puzzle = PuzzleConfig::default();
        let start = puzzle.start_state().unwrap();
        assert_eq!(start.size(), 4);
    }

    #[test]
    fn unknown_show_path_is_rejected() {
        assert!(Config::from_toml("[puzzle]\nshow_path = \"sometimes\"\n").is_err());
    }
}
