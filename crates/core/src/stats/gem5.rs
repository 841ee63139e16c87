//! Readers for gem5 statistics dumps.
//!
//! `stats.txt` holds one block per statistics dump, delimited by
//! `---------- Begin Simulation Statistics ----------` and the matching `End`
//! marker. Each statistic line is `name value [more values] # description`;
//! only the first value is kept. `stats.json` is loaded as an untyped JSON
//! document.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::common::error::StatsError;

const BEGIN_MARKER: &str = "Begin Simulation Statistics";
const END_MARKER: &str = "End Simulation Statistics";

/// One statistics dump (one `Begin` .. `End` block).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsDump {
    values: BTreeMap<String, f64>,
}

impl StatsDump {
    /// Value of the statistic called `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Number of statistics in the dump.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the dump holds no statistics.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Simulated instructions (`simInsts`).
    pub fn sim_insts(&self) -> Option<f64> {
        self.get("simInsts")
    }

    /// Simulated ticks (`simTicks`).
    pub fn sim_ticks(&self) -> Option<f64> {
        self.get("simTicks")
    }

    /// Simulated seconds (`simSeconds`).
    pub fn sim_seconds(&self) -> Option<f64> {
        self.get("simSeconds")
    }

    /// Every statistic whose last path component is `leaf`, e.g. all per-core
    /// `ipc` values.
    pub fn matching_leaf<'a>(&'a self, leaf: &'a str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.values.iter().filter_map(move |(name, value)| {
            let last = name.rsplit('.').next().unwrap_or(name.as_str());
            (last == leaf).then_some((name.as_str(), *value))
        })
    }

    /// Iterates all statistics in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// All dumps found in a `stats.txt`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gem5Stats {
    /// Dumps in file order.
    pub dumps: Vec<StatsDump>,
}

impl Gem5Stats {
    /// Reads and parses a `stats.txt` file.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Io`] if the file cannot be read and
    /// [`StatsError::Empty`] if it contains no statistics block.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }

    /// Parses the contents of a `stats.txt` file.
    ///
    /// Lines outside a statistics block and lines whose first value is not a
    /// number are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Empty`] if the text contains no statistics block.
    pub fn parse(text: &str) -> Result<Self, StatsError> {
        let mut dumps = Vec::new();
        let mut current: Option<StatsDump> = None;

        for (index, line) in text.lines().enumerate() {
            if line.contains(BEGIN_MARKER) {
                if let Some(dump) = current.replace(StatsDump::default()) {
                    dumps.push(dump);
                }
                continue;
            }
            if line.contains(END_MARKER) {
                if let Some(dump) = current.take() {
                    dumps.push(dump);
                }
                continue;
            }
            let Some(dump) = current.as_mut() else {
                continue;
            };
            let body = line.split_once('#').map_or(line, |(body, _)| body);
            let mut fields = body.split_whitespace();
            let (Some(name), Some(raw)) = (fields.next(), fields.next()) else {
                continue;
            };
            match raw.parse::<f64>() {
                Ok(value) => {
                    let _ = dump.values.insert(name.to_string(), value);
                }
                Err(_) => {
                    tracing::trace!(
                        line = index + 1,
                        stat = name,
                        raw,
                        "skipping non-numeric statistic"
                    );
                }
            }
        }
        if let Some(dump) = current {
            dumps.push(dump);
        }

        if dumps.is_empty() {
            return Err(StatsError::Empty);
        }
        Ok(Self { dumps })
    }

    /// The last dump, which covers the whole run for a single-dump simulation.
    pub fn last(&self) -> Option<&StatsDump> {
        self.dumps.last()
    }
}

/// Loads `stats.json` as a JSON document.
///
/// # Errors
///
/// Returns [`StatsError::Io`] or [`StatsError::Json`].
pub fn load_json_stats(path: impl AsRef<Path>) -> Result<Value, StatsError> {
    let text = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&text)?)
}
