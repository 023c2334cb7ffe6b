//! Class Labels
//!
//! Index -> English label for the pretrained classifier.
//! One label per line, line number == class index.
//! Synset-prefixed lines ("n01440764 tench, Tinca tinca") are accepted.

use std::path::Path;

use crate::error::{AgriError, AgriResult};

#[derive(Debug, Clone)]
pub struct LabelMap {
    labels: Vec<String>,
}

impl LabelMap {
    pub fn from_lines(text: &str) -> AgriResult<Self> {
        let labels: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| strip_synset(l).to_string())
            .collect();

        if labels.is_empty() {
            return Err(AgriError::Data("label file has no labels".to_string()));
        }

        Ok(Self { labels })
    }

    pub fn load(path: &Path) -> AgriResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AgriError::Io(format!("cannot read labels {:?}: {}", path, e)))?;
        let map = Self::from_lines(&text)?;
        log::info!("Loaded {} class labels from {:?}", map.len(), path);
        Ok(map)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// "n01440764 tench, Tinca tinca" -> "tench, Tinca tinca"
fn strip_synset(line: &str) -> &str {
    match line.split_once(' ') {
        Some((id, rest))
            if id.len() == 9 && id.starts_with('n') && id[1..].chars().all(|c| c.is_ascii_digit()) =>
        {
            rest.trim()
        }
        _ => line,
    }
}
