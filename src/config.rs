//! Planner configuration.

use serde::{Deserialize, Serialize};

/// Default cap on ranked schedules kept after generation.
pub const DEFAULT_MAX_RESULTS: usize = 200;

/// Default number of schedules per browsing page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Settings for a planning run.
///
/// Deserializes from a partial object; missing fields take defaults.
///
/// ```
/// use u_timetable::config::PlannerConfig;
///
/// let config: PlannerConfig = serde_json::from_str(r#"{"page_size": 10}"#).unwrap();
/// assert_eq!(config.page_size, 10);
/// assert_eq!(config.max_results, Some(200));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Keep at most this many ranked schedules. `None` = keep all.
    pub max_results: Option<usize>,
    /// Schedules per page when browsing.
    pub page_size: usize,
}

impl PlannerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Removes the result cap.
    pub fn unlimited(mut self) -> Self {
        self.max_results = None;
        self
    }

    /// Sets the page size (minimum 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_results: Some(DEFAULT_MAX_RESULTS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::new();
        assert_eq!(config.max_results, Some(DEFAULT_MAX_RESULTS));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_builders() {
        let config = PlannerConfig::new().with_max_results(10).with_page_size(0);
        assert_eq!(config.max_results, Some(10));
        assert_eq!(config.page_size, 1);
        assert_eq!(config.unlimited().max_results, None);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: PlannerConfig = serde_json::from_str(r#"{"max_results": null}"#).unwrap();
        assert_eq!(config.max_results, None);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);

        let config: PlannerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PlannerConfig::default());
    }
}
