//! Built-in training scenario catalog.
//!
//! Curated scenario metadata embedded in the binary. The catalog is
//! advisory: it feeds the discovery endpoint and the CLI listing, while
//! session creation accepts any scenario id verbatim.

use std::fmt;

use serde::Serialize;

// ============================================================================
// Types
// ============================================================================

/// Metadata for one built-in training scenario.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScenarioInfo {
    /// Unique identifier (snake_case, e.g. "advanced_phishing").
    pub scenario_id: &'static str,

    /// Human-readable display name.
    pub name: &'static str,

    /// Short description shown in discovery listings.
    pub description: &'static str,

    /// Coarse difficulty rating.
    pub difficulty: Difficulty,

    /// Events a full run of this scenario delivers.
    pub total_events: usize,
}

/// Difficulty rating for catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

static CATALOG: &[ScenarioInfo] = &[ScenarioInfo {
    scenario_id: "advanced_phishing",
    name: "Advanced Multi-Stage Attack",
    description: "Mixed stream of routine activity and a staged intrusion: \
                  phishing delivery, credential abuse, lateral movement, and \
                  ransomware deployment",
    difficulty: Difficulty::Intermediate,
    total_events: 16,
}];

// ============================================================================
// Public API
// ============================================================================

/// All catalog entries in registry order.
#[must_use]
pub fn all() -> &'static [ScenarioInfo] {
    CATALOG
}

/// Look up a scenario by exact id.
#[must_use]
pub fn find(scenario_id: &str) -> Option<&'static ScenarioInfo> {
    CATALOG.iter().find(|s| s.scenario_id == scenario_id)
}

/// List entries, optionally filtered by difficulty.
#[must_use]
pub fn list(difficulty: Option<Difficulty>) -> Vec<&'static ScenarioInfo> {
    CATALOG
        .iter()
        .filter(|s| difficulty.is_none_or(|d| s.difficulty == d))
        .collect()
}

/// Suggest a similar scenario id for typo correction.
///
/// Returns the closest match if its Damerau-Levenshtein distance is ≤ 3.
#[must_use]
pub fn suggest(input: &str) -> Option<String> {
    CATALOG
        .iter()
        .map(|s| (s.scenario_id, strsim::damerau_levenshtein(input, s.scenario_id)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(id, _)| id.to_string())
}

/// Display name for a scenario id, falling back to the id itself for
/// scenarios outside the catalog.
#[must_use]
pub fn display_name(scenario_id: &str) -> String {
    find(scenario_id).map_or_else(|| scenario_id.to_owned(), |s| s.name.to_owned())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn find_existing() {
        let scenario = find("advanced_phishing");
        assert!(scenario.is_some());
        assert_eq!(scenario.unwrap().name, "Advanced Multi-Stage Attack");
        assert_eq!(scenario.unwrap().difficulty, Difficulty::Intermediate);
        assert_eq!(scenario.unwrap().total_events, 16);
    }

    #[test]
    fn find_missing() {
        assert!(find("nonexistent").is_none());
    }

    #[test]
    fn no_duplicate_scenario_ids() {
        let ids: Vec<&str> = all().iter().map(|s| s.scenario_id).collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len(), "Duplicate scenario ids found");
    }

    #[test]
    fn suggest_close() {
        // "advanced_phising" is one edit away
        let suggestion = suggest("advanced_phising");
        assert_eq!(suggestion, Some("advanced_phishing".to_string()));
    }

    #[test]
    fn suggest_far() {
        assert!(suggest("xyzabc123").is_none());
    }

    #[test]
    fn list_filter_by_difficulty() {
        let intermediate = list(Some(Difficulty::Intermediate));
        assert!(!intermediate.is_empty());
        for s in &intermediate {
            assert_eq!(s.difficulty, Difficulty::Intermediate);
        }
        assert!(list(Some(Difficulty::Advanced)).is_empty());
    }

    #[test]
    fn display_name_falls_back_to_id() {
        assert_eq!(display_name("advanced_phishing"), "Advanced Multi-Stage Attack");
        assert_eq!(display_name("custom_drill"), "custom_drill");
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        let json = serde_json::to_value(Difficulty::Intermediate).unwrap();
        assert_eq!(json, serde_json::json!("intermediate"));
    }

    #[test]
    fn entry_metadata_populated() {
        for scenario in all() {
            assert!(!scenario.scenario_id.is_empty());
            assert!(
                !scenario.name.is_empty(),
                "Scenario '{}' has empty name",
                scenario.scenario_id
            );
            assert!(
                !scenario.description.is_empty(),
                "Scenario '{}' has empty description",
                scenario.scenario_id
            );
            assert!(
                scenario.total_events > 0,
                "Scenario '{}' advertises zero events",
                scenario.scenario_id
            );
        }
    }
}
