//! Search state derived from the current URL.
//!
//! Pages reconstruct this on every render; nothing is persisted. Defaults
//! are filled explicitly rather than scattered through the handlers.

use std::collections::HashMap;

pub const DEFAULT_SKILL: &str = "overall";
pub const DEFAULT_RANK: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub skill: String,
    pub rank: u32,
    pub name: String,
    pub opponent: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            skill: DEFAULT_SKILL.to_string(),
            rank: DEFAULT_RANK,
            name: String::new(),
            opponent: String::new(),
        }
    }
}

impl SearchQuery {
    /// Builds the search state from parsed query parameters, filling each
    /// absent (or unparseable) field with its default.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        Self {
            skill: params
                .get("skill")
                .filter(|s| !s.is_empty())
                .cloned()
                .unwrap_or(defaults.skill),
            rank: params
                .get("rank")
                .and_then(|r| r.parse().ok())
                .unwrap_or(defaults.rank),
            name: params.get("name").cloned().unwrap_or_default(),
            opponent: params.get("opponent").cloned().unwrap_or_default(),
        }
    }

    /// Same as [`from_params`](Self::from_params), with the skill taken
    /// from a path segment (`/hiscores/{skill}`, `/hiscores/skill/{skill}`)
    /// overriding any `skill` query parameter.
    pub fn from_path_skill(skill: &str, params: &HashMap<String, String>) -> Self {
        let mut query = Self::from_params(params);
        if !skill.is_empty() {
            query.skill = skill.to_string();
        }
        query
    }
}
