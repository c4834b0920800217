use serde::{Deserialize, Serialize};

use crate::api::client::DEFAULT_RECENT_LIMIT;

/// Which optional categories `load` should populate. The profile itself is
/// always fetched. Unknown keys are ignored when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoadOptions {
    #[serde(alias = "total_count")]
    pub total_count: bool,
    #[serde(alias = "topicWise")]
    pub topicwise: bool,
    pub recent: bool,
    pub contest: bool,
    pub streak: bool,
    #[serde(alias = "recent_limit")]
    pub recent_limit: u32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            total_count: false,
            topicwise: false,
            recent: false,
            contest: false,
            streak: false,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl LoadOptions {
    pub fn all() -> Self {
        Self {
            total_count: true,
            topicwise: true,
            recent: true,
            contest: true,
            streak: true,
            ..Self::default()
        }
    }

    pub fn total_count(mut self, on: bool) -> Self {
        self.total_count = on;
        self
    }

    pub fn topicwise(mut self, on: bool) -> Self {
        self.topicwise = on;
        self
    }

    pub fn recent(mut self, on: bool) -> Self {
        self.recent = on;
        self
    }

    pub fn recent_limit(mut self, limit: u32) -> Self {
        self.recent_limit = limit;
        self
    }

    pub fn contest(mut self, on: bool) -> Self {
        self.contest = on;
        self
    }

    pub fn streak(mut self, on: bool) -> Self {
        self.streak = on;
        self
    }

    /// Builds options from an arbitrary JSON object, e.g. one forwarded from
    /// another service.
    pub fn from_json(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_profile_only() {
        let opts = LoadOptions::from_json(json!({})).unwrap();
        assert_eq!(opts, LoadOptions::default());
        assert_eq!(opts.recent_limit, 15);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let opts = LoadOptions::from_json(json!({
            "totalCount": true,
            "streak": true,
            "chart": true,
            "somethingNew": { "nested": 1 }
        }))
        .unwrap();
        assert!(opts.total_count);
        assert!(opts.streak);
        assert!(!opts.topicwise && !opts.recent && !opts.contest);
    }

    #[test]
    fn test_builder_and_toml() {
        let opts: LoadOptions =
            toml::from_str("total_count = true\ntopicwise = true\nrecent_limit = 5\n").unwrap();
        assert!(opts.total_count && opts.topicwise);
        assert!(!opts.recent);
        assert_eq!(opts.recent_limit, 5);

        let opts = LoadOptions::default().contest(true).recent(true).recent_limit(3);
        assert!(opts.contest && opts.recent);
        assert_eq!(opts.recent_limit, 3);
        assert!(LoadOptions::all().streak);
    }
}
