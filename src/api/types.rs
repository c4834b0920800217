use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::error::{FetchError, FetchResult};

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

impl<T> GraphQLResponse<T> {
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .flatten()
            .map(|e| e.message.clone())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedUserData<U> {
    pub matched_user: Option<U>,
}

// Profile types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub username: String,
    pub github_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub profile: Option<ProfileDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    pub ranking: Option<i64>,
    pub user_avatar: Option<String>,
    pub real_name: Option<String>,
    pub about_me: Option<String>,
    pub school: Option<String>,
    pub country_name: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub reputation: Option<i64>,
}

// Solved count types
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageCountUser {
    pub language_problem_count: Option<Vec<LanguageCount>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageCount {
    pub problems_solved: Option<u64>,
}

/// Sums `problemsSolved` over every language bucket. A bucket without a value
/// contributes nothing.
pub fn total_solved(buckets: &[LanguageCount]) -> u64 {
    buckets.iter().filter_map(|b| b.problems_solved).sum()
}

// Topic breakdown types
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCountUser {
    pub tag_problem_counts: Option<TopicWise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicWise {
    pub advanced: Vec<TagCount>,
    pub intermediate: Vec<TagCount>,
    pub fundamental: Vec<TagCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag_name: String,
    pub problems_solved: u64,
}

// Recent submission types
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAcData {
    pub recent_ac_submission_list: Option<Vec<RecentSubmission>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSubmission {
    pub id: String,
    pub title: String,
    pub title_slug: String,
    /// Epoch seconds. The service sends this as a string.
    #[serde(deserialize_with = "epoch_seconds")]
    pub timestamp: i64,
}

fn epoch_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid timestamp: {s:?}"))),
    }
}

// Contest history types
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestHistoryData {
    pub user_contest_ranking_history: Option<Vec<ContestRecord>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContestRecord {
    pub ranking: i64,
    pub rating: f64,
    pub contest: ContestInfo,
}

// startTime is requested alongside the title but never projected.
#[derive(Debug, Clone, Deserialize)]
pub struct ContestInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestEntry {
    pub title: String,
    pub ranking: i64,
    pub rating: f64,
}

impl From<ContestRecord> for ContestEntry {
    fn from(record: ContestRecord) -> Self {
        Self {
            title: record.contest.title,
            ranking: record.ranking,
            rating: record.rating,
        }
    }
}

// Calendar types
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarUser {
    pub user_calendar: Option<UserCalendar>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserCalendar {
    pub streak: Option<u64>,
}

pub fn streak_or_zero(calendar: Option<&UserCalendar>) -> u64 {
    calendar.and_then(|c| c.streak).unwrap_or(0)
}

// Combined query types

/// The combined response, kept as raw JSON per node so that only the
/// categories actually requested are ever decoded.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullProfileData {
    pub matched_user: Option<Value>,
    pub recent_ac_submission_list: Option<Value>,
    pub user_contest_ranking_history: Option<Value>,
}

/// Decodes a node that must be present. Null and absent are both missing.
pub fn decode_node<V: DeserializeOwned>(node: Option<&Value>, name: &str) -> FetchResult<V> {
    match node {
        None | Some(Value::Null) => Err(FetchError::malformed(format!("{name} is missing"))),
        Some(value) => V::deserialize(value)
            .map_err(|e| FetchError::malformed(format!("{name} could not be decoded: {e}"))),
    }
}
