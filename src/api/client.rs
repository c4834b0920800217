use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::queries::{
    CALENDAR_STREAK_QUERY, COMBINED_PROFILE_QUERY, CONTEST_HISTORY_QUERY, LANGUAGE_COUNT_QUERY,
    RECENT_AC_QUERY, TAG_COUNT_QUERY, USER_PROFILE_QUERY,
};
use super::transport::{GraphQLRequest, HttpTransport, LEETCODE_GRAPHQL, Transport};
use super::types::*;
use crate::error::{FetchError, FetchResult, TransportError};

pub const DEFAULT_RECENT_LIMIT: u32 = 15;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    /// Applied to every request individually.
    pub timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: LEETCODE_GRAPHQL.to_string(),
            timeout: None,
        }
    }
}

/// Stateless request layer: one method per GraphQL document, each returning
/// the projected value.
#[derive(Clone)]
pub struct LeetCodeClient<T = HttpTransport> {
    transport: T,
    timeout: Option<Duration>,
}

impl LeetCodeClient<HttpTransport> {
    pub fn new(settings: &ClientSettings) -> FetchResult<Self> {
        let transport = HttpTransport::new(&settings.endpoint)?;
        Ok(Self::with_transport(transport).timeout(settings.timeout))
    }
}

impl<T: Transport> LeetCodeClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            timeout: None,
        }
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn execute<D: DeserializeOwned>(
        &self,
        request: GraphQLRequest,
    ) -> FetchResult<GraphQLResponse<D>> {
        debug!(operation = request.operation, variables = ?request.variables, "sending GraphQL request");

        let body = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.transport.send(&request))
                .await
                .map_err(|_| TransportError::Timeout(limit))??,
            None => self.transport.send(&request).await?,
        };

        serde_json::from_str(&body).map_err(|e| {
            FetchError::malformed(format!("{} response could not be decoded: {e}", request.operation))
        })
    }

    /// Resolves the `matchedUser` node. A null node is a missing user; an
    /// `errors` array alongside a present node is still a failure.
    fn matched_user<U>(
        resp: GraphQLResponse<MatchedUserData<U>>,
        username: &str,
    ) -> FetchResult<U> {
        let errors = resp.error_messages();
        match resp.data {
            Some(MatchedUserData {
                matched_user: Some(user),
            }) => {
                if errors.is_empty() {
                    Ok(user)
                } else {
                    warn!(username, ?errors, "GraphQL errors alongside matched user");
                    Err(FetchError::Service(errors))
                }
            }
            Some(MatchedUserData { matched_user: None }) => {
                warn!(username, "no matched user");
                Err(FetchError::UserNotFound(username.to_string()))
            }
            None => Err(Self::missing_data(errors, "matchedUser")),
        }
    }

    /// For documents that do not go through `matchedUser`.
    fn top_level<D>(resp: GraphQLResponse<D>) -> FetchResult<D> {
        let errors = resp.error_messages();
        if !errors.is_empty() {
            warn!(?errors, "GraphQL errors in response");
            return Err(FetchError::Service(errors));
        }
        resp.data.ok_or_else(|| FetchError::malformed("response has no data"))
    }

    fn missing_data(errors: Vec<String>, what: &str) -> FetchError {
        if errors.is_empty() {
            FetchError::malformed(format!("response has no data for {what}"))
        } else {
            FetchError::Service(errors)
        }
    }

    pub async fn fetch_profile(&self, username: &str) -> FetchResult<Profile> {
        let req = GraphQLRequest::new("userPublicProfile", USER_PROFILE_QUERY)
            .var("username", username);
        let resp = self.execute::<MatchedUserData<Profile>>(req).await?;
        Self::matched_user(resp, username)
    }

    pub async fn fetch_total_count(&self, username: &str) -> FetchResult<u64> {
        let req = GraphQLRequest::new("languageStats", LANGUAGE_COUNT_QUERY)
            .var("username", username);
        let resp = self.execute::<MatchedUserData<LanguageCountUser>>(req).await?;
        let buckets = Self::matched_user(resp, username)?
            .language_problem_count
            .ok_or_else(|| FetchError::malformed("languageProblemCount is missing"))?;
        Ok(total_solved(&buckets))
    }

    pub async fn fetch_topic_wise(&self, username: &str) -> FetchResult<TopicWise> {
        let req =
            GraphQLRequest::new("skillStats", TAG_COUNT_QUERY).var("username", username);
        let resp = self.execute::<MatchedUserData<TagCountUser>>(req).await?;
        Self::matched_user(resp, username)?
            .tag_problem_counts
            .ok_or_else(|| FetchError::malformed("tagProblemCounts is missing"))
    }

    pub async fn fetch_recent_submissions(
        &self,
        username: &str,
        limit: u32,
    ) -> FetchResult<Vec<RecentSubmission>> {
        if limit == 0 {
            return Err(FetchError::InvalidLimit(limit));
        }
        let req = GraphQLRequest::new("recentAcSubmissions", RECENT_AC_QUERY)
            .var("username", username)
            .var("limit", limit);
        let resp = self.execute::<RecentAcData>(req).await?;
        let mut list = Self::top_level(resp)?
            .recent_ac_submission_list
            .ok_or_else(|| FetchError::malformed("recentAcSubmissionList is missing"))?;
        list.truncate(limit as usize);
        Ok(list)
    }

    pub async fn fetch_contest_history(&self, username: &str) -> FetchResult<Vec<ContestEntry>> {
        let req = GraphQLRequest::new("userContestRankingHistory", CONTEST_HISTORY_QUERY)
            .var("username", username);
        let resp = self.execute::<ContestHistoryData>(req).await?;
        let history = Self::top_level(resp)?
            .user_contest_ranking_history
            .ok_or_else(|| FetchError::malformed("userContestRankingHistory is missing"))?;
        Ok(history.into_iter().map(ContestEntry::from).collect())
    }

    /// A user without a calendar, or without a streak on it, has a streak of 0.
    pub async fn fetch_streak(&self, username: &str) -> FetchResult<u64> {
        let req = GraphQLRequest::new("userProfileCalendar", CALENDAR_STREAK_QUERY)
            .var("username", username);
        let resp = self.execute::<MatchedUserData<CalendarUser>>(req).await?;
        let user = Self::matched_user(resp, username)?;
        Ok(streak_or_zero(user.user_calendar.as_ref()))
    }

    /// Everything in a single round-trip. Fails with `UserNotFound` before
    /// any projection is attempted.
    pub async fn fetch_full_profile(
        &self,
        username: &str,
        limit: u32,
    ) -> FetchResult<FullProfileData> {
        if limit == 0 {
            return Err(FetchError::InvalidLimit(limit));
        }
        let req = GraphQLRequest::new("fullProfile", COMBINED_PROFILE_QUERY)
            .var("username", username)
            .var("limit", limit);
        let resp = self.execute::<FullProfileData>(req).await?;

        let errors = resp.error_messages();
        let data = match resp.data {
            Some(data) => data,
            None => return Err(Self::missing_data(errors, "fullProfile")),
        };
        if data.matched_user.is_none() {
            warn!(username, "no matched user");
            return Err(FetchError::UserNotFound(username.to_string()));
        }
        if !errors.is_empty() {
            warn!(username, ?errors, "GraphQL errors alongside matched user");
            return Err(FetchError::Service(errors));
        }
        Ok(data)
    }
}
