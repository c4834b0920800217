use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::api::client::{ClientSettings, DEFAULT_RECENT_LIMIT, LeetCodeClient};
use crate::api::transport::{HttpTransport, Transport};
use crate::api::types::*;
use crate::error::{FetchError, FetchResult};
use crate::options::LoadOptions;

/// A LeetCode user and whatever has been fetched for them so far.
///
/// Every field starts unset. [`ProfileClient::load`] replaces all of them in
/// one go; the granular `fetch_*` methods each touch only their own field.
/// A failed call never changes any field.
pub struct ProfileClient<T = HttpTransport> {
    username: String,
    api: LeetCodeClient<T>,
    profile: Option<Profile>,
    total_count: Option<u64>,
    topicwise: Option<TopicWise>,
    recent: Option<Vec<RecentSubmission>>,
    contest: Option<Vec<ContestEntry>>,
    streak: Option<u64>,
}

/// Owned copy of a client's fields, e.g. for printing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    pub profile: Option<Profile>,
    pub total_count: Option<u64>,
    pub topicwise: Option<TopicWise>,
    pub recent: Option<Vec<RecentSubmission>>,
    pub contest: Option<Vec<ContestEntry>>,
    pub streak: Option<u64>,
}

impl ProfileSnapshot {
    /// Projects a combined response onto the requested categories. The
    /// matched user is checked first; after that only requested categories
    /// are decoded, and any of them with missing or invalid backing data
    /// fails the whole snapshot.
    pub fn project(data: FullProfileData, username: &str, options: &LoadOptions) -> FetchResult<Self> {
        let user = data
            .matched_user
            .ok_or_else(|| FetchError::UserNotFound(username.to_string()))?;
        let profile: Profile = decode_node(Some(&user), "matchedUser")?;

        let total_count = requested(options.total_count, || {
            let buckets: Vec<LanguageCount> =
                decode_node(user.get("languageProblemCount"), "languageProblemCount")?;
            Ok(total_solved(&buckets))
        })?;

        let topicwise = requested(options.topicwise, || {
            decode_node::<TopicWise>(user.get("tagProblemCounts"), "tagProblemCounts")
        })?;

        let recent = requested(options.recent, || {
            let mut list: Vec<RecentSubmission> = decode_node(
                data.recent_ac_submission_list.as_ref(),
                "recentAcSubmissionList",
            )?;
            list.truncate(options.recent_limit as usize);
            Ok(list)
        })?;

        let contest = requested(options.contest, || {
            let history: Vec<ContestRecord> = decode_node(
                data.user_contest_ranking_history.as_ref(),
                "userContestRankingHistory",
            )?;
            Ok(history.into_iter().map(ContestEntry::from).collect::<Vec<_>>())
        })?;

        let streak = requested(options.streak, || match user.get("userCalendar") {
            None | Some(Value::Null) => Ok(0),
            Some(_) => {
                let calendar: UserCalendar = decode_node(user.get("userCalendar"), "userCalendar")?;
                Ok(streak_or_zero(Some(&calendar)))
            }
        })?;

        Ok(Self {
            profile: Some(profile),
            total_count,
            topicwise,
            recent,
            contest,
            streak,
        })
    }
}

fn requested<V>(on: bool, project: impl FnOnce() -> FetchResult<V>) -> FetchResult<Option<V>> {
    if on { project().map(Some) } else { Ok(None) }
}

fn validate_username(username: String) -> FetchResult<String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidUsername(username));
    }
    Ok(trimmed.to_string())
}

impl ProfileClient<HttpTransport> {
    pub fn new(username: impl Into<String>) -> FetchResult<Self> {
        Self::with_settings(username, &ClientSettings::default())
    }

    pub fn with_settings(username: impl Into<String>, settings: &ClientSettings) -> FetchResult<Self> {
        let username = validate_username(username.into())?;
        Ok(Self::from_parts(username, LeetCodeClient::new(settings)?))
    }
}

impl<T: Transport> ProfileClient<T> {
    pub fn with_client(username: impl Into<String>, api: LeetCodeClient<T>) -> FetchResult<Self> {
        let username = validate_username(username.into())?;
        Ok(Self::from_parts(username, api))
    }

    fn from_parts(username: String, api: LeetCodeClient<T>) -> Self {
        Self {
            username,
            api,
            profile: None,
            total_count: None,
            topicwise: None,
            recent: None,
            contest: None,
            streak: None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn topicwise(&self) -> Option<&TopicWise> {
        self.topicwise.as_ref()
    }

    pub fn recent(&self) -> Option<&[RecentSubmission]> {
        self.recent.as_deref()
    }

    pub fn contest(&self) -> Option<&[ContestEntry]> {
        self.contest.as_deref()
    }

    pub fn streak(&self) -> Option<u64> {
        self.streak
    }

    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            profile: self.profile.clone(),
            total_count: self.total_count,
            topicwise: self.topicwise.clone(),
            recent: self.recent.clone(),
            contest: self.contest.clone(),
            streak: self.streak,
        }
    }

    /// Fetches the profile plus every category switched on in `options`, in a
    /// single request. Categories not requested end up unset.
    pub async fn load(&mut self, options: LoadOptions) -> FetchResult<()> {
        // The limit only matters when recent submissions are wanted.
        let limit = if options.recent {
            options.recent_limit
        } else {
            DEFAULT_RECENT_LIMIT
        };
        let data = self.api.fetch_full_profile(&self.username, limit).await?;
        let snapshot = ProfileSnapshot::project(data, &self.username, &options)?;
        info!(username = %self.username, ?options, "profile loaded");

        self.profile = snapshot.profile;
        self.total_count = snapshot.total_count;
        self.topicwise = snapshot.topicwise;
        self.recent = snapshot.recent;
        self.contest = snapshot.contest;
        self.streak = snapshot.streak;
        Ok(())
    }

    pub async fn fetch_profile(&mut self) -> FetchResult<&Profile> {
        let profile = self.api.fetch_profile(&self.username).await?;
        Ok(&*self.profile.insert(profile))
    }

    pub async fn fetch_total_count(&mut self) -> FetchResult<u64> {
        let total = self.api.fetch_total_count(&self.username).await?;
        self.total_count = Some(total);
        Ok(total)
    }

    pub async fn fetch_topic_wise(&mut self) -> FetchResult<&TopicWise> {
        let topics = self.api.fetch_topic_wise(&self.username).await?;
        Ok(&*self.topicwise.insert(topics))
    }

    /// `limit` of `None` uses the default of 15.
    pub async fn fetch_recent_submissions(
        &mut self,
        limit: Option<u32>,
    ) -> FetchResult<&[RecentSubmission]> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        let recent = self
            .api
            .fetch_recent_submissions(&self.username, limit)
            .await?;
        Ok(self.recent.insert(recent).as_slice())
    }

    pub async fn fetch_contest_history(&mut self) -> FetchResult<&[ContestEntry]> {
        let history = self.api.fetch_contest_history(&self.username).await?;
        Ok(self.contest.insert(history).as_slice())
    }

    pub async fn fetch_streak(&mut self) -> FetchResult<u64> {
        let streak = self.api.fetch_streak(&self.username).await?;
        self.streak = Some(streak);
        Ok(streak)
    }
}
