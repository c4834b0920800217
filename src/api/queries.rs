pub const USER_PROFILE_QUERY: &str = r#"
query userPublicProfile($username: String!) {
  matchedUser(username: $username) {
    username
    githubUrl
    twitterUrl
    linkedinUrl
    profile {
      ranking
      userAvatar
      realName
      aboutMe
      school
      countryName
      company
      jobTitle
      reputation
    }
  }
}
"#;

pub const LANGUAGE_COUNT_QUERY: &str = r#"
query languageStats($username: String!) {
  matchedUser(username: $username) {
    languageProblemCount {
      problemsSolved
    }
  }
}
"#;

pub const TAG_COUNT_QUERY: &str = r#"
query skillStats($username: String!) {
  matchedUser(username: $username) {
    tagProblemCounts {
      advanced { tagName problemsSolved }
      intermediate { tagName problemsSolved }
      fundamental { tagName problemsSolved }
    }
  }
}
"#;

pub const RECENT_AC_QUERY: &str = r#"
query recentAcSubmissions($username: String!, $limit: Int!) {
  recentAcSubmissionList(username: $username, limit: $limit) {
    id
    title
    titleSlug
    timestamp
  }
}
"#;

pub const CONTEST_HISTORY_QUERY: &str = r#"
query userContestRankingHistory($username: String!) {
  userContestRankingHistory(username: $username) {
    ranking
    rating
    contest {
      title
      startTime
    }
  }
}
"#;

pub const CALENDAR_STREAK_QUERY: &str = r#"
query userProfileCalendar($username: String!) {
  matchedUser(username: $username) {
    userCalendar {
      streak
    }
  }
}
"#;

pub const COMBINED_PROFILE_QUERY: &str = r#"
query fullProfile($username: String!, $limit: Int!) {
  matchedUser(username: $username) {
    username
    githubUrl
    twitterUrl
    linkedinUrl
    profile {
      ranking
      userAvatar
      realName
      aboutMe
      school
      countryName
      company
      jobTitle
      reputation
    }
    userCalendar {
      streak
    }
    tagProblemCounts {
      advanced { tagName problemsSolved }
      intermediate { tagName problemsSolved }
      fundamental { tagName problemsSolved }
    }
    languageProblemCount {
      problemsSolved
    }
  }
  recentAcSubmissionList(username: $username, limit: $limit) {
    id
    title
    titleSlug
    timestamp
  }
  userContestRankingHistory(username: $username) {
    ranking
    rating
    contest {
      title
      startTime
    }
  }
}
"#;
