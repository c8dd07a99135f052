use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::calendar::parse_submission_calendar;

pub const SITE_ORIGIN: &str = "https://leetcode.com";

pub fn profile_url(username: &str) -> String {
    format!("{SITE_ORIGIN}/u/{username}")
}

pub fn problem_url(title_slug: &str) -> String {
    format!("{SITE_ORIGIN}/problems/{title_slug}")
}

/// One entry of the `/friends` payload: a username plus the host site's
/// profile snapshot for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FriendRecord {
    #[serde(default)]
    pub friend_username: String,
    #[serde(default)]
    pub data: Option<ProfileData>,
}

/// Host-site profile payload. Every level is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileData {
    pub user_public_profile: Option<PublicProfile>,
    pub user_session_stats: Option<SessionStats>,
    pub user_profile_calendar: Option<ProfileCalendar>,
    pub recent_ac_submissions: Option<Vec<RecentSubmission>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicProfile {
    pub profile: Option<ProfileFields>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileFields {
    pub real_name: Option<String>,
    pub ranking: Option<u64>,
    pub user_avatar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionStats {
    pub submit_stats: Option<SubmitStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitStats {
    pub ac_submission_num: Vec<DifficultyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCount {
    pub difficulty: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileCalendar {
    pub user_calendar: Option<UserCalendar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserCalendar {
    pub streak: Option<u64>,
    pub total_active_days: Option<u64>,
    /// JSON object (usually string-encoded) of unix-day timestamp -> count.
    pub submission_calendar: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecentSubmission {
    pub title: String,
    pub title_slug: String,
    /// `None` when the wire value is not a usable number.
    #[serde(deserialize_with = "de_lenient_i64")]
    pub timestamp: Option<i64>,
}

/// The host API sends timestamps as strings; fixtures sometimes use numbers.
/// Anything unparseable decodes to `None` instead of failing the whole reply.
fn de_lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flexible {
        Int(i64),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Flexible::deserialize(deserializer)? {
        Flexible::Int(value) => Some(value),
        Flexible::Float(value) => Some(value as i64),
        Flexible::Text(text) => text.trim().parse::<i64>().ok(),
        Flexible::Other(_) => None,
    })
}

/// Flattened, render-ready view of a user's stats.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub real_name: Option<String>,
    pub ranking: Option<u64>,
    pub avatar_url: String,
    pub total_solved: u64,
    pub easy_solved: u64,
    pub medium_solved: u64,
    pub hard_solved: u64,
    pub activity_calendar: BTreeMap<i64, u64>,
    pub streak_days: u64,
    pub active_days: u64,
}

impl ProfileData {
    fn fields(&self) -> Option<&ProfileFields> {
        self.user_public_profile.as_ref()?.profile.as_ref()
    }

    fn solved(&self, difficulty: &str) -> u64 {
        self.user_session_stats
            .as_ref()
            .and_then(|stats| stats.submit_stats.as_ref())
            .and_then(|stats| {
                stats
                    .ac_submission_num
                    .iter()
                    .find(|entry| entry.difficulty == difficulty)
            })
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    fn calendar(&self) -> Option<&UserCalendar> {
        self.user_profile_calendar.as_ref()?.user_calendar.as_ref()
    }

    pub fn to_profile(&self) -> UserProfile {
        let fields = self.fields();
        let calendar = self.calendar();
        UserProfile {
            real_name: fields
                .and_then(|f| f.real_name.clone())
                .filter(|name| !name.trim().is_empty()),
            // A zero ranking means the host has not ranked the user yet.
            ranking: fields.and_then(|f| f.ranking).filter(|rank| *rank > 0),
            avatar_url: fields
                .and_then(|f| f.user_avatar.clone())
                .unwrap_or_default(),
            total_solved: self.solved("All"),
            easy_solved: self.solved("Easy"),
            medium_solved: self.solved("Medium"),
            hard_solved: self.solved("Hard"),
            activity_calendar: calendar
                .and_then(|c| c.submission_calendar.as_ref())
                .map(parse_submission_calendar)
                .unwrap_or_default(),
            streak_days: calendar.and_then(|c| c.streak).unwrap_or(0),
            active_days: calendar.and_then(|c| c.total_active_days).unwrap_or(0),
        }
    }
}

/// Another user the current user is connected with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Friend {
    pub username: String,
    pub profile: UserProfile,
    pub recent_submissions: Vec<RecentSubmission>,
}

impl From<FriendRecord> for Friend {
    fn from(record: FriendRecord) -> Self {
        let data = record.data.unwrap_or_default();
        Self {
            profile: data.to_profile(),
            recent_submissions: data
                .recent_ac_submissions
                .unwrap_or_default()
                .into_iter()
                .filter(|sub| sub.timestamp.is_some())
                .collect(),
            username: record.friend_username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Friend, FriendRecord, ProfileData, problem_url, profile_url};
    use serde_json::json;

    #[test]
    fn friend_record_flattens_nested_profile() {
        let record: FriendRecord = serde_json::from_value(json!({
            "friend_username": "alice",
            "data": {
                "userPublicProfile": {
                    "profile": { "realName": "Alice", "ranking": 1234, "userAvatar": "https://img/a.png" }
                },
                "userSessionStats": {
                    "submitStats": {
                        "acSubmissionNum": [
                            { "difficulty": "All", "count": 60 },
                            { "difficulty": "Easy", "count": 30 },
                            { "difficulty": "Medium", "count": 20 },
                            { "difficulty": "Hard", "count": 10 }
                        ]
                    }
                },
                "userProfileCalendar": {
                    "userCalendar": {
                        "streak": 4,
                        "totalActiveDays": 40,
                        "submissionCalendar": "{\"1700000000\": 3}"
                    }
                },
                "recentAcSubmissions": [
                    { "title": "Two Sum", "titleSlug": "two-sum", "timestamp": "1700000100" }
                ]
            }
        }))
        .expect("friend record should decode");

        let friend = Friend::from(record);
        assert_eq!(friend.username, "alice");
        assert_eq!(friend.profile.real_name.as_deref(), Some("Alice"));
        assert_eq!(friend.profile.ranking, Some(1234));
        assert_eq!(friend.profile.total_solved, 60);
        assert_eq!(friend.profile.easy_solved, 30);
        assert_eq!(friend.profile.medium_solved, 20);
        assert_eq!(friend.profile.hard_solved, 10);
        assert_eq!(friend.profile.streak_days, 4);
        assert_eq!(friend.profile.active_days, 40);
        assert_eq!(friend.profile.activity_calendar.get(&1_700_000_000), Some(&3));
        assert_eq!(friend.recent_submissions.len(), 1);
        assert_eq!(friend.recent_submissions[0].timestamp, Some(1_700_000_100));
    }

    #[test]
    fn friend_without_data_gets_empty_profile() {
        let record: FriendRecord =
            serde_json::from_value(json!({ "friend_username": "bob" })).expect("decode");
        let friend = Friend::from(record);
        assert_eq!(friend.username, "bob");
        assert_eq!(friend.profile.ranking, None);
        assert_eq!(friend.profile.total_solved, 0);
        assert!(friend.recent_submissions.is_empty());
    }

    #[test]
    fn zero_ranking_counts_as_unranked() {
        let data: ProfileData = serde_json::from_value(json!({
            "userPublicProfile": { "profile": { "ranking": 0 } }
        }))
        .expect("decode");
        assert_eq!(data.to_profile().ranking, None);
    }

    #[test]
    fn numeric_submission_timestamps_decode() {
        let data: ProfileData = serde_json::from_value(json!({
            "recentAcSubmissions": [{ "title": "A", "titleSlug": "a", "timestamp": 42 }]
        }))
        .expect("decode");
        assert_eq!(data.recent_ac_submissions.unwrap_or_default()[0].timestamp, Some(42));
    }

    #[test]
    fn malformed_submission_timestamps_are_dropped_not_fatal() {
        let records: Vec<FriendRecord> = serde_json::from_value(json!([
            {
                "friend_username": "alice",
                "data": { "recentAcSubmissions": [
                    { "title": "Two Sum", "titleSlug": "two-sum", "timestamp": "1700000000" }
                ] }
            },
            {
                "friend_username": "bob",
                "data": { "recentAcSubmissions": [
                    { "title": "Blank", "titleSlug": "blank", "timestamp": "" },
                    { "title": "Word", "titleSlug": "word", "timestamp": "soon" },
                    { "title": "Null", "titleSlug": "null", "timestamp": null },
                    { "title": "Valid", "titleSlug": "valid", "timestamp": 1700000500 }
                ] }
            }
        ]))
        .expect("bad timestamps should not fail the decode");

        let friends: Vec<Friend> = records.into_iter().map(Friend::from).collect();
        assert_eq!(friends.len(), 2);
        assert_eq!(friends[0].recent_submissions[0].timestamp, Some(1_700_000_000));
        let bob: Vec<&str> = friends[1]
            .recent_submissions
            .iter()
            .map(|sub| sub.title.as_str())
            .collect();
        assert_eq!(bob, vec!["Valid"]);
    }

    #[test]
    fn links_point_at_host_site() {
        assert_eq!(profile_url("alice"), "https://leetcode.com/u/alice");
        assert_eq!(problem_url("two-sum"), "https://leetcode.com/problems/two-sum");
    }
}
