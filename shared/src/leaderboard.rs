use chrono::{DateTime, Utc};

use crate::calendar::weekly_ac_count;
use crate::profile::{Friend, UserProfile};
use crate::view::LeaderboardMode;

/// Rank used for users the host site has not ranked; sorts after everyone.
pub const UNRANKED: u64 = u64::MAX;

pub const CURRENT_USER_FALLBACK_NAME: &str = "You";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// Display name.
    pub username: String,
    /// Account handle used for the profile link.
    pub handle: String,
    pub avatar_url: String,
    pub rank: u64,
    pub solved_total: u64,
    pub solved_this_week: u64,
    pub is_current_user: bool,
}

impl LeaderboardEntry {
    fn from_profile(
        username: String,
        handle: &str,
        profile: &UserProfile,
        is_current_user: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            handle: handle.to_string(),
            avatar_url: profile.avatar_url.clone(),
            rank: profile.ranking.unwrap_or(UNRANKED),
            solved_total: profile.total_solved,
            solved_this_week: weekly_ac_count(&profile.activity_calendar, now),
            is_current_user,
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.rank != UNRANKED
    }

    pub fn rank_label(&self) -> String {
        if self.is_ranked() {
            self.rank.to_string()
        } else {
            "N/A".to_string()
        }
    }
}

/// Both orderings of the same set of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    /// Ascending global rank, unranked last.
    pub all_time: Vec<LeaderboardEntry>,
    /// Descending count of submissions since Sunday.
    pub weekly: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn entries(&self, mode: LeaderboardMode) -> &[LeaderboardEntry] {
        match mode {
            LeaderboardMode::AllTime => &self.all_time,
            LeaderboardMode::Weekly => &self.weekly,
        }
    }
}

/// Build the leaderboard from the current user's profile and their friends.
///
/// A missing current-user profile still yields a "You" row with zeroed stats.
pub fn build_leaderboard(
    current_handle: &str,
    current_user: Option<&UserProfile>,
    friends: &[Friend],
    now: DateTime<Utc>,
) -> Leaderboard {
    let fallback = UserProfile::default();
    let me = current_user.unwrap_or(&fallback);
    let display_name = me
        .real_name
        .clone()
        .unwrap_or_else(|| CURRENT_USER_FALLBACK_NAME.to_string());

    let mut all_time = Vec::with_capacity(friends.len() + 1);
    all_time.push(LeaderboardEntry::from_profile(
        display_name,
        current_handle,
        me,
        true,
        now,
    ));
    all_time.extend(friends.iter().map(|friend| {
        LeaderboardEntry::from_profile(
            friend.username.clone(),
            &friend.username,
            &friend.profile,
            false,
            now,
        )
    }));

    let mut weekly = all_time.clone();
    all_time.sort_by_key(|entry| entry.rank);
    weekly.sort_by(|a, b| b.solved_this_week.cmp(&a.solved_this_week));

    Leaderboard { all_time, weekly }
}
