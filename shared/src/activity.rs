use crate::profile::Friend;

/// Maximum number of cards shown in the activity feed.
pub const ACTIVITY_FEED_LIMIT: usize = 50;

/// One accepted submission by a friend, flattened for the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub friend_username: String,
    pub avatar_url: String,
    pub title: String,
    pub title_slug: String,
    pub timestamp_secs: i64,
}

/// Merge every friend's recent submissions into a single feed, newest first.
///
/// The sort is stable, so submissions sharing a timestamp keep friend order.
pub fn flatten_submissions(friends: &[Friend]) -> Vec<Submission> {
    let mut feed: Vec<Submission> = friends
        .iter()
        .flat_map(|friend| {
            friend.recent_submissions.iter().filter_map(move |sub| {
                Some(Submission {
                    friend_username: friend.username.clone(),
                    avatar_url: friend.profile.avatar_url.clone(),
                    title: sub.title.clone(),
                    title_slug: sub.title_slug.clone(),
                    timestamp_secs: sub.timestamp?,
                })
            })
        })
        .collect();

    feed.sort_by(|a, b| b.timestamp_secs.cmp(&a.timestamp_secs));
    feed.truncate(ACTIVITY_FEED_LIMIT);
    feed
}

/// Coarse "time ago" label for a submission.
///
/// The unit only gets an "s" when the count is above one.
pub fn relative_time_label(now_secs: i64, timestamp_secs: i64) -> String {
    let diff = now_secs.saturating_sub(timestamp_secs);
    if diff < 60 {
        return "just now".to_string();
    }
    let (count, unit) = if diff < 3_600 {
        (diff / 60, "minute")
    } else if diff < 86_400 {
        (diff / 3_600, "hour")
    } else {
        (diff / 86_400, "day")
    };
    let plural = if count > 1 { "s" } else { "" };
    format!("{count} {unit}{plural} ago")
}

#[cfg(test)]
mod tests {
    use super::{ACTIVITY_FEED_LIMIT, flatten_submissions, relative_time_label};
    use crate::profile::{Friend, RecentSubmission};

    fn friend(name: &str, timestamps: &[i64]) -> Friend {
        Friend {
            username: name.to_string(),
            recent_submissions: timestamps
                .iter()
                .map(|ts| RecentSubmission {
                    title: format!("{name}-{ts}"),
                    title_slug: format!("{name}-{ts}"),
                    timestamp: Some(*ts),
                })
                .collect(),
            ..Friend::default()
        }
    }

    #[test]
    fn feed_is_newest_first_across_friends() {
        let friends = vec![friend("a", &[10, 30]), friend("b", &[20, 40])];
        let feed = flatten_submissions(&friends);
        let stamps: Vec<i64> = feed.iter().map(|s| s.timestamp_secs).collect();
        assert_eq!(stamps, vec![40, 30, 20, 10]);
        assert_eq!(feed[0].friend_username, "b");
    }

    #[test]
    fn feed_is_capped() {
        let many: Vec<i64> = (0..80).collect();
        let friends = vec![friend("a", &many), friend("b", &many)];
        let feed = flatten_submissions(&friends);
        assert_eq!(feed.len(), ACTIVITY_FEED_LIMIT);
        assert!(
            feed.windows(2)
                .all(|pair| pair[0].timestamp_secs >= pair[1].timestamp_secs)
        );
        assert_eq!(feed[0].timestamp_secs, 79);
    }

    #[test]
    fn ties_keep_friend_order() {
        let friends = vec![friend("first", &[5]), friend("second", &[5])];
        let feed = flatten_submissions(&friends);
        assert_eq!(feed[0].friend_username, "first");
        assert_eq!(feed[1].friend_username, "second");
    }

    #[test]
    fn friend_without_submissions_contributes_nothing() {
        let friends = vec![friend("quiet", &[]), friend("busy", &[1, 2])];
        let feed = flatten_submissions(&friends);
        assert_eq!(feed.len(), 2);
        assert!(feed.iter().all(|s| s.friend_username == "busy"));
    }

    #[test]
    fn relative_labels() {
        let now = 1_000_000;
        assert_eq!(relative_time_label(now, now - 30), "just now");
        assert_eq!(relative_time_label(now, now - 90), "1 minute ago");
        assert_eq!(relative_time_label(now, now - 125), "2 minutes ago");
        assert_eq!(relative_time_label(now, now - 7_200), "2 hours ago");
        assert_eq!(relative_time_label(now, now - 3_600), "1 hour ago");
        assert_eq!(relative_time_label(now, now - 172_800), "2 days ago");
        assert_eq!(relative_time_label(now, now - 86_400), "1 day ago");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        assert_eq!(relative_time_label(100, 500), "just now");
        assert_eq!(relative_time_label(i64::MIN, i64::MAX), "just now");
    }

    #[test]
    fn extreme_timestamps_do_not_overflow() {
        let label = relative_time_label(1_700_000_000, i64::MIN);
        assert!(label.ends_with("days ago"));
    }

    #[test]
    fn submissions_without_timestamps_are_skipped() {
        let mut quirky = friend("quirky", &[7]);
        quirky.recent_submissions.push(RecentSubmission {
            title: "no time".to_string(),
            title_slug: "no-time".to_string(),
            timestamp: None,
        });
        let feed = flatten_submissions(&[quirky]);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].timestamp_secs, 7);
    }
}
