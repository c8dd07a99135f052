use chrono::{DateTime, Utc};
use leptos::prelude::*;

use friends_shared::Friend;
use friends_shared::calendar::rolling_seven_day_count;
use friends_shared::profile::profile_url;

use super::{ACCENT, Loading, NoFriends, palette, panel};

#[component]
pub(crate) fn FriendsGrid() -> impl IntoView {
    let panel = panel();
    let friends = panel.friends;
    let loaded_at = panel.loaded_at;

    move || {
        let Some(list) = friends.with(|snapshot| snapshot.as_ref().map(|s| s.friends.clone())) else {
            return view! { <Loading /> }.into_any();
        };
        if list.is_empty() {
            return view! { <NoFriends /> }.into_any();
        }
        let now = loaded_at.get_untracked();
        view! {
            <div style="display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; margin-top: 12px; place-items: center;">
                {list
                    .into_iter()
                    .map(|friend| view! { <FriendCard friend=friend now=now /> })
                    .collect_view()}
            </div>
        }
        .into_any()
    }
}

/// Stat lines under a friend's avatar.
fn stat_lines(friend: &Friend, now: DateTime<Utc>) -> [String; 8] {
    let profile = &friend.profile;
    let rank = profile
        .ranking
        .map(|rank| rank.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    [
        format!("\u{1F525} Streak: {} days", profile.streak_days),
        format!(
            "\u{1F4C5} Last 7 days: {} Solved",
            rolling_seven_day_count(&profile.activity_calendar, now)
        ),
        format!("\u{1F9E0} Active days: {}", profile.active_days),
        format!("\u{1F30D} Rank: {rank}"),
        format!("\u{2705} Total AC: {}", profile.total_solved),
        format!("\u{1F601} Easy AC: {}", profile.easy_solved),
        format!("\u{1F610} Med AC: {}", profile.medium_solved),
        format!("\u{1FAE0} Hard AC: {}", profile.hard_solved),
    ]
}

#[component]
fn FriendCard(friend: Friend, now: DateTime<Utc>) -> impl IntoView {
    let colors = palette();
    let lines = stat_lines(&friend, now);
    let hovered = RwSignal::new(false);

    view! {
        <div
            style="display: flex; flex-direction: column; align-items: center; border-radius: 8px; padding: 12px; width: 100%; box-sizing: border-box;"
            style:background-color=colors.surface
        >
            <a
                href=profile_url(&friend.username)
                target="_blank"
                style="display: flex; flex-direction: column; align-items: center; text-decoration: none; text-align: center; transition: transform 0.2s ease;"
                style:color=ACCENT
                style:transform=move || if hovered.get() { "scale(1.05)" } else { "scale(1)" }
                on:mouseenter=move |_| hovered.set(true)
                on:mouseleave=move |_| hovered.set(false)
            >
                <img
                    src=friend.profile.avatar_url.clone()
                    alt=friend.username.clone()
                    style="width: 80px; height: 80px; border-radius: 50%; margin-bottom: 8px; box-shadow: 0 0 9px rgba(0,0,0,0.2);"
                />
                <div style="font-size: 14px; font-weight: bold;">{friend.username.clone()}</div>
            </a>
            <div
                style="font-size: 12px; margin-top: 8px; text-align: center; line-height: 1.5;"
                style:color=colors.text
            >
                {lines.into_iter().map(|line| view! { <div>{line}</div> }).collect_view()}
            </div>
        </div>
    }
}
