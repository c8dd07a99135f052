use leptos::prelude::*;

use friends_shared::profile::{problem_url, profile_url};
use friends_shared::{Submission, relative_time_label};

use super::{ACCENT, Loading, NoFriends, palette, panel};

#[component]
pub(crate) fn ActivityFeed() -> impl IntoView {
    let panel = panel();
    let friends = panel.friends;
    let loaded_at = panel.loaded_at;

    move || {
        let feed = friends.with(|snapshot| {
            snapshot
                .as_ref()
                .map(|snapshot| (snapshot.friends.is_empty(), snapshot.feed()))
        });
        match feed {
            None => view! { <Loading /> }.into_any(),
            Some((true, _)) => view! { <NoFriends /> }.into_any(),
            Some((false, feed)) => {
                let now_secs = loaded_at.get_untracked().timestamp();
                feed.into_iter()
                    .enumerate()
                    .map(|(index, submission)| view! { <SubmissionCard index=index submission=submission now_secs=now_secs /> })
                    .collect_view()
                    .into_any()
            }
        }
    }
}

#[component]
fn SubmissionCard(index: usize, submission: Submission, now_secs: i64) -> impl IntoView {
    let colors = palette();
    let background = if index % 2 == 0 { colors.surface } else { colors.surface_alt };
    let when = relative_time_label(now_secs, submission.timestamp_secs);
    let title_hovered = RwSignal::new(false);

    view! {
        <div
            style="box-shadow: 0 0 4px rgba(0,0,0,0.2); border-radius: 8px; padding: 8px; margin: 8px 4px;"
            style:background=background
        >
            <div style="display: flex; align-items: center; justify-content: space-between; margin-bottom: 4px;">
                <a
                    href=profile_url(&submission.friend_username)
                    target="_blank"
                    style="display: flex; align-items: center; text-decoration: none;"
                    style:color=ACCENT
                >
                    <img
                        src=submission.avatar_url.clone()
                        alt=submission.friend_username.clone()
                        style="width: 30px; height: 30px; border-radius: 50%; margin-right: 8px;"
                    />
                    <span style="font-size: 14px; font-weight: 600;">{submission.friend_username.clone()}</span>
                </a>
                <span style="font-size: 13px;" style:color=colors.text>{when}</span>
            </div>
            <a
                href=problem_url(&submission.title_slug)
                target="_blank"
                style="display: inline-block; margin-top: 4px; font-size: 13px; text-align: left;"
                style:color=move || if title_hovered.get() { ACCENT } else { colors.text }
                style:text-decoration=move || if title_hovered.get() { "underline" } else { "none" }
                on:mouseenter=move |_| title_hovered.set(true)
                on:mouseleave=move |_| title_hovered.set(false)
            >
                {submission.title}
            </a>
        </div>
    }
}
