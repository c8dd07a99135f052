use leptos::prelude::*;

use friends_shared::profile::profile_url;
use friends_shared::{LeaderboardEntry, LeaderboardMode};

use super::{ACCENT, Loading, NoFriends, palette, panel};

#[component]
pub(crate) fn LeaderboardView() -> impl IntoView {
    let panel = panel();
    let mode = panel.leaderboard_mode;

    let board = Memo::new(move |_| {
        let handle = panel
            .state
            .with(|state| state.username().unwrap_or_default().to_string());
        let now = panel.loaded_at.get();
        panel.friends.with(|snapshot| {
            snapshot
                .as_ref()
                .map(|snapshot| (snapshot.friends.is_empty(), snapshot.leaderboard(&handle, now)))
        })
    });

    view! {
        <div style="display: flex; justify-content: flex-end; margin: 8px 4px 0;">
            <button
                style="border: 1px solid #ffa116; border-radius: 8px; background: transparent; padding: 4px 10px; font-family: inherit; cursor: pointer;"
                style:color=ACCENT
                on:click=move |_| mode.update(|m| *m = m.toggled())
            >
                {move || mode.get().label()}
            </button>
        </div>
        {move || match board.get() {
            None => view! { <Loading /> }.into_any(),
            Some((true, _)) => view! { <NoFriends /> }.into_any(),
            Some((false, board)) => {
                let mode = mode.get();
                view! {
                    <div style="display: flex; flex-direction: column; gap: 12px; margin-top: 12px;">
                        {board
                            .entries(mode)
                            .iter()
                            .cloned()
                            .enumerate()
                            .map(|(position, entry)| view! { <LeaderboardRow position=position entry=entry mode=mode /> })
                            .collect_view()}
                    </div>
                }.into_any()
            }
        }}
    }
}

#[component]
fn LeaderboardRow(position: usize, entry: LeaderboardEntry, mode: LeaderboardMode) -> impl IntoView {
    let colors = palette();
    let background = if entry.is_current_user { colors.highlight } else { colors.surface };
    let stat = match mode {
        LeaderboardMode::AllTime => format!("Global Rank: {}", entry.rank_label()),
        LeaderboardMode::Weekly => format!("This Week: {}", entry.solved_this_week),
    };

    view! {
        <div
            style="display: flex; align-items: center; gap: 12px; padding: 8px; border-radius: 6px; box-shadow: 0 0 4px rgba(0,0,0,0.1);"
            style:background=background
        >
            <div style="width: 30px; text-align: center;">{format!("#{}", position + 1)}</div>
            <a
                href=profile_url(&entry.handle)
                target="_blank"
                style="display: flex; align-items: center; gap: 8px; text-decoration: none;"
                style:color=ACCENT
            >
                <img
                    src=entry.avatar_url
                    alt=entry.username.clone()
                    style="width: 30px; height: 30px; border-radius: 50%;"
                />
                <div
                    style="flex-grow: 1;"
                    style:font-weight=if entry.is_current_user { "bold" } else { "normal" }
                >
                    {entry.username}
                </div>
            </a>
            <div style="display: flex; flex-direction: column; align-items: flex-end; text-align: right; margin-left: auto;">
                <div>{format!("Questions Solved: {}", entry.solved_total)}</div>
                <div>{stat}</div>
            </div>
        </div>
    }
}
