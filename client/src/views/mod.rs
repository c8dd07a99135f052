mod activity;
mod friends;
mod leaderboard;
mod requests;

use leptos::prelude::*;

use friends_shared::view::{LOADING_TEXT, NO_FRIENDS_HINT, NO_FRIENDS_TEXT};
use friends_shared::{PanelState, RequestAction, Tab};

use crate::app::PanelSignals;

use activity::ActivityFeed;
use friends::FriendsGrid;
use leaderboard::LeaderboardView;
use requests::RequestsView;

pub(crate) const ACCENT: &str = "#ffa116";
pub(crate) const ACCENT_HOVER: &str = "#e69500";

/// Host page colors. The site toggles dark mode with a class on `<html>`.
#[derive(Clone, Copy)]
pub(crate) struct Palette {
    pub surface: &'static str,
    pub surface_alt: &'static str,
    pub highlight: &'static str,
    pub text: &'static str,
    pub popup: &'static str,
}

const DARK: Palette = Palette {
    surface: "#2a2a2a",
    surface_alt: "#1f1f1f",
    highlight: "#3a2a15",
    text: "#e0e0e0",
    popup: "#1e1e1e",
};

const LIGHT: Palette = Palette {
    surface: "#ffffff",
    surface_alt: "#f0f0f0",
    highlight: "#ffe8cc",
    text: "#333333",
    popup: "#ffffff",
};

pub(crate) fn palette() -> Palette {
    let dark = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
        .is_some_and(|root| root.class_list().contains("dark"));
    if dark { DARK } else { LIGHT }
}

pub(crate) fn panel() -> PanelSignals {
    expect_context::<PanelSignals>()
}

#[component]
pub(crate) fn Loading() -> impl IntoView {
    view! {
        <div style="padding: 48px 0; text-align: center; font-size: 14px;">{LOADING_TEXT}</div>
    }
}

#[component]
pub(crate) fn NoFriends() -> impl IntoView {
    let colors = palette();
    view! {
        <div style="padding: 64px 0; text-align: center; font-size: 16px;" style:color=colors.text>
            {NO_FRIENDS_TEXT}
            <br />
            <span style="font-size: 12px;">{NO_FRIENDS_HINT}</span>
        </div>
    }
}

#[component]
pub(crate) fn ActionError() -> impl IntoView {
    let action_error = panel().action_error;
    view! {
        <Show when=move || action_error.with(Option::is_some)>
            <div style="color: #ef4743; font-size: 12px; margin: 4px;">
                {move || action_error.get().unwrap_or_default()}
            </div>
        </Show>
    }
}

#[component]
fn AccentButton(
    label: &'static str,
    #[prop(into)] on_press: Callback<()>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let hovered = RwSignal::new(false);
    view! {
        <button
            style="margin: 16px auto; display: block; padding: 10px 20px; color: white; border: none; border-radius: 8px; font-family: inherit; cursor: pointer; box-shadow: 0 2px 4px rgba(0,0,0,0.2); transition: background-color 0.2s ease;"
            style:background-color=move || if hovered.get() { ACCENT_HOVER } else { ACCENT }
            style:opacity=move || if disabled.get() { "0.6" } else { "1" }
            prop:disabled=move || disabled.get()
            on:mouseenter=move |_| hovered.set(true)
            on:mouseleave=move |_| hovered.set(false)
            on:click=move |_| on_press.run(())
        >
            {label}
        </button>
    }
}

/// Body shown until the session is ready: status text plus the register or retry action.
#[component]
pub(crate) fn PanelGate() -> impl IntoView {
    let panel = panel();
    let state = panel.state;
    let pending = panel.action_pending;

    view! {
        <div style="text-align: center; padding: 24px 8px;">
            <div style="font-size: 14px;">
                {move || state.with(|s| s.placeholder_text().unwrap_or_default())}
            </div>
            {move || match state.get() {
                PanelState::Unregistered { .. } => view! {
                    <AccentButton
                        label="Register"
                        on_press=move || panel.run(RequestAction::Register)
                        disabled=pending
                    />
                }.into_any(),
                PanelState::Unavailable { .. } => view! {
                    <AccentButton
                        label="Retry"
                        on_press=move || panel.check_registration()
                        disabled=pending
                    />
                }.into_any(),
                _ => view! { <div /> }.into_any(),
            }}
            <ActionError />
        </div>
    }
}

#[component]
pub(crate) fn TabBar() -> impl IntoView {
    let panel = panel();
    let tab = panel.tab;
    let colors = palette();

    view! {
        <div style="display: flex; align-items: center; gap: 6px;">
            <div style="position: relative; display: flex; flex: 1; border-radius: 8px; overflow: hidden; box-shadow: 0 2px 6px rgba(0,0,0,0.2);">
                <div
                    style="position: absolute; top: 0; left: 0; width: 25%; height: 100%; background: #ffa1161f; border-radius: 8px; transition: transform 0.3s ease; pointer-events: none;"
                    style:transform=move || tab.get().highlight_transform()
                />
                {Tab::ALL
                    .into_iter()
                    .map(|t| {
                        view! {
                            <button
                                style="flex: 1; padding: 8px 0; border: none; background: transparent; font-family: inherit; cursor: pointer; transition: color 0.2s ease;"
                                style:color=move || if tab.get() == t { ACCENT } else { colors.text }
                                on:click=move |_| tab.set(t)
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <button
                title="Reload"
                style="border: none; background: transparent; cursor: pointer; font-size: 16px; padding: 4px 6px;"
                style:color=colors.text
                on:click=move |_| panel.reload()
            >
                "\u{21BB}"
            </button>
        </div>
    }
}

#[component]
pub(crate) fn TabBody() -> impl IntoView {
    let tab = panel().tab;
    view! {
        <div style="overflow-y: auto; max-height: 60vh; padding: 0 2px;">
            {move || match tab.get() {
                Tab::Activity => view! { <ActivityFeed /> }.into_any(),
                Tab::Leaderboard => view! { <LeaderboardView /> }.into_any(),
                Tab::MyFriends => view! { <FriendsGrid /> }.into_any(),
                Tab::FriendRequests => view! { <RequestsView /> }.into_any(),
            }}
        </div>
    }
}
