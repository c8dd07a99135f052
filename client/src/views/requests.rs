use leptos::prelude::*;

use friends_shared::profile::profile_url;
use friends_shared::requests::normalize_receiver;
use friends_shared::view::NO_INCOMING_REQUESTS_TEXT;
use friends_shared::{FriendRequest, FriendRequests, RequestAction};

use super::{ACCENT, ACCENT_HOVER, ActionError, Loading, palette, panel};

#[component]
pub(crate) fn RequestsView() -> impl IntoView {
    let requests = panel().requests;

    view! {
        <SendRequestForm />
        <ActionError />
        {move || match requests.get() {
            None => view! { <Loading /> }.into_any(),
            Some(requests) => view! { <RequestLists requests=requests /> }.into_any(),
        }}
    }
}

#[component]
fn SendRequestForm() -> impl IntoView {
    let panel = panel();
    let input = panel.send_input;
    let hovered = RwSignal::new(false);

    let submit = move || {
        let Some(receiver) = input.with_untracked(|text| normalize_receiver(text)) else {
            return;
        };
        panel.run(RequestAction::Send { receiver });
    };

    view! {
        <div style="display: flex; gap: 8px; margin: 12px 4px 4px;">
            <input
                type="text"
                placeholder="Enter username"
                style="flex: 1; padding: 6px 10px; border-radius: 8px; border: 1px solid #ccc; font-family: inherit;"
                prop:value=move || input.get()
                on:input=move |ev| input.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        submit();
                    }
                }
            />
            <button
                style="padding: 6px 14px; border: none; border-radius: 8px; color: white; font-family: inherit; cursor: pointer; box-shadow: 0 2px 4px rgba(0,0,0,0.2); transition: background-color 0.2s ease;"
                style:background-color=move || if hovered.get() { ACCENT_HOVER } else { ACCENT }
                prop:disabled=move || panel.action_pending.get()
                on:mouseenter=move |_| hovered.set(true)
                on:mouseleave=move |_| hovered.set(false)
                on:click=move |_| submit()
            >
                "Send"
            </button>
        </div>
    }
}

#[component]
fn RequestLists(requests: FriendRequests) -> impl IntoView {
    let expanded = panel().outgoing_expanded;
    let incoming = requests.incoming.clone();
    let has_outgoing = !requests.outgoing.is_empty();
    let summary = requests.outgoing_summary();

    let incoming_view = if incoming.is_empty() {
        view! {
            <div style="padding: 24px 0; text-align: center;">{NO_INCOMING_REQUESTS_TEXT}</div>
        }
        .into_any()
    } else {
        incoming
            .into_iter()
            .map(|request| view! { <IncomingCard request=request /> })
            .collect_view()
            .into_any()
    };

    let outgoing_view = has_outgoing.then(move || {
        view! {
            <div
                style="margin: 12px 4px 4px; cursor: pointer; font-weight: 600; user-select: none;"
                style:color=ACCENT
                on:click=move |_| expanded.update(|open| *open = !*open)
            >
                {move || requests.outgoing_toggle_label(expanded.get())}
            </div>
            <div
                style="margin: 0 4px;"
                style:display=move || if expanded.get() { "block" } else { "none" }
            >
                {summary}
            </div>
        }
    });

    view! {
        {incoming_view}
        {outgoing_view}
    }
}

#[component]
fn IncomingCard(request: FriendRequest) -> impl IntoView {
    let panel = panel();
    let colors = palette();
    let sender = request.sender_username.clone();
    let accept_sender = sender.clone();
    let decline_sender = sender.clone();

    view! {
        <div
            style="display: flex; align-items: center; justify-content: space-between; padding: 8px; margin: 8px 4px; border-radius: 8px; box-shadow: 0 0 4px rgba(0,0,0,0.2);"
            style:background=colors.surface
        >
            <a
                href=profile_url(request.counterpart())
                target="_blank"
                style="text-decoration: none; font-weight: 600;"
                style:color=ACCENT
            >
                {sender}
            </a>
            <div style="display: flex; gap: 6px;">
                <button
                    style="padding: 4px 12px; border: none; border-radius: 6px; background: #2cbb5d; color: white; cursor: pointer; font-family: inherit;"
                    prop:disabled=move || panel.action_pending.get()
                    on:click=move |_| panel.run(RequestAction::Accept { sender: accept_sender.clone() })
                >
                    "Accept"
                </button>
                <button
                    style="padding: 4px 12px; border: none; border-radius: 6px; background: #ef4743; color: white; cursor: pointer; font-family: inherit;"
                    prop:disabled=move || panel.action_pending.get()
                    on:click=move |_| panel.run(RequestAction::Decline { sender: decline_sender.clone() })
                >
                    "Decline"
                </button>
            </div>
        </div>
    }
}
