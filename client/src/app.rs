use chrono::{DateTime, Utc};
use gloo_storage::Storage;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use friends_shared::{
    ApiError, Dashboard, DashboardView, FriendRequests, FriendsApi, FriendsSnapshot,
    LeaderboardMode, PanelState, RequestAction, SessionContext, Tab,
};

use crate::config::{self, IDENTITY_TIMEOUT, PREFS_STORAGE_KEY};
use crate::identity;
use crate::transport::GlooTransport;
use crate::views::{PanelGate, TabBar, TabBody};

pub(crate) type PanelDashboard = Dashboard<GlooTransport>;

/// View choices restored on the next page load. The popup always opens on
/// the activity tab, so the tab is not part of this.
#[derive(Debug, serde::Serialize, serde::Deserialize, Default, PartialEq)]
#[serde(default)]
struct Prefs {
    leaderboard_mode: LeaderboardMode,
}

impl Prefs {
    fn initial_tab(&self) -> Tab {
        Tab::Activity
    }
}

/// Fall back to an empty value when nothing has loaded yet; keep loaded data.
fn fill_empty<T: Default>(slot: &mut Option<T>) {
    if slot.is_none() {
        *slot = Some(T::default());
    }
}

/// Reactive state behind the popup. Every tab reads from here.
#[derive(Clone, Copy)]
pub(crate) struct PanelSignals {
    pub state: RwSignal<PanelState>,
    pub tab: RwSignal<Tab>,
    pub leaderboard_mode: RwSignal<LeaderboardMode>,
    /// `None` until the first friends load lands.
    pub friends: RwSignal<Option<FriendsSnapshot>>,
    pub requests: RwSignal<Option<FriendRequests>>,
    pub loaded_at: RwSignal<DateTime<Utc>>,
    pub action_error: RwSignal<Option<String>>,
    pub action_pending: RwSignal<bool>,
    pub send_input: RwSignal<String>,
    pub outgoing_expanded: RwSignal<bool>,
    dashboard: StoredValue<Option<PanelDashboard>>,
}

impl PanelSignals {
    fn new() -> Self {
        let saved: Prefs = gloo_storage::LocalStorage::get(PREFS_STORAGE_KEY).unwrap_or_default();
        Self {
            state: RwSignal::new(PanelState::default()),
            tab: RwSignal::new(saved.initial_tab()),
            leaderboard_mode: RwSignal::new(saved.leaderboard_mode),
            friends: RwSignal::new(None),
            requests: RwSignal::new(None),
            loaded_at: RwSignal::new(Utc::now()),
            action_error: RwSignal::new(None),
            action_pending: RwSignal::new(false),
            send_input: RwSignal::new(String::new()),
            outgoing_expanded: RwSignal::new(false),
            dashboard: StoredValue::new(None),
        }
    }

    fn dashboard(&self) -> Option<PanelDashboard> {
        self.dashboard.get_value()
    }

    fn persist_prefs(self) {
        Effect::new(move |_| {
            let prefs = Prefs {
                leaderboard_mode: self.leaderboard_mode.get(),
            };
            if let Err(e) = gloo_storage::LocalStorage::set(PREFS_STORAGE_KEY, &prefs) {
                tracing::debug!(error = %e, "failed to persist panel prefs");
            }
        });
    }

    /// Resolve the page identity, then run the registration gate.
    fn start(self) {
        spawn_local(async move {
            match identity::resolve_username(IDENTITY_TIMEOUT).await {
                Ok(username) => {
                    let transport = GlooTransport::new(config::api_base());
                    let session = SessionContext::new(username);
                    self.dashboard
                        .set_value(Some(Dashboard::new(FriendsApi::new(transport), session)));
                    self.check_registration();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "no LeetCode user on this page");
                    self.state.set(PanelState::Unresolved);
                }
            }
        });
    }

    pub fn check_registration(self) {
        let Some(dashboard) = self.dashboard() else {
            return;
        };
        let username = dashboard.session().username().to_string();
        self.state.set(PanelState::CheckingRegistration {
            username: username.clone(),
        });
        spawn_local(async move {
            match dashboard.is_registered().await {
                Ok(true) => {
                    self.state.set(PanelState::Ready { username });
                    dashboard.reload_all(&self).await;
                }
                Ok(false) => self.state.set(PanelState::Unregistered { username }),
                Err(e) => {
                    tracing::warn!(error = %e, "registration check failed");
                    self.state.set(PanelState::Unavailable { username });
                }
            }
        });
    }

    pub fn reload(self) {
        let Some(dashboard) = self.dashboard() else {
            return;
        };
        spawn_local(async move {
            dashboard.reload_all(&self).await;
        });
    }

    /// Run a user action. Ignored while another one is in flight.
    pub fn run(self, action: RequestAction) {
        if self.action_pending.get_untracked() {
            return;
        }
        let Some(dashboard) = self.dashboard() else {
            return;
        };
        self.action_pending.set(true);
        self.action_error.set(None);
        spawn_local(async move {
            let _ = dashboard.perform(action, &self).await;
            self.action_pending.set(false);
        });
    }
}

impl DashboardView for PanelSignals {
    fn friends_loaded(&self, snapshot: FriendsSnapshot) {
        self.loaded_at.set(Utc::now());
        self.friends.set(Some(snapshot));
    }

    fn requests_loaded(&self, requests: FriendRequests) {
        self.requests.set(Some(requests));
    }

    fn friends_failed(&self, _error: &ApiError) {
        self.friends.update(fill_empty);
    }

    fn requests_failed(&self, _error: &ApiError) {
        self.requests.update(fill_empty);
    }

    fn action_finished(&self, action: &RequestAction, outcome: Result<(), &ApiError>) {
        match outcome {
            Ok(()) => match action {
                RequestAction::Send { .. } => self.send_input.set(String::new()),
                RequestAction::Register => {
                    let username = self
                        .state
                        .with_untracked(|state| state.username().map(str::to_owned));
                    if let Some(username) = username {
                        self.state.set(PanelState::Ready { username });
                    }
                }
                RequestAction::Accept { .. } | RequestAction::Decline { .. } => {}
            },
            Err(e) => self
                .action_error
                .set(Some(format!("Could not {}: {}", action.verb(), e.user_message()))),
        }
    }
}

/// Root of the popup body.
#[component]
pub fn FriendsPanel() -> impl IntoView {
    let signals = PanelSignals::new();
    provide_context(signals);
    signals.persist_prefs();
    signals.start();

    let ready = move || signals.state.with(PanelState::is_ready);

    view! {
        <div style="font-family: 'Roboto Mono', monospace; font-size: 13px; display: flex; flex-direction: column; gap: 8px;">
            <Show when=ready fallback=|| view! { <PanelGate /> }>
                <TabBar />
                <TabBody />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use friends_shared::{FriendRequests, LeaderboardMode, Tab};

    use super::{Prefs, fill_empty};

    #[test]
    fn saved_prefs_never_move_the_opening_tab() {
        let legacy: Prefs =
            serde_json::from_str(r#"{"tab":"FriendRequests","leaderboard_mode":"Weekly"}"#)
                .expect("decode");
        assert_eq!(legacy.leaderboard_mode, LeaderboardMode::Weekly);
        assert_eq!(legacy.initial_tab(), Tab::Activity);
        assert_eq!(Prefs::default().initial_tab(), Tab::Activity);

        let saved = serde_json::to_string(&legacy).expect("encode");
        assert!(!saved.contains("tab"));
    }

    #[test]
    fn failed_first_load_shows_empty_state_but_keeps_loaded_data() {
        let mut never_loaded: Option<FriendRequests> = None;
        fill_empty(&mut never_loaded);
        assert_eq!(never_loaded, Some(FriendRequests::default()));

        let mut loaded = Some(vec![1, 2, 3]);
        fill_empty(&mut loaded);
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }
}
