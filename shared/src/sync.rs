use tracing::{debug, info, warn};

use crate::api::{FriendsApi, FriendsSnapshot, Refresh, RequestAction, Transport};
use crate::error::{ApiError, ApiResult};
use crate::requests::FriendRequests;
use crate::session::SessionContext;

/// Render target for dashboard data. Implemented by the popup's reactive state.
pub trait DashboardView {
    fn friends_loaded(&self, snapshot: FriendsSnapshot);
    fn requests_loaded(&self, requests: FriendRequests);
    fn action_finished(&self, action: &RequestAction, outcome: Result<(), &ApiError>);

    /// A current friends load failed. Earlier data, if any, is still valid.
    fn friends_failed(&self, _error: &ApiError) {}

    /// A current friend request load failed.
    fn requests_failed(&self, _error: &ApiError) {}
}

/// Fetch -> aggregate -> render pipeline for one session.
///
/// Read failures are logged and reported through the view's `*_failed`
/// hooks; loaded data is never replaced by a failure. Results from a load
/// that was superseded by a newer one are discarded.
#[derive(Debug, Clone)]
pub struct Dashboard<T> {
    api: FriendsApi<T>,
    session: SessionContext,
}

impl<T: Transport> Dashboard<T> {
    pub fn new(api: FriendsApi<T>, session: SessionContext) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn api(&self) -> &FriendsApi<T> {
        &self.api
    }

    pub async fn is_registered(&self) -> ApiResult<bool> {
        self.api.is_registered(self.session.username()).await
    }

    /// Returns whether the view was updated.
    pub async fn reload_friends<V: DashboardView>(&self, view: &V) -> bool {
        let generation = &self.session.friends_generation;
        let ticket = generation.begin();
        let username = self.session.username();
        let result = self.api.load_friends_data(username).await;

        if !generation.is_current(ticket) {
            debug!(username, "discarding superseded friends load");
            return false;
        }
        match result {
            Ok(snapshot) => {
                debug!(username, friends = snapshot.friends.len(), "friends loaded");
                view.friends_loaded(snapshot);
                true
            }
            Err(e) => {
                warn!(username, error = %e, "failed to load friends data");
                view.friends_failed(&e);
                false
            }
        }
    }

    /// Returns whether the view was updated.
    pub async fn reload_requests<V: DashboardView>(&self, view: &V) -> bool {
        let generation = &self.session.requests_generation;
        let ticket = generation.begin();
        let username = self.session.username();
        let result = self.api.load_friend_requests(username).await;

        if !generation.is_current(ticket) {
            debug!(username, "discarding superseded friend request load");
            return false;
        }
        match result {
            Ok(requests) => {
                view.requests_loaded(requests);
                true
            }
            Err(e) => {
                warn!(username, error = %e, "failed to load friend requests");
                view.requests_failed(&e);
                false
            }
        }
    }

    pub async fn reload_all<V: DashboardView>(&self, view: &V) {
        self.refresh(
            Refresh {
                friends: true,
                requests: true,
            },
            view,
        )
        .await;
    }

    pub async fn refresh<V: DashboardView>(&self, refresh: Refresh, view: &V) {
        futures::join!(
            async {
                if refresh.friends {
                    self.reload_friends(view).await;
                }
            },
            async {
                if refresh.requests {
                    self.reload_requests(view).await;
                }
            }
        );
    }

    /// Run a mutation, report its outcome, then re-fetch the affected views.
    pub async fn perform<V: DashboardView>(&self, action: RequestAction, view: &V) -> ApiResult<()> {
        let username = self.session.username();
        match self.api.perform(username, &action).await {
            Ok(refresh) => {
                info!(username, action = action.verb(), "request action succeeded");
                view.action_finished(&action, Ok(()));
                self.refresh(refresh, view).await;
                Ok(())
            }
            Err(e) => {
                warn!(username, action = action.verb(), error = %e, "request action failed");
                view.action_finished(&action, Err(&e));
                Err(e)
            }
        }
    }
}
