pub mod activity;
pub mod api;
pub mod calendar;
pub mod error;
pub mod identity;
pub mod leaderboard;
pub mod profile;
pub mod requests;
pub mod session;
pub mod sync;
pub mod view;

pub use activity::{ACTIVITY_FEED_LIMIT, Submission, relative_time_label};
pub use api::{FriendsApi, FriendsSnapshot, HttpReply, Refresh, RequestAction, Transport};
pub use error::{ApiError, ApiResult};
pub use identity::IdentityMessage;
pub use leaderboard::{Leaderboard, LeaderboardEntry, UNRANKED};
pub use profile::{Friend, UserProfile};
pub use requests::{FriendRequest, FriendRequests, RequestDirection};
pub use session::SessionContext;
pub use sync::{Dashboard, DashboardView};
pub use view::{LeaderboardMode, PanelState, Tab};
