//! Declarative popup state. The client renders purely from these values.

use serde::{Deserialize, Serialize};

pub const LOADING_TEXT: &str = "Loading...";
pub const NO_FRIENDS_TEXT: &str = "You currently have no friends... :C";
pub const NO_FRIENDS_HINT: &str = "Go make some friends in the friend requests tab! \u{1F449}\u{1F449}\u{1F449}";
pub const NO_INCOMING_REQUESTS_TEXT: &str = "No incoming friend requests.";
pub const UNRESOLVED_TEXT: &str = "Log in to LeetCode to see your friends.";
pub const UNREGISTERED_TEXT: &str = "Register to start adding friends.";
pub const UNAVAILABLE_TEXT: &str = "Could not reach the friends server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    Activity,
    Leaderboard,
    MyFriends,
    FriendRequests,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Activity,
        Tab::Leaderboard,
        Tab::MyFriends,
        Tab::FriendRequests,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Activity => "Activity",
            Self::Leaderboard => "Leaderboard",
            Self::MyFriends => "My Friends",
            Self::FriendRequests => "Requests",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Activity => 0,
            Self::Leaderboard => 1,
            Self::MyFriends => 2,
            Self::FriendRequests => 3,
        }
    }

    /// CSS transform placing the highlight bar under this tab.
    pub fn highlight_transform(self) -> String {
        format!("translateX({}%)", self.index() * 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeaderboardMode {
    Weekly,
    #[default]
    AllTime,
}

impl LeaderboardMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::AllTime => "All-Time",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Weekly => Self::AllTime,
            Self::AllTime => Self::Weekly,
        }
    }
}

/// Lifecycle of the popup body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState {
    /// Waiting for the page-context resolver to report a username.
    #[default]
    Resolving,
    /// No logged-in user could be determined within the timeout.
    Unresolved,
    CheckingRegistration { username: String },
    Unregistered { username: String },
    /// The registration check itself failed.
    Unavailable { username: String },
    Ready { username: String },
}

impl PanelState {
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::CheckingRegistration { username }
            | Self::Unregistered { username }
            | Self::Unavailable { username }
            | Self::Ready { username } => Some(username),
            Self::Resolving | Self::Unresolved => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Status line for non-ready states.
    pub fn placeholder_text(&self) -> Option<&'static str> {
        match self {
            Self::Resolving | Self::CheckingRegistration { .. } => Some(LOADING_TEXT),
            Self::Unresolved => Some(UNRESOLVED_TEXT),
            Self::Unregistered { .. } => Some(UNREGISTERED_TEXT),
            Self::Unavailable { .. } => Some(UNAVAILABLE_TEXT),
            Self::Ready { .. } => None,
        }
    }
}
