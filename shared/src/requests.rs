use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestDirection {
    Incoming,
    Outgoing,
}

/// Sender/receiver pair as the backend stores it; also the body of every
/// request mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPair {
    #[serde(default)]
    pub sender_username: String,
    #[serde(default)]
    pub receiver_username: String,
}

impl RequestPair {
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            sender_username: sender.into(),
            receiver_username: receiver.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendRequest {
    pub sender_username: String,
    pub receiver_username: String,
    pub direction: RequestDirection,
}

impl FriendRequest {
    pub fn from_pair(pair: RequestPair, direction: RequestDirection) -> Self {
        Self {
            sender_username: pair.sender_username,
            receiver_username: pair.receiver_username,
            direction,
        }
    }

    /// The user on the other side of the request.
    pub fn counterpart(&self) -> &str {
        match self.direction {
            RequestDirection::Incoming => &self.sender_username,
            RequestDirection::Outgoing => &self.receiver_username,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomingRequestsResponse {
    #[serde(default)]
    pub incoming_friend_requests: Vec<RequestPair>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutgoingRequestsResponse {
    #[serde(default)]
    pub outgoing_friend_requests: Vec<RequestPair>,
}

/// Pending requests addressed to and sent by the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FriendRequests {
    pub incoming: Vec<FriendRequest>,
    pub outgoing: Vec<FriendRequest>,
}

impl FriendRequests {
    pub fn from_responses(
        incoming: IncomingRequestsResponse,
        outgoing: OutgoingRequestsResponse,
    ) -> Self {
        Self {
            incoming: incoming
                .incoming_friend_requests
                .into_iter()
                .map(|pair| FriendRequest::from_pair(pair, RequestDirection::Incoming))
                .collect(),
            outgoing: outgoing
                .outgoing_friend_requests
                .into_iter()
                .map(|pair| FriendRequest::from_pair(pair, RequestDirection::Outgoing))
                .collect(),
        }
    }

    pub fn outgoing_summary(&self) -> String {
        self.outgoing
            .iter()
            .map(|req| req.receiver_username.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn outgoing_toggle_label(&self, expanded: bool) -> String {
        let arrow = if expanded { '\u{25B4}' } else { '\u{25BE}' };
        format!("Outgoing Friend Requests ({}) {arrow}", self.outgoing.len())
    }
}

/// Trimmed receiver name from the send-request input, or `None` when blank.
pub fn normalize_receiver(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
