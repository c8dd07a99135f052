//! In-memory users, friendships and pending friend requests.

use std::collections::{BTreeMap, BTreeSet};

use axum::http::StatusCode;
use friends_shared::requests::RequestPair;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("username is required")]
    MissingUsername,
    #[error("user `{0}` is not registered")]
    UnknownUser(String),
    #[error("cannot send a friend request to yourself")]
    SelfRequest,
    #[error("already friends with `{0}`")]
    AlreadyFriends(String),
    #[error("friend request to `{0}` already sent")]
    DuplicateRequest(String),
    #[error("friend request not found")]
    RequestNotFound,
}

impl GraphError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::RequestNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Created,
    Existing,
}

impl Registration {
    /// Both messages contain "registered", which clients treat as success.
    pub fn message(self) -> &'static str {
        match self {
            Self::Created => "User registered successfully",
            Self::Existing => "User already registered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// The receiver had already asked; the two are now friends.
    AcceptedReverse,
}

impl SendOutcome {
    pub fn message(self) -> &'static str {
        match self {
            Self::Sent => "Friend request sent",
            Self::AcceptedReverse => "Friend request accepted",
        }
    }
}

#[derive(Debug, Default)]
pub struct SocialGraph {
    users: BTreeSet<String>,
    friends: BTreeMap<String, BTreeSet<String>>,
    /// Insertion order is the display order.
    pending: Vec<RequestPair>,
}

fn normalize(username: &str) -> Result<String, GraphError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(GraphError::MissingUsername);
    }
    Ok(trimmed.to_string())
}

impl SocialGraph {
    pub fn register(&mut self, username: &str) -> Result<Registration, GraphError> {
        let username = normalize(username)?;
        if self.users.insert(username) {
            Ok(Registration::Created)
        } else {
            Ok(Registration::Existing)
        }
    }

    pub fn is_registered(&self, username: &str) -> bool {
        self.users.contains(username.trim())
    }

    pub fn friends_of(&self, username: &str) -> Vec<String> {
        self.friends
            .get(username.trim())
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn are_friends(&self, a: &str, b: &str) -> bool {
        self.friends.get(a).is_some_and(|set| set.contains(b))
    }

    pub fn incoming(&self, username: &str) -> Vec<RequestPair> {
        let username = username.trim();
        self.pending
            .iter()
            .filter(|pair| pair.receiver_username == username)
            .cloned()
            .collect()
    }

    pub fn outgoing(&self, username: &str) -> Vec<RequestPair> {
        let username = username.trim();
        self.pending
            .iter()
            .filter(|pair| pair.sender_username == username)
            .cloned()
            .collect()
    }

    pub fn send(&mut self, sender: &str, receiver: &str) -> Result<SendOutcome, GraphError> {
        let sender = normalize(sender)?;
        let receiver = normalize(receiver)?;
        for user in [&sender, &receiver] {
            if !self.users.contains(user) {
                return Err(GraphError::UnknownUser(user.clone()));
            }
        }
        if sender == receiver {
            return Err(GraphError::SelfRequest);
        }
        if self.are_friends(&sender, &receiver) {
            return Err(GraphError::AlreadyFriends(receiver));
        }
        if self.position(&sender, &receiver).is_some() {
            return Err(GraphError::DuplicateRequest(receiver));
        }
        if let Some(reverse) = self.position(&receiver, &sender) {
            self.pending.remove(reverse);
            self.befriend(&sender, &receiver);
            return Ok(SendOutcome::AcceptedReverse);
        }
        self.pending.push(RequestPair::new(sender, receiver));
        Ok(SendOutcome::Sent)
    }

    pub fn accept(&mut self, sender: &str, receiver: &str) -> Result<(), GraphError> {
        let index = self
            .position(sender.trim(), receiver.trim())
            .ok_or(GraphError::RequestNotFound)?;
        let pair = self.pending.remove(index);
        self.befriend(&pair.sender_username, &pair.receiver_username);
        Ok(())
    }

    pub fn decline(&mut self, sender: &str, receiver: &str) -> Result<(), GraphError> {
        let index = self
            .position(sender.trim(), receiver.trim())
            .ok_or(GraphError::RequestNotFound)?;
        self.pending.remove(index);
        Ok(())
    }

    fn position(&self, sender: &str, receiver: &str) -> Option<usize> {
        self.pending
            .iter()
            .position(|pair| pair.sender_username == sender && pair.receiver_username == receiver)
    }

    fn befriend(&mut self, a: &str, b: &str) {
        self.friends
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.friends
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }
}
