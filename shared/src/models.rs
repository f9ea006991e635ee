use serde::{Serialize, Deserialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::error::{PollError, Result};

pub type Tally = u64;

/// A poll and its per-option vote tally.
///
/// `votes` always carries exactly one key per entry of `options`; the
/// constructor and [`Poll::check_invariants`] are the two places that
/// guarantee it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Poll {
    pub id: Uuid,
    pub creator: String,
    pub question: String,
    pub options: Vec<String>,
    pub votes: HashMap<String, Tally>,
    pub finished: bool,
}

impl Poll {
    /// Builds a fresh poll with every tally at zero.
    ///
    /// Duplicate option labels are rejected rather than collapsed, so the
    /// caller always gets back exactly the options it sent.
    pub fn new(
        id: Uuid,
        creator: impl Into<String>,
        question: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self> {
        if options.is_empty() {
            return Err(PollError::bad_request("At least one option is required"));
        }

        let mut votes = HashMap::with_capacity(options.len());
        for option in &options {
            if votes.insert(option.clone(), 0).is_some() {
                return Err(PollError::bad_request(format!("Duplicate option: {}", option)));
            }
        }

        Ok(Self {
            id,
            creator: creator.into(),
            question: question.into(),
            options,
            votes,
            finished: false,
        })
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.votes.contains_key(option)
    }

    /// Checks that a vote for `option` would be accepted.
    pub fn ensure_votable(&self, option: &str) -> Result<()> {
        if self.finished {
            return Err(PollError::PollFinished);
        }
        if !self.has_option(option) {
            return Err(PollError::InvalidOption(option.to_string()));
        }
        Ok(())
    }

    pub fn record_vote(&mut self, option: &str) -> Result<Tally> {
        self.ensure_votable(option)?;
        let tally = self
            .votes
            .get_mut(option)
            .ok_or_else(|| PollError::InvalidOption(option.to_string()))?;
        *tally += 1;
        Ok(*tally)
    }

    pub fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Err(PollError::AlreadyFinished);
        }
        self.finished = true;
        Ok(())
    }

    pub fn is_creator(&self, requester: &str) -> bool {
        self.creator == requester
    }

    pub fn total_votes(&self) -> Tally {
        self.votes.values().sum()
    }

    /// Rejects records whose tally keys drifted from the option list.
    pub fn check_invariants(&self) -> Result<()> {
        let options: HashSet<&str> = self.options.iter().map(String::as_str).collect();
        if options.len() != self.options.len() {
            return Err(PollError::decode("duplicate option labels"));
        }
        if self.votes.len() != options.len()
            || self.votes.keys().any(|key| !options.contains(key.as_str()))
        {
            return Err(PollError::decode("vote keys do not match options"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreatePollRequest {
    pub creator: String,
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VoteRequest {
    pub poll_id: String,
    pub option: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FinishPollRequest {
    pub poll_id: String,
    pub creator: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    #[default]
    InChannel,
    Ephemeral,
}

impl std::str::FromStr for ResponseType {
    type Err = PollError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "in_channel" => Ok(Self::InChannel),
            "ephemeral" => Ok(Self::Ephemeral),
            other => Err(PollError::bad_request(format!("Unknown response type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MattermostResponse {
    pub response_type: ResponseType,
    pub text: String,
}

impl MattermostResponse {
    pub fn new(response_type: ResponseType, text: impl Into<String>) -> Self {
        Self {
            response_type,
            text: text.into(),
        }
    }
}
