use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;
use shared::{Poll, PollError, Result};

/// Durable home of every poll.
///
/// Each mutating call must be atomic on its own record; nothing is promised
/// across calls. `apply_vote` and `apply_finish` re-check the record state so
/// a race with a concurrent finish or delete still ends in a typed error.
#[rocket::async_trait]
pub trait PollStore: Send + Sync {
    async fn insert(&self, poll: &Poll) -> Result<()>;

    async fn fetch(&self, id: Uuid) -> Result<Poll>;

    async fn apply_vote(&self, id: Uuid, option: &str) -> Result<()>;

    async fn apply_finish(&self, id: Uuid) -> Result<()>;

    /// Returns whether a record was actually removed.
    async fn apply_delete(&self, id: Uuid) -> Result<bool>;

    async fn close(&self) {}
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    polls: Mutex<HashMap<Uuid, Poll>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Poll>>> {
        self.polls
            .lock()
            .map_err(|e| PollError::store(format!("poll map lock poisoned: {}", e)))
    }
}

#[rocket::async_trait]
impl PollStore for MemoryStore {
    async fn insert(&self, poll: &Poll) -> Result<()> {
        let mut polls = self.lock()?;
        if polls.contains_key(&poll.id) {
            return Err(PollError::Conflict);
        }
        polls.insert(poll.id, poll.clone());
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Poll> {
        self.lock()?.get(&id).cloned().ok_or(PollError::NotFound)
    }

    async fn apply_vote(&self, id: Uuid, option: &str) -> Result<()> {
        let mut polls = self.lock()?;
        let poll = polls.get_mut(&id).ok_or(PollError::NotFound)?;
        poll.record_vote(option).map(|_| ())
    }

    async fn apply_finish(&self, id: Uuid) -> Result<()> {
        let mut polls = self.lock()?;
        polls.get_mut(&id).ok_or(PollError::NotFound)?.finish()
    }

    async fn apply_delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.lock()?.remove(&id).is_some())
    }
}
