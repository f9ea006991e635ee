use std::sync::Arc;
use uuid::Uuid;
use tracing::{debug, info};
use shared::{Poll, PollError, Result};
use crate::store::PollStore;

/// The five poll operations, with the ownership and state checks the
/// store itself is not trusted to perform.
#[derive(Clone)]
pub struct PollProcessor {
    store: Arc<dyn PollStore>,
}

impl PollProcessor {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn PollStore> {
        &self.store
    }

    pub async fn create_poll(&self, creator: &str, question: &str, options: Vec<String>) -> Result<Poll> {
        let poll = Poll::new(Uuid::new_v4(), creator, question, options)?;
        self.store.insert(&poll).await?;
        info!("Poll created: {}", poll.id);
        Ok(poll)
    }

    pub async fn cast_vote(&self, poll_id: Uuid, option: &str) -> Result<()> {
        let poll = self.store.fetch(poll_id).await?;
        poll.ensure_votable(option)?;
        self.store.apply_vote(poll_id, option).await?;
        info!("Vote received for {} on option {}", poll_id, option);
        Ok(())
    }

    pub async fn get_results(&self, poll_id: Uuid) -> Result<Poll> {
        let poll = self.store.fetch(poll_id).await?;
        debug!("Fetched results for {} ({} votes)", poll_id, poll.total_votes());
        Ok(poll)
    }

    /// Finishing a poll twice reports `AlreadyFinished` instead of silently succeeding.
    pub async fn finish_poll(&self, poll_id: Uuid, requester: &str) -> Result<()> {
        let poll = self.store.fetch(poll_id).await?;
        if !poll.is_creator(requester) {
            return Err(PollError::Forbidden);
        }
        if poll.finished {
            return Err(PollError::AlreadyFinished);
        }
        self.store.apply_finish(poll_id).await?;
        info!("Poll {} finished", poll_id);
        Ok(())
    }

    /// Deletes without an ownership check; unknown ids succeed.
    pub async fn delete_poll(&self, poll_id: Uuid) -> Result<()> {
        if self.store.apply_delete(poll_id).await? {
            info!("Poll {} deleted", poll_id);
        } else {
            debug!("Delete of unknown poll {} ignored", poll_id);
        }
        Ok(())
    }
}
