use sqlx::PgPool;
use uuid::Uuid;
use std::collections::HashMap;
use tracing::{debug, info};
use shared::{Poll, PollError, Result, models::Tally};
use crate::store::PollStore;

#[derive(Debug, sqlx::FromRow)]
pub struct PollRow {
    pub id: Uuid,
    pub creator: String,
    pub question: String,
    pub options: Vec<String>,
    pub votes: serde_json::Value,
    pub finished: bool,
}

impl TryFrom<PollRow> for Poll {
    type Error = PollError;

    fn try_from(row: PollRow) -> Result<Self> {
        let votes: HashMap<String, Tally> = serde_json::from_value(row.votes)
            .map_err(|e| PollError::decode(format!("votes column: {}", e)))?;

        let poll = Poll {
            id: row.id,
            creator: row.creator,
            question: row.question,
            options: row.options,
            votes,
            finished: row.finished,
        };
        poll.check_invariants()?;
        Ok(poll)
    }
}

fn db_error(e: sqlx::Error) -> PollError {
    PollError::store(e)
}

/// Maps the status text returned by `vote_func`.
pub fn vote_status(status: &str, option: &str) -> Result<()> {
    match status {
        "ok" => Ok(()),
        "not_found" => Err(PollError::NotFound),
        "finished" => Err(PollError::PollFinished),
        "invalid_option" => Err(PollError::InvalidOption(option.to_string())),
        other => Err(PollError::decode(format!("vote_func returned {}", other))),
    }
}

/// Maps the status text returned by `finish_poll`.
pub fn finish_status(status: &str) -> Result<()> {
    match status {
        "ok" => Ok(()),
        "not_found" => Err(PollError::NotFound),
        "already_finished" => Err(PollError::AlreadyFinished),
        other => Err(PollError::decode(format!("finish_poll returned {}", other))),
    }
}

pub struct PgPollStore {
    pool: PgPool,
}

impl PgPollStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    async fn call_procedure(&self, sql: &str, id: Uuid, option: Option<&str>) -> Result<String> {
        let mut query = sqlx::query_scalar::<_, String>(sql).bind(id);
        if let Some(option) = option {
            query = query.bind(option);
        }
        query.fetch_one(&self.pool).await.map_err(db_error)
    }
}

#[rocket::async_trait]
impl PollStore for PgPollStore {
    async fn insert(&self, poll: &Poll) -> Result<()> {
        let votes = serde_json::to_value(&poll.votes).map_err(PollError::decode)?;

        sqlx::query(
            "INSERT INTO polls (id, creator, question, options, votes, finished)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(poll.id)
        .bind(&poll.creator)
        .bind(&poll.question)
        .bind(&poll.options)
        .bind(votes)
        .bind(poll.finished)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => PollError::Conflict,
            _ => db_error(e),
        })?;

        debug!("Inserted poll row {}", poll.id);
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Poll> {
        let row = sqlx::query_as::<_, PollRow>(
            "SELECT id, creator, question, options, votes, finished FROM polls WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.ok_or(PollError::NotFound)?.try_into()
    }

    async fn apply_vote(&self, id: Uuid, option: &str) -> Result<()> {
        let status = self.call_procedure("SELECT vote_func($1, $2)", id, Some(option)).await?;
        vote_status(&status, option)
    }

    async fn apply_finish(&self, id: Uuid) -> Result<()> {
        let status = self.call_procedure("SELECT finish_poll($1)", id, None).await?;
        finish_status(&status)
    }

    async fn apply_delete(&self, id: Uuid) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT delete_poll($1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("🔌 Postgres pool closed");
    }
}
