use crate::error::RepositoryError;
use crate::types::{MatchRecord, PlayerId};
use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use tracing::info;

/// Source of finalized match history
#[async_trait]
pub trait MatchRepository {
    /// Finalized matches where either seat is `player_a` or `player_b`.
    /// An empty history is `Ok(vec![])`, not an error.
    async fn fetch_matches(
        &self,
        player_a: &str,
        player_b: &str,
    ) -> Result<Vec<MatchRecord>, RepositoryError>;
}

/// Source of player display names
#[async_trait]
pub trait PlayerDirectory {
    async fn fetch_player_names(&self) -> Result<HashMap<PlayerId, String>, RepositoryError>;
}

/// Everything the `/predict` handler needs from storage
pub trait OddsStore: MatchRepository + PlayerDirectory + Send + Sync + 'static {}

impl<T> OddsStore for T where T: MatchRepository + PlayerDirectory + Send + Sync + 'static {}

/// Postgres-backed store over the `matches` and `players` tables
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_match(row: &PgRow) -> Result<MatchRecord, sqlx::Error> {
    Ok(MatchRecord {
        winner_id: row.try_get("winner_id")?,
        final_score: row.try_get("final_score")?,
        player_a_id: row.try_get("player_a_id")?,
        player_b_id: row.try_get("player_b_id")?,
    })
}

#[async_trait]
impl MatchRepository for PgStore {
    async fn fetch_matches(
        &self,
        player_a: &str,
        player_b: &str,
    ) -> Result<Vec<MatchRecord>, RepositoryError> {
        // ids are compared as text so uuid and text keys both work
        let query = r#"
            SELECT
                winner_id::text AS winner_id,
                final_score,
                player_a_id::text AS player_a_id,
                player_b_id::text AS player_b_id
            FROM matches
            WHERE is_finalized = TRUE
              AND (player_a_id::text IN ($1, $2) OR player_b_id::text IN ($1, $2))
        "#;

        let rows = sqlx::query(query)
            .bind(player_a)
            .bind(player_b)
            .fetch_all(&self.pool)
            .await?;

        let matches = rows
            .iter()
            .map(row_to_match)
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "📥 Fetched {} finalized matches for {} / {}",
            matches.len(),
            player_a,
            player_b
        );
        Ok(matches)
    }
}

#[async_trait]
impl PlayerDirectory for PgStore {
    async fn fetch_player_names(&self) -> Result<HashMap<PlayerId, String>, RepositoryError> {
        let rows = sqlx::query("SELECT id::text AS id, name FROM players")
            .fetch_all(&self.pool)
            .await?;

        let mut names = HashMap::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("id")?;
            let name: Option<String> = row.try_get("name")?;
            if let Some(name) = name {
                names.insert(id, name);
            }
        }

        Ok(names)
    }
}
