use crate::calculations::{calculate_odds, ModelParams};
use crate::db::{MatchRepository, PlayerDirectory};
use crate::error::OddsError;
use crate::types::OddsReport;
use std::collections::HashMap;
use tracing::{info, warn};

/// Fetch history and names for the two players and run the odds model.
///
/// `Ok(None)` means there is nothing to compute from. A failed match fetch
/// is an error; a failed name fetch only costs the display names.
pub async fn compute_odds<S>(
    store: &S,
    params: &ModelParams,
    player_a: &str,
    player_b: &str,
) -> Result<Option<OddsReport>, OddsError>
where
    S: MatchRepository + PlayerDirectory + Sync,
{
    let matches = store.fetch_matches(player_a, player_b).await?;
    if matches.is_empty() {
        info!("No finalized matches for {} / {}", player_a, player_b);
        return Ok(None);
    }

    let names = match store.fetch_player_names().await {
        Ok(names) => names,
        Err(e) => {
            warn!("Failed to fetch player names, using ids: {}", e);
            HashMap::new()
        }
    };

    calculate_odds(player_a, player_b, &matches, &names, params)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use crate::types::{MatchRecord, PlayerId};
    use async_trait::async_trait;

    /// In-memory store for handler and service tests
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub matches: Vec<MatchRecord>,
        pub names: HashMap<PlayerId, String>,
        pub fail_matches: bool,
        pub fail_names: bool,
    }

    #[async_trait]
    impl MatchRepository for MemoryStore {
        async fn fetch_matches(
            &self,
            player_a: &str,
            player_b: &str,
        ) -> Result<Vec<MatchRecord>, RepositoryError> {
            if self.fail_matches {
                return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
            }
            Ok(self
                .matches
                .iter()
                .filter(|m| {
                    [player_a, player_b].contains(&m.player_a_id.as_str())
                        || [player_a, player_b].contains(&m.player_b_id.as_str())
                })
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl PlayerDirectory for MemoryStore {
        async fn fetch_player_names(&self) -> Result<HashMap<PlayerId, String>, RepositoryError> {
            if self.fail_names {
                return Err(RepositoryError::Database(sqlx::Error::PoolClosed));
            }
            Ok(self.names.clone())
        }
    }

    pub(crate) fn record(winner: &str, loser: &str, score: &str) -> MatchRecord {
        MatchRecord {
            winner_id: Some(winner.to_string()),
            final_score: Some(score.to_string()),
            player_a_id: winner.to_string(),
            player_b_id: loser.to_string(),
        }
    }

    pub(crate) fn sample_store() -> MemoryStore {
        MemoryStore {
            matches: vec![
                record("a", "b", "2-0"),
                record("a", "b", "3-1"),
                record("b", "a", "1-0"),
                record("c", "d", "5-0"),
            ],
            names: HashMap::from([
                ("a".to_string(), "Alice".to_string()),
                ("b".to_string(), "Bob".to_string()),
            ]),
            ..MemoryStore::default()
        }
    }

    #[tokio::test]
    async fn test_compute_odds_resolves_names() {
        let store = sample_store();
        let report = compute_odds(&store, &ModelParams::default(), "a", "b")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.winner, "Alice");
        assert_eq!(report.loser, "Bob");
    }

    #[tokio::test]
    async fn test_compute_odds_empty_history() {
        let store = sample_store();
        let result = compute_odds(&store, &ModelParams::default(), "x", "y")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_compute_odds_fetch_failure() {
        let store = MemoryStore {
            fail_matches: true,
            ..sample_store()
        };
        let err = compute_odds(&store, &ModelParams::default(), "a", "b")
            .await
            .unwrap_err();
        assert!(matches!(err, OddsError::Repository(_)));
    }

    #[tokio::test]
    async fn test_compute_odds_names_failure_uses_ids() {
        let store = MemoryStore {
            fail_names: true,
            ..sample_store()
        };
        let report = compute_odds(&store, &ModelParams::default(), "a", "b")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(report.winner, "a");
        assert_eq!(report.loser, "b");
    }
}
