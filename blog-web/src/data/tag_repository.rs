use crate::domain::{BlogError, Tag};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Exact match against the stored (lowercased) name. Returns every
    /// matching row so callers can detect duplicate-name anomalies.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Tag>, BlogError>;
    /// Inserts the whole batch inside one transaction.
    async fn insert_batch(&self, names: &[String]) -> Result<Vec<Tag>, BlogError>;
}

pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Vec<Tag>, BlogError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name
            FROM tags
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BlogError::Database(e.to_string()))?;

        rows.iter()
            .map(|row| {
                Ok(Tag {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }

    async fn insert_batch(&self, names: &[String]) -> Result<Vec<Tag>, BlogError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| BlogError::Database(e.to_string()))?;

        let mut created = Vec::with_capacity(names.len());
        for name in names {
            let row = sqlx::query(
                r#"
                INSERT INTO tags (name)
                VALUES ($1)
                RETURNING id, name
                "#,
            )
            .bind(name)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert tag {:?}: {}", name, e);
                BlogError::Database(e.to_string())
            })?;

            created.push(Tag {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
            });
        }

        tx.commit()
            .await
            .map_err(|e| BlogError::Database(e.to_string()))?;

        Ok(created)
    }
}
