use crate::domain::post::{NewPost, PostPatch};
use crate::domain::{BlogError, Post};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, author_id: i64, input: NewPost) -> Result<Post, BlogError>;
    async fn find_by_id(&self, id: i64) -> Result<Post, BlogError>;
    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, BlogError>;
    async fn delete(&self, id: i64) -> Result<(), BlogError>;
    /// Newest first; also returns the total row count for pagination.
    async fn list(&self, limit: i64, offset: i64) -> Result<(Vec<Post>, i64), BlogError>;
}

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn post_from_row(row: &sqlx::postgres::PgRow) -> Result<Post, BlogError> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        content: row.try_get("content")?,
        author_id: row.try_get("author_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, author_id: i64, input: NewPost) -> Result<Post, BlogError> {
        let row = sqlx::query(
            r#"
            INSERT INTO posts (title, description, content, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING id, title, description, content, author_id, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.content)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create post: {}", e);
            BlogError::Database(e.to_string())
        })?;

        post_from_row(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Post, BlogError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, content, author_id, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BlogError::Database(e.to_string()))?;

        match row {
            Some(row) => post_from_row(&row),
            None => Err(BlogError::PostNotFound),
        }
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, BlogError> {
        let row = sqlx::query(
            r#"
            UPDATE posts
            SET title = $1, description = $2, content = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, title, description, content, author_id, created_at, updated_at
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(&patch.content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BlogError::Database(e.to_string()))?;

        match row {
            Some(row) => post_from_row(&row),
            None => Err(BlogError::PostNotFound),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), BlogError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| BlogError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            Err(BlogError::PostNotFound)
        } else {
            Ok(())
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<(Vec<Post>, i64), BlogError> {
        let count_row = sqlx::query("SELECT COUNT(*) as count FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| BlogError::Database(e.to_string()))?;

        let total: i64 = count_row.try_get("count")?;

        let rows = sqlx::query(
            r#"
            SELECT id, title, description, content, author_id, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BlogError::Database(e.to_string()))?;

        let posts = rows
            .iter()
            .map(post_from_row)
            .collect::<Result<Vec<Post>, BlogError>>()?;

        Ok((posts, total))
    }
}
