//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create a new user with generated token
    pub async fn create_user(&self, name: Option<&str>) -> Result<User> {
        let token = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (token, name)
            VALUES ($1, $2)
            RETURNING id, token, name, created_at, last_seen_at
            "#,
        )
        .bind(&token)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by token
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, token, name, created_at, last_seen_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user last_seen_at timestamp
    pub async fn update_last_seen(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Paper / Concept Catalog ===

    /// Register a paper with its extracted concepts and seed a default
    /// understanding record per concept for the owner
    pub async fn create_paper(
        &self,
        user_id: Uuid,
        title: &str,
        concepts: &[ConceptSpec],
    ) -> Result<DbPaper> {
        let mut tx = self.pool.begin().await?;

        let paper = sqlx::query_as::<_, DbPaper>(
            r#"
            INSERT INTO papers (user_id, title)
            VALUES ($1, $2)
            RETURNING id, user_id, title, created_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .fetch_one(&mut *tx)
        .await?;

        for concept in concepts {
            sqlx::query(
                r#"
                INSERT INTO concepts (paper_id, id, name)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(paper.id)
            .bind(&concept.id)
            .bind(&concept.name)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                r#"
                INSERT INTO concept_understanding (user_id, paper_id, concept_id)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, paper_id, concept_id) DO NOTHING
                "#,
            )
            .bind(user_id)
            .bind(paper.id)
            .bind(&concept.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(paper)
    }

    /// Get a paper owned by the user
    pub async fn get_paper(&self, user_id: Uuid, paper_id: Uuid) -> Result<Option<DbPaper>> {
        let paper = sqlx::query_as::<_, DbPaper>(
            r#"
            SELECT id, user_id, title, created_at
            FROM papers
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(paper_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(paper)
    }

    /// Get all papers for a user, with catalog sizes
    pub async fn list_papers(&self, user_id: Uuid) -> Result<Vec<PaperInfo>> {
        let papers = sqlx::query_as::<_, PaperInfo>(
            r#"
            SELECT p.id, p.title, COUNT(c.id)::BIGINT as concept_count, p.created_at
            FROM papers p
            LEFT JOIN concepts c ON c.paper_id = p.id
            WHERE p.user_id = $1
            GROUP BY p.id, p.title, p.created_at
            ORDER BY p.created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(papers)
    }

    /// Get the concept catalog for a paper
    pub async fn list_concepts(&self, paper_id: Uuid) -> Result<Vec<DbConcept>> {
        let concepts = sqlx::query_as::<_, DbConcept>(
            r#"
            SELECT paper_id, id, name, created_at
            FROM concepts
            WHERE paper_id = $1
            ORDER BY id
            "#,
        )
        .bind(paper_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(concepts)
    }

    /// Size of the concept catalog for a paper
    pub async fn concept_count(&self, paper_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM concepts
            WHERE paper_id = $1
            "#,
        )
        .bind(paper_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Check whether a concept exists in a paper's catalog
    pub async fn concept_exists(&self, paper_id: Uuid, concept_id: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM concepts
                WHERE paper_id = $1 AND id = $2
            )
            "#,
        )
        .bind(paper_id)
        .bind(concept_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    // === Understanding Repository ===

    /// Get one understanding record
    pub async fn get_understanding(&self, key: &ConceptKey) -> Result<Option<DbUnderstanding>> {
        let record = sqlx::query_as::<_, DbUnderstanding>(
            r#"
            SELECT user_id, paper_id, concept_id, is_understood, confidence_level,
                   times_reviewed, times_quizzed, correct_answers, last_reviewed,
                   next_review, ease_factor, interval_days, created_at, updated_at
            FROM concept_understanding
            WHERE user_id = $1 AND paper_id = $2 AND concept_id = $3
            "#,
        )
        .bind(key.user_id)
        .bind(key.paper_id)
        .bind(&key.concept_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get the understanding record for a key, creating the default record if
    /// none exists. Creation is idempotent.
    pub async fn get_or_create_understanding(&self, key: &ConceptKey) -> Result<DbUnderstanding> {
        sqlx::query(
            r#"
            INSERT INTO concept_understanding (user_id, paper_id, concept_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, paper_id, concept_id) DO NOTHING
            "#,
        )
        .bind(key.user_id)
        .bind(key.paper_id)
        .bind(&key.concept_id)
        .execute(&self.pool)
        .await?;

        let record = self.get_understanding(key).await?.ok_or_else(|| {
            ApiError::Internal("understanding record missing after insert".to_string())
        })?;

        Ok(record)
    }

    /// Get all understanding records for a (user, paper) pair
    pub async fn list_understandings(
        &self,
        user_id: Uuid,
        paper_id: Uuid,
    ) -> Result<Vec<DbUnderstanding>> {
        let records = sqlx::query_as::<_, DbUnderstanding>(
            r#"
            SELECT user_id, paper_id, concept_id, is_understood, confidence_level,
                   times_reviewed, times_quizzed, correct_answers, last_reviewed,
                   next_review, ease_factor, interval_days, created_at, updated_at
            FROM concept_understanding
            WHERE user_id = $1 AND paper_id = $2
            ORDER BY concept_id
            "#,
        )
        .bind(user_id)
        .bind(paper_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Atomically apply `f` to the record for `key`, creating the default
    /// record first if none exists.
    ///
    /// The row stays locked until commit, so concurrent updates to the same
    /// concept serialize and neither is lost; updates to different concepts
    /// proceed in parallel. Either the full update lands or the transaction
    /// rolls back.
    pub async fn update_understanding<F>(
        &self,
        key: &ConceptKey,
        f: F,
    ) -> Result<ConceptUnderstanding>
    where
        F: FnOnce(ConceptUnderstanding) -> ConceptUnderstanding,
    {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO concept_understanding (user_id, paper_id, concept_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, paper_id, concept_id) DO NOTHING
            "#,
        )
        .bind(key.user_id)
        .bind(key.paper_id)
        .bind(&key.concept_id)
        .execute(&mut *tx)
        .await?;

        let current = sqlx::query_as::<_, DbUnderstanding>(
            r#"
            SELECT user_id, paper_id, concept_id, is_understood, confidence_level,
                   times_reviewed, times_quizzed, correct_answers, last_reviewed,
                   next_review, ease_factor, interval_days, created_at, updated_at
            FROM concept_understanding
            WHERE user_id = $1 AND paper_id = $2 AND concept_id = $3
            FOR UPDATE
            "#,
        )
        .bind(key.user_id)
        .bind(key.paper_id)
        .bind(&key.concept_id)
        .fetch_one(&mut *tx)
        .await?;

        let updated = f(current.to_core());

        sqlx::query(
            r#"
            UPDATE concept_understanding SET
                is_understood = $4,
                confidence_level = $5,
                times_reviewed = $6,
                times_quizzed = $7,
                correct_answers = $8,
                last_reviewed = $9,
                next_review = $10,
                ease_factor = $11,
                interval_days = $12,
                updated_at = NOW()
            WHERE user_id = $1 AND paper_id = $2 AND concept_id = $3
            "#,
        )
        .bind(key.user_id)
        .bind(key.paper_id)
        .bind(&key.concept_id)
        .bind(updated.is_understood)
        .bind(updated.confidence_level)
        .bind(updated.times_reviewed as i32)
        .bind(updated.times_quizzed as i32)
        .bind(updated.correct_answers as i32)
        .bind(updated.last_reviewed)
        .bind(updated.next_review)
        .bind(updated.ease_factor)
        .bind(updated.interval_days as i32)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }
}
