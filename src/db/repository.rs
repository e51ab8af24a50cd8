// src/db/repository.rs
// DOCUMENTATION: Postgres community store - all SQL queries
// PURPOSE: Production adapter for the community data-access contract

use crate::clock::Clock;
use crate::db::CommunityStore;
use crate::errors::FinderError;
use crate::models::*;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Table definitions, applied idempotently at startup
const SCHEMA: [&str; 5] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        username TEXT NOT NULL,
        display_name TEXT NOT NULL,
        avatar_url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS saved_places (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL,
        name TEXT NOT NULL,
        latitude DOUBLE PRECISION NOT NULL,
        longitude DOUBLE PRECISION NOT NULL,
        description TEXT,
        saved_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL,
        content TEXT NOT NULL,
        place_id TEXT,
        created_at TIMESTAMPTZ NOT NULL,
        likes INTEGER NOT NULL DEFAULT 0
    )
    "#,
    "CREATE INDEX IF NOT EXISTS saved_places_user_idx ON saved_places (user_id, saved_at DESC)",
    "CREATE INDEX IF NOT EXISTS posts_created_idx ON posts (created_at DESC)",
];

/// PgCommunityStore: community operations over PostgreSQL
/// DOCUMENTATION: Timestamps are bound from the injected clock, never NOW()
pub struct PgCommunityStore {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl PgCommunityStore {
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// Create community tables if they do not exist
    pub async fn ensure_schema(&self) -> Result<(), FinderError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    log::error!("Failed to apply community schema: {}", e);
                    FinderError::DatabaseError(e.to_string())
                })?;
        }
        log::info!("Community schema ready");
        Ok(())
    }
}

#[async_trait]
impl CommunityStore for PgCommunityStore {
    async fn create_user(&self, req: NewUser) -> Result<User, FinderError> {
        let user = User::new(Uuid::new_v4(), req);

        sqlx::query(
            r#"
            INSERT INTO users (id, username, display_name, avatar_url)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.display_name)
        .bind(&user.avatar_url)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create user {}: {}", user.username, e);
            FinderError::DatabaseError(e.to_string())
        })?;

        log::info!("Created user with id: {}", user.id);
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<User, FinderError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, display_name, avatar_url FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Database error fetching user {}: {}", id, e);
            FinderError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| {
            log::warn!("User not found: {}", id);
            FinderError::NotFound(format!("user {}", id))
        })
    }

    async fn save_place(
        &self,
        user_id: Uuid,
        req: NewSavedPlace,
    ) -> Result<SavedPlace, FinderError> {
        let place = SavedPlace::new(Uuid::new_v4(), user_id, req, self.clock.as_ref());

        sqlx::query(
            r#"
            INSERT INTO saved_places (
                id, user_id, name, latitude, longitude, description, saved_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(place.id) // $1
        .bind(place.user_id) // $2
        .bind(&place.name) // $3
        .bind(place.latitude) // $4
        .bind(place.longitude) // $5
        .bind(&place.description) // $6
        .bind(place.saved_at) // $7
        .execute(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to save place for user {}: {}", user_id, e);
            FinderError::DatabaseError(e.to_string())
        })?;

        log::info!("Saved place {} for user {}", place.id, user_id);
        Ok(place)
    }

    async fn list_saved_places(&self, user_id: Uuid) -> Result<Vec<SavedPlace>, FinderError> {
        sqlx::query_as::<_, SavedPlace>(
            r#"
            SELECT id, user_id, name, latitude, longitude, description, saved_at
            FROM saved_places
            WHERE user_id = $1
            ORDER BY saved_at DESC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list saved places for user {}: {}", user_id, e);
            FinderError::DatabaseError(e.to_string())
        })
    }

    async fn create_post(&self, req: NewPost) -> Result<Post, FinderError> {
        let post = Post::new(Uuid::new_v4(), req, self.clock.as_ref());

        sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, content, place_id, created_at, likes)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id)
        .bind(post.user_id)
        .bind(&post.content)
        .bind(&post.place_id)
        .bind(post.created_at)
        .bind(post.likes)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create post for user {}: {}", post.user_id, e);
            FinderError::DatabaseError(e.to_string())
        })?;

        log::info!("Created post with id: {}", post.id);
        Ok(post)
    }

    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, FinderError> {
        // NULL parameters disable their filter
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, content, place_id, created_at, likes
            FROM posts
            WHERE ($1::uuid IS NULL OR user_id = $1)
              AND ($2::text IS NULL OR place_id = $2)
            ORDER BY created_at DESC, id ASC
            LIMIT $3
            "#,
        )
        .bind(filter.user_id)
        .bind(&filter.place_id)
        .bind(filter.effective_limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Post listing query error: {}", e);
            FinderError::DatabaseError(e.to_string())
        })?;

        log::debug!("Listed {} posts", posts.len());
        Ok(posts)
    }
}
