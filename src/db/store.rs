// src/db/store.rs
// DOCUMENTATION: Community data-access contract
// PURPOSE: Decouple callers from the concrete persistence technology

use crate::errors::FinderError;
use crate::models::{NewPost, NewSavedPlace, NewUser, Post, PostFilter, SavedPlace, User};
use async_trait::async_trait;
use uuid::Uuid;

/// Reads and writes for users, saved places and posts
///
/// Listing order is newest first (`saved_at` / `created_at` descending, ties
/// by id). Saving the same place twice creates two records. Stores perform no
/// referential checks; see `CommunityService` for those.
#[async_trait]
pub trait CommunityStore: Send + Sync {
    async fn create_user(&self, req: NewUser) -> Result<User, FinderError>;

    /// `FinderError::NotFound` when no user has this id
    async fn get_user(&self, id: Uuid) -> Result<User, FinderError>;

    async fn save_place(
        &self,
        user_id: Uuid,
        req: NewSavedPlace,
    ) -> Result<SavedPlace, FinderError>;

    async fn list_saved_places(&self, user_id: Uuid) -> Result<Vec<SavedPlace>, FinderError>;

    async fn create_post(&self, req: NewPost) -> Result<Post, FinderError>;

    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, FinderError>;
}
