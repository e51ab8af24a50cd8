// src/db/memory_store.rs
// DOCUMENTATION: In-memory community store
// PURPOSE: Backs tests and local development (STORE_BACKEND=memory)

use crate::clock::{Clock, SystemClock};
use crate::db::CommunityStore;
use crate::errors::FinderError;
use crate::models::{NewPost, NewSavedPlace, NewUser, Post, PostFilter, SavedPlace, User};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    saved_places: Vec<SavedPlace>,
    posts: Vec<Post>,
}

/// Thread-safe store holding everything in process memory
pub struct MemoryCommunityStore {
    tables: RwLock<Tables>,
    clock: Arc<dyn Clock>,
}

impl MemoryCommunityStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            clock,
        }
    }
}

impl Default for MemoryCommunityStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[async_trait]
impl CommunityStore for MemoryCommunityStore {
    async fn create_user(&self, req: NewUser) -> Result<User, FinderError> {
        let user = User::new(Uuid::new_v4(), req);
        let mut tables = self.tables.write().await;
        tables.users.insert(user.id, user.clone());
        log::debug!("Memory store: created user {}", user.id);
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<User, FinderError> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| FinderError::NotFound(format!("user {}", id)))
    }

    async fn save_place(
        &self,
        user_id: Uuid,
        req: NewSavedPlace,
    ) -> Result<SavedPlace, FinderError> {
        let place = SavedPlace::new(Uuid::new_v4(), user_id, req, self.clock.as_ref());
        let mut tables = self.tables.write().await;
        tables.saved_places.push(place.clone());
        Ok(place)
    }

    async fn list_saved_places(&self, user_id: Uuid) -> Result<Vec<SavedPlace>, FinderError> {
        let tables = self.tables.read().await;
        let mut places: Vec<SavedPlace> = tables
            .saved_places
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        places.sort_by(|a, b| b.saved_at.cmp(&a.saved_at).then(a.id.cmp(&b.id)));
        Ok(places)
    }

    async fn create_post(&self, req: NewPost) -> Result<Post, FinderError> {
        let post = Post::new(Uuid::new_v4(), req, self.clock.as_ref());
        let mut tables = self.tables.write().await;
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, FinderError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        posts.truncate(filter.effective_limit() as usize);
        Ok(posts)
    }
}
