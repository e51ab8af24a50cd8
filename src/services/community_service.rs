// src/services/community_service.rs
// DOCUMENTATION: Business logic for the community features
// PURPOSE: Intermediary between handlers and the store; owns referential checks

use crate::db::CommunityStore;
use crate::errors::FinderError;
use crate::models::{NewPost, NewSavedPlace, NewUser, Post, PostFilter, SavedPlace, User};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct CommunityService {
    store: Arc<dyn CommunityStore>,
}

impl CommunityService {
    pub fn new(store: Arc<dyn CommunityStore>) -> Self {
        Self { store }
    }

    pub async fn create_user(&self, req: NewUser) -> Result<User, FinderError> {
        let user = self.store.create_user(req).await?;
        log::info!("Registered user {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, FinderError> {
        self.store.get_user(id).await
    }

    /// Save a place for an existing user
    pub async fn save_place(
        &self,
        user_id: Uuid,
        req: NewSavedPlace,
    ) -> Result<SavedPlace, FinderError> {
        self.store.get_user(user_id).await?;
        self.store.save_place(user_id, req).await
    }

    pub async fn list_saved_places(&self, user_id: Uuid) -> Result<Vec<SavedPlace>, FinderError> {
        self.store.get_user(user_id).await?;
        self.store.list_saved_places(user_id).await
    }

    /// Create a post authored by an existing user
    pub async fn create_post(&self, req: NewPost) -> Result<Post, FinderError> {
        self.store.get_user(req.user_id).await?;
        let post = self.store.create_post(req).await?;
        log::info!("User {} created post {}", post.user_id, post.id);
        Ok(post)
    }

    pub async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, FinderError> {
        self.store.list_posts(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryCommunityStore;

    fn service() -> CommunityService {
        CommunityService::new(Arc::new(MemoryCommunityStore::default()))
    }

    fn place() -> NewSavedPlace {
        NewSavedPlace {
            name: "Split".to_string(),
            latitude: 43.5081,
            longitude: 16.4402,
            description: Some("Old town".to_string()),
            saved_at: None,
        }
    }

    #[tokio::test]
    async fn test_save_place_requires_existing_user() {
        let service = service();
        let result = service.save_place(Uuid::new_v4(), place()).await;
        assert!(matches!(result, Err(FinderError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_save_and_list_for_existing_user() {
        let service = service();
        let user = service
            .create_user(NewUser {
                username: "dora".to_string(),
                display_name: "Dora".to_string(),
                avatar_url: None,
            })
            .await
            .unwrap();

        let saved = service.save_place(user.id, place()).await.unwrap();
        let listed = service.list_saved_places(user.id).await.unwrap();
        assert_eq!(listed, vec![saved]);
    }

    #[tokio::test]
    async fn test_create_post_requires_existing_user() {
        let service = service();
        let result = service
            .create_post(NewPost {
                user_id: Uuid::new_v4(),
                content: "hello".to_string(),
                place_id: None,
                created_at: None,
                likes: None,
            })
            .await;
        assert!(matches!(result, Err(FinderError::NotFound(_))));
    }
}
