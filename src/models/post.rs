// src/models/post.rs

use crate::clock::Clock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Community post, optionally attached to a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub place_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub likes: i32,
}

/// Request to create a post
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewPost {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 5000))]
    pub content: String,

    #[serde(default)]
    pub place_id: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[validate(range(min = 0))]
    #[serde(default)]
    pub likes: Option<i32>,
}

/// Filter for listing posts; every field narrows the result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFilter {
    pub user_id: Option<Uuid>,
    pub place_id: Option<String>,
    pub limit: Option<i64>,
}

impl PostFilter {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 100;

    /// Effective row limit, clamped to 1..=MAX_LIMIT
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.user_id.map_or(true, |id| post.user_id == id)
            && self
                .place_id
                .as_deref()
                .map_or(true, |place| post.place_id.as_deref() == Some(place))
    }
}

impl Post {
    /// Build a post, defaulting created_at to the clock's now and likes to 0
    pub fn new(id: Uuid, req: NewPost, clock: &dyn Clock) -> Self {
        Post {
            id,
            user_id: req.user_id,
            content: req.content,
            place_id: req.place_id,
            created_at: req.created_at.unwrap_or_else(|| clock.now()),
            likes: req.likes.unwrap_or(0),
        }
    }
}
