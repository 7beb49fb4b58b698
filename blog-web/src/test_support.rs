#![allow(dead_code)]

use crate::data::post_repository::PostRepository;
use crate::data::tag_repository::TagRepository;
use crate::domain::post::{NewPost, PostPatch};
use crate::domain::{BlogError, CurrentUser, Permission, Post, Tag};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

pub fn writer(id: i64) -> CurrentUser {
    CurrentUser {
        id,
        username: format!("user{}", id),
        permissions: Permission::WRITE_POSTS.0 | Permission::COMMENT.0,
    }
}

pub fn reader(id: i64) -> CurrentUser {
    CurrentUser {
        id,
        username: format!("user{}", id),
        permissions: Permission::FOLLOW.0 | Permission::COMMENT.0,
    }
}

pub fn admin(id: i64) -> CurrentUser {
    CurrentUser {
        id,
        username: format!("admin{}", id),
        permissions: Permission::ADMINISTER.0,
    }
}

#[derive(Default)]
struct PostStore {
    next_id: i64,
    posts: Vec<Post>,
}

/// Mutex-backed stand-in for the Postgres post repository.
#[derive(Default)]
pub struct InMemoryPostRepository {
    state: Mutex<PostStore>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, author_id: i64, input: NewPost) -> Result<Post, BlogError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let now = Utc::now();
        let post = Post {
            id: state.next_id,
            title: input.title,
            description: input.description,
            content: input.content,
            author_id,
            created_at: now,
            updated_at: now,
        };
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Post, BlogError> {
        self.state
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|post| post.id == id)
            .cloned()
            .ok_or(BlogError::PostNotFound)
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, BlogError> {
        let mut state = self.state.lock().unwrap();
        match state.posts.iter_mut().find(|post| post.id == id) {
            Some(post) => {
                post.title = patch.title;
                post.description = patch.description;
                post.content = patch.content;
                post.updated_at = Utc::now();
                Ok(post.clone())
            }
            None => Err(BlogError::PostNotFound),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), BlogError> {
        let mut state = self.state.lock().unwrap();
        let before = state.posts.len();
        state.posts.retain(|post| post.id != id);
        if state.posts.len() == before {
            Err(BlogError::PostNotFound)
        } else {
            Ok(())
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<(Vec<Post>, i64), BlogError> {
        let state = self.state.lock().unwrap();
        let mut posts = state.posts.clone();
        // Same ordering as the SQL query: newest first, id breaks ties.
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        let total = posts.len() as i64;
        let page = posts
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }
}

#[derive(Default)]
struct TagStore {
    next_id: i64,
    tags: Vec<Tag>,
}

/// In-memory tag repository. No uniqueness constraint, so tests can
/// stage duplicate-name anomalies.
#[derive(Default)]
pub struct InMemoryTagRepository {
    state: Mutex<TagStore>,
}

impl InMemoryTagRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Vec<Tag>, BlogError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .tags
            .iter()
            .filter(|tag| tag.name == name)
            .cloned()
            .collect())
    }

    async fn insert_batch(&self, names: &[String]) -> Result<Vec<Tag>, BlogError> {
        let mut state = self.state.lock().unwrap();
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            state.next_id += 1;
            let tag = Tag {
                id: state.next_id,
                name: name.clone(),
            };
            state.tags.push(tag.clone());
            created.push(tag);
        }
        Ok(created)
    }
}
