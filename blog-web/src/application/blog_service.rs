use crate::data::post_repository::PostRepository;
use crate::domain::post::{NewPost, PostPatch};
use crate::domain::{BlogError, CurrentUser, Page, Post};
use std::sync::Arc;

pub struct BlogService {
    post_repo: Arc<dyn PostRepository + Send + Sync>,
    posts_per_page: u32,
}

impl BlogService {
    pub fn new(post_repo: Arc<dyn PostRepository + Send + Sync>, posts_per_page: u32) -> Self {
        Self {
            post_repo,
            posts_per_page: posts_per_page.max(1),
        }
    }

    /// One listing page, newest first. Pages outside the collection
    /// (including page 0) come back empty rather than failing.
    pub async fn list_page(&self, page: u32) -> Result<Page<Post>, BlogError> {
        let per_page = i64::from(self.posts_per_page);
        let (posts, total) = if page == 0 {
            let (_, total) = self.post_repo.list(0, 0).await?;
            (Vec::new(), total)
        } else {
            let offset = (i64::from(page) - 1) * per_page;
            self.post_repo.list(per_page, offset).await?
        };

        Ok(Page::new(posts, page, self.posts_per_page, total))
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, BlogError> {
        self.post_repo.find_by_id(id).await
    }

    pub async fn create_post(
        &self,
        author: &CurrentUser,
        input: NewPost,
    ) -> Result<Post, BlogError> {
        let post = self.post_repo.create(author.id, input).await?;

        tracing::info!("Post created: id={}, author_id={}", post.id, author.id);

        Ok(post)
    }

    pub async fn update_post(
        &self,
        id: i64,
        actor: &CurrentUser,
        patch: PostPatch,
    ) -> Result<Post, BlogError> {
        let post = self.post_repo.find_by_id(id).await?;

        if !actor.can_modify(&post) {
            tracing::warn!(
                "User {} attempted to update post {} owned by {}",
                actor.id,
                id,
                post.author_id
            );
            return Err(BlogError::Forbidden);
        }

        let updated = self.post_repo.update(id, patch).await?;

        tracing::info!("Post updated: id={}, actor_id={}", id, actor.id);

        Ok(updated)
    }

    pub async fn delete_post(&self, id: i64, actor: &CurrentUser) -> Result<(), BlogError> {
        let post = self.post_repo.find_by_id(id).await?;

        if !actor.can_modify(&post) {
            tracing::warn!(
                "User {} attempted to delete post {} owned by {}",
                actor.id,
                id,
                post.author_id
            );
            return Err(BlogError::Forbidden);
        }

        self.post_repo.delete(id).await?;

        tracing::info!("Post deleted: id={}, actor_id={}", id, actor.id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin, writer, InMemoryPostRepository};

    fn service(per_page: u32) -> BlogService {
        BlogService::new(Arc::new(InMemoryPostRepository::new()), per_page)
    }

    fn input(title: &str, description: &str, content: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            description: description.to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_fetch_round_trips_fields() {
        let service = service(10);
        let author = writer(1);

        let created = service
            .create_post(&author, input("Title", "Short intro", "Full body"))
            .await
            .unwrap();

        let fetched = service.get_post(created.id).await.unwrap();
        assert_eq!(fetched.title, "Title");
        assert_eq!(fetched.description, "Short intro");
        assert_eq!(fetched.content, "Full body");
        assert_eq!(fetched.author_id, author.id);
    }

    #[tokio::test]
    async fn listing_splits_into_pages_newest_first() {
        let service = service(2);
        let author = writer(1);
        for n in 1..=3 {
            service
                .create_post(&author, input(&format!("post {}", n), "", "body"))
                .await
                .unwrap();
        }

        let first = service.list_page(1).await.unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.items[0].title, "post 3");
        assert_eq!(first.total_items, 3);
        assert_eq!(first.total_pages, 2);
        assert!(!first.has_prev);
        assert!(first.has_next);

        let second = service.list_page(2).await.unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].title, "post 1");
        assert!(second.has_prev);
        assert!(!second.has_next);
    }

    #[tokio::test]
    async fn listing_beyond_last_page_is_empty() {
        let service = service(2);
        let author = writer(1);
        for n in 1..=3 {
            service
                .create_post(&author, input(&format!("post {}", n), "", "body"))
                .await
                .unwrap();
        }

        let page = service.list_page(50).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 3);

        let page_zero = service.list_page(0).await.unwrap();
        assert!(page_zero.items.is_empty());
        assert_eq!(page_zero.total_items, 3);
    }

    #[tokio::test]
    async fn update_by_non_author_is_forbidden_and_leaves_post_unchanged() {
        let service = service(10);
        let author = writer(1);
        let stranger = writer(2);

        let post = service
            .create_post(&author, input("Original", "desc", "body"))
            .await
            .unwrap();

        let patch = PostPatch {
            title: "Hijacked".to_string(),
            description: "x".to_string(),
            content: "y".to_string(),
        };
        let err = service.update_post(post.id, &stranger, patch).await.unwrap_err();
        assert!(matches!(err, BlogError::Forbidden));

        let unchanged = service.get_post(post.id).await.unwrap();
        assert_eq!(unchanged.title, "Original");
        assert_eq!(unchanged.content, "body");
    }

    #[tokio::test]
    async fn admin_can_update_and_delete_any_post() {
        let service = service(10);
        let author = writer(1);
        let root = admin(99);

        let post = service
            .create_post(&author, input("Original", "", "body"))
            .await
            .unwrap();

        let patch = PostPatch {
            title: "Moderated".to_string(),
            description: String::new(),
            content: "edited".to_string(),
        };
        let updated = service.update_post(post.id, &root, patch).await.unwrap();
        assert_eq!(updated.title, "Moderated");

        service.delete_post(post.id, &root).await.unwrap();
        let err = service.get_post(post.id).await.unwrap_err();
        assert!(matches!(err, BlogError::PostNotFound));
    }

    #[tokio::test]
    async fn deleting_missing_post_is_not_found() {
        let service = service(10);
        let actor = writer(1);

        let err = service.delete_post(12345, &actor).await.unwrap_err();
        assert!(matches!(err, BlogError::PostNotFound));
    }

    #[tokio::test]
    async fn delete_by_non_author_is_forbidden() {
        let service = service(10);
        let author = writer(1);
        let stranger = writer(2);

        let post = service
            .create_post(&author, input("Keep me", "", "body"))
            .await
            .unwrap();

        let err = service.delete_post(post.id, &stranger).await.unwrap_err();
        assert!(matches!(err, BlogError::Forbidden));
        assert!(service.get_post(post.id).await.is_ok());
    }
}
