use crate::data::tag_repository::TagRepository;
use crate::domain::{BlogError, Tag};
use std::sync::Arc;

pub struct TagService {
    tag_repo: Arc<dyn TagRepository + Send + Sync>,
}

impl TagService {
    pub fn new(tag_repo: Arc<dyn TagRepository + Send + Sync>) -> Self {
        Self { tag_repo }
    }

    /// Case-insensitive lookup. Names are stored lowercased, so one
    /// match is the expected outcome; zero is a miss.
    pub async fn search(&self, name: &str) -> Result<Vec<Tag>, BlogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BlogError::Validation("Invalid parameter.".to_string()));
        }

        self.tag_repo.find_by_name(&name.to_lowercase()).await
    }

    /// Stages every name from a comma-separated list that does not exist
    /// yet, then inserts the staged batch in one transaction. Returns
    /// only the newly created tags.
    pub async fn add_tags(&self, taglist: &str) -> Result<Vec<Tag>, BlogError> {
        if taglist.trim().is_empty() {
            return Err(BlogError::Validation("Invalid parameter.".to_string()));
        }

        let mut staged: Vec<String> = Vec::new();
        for entry in taglist.split(',') {
            let name = entry.trim().to_lowercase();
            if name.is_empty() || staged.contains(&name) {
                continue;
            }

            let existing = self.tag_repo.find_by_name(&name).await?;
            match existing.len() {
                0 => staged.push(name),
                1 => {}
                n => {
                    // Duplicate rows for one name are a data-integrity
                    // anomaly; skip the entry instead of failing the batch.
                    tracing::warn!("Tag name {:?} matches {} rows, skipping", name, n);
                }
            }
        }

        if staged.is_empty() {
            return Ok(Vec::new());
        }

        let created = self.tag_repo.insert_batch(&staged).await?;

        tracing::info!("Created {} tags", created.len());

        Ok(created)
    }
}
