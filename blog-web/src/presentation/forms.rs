use crate::domain::post::{NewPost, PostPatch};
use crate::domain::Post;
use serde::{Deserialize, Serialize};

const TITLE_MAX_CHARS: usize = 255;
const DESCRIPTION_MAX_CHARS: usize = 255;

/// The post creation/edit form. Missing fields deserialize to empty
/// strings so an incomplete submission turns into validation errors
/// instead of a framework-level rejection.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Default, Serialize)]
pub struct PostFormErrors {
    pub title: Vec<String>,
    pub description: Vec<String>,
    pub body: Vec<String>,
}

impl PostFormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.body.is_empty()
    }
}

impl PostForm {
    /// Pre-populates the form from a stored post for the edit page.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            description: post.description.clone(),
            body: post.content.clone(),
        }
    }

    fn check(&self) -> PostFormErrors {
        let mut errors = PostFormErrors::default();

        if self.title.trim().is_empty() {
            errors.title.push("Title is required.".to_string());
        } else if self.title.chars().count() > TITLE_MAX_CHARS {
            errors
                .title
                .push(format!("Title must be at most {} characters.", TITLE_MAX_CHARS));
        }

        if self.description.chars().count() > DESCRIPTION_MAX_CHARS {
            errors.description.push(format!(
                "Description must be at most {} characters.",
                DESCRIPTION_MAX_CHARS
            ));
        }

        if self.body.trim().is_empty() {
            errors.body.push("Body is required.".to_string());
        }

        errors
    }

    pub fn validate(&self) -> Result<NewPost, PostFormErrors> {
        let errors = self.check();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewPost {
            title: self.title.clone(),
            description: self.description.clone(),
            content: self.body.clone(),
        })
    }

    pub fn validate_patch(&self) -> Result<PostPatch, PostFormErrors> {
        let input = self.validate()?;
        Ok(PostPatch {
            title: input.title,
            description: input.description,
            content: input.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn complete_form_passes() {
        let form = PostForm {
            title: "A title".to_string(),
            description: String::new(),
            body: "Some body".to_string(),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.title, "A title");
        assert_eq!(input.content, "Some body");
    }

    #[test]
    fn missing_title_and_body_collect_errors() {
        let form = PostForm::default();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.title.len(), 1);
        assert_eq!(errors.body.len(), 1);
        assert!(errors.description.is_empty());
    }

    #[test]
    fn whitespace_only_title_is_rejected() {
        let form = PostForm {
            title: "   ".to_string(),
            description: String::new(),
            body: "b".to_string(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn overlong_title_is_rejected() {
        let form = PostForm {
            title: "x".repeat(256),
            description: String::new(),
            body: "b".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.title.len(), 1);
    }

    #[test]
    fn from_post_prefills_every_field() {
        let now = Utc::now();
        let post = Post {
            id: 5,
            title: "T".to_string(),
            description: "D".to_string(),
            content: "B".to_string(),
            author_id: 1,
            created_at: now,
            updated_at: now,
        };
        let form = PostForm::from_post(&post);
        assert_eq!(form.title, "T");
        assert_eq!(form.description, "D");
        assert_eq!(form.body, "B");
    }
}
