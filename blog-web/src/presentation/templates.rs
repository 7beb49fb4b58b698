use crate::domain::{Page, Post};
use crate::presentation::flash::Flash;
use crate::presentation::forms::{PostForm, PostFormErrors};
use minijinja::{context, default_auto_escape_callback, Environment, Value};
use serde::Serialize;

/// Wraps a minijinja environment over the embedded blog templates.
/// Auto-escaping is on for every .html template.
pub struct TemplateEngine {
    env: Environment<'static>,
}

#[derive(Serialize)]
struct PostContext {
    id: i64,
    title: String,
    description: String,
    content: String,
    author_id: i64,
    created_at: String,
}

impl From<&Post> for PostContext {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            description: post.description.clone(),
            content: post.content.clone(),
            author_id: post.author_id,
            created_at: post.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Serialize)]
struct PaginationContext {
    page: u32,
    per_page: u32,
    total_pages: u32,
    total_items: i64,
    has_prev: bool,
    has_next: bool,
}

impl From<&Page<Post>> for PaginationContext {
    fn from(page: &Page<Post>) -> Self {
        Self {
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            has_prev: page.has_prev,
            has_next: page.has_next,
        }
    }
}

fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let content = match name {
        "blog/index.html" => Some(include_str!("templates/index.html")),
        "blog/add.html" => Some(include_str!("templates/add.html")),
        "blog/error.html" => Some(include_str!("templates/error.html")),
        _ => None,
    };

    Ok(content.map(|s| s.to_string()))
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        env.set_loader(embedded_template_loader);
        Self { env }
    }

    fn render(&self, template_name: &str, ctx: Value) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(ctx)
    }

    /// The listing template doubles as the single-post page: it gets a
    /// one-element post list and no pagination block.
    pub fn render_listing(
        &self,
        title: &str,
        posts: &[Post],
        pagination: Option<&Page<Post>>,
        flash: Option<&Flash>,
    ) -> Result<String, minijinja::Error> {
        let posts: Vec<PostContext> = posts.iter().map(PostContext::from).collect();
        let pagination = pagination.map(PaginationContext::from);

        self.render(
            "blog/index.html",
            context! {
                title => title,
                posts => Value::from_serialize(&posts),
                pagination => Value::from_serialize(&pagination),
                flash => Value::from_serialize(&flash),
            },
        )
    }

    pub fn render_post_form(
        &self,
        title: &str,
        form: &PostForm,
        errors: &PostFormErrors,
    ) -> Result<String, minijinja::Error> {
        self.render(
            "blog/add.html",
            context! {
                title => title,
                form => Value::from_serialize(form),
                errors => Value::from_serialize(errors),
            },
        )
    }

    pub fn render_error_page(
        &self,
        status: u16,
        reason: &str,
        message: &str,
    ) -> Result<String, minijinja::Error> {
        self.render(
            "blog/error.html",
            context! {
                title => reason,
                status => status,
                message => message,
            },
        )
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
