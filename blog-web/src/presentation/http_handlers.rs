use crate::application::{BlogService, TagService};
use crate::domain::{BlogError, CurrentUser, Permission};
use crate::presentation::flash;
use crate::presentation::forms::{PostForm, PostFormErrors};
use crate::presentation::middleware::{require_login, require_permission};
use crate::presentation::templates::TemplateEngine;
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct TagQuery {
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
pub struct TagListForm {
    #[serde(default)]
    pub name: String,
}

fn render_html(result: Result<String, minijinja::Error>) -> HttpResponse {
    match result {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Internal server error")
        }
    }
}

// Error rendering for the HTML routes. Storage failures are logged and
// shown as a generic message.
fn error_page(templates: &TemplateEngine, err: BlogError) -> HttpResponse {
    let status = err.to_status_code();
    let reason = match status {
        404 => "Not Found",
        403 => "Forbidden",
        401 => "Unauthorized",
        400 => "Bad Request",
        _ => "Internal Server Error",
    };
    let message = match &err {
        BlogError::Database(_) | BlogError::Internal(_) => {
            tracing::error!("{}", err);
            "Something went wrong.".to_string()
        }
        other => other.to_string(),
    };

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match templates.render_error_page(status.as_u16(), reason, &message) {
        Ok(html) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            HttpResponse::build(status)
                .content_type("text/plain; charset=utf-8")
                .body(message)
        }
    }
}

// The tag endpoint answers in the {type, message} JSON shape.
fn error_json(err: BlogError) -> HttpResponse {
    let status =
        StatusCode::from_u16(err.to_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = match err {
        BlogError::Validation(msg) => msg,
        BlogError::Database(_) | BlogError::Internal(_) => {
            tracing::error!("{}", err);
            "Something went wrong.".to_string()
        }
        other => other.to_string(),
    };

    HttpResponse::build(status).json(serde_json::json!({
        "type": "error",
        "message": message,
    }))
}

fn see_other(location: &str, message: &str, category: &str) -> HttpResponse {
    let mut response = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish();
    if let Err(e) = response.add_cookie(&flash::flash_cookie(message, category)) {
        tracing::error!("Failed to set flash cookie: {}", e);
    }
    response
}

/// Login plus the WRITE_POSTS capability, checked before any handler
/// body runs on the create/edit routes.
fn write_gate(req: &HttpRequest) -> Result<CurrentUser, BlogError> {
    let user = require_login(req)?;
    require_permission(&user, Permission::WRITE_POSTS)?;
    Ok(user)
}

// ============== Listing ==============

async fn listing_response(
    req: &HttpRequest,
    blog_service: &BlogService,
    templates: &TemplateEngine,
    page_number: u32,
) -> HttpResponse {
    match blog_service.list_page(page_number).await {
        Ok(page) => {
            let title = if page_number < 2 {
                "Posts".to_string()
            } else {
                format!("Posts - Page {}", page_number)
            };
            let pending_flash = flash::take_flash(req);
            let mut response = render_html(templates.render_listing(
                &title,
                &page.items,
                Some(&page),
                pending_flash.as_ref(),
            ));
            if pending_flash.is_some() {
                flash::clear_flash(&mut response);
            }
            response
        }
        Err(err) => error_page(templates, err),
    }
}

pub async fn index(
    req: HttpRequest,
    blog_service: web::Data<Arc<BlogService>>,
    templates: web::Data<Arc<TemplateEngine>>,
) -> HttpResponse {
    listing_response(&req, &blog_service, &templates, 1).await
}

pub async fn index_page(
    req: HttpRequest,
    blog_service: web::Data<Arc<BlogService>>,
    templates: web::Data<Arc<TemplateEngine>>,
    path: web::Path<u32>,
) -> HttpResponse {
    listing_response(&req, &blog_service, &templates, path.into_inner()).await
}

// ============== Single post ==============

async fn single_post_response(
    req: &HttpRequest,
    blog_service: &BlogService,
    templates: &TemplateEngine,
    pid: i64,
) -> HttpResponse {
    match blog_service.get_post(pid).await {
        Ok(post) => {
            let pending_flash = flash::take_flash(req);
            let title = post.title.clone();
            let mut response = render_html(templates.render_listing(
                &title,
                std::slice::from_ref(&post),
                None,
                pending_flash.as_ref(),
            ));
            if pending_flash.is_some() {
                flash::clear_flash(&mut response);
            }
            response
        }
        Err(err) => error_page(templates, err),
    }
}

pub async fn get_post(
    req: HttpRequest,
    blog_service: web::Data<Arc<BlogService>>,
    templates: web::Data<Arc<TemplateEngine>>,
    path: web::Path<i64>,
) -> HttpResponse {
    single_post_response(&req, &blog_service, &templates, path.into_inner()).await
}

pub async fn get_post_with_slug(
    req: HttpRequest,
    blog_service: web::Data<Arc<BlogService>>,
    templates: web::Data<Arc<TemplateEngine>>,
    path: web::Path<(i64, String)>,
) -> HttpResponse {
    // The slug segment is accepted but never compared to the post.
    let (pid, _slug) = path.into_inner();
    single_post_response(&req, &blog_service, &templates, pid).await
}

// ============== Create ==============

pub async fn add_form(
    req: HttpRequest,
    templates: web::Data<Arc<TemplateEngine>>,
) -> HttpResponse {
    if let Err(err) = write_gate(&req) {
        return error_page(&templates, err);
    }

    render_html(templates.render_post_form(
        "Create New Post",
        &PostForm::default(),
        &PostFormErrors::default(),
    ))
}

pub async fn add_submit(
    req: HttpRequest,
    blog_service: web::Data<Arc<BlogService>>,
    templates: web::Data<Arc<TemplateEngine>>,
    form: web::Form<PostForm>,
) -> HttpResponse {
    let user = match write_gate(&req) {
        Ok(user) => user,
        Err(err) => return error_page(&templates, err),
    };

    let form = form.into_inner();
    match form.validate() {
        Ok(input) => match blog_service.create_post(&user, input).await {
            Ok(_) => see_other("/blog/", "Post added", "message"),
            Err(err) => error_page(&templates, err),
        },
        Err(errors) => render_html(templates.render_post_form("Create New Post", &form, &errors)),
    }
}

// ============== Edit ==============

pub async fn edit_form(
    req: HttpRequest,
    blog_service: web::Data<Arc<BlogService>>,
    templates: web::Data<Arc<TemplateEngine>>,
    path: web::Path<i64>,
) -> HttpResponse {
    let user = match write_gate(&req) {
        Ok(user) => user,
        Err(err) => return error_page(&templates, err),
    };

    let post = match blog_service.get_post(path.into_inner()).await {
        Ok(post) => post,
        Err(err) => return error_page(&templates, err),
    };
    if !user.can_modify(&post) {
        return error_page(&templates, BlogError::Forbidden);
    }

    let form = PostForm::from_post(&post);
    render_html(templates.render_post_form(
        &format!("Edit Post - {}", post.title),
        &form,
        &PostFormErrors::default(),
    ))
}

pub async fn edit_submit(
    req: HttpRequest,
    blog_service: web::Data<Arc<BlogService>>,
    templates: web::Data<Arc<TemplateEngine>>,
    path: web::Path<i64>,
    form: web::Form<PostForm>,
) -> HttpResponse {
    let user = match write_gate(&req) {
        Ok(user) => user,
        Err(err) => return error_page(&templates, err),
    };

    // Load before touching the form: a missing post 404s and a foreign
    // post 403s no matter what was submitted.
    let pid = path.into_inner();
    let post = match blog_service.get_post(pid).await {
        Ok(post) => post,
        Err(err) => return error_page(&templates, err),
    };
    if !user.can_modify(&post) {
        return error_page(&templates, BlogError::Forbidden);
    }

    let form = form.into_inner();
    match form.validate_patch() {
        Ok(patch) => match blog_service.update_post(pid, &user, patch).await {
            Ok(updated) => see_other(&format!("/blog/{}", updated.id), "Post updated", "success"),
            Err(err) => error_page(&templates, err),
        },
        Err(errors) => render_html(templates.render_post_form(
            &format!("Edit Post - {}", post.title),
            &form,
            &errors,
        )),
    }
}

// ============== Delete ==============

pub async fn delete_post(
    req: HttpRequest,
    blog_service: web::Data<Arc<BlogService>>,
    templates: web::Data<Arc<TemplateEngine>>,
    path: web::Path<i64>,
) -> HttpResponse {
    let user = match require_login(&req) {
        Ok(user) => user,
        Err(err) => return error_page(&templates, err),
    };

    match blog_service.delete_post(path.into_inner(), &user).await {
        Ok(()) => see_other("/blog/", "Post deleted.", "success"),
        Err(err) => error_page(&templates, err),
    }
}

// ============== Tags ==============

pub async fn search_tags(
    req: HttpRequest,
    tag_service: web::Data<Arc<TagService>>,
    query: web::Query<TagQuery>,
) -> HttpResponse {
    if let Err(err) = require_login(&req) {
        return error_json(err);
    }

    match tag_service.search(&query.name).await {
        Ok(found) => HttpResponse::Ok().json(serde_json::json!({
            "type": "success",
            "message": found,
        })),
        Err(err) => error_json(err),
    }
}

pub async fn add_tags(
    req: HttpRequest,
    tag_service: web::Data<Arc<TagService>>,
    form: web::Form<TagListForm>,
) -> HttpResponse {
    if let Err(err) = require_login(&req) {
        return error_json(err);
    }

    match tag_service.add_tags(&form.name).await {
        Ok(created) => HttpResponse::Ok().json(serde_json::json!({
            "type": "success",
            "message": created,
        })),
        Err(err) => error_json(err),
    }
}
