use actix_web::cookie::Cookie;
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;

const FLASH_COOKIE: &str = "blog_flash";

/// A one-time notification carried to the next rendered page in a
/// cookie: set alongside a redirect, drained by the following render.
#[derive(Debug, Clone, Serialize)]
pub struct Flash {
    pub message: String,
    pub category: String,
}

pub fn flash_cookie(message: &str, category: &str) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, format!("{}:{}", category, message))
        .path("/blog")
        .http_only(true)
        .finish()
}

pub fn take_flash(req: &HttpRequest) -> Option<Flash> {
    let cookie = req.cookie(FLASH_COOKIE)?;
    let (category, message) = cookie.value().split_once(':')?;
    Some(Flash {
        message: message.to_string(),
        category: category.to_string(),
    })
}

/// Expires the flash cookie so the message shows only once.
pub fn clear_flash(response: &mut HttpResponse) {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/blog").finish();
    cookie.make_removal();
    if let Err(e) = response.add_cookie(&cookie) {
        tracing::error!("Failed to clear flash cookie: {}", e);
    }
}
