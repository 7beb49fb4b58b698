use crate::presentation::http_handlers as handlers;
use crate::presentation::middleware::AuthMiddlewareFactory;
use actix_web::web;

/// The blog route table, mounted at /blog. Literal segments are
/// registered before the {pid} captures so /new and /tag/ win.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/blog")
            .wrap(AuthMiddlewareFactory)
            .route("", web::get().to(handlers::index))
            .route("/", web::get().to(handlers::index))
            .route("/page/{page}", web::get().to(handlers::index_page))
            .service(
                web::resource("/new")
                    .route(web::get().to(handlers::add_form))
                    .route(web::post().to(handlers::add_submit)),
            )
            .service(
                web::resource("/tag/")
                    .route(web::get().to(handlers::search_tags))
                    .route(web::post().to(handlers::add_tags)),
            )
            .service(
                web::resource("/{pid}/edit")
                    .route(web::get().to(handlers::edit_form))
                    .route(web::post().to(handlers::edit_submit)),
            )
            .route("/{pid}/{slug}", web::get().to(handlers::get_post_with_slug))
            .service(
                web::resource("/{pid}")
                    .route(web::get().to(handlers::get_post))
                    .route(web::post().to(handlers::delete_post))
                    .route(web::delete().to(handlers::delete_post)),
            ),
    );
}
