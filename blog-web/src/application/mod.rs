pub mod blog_service;
pub mod tag_service;

pub use blog_service::BlogService;
pub use tag_service::TagService;
