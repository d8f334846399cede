pub use self::errors::{Result, ValidationError, ViolationKind};
pub use self::models::posts::{Attachment, Post, PostStatus};
pub use self::models::users::User;
pub use self::validate::{validate_post, validate_posts, validate_user, validate_users};

mod errors;
pub mod models;
mod validate;
