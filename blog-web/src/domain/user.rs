use serde::{Deserialize, Serialize};

use crate::domain::Post;

/// A named capability granted to a user by the external user subsystem.
/// The bit values mirror that subsystem's permission flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission(pub u32);

impl Permission {
    pub const FOLLOW: Permission = Permission(0x01);
    pub const COMMENT: Permission = Permission(0x02);
    pub const WRITE_POSTS: Permission = Permission(0x04);
    pub const MODERATE_COMMENTS: Permission = Permission(0x08);
    pub const ADMINISTER: Permission = Permission(0x80);
}

/// The authenticated caller, decoded from the bearer token by the
/// auth middleware and stored in request extensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub permissions: u32,
}

impl CurrentUser {
    pub fn can(&self, permission: Permission) -> bool {
        self.permissions & permission.0 == permission.0 || self.is_admin()
    }

    pub fn is_admin(&self) -> bool {
        self.permissions & Permission::ADMINISTER.0 == Permission::ADMINISTER.0
    }

    /// Authors may modify their own posts; administrators may modify any.
    pub fn can_modify(&self, post: &Post) -> bool {
        self.is_admin() || post.author_id == self.id
    }
}
