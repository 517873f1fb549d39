pub mod commands;
pub mod entity;

use crate::domain::{feed::FeedItem, user::entity::User};

use self::entity::Micropost;

/// Anything attributed to a single user.
pub trait Owned {
	fn owner_id(&self) -> i64;
}

impl Owned for Micropost {
	fn owner_id(&self) -> i64 {
		self.user_id
	}
}

impl Owned for FeedItem {
	fn owner_id(&self) -> i64 {
		self.user_id
	}
}

/// Only the author may delete a micropost. Checked both when rendering the
/// delete link and when handling the delete request.
pub fn can_delete(
	viewer: Option<&User>,
	post: &impl Owned,
) -> bool {
	viewer.map_or(false, |viewer| viewer.id == post.owner_id())
}
