use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::services::response::ServiceError;

pub const FEED_PAGE_SIZE: u32 = 30;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FeedScope {
	Global,
	User(i64),
}

impl FeedScope {
	pub fn path(
		&self,
		page: PageNumber,
	) -> String {
		match self {
			FeedScope::Global => format!("/?page={}", page.get()),
			FeedScope::User(user_id) => format!("/users/{}?page={}", user_id, page.get()),
		}
	}
}

/// 1-based page index.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct PageNumber(u32);

impl PageNumber {
	pub const FIRST: PageNumber = PageNumber(1);

	pub fn new(value: u32) -> Result<Self, ServiceError> {
		if value == 0 {
			return Err(ServiceError::BadRequest);
		}
		Ok(Self(value))
	}

	/// A missing `page` query parameter means the first page.
	pub fn from_query(value: Option<u32>) -> Result<Self, ServiceError> {
		value.map_or(Ok(Self::FIRST), Self::new)
	}

	pub fn get(&self) -> u32 {
		self.0
	}

	pub fn offset(
		&self,
		page_size: u32,
	) -> i64 {
		(self.0 as i64 - 1) * page_size as i64
	}

	pub fn next(&self) -> PageNumber {
		PageNumber(self.0.saturating_add(1))
	}

	pub fn previous(&self) -> Option<PageNumber> {
		(self.0 > 1).then(|| PageNumber(self.0 - 1))
	}
}

/// A micropost joined with the name of its author.
#[derive(Clone, PartialEq, Eq, Debug, FromRow)]
pub struct FeedItem {
	pub id: i64,
	pub user_id: i64,
	pub user_name: String,
	pub content: String,
	pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct FeedPage {
	pub scope: FeedScope,
	pub page: PageNumber,
	pub page_size: u32,
	pub total: i64,
	pub items: Vec<FeedItem>,
}

impl FeedPage {
	pub fn has_next(&self) -> bool {
		(self.page.get() as i64) * (self.page_size as i64) < self.total
	}

	pub fn next_path(&self) -> Option<String> {
		self.has_next().then(|| self.scope.path(self.page.next()))
	}

	pub fn previous_path(&self) -> Option<String> {
		self.page.previous().map(|page| self.scope.path(page))
	}

	pub fn total_pages(&self) -> u32 {
		let page_size = self.page_size.max(1) as i64;
		((self.total + page_size - 1) / page_size).max(1) as u32
	}

	pub fn caption(&self) -> String {
		pluralize(self.total, "micropost")
	}
}

pub fn pluralize(
	count: i64,
	singular: &str,
) -> String {
	if count == 1 {
		format!("{count} {singular}")
	} else {
		format!("{count} {singular}s")
	}
}
