use chrono::{DateTime, Utc};

use crate::domain::{
	feed::{FeedItem, FeedPage},
	micropost::can_delete,
	user::entity::User,
};

use super::{escape, time_ago_in_words};

pub fn caption(feed: &FeedPage) -> String {
	format!(r#"<span class="count">{}</span>"#, feed.caption())
}

pub fn render(
	feed: &FeedPage,
	viewer: Option<&User>,
	now: DateTime<Utc>,
) -> String {
	let items: String = feed.items.iter().map(|item| render_item(item, viewer, now)).collect();
	format!(r#"<ol class="microposts">{items}</ol>{}"#, pagination(feed))
}

fn render_item(
	item: &FeedItem,
	viewer: Option<&User>,
	now: DateTime<Utc>,
) -> String {
	// The control is left out entirely for anyone but the author.
	let delete_link = if can_delete(viewer, item) {
		format!(
			r#" <a href="/microposts/{id}" data-method="delete" data-confirm="You sure?" title="{title}">delete</a>"#,
			id = item.id,
			title = escape(&item.content),
		)
	} else {
		String::new()
	};

	format!(
		r#"<li id="{id}"><span class="user"><a href="/users/{user_id}">{user_name}</a></span><span class="content">{content}</span><span class="timestamp">Posted {ago} ago.</span>{delete_link}</li>"#,
		id = item.id,
		user_id = item.user_id,
		user_name = escape(&item.user_name),
		content = escape(&item.content),
		ago = time_ago_in_words(item.created_at, now),
	)
}

fn pagination(feed: &FeedPage) -> String {
	let previous = feed.previous_path();
	let next = feed.next_path();
	if previous.is_none() && next.is_none() {
		return String::new();
	}

	let previous = previous
		.map(|path| format!(r#"<a class="previous_page" rel="prev" href="{path}">Previous</a> "#))
		.unwrap_or_default();
	let next = next.map(|path| format!(r#" <a class="next_page" rel="next" href="{path}">Next</a>"#)).unwrap_or_default();
	format!(
		r#"<div class="pagination">{previous}<em class="current">Page {} of {}</em>{next}</div>"#,
		feed.page.get(),
		feed.total_pages()
	)
}
