use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
	adapters::repositories::Repository,
	database::DatabaseExecutor,
	domain::{
		feed::{FeedPage, FeedScope, PageNumber, FEED_PAGE_SIZE},
		micropost::{
			can_delete,
			commands::{CreateMicropost, DeleteMicropost},
			entity::{Micropost, MicropostContent},
		},
		user::{
			commands::{CreateUser, FollowUser, SignIn, UnfollowUser},
			entity::{Session, User},
			normalize_email, password, NewUser,
		},
	},
};

use super::response::ServiceError;

pub type Executor = Arc<Mutex<DatabaseExecutor>>;

pub struct MicropostHandler;
impl MicropostHandler {
	pub async fn create(
		cmd: CreateMicropost,
		author: &User,
		executor: Executor,
	) -> Result<Micropost, ServiceError> {
		let content = MicropostContent::parse(&cmd.content)?;

		executor.lock().await.begin().await?;
		let micropost = Repository::<Micropost>::new(executor.clone()).add(author.id, &content).await?;
		executor.lock().await.commit().await?;

		tracing::info!(micropost_id = micropost.id, user_id = author.id, "Micropost created");
		Ok(micropost)
	}

	pub async fn delete(
		cmd: DeleteMicropost,
		viewer: &User,
		executor: Executor,
	) -> Result<(), ServiceError> {
		executor.lock().await.begin().await?;
		let repo = Repository::<Micropost>::new(executor.clone());

		let micropost = repo.get(cmd.id).await?.ok_or(ServiceError::EntityNotFound)?;
		if !can_delete(Some(viewer), &micropost) {
			executor.lock().await.rollback().await?;
			tracing::warn!(micropost_id = micropost.id, user_id = viewer.id, "Refused to delete a micropost owned by someone else");
			return Err(ServiceError::Forbidden);
		}
		repo.delete(micropost.id).await?;
		executor.lock().await.commit().await?;

		tracing::info!(micropost_id = micropost.id, user_id = viewer.id, "Micropost deleted");
		Ok(())
	}
}

pub struct FeedHandler;
impl FeedHandler {
	pub async fn load(
		scope: FeedScope,
		page: PageNumber,
		executor: Executor,
	) -> Result<FeedPage, ServiceError> {
		executor.lock().await.begin().await?;
		let feed = Self::load_in_transaction(&Repository::<Micropost>::new(executor.clone()), scope, page).await?;
		executor.lock().await.commit().await?;
		Ok(feed)
	}

	async fn load_in_transaction(
		repo: &Repository<Micropost>,
		scope: FeedScope,
		page: PageNumber,
	) -> Result<FeedPage, ServiceError> {
		let total = repo.count(scope).await?;
		let items = repo.page(scope, page, FEED_PAGE_SIZE).await?;
		Ok(FeedPage {
			scope,
			page,
			page_size: FEED_PAGE_SIZE,
			total,
			items,
		})
	}
}

/// Everything the profile page shows about one user.
#[derive(Debug)]
pub struct Profile {
	pub user: User,
	pub following_count: i64,
	pub followers_count: i64,
	/// `None` when there is no signed-in viewer or the viewer is the user.
	pub viewer_follows: Option<bool>,
	pub feed: FeedPage,
}

pub struct UserHandler;
impl UserHandler {
	pub async fn sign_up(
		cmd: CreateUser,
		executor: Executor,
	) -> Result<(User, Session), ServiceError> {
		let new_user = NewUser::parse(cmd)?;

		executor.lock().await.begin().await?;
		let user = Repository::<User>::new(executor.clone()).add(&new_user).await?;
		let session = Repository::<Session>::new(executor.clone()).add(user.id).await?;
		executor.lock().await.commit().await?;

		tracing::info!(user_id = user.id, "User signed up");
		Ok((user, session))
	}

	pub async fn profile(
		user_id: i64,
		viewer: Option<&User>,
		page: PageNumber,
		executor: Executor,
	) -> Result<Profile, ServiceError> {
		executor.lock().await.begin().await?;
		let users = Repository::<User>::new(executor.clone());

		let user = users.get(user_id).await?.ok_or(ServiceError::EntityNotFound)?;
		let following_count = users.following_count(user.id).await?;
		let followers_count = users.followers_count(user.id).await?;
		let viewer_follows = match viewer {
			Some(viewer) if viewer.id != user.id => Some(users.is_following(viewer.id, user.id).await?),
			_ => None,
		};
		let feed = FeedHandler::load_in_transaction(&Repository::<Micropost>::new(executor.clone()), FeedScope::User(user.id), page).await?;
		executor.lock().await.commit().await?;

		Ok(Profile {
			user,
			following_count,
			followers_count,
			viewer_follows,
			feed,
		})
	}
}

pub struct SessionHandler;
impl SessionHandler {
	pub async fn sign_in(
		cmd: SignIn,
		executor: Executor,
	) -> Result<(User, Session), ServiceError> {
		executor.lock().await.begin().await?;
		let users = Repository::<User>::new(executor.clone());
		let user = users.find_by_email(&normalize_email(&cmd.email)).await?;
		let authenticated = match &user {
			Some(user) => password::verify(&cmd.password, &users.password_digest(user.id).await?)?,
			None => false,
		};
		let user = match user {
			Some(user) if authenticated => user,
			_ => {
				executor.lock().await.rollback().await?;
				tracing::warn!("Rejected sign-in attempt");
				return Err(ServiceError::validation("Invalid email/password combination"));
			}
		};
		let session = Repository::<Session>::new(executor.clone()).add(user.id).await?;
		executor.lock().await.commit().await?;

		tracing::info!(user_id = user.id, "User signed in");
		Ok((user, session))
	}

	pub async fn sign_out(
		token: &str,
		executor: Executor,
	) -> Result<(), ServiceError> {
		executor.lock().await.begin().await?;
		Repository::<Session>::new(executor.clone()).delete(token).await?;
		executor.lock().await.commit().await
	}

	pub async fn current_user(
		token: &str,
		executor: Executor,
	) -> Result<Option<User>, ServiceError> {
		executor.lock().await.begin().await?;
		let user = Repository::<Session>::new(executor.clone()).find_user(token).await?;
		executor.lock().await.commit().await?;
		Ok(user)
	}
}

pub struct RelationshipHandler;
impl RelationshipHandler {
	pub async fn follow(
		cmd: FollowUser,
		follower: &User,
		executor: Executor,
	) -> Result<User, ServiceError> {
		if cmd.followed_id == follower.id {
			return Err(ServiceError::BadRequest);
		}

		executor.lock().await.begin().await?;
		let users = Repository::<User>::new(executor.clone());
		let followed = users.get(cmd.followed_id).await?.ok_or(ServiceError::EntityNotFound)?;
		users.follow(follower.id, followed.id).await?;
		executor.lock().await.commit().await?;

		tracing::info!(follower_id = follower.id, followed_id = followed.id, "User followed");
		Ok(followed)
	}

	pub async fn unfollow(
		cmd: UnfollowUser,
		follower: &User,
		executor: Executor,
	) -> Result<User, ServiceError> {
		executor.lock().await.begin().await?;
		let users = Repository::<User>::new(executor.clone());
		let followed = users.get(cmd.followed_id).await?.ok_or(ServiceError::EntityNotFound)?;
		users.unfollow(follower.id, followed.id).await?;
		executor.lock().await.commit().await?;

		tracing::info!(follower_id = follower.id, followed_id = followed.id, "User unfollowed");
		Ok(followed)
	}
}

#[cfg(test)]
mod test {
	use crate::{
		domain::{
			feed::{FeedScope, PageNumber},
			micropost::commands::{CreateMicropost, DeleteMicropost},
			user::commands::{CreateUser, FollowUser, SignIn, UnfollowUser},
		},
		services::{
			handlers::{FeedHandler, MicropostHandler, RelationshipHandler, SessionHandler, UserHandler},
			response::ServiceError,
		},
		test_support::{executor, new_executor, pool, sign_up, TEST_PASSWORD},
	};

	#[tokio::test]
	async fn test_blank_micropost_does_not_change_count() {
		'_given: {
			let pool = pool().await;
			let user = sign_up(&pool, "Author").await;

			'_when: {
				let result = MicropostHandler::create(CreateMicropost { content: "  ".into() }, &user, new_executor(&pool)).await;

				'_then: {
					assert!(matches!(result, Err(ServiceError::ValidationError(_))));
					let feed = FeedHandler::load(FeedScope::Global, PageNumber::FIRST, new_executor(&pool)).await.unwrap();
					assert_eq!(feed.total, 0);
				}
			}
		}
	}

	#[tokio::test]
	async fn test_create_then_delete_by_owner() {
		let pool = pool().await;
		let user = sign_up(&pool, "Author").await;

		let micropost = MicropostHandler::create(CreateMicropost { content: "Lorem ipsum".into() }, &user, new_executor(&pool))
			.await
			.unwrap();
		let feed = FeedHandler::load(FeedScope::Global, PageNumber::FIRST, new_executor(&pool)).await.unwrap();
		assert_eq!(feed.total, 1);
		assert_eq!(feed.items[0].id, micropost.id);

		MicropostHandler::delete(DeleteMicropost { id: micropost.id }, &user, new_executor(&pool)).await.unwrap();
		let feed = FeedHandler::load(FeedScope::Global, PageNumber::FIRST, new_executor(&pool)).await.unwrap();
		assert_eq!(feed.total, 0);
	}

	#[tokio::test]
	async fn test_delete_by_non_owner_is_forbidden() {
		let pool = pool().await;
		let user = sign_up(&pool, "Author").await;
		let other_user = sign_up(&pool, "Intruder").await;
		let micropost = MicropostHandler::create(CreateMicropost { content: "Mine".into() }, &user, new_executor(&pool))
			.await
			.unwrap();

		let result = MicropostHandler::delete(DeleteMicropost { id: micropost.id }, &other_user, new_executor(&pool)).await;
		assert!(matches!(result, Err(ServiceError::Forbidden)));

		let result = MicropostHandler::delete(DeleteMicropost { id: micropost.id + 100 }, &user, new_executor(&pool)).await;
		assert!(matches!(result, Err(ServiceError::EntityNotFound)));

		let feed = FeedHandler::load(FeedScope::User(user.id), PageNumber::FIRST, new_executor(&pool)).await.unwrap();
		assert_eq!(feed.total, 1);
	}

	#[tokio::test]
	async fn test_sign_in_and_out() {
		let pool = pool().await;
		let user = sign_up(&pool, "Returning").await;

		for (email, password) in [("nobody@example.com", TEST_PASSWORD), (user.email.as_str(), "wrong-password"), (user.email.as_str(), "")] {
			let cmd = SignIn {
				email: email.into(),
				password: password.into(),
			};
			let result = SessionHandler::sign_in(cmd, new_executor(&pool)).await;
			assert!(matches!(result, Err(ServiceError::ValidationError(_))), "{email} / {password}");
		}

		let cmd = SignIn {
			email: user.email.to_uppercase(),
			password: TEST_PASSWORD.into(),
		};
		let (signed_in, session) = SessionHandler::sign_in(cmd, new_executor(&pool)).await.unwrap();
		assert_eq!(signed_in, user);
		assert_eq!(SessionHandler::current_user(&session.token, new_executor(&pool)).await.unwrap(), Some(user));

		SessionHandler::sign_out(&session.token, new_executor(&pool)).await.unwrap();
		assert_eq!(SessionHandler::current_user(&session.token, new_executor(&pool)).await.unwrap(), None);
	}

	#[tokio::test]
	async fn test_sign_up_rejects_invalid_input_without_creating_a_user() {
		let pool = pool().await;
		let cmd = CreateUser {
			name: "".into(),
			email: "user_at_foo.org".into(),
			password: "foobar".into(),
		};
		let Err(ServiceError::ValidationError(errors)) = UserHandler::sign_up(cmd, new_executor(&pool)).await else {
			panic!("Expected validation errors");
		};
		assert_eq!(errors.len(), 2);

		let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users").fetch_one(&pool).await.unwrap();
		assert_eq!(count, 0);
	}

	#[tokio::test]
	async fn test_signed_up_user_signs_in_with_the_chosen_password() {
		let pool = pool().await;
		let cmd = CreateUser {
			name: "Example User".into(),
			email: "User@Example.com".into(),
			password: "s3cret-pass".into(),
		};
		let (user, _session) = UserHandler::sign_up(cmd, new_executor(&pool)).await.unwrap();

		let stored: String = sqlx::query_scalar("SELECT password_digest FROM users WHERE id = ?")
			.bind(user.id)
			.fetch_one(&pool)
			.await
			.unwrap();
		assert!(!stored.contains("s3cret-pass"));

		let cmd = SignIn {
			email: "user@example.com".into(),
			password: "s3cret-pass".into(),
		};
		let (signed_in, _session) = SessionHandler::sign_in(cmd, new_executor(&pool)).await.unwrap();
		assert_eq!(signed_in, user);
	}

	#[tokio::test]
	async fn test_profile_reports_relationship() {
		let pool = pool().await;
		let user = sign_up(&pool, "Followed").await;
		let other_user = sign_up(&pool, "Follower").await;

		assert!(matches!(
			RelationshipHandler::follow(FollowUser { followed_id: other_user.id }, &other_user, new_executor(&pool)).await,
			Err(ServiceError::BadRequest)
		));
		RelationshipHandler::follow(FollowUser { followed_id: user.id }, &other_user, new_executor(&pool))
			.await
			.unwrap();

		let profile = UserHandler::profile(user.id, Some(&other_user), PageNumber::FIRST, new_executor(&pool)).await.unwrap();
		assert_eq!(profile.followers_count, 1);
		assert_eq!(profile.following_count, 0);
		assert_eq!(profile.viewer_follows, Some(true));

		let own = UserHandler::profile(user.id, Some(&user), PageNumber::FIRST, new_executor(&pool)).await.unwrap();
		assert_eq!(own.viewer_follows, None);

		RelationshipHandler::unfollow(UnfollowUser { followed_id: user.id }, &other_user, new_executor(&pool))
			.await
			.unwrap();
		let profile = UserHandler::profile(user.id, Some(&other_user), PageNumber::FIRST, new_executor(&pool)).await.unwrap();
		assert_eq!(profile.viewer_follows, Some(false));
	}

	#[tokio::test]
	async fn test_profile_of_unknown_user() {
		let executor = executor().await;
		let result = UserHandler::profile(42, None, PageNumber::FIRST, executor).await;
		assert!(matches!(result, Err(ServiceError::EntityNotFound)));
	}
}
