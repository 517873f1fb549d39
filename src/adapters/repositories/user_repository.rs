use chrono::Utc;

use crate::{
	domain::user::{
		entity::{Relationship, User},
		NewUser,
	},
	services::response::ServiceError,
};

use super::Repository;

impl Repository<User> {
	pub async fn add(
		&self,
		new_user: &NewUser,
	) -> Result<User, ServiceError> {
		let mut executor = self.executor.lock().await;
		sqlx::query_as::<_, User>("INSERT INTO users (name, email, password_digest, created_at) VALUES (?, ?, ?, ?) RETURNING id, name, email, created_at")
			.bind(&new_user.name)
			.bind(&new_user.email)
			.bind(&new_user.password_digest)
			.bind(Utc::now())
			.fetch_one(&mut **executor.transaction()?)
			.await
			.map_err(|err| match err {
				sqlx::Error::Database(db_err) if db_err.is_unique_violation() => ServiceError::validation("Email has already been taken"),
				err => err.into(),
			})
	}

	pub async fn get(
		&self,
		id: i64,
	) -> Result<Option<User>, ServiceError> {
		let mut executor = self.executor.lock().await;
		let user = sqlx::query_as::<_, User>("SELECT id, name, email, created_at FROM users WHERE id = ?")
			.bind(id)
			.fetch_optional(&mut **executor.transaction()?)
			.await?;
		Ok(user)
	}

	pub async fn find_by_email(
		&self,
		email: &str,
	) -> Result<Option<User>, ServiceError> {
		let mut executor = self.executor.lock().await;
		let user = sqlx::query_as::<_, User>("SELECT id, name, email, created_at FROM users WHERE email = ?")
			.bind(email)
			.fetch_optional(&mut **executor.transaction()?)
			.await?;
		Ok(user)
	}

	pub async fn password_digest(
		&self,
		id: i64,
	) -> Result<String, ServiceError> {
		let mut executor = self.executor.lock().await;
		let digest = sqlx::query_scalar::<_, String>("SELECT password_digest FROM users WHERE id = ?")
			.bind(id)
			.fetch_one(&mut **executor.transaction()?)
			.await?;
		Ok(digest)
	}

	/// Following twice keeps the original relationship.
	pub async fn follow(
		&self,
		follower_id: i64,
		followed_id: i64,
	) -> Result<Relationship, ServiceError> {
		let mut executor = self.executor.lock().await;
		let trx = executor.transaction()?;
		sqlx::query("INSERT OR IGNORE INTO relationships (follower_id, followed_id, created_at) VALUES (?, ?, ?)")
			.bind(follower_id)
			.bind(followed_id)
			.bind(Utc::now())
			.execute(&mut **trx)
			.await?;
		let relationship = sqlx::query_as::<_, Relationship>(
			"SELECT follower_id, followed_id, created_at FROM relationships WHERE follower_id = ? AND followed_id = ?",
		)
		.bind(follower_id)
		.bind(followed_id)
		.fetch_one(&mut **trx)
		.await?;
		Ok(relationship)
	}

	pub async fn unfollow(
		&self,
		follower_id: i64,
		followed_id: i64,
	) -> Result<bool, ServiceError> {
		let mut executor = self.executor.lock().await;
		let result = sqlx::query("DELETE FROM relationships WHERE follower_id = ? AND followed_id = ?")
			.bind(follower_id)
			.bind(followed_id)
			.execute(&mut **executor.transaction()?)
			.await?;
		Ok(result.rows_affected() > 0)
	}

	pub async fn is_following(
		&self,
		follower_id: i64,
		followed_id: i64,
	) -> Result<bool, ServiceError> {
		let mut executor = self.executor.lock().await;
		let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM relationships WHERE follower_id = ? AND followed_id = ?")
			.bind(follower_id)
			.bind(followed_id)
			.fetch_one(&mut **executor.transaction()?)
			.await?;
		Ok(found > 0)
	}

	pub async fn following_count(
		&self,
		user_id: i64,
	) -> Result<i64, ServiceError> {
		let mut executor = self.executor.lock().await;
		let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM relationships WHERE follower_id = ?")
			.bind(user_id)
			.fetch_one(&mut **executor.transaction()?)
			.await?;
		Ok(count)
	}

	pub async fn followers_count(
		&self,
		user_id: i64,
	) -> Result<i64, ServiceError> {
		let mut executor = self.executor.lock().await;
		let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM relationships WHERE followed_id = ?")
			.bind(user_id)
			.fetch_one(&mut **executor.transaction()?)
			.await?;
		Ok(count)
	}
}

#[cfg(test)]
mod test {
	use crate::{
		adapters::repositories::Repository,
		domain::user::{entity::User, NewUser},
		services::response::ServiceError,
		test_support::{executor, insert_user},
	};

	#[tokio::test]
	async fn test_duplicate_email_is_a_validation_error() {
		let executor = executor().await;
		executor.lock().await.begin().await.unwrap();
		let repo = Repository::<User>::new(executor.clone());
		let new_user = NewUser {
			name: "Example User".into(),
			email: "user@example.com".into(),
			password_digest: "digest".into(),
		};

		let user = repo.add(&new_user).await.unwrap();
		assert_eq!(repo.find_by_email("user@example.com").await.unwrap(), Some(user.clone()));
		assert_eq!(repo.get(user.id).await.unwrap(), Some(user.clone()));
		assert_eq!(repo.password_digest(user.id).await.unwrap(), "digest");

		match repo.add(&new_user).await {
			Err(ServiceError::ValidationError(messages)) => assert_eq!(messages, vec!["Email has already been taken".to_string()]),
			other => panic!("Expected validation error, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn test_follow_and_unfollow() {
		'_given: {
			let executor = executor().await;
			executor.lock().await.begin().await.unwrap();
			let user = insert_user(executor.clone(), "Followed").await;
			let other_user = insert_user(executor.clone(), "Follower").await;
			let repo = Repository::<User>::new(executor.clone());

			'_when: {
				let relationship = repo.follow(other_user.id, user.id).await.unwrap();
				assert_eq!(repo.follow(other_user.id, user.id).await.unwrap(), relationship);
				assert_eq!((relationship.follower_id, relationship.followed_id), (other_user.id, user.id));

				'_then: {
					assert!(repo.is_following(other_user.id, user.id).await.unwrap());
					assert!(!repo.is_following(user.id, other_user.id).await.unwrap());
					assert_eq!(repo.followers_count(user.id).await.unwrap(), 1);
					assert_eq!(repo.following_count(other_user.id).await.unwrap(), 1);
					assert_eq!(repo.following_count(user.id).await.unwrap(), 0);

					assert!(repo.unfollow(other_user.id, user.id).await.unwrap());
					assert!(!repo.unfollow(other_user.id, user.id).await.unwrap());
					assert_eq!(repo.followers_count(user.id).await.unwrap(), 0);
				}
			}
		}
	}
}
