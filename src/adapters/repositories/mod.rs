pub(crate) mod micropost_repository;
pub(crate) mod session_repository;
pub(crate) mod user_repository;
use std::{marker::PhantomData, sync::Arc};

use tokio::sync::Mutex;

use crate::database::DatabaseExecutor;

/// Data access for one entity type. Queries run inside the executor's open
/// transaction, so callers `begin` before and `commit` after.
pub struct Repository<A> {
	pub executor: Arc<Mutex<DatabaseExecutor>>,
	pub _phantom: PhantomData<A>,
}

impl<A> Repository<A> {
	pub fn new(executor: Arc<Mutex<DatabaseExecutor>>) -> Self {
		Self {
			executor,
			_phantom: Default::default(),
		}
	}
}
