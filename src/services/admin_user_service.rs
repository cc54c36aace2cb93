use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::User,
    repository::AdminUserStorage,
    routes::params::{ListParams, UserSortBy},
};

/// User management for administrators.
pub struct AdminUserService {
    repo: Arc<dyn AdminUserStorage>,
}

impl AdminUserService {
    pub fn new(repo: Arc<dyn AdminUserStorage>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        caller: &AuthUser,
        params: &ListParams<UserSortBy>,
    ) -> AppResult<Vec<User>> {
        ensure_admin(caller)?;
        self.repo.list(params).await
    }

    pub async fn delete(&self, caller: &AuthUser, uuid: Uuid) -> AppResult<Uuid> {
        ensure_admin(caller)?;
        if !self.repo.delete(uuid).await? {
            return Err(AppError::not_found(format!("user {uuid} not found")));
        }
        tracing::info!(admin = %caller.user_uuid, user = %uuid, "user deleted");
        Ok(uuid)
    }
}
