use std::sync::Arc;

use uuid::Uuid;

use crate::{
    dto::user::UserUpdateRequest,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    repository::UserStorage,
};

pub struct UserService {
    repo: Arc<dyn UserStorage>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserStorage>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, uuid: Uuid) -> AppResult<User> {
        self.repo
            .get(uuid)
            .await?
            .ok_or_else(|| AppError::not_found(format!("user {uuid} not found")))
    }

    /// Only non-empty names are written.
    pub async fn update(&self, uuid: Uuid, input: &UserUpdateRequest) -> AppResult<Uuid> {
        let first_name = non_empty(&input.first_name);
        let last_name = non_empty(&input.last_name);
        if first_name.is_none() && last_name.is_none() {
            return Err(AppError::validation(
                "invalid user: first name or last name is required",
            ));
        }
        if !self.repo.update_names(uuid, first_name, last_name).await? {
            return Err(AppError::not_found(format!("user {uuid} not found")));
        }
        Ok(uuid)
    }

    /// Creates the caller's row from the token identity; false when it already existed.
    pub async fn register(&self, user: &AuthUser) -> AppResult<bool> {
        let email = user
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or_else(|| AppError::validation("invalid user: token carries no email"))?;
        let created = self.repo.register(user.user_uuid, email).await?;
        if created {
            tracing::info!(user = %user.user_uuid, "user registered");
        }
        Ok(created)
    }

    /// Makes sure the caller has a user row before rows that reference it
    /// are written.
    pub async fn ensure_registered(&self, user: &AuthUser) -> AppResult<()> {
        if self.repo.get(user.user_uuid).await?.is_some() {
            return Ok(());
        }
        if user.email.as_deref().is_none_or(|email| email.trim().is_empty()) {
            return Err(AppError::not_found(format!(
                "user {} is not registered",
                user.user_uuid
            )));
        }
        self.register(user).await?;
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
