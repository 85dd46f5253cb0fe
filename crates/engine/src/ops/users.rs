use sea_orm::{ActiveValue, prelude::*};

use crate::{EngineError, ResultEngine, User, users, util::normalize_required_text};

use super::Engine;

impl Engine {
    /// Register a new user. Usernames are unique.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        name: &str,
        email: &str,
    ) -> ResultEngine<User> {
        let username = normalize_required_text(username, "username")?;
        if password.is_empty() {
            return Err(EngineError::InvalidName(
                "password must not be empty".to_string(),
            ));
        }
        if users::Entity::find_by_id(username.clone())
            .one(&self.database)
            .await?
            .is_some()
        {
            return Err(EngineError::ExistingKey(username));
        }

        let model = users::ActiveModel {
            username: ActiveValue::Set(username),
            password: ActiveValue::Set(password.to_string()),
            name: ActiveValue::Set(name.trim().to_string()),
            email: ActiveValue::Set(email.trim().to_string()),
        }
        .insert(&self.database)
        .await?;

        tracing::info!(user = %model.username, "user created");
        Ok(User::from(model))
    }

    /// Resolve Basic credentials. `None` when the pair does not match.
    pub async fn authenticate(&self, username: &str, password: &str) -> ResultEngine<Option<User>> {
        let found = users::Entity::find_by_id(username.to_string())
            .one(&self.database)
            .await?;
        Ok(found
            .filter(|model| model.password == password)
            .map(User::from))
    }

    pub async fn user(&self, username: &str) -> ResultEngine<User> {
        users::Entity::find_by_id(username.to_string())
            .one(&self.database)
            .await?
            .map(User::from)
            .ok_or_else(|| EngineError::KeyNotFound(format!("user {username}")))
    }
}
