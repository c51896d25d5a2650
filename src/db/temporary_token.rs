use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::utils::token::new_key;
use chrono::Utc;
use entity::temporary_token::{
    ActiveModel as TemporaryTokenActive, Column, Entity as TemporaryToken,
    Model as TemporaryTokenModel,
};
use entity::user::{Entity as User, Model as UserModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr};
use uuid::Uuid;

impl DatabaseService {
    pub async fn find_temporary_token_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<TemporaryTokenModel>, AppError> {
        Ok(TemporaryToken::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.database_connection)
            .await?)
    }

    /// A user holds at most one session token; logging in again hands back the same key.
    pub async fn get_or_create_temporary_token(
        &self,
        user_id: Uuid,
    ) -> Result<TemporaryTokenModel, AppError> {
        if let Some(token) = self.find_temporary_token_for_user(user_id).await? {
            return Ok(token);
        }

        let inserted = TemporaryTokenActive {
            key: Set(new_key()),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
        }
        .insert(&self.database_connection)
        .await;

        match inserted {
            Ok(token) => Ok(token),
            Err(err) => match err.sql_err() {
                // concurrent login created it first
                Some(SqlErr::UniqueConstraintViolation(_)) => self
                    .find_temporary_token_for_user(user_id)
                    .await?
                    .ok_or(AppError::Internal("temporary token vanished".into())),
                _ => Err(err.into()),
            },
        }
    }

    pub async fn get_user_by_temporary_token(&self, key: &str) -> Result<Option<UserModel>, AppError> {
        Ok(TemporaryToken::find_by_id(key.to_string())
            .find_also_related(User)
            .one(&self.database_connection)
            .await?
            .and_then(|(_, user)| user))
    }

    /// Logout. `false` when `key` is not a token of `user_id`.
    pub async fn delete_temporary_token(&self, key: &str, user_id: Uuid) -> Result<bool, AppError> {
        let res = TemporaryToken::delete_many()
            .filter(Column::Key.eq(key))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
