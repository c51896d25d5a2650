use crate::db::database_service::DatabaseService;
use crate::types::{error::AppError, token::ActionTokenKind};
use crate::utils::token::new_key;
use chrono::{Duration, Utc};
use entity::action_token::{
    ActiveModel as ActionTokenActive, Column, Entity as ActionToken, Model as ActionTokenModel,
};
use entity::user::{ActiveModel as UserActive, Entity as User, Model as UserModel};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

impl DatabaseService {
    pub async fn create_action_token(
        &self,
        user_id: Uuid,
        kind: ActionTokenKind,
        lifetime: Duration,
    ) -> Result<ActionTokenModel, AppError> {
        let now = Utc::now();
        Ok(ActionTokenActive {
            key: Set(new_key()),
            user_id: Set(user_id),
            kind: Set(kind.to_string()),
            created_at: Set(now),
            expires_at: Set(now + lifetime),
            ..Default::default()
        }
        .insert(&self.database_connection)
        .await?)
    }

    /// Every token of `kind` carrying `key`; with `unexpired_only` expired ones are skipped.
    pub async fn find_action_tokens(
        &self,
        key: &str,
        kind: ActionTokenKind,
        unexpired_only: bool,
    ) -> Result<Vec<ActionTokenModel>, AppError> {
        let mut query = ActionToken::find()
            .filter(Column::Key.eq(key))
            .filter(Column::Kind.eq(kind.as_str()));
        if unexpired_only {
            query = query.filter(Column::ExpiresAt.gt(Utc::now()));
        }
        Ok(query.all(&self.database_connection).await?)
    }

    pub async fn list_action_tokens_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ActionTokenModel>, AppError> {
        Ok(ActionToken::find()
            .filter(Column::UserId.eq(user_id))
            .all(&self.database_connection)
            .await?)
    }

    /// Marks the owner active and deletes the token in one transaction.
    /// `None` if the token was consumed concurrently.
    pub async fn activate_with_token(
        &self,
        token: &ActionTokenModel,
    ) -> Result<Option<UserModel>, AppError> {
        let txn = self.database_connection.begin().await?;

        let deleted = ActionToken::delete_by_id(token.id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let user = User::find_by_id(token.user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?;
        let mut am: UserActive = user.into();
        am.is_active = Set(true);
        am.updated_at = Set(Utc::now());
        let user = am.update(&txn).await?;

        txn.commit().await?;
        Ok(Some(user))
    }

    /// Stores the new hash and expires the token in one transaction.
    /// `None` if the token expired in the meantime.
    pub async fn change_password_with_token(
        &self,
        token: &ActionTokenModel,
        password_hash: String,
    ) -> Result<Option<UserModel>, AppError> {
        let now = Utc::now();
        let txn = self.database_connection.begin().await?;

        let expired = ActionToken::update_many()
            .col_expr(Column::ExpiresAt, Expr::value(now))
            .filter(Column::Id.eq(token.id))
            .filter(Column::ExpiresAt.gt(now))
            .exec(&txn)
            .await?;
        if expired.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let user = User::find_by_id(token.user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?;
        let mut am: UserActive = user.into();
        am.password = Set(password_hash);
        am.updated_at = Set(now);
        let user = am.update(&txn).await?;

        txn.commit().await?;
        Ok(Some(user))
    }

    pub async fn expire_action_token(&self, token_id: i32) -> Result<(), AppError> {
        let token = ActionToken::find_by_id(token_id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Token not found".into()))?;
        let mut am: ActionTokenActive = token.into();
        am.expires_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await.map(|_| ())?)
    }

    /// Hard-delete every token past its expiry.
    pub async fn purge_expired_action_tokens(&self) -> Result<u64, AppError> {
        let res = ActionToken::delete_many()
            .filter(Column::ExpiresAt.lte(Utc::now()))
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected)
    }
}
