use crate::db::database_service::DatabaseService;
use crate::{
    types::{
        error::AppError,
        user::{DBUserCreate, DBUserUpdate, UserFilter, UserRes},
    },
    utils::token,
};
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use entity::user_permission::{
    ActiveModel as UserPermissionActive, Column as UserPermissionColumn, Entity as UserPermission,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

impl DatabaseService {
    pub async fn user_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    /// True when `email` belongs to an account other than `user_id`.
    pub async fn email_taken_by_other(&self, email: &str, user_id: Uuid) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .filter(Column::Id.ne(user_id))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn find_user_by_id(&self, id: &Uuid) -> Result<Option<UserModel>, AppError> {
        Ok(User::find_by_id(*id).one(&self.database_connection).await?)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(self
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .one(&self.database_connection)
            .await?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<UserModel, AppError> {
        Ok(self
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    /// Signup: create user.
    pub async fn create_user(&self, payload: DBUserCreate) -> Result<UserModel, AppError> {
        if self.user_exists_by_email(&payload.email).await? {
            return Err(AppError::AlreadyExists);
        }
        let now = Utc::now();

        let inserted = UserActive {
            id: Set(token::new_id()),
            email: Set(payload.email),
            first_name: Set(payload.first_name),
            last_name: Set(payload.last_name),
            password: Set(payload.password_hash),
            is_active: Set(payload.is_active),
            is_staff: Set(payload.is_staff),
            is_superuser: Set(payload.is_superuser),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.database_connection)
        .await;

        match inserted {
            Ok(user) => Ok(user),
            Err(err) => match err.sql_err() {
                // lost a race against a concurrent signup
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::AlreadyExists),
                _ => Err(err.into()),
            },
        }
    }

    pub async fn list_users(&self, filter: &UserFilter) -> Result<Vec<UserModel>, AppError> {
        let mut query = User::find();
        if let Some(email) = &filter.email {
            query = query.filter(Column::Email.eq(email.as_str()));
        }
        if let Some(first_name) = &filter.first_name {
            query = query.filter(Column::FirstName.eq(first_name.as_str()));
        }
        if let Some(last_name) = &filter.last_name {
            query = query.filter(Column::LastName.eq(last_name.as_str()));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(Column::IsActive.eq(is_active));
        }
        if let Some(is_staff) = filter.is_staff {
            query = query.filter(Column::IsStaff.eq(is_staff));
        }
        Ok(query
            .order_by_asc(Column::CreatedAt)
            .all(&self.database_connection)
            .await?)
    }

    /// Applies validated column changes and, when given, replaces the permission set.
    pub async fn update_user(&self, user_id: Uuid, patch: DBUserUpdate) -> Result<UserModel, AppError> {
        let txn = self.database_connection.begin().await?;

        let current = User::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?;

        let mut am: UserActive = current.into();
        if let Some(v) = patch.email { am.email = Set(v); }
        if let Some(v) = patch.first_name { am.first_name = Set(v); }
        if let Some(v) = patch.last_name { am.last_name = Set(v); }
        if let Some(v) = patch.password_hash { am.password = Set(v); }
        if let Some(v) = patch.is_active { am.is_active = Set(v); }
        if let Some(v) = patch.is_staff { am.is_staff = Set(v); }
        am.updated_at = Set(Utc::now());
        let user = match am.update(&txn).await {
            Ok(user) => user,
            Err(err) => match err.sql_err() {
                // email claimed by a concurrent write after the route checked it
                Some(SqlErr::UniqueConstraintViolation(_)) => return Err(AppError::AlreadyExists),
                _ => return Err(err.into()),
            },
        };

        if let Some(permission_ids) = patch.user_permissions {
            replace_user_permissions(&txn, user_id, &permission_ids).await?;
        }

        txn.commit().await?;
        Ok(user)
    }

    pub async fn set_user_active(&self, user_id: Uuid, is_active: bool) -> Result<UserModel, AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.is_active = Set(is_active);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await?)
    }

    /// Soft delete. `false` when there was no such user.
    pub async fn deactivate_user(&self, user_id: Uuid) -> Result<bool, AppError> {
        match self.set_user_active(user_id, false).await {
            Ok(_) => Ok(true),
            Err(AppError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn record_login(&self, user_id: Uuid) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.last_login = Set(Some(Utc::now()));
        Ok(am.update(&self.database_connection).await.map(|_| ())?)
    }

    pub async fn get_user_permission_ids(&self, user_id: Uuid) -> Result<Vec<i32>, AppError> {
        Ok(UserPermission::find()
            .select_only()
            .column(UserPermissionColumn::PermissionId)
            .filter(UserPermissionColumn::UserId.eq(user_id))
            .order_by_asc(UserPermissionColumn::PermissionId)
            .into_tuple::<i32>()
            .all(&self.database_connection)
            .await?)
    }

    /// Response body for a user, permission ids included.
    pub async fn user_res(&self, user: UserModel) -> Result<UserRes, AppError> {
        let permissions = self.get_user_permission_ids(user.id).await?;
        Ok(UserRes::new(user, permissions))
    }

    /// Creates the configured staff account on first start. Existing accounts are left alone.
    pub async fn ensure_admin(&self, email: &str, password_hash: String) -> Result<(), AppError> {
        if self.user_exists_by_email(email).await? {
            return Ok(());
        }
        self.create_user(DBUserCreate {
            email: email.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash,
            is_active: true,
            is_staff: true,
            is_superuser: true,
        })
        .await?;
        info!("Bootstrapped admin account {email}");
        Ok(())
    }
}

async fn replace_user_permissions<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    permission_ids: &[i32],
) -> Result<(), DbErr> {
    UserPermission::delete_many()
        .filter(UserPermissionColumn::UserId.eq(user_id))
        .exec(conn)
        .await?;

    let mut ids = permission_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(());
    }

    UserPermission::insert_many(ids.into_iter().map(|permission_id| UserPermissionActive {
        user_id: Set(user_id),
        permission_id: Set(permission_id),
    }))
    .exec_without_returning(conn)
    .await?;
    Ok(())
}
