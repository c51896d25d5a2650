use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use entity::permission::{
    ActiveModel as PermissionActive, Column, Entity as Permission, Model as PermissionModel,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};

impl DatabaseService {
    pub async fn list_permissions(&self) -> Result<Vec<PermissionModel>, AppError> {
        Ok(Permission::find()
            .order_by_asc(Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn get_permission(&self, id: i32) -> Result<PermissionModel, AppError> {
        Ok(Permission::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Permission not found".into()))?)
    }

    /// True when `codename` is used by a permission other than `except`.
    pub async fn codename_taken(&self, codename: &str, except: Option<i32>) -> Result<bool, AppError> {
        let mut query = Permission::find().filter(Column::Codename.eq(codename));
        if let Some(id) = except {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query.count(&self.database_connection).await? > 0)
    }

    /// Ids from `ids` that name no permission.
    pub async fn missing_permissions(&self, ids: &[i32]) -> Result<Vec<i32>, AppError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let found: Vec<i32> = Permission::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
    }

    pub async fn create_permission(&self, name: String, codename: String) -> Result<PermissionModel, AppError> {
        let inserted = PermissionActive {
            name: Set(name),
            codename: Set(codename),
            ..Default::default()
        }
        .insert(&self.database_connection)
        .await;
        unique_or(inserted)
    }

    pub async fn update_permission(
        &self,
        id: i32,
        name: Option<String>,
        codename: Option<String>,
    ) -> Result<PermissionModel, AppError> {
        let mut am: PermissionActive = self.get_permission(id).await?.into();
        if let Some(v) = name { am.name = Set(v); }
        if let Some(v) = codename { am.codename = Set(v); }
        unique_or(am.update(&self.database_connection).await)
    }

    pub async fn delete_permission(&self, id: i32) -> Result<(), AppError> {
        let res = Permission::delete_by_id(id)
            .exec(&self.database_connection)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

fn unique_or(res: Result<PermissionModel, DbErr>) -> Result<PermissionModel, AppError> {
    match res {
        Ok(p) => Ok(p),
        Err(err) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::AlreadyExists),
            _ => Err(err.into()),
        },
    }
}
