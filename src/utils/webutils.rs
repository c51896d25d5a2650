use actix_web::{dev::Payload, dev::ServiceRequest, web, FromRequest, HttpMessage, HttpRequest};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;

/// The account behind the request's temporary token.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub entity::user::Model);

impl AuthenticatedUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn is_staff(&self) -> bool {
        self.0.is_staff
    }

    /// Owner-or-staff rule.
    pub fn may_act_on(&self, target: Uuid) -> bool {
        self.is_staff() || self.id() == target
    }

    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.is_staff() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

/// Unknown keys and inactive owners are both 401.
pub async fn resolve_bearer(db: &DatabaseService, key: &str) -> Result<entity::user::Model, AppError> {
    let user = match db.get_user_by_temporary_token(key).await? {
        Some(user) => user,
        None => return Err(AppError::Unauthorized),
    };
    if !user.is_active {
        warn!("rejected token of inactive user {}", user.id);
        return Err(AppError::Unauthorized);
    }
    Ok(user)
}

fn database(req: &HttpRequest) -> Result<Arc<DatabaseService>, AppError> {
    req.app_data::<web::Data<Arc<DatabaseService>>>()
        .map(|data| Arc::clone(data.get_ref()))
        .ok_or_else(|| AppError::Internal("database service not registered".into()))
}

/// Bearer middleware validator for scopes where every route needs a session.
pub async fn validate_token(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let db = match database(req.request()) {
        Ok(db) => db,
        Err(e) => return Err((e.into(), req)),
    };

    match resolve_bearer(&db, credentials.token()).await {
        Ok(user) => {
            req.extensions_mut().insert(AuthenticatedUser(user));
            Ok(req)
        }
        Err(e) => Err((e.into(), req)),
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        // already resolved by validate_token
        if let Some(user) = req.extensions().get::<AuthenticatedUser>().cloned() {
            return Box::pin(async move { Ok(user) });
        }

        let bearer = BearerAuth::from_request(req, payload);
        let db = database(req);

        Box::pin(async move {
            let bearer = bearer.await.map_err(|_| AppError::Unauthorized)?;
            let db = db?;
            let user = resolve_bearer(&db, bearer.token()).await?;
            Ok(AuthenticatedUser(user))
        })
    }
}
