use std::fmt;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
    routing::get as get_route,
};

use crate::{
    error::{AppError, AppResult},
    request::ApiRequest,
    response::ApiResponse,
    state::AppState,
};

pub mod address;
pub mod admin_users;
pub mod category;
pub mod doc;
pub mod health;
pub mod order;
pub mod params;
pub mod product;
pub mod stock;
pub mod user;

/// Resource family named by the leading path segment(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Category,
    Product,
    Stock,
    Address,
    Order,
    User,
    AdminUsers,
}

impl Entity {
    /// Resolves the entity and returns how many segments name it.
    pub fn resolve(segments: &[String]) -> AppResult<(Self, usize)> {
        let first = segments
            .first()
            .map(String::as_str)
            .ok_or_else(|| unroutable("missing entity".to_string()))?;
        let entity = match first {
            "category" => Entity::Category,
            "product" => Entity::Product,
            "stock" => Entity::Stock,
            "address" => Entity::Address,
            "order" => Entity::Order,
            "user" => Entity::User,
            "admin" => {
                let second = segments.get(1).map(String::as_str).unwrap_or_default();
                if second != "users" {
                    return Err(unroutable(format!(
                        "path 'admin'/'{second}' not implemented"
                    )));
                }
                return Ok((Entity::AdminUsers, 2));
            }
            other => return Err(unroutable(format!("entity '{other}' not implemented"))),
        };
        Ok((entity, 1))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Entity::Category => "category",
            Entity::Product => "product",
            Entity::Stock => "stock",
            Entity::Address => "address",
            Entity::Order => "order",
            Entity::User => "user",
            Entity::AdminUsers => "admin/users",
        }
    }

    /// Catalogue reads are the only anonymous requests.
    fn is_public(&self, verb: Option<Verb>) -> bool {
        verb == Some(Verb::Get) && matches!(self, Entity::Category | Entity::Product)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn unroutable(reason: String) -> AppError {
    AppError::BadRequest(format!("Unable to route request: {reason}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    fn from_method(method: &Method) -> Option<Self> {
        if *method == Method::GET {
            Some(Verb::Get)
        } else if *method == Method::POST {
            Some(Verb::Post)
        } else if *method == Method::PUT {
            Some(Verb::Put)
        } else if *method == Method::DELETE {
            Some(Verb::Delete)
        } else {
            None
        }
    }
}

/// Entity lookup, then authentication, then method dispatch.
pub async fn route(state: &AppState, mut req: ApiRequest) -> ApiResponse {
    match handle(state, &mut req).await {
        Ok(response) => response,
        Err(err) => err.into(),
    }
}

async fn handle(state: &AppState, req: &mut ApiRequest) -> AppResult<ApiResponse> {
    let (entity, consumed) = Entity::resolve(&req.segments)?;
    req.resource_id = req.segments.get(consumed).cloned();
    let verb = Verb::from_method(&req.method);
    tracing::debug!(entity = %entity, method = %req.method, "routing request");

    if !entity.is_public(verb) {
        let user = state.auth.verify(&req.headers).map_err(|err| {
            tracing::warn!(entity = %entity, error = %err, "authentication failed");
            AppError::Unauthorized(format!("Unable to authenticate user: {err}"))
        })?;
        req.user = Some(user);
    }

    let Some(verb) = verb else {
        return Err(AppError::MethodNotAllowed("Method not allowed".into()));
    };
    let req = &*req;

    match (entity, verb) {
        (Entity::Category, Verb::Get) => category::get(state, req).await,
        (Entity::Category, Verb::Post) => category::post(state, req).await,
        (Entity::Category, Verb::Put) => category::put(state, req).await,
        (Entity::Category, Verb::Delete) => category::delete(state, req).await,
        (Entity::Product, Verb::Get) => product::get(state, req).await,
        (Entity::Product, Verb::Post) => product::post(state, req).await,
        (Entity::Product, Verb::Put) => product::put(state, req).await,
        (Entity::Product, Verb::Delete) => product::delete(state, req).await,
        (Entity::Stock, Verb::Put) => stock::put(state, req).await,
        (Entity::Address, Verb::Get) => address::get(state, req).await,
        (Entity::Address, Verb::Post) => address::post(state, req).await,
        (Entity::Address, Verb::Put) => address::put(state, req).await,
        (Entity::Address, Verb::Delete) => address::delete(state, req).await,
        (Entity::Order, Verb::Get) => order::get(state, req).await,
        (Entity::Order, Verb::Post) => order::post(state, req).await,
        (Entity::Order, Verb::Put) => order::put(state, req).await,
        (Entity::Order, Verb::Delete) => order::delete(state, req).await,
        (Entity::User, Verb::Get) => user::get(state, req).await,
        (Entity::User, Verb::Post) => user::post(state, req).await,
        (Entity::User, Verb::Put) => user::put(state, req).await,
        (Entity::AdminUsers, Verb::Get) => admin_users::get(state, req).await,
        (Entity::AdminUsers, Verb::Delete) => admin_users::delete(state, req).await,
        (entity, _) => Err(AppError::MethodNotAllowed(format!(
            "{} not implemented for {entity}",
            req.method
        ))),
    }
}

/// Fallback handler: every path outside `/health` and `/docs` goes through [`route`].
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResponse {
    match ApiRequest::from_http(&state.url_prefix, method, &uri, headers, body) {
        Ok(req) => route(&state, req).await,
        Err(err) => {
            tracing::debug!(error = %err, "rejected request");
            err.into()
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get_route(health::health_check))
        .merge(doc::scalar_docs())
        .fallback(dispatch)
        .with_state(state)
}
