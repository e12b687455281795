//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod admin;
pub mod allowance;
pub mod catalogue;
pub mod employee;
pub mod health;
pub mod manager;
pub mod profile;
pub mod setup;
pub mod views;

/// Creates the API router with public routes only.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(catalogue::routes())
        .merge(setup::routes())
}

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(profile::routes())
        .merge(allowance::routes())
        .merge(employee::routes())
        .merge(manager::routes())
        .merge(admin::routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(public_routes()).merge(protected_routes)
}
