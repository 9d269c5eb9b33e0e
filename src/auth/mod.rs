use crate::state::AppState;
use axum::Router;

mod claims;
mod dto;
pub(crate) mod extractor;
pub mod handlers;
pub mod jwt;
pub mod password;

pub use extractor::AuthSubject;

pub fn router() -> Router<AppState> {
    handlers::login_routes()
}
