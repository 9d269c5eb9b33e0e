use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::repo::User;

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Public part of the user returned to the client. The password digest
/// has no representation here at all.
#[derive(Debug, Serialize)]
pub struct ShowUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for ShowUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}
