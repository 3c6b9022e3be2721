//! Trusted actor extractor
//!
//! Pulls the `{user_id, role}` tuple from the headers the identity
//! collaborator sets on every proxied request.

use axum::extract::FromRequestParts;
use http::request::Parts;
use shared::actor::{Actor, Role};
use shared::error::{AppError, ErrorCode};
use uuid::Uuid;

/// Header carrying the acting user's id (uuid)
pub const ACTOR_ID_HEADER: &str = "x-actor-id";

/// Header carrying the acting user's role
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// The authenticated actor for the current request
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

impl std::ops::Deref for CurrentActor {
    type Target = Actor;

    fn deref(&self) -> &Actor {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentActor {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_value(parts, ACTOR_ID_HEADER)?;
        let role = header_value(parts, ACTOR_ROLE_HEADER)?;

        let user_id: Uuid = user_id.parse().map_err(|_| {
            AppError::with_message(
                ErrorCode::ActorIdentityInvalid,
                format!("{} is not a valid uuid", ACTOR_ID_HEADER),
            )
        })?;
        let role: Role = role.parse().map_err(|_| {
            AppError::with_message(
                ErrorCode::ActorIdentityInvalid,
                format!("{} is not a valid role", ACTOR_ROLE_HEADER),
            )
        })?;

        Ok(CurrentActor(Actor::new(user_id, role)))
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, AppError> {
    let value = parts
        .headers
        .get(name)
        .ok_or_else(AppError::not_authenticated)?;
    value.to_str().map_err(|_| {
        AppError::with_message(
            ErrorCode::ActorIdentityInvalid,
            format!("{} is not valid ascii", name),
        )
    })
}
