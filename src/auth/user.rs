use std::sync::Arc;

use axum::async_trait;
use axum::extract::{Extension, FromRequestParts};
use axum::http::request::Parts;
use oso::PolarClass;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::error::Error;

pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub roles: Vec<String>,
}

impl User {
    pub fn new_guest() -> Self {
        Self {
            id: Uuid::new_v4(),
            roles: vec![],
        }
    }

    pub fn new_admin() -> Self {
        Self {
            id: Uuid::new_v4(),
            roles: vec!["admin".into()],
        }
    }

    fn has_role(&self, role: String) -> bool {
        self.roles.iter().any(|x| x == &role)
    }
}

impl PolarClass for User {
    fn get_polar_class_builder() -> oso::ClassBuilder<User> {
        oso::Class::builder()
            .name("User")
            .add_attribute_getter("id", |recv: &User| recv.id)
            .add_attribute_getter("roles", |recv: &User| recv.roles.clone())
            .add_method("has_role", User::has_role)
    }

    fn get_polar_class() -> oso::Class {
        let builder = User::get_polar_class_builder();
        builder.build()
    }
}

/// Shared secret that turns a request into an admin request.
#[derive(Clone, Debug, Default)]
pub struct AdminSecret(Option<Arc<SecretString>>);

impl AdminSecret {
    pub fn new(secret: Option<SecretString>) -> Self {
        Self(secret.map(Arc::new))
    }

    /// An unset secret admits nobody.
    pub fn admits(&self, presented: Option<&str>) -> bool {
        match (&self.0, presented) {
            (Some(secret), Some(presented)) => {
                let expected = secret.expose_secret().as_bytes();
                !presented.is_empty() && bool::from(expected.ct_eq(presented.as_bytes()))
            }
            _ => false,
        }
    }

    pub fn user_for(&self, presented: Option<&str>) -> User {
        if self.admits(presented) {
            User::new_admin()
        } else {
            User::new_guest()
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for User
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(secret) = Extension::<AdminSecret>::from_request_parts(parts, state)
            .await
            .map_err(|_| Error::unexpected_error())?;

        let presented = parts
            .headers
            .get(ADMIN_SECRET_HEADER)
            .and_then(|value| value.to_str().ok());

        Ok(secret.user_for(presented))
    }
}
