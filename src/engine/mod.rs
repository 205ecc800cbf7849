mod admin_api;
mod helpers;
mod place_api;

use oso::Oso;
use sqlx::{Executor, Pool};

use crate::{
    api::API,
    auth::{authorizor, Catalog, User},
    db::Database,
    error::Error,
};

pub struct Engine {
    pool: Pool<Database>,
    authorizor: Oso,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(pool: Pool<Database>) -> Result<Self, Error> {
        // place catalog (KV store, saved flag kept alongside for the saved list)
        pool.execute(
            "CREATE TABLE IF NOT EXISTS places (id BLOB PRIMARY KEY, is_saved BOOLEAN NOT NULL DEFAULT FALSE, data TEXT NOT NULL)",
        )
        .await?;
        pool.execute("CREATE INDEX IF NOT EXISTS places_is_saved ON places (is_saved)")
            .await?;

        Ok(Self {
            pool,
            authorizor: authorizor::new()?,
        })
    }
}

impl Engine {
    pub fn authorize(&self, actor: User, action: &str, resource: Catalog) -> Result<(), Error> {
        if self.authorizor.is_allowed(actor, action, resource)? {
            return Ok(());
        }

        tracing::debug!(action, "request not authorized");
        Err(Error::unauthorized_error())
    }
}

impl API for Engine {}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db;

    pub(crate) async fn in_memory_engine() -> Engine {
        let pool = db::connect_in_memory().await.unwrap();

        Engine::new(pool).await.unwrap()
    }

    #[test]
    fn new_engine() {
        use tokio_test::block_on;

        block_on(async {
            let pool = db::connect_in_memory().await.unwrap();

            // bootstrapping twice must not fail
            Engine::new(pool.clone()).await.unwrap();
            Engine::new(pool).await.unwrap();
        });
    }

    #[test]
    fn authorize() {
        use tokio_test::block_on;

        block_on(async {
            let engine = in_memory_engine().await;

            assert!(engine
                .authorize(User::new_guest(), "browse", Catalog::places())
                .is_ok());
            assert!(engine
                .authorize(User::new_admin(), "administer", Catalog::places())
                .is_ok());

            let err = engine
                .authorize(User::new_guest(), "administer", Catalog::places())
                .unwrap_err();
            assert_eq!(err.code, 103);
        });
    }
}
