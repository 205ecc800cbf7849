use super::helpers::{delete_place, fetch_place, insert_place};
use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::AdminAPI,
    auth::{Catalog, User},
    entities::{Place, PlaceSubmission},
    error::Error,
};

#[async_trait]
impl AdminAPI for Engine {
    fn check_admin(&self, user: &User) -> Result<(), Error> {
        self.authorize(user.clone(), "administer", Catalog::places())
    }

    #[tracing::instrument(skip(self))]
    async fn submit_place(&self, user: User, submission: PlaceSubmission) -> Result<Place, Error> {
        self.authorize(user, "administer", Catalog::places())?;

        let draft = submission.into_draft().map_err(|err| {
            tracing::info!(code = err.code, message = %err.message, "place submission rejected");
            err
        })?;

        let place = Place::new(draft);
        insert_place(&self.pool, &place).await?;

        tracing::info!(
            id = %place.id,
            lat = place.coordinates.lat,
            lng = place.coordinates.lng,
            "place submitted"
        );
        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn remove_place(&self, user: User, id: Uuid) -> Result<(), Error> {
        self.authorize(user, "administer", Catalog::places())?;

        let mut tx = self.pool.begin().await?;

        fetch_place(&mut *tx, id).await?;
        delete_place(&mut *tx, id).await?;

        tx.commit().await?;

        tracing::info!(%id, "place removed");
        Ok(())
    }
}
