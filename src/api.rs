use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::User;
use crate::entities::{Place, PlaceChanges, PlaceDraft, PlaceFilter, PlaceSubmission};
use crate::error::Error;

#[async_trait]
pub trait PlaceAPI {
    async fn find_places(&self, user: User, filter: PlaceFilter) -> Result<Vec<Place>, Error>;

    async fn find_saved_places(&self, user: User) -> Result<Vec<Place>, Error>;

    async fn find_place(&self, user: User, id: Uuid) -> Result<Place, Error>;

    async fn create_place(&self, user: User, draft: PlaceDraft) -> Result<Place, Error>;

    async fn update_place(
        &self,
        user: User,
        id: Uuid,
        changes: PlaceChanges,
    ) -> Result<Place, Error>;

    async fn set_place_saved(&self, user: User, id: Uuid, is_saved: bool) -> Result<Place, Error>;

    async fn delete_place(&self, user: User, id: Uuid) -> Result<(), Error>;
}

#[async_trait]
pub trait AdminAPI {
    /// Fails with 103 unless `user` may use the admin routes.
    fn check_admin(&self, user: &User) -> Result<(), Error>;

    /// Creates a place from the admin form, reading its coordinates from the
    /// submitted map link.
    async fn submit_place(&self, user: User, submission: PlaceSubmission) -> Result<Place, Error>;

    async fn remove_place(&self, user: User, id: Uuid) -> Result<(), Error>;
}

pub trait API: PlaceAPI + AdminAPI {}
