use axum::extract::{Extension, Json};
use axum::http::StatusCode;

use crate::api::PlaceAPI;
use crate::auth::User;
use crate::entities::{Place, PlaceChanges, PlaceDraft, PlaceFilter};
use crate::error::Error;
use crate::server::extract::{Params, Payload, PlaceId};
use crate::server::DynAPI;

pub async fn find_all(
    Extension(api): Extension<DynAPI>,
    user: User,
    Params(filter): Params<PlaceFilter>,
) -> Result<Json<Vec<Place>>, Error> {
    let places = api.find_places(user, filter).await?;

    Ok(places.into())
}

pub async fn find_saved(
    Extension(api): Extension<DynAPI>,
    user: User,
) -> Result<Json<Vec<Place>>, Error> {
    let places = api.find_saved_places(user).await?;

    Ok(places.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    user: User,
    PlaceId(id): PlaceId,
) -> Result<Json<Place>, Error> {
    let place = api.find_place(user, id).await?;

    Ok(place.into())
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    user: User,
    Payload(draft): Payload<PlaceDraft>,
) -> Result<(StatusCode, Json<Place>), Error> {
    let place = api.create_place(user, draft).await?;

    Ok((StatusCode::CREATED, place.into()))
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    user: User,
    PlaceId(id): PlaceId,
    Payload(changes): Payload<PlaceChanges>,
) -> Result<Json<Place>, Error> {
    let place = api.update_place(user, id, changes).await?;

    Ok(place.into())
}

pub async fn save(
    Extension(api): Extension<DynAPI>,
    user: User,
    PlaceId(id): PlaceId,
) -> Result<Json<Place>, Error> {
    let place = api.set_place_saved(user, id, true).await?;

    Ok(place.into())
}

pub async fn unsave(
    Extension(api): Extension<DynAPI>,
    user: User,
    PlaceId(id): PlaceId,
) -> Result<Json<Place>, Error> {
    let place = api.set_place_saved(user, id, false).await?;

    Ok(place.into())
}

pub async fn delete(
    Extension(api): Extension<DynAPI>,
    user: User,
    PlaceId(id): PlaceId,
) -> Result<StatusCode, Error> {
    api.delete_place(user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
