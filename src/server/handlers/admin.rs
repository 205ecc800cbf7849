use axum::extract::{Extension, Json};
use axum::http::StatusCode;

use crate::api::AdminAPI;
use crate::auth::User;
use crate::entities::{Place, PlaceSubmission};
use crate::error::Error;
use crate::server::extract::{Payload, PlaceId};
use crate::server::DynAPI;

// Request rejections are reported only to admins, everyone else gets 103.

pub async fn create(
    Extension(api): Extension<DynAPI>,
    user: User,
    submission: Result<Payload<PlaceSubmission>, Error>,
) -> Result<(StatusCode, Json<Place>), Error> {
    api.check_admin(&user)?;
    let Payload(submission) = submission?;

    let place = api.submit_place(user, submission).await?;

    Ok((StatusCode::CREATED, place.into()))
}

pub async fn delete(
    Extension(api): Extension<DynAPI>,
    user: User,
    id: Result<PlaceId, Error>,
) -> Result<StatusCode, Error> {
    api.check_admin(&user)?;
    let PlaceId(id) = id?;

    api.remove_place(user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
