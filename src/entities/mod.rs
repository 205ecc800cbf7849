mod location;
mod place;

pub use location::Coordinates;
pub use place::{Category, Place, PlaceChanges, PlaceDraft, PlaceFilter, PlaceSubmission};
