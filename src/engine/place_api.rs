use super::helpers::{decode_place, delete_place, fetch_place, insert_place, update_place};
use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::PlaceAPI,
    auth::{Catalog, User},
    entities::{Place, PlaceChanges, PlaceDraft, PlaceFilter},
    error::Error,
};

#[async_trait]
impl PlaceAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_places(&self, user: User, filter: PlaceFilter) -> Result<Vec<Place>, Error> {
        self.authorize(user, "browse", Catalog::places())?;

        let rows = sqlx::query("SELECT data FROM places ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        let mut places = Vec::with_capacity(rows.len());
        for row in rows.iter() {
            let place = decode_place(row)?;
            if filter.matches(&place) {
                places.push(place);
            }
        }

        Ok(places)
    }

    #[tracing::instrument(skip(self))]
    async fn find_saved_places(&self, user: User) -> Result<Vec<Place>, Error> {
        self.authorize(user, "browse", Catalog::places())?;

        let rows = sqlx::query("SELECT data FROM places WHERE is_saved = TRUE ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(decode_place).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn find_place(&self, user: User, id: Uuid) -> Result<Place, Error> {
        self.authorize(user, "browse", Catalog::places())?;

        fetch_place(&self.pool, id).await
    }

    #[tracing::instrument(skip(self))]
    async fn create_place(&self, user: User, draft: PlaceDraft) -> Result<Place, Error> {
        self.authorize(user, "edit", Catalog::places())?;

        let place = Place::new(draft);
        insert_place(&self.pool, &place).await?;

        tracing::info!(id = %place.id, name = %place.name, "place created");
        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn update_place(
        &self,
        user: User,
        id: Uuid,
        changes: PlaceChanges,
    ) -> Result<Place, Error> {
        self.authorize(user, "edit", Catalog::places())?;

        let mut tx = self.pool.begin().await?;

        let mut place = fetch_place(&mut *tx, id).await?;
        place.apply(changes);
        update_place(&mut *tx, &place).await?;

        tx.commit().await?;

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn set_place_saved(&self, user: User, id: Uuid, is_saved: bool) -> Result<Place, Error> {
        self.authorize(user, "bookmark", Catalog::places())?;

        let mut tx = self.pool.begin().await?;

        let mut place = fetch_place(&mut *tx, id).await?;
        if place.set_saved(is_saved) {
            update_place(&mut *tx, &place).await?;
        }

        tx.commit().await?;

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_place(&self, user: User, id: Uuid) -> Result<(), Error> {
        self.authorize(user, "edit", Catalog::places())?;

        if !delete_place(&self.pool, id).await? {
            return Err(Error::not_found_error());
        }

        tracing::info!(%id, "place deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::block_on;

    use super::*;
    use crate::engine::tests::in_memory_engine;
    use crate::entities::Category;

    fn draft(name: &str, category: Category, city: &str) -> PlaceDraft {
        PlaceDraft {
            name: name.into(),
            category,
            city: city.into(),
            rating: 4.5,
            review_count: 100,
            distance: 1.2,
            image: "".into(),
            description: "".into(),
            map_url: None,
            lat: 11.2558,
            lng: 75.7748,
            tags: vec![],
        }
    }

    #[test]
    fn create_and_find() {
        block_on(async {
            let engine = in_memory_engine().await;
            let guest = User::new_guest();

            let created = engine
                .create_place(
                    guest.clone(),
                    draft("Paragon Restaurant", Category::Restaurant, "Kozhikode"),
                )
                .await
                .unwrap();

            let found = engine.find_place(guest.clone(), created.id).await.unwrap();
            assert_eq!(found, created);
            assert!(!found.is_saved);

            let err = engine
                .find_place(guest.clone(), Uuid::new_v4())
                .await
                .unwrap_err();
            assert!(err.is_not_found_error());
        });
    }

    #[test]
    fn listing_keeps_insertion_order_and_filters() {
        block_on(async {
            let engine = in_memory_engine().await;
            let guest = User::new_guest();

            for (name, category) in [
                ("Kozhikode Beach", Category::Beach),
                ("Paragon Restaurant", Category::Restaurant),
                ("Valayanad Devi Temple", Category::Heritage),
                ("Focus Mall", Category::Shopping),
            ] {
                engine
                    .create_place(guest.clone(), draft(name, category, "Kozhikode, Kerala"))
                    .await
                    .unwrap();
            }

            let all = engine
                .find_places(guest.clone(), PlaceFilter::default())
                .await
                .unwrap();
            let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(
                names,
                [
                    "Kozhikode Beach",
                    "Paragon Restaurant",
                    "Valayanad Devi Temple",
                    "Focus Mall"
                ]
            );

            let heritage = engine
                .find_places(
                    guest.clone(),
                    PlaceFilter {
                        category: Some("heritage".into()),
                        search: None,
                    },
                )
                .await
                .unwrap();
            assert_eq!(heritage.len(), 1);
            assert_eq!(heritage[0].name, "Valayanad Devi Temple");

            let searched = engine
                .find_places(
                    guest.clone(),
                    PlaceFilter {
                        category: None,
                        search: Some("mall".into()),
                    },
                )
                .await
                .unwrap();
            assert_eq!(searched.len(), 1);
            assert_eq!(searched[0].category, Category::Shopping);
        });
    }

    #[test]
    fn save_and_unsave() {
        block_on(async {
            let engine = in_memory_engine().await;
            let guest = User::new_guest();

            let beach = engine
                .create_place(guest.clone(), draft("Kozhikode Beach", Category::Beach, "Kozhikode"))
                .await
                .unwrap();
            let temple = engine
                .create_place(
                    guest.clone(),
                    draft("Valayanad Devi Temple", Category::Heritage, "Kozhikode"),
                )
                .await
                .unwrap();

            assert!(engine
                .find_saved_places(guest.clone())
                .await
                .unwrap()
                .is_empty());

            let saved = engine
                .set_place_saved(guest.clone(), temple.id, true)
                .await
                .unwrap();
            assert!(saved.is_saved);

            // saving twice is harmless
            engine
                .set_place_saved(guest.clone(), temple.id, true)
                .await
                .unwrap();

            let saved_places = engine.find_saved_places(guest.clone()).await.unwrap();
            assert_eq!(saved_places.len(), 1);
            assert_eq!(saved_places[0].id, temple.id);

            let unsaved = engine
                .set_place_saved(guest.clone(), temple.id, false)
                .await
                .unwrap();
            assert!(!unsaved.is_saved);
            assert!(engine
                .find_saved_places(guest.clone())
                .await
                .unwrap()
                .is_empty());

            let beach = engine.find_place(guest.clone(), beach.id).await.unwrap();
            assert!(!beach.is_saved);

            let err = engine
                .set_place_saved(guest.clone(), Uuid::new_v4(), true)
                .await
                .unwrap_err();
            assert!(err.is_not_found_error());
        });
    }

    #[test]
    fn partial_update() {
        block_on(async {
            let engine = in_memory_engine().await;
            let guest = User::new_guest();

            let place = engine
                .create_place(guest.clone(), draft("Salkara", Category::Restaurant, "Kozhikode"))
                .await
                .unwrap();

            let updated = engine
                .update_place(
                    guest.clone(),
                    place.id,
                    PlaceChanges {
                        name: Some("Salkara Restaurant".into()),
                        rating: Some(4.4),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            assert_eq!(updated.name, "Salkara Restaurant");
            assert_eq!(updated.rating, 4.4);
            assert_eq!(updated.city, place.city);
            assert_eq!(updated.coordinates, place.coordinates);
            assert_eq!(updated.created_at, place.created_at);

            let stored = engine.find_place(guest.clone(), place.id).await.unwrap();
            assert_eq!(stored, updated);

            let err = engine
                .update_place(guest.clone(), Uuid::new_v4(), PlaceChanges::default())
                .await
                .unwrap_err();
            assert!(err.is_not_found_error());
        });
    }

    #[test]
    fn delete() {
        block_on(async {
            let engine = in_memory_engine().await;
            let guest = User::new_guest();

            let place = engine
                .create_place(guest.clone(), draft("Focus Mall", Category::Shopping, "Kozhikode"))
                .await
                .unwrap();

            engine.delete_place(guest.clone(), place.id).await.unwrap();

            let err = engine.find_place(guest.clone(), place.id).await.unwrap_err();
            assert!(err.is_not_found_error());

            let err = engine.delete_place(guest.clone(), place.id).await.unwrap_err();
            assert!(err.is_not_found_error());
        });
    }
}
