//! Tour Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Tour, TourCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct TourRepository {
    base: BaseRepository,
}

impl TourRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all tours
    pub async fn find_all(&self) -> RepoResult<Vec<Tour>> {
        let tours: Vec<Tour> = self
            .base
            .db()
            .query("SELECT * FROM tour ORDER BY date")
            .await?
            .take(0)?;
        Ok(tours)
    }

    /// Find tour by id ("tour:abc" or bare key)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Tour>> {
        let record = super::parse_record_id("tour", id)?;
        let tour: Option<Tour> = self.base.db().select(record).await?;
        Ok(tour)
    }

    /// Create a new tour (admin insert)
    ///
    /// The seat counter always starts at zero, whatever the payload says.
    pub async fn create(&self, data: TourCreate) -> RepoResult<Tour> {
        let tour = Tour {
            id: None,
            title: data.title,
            date: data.date,
            time: data.time,
            duration: data.duration,
            price: data.price,
            description: data.description,
            image: data.image,
            link: data.link,
            location: data.location,
            max_participants: data.max_participants,
            current_participants: 0,
            highlights: data.highlights,
            itinerary: data.itinerary,
            included: data.included,
            excluded: data.excluded,
            rating: None,
            reviews: Vec::new(),
        };

        let created: Option<Tour> = self.base.db().create("tour").content(tour).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create tour".to_string()))
    }
}
