use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Double, Integer, Nullable, Text};
use tokio::task;
use uuid::Uuid;

use crate::infrastructure::database::models::{
    CuisineModel, NewCuisine, NewRestaurant, NewRestaurantCuisine, RestaurantChangeset,
    RestaurantCuisine, RestaurantModel,
};
use crate::infrastructure::database::schema::{
    cuisines, restaurant_cuisines, restaurants, user_restaurant_interactions,
};
use crate::infrastructure::database::Database;
use crate::modules::interaction::domain::LikeStatus;
use crate::modules::restaurant::domain::entities::{Cuisine, GeoPoint, Restaurant};
use crate::modules::restaurant::domain::repositories::{
    RestaurantFilter, RestaurantRepository, RestaurantSort,
};
use crate::modules::restaurant::domain::value_objects::{PersonaFilter, PersonaSort, WeeklySchedule};
use crate::shared::errors::{AppError, AppResult};

type BoxedRestaurantQuery = restaurants::BoxedQuery<'static, Pg>;
type BoxedPredicate =
    Box<dyn BoxableExpression<restaurants::table, Pg, SqlType = Nullable<Bool>>>;

pub struct RestaurantRepositoryImpl {
    db: Arc<Database>,
}

impl RestaurantRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Translate the domain filter into a boxed query. Called once for
    /// the count and once for the page so both see identical conditions.
    fn filtered(filter: &RestaurantFilter) -> BoxedRestaurantQuery {
        let mut query = restaurants::table.into_boxed();

        if let Some(name) = &filter.name_contains {
            let pattern = format!("%{}%", name);
            query = query.filter(restaurants::name.ilike(pattern));
        }

        if let Some(term) = &filter.search_term {
            let pattern = format!("%{}%", term);
            query = query.filter(
                restaurants::name
                    .ilike(pattern.clone())
                    .or(restaurants::address.ilike(pattern)),
            );
        }

        if let Some(cuisine_id) = filter.cuisine_id {
            let with_cuisine = restaurant_cuisines::table
                .filter(restaurant_cuisines::cuisine_id.eq(cuisine_id))
                .select(restaurant_cuisines::restaurant_id);
            query = query.filter(restaurants::id.eq_any(with_cuisine));
        }

        if let Some(min_rating) = filter.min_rating {
            query = query.filter(restaurants::rating.ge(min_rating));
        }
        if let Some(max_price) = filter.max_price {
            query = query.filter(restaurants::price_level.le(max_price));
        }
        if filter.vegan_only {
            query = query.filter(restaurants::vegan_options.eq(true));
        }

        if let Some(user_id) = filter.liked_by {
            let liked = user_restaurant_interactions::table
                .filter(user_restaurant_interactions::user_id.eq(user_id))
                .filter(user_restaurant_interactions::liked.eq(LikeStatus::Liked.as_db()))
                .select(user_restaurant_interactions::restaurant_id);
            query = query.filter(restaurants::id.eq_any(liked));
        }

        if let Some(user_id) = filter.visited_by {
            let visited = user_restaurant_interactions::table
                .filter(user_restaurant_interactions::user_id.eq(user_id))
                .filter(user_restaurant_interactions::visited.eq(true))
                .select(user_restaurant_interactions::restaurant_id);
            query = query.filter(restaurants::id.eq_any(visited));
        }

        if let Some(user_id) = filter.exclude_disliked_by {
            let disliked = user_restaurant_interactions::table
                .filter(user_restaurant_interactions::user_id.eq(user_id))
                .filter(user_restaurant_interactions::liked.eq(LikeStatus::Disliked.as_db()))
                .select(user_restaurant_interactions::restaurant_id);
            query = query.filter(restaurants::id.ne_all(disliked));
        }

        if let Some(suggestion) = &filter.suggestion {
            let mut predicate: Option<BoxedPredicate> = None;
            let mut add = |branch: BoxedPredicate| {
                predicate = Some(match predicate.take() {
                    Some(acc) => Box::new(acc.or(branch)),
                    None => branch,
                });
            };

            if !suggestion.cuisine_ids.is_empty() {
                let favored = restaurant_cuisines::table
                    .filter(
                        restaurant_cuisines::cuisine_id.eq_any(suggestion.cuisine_ids.clone()),
                    )
                    .select(restaurant_cuisines::restaurant_id);
                add(Box::new(restaurants::id.eq_any(favored).nullable()));
            }
            if let Some(max_price) = suggestion.max_price {
                add(Box::new(restaurants::price_level.le(max_price)));
            }
            if let Some(min_rating) = suggestion.min_rating {
                add(Box::new(restaurants::rating.ge(min_rating)));
            }

            if let Some(predicate) = predicate {
                query = query.filter(predicate);
            }
        }

        match filter.persona_filter {
            Some(PersonaFilter::MinAdventureRating(min)) => {
                query = query.filter(restaurants::adventure_rating.ge(min));
            }
            Some(PersonaFilter::PlanningFriendly) => {
                query = query.filter(restaurants::planning_friendly.eq(true));
            }
            Some(PersonaFilter::InstagramWorthy) => {
                query = query.filter(restaurants::instagram_worthy.eq(true));
            }
            Some(PersonaFilter::None) | None => {}
        }

        // Stored intervals are half-open, so the closing minute is closed.
        if let Some((day, minutes)) = filter.open_at {
            query = query.filter(
                sql::<Bool>("(opening_hours -> ")
                    .bind::<Text, _>(day.name())
                    .sql(" ->> 0)::int <= ")
                    .bind::<Integer, _>(minutes as i32)
                    .sql(" AND (opening_hours -> ")
                    .bind::<Text, _>(day.name())
                    .sql(" ->> 1)::int > ")
                    .bind::<Integer, _>(minutes as i32),
            );
        }

        query
    }

    fn ordered(
        query: BoxedRestaurantQuery,
        sort: RestaurantSort,
        origin: Option<GeoPoint>,
    ) -> AppResult<BoxedRestaurantQuery> {
        let query = match sort {
            RestaurantSort::Name { descending: false } => {
                query.order(sql::<Text>("name ASC, created_at ASC"))
            }
            RestaurantSort::Name { descending: true } => {
                query.order(sql::<Text>("name DESC, created_at ASC"))
            }
            RestaurantSort::Rating { descending: false } => {
                query.order(sql::<Text>("rating ASC NULLS LAST, created_at ASC"))
            }
            RestaurantSort::Rating { descending: true } => {
                query.order(sql::<Text>("rating DESC NULLS LAST, created_at ASC"))
            }
            RestaurantSort::PriceLevel { descending: false } => {
                query.order(sql::<Text>("price_level ASC NULLS LAST, created_at ASC"))
            }
            RestaurantSort::PriceLevel { descending: true } => {
                query.order(sql::<Text>("price_level DESC NULLS LAST, created_at ASC"))
            }
            RestaurantSort::Distance => {
                let origin = origin.ok_or_else(|| {
                    AppError::InvalidInput(
                        "Distance ordering requires an origin coordinate".to_string(),
                    )
                })?;
                query.order(
                    sql::<Text>(
                        "ST_DistanceSphere(ST_MakePoint(longitude, latitude), ST_MakePoint(",
                    )
                    .bind::<Double, _>(origin.longitude)
                    .sql(", ")
                    .bind::<Double, _>(origin.latitude)
                    .sql(")) ASC NULLS LAST, created_at ASC"),
                )
            }
            RestaurantSort::Persona(persona_sort) => {
                let clause = match persona_sort {
                    PersonaSort::AdventureThenRating => {
                        "adventure_rating DESC, rating DESC NULLS LAST"
                    }
                    PersonaSort::CulturalThenRating => {
                        "cultural_significance DESC, rating DESC NULLS LAST"
                    }
                    PersonaSort::RatingThenPrice => {
                        "rating DESC NULLS LAST, price_level ASC NULLS LAST"
                    }
                    PersonaSort::InstagramThenRating => {
                        "instagram_worthiness DESC, rating DESC NULLS LAST"
                    }
                };
                query.order(sql::<Text>(clause))
            }
        };
        Ok(query)
    }

    /// Sphere distance in meters, computed in the database. NULL when the
    /// restaurant has no coordinates.
    fn distance_fragment(
        origin: GeoPoint,
    ) -> Box<dyn BoxableExpression<restaurants::table, Pg, SqlType = Nullable<Double>>> {
        Box::new(
            sql::<Nullable<Double>>(
                "ST_DistanceSphere(ST_MakePoint(longitude, latitude), ST_MakePoint(",
            )
            .bind::<Double, _>(origin.longitude)
            .sql(", ")
            .bind::<Double, _>(origin.latitude)
            .sql("))"),
        )
    }

    fn load_cuisines_for(
        conn: &mut PgConnection,
        models: &[RestaurantModel],
    ) -> AppResult<HashMap<Uuid, Vec<Cuisine>>> {
        let rows: Vec<(RestaurantCuisine, CuisineModel)> = RestaurantCuisine::belonging_to(models)
            .inner_join(cuisines::table)
            .select((restaurant_cuisines::all_columns, cuisines::all_columns))
            .load::<(RestaurantCuisine, CuisineModel)>(conn)?;

        let grouped = rows.grouped_by(models);
        Ok(models
            .iter()
            .zip(grouped)
            .map(|(model, pairs)| {
                let list = pairs
                    .into_iter()
                    .map(|(_, c)| Cuisine {
                        id: c.id,
                        name: c.name,
                    })
                    .collect::<Vec<_>>();
                (model.id, list)
            })
            .collect())
    }

    fn load_distances_for(
        conn: &mut PgConnection,
        ids: Vec<Uuid>,
        origin: GeoPoint,
    ) -> AppResult<HashMap<Uuid, f64>> {
        let rows: Vec<(Uuid, Option<f64>)> = restaurants::table
            .filter(restaurants::id.eq_any(ids))
            .select((restaurants::id, Self::distance_fragment(origin)))
            .load::<(Uuid, Option<f64>)>(conn)?;

        Ok(rows
            .into_iter()
            .filter_map(|(id, distance)| distance.map(|d| (id, d)))
            .collect())
    }

    fn model_to_entity(
        model: RestaurantModel,
        cuisines: Vec<Cuisine>,
        distance: Option<f64>,
    ) -> Restaurant {
        let opening_hours = model.opening_hours.and_then(|value| {
            match serde_json::from_value::<WeeklySchedule>(value) {
                Ok(schedule) => Some(schedule),
                Err(err) => {
                    tracing::warn!(
                        restaurant_id = %model.id,
                        "Stored opening hours are malformed: {}",
                        err
                    );
                    None
                }
            }
        });

        Restaurant {
            id: model.id,
            name: model.name,
            address: model.address,
            latitude: model.latitude,
            longitude: model.longitude,
            phone_number: model.phone_number,
            website: model.website,
            rating: model.rating,
            price_level: model.price_level,
            adventure_rating: model.adventure_rating,
            cultural_significance: model.cultural_significance,
            instagram_worthiness: model.instagram_worthiness,
            planning_friendly: model.planning_friendly,
            instagram_worthy: model.instagram_worthy,
            vegan_options: model.vegan_options,
            main_image_url: model.main_image_url,
            review_summary: model.review_summary,
            opening_hours,
            cuisines,
            distance,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    fn entity_to_new_model(restaurant: &Restaurant) -> AppResult<NewRestaurant> {
        let opening_hours = restaurant
            .opening_hours
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        Ok(NewRestaurant {
            id: restaurant.id,
            name: restaurant.name.clone(),
            address: restaurant.address.clone(),
            latitude: restaurant.latitude,
            longitude: restaurant.longitude,
            phone_number: restaurant.phone_number.clone(),
            website: restaurant.website.clone(),
            rating: restaurant.rating,
            price_level: restaurant.price_level,
            adventure_rating: restaurant.adventure_rating,
            cultural_significance: restaurant.cultural_significance,
            instagram_worthiness: restaurant.instagram_worthiness,
            planning_friendly: restaurant.planning_friendly,
            instagram_worthy: restaurant.instagram_worthy,
            vegan_options: restaurant.vegan_options,
            main_image_url: restaurant.main_image_url.clone(),
            review_summary: restaurant.review_summary.clone(),
            opening_hours,
        })
    }

    fn entity_to_changeset(restaurant: &Restaurant) -> AppResult<RestaurantChangeset> {
        let opening_hours = restaurant
            .opening_hours
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        Ok(RestaurantChangeset {
            address: restaurant.address.clone(),
            latitude: restaurant.latitude,
            longitude: restaurant.longitude,
            phone_number: restaurant.phone_number.clone(),
            website: restaurant.website.clone(),
            rating: restaurant.rating,
            price_level: restaurant.price_level,
            main_image_url: restaurant.main_image_url.clone(),
            review_summary: restaurant.review_summary.clone(),
            opening_hours,
            updated_at: Utc::now(),
        })
    }
}

#[async_trait]
impl RestaurantRepository for RestaurantRepositoryImpl {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Restaurant>> {
        let db = Arc::clone(&self.db);
        let id = *id;

        task::spawn_blocking(move || -> AppResult<Option<Restaurant>> {
            let mut conn = db.get_connection()?;

            let Some(model) = restaurants::table
                .filter(restaurants::id.eq(id))
                .first::<RestaurantModel>(&mut conn)
                .optional()?
            else {
                return Ok(None);
            };

            let models = vec![model];
            let mut cuisines_by_id = Self::load_cuisines_for(&mut conn, &models)?;
            let model = models.into_iter().next().ok_or_else(|| {
                AppError::InternalError("Restaurant row vanished during load".to_string())
            })?;
            let cuisines = cuisines_by_id.remove(&model.id).unwrap_or_default();

            Ok(Some(Self::model_to_entity(model, cuisines, None)))
        })
        .await?
    }

    async fn exists(&self, id: &Uuid) -> AppResult<bool> {
        let db = Arc::clone(&self.db);
        let id = *id;

        task::spawn_blocking(move || -> AppResult<bool> {
            let mut conn = db.get_connection()?;
            let found = diesel::select(diesel::dsl::exists(
                restaurants::table.filter(restaurants::id.eq(id)),
            ))
            .get_result::<bool>(&mut conn)?;
            Ok(found)
        })
        .await?
    }

    async fn list(
        &self,
        filter: RestaurantFilter,
        sort: RestaurantSort,
        origin: Option<GeoPoint>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Restaurant>, i64)> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<(Vec<Restaurant>, i64)> {
            let mut conn = db.get_connection()?;

            let total = Self::filtered(&filter)
                .count()
                .get_result::<i64>(&mut conn)?;

            let models = Self::ordered(Self::filtered(&filter), sort, origin)?
                .offset(offset)
                .limit(limit)
                .load::<RestaurantModel>(&mut conn)?;

            let mut cuisines_by_id = Self::load_cuisines_for(&mut conn, &models)?;
            let mut distances_by_id = match origin {
                Some(origin) => {
                    let ids = models.iter().map(|m| m.id).collect::<Vec<_>>();
                    Self::load_distances_for(&mut conn, ids, origin)?
                }
                None => HashMap::new(),
            };

            let results = models
                .into_iter()
                .map(|model| {
                    let cuisines = cuisines_by_id.remove(&model.id).unwrap_or_default();
                    let distance = distances_by_id.remove(&model.id);
                    Self::model_to_entity(model, cuisines, distance)
                })
                .collect::<Vec<_>>();

            Ok((results, total))
        })
        .await?
    }

    async fn save(&self, restaurant: &Restaurant) -> AppResult<Restaurant> {
        let db = Arc::clone(&self.db);
        let new_model = Self::entity_to_new_model(restaurant)?;
        let changes = Self::entity_to_changeset(restaurant)?;
        let cuisine_names = restaurant
            .cuisines
            .iter()
            .map(|c| c.name.clone())
            .collect::<Vec<_>>();

        task::spawn_blocking(move || -> AppResult<Restaurant> {
            let mut conn = db.get_connection()?;

            conn.transaction::<Restaurant, AppError, _>(|conn| {
                // Name is the import identity, so repeated imports update
                // in place instead of duplicating rows.
                let saved = diesel::insert_into(restaurants::table)
                    .values(&new_model)
                    .on_conflict(restaurants::name)
                    .do_update()
                    .set(&changes)
                    .get_result::<RestaurantModel>(conn)?;

                diesel::delete(
                    restaurant_cuisines::table
                        .filter(restaurant_cuisines::restaurant_id.eq(saved.id)),
                )
                .execute(conn)?;

                let mut linked = Vec::with_capacity(cuisine_names.len());
                for name in &cuisine_names {
                    let cuisine_id = diesel::insert_into(cuisines::table)
                        .values(&NewCuisine {
                            id: Uuid::new_v4(),
                            name: name.clone(),
                        })
                        .on_conflict(cuisines::name)
                        .do_update()
                        .set(cuisines::name.eq(name))
                        .returning(cuisines::id)
                        .get_result::<Uuid>(conn)?;

                    diesel::insert_into(restaurant_cuisines::table)
                        .values(NewRestaurantCuisine {
                            restaurant_id: saved.id,
                            cuisine_id,
                        })
                        .on_conflict_do_nothing()
                        .execute(conn)?;

                    linked.push(Cuisine {
                        id: cuisine_id,
                        name: name.clone(),
                    });
                }

                Ok(Self::model_to_entity(saved, linked, None))
            })
        })
        .await?
    }
}
