pub mod auth;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod serializers;
pub mod state;

use axum::routing::{get, post};
use axum::Router;

pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/restaurants/", get(handlers::restaurants::list_restaurants))
        .route("/restaurants/nearest/", get(handlers::restaurants::nearest))
        .route(
            "/restaurants/persona_recommendations/",
            get(handlers::restaurants::persona_recommendations),
        )
        .route("/restaurants/search/", get(handlers::restaurants::search))
        .route("/restaurants/open_now/", get(handlers::restaurants::open_now))
        .route("/restaurants/:id/", get(handlers::restaurants::get_restaurant))
        .route("/cuisines/", get(handlers::cuisines::list_cuisines))
        .route("/cuisines/:id/", get(handlers::cuisines::get_cuisine))
        .route(
            "/user-restaurant-interactions/like_restaurant/",
            post(handlers::interactions::like_restaurant),
        )
        .route(
            "/user-restaurant-interactions/unlike_restaurant/",
            post(handlers::interactions::unlike_restaurant),
        )
        .route(
            "/user-restaurant-interactions/mark_visited/",
            post(handlers::interactions::mark_visited),
        )
        .route(
            "/user-restaurant-interactions/rate_restaurant/",
            post(handlers::interactions::rate_restaurant),
        )
        .route(
            "/user-restaurant-interactions/liked_restaurants/",
            get(handlers::interactions::liked_restaurants),
        )
        .route(
            "/user-restaurant-interactions/visited_restaurants/",
            get(handlers::interactions::visited_restaurants),
        )
        .route(
            "/user-preferences/me/",
            get(handlers::preferences::me)
                .put(handlers::preferences::update_me)
                .patch(handlers::preferences::update_me),
        )
        .route(
            "/user-preferences/add_favorite_cuisine/",
            post(handlers::preferences::add_favorite_cuisine),
        )
        .route(
            "/user-preferences/remove_favorite_cuisine/",
            post(handlers::preferences::remove_favorite_cuisine),
        )
        .with_state(state)
}
