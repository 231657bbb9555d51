use axum::{
    routing::{get, patch, post},
    Router,
};
use sqlx::SqlitePool;

use crate::repository::{
    FavoriteRepo, MealRepo, OrderRepo, PaymentRepo, RequestRepo, ReviewRepo, UserRepo,
};
use crate::workflow::RequestWorkflow;

mod favorites;
mod health;
mod meals;
mod orders;
mod payments;
mod requests;
mod reviews;
mod users;

/// Shared application state: the repositories and the workflow engine, all
/// built once from the process-wide pool.
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepo,
    pub meals: MealRepo,
    pub reviews: ReviewRepo,
    pub favorites: FavoriteRepo,
    pub orders: OrderRepo,
    pub payments: PaymentRepo,
    pub requests: RequestRepo,
    pub workflow: RequestWorkflow,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepo::new(pool.clone()),
            meals: MealRepo::new(pool.clone()),
            reviews: ReviewRepo::new(pool.clone()),
            favorites: FavoriteRepo::new(pool.clone()),
            orders: OrderRepo::new(pool.clone()),
            payments: PaymentRepo::new(pool.clone()),
            requests: RequestRepo::new(pool.clone()),
            workflow: RequestWorkflow::new(pool),
        }
    }
}

pub fn router(pool: SqlitePool) -> Router {
    let state = AppState::new(pool.clone());

    Router::new()
        // Liveness / readiness (no repositories required)
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(pool)
        .merge(
            Router::new()
                .route("/users", post(users::register).get(users::list))
                .route("/users/role/{email}", get(users::role))
                .route("/meals", get(meals::list).post(meals::create))
                .route("/meals/{id}", get(meals::find))
                .route("/reviews", get(reviews::list).post(reviews::create))
                .route("/favorites", post(favorites::add).get(favorites::list))
                .route("/orders", post(orders::place).get(orders::list))
                .route("/orders/status/{id}", patch(orders::set_status))
                .route("/orders/payment/{id}", patch(orders::mark_paid))
                .route("/payments", post(payments::record))
                .route("/requests", post(requests::submit).get(requests::list))
                .route("/requests/{id}", patch(requests::resolve))
                .with_state(state),
        )
}
