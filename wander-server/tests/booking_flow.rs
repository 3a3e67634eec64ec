//! Booking lifecycle and seat-accounting integration tests
//!
//! Runs against the in-memory SurrealDB engine; every test gets a fresh
//! database.

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

use wander_server::db::define_schema;
use wander_server::db::models::{Tour, TourCreate, UserId};
use wander_server::db::repository::{
    BookingRepository, RepoError, TourRepository, UserRepository,
};

async fn test_db() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.expect("in-memory db");
    db.use_ns("test").use_db("test").await.expect("namespace");
    define_schema(&db).await.expect("schema");
    db
}

fn sample_tour(max_participants: u32) -> TourCreate {
    TourCreate {
        title: "Caucasus Mountains".to_string(),
        date: "2026-09-12".to_string(),
        time: Some("08:00".to_string()),
        duration: "7 days".to_string(),
        price: 450.0,
        description: "A week of ridgelines and mountain lakes".to_string(),
        image: "/images/caucasus.jpg".to_string(),
        link: None,
        location: Some("Kazbegi".to_string()),
        max_participants,
        highlights: vec!["Gergeti glacier".to_string()],
        itinerary: vec![],
        included: vec!["Guide".to_string()],
        excluded: vec![],
    }
}

async fn confirmed_user(db: &Surreal<Db>, email: &str) -> UserId {
    let users = UserRepository::new(db.clone());
    users
        .register("Test User", email, "pw123", "111111")
        .await
        .expect("register");
    let user = users.confirm(email, "111111").await.expect("confirm");
    user.id.expect("user id")
}

async fn tour_by_id(db: &Surreal<Db>, id: &surrealdb::RecordId) -> Tour {
    let tours = TourRepository::new(db.clone());
    tours
        .find_by_id(&id.to_string())
        .await
        .expect("find tour")
        .expect("tour exists")
}

#[tokio::test]
async fn booking_increments_participants_and_snapshots_tour() {
    let db = test_db().await;
    let tours = TourRepository::new(db.clone());
    let bookings = BookingRepository::new(db.clone());

    let tour = tours.create(sample_tour(3)).await.expect("create tour");
    let tour_id = tour.id.clone().expect("tour id");
    assert_eq!(tour.current_participants, 0);

    let user = confirmed_user(&db, "ann@example.com").await;
    let booking = bookings.create(&user, &tour_id).await.expect("booking");

    assert!(!booking.paid);
    assert!(!booking.cancelled);
    assert_eq!(booking.guests, 1);
    assert_eq!(booking.price, 450.0);
    assert_eq!(booking.date, "2026-09-12");
    assert_eq!(booking.tour.title, "Caucasus Mountains");

    let after = tour_by_id(&db, &tour_id).await;
    assert_eq!(after.current_participants, 1);
}

#[tokio::test]
async fn booking_price_is_frozen_against_tour_edits() {
    let db = test_db().await;
    let tours = TourRepository::new(db.clone());
    let bookings = BookingRepository::new(db.clone());

    let tour = tours.create(sample_tour(3)).await.expect("create tour");
    let tour_id = tour.id.clone().expect("tour id");

    let user = confirmed_user(&db, "ann@example.com").await;
    bookings.create(&user, &tour_id).await.expect("booking");

    // Reprice the tour after the booking exists
    db.query("UPDATE $tour SET price = 999.0")
        .bind(("tour", tour_id.clone()))
        .await
        .expect("reprice");

    let listed = bookings.find_for_user(&user).await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].price, 450.0, "booking keeps the snapshot price");
    assert_eq!(listed[0].tour.price, 999.0, "tour projection shows the new price");
}

#[tokio::test]
async fn duplicate_booking_is_rejected() {
    let db = test_db().await;
    let tours = TourRepository::new(db.clone());
    let bookings = BookingRepository::new(db.clone());

    let tour = tours.create(sample_tour(5)).await.expect("create tour");
    let tour_id = tour.id.clone().expect("tour id");
    let user = confirmed_user(&db, "ann@example.com").await;

    bookings.create(&user, &tour_id).await.expect("first booking");
    let second = bookings.create(&user, &tour_id).await;

    assert!(matches!(second, Err(RepoError::Duplicate(_))));

    // Seat count must not move on the failed attempt
    let after = tour_by_id(&db, &tour_id).await;
    assert_eq!(after.current_participants, 1);
}

#[tokio::test]
async fn rebooking_after_cancel_succeeds() {
    let db = test_db().await;
    let tours = TourRepository::new(db.clone());
    let bookings = BookingRepository::new(db.clone());

    let tour = tours.create(sample_tour(5)).await.expect("create tour");
    let tour_id = tour.id.clone().expect("tour id");
    let user = confirmed_user(&db, "ann@example.com").await;

    let first = bookings.create(&user, &tour_id).await.expect("booking");
    bookings
        .cancel(&user, &first.id.expect("booking id"))
        .await
        .expect("cancel");

    let second = bookings.create(&user, &tour_id).await;
    assert!(second.is_ok(), "cancelled-then-rebooked must be allowed");

    let after = tour_by_id(&db, &tour_id).await;
    assert_eq!(after.current_participants, 1);
}

#[tokio::test]
async fn full_tour_rejects_booking_until_a_seat_frees_up() {
    let db = test_db().await;
    let tours = TourRepository::new(db.clone());
    let bookings = BookingRepository::new(db.clone());

    let tour = tours.create(sample_tour(1)).await.expect("create tour");
    let tour_id = tour.id.clone().expect("tour id");

    let ann = confirmed_user(&db, "ann@example.com").await;
    let bob = confirmed_user(&db, "bob@example.com").await;

    // Ann takes the only seat
    let anns = bookings.create(&ann, &tour_id).await.expect("ann books");
    assert_eq!(tour_by_id(&db, &tour_id).await.current_participants, 1);

    // Bob is turned away, state unchanged
    let bobs = bookings.create(&bob, &tour_id).await;
    assert!(matches!(bobs, Err(RepoError::Capacity(_))));
    assert_eq!(tour_by_id(&db, &tour_id).await.current_participants, 1);

    // Ann cancels, the seat frees up
    bookings
        .cancel(&ann, &anns.id.expect("booking id"))
        .await
        .expect("cancel");
    assert_eq!(tour_by_id(&db, &tour_id).await.current_participants, 0);

    // Now Bob gets in
    bookings.create(&bob, &tour_id).await.expect("bob books");
    assert_eq!(tour_by_id(&db, &tour_id).await.current_participants, 1);
}

#[tokio::test]
async fn second_cancel_is_not_found_and_never_double_decrements() {
    let db = test_db().await;
    let tours = TourRepository::new(db.clone());
    let bookings = BookingRepository::new(db.clone());

    let tour = tours.create(sample_tour(3)).await.expect("create tour");
    let tour_id = tour.id.clone().expect("tour id");
    let user = confirmed_user(&db, "ann@example.com").await;

    let booking = bookings.create(&user, &tour_id).await.expect("booking");
    let booking_id = booking.id.expect("booking id");

    bookings.cancel(&user, &booking_id).await.expect("cancel");
    assert_eq!(tour_by_id(&db, &tour_id).await.current_participants, 0);

    let again = bookings.cancel(&user, &booking_id).await;
    assert!(matches!(again, Err(RepoError::NotFound(_))));
    assert_eq!(
        tour_by_id(&db, &tour_id).await.current_participants,
        0,
        "seat counter must not go below zero"
    );
}

#[tokio::test]
async fn cancel_requires_ownership() {
    let db = test_db().await;
    let tours = TourRepository::new(db.clone());
    let bookings = BookingRepository::new(db.clone());

    let tour = tours.create(sample_tour(3)).await.expect("create tour");
    let tour_id = tour.id.clone().expect("tour id");

    let ann = confirmed_user(&db, "ann@example.com").await;
    let bob = confirmed_user(&db, "bob@example.com").await;

    let anns = bookings.create(&ann, &tour_id).await.expect("ann books");
    let booking_id = anns.id.expect("booking id");

    let result = bookings.cancel(&bob, &booking_id).await;
    assert!(matches!(result, Err(RepoError::NotFound(_))));

    // Ann's booking is untouched
    let listed = bookings.find_for_user(&ann).await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(tour_by_id(&db, &tour_id).await.current_participants, 1);
}

#[tokio::test]
async fn pay_flips_paid_and_respects_cancellation() {
    let db = test_db().await;
    let tours = TourRepository::new(db.clone());
    let bookings = BookingRepository::new(db.clone());

    let tour = tours.create(sample_tour(3)).await.expect("create tour");
    let tour_id = tour.id.clone().expect("tour id");
    let user = confirmed_user(&db, "ann@example.com").await;

    let booking = bookings.create(&user, &tour_id).await.expect("booking");
    let booking_id = booking.id.expect("booking id");

    let active = bookings
        .find_active(&booking_id)
        .await
        .expect("find")
        .expect("active booking");
    assert_eq!(active.user, user);
    assert!(!active.paid);

    let paid = bookings.mark_paid(&booking_id).await.expect("pay");
    assert!(paid.paid);

    // Re-paying an already-paid booking is a no-op
    let repaid = bookings.mark_paid(&booking_id).await.expect("re-pay");
    assert!(repaid.paid);

    // A paid booking can still be cancelled; the seat frees up and the
    // paid flag survives on the record
    bookings.cancel(&user, &booking_id).await.expect("cancel");
    assert_eq!(tour_by_id(&db, &tour_id).await.current_participants, 0);

    // But a cancelled booking is gone for pay purposes
    let gone = bookings.find_active(&booking_id).await.expect("find");
    assert!(gone.is_none());
    let pay_after_cancel = bookings.mark_paid(&booking_id).await;
    assert!(matches!(pay_after_cancel, Err(RepoError::NotFound(_))));
}

#[tokio::test]
async fn my_bookings_excludes_cancelled_and_orders_recent_first() {
    let db = test_db().await;
    let tours = TourRepository::new(db.clone());
    let bookings = BookingRepository::new(db.clone());

    let first_tour = tours.create(sample_tour(3)).await.expect("tour 1");
    let mut second = sample_tour(3);
    second.title = "Svaneti Trek".to_string();
    let second_tour = tours.create(second).await.expect("tour 2");
    let mut third = sample_tour(3);
    third.title = "Black Sea Coast".to_string();
    let third_tour = tours.create(third).await.expect("tour 3");

    let user = confirmed_user(&db, "ann@example.com").await;

    let a = bookings
        .create(&user, &first_tour.id.clone().expect("id"))
        .await
        .expect("booking a");
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    bookings
        .create(&user, &second_tour.id.clone().expect("id"))
        .await
        .expect("booking b");
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    bookings
        .create(&user, &third_tour.id.clone().expect("id"))
        .await
        .expect("booking c");

    bookings
        .cancel(&user, &a.id.expect("booking id"))
        .await
        .expect("cancel a");

    let listed = bookings.find_for_user(&user).await.expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].tour.title, "Black Sea Coast");
    assert_eq!(listed[1].tour.title, "Svaneti Trek");
    assert!(listed.iter().all(|b| !b.cancelled));
}

#[tokio::test]
async fn pay_by_non_owner_is_forbidden_and_leaves_paid_unchanged() {
    use std::sync::Arc;

    use axum::{Extension, Json, extract::Path, extract::State};
    use shared::client::PayRequest;
    use wander_server::api;
    use wander_server::auth::{CurrentUser, JwtConfig, JwtService};
    use wander_server::core::{Config, MailConfig, ServerState};
    use wander_server::services::LogMailer;
    use wander_server::utils::AppError;

    let db = test_db().await;
    let tours = TourRepository::new(db.clone());
    let bookings = BookingRepository::new(db.clone());

    let tour = tours.create(sample_tour(3)).await.expect("create tour");
    let tour_id = tour.id.clone().expect("tour id");

    let ann = confirmed_user(&db, "ann@example.com").await;
    let bob = confirmed_user(&db, "bob@example.com").await;

    let anns = bookings.create(&ann, &tour_id).await.expect("ann books");
    let booking_id = anns.id.expect("booking id");

    let config = Config {
        work_dir: "/tmp/wander-test".to_string(),
        http_port: 0,
        jwt: JwtConfig {
            secret: "integration-test-secret-key-0123456789".to_string(),
            expiration_minutes: 1440,
            issuer: "wander-server".to_string(),
            audience: "wander-clients".to_string(),
        },
        environment: "test".to_string(),
        request_timeout_ms: 30000,
        mail: MailConfig {
            server: "localhost".to_string(),
            port: 25,
            username: String::new(),
            password: String::new(),
            from: "Wander <no-reply@wander.example>".to_string(),
        },
        admin_email: None,
        admin_password: None,
    };
    let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
    let state = ServerState::new(config, db.clone(), jwt_service, Arc::new(LogMailer));

    let bob_ctx = CurrentUser {
        id: bob.to_string(),
        email: "bob@example.com".to_string(),
        is_admin: false,
    };

    let result = api::bookings::pay(
        State(state.clone()),
        Extension(bob_ctx),
        Path(booking_id.to_string()),
        Json(PayRequest::default()),
    )
    .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    // Ann's booking is still unpaid
    let active = bookings
        .find_active(&booking_id)
        .await
        .expect("find")
        .expect("booking still active");
    assert!(!active.paid);

    // The owner can pay it
    let ann_ctx = CurrentUser {
        id: ann.to_string(),
        email: "ann@example.com".to_string(),
        is_admin: false,
    };
    let paid = api::bookings::pay(
        State(state),
        Extension(ann_ctx),
        Path(booking_id.to_string()),
        Json(PayRequest::default()),
    )
    .await
    .expect("owner pays");
    let Json(envelope) = paid;
    assert!(envelope.data.expect("booking data").paid);
}

#[tokio::test]
async fn unknown_tour_is_not_found() {
    let db = test_db().await;
    let bookings = BookingRepository::new(db.clone());
    let user = confirmed_user(&db, "ann@example.com").await;

    let missing = surrealdb::RecordId::from_table_key("tour", "does-not-exist");
    let result = bookings.create(&user, &missing).await;
    assert!(matches!(result, Err(RepoError::NotFound(_))));
}
