//! End-to-end behaviour through the full router against the in-memory store.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use campground::middleware::MethodOverride;
use campground::{
    build_app, AppState, Campground, CampgroundDetail, CampgroundInput, CampgroundStore,
    MemoryStore, Review, ReviewInput, StoreError,
};
use tower::ServiceExt;
use uuid::Uuid;

type App = MethodOverride<Router>;

fn app() -> (App, MemoryStore) {
    let store = MemoryStore::new();
    (build_app(AppState::new(store.clone())), store)
}

async fn send(app: &App, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn location(response: &Response) -> String {
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn create_pine_ridge(app: &App) -> Uuid {
    let response = send(app, post_form("/campgrounds", "title=Pine+Ridge&location=CO&price=25")).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    let loc = location(&response);
    let id = loc.strip_prefix("/campgrounds/").unwrap();
    Uuid::parse_str(id).unwrap()
}

#[tokio::test]
async fn pine_ridge_scenario() {
    let (app, store) = app();

    let id = create_pine_ridge(&app).await;
    let detail_path = format!("/campgrounds/{}", id);

    let response = send(&app, get(&detail_path)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Pine Ridge"));

    let response = send(
        &app,
        post_form(&format!("{}/reviews", detail_path), "rating=5&body=Great"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), detail_path);

    let campground = store.find_campground(id).await.unwrap().unwrap();
    assert_eq!(campground.reviews.len(), 1);
}

#[tokio::test]
async fn create_with_missing_fields_lists_every_violation() {
    let (app, store) = app();

    let response = send(&app, post_form("/campgrounds", "description=nothing+else")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert_eq!(body.matches("is required").count(), 3, "{}", body);
    assert!(body.contains("location"));
    assert!(body.contains("price"));
    assert_eq!(store.campground_count().await, 0);
}

#[tokio::test]
async fn valid_create_persists_exactly_one_record() {
    let (app, store) = app();

    let id = create_pine_ridge(&app).await;
    assert_eq!(store.campground_count().await, 1);
    let stored = store.find_campground(id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Pine Ridge");
    assert_eq!(stored.location, "CO");
    assert_eq!(stored.price, 25.0);
}

#[tokio::test]
async fn show_resolves_reviews() {
    let (app, store) = app();
    let id = create_pine_ridge(&app).await;
    let review = store
        .create_review(id, ReviewInput { rating: 4, body: "Windy but lovely".into() })
        .await
        .unwrap()
        .unwrap();

    let response = send(&app, get(&format!("/campgrounds/{}", id))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Windy but lovely"));
    assert!(body.contains(&review.id.to_string()));
}

#[tokio::test]
async fn delete_campground_removes_its_reviews() {
    let (app, store) = app();
    let id = create_pine_ridge(&app).await;
    let first = store
        .create_review(id, ReviewInput { rating: 5, body: "One".into() })
        .await
        .unwrap()
        .unwrap();
    let second = store
        .create_review(id, ReviewInput { rating: 3, body: "Two".into() })
        .await
        .unwrap()
        .unwrap();

    let response = send(&app, post_form(&format!("/campgrounds/{}?_method=DELETE", id), "")).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/campgrounds");

    assert!(store.find_review(first.id).await.unwrap().is_none());
    assert!(store.find_review(second.id).await.unwrap().is_none());
    assert_eq!(store.review_count().await, 0);

    let response = send(&app, get(&format!("/campgrounds/{}", id))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Campground Not Found"));
}

#[tokio::test]
async fn delete_review_detaches_and_removes_it() {
    let (app, store) = app();
    let id = create_pine_ridge(&app).await;
    let keep = store
        .create_review(id, ReviewInput { rating: 5, body: "Keep".into() })
        .await
        .unwrap()
        .unwrap();
    let dropped = store
        .create_review(id, ReviewInput { rating: 1, body: "Drop".into() })
        .await
        .unwrap()
        .unwrap();

    let response = send(
        &app,
        post_form(
            &format!("/campgrounds/{}/reviews/{}?_method=DELETE", id, dropped.id),
            "",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), format!("/campgrounds/{}", id));

    let campground = store.find_campground(id).await.unwrap().unwrap();
    assert_eq!(campground.reviews, vec![keep.id]);
    assert!(store.find_review(dropped.id).await.unwrap().is_none());

    let again = send(
        &app,
        post_form(
            &format!("/campgrounds/{}/reviews/{}?_method=DELETE", id, dropped.id),
            "",
        ),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_review_is_rejected_before_the_store() {
    let (app, store) = app();
    let id = create_pine_ridge(&app).await;

    let response = send(
        &app,
        post_form(&format!("/campgrounds/{}/reviews", id), "rating=9&body="),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert!(body.contains("must be less than or equal to 5"));
    assert!(body.contains("is not allowed to be empty"));
    assert_eq!(store.review_count().await, 0);
}

#[tokio::test]
async fn review_for_unknown_campground_is_404() {
    let (app, store) = app();
    let response = send(
        &app,
        post_form(&format!("/campgrounds/{}/reviews", Uuid::new_v4()), "rating=5&body=Hi"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.review_count().await, 0);
}

#[tokio::test]
async fn update_through_method_override() {
    let (app, store) = app();
    let id = create_pine_ridge(&app).await;
    let path = format!("/campgrounds/{}?_method=PUT", id);

    let response = send(&app, post_form(&path, "title=Aspen+Flats&location=UT&price=30")).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), format!("/campgrounds/{}", id));
    let stored = store.find_campground(id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Aspen Flats");
    assert_eq!(stored.price, 30.0);

    let response = send(&app, post_form(&path, "title=&location=UT&price=-4")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let stored = store.find_campground(id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Aspen Flats");
}

#[tokio::test]
async fn unknown_or_malformed_ids_are_404() {
    let (app, _) = app();
    for path in [
        format!("/campgrounds/{}", Uuid::new_v4()),
        format!("/campgrounds/{}/edit", Uuid::new_v4()),
        "/campgrounds/not-an-id".to_string(),
    ] {
        let response = send(&app, get(&path)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", path);
        assert!(body_text(response).await.contains("Campground Not Found"));
    }

    let response = send(
        &app,
        post_form(
            &format!("/campgrounds/{}?_method=PUT", Uuid::new_v4()),
            "title=A&location=B&price=1",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn undecodable_path_segment_renders_the_error_view() {
    let (app, store) = app();
    let id = create_pine_ridge(&app).await;

    for path in [
        "/campgrounds/%FF".to_string(),
        "/campgrounds/%FF/edit".to_string(),
    ] {
        let response = send(&app, get(&path)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", path);
        let body = body_text(response).await;
        assert!(body.contains("Campground Not Found"), "{}", body);
        assert!(body.contains("<h1>404</h1>"), "{}", body);
        assert!(!body.contains("Invalid URL"), "{}", body);
    }

    let response = send(
        &app,
        post_form(&format!("/campgrounds/{}/reviews/%FF?_method=DELETE", id), ""),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("<h1>404</h1>"));
    assert_eq!(store.campground_count().await, 1);
}

#[tokio::test]
async fn undefined_routes_are_page_not_found() {
    let (app, _) = app();

    let response = send(&app, get("/nowhere/at/all")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page Not Found"));

    let patch = Request::builder()
        .method("PATCH")
        .uri("/campgrounds")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, patch).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page Not Found"));
}

#[tokio::test]
async fn pages_render() {
    let (app, _) = app();
    let id = create_pine_ridge(&app).await;

    for path in [
        "/".to_string(),
        "/campgrounds".to_string(),
        "/campgrounds/new".to_string(),
        format!("/campgrounds/{}/edit", id),
    ] {
        let response = send(&app, get(&path)).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", path);
    }

    let listing = body_text(send(&app, get("/campgrounds")).await).await;
    assert!(listing.contains(&format!("/campgrounds/{}", id)));
}

#[tokio::test]
async fn health_and_readiness() {
    let (app, _) = app();
    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, r#"{"status":"ok"}"#);

    let response = send(&app, get("/ready")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Store whose every operation fails, for the 500 path.
struct BrokenStore;

fn down() -> StoreError {
    StoreError::Unavailable("connection refused".into())
}

#[async_trait]
impl CampgroundStore for BrokenStore {
    async fn list_campgrounds(&self) -> Result<Vec<Campground>, StoreError> {
        Err(down())
    }
    async fn find_campground(&self, _: Uuid) -> Result<Option<Campground>, StoreError> {
        Err(down())
    }
    async fn find_campground_with_reviews(
        &self,
        _: Uuid,
    ) -> Result<Option<CampgroundDetail>, StoreError> {
        Err(down())
    }
    async fn create_campground(&self, _: CampgroundInput) -> Result<Campground, StoreError> {
        Err(down())
    }
    async fn update_campground(
        &self,
        _: Uuid,
        _: CampgroundInput,
    ) -> Result<Option<Campground>, StoreError> {
        Err(down())
    }
    async fn delete_campground(&self, _: Uuid) -> Result<Option<Campground>, StoreError> {
        Err(down())
    }
    async fn create_review(&self, _: Uuid, _: ReviewInput) -> Result<Option<Review>, StoreError> {
        Err(down())
    }
    async fn delete_review(&self, _: Uuid, _: Uuid) -> Result<Option<Review>, StoreError> {
        Err(down())
    }
    async fn find_review(&self, _: Uuid) -> Result<Option<Review>, StoreError> {
        Err(down())
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(down())
    }
}

#[tokio::test]
async fn store_failures_are_presented_as_500() {
    let app = build_app(AppState::new(BrokenStore));

    let response = send(&app, get("/campgrounds")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert!(body.contains("Oh No, Something Went Wrong!"));
    assert!(!body.contains("connection refused"));

    let response = send(&app, post_form("/campgrounds", "title=A&location=B&price=1")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = send(&app, get("/ready")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
