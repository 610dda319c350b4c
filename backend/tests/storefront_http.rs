//! End-to-end HTTP tests running the real domain services over in-memory
//! repositories.

use actix_web::test::TestRequest;
use chrono::{DateTime, TimeDelta, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use uuid::Uuid;

use storefront::domain::{
    Festival, FestivalDraft, HeroBanner, HeroBannerDraft, Product, ProductDraft, ProductId,
    ProductName, Slug,
};
use storefront::test_support::{InMemoryProductRepository, InMemoryStorefrontContentRepository};

#[macro_use]
mod support;

use support::{Harness, fixture_now, send};

fn legacy_product(id: &str, name: &str, minutes_ago: i64) -> Product {
    let at = fixture_now() - TimeDelta::minutes(minutes_ago);
    Product::new(ProductDraft {
        id: ProductId::new(id).expect("valid id"),
        name: ProductName::new(name).expect("valid name"),
        slug: None,
        description: None,
        price_minor_units: 500,
        created_at: at,
        updated_at: at,
    })
    .expect("valid product")
}

fn festival(title: &str, slug: &str, starts_at: DateTime<Utc>, days: i64) -> Festival {
    Festival::new(FestivalDraft {
        id: Uuid::new_v4(),
        slug: Slug::new(slug).expect("valid slug"),
        title: title.to_owned(),
        description: None,
        starts_at,
        ends_at: starts_at + TimeDelta::days(days),
        banner_image_url: None,
    })
    .expect("valid festival")
}

fn banner(title: &str, position: i32, active: bool) -> HeroBanner {
    HeroBanner::new(HeroBannerDraft {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        subtitle: None,
        image_url: format!("https://cdn.example.test/{position}.jpg"),
        link_url: None,
        position,
        active,
    })
    .expect("valid banner")
}

#[fixture]
fn harness() -> Harness {
    Harness::new(
        InMemoryProductRepository::default(),
        InMemoryStorefrontContentRepository::default(),
    )
}

fn create(name: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/admin/products")
        .set_json(json!({ "name": name, "priceMinorUnits": 1250 }))
}

#[rstest]
#[actix_web::test]
async fn same_name_twice_gets_suffixed_slugs(harness: Harness) {
    let app = init_app!(harness);

    let first = send(&app, create("Rose Oil").to_request()).await;
    harness.clock.advance_seconds(1);
    let second = send(&app, create("rose   oil!").to_request()).await;

    assert_eq!(first.status, 201);
    assert_eq!(first.body["slug"], "rose-oil");
    assert_eq!(first.location.as_deref(), Some("/api/v1/products/rose-oil"));
    assert_eq!(second.status, 201);
    assert_eq!(second.body["slug"], "rose-oil-1");

    let fetched = send(
        &app,
        TestRequest::get()
            .uri("/api/v1/products/rose-oil-1")
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.body["id"], second.body["id"]);

    let listed = send(&app, TestRequest::get().uri("/api/v1/products").to_request()).await;
    let slugs: Vec<&str> = listed.body["products"]
        .as_array()
        .expect("products array")
        .iter()
        .filter_map(|product| product["slug"].as_str())
        .collect();
    assert_eq!(slugs, ["rose-oil", "rose-oil-1"]);
}

#[rstest]
#[actix_web::test]
async fn non_latin_names_keep_their_script(harness: Harness) {
    let app = init_app!(harness);

    let created = send(&app, create("عطر گل سرخ").to_request()).await;

    assert_eq!(created.status, 201);
    assert_eq!(created.body["slug"], "عطر-گل-سرخ");
}

#[rstest]
#[actix_web::test]
async fn location_of_non_latin_slug_is_followable(harness: Harness) {
    let app = init_app!(harness);

    let created = send(&app, create("گل رز").to_request()).await;

    assert_eq!(created.status, 201);
    let location = created.location.expect("ASCII location header");
    assert_eq!(location, "/api/v1/products/%DA%AF%D9%84-%D8%B1%D8%B2");

    let fetched = send(&app, TestRequest::get().uri(&location).to_request()).await;
    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.body["slug"], "گل-رز");
}

#[rstest]
#[actix_web::test]
async fn punctuation_only_name_falls_back_to_id_prefix(harness: Harness) {
    let app = init_app!(harness);

    let created = send(&app, create("?!*").to_request()).await;

    assert_eq!(created.status, 201);
    let id = created.body["id"].as_str().expect("id");
    let slug = created.body["slug"].as_str().expect("slug");
    assert_eq!(slug.chars().count(), 8);
    assert!(id.starts_with(slug));
}

#[rstest]
#[actix_web::test]
async fn renaming_keeps_the_published_slug(harness: Harness) {
    let app = init_app!(harness);
    let created = send(&app, create("Rose Oil").to_request()).await;
    let id = created.body["id"].as_str().expect("id").to_owned();
    harness.clock.advance_seconds(60);

    let updated = send(
        &app,
        TestRequest::patch()
            .uri(&format!("/api/v1/admin/products/{id}"))
            .set_json(json!({ "name": "Damask Rose Oil", "priceMinorUnits": 1500 }))
            .to_request(),
    )
    .await;

    assert_eq!(updated.status, 200);
    assert_eq!(updated.body["name"], "Damask Rose Oil");
    assert_eq!(updated.body["slug"], "rose-oil");
    assert_eq!(updated.body["priceMinorUnits"], 1500);
    assert_ne!(updated.body["updatedAt"], created.body["updatedAt"]);
}

#[rstest]
#[actix_web::test]
async fn backfill_assigns_slugs_in_creation_order() {
    let harness = Harness::new(
        InMemoryProductRepository::with_products([
            legacy_product("p3", "Rose Oil", 1),
            legacy_product("p1", "Rose Oil", 3),
            legacy_product("p2", "***", 2),
        ]),
        InMemoryStorefrontContentRepository::default(),
    );
    let app = init_app!(harness);

    let report = send(
        &app,
        TestRequest::post()
            .uri("/api/v1/admin/products/slugs/backfill")
            .to_request(),
    )
    .await;

    assert_eq!(report.status, 200);
    assert_eq!(
        report.body,
        json!({
            "assigned": 3,
            "entries": [
                { "id": "p1", "name": "Rose Oil", "slug": "rose-oil" },
                { "id": "p2", "name": "***", "slug": "p2" },
                { "id": "p3", "name": "Rose Oil", "slug": "rose-oil-1" }
            ]
        })
    );
    assert!(
        harness
            .products
            .snapshot()
            .iter()
            .all(|product| product.slug().is_some())
    );

    let rerun = send(
        &app,
        TestRequest::post()
            .uri("/api/v1/admin/products/slugs/backfill")
            .to_request(),
    )
    .await;
    assert_eq!(rerun.body["assigned"], 0);
}

#[rstest]
#[actix_web::test]
async fn unknown_slug_is_not_found_with_trace_id(harness: Harness) {
    let app = init_app!(harness);

    let missing = send(
        &app,
        TestRequest::get()
            .uri("/api/v1/products/no-such-thing")
            .to_request(),
    )
    .await;

    assert_eq!(missing.status, 404);
    assert_eq!(missing.body["code"], "not_found");
    assert_eq!(
        missing.body["traceId"].as_str(),
        missing.trace_id.as_deref()
    );
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_an_invalid_request(harness: Harness) {
    let app = init_app!(harness);

    let rejected = send(
        &app,
        TestRequest::post()
            .uri("/api/v1/admin/products")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\": ")
            .to_request(),
    )
    .await;

    assert_eq!(rejected.status, 400);
    assert_eq!(rejected.body["code"], "invalid_request");
    assert!(harness.products.snapshot().is_empty());
}

#[rstest]
#[actix_web::test]
async fn home_shows_running_festivals_and_active_banners() {
    let now = fixture_now();
    let content = InMemoryStorefrontContentRepository {
        festivals: vec![
            festival("Nowruz Sale", "nowruz-sale", now - TimeDelta::days(1), 7),
            festival("Summer Sale", "summer-sale", now + TimeDelta::days(60), 7),
        ],
        hero_banners: vec![
            banner("Second", 2, true),
            banner("Hidden", 0, false),
            banner("First", 1, true),
        ],
    };
    let harness = Harness::new(InMemoryProductRepository::default(), content);
    let app = init_app!(harness);

    let home = send(
        &app,
        TestRequest::get()
            .uri("/api/v1/storefront/home")
            .to_request(),
    )
    .await;

    assert_eq!(home.status, 200);
    let titles = |key: &str| -> Vec<Value> {
        home.body[key]
            .as_array()
            .expect("array")
            .iter()
            .map(|item| item["title"].clone())
            .collect()
    };
    assert_eq!(titles("heroBanners"), [json!("First"), json!("Second")]);
    assert_eq!(titles("festivals"), [json!("Nowruz Sale")]);
    assert_eq!(home.body["generatedAt"], now.to_rfc3339());
}
