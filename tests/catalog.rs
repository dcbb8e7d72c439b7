mod common;

use common::{spawn_app, TestApp};
use serde_json::{json, Value};

async fn mobile_detail(app: &TestApp, id: i64) -> Value {
    let response = app.admin_get(&format!("/admin/mobile/{id}")).await;
    assert_eq!(response.status(), 200);
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_empty_listing_renders() {
    let app = spawn_app().await;

    let response = app.get("/").await;
    assert_eq!(response.status(), 200);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let html = response.text().await.unwrap();
    assert!(html.contains("No mobiles available yet."));
}

#[tokio::test]
async fn test_listing_shows_mobiles_and_only_active_slides() {
    let app = spawn_app().await;
    let image_id = app.seed_image().await;
    let brand_id = app.seed_brand("Samsung").await;
    app.seed_mobile(brand_id, image_id, "Galaxy S24").await;

    let active = app
        .admin_post(
            "/admin/slider_image",
            &json!({ "title": "Summer Sale", "description": "Up to 20% off", "image_id": image_id }),
        )
        .await;
    assert_eq!(active.status(), 201);
    let inactive = app
        .admin_post(
            "/admin/slider_image",
            &json!({ "title": "Old Promo", "description": "Expired", "image_id": image_id, "is_active": false }),
        )
        .await;
    assert_eq!(inactive.status(), 201);

    let html = app.get("/").await.text().await.unwrap();
    assert!(html.contains("Galaxy S24"));
    assert!(html.contains("href=\"/mobile/galaxy-s24\""));
    assert!(html.contains("Summer Sale"));
    assert!(!html.contains("Old Promo"));
}

#[tokio::test]
async fn test_unknown_slug_is_not_found() {
    let app = spawn_app().await;

    let response = app.get("/mobile/does-not-exist").await;
    assert_eq!(response.status(), 404);
    let html = response.text().await.unwrap();
    assert!(html.contains("does-not-exist"));
}

#[tokio::test]
async fn test_detail_page_renders_product() {
    let app = spawn_app().await;
    let image_id = app.seed_image().await;
    let brand_id = app.seed_brand("Google").await;
    let mobile = app.seed_mobile(brand_id, image_id, "Pixel 8").await;
    let mobile_id = mobile["id"].as_i64().unwrap();

    let color = app
        .admin_post(
            "/admin/color",
            &json!({ "model_name": "Pixel 8", "color": "Hazel", "image_id": image_id }),
        )
        .await;
    let color_id = color.json::<Value>().await.unwrap()["id"].as_i64().unwrap();
    let linked = app
        .admin_patch(
            &format!("/admin/mobile/{mobile_id}"),
            &json!({ "colors": [color_id] }),
        )
        .await;
    assert_eq!(linked.status(), 200);

    let sheet = app
        .admin_put(
            &format!("/admin/network/{mobile_id}"),
            &json!({
                "technology": "GSM / HSPA / LTE / 5G",
                "bands_2g": "850 900 1800 1900",
                "bands_3g": "HSDPA",
                "bands_4g": "LTE",
                "bands_5g": "SA/NSA",
                "speed": "LTE-A",
            }),
        )
        .await;
    assert_eq!(sheet.status(), 201);

    let response = app.get("/mobile/pixel-8").await;
    assert_eq!(response.status(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("<h1>Pixel 8</h1>"));
    assert!(html.contains("Google"));
    assert!(html.contains("Hazel"));
    assert!(html.contains("GSM / HSPA / LTE / 5G"));
    assert!(!html.contains("Similar products"));
}

#[tokio::test]
async fn test_similar_products_are_capped_and_exclude_self() {
    let app = spawn_app().await;
    let image_id = app.seed_image().await;
    let apple = app.seed_brand("Apple").await;
    let nokia = app.seed_brand("Nokia").await;

    let mut ids = Vec::new();
    for name in ["iPhone 12", "iPhone 13", "iPhone 14", "iPhone 15", "iPhone 16"] {
        ids.push(app.seed_mobile(apple, image_id, name).await["id"].as_i64().unwrap());
    }
    app.seed_mobile(nokia, image_id, "Nokia G42").await;

    let detail = mobile_detail(&app, ids[2]).await;
    let similar: Vec<i64> = detail["similar"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect();
    assert_eq!(similar, vec![ids[0], ids[1], ids[3]]);

    let html = app.get("/mobile/iphone-14").await.text().await.unwrap();
    assert!(html.contains("Similar products"));
    assert!(html.contains("href=\"/mobile/iphone-12\""));
    assert!(!html.contains("href=\"/mobile/iphone-16\""));
    assert!(!html.contains("Nokia G42"));
}

#[tokio::test]
async fn test_similar_products_with_fewer_candidates() {
    let app = spawn_app().await;
    let image_id = app.seed_image().await;
    let brand = app.seed_brand("OnePlus").await;

    let first = app.seed_mobile(brand, image_id, "OnePlus 12").await;
    let second = app.seed_mobile(brand, image_id, "OnePlus 12R").await;

    let detail = mobile_detail(&app, first["id"].as_i64().unwrap()).await;
    let similar = detail["similar"].as_array().unwrap();
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0]["id"], second["id"]);
}
