mod common;

use common::{login, spawn_app, TestApp, ADMIN_USERNAME};
use serde_json::{json, Value};

fn camera_sheet() -> Value {
    json!({
        "camera": "50 MP, f/1.7, 24mm (wide)",
        "features": "LED flash, HDR, panorama",
        "video": "4K@30/60fps",
    })
}

async fn seed_phone(app: &TestApp, model_name: &str) -> (i64, i64, i64) {
    let image_id = app.seed_image().await;
    let brand_id = app.seed_brand("Xiaomi").await;
    let mobile = app.seed_mobile(brand_id, image_id, model_name).await;
    (mobile["id"].as_i64().unwrap(), brand_id, image_id)
}

#[tokio::test]
async fn test_admin_requires_token() {
    let app = spawn_app().await;

    let response = app.get("/admin/brand").await;
    assert_eq!(response.status(), 401);

    let response = app
        .client
        .get(app.url("/admin/brand"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let app = spawn_app().await;

    let response = login(&app.client, &app.base_url, ADMIN_USERNAME, "wrong").await;
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_admin_index_lists_models() {
    let app = spawn_app().await;

    let body: Value = app.admin_get("/admin").await.json().await.unwrap();
    assert_eq!(body["site_header"], "mobile store");
    assert_eq!(body["index_title"], "admin store");
    let names: Vec<&str> = body["models"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"mobile"));
    assert!(names.contains(&"main_camera"));
}

#[tokio::test]
async fn test_slug_is_suggested_from_model_name() {
    let app = spawn_app().await;

    let body: Value = app
        .admin_get("/admin/slugify?model_name=Redmi%20Note%2013%20Pro%2B")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["slug"], "redmi-note-13-pro");

    let (mobile_id, _, _) = seed_phone(&app, "Redmi Note 13").await;
    let body: Value = app
        .admin_get(&format!("/admin/mobile/{mobile_id}"))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["mobile"]["slug"], "redmi-note-13");
}

#[tokio::test]
async fn test_duplicate_model_name_and_slug_fail_validation() {
    let app = spawn_app().await;
    let (_, brand_id, image_id) = seed_phone(&app, "Poco F6").await;

    let duplicate = app
        .admin_post(
            "/admin/mobile",
            &TestApp::mobile_payload(brand_id, image_id, "Poco F6"),
        )
        .await;
    assert_eq!(duplicate.status(), 400);
    let body: Value = duplicate.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("model name"));

    let mut payload = TestApp::mobile_payload(brand_id, image_id, "Poco F6 Pro");
    payload["slug"] = json!("poco-f6");
    let duplicate_slug = app.admin_post("/admin/mobile", &payload).await;
    assert_eq!(duplicate_slug.status(), 400);
    let body: Value = duplicate_slug.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("slug"));

    payload["slug"] = json!("not a slug");
    let invalid_slug = app.admin_post("/admin/mobile", &payload).await;
    assert_eq!(invalid_slug.status(), 400);
}

#[tokio::test]
async fn test_patch_keeps_own_slug_but_rejects_taken_one() {
    let app = spawn_app().await;
    let (first_id, brand_id, image_id) = seed_phone(&app, "Mi 11").await;
    app.seed_mobile(brand_id, image_id, "Mi 12").await;

    let same = app
        .admin_patch(
            &format!("/admin/mobile/{first_id}"),
            &json!({ "slug": "mi-11", "ram": 12 }),
        )
        .await;
    assert_eq!(same.status(), 200);
    let body: Value = same.json().await.unwrap();
    assert_eq!(body["ram"], 12);

    let taken = app
        .admin_patch(&format!("/admin/mobile/{first_id}"), &json!({ "slug": "mi-12" }))
        .await;
    assert_eq!(taken.status(), 400);
}

#[tokio::test]
async fn test_inline_edit_is_atomic() {
    let app = spawn_app().await;
    let (mobile_id, _, _) = seed_phone(&app, "Mi 13").await;

    let response = app
        .admin_patch(
            "/admin/mobile",
            &json!([
                { "id": mobile_id, "inventory": false },
                { "id": 9999, "inventory": false },
            ]),
        )
        .await;
    assert_eq!(response.status(), 404);

    let rows: Value = app.admin_get("/admin/mobile").await.json().await.unwrap();
    assert_eq!(rows[0]["inventory"], true);

    let response = app
        .admin_patch("/admin/mobile", &json!([{ "id": mobile_id, "inventory": false }]))
        .await;
    assert_eq!(response.status(), 200);

    let rows: Value = app
        .admin_get("/admin/mobile?inventory=false")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["model_name"], "Mi 13");
    assert_eq!(rows[0]["brand"], "Xiaomi");
}

#[tokio::test]
async fn test_mobile_list_filters() {
    let app = spawn_app().await;
    let (_, brand_id, image_id) = seed_phone(&app, "Mi 14").await;
    let other_brand = app.seed_brand("Sony").await;
    let mut payload = TestApp::mobile_payload(other_brand, image_id, "Xperia 1 V");
    payload["release_date"] = json!("2023-05-11");
    assert_eq!(app.admin_post("/admin/mobile", &payload).await.status(), 201);

    let by_brand: Value = app
        .admin_get(&format!("/admin/mobile?brand_id={brand_id}"))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(by_brand.as_array().unwrap().len(), 1);
    assert_eq!(by_brand[0]["model_name"], "Mi 14");

    let by_year: Value = app
        .admin_get("/admin/mobile?release_year=2023")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(by_year.as_array().unwrap().len(), 1);
    assert_eq!(by_year[0]["model_name"], "Xperia 1 V");

    let by_date: Value = app
        .admin_get("/admin/mobile?release_date=2024-03-01")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(by_date.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_color_hex_is_derived_from_name() {
    let app = spawn_app().await;
    let image_id = app.seed_image().await;

    let red: Value = app
        .admin_post(
            "/admin/color",
            &json!({ "model_name": "Galaxy S24", "color": "Red", "image_id": image_id }),
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(red["hex_code"], "#FF0000");

    let unknown: Value = app
        .admin_post(
            "/admin/color",
            &json!({ "model_name": "Galaxy S24", "color": "Titanium Violet", "image_id": image_id }),
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(unknown["hex_code"], "#000000");

    let explicit: Value = app
        .admin_post(
            "/admin/color",
            &json!({ "model_name": "Galaxy S24", "color": "Amber", "image_id": image_id, "hex_code": "#ffbf00" }),
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(explicit["hex_code"], "#FFBF00");

    let renamed: Value = app
        .admin_patch(
            &format!("/admin/color/{}", red["id"]),
            &json!({ "color": "navy" }),
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(renamed["hex_code"], "#000080");

    let invalid = app
        .admin_post(
            "/admin/color",
            &json!({ "model_name": "Galaxy S24", "color": "Red", "image_id": image_id, "hex_code": "red" }),
        )
        .await;
    assert_eq!(invalid.status(), 400);
}

#[tokio::test]
async fn test_delete_mobile_cascades() {
    let app = spawn_app().await;
    let (mobile_id, _, image_id) = seed_phone(&app, "Mi 11 Lite").await;

    let color: Value = app
        .admin_post(
            "/admin/color",
            &json!({ "model_name": "Mi 11 Lite", "color": "black", "image_id": image_id }),
        )
        .await
        .json()
        .await
        .unwrap();
    let linked = app
        .admin_patch(
            &format!("/admin/mobile/{mobile_id}"),
            &json!({ "colors": [color["id"]] }),
        )
        .await;
    assert_eq!(linked.status(), 200);

    let memory = app
        .admin_put(
            &format!("/admin/memory/{mobile_id}"),
            &json!({ "external": true, "internal": "128GB 6GB RAM" }),
        )
        .await;
    assert_eq!(memory.status(), 201);
    let sound = app
        .admin_put(
            &format!("/admin/sound/{mobile_id}"),
            &json!({ "speaker_type": "Stereo speakers", "jack_35mm": true }),
        )
        .await;
    assert_eq!(sound.status(), 201);
    let sheets = [
        (
            "network",
            json!({
                "technology": "GSM / LTE / 5G",
                "bands_2g": "850 900 1800 1900",
                "bands_3g": "HSDPA 850 900 2100",
                "bands_4g": "1, 3, 5, 7, 8, 20, 28, 38, 40, 41",
                "bands_5g": "1, 3, 5, 7, 8, 28, 38, 41, 77, 78",
                "speed": "HSPA, LTE-A, 5G",
            }),
        ),
        (
            "body",
            json!({
                "dimensions": "160.5 x 75 x 6.8 mm",
                "weight": "159 g",
                "build": "Glass front, plastic frame",
                "sim": "Nano-SIM",
            }),
        ),
        (
            "display",
            json!({ "type_display": "AMOLED, 90Hz", "resolution": "1080 x 2400", "refresh_rate": "90Hz" }),
        ),
        (
            "function",
            json!({
                "os": "Android 11, MIUI 12",
                "cpu": "Octa-core",
                "gpu": "Adreno 618",
                "chipset": "Snapdragon 732G",
            }),
        ),
        (
            "battery",
            json!({
                "battery_type": "Li-Po 4250 mAh",
                "charging": "33W wired",
                "fast_charge": true,
                "charge_time": "65 min",
                "max_wattage": "33W",
            }),
        ),
        (
            "other_features",
            json!({ "nfc": true, "simcard": "Dual SIM", "wifi": "Wi-Fi 802.11 a/b/g/n/ac", "sensors": "Fingerprint, accelerometer" }),
        ),
    ];
    for (kind, body) in &sheets {
        let response = app
            .admin_put(&format!("/admin/{kind}/{mobile_id}"), body)
            .await;
        assert_eq!(response.status(), 201, "{kind}");
    }
    let gallery = app
        .admin_post(
            "/admin/gallery_image",
            &json!({ "mobile_id": mobile_id, "image_id": image_id }),
        )
        .await;
    assert_eq!(gallery.status(), 201);

    let response = app.admin_delete(&format!("/admin/mobile/{mobile_id}")).await;
    assert_eq!(response.status(), 204);

    assert_eq!(
        app.admin_get(&format!("/admin/mobile/{mobile_id}")).await.status(),
        404
    );
    assert_eq!(
        app.admin_get(&format!("/admin/memory/{mobile_id}")).await.status(),
        404
    );
    assert_eq!(
        app.admin_get(&format!("/admin/sound/{mobile_id}")).await.status(),
        404
    );
    for (kind, _) in &sheets {
        assert_eq!(
            app.admin_get(&format!("/admin/{kind}/{mobile_id}")).await.status(),
            404,
            "{kind}"
        );
    }
    let gallery: Value = app
        .admin_get(&format!("/admin/gallery_image?mobile_id={mobile_id}"))
        .await
        .json()
        .await
        .unwrap();
    assert!(gallery.as_array().unwrap().is_empty());

    // the color itself survives, only the link goes
    assert_eq!(
        app.admin_get(&format!("/admin/color/{}", color["id"])).await.status(),
        200
    );
}

#[tokio::test]
async fn test_camera_sheets_protect_mobile() {
    let app = spawn_app().await;
    let (mobile_id, _, _) = seed_phone(&app, "Mi 10T").await;

    let main = app
        .admin_put(&format!("/admin/main_camera/{mobile_id}"), &camera_sheet())
        .await;
    assert_eq!(main.status(), 201);
    let selfie = app
        .admin_put(&format!("/admin/selfie_camera/{mobile_id}"), &camera_sheet())
        .await;
    assert_eq!(selfie.status(), 201);

    let blocked = app.admin_delete(&format!("/admin/mobile/{mobile_id}")).await;
    assert_eq!(blocked.status(), 409);
    let body: Value = blocked.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("main camera"));
    assert!(message.contains("selfie camera"));

    assert_eq!(
        app.admin_delete(&format!("/admin/main_camera/{mobile_id}")).await.status(),
        204
    );
    let still_blocked = app.admin_delete(&format!("/admin/mobile/{mobile_id}")).await;
    assert_eq!(still_blocked.status(), 409);

    assert_eq!(
        app.admin_delete(&format!("/admin/selfie_camera/{mobile_id}")).await.status(),
        204
    );
    let deleted = app.admin_delete(&format!("/admin/mobile/{mobile_id}")).await;
    assert_eq!(deleted.status(), 204);
}

#[tokio::test]
async fn test_put_sheet_replaces_existing() {
    let app = spawn_app().await;
    let (mobile_id, _, _) = seed_phone(&app, "Mi 9").await;
    let path = format!("/admin/body/{mobile_id}");

    let body = json!({
        "dimensions": "157.5 x 74.7 x 7.6 mm",
        "weight": "173 g",
        "build": "Glass front, glass back",
        "sim": "Dual SIM",
    });
    assert_eq!(app.admin_put(&path, &body).await.status(), 201);

    let mut replaced = body.clone();
    replaced["weight"] = json!("175 g");
    let response = app.admin_put(&path, &replaced).await;
    assert_eq!(response.status(), 200);

    let sheet: Value = app.admin_get(&path).await.json().await.unwrap();
    assert_eq!(sheet["weight"], "175 g");
    assert_eq!(sheet["mobile_id"], mobile_id);

    let all: Value = app.admin_get("/admin/body").await.json().await.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 1);

    let orphan = app.admin_put("/admin/body/9999", &body).await;
    assert_eq!(orphan.status(), 404);
}

#[tokio::test]
async fn test_brand_list_counts_and_delete() {
    let app = spawn_app().await;
    let image_id = app.seed_image().await;
    let busy = app.seed_brand("Huawei").await;
    let idle = app.seed_brand("Honor").await;
    app.seed_mobile(busy, image_id, "P60").await;
    let protected = app.seed_mobile(busy, image_id, "Mate 60").await;

    let page: Value = app
        .admin_get("/admin/brand?order=-mobile_count")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(page["count"], 2);
    assert_eq!(page["results"][0]["id"], busy);
    assert_eq!(page["results"][0]["mobile_count"], 2);
    assert_eq!(
        page["results"][0]["mobiles_url"],
        format!("/admin/mobile?brand_id={busy}")
    );
    assert_eq!(page["results"][1]["mobile_count"], 0);

    let filtered: Value = app
        .admin_get("/admin/brand?name=Honor")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(filtered["count"], 1);
    assert_eq!(filtered["results"][0]["id"], idle);

    let protected_id = protected["id"].as_i64().unwrap();
    app.admin_put(&format!("/admin/main_camera/{protected_id}"), &camera_sheet())
        .await;
    let blocked = app.admin_delete(&format!("/admin/brand/{busy}")).await;
    assert_eq!(blocked.status(), 409);

    let rows: Value = app.admin_get("/admin/mobile").await.json().await.unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);

    app.admin_delete(&format!("/admin/main_camera/{protected_id}"))
        .await;
    let deleted = app.admin_delete(&format!("/admin/brand/{busy}")).await;
    assert_eq!(deleted.status(), 204);

    let rows: Value = app.admin_get("/admin/mobile").await.json().await.unwrap();
    assert!(rows.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_brand_pagination() {
    let app = spawn_app().await;
    for i in 0..12 {
        app.seed_brand(&format!("Brand {i}")).await;
    }

    let first: Value = app.admin_get("/admin/brand").await.json().await.unwrap();
    assert_eq!(first["count"], 12);
    assert_eq!(first["num_pages"], 2);
    assert_eq!(first["results"].as_array().unwrap().len(), 10);

    let second: Value = app.admin_get("/admin/brand?page=2").await.json().await.unwrap();
    assert_eq!(second["results"].as_array().unwrap().len(), 2);
    assert_eq!(second["results"][0]["name"], "Brand 10");
}

#[tokio::test]
async fn test_brand_page_out_of_range() {
    let app = spawn_app().await;
    for i in 0..12 {
        app.seed_brand(&format!("Brand {i}")).await;
    }

    let past_end = app.admin_get("/admin/brand?page=3").await;
    assert_eq!(past_end.status(), 404);

    let huge = app
        .admin_get(&format!("/admin/brand?page={}", usize::MAX))
        .await;
    assert_eq!(huge.status(), 404);
    let body: Value = huge.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("out of range"));

    let empty: Value = spawn_app()
        .await
        .admin_get("/admin/brand?page=1")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(empty["num_pages"], 1);
    assert!(empty["results"].as_array().unwrap().is_empty());
}
