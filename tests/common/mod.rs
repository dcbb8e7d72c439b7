#![allow(dead_code)]

use reqwest::{multipart, Client, Response};
use serde_json::{json, Value};
use tempfile::TempDir;

use mobile_store::config::AppConfig;
use mobile_store::{create_app, prepare};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct-horse";
pub const FILE_SIZE_LIMIT: usize = 1024;

pub struct TestApp {
    pub base_url: String,
    pub client: Client,
    pub token: String,
    pub dir: TempDir,
}

/// Serves the app on an ephemeral port, backed by a fresh database and media directory.
pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        database_url: format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("store.db").display()
        ),
        secret: "integration-secret".to_string(),
        media_root: dir.path().join("media"),
        file_size_limit: FILE_SIZE_LIMIT,
        admin_username: ADMIN_USERNAME.to_string(),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        ..Default::default()
    };

    let db = prepare(&config).await.unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_app(db, config);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = Client::new();
    let base_url = format!("http://{addr}");
    let token = login(&client, &base_url, ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .json::<Value>()
        .await
        .unwrap()["token"]
        .as_str()
        .unwrap()
        .to_string();

    TestApp {
        base_url,
        client,
        token,
        dir,
    }
}

pub async fn login(client: &Client, base_url: &str, username: &str, password: &str) -> Response {
    client
        .post(format!("{base_url}/admin/login"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .unwrap()
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn admin_get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .bearer_auth(&self.token)
            .send()
            .await
            .unwrap()
    }

    pub async fn admin_post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn admin_put(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn admin_patch(&self, path: &str, body: &Value) -> Response {
        self.client
            .patch(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn admin_delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .bearer_auth(&self.token)
            .send()
            .await
            .unwrap()
    }

    pub async fn upload(&self, field: &str, mime: &str, bytes: Vec<u8>) -> Response {
        let part = multipart::Part::bytes(bytes)
            .file_name(format!("{field}.bin"))
            .mime_str(mime)
            .unwrap();
        let form = multipart::Form::new().part(field.to_string(), part);

        self.client
            .post(self.url("/admin/image"))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .unwrap()
    }

    pub async fn seed_image(&self) -> i64 {
        let response = self.upload("front", "image/png", b"not really a png".to_vec()).await;
        assert_eq!(response.status(), 201);
        let body: Value = response.json().await.unwrap();
        body["image"]["id"].as_i64().unwrap()
    }

    pub async fn seed_brand(&self, name: &str) -> i64 {
        let response = self.admin_post("/admin/brand", &json!({ "name": name })).await;
        assert_eq!(response.status(), 201);
        let body: Value = response.json().await.unwrap();
        body["id"].as_i64().unwrap()
    }

    pub fn mobile_payload(brand_id: i64, image_id: i64, model_name: &str) -> Value {
        json!({
            "brand_id": brand_id,
            "model_name": model_name,
            "description": format!("{model_name} description"),
            "inventory": true,
            "price": "499.99",
            "screen_size": "6.1 inch",
            "battery_capacity": "4500 mAh",
            "camera_resolution": "50 MP",
            "storage_capacity": "256 GB",
            "ram": 8,
            "operating_system": "Android 14",
            "image_default_id": image_id,
            "release_date": "2024-03-01",
        })
    }

    /// Creates a phone and returns its JSON record.
    pub async fn seed_mobile(&self, brand_id: i64, image_id: i64, model_name: &str) -> Value {
        let response = self
            .admin_post(
                "/admin/mobile",
                &Self::mobile_payload(brand_id, image_id, model_name),
            )
            .await;
        assert_eq!(response.status(), 201);
        response.json().await.unwrap()
    }
}
