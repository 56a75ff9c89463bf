use std::net::SocketAddr;

use reqwest::Client;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;

use crud_server::config::{AppConfig, CorsConfig, DatabaseConfig, ServerConfig};
use crud_server::state::AppState;

pub mod routes {
    pub const BLOGS: &str = "/api/blogs";
    pub const NOTES: &str = "/api/notes";
    pub const PERSONS: &str = "/api/persons";
    pub const INFO: &str = "/info";

    pub fn blog(id: &str) -> String {
        format!("/api/blogs/{id}")
    }

    pub fn note(id: &str) -> String {
        format!("/api/notes/{id}")
    }

    pub fn person(id: &str) -> String {
        format!("/api/persons/{id}")
    }
}

/// Well-formed id that no record will ever have.
pub fn missing_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// A running test server backed by a private in-memory SQLite database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub content_type: Option<String>,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // One connection only: every new SQLite in-memory connection is a fresh database.
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts)
            .await
            .expect("Failed to open in-memory database");
        crud_server::database::create_tables(&db)
            .await
            .expect("Failed to create tables");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
            },
        };

        let state = AppState {
            db: db.clone(),
            config: app_config,
        };

        let app = crud_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// List a collection and return its elements.
    pub async fn list(&self, path: &str) -> Vec<Value> {
        let res = self.get(path).await;
        assert_eq!(res.status, 200, "list {path} failed: {}", res.text);
        res.body
            .as_array()
            .expect("list response should be an array")
            .clone()
    }

    /// Create a record via the API and return its `id`.
    pub async fn create(&self, path: &str, body: Value) -> String {
        let res = self.post(path, &body).await;
        assert_eq!(res.status, 201, "create {path} failed: {}", res.text);
        res.id()
    }

    pub async fn seed_blogs(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for (title, author, url, likes) in [
            ("My first blog", "John Doe", "http://www.johndoe.com", 10),
            (
                "Successful blog",
                "Alejandro Diaz Crivelli",
                "https://github.com/diazale16",
                16112001,
            ),
        ] {
            ids.push(
                self.create(
                    routes::BLOGS,
                    serde_json::json!({
                        "title": title,
                        "author": author,
                        "url": url,
                        "likes": likes,
                    }),
                )
                .await,
            );
        }
        ids
    }

    pub async fn seed_notes(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for (content, important) in [
            ("HTML is easy", false),
            ("Browser can execute only JavaScript", true),
        ] {
            ids.push(
                self.create(
                    routes::NOTES,
                    serde_json::json!({ "content": content, "important": important }),
                )
                .await,
            );
        }
        ids
    }

    pub async fn seed_persons(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for (name, number) in [("Arto Hellas", "040-1234567"), ("Ada Lovelace", "39-4453235")] {
            ids.push(
                self.create(
                    routes::PERSONS,
                    serde_json::json!({ "name": name, "number": number }),
                )
                .await,
            );
        }
        ids
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let content_type = res
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            content_type,
            text,
            body,
        }
    }

    pub fn id(&self) -> String {
        self.body["id"]
            .as_str()
            .expect("response body should contain a string 'id'")
            .to_string()
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("application/json"))
    }
}
