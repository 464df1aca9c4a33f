use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use recipe_lab_server::config::Settings;
use recipe_lab_server::{app, db, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    // Holds the database file and upload directory
    _dir: TempDir,
}

impl TestApp {
    fn new() -> Self {
        std::env::set_var("INSECURE_PASSWORD_HASHING", "1");

        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db").display().to_string();
        let upload_dir = dir.path().join("uploads").display().to_string();

        let settings = Settings::from_lookup(|key| match key {
            "APP_CONFIG__DB__URL" => Some(db_path.clone()),
            "APP_CONFIG__UPLOADS__DIR" => Some(upload_dir.clone()),
            _ => None,
        })
        .unwrap();
        let pool = db::create_pool(&settings.db.url, 2, false).unwrap();

        Self {
            router: app(AppState::new(pool, settings)),
            _dir: dir,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    /// Registers and logs in, returning the access token.
    async fn login_as(&self, email: &str) -> String {
        let (status, _) = self
            .post(
                "/api/auth/register",
                None,
                json!({
                    "email": email,
                    "password": "long enough password",
                    "first_name": "Test",
                    "last_name": "Cook"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                json!({"email": email, "password": "long enough password"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "bearer");
        body["access_token"].as_str().unwrap().to_string()
    }

    async fn create_named(&self, resource: &str, name: &str) -> i64 {
        let (status, body) = self
            .post(&format!("/api/{resource}"), None, json!({"name": name}))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn hello_world() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Hello, World!"}));
}

#[tokio::test]
async fn register_login_me_logout() {
    let app = TestApp::new();
    let token = app.login_as("cook@example.com").await;

    let (status, me) = app
        .send(Method::GET, "/api/users/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "cook@example.com");
    assert!(me.get("hashed_password").is_none());

    let (status, _) = app
        .send(Method::POST, "/api/auth/logout", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .send(Method::GET, "/api/users/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_email_and_bad_credentials() {
    let app = TestApp::new();
    app.login_as("dup@example.com").await;

    let (status, _) = app
        .post(
            "/api/auth/register",
            None,
            json!({
                "email": "DUP@example.com",
                "password": "another password",
                "first_name": "Other",
                "last_name": "Cook"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "dup@example.com", "password": "wrong password"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, _) = app
        .post(
            "/api/auth/register",
            None,
            json!({
                "email": "short@example.com",
                "password": "short",
                "first_name": "Short",
                "last_name": "Pass"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn me_requires_a_token() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/users/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing Authorization header");

    let (status, _) = app
        .send(Method::GET, "/api/users/me", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn catalog_crud() {
    let app = TestApp::new();
    let id = app.create_named("cuisines", "Italian").await;

    let (status, _) = app
        .post("/api/cuisines", None, json!({"name": "Italian"}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.post("/api/cuisines", None, json!({"name": ""})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/cuisines/{id}"),
            None,
            Some(json!({"name": "Tuscan"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id, "name": "Tuscan"}));

    let (status, body) = app.get("/api/cuisines").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let uri = format!("/api/cuisines/{id}");
    let (status, _) = app.send(Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Cuisine not found");
    let (status, _) = app.send(Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recipe_lifecycle_and_ownership() {
    let app = TestApp::new();
    let author = app.login_as("author@example.com").await;
    let stranger = app.login_as("stranger@example.com").await;

    let cuisine = app.create_named("cuisines", "Italian").await;
    let gluten = app.create_named("allergens", "Gluten").await;
    let pasta = app.create_named("ingredients", "Pasta").await;

    let recipe = json!({
        "title": "Spaghetti Carbonara",
        "description": "Classic Roman pasta",
        "cooking_time": 30,
        "difficulty": 2,
        "cuisine_id": cuisine,
        "allergen_ids": [gluten, gluten],
        "ingredients": [{"ingredient_id": pasta, "quantity": 200.0, "measurement": 1}]
    });

    let (status, _) = app.post("/api/recipes", None, recipe.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, created) = app.post("/api/recipes", Some(&author), recipe).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["cuisine"]["name"], "Italian");
    assert_eq!(created["author"]["first_name"], "Test");
    assert_eq!(created["allergens"].as_array().unwrap().len(), 1);
    assert_eq!(created["ingredients"][0]["name"], "Pasta");
    assert_eq!(created["ingredients"][0]["measurement"], 1);

    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/recipes/{id}");

    let (status, fetched) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, _) = app
        .send(Method::PUT, &uri, Some(&stranger), Some(json!({"title": "Mine now"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = app
        .send(Method::PUT, &uri, Some(&author), Some(json!({"cooking_time": 25})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["cooking_time"], 25);
    assert_eq!(updated["title"], "Spaghetti Carbonara");

    let (status, _) = app
        .send(Method::PUT, &uri, Some(&author), Some(json!({"difficulty": 9})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app.send(Method::DELETE, &uri, Some(&stranger), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&author), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&author), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recipe_with_unknown_ingredient_is_not_created() {
    let app = TestApp::new();
    let author = app.login_as("author@example.com").await;

    let (status, body) = app
        .post(
            "/api/recipes",
            Some(&author),
            json!({
                "title": "Ghost soup",
                "description": "Nothing in it",
                "cooking_time": 5,
                "difficulty": 1,
                "ingredients": [{"ingredient_id": 999, "quantity": 1.0, "measurement": 2}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Ingredient not found");

    let (_, list) = app.get("/api/recipes").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn paginated_listing_filters_and_sorts() {
    let app = TestApp::new();
    let author = app.login_as("author@example.com").await;
    let cheese = app.create_named("ingredients", "Cheese").await;
    let oil = app.create_named("ingredients", "Olive oil").await;

    for (title, minutes, ingredient) in [
        ("Pizza Margherita", 45, cheese),
        ("Cheese Toast", 10, cheese),
        ("Green Salad", 15, oil),
    ] {
        let (status, _) = app
            .post(
                "/api/recipes",
                Some(&author),
                json!({
                    "title": title,
                    "description": "Tasty",
                    "cooking_time": minutes,
                    "difficulty": 1,
                    "ingredients": [{"ingredient_id": ingredient, "quantity": 10.0, "measurement": 1}]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = app.get("/api/recipes/paginated?size=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 3);
    assert_eq!(page["pages"], 2);
    assert_eq!(page["items"][0]["title"], "Green Salad");

    let (_, page) = app
        .get(&format!(
            "/api/recipes/paginated?ingredient_id={cheese}&sort=cooking_time"
        ))
        .await;
    let titles: Vec<_> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Cheese Toast", "Pizza Margherita"]);

    let (_, page) = app
        .get(&format!(
            "/api/recipes/paginated?ingredient_id={cheese}&ingredient_id={oil}&name__like=SALAD"
        ))
        .await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["title"], "Green Salad");

    let (status, _) = app.get("/api/recipes/paginated?size=500").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (status, _) = app.get("/api/recipes/paginated?page=0").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (status, _) = app
        .get("/api/recipes/paginated?page=9223372036854775807&size=100")
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn paginated_title_search_folds_cyrillic_case() {
    let app = TestApp::new();
    let author = app.login_as("author@example.com").await;

    let (status, _) = app
        .post(
            "/api/recipes",
            Some(&author),
            json!({
                "title": "Борщ Украинский",
                "description": "Свекла и капуста",
                "cooking_time": 90,
                "difficulty": 3
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // %D0%B1%D0%BE%D1%80%D1%89 is "борщ"
    let (status, page) = app
        .get("/api/recipes/paginated?name__like=%D0%B1%D0%BE%D1%80%D1%89")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["title"], "Борщ Украинский");
}

#[tokio::test]
async fn ingredient_recipes_projection() {
    let app = TestApp::new();
    let author = app.login_as("author@example.com").await;
    let tomato = app.create_named("ingredients", "Tomato").await;

    let (status, _) = app
        .post(
            "/api/recipes",
            Some(&author),
            json!({
                "title": "Tomato Soup",
                "description": "Warm",
                "cooking_time": 20,
                "difficulty": 1,
                "ingredients": [{"ingredient_id": tomato, "quantity": 3.0, "measurement": 2}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .get(&format!(
            "/api/ingredients/{tomato}/recipes?include=author&select=title,author"
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "title": "Tomato Soup",
            "author": {"id": 1, "first_name": "Test", "last_name": "Cook"}
        }])
    );

    let (status, _) = app.get("/api/ingredients/999/recipes").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn posts_crud() {
    let app = TestApp::new();

    let (status, post) = app
        .post(
            "/api/posts",
            None,
            json!({"title": "Welcome", "description": "First post"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/posts/{}", post["id"]);

    let (status, updated) = app
        .send(
            Method::PUT,
            &uri,
            None,
            Some(json!({"title": "Hello", "description": "Edited"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Hello");
    assert_eq!(updated["description"], "Edited");

    let (_, list) = app.get("/api/posts").await;
    assert_eq!(list, json!([updated]));

    let (status, _) = app.send(Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn multipart_request(filename: &str, data: &[u8]) -> Request<Body> {
    let boundary = "recipe-lab-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/api/uploads/images")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn image_upload_is_served_back() {
    let app = TestApp::new();

    let response = app
        .router
        .clone()
        .oneshot(multipart_request("dish.PNG", b"not really a png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/") && url.ends_with(".png"), "{url}");

    let response = app
        .router
        .clone()
        .oneshot(Request::get(url).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"not really a png");
}

#[tokio::test]
async fn image_upload_rejects_other_extensions() {
    let app = TestApp::new();
    let response = app
        .router
        .clone()
        .oneshot(multipart_request("anim.gif", b"GIF89a"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
