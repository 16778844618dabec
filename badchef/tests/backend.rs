//! End-to-end checks against an in-process fake of the recipe backend.

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use badchef::{
    view, CancelHandle, Decision, Error, ErrorKind, Favorite, FavoritesState, MemoryTokenStore,
    RecipeClient, RecipeId, Route, SessionValidator, TokenStore, Validity,
};
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicBool, AtomicU16, Ordering},
    Arc, Mutex,
};
use std::time::Duration;
use tokio::time::timeout;

const GOOD_TOKEN: &str = "tok-chef";

#[derive(Clone)]
struct Backend {
    me_status: Arc<AtomicU16>,
    expire_favorites: Arc<AtomicBool>,
    hits: Arc<Mutex<Vec<String>>>,
    favorites: Arc<Mutex<Vec<i64>>>,
}

impl Backend {
    fn new() -> Self {
        Self {
            me_status: Arc::new(AtomicU16::new(200)),
            expire_favorites: Arc::new(AtomicBool::new(false)),
            hits: Arc::new(Mutex::new(Vec::new())),
            favorites: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn hit(&self, name: &str) {
        self.hits.lock().unwrap().push(name.to_owned());
    }

    fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    fn count(&self, name: &str) -> usize {
        self.hits().iter().filter(|h| h.as_str() == name).count()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {}", GOOD_TOKEN).as_str())
}

fn detail(status: StatusCode, msg: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": msg })))
}

async fn create_user(State(b): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    b.hit("signup");
    (
        StatusCode::OK,
        Json(json!({ "id": 1, "username": body["username"], "email": body["email"] })),
    )
}

async fn token(State(b): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    b.hit("token");
    if body["username"] == "chef" && body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({ "access_token": GOOD_TOKEN, "token_type": "bearer" })),
        )
    } else {
        detail(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

async fn me(State(b): State<Backend>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    b.hit("me");
    let status = StatusCode::from_u16(b.me_status.load(Ordering::SeqCst)).unwrap();
    if status != StatusCode::OK {
        return detail(status, "nope");
    }
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }
    (
        StatusCode::OK,
        Json(json!({ "id": 1, "username": "chef", "email": "chef@example.com" })),
    )
}

async fn list_recipes(State(b): State<Backend>) -> Json<Value> {
    b.hit("recipes");
    Json(json!([
        { "id": 1, "title": "Bruschetta", "description": "", "ingredients": "bread",
          "instructions": "toast", "author_id": 1, "created_at": "2025-01-01T00:00:00" },
        { "id": 2, "title": "Miso Soup", "description": "", "ingredients": "miso",
          "instructions": "[\"boil\", \"stir\"]", "author_id": 1, "category": "Soup" }
    ]))
}

async fn get_recipe(State(b): State<Backend>, Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    b.hit("recipe");
    if id != 1 {
        return detail(StatusCode::NOT_FOUND, "Recipe not found");
    }
    (
        StatusCode::OK,
        Json(json!({ "id": 1, "title": "Bruschetta", "ingredients": "bread; tomato",
                     "instructions": "toast\ntop", "author_id": 1 })),
    )
}

async fn all_favorites(State(b): State<Backend>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    b.hit("favorites");
    if !authorized(&headers) || b.expire_favorites.load(Ordering::SeqCst) {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }
    let items: Vec<Value> = b
        .favorites
        .lock()
        .unwrap()
        .iter()
        .map(|id| json!({ "id": id, "user_id": 1, "recipe_id": id, "title": format!("Recipe {}", id), "author_id": "1", "image_source": null }))
        .collect();
    (StatusCode::OK, Json(Value::Array(items)))
}

async fn add_favorite(
    State(b): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    b.hit("fav_add");
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }
    let id = body["recipe_id"].as_i64().unwrap_or_default();
    let mut favorites = b.favorites.lock().unwrap();
    if favorites.contains(&id) {
        return detail(StatusCode::BAD_REQUEST, "Already favorited");
    }
    favorites.push(id);
    (
        StatusCode::OK,
        Json(json!({ "id": id, "user_id": 1, "recipe_id": id })),
    )
}

async fn remove_favorite(
    State(b): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    b.hit("fav_remove");
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }
    let id = body["recipe_id"].as_i64().unwrap_or_default();
    let mut favorites = b.favorites.lock().unwrap();
    match favorites.iter().position(|f| *f == id) {
        Some(index) => {
            favorites.remove(index);
            (StatusCode::OK, Json(json!({ "message": "removed" })))
        }
        None => detail(StatusCode::NOT_FOUND, "Favorite not found"),
    }
}

async fn spawn(backend: Backend) -> String {
    let app = Router::new()
        .route("/users/", post(create_user))
        .route("/users/token", post(token))
        .route("/users/me", get(me))
        .route("/recipes/", get(list_recipes))
        .route("/recipes/{id}", get(get_recipe))
        .route("/favorites/all", get(all_favorites))
        .route("/favorites", post(add_favorite).delete(remove_favorite))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/", addr)
}

/// A server that accepts connections and never answers.
async fn spawn_silent() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    format!("http://{}/", addr)
}

fn client(base_url: &str, store: Arc<MemoryTokenStore>) -> RecipeClient {
    RecipeClient::builder()
        .base_url(base_url)
        .token_store(store)
        .build()
        .unwrap()
}

#[tokio::test]
async fn protected_route_without_token_redirects_without_requests() {
    let backend = Backend::new();
    let url = spawn(backend.clone()).await;
    let client = client(&url, Arc::new(MemoryTokenStore::new()));
    let favorites = client.favorites();

    let page = view::open(&client, Route::Favorites, &CancelHandle::new(), || {
        favorites.list()
    })
    .await;

    assert_eq!(page.redirect(), Some(Route::Login));
    assert!(page.state.data.is_none());
    assert!(backend.hits().is_empty());
}

#[tokio::test]
async fn protected_route_with_valid_token_fetches_once() {
    let backend = Backend::new();
    let url = spawn(backend.clone()).await;
    let client = client(&url, Arc::new(MemoryTokenStore::with_token(GOOD_TOKEN)));
    let recipes = client.recipes();

    let page = view::open(&client, Route::Recipes, &CancelHandle::new(), || recipes.list()).await;

    assert_eq!(page.decision, Decision::Render);
    assert_eq!(page.state.data.as_ref().map(Vec::len), Some(2));
    assert_eq!(backend.hits(), vec!["me", "recipes"]);
    assert_eq!(backend.count("recipes"), 1);
}

#[tokio::test]
async fn rejected_token_is_cleared_and_redirected() {
    let backend = Backend::new();
    backend.me_status.store(401, Ordering::SeqCst);
    let url = spawn(backend.clone()).await;
    let store = Arc::new(MemoryTokenStore::with_token(GOOD_TOKEN));
    let client = client(&url, store.clone());
    let recipes = client.recipes();

    let page = view::open(&client, Route::Recipes, &CancelHandle::new(), || recipes.list()).await;

    assert_eq!(page.redirect(), Some(Route::Login));
    assert_eq!(store.get().unwrap(), None);
    assert_eq!(backend.count("recipes"), 0);
}

#[tokio::test]
async fn validator_accepts_only_200() {
    let backend = Backend::new();
    let url = spawn(backend.clone()).await;
    let client = client(&url, Arc::new(MemoryTokenStore::new()));
    let validator = client.validator();
    let good = badchef::Credential::new(GOOD_TOKEN);

    assert_eq!(validator.validate(&good).await, Validity::Valid);

    for status in [400u16, 401, 403, 500] {
        backend.me_status.store(status, Ordering::SeqCst);
        assert_eq!(
            validator.validate(&good).await,
            Validity::Invalid,
            "status {status} must be invalid"
        );
    }

    backend.me_status.store(200, Ordering::SeqCst);
    let wrong = badchef::Credential::new("forged");
    assert_eq!(validator.validate(&wrong).await, Validity::Invalid);
}

#[tokio::test]
async fn validator_treats_unreachable_server_as_invalid() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{}/", addr), Arc::new(MemoryTokenStore::new()));
    let validity = client
        .validator()
        .validate(&badchef::Credential::new(GOOD_TOKEN))
        .await;
    assert_eq!(validity, Validity::Invalid);
}

#[tokio::test]
async fn wrong_password_shows_detail_and_keeps_store() {
    let backend = Backend::new();
    let url = spawn(backend.clone()).await;
    let store = Arc::new(MemoryTokenStore::with_token("previous"));
    let client = client(&url, store.clone());

    let err = client.users().login("chef", "wrong").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.user_message(), "Invalid credentials");
    assert_eq!(
        store.get().unwrap(),
        Some(badchef::Credential::new("previous"))
    );
}

#[tokio::test]
async fn login_page_redirects_once_logged_in() {
    let backend = Backend::new();
    let url = spawn(backend.clone()).await;
    let store = Arc::new(MemoryTokenStore::new());
    let client = client(&url, store.clone());

    assert_eq!(view::enter_login(&client, &CancelHandle::new()).await, Decision::Render);

    client.users().register("chef", "chef@example.com", "secret").await.unwrap();
    assert_eq!(
        store.get().unwrap(),
        Some(badchef::Credential::new(GOOD_TOKEN))
    );
    assert_eq!(
        view::enter_login(&client, &CancelHandle::new()).await,
        Decision::Redirect(Route::Recipes)
    );

    assert_eq!(client.logout().unwrap(), Route::Login);
    assert_eq!(client.logout().unwrap(), Route::Login);
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn removing_missing_favorite_counts_as_removed() {
    let backend = Backend::new();
    let url = spawn(backend.clone()).await;
    let client = client(&url, Arc::new(MemoryTokenStore::with_token(GOOD_TOKEN)));
    let api = client.favorites();

    // Local state thinks 7 is liked, the server has no record of it.
    let mut state = FavoritesState::new(vec![Favorite {
        recipe_id: RecipeId(7),
        title: "Ghost".into(),
        ..Default::default()
    }]);

    state.unlike(&api, RecipeId(7)).await.unwrap();
    assert!(state.is_empty());
    assert_eq!(backend.count("fav_remove"), 1);
}

#[tokio::test]
async fn toggle_round_trip_leaves_favorites_unchanged() {
    let backend = Backend::new();
    backend.favorites.lock().unwrap().push(1);
    let url = spawn(backend.clone()).await;
    let client = client(&url, Arc::new(MemoryTokenStore::with_token(GOOD_TOKEN)));
    let api = client.favorites();

    let mut state = FavoritesState::new(api.list().await.unwrap());
    let before = state.clone();
    let extra = Favorite {
        recipe_id: RecipeId(2),
        title: "Miso Soup".into(),
        ..Default::default()
    };

    assert!(state.toggle(&api, extra.clone()).await.unwrap());
    assert!(state.contains(RecipeId(2)));
    assert_eq!(*backend.favorites.lock().unwrap(), vec![1, 2]);
    assert!(!state.toggle(&api, extra).await.unwrap());

    assert_eq!(state, before);
    assert_eq!(*backend.favorites.lock().unwrap(), vec![1]);
}

#[tokio::test]
async fn expired_session_during_fetch_logs_out() {
    let backend = Backend::new();
    backend.expire_favorites.store(true, Ordering::SeqCst);
    let url = spawn(backend.clone()).await;
    let store = Arc::new(MemoryTokenStore::with_token(GOOD_TOKEN));
    let client = client(&url, store.clone());
    let favorites = client.favorites();

    let page = view::open(&client, Route::Favorites, &CancelHandle::new(), || {
        favorites.list()
    })
    .await;

    assert_eq!(page.redirect(), Some(Route::Login));
    assert!(page.state.error.is_some());
    assert_eq!(store.get().unwrap(), None);
}

#[tokio::test]
async fn missing_recipe_is_not_found() {
    let backend = Backend::new();
    let url = spawn(backend.clone()).await;
    let client = client(&url, Arc::new(MemoryTokenStore::new()));

    let recipe = client.recipes().get(RecipeId(1)).await.unwrap();
    assert_eq!(recipe.ingredient_list(), vec!["Bread", "Tomato"]);

    let err = client.recipes().get(RecipeId(999)).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(ref d) if d == "Recipe not found"));
}

#[tokio::test]
async fn authenticated_call_without_token_sends_nothing() {
    let backend = Backend::new();
    let url = spawn(backend.clone()).await;
    let client = client(&url, Arc::new(MemoryTokenStore::new()));

    let err = client.favorites().list().await.unwrap_err();
    assert!(matches!(err, Error::AuthRequired));
    assert!(backend.hits().is_empty());
}

#[tokio::test]
async fn rejected_write_rolls_back_and_logs_out() {
    let backend = Backend::new();
    let url = spawn(backend.clone()).await;
    let store = Arc::new(MemoryTokenStore::with_token("stale"));
    let client = client(&url, store.clone());
    let api = client.favorites();

    let mut state = FavoritesState::default();
    let err = state
        .like(
            &api,
            Favorite {
                recipe_id: RecipeId(2),
                title: "Miso Soup".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Expired);
    assert!(state.is_empty());
    assert_eq!(store.get().unwrap(), None);
    assert_eq!(backend.count("fav_add"), 1);

    // The next guarded page goes straight to login without asking the server.
    let page = view::open(&client, Route::Favorites, &CancelHandle::new(), || api.list()).await;
    assert_eq!(page.redirect(), Some(Route::Login));
    assert_eq!(backend.count("me"), 0);
}

#[tokio::test]
async fn cancelled_session_check_returns_promptly() {
    let url = spawn_silent().await;
    let store = Arc::new(MemoryTokenStore::with_token(GOOD_TOKEN));
    let client = client(&url, store.clone());
    let recipes = client.recipes();

    let cancel = CancelHandle::new();
    cancel.cancel();
    let page = timeout(
        Duration::from_secs(3),
        view::open(&client, Route::Recipes, &cancel, || recipes.list()),
    )
    .await
    .expect("open should not wait on a cancelled check");

    assert_eq!(page.decision, Decision::Loading);
    assert!(page.state.loading);
    assert!(page.state.data.is_none());
    assert!(store.is_present());

    let decision = timeout(Duration::from_secs(3), view::enter_login(&client, &cancel))
        .await
        .expect("login check should not wait on a cancelled handle");
    assert_eq!(decision, Decision::Render);
}

#[tokio::test]
async fn cancelling_mid_check_stops_waiting() {
    let url = spawn_silent().await;
    let client = client(&url, Arc::new(MemoryTokenStore::with_token(GOOD_TOKEN)));
    let recipes = client.recipes();

    let cancel = CancelHandle::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let page = timeout(
        Duration::from_secs(3),
        view::open(&client, Route::Recipes, &cancel, || recipes.list()),
    )
    .await
    .expect("open should stop once cancelled");

    assert_eq!(page.redirect(), None);
    assert!(page.state.data.is_none());
    assert!(client.is_authenticated());
}
