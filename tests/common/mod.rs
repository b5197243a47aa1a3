// tests/common/mod.rs
//
// Backend falso em memória, com as rotas e formatos do backend real.

#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use antonieta_client::{
    config::{AppState, ClientConfig},
    storage::MemoryStorage,
};
use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, MethodRouter},
    Form, Json, Router,
};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};

pub const ADMIN_EMAIL: &str = "admin@test.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const COMUM_EMAIL: &str = "comum@test.com";
pub const COMUM_PASSWORD: &str = "comum123";

/// Formato das listagens: cada revisão do backend devolveu um.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListShape {
    Bare,
    Pair,
    Wrapped,
}

pub struct Db {
    collections: HashMap<&'static str, Vec<Value>>,
    // (email, senha, id do usuário)
    credentials: Vec<(String, String, i64)>,
    next_id: i64,
    pub list_shape: ListShape,
    pub login_returns_user: bool,
    pub requests: Vec<String>,
    pub auth_headers: Vec<Option<String>>,
}

impl Db {
    fn items(&self, name: &str) -> Vec<Value> {
        self.collections.get(name).cloned().unwrap_or_default()
    }

    pub fn find(&self, name: &str, id: i64) -> Option<Value> {
        self.collections.get(name)?.iter().find(|v| v["id"] == id).cloned()
    }

    fn insert(&mut self, name: &'static str, mut body: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;

        if name == "users" {
            let password = body
                .as_object_mut()
                .and_then(|m| m.remove("password"))
                .and_then(|p| p.as_str().map(str::to_string))
                .unwrap_or_default();
            let email = body["email"].as_str().unwrap_or_default().to_string();
            self.credentials.push((email, password, id));
            if body.get("role").is_none_or(Value::is_null) {
                body["role"] = json!("comum");
            }
        }

        body["id"] = json!(id);
        self.collections.entry(name).or_default().push(body.clone());
        body
    }

    fn merge(&mut self, name: &str, id: i64, changes: Value) -> Option<Value> {
        let item = self.collections.get_mut(name)?.iter_mut().find(|v| v["id"] == id)?;
        if let (Some(target), Value::Object(changes)) = (item.as_object_mut(), changes) {
            for (key, value) in changes {
                if key != "id" {
                    target.insert(key, value);
                }
            }
        }
        Some(item.clone())
    }

    fn remove(&mut self, name: &str, id: i64) -> bool {
        let Some(items) = self.collections.get_mut(name) else {
            return false;
        };
        let before = items.len();
        items.retain(|v| v["id"] != id);
        items.len() != before
    }

    fn list_body(&self, page: Vec<Value>, total: usize) -> Value {
        match self.list_shape {
            ListShape::Bare => Value::Array(page),
            ListShape::Pair => json!([page, total]),
            ListShape::Wrapped => json!({"items": page, "total": total}),
        }
    }
}

#[derive(Clone)]
pub struct Backend(Arc<Mutex<Db>>);

impl Backend {
    pub fn seeded() -> Self {
        let mut db = Db {
            collections: HashMap::new(),
            credentials: Vec::new(),
            next_id: 1,
            list_shape: ListShape::Bare,
            login_returns_user: true,
            requests: Vec::new(),
            auth_headers: Vec::new(),
        };

        db.insert(
            "users",
            json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD,
                   "full_name": "Admin Teste", "role": "administrador",
                   "created_at": "2024-01-10T09:00:00"}),
        );
        db.insert(
            "users",
            json!({"email": COMUM_EMAIL, "password": COMUM_PASSWORD,
                   "full_name": "Carla Comum", "role": "comum"}),
        );
        db.insert(
            "ration_type",
            json!({"name": "Seca", "description": "Ração seca"}),
        );
        db.insert(
            "ration_stock",
            json!({"name": "Ração Adulto", "unit": "kg", "stock": 100.5,
                   "description": "Saco de 15kg", "ration_type_id": 3}),
        );
        db.insert(
            "beneficiary",
            json!({"name": "Maria Souza", "document": "111.111.111-11",
                   "street": "Rua das Flores", "number": "12", "neighborhood": "Centro",
                   "city": "Pindamonhangaba", "state": "SP", "contact": "(12) 90000-0001",
                   "monthly_limit": 10, "qtd_dogs": 2, "government_benefit": false}),
        );
        db.insert(
            "beneficiary",
            json!({"name": "José Lima", "document": "222.222.222-22",
                   "street": "Av. Brasil", "number": null, "neighborhood": "Vila São José",
                   "city": null, "state": "", "contact": "(12) 90000-0002",
                   "monthly_limit": "5.5", "qtd_cats": "1", "government_benefit": 1}),
        );
        db.insert(
            "distribution",
            json!({"beneficiary_id": 5, "ration_id": 4, "amount": 3.5,
                   "date": "2024-06-10T00:00:00", "observations": "Entrega mensal", "old": false}),
        );
        db.insert(
            "distribution",
            json!({"beneficiary_id": 5, "ration_id": 4, "amount": 2,
                   "date": "2023-01-10", "old": true}),
        );
        db.insert(
            "ration_input",
            json!({"ration_stock_id": 4, "amount": 50, "date": "2024-06-01",
                   "description": "Doação"}),
        );

        Backend(Arc::new(Mutex::new(db)))
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Db) -> R) -> R {
        f(&mut self.0.lock())
    }

    pub fn set_list_shape(&self, shape: ListShape) {
        self.with(|db| db.list_shape = shape);
    }

    pub fn requests(&self) -> Vec<String> {
        self.with(|db| db.requests.clone())
    }

    pub fn last_auth_header(&self) -> Option<String> {
        self.with(|db| db.auth_headers.last().cloned().flatten())
    }

    pub fn find(&self, name: &str, id: i64) -> Option<Value> {
        self.with(|db| db.find(name, id))
    }

    pub fn count(&self, name: &str) -> usize {
        self.with(|db| db.items(name).len())
    }

    fn user_for_token(&self, token: &str) -> Option<Value> {
        let id = token.strip_prefix("token-")?.parse::<i64>().ok()?;
        self.find("users", id)
    }
}

fn ok(body: Value) -> Response {
    Json(body).into_response()
}

fn fail(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

async fn record(State(backend): State<Backend>, req: Request, next: Next) -> Response {
    let line = match req.uri().query() {
        Some(query) => format!("{} {}?{}", req.method(), req.uri().path(), query),
        None => format!("{} {}", req.method(), req.uri().path()),
    };
    let auth = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    backend.with(|db| {
        db.requests.push(line);
        db.auth_headers.push(auth);
    });
    next.run(req).await
}

async fn require_bearer(State(backend): State<Backend>, req: Request, next: Next) -> Response {
    match bearer(req.headers()).and_then(|t| backend.user_for_token(&t)) {
        Some(_) => next.run(req).await,
        None => fail(StatusCode::UNAUTHORIZED, "Not authenticated"),
    }
}

// --- /auth ---

#[derive(Deserialize)]
struct TokenForm {
    username: String,
    password: String,
    grant_type: Option<String>,
}

async fn token(State(backend): State<Backend>, Form(form): Form<TokenForm>) -> Response {
    if form.grant_type.as_deref() != Some("password") {
        return fail(StatusCode::BAD_REQUEST, "grant_type inválido");
    }
    backend.with(|db| {
        let Some(&(_, _, id)) = db
            .credentials
            .iter()
            .find(|(email, password, _)| *email == form.username && *password == form.password)
        else {
            return fail(StatusCode::UNAUTHORIZED, "Email ou senha incorretos");
        };

        let mut body = json!({"access_token": format!("token-{id}"), "token_type": "bearer"});
        if db.login_returns_user {
            body["user"] = db.find("users", id).unwrap_or(Value::Null);
        }
        ok(body)
    })
}

async fn register(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    backend.with(|db| {
        let taken = db.credentials.iter().any(|(email, _, _)| body["email"] == email.as_str());
        if taken {
            return fail(StatusCode::BAD_REQUEST, "Email já está registrado");
        }
        ok(db.insert("users", body))
    })
}

async fn me(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    match bearer(&headers).and_then(|t| backend.user_for_token(&t)) {
        Some(user) => ok(user),
        None => fail(StatusCode::UNAUTHORIZED, "Not authenticated"),
    }
}

// --- CRUD genérico ---

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    skip: Option<usize>,
    limit: Option<usize>,
    include_old: Option<bool>,
}

#[derive(Clone, Copy)]
enum PutStyle {
    // `PUT /recurso/` com o id no corpo
    IdInBody,
    // `PUT /recurso/{id}`; `true` exige o mesmo id no corpo
    IdInPath(bool),
}

fn list(backend: &Backend, name: &'static str, q: &ListQuery) -> Response {
    backend.with(|db| {
        let mut all = db.items(name);
        if name == "distribution" && !q.include_old.unwrap_or(false) {
            all.retain(|v| v["old"] != true);
        }
        let total = all.len();
        let page: Vec<Value> = all
            .into_iter()
            .skip(q.skip.unwrap_or(0))
            .take(q.limit.unwrap_or(usize::MAX))
            .collect();
        ok(db.list_body(page, total))
    })
}

fn update_with_body_id(backend: &Backend, name: &'static str, body: Value) -> Response {
    let Some(id) = body["id"].as_i64() else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [{"loc": ["body", "id"], "msg": "field required"}]})),
        )
            .into_response();
    };
    match backend.with(|db| db.merge(name, id, body)) {
        Some(updated) => ok(updated),
        None => fail(StatusCode::NOT_FOUND, "Registro não encontrado"),
    }
}

fn update_with_path_id(
    backend: &Backend,
    name: &'static str,
    id: i64,
    body: Value,
    body_id_required: bool,
) -> Response {
    if body_id_required && body["id"].as_i64() != Some(id) {
        return fail(
            StatusCode::BAD_REQUEST,
            "ID da rota não corresponde ao ID do corpo da requisição",
        );
    }
    match backend.with(|db| db.merge(name, id, body)) {
        Some(updated) => ok(updated),
        None => fail(StatusCode::NOT_FOUND, "Registro não encontrado"),
    }
}

fn crud(router: Router<Backend>, base: &'static str, name: &'static str, put: PutStyle) -> Router<Backend> {
    let mut collection: MethodRouter<Backend> = get(
        move |State(b): State<Backend>, Query(q): Query<ListQuery>| async move { list(&b, name, &q) },
    )
    .post(move |State(b): State<Backend>, Json(body): Json<Value>| async move {
        ok(b.with(|db| db.insert(name, body)))
    });

    let mut item: MethodRouter<Backend> = get(
        move |State(b): State<Backend>, Path(id): Path<i64>| async move {
            match b.find(name, id) {
                Some(found) => ok(found),
                None => fail(StatusCode::NOT_FOUND, "Registro não encontrado"),
            }
        },
    )
    .delete(move |State(b): State<Backend>, Path(id): Path<i64>| async move {
        if !b.with(|db| db.remove(name, id)) {
            return fail(StatusCode::NOT_FOUND, "Registro não encontrado");
        }
        if name == "users" {
            StatusCode::NO_CONTENT.into_response()
        } else {
            ok(json!({"message": "Registro removido com sucesso"}))
        }
    });

    match put {
        PutStyle::IdInBody => {
            collection = collection.put(
                move |State(b): State<Backend>, Json(body): Json<Value>| async move {
                    update_with_body_id(&b, name, body)
                },
            );
        }
        PutStyle::IdInPath(body_id_required) => {
            item = item.put(
                move |State(b): State<Backend>, Path(id): Path<i64>, Json(body): Json<Value>| async move {
                    update_with_path_id(&b, name, id, body, body_id_required)
                },
            );
        }
    }

    router
        .route(&format!("{base}/"), collection)
        .route(&format!("{base}/{{id}}"), item)
}

// --- rotas específicas ---

#[derive(Deserialize)]
struct SearchQuery {
    skip: Option<usize>,
    limit: Option<usize>,
}

async fn search(
    State(backend): State<Backend>,
    Path((kind, term)): Path<(String, String)>,
    Query(q): Query<SearchQuery>,
) -> Response {
    if kind != "neighborhood" && kind != "street" {
        return fail(StatusCode::NOT_FOUND, "Not Found");
    }
    let needle = term.to_lowercase();
    let matches: Vec<Value> = backend.with(|db| db.items("beneficiary"))
        .into_iter()
        .filter(|b| b[&kind].as_str().is_some_and(|v| v.to_lowercase().contains(&needle)))
        .collect();
    let total = matches.len();
    let page: Vec<Value> = matches
        .into_iter()
        .skip(q.skip.unwrap_or(0))
        .take(q.limit.unwrap_or(100))
        .collect();
    ok(json!({"beneficiaries": page, "total": total}))
}

fn filtered(backend: &Backend, name: &str, field: &str, id: i64) -> Response {
    let items: Vec<Value> = backend.with(|db| db.items(name))
        .into_iter()
        .filter(|v| v[field] == id)
        .collect();
    ok(Value::Array(items))
}

async fn distributions_of(State(b): State<Backend>, Path(id): Path<i64>) -> Response {
    filtered(&b, "distribution", "beneficiary_id", id)
}

async fn inputs_of(State(b): State<Backend>, Path(id): Path<i64>) -> Response {
    filtered(&b, "ration_input", "ration_stock_id", id)
}

async fn total_inputs_month() -> Response {
    ok(json!({"total_amount": 150.5, "month": 6, "year": 2024}))
}

async fn total_distributions_month() -> Response {
    // números como string, como o backend devolve Decimal às vezes
    ok(json!({"total_amount": "42.75", "month": "6", "year": 2024}))
}

async fn current_total_stock(State(backend): State<Backend>) -> Response {
    let total: f64 = backend.with(|db| db.items("ration_stock"))
        .iter()
        .filter_map(|s| s["stock"].as_f64())
        .sum();
    ok(json!({"current_stock": total, "last_updated": "2024-06-30T12:00:00"}))
}

pub fn router(backend: Backend) -> Router {
    let mut protected = Router::new()
        .route("/auth/me", get(me))
        .route("/beneficiary/search/{kind}/{term}", get(search))
        .route("/distribution/beneficiary/{id}", get(distributions_of))
        .route("/ration-input/ration-stock/{id}", get(inputs_of))
        .route("/dashboard/total-inputs-month", get(total_inputs_month))
        .route("/dashboard/total-distributions-month", get(total_distributions_month))
        .route("/dashboard/current-total-stock", get(current_total_stock));

    for (base, name, put) in [
        ("/beneficiary", "beneficiary", PutStyle::IdInBody),
        ("/distribution", "distribution", PutStyle::IdInBody),
        ("/ration-stock", "ration_stock", PutStyle::IdInPath(true)),
        ("/ration-input", "ration_input", PutStyle::IdInPath(true)),
        ("/ration_type", "ration_type", PutStyle::IdInPath(false)),
        ("/users", "users", PutStyle::IdInPath(false)),
    ] {
        protected = crud(protected, base, name, put);
    }

    Router::new()
        .route("/auth/token", post(token))
        .route("/auth/register", post(register))
        .merge(protected.route_layer(middleware::from_fn_with_state(backend.clone(), require_bearer)))
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .with_state(backend)
}

pub struct TestApp {
    pub backend: Backend,
    pub state: AppState,
    pub storage: Arc<MemoryStorage>,
    pub url: String,
}

impl TestApp {
    /// Outro "processo" do cliente apontando para o mesmo backend e armazenamento.
    pub fn reopen(&self) -> AppState {
        state_for(&self.url, self.storage.clone())
    }
}

pub fn state_for(url: &str, storage: Arc<MemoryStorage>) -> AppState {
    let config = ClientConfig { backend_url: url.to_string(), ..ClientConfig::default() };
    AppState::with_storage(config, storage).unwrap()
}

pub async fn spawn() -> TestApp {
    let backend = Backend::seeded();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let app = router(backend.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let storage = Arc::new(MemoryStorage::new());
    let state = state_for(&url, storage.clone());
    TestApp { backend, state, storage, url }
}

/// Sobe o backend e já faz login como administrador.
pub async fn spawn_logged_in() -> TestApp {
    let app = spawn().await;
    app.state
        .auth_service
        .login(&antonieta_client::models::auth::LoginForm::new(ADMIN_EMAIL, ADMIN_PASSWORD))
        .await
        .unwrap();
    app
}
