//! In-memory facility listings with a pending/approved/rejected moderation
//! workflow. Stands in for the real database; only the admin routes matter
//! here.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;

use admin_session_axum::AdminAuth;

#[derive(Clone, FromRef)]
pub(crate) struct AppState {
    pub(crate) auth: AdminAuth,
    pub(crate) facilities: FacilityStore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FacilityStatus {
    Pending,
    Approved,
    Rejected,
}

impl FacilityStatus {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Facility {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) prefecture: Option<String>,
    pub(crate) city: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) is_tattoo_ok: bool,
    pub(crate) tags: Option<String>,
    pub(crate) latitude: Option<f64>,
    pub(crate) longitude: Option<f64>,
    pub(crate) source: String,
    pub(crate) status: FacilityStatus,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewFacility {
    #[serde(default)]
    name: String,
    description: Option<String>,
    prefecture: Option<String>,
    city: Option<String>,
    address: Option<String>,
    #[serde(default)]
    is_tattoo_ok: bool,
    tags: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Row of the admin facility search
#[derive(Debug, Clone, Serialize)]
pub(crate) struct FacilitySummary {
    id: u64,
    name: String,
    address: Option<String>,
}

impl From<&Facility> for FacilitySummary {
    fn from(facility: &Facility) -> Self {
        Self {
            id: facility.id,
            name: facility.name.clone(),
            address: facility.address.clone(),
        }
    }
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    items: BTreeMap<u64, Facility>,
}

impl Inner {
    fn insert(&mut self, new: NewFacility, source: &str, status: FacilityStatus) -> Facility {
        self.next_id += 1;
        let facility = Facility {
            id: self.next_id,
            name: new.name.trim().to_string(),
            description: new.description,
            prefecture: new.prefecture,
            city: new.city,
            address: new.address,
            is_tattoo_ok: new.is_tattoo_ok,
            tags: new.tags,
            latitude: new.latitude,
            longitude: new.longitude,
            source: source.to_string(),
            status,
            created_at: Utc::now(),
        };
        self.items.insert(facility.id, facility.clone());
        facility
    }
}

#[derive(Clone)]
pub(crate) struct FacilityStore {
    inner: Arc<RwLock<Inner>>,
}

impl FacilityStore {
    pub(crate) fn seeded() -> Self {
        let seed = [
            ("すなみの湯", "温泉,サウナ", "新宿区", 35.6938, 139.7034, true),
            ("しろかぜサウナ", "サウナ,温浴", "渋谷区", 35.6595, 139.7005, true),
            ("あかねの湯", "温泉,露天", "世田谷区", 35.6467, 139.6532, false),
        ];

        let mut inner = Inner::default();
        for (name, tags, city, latitude, longitude, is_tattoo_ok) in seed {
            inner.insert(
                NewFacility {
                    name: name.to_string(),
                    description: None,
                    prefecture: Some("東京都".to_string()),
                    city: Some(city.to_string()),
                    address: None,
                    is_tattoo_ok,
                    tags: Some(tags.to_string()),
                    latitude: Some(latitude),
                    longitude: Some(longitude),
                },
                "seed",
                FacilityStatus::Approved,
            );
        }

        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    async fn with_status(&self, status: FacilityStatus) -> Vec<Facility> {
        self.inner
            .read()
            .await
            .items
            .values()
            .filter(|f| f.status == status)
            .cloned()
            .collect()
    }

    /// All facilities whose name or address contains `query`, ignoring case,
    /// in id order. A blank query matches everything.
    async fn search(&self, query: Option<&str>) -> Vec<FacilitySummary> {
        let needle = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        self.inner
            .read()
            .await
            .items
            .values()
            .filter(|f| match &needle {
                Some(needle) => {
                    f.name.to_lowercase().contains(needle)
                        || f
                            .address
                            .as_deref()
                            .is_some_and(|a| a.to_lowercase().contains(needle))
                }
                None => true,
            })
            .map(FacilitySummary::from)
            .collect()
    }

    async fn get(&self, id: u64) -> Option<Facility> {
        self.inner.read().await.items.get(&id).cloned()
    }

    async fn submit(&self, new: NewFacility) -> Facility {
        self.inner
            .write()
            .await
            .insert(new, "user", FacilityStatus::Pending)
    }

    async fn set_status(&self, id: u64, status: FacilityStatus) -> Option<Facility> {
        let mut inner = self.inner.write().await;
        let facility = inner.items.get_mut(&id)?;
        facility.status = status;
        Some(facility.clone())
    }
}

/// Routes open to every visitor
pub(crate) fn public_router() -> Router<AppState> {
    Router::new()
        .route("/facilities", get(list_approved))
        .route("/submit", post(submit))
}

/// Moderation routes; the caller wraps them in `require_admin`
pub(crate) fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(list_pending))
        .route("/facility/{id}", post(update_status))
        .route("/facilities", get(search_facilities))
        .route("/facilities/{id}", get(show_facility))
}

async fn list_approved(State(store): State<FacilityStore>) -> Json<Vec<Facility>> {
    Json(store.with_status(FacilityStatus::Approved).await)
}

async fn submit(State(store): State<FacilityStore>, Json(new): Json<NewFacility>) -> Response {
    if new.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "name_required" })),
        )
            .into_response();
    }
    let facility = store.submit(new).await;
    tracing::info!("New facility submission {} awaiting review", facility.id);
    (StatusCode::CREATED, Json(facility)).into_response()
}

async fn list_pending(State(store): State<FacilityStore>) -> Json<Vec<Facility>> {
    let mut pending = store.with_status(FacilityStatus::Pending).await;
    pending.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Json(pending)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdate {
    status: String,
}

async fn update_status(
    State(store): State<FacilityStore>,
    Path(id): Path<u64>,
    Json(update): Json<StatusUpdate>,
) -> Response {
    let Some(status) = FacilityStatus::parse(&update.status) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_status" })),
        )
            .into_response();
    };

    match store.set_status(id, status).await {
        Some(updated) => {
            tracing::info!("Facility {id} marked {:?}", status);
            Json(json!({ "updated": updated })).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "not_found" }))).into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    q: Option<String>,
}

async fn search_facilities(
    State(store): State<FacilityStore>,
    Query(query): Query<SearchQuery>,
) -> Json<serde_json::Value> {
    let data = store.search(query.q.as_deref()).await;
    Json(json!({ "ok": true, "data": data }))
}

async fn show_facility(State(store): State<FacilityStore>, Path(raw_id): Path<String>) -> Response {
    let Some(id) = raw_id.parse::<u64>().ok().filter(|id| *id > 0) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "error": "invalid_id" })),
        )
            .into_response();
    };

    match store.get(id).await {
        Some(facility) => Json(json!({ "ok": true, "data": facility })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "ok": false, "error": "not_found" })),
        )
            .into_response(),
    }
}
