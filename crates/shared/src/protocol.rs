use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiStatus {
    Success,
}

/// Body of `GET /api/data`. Field order is the order the page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiData {
    pub message: String,
    pub status: ApiStatus,
    pub data: Vec<i64>,
}

pub fn home_route() -> &'static str {
    "/"
}

pub fn about_route() -> &'static str {
    "/about"
}

pub fn contact_route() -> &'static str {
    "/contact"
}

pub fn api_data_route() -> &'static str {
    "/api/data"
}

pub fn healthz_route() -> &'static str {
    "/healthz"
}

pub fn static_route() -> &'static str {
    "/static"
}
