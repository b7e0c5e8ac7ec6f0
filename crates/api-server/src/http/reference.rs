use axum::Json;
use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use shared::models::{DiseaseListResponse, NavigationResponse};
use shared::pages::navigation as navigation_items;
use shared::reference::{diseases, find_disease};

use super::errors::not_found_response;

pub(super) async fn navigation() -> Json<NavigationResponse> {
    Json(NavigationResponse {
        items: navigation_items(),
    })
}

pub(super) async fn list_diseases() -> Json<DiseaseListResponse> {
    Json(DiseaseListResponse { items: diseases() })
}

pub(super) async fn get_disease(Path(name): Path<String>) -> Response {
    match find_disease(&name) {
        Some(entry) => Json(entry).into_response(),
        None => not_found_response("not_found", "Condition is not in the encyclopedia"),
    }
}
