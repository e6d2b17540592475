use axum::{body::Bytes, extract::State, Json};
use service_core::error::AppError;

use crate::models::{LookupRequest, Planet};
use crate::services::{record_lookup, LookupOutcome};
use crate::startup::AppState;

/// `POST /planet`: look a planet up by the `id` member of the JSON body.
///
/// The body is read raw so that a missing, empty or non-object body is an
/// invalid id rather than an extractor rejection.
pub async fn get_planet(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Planet>, AppError> {
    let request = LookupRequest::from_body(&body);

    let Some(id) = request.planet_id() else {
        record_lookup(LookupOutcome::InvalidId);
        tracing::debug!(raw_id = ?request.id, "Rejected planet id");
        return Err(AppError::BadRequest("Invalid id".to_string()));
    };

    tracing::info!(planet_id = %id, "Fetching planet");

    match state.store.find_by_id(id).await {
        Ok(Some(planet)) => {
            record_lookup(LookupOutcome::Found);
            Ok(Json(planet))
        }
        Ok(None) => {
            record_lookup(LookupOutcome::NotFound);
            Err(AppError::NotFound("Planet not found".to_string()))
        }
        Err(e) => {
            // Logged once, by AppError, inside the request span.
            record_lookup(LookupOutcome::Error);
            Err(e.into())
        }
    }
}
