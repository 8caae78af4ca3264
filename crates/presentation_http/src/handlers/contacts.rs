//! Contact number handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Check-number request
#[derive(Debug, Deserialize, Validate)]
pub struct CheckNumberRequest {
    /// Phone number as entered by a human
    #[validate(length(min = 1, max = 64, message = "must be between 1 and 64 characters"))]
    pub number: String,
}

/// Check-number response
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckNumberResponse {
    /// Provider-confirmed WhatsApp user id
    pub wa_id: String,
}

/// Validate a contact number against WhatsApp
#[instrument(skip(state, request))]
pub async fn check_number(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CheckNumberRequest>,
) -> Result<Json<CheckNumberResponse>, ApiError> {
    let wa_id = state.number_validation.validate(&request.number).await?;

    debug!("Contact number confirmed");
    Ok(Json(CheckNumberResponse {
        wa_id: wa_id.into_inner(),
    }))
}
