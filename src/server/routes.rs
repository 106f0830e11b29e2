use std::sync::Arc;

use axum::{
    extract::{Path, State as AxumState},
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Serialize;
use serde_json::json;

use super::state::State;
use crate::core::referral::{generate, redirect_target};
use crate::core::{ReferralCode, TestingConfig};
use crate::utils::error::{Result, ScribeError};

#[derive(Debug, Serialize)]
pub struct ReferralLinksBody {
    pub code: ReferralCode,
    pub valid: bool,
    pub short_url: String,
    pub signup_url: String,
}

impl ReferralLinksBody {
    fn new(state: &State, code: ReferralCode) -> Self {
        Self {
            short_url: state.links.short_url(code.as_str()),
            signup_url: state.links.signup_url(code.as_str()),
            valid: true,
            code,
        }
    }
}

pub async fn short_link_handler(Path(code): Path<String>) -> Redirect {
    let target = redirect_target(&code);
    tracing::debug!("Redirecting /s/{} to {}", code, target);
    Redirect::temporary(&target)
}

pub async fn generate_handler(AxumState(state): AxumState<Arc<State>>) -> Json<ReferralLinksBody> {
    Json(ReferralLinksBody::new(&state, generate()))
}

pub async fn referral_handler(
    AxumState(state): AxumState<Arc<State>>,
    Path(code): Path<String>,
) -> Result<Json<ReferralLinksBody>> {
    let code = ReferralCode::parse(&code).ok_or(ScribeError::InvalidReferralCode { value: code })?;
    Ok(Json(ReferralLinksBody::new(&state, code)))
}

pub async fn testing_config_handler(
    AxumState(state): AxumState<Arc<State>>,
) -> Json<TestingConfig> {
    Json(state.testing)
}

pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
