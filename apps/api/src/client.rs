//! Typed HTTP client for this service's own API, used by the `coach` terminal UI.

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use thiserror::Error;

use crate::models::occupation::{Occupation, OccupationDetail};
use crate::models::scenario::Scenario;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    occupations: Vec<Occupation>,
}

#[derive(Debug, Deserialize)]
struct DetailsBody {
    details: OccupationDetail,
}

#[derive(Debug, Deserialize)]
struct ScenariosBody {
    scenarios: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
struct FeedbackBody {
    feedback: String,
}

#[derive(Clone)]
pub struct CoachClient {
    http: Client,
    base_url: String,
}

impl CoachClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<Occupation>, ClientError> {
        let request = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("q", keyword)]);
        Ok(read::<SearchBody>(request).await?.occupations)
    }

    pub async fn details(&self, code: &str) -> Result<OccupationDetail, ClientError> {
        let request = self
            .http
            .get(format!("{}/details", self.base_url))
            .query(&[("code", code)]);
        Ok(read::<DetailsBody>(request).await?.details)
    }

    pub async fn generate_scenarios(
        &self,
        detail: &OccupationDetail,
    ) -> Result<Vec<Scenario>, ClientError> {
        let request = self
            .http
            .post(format!("{}/generate-scenarios", self.base_url))
            .json(&json!({ "occupationDetails": detail }));
        Ok(read::<ScenariosBody>(request).await?.scenarios)
    }

    pub async fn feedback(&self, user_text: &str, scenario: &Scenario) -> Result<String, ClientError> {
        let request = self
            .http
            .post(format!("{}/feedback", self.base_url))
            .json(&json!({
                "userText": user_text,
                "scenario": { "prompt": scenario.prompt, "criteria": scenario.criteria },
            }));
        Ok(read::<FeedbackBody>(request).await?.feedback)
    }
}

async fn read<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|b| b.error)
            .unwrap_or_else(|_| status.to_string());
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json().await?)
}
