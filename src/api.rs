use crate::config::Settings;
use crate::errors::{AppError, AppResult};
use crate::models::{ApiRequest, ApiResponse, HttpMethod, RuleUpdate};
use async_trait::async_trait;
use uuid::Uuid;

pub const RULES_PATH: &str = "/v1/rules";

/// Sends one request to the rules backend and hands back its status and `data`.
#[async_trait]
pub trait RequestSender: Send + Sync {
    async fn send_request(&self, request: ApiRequest) -> AppResult<ApiResponse>;
}

/// `RULES_PATH` with one form-encoded query pair, so ids cannot smuggle extra parameters.
fn rules_url(key: &str, value: &str) -> AppResult<String> {
    let mut url = reqwest::Url::parse(&format!("http://localhost{}", RULES_PATH))
        .map_err(|error| AppError::Internal(format!("invalid rules path: {}", error)))?;
    url.query_pairs_mut().append_pair(key, value);
    Ok(format!("{}?{}", url.path(), url.query().unwrap_or_default()))
}

pub fn get_rule_request(id: &str) -> AppResult<ApiRequest> {
    Ok(ApiRequest {
        url: rules_url("id", id)?,
        method: HttpMethod::Get,
        data: None,
    })
}

pub fn update_rules_request(batch: &[RuleUpdate]) -> AppResult<ApiRequest> {
    Ok(ApiRequest {
        url: RULES_PATH.to_string(),
        method: HttpMethod::Put,
        data: Some(serde_json::to_value(batch)?),
    })
}

pub fn delete_rules_request(id: &str) -> AppResult<ApiRequest> {
    Ok(ApiRequest {
        url: rules_url("ids", id)?,
        method: HttpMethod::Delete,
        data: None,
    })
}

/// Pulls `data` out of a response envelope. Empty or non-JSON bodies yield null.
pub fn envelope_data(body: &str) -> serde_json::Value {
    if body.trim().is_empty() {
        return serde_json::Value::Null;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(mut envelope)) => {
            envelope.remove("data").unwrap_or(serde_json::Value::Null)
        }
        Ok(_) | Err(_) => serde_json::Value::Null,
    }
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(settings: &Settings) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build http client: {}", error)))?;
        Ok(Self {
            client,
            base_url: settings.api_base_url.clone(),
            token: settings.api_token.clone(),
        })
    }

    pub fn endpoint(&self, url: &str) -> String {
        format!("{}{}", self.base_url, url)
    }
}

#[async_trait]
impl RequestSender for HttpClient {
    async fn send_request(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let request_id = Uuid::new_v4().to_string();
        let endpoint = self.endpoint(&request.url);
        tracing::debug!(
            request_id = %request_id,
            method = request.method.as_str(),
            url = %endpoint,
            "sending api request"
        );

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&endpoint),
            HttpMethod::Put => self.client.put(&endpoint),
            HttpMethod::Delete => self.client.delete(&endpoint),
        };
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(data) = &request.data {
            builder = builder.json(data);
        }

        let response = builder.send().await.map_err(|error| {
            tracing::warn!(request_id = %request_id, url = %endpoint, error = %error, "api request failed");
            AppError::from(error)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::info!(
            request_id = %request_id,
            method = request.method.as_str(),
            url = %endpoint,
            status,
            "api request completed"
        );

        Ok(ApiResponse {
            status,
            data: envelope_data(&body),
        })
    }
}
