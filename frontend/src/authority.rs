use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::api::{
    AnswerRequest, AnswerResponse, AuthStatusResponse, Authority, GiveUpRequest, GiveUpResponse,
    PaymentStatusResponse, PortalSettings, QuizQuestion,
};
use shared::constants::*;
use shared::{PortalError, PortalResult};

use crate::config::get_api_base_url;

/// The gateway's HTTP API.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpAuthority {
    base_url: String,
}

impl Default for HttpAuthority {
    fn default() -> Self {
        Self::new(get_api_base_url())
    }
}

impl HttpAuthority {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn device_url(&self, endpoint: &str, device_id: &str) -> String {
        let mac = js_sys::encode_uri_component(device_id);
        format!("{}?mac={}", self.url(endpoint), String::from(mac))
    }
}

async fn decode<T: DeserializeOwned>(response: Result<Response, gloo_net::Error>) -> PortalResult<T> {
    let response = response.map_err(|e| PortalError::Network(format!("{:?}", e)))?;
    if !response.ok() {
        return Err(PortalError::Status(response.status()));
    }
    let body = response
        .text()
        .await
        .map_err(|e| PortalError::Network(format!("{:?}", e)))?;
    serde_json::from_str(&body).map_err(|e| PortalError::Decode(e.to_string()))
}

async fn get<T: DeserializeOwned>(url: &str) -> PortalResult<T> {
    decode(Request::get(url).send().await).await
}

async fn post<B: serde::Serialize, T: DeserializeOwned>(url: &str, body: &B) -> PortalResult<T> {
    let request = Request::post(url)
        .header("Content-Type", "application/json")
        .json(body)
        .map_err(|e| PortalError::Network(format!("Failed to build request: {:?}", e)))?;
    decode(request.send().await).await
}

impl Authority for HttpAuthority {
    async fn authorization_status(&self, device_id: &str) -> PortalResult<AuthStatusResponse> {
        get(&self.device_url(AUTH_STATUS_ENDPOINT, device_id)).await
    }

    async fn fetch_question(&self) -> PortalResult<QuizQuestion> {
        get(&self.url(QUIZ_ENDPOINT)).await
    }

    async fn submit_answer(&self, request: &AnswerRequest) -> PortalResult<AnswerResponse> {
        post(&self.url(QUIZ_ANSWER_ENDPOINT), request).await
    }

    async fn give_up(&self, request: &GiveUpRequest) -> PortalResult<GiveUpResponse> {
        post(&self.url(QUIZ_GIVE_UP_ENDPOINT), request).await
    }

    async fn payment_status(&self, device_id: &str) -> PortalResult<PaymentStatusResponse> {
        get(&self.device_url(PAYMENT_CHECK_ENDPOINT, device_id)).await
    }

    async fn portal_settings(&self) -> PortalResult<PortalSettings> {
        get(&self.url(PORTAL_CONFIG_ENDPOINT)).await
    }
}
