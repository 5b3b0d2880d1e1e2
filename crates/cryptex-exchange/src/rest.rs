//! 서명된 REST 요청 빌더.
//!
//! 모든 거래소 커넥터가 공유하는 요청 파이프라인:
//! 1. 쿼리 문자열 구성 (서명 요청이면 `timestamp` 추가 후 HMAC-SHA256 서명)
//! 2. `X-MBX-APIKEY`, `Accept: application/json` 헤더로 요청 전송
//! 3. 응답 JSON을 대상 타입으로 역직렬화
//!
//! 재시도, 백오프, rate limit 처리는 하지 않습니다.

use std::time::Duration;

use chrono::Utc;
use cryptex_core::{ApiMethod, Credentials};
use hmac::{Hmac, Mac};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, error, warn};

use crate::error::ExchangeError;
use crate::traits::ExchangeResult;

type HmacSha256 = Hmac<Sha256>;

/// API 키 헤더 이름.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// 거래소 에러 응답 본문 (`{"code": -1100, "msg": "..."}`).
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    msg: String,
}

/// HMAC-SHA256으로 페이로드를 서명하고 소문자 16진수로 반환.
pub fn sign(secret: &str, payload: &str) -> ExchangeResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ExchangeError::invalid_argument("api_secret", e.to_string()))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// 현재 UTC 유닉스 시간 (밀리초).
pub fn timestamp_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// 서명된 쿼리 문자열 생성.
///
/// `query`에 `timestamp=<ts>`를 붙이고(비어 있지 않으면 `&`로 연결),
/// 그 결과 전체에 대한 서명을 `&signature=<sig>`로 덧붙입니다.
pub fn signed_query(query: Option<&str>, timestamp: u64, secret: &str) -> ExchangeResult<String> {
    let with_timestamp = match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("{}&timestamp={}", q, timestamp),
        None => format!("timestamp={}", timestamp),
    };
    let signature = sign(secret, &with_timestamp)?;
    Ok(format!("{}&signature={}", with_timestamp, signature))
}

/// 엔드포인트와 쿼리를 합쳐 요청 경로를 만듭니다. 빈 쿼리는 `?`를 붙이지 않습니다.
pub fn build_path(endpoint: &str, query: Option<&str>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("{}?{}", endpoint, q),
        None => endpoint.to_string(),
    }
}

fn http_method(method: ApiMethod) -> Method {
    match method {
        ApiMethod::Get => Method::GET,
        ApiMethod::Post => Method::POST,
        ApiMethod::Put => Method::PUT,
        ApiMethod::Delete => Method::DELETE,
    }
}

/// 자격증명을 보유한 REST 클라이언트.
///
/// 자격증명과 기본 URL은 생성 시 고정되며, 호출 간 공유 상태는 없습니다.
#[derive(Debug, Clone)]
pub struct RestClient {
    credentials: Credentials,
    http: Client,
}

impl RestClient {
    /// 새 REST 클라이언트 생성.
    ///
    /// `timeout`이 `None`이면 HTTP 클라이언트 기본값을 사용합니다.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `ExchangeError::NetworkError`를 반환합니다.
    pub fn new(credentials: Credentials, timeout: Option<Duration>) -> ExchangeResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            ExchangeError::NetworkError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self { credentials, http })
    }

    /// 보유 중인 자격증명.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// REST 기본 URL.
    pub fn base_url(&self) -> &str {
        &self.credentials.base_url
    }

    /// 서명 요청이 가능한지 확인.
    pub fn has_credentials(&self) -> bool {
        self.credentials.has_credentials()
    }

    /// 요청 경로(엔드포인트 + 쿼리)를 만듭니다.
    ///
    /// 서명 요청은 `timestamp`로 현재 시각을 사용합니다.
    pub fn request_path(
        &self,
        endpoint: &str,
        signed: bool,
        query: Option<&str>,
    ) -> ExchangeResult<String> {
        if endpoint.trim().is_empty() {
            return Err(ExchangeError::invalid_argument(
                "endpoint",
                "endpoint cannot be empty",
            ));
        }

        if !signed {
            return Ok(build_path(endpoint, query));
        }

        if !self.has_credentials() {
            return Err(ExchangeError::Unauthorized(format!(
                "{} requires API credentials",
                endpoint
            )));
        }

        let query = signed_query(query, timestamp_ms(), self.credentials.api_secret())?;
        Ok(build_path(endpoint, Some(&query)))
    }

    /// 요청을 실행하고 응답 JSON을 `T`로 역직렬화합니다.
    ///
    /// - `signed`가 true면 `timestamp`와 `signature`를 추가합니다.
    /// - HTTP 504는 `RequestTimeout`, 그 외 실패 상태는 `ApiError`가 됩니다.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: ApiMethod,
        endpoint: &str,
        signed: bool,
        query: Option<&str>,
    ) -> ExchangeResult<T> {
        let path = self.request_path(endpoint, signed, query)?;
        let url = format!("{}{}", self.base_url(), path);

        if signed {
            debug!(%method, endpoint, "REST request (signed)");
        } else {
            debug!(%method, path = %path, "REST request");
        }

        let response = self
            .http
            .request(http_method(method), &url)
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        handle_response(endpoint, response).await
    }
}

/// API 응답 처리.
async fn handle_response<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> ExchangeResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return serde_json::from_str(&body).map_err(|e| {
            error!(endpoint, error = %e, "Failed to parse response body");
            ExchangeError::ParseError(e.to_string())
        });
    }

    if status == StatusCode::GATEWAY_TIMEOUT {
        warn!(endpoint, "Gateway timeout");
        return Err(ExchangeError::RequestTimeout(format!(
            "{} returned {}",
            endpoint, status
        )));
    }

    Err(parse_api_error(&body))
}

/// 실패 응답 본문을 `ApiError`로 변환. JSON이 아니면 `{0, ""}`.
fn parse_api_error(body: &str) -> ExchangeError {
    let parsed = serde_json::from_str::<ApiErrorBody>(body).unwrap_or(ApiErrorBody {
        code: 0,
        msg: String::new(),
    });
    ExchangeError::ApiError {
        code: parsed.code,
        message: parsed.msg,
    }
}
