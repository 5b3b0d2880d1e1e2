//! 설정 관리.
//!
//! TOML 파일과 `CRYPTEX__*` 환경 변수에서 거래소 설정을 로드합니다.
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "pretty"
//!
//! [exchanges.binance]
//! enabled = true
//! recv_window = 5000
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::domain::ExchangeName;
use crate::error::CoreResult;
use crate::types::Credentials;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 거래소별 설정 (키: 거래소 이름, 대소문자 무시)
    #[serde(default)]
    pub exchanges: HashMap<String, ExchangeSettings>,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 거래소 설정.
///
/// # 보안
/// - `Debug` 출력에 시크릿이 포함되지 않도록 자격증명 변환은 `credentials()`로만 합니다.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct ExchangeSettings {
    /// 이 거래소 활성화 여부
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// REST API 기본 URL (없으면 거래소 기본값)
    #[serde(default)]
    pub base_url: Option<String>,
    /// API 키
    #[serde(default)]
    pub api_key: Option<String>,
    /// API 시크릿
    #[serde(default)]
    pub api_secret: Option<String>,
    /// 서명 요청의 수신 윈도우 (밀리초)
    #[serde(default)]
    pub recv_window: Option<u64>,
    /// 요청 타임아웃 (초). 없으면 HTTP 클라이언트 기본값 사용
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for ExchangeSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeSettings")
            .field("enabled", &self.enabled)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***REDACTED***"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "***REDACTED***"))
            .field("recv_window", &self.recv_window)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ExchangeSettings {
    /// 설정값으로 자격증명을 만듭니다.
    pub fn credentials(&self, default_base_url: &str) -> Credentials {
        Credentials::new(
            self.api_key.clone().unwrap_or_default(),
            self.api_secret.clone().unwrap_or_default(),
            self.base_url
                .clone()
                .unwrap_or_else(|| default_base_url.to_string()),
        )
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 환경 변수 예: `CRYPTEX__EXCHANGES__BINANCE__API_KEY`.
    /// 환경 변수 값은 문자열로 유지되고 숫자 필드에서만 변환됩니다 (키 `00123`이 `123`이 되지 않음).
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let builder = config::Config::builder()
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CRYPTEX").separator("__"));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> CoreResult<Self> {
        Self::load("config/default.toml")
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(content, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// 거래소 설정 조회. 키는 대소문자를 구분하지 않습니다.
    pub fn exchange(&self, name: ExchangeName) -> Option<&ExchangeSettings> {
        self.exchanges
            .iter()
            .find(|(key, _)| {
                ExchangeName::from_str(key)
                    .map(|parsed| parsed == name)
                    .unwrap_or(false)
            })
            .map(|(_, settings)| settings)
    }

    /// 활성화된 거래소 목록. 알 수 없는 키는 경고 후 무시합니다.
    pub fn enabled_exchanges(&self) -> Vec<(ExchangeName, &ExchangeSettings)> {
        let mut enabled: Vec<_> = self
            .exchanges
            .iter()
            .filter(|(_, settings)| settings.enabled)
            .filter_map(|(key, settings)| match ExchangeName::from_str(key) {
                Ok(name) => Some((name, settings)),
                Err(_) => {
                    tracing::warn!(exchange = %key, "Ignoring unknown exchange in configuration");
                    None
                }
            })
            .collect();
        enabled.sort_by_key(|(name, _)| name.key());
        enabled
    }
}
