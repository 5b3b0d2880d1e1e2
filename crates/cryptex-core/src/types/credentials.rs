//! 거래소 API 자격증명.
//!
//! 클라이언트 인스턴스 생성 시 한 번 설정되며 이후 변경되지 않습니다.
//!
//! ## 보안 고려사항
//! - API 시크릿은 `SecretString`으로 보관하여 실수로 로그에 남지 않도록 합니다.
//! - `Debug` 구현은 API 키를 마스킹합니다.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// API 키, 시크릿, REST 기본 URL 묶음.
pub struct Credentials {
    /// API 키 (`X-MBX-APIKEY` 헤더로 전송)
    pub api_key: String,
    /// API 시크릿 (HMAC 서명 키)
    api_secret: SecretString,
    /// REST API 기본 URL (예: `https://api.binance.com`)
    pub base_url: String,
}

impl Credentials {
    /// 새 자격증명 생성.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// 공개 API 전용 (키 없음) 자격증명.
    pub fn anonymous(base_url: impl Into<String>) -> Self {
        Self::new(String::new(), String::new(), base_url)
    }

    /// 환경 변수에서 생성.
    ///
    /// `<PREFIX>_API_KEY`, `<PREFIX>_API_SECRET`, `<PREFIX>_BASE_URL`을 읽습니다.
    /// 키/시크릿이 없으면 공개 API 전용 자격증명을 반환합니다.
    pub fn from_env(prefix: &str, default_base_url: &str) -> Self {
        let prefix = prefix.to_uppercase();
        let var = |name: &str| std::env::var(format!("{}_{}", prefix, name)).ok();

        Self::new(
            var("API_KEY").unwrap_or_default(),
            var("API_SECRET").unwrap_or_default(),
            var("BASE_URL").unwrap_or_else(|| default_base_url.to_string()),
        )
    }

    /// API 시크릿 원문. 서명 계산에만 사용해야 합니다.
    pub fn api_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }

    /// 키 또는 시크릿 중 하나라도 설정되어 있는지 확인.
    pub fn has_credentials(&self) -> bool {
        !(self.api_key.trim().is_empty() && self.api_secret().trim().is_empty())
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret().to_string()),
            base_url: self.base_url.clone(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chars: Vec<char> = self.api_key.chars().collect();
        let masked_key = if chars.len() > 8 {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}...{}", head, tail)
        } else {
            "***REDACTED***".to_string()
        };

        f.debug_struct("Credentials")
            .field("api_key", &masked_key)
            .field("api_secret", &"***REDACTED***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_credentials() {
        assert!(!Credentials::anonymous("https://api.binance.com").has_credentials());
        assert!(Credentials::new("key", "", "https://api.binance.com").has_credentials());
        assert!(Credentials::new("", "secret", "https://api.binance.com").has_credentials());
    }

    #[test]
    fn test_base_url_trailing_slash_removed() {
        let creds = Credentials::anonymous("https://api.binance.com/ ");
        assert_eq!(creds.base_url, "https://api.binance.com");
    }

    #[test]
    fn test_debug_masks_secrets() {
        let creds = Credentials::new(
            "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A",
            "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j",
            "https://api.binance.com",
        );
        let debug = format!("{:?}", creds);

        assert!(debug.contains("vmPU...Eh8A"));
        assert!(!debug.contains("NhqPtmdS"));
        assert_eq!(creds.clone().api_secret(), creds.api_secret());
    }

    #[test]
    fn test_debug_masks_non_ascii_key() {
        let short = Credentials::new("키키키키키", "secret", "https://api.binance.com");
        assert!(format!("{:?}", short).contains("***REDACTED***"));

        let long = Credentials::new("가나다라마바사아자차", "secret", "https://api.binance.com");
        assert!(format!("{:?}", long).contains("가나다라...사아자차"));
    }
}
