//! 거래소 레지스트리와 클라이언트 팩토리.
//!
//! 거래소 이름(대소문자 무시)으로 클라이언트를 조회합니다.
//!
//! ```no_run
//! use cryptex_core::{AppConfig, Symbol};
//! use cryptex_exchange::CryptoClient;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load_default()?;
//! let client = CryptoClient::from_config(&config)?;
//! let price = client
//!     .exchange("binance")?
//!     .get_ticker_price(&Symbol::crypto("ETH", "BTC"))
//!     .await?;
//! println!("{} {}", price.pair, price.price);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use cryptex_core::{AppConfig, ExchangeName, ExchangeSettings};
use tracing::info;

use crate::connector::{
    BinanceClient, BittrexClient, UnsupportedExchangeClient, BINANCE_API_URL, BITTREX_API_URL,
};
use crate::traits::{ExchangeClient, ExchangeResult};
use crate::ExchangeError;

/// 거래소 이름 -> 클라이언트 매핑.
#[derive(Default, Clone)]
pub struct ExchangeRegistry {
    clients: HashMap<ExchangeName, Arc<dyn ExchangeClient>>,
}

impl std::fmt::Debug for ExchangeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeRegistry")
            .field("exchanges", &self.keys())
            .finish()
    }
}

impl ExchangeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 클라이언트 등록. 같은 거래소가 이미 있으면 교체하고 이전 클라이언트를 반환합니다.
    pub fn register(&mut self, client: Arc<dyn ExchangeClient>) -> Option<Arc<dyn ExchangeClient>> {
        self.clients.insert(client.key(), client)
    }

    /// 키로 조회. 없으면 `ExchangeError::ExchangeNotFound`.
    pub fn get(&self, key: &str) -> ExchangeResult<Arc<dyn ExchangeClient>> {
        let name = ExchangeName::from_str(key)
            .map_err(|_| ExchangeError::ExchangeNotFound(key.to_string()))?;
        self.get_by_name(name)
    }

    pub fn get_by_name(&self, name: ExchangeName) -> ExchangeResult<Arc<dyn ExchangeClient>> {
        self.clients
            .get(&name)
            .cloned()
            .ok_or_else(|| ExchangeError::ExchangeNotFound(name.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        ExchangeName::from_str(key)
            .map(|name| self.clients.contains_key(&name))
            .unwrap_or(false)
    }

    /// 등록된 거래소 목록 (키 순).
    pub fn keys(&self) -> Vec<ExchangeName> {
        let mut keys: Vec<_> = self.clients.keys().copied().collect();
        keys.sort_by_key(|name| name.key());
        keys
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

/// 여러 거래소 클라이언트를 묶는 진입점.
#[derive(Debug, Clone)]
pub struct CryptoClient {
    registry: ExchangeRegistry,
}

impl CryptoClient {
    pub fn new(registry: ExchangeRegistry) -> Self {
        Self { registry }
    }

    /// 모든 거래소를 공개 API 전용으로 등록합니다.
    pub fn with_defaults() -> ExchangeResult<Self> {
        let mut registry = ExchangeRegistry::new();
        for name in ExchangeName::ALL {
            registry.register(Self::build_client(name, None)?);
        }
        Ok(Self::new(registry))
    }

    /// 설정에서 활성화된 거래소만 등록합니다.
    pub fn from_config(config: &AppConfig) -> ExchangeResult<Self> {
        let mut registry = ExchangeRegistry::new();
        for (name, settings) in config.enabled_exchanges() {
            registry.register(Self::build_client(name, Some(settings))?);
        }

        info!(exchanges = ?registry.keys(), "Exchange clients registered");
        Ok(Self::new(registry))
    }

    /// 거래소별 클라이언트 생성.
    pub fn build_client(
        name: ExchangeName,
        settings: Option<&ExchangeSettings>,
    ) -> ExchangeResult<Arc<dyn ExchangeClient>> {
        let default_url = match name {
            ExchangeName::Binance => BINANCE_API_URL,
            ExchangeName::Bittrex => BITTREX_API_URL,
            other => other.website(),
        };
        let credentials = settings
            .map(|s| s.credentials(default_url))
            .unwrap_or_else(|| cryptex_core::Credentials::anonymous(default_url));
        let timeout = settings
            .and_then(|s| s.timeout_secs)
            .map(Duration::from_secs);

        let client: Arc<dyn ExchangeClient> = match name {
            ExchangeName::Binance => {
                let mut client = BinanceClient::with_timeout(credentials, timeout)?;
                if let Some(recv_window) = settings.and_then(|s| s.recv_window) {
                    client = client.with_recv_window(recv_window);
                }
                Arc::new(client)
            }
            ExchangeName::Bittrex => Arc::new(BittrexClient::with_timeout(credentials, timeout)?),
            other => Arc::new(UnsupportedExchangeClient::new(other)),
        };
        Ok(client)
    }

    pub fn registry(&self) -> &ExchangeRegistry {
        &self.registry
    }

    /// 거래소 이름으로 클라이언트 조회 (대소문자 무시).
    pub fn exchange(&self, key: &str) -> ExchangeResult<Arc<dyn ExchangeClient>> {
        self.registry.get(key)
    }

    pub fn binance(&self) -> ExchangeResult<Arc<dyn ExchangeClient>> {
        self.registry.get_by_name(ExchangeName::Binance)
    }

    pub fn bittrex(&self) -> ExchangeResult<Arc<dyn ExchangeClient>> {
        self.registry.get_by_name(ExchangeName::Bittrex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup_case_insensitive() {
        let mut registry = ExchangeRegistry::new();
        registry.register(Arc::new(UnsupportedExchangeClient::new(ExchangeName::HitBtc)));

        assert!(registry.contains("hitbtc"));
        assert_eq!(registry.get("HITBTC").unwrap().key(), ExchangeName::HitBtc);
        assert!(!registry.contains("kraken"));
    }

    #[test]
    fn test_registry_missing_exchange() {
        let registry = ExchangeRegistry::new();
        assert!(matches!(
            registry.get("Kraken"),
            Err(ExchangeError::ExchangeNotFound(ref name)) if name == "Kraken"
        ));
        assert!(matches!(
            registry.get("mtgox"),
            Err(ExchangeError::ExchangeNotFound(ref name)) if name == "mtgox"
        ));
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = ExchangeRegistry::new();
        assert!(registry
            .register(Arc::new(UnsupportedExchangeClient::new(ExchangeName::Liqui)))
            .is_none());
        assert!(registry
            .register(Arc::new(UnsupportedExchangeClient::new(ExchangeName::Liqui)))
            .is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_with_defaults_registers_all() {
        let client = CryptoClient::with_defaults().unwrap();
        assert_eq!(client.registry().len(), ExchangeName::ALL.len());

        let binance = client.binance().unwrap();
        assert_eq!(binance.api_version(), "v3");
        assert_eq!(binance.url(), BINANCE_API_URL);
        assert!(!binance.has_credentials());
        assert_eq!(client.bittrex().unwrap().api_version(), "v1.1");
    }
}
