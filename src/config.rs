// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    api::ApiClient,
    handlers::Navigator,
    services::{
        AuthService, BeneficiaryService, DashboardService, DistributionService,
        RationInputService, RationStockService, RationTypeService, UserService,
    },
    storage::{DurableStorage, FileStorage, SessionStore},
};

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_STORAGE_PATH: &str = ".antonieta/storage.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub backend_url: String,
    pub storage_path: PathBuf,
    pub http_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Lê a configuração do ambiente (e do `.env`, se existir).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let backend_url = env::var("ANTONIETA_BACKEND_URL").unwrap_or(defaults.backend_url);
        let storage_path = env::var("ANTONIETA_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_path);
        let http_timeout = match env::var("ANTONIETA_HTTP_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("ANTONIETA_HTTP_TIMEOUT_SECS inválido: {raw}"))?,
            ),
            Err(_) => defaults.http_timeout,
        };

        Ok(Self { backend_url, storage_path, http_timeout })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub session: SessionStore,
    pub navigator: Navigator,
    pub auth_service: AuthService,
    pub beneficiary_service: BeneficiaryService,
    pub distribution_service: DistributionService,
    pub ration_stock_service: RationStockService,
    pub ration_input_service: RationInputService,
    pub ration_type_service: RationTypeService,
    pub user_service: UserService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    /// Estado com a sessão gravada no arquivo configurado.
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let storage = Arc::new(FileStorage::new(config.storage_path.clone()));
        Self::with_storage(config, storage)
    }

    pub fn with_storage(
        config: ClientConfig,
        storage: Arc<dyn DurableStorage>,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Falha ao criar o cliente HTTP")?;

        // --- Monta o gráfico de dependências ---
        let session = SessionStore::new(storage);
        session.init();

        let api = ApiClient::new(http, config.backend_url.clone(), session.clone());
        tracing::debug!("Backend em {}", config.backend_url);

        Ok(Self {
            navigator: Navigator::new(session.clone()),
            auth_service: AuthService::new(api.clone()),
            beneficiary_service: BeneficiaryService::new(api.clone()),
            distribution_service: DistributionService::new(api.clone()),
            ration_stock_service: RationStockService::new(api.clone()),
            ration_input_service: RationInputService::new(api.clone()),
            ration_type_service: RationTypeService::new(api.clone()),
            user_service: UserService::new(api.clone()),
            dashboard_service: DashboardService::new(api),
            session,
            config,
        })
    }
}
