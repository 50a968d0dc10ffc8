use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::mongo::MongoStore;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = Arc::new(MongoStore::connect(&config.mongodb_uri, &config.database).await?)
            as Arc<dyn Store>;
        Ok(Self { store, config })
    }

    pub fn from_parts(store: Arc<dyn Store>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    #[cfg(test)]
    pub(crate) fn for_tests(store: Arc<dyn Store>) -> Self {
        use crate::config::JwtConfig;

        let config = Arc::new(AppConfig {
            mongodb_uri: String::new(),
            database: "wellness".into(),
            jwt: JwtConfig {
                secret: "test-secret".into(),
                ttl_hours: 1,
            },
        });
        Self::from_parts(store, config)
    }
}
