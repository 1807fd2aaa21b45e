use std::sync::Arc;

use prep_core::model::UserSession;
use storage::remote::RemoteConfig;
use storage::repository::Storage;

use crate::Clock;
use crate::auth::{AuthProvider, LocalAuth, RemoteAuth, RemoteAuthConfig, SessionContext};
use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;

/// Assembles the app-facing services over one storage backend and one auth provider.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
    session: SessionContext,
}

impl AppServices {
    /// Wire services onto an already-built storage aggregate.
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, auth: Arc<dyn AuthProvider>) -> Self {
        let catalog = Arc::new(CatalogService::new(
            Arc::clone(&storage.categories),
            Arc::clone(&storage.questions),
        ));
        let progress = Arc::new(ProgressService::new(clock, Arc::clone(&storage.progress)));
        Self {
            catalog,
            progress,
            session: SessionContext::new(auth),
        }
    }

    /// Build services backed by the local `SQLite` store. The configured user, if
    /// any, becomes the session reported by the local auth provider.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        user: Option<UserSession>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(
            &storage,
            clock,
            Arc::new(LocalAuth::new(user)),
        ))
    }

    /// Build services backed by the hosted store and its auth endpoints.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Remote` if the REST client cannot be configured.
    pub fn new_remote(config: &RemoteConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::remote(config)?;
        let auth = RemoteAuth::new(RemoteAuthConfig {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            access_token: config.access_token.clone(),
        });
        Ok(Self::from_storage(&storage, clock, Arc::new(auth)))
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn session(&self) -> SessionContext {
        self.session.clone()
    }
}
