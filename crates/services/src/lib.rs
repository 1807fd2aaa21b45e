#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod catalog_service;
pub mod error;
pub mod progress_service;

pub use prep_core::Clock;

pub use app_services::AppServices;
pub use auth::{AuthProvider, LocalAuth, RemoteAuth, RemoteAuthConfig, SessionContext};
pub use catalog_service::CatalogService;
pub use error::{AppServicesError, AuthError, CatalogError, ProgressServiceError};
pub use progress_service::ProgressService;
