//! # Studio Wizard
//!
//! The orchestration layer of Scaffold Studio:
//!
//! - **controller**: wizard steps, selections and the entity editor
//! - **api**: the scaffolding service client and job polling
//! - **auth**: the signed-in user as supplied by the host
//! - **config**: `StudioConfig` loaded from TOML plus environment overrides
//!

pub mod api;
pub mod auth;
pub mod config;
pub mod controller;

pub use api::{
    ApiError, ApiResult, HttpScaffoldApi, JobId, JobState, JobStatus, ScaffoldApi,
    TechnologyOptions, wait_for_job,
};
pub use auth::{AuthContext, UserProfile};
pub use config::{ApiConfig, ENV_API_TOKEN, ENV_API_URL, StudioConfig};
pub use controller::{
    PROJECT_NAME_PATTERN, ViewState, WizardController, WizardStep, is_valid_project_name,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
