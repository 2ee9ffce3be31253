//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use eduhub_auth::{SessionManager, TenantGuard};
use eduhub_core::config::AppConfig;
use eduhub_core::error::AppError;
use eduhub_database::Stores;
use eduhub_service::{
    AccountService, CourseService, InstituteService, StudentService, TeacherService,
};

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When the process started serving
    pub started_at: Instant,

    // ── Auth ─────────────────────────────────────────────────
    /// Login, refresh and access-token verification
    pub session_manager: Arc<SessionManager>,
    /// Decides the tenant scope of each request
    pub tenant_guard: Arc<TenantGuard>,
    /// Per-client limiter for the credential endpoints
    pub rate_limiter: RateLimiter,

    // ── Services ─────────────────────────────────────────────
    /// Registration and profile
    pub account_service: Arc<AccountService>,
    /// Institute onboarding
    pub institute_service: Arc<InstituteService>,
    /// Course catalogue
    pub course_service: Arc<CourseService>,
    /// Student roster
    pub student_service: Arc<StudentService>,
    /// Teacher roster
    pub teacher_service: Arc<TeacherService>,
}

impl AppState {
    /// Wires every service over the given stores.
    pub fn new(config: AppConfig, stores: &Stores) -> Result<Self, AppError> {
        let guard = TenantGuard::new(&config.tenant)?;

        let session_manager = SessionManager::new(stores.users.clone(), &config.auth);
        let account_service = AccountService::new(
            stores.users.clone(),
            stores.institutes.clone(),
            &config.auth,
            guard.clone(),
        );
        let institute_service = InstituteService::new(
            stores.institutes.clone(),
            stores.users.clone(),
            guard.clone(),
        );

        Ok(Self {
            rate_limiter: RateLimiter::from_config(&config.rate_limit),
            config: Arc::new(config),
            started_at: Instant::now(),
            session_manager: Arc::new(session_manager),
            tenant_guard: Arc::new(guard),
            account_service: Arc::new(account_service),
            institute_service: Arc::new(institute_service),
            course_service: Arc::new(CourseService::new(
                stores.courses.clone(),
                stores.institutes.clone(),
            )),
            student_service: Arc::new(StudentService::new(
                stores.students.clone(),
                stores.institutes.clone(),
            )),
            teacher_service: Arc::new(TeacherService::new(
                stores.teachers.clone(),
                stores.institutes.clone(),
            )),
        })
    }
}
