//! Application state management for tigger-tui.
//!
//! This module contains the core `App` struct that manages all application
//! state: the session, the login flow, cached project data, and background
//! task coordination.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::auth::{Session, SessionData};
use crate::config::Config;
use crate::models::{Identity, ProjectData, ProjectState, ProjectSummary};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// 32 covers a full refresh (one listing plus a state per project) with headroom.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for username input
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Number of items to scroll on page up/down
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Maximum concurrent project-state prefetches.
/// Keeps refresh fast without hammering small self-hosted servers.
const MAX_CONCURRENT_STATE_FETCHES: usize = 4;

/// Fixed user-facing message for any authentication failure. Matches the
/// server UI's copy; the backend's structured detail is deliberately not
/// surfaced here.
pub const LOGIN_ERROR_MSG: &str = "Error in user authentification";

/// Status message signalling that the server rejected the session token
const SESSION_EXPIRED_MSG: &str = "Session expired. Please log in again.";

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Projects,
    Help,
}

impl Tab {
    /// Get the display title for this tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Projects => "Projects",
            Tab::Help => "Help",
        }
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Home => Tab::Projects,
            Tab::Projects => Tab::Help,
            Tab::Help => Tab::Home,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Home => Tab::Help,
            Tab::Projects => Tab::Home,
            Tab::Help => Tab::Projects,
        }
    }
}

/// Current UI focus area (project list or detail panel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Detail,
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    LoggingIn,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
}

/// Phase of the login flow.
///
/// `Failed` returns to `Idle` implicitly on the next submission; only the
/// displayed error text survives between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginPhase {
    Idle,
    Submitting,
    Authenticated,
    Failed,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Which leg of the login flow failed.
///
/// A rejected token request leaves any existing session valid; a failed
/// identity confirmation means the freshly issued token is unusable, so the
/// session is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginFailure {
    Token,
    Identity,
}

/// Results sent from spawned network tasks back to the main loop
enum TaskResult {
    /// Login flow finished: token plus confirmed identity, or the leg
    /// that failed
    Login(Result<(String, Identity), LoginFailure>),
    /// Project listing fetched successfully
    Projects(Vec<ProjectSummary>),
    /// Live state for a single project (name, state)
    ProjectState(String, Box<ProjectState>),
    /// A refresh task failed with a user-facing message
    Error(String),
    /// Signal that a refresh pass has completed
    RefreshComplete,
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub session: Session,
    pub api: ApiClient,

    // UI state
    pub state: AppState,
    pub current_tab: Tab,
    pub focus: Focus,

    // Login form state
    pub login_username: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,
    pub login_phase: LoginPhase,

    // Cached data
    pub projects: Vec<ProjectSummary>,
    pub project_states: HashMap<String, ProjectState>,
    pub project_selection: usize,
    pub active_project: Option<String>,

    // Background task channel
    task_rx: Option<mpsc::Receiver<TaskResult>>,
    task_tx: mpsc::Sender<TaskResult>,

    // Status message
    pub status_message: Option<String>,

    // A refresh pass is currently in flight
    pub refreshing: bool,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        debug!("App::new() starting");
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let state_dir = config
            .state_dir()
            .unwrap_or_else(|_| PathBuf::from("./state"));
        Self::with_parts(config, state_dir)
    }

    /// Build the app from explicit parts (also used by tests)
    pub(crate) fn with_parts(config: Config, state_dir: PathBuf) -> Result<Self> {
        // Load a persisted session from disk if one exists
        let mut session = Session::new(state_dir);
        let load_result = session.load();
        debug!(?load_result, has_data = session.data.is_some(), "Session loaded");

        let mut api = ApiClient::new(config.api_url())?;

        // If we have a valid session, adopt it on the API client
        if let Some(ref data) = session.data {
            if !data.is_expired() {
                api.set_session(data.token.clone(), data.username.clone());
                debug!("Session adopted on API client");
            }
        }

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        // Prefill the login form from env vars or config
        let login_username = std::env::var("TIGGER_USERNAME")
            .ok()
            .or_else(|| config.last_username.clone())
            .unwrap_or_default();
        let login_password = std::env::var("TIGGER_PASSWORD").unwrap_or_default();

        Ok(Self {
            config,
            session,
            api,

            state: AppState::Normal,
            current_tab: Tab::Home,
            focus: Focus::List,

            login_username,
            login_password,
            login_focus: LoginFocus::Username,
            login_error: None,
            login_phase: LoginPhase::Idle,

            projects: Vec::new(),
            project_states: HashMap::new(),
            project_selection: 0,
            active_project: None,

            task_rx: Some(rx),
            task_tx: tx,

            status_message: None,
            refreshing: false,
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Check if the user is authenticated with a valid session
    pub fn is_authenticated(&self) -> bool {
        self.session.is_valid()
    }

    /// Start the login process (show the login overlay)
    pub fn start_login(&mut self) {
        self.state = AppState::LoggingIn;
        self.login_focus = if self.login_username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };
        self.login_error = None;
        self.login_phase = LoginPhase::Idle;
    }

    /// Close the login overlay without submitting
    pub fn cancel_login(&mut self) {
        self.state = AppState::Normal;
        self.login_error = None;
        self.login_phase = LoginPhase::Idle;
    }

    /// Submit the login form: spawn the login flow as a background task.
    /// Only one flow can be in progress at a time.
    pub fn submit_login(&mut self) {
        if self.login_phase == LoginPhase::Submitting {
            return;
        }

        let username = self.login_username.trim().to_string();
        let password = self.login_password.clone();

        if username.is_empty() || password.is_empty() {
            self.login_error = Some("Username and password required".to_string());
            return;
        }

        self.login_error = None;
        self.login_phase = LoginPhase::Submitting;

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = Self::run_login(&api, &username, &password).await;
            Self::send_result(&tx, TaskResult::Login(result)).await;
        });
    }

    /// The two-step login flow: acquire a token, then confirm the identity
    /// behind it. Login alone is not sufficient to mark the user
    /// authenticated. Both legs display the same generic message; only
    /// which leg failed is reported back.
    async fn run_login(
        api: &ApiClient,
        username: &str,
        password: &str,
    ) -> Result<(String, Identity), LoginFailure> {
        let token = match api.login(username, password).await {
            Ok(token) => token,
            Err(e) => {
                error!(error = %e, "Login request failed");
                return Err(LoginFailure::Token);
            }
        };

        match api.fetch_identity(&token).await {
            Ok(identity) => Ok((token, identity)),
            Err(e) => {
                error!(error = %e, "Identity fetch failed after login");
                Err(LoginFailure::Identity)
            }
        }
    }

    /// Apply the outcome of a login flow. The session is written exactly
    /// once per submission, and only after the identity has been confirmed
    /// with the freshly issued token.
    fn complete_login(&mut self, outcome: Result<(String, Identity), LoginFailure>) {
        match outcome {
            Ok((token, identity)) => {
                self.session.update(SessionData {
                    token: token.clone(),
                    username: identity.username.clone(),
                    status: identity.status.clone(),
                    created_at: Utc::now(),
                });
                if let Err(e) = self.session.save() {
                    warn!(error = %e, "Failed to save session");
                }

                self.api.set_session(token, identity.username.clone());

                self.config.last_username = Some(identity.username);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                self.login_password.clear();
                self.login_error = None;
                self.login_phase = LoginPhase::Authenticated;
                self.state = AppState::Normal;
                // The authenticated landing page
                self.current_tab = Tab::Projects;
                info!("Login successful");
            }
            Err(leg) => {
                // A failed identity confirmation discards the session; a
                // rejected credential attempt leaves an existing one intact
                if leg == LoginFailure::Identity {
                    if let Err(e) = self.session.clear() {
                        warn!(error = %e, "Failed to clear session after login failure");
                    }
                    self.api.clear_session();
                }
                self.login_phase = LoginPhase::Failed;
                self.login_error = Some(LOGIN_ERROR_MSG.to_string());
            }
        }
    }

    /// Log out: invalidate the session client-side.
    ///
    /// On failure the session is left untouched and no navigation occurs.
    /// Logging out with no session present is a no-op.
    pub fn logout(&mut self) {
        if self.session.data.is_none() {
            return;
        }

        match self.session.clear() {
            Ok(()) => {
                self.api.clear_session();
                self.projects.clear();
                self.project_states.clear();
                self.active_project = None;
                self.project_selection = 0;
                self.login_phase = LoginPhase::Idle;
                // Redirect to the home route
                self.current_tab = Tab::Home;
                self.status_message = Some("Logged out".to_string());
                info!("Logged out");
            }
            Err(e) => {
                warn!(error = %e, "Logout failed, session left in place");
                self.status_message = Some("Logout failed".to_string());
            }
        }
    }

    /// Interactive login for CLI mode (`--login`)
    pub async fn login_interactive(&mut self) -> Result<()> {
        println!("\n=== Active Tigger Login ===\n");

        let username = Self::prompt_username(self.config.last_username.as_deref())?;
        let password = rpassword::prompt_password("Password: ")?;

        println!("\nAuthenticating...");

        let token = self.api.login(&username, &password).await?;
        let identity = self.api.fetch_identity(&token).await?;
        let display_name = identity.username.clone();
        self.complete_login(Ok((token, identity)));

        println!("Logged in as {}\n", display_name);
        Ok(())
    }

    fn prompt_username(default: Option<&str>) -> Result<String> {
        match default {
            Some(last_user) => print!("Username [{}]: ", last_user),
            None => print!("Username: "),
        }
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            default
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("Username required"))
        } else {
            Ok(input.to_string())
        }
    }

    // =========================================================================
    // Project Data
    // =========================================================================

    /// Spawn a background task to refresh the project listing and prefetch
    /// project states
    pub fn refresh_projects(&mut self) {
        if !self.session.is_valid() {
            self.status_message = Some("Error: Not authenticated".to_string());
            return;
        }
        if self.refreshing {
            return;
        }
        self.refreshing = true;

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            Self::execute_projects_refresh(api, tx).await;
        });

        self.status_message = Some("Refreshing projects...".to_string());
    }

    async fn execute_projects_refresh(api: ApiClient, tx: mpsc::Sender<TaskResult>) {
        match api.user_projects().await {
            Ok(projects) => {
                let names: Vec<String> = projects
                    .iter()
                    .map(|p| p.parameters.slug().to_string())
                    .collect();
                Self::send_result(&tx, TaskResult::Projects(projects)).await;

                // Prefetch live state for each project with bounded concurrency
                let mut states = stream::iter(names.into_iter().map(|name| {
                    let api = api.clone();
                    async move {
                        let state = api.project_state(&name).await;
                        (name, state)
                    }
                }))
                .buffer_unordered(MAX_CONCURRENT_STATE_FETCHES);

                while let Some((name, state)) = states.next().await {
                    match state {
                        Ok(state) => {
                            Self::send_result(&tx, TaskResult::ProjectState(name, Box::new(state)))
                                .await;
                        }
                        Err(e) => {
                            warn!(project = %name, error = %e, "State prefetch failed");
                        }
                    }
                }
            }
            Err(e) => {
                Self::send_result(&tx, TaskResult::Error(Self::task_error_message(&e))).await;
            }
        }

        Self::send_result(&tx, TaskResult::RefreshComplete).await;
    }

    /// Open a project: fetch its current state and mark it active
    pub fn open_project(&mut self, name: String) {
        if !self.session.is_valid() {
            self.status_message = Some("Error: Not authenticated".to_string());
            return;
        }

        self.active_project = Some(name.clone());
        self.focus = Focus::Detail;

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            match api.project_state(&name).await {
                Ok(state) => {
                    Self::send_result(&tx, TaskResult::ProjectState(name, Box::new(state))).await;
                }
                Err(e) => {
                    Self::send_result(&tx, TaskResult::Error(Self::task_error_message(&e))).await;
                }
            }
        });
    }

    /// Create a project from a descriptor (used by the CLI mode)
    pub async fn create_project(&self, project: &ProjectData) -> Result<()> {
        self.api.create_project(project).await
    }

    /// The project summary currently under the cursor
    pub fn selected_project(&self) -> Option<&ProjectSummary> {
        self.projects.get(self.project_selection)
    }

    /// Cached state for the selected project, if already fetched
    pub fn selected_project_state(&self) -> Option<&ProjectState> {
        let slug = self.selected_project()?.parameters.slug();
        self.project_states.get(slug)
    }

    /// Map a background task error to a user-facing status message
    fn task_error_message(e: &anyhow::Error) -> String {
        match e.downcast_ref::<ApiError>() {
            Some(ApiError::Unauthorized) => SESSION_EXPIRED_MSG.to_string(),
            Some(ApiError::AuthorizationMissing) => "Error: Not authenticated".to_string(),
            _ => format!("Refresh failed: {}", e),
        }
    }

    // =========================================================================
    // Background Task Processing
    // =========================================================================

    /// Helper to send task results, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<TaskResult>, result: TaskResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send task result - channel closed");
        }
    }

    /// Drain and apply all pending results from background tasks
    pub fn check_background_tasks(&mut self) {
        let results: Vec<TaskResult> = {
            if let Some(ref mut rx) = self.task_rx {
                let mut results = Vec::new();
                while let Ok(result) = rx.try_recv() {
                    results.push(result);
                }
                results
            } else {
                Vec::new()
            }
        };

        for result in results {
            self.process_task_result(result);
        }
    }

    fn process_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Login(outcome) => {
                let succeeded = outcome.is_ok();
                self.complete_login(outcome);
                if succeeded {
                    self.refresh_projects();
                }
            }
            TaskResult::Projects(projects) => {
                self.projects = projects;
                if self.project_selection >= self.projects.len() {
                    self.project_selection = 0;
                }
            }
            TaskResult::ProjectState(name, state) => {
                self.project_states.insert(name, *state);
            }
            TaskResult::Error(msg) => {
                if msg == SESSION_EXPIRED_MSG {
                    if let Err(e) = self.session.clear() {
                        warn!(error = %e, "Failed to clear expired session");
                    }
                    self.api.clear_session();
                    self.start_login();
                }
                self.status_message = Some(msg);
                self.refreshing = false;
            }
            TaskResult::RefreshComplete => {
                self.refreshing = false;
                self.status_message = Some(format!("{} projects", self.projects.len()));
            }
        }
    }

    // =========================================================================
    // Selection movement
    // =========================================================================

    pub fn select_next_project(&mut self) {
        if !self.projects.is_empty() {
            self.project_selection = (self.project_selection + 1).min(self.projects.len() - 1);
        }
    }

    pub fn select_prev_project(&mut self) {
        self.project_selection = self.project_selection.saturating_sub(1);
    }

    pub fn page_down_projects(&mut self) {
        if !self.projects.is_empty() {
            self.project_selection =
                (self.project_selection + PAGE_SCROLL_SIZE).min(self.projects.len() - 1);
        }
    }

    pub fn page_up_projects(&mut self) {
        self.project_selection = self.project_selection.saturating_sub(PAGE_SCROLL_SIZE);
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a username character should be accepted
pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let dir = std::env::temp_dir().join(format!(
            "tigger-app-test-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        App::with_parts(Config::default(), dir).expect("Failed to build app")
    }

    fn sample_identity() -> Identity {
        Identity {
            username: "alice".to_string(),
            status: Some("manager".to_string()),
        }
    }

    // -------------------------------------------------------------------------
    // Tab Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_tab_next() {
        assert_eq!(Tab::Home.next(), Tab::Projects);
        assert_eq!(Tab::Projects.next(), Tab::Help);
        assert_eq!(Tab::Help.next(), Tab::Home); // Wraps around
    }

    #[test]
    fn test_tab_prev() {
        assert_eq!(Tab::Home.prev(), Tab::Help); // Wraps around
        assert_eq!(Tab::Projects.prev(), Tab::Home);
        assert_eq!(Tab::Help.prev(), Tab::Projects);
    }

    // -------------------------------------------------------------------------
    // Login Flow Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_complete_login_success_sets_full_session() {
        let mut app = test_app();
        app.state = AppState::LoggingIn;
        app.login_password = "secret".to_string();

        app.complete_login(Ok(("tok123".to_string(), sample_identity())));

        let data = app.session.data.as_ref().expect("Session should be present");
        assert_eq!(data.token, "tok123");
        assert_eq!(data.username, "alice");
        assert!(app.is_authenticated());

        // Landed on the authenticated landing page with the form reset
        assert_eq!(app.current_tab, Tab::Projects);
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.login_phase, LoginPhase::Authenticated);
        assert!(app.login_password.is_empty());
        assert!(app.login_error.is_none());

        app.session.clear().expect("Cleanup failed");
    }

    #[test]
    fn test_complete_login_failure_leaves_no_session() {
        let mut app = test_app();
        app.state = AppState::LoggingIn;
        app.current_tab = Tab::Home;

        app.complete_login(Err(LoginFailure::Token));

        assert!(app.session.data.is_none());
        assert!(!app.is_authenticated());
        assert_eq!(app.login_phase, LoginPhase::Failed);
        assert_eq!(app.login_error.as_deref(), Some(LOGIN_ERROR_MSG));
        // Still on the login overlay, no navigation happened
        assert_eq!(app.state, AppState::LoggingIn);
        assert_eq!(app.current_tab, Tab::Home);
    }

    #[test]
    fn test_identity_failure_clears_prior_session() {
        let mut app = test_app();

        // A previous session exists, then a re-login attempt gets a token
        // whose identity cannot be confirmed
        app.complete_login(Ok(("old-token".to_string(), sample_identity())));
        assert!(app.session.data.is_some());

        app.complete_login(Err(LoginFailure::Identity));
        assert!(app.session.data.is_none());
        assert_eq!(app.login_error.as_deref(), Some(LOGIN_ERROR_MSG));
    }

    #[test]
    fn test_rejected_credentials_keep_prior_session() {
        let mut app = test_app();

        // Logged in, then a mistyped password on a fresh login attempt
        app.complete_login(Ok(("tok123".to_string(), sample_identity())));
        app.start_login();

        app.complete_login(Err(LoginFailure::Token));

        // The existing session survives; only the attempt failed
        let data = app.session.data.as_ref().expect("Session should survive");
        assert_eq!(data.token, "tok123");
        assert!(app.is_authenticated());
        assert_eq!(app.login_phase, LoginPhase::Failed);
        assert_eq!(app.login_error.as_deref(), Some(LOGIN_ERROR_MSG));

        app.session.clear().expect("Cleanup failed");
    }

    // -------------------------------------------------------------------------
    // Logout Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_logout_clears_session_and_navigates_home() {
        let mut app = test_app();
        app.complete_login(Ok(("tok123".to_string(), sample_identity())));
        assert_eq!(app.current_tab, Tab::Projects);

        app.logout();

        assert!(app.session.data.is_none());
        assert_eq!(app.current_tab, Tab::Home);
        assert!(app.projects.is_empty());
        assert!(app.active_project.is_none());
    }

    #[test]
    fn test_logout_failure_leaves_session_and_tab() {
        let dir = std::env::temp_dir().join(format!(
            "tigger-logout-fail-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        let mut app =
            App::with_parts(Config::default(), dir.clone()).expect("Failed to build app");
        app.complete_login(Ok(("tok123".to_string(), sample_identity())));
        assert_eq!(app.current_tab, Tab::Projects);

        // Swap the session file for a non-empty directory so removal fails
        let path = dir.join("session.json");
        std::fs::remove_file(&path).expect("Session file should exist");
        std::fs::create_dir_all(path.join("blocker")).expect("Failed to set up blocker");

        app.logout();

        // Session and position untouched, only a status message
        assert!(app.session.data.is_some());
        assert!(app.is_authenticated());
        assert_eq!(app.current_tab, Tab::Projects);
        assert_eq!(app.status_message.as_deref(), Some("Logout failed"));

        std::fs::remove_dir_all(&path).expect("Cleanup failed");
    }

    #[test]
    fn test_logout_without_session_is_noop() {
        let mut app = test_app();
        app.current_tab = Tab::Help;

        app.logout();

        assert!(app.session.data.is_none());
        // No navigation and no status change
        assert_eq!(app.current_tab, Tab::Help);
        assert!(app.status_message.is_none());
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_username_char() {
        assert!(can_add_username_char(0, 'a'));
        assert!(can_add_username_char(49, 'z'));
        // Exceeds max length
        assert!(!can_add_username_char(50, 'a'));
        // Control characters rejected
        assert!(!can_add_username_char(0, '\n'));
        assert!(!can_add_username_char(0, '\t'));
    }

    #[test]
    fn test_can_add_password_char() {
        assert!(can_add_password_char(0, 'a'));
        assert!(can_add_password_char(127, '!'));
        assert!(!can_add_password_char(128, 'a'));
        assert!(!can_add_password_char(0, '\x00'));
    }

    // -------------------------------------------------------------------------
    // Selection Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_project_selection_bounds() {
        let mut app = test_app();
        app.select_next_project();
        assert_eq!(app.project_selection, 0); // Empty list

        app.projects = vec![
            serde_json::from_str(r#"{"parameters": {"project_name": "a"}}"#).unwrap(),
            serde_json::from_str(r#"{"parameters": {"project_name": "b"}}"#).unwrap(),
        ];
        app.select_next_project();
        assert_eq!(app.project_selection, 1);
        app.select_next_project();
        assert_eq!(app.project_selection, 1); // Clamped at end
        app.select_prev_project();
        assert_eq!(app.project_selection, 0);
        app.select_prev_project();
        assert_eq!(app.project_selection, 0); // Clamped at start
    }
}
