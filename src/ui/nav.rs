//! Navigation gate: which navigation affordances are available, based on
//! whether a session is present.
//!
//! The page list itself is static; the session only decides the indicator
//! (login entry point vs. logged-in identity with a logout action) and
//! whether a page can be entered without logging in first.

use crate::app::Tab;
use crate::auth::Session;

/// A navigation entry, mirroring the server UI's route list
pub struct NavPage {
    pub id: &'static str,
    pub label: &'static str,
    pub route: &'static str,
    pub key: char,
    pub target: NavTarget,
}

/// What selecting a page does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// Open the login overlay
    Login,
    /// Switch to a content tab
    Tab(Tab),
}

/// Static page list. Unrelated to the session, but consulted alongside it
/// to render the active-route indicator.
pub const PAGES: [NavPage; 3] = [
    NavPage {
        id: "login",
        label: "Login",
        route: "/login",
        key: '1',
        target: NavTarget::Login,
    },
    NavPage {
        id: "projects",
        label: "Projects",
        route: "/projects",
        key: '2',
        target: NavTarget::Tab(Tab::Projects),
    },
    NavPage {
        id: "help",
        label: "Help",
        route: "/help",
        key: '3',
        target: NavTarget::Tab(Tab::Help),
    },
];

/// What the identity corner of the navigation bar should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionIndicator {
    /// `Logged as <username>` plus a logout action
    LoggedIn { username: String },
    /// A login entry point
    LoggedOut,
}

/// Read-only view of the session for the navigation bar
pub fn session_indicator(session: &Session) -> SessionIndicator {
    match session.data {
        Some(ref data) if !data.is_expired() => SessionIndicator::LoggedIn {
            username: data.username.clone(),
        },
        _ => SessionIndicator::LoggedOut,
    }
}

/// Whether entering a tab requires a session
pub fn requires_session(tab: Tab) -> bool {
    matches!(tab, Tab::Projects)
}

/// Whether a page should be highlighted as the current route
pub fn page_is_active(page: &NavPage, current_tab: Tab, logging_in: bool) -> bool {
    match page.target {
        NavTarget::Login => logging_in,
        NavTarget::Tab(tab) => !logging_in && tab == current_tab,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionData;
    use chrono::{Duration, Utc};
    use std::path::PathBuf;

    fn session_with(data: Option<SessionData>) -> Session {
        let mut session = Session::new(PathBuf::from("/nonexistent"));
        if let Some(data) = data {
            session.update(data);
        }
        session
    }

    fn logged_in_data(created_at: chrono::DateTime<Utc>) -> SessionData {
        SessionData {
            token: "tok123".to_string(),
            username: "alice".to_string(),
            status: None,
            created_at,
        }
    }

    #[test]
    fn test_indicator_without_session() {
        let session = session_with(None);
        assert_eq!(session_indicator(&session), SessionIndicator::LoggedOut);
    }

    #[test]
    fn test_indicator_with_session() {
        let session = session_with(Some(logged_in_data(Utc::now())));
        assert_eq!(
            session_indicator(&session),
            SessionIndicator::LoggedIn {
                username: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_indicator_treats_expired_session_as_logged_out() {
        let session = session_with(Some(logged_in_data(Utc::now() - Duration::hours(2))));
        assert_eq!(session_indicator(&session), SessionIndicator::LoggedOut);
    }

    #[test]
    fn test_projects_is_gated() {
        assert!(requires_session(Tab::Projects));
        assert!(!requires_session(Tab::Home));
        assert!(!requires_session(Tab::Help));
    }

    #[test]
    fn test_active_page_matches_current_route() {
        let projects = &PAGES[1];
        assert!(page_is_active(projects, Tab::Projects, false));
        assert!(!page_is_active(projects, Tab::Help, false));
        // The login overlay takes over the active indicator
        assert!(!page_is_active(projects, Tab::Projects, true));
        assert!(page_is_active(&PAGES[0], Tab::Projects, true));
    }

    #[test]
    fn test_page_routes() {
        let routes: Vec<&str> = PAGES.iter().map(|p| p.route).collect();
        assert_eq!(routes, vec!["/login", "/projects", "/help"]);
    }
}
