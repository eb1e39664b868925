use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use api_types::user::UserView;

use crate::error::Result;

const DEFAULT_SESSION_PATH: &str = "config/session.json";

/// Locally persisted session, written after a successful login so the next
/// launch lands on the home screen directly.
///
/// The rest of the app treats this as read-only: controllers and the HTTP
/// client receive the user at call time and never reach back in.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionState {
    pub user: Option<SessionUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub role: Option<String>,
}

impl From<UserView> for SessionUser {
    fn from(view: UserView) -> Self {
        Self {
            id: view.id,
            name: view.name,
            email: view.email,
            mobile: view.mobile,
            role: view.role,
        }
    }
}

impl SessionState {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let parent = Path::new(path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    pub fn signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn clear(&mut self) {
        self.user = None;
    }
}

pub fn default_session_path() -> &'static str {
    DEFAULT_SESSION_PATH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_an_empty_session() {
        let state = SessionState::load("config/definitely_absent.json").unwrap();
        assert!(!state.signed_in());
    }

    #[test]
    fn user_view_maps_across() {
        let view = UserView {
            id: "64fa".to_string(),
            name: Some("Admin".to_string()),
            email: Some("admin@wecdesk.in".to_string()),
            mobile: None,
            role: Some("admin".to_string()),
        };
        let user = SessionUser::from(view);
        assert_eq!(user.id, "64fa");
        assert_eq!(user.role.as_deref(), Some("admin"));
    }
}
