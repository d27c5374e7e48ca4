use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::display::DisplayNotesRequest;
use crate::theme::Theme;

/// How long a status message stays in the footer
const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    pub title: String,
    pub popup: Popup,

    // What the panel currently shows (file contents with CLI overrides applied)
    pub request: DisplayNotesRequest,
    // Values from the command line, reapplied after every reload
    pub overrides: DisplayNotesRequest,
    // Request file, re-read every `refresh_secs`
    pub source: Option<PathBuf>,
    pub last_reload: Instant,

    // Status message (shown in footer, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    /// Build the app, loading `source` once up front so a bad path fails fast
    pub async fn new(
        config: AppConfig,
        source: Option<PathBuf>,
        overrides: DisplayNotesRequest,
        title: Option<String>,
    ) -> Result<Self> {
        let base = match source {
            Some(ref path) => DisplayNotesRequest::load(path).await?,
            None => DisplayNotesRequest::default(),
        };

        let mut app = Self::with_request(config, base.overlay(overrides.clone()), source, title);
        app.overrides = overrides;
        Ok(app)
    }

    pub fn with_request(
        config: AppConfig,
        request: DisplayNotesRequest,
        source: Option<PathBuf>,
        title: Option<String>,
    ) -> Self {
        let config = config.normalized();
        let theme = Theme::from_config(&config.theme);
        let title = title.unwrap_or_else(|| config.title.clone());

        Self {
            config,
            theme,
            title,
            popup: Popup::None,
            request,
            overrides: DisplayNotesRequest::default(),
            source,
            last_reload: Instant::now(),
            status_message: None,
            status_message_time: None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match (self.popup, key.code) {
            (
                Popup::Help,
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::Char('q'),
            ) => {
                self.popup = Popup::None;
            }
            (Popup::None, KeyCode::Char('h') | KeyCode::Char('?')) => {
                self.popup = Popup::Help;
            }
            (_, KeyCode::Char('r')) => {
                if self.source.is_some() {
                    self.status_message = None;
                    self.reload().await;
                    if self.status_message.is_none() {
                        self.set_status("Reloaded");
                    }
                } else {
                    self.set_status("No request file to reload");
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Re-read the request file; on failure the previous request stays on screen
    pub async fn reload(&mut self) {
        let Some(path) = self.source.clone() else {
            return;
        };
        self.last_reload = Instant::now();

        match DisplayNotesRequest::load(&path).await {
            Ok(request) => {
                let request = request.overlay(self.overrides.clone());
                if request != self.request {
                    tracing::info!("Request changed in {}", path.display());
                    self.request = request;
                }
            }
            Err(e) => {
                tracing::warn!("Reload failed: {}", e);
                self.set_status(format!("Reload failed: {}", e));
            }
        }
    }

    /// Periodic housekeeping, called once per event loop iteration
    pub async fn tick(&mut self) {
        if let Some(at) = self.status_message_time {
            if at.elapsed() >= STATUS_MESSAGE_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }

        let refresh = Duration::from_secs(self.config.refresh_secs);
        if self.source.is_some() && self.last_reload.elapsed() >= refresh {
            self.reload().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn temp_request(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "bigscreen-notes-app-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_help_toggles() {
        let mut app = App::with_request(AppConfig::default(), Default::default(), None, None);
        app.handle_key(press(KeyCode::Char('h'))).await.unwrap();
        assert_eq!(app.popup, Popup::Help);
        app.handle_key(press(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.popup, Popup::None);
        app.handle_key(press(KeyCode::Char('?'))).await.unwrap();
        assert_eq!(app.popup, Popup::Help);
    }

    #[tokio::test]
    async fn test_help_closes_on_q() {
        let mut app = App::with_request(AppConfig::default(), Default::default(), None, None);
        app.popup = Popup::Help;
        app.handle_key(press(KeyCode::Char('q'))).await.unwrap();
        assert_eq!(app.popup, Popup::None, "q should close help so the next q quits");
    }

    #[tokio::test]
    async fn test_reload_without_file() {
        let mut app = App::with_request(AppConfig::default(), Default::default(), None, None);
        app.handle_key(press(KeyCode::Char('r'))).await.unwrap();
        assert_eq!(app.status_message.as_deref(), Some("No request file to reload"));
    }

    #[tokio::test]
    async fn test_cli_overrides_survive_reload() {
        let path = temp_request(
            "override",
            r#"{ "notes": "from file", "specialConditions": "No refunds" }"#,
        );
        let overrides = DisplayNotesRequest::new(Some("from cli".into()), None);
        let mut app = App::new(AppConfig::default(), Some(path.clone()), overrides, None)
            .await
            .unwrap();
        assert_eq!(app.request.notes(), Some("from cli"));
        assert_eq!(app.request.special_conditions(), Some("No refunds"));

        std::fs::write(&path, r#"{ "notes": "changed", "specialConditions": "21+ only" }"#)
            .unwrap();
        app.reload().await;
        let _ = std::fs::remove_file(&path);

        assert_eq!(app.request.notes(), Some("from cli"));
        assert_eq!(app.request.special_conditions(), Some("21+ only"));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_request() {
        let path = temp_request("broken", r#"{ "notes": "Bring ID" }"#);
        let mut app = App::new(AppConfig::default(), Some(path.clone()), Default::default(), None)
            .await
            .unwrap();

        std::fs::write(&path, "{ not json").unwrap();
        app.reload().await;
        let _ = std::fs::remove_file(&path);

        assert_eq!(app.request.notes(), Some("Bring ID"));
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Reload failed")));
    }

    #[tokio::test]
    async fn test_missing_source_fails_fast() {
        let path = std::env::temp_dir().join("bigscreen-notes-app-missing.json");
        let result = App::new(AppConfig::default(), Some(path), Default::default(), None).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_title_override() {
        let app = App::with_request(
            AppConfig::default(),
            Default::default(),
            None,
            Some("Main Hall".into()),
        );
        assert_eq!(app.title, "Main Hall");
    }
}
