use crate::workflows::awards::{default_title, AvatarPolicy, AwardSettings};
use std::env;
use std::fmt;

pub const DEFAULT_REPORT_YEAR: i32 = 2025;
pub const DEFAULT_AVATAR: &str = "images/1.jpg";
pub const DEFAULT_AVATAR_TEMPLATE: &str = "images/{id}.jpg";
pub const DEFAULT_MENTION_AVATAR_ID: &str = "user1097835763";

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    pub awards: AwardsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let year = match env::var("APP_REPORT_YEAR") {
            Ok(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::InvalidYear { value: raw })?,
            Err(_) => DEFAULT_REPORT_YEAR,
        };

        let avatar_template = env::var("APP_AVATAR_TEMPLATE")
            .unwrap_or_else(|_| DEFAULT_AVATAR_TEMPLATE.to_string());
        if !avatar_template.contains("{id}") {
            return Err(ConfigError::InvalidAvatarTemplate {
                value: avatar_template,
            });
        }

        Ok(Self {
            telemetry: TelemetryConfig { log_level },
            awards: AwardsConfig {
                year,
                title: env::var("APP_REPORT_TITLE").ok(),
                default_avatar: env::var("APP_DEFAULT_AVATAR")
                    .unwrap_or_else(|_| DEFAULT_AVATAR.to_string()),
                avatar_template,
                mention_avatar_id: env::var("APP_MENTION_AVATAR_ID")
                    .unwrap_or_else(|_| DEFAULT_MENTION_AVATAR_ID.to_string()),
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Report year, title, and avatar paths.
#[derive(Debug, Clone)]
pub struct AwardsConfig {
    pub year: i32,
    pub title: Option<String>,
    pub default_avatar: String,
    pub avatar_template: String,
    pub mention_avatar_id: String,
}

impl AwardsConfig {
    pub fn settings(&self) -> AwardSettings {
        AwardSettings {
            year: self.year,
            title: self
                .title
                .clone()
                .unwrap_or_else(|| default_title(self.year)),
            avatars: AvatarPolicy::new(
                self.default_avatar.clone(),
                self.avatar_template.clone(),
                self.mention_avatar_id.clone(),
            ),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidYear { value: String },
    InvalidAvatarTemplate { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidYear { value } => {
                write!(f, "APP_REPORT_YEAR must be a calendar year, got '{}'", value)
            }
            ConfigError::InvalidAvatarTemplate { value } => {
                write!(
                    f,
                    "APP_AVATAR_TEMPLATE must contain an {{id}} placeholder, got '{}'",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
