//! View tracking configuration

use serde::Deserialize;

use crate::application::ViewSettings;
use crate::domain::views::ViewWindow;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct ViewsConfig {
    /// Repeat-view policy
    #[serde(default)]
    pub window: ViewWindow,

    /// Count staff deliveries as views
    #[serde(default)]
    pub track_staff_views: bool,

    /// Record delivery views off the response path
    #[serde(default = "default_true")]
    pub background_recording: bool,

    #[serde(default = "default_trend_days")]
    pub trend_days_default: u32,

    #[serde(default = "default_trend_days_max")]
    pub trend_days_max: u32,

    #[serde(default = "default_top_limit")]
    pub top_limit_default: u32,

    #[serde(default = "default_top_limit_max")]
    pub top_limit_max: u32,
}

impl ViewsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.trend_days_max == 0 {
            return Err(ValidationError::InvalidViewBounds("trend_days_max must be positive"));
        }
        if self.trend_days_default == 0 || self.trend_days_default > self.trend_days_max {
            return Err(ValidationError::InvalidViewBounds(
                "trend_days_default must be within 1..=trend_days_max",
            ));
        }
        if self.top_limit_max == 0 {
            return Err(ValidationError::InvalidViewBounds("top_limit_max must be positive"));
        }
        if self.top_limit_default == 0 || self.top_limit_default > self.top_limit_max {
            return Err(ValidationError::InvalidViewBounds(
                "top_limit_default must be within 1..=top_limit_max",
            ));
        }
        Ok(())
    }

    pub fn to_settings(&self) -> ViewSettings {
        ViewSettings {
            window: self.window,
            track_staff_views: self.track_staff_views,
            background_recording: self.background_recording,
            trend_days_default: self.trend_days_default,
            trend_days_max: self.trend_days_max,
            top_limit_default: self.top_limit_default,
            top_limit_max: self.top_limit_max,
        }
    }
}

impl Default for ViewsConfig {
    fn default() -> Self {
        let settings = ViewSettings::default();
        Self {
            window: settings.window,
            track_staff_views: settings.track_staff_views,
            background_recording: settings.background_recording,
            trend_days_default: settings.trend_days_default,
            trend_days_max: settings.trend_days_max,
            top_limit_default: settings.top_limit_default,
            top_limit_max: settings.top_limit_max,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_trend_days() -> u32 {
    30
}

fn default_trend_days_max() -> u32 {
    365
}

fn default_top_limit() -> u32 {
    10
}

fn default_top_limit_max() -> u32 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_settings_defaults() {
        let config = ViewsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.to_settings(), ViewSettings::default());
    }

    #[test]
    fn serde_defaults_match_default_impl() {
        let config: ViewsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.to_settings(), ViewsConfig::default().to_settings());
    }

    #[test]
    fn default_above_max_is_rejected() {
        let config = ViewsConfig {
            trend_days_default: 400,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidViewBounds(_))
        ));
    }

    #[test]
    fn zero_top_limit_is_rejected() {
        let config = ViewsConfig {
            top_limit_default: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn staff_tracking_flows_into_settings() {
        let config = ViewsConfig {
            track_staff_views: true,
            background_recording: false,
            ..Default::default()
        };
        let settings = config.to_settings();
        assert!(settings.track_staff_views);
        assert!(!settings.background_recording);
    }
}
