//! Runtime knobs the view handlers need, decoupled from config loading.

use crate::domain::views::ViewWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub window: ViewWindow,
    /// Record views for staff owner-view access as well as learners.
    pub track_staff_views: bool,
    /// Record delivery views off the response path.
    pub background_recording: bool,
    pub trend_days_default: u32,
    pub trend_days_max: u32,
    pub top_limit_default: u32,
    pub top_limit_max: u32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            window: ViewWindow::Permanent,
            track_staff_views: false,
            background_recording: true,
            trend_days_default: 30,
            trend_days_max: 365,
            top_limit_default: 10,
            top_limit_max: 100,
        }
    }
}
