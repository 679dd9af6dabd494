//! The once-per-window view policy.
//!
//! Whether a repeated view of the same item by the same viewer counts again
//! is decided here and nowhere else. Adapters enforce `Permanent` with a
//! uniqueness constraint on `(content_item_id, viewer_id)`.

use serde::Deserialize;

use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewWindow {
    /// At most one counted view per item and viewer, ever.
    #[default]
    Permanent,
}

impl ViewWindow {
    /// Whether a view at `now` counts, given the viewer's last counted view.
    pub fn admits(&self, previous: Option<&Timestamp>, _now: &Timestamp) -> bool {
        match self {
            ViewWindow::Permanent => previous.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanent_window_admits_only_the_first_view() {
        let now = Timestamp::now();
        let earlier = now.minus_days(400);
        assert!(ViewWindow::Permanent.admits(None, &now));
        assert!(!ViewWindow::Permanent.admits(Some(&earlier), &now));
    }

    #[test]
    fn default_is_permanent() {
        assert_eq!(ViewWindow::default(), ViewWindow::Permanent);
    }
}
