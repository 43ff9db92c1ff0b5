//! Log time-period status label.
//!
//! A side feature entirely separate from the mind-map engine: given
//! selection notifications from the host editor, show how much log time
//! a multi-line selection spans. It consumes notifications and exposes a
//! label; the core never reads it.

mod time;

pub use time::{TimeCalculator, format_duration};

use serde::Deserialize;

/// Selection state delivered with a `selectionChanged` or
/// `activeEditorChanged` notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionNotice {
    /// Language id of the active document.
    #[serde(default)]
    pub language_id: String,
    #[serde(default)]
    pub start_line: u32,
    #[serde(default)]
    pub end_line: u32,
    /// Column of the selection end; 0 means the final line is not
    /// actually part of the selection.
    #[serde(default)]
    pub end_character: u32,
    /// Text of the selected lines, `start_line..=end_line`.
    #[serde(default)]
    pub line_texts: Vec<String>,
}

/// Status-bar label driven by editor selection events.
///
/// Shows a duration only while the active document is a log file and the
/// selection spans more than one line; hides itself otherwise.
#[derive(Debug, Default)]
pub struct TimePeriodController {
    calculator: TimeCalculator,
    label: Option<String>,
}

impl TimePeriodController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current label; `None` means the status item is hidden.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn on_selection_changed(&mut self, notice: &SelectionNotice) {
        self.update(Some(notice));
    }

    /// An editor switch may deliver no selection at all (no active
    /// editor); the label hides.
    pub fn on_active_editor_changed(&mut self, notice: Option<&SelectionNotice>) {
        self.update(notice);
    }

    fn update(&mut self, notice: Option<&SelectionNotice>) {
        let next = notice.and_then(|n| self.period_label(n));
        if next != self.label {
            tracing::debug!(
                label = next.as_deref().unwrap_or("<hidden>"),
                "time period label changed"
            );
            self.label = next;
        }
    }

    fn period_label(&self, notice: &SelectionNotice) -> Option<String> {
        if notice.language_id != "log" {
            return None;
        }
        if notice.start_line == notice.end_line {
            return None;
        }
        let first = notice.line_texts.first()?;
        // A selection ending at column 0 does not include its final line.
        let last = if notice.end_character == 0 {
            notice.line_texts.iter().rev().nth(1)?
        } else {
            notice.line_texts.last()?
        };
        let period = self.calculator.time_period(first, last)?;
        Some(format_duration(period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_notice(lines: &[&str], end_character: u32) -> SelectionNotice {
        SelectionNotice {
            language_id: "log".to_string(),
            start_line: 10,
            end_line: 10 + u32::try_from(lines.len()).unwrap() - 1,
            end_character,
            line_texts: lines.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_multi_line_log_selection_shows_duration() {
        let mut status = TimePeriodController::new();
        status.on_selection_changed(&log_notice(&["10:00:00 a", "10:00:02 b"], 5));
        assert_eq!(status.label(), Some("2s 0ms"));
    }

    #[test]
    fn test_selection_ending_at_column_zero_uses_previous_line() {
        let mut status = TimePeriodController::new();
        status.on_selection_changed(&log_notice(
            &["10:00:00 a", "10:00:02 b", "10:00:09 c"],
            0,
        ));
        assert_eq!(status.label(), Some("2s 0ms"));
    }

    #[test]
    fn test_single_line_selection_hides() {
        let mut status = TimePeriodController::new();
        status.on_selection_changed(&log_notice(&["10:00:00 a", "10:00:02 b"], 5));
        let notice = SelectionNotice {
            language_id: "log".to_string(),
            start_line: 3,
            end_line: 3,
            end_character: 7,
            line_texts: vec!["10:00:00 a".to_string()],
        };
        status.on_selection_changed(&notice);
        assert_eq!(status.label(), None);
    }

    #[test]
    fn test_non_log_document_hides() {
        let mut status = TimePeriodController::new();
        let mut notice = log_notice(&["10:00:00 a", "10:00:02 b"], 5);
        notice.language_id = "markdown".to_string();
        status.on_selection_changed(&notice);
        assert_eq!(status.label(), None);
    }

    #[test]
    fn test_unparseable_lines_hide() {
        let mut status = TimePeriodController::new();
        status.on_selection_changed(&log_notice(&["no time", "none either"], 5));
        assert_eq!(status.label(), None);
    }

    #[test]
    fn test_editor_switch_without_selection_hides() {
        let mut status = TimePeriodController::new();
        status.on_selection_changed(&log_notice(&["10:00:00 a", "10:00:02 b"], 5));
        assert!(status.label().is_some());
        status.on_active_editor_changed(None);
        assert_eq!(status.label(), None);
    }
}
