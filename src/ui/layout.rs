//! Dialog sizing and placement.
//!
//! Columns are measured once against the initial data; the dialog is then
//! sized around them and clamped to the terminal.

use crate::model::{ColumnSpec, Record};
use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthStr;

pub const BORDER: u16 = 1;
pub const QUERY_HEIGHT: u16 = 3;
pub const HEADER_HEIGHT: u16 = 1;
pub const STATUS_HEIGHT: u16 = 1;
pub const SCROLLBAR_WIDTH: u16 = 1;
pub const MIN_DIALOG_WIDTH: u16 = 32;

/// Display width of each column, padding included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnMetrics {
    widths: Vec<u16>,
}

impl ColumnMetrics {
    /// Widest of the header and every cell, plus `padding`.
    pub fn measure<R: Record>(records: &[R], columns: &ColumnSpec, padding: u16) -> Self {
        let mut widths: Vec<usize> = columns.names().iter().map(|h| h.width()).collect();
        for record in records {
            for (i, value) in columns.values(record).enumerate() {
                if let Some(value) = value {
                    widths[i] = widths[i].max(value.to_string().width());
                }
            }
        }
        Self {
            widths: widths
                .into_iter()
                .map(|w| u16::try_from(w).unwrap_or(u16::MAX).saturating_add(padding))
                .collect(),
        }
    }

    #[must_use]
    pub fn widths(&self) -> &[u16] {
        &self.widths
    }

    #[must_use]
    pub fn total_width(&self) -> u16 {
        self.widths.iter().fold(0u16, |acc, w| acc.saturating_add(*w))
    }
}

/// Where each part of the dialog goes on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLayout {
    pub dialog: Rect,
    pub query: Rect,
    pub header: Rect,
    pub rows: Rect,
    pub scrollbar: Rect,
    pub status: Rect,
}

/// Inputs to [`DialogLayout::compute`] that come from settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePolicy {
    pub span_all_screens: bool,
    pub row_slack: u16,
}

impl DialogLayout {
    /// Size the dialog for `row_count` rows of `metrics`-wide columns.
    ///
    /// Width is the column total plus scrollbar and borders, capped to the
    /// screen (or the full screen width when spanning). Height is chrome plus
    /// one line per row plus slack, capped to the screen; a dialog that would
    /// not fit is pinned to the top instead of centered.
    #[must_use]
    pub fn compute(
        screen: Rect,
        metrics: &ColumnMetrics,
        row_count: usize,
        policy: SizePolicy,
    ) -> Self {
        let natural_width = metrics
            .total_width()
            .saturating_add(SCROLLBAR_WIDTH + 2 * BORDER)
            .max(MIN_DIALOG_WIDTH);
        let width = if policy.span_all_screens {
            screen.width
        } else {
            natural_width.min(screen.width)
        };

        let chrome = 2 * BORDER + QUERY_HEIGHT + HEADER_HEIGHT + STATUS_HEIGHT;
        let rows = u16::try_from(row_count.max(1)).unwrap_or(u16::MAX);
        let natural_height = chrome.saturating_add(rows).saturating_add(policy.row_slack);
        let height = natural_height.min(screen.height);

        let x = screen.x + (screen.width - width) / 2;
        let y = if natural_height > screen.height {
            screen.y
        } else {
            screen.y + (screen.height - height) / 2
        };

        let dialog = Rect::new(x, y, width, height);
        Self::split(dialog)
    }

    fn split(dialog: Rect) -> Self {
        let inner = Rect::new(
            dialog.x.saturating_add(BORDER),
            dialog.y.saturating_add(BORDER),
            dialog.width.saturating_sub(2 * BORDER),
            dialog.height.saturating_sub(2 * BORDER),
        );

        let query_h = QUERY_HEIGHT.min(inner.height);
        let query = Rect::new(inner.x, inner.y, inner.width, query_h);

        let rest = inner.height - query_h;
        let status_h = STATUS_HEIGHT.min(rest);
        let header_h = HEADER_HEIGHT.min(rest - status_h);
        let rows_h = rest - status_h - header_h;

        let header = Rect::new(inner.x, query.bottom(), inner.width, header_h);
        let grid_width = inner.width.saturating_sub(SCROLLBAR_WIDTH);
        let rows = Rect::new(inner.x, header.bottom(), grid_width, rows_h);
        let scrollbar = Rect::new(rows.right(), rows.y, inner.width - grid_width, rows_h);
        let status = Rect::new(inner.x, rows.bottom(), inner.width, status_h);

        Self {
            dialog,
            query,
            header,
            rows,
            scrollbar,
            status,
        }
    }

    #[must_use]
    pub fn visible_rows(&self) -> usize {
        usize::from(self.rows.height)
    }

    /// The view row under a screen position, given the current scroll offset.
    #[must_use]
    pub fn row_at(&self, column: u16, line: u16, offset: usize, row_count: usize) -> Option<usize> {
        if !self.rows.contains(Position::new(column, line)) {
            return None;
        }
        let row = offset + usize::from(line - self.rows.y);
        (row < row_count).then_some(row)
    }
}
