use crate::filter::{filter_view, Query};
use crate::model::{ColumnSpec, Record};
use crate::ui::input::Input;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    Grid,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Close {
    /// Indices into the original records, in display order.
    Accepted(Vec<usize>),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No query and nothing highlighted.
    Idle,
    /// A query is typed but nothing is highlighted.
    Filtering,
    /// At least one row is highlighted.
    RowSelected,
    Closing(Close),
}

/// Horizontal scroll steps, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSteps {
    pub step: u16,
    pub large: u16,
}

/// State of one selection session.
///
/// `view` holds indices into `records` for the rows currently displayed.
/// `selected`, `cursor` and `anchor` are positions in `view`, never indices
/// into `records`; every re-filter re-maps them. `offset` is the first
/// displayed view row and only moves when the cursor leaves the page.
pub struct Session<'a, R> {
    records: &'a [R],
    columns: ColumnSpec,
    sort_by_first_column: bool,
    query: String,
    view: Vec<usize>,
    selected: BTreeSet<usize>,
    cursor: Option<usize>,
    anchor: Option<usize>,
    focus: Focus,
    h_offset: u16,
    content_width: u16,
    page_rows: usize,
    offset: usize,
    viewport_width: u16,
    steps: ScrollSteps,
    phase: Phase,
}

impl<'a, R: Record> Session<'a, R> {
    /// Open a session. Out-of-range `initial_selection` indices are ignored.
    pub fn new(
        records: &'a [R],
        columns: ColumnSpec,
        initial_selection: &[usize],
        sort_by_first_column: bool,
    ) -> Self {
        let view = filter_view(records, &columns, &Query::default(), sort_by_first_column);
        let positions = positions(&view);

        let selected: BTreeSet<usize> = initial_selection
            .iter()
            .filter_map(|i| positions.get(i).copied())
            .collect();
        let cursor = selected.first().copied();

        let mut session = Self {
            records,
            columns,
            sort_by_first_column,
            query: String::new(),
            view,
            selected,
            cursor,
            anchor: cursor,
            focus: Focus::Query,
            h_offset: 0,
            content_width: 0,
            page_rows: 1,
            offset: 0,
            viewport_width: u16::MAX,
            steps: ScrollSteps { step: 4, large: 20 },
            phase: Phase::Idle,
        };
        session.settle();
        log::debug!(
            "session opened: {} records, {} columns, {} preselected",
            records.len(),
            session.columns.len(),
            session.selected.len()
        );
        session
    }

    #[must_use]
    pub fn with_scroll_steps(mut self, steps: ScrollSteps) -> Self {
        self.steps = steps;
        self
    }

    /// Total width of the column content, for horizontal scroll limits.
    #[must_use]
    pub fn with_content_width(mut self, width: u16) -> Self {
        self.content_width = width;
        self
    }

    /// Start with `query` already typed.
    #[must_use]
    pub fn with_query(mut self, query: &str) -> Self {
        if !query.is_empty() {
            self.query = query.to_string();
            self.refilter();
            self.settle();
        }
        self
    }

    /// Record what the last frame could show.
    pub fn set_viewport(&mut self, rows: usize, width: u16) {
        self.page_rows = rows.max(1);
        self.scroll_to_cursor();
        self.viewport_width = width;
        self.h_offset = self.h_offset.min(self.max_h_offset());
    }

    pub fn records(&self) -> &'a [R] {
        self.records
    }

    pub fn columns(&self) -> &ColumnSpec {
        &self.columns
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Record indices of the displayed rows, in display order.
    pub fn view(&self) -> &[usize] {
        &self.view
    }

    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.selected.contains(&row)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn h_offset(&self) -> u16 {
        self.h_offset
    }

    /// First view row shown in the grid.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.phase, Phase::Closing(_))
    }

    /// The records chosen when the session closed; empty on cancel or
    /// while still open.
    pub fn result(&self) -> Vec<&'a R> {
        match &self.phase {
            Phase::Closing(Close::Accepted(indices)) => {
                indices.iter().map(|&i| &self.records[i]).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Apply one input. Inputs after closing are ignored.
    pub fn handle(&mut self, input: Input) {
        if self.is_closing() {
            return;
        }

        match input {
            Input::Char(c) => self.type_char(c),
            Input::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter();
                }
            }
            Input::ClearQuery => {
                if !self.query.is_empty() {
                    self.query.clear();
                    self.refilter();
                }
            }
            Input::DeleteWord => self.delete_word(),
            Input::Space { backwards } => {
                if self.query.is_empty() {
                    self.accept_adjacent(backwards);
                } else {
                    self.type_char(' ');
                }
            }
            Input::Up { extend } => self.move_cursor(-1, extend),
            Input::Down { extend } => self.move_cursor(1, extend),
            Input::WheelUp => self.move_cursor(-1, false),
            Input::WheelDown => self.move_cursor(1, false),
            Input::PageUp => self.jump_by(-signed(self.page_rows)),
            Input::PageDown => self.jump_by(signed(self.page_rows)),
            Input::Home => self.jump_to(0),
            Input::End => self.jump_to(self.view.len().saturating_sub(1)),
            Input::SelectAll => self.select_all(),
            Input::ScrollLeft { large } => self.scroll_horizontal(false, large),
            Input::ScrollRight { large } => self.scroll_horizontal(true, large),
            Input::Tab => {
                self.focus = match self.focus {
                    Focus::Grid => Focus::Query,
                    Focus::Query => Focus::Grid,
                };
            }
            Input::Accept => self.accept(),
            Input::Cancel => self.close(Close::Cancelled),
            Input::Click {
                row,
                toggle,
                extend,
            } => self.click(row, toggle, extend),
            Input::DoubleClick { row } => {
                if row < self.view.len() {
                    self.select_only(row);
                    self.accept();
                }
            }
        }

        self.settle();
    }

    fn type_char(&mut self, c: char) {
        self.focus = Focus::Query;
        self.query.push(c);
        self.refilter();
    }

    fn delete_word(&mut self) {
        let trimmed = self.query.trim_end();
        let cut = trimmed.rfind(char::is_whitespace).map_or(0, |i| i + 1);
        if cut != self.query.len() {
            self.query.truncate(cut);
            self.refilter();
        }
    }

    /// Rebuild the view for the current query and carry the selection over
    /// to the rows that are still visible.
    fn refilter(&mut self) {
        let query = Query::parse(&self.query);
        let view = filter_view(self.records, &self.columns, &query, self.sort_by_first_column);

        let selected_records: Vec<usize> = self.selected.iter().map(|&row| self.view[row]).collect();
        let cursor_record = self.cursor.map(|row| self.view[row]);
        let anchor_record = self.anchor.map(|row| self.view[row]);

        let positions = positions(&view);
        self.selected = selected_records
            .iter()
            .filter_map(|i| positions.get(i).copied())
            .collect();
        self.cursor = cursor_record
            .and_then(|i| positions.get(&i).copied())
            .or_else(|| self.selected.first().copied());
        self.anchor = anchor_record
            .and_then(|i| positions.get(&i).copied())
            .or(self.cursor);
        self.view = view;

        if self.selected.is_empty() && !self.view.is_empty() {
            self.select_only(0);
        }

        log::debug!(
            "query {:?} keeps {}/{} rows, {} selected",
            self.query,
            self.view.len(),
            self.records.len(),
            self.selected.len()
        );
    }

    /// Move the cursor by `delta`, wrapping at either end.
    fn move_cursor(&mut self, delta: isize, extend: bool) {
        let len = self.view.len();
        if len == 0 {
            return;
        }
        let next = match self.cursor {
            None if delta > 0 => 0,
            None => len - 1,
            Some(current) => (signed(current) + delta).rem_euclid(signed(len)).unsigned_abs(),
        };
        if extend {
            self.extend_to(next);
        } else {
            self.select_only(next);
        }
    }

    /// Move the cursor by `delta`, stopping at either end.
    fn jump_by(&mut self, delta: isize) {
        let len = self.view.len();
        if len == 0 {
            return;
        }
        let current = signed(self.cursor.unwrap_or(0));
        let next = (current + delta).clamp(0, signed(len - 1)).unsigned_abs();
        self.select_only(next);
    }

    fn jump_to(&mut self, row: usize) {
        if row < self.view.len() {
            self.select_only(row);
        }
    }

    fn select_only(&mut self, row: usize) {
        self.selected.clear();
        self.selected.insert(row);
        self.cursor = Some(row);
        self.anchor = Some(row);
    }

    fn extend_to(&mut self, row: usize) {
        let anchor = self.anchor.or(self.cursor).unwrap_or(row);
        let (lo, hi) = if anchor <= row { (anchor, row) } else { (row, anchor) };
        self.selected = (lo..=hi).collect();
        self.cursor = Some(row);
        self.anchor = Some(anchor);
    }

    fn select_all(&mut self) {
        if self.view.is_empty() {
            return;
        }
        self.selected = (0..self.view.len()).collect();
        if self.cursor.is_none() {
            self.cursor = Some(0);
            self.anchor = Some(0);
        }
    }

    fn click(&mut self, row: usize, toggle: bool, extend: bool) {
        if row >= self.view.len() {
            return;
        }
        self.focus = Focus::Grid;
        if extend {
            self.extend_to(row);
        } else if toggle {
            if !self.selected.remove(&row) {
                self.selected.insert(row);
            }
            self.cursor = Some(row);
            self.anchor = Some(row);
        } else {
            self.select_only(row);
        }
    }

    fn scroll_horizontal(&mut self, right: bool, large: bool) {
        let step = if large { self.steps.large } else { self.steps.step };
        self.h_offset = if right {
            self.h_offset.saturating_add(step).min(self.max_h_offset())
        } else {
            self.h_offset.saturating_sub(step)
        };
    }

    fn max_h_offset(&self) -> u16 {
        self.content_width.saturating_sub(self.viewport_width)
    }

    /// Accept the highlighted rows, or the first row when none is highlighted.
    fn accept(&mut self) {
        if self.view.is_empty() {
            return;
        }
        let rows: Vec<usize> = if self.selected.is_empty() {
            vec![self.view[0]]
        } else {
            self.selected.iter().map(|&row| self.view[row]).collect()
        };
        self.close(Close::Accepted(rows));
    }

    /// Accept the single row after (or before) the cursor.
    fn accept_adjacent(&mut self, backwards: bool) {
        let len = self.view.len();
        if len == 0 {
            return;
        }
        let target = match self.cursor {
            None => 0,
            Some(current) if backwards => (current + len - 1) % len,
            Some(current) => (current + 1) % len,
        };
        self.select_only(target);
        self.close(Close::Accepted(vec![self.view[target]]));
    }

    fn close(&mut self, close: Close) {
        match &close {
            Close::Accepted(rows) => {
                log::info!("accepted {} of {} rows", rows.len(), self.records.len());
            }
            Close::Cancelled => log::info!("selection cancelled"),
        }
        self.phase = Phase::Closing(close);
    }

    /// Scroll the page just enough to show the cursor, and never past the
    /// last full page.
    fn scroll_to_cursor(&mut self) {
        let last_page = self.view.len().saturating_sub(self.page_rows);
        self.offset = self.offset.min(last_page);
        if let Some(cursor) = self.cursor {
            if cursor < self.offset {
                self.offset = cursor;
            } else if cursor >= self.offset + self.page_rows {
                self.offset = cursor + 1 - self.page_rows;
            }
        }
    }

    fn settle(&mut self) {
        self.scroll_to_cursor();
        if self.is_closing() {
            return;
        }
        self.phase = if !self.selected.is_empty() {
            Phase::RowSelected
        } else if !self.query.is_empty() {
            Phase::Filtering
        } else {
            Phase::Idle
        };
    }
}

fn positions(view: &[usize]) -> HashMap<usize, usize> {
    view.iter().enumerate().map(|(pos, &i)| (i, pos)).collect()
}

fn signed(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}
