use crate::config::Settings;
use crate::error::PickerError;
use crate::model::{ColumnSpec, Record};
use crate::ui::input::{key_input, ClickTracker, Input};
use crate::ui::layout::{ColumnMetrics, DialogLayout, SizePolicy};
use crate::ui::render;
use crate::ui::state::{ScrollSteps, Session};
use crate::ui::terminal;
use crossterm::event::{self, Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::Backend, layout::Rect, Terminal};
use std::io;
use std::time::{Duration, Instant};

const DEFAULT_TITLE: &str = "Select";

/// A modal, filterable, multi-select picker over a slice of records.
///
/// ```no_run
/// use bim_picker::model::row;
/// use bim_picker::Picker;
///
/// let views = vec![
///     row([("View", "Level 1"), ("Type", "Floor Plan")]),
///     row([("View", "Section 1"), ("Type", "Section")]),
/// ];
/// let chosen = Picker::new(&views)
///     .title("Duplicate views")
///     .initial_selection([0])
///     .select()?;
/// println!("{} views chosen", chosen.len());
/// # Ok::<(), bim_picker::error::PickerError>(())
/// ```
pub struct Picker<'a, R> {
    records: &'a [R],
    columns: Option<Vec<String>>,
    initial_selection: Vec<usize>,
    title: String,
    initial_query: String,
    settings: Settings,
}

impl<'a, R: Record> Picker<'a, R> {
    #[must_use]
    pub fn new(records: &'a [R]) -> Self {
        Self {
            records,
            columns: None,
            initial_selection: Vec::new(),
            title: DEFAULT_TITLE.to_string(),
            initial_query: String::new(),
            settings: Settings::default(),
        }
    }

    /// Show exactly these columns, in this order. Without this, columns come
    /// from the first record.
    #[must_use]
    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Rows highlighted on open, as indices into the records.
    #[must_use]
    pub fn initial_selection(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.initial_selection = indices.into_iter().collect();
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.initial_query = query.into();
        self
    }

    /// Replace all settings. Call before the single-setting methods below.
    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn sort_by_first_column(mut self, enabled: bool) -> Self {
        self.settings.sort_by_first_column = enabled;
        self
    }

    #[must_use]
    pub fn span_all_screens(mut self, enabled: bool) -> Self {
        self.settings.span_all_screens = enabled;
        self
    }

    /// Run the picker on the terminal and block until it closes.
    ///
    /// Returns the chosen records in display order, or an empty list when
    /// the user cancels.
    pub fn select(self) -> Result<Vec<&'a R>, PickerError> {
        let mut terminal = terminal::init()?;
        let result = self.run(&mut terminal, event::read);
        let restored = terminal::restore();
        let chosen = result?;
        restored?;
        Ok(chosen)
    }

    /// Run the picker on any backend, pulling events from `next_event`.
    pub fn run<B: Backend>(
        self,
        terminal: &mut Terminal<B>,
        mut next_event: impl FnMut() -> io::Result<Event>,
    ) -> Result<Vec<&'a R>, PickerError> {
        let columns = ColumnSpec::resolve(self.columns, self.records);
        let metrics = ColumnMetrics::measure(self.records, &columns, self.settings.column_padding);
        let policy = SizePolicy {
            span_all_screens: self.settings.span_all_screens,
            row_slack: self.settings.row_slack,
        };

        let mut session = Session::new(
            self.records,
            columns,
            &self.initial_selection,
            self.settings.sort_by_first_column,
        )
        .with_scroll_steps(ScrollSteps {
            step: self.settings.scroll_step,
            large: self.settings.scroll_step_large,
        })
        .with_content_width(metrics.total_width())
        .with_query(&self.initial_query);

        let mut clicks = ClickTracker::new(Duration::from_millis(self.settings.double_click_ms));

        while !session.is_closing() {
            let size = terminal.size()?;
            let screen = Rect::new(0, 0, size.width, size.height);
            let layout = DialogLayout::compute(screen, &metrics, self.records.len(), policy);
            session.set_viewport(layout.visible_rows(), layout.rows.width);

            terminal.draw(|frame| render::draw(frame, &session, &metrics, &layout, &self.title))?;

            let input = match next_event()? {
                Event::Key(key) => key_input(key),
                Event::Mouse(mouse) => mouse_input(mouse, &layout, &session, &mut clicks),
                _ => None,
            };
            if let Some(input) = input {
                log::trace!("input {input:?}");
                session.handle(input);
            }
        }

        Ok(session.result())
    }
}

fn mouse_input<R: Record>(
    mouse: MouseEvent,
    layout: &DialogLayout,
    session: &Session<'_, R>,
    clicks: &mut ClickTracker,
) -> Option<Input> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let row = layout.row_at(
                mouse.column,
                mouse.row,
                session.offset(),
                session.view().len(),
            );
            match row {
                Some(row) => Some(clicks.click(row, Instant::now(), mouse.modifiers)),
                None => {
                    clicks.reset();
                    None
                }
            }
        }
        MouseEventKind::ScrollUp => Some(Input::WheelUp),
        MouseEventKind::ScrollDown => Some(Input::WheelDown),
        _ => None,
    }
}
