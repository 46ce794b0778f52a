use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// A discrete user input, already stripped of terminal details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Char(char),
    Backspace,
    ClearQuery,
    DeleteWord,
    /// Space key; `backwards` when a modifier was held.
    Space { backwards: bool },
    Up { extend: bool },
    Down { extend: bool },
    PageUp,
    PageDown,
    Home,
    End,
    SelectAll,
    ScrollLeft { large: bool },
    ScrollRight { large: bool },
    Tab,
    Accept,
    Cancel,
    /// Click on a displayed row (index into the filtered view).
    Click { row: usize, toggle: bool, extend: bool },
    DoubleClick { row: usize },
    WheelUp,
    WheelDown,
}

/// Translate a key event; releases and unbound keys yield `None`.
#[must_use]
pub fn key_input(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let input = match key.code {
        KeyCode::Esc => Input::Cancel,
        KeyCode::Enter => Input::Accept,
        KeyCode::Tab | KeyCode::BackTab => Input::Tab,
        KeyCode::Up => Input::Up { extend: shift },
        KeyCode::Down => Input::Down { extend: shift },
        KeyCode::Left => Input::ScrollLeft { large: shift },
        KeyCode::Right => Input::ScrollRight { large: shift },
        KeyCode::PageUp => Input::PageUp,
        KeyCode::PageDown => Input::PageDown,
        KeyCode::Home => Input::Home,
        KeyCode::End => Input::End,
        KeyCode::Backspace if ctrl || alt => Input::DeleteWord,
        KeyCode::Backspace => Input::Backspace,
        KeyCode::Char(' ') => Input::Space {
            backwards: shift || ctrl || alt,
        },
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'c' => Input::Cancel,
            'u' => Input::ClearQuery,
            'w' => Input::DeleteWord,
            'a' => Input::SelectAll,
            'p' => Input::Up { extend: false },
            'n' => Input::Down { extend: false },
            _ => return None,
        },
        KeyCode::Char(_) if alt => return None,
        KeyCode::Char(c) => Input::Char(c),
        _ => return None,
    };

    Some(input)
}

/// Turns single clicks into double-clicks when the same row is clicked
/// twice within the configured window.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    window: Duration,
    last: Option<(usize, Instant)>,
}

impl ClickTracker {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn click(&mut self, row: usize, at: Instant, modifiers: KeyModifiers) -> Input {
        let toggle = modifiers.contains(KeyModifiers::CONTROL);
        let extend = modifiers.contains(KeyModifiers::SHIFT);

        let is_double = !toggle
            && !extend
            && self
                .last
                .is_some_and(|(prev, when)| prev == row && at.duration_since(when) <= self.window);

        if is_double {
            self.last = None;
            Input::DoubleClick { row }
        } else {
            self.last = Some((row, at));
            Input::Click {
                row,
                toggle,
                extend,
            }
        }
    }

    /// Forget the previous click, e.g. after a click outside the rows.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
