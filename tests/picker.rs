//! Drives whole picker sessions against ratatui's test backend.

use bim_picker::model::{row, Record, Row};
use bim_picker::Picker;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use pretty_assertions::assert_eq;
use ratatui::{backend::TestBackend, style::Color, Terminal};
use std::io;

const WIDTH: u16 = 60;
const HEIGHT: u16 = 20;

// Dialog placement for the three-row fixture on a 60x20 screen:
// 32 wide, 11 tall, so it starts at (14, 4).
const FIRST_ROW_Y: u16 = 9;
const HEADER_Y: u16 = 8;
const GRID_X: u16 = 15;

fn elements() -> Vec<Row> {
    vec![
        row([("Name", "Wall-A"), ("Category", "Walls")]),
        row([("Name", "Door-B"), ("Category", "Doors")]),
        row([("Name", "Wall-C"), ("Category", "Walls")]),
    ]
}

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(WIDTH, HEIGHT)).expect("test terminal")
}

fn script(events: Vec<Event>) -> impl FnMut() -> io::Result<Event> {
    let mut events = events.into_iter();
    move || {
        events
            .next()
            .ok_or_else(|| io::Error::other("ran out of scripted events"))
    }
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn typed(text: &str) -> Vec<Event> {
    text.chars().map(|c| key(KeyCode::Char(c))).collect()
}

fn left_click(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn names(chosen: &[&Row]) -> Vec<String> {
    chosen
        .iter()
        .map(|r| r.field("Name").map(|v| v.to_string()).unwrap_or_default())
        .collect()
}

fn screen_line(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..WIDTH).map(|x| buffer[(x, y)].symbol()).collect()
}

#[test]
fn typed_query_narrows_then_enter_accepts() {
    let records = elements();
    let mut terminal = terminal();
    let mut events = typed("wall !c");
    events.push(key(KeyCode::Enter));

    let chosen = Picker::new(&records)
        .run(&mut terminal, script(events))
        .expect("session");

    assert_eq!(names(&chosen), vec!["Wall-A"]);
}

#[test]
fn escape_returns_nothing() {
    let records = elements();
    let mut terminal = terminal();

    let chosen = Picker::new(&records)
        .initial_selection([0, 2])
        .run(&mut terminal, script(vec![key(KeyCode::Esc)]))
        .expect("session");

    assert!(chosen.is_empty());
}

#[test]
fn initial_selection_is_highlighted_and_accepted() {
    let records = elements();
    let mut terminal = terminal();

    let chosen = Picker::new(&records)
        .initial_selection([1])
        .run(&mut terminal, script(vec![key(KeyCode::Enter)]))
        .expect("session");

    assert_eq!(names(&chosen), vec!["Door-B"]);

    let buffer = terminal.backend().buffer();
    let highlight = Color::Rgb(0xC3, 0xD3, 0xE0);
    assert_eq!(buffer[(GRID_X, FIRST_ROW_Y + 1)].bg, highlight);
    assert_ne!(buffer[(GRID_X, FIRST_ROW_Y)].bg, highlight);
    assert!(screen_line(&terminal, FIRST_ROW_Y + 1).contains("Door-B  Doors"));
}

#[test]
fn renders_title_headers_and_counts() {
    let records = elements();
    let mut terminal = terminal();

    Picker::new(&records)
        .title("Pick elements")
        .run(&mut terminal, script(vec![key(KeyCode::Esc)]))
        .expect("session");

    assert!(screen_line(&terminal, 4).contains(" Pick elements "));
    assert!(screen_line(&terminal, HEADER_Y).contains("Name    Category"));
    assert!(screen_line(&terminal, FIRST_ROW_Y).contains("Wall-A  Walls"));
    assert!(screen_line(&terminal, FIRST_ROW_Y + 4).contains("3/3 rows"));
}

#[test]
fn empty_view_shows_message_and_ignores_enter() {
    let records = elements();
    let mut terminal = terminal();
    let mut events = typed("window");
    events.push(key(KeyCode::Enter));
    events.push(key(KeyCode::Esc));

    let chosen = Picker::new(&records)
        .run(&mut terminal, script(events))
        .expect("session");

    assert!(chosen.is_empty());
    assert!(screen_line(&terminal, FIRST_ROW_Y).contains("No matching rows"));
}

#[test]
fn or_groups_with_select_all_return_everything() {
    let records = elements();
    let mut terminal = terminal();
    let mut events = typed("doors||walls");
    events.push(ctrl('a'));
    events.push(key(KeyCode::Enter));

    let chosen = Picker::new(&records)
        .run(&mut terminal, script(events))
        .expect("session");

    assert_eq!(names(&chosen), vec!["Wall-A", "Door-B", "Wall-C"]);
}

#[test]
fn space_with_empty_query_accepts_the_next_row() {
    let records = elements();
    let mut terminal = terminal();

    let chosen = Picker::new(&records)
        .initial_selection([1])
        .run(&mut terminal, script(vec![key(KeyCode::Char(' '))]))
        .expect("session");

    assert_eq!(names(&chosen), vec!["Wall-C"]);
}

#[test]
fn double_click_accepts_the_clicked_row() {
    let records = elements();
    let mut terminal = terminal();
    let events = vec![
        left_click(GRID_X + 2, FIRST_ROW_Y + 2),
        left_click(GRID_X + 2, FIRST_ROW_Y + 2),
    ];

    let chosen = Picker::new(&records)
        .run(&mut terminal, script(events))
        .expect("session");

    assert_eq!(names(&chosen), vec!["Wall-C"]);
}

#[test]
fn initial_query_and_sort_apply_before_first_key() {
    let records = vec![
        row([("Sheet", "A-102"), ("Name", "First Floor")]),
        row([("Sheet", "A-101"), ("Name", "Ground Floor")]),
        row([("Sheet", "S-201"), ("Name", "Foundations")]),
    ];
    let mut terminal = terminal();

    let chosen = Picker::new(&records)
        .query("floor")
        .sort_by_first_column(true)
        .run(&mut terminal, script(vec![key(KeyCode::Enter)]))
        .expect("session");

    let sheets: Vec<String> = chosen
        .iter()
        .map(|r| r.field("Sheet").map(|v| v.to_string()).unwrap_or_default())
        .collect();
    assert_eq!(sheets, vec!["A-101"]);
}

#[test]
fn running_out_of_events_is_a_terminal_error() {
    let records = elements();
    let mut terminal = terminal();

    let result = Picker::new(&records).run(&mut terminal, script(Vec::new()));

    assert!(result.is_err());
}

#[test]
fn typed_elements_filter_on_parameters() {
    use bim_picker::model::Element;

    let elements = vec![
        Element::new(311_204, "Door-B", "Doors").with_parameter("Fire Rating", "EI30"),
        Element::new(311_210, "Door-D", "Doors").with_parameter("Fire Rating", "None"),
    ];
    let mut terminal = terminal();
    let mut events = typed("ei30");
    events.push(key(KeyCode::Enter));

    let chosen = Picker::new(&elements)
        .columns(["Name", "Fire Rating"])
        .run(&mut terminal, script(events))
        .expect("session");

    let ids: Vec<u64> = chosen.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![311_204]);
}
