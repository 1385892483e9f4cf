use std::io::{self, Stdout};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use drill_adapters::http::HttpQueryTransport;
use drill_core::diagnostics::FileDiagnosticsLog;
use drill_core::endpoints::{EndpointProfile, FileEndpointsStore};
use drill_core::response::{QueryOutcome, ResultSet, NO_RESULTS_NOTICE};
use drill_core::submitter::QuerySubmitter;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};
use thiserror::Error;

const TICK_RATE: Duration = Duration::from_millis(120);
const LOADING_DOT_FRAMES: u8 = 3;

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    EndpointSetup,
    Console,
}

impl Pane {
    fn next(self) -> Self {
        match self {
            Self::EndpointSetup => Self::Console,
            Self::Console => Self::EndpointSetup,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupField {
    ProfileName,
    BaseUrl,
}

impl SetupField {
    fn next(self) -> Self {
        match self {
            Self::ProfileName => Self::BaseUrl,
            Self::BaseUrl => Self::ProfileName,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::ProfileName => "Profile",
            Self::BaseUrl => "Base URL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EndpointSetupForm {
    profile_name: String,
    base_url: String,
    active_field: SetupField,
}

impl Default for EndpointSetupForm {
    fn default() -> Self {
        let endpoint = EndpointProfile::default();
        Self {
            profile_name: endpoint.name,
            base_url: endpoint.base_url,
            active_field: SetupField::ProfileName,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Msg {
    Quit,
    NextPane,
    Submit,
    Input(char),
    Backspace,
    ScrollUp,
    ScrollDown,
    Tick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ViewState {
    Idle,
    Loading,
    Displaying(QueryOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SubmissionRequest {
    query_text: String,
    base_url: String,
}

#[derive(Debug)]
struct TuiApp {
    pane: Pane,
    setup_form: EndpointSetupForm,
    active_endpoint: EndpointProfile,
    query_input: String,
    view: ViewState,
    results_scroll: usize,
    loading_frame: u8,
    status_line: String,
    should_quit: bool,
}

impl Default for TuiApp {
    fn default() -> Self {
        Self {
            pane: Pane::Console,
            setup_form: EndpointSetupForm::default(),
            active_endpoint: EndpointProfile::default(),
            query_input: String::new(),
            view: ViewState::Idle,
            results_scroll: 0,
            loading_frame: 0,
            status_line: "Type a query and press Enter to run it".to_string(),
            should_quit: false,
        }
    }
}

impl TuiApp {
    fn handle(&mut self, msg: Msg) -> Option<SubmissionRequest> {
        match msg {
            Msg::Quit => {
                self.should_quit = true;
                None
            }
            Msg::NextPane => {
                if self.pane == Pane::EndpointSetup {
                    self.setup_form.active_field = self.setup_form.active_field.next();
                    self.status_line =
                        format!("Setup field: {}", self.setup_form.active_field.label());
                } else {
                    self.pane = self.pane.next();
                    self.status_line = format!("Switched to {}", self.pane_name());
                }
                None
            }
            Msg::Submit => self.submit(),
            Msg::Input(character) => {
                self.input_char(character);
                None
            }
            Msg::Backspace => {
                self.delete_char();
                None
            }
            Msg::ScrollUp => {
                self.navigate_up();
                None
            }
            Msg::ScrollDown => {
                self.navigate_down();
                None
            }
            Msg::Tick => {
                self.on_tick();
                None
            }
        }
    }

    fn on_tick(&mut self) {
        if self.view == ViewState::Loading {
            self.loading_frame = self.loading_frame.wrapping_add(1) % LOADING_DOT_FRAMES;
        }
    }

    fn submit(&mut self) -> Option<SubmissionRequest> {
        match self.pane {
            Pane::EndpointSetup => {
                self.save_endpoint();
                None
            }
            Pane::Console => Some(self.begin_submission()),
        }
    }

    fn begin_submission(&mut self) -> SubmissionRequest {
        let query_text = self.query_input.clone();
        self.view = ViewState::Loading;
        self.results_scroll = 0;
        self.loading_frame = 0;
        self.status_line = format!("Submitted to `{}`", self.active_endpoint.name);
        SubmissionRequest {
            query_text,
            base_url: self.active_endpoint.base_url.clone(),
        }
    }

    fn complete_submission(&mut self, outcome: QueryOutcome) {
        self.status_line = match &outcome {
            QueryOutcome::Results(result_set) if result_set.is_empty() => {
                "Query finished: no rows".to_string()
            }
            QueryOutcome::Results(result_set) => {
                format!("Query finished: {} rows", result_set.rows.len())
            }
            QueryOutcome::Failure(_) => "Query failed".to_string(),
        };
        self.results_scroll = 0;
        self.view = ViewState::Displaying(outcome);
    }

    fn save_endpoint(&mut self) {
        let name = self.setup_form.profile_name.trim();
        let base_url = self.setup_form.base_url.trim();
        if name.is_empty() || base_url.is_empty() {
            self.status_line = "Endpoint name and base URL are both required".to_string();
            return;
        }

        let endpoint = EndpointProfile::new(name, base_url);
        match FileEndpointsStore::load_default() {
            Ok(mut store) => {
                store.upsert_endpoint(endpoint.clone());
                if let Err(error) = store.persist() {
                    self.status_line = format!("Endpoint active (save failed: {error})");
                } else {
                    self.status_line = format!("Endpoint `{}` saved", endpoint.name);
                }
            }
            Err(error) => {
                self.status_line = format!("Endpoint active (store unavailable: {error})");
            }
        }

        self.active_endpoint = endpoint;
        self.pane = Pane::Console;
    }

    fn activate_endpoint(&mut self, endpoint: EndpointProfile) {
        self.setup_form.profile_name = endpoint.name.clone();
        self.setup_form.base_url = endpoint.base_url.clone();
        self.status_line = format!("Using endpoint `{}`", endpoint.name);
        self.active_endpoint = endpoint;
    }

    fn input_char(&mut self, character: char) {
        match self.pane {
            Pane::EndpointSetup => match self.setup_form.active_field {
                SetupField::ProfileName => self.setup_form.profile_name.push(character),
                SetupField::BaseUrl => self.setup_form.base_url.push(character),
            },
            Pane::Console => self.query_input.push(character),
        }
    }

    fn delete_char(&mut self) {
        match self.pane {
            Pane::EndpointSetup => {
                match self.setup_form.active_field {
                    SetupField::ProfileName => self.setup_form.profile_name.pop(),
                    SetupField::BaseUrl => self.setup_form.base_url.pop(),
                };
            }
            Pane::Console => {
                self.query_input.pop();
            }
        }
    }

    fn navigate_up(&mut self) {
        match self.pane {
            Pane::EndpointSetup => {
                self.setup_form.active_field = self.setup_form.active_field.next();
                self.status_line =
                    format!("Setup field: {}", self.setup_form.active_field.label());
            }
            Pane::Console => {
                self.results_scroll = self.results_scroll.saturating_sub(1);
            }
        }
    }

    fn navigate_down(&mut self) {
        match self.pane {
            Pane::EndpointSetup => {
                self.setup_form.active_field = self.setup_form.active_field.next();
                self.status_line =
                    format!("Setup field: {}", self.setup_form.active_field.label());
            }
            Pane::Console => {
                let max_scroll = self.displayed_line_count().saturating_sub(1);
                self.results_scroll = (self.results_scroll + 1).min(max_scroll);
            }
        }
    }

    fn displayed_line_count(&self) -> usize {
        match &self.view {
            ViewState::Displaying(QueryOutcome::Results(result_set)) if !result_set.is_empty() => {
                result_set.rows.len() + 2
            }
            _ => 0,
        }
    }

    fn pane_name(&self) -> &'static str {
        match self.pane {
            Pane::EndpointSetup => "Endpoint Setup",
            Pane::Console => "Console",
        }
    }
}

pub fn run() -> Result<(), TuiError> {
    let mut terminal = setup_terminal()?;
    let run_result = run_loop(&mut terminal);
    let restore_result = restore_terminal(&mut terminal);

    if let Err(error) = run_result {
        restore_result?;
        return Err(error);
    }

    restore_result?;
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), TuiError> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), TuiError> {
    let runtime = tokio::runtime::Runtime::new()?;
    let (completion_tx, completion_rx) = mpsc::channel::<QueryOutcome>();

    let mut app = TuiApp::default();
    if let Ok(store) = FileEndpointsStore::load_default() {
        if let Some(endpoint) = store.endpoints().first() {
            app.activate_endpoint(endpoint.clone());
        }
    }

    let mut last_tick = Instant::now();

    loop {
        for outcome in completion_rx.try_iter() {
            app.complete_submission(outcome);
        }

        terminal.draw(|frame| render(frame, &app))?;

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(message) = map_key_event(key) {
                        if let Some(request) = app.handle(message) {
                            spawn_submission(&runtime, &completion_tx, request);
                        }
                    }
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.handle(Msg::Tick);
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn spawn_submission(
    runtime: &tokio::runtime::Runtime,
    completions: &mpsc::Sender<QueryOutcome>,
    request: SubmissionRequest,
) {
    let completions = completions.clone();
    let transport = HttpQueryTransport::new(&request.base_url);
    let submitter = match FileDiagnosticsLog::load_default() {
        Ok(log) => QuerySubmitter::new(transport).with_diagnostics(log),
        Err(_) => QuerySubmitter::new(transport),
    };

    runtime.spawn(async move {
        let outcome = submitter.submit(&request.query_text).await;
        let _ = completions.send(outcome);
    });
}

fn render(frame: &mut Frame<'_>, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" View: {} ", app.pane_name()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::raw(format!(
            "Endpoint: {} ({})",
            app.active_endpoint.name, app.active_endpoint.base_url
        )),
        Span::raw(" | "),
        Span::raw(format!(
            "Query: {}",
            if app.view == ViewState::Loading {
                "running"
            } else {
                "idle"
            }
        )),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Remote Query Console"),
    );
    frame.render_widget(header, chunks[0]);

    match app.pane {
        Pane::EndpointSetup => render_setup(frame, app, chunks[1]),
        Pane::Console => render_console(frame, app, chunks[1]),
    }

    let footer = Paragraph::new(vec![
        match error_text(&app.view) {
            Some(message) => Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(""),
        },
        Line::from(format!("Status: {}", app.status_line)),
    ])
    .block(Block::default().borders(Borders::ALL).title("Messages"));
    frame.render_widget(footer, chunks[2]);
}

fn render_setup(frame: &mut Frame<'_>, app: &TuiApp, area: ratatui::layout::Rect) {
    let fields = [
        (
            SetupField::ProfileName,
            "Profile",
            app.setup_form.profile_name.as_str(),
        ),
        (
            SetupField::BaseUrl,
            "Base URL",
            app.setup_form.base_url.as_str(),
        ),
    ];

    let mut lines = vec![
        Line::from("Endpoint Setup"),
        Line::from("Enter: save endpoint and return to the console"),
        Line::from("Tab / arrows: switch field"),
        Line::from(""),
    ];
    for (field, label, value) in fields {
        let marker = if app.setup_form.active_field == field {
            ">"
        } else {
            " "
        };
        lines.push(Line::from(format!("{marker} {label}: {value}")));
    }

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Setup"))
        .alignment(Alignment::Left);
    frame.render_widget(body, area);
}

fn render_console(frame: &mut Frame<'_>, app: &TuiApp, area: ratatui::layout::Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    let input = Paragraph::new(app.query_input.as_str())
        .block(Block::default().borders(Borders::ALL).title("Query"));
    frame.render_widget(input, chunks[0]);

    let lines = results_text(&app.view, app.loading_frame)
        .into_iter()
        .skip(app.results_scroll)
        .map(Line::from)
        .collect::<Vec<_>>();
    let results = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Results"))
        .alignment(Alignment::Left);
    frame.render_widget(results, chunks[1]);
}

fn results_text(view: &ViewState, loading_frame: u8) -> Vec<String> {
    match view {
        ViewState::Idle => vec!["Type a query and press Enter to run it.".to_string()],
        ViewState::Loading => vec![format!(
            "Loading{}",
            ".".repeat(usize::from(loading_frame % LOADING_DOT_FRAMES) + 1)
        )],
        ViewState::Displaying(QueryOutcome::Results(result_set)) if result_set.is_empty() => {
            vec![NO_RESULTS_NOTICE.to_string()]
        }
        ViewState::Displaying(QueryOutcome::Results(result_set)) => format_table(result_set),
        ViewState::Displaying(QueryOutcome::Failure(_)) => Vec::new(),
    }
}

fn error_text(view: &ViewState) -> Option<&str> {
    match view {
        ViewState::Displaying(QueryOutcome::Failure(message)) => Some(message.as_str()),
        _ => None,
    }
}

fn format_table(result_set: &ResultSet) -> Vec<String> {
    let mut widths = result_set
        .columns
        .iter()
        .map(String::len)
        .collect::<Vec<_>>();
    for row in &result_set.rows {
        for (index, cell) in row.cells.iter().enumerate() {
            if index < widths.len() {
                widths[index] = widths[index].max(cell.len());
            } else {
                widths.push(cell.len());
            }
        }
    }

    let header = result_set
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| pad_cell(column, widths[index]))
        .collect::<Vec<_>>()
        .join(" | ");
    let separator = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut lines = vec![header.trim_end().to_string(), separator];
    for row in &result_set.rows {
        let rendered = row
            .cells
            .iter()
            .enumerate()
            .map(|(index, cell)| pad_cell(cell, widths[index]))
            .collect::<Vec<_>>()
            .join(" | ");
        lines.push(rendered.trim_end().to_string());
    }
    lines
}

fn pad_cell(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

fn map_key_event(key: KeyEvent) -> Option<Msg> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Msg::Quit),
        (_, KeyCode::Esc) => Some(Msg::Quit),
        (_, KeyCode::Tab) => Some(Msg::NextPane),
        (_, KeyCode::Enter) => Some(Msg::Submit),
        (_, KeyCode::Backspace) => Some(Msg::Backspace),
        (_, KeyCode::Up) => Some(Msg::ScrollUp),
        (_, KeyCode::Down) => Some(Msg::ScrollDown),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(character)) => {
            Some(Msg::Input(character))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use drill_core::response::{QueryOutcome, ResultRow, ResultSet, NO_RESULTS_NOTICE};

    use super::{
        error_text, format_table, map_key_event, results_text, Msg, Pane, SetupField, TuiApp,
        ViewState,
    };

    fn sample_result_set() -> ResultSet {
        ResultSet {
            columns: vec!["id".to_string(), "name".to_string()],
            rows: vec![
                ResultRow::new(vec!["1".to_string(), "alice".to_string()]),
                ResultRow::new(vec!["2".to_string(), "bob".to_string()]),
            ],
        }
    }

    #[test]
    fn pane_toggles_between_console_and_setup() {
        assert_eq!(Pane::Console.next(), Pane::EndpointSetup);
        assert_eq!(Pane::EndpointSetup.next(), Pane::Console);
    }

    #[test]
    fn keymap_supports_required_global_keys() {
        assert!(matches!(
            map_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Msg::Quit)
        ));
        assert!(matches!(
            map_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Msg::Quit)
        ));
        assert!(matches!(
            map_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Msg::Submit)
        ));
        assert!(matches!(
            map_key_event(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Msg::NextPane)
        ));
    }

    #[test]
    fn plain_and_shifted_characters_are_input() {
        assert!(matches!(
            map_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(Msg::Input('x'))
        ));
        assert!(matches!(
            map_key_event(KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            Some(Msg::Input('X'))
        ));
        assert!(map_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)).is_none());
    }

    #[test]
    fn typing_in_the_console_edits_the_query_input() {
        let mut app = TuiApp::default();
        for character in "select 1".chars() {
            app.handle(Msg::Input(character));
        }
        app.handle(Msg::Backspace);

        assert_eq!(app.query_input, "select ");
    }

    #[test]
    fn typing_in_setup_edits_the_active_field() {
        let mut app = TuiApp::default();
        app.handle(Msg::NextPane);
        assert_eq!(app.pane, Pane::EndpointSetup);

        app.setup_form.profile_name.clear();
        app.handle(Msg::Input('d'));
        app.handle(Msg::NextPane);
        assert_eq!(app.setup_form.active_field, SetupField::BaseUrl);
        app.handle(Msg::Input('x'));

        assert_eq!(app.setup_form.profile_name, "d");
        assert!(app.setup_form.base_url.ends_with('x'));
    }

    #[test]
    fn submit_captures_the_input_at_activation_and_enters_loading() {
        let mut app = TuiApp::default();
        app.query_input = "show all users".to_string();

        let request = app.handle(Msg::Submit).expect("console submit should spawn");

        assert_eq!(request.query_text, "show all users");
        assert_eq!(request.base_url, app.active_endpoint.base_url);
        assert_eq!(app.view, ViewState::Loading);
    }

    #[test]
    fn submit_clears_the_previous_outcome_and_error() {
        let mut app = TuiApp::default();
        app.view = ViewState::Displaying(QueryOutcome::Failure("old error".to_string()));

        app.handle(Msg::Submit);

        assert_eq!(app.view, ViewState::Loading);
        assert!(error_text(&app.view).is_none());
    }

    #[test]
    fn completion_displays_results_and_clears_loading() {
        let mut app = TuiApp::default();
        app.handle(Msg::Submit);
        assert_eq!(app.view, ViewState::Loading);

        app.complete_submission(QueryOutcome::Results(sample_result_set()));

        assert!(matches!(
            app.view,
            ViewState::Displaying(QueryOutcome::Results(_))
        ));
        assert_eq!(app.status_line, "Query finished: 2 rows");
    }

    #[test]
    fn failure_completion_shows_the_error_and_clears_loading() {
        let mut app = TuiApp::default();
        app.handle(Msg::Submit);

        app.complete_submission(QueryOutcome::Failure("Error: 503 Service Unavailable".to_string()));

        assert_eq!(
            error_text(&app.view),
            Some("Error: 503 Service Unavailable")
        );
        assert_eq!(app.status_line, "Query failed");
    }

    #[test]
    fn overlapping_submissions_are_not_guarded_and_last_completion_wins() {
        let mut app = TuiApp::default();
        app.query_input = "first".to_string();
        let first = app.handle(Msg::Submit).expect("first submit should spawn");
        app.query_input = "second".to_string();
        let second = app.handle(Msg::Submit).expect("second submit should spawn");
        assert_ne!(first, second);

        app.complete_submission(QueryOutcome::Failure("first failed".to_string()));
        app.complete_submission(QueryOutcome::Results(sample_result_set()));

        assert!(matches!(
            app.view,
            ViewState::Displaying(QueryOutcome::Results(_))
        ));
    }

    #[test]
    fn results_text_shows_the_loading_indicator_only_while_loading() {
        let loading = results_text(&ViewState::Loading, 0);
        assert_eq!(loading, vec!["Loading.".to_string()]);

        let displaying = results_text(
            &ViewState::Displaying(QueryOutcome::Results(sample_result_set())),
            0,
        );
        assert!(!displaying[0].starts_with("Loading"));
    }

    #[test]
    fn empty_result_set_renders_the_no_results_notice_never_a_table() {
        let empty = ResultSet {
            columns: vec!["a".to_string()],
            rows: Vec::new(),
        };
        let lines = results_text(&ViewState::Displaying(QueryOutcome::Results(empty)), 0);
        assert_eq!(lines, vec![NO_RESULTS_NOTICE.to_string()]);
    }

    #[test]
    fn failure_renders_no_result_lines() {
        let lines = results_text(
            &ViewState::Displaying(QueryOutcome::Failure("X".to_string())),
            0,
        );
        assert!(lines.is_empty());
    }

    #[test]
    fn formatted_table_preserves_column_and_cell_order() {
        let lines = format_table(&sample_result_set());

        assert_eq!(lines.len(), 4);
        let header_cells = lines[0].split(" | ").collect::<Vec<_>>();
        assert_eq!(header_cells.len(), 2);
        assert_eq!(header_cells[0].trim_end(), "id");
        assert_eq!(header_cells[1].trim_end(), "name");
        assert_eq!(lines[2].split(" | ").count(), 2);
        assert!(lines[2].starts_with("1 "));
        assert!(lines[3].ends_with("bob"));
    }

    #[test]
    fn single_cell_table_matches_the_minimal_scenario() {
        let result_set = ResultSet {
            columns: vec!["a".to_string()],
            rows: vec![ResultRow::new(vec!["1".to_string()])],
        };
        let lines = format_table(&result_set);

        assert_eq!(lines[0], "a");
        assert_eq!(lines[2], "1");
    }

    #[test]
    fn scrolling_is_clamped_to_the_table_height() {
        let mut app = TuiApp::default();
        app.complete_submission(QueryOutcome::Results(sample_result_set()));

        for _ in 0..10 {
            app.handle(Msg::ScrollDown);
        }
        assert_eq!(app.results_scroll, 3);

        app.handle(Msg::ScrollUp);
        assert_eq!(app.results_scroll, 2);
    }
}
