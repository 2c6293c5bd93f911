use crate::engine::{self, Countdown};
use crate::model::Profile;
use crate::quotes;
use crate::storage::ProfileStore;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use rand::Rng;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

pub fn run(profile: Option<Profile>, store: ProfileStore) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(profile, store, Local::now().naive_local());
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App {
    store: ProfileStore,
    screen: Screen,
    quote: &'static str,
    snapshot: Countdown,
    progress: f64,
    last_tick: Instant,
    status: String,
}

enum Screen {
    Setup(SetupForm),
    Counting(Profile),
    Celebrating(Profile),
}

struct SetupForm {
    name: FieldValue,
    date: FieldValue,
    field: FormField,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum FormField {
    Name,
    Date,
}

#[derive(Clone)]
struct FieldValue {
    value: String,
    cursor: usize,
}

impl FieldValue {
    fn new(value: &str) -> Self {
        FieldValue {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor = prev_grapheme(self.cursor, &self.value);
    }

    fn move_right(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        self.cursor = next_grapheme(self.cursor, &self.value);
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_grapheme(self.cursor, &self.value);
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn with_caret(&self) -> String {
        let mut text = self.value.clone();
        text.insert_str(self.cursor, "▌");
        text
    }
}

impl SetupForm {
    fn new() -> Self {
        SetupForm {
            name: FieldValue::new(""),
            date: FieldValue::new(""),
            field: FormField::Name,
        }
    }

    fn next_field(&mut self) {
        self.field = match self.field {
            FormField::Name => FormField::Date,
            FormField::Date => FormField::Name,
        };
    }

    fn active_field_mut(&mut self) -> &mut FieldValue {
        match self.field {
            FormField::Name => &mut self.name,
            FormField::Date => &mut self.date,
        }
    }
}

impl App {
    fn new(profile: Option<Profile>, store: ProfileStore, now: NaiveDateTime) -> Self {
        let mut app = App {
            store,
            screen: Screen::Setup(SetupForm::new()),
            quote: quotes::daily_quote(now.date()),
            snapshot: Countdown::default(),
            progress: 0.0,
            last_tick: Instant::now(),
            status: "Enter your birthday to start the countdown".into(),
        };
        if let Some(profile) = profile {
            app.enter_profile(profile, now);
            app.status = format!("Loaded profile from {}", app.store.path().display());
        }
        app
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key, Local::now().naive_local())? {
                        break;
                    }
                }
            }
            if self.last_tick.elapsed() >= Duration::from_secs(1) {
                self.tick(Local::now().naive_local());
                self.last_tick = Instant::now();
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, now: NaiveDateTime) -> Result<bool> {
        match self.screen {
            Screen::Setup(_) => self.handle_setup_key(key, now),
            Screen::Counting(_) | Screen::Celebrating(_) => self.handle_countdown_key(key),
        }
    }

    fn handle_setup_key(&mut self, key: KeyEvent, now: NaiveDateTime) -> Result<bool> {
        match key.code {
            KeyCode::Esc => return Ok(true),
            KeyCode::Enter => {
                self.submit_setup(now)?;
                return Ok(false);
            }
            _ => {}
        }
        if let Screen::Setup(form) = &mut self.screen {
            match key.code {
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                    form.next_field()
                }
                KeyCode::Left => form.active_field_mut().move_left(),
                KeyCode::Right => form.active_field_mut().move_right(),
                KeyCode::Backspace => form.active_field_mut().backspace(),
                KeyCode::Char(c) => {
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    {
                        form.active_field_mut().insert_char(c);
                    }
                }
                _ => {}
            }
        }
        Ok(false)
    }

    fn handle_countdown_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('r') => self.reset()?,
            _ => {}
        }
        Ok(false)
    }

    fn submit_setup(&mut self, now: NaiveDateTime) -> Result<()> {
        let (name, date) = match &self.screen {
            Screen::Setup(form) => (form.name.value.clone(), form.date.value.clone()),
            _ => return Ok(()),
        };
        if date.trim().is_empty() {
            self.status = "Birthday date is required (YYYY-MM-DD)".into();
            return Ok(());
        }
        let profile = match Profile::from_input(Some(name), &date) {
            Ok(profile) => profile,
            Err(err) => {
                self.status = format!("{}", err);
                return Ok(());
            }
        };
        self.store.save(&profile)?;
        self.enter_profile(profile, now);
        self.status = "Countdown started".into();
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.store.clear()?;
        self.screen = Screen::Setup(SetupForm::new());
        self.snapshot = Countdown::default();
        self.progress = 0.0;
        self.status = "Countdown cleared".into();
        Ok(())
    }

    fn enter_profile(&mut self, profile: Profile, now: NaiveDateTime) {
        if engine::is_anniversary(profile.birth_date, now.date()) {
            self.snapshot = Countdown::default();
            self.progress = 0.0;
            self.screen = Screen::Celebrating(profile);
        } else {
            let target = engine::next_anniversary_moment(profile.birth_date, now);
            self.snapshot = engine::remaining(target, now);
            self.progress = engine::progress(profile.birth_date, now.date());
            self.screen = Screen::Counting(profile);
        }
    }

    fn tick(&mut self, now: NaiveDateTime) {
        let profile = match &self.screen {
            Screen::Counting(profile) | Screen::Celebrating(profile) => profile.clone(),
            Screen::Setup(_) => return,
        };
        self.enter_profile(profile, now);
    }

    fn draw(&self, f: &mut ratatui::Frame<'_>) {
        match &self.screen {
            Screen::Setup(form) => self.draw_setup(f, form),
            Screen::Counting(profile) => self.draw_counting(f, profile),
            Screen::Celebrating(profile) => self.draw_celebrating(f, profile),
        }
    }

    fn draw_setup(&self, f: &mut ratatui::Frame<'_>, form: &SetupForm) {
        let area = centered_rect(60, 50, f.size());
        let mut lines = vec![
            Line::from(Span::styled(
                "Birthday Countdown",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from("Let's count down to your special day!"),
            Line::from(""),
        ];
        lines.extend(field_lines(
            "Name (optional)",
            &form.name,
            form.field == FormField::Name,
        ));
        lines.extend(field_lines(
            "Birthday (YYYY-MM-DD)",
            &form.date,
            form.field == FormField::Date,
        ));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter start • Tab switch field • Esc quit",
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            self.status.clone(),
            Style::default().fg(Color::LightYellow),
        )));
        let dialog = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(Span::styled(
                        "Setup",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }

    fn draw_counting(&self, f: &mut ratatui::Frame<'_>, profile: &Profile) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(5),
                Constraint::Length(4),
                Constraint::Length(3),
            ])
            .split(f.size());

        self.draw_header(f, layout[0], profile);
        self.draw_progress(f, layout[1]);
        self.draw_countdown_row(f, layout[2]);
        self.draw_quote(f, layout[3]);
        self.draw_footer(f, layout[4], "r reset  q quit");
    }

    fn draw_celebrating(&self, f: &mut ratatui::Frame<'_>, profile: &Profile) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(4),
                Constraint::Length(5),
                Constraint::Min(4),
                Constraint::Length(3),
            ])
            .split(f.size());

        f.render_widget(Paragraph::new(confetti_lines(layout[0])), layout[0]);
        let banner = vec![
            Line::from(Span::styled(
                profile.greeting(),
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Hope your special day is filled with happiness and cake!"),
        ];
        let paragraph = Paragraph::new(banner).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightMagenta)),
        );
        f.render_widget(paragraph, layout[1]);
        f.render_widget(Paragraph::new(confetti_lines(layout[2])), layout[2]);
        self.draw_footer(f, layout[3], "r plan next year's countdown  q quit");
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect, profile: &Profile) {
        let title = Line::from(vec![
            Span::styled(
                "bday ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(profile.title(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  •  "),
            Span::styled(
                profile.birth_date.format("%Y-%m-%d").to_string(),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("{}", self.store.path().display()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(title)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_progress(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(area);
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(Span::styled(
                        format!("Progress to Birthday  {:.0}%", self.progress),
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .gauge_style(Style::default().fg(Color::LightMagenta))
            .ratio((self.progress / 100.0).clamp(0.0, 1.0));
        f.render_widget(gauge, rows[0]);
        let hint = if self.progress < 50.0 {
            "Still growing the excitement!"
        } else if self.progress < 80.0 {
            "Getting closer!"
        } else {
            "Almost there!"
        };
        let hint = Paragraph::new(Span::styled(hint, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Center);
        f.render_widget(hint, rows[1]);
    }

    fn draw_countdown_row(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);
        let values = [
            (self.snapshot.days, "Days"),
            (self.snapshot.hours, "Hours"),
            (self.snapshot.minutes, "Minutes"),
            (self.snapshot.seconds, "Seconds"),
        ];
        for (idx, (value, label)) in values.iter().enumerate() {
            f.render_widget(countdown_cell(*value, label, color_for_index(idx)), cells[idx]);
        }
    }

    fn draw_quote(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let paragraph = Paragraph::new(Span::styled(
            self.quote,
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Quote of the Day")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(paragraph, area);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect, help: &str) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(1)])
            .split(area);
        let help_bar = Paragraph::new(Span::styled(
            help.to_string(),
            Style::default().fg(Color::LightCyan),
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(help_bar, rows[0]);
        let status = Paragraph::new(self.status.clone())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(status, rows[1]);
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}

fn field_lines(label: &str, field: &FieldValue, active: bool) -> Vec<Line<'static>> {
    let label_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD | Modifier::DIM);
    let value_style = Style::default().fg(if active { Color::Cyan } else { Color::White });
    let text = if active {
        field.with_caret()
    } else {
        field.value.clone()
    };
    vec![Line::from(vec![
        Span::styled(format!("{}: ", label), label_style),
        Span::styled(text, value_style),
    ])]
}

fn countdown_cell(value: i64, label: &str, accent: Color) -> Paragraph<'static> {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{:02}", value),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            label.to_uppercase(),
            Style::default().fg(Color::Gray),
        )),
    ];
    Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent)),
    )
}

fn color_for_index(idx: usize) -> Color {
    let palette = [
        Color::LightMagenta,
        Color::LightBlue,
        Color::LightGreen,
        Color::LightYellow,
    ];
    palette[idx % palette.len()]
}

fn confetti_lines(area: Rect) -> Vec<Line<'static>> {
    let mut rng = rand::thread_rng();
    let glyphs = ['*', 'o', '+', '.', 'x', '~'];
    let palette = [
        Color::LightRed,
        Color::LightYellow,
        Color::LightGreen,
        Color::LightCyan,
        Color::LightMagenta,
        Color::LightBlue,
    ];
    (0..area.height)
        .map(|_| {
            let spans = (0..area.width)
                .map(|_| {
                    if rng.gen_bool(0.12) {
                        let glyph = glyphs[rng.gen_range(0..glyphs.len())];
                        let color = palette[rng.gen_range(0..palette.len())];
                        Span::styled(glyph.to_string(), Style::default().fg(color))
                    } else {
                        Span::raw(" ")
                    }
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect()
}

fn prev_grapheme(cursor: usize, text: &str) -> usize {
    if cursor == 0 {
        return 0;
    }
    let mut prev = 0;
    for (idx, _) in text.char_indices() {
        if idx >= cursor {
            break;
        }
        prev = idx;
    }
    prev
}

fn next_grapheme(cursor: usize, text: &str) -> usize {
    for (idx, ch) in text.char_indices() {
        if idx > cursor {
            return idx;
        }
        if idx == cursor {
            return cursor + ch.len_utf8();
        }
    }
    text.len()
}
