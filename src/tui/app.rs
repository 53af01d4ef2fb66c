use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{error, warn};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Block,
    Frame,
};
use rusqlite::Connection;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use crate::data::COUNTRIES;
use crate::db::repository::PreferenceRepo;
use crate::session::{Effect, Msg, Phase, Services, Session, Startup, TaskKind, Timers};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{header, message, next_prayer, picker, prayers, statusbar};
use crate::utils::format::{format_clock, format_long_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerFocus {
    Countries,
    Cities,
    Coordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordField {
    Latitude,
    Longitude,
}

/// View-only state of the location picker. What was actually selected lives
/// in the session.
#[derive(Debug)]
pub struct Picker {
    pub focus: PickerFocus,
    pub country_idx: usize,
    pub city_idx: usize,
    pub coord_field: CoordField,
    pub latitude: String,
    pub longitude: String,
}

impl Picker {
    fn new() -> Self {
        Self {
            focus: PickerFocus::Countries,
            country_idx: 0,
            city_idx: 0,
            coord_field: CoordField::Latitude,
            latitude: String::new(),
            longitude: String::new(),
        }
    }

    /// Point the cursors at whatever the session has selected.
    fn follow(&mut self, session: &Session) {
        if let Some(code) = &session.selected_country {
            if let Some(i) = COUNTRIES.iter().position(|c| c.code == code.as_str()) {
                self.country_idx = i;
            }
        }
        self.city_idx = session
            .selected_city
            .as_ref()
            .and_then(|name| session.available_cities.iter().position(|c| &c.name == name))
            .unwrap_or(0);
    }

    fn coord_input(&mut self) -> &mut String {
        match self.coord_field {
            CoordField::Latitude => &mut self.latitude,
            CoordField::Longitude => &mut self.longitude,
        }
    }
}

pub struct App {
    pub session: Session,
    pub picker: Picker,
    pub now: NaiveDateTime,
    pub should_quit: bool,
    timers: Timers,
    services: Arc<Services>,
    conn: Connection,
    tx: mpsc::Sender<Event>,
}

impl App {
    pub fn new(
        conn: Connection,
        services: Services,
        tx: mpsc::Sender<Event>,
        clear_on_country_change: bool,
    ) -> Self {
        let notifications = PreferenceRepo::notifications_enabled(&conn).unwrap_or_else(|e| {
            warn!("Could not read notification setting: {}", e);
            false
        });
        App {
            session: Session::new(notifications, clear_on_country_change),
            picker: Picker::new(),
            now: Local::now().naive_local(),
            should_quit: false,
            timers: Timers::new(Instant::now()),
            services: Arc::new(services),
            conn,
            tx,
        }
    }

    pub fn start(&mut self, startup: Startup) {
        let effects = self.session.start(startup, self.now);
        self.picker.follow(&self.session);
        self.apply(effects);
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let effects = self.session.update(msg, Local::now().naive_local());
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Geolocate => {
                    let services = Arc::clone(&self.services);
                    let tx = self.tx.clone();
                    thread::spawn(move || {
                        let result = services.locate().map_err(|e| e.to_string());
                        let _ = tx.send(Event::Session(Msg::Located(result)));
                    });
                }
                Effect::Fetch(req) => {
                    let services = Arc::clone(&self.services);
                    let tx = self.tx.clone();
                    thread::spawn(move || {
                        let result = services.fetch(&req).map_err(|e| e.to_string());
                        let _ = tx.send(Event::Session(Msg::Fetched { id: req.id, result }));
                    });
                }
                Effect::SaveCity(city) => {
                    if let Err(e) = PreferenceRepo::save_city(&self.conn, &city) {
                        error!("Failed to save location: {:#}", e);
                    }
                }
                Effect::SetNotifications(enabled) => {
                    if let Err(e) = PreferenceRepo::set_notifications(&self.conn, enabled) {
                        error!("Failed to save notification setting: {:#}", e);
                    }
                }
            }
        }
    }

    /// Run whatever timers are due, then line the timers up with the session.
    pub fn tick(&mut self) {
        let instant = Instant::now();
        for kind in self.timers.due(instant) {
            self.now = Local::now().naive_local();
            match kind {
                TaskKind::Clock => {}
                TaskKind::Status => {
                    if self.session.is_stale(self.now.date()) {
                        self.dispatch(Msg::Refresh);
                    } else {
                        self.session.recompute_status(self.now);
                    }
                }
                TaskKind::Countdown => self.session.recompute_countdown(self.now),
            }
        }
        self.timers.sync(&self.session, instant);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Some terminals also report release and repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.session.phase {
            Phase::Loaded => self.handle_loaded_key(key),
            Phase::Manual => self.handle_picker_key(key),
            Phase::Error => match key.code {
                KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('m') => {
                    self.dispatch(Msg::ChangeLocation);
                    self.picker.follow(&self.session);
                }
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            Phase::Detecting | Phase::Loading => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.should_quit = true;
                }
            }
        }
        self.timers.sync(&self.session, Instant::now());
    }

    fn handle_loaded_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') => {
                self.dispatch(Msg::ChangeLocation);
                self.picker.follow(&self.session);
            }
            KeyCode::Char('r') => self.dispatch(Msg::Refresh),
            KeyCode::Char('n') => self.dispatch(Msg::ToggleNotifications),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Tab {
            self.picker.focus = match self.picker.focus {
                PickerFocus::Countries => PickerFocus::Cities,
                PickerFocus::Cities => PickerFocus::Coordinates,
                PickerFocus::Coordinates => PickerFocus::Countries,
            };
            return;
        }
        if key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }

        match self.picker.focus {
            PickerFocus::Countries => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.picker.country_idx = self.picker.country_idx.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.picker.country_idx + 1 < COUNTRIES.len() {
                        self.picker.country_idx += 1;
                    }
                }
                KeyCode::Enter => {
                    let code = COUNTRIES[self.picker.country_idx].code.to_string();
                    self.dispatch(Msg::SelectCountry(code));
                    self.picker.city_idx = 0;
                    self.picker.focus = PickerFocus::Cities;
                }
                KeyCode::Char('l') => self.dispatch(Msg::Detect),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            PickerFocus::Cities => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.picker.city_idx = self.picker.city_idx.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.picker.city_idx + 1 < self.session.available_cities.len() {
                        self.picker.city_idx += 1;
                    }
                }
                KeyCode::Enter => {
                    let name = self
                        .session
                        .available_cities
                        .get(self.picker.city_idx)
                        .map(|c| c.name.clone());
                    if let Some(name) = name {
                        self.dispatch(Msg::SelectCity(name));
                    }
                }
                KeyCode::Char('l') => self.dispatch(Msg::Detect),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            PickerFocus::Coordinates => match key.code {
                KeyCode::Up | KeyCode::Down => {
                    self.picker.coord_field = match self.picker.coord_field {
                        CoordField::Latitude => CoordField::Longitude,
                        CoordField::Longitude => CoordField::Latitude,
                    };
                }
                KeyCode::Enter => {
                    let msg = Msg::SubmitCoordinates {
                        latitude: self.picker.latitude.clone(),
                        longitude: self.picker.longitude.clone(),
                    };
                    self.dispatch(msg);
                }
                KeyCode::Backspace => {
                    self.picker.coord_input().pop();
                }
                KeyCode::Char(c) => self.picker.coord_input().push(c),
                _ => {}
            },
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        statusbar::render(frame, outer[1], self.session.phase);

        match self.session.phase {
            Phase::Detecting => message::render(
                frame,
                outer[0],
                "Detecting your location…",
                Some("Falls back to manual selection if this takes too long."),
                theme::accent(),
            ),
            Phase::Loading => message::render(
                frame,
                outer[0],
                "Fetching prayer times…",
                None,
                theme::accent(),
            ),
            Phase::Error => message::render(
                frame,
                outer[0],
                self.session.error.as_deref().unwrap_or("Something went wrong."),
                Some("Press Enter to select a location manually."),
                theme::red(),
            ),
            Phase::Manual => picker::render(frame, outer[0], &self.session, &self.picker),
            Phase::Loaded => self.draw_dashboard(frame, outer[0]),
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let Some(snapshot) = &self.session.snapshot else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8), // header
                Constraint::Min(0),    // body
            ])
            .split(area);

        header::render(
            frame,
            chunks[0],
            snapshot,
            &format_long_date(self.now.date()),
            &format_clock(self.now),
            self.session.notifications,
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        prayers::render(frame, columns[0], &self.session.rows());
        next_prayer::render(
            frame,
            columns[1],
            self.session.status.map(|s| s.next),
            self.session.countdown.as_deref(),
        );
    }
}

/// Run the TUI event loop.
pub fn run(conn: Connection, services: Services, startup: Startup, clear_on_country_change: bool) -> Result<()> {
    let events = EventHandler::new(250);
    let mut app = App::new(conn, services, events.sender(), clear_on_country_change);
    app.start(startup);

    let mut terminal = ratatui::init();

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        match events.next()? {
            Event::Key(key) => {
                app.handle_key(key);
                if app.should_quit {
                    break;
                }
            }
            Event::Tick => app.tick(),
            Event::Session(msg) => {
                app.dispatch(msg);
                app.picker.follow(&app.session);
                app.tick();
            }
        }
    }

    ratatui::restore();
    Ok(())
}
