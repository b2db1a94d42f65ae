use std::{cmp, io, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{error, info, warn};
use zoo_core::{
    command::{self, InputError, MenuChoice, RoleChoice, SpeciesChoice},
    Animal, Species, Zoo, ZooStore,
};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_INPUT_LEN: usize = 64;
const MAX_LOG_LINES: usize = 500;
const MENU_WIDTH: u16 = 30;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogKind {
    Header,
    Event,
    Notice,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct LogEntry {
    kind: LogKind,
    text: String,
}

/// Question currently asked by the input modal, carrying earlier answers.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PromptStep {
    AnimalName,
    AnimalAge { name: String },
    AnimalSpecies { name: String, age: u32 },
    AnimalFlight { name: String, age: u32 },
    RemoveAnimal,
    StaffName,
    StaffRole { name: String },
    RemoveStaff,
}

impl PromptStep {
    fn title(&self) -> &'static str {
        match self {
            PromptStep::AnimalName
            | PromptStep::AnimalAge { .. }
            | PromptStep::AnimalSpecies { .. }
            | PromptStep::AnimalFlight { .. } => "Add Animal",
            PromptStep::RemoveAnimal => "Remove Animal",
            PromptStep::StaffName | PromptStep::StaffRole { .. } => "Add Staff",
            PromptStep::RemoveStaff => "Remove Staff",
        }
    }

    fn question(&self) -> String {
        match self {
            PromptStep::AnimalName => "Animal name".to_string(),
            PromptStep::AnimalAge { name } => format!("Age of {name}"),
            PromptStep::AnimalSpecies { name, .. } => {
                format!("Type of {name} (Bird, Mammal, Reptile)")
            }
            PromptStep::AnimalFlight { name, .. } => format!("Can {name} fly? (yes/no)"),
            PromptStep::RemoveAnimal => "Name of the animal to remove".to_string(),
            PromptStep::StaffName => "Staff member name".to_string(),
            PromptStep::StaffRole { name } => format!("Role of {name} (ZooKeeper, Veterinarian)"),
            PromptStep::RemoveStaff => "Name of the staff member to remove".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct PromptModal {
    step: PromptStep,
    input: String,
    cursor: usize,
}

impl PromptModal {
    fn new(step: PromptStep) -> Self {
        Self {
            step,
            input: String::new(),
            cursor: 0,
        }
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.input
            .char_indices()
            .nth(cursor)
            .map(|(index, _)| index)
            .unwrap_or(self.input.len())
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.char_count() as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, len) as usize;
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    fn insert(&mut self, ch: char) {
        if self.char_count() >= MAX_INPUT_LEN || ch.is_control() {
            return;
        }
        let index = self.byte_index(self.cursor);
        self.input.insert(index, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let index = self.byte_index(self.cursor);
            self.input.remove(index);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let index = self.byte_index(self.cursor);
            self.input.remove(index);
        }
    }
}

/// Menu-driven terminal front-end operating on a borrowed zoo.
pub struct ZooApp<'a> {
    zoo: &'a mut Zoo,
    store: &'a ZooStore,
    theme: Theme,
    log: Vec<LogEntry>,
    status: String,
    prompt: Option<PromptModal>,
    menu_cursor: usize,
    should_quit: bool,
}

impl<'a> ZooApp<'a> {
    pub fn new(zoo: &'a mut Zoo, store: &'a ZooStore) -> Self {
        Self {
            zoo,
            store,
            theme: Theme::default(),
            log: Vec::new(),
            status: "Ready".to_string(),
            prompt: None,
            menu_cursor: 0,
            should_quit: false,
        }
    }

    /// Append an informational line to the message log.
    pub fn notice(&mut self, text: impl Into<String>) {
        self.push_log(LogKind::Notice, text);
    }

    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let outcome = self.event_loop(&mut terminal);
        restore_terminal(&mut terminal)?;
        outcome
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                return Ok(());
            }
            if event::poll(TICK_RATE).context("failed to poll terminal events")? {
                if let Event::Key(key) = event::read().context("failed to read terminal event")? {
                    self.handle_key(key);
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            warn!("quit requested without saving");
            self.should_quit = true;
            return;
        }
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
        } else {
            self.handle_menu_key(key);
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.move_menu_cursor(-1),
            KeyCode::Down => self.move_menu_cursor(1),
            KeyCode::Enter => {
                let choice = MenuChoice::ALL[self.menu_cursor];
                self.dispatch(choice);
            }
            KeyCode::Char(ch) => match MenuChoice::parse(&ch.to_string()) {
                Ok(choice) => {
                    self.menu_cursor = choice.number() - 1;
                    self.dispatch(choice);
                }
                Err(err) => self.reject(err),
            },
            _ => {}
        }
    }

    fn move_menu_cursor(&mut self, delta: isize) {
        let len = MenuChoice::ALL.len() as isize;
        self.menu_cursor = (self.menu_cursor as isize + delta).rem_euclid(len) as usize;
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.prompt = None;
                self.status = "Cancelled".to_string();
                return;
            }
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.submit(prompt.step, &prompt.input);
                }
                return;
            }
            _ => {}
        }

        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Left => prompt.move_cursor(-1),
            KeyCode::Right => prompt.move_cursor(1),
            KeyCode::Home => prompt.move_home(),
            KeyCode::End => prompt.move_end(),
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Delete => prompt.delete(),
            KeyCode::Char(ch) => {
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                    prompt.insert(ch);
                }
            }
            _ => {}
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) {
        self.status = choice.label().to_string();
        match choice {
            MenuChoice::AddAnimal => self.ask(PromptStep::AnimalName),
            MenuChoice::RemoveAnimal => self.ask(PromptStep::RemoveAnimal),
            MenuChoice::AddStaff => self.ask(PromptStep::StaffName),
            MenuChoice::RemoveStaff => self.ask(PromptStep::RemoveStaff),
            MenuChoice::ListAnimals => {
                let lines = self.zoo.list_animals();
                self.push_log(LogKind::Header, "Animals in the zoo:");
                self.push_events(lines);
            }
            MenuChoice::ListStaff => {
                let lines = self.zoo.list_staff();
                self.push_log(LogKind::Header, "Staff in the zoo:");
                self.push_events(lines);
            }
            MenuChoice::RandomFeed => {
                let outcome = self.zoo.random_feed();
                self.report_interaction(outcome.is_performed(), outcome.lines());
            }
            MenuChoice::RandomHeal => {
                let outcome = self.zoo.random_heal();
                self.report_interaction(outcome.is_performed(), outcome.lines());
            }
            MenuChoice::SaveAndExit => self.save_and_exit(),
        }
    }

    fn ask(&mut self, step: PromptStep) {
        self.prompt = Some(PromptModal::new(step));
    }

    fn submit(&mut self, step: PromptStep, input: &str) {
        if let Err(err) = self.advance(step, input) {
            self.reject(err);
        }
    }

    fn advance(&mut self, step: PromptStep, input: &str) -> Result<(), InputError> {
        match step {
            PromptStep::AnimalName => {
                let name = command::parse_name(input)?;
                self.ask(PromptStep::AnimalAge { name });
            }
            PromptStep::AnimalAge { name } => {
                let age = command::parse_age(input)?;
                self.ask(PromptStep::AnimalSpecies { name, age });
            }
            PromptStep::AnimalSpecies { name, age } => {
                let species = SpeciesChoice::parse(input)?;
                if species.asks_flight() {
                    self.ask(PromptStep::AnimalFlight { name, age });
                } else {
                    self.add_animal(Animal::new(name, age, species.into_species(false)));
                }
            }
            PromptStep::AnimalFlight { name, age } => {
                let can_fly = command::parse_yes_no(input);
                self.add_animal(Animal::new(name, age, Species::Bird { can_fly }));
            }
            PromptStep::RemoveAnimal => {
                let removal = self.zoo.remove_animal(input.trim());
                let kind = if removal.is_removed() {
                    LogKind::Event
                } else {
                    LogKind::Warning
                };
                self.push_log(kind, removal.to_string());
            }
            PromptStep::StaffName => {
                let name = command::parse_name(input)?;
                self.ask(PromptStep::StaffRole { name });
            }
            PromptStep::StaffRole { name } => {
                let role = RoleChoice::parse(input)?;
                let notice = self.zoo.add_staff(role.into_staff(name));
                self.push_log(LogKind::Event, notice);
            }
            PromptStep::RemoveStaff => {
                let removal = self.zoo.remove_staff(input.trim());
                let kind = if removal.is_removed() {
                    LogKind::Event
                } else {
                    LogKind::Warning
                };
                self.push_log(kind, removal.to_string());
            }
        }
        Ok(())
    }

    fn add_animal(&mut self, animal: Animal) {
        let notice = self.zoo.add_animal(animal);
        self.push_log(LogKind::Event, notice);
    }

    fn report_interaction(&mut self, performed: bool, lines: Vec<String>) {
        if performed {
            self.push_events(lines);
        } else {
            for line in lines {
                self.push_log(LogKind::Warning, line);
            }
        }
    }

    fn reject(&mut self, err: InputError) {
        info!("rejected input: {err}");
        self.status = err.to_string();
        self.push_log(LogKind::Warning, err.to_string());
    }

    fn save_and_exit(&mut self) {
        match self.store.save(self.zoo) {
            Ok(summary) => {
                self.push_log(LogKind::Notice, summary.to_string());
                self.should_quit = true;
            }
            Err(err) => {
                error!("failed to save zoo: {err:#}");
                self.status = "Save failed, press 9 to retry or Ctrl-C to quit".to_string();
                self.push_log(LogKind::Error, format!("Failed to save the zoo: {err:#}"));
            }
        }
    }

    fn push_events(&mut self, lines: Vec<String>) {
        for line in lines {
            self.push_log(LogKind::Event, line);
        }
    }

    fn push_log(&mut self, kind: LogKind, text: impl Into<String>) {
        self.log.push(LogEntry {
            kind,
            text: text.into(),
        });
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(4),
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(20)])
            .split(layout[1]);

        self.render_title(frame, layout[0]);
        self.render_menu(frame, body[0]);
        self.render_log(frame, body[1]);
        self.render_status(frame, layout[2]);
        if let Some(prompt) = &self.prompt {
            self.render_prompt(frame, prompt);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                self.zoo.name().to_string(),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  ·  {} animals  ·  {} staff",
                    self.zoo.animals().len(),
                    self.zoo.staff().len()
                ),
                Style::default().fg(self.theme.muted),
            ),
        ]);
        let paragraph = Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).title("Zoo"))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_menu(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = MenuChoice::ALL
            .iter()
            .enumerate()
            .map(|(idx, choice)| {
                let label = format!("{}. {}", choice.number(), choice.label());
                if idx == self.menu_cursor && self.prompt.is_none() {
                    Line::from(Span::styled(
                        format!("▶ {label}"),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {label}"),
                        Style::default().fg(self.theme.primary_fg),
                    ))
                }
            })
            .collect();
        let menu =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Menu"));
        frame.render_widget(menu, area);
    }

    fn render_log(&self, frame: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let start = self.log.len().saturating_sub(visible);
        let lines: Vec<Line> = self.log[start..]
            .iter()
            .map(|entry| {
                Line::from(Span::styled(
                    entry.text.clone(),
                    self.log_style(entry.kind),
                ))
            })
            .collect();
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Messages"))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn log_style(&self, kind: LogKind) -> Style {
        match kind {
            LogKind::Header => Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
            LogKind::Event => Style::default().fg(self.theme.primary_fg),
            LogKind::Notice => Style::default().fg(self.theme.success),
            LogKind::Warning => Style::default().fg(self.theme.warning),
            LogKind::Error => Style::default()
                .fg(self.theme.danger)
                .add_modifier(Modifier::BOLD),
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let help = Line::from(vec![
            Span::styled("1-9", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" choose  "),
            Span::styled("↑/↓ Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" select  "),
            Span::styled("Ctrl-C", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" quit without saving"),
        ]);
        let paragraph = Paragraph::new(vec![Line::from(self.status.clone()), help])
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_prompt(&self, frame: &mut Frame, prompt: &PromptModal) {
        let frame_area = frame.size();
        let mut width = cmp::min(60_u16, frame_area.width.saturating_sub(4));
        width = cmp::max(width, 24_u16);
        let height = 6_u16.min(frame_area.height.saturating_sub(2)).max(5_u16);
        let area = centered_rect(width, height, frame_area);

        frame.render_widget(Clear, area);

        let input_line = Line::from(vec![
            Span::styled("> ", Style::default().fg(self.theme.accent)),
            Span::raw(prompt.input.clone()),
        ]);
        let helper = Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" confirm  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]);

        let paragraph = Paragraph::new(vec![
            Line::from(prompt.step.question()),
            input_line,
            Line::from(""),
            helper,
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(prompt.step.title()),
        )
        .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);

        let cursor_x =
            (area.x + 3 + prompt.cursor as u16).min(area.x + area.width.saturating_sub(2));
        let cursor_y = area.y + 2;
        frame.set_cursor(cursor_x, cursor_y);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use zoo_core::{LoadOutcome, Staff};

    fn press(app: &mut ZooApp<'_>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn answer(app: &mut ZooApp<'_>, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
        press(app, KeyCode::Enter);
    }

    fn log_lines(app: &ZooApp<'_>) -> Vec<String> {
        app.log.iter().map(|entry| entry.text.clone()).collect()
    }

    #[test]
    fn adds_bird_through_prompts() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = ZooStore::new(dir.path().join("zoo.json"));
        let mut zoo = Zoo::new("Test Zoo");
        {
            let mut app = ZooApp::new(&mut zoo, &store);
            press(&mut app, KeyCode::Char('1'));
            answer(&mut app, "Kesha");
            answer(&mut app, "2");
            answer(&mut app, "bird");
            assert!(matches!(
                app.prompt.as_ref().map(|prompt| &prompt.step),
                Some(PromptStep::AnimalFlight { .. })
            ));
            answer(&mut app, "no");
            assert!(app.prompt.is_none());
            assert_eq!(
                log_lines(&app),
                vec!["Bird(name: Kesha, age: 2) has arrived at the zoo."]
            );
        }
        assert_eq!(zoo.animals(), &[Animal::bird("Kesha", 2, false)]);
        Ok(())
    }

    #[test]
    fn mammal_skips_flight_question() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = ZooStore::new(dir.path().join("zoo.json"));
        let mut zoo = Zoo::new("Test Zoo");
        {
            let mut app = ZooApp::new(&mut zoo, &store);
            press(&mut app, KeyCode::Char('1'));
            answer(&mut app, "Rex");
            answer(&mut app, "5");
            answer(&mut app, "Mammal");
            assert!(app.prompt.is_none());
        }
        assert_eq!(zoo.animals(), &[Animal::mammal("Rex", 5)]);
        Ok(())
    }

    #[test]
    fn invalid_answers_do_not_mutate() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = ZooStore::new(dir.path().join("zoo.json"));
        let mut zoo = Zoo::new("Test Zoo");
        {
            let mut app = ZooApp::new(&mut zoo, &store);
            press(&mut app, KeyCode::Char('1'));
            answer(&mut app, "Rex");
            answer(&mut app, "five");
            assert!(app.prompt.is_none());

            press(&mut app, KeyCode::Char('1'));
            answer(&mut app, "Nemo");
            answer(&mut app, "1");
            answer(&mut app, "Fish");

            press(&mut app, KeyCode::Char('3'));
            answer(&mut app, "Carl");
            answer(&mut app, "Janitor");

            press(&mut app, KeyCode::Char('x'));

            assert_eq!(
                log_lines(&app),
                vec![
                    "Age must be a whole non-negative number, got 'five'",
                    "Unknown animal type: Fish",
                    "Unknown staff role: Janitor",
                    "Invalid choice, try again.",
                ]
            );
        }
        assert!(zoo.animals().is_empty());
        assert!(zoo.staff().is_empty());
        Ok(())
    }

    #[test]
    fn escape_cancels_prompt() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = ZooStore::new(dir.path().join("zoo.json"));
        let mut zoo = Zoo::new("Test Zoo");
        {
            let mut app = ZooApp::new(&mut zoo, &store);
            press(&mut app, KeyCode::Char('3'));
            answer(&mut app, "Anna");
            press(&mut app, KeyCode::Esc);
            assert!(app.prompt.is_none());
            assert!(app.log.is_empty());
        }
        assert!(zoo.staff().is_empty());
        Ok(())
    }

    #[test]
    fn remove_and_list_report_outcomes() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = ZooStore::new(dir.path().join("zoo.json"));
        let mut zoo = Zoo::new("Test Zoo");
        zoo.add_animal(Animal::reptile("Kaa", 40));
        zoo.add_staff(Staff::veterinarian("Boris"));
        {
            let mut app = ZooApp::new(&mut zoo, &store);
            press(&mut app, KeyCode::Char('2'));
            answer(&mut app, "Nemo");
            press(&mut app, KeyCode::Char('5'));
            press(&mut app, KeyCode::Char('4'));
            answer(&mut app, "Boris");
            press(&mut app, KeyCode::Char('6'));

            assert_eq!(
                log_lines(&app),
                vec![
                    "Animal Nemo was not found.",
                    "Animals in the zoo:",
                    "Reptile(name: Kaa, age: 40)",
                    "Staff member Boris was removed from the zoo.",
                    "Staff in the zoo:",
                ]
            );
        }
        assert!(zoo.staff().is_empty());
        Ok(())
    }

    #[test]
    fn random_feed_and_heal_from_menu() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = ZooStore::new(dir.path().join("zoo.json"));
        let mut zoo = Zoo::new("Test Zoo");
        zoo.add_animal(Animal::bird("Kesha", 2, true));
        zoo.add_staff(Staff::zoo_keeper("Anna"));

        let mut app = ZooApp::new(&mut zoo, &store);
        press(&mut app, KeyCode::Char('7'));
        press(&mut app, KeyCode::Char('8'));
        assert_eq!(
            log_lines(&app),
            vec![
                "Anna is feeding Kesha.",
                "Kesha is eating.",
                "There are no veterinarians to heal the animals.",
            ]
        );
        assert_eq!(app.log[2].kind, LogKind::Warning);
        Ok(())
    }

    #[test]
    fn menu_cursor_selects_with_enter() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = ZooStore::new(dir.path().join("zoo.json"));
        let mut zoo = Zoo::new("Test Zoo");

        let mut app = ZooApp::new(&mut zoo, &store);
        press(&mut app, KeyCode::Up);
        assert_eq!(MenuChoice::ALL[app.menu_cursor], MenuChoice::SaveAndExit);
        for _ in 0..4 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(MenuChoice::ALL[app.menu_cursor], MenuChoice::RemoveStaff);
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.prompt.as_ref().map(|prompt| prompt.step.clone()),
            Some(PromptStep::RemoveStaff)
        );
        Ok(())
    }

    #[test]
    fn save_and_exit_persists_zoo() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = ZooStore::new(dir.path().join("zoo.json"));
        let mut zoo = Zoo::new("Test Zoo");
        zoo.add_animal(Animal::bird("Kesha", 2, true));
        {
            let mut app = ZooApp::new(&mut zoo, &store);
            press(&mut app, KeyCode::Char('9'));
            assert!(app.should_quit);
        }
        assert_eq!(store.load()?, LoadOutcome::Loaded(zoo));
        Ok(())
    }

    #[test]
    fn ctrl_c_quits_without_saving() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let store = ZooStore::new(dir.path().join("zoo.json"));
        let mut zoo = Zoo::new("Test Zoo");

        let mut app = ZooApp::new(&mut zoo, &store);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert_eq!(store.load()?, LoadOutcome::NoPriorState);
        Ok(())
    }

    #[test]
    fn prompt_editing_handles_cursor_moves() {
        let mut prompt = PromptModal::new(PromptStep::AnimalName);
        for ch in "Kesa".chars() {
            prompt.insert(ch);
        }
        prompt.move_cursor(-1);
        prompt.insert('h');
        assert_eq!(prompt.input, "Kesha");
        prompt.move_home();
        prompt.delete();
        prompt.move_end();
        prompt.backspace();
        assert_eq!(prompt.input, "esh");
        assert_eq!(prompt.cursor, 3);
    }
}
