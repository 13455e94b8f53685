mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use sketchy::{
    app_dirs::AppDirs,
    countdown::Countdown,
    game::{Configuration, Game, DEFAULT_ROUND_SECONDS},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, GameEventSource, Runner, Ticker},
    words::DEFAULT_WORDS,
};
use std::{
    error::Error,
    fs,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;
const MAX_SECONDS_DIGITS: usize = 5;

/// party word-guessing game: draw a word, beat the clock, keep score
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A party word-guessing game for the terminal. Enter a comma separated list of words and a round length, then draw random words one at a time and mark the ones your friends guess before the countdown runs out."
)]
pub struct Cli {
    /// comma separated words to pre-fill the setup screen with
    #[clap(short = 'w', long)]
    words: Option<String>,

    /// read the word list from a file (one word per line or comma separated)
    #[clap(short = 'f', long, conflicts_with = "words")]
    words_file: Option<PathBuf>,

    /// number of seconds to guess each word
    #[clap(short = 's', long, default_value_t = DEFAULT_ROUND_SECONDS)]
    seconds: u32,

    /// where to write the log (defaults to the user state dir)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Configuration the setup screen starts with
    fn initial_configuration(&self) -> io::Result<Configuration> {
        let words = match (&self.words, &self.words_file) {
            (_, Some(path)) => words_from_file(&fs::read_to_string(path)?),
            (Some(words), None) => words.clone(),
            (None, None) => DEFAULT_WORDS.to_string(),
        };
        Ok(Configuration::new(words, self.seconds))
    }
}

/// Word files may list one entry per line; fold them into the comma form.
fn words_from_file(contents: &str) -> String {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Words,
    Seconds,
}

/// Editable text behind the setup screen
#[derive(Debug, Clone)]
pub struct SetupForm {
    pub words_input: String,
    pub seconds_input: String,
    pub focus: Field,
    pub notice: Option<String>,
}

impl SetupForm {
    pub fn from_config(config: &Configuration) -> Self {
        Self {
            words_input: config.raw_words_text.clone(),
            seconds_input: config.round_seconds.to_string(),
            focus: Field::Words,
            notice: None,
        }
    }

    pub fn to_config(&self) -> Configuration {
        // empty or zero clamps to one second
        let secs = self.seconds_input.parse().unwrap_or(0);
        Configuration::new(self.words_input.clone(), secs)
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Words => Field::Seconds,
            Field::Seconds => Field::Words,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            Field::Words => self.words_input.push(c),
            Field::Seconds => {
                if c.is_ascii_digit() && self.seconds_input.len() < MAX_SECONDS_DIGITS {
                    self.seconds_input.push(c);
                }
            }
        }
        self.notice = None;
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Field::Words => self.words_input.pop(),
            Field::Seconds => self.seconds_input.pop(),
        };
        self.notice = None;
    }
}

#[derive(Debug)]
pub struct App {
    pub game: Game,
    pub form: SetupForm,
    pub countdown: Countdown,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Configuration) -> Self {
        Self {
            game: Game::new(),
            form: SetupForm::from_config(&config),
            countdown: Countdown::default(),
            should_quit: false,
        }
    }

    /// Start a game from the setup form; a rejected list leaves a notice.
    pub fn start_game(&mut self) {
        match self.game.start_game(self.form.to_config()) {
            Ok(()) => self.form.notice = None,
            Err(err) => self.form.notice = Some(err.to_string()),
        }
        self.sync_countdown();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let mut screen = ui::screen::current_screen(self.game.phase());
        screen.on_key(key, self);
        self.sync_countdown();
    }

    /// Feed wall time into the countdown, ticking the game once per due second.
    pub fn on_elapsed(&mut self, dt: Duration) {
        let due = self.countdown.advance(dt);
        for _ in 0..due {
            if !self.game.tick() {
                break;
            }
        }
        self.sync_countdown();
    }

    fn sync_countdown(&mut self) {
        self.countdown
            .sync(self.game.is_counting_down(), self.game.round_serial());
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config = cli.initial_configuration()?;

    if let Some(log_path) = AppDirs::log_path(cli.log_file.clone()) {
        // logging is best effort; the game runs without it
        if let Err(err) = logging::init_file_logging(&log_path) {
            eprintln!("sketchy: logging disabled ({}): {err}", log_path.display());
        }
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let res = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(score = app.game.score(), "exiting");
    res
}

fn start_tui<B: Backend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    while !app.should_quit {
        match runner.step() {
            GameEvent::Tick(elapsed) => app.on_elapsed(elapsed),
            GameEvent::Resize => {}
            GameEvent::Key(key) => app.handle_key(key),
        }
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use sketchy::{game::Phase, runtime::TestEventSource};
    use std::sync::mpsc;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(words: &str, secs: u32) -> App {
        App::new(Configuration::new(words, secs))
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["sketchy"]);

        assert_eq!(cli.words, None);
        assert_eq!(cli.words_file, None);
        assert_eq!(cli.seconds, 60);
        assert_eq!(cli.log_file, None);
        assert_eq!(
            cli.initial_configuration().unwrap(),
            Configuration::new(DEFAULT_WORDS, 60)
        );
    }

    #[test]
    fn test_cli_words_and_seconds() {
        let cli = Cli::parse_from(["sketchy", "-w", "a, b", "-s", "15"]);
        let config = cli.initial_configuration().unwrap();

        assert_eq!(config.raw_words_text, "a, b");
        assert_eq!(config.round_seconds, 15);
    }

    #[test]
    fn test_cli_zero_seconds_clamps() {
        let cli = Cli::parse_from(["sketchy", "--seconds", "0"]);
        assert_eq!(cli.initial_configuration().unwrap().round_seconds, 1);
    }

    #[test]
    fn test_cli_rejects_non_numeric_seconds() {
        assert!(Cli::try_parse_from(["sketchy", "-s", "soon"]).is_err());
    }

    #[test]
    fn test_cli_words_conflict_with_file() {
        assert!(Cli::try_parse_from(["sketchy", "-w", "a", "-f", "words.txt"]).is_err());
    }

    #[test]
    fn test_cli_words_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "Confetti\n\n  Midnight \nKac, Polsat\n").unwrap();

        let cli = Cli::parse_from(["sketchy", "-f", path.to_str().unwrap()]);
        let config = cli.initial_configuration().unwrap();

        assert_eq!(
            config.words(),
            vec!["Confetti", "Midnight", "Kac", "Polsat"]
        );
    }

    #[test]
    fn test_cli_missing_words_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let cli = Cli::parse_from(["sketchy", "-f", path.to_str().unwrap()]);

        assert!(cli.initial_configuration().is_err());
    }

    #[test]
    fn test_form_seconds_accept_digits_only() {
        let mut form = SetupForm::from_config(&Configuration::new("a", 60));
        form.toggle_focus();
        assert_eq!(form.focus, Field::Seconds);

        form.backspace();
        form.backspace();
        form.push_char('x');
        form.push_char('9');
        form.push_char('-');
        assert_eq!(form.seconds_input, "9");

        for _ in 0..10 {
            form.push_char('1');
        }
        assert_eq!(form.seconds_input.len(), MAX_SECONDS_DIGITS);
    }

    #[test]
    fn test_form_empty_seconds_clamps() {
        let mut form = SetupForm::from_config(&Configuration::new("a", 7));
        form.toggle_focus();
        form.backspace();
        assert_eq!(form.to_config().round_seconds, 1);
    }

    #[test]
    fn test_form_edit_clears_notice() {
        let mut form = SetupForm::from_config(&Configuration::new("", 7));
        form.notice = Some("warning".to_string());
        form.push_char('a');
        assert_eq!(form.notice, None);
        assert_eq!(form.words_input, "a");
    }

    #[test]
    fn test_empty_list_shows_notice_and_stays_in_setup() {
        let mut app = app_with(" , ,", 10);
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.game.phase(), Phase::Setup);
        assert_eq!(app.form.notice.as_deref(), Some("Enter at least one word!"));
        assert!(!app.countdown.is_armed());
    }

    #[test]
    fn test_start_arms_countdown() {
        let mut app = app_with("A, B, C", 10);
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.game.phase(), Phase::Playing);
        assert_eq!(app.game.words_left(), 2);
        assert!(app.countdown.is_armed());
    }

    #[test]
    fn test_elapsed_time_ticks_game() {
        let mut app = app_with("A, B", 3);
        app.start_game();

        app.on_elapsed(Duration::from_millis(2500));
        assert_eq!(app.game.seconds_remaining(), Some(1));

        // a huge stall cannot push the clock below zero
        app.on_elapsed(Duration::from_secs(60));
        assert_eq!(app.game.seconds_remaining(), Some(0));
        assert!(app.game.round_has_expired());
        assert!(!app.countdown.is_armed());
    }

    #[test]
    fn test_pause_cancels_countdown() {
        let mut app = app_with("A, B", 5);
        app.start_game();
        app.on_elapsed(Duration::from_millis(900));

        app.handle_key(key(KeyCode::Char(' ')));
        assert!(!app.game.is_counting_down());
        assert!(!app.countdown.is_armed());

        app.on_elapsed(Duration::from_secs(10));
        assert_eq!(app.game.seconds_remaining(), Some(5));

        // resuming starts a fresh second
        app.handle_key(key(KeyCode::Char('p')));
        app.on_elapsed(Duration::from_millis(900));
        assert_eq!(app.game.seconds_remaining(), Some(5));
        app.on_elapsed(Duration::from_millis(100));
        assert_eq!(app.game.seconds_remaining(), Some(4));
    }

    #[test]
    fn test_full_playthrough_by_keys() {
        let mut app = app_with("A, B, C", 10);
        app.handle_key(key(KeyCode::Enter));

        // guess one, let one expire, guess the last
        app.handle_key(key(KeyCode::Char('g')));
        app.on_elapsed(Duration::from_secs(10));
        assert!(app.game.round_has_expired());
        app.handle_key(key(KeyCode::Char('g')));
        assert_eq!(app.game.score(), 1);
        app.handle_key(key(KeyCode::Char('n')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.game.phase(), Phase::Finished);
        assert_eq!(app.game.score(), 2);
        assert!(!app.countdown.is_armed());

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.game.phase(), Phase::Setup);
        assert_eq!(app.form.words_input, "A, B, C");
    }

    #[test]
    fn test_quit_to_setup_keeps_form() {
        let mut app = app_with("A, B, C", 10);
        app.start_game();
        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.game.phase(), Phase::Setup);
        assert!(!app.countdown.is_armed());
        assert!(!app.should_quit);
        assert_eq!(app.form.words_input, "A, B, C");
    }

    #[test]
    fn test_ctrl_c_quits_from_any_phase() {
        let mut app = app_with("A", 10);
        app.start_game();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert_eq!(app.game.score(), 0);
    }

    #[test]
    fn test_start_tui_exits_on_escape() {
        use ratatui::{backend::TestBackend, Terminal};

        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Key(key(KeyCode::Enter))).unwrap();
        tx.send(GameEvent::Key(key(KeyCode::Char('g')))).unwrap();
        tx.send(GameEvent::Resize).unwrap();
        tx.send(GameEvent::Key(key(KeyCode::Esc))).unwrap();
        tx.send(GameEvent::Key(key(KeyCode::Esc))).unwrap();

        let mut runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(5)),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = app_with("A, B, C", 30);

        start_tui(&mut terminal, &mut app, &mut runner).unwrap();

        assert!(app.should_quit);
        assert_eq!(app.game.phase(), Phase::Setup);
        assert_eq!(app.game.score(), 1);
    }

    #[test]
    fn test_start_tui_runs_round_clock_from_ticks() {
        use ratatui::{backend::TestBackend, Terminal};

        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Key(key(KeyCode::Enter))).unwrap();
        tx.send(GameEvent::Tick(Duration::from_millis(600))).unwrap();
        tx.send(GameEvent::Tick(Duration::from_millis(600))).unwrap();
        // the round has expired: enter moves on without scoring
        tx.send(GameEvent::Key(key(KeyCode::Enter))).unwrap();
        tx.send(GameEvent::Key(key(KeyCode::Esc))).unwrap();

        let mut runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_secs(60)),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = app_with("A", 1);

        start_tui(&mut terminal, &mut app, &mut runner).unwrap();

        assert!(app.should_quit);
        assert_eq!(app.game.phase(), Phase::Finished);
        assert_eq!(app.game.score(), 0);
    }

    #[test]
    fn test_ui_function_renders_setup() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut app = app_with("A, B, C", 10);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui(&mut app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Sketchy"));
    }

    #[test]
    fn test_tick_rate_constant() {
        assert_eq!(TICK_RATE_MS, 100);
        assert!(Duration::from_millis(TICK_RATE_MS) < Duration::from_secs(1));
    }
}
