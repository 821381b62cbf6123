use std::io;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use serde::{Deserialize, Serialize};

use crate::ai::{Agent, MinimaxAgent, SearchConfig};
use crate::error::{SearchError, SessionError};
use crate::game::{BoardState, MoveKind, Player, Position};
use crate::session::{MoveFeedback, Session, SessionConfig};

use super::board_widget::BoardView;

/// Terminal front end settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Side played from the keyboard; the computer takes the other one.
    pub human: Player,
    /// Highlight legal destinations of the selected piece.
    pub hints: bool,
    /// Shortest time a computer move stays "thinking" before it is shown.
    pub ai_min_pause_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            human: Player::White,
            hints: true,
            ai_min_pause_ms: 800,
        }
    }
}

type SearchReply = (MinimaxAgent, Result<BoardState, SearchError>);

pub struct App {
    session: Session,
    search: SearchConfig,
    ui: UiConfig,
    /// `None` while the agent is out on the worker thread.
    agent: Option<MinimaxAgent>,
    thinking: Option<Receiver<SearchReply>>,
    cursor: Position,
    selected: Option<Position>,
    options: Vec<BoardState>,
    movable: Vec<Position>,
    hints: bool,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(search: SearchConfig, session: SessionConfig, ui: UiConfig) -> Self {
        let agent = MinimaxAgent::from_config(&search, ui.human.other());
        let cursor = match ui.human {
            Player::Black => Position::new(2, 1),
            Player::White => Position::new(5, 0),
        };
        let hints = ui.hints;
        let mut app = App {
            session: Session::new(session),
            search,
            ui,
            agent: Some(agent),
            thinking: None,
            cursor,
            selected: None,
            options: Vec::new(),
            movable: Vec::new(),
            hints,
            should_quit: false,
            message: None,
        };
        app.after_move();
        app
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.poll_computer();
            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => self.move_cursor(-self.screen_down(), 0),
            KeyCode::Down => self.move_cursor(self.screen_down(), 0),
            KeyCode::Left => self.move_cursor(0, -self.screen_right()),
            KeyCode::Right => self.move_cursor(0, self.screen_right()),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('h') => {
                self.hints = !self.hints;
                self.message = Some(format!(
                    "Hints {}.",
                    if self.hints { "on" } else { "off" }
                ));
            }
            _ => {}
        }
    }

    /// Row delta that moves the cursor one line down the screen. The
    /// human's pieces are always drawn at the bottom.
    fn screen_down(&self) -> isize {
        match self.ui.human {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    fn screen_right(&self) -> isize {
        self.screen_down()
    }

    fn move_cursor(&mut self, dr: isize, dc: isize) {
        if let Some(pos) = self.cursor.offset(dr, dc) {
            self.cursor = pos;
        }
    }

    fn is_human_turn(&self) -> bool {
        self.thinking.is_none()
            && !self.session.is_game_over()
            && self.session.turn() == self.ui.human
    }

    fn activate(&mut self) {
        if self.session.is_game_over() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if !self.is_human_turn() {
            self.message = Some("Wait for the computer to move.".to_string());
            return;
        }

        let target = self.cursor;
        if let Some(next) = self
            .options
            .iter()
            .find(|s| s.last_move().map(|(_, to)| to) == Some(target))
            .copied()
        {
            self.play(next);
            return;
        }

        let own_piece = self
            .session
            .state()
            .piece_at(target)
            .is_some_and(|p| p.owner() == self.ui.human);
        if own_piece && self.session.state().multi_jump_origin().is_none() {
            self.select(target);
        } else if self.selected.is_some() {
            self.message = Some("You can't move there.".to_string());
        }
    }

    fn select(&mut self, pos: Position) {
        self.movable.clear();
        match self.session.legal_moves_from(pos) {
            Ok(options) if options.is_empty() => {
                let feedback = self.session.feedback();
                if feedback == MoveFeedback::ForcedJump {
                    self.movable = self.jumping_pieces();
                }
                self.selected = None;
                self.options.clear();
                self.message = Some(feedback.to_string());
            }
            Ok(options) => {
                self.selected = Some(pos);
                self.options = options;
                self.message = None;
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// Squares of the human's pieces that have a capture available.
    fn jumping_pieces(&self) -> Vec<Position> {
        let mut origins: Vec<Position> = self
            .session
            .state()
            .successors_of(MoveKind::Jump)
            .iter()
            .filter_map(BoardState::last_move)
            .map(|(from, _)| from)
            .collect();
        origins.dedup();
        origins
    }

    fn play(&mut self, next: BoardState) {
        match self.session.advance(next) {
            Ok(_) => self.after_move(),
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// Clear the selection and hand the turn to whoever moves next.
    fn after_move(&mut self) {
        self.selected = None;
        self.options.clear();
        self.movable.clear();

        if let Some(result) = self.session.result() {
            self.message = Some(result.to_string());
            return;
        }
        if self.session.turn() == self.ui.human {
            if let Some(origin) = self.session.state().multi_jump_origin() {
                self.cursor = origin;
                self.select(origin);
                self.message = Some("Keep jumping!".to_string());
            }
        } else {
            self.start_computer_turn();
        }
    }

    fn start_computer_turn(&mut self) {
        let Some(mut agent) = self.agent.take() else {
            return;
        };
        let state = *self.session.state();
        let pause = Duration::from_millis(self.ui.ai_min_pause_ms);
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let started = Instant::now();
            let result = agent.select_move(&state);
            if let Some(rest) = pause.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
            let _ = tx.send((agent, result));
        });
        self.thinking = Some(rx);
    }

    /// Pick up the computer's move once the worker has finished.
    pub fn poll_computer(&mut self) {
        let Some(rx) = &self.thinking else {
            return;
        };
        match rx.try_recv() {
            Ok((agent, result)) => {
                self.thinking = None;
                self.agent = Some(agent);
                match result {
                    Ok(next) => self.play(next),
                    Err(err) => self.message = Some(err.to_string()),
                }
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                tracing::error!("search worker exited without a move");
                self.thinking = None;
                self.agent = Some(self.fresh_agent());
                self.message = Some("The computer failed to move.".to_string());
            }
        }
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking.is_some()
    }

    fn fresh_agent(&self) -> MinimaxAgent {
        MinimaxAgent::from_config(&self.search, self.ui.human.other())
    }

    fn undo(&mut self) {
        if self.thinking.is_some() {
            self.message = Some("Wait for the computer to move.".to_string());
            return;
        }
        match self.session.undo(self.ui.human) {
            Ok(_) => {
                self.message = Some("Move undone.".to_string());
                self.after_move();
            }
            Err(SessionError::NothingToUndo) => {
                self.message = Some("Nothing to undo.".to_string());
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    fn restart(&mut self) {
        // A pending search is abandoned along with its agent.
        self.thinking = None;
        let mut agent = self.agent.take().unwrap_or_else(|| self.fresh_agent());
        agent.new_game(self.ui.human.other());
        self.agent = Some(agent);
        self.session = Session::new(self.session.config().clone());
        tracing::info!("new game");
        self.after_move();
        if self.message.is_none() {
            self.message = Some("New game started!".to_string());
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    fn board_view(&self) -> BoardView {
        let destinations = if self.hints {
            self.options
                .iter()
                .filter_map(|s| s.last_move().map(|(_, to)| to))
                .collect()
        } else {
            Vec::new()
        };
        BoardView {
            cursor: self.is_human_turn().then_some(self.cursor),
            selected: self.selected,
            destinations,
            movable: self.movable.clone(),
            last_move: self.session.state().last_move(),
            flipped: self.ui.human == Player::Black,
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let status = if let Some(result) = self.session.result() {
            format!("Game over: {result}")
        } else if self.thinking.is_some() {
            "Computer is thinking...".to_string()
        } else {
            format!("Your move ({})", self.ui.human)
        };
        super::game_view::render(
            frame,
            self.session.state(),
            &self.board_view(),
            &status,
            self.message.as_deref(),
            self.search.depth,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(human: Player, first: Player) -> App {
        App::new(
            SearchConfig {
                depth: 1,
                seed: Some(3),
            },
            SessionConfig {
                first_player: first,
                ..Default::default()
            },
            UiConfig {
                human,
                hints: true,
                ai_min_pause_ms: 0,
            },
        )
    }

    fn wait_for_computer(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while app.is_thinking() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
            app.poll_computer();
        }
        assert!(!app.is_thinking());
    }

    #[test]
    fn test_quit() {
        let mut app = app(Player::Black, Player::Black);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut app = app(Player::White, Player::White);
        assert_eq!(app.cursor(), Position::new(5, 0));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.cursor(), Position::new(5, 0));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.cursor(), Position::new(4, 0));
    }

    #[test]
    fn test_black_board_is_flipped() {
        let mut app = app(Player::Black, Player::Black);
        assert_eq!(app.cursor(), Position::new(2, 1));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.cursor(), Position::new(3, 1));
    }

    #[test]
    fn test_select_and_move_then_computer_replies() {
        let mut app = app(Player::Black, Player::Black);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.selected(), Some(Position::new(2, 1)));

        // (2, 1) -> (3, 2) on the rotated board: up, then left.
        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.cursor(), Position::new(3, 2));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.session().plies(), 1);
        assert!(app.is_thinking());
        wait_for_computer(&mut app);
        assert_eq!(app.session().plies(), 2);
        assert_eq!(app.session().turn(), Player::Black);
    }

    #[test]
    fn test_blocked_piece_feedback() {
        let mut app = app(Player::Black, Player::Black);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.cursor(), Position::new(0, 1));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.selected(), None);
        assert_eq!(app.message(), Some("This piece has no diagonal moves."));
    }

    #[test]
    fn test_computer_moves_first() {
        let mut app = app(Player::White, Player::Black);
        assert!(app.is_thinking());
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.message(), Some("Wait for the computer to move."));
        wait_for_computer(&mut app);
        assert_eq!(app.session().turn(), Player::White);
    }

    #[test]
    fn test_undo_and_restart() {
        let mut app = app(Player::White, Player::White);
        app.handle_key(key(KeyCode::Char('u')));
        assert_eq!(app.message(), Some("Nothing to undo."));

        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.cursor(), Position::new(4, 1));
        app.handle_key(key(KeyCode::Enter));
        wait_for_computer(&mut app);
        assert_eq!(app.session().plies(), 2);

        app.handle_key(key(KeyCode::Char('u')));
        assert_eq!(app.session().plies(), 0);
        assert_eq!(app.session().turn(), Player::White);

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(*app.session().state(), BoardState::with_first_player(Player::White));
    }

    #[test]
    fn test_hints_toggle() {
        let mut app = app(Player::White, Player::White);
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.board_view().destinations.is_empty());
        app.handle_key(key(KeyCode::Char('h')));
        assert!(app.board_view().destinations.is_empty());
        assert_eq!(app.message(), Some("Hints off."));
    }

    #[test]
    fn test_render_draws_board() {
        let app = app(Player::White, Player::White);
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Checkers"));
        assert!(text.contains("Your move (White)"));
    }
}
