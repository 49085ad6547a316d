#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::Resource;
use log::{debug, info, trace};

use crate::components::{Board, Piece};
use crate::events::GameEvent;
use crate::game::{DROP_INTERVAL_MS, line_clear_points};
use crate::generator::PieceGenerator;
use crate::input::Action;

/// Everything the renderer needs for one frame. A copy, so drawing can never touch the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub board: Board,
    pub active: Piece,
    pub next: Piece,
    pub score: u32,
    pub lines_cleared: u32,
    pub game_over: bool,
}

/// Result of one scheduler tick: the redraw request plus the events raised during it.
#[derive(Debug, Clone)]
pub struct Tick {
    pub frame: Frame,
    pub events: Vec<GameEvent>,
}

/// The whole session: board, falling piece, preview piece, score and game-over flag.
#[derive(Resource, Debug, Clone)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) current: Piece,
    pub(crate) next: Piece,
    pub(crate) score: u32,
    pub(crate) lines_cleared: u32,
    pub(crate) game_over: bool,
    pub(crate) last_drop_ms: u64,
    generator: PieceGenerator,
}

impl GameState {
    #[must_use]
    pub fn new(mut generator: PieceGenerator) -> Self {
        let current = generator.next_piece();
        let next = generator.next_piece();
        Self {
            board: Board::new(),
            current,
            next,
            score: 0,
            lines_cleared: 0,
            game_over: false,
            last_drop_ms: 0,
            generator,
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(PieceGenerator::with_seed(seed))
    }

    /// Starts a new session: empty board, two fresh pieces, zero score.
    /// Safe to call at any point, including mid-game. The drop clock keeps running.
    /// Returns the score reset so listeners can redraw it.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        self.board.clear();
        self.current = self.generator.next_piece();
        self.next = self.generator.next_piece();
        self.score = 0;
        self.lines_cleared = 0;
        self.game_over = false;
        info!("New game started with {:?}", self.current.kind);
        vec![GameEvent::ScoreChanged(self.score)]
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current(&self) -> &Piece {
        &self.current
    }

    #[must_use]
    pub fn next(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame {
            board: self.board,
            active: self.current.clone(),
            next: self.next.clone(),
            score: self.score,
            lines_cleared: self.lines_cleared,
            game_over: self.game_over,
        }
    }

    /// Advances gravity when more than one drop interval has passed since the last step,
    /// then returns the frame to draw. `now_ms` comes from a monotonic clock.
    pub fn tick(&mut self, now_ms: u64) -> Tick {
        let mut events = Vec::new();

        if now_ms.saturating_sub(self.last_drop_ms) > DROP_INTERVAL_MS {
            trace!("Gravity step at {now_ms} ms");
            if !self.game_over && !self.shift(0, 1, &mut events) {
                self.settle(&mut events);
            }
            self.last_drop_ms = now_ms;
        }

        Tick {
            frame: self.frame(),
            events,
        }
    }

    /// Applies one player action. Ignored once the game is over.
    pub fn apply(&mut self, action: Action) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.game_over {
            return events;
        }

        match action {
            Action::Left => {
                self.shift(-1, 0, &mut events);
            }
            Action::Right => {
                self.shift(1, 0, &mut events);
            }
            Action::Rotate => {
                if let Some(rotated) = self.current.try_rotate(&self.board) {
                    self.current = rotated;
                    events.push(GameEvent::Moved);
                }
            }
            Action::SoftDrop => {
                if !self.shift(0, 1, &mut events) {
                    self.settle(&mut events);
                }
            }
            Action::HardDrop => {
                while self.shift(0, 1, &mut events) {}
                self.settle(&mut events);
            }
        }

        events
    }

    fn shift(&mut self, dx: i32, dy: i32, events: &mut Vec<GameEvent>) -> bool {
        match self.current.try_move(&self.board, dx, dy) {
            Some(moved) => {
                self.current = moved;
                events.push(GameEvent::Moved);
                true
            }
            None => false,
        }
    }

    // Lock the falling piece, clear rows, promote the preview piece
    fn settle(&mut self, events: &mut Vec<GameEvent>) {
        let incoming = std::mem::replace(&mut self.next, self.generator.next_piece());
        let locked = std::mem::replace(&mut self.current, incoming);
        debug!(
            "Locking {:?} at ({}, {})",
            locked.kind, locked.x, locked.y
        );
        self.board.lock_piece(locked);

        let lines = self.board.clear_lines();
        if lines > 0 {
            self.score += line_clear_points(lines);
            self.lines_cleared += lines;
            info!("Cleared {lines} lines, score is now {}", self.score);
            events.push(GameEvent::LinesCleared(lines));
            events.push(GameEvent::ScoreChanged(self.score));
        }

        if self.current.collides(&self.board) {
            self.game_over = true;
            info!("Game over with final score {}", self.score);
            events.push(GameEvent::GameOver {
                final_score: self.score,
            });
        } else {
            debug!("Spawned {:?}", self.current.kind);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(PieceGenerator::new())
    }
}
