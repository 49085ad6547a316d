/// Side effects raised by the engine. The engine never talks to audio or display
/// directly; it returns these and the caller hands them to its listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The active piece moved or rotated.
    Moved,
    /// One lock removed this many rows.
    LinesCleared(u32),
    ScoreChanged(u32),
    /// A freshly spawned piece collided. Raised once per session.
    GameOver { final_score: u32 },
}

/// Collaborator notified of engine events. Every hook is fire-and-forget: a listener
/// that fails must swallow the failure itself.
pub trait GameListener {
    fn on_move(&mut self) {}

    fn on_line_clear(&mut self, _lines: u32) {}

    fn set_score(&mut self, _score: u32) {}

    fn on_game_over(&mut self, _final_score: u32) {}
}

pub fn dispatch<L: GameListener + ?Sized>(events: &[GameEvent], listener: &mut L) {
    for event in events {
        match *event {
            GameEvent::Moved => listener.on_move(),
            GameEvent::LinesCleared(lines) => listener.on_line_clear(lines),
            GameEvent::ScoreChanged(score) => listener.set_score(score),
            GameEvent::GameOver { final_score } => listener.on_game_over(final_score),
        }
    }
}
