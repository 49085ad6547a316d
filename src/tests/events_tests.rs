#[cfg(test)]
mod tests {
    use crate::events::{GameEvent, GameListener, dispatch};

    #[derive(Default)]
    struct RecordingListener {
        moves: u32,
        cleared: Vec<u32>,
        scores: Vec<u32>,
        game_overs: Vec<u32>,
    }

    impl GameListener for RecordingListener {
        fn on_move(&mut self) {
            self.moves += 1;
        }

        fn on_line_clear(&mut self, lines: u32) {
            self.cleared.push(lines);
        }

        fn set_score(&mut self, score: u32) {
            self.scores.push(score);
        }

        fn on_game_over(&mut self, final_score: u32) {
            self.game_overs.push(final_score);
        }
    }

    // Only cares about the final score
    struct GameOverOnly(Option<u32>);

    impl GameListener for GameOverOnly {
        fn on_game_over(&mut self, final_score: u32) {
            self.0 = Some(final_score);
        }
    }

    #[test]
    fn test_dispatch_routes_each_event() {
        let events = [
            GameEvent::Moved,
            GameEvent::Moved,
            GameEvent::LinesCleared(2),
            GameEvent::ScoreChanged(400),
            GameEvent::GameOver { final_score: 400 },
        ];
        let mut listener = RecordingListener::default();
        dispatch(&events, &mut listener);

        assert_eq!(listener.moves, 2);
        assert_eq!(listener.cleared, vec![2]);
        assert_eq!(listener.scores, vec![400]);
        assert_eq!(listener.game_overs, vec![400]);
    }

    #[test]
    fn test_default_hooks_ignore_events() {
        let events = [
            GameEvent::Moved,
            GameEvent::ScoreChanged(100),
            GameEvent::GameOver { final_score: 100 },
        ];
        let mut listener = GameOverOnly(None);
        dispatch(&events, &mut listener);
        assert_eq!(listener.0, Some(100));
    }

    #[test]
    fn test_dispatch_through_trait_object() {
        let mut recorder = RecordingListener::default();
        {
            let listener: &mut dyn GameListener = &mut recorder;
            dispatch(&[GameEvent::LinesCleared(1)], listener);
        }
        assert_eq!(recorder.cleared, vec![1]);
    }
}
