#[cfg(test)]
mod tests {
    use crate::components::{Piece, TetrominoType};
    use crate::events::GameEvent;
    use crate::input::Action;
    use crate::state::GameState;
    use crate::tests::test_utils::{fill_row_except, state_about_to_top_out, vertical_bar};

    fn moved_count(events: &[GameEvent]) -> usize {
        events.iter().filter(|e| **e == GameEvent::Moved).count()
    }

    #[test]
    fn test_new_state() {
        let state = GameState::with_seed(1);
        assert_eq!(state.score(), 0);
        assert!(!state.is_game_over());
        assert_eq!(state.board().filled_count(), 0);
        assert_eq!(state.current().y, 0);
        assert_eq!(state.next().y, 0);
    }

    #[test]
    fn test_hard_drop_o_piece_on_empty_board() {
        let mut state = GameState::with_seed(1);
        state.current = Piece::spawn(TetrominoType::O);

        let events = state.apply(Action::HardDrop);

        let board = state.board();
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(board.get(x, y), Some(TetrominoType::O));
        }
        assert_eq!(board.filled_count(), 4);
        assert_eq!(state.score(), 0);
        assert_eq!(moved_count(&events), 18);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::LinesCleared(_))));
        // A fresh piece is falling
        assert_eq!(state.current().y, 0);
    }

    #[test]
    fn test_hard_drop_lands_at_lowest_fitting_row() {
        let mut state = GameState::with_seed(9);
        state.board.set(4, 12, Some(TetrominoType::Z));
        state.current = Piece::spawn(TetrominoType::T);
        let cells = state.current.shape.filled_count();

        state.apply(Action::HardDrop);

        // T is 010/111 at x = 4; the stub at (4, 12) stops the bottom row at y = 11
        assert_eq!(state.board().get(4, 11), Some(TetrominoType::T));
        assert_eq!(state.board().get(5, 10), Some(TetrominoType::T));
        assert_eq!(state.board().filled_count(), 1 + cells);
    }

    #[test]
    fn test_preview_piece_becomes_current() {
        let mut state = GameState::with_seed(5);
        let upcoming = state.next().kind;
        state.apply(Action::HardDrop);
        assert_eq!(state.current().kind, upcoming);
    }

    #[test]
    fn test_single_line_scores_100() {
        let mut state = GameState::with_seed(3);
        fill_row_except(&mut state.board, 19, &[4, 5]);
        state.current = Piece::spawn(TetrominoType::O);

        let events = state.apply(Action::HardDrop);

        assert_eq!(state.score(), 100);
        assert!(events.contains(&GameEvent::LinesCleared(1)));
        assert!(events.contains(&GameEvent::ScoreChanged(100)));
        // Upper half of the O dropped into the bottom row
        assert_eq!(state.board().filled_count(), 2);
        assert_eq!(state.board().get(4, 19), Some(TetrominoType::O));
    }

    #[test]
    fn test_double_line_scores_400() {
        let mut state = GameState::with_seed(3);
        fill_row_except(&mut state.board, 18, &[4, 5]);
        fill_row_except(&mut state.board, 19, &[4, 5]);
        state.current = Piece::spawn(TetrominoType::O);

        state.apply(Action::HardDrop);

        assert_eq!(state.score(), 400);
        assert_eq!(state.lines_cleared(), 2);
        assert_eq!(state.board().filled_count(), 0);
    }

    #[test]
    fn test_triple_and_quad_scores() {
        let mut state = GameState::with_seed(3);
        for y in 17..20 {
            fill_row_except(&mut state.board, y, &[0]);
        }
        state.current = vertical_bar(3, 0, 0);
        state.apply(Action::HardDrop);
        assert_eq!(state.score(), 900);

        for y in 16..20 {
            fill_row_except(&mut state.board, y, &[9]);
        }
        state.current = vertical_bar(4, 9, 0);
        let events = state.apply(Action::HardDrop);
        assert_eq!(state.score(), 900 + 1600);
        assert!(events.contains(&GameEvent::ScoreChanged(2500)));
    }

    #[test]
    fn test_soft_drop_moves_then_locks() {
        let mut state = GameState::with_seed(11);
        state.current = Piece::spawn(TetrominoType::O);

        let events = state.apply(Action::SoftDrop);
        assert_eq!(events, vec![GameEvent::Moved]);
        assert_eq!(state.current().y, 1);

        state.current.y = 18;
        let events = state.apply(Action::SoftDrop);
        assert!(events.is_empty());
        assert_eq!(state.board().filled_count(), 4);
        assert_eq!(state.current().y, 0);
    }

    #[test]
    fn test_horizontal_moves_stop_at_walls() {
        let mut state = GameState::with_seed(2);
        state.current = Piece::spawn(TetrominoType::O);

        for _ in 0..4 {
            assert_eq!(state.apply(Action::Left), vec![GameEvent::Moved]);
        }
        assert_eq!(state.current().x, 0);
        assert!(state.apply(Action::Left).is_empty());

        for _ in 0..8 {
            state.apply(Action::Right);
        }
        assert_eq!(state.current().x, 8);
        assert!(state.apply(Action::Right).is_empty());
    }

    #[test]
    fn test_rejected_rotation_raises_no_event() {
        let mut state = GameState::with_seed(2);
        state.current = Piece::spawn(TetrominoType::I);
        state.current.y = 19;
        let before = state.current.clone();

        assert!(state.apply(Action::Rotate).is_empty());
        assert_eq!(state.current, before);

        state.current.y = 5;
        assert_eq!(state.apply(Action::Rotate), vec![GameEvent::Moved]);
        assert_eq!(state.current().shape.height(), 3);
    }

    #[test]
    fn test_tick_waits_for_drop_interval() {
        let mut state = GameState::with_seed(4);

        let tick = state.tick(1000);
        assert!(tick.events.is_empty());
        assert_eq!(state.current().y, 0);

        let tick = state.tick(1001);
        assert_eq!(tick.events, vec![GameEvent::Moved]);
        assert_eq!(state.current().y, 1);
        assert_eq!(tick.frame.active.y, 1);

        state.tick(2001);
        assert_eq!(state.current().y, 1);
        state.tick(2002);
        assert_eq!(state.current().y, 2);
    }

    #[test]
    fn test_tick_always_returns_a_frame() {
        let mut state = GameState::with_seed(4);
        let tick = state.tick(10);
        assert_eq!(tick.frame, state.frame());
        assert_eq!(tick.frame.next, *state.next());
    }

    #[test]
    fn test_gravity_locks_grounded_piece() {
        let mut state = GameState::with_seed(6);
        state.current = Piece::spawn(TetrominoType::O);
        state.current.y = 18;

        state.tick(1500);

        assert_eq!(state.board().filled_count(), 4);
        assert_eq!(state.current().y, 0);
    }

    #[test]
    fn test_blocked_spawn_ends_game_without_touching_board() {
        let mut state = state_about_to_top_out(8);

        let events = state.apply(Action::HardDrop);

        assert!(state.is_game_over());
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver { final_score: 0 })
        );
        // 36 stack cells plus the O that locked on top; the blocked spawn adds nothing
        assert_eq!(state.board().filled_count(), 40);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = state_about_to_top_out(8);
        state.apply(Action::HardDrop);
        let board = *state.board();
        let current = state.current().clone();

        for action in [
            Action::Left,
            Action::Right,
            Action::Rotate,
            Action::SoftDrop,
            Action::HardDrop,
        ] {
            assert!(state.apply(action).is_empty());
        }
        let tick = state.tick(5000);
        assert!(tick.events.is_empty());
        assert!(tick.frame.game_over);

        assert_eq!(*state.board(), board);
        assert_eq!(*state.current(), current);
    }

    #[test]
    fn test_reset_starts_fresh_session() {
        let mut state = state_about_to_top_out(8);
        state.score = 700;
        state.apply(Action::HardDrop);
        assert!(state.is_game_over());

        let events = state.reset();

        assert_eq!(events, vec![GameEvent::ScoreChanged(0)]);
        assert!(!state.is_game_over());
        assert_eq!(state.score(), 0);
        assert_eq!(state.lines_cleared(), 0);
        assert_eq!(state.board().filled_count(), 0);
        assert!(!state.current().collides(state.board()));
        assert_eq!(state.current().y, 0);
    }

    #[test]
    fn test_score_never_decreases() {
        let mut state = GameState::with_seed(77);
        let mut last = 0;
        let actions = [
            Action::Left,
            Action::Rotate,
            Action::HardDrop,
            Action::Right,
            Action::SoftDrop,
            Action::HardDrop,
        ];
        for step in 0..300 {
            state.apply(actions[step % actions.len()]);
            assert!(state.score() >= last);
            last = state.score();
            if state.is_game_over() {
                break;
            }
        }
    }
}
