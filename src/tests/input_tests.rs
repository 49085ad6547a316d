#[cfg(test)]
mod tests {
    use crate::input::{Action, InputQueue};
    use crossterm::event::KeyCode;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(Action::from_key(KeyCode::Left), Some(Action::Left));
        assert_eq!(Action::from_key(KeyCode::Right), Some(Action::Right));
        assert_eq!(Action::from_key(KeyCode::Up), Some(Action::Rotate));
        assert_eq!(Action::from_key(KeyCode::Down), Some(Action::SoftDrop));
        assert_eq!(Action::from_key(KeyCode::Char(' ')), Some(Action::HardDrop));
    }

    #[test]
    fn test_letter_keys() {
        assert_eq!(Action::from_key(KeyCode::Char('a')), Some(Action::Left));
        assert_eq!(Action::from_key(KeyCode::Char('d')), Some(Action::Right));
        assert_eq!(Action::from_key(KeyCode::Char('w')), Some(Action::Rotate));
        assert_eq!(Action::from_key(KeyCode::Char('s')), Some(Action::SoftDrop));
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        assert_eq!(Action::from_key(KeyCode::Char('x')), None);
        assert_eq!(Action::from_key(KeyCode::Enter), None);
        assert_eq!(Action::from_key(KeyCode::F(1)), None);
    }

    #[test]
    fn test_queue_keeps_arrival_order() {
        let mut queue = InputQueue::default();
        assert!(queue.is_empty());

        queue.push(Action::Left);
        queue.push(Action::Rotate);
        queue.push(Action::HardDrop);
        assert_eq!(queue.len(), 3);

        let drained: Vec<Action> = queue.drain().collect();
        assert_eq!(drained, vec![Action::Left, Action::Rotate, Action::HardDrop]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_clear() {
        let mut queue = InputQueue::default();
        queue.push(Action::SoftDrop);
        queue.clear();
        assert_eq!(queue.len(), 0);
    }
}
