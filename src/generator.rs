use crate::components::{Piece, TetrominoType};

/// Source of new pieces. Each draw is uniform over the seven types and independent
/// of the previous ones.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: fastrand::Rng,
}

impl PieceGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Reproducible sequence, used by tests and for replaying a session.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    #[must_use]
    pub fn next_type(&mut self) -> TetrominoType {
        TetrominoType::random(&mut self.rng)
    }

    /// A freshly spawned piece at the centred start position.
    #[must_use]
    pub fn next_piece(&mut self) -> Piece {
        Piece::spawn(self.next_type())
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}
