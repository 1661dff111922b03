//! RNG module - piece selection
//!
//! The game state draws pieces from any [`PieceSource`]. The default source,
//! [`RandomPieces`], picks uniformly over the seven kinds using a seedable
//! PCG generator, so a seed fully determines the piece sequence.
//! [`SequencePieces`] replays a fixed list, which lets tests script exactly
//! which pieces spawn.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::types::PieceKind;

/// Supplies the next piece kind to spawn.
pub trait PieceSource {
    fn next_piece(&mut self) -> PieceKind;
}

/// Uniform random piece selection over the full catalog.
#[derive(Debug, Clone)]
pub struct RandomPieces<R = Pcg32> {
    rng: R,
}

impl RandomPieces<Pcg32> {
    /// Deterministic source: the same seed yields the same piece sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }

    /// Source seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }
}

impl<R: RngCore> RandomPieces<R> {
    /// Wrap any random number generator.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> PieceSource for RandomPieces<R> {
    fn next_piece(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.random_range(0..PieceKind::ALL.len())]
    }
}

/// Cycles through a fixed list of kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePieces {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequencePieces {
    /// An empty list falls back to the catalog order.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds = PieceKind::ALL.to_vec();
        }
        Self { kinds, index: 0 }
    }

    /// Always the same kind.
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl PieceSource for SequencePieces {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_piece(&mut self) -> PieceKind {
        (**self).next_piece()
    }
}
