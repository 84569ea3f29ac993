//! Round checkpoints for conformance debugging.
//!
//! The block transforms report their intermediate state to a [`RoundObserver`]
//! at the points named in the FIPS-197 Appendix C listings. Observers only see
//! copies of the state, so the transforms stay pure. [`NoopObserver`] is used by
//! the plain entry points; [`RecordingObserver`] reproduces the published
//! listings line by line and [`TracingObserver`] forwards to `tracing`.

use core::fmt;

use crate::block::Block;

/// Named point inside a cipher round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Cipher input block.
    Input,
    /// State at the start of a round.
    Start,
    /// After SubBytes.
    SubBytes,
    /// After ShiftRows.
    ShiftRows,
    /// After MixColumns.
    MixColumns,
    /// Round key about to be mixed in.
    RoundKey,
    /// Cipher output block.
    Output,
    /// Inverse cipher input block.
    InvInput,
    /// State at the start of an inverse round.
    InvStart,
    /// After InvShiftRows.
    InvShiftRows,
    /// After InvSubBytes.
    InvSubBytes,
    /// Round key about to be mixed in by the inverse cipher.
    InvRoundKey,
    /// After AddRoundKey in the inverse cipher.
    InvAddRoundKey,
    /// After InvMixColumns (equivalent inverse cipher only).
    InvMixColumns,
    /// Inverse cipher output block.
    InvOutput,
}

impl Stage {
    /// Label used in the FIPS-197 example listings.
    pub const fn label(self) -> &'static str {
        match self {
            Stage::Input => "input",
            Stage::Start => "start",
            Stage::SubBytes => "s_box",
            Stage::ShiftRows => "s_row",
            Stage::MixColumns => "m_col",
            Stage::RoundKey => "k_sch",
            Stage::Output => "output",
            Stage::InvInput => "iinput",
            Stage::InvStart => "istart",
            Stage::InvShiftRows => "is_row",
            Stage::InvSubBytes => "is_box",
            Stage::InvRoundKey => "ik_sch",
            Stage::InvAddRoundKey => "ik_add",
            Stage::InvMixColumns => "im_col",
            Stage::InvOutput => "ioutput",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receives the state at each named checkpoint of a block transform.
pub trait RoundObserver {
    /// Called with the round number, checkpoint and state (as a block).
    fn checkpoint(&mut self, round: usize, stage: Stage, bytes: &Block) {
        let _ = (round, stage, bytes);
    }
}

impl<O: RoundObserver + ?Sized> RoundObserver for &mut O {
    #[inline]
    fn checkpoint(&mut self, round: usize, stage: Stage, bytes: &Block) {
        (**self).checkpoint(round, stage, bytes);
    }
}

/// Observer that ignores every checkpoint.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl RoundObserver for NoopObserver {}

/// Observer that emits one `tracing` event per checkpoint at TRACE level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl RoundObserver for TracingObserver {
    fn checkpoint(&mut self, round: usize, stage: Stage, bytes: &Block) {
        tracing::trace!(round, stage = stage.label(), state = %hex::encode(bytes), "aes checkpoint");
    }
}

/// A single recorded checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    /// Round number as printed in the listings.
    pub round: usize,
    /// Checkpoint within the round.
    pub stage: Stage,
    /// State (or round key) at the checkpoint.
    pub bytes: Block,
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "round[{:2}].{:<9}{}",
            self.round,
            self.stage.label(),
            hex::encode(self.bytes)
        )
    }
}

/// Observer that keeps every checkpoint in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    entries: Vec<Checkpoint>,
}

impl RecordingObserver {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded checkpoints in call order.
    pub fn entries(&self) -> &[Checkpoint] {
        &self.entries
    }

    /// Finds the first checkpoint for `(round, stage)`.
    pub fn find(&self, round: usize, stage: Stage) -> Option<&Checkpoint> {
        self.entries
            .iter()
            .find(|c| c.round == round && c.stage == stage)
    }

    /// Renders the listing, one checkpoint per line.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(Checkpoint::to_string)
    }
}

impl RoundObserver for RecordingObserver {
    fn checkpoint(&mut self, round: usize, stage: Stage, bytes: &Block) {
        self.entries.push(Checkpoint {
            round,
            stage,
            bytes: *bytes,
        });
    }
}
