//! Precomputed catalogue of every checkers piece descriptor.
//!
//! Boards store plain `PieceId` integers per cell; the descriptors live once,
//! in a static table of 48 entries (2 players, 12 slots, standard and king).
//! An id is a composite key:
//!
//! ```text
//! kind_bit << 16 | (player_id + 2) << 14 | slot
//! ```
//!
//! where `player_id` is the owning player's sign (`+1` for Max, `-1` for Min).
//! A promoted piece keeps its owner and slot and switches to the king entry.

use crate::board::turn::Turn;
use crate::errors::{CheckersError, CheckersResult};

pub type PieceId = u32;

/// Cell value meaning "no piece".
pub const EMPTY_CELL: PieceId = 0;

pub const SLOTS_PER_PLAYER: usize = 12;

const KINDS_PER_PLAYER: usize = 2;
const CATALOGUE_SIZE: usize = Turn::ALL.len() * KINDS_PER_PLAYER * SLOTS_PER_PLAYER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Standard,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Standard => 0,
            PieceKind::King => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceDescriptor {
    pub owner: Turn,
    pub kind: PieceKind,
    pub slot: u8,
}

impl PieceDescriptor {
    pub const fn new(owner: Turn, kind: PieceKind, slot: u8) -> Self {
        Self { owner, kind, slot }
    }

    #[inline]
    pub const fn id(&self) -> PieceId {
        let kind_bit = self.kind.index() as PieceId;
        let player_bits = (self.owner.id() + 2) as PieceId;
        (kind_bit << 16) | (player_bits << 14) | self.slot as PieceId
    }

    #[inline]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }
}

static CATALOGUE: [PieceDescriptor; CATALOGUE_SIZE] = build_catalogue();

const fn build_catalogue() -> [PieceDescriptor; CATALOGUE_SIZE] {
    let mut table = [PieceDescriptor::new(Turn::Max, PieceKind::Standard, 0); CATALOGUE_SIZE];
    let mut i = 0;
    while i < CATALOGUE_SIZE {
        let owner = if i / (KINDS_PER_PLAYER * SLOTS_PER_PLAYER) == 0 {
            Turn::Max
        } else {
            Turn::Min
        };
        let kind = if (i / SLOTS_PER_PLAYER) % KINDS_PER_PLAYER == 0 {
            PieceKind::Standard
        } else {
            PieceKind::King
        };
        table[i] = PieceDescriptor::new(owner, kind, (i % SLOTS_PER_PLAYER) as u8);
        i += 1;
    }
    table
}

#[inline]
const fn catalogue_index(owner: Turn, kind: PieceKind, slot: usize) -> usize {
    owner.index() * KINDS_PER_PLAYER * SLOTS_PER_PLAYER + kind.index() * SLOTS_PER_PLAYER + slot
}

/// Descriptor for a raw cell value, `None` for empty cells and foreign ids.
pub fn lookup(id: PieceId) -> Option<PieceDescriptor> {
    let slot = (id & 0x3FFF) as usize;
    let owner = Turn::from_id(((id >> 14) & 0b11) as i32 - 2)?;
    let kind = match id >> 16 {
        0 => PieceKind::Standard,
        1 => PieceKind::King,
        _ => return None,
    };
    if slot >= SLOTS_PER_PLAYER {
        return None;
    }
    Some(CATALOGUE[catalogue_index(owner, kind, slot)])
}

pub fn try_lookup(id: PieceId) -> CheckersResult<PieceDescriptor> {
    lookup(id).ok_or(CheckersError::UnknownPieceId(id))
}

pub fn king_variant_of(piece: PieceDescriptor) -> PieceDescriptor {
    CATALOGUE[catalogue_index(piece.owner, PieceKind::King, piece.slot as usize)]
}

pub fn standard_piece(owner: Turn, slot: usize) -> Option<PieceDescriptor> {
    (slot < SLOTS_PER_PLAYER).then(|| CATALOGUE[catalogue_index(owner, PieceKind::Standard, slot)])
}

pub fn all() -> &'static [PieceDescriptor] {
    &CATALOGUE
}
