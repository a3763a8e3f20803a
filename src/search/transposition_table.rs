//! Fixed-size transposition table keyed by the exact board key.
//!
//! This table uses direct indexing with depth-preferred replacement and
//! generation aging to evict stale entries. The full key is kept in every
//! entry, so an index collision can only ever cost a miss.

use crate::game_state::board_types::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// The true score is at least the stored one (the node failed high).
    Lower,
    /// The true score is at most the stored one (the node failed low).
    Upper,
}

impl Bound {
    /// Classify a fail-soft result against the window the node was entered with.
    #[inline]
    pub fn classify(score: i32, alpha_orig: i32, beta_orig: i32) -> Self {
        if score <= alpha_orig {
            Bound::Upper
        } else if score >= beta_orig {
            Bound::Lower
        } else {
            Bound::Exact
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Column>,
}

impl TTEntry {
    /// Apply this entry to a `depth` search of `[alpha, beta]`.
    ///
    /// Entries searched shallower than `depth` are ignored. Otherwise an
    /// exact score resolves the node, a lower bound raises `alpha` and an
    /// upper bound lowers `beta`; a window that closes resolves the node
    /// with the stored score.
    pub fn resolve(&self, depth: u8, alpha: &mut i32, beta: &mut i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        match self.bound {
            Bound::Exact => return Some(self.score),
            Bound::Lower => *alpha = (*alpha).max(self.score),
            Bound::Upper => *beta = (*beta).min(self.score),
        }
        (*alpha >= *beta).then_some(self.score)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    generations: Vec<u8>,
    current_generation: u8,
    stats: TTStats,
}

impl TranspositionTable {
    const AGE_REPLACE_THRESHOLD: u8 = 4;
    const DEPTH_REPLACE_MARGIN: u8 = 2;

    pub fn new_with_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let entry_size = std::mem::size_of::<Option<TTEntry>>().max(1);
        Self::with_capacity(bytes / entry_size)
    }

    /// Table with exactly `count` slots.
    pub fn with_capacity(count: usize) -> Self {
        let count = count.max(1);
        Self {
            entries: vec![None; count],
            generations: vec![0; count],
            current_generation: 0,
            stats: TTStats::default(),
        }
    }

    /// A table that stores nothing and misses every probe.
    pub fn disabled() -> Self {
        Self {
            entries: Vec::new(),
            generations: Vec::new(),
            current_generation: 0,
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Advance TT generation (once per iterative-deepening iteration).
    #[inline]
    pub fn new_generation(&mut self) {
        self.current_generation = self.current_generation.wrapping_add(1);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.generations.fill(0);
        self.current_generation = 0;
        self.stats = TTStats::default();
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        // Board keys are sparse in their low bits; spread them first.
        let mixed = key.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        ((mixed >> 17) as usize) % self.entries.len()
    }

    pub fn probe(&mut self, key: u64) -> Option<TTEntry> {
        self.stats.probes += 1;
        if !self.is_enabled() {
            return None;
        }
        let idx = self.idx(key);
        let hit = self.entries[idx].filter(|e| e.key == key);
        if hit.is_some() {
            self.stats.hits += 1;
            self.generations[idx] = self.current_generation;
        }
        hit
    }

    /// Store `entry`. A newer entry for the same key always replaces the old
    /// one; a different key takes the slot only when it is deep enough or the
    /// occupant has gone stale.
    pub fn store(&mut self, entry: TTEntry) {
        if !self.is_enabled() {
            return;
        }
        self.stats.stores += 1;
        let idx = self.idx(entry.key);
        let replace = match self.entries[idx] {
            None => true,
            Some(existing) if existing.key == entry.key => true,
            Some(existing) => {
                let age = self.current_generation.wrapping_sub(self.generations[idx]);
                age >= Self::AGE_REPLACE_THRESHOLD
                    || entry.depth.saturating_add(Self::DEPTH_REPLACE_MARGIN) >= existing.depth
            }
        };

        if replace {
            self.entries[idx] = Some(entry);
            self.generations[idx] = self.current_generation;
        }
    }
}
