//! Reorderable stage order shared by the visual pipeline and the audio graph.
//!
//! Positions are always the contiguous permutation `1..=N`. A reorder
//! removes one stage, reinserts it at the clamped target and renumbers
//! everything, so no sequence of reorders can drop or duplicate a stage.

use core::fmt;

/// A reorderable stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Ring modulation (applied as a pre-stage on the visual side)
    RingMod,
    /// Pixelate / bit crush
    Pixelate,
    /// Horizontal shift / audio delay
    Delay,
    /// Blend against the previous output frame
    Feedback,
}

impl StageId {
    /// Every stage in factory order.
    pub const ALL: [StageId; 4] = [
        StageId::RingMod,
        StageId::Pixelate,
        StageId::Delay,
        StageId::Feedback,
    ];

    /// Stable lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            StageId::RingMod => "ringmod",
            StageId::Pixelate => "pixelate",
            StageId::Delay => "delay",
            StageId::Feedback => "feedback",
        }
    }

    /// Parse a stage name (case-insensitive; `ring` and `ring_mod` accepted).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("ring") || name.eq_ignore_ascii_case("ring_mod") {
            return Some(StageId::RingMod);
        }
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    /// Which stage
    pub id: StageId,
    /// Whether the stage runs
    pub enabled: bool,
    /// 1-based position
    pub position: usize,
}

/// Ordered set of stages.
///
/// # Example
///
/// ```rust
/// use avfx_engine::{ChainOrder, StageId};
///
/// let mut chain = ChainOrder::new();
/// chain.reorder(StageId::Feedback, 1);
/// assert_eq!(
///     chain.ordered_ids(),
///     vec![StageId::Feedback, StageId::RingMod, StageId::Pixelate, StageId::Delay]
/// );
/// assert_eq!(chain.position(StageId::Delay), Some(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOrder {
    stages: Vec<Stage>,
}

impl Default for ChainOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainOrder {
    /// Factory order, every stage enabled.
    pub fn new() -> Self {
        let mut chain = Self {
            stages: StageId::ALL
                .into_iter()
                .map(|id| Stage {
                    id,
                    enabled: true,
                    position: 0,
                })
                .collect(),
        };
        chain.renumber();
        chain
    }

    /// Chain in the given order. Stages missing from `ids` keep their
    /// factory order after the listed ones; repeats are ignored.
    pub fn from_ids(ids: &[StageId]) -> Self {
        let mut chain = Self::new();
        for (i, &id) in ids.iter().enumerate() {
            if ids[..i].contains(&id) {
                continue;
            }
            let target = ids[..=i]
                .iter()
                .enumerate()
                .filter(|&(j, other)| !ids[..j].contains(other))
                .count();
            chain.reorder(id, target);
        }
        chain
    }

    fn renumber(&mut self) {
        for (i, stage) in self.stages.iter_mut().enumerate() {
            stage.position = i + 1;
        }
    }

    /// Move `id` to 1-based `target_position`, clamped into `1..=N`.
    ///
    /// Returns `false` if `id` is not in the chain (nothing changes).
    pub fn reorder(&mut self, id: StageId, target_position: usize) -> bool {
        let Some(idx) = self.stages.iter().position(|s| s.id == id) else {
            return false;
        };
        let stage = self.stages.remove(idx);
        let insert_at = target_position.saturating_sub(1).min(self.stages.len());
        self.stages.insert(insert_at, stage);
        self.renumber();
        true
    }

    /// Stage ids sorted by position.
    pub fn ordered_ids(&self) -> Vec<StageId> {
        let mut stages = self.stages.clone();
        stages.sort_by_key(|s| s.position);
        stages.into_iter().map(|s| s.id).collect()
    }

    /// Every stage in order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// 1-based position of `id`.
    pub fn position(&self, id: StageId) -> Option<usize> {
        self.stages.iter().find(|s| s.id == id).map(|s| s.position)
    }

    /// Whether `id` runs.
    pub fn is_enabled(&self, id: StageId) -> bool {
        self.stages.iter().any(|s| s.id == id && s.enabled)
    }

    /// Enable or disable `id`.
    pub fn set_enabled(&mut self, id: StageId, enabled: bool) {
        if let Some(stage) = self.stages.iter_mut().find(|s| s.id == id) {
            stage.enabled = enabled;
        }
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false; the chain holds every stage.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
