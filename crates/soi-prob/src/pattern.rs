//! Membership-pattern encoding for up to four labeled subsets.
//!
//! Each universe element carries a 4-bit pattern: bit 1 for A, 2 for B,
//! 4 for C, 8 for D. The 16 possible patterns index every per-pattern
//! array in this crate, so the tally and sampler can work with plain
//! bit algebra instead of named fields.

use serde::Serialize;

/// Number of distinct membership patterns (2^4).
pub const PATTERN_COUNT: usize = 16;

/// Canonical key for each pattern index, in bit order.
///
/// Index 0 is the empty pattern; its key "N" doubles as the universe-size
/// key on the `KEY=COUNT` spec surface.
pub const KEYS: [&str; PATTERN_COUNT] = [
    "N", "A", "B", "AB", "C", "AC", "BC", "ABC", "D", "AD", "BD", "ABD", "CD", "ACD", "BCD", "ABCD",
];

/// One of the four labeled subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SetLabel {
    A,
    B,
    C,
    D,
}

impl SetLabel {
    /// All labels, in bit order.
    pub const ALL: [SetLabel; 4] = [SetLabel::A, SetLabel::B, SetLabel::C, SetLabel::D];

    /// The membership bit this subset contributes to a pattern.
    pub fn bit(self) -> u8 {
        1 << self.index()
    }

    /// Position of this subset in size arrays: A=0, B=1, C=2, D=3.
    pub fn index(self) -> usize {
        match self {
            SetLabel::A => 0,
            SetLabel::B => 1,
            SetLabel::C => 2,
            SetLabel::D => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SetLabel::A => "A",
            SetLabel::B => "B",
            SetLabel::C => "C",
            SetLabel::D => "D",
        }
    }
}

impl std::fmt::Display for SetLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A membership pattern: the OR of the bits of every subset an element
/// belongs to. Always in `[0, 15]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern(u8);

impl Pattern {
    /// The empty pattern (element belongs to no subset).
    pub const EMPTY: Pattern = Pattern(0);

    /// Construct from raw bits. Returns `None` if any bit above 8 is set.
    pub fn from_bits(bits: u8) -> Option<Pattern> {
        (bits < PATTERN_COUNT as u8).then_some(Pattern(bits))
    }

    /// Look up a pattern by its canonical key ("AB", "ABCD", ...).
    pub fn from_key(key: &str) -> Option<Pattern> {
        KEYS.iter()
            .position(|k| *k == key)
            .map(|i| Pattern(i as u8))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Index into a 16-slot per-pattern array.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn key(self) -> &'static str {
        KEYS[self.index()]
    }

    /// Number of subsets participating in this pattern.
    pub fn set_count(self) -> u32 {
        self.0.count_ones()
    }

    pub fn contains(self, label: SetLabel) -> bool {
        self.0 & label.bit() != 0
    }

    /// The subsets participating in this pattern, in bit order.
    pub fn members(self) -> impl Iterator<Item = SetLabel> {
        SetLabel::ALL.into_iter().filter(move |l| self.contains(*l))
    }

    /// All 16 patterns in index order.
    pub fn all() -> impl Iterator<Item = Pattern> {
        (0..PATTERN_COUNT as u8).map(Pattern)
    }

    /// The 11 patterns describing an intersection of two or more subsets.
    ///
    /// Only these are meaningful significance targets; single-subset
    /// patterns and the empty pattern are excluded from reporting.
    pub fn intersections() -> impl Iterator<Item = Pattern> {
        Pattern::all().filter(|p| p.set_count() >= 2)
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Pattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}
