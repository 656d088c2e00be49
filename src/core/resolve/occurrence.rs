//! Branch-tagged class occurrences, the value produced by the symbolic evaluator.
//!
//! Every literal class name an expression can yield becomes a `ClassOccurrence`
//! carrying the exact source span of the literal and the set of branch tags
//! recording which conditional arms must be taken for the class to be present.
//!
//! Conditional ids are small integers handed out by a per-node `BranchAlloc`,
//! so tags stay cheap to compare, hash, and clone. A conditional may have more
//! than two arms: a ternary uses arms 0/1 while a variant axis allocates one
//! arm per option. Two tags with the same conditional id and different arms are
//! mutually exclusive.

/// Identifier for one conditional construct within a single analysis unit.
pub type ConditionalId = u32;

/// One arm of one conditional construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchTag {
    pub conditional: ConditionalId,
    pub arm: u8,
}

impl BranchTag {
    pub fn new(conditional: ConditionalId, arm: u8) -> Self {
        Self { conditional, arm }
    }
}

/// Hands out fresh conditional ids during the evaluation of one markup node
/// or one builder definition.
#[derive(Debug, Default)]
pub struct BranchAlloc {
    next: ConditionalId,
}

impl BranchAlloc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self) -> ConditionalId {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// One literal class-name appearance with its exact source span.
///
/// `start` is an absolute character position in swc's global `BytePos` space;
/// `length` covers the raw literal substring (escape sequences count at their
/// raw width). When a literal was reached through variable indirection the
/// span points into the declaration's initializer, not the use site.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassOccurrence {
    pub text: String,
    pub start: u32,
    pub length: u32,
    pub tags: Vec<BranchTag>,
}

impl ClassOccurrence {
    pub fn new(text: impl Into<String>, start: u32, length: u32) -> Self {
        Self {
            text: text.into(),
            start,
            length,
            tags: Vec::new(),
        }
    }

    /// Two occurrences can be simultaneously present iff the union of their
    /// tags contains no conditional with two different arms.
    pub fn co_resident(&self, other: &Self) -> bool {
        for a in &self.tags {
            for b in &other.tags {
                if a.conditional == b.conditional && a.arm != b.arm {
                    return false;
                }
            }
        }
        true
    }

    /// The arm this occurrence takes for a given conditional, if any.
    pub fn arm_of(&self, conditional: ConditionalId) -> Option<u8> {
        self.tags
            .iter()
            .find(|t| t.conditional == conditional)
            .map(|t| t.arm)
    }
}

/// Ordered multiset of occurrences produced by evaluating one expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassValue {
    pub occurrences: Vec<ClassOccurrence>,
}

impl ClassValue {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_occurrences(occurrences: Vec<ClassOccurrence>) -> Self {
        Self { occurrences }
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Append another value's occurrences in order, tags unchanged.
    pub fn merge(&mut self, other: ClassValue) {
        self.occurrences.extend(other.occurrences);
    }

    /// Add a branch tag to every occurrence in this value.
    pub fn tag_all(&mut self, tag: BranchTag) {
        for occ in &mut self.occurrences {
            occ.tags.push(tag);
        }
    }
}
