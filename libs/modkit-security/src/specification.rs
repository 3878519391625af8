//! Specification algebra.
//!
//! A [`Specification`] is an immutable predicate over one aggregate type. It is
//! either a resource-specific leaf or a conjunction of two or more
//! sub-specifications. The set of leaves for an aggregate is a closed `enum`
//! owned by the bounded context, so every consumer (query translator, cache key
//! generator) must match it exhaustively.
//!
//! Conjunction is associative and commutative in meaning. [`Specification::and`]
//! flattens nested conjunctions so that associativity also holds structurally;
//! commutativity is the consumers' concern (see `modkit_db::cache::key`).

use std::iter;

use crate::error::InvalidPredicateArgument;

/// A single testable condition over a candidate record.
pub trait LeafPredicate {
    /// The aggregate this leaf is evaluated against.
    type Candidate: ?Sized;

    /// Pure function of the leaf's own fields against the candidate's fields.
    fn is_satisfied_by(&self, candidate: &Self::Candidate) -> bool;
}

/// Predicate tree over leaves of type `L`.
///
/// # Examples
///
/// ```
/// use modkit_security::{LeafPredicate, Specification};
///
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// enum Num {
///     AtLeast(i64),
///     Even,
/// }
///
/// impl LeafPredicate for Num {
///     type Candidate = i64;
///     fn is_satisfied_by(&self, n: &i64) -> bool {
///         match self {
///             Num::AtLeast(min) => n >= min,
///             Num::Even => n % 2 == 0,
///         }
///     }
/// }
///
/// let spec = Specification::leaf(Num::AtLeast(10)).and(Specification::leaf(Num::Even));
/// assert!(spec.is_satisfied_by(&12));
/// assert!(!spec.is_satisfied_by(&11));
/// assert!(!spec.is_satisfied_by(&8));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Specification<L> {
    /// A resource-specific condition.
    Leaf(L),
    /// All children must hold.
    And(Conjunction<L>),
}

/// Two or more child specifications, none of which is itself a conjunction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conjunction<L> {
    children: Vec<Specification<L>>,
}

impl<L> Conjunction<L> {
    /// Children in call-site order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Specification<L>] {
        &self.children
    }
}

impl<L> Specification<L> {
    /// Wrap a single leaf.
    #[inline]
    #[must_use]
    pub fn leaf(leaf: L) -> Self {
        Self::Leaf(leaf)
    }

    /// Conjoin two specifications.
    ///
    /// Nested conjunctions are flattened, so `a.and(b.and(c))` and
    /// `a.and(b).and(c)` build the same tree.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let mut children = Vec::new();
        self.flatten_into(&mut children);
        other.flatten_into(&mut children);
        Self::And(Conjunction { children })
    }

    /// Conjoin any number of specifications.
    ///
    /// A single specification is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPredicateArgument`] when `specs` is empty: an empty
    /// conjunction would silently match everything.
    pub fn all_of<I>(specs: I) -> Result<Self, InvalidPredicateArgument>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut children = Vec::new();
        for spec in specs {
            spec.flatten_into(&mut children);
        }

        let mut rest = children.into_iter();
        match (rest.next(), rest.len()) {
            (None, _) => Err(InvalidPredicateArgument::new(
                "specifications",
                "a conjunction needs at least one specification",
            )),
            (Some(only), 0) => Ok(only),
            (Some(first), _) => Ok(Self::And(Conjunction {
                children: iter::once(first).chain(rest).collect(),
            })),
        }
    }

    /// Leaves in tree order.
    #[must_use]
    pub fn leaves(&self) -> Leaves<'_, L> {
        Leaves { stack: vec![self] }
    }

    fn flatten_into(self, out: &mut Vec<Self>) {
        match self {
            Self::And(conjunction) => out.extend(conjunction.children),
            leaf @ Self::Leaf(_) => out.push(leaf),
        }
    }
}

impl<L: LeafPredicate> Specification<L> {
    /// In-memory structural evaluation.
    ///
    /// Conjunctions short-circuit on the first child that does not hold.
    pub fn is_satisfied_by(&self, candidate: &L::Candidate) -> bool {
        match self {
            Self::Leaf(leaf) => leaf.is_satisfied_by(candidate),
            Self::And(conjunction) => conjunction
                .children
                .iter()
                .all(|child| child.is_satisfied_by(candidate)),
        }
    }
}

impl<L> From<L> for Specification<L> {
    fn from(leaf: L) -> Self {
        Self::Leaf(leaf)
    }
}

/// Iterator over the leaves of a [`Specification`].
pub struct Leaves<'a, L> {
    stack: Vec<&'a Specification<L>>,
}

impl<'a, L> Iterator for Leaves<'a, L> {
    type Item = &'a L;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Specification::Leaf(leaf) => return Some(leaf),
                Specification::And(conjunction) => {
                    self.stack.extend(conjunction.children.iter().rev());
                }
            }
        }
        None
    }
}
