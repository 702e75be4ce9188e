//! Attribute lookup on types and members.

use crate::AttributeUse;

/// Outcome of probing for a single expected attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeMatch<'a> {
    /// Exactly one matching attribute.
    Found(&'a AttributeUse),
    /// More than one match, in declaration order.
    FoundAmbiguous(Vec<&'a AttributeUse>),
    NotFound,
}

impl<'a> AttributeMatch<'a> {
    /// First match in declaration order, accepting ambiguity.
    pub fn first(&self) -> Option<&'a AttributeUse> {
        match self {
            Self::Found(attribute) => Some(attribute),
            Self::FoundAmbiguous(all) => all.first().copied(),
            Self::NotFound => None,
        }
    }

    /// The match, only if it is unambiguous.
    pub fn single(&self) -> Option<&'a AttributeUse> {
        match self {
            Self::Found(attribute) => Some(attribute),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }

    pub(crate) fn from_matches(mut matches: Vec<&'a AttributeUse>) -> Self {
        match matches.len() {
            0 => Self::NotFound,
            1 => Self::Found(matches.remove(0)),
            _ => Self::FoundAmbiguous(matches),
        }
    }
}
