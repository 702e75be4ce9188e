//! Declared accessibility of types and members.

use std::{fmt, str::FromStr};

use serde::Serialize;

/// Accessibility level as declared in the source type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Access {
    #[default]
    Public,
    Protected,
    Internal,
    /// `protected internal`: visible to derived types OR the same assembly.
    ProtectedInternal,
    /// `private protected`: visible to derived types AND the same assembly.
    PrivateProtected,
    Private,
}

impl Access {
    /// Keyword form used in generated source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::ProtectedInternal => "protected internal",
            Self::PrivateProtected => "private protected",
            Self::Private => "private",
        }
    }

    /// Whether the member is part of the public surface.
    pub fn is_public_api(&self) -> bool {
        matches!(self, Self::Public)
    }

    /// Whether derived types outside the assembly can see the member.
    pub fn is_inheritable(&self) -> bool {
        !matches!(self, Self::Private)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Access {
    type Err = String;

    /// Accepts both the keyword spelling (`protected internal`) and the
    /// kebab-case spelling (`protected-internal`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', " ");
        match normalized.as_str() {
            "public" => Ok(Self::Public),
            "protected" => Ok(Self::Protected),
            "internal" => Ok(Self::Internal),
            "protected internal" | "internal protected" => Ok(Self::ProtectedInternal),
            "private protected" | "protected private" => Ok(Self::PrivateProtected),
            "private" => Ok(Self::Private),
            _ => Err(format!("unknown access level '{}'", s)),
        }
    }
}
