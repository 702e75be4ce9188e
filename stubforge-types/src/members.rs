//! Lazy enumeration of the members visible on a type.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::{MemberDef, MethodKind, TypeDef, TypeDescriptor, TypeUniverse};

/// Which members an enumeration yields.
///
/// Mirrors the binding-flag policy of a reflection API: instance/static,
/// public/non-public, declared-only or inherited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberFilter {
    pub properties: bool,
    pub methods: bool,
    pub instance: bool,
    pub statics: bool,
    pub public: bool,
    pub non_public: bool,
    pub inherited: bool,
    /// Include constructors, operators and accessor methods.
    pub special_methods: bool,
}

impl MemberFilter {
    /// Every public and non-public instance member, declared or inherited,
    /// excluding constructors, operators and accessors.
    pub const INSTANCE: Self = Self {
        properties: true,
        methods: true,
        instance: true,
        statics: false,
        public: true,
        non_public: true,
        inherited: true,
        special_methods: false,
    };

    fn accepts(&self, member: &MemberDef) -> bool {
        let kind_ok = match member {
            MemberDef::Property(_) => self.properties,
            MemberDef::Method(m) => {
                self.methods && (self.special_methods || m.kind == MethodKind::Ordinary)
            }
        };
        let binding_ok = if member.is_static() {
            self.statics
        } else {
            self.instance
        };
        let visibility_ok = if member.access().is_public_api() {
            self.public
        } else {
            self.non_public
        };
        kind_ok && binding_ok && visibility_ok
    }
}

impl Default for MemberFilter {
    fn default() -> Self {
        Self::INSTANCE
    }
}

/// A member together with the type that declares it.
///
/// Types in `member` are already substituted for the generic arguments of
/// the enumerated descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclaredMember {
    pub declaring_type: TypeDescriptor,
    pub member: MemberDef,
}

/// Iterator over the members visible on a type.
///
/// Walks the type itself first, then its base chain (classes) or inherited
/// interfaces (interfaces). A member hidden by a more-derived declaration
/// with the same signature is skipped, as are private members of ancestors.
/// Created by [`TypeUniverse::members`]; call it again to restart.
pub struct Members<'a> {
    universe: &'a TypeUniverse,
    filter: MemberFilter,
    pending: VecDeque<(TypeDescriptor, usize)>,
    visited: HashSet<String>,
    seen: HashSet<String>,
    current: Option<Current<'a>>,
}

struct Current<'a> {
    descriptor: TypeDescriptor,
    def: &'a TypeDef,
    substitution: HashMap<String, TypeDescriptor>,
    depth: usize,
    index: usize,
}

impl<'a> Members<'a> {
    pub(crate) fn new(
        universe: &'a TypeUniverse,
        root: &TypeDescriptor,
        filter: MemberFilter,
    ) -> Self {
        Self {
            universe,
            filter,
            pending: VecDeque::from([(root.clone(), 0)]),
            visited: HashSet::new(),
            seen: HashSet::new(),
            current: None,
        }
    }

    /// Move to the next type in the walk, queueing its ancestors.
    fn advance_type(&mut self) -> bool {
        while let Some((descriptor, depth)) = self.pending.pop_front() {
            let full_name = descriptor.full_name();
            if !self.visited.insert(full_name.clone()) {
                // Diamond-shaped interface inheritance, or a cycle.
                tracing::trace!(ty = %full_name, "type already enumerated");
                continue;
            }
            let Some(def) = self.universe.get(&full_name) else {
                tracing::trace!(ty = %full_name, "no definition; type has no known members");
                continue;
            };

            if self.filter.inherited {
                if def.is_interface() {
                    for parent in self.universe.interfaces_of(&descriptor) {
                        self.pending.push_back((parent, depth + 1));
                    }
                } else if let Some(base) = self.universe.base_of(&descriptor) {
                    self.pending.push_back((base, depth + 1));
                }
            }

            self.current = Some(Current {
                substitution: TypeUniverse::substitution(def, &descriptor),
                descriptor,
                def,
                depth,
                index: 0,
            });
            return true;
        }
        false
    }
}

impl Iterator for Members<'_> {
    type Item = DeclaredMember;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current.is_none() && !self.advance_type() {
                return None;
            }
            let current = self.current.as_mut()?;
            let def = current.def;

            let Some(member) = def.members.get(current.index) else {
                self.current = None;
                continue;
            };
            current.index += 1;

            if current.depth > 0 && !member.access().is_inheritable() {
                continue;
            }
            let member = member.substitute(&current.substitution);
            // Hidden members stay hidden even when the filter rejects the
            // hiding declaration.
            if !self.seen.insert(member.signature()) {
                continue;
            }
            if !self.filter.accepts(&member) {
                continue;
            }

            return Some(DeclaredMember {
                declaring_type: current.descriptor.clone(),
                member,
            });
        }
    }
}
