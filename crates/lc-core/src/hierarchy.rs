//! Effective constant set of an interface hierarchy.
//!
//! Types are walked depth-first in supertype declaration order. The first
//! declaration of a `(name, return category)` pair becomes the canonical
//! descriptor of an [`EffectiveMethod`]; later declarations of the same pair
//! are shadowed and kept, in walk order, as the fallback chain used for keys
//! and default values.

use crate::locale::DEFAULT_LOCALE;
use crate::model::{DefaultValue, ElementDescriptor, MethodId, ReturnCategory, TypeArena, TypeId, TypeRef};
use itertools::Itertools;
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("type '{ty}' extends unknown type '{supertype}'")]
    UnknownSupertype { ty: String, supertype: String },
    #[error("inheritance cycle through '{ty}'")]
    Cycle { ty: String },
    #[error("type '{ty}' cannot be introspected: {detail}")]
    Malformed { ty: String, detail: String },
    #[error("type {0} is not part of this hierarchy")]
    UnknownType(TypeId),
}

#[derive(Debug, Clone)]
pub struct EffectiveMethod<'a> {
    pub descriptor: &'a ElementDescriptor,
    /// Shadowed declarations from supertypes, in traversal order.
    pub shadowed: Vec<&'a ElementDescriptor>,
}

impl<'a> EffectiveMethod<'a> {
    fn new(descriptor: &'a ElementDescriptor) -> Self {
        Self {
            descriptor,
            shadowed: Vec::new(),
        }
    }

    pub fn name(&self) -> &'a str {
        &self.descriptor.name
    }

    pub fn category(&self) -> ReturnCategory {
        self.descriptor.category
    }

    pub fn id(&self) -> MethodId {
        self.descriptor.id()
    }

    fn chain(&self) -> impl Iterator<Item = &'a ElementDescriptor> + '_ {
        std::iter::once(self.descriptor).chain(self.shadowed.iter().copied())
    }

    /// Own key override, else the first override along the fallback chain, else the name.
    pub fn key(&self) -> &'a str {
        self.chain()
            .find_map(|descriptor| descriptor.key.as_deref())
            .unwrap_or(&self.descriptor.name)
    }

    /// First default of the given category along the declaration chain.
    pub fn default_for(&self, category: ReturnCategory) -> Option<&'a DefaultValue> {
        self.chain()
            .filter_map(|descriptor| descriptor.default.as_ref())
            .find(|default| default.category() == category)
    }
}

/// Insertion-ordered set of effective methods keyed by `(name, category)`.
#[derive(Debug, Clone, Default)]
pub struct EffectiveMethods<'a> {
    methods: Vec<EffectiveMethod<'a>>,
    index: HashMap<(&'a str, ReturnCategory), usize>,
}

impl<'a> EffectiveMethods<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new effective method, or shadows an existing one with the same identity.
    pub fn add(&mut self, descriptor: &'a ElementDescriptor) {
        let identity = (descriptor.name.as_str(), descriptor.category);
        match self.index.get(&identity) {
            Some(&position) => self.methods[position].shadowed.push(descriptor),
            None => {
                self.index.insert(identity, self.methods.len());
                self.methods.push(EffectiveMethod::new(descriptor));
            }
        }
    }

    pub fn get(&self, name: &str, category: ReturnCategory) -> Option<&EffectiveMethod<'a>> {
        self.methods
            .iter()
            .find(|method| method.descriptor.matches(name, category))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EffectiveMethod<'a>> {
        self.methods.iter()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Names declared with more than one return category.
    pub fn ambiguous_names(&self) -> Vec<&'a str> {
        self.methods
            .iter()
            .map(|method| method.name())
            .duplicates()
            .collect()
    }
}

impl<'s, 'a> IntoIterator for &'s EffectiveMethods<'a> {
    type Item = &'s EffectiveMethod<'a>;
    type IntoIter = std::slice::Iter<'s, EffectiveMethod<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.iter()
    }
}

pub struct HierarchyResolver<'a> {
    arena: &'a TypeArena,
    memoize: bool,
}

impl<'a> HierarchyResolver<'a> {
    pub fn new(arena: &'a TypeArena) -> Self {
        Self {
            arena,
            memoize: true,
        }
    }

    /// Revisits shared ancestors once per path instead of once per resolution.
    pub fn without_memoization(mut self) -> Self {
        self.memoize = false;
        self
    }

    pub fn resolve(&self, root: TypeId) -> Result<EffectiveMethods<'a>, ResolveError> {
        let mut methods = EffectiveMethods::new();
        let mut visited = HashSet::new();
        let mut path = Vec::new();
        self.visit(root, &mut visited, &mut path, &mut methods)?;
        debug!(
            "resolved {} effective constants for {}",
            methods.len(),
            self.arena[root].qualified_name()
        );
        Ok(methods)
    }

    fn visit(
        &self,
        id: TypeId,
        visited: &mut HashSet<TypeId>,
        path: &mut Vec<TypeId>,
        methods: &mut EffectiveMethods<'a>,
    ) -> Result<(), ResolveError> {
        let node = self.arena.get(id).ok_or(ResolveError::UnknownType(id))?;
        if path.contains(&id) {
            return Err(ResolveError::Cycle {
                ty: node.qualified_name(),
            });
        }
        if !visited.insert(id) && self.memoize {
            return Ok(());
        }
        if let Some(detail) = node.defects.first() {
            return Err(ResolveError::Malformed {
                ty: node.qualified_name(),
                detail: detail.clone(),
            });
        }

        for descriptor in node.constant_methods() {
            methods.add(descriptor);
        }

        path.push(id);
        for supertype in &node.supertypes {
            match supertype {
                TypeRef::Resolved(super_id) => self.visit(*super_id, visited, path, methods)?,
                TypeRef::Unresolved(name) => {
                    return Err(ResolveError::UnknownSupertype {
                        ty: node.qualified_name(),
                        supertype: name.clone(),
                    })
                }
            }
        }
        path.pop();
        Ok(())
    }

    /// Locales of `root`: the first declared list found breadth-first up the hierarchy.
    pub fn locales(&self, root: TypeId) -> Vec<String> {
        let mut queue = VecDeque::from([root]);
        let mut seen = HashSet::from([root]);
        while let Some(id) = queue.pop_front() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            if let Some(locales) = &node.locales {
                return locales.clone();
            }
            for supertype in &node.supertypes {
                if let TypeRef::Resolved(super_id) = supertype {
                    if seen.insert(*super_id) {
                        queue.push_back(*super_id);
                    }
                }
            }
        }
        vec![DEFAULT_LOCALE.to_string()]
    }
}
