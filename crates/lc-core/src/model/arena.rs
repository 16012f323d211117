use super::{DefaultValue, ElementDescriptor, ReturnCategory};
use derive_more::Display;
use std::collections::HashMap;
use std::ops::Index;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("#{_0}")]
pub struct TypeId(pub u32);

impl TypeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

fn qualified_name(package: Option<&str>, enclosing: Option<&str>, name: &str) -> String {
    package
        .into_iter()
        .chain(enclosing)
        .chain(std::iter::once(name))
        .collect::<Vec<_>>()
        .join(".")
}

/// Edge from a type to one of its direct supertypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Resolved(TypeId),
    /// Name that did not match any declared type.
    Unresolved(String),
}

#[derive(Debug, Clone)]
pub struct TypeNode {
    pub id: TypeId,
    pub name: String,
    pub package: Option<String>,
    pub enclosing: Option<String>,
    pub supertypes: Vec<TypeRef>,
    pub methods: Vec<ElementDescriptor>,
    /// Locales declared directly on this type.
    pub locales: Option<Vec<String>>,
    pub localizable: bool,
    pub lookup: bool,
    /// Problems found while the declaration was introspected.
    pub defects: Vec<String>,
}

impl TypeNode {
    pub fn qualified_name(&self) -> String {
        qualified_name(self.package.as_deref(), self.enclosing.as_deref(), &self.name)
    }

    /// `[Enclosing_]Name`, the stem of every generated type name.
    pub fn artifact_prefix(&self) -> String {
        match &self.enclosing {
            Some(enclosing) => format!("{}_{}", enclosing, self.name),
            None => self.name.clone(),
        }
    }

    pub fn constant_methods(&self) -> impl Iterator<Item = &ElementDescriptor> {
        self.methods.iter().filter(|method| method.is_constant())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub category: ReturnCategory,
    pub key: Option<String>,
    pub default: Option<DefaultValue>,
    pub params: usize,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, category: ReturnCategory) -> Self {
        Self {
            name: name.into(),
            category,
            key: None,
            default: None,
            params: 0,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_params(mut self, params: usize) -> Self {
        self.params = params;
        self
    }
}

/// Declaration of one interface before it is placed in an arena.
#[derive(Debug, Clone, Default)]
pub struct TypeDecl {
    pub name: String,
    pub package: Option<String>,
    pub enclosing: Option<String>,
    pub extends: Vec<String>,
    pub methods: Vec<MethodDecl>,
    pub locales: Option<Vec<String>>,
    pub localizable: bool,
    pub lookup: bool,
    pub defects: Vec<String>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn extends(mut self, supertype: impl Into<String>) -> Self {
        self.extends.push(supertype.into());
        self
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = Some(locales.into_iter().map(Into::into).collect());
        self
    }

    pub fn localizable(mut self) -> Self {
        self.localizable = true;
        self
    }

    pub fn with_lookup(mut self) -> Self {
        self.lookup = true;
        self
    }

    fn qualified_name(&self) -> String {
        qualified_name(self.package.as_deref(), self.enclosing.as_deref(), &self.name)
    }
}

/// Interface graph addressed by [`TypeId`].
#[derive(Debug, Default, Clone)]
pub struct TypeArena {
    nodes: Vec<TypeNode>,
    by_qualified_name: HashMap<String, TypeId>,
    by_simple_name: HashMap<String, Vec<TypeId>>,
}

impl TypeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places every declaration, then links `extends` names to the placed nodes.
    pub fn from_decls(decls: impl IntoIterator<Item = TypeDecl>) -> Self {
        let mut arena = Self::new();
        let mut pending = Vec::new();
        for mut decl in decls {
            let id = TypeId(arena.nodes.len() as u32);
            let qualified = decl.qualified_name();
            if arena.by_qualified_name.contains_key(&qualified) {
                warn!("type {} declared more than once, only the first declaration is used", qualified);
                decl.defects.push(format!("duplicate declaration of {}", qualified));
            } else {
                arena.by_qualified_name.insert(qualified, id);
                arena
                    .by_simple_name
                    .entry(decl.name.clone())
                    .or_default()
                    .push(id);
            }
            let methods = decl
                .methods
                .into_iter()
                .map(|method| ElementDescriptor {
                    name: method.name,
                    category: method.category,
                    key: method.key,
                    default: method.default,
                    declared_in: id,
                    params: method.params,
                })
                .collect();
            arena.nodes.push(TypeNode {
                id,
                name: decl.name,
                package: decl.package,
                enclosing: decl.enclosing,
                supertypes: Vec::new(),
                methods,
                locales: decl.locales,
                localizable: decl.localizable,
                lookup: decl.lookup,
                defects: decl.defects,
            });
            pending.push(decl.extends);
        }

        for (index, extends) in pending.into_iter().enumerate() {
            let supertypes = extends
                .into_iter()
                .map(|name| match arena.find(&name) {
                    Some(id) => TypeRef::Resolved(id),
                    None => TypeRef::Unresolved(name),
                })
                .collect();
            arena.nodes[index].supertypes = supertypes;
        }
        arena
    }

    /// Finds a type by qualified name, or by simple name when that is unambiguous.
    pub fn find(&self, name: &str) -> Option<TypeId> {
        if let Some(id) = self.by_qualified_name.get(name) {
            return Some(*id);
        }
        match self.by_simple_name.get(name).map(Vec::as_slice) {
            Some([id]) => Some(*id),
            _ => None,
        }
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeNode> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TypeNode> {
        self.nodes.iter()
    }

    /// Top-level interfaces to generate, in declaration order.
    pub fn localizable(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.nodes.iter().filter(|node| node.localizable).map(|node| node.id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Index<TypeId> for TypeArena {
    type Output = TypeNode;

    fn index(&self, id: TypeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}
