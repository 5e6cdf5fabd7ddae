//! Corpus-wide symbol table.
//!
//! Every type declared in the parsed units (plus a bundled stub of the
//! framework types client code references) is registered once, keyed by
//! namespace, name and generic arity. Partial declarations merge into one
//! symbol; each part remembers the lexical scope it was declared in so member
//! types resolve against the right using directives.
//!
//! Type names are resolved lazily, on demand, into [`TypeDescriptor`]s.
use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::error::SyntaxError;
use crate::introspect::{Accessibility, MemberKind, MemberSymbol, SpecialType, TypeIntrospection, TypeKind};
use crate::source::syntax::*;
use crate::source::{self, CompilationUnit};

static FRAMEWORK: Lazy<Result<CompilationUnit, SyntaxError>> =
    Lazy::new(|| source::parse_unit(include_str!("symbols/framework.cs")));

/// Namespaces every unit sees, as with SDK-style implicit usings.
pub const IMPLICIT_USINGS: &[&str] = &["System", "System.Collections.Generic", "System.Linq", "System.Threading.Tasks"];

const MAX_CONST_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// A resolved type. Constructed generics carry their arguments, so
/// `List<A>` and `List<B>` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Named { symbol: SymbolId, args: Vec<TypeDescriptor> },
    Array { element: Box<TypeDescriptor>, rank: usize },
    TypeParameter(String),
    /// A type that did not resolve; carries the name as written.
    Error(String),
}

impl TypeDescriptor {
    fn named(symbol: SymbolId) -> Self {
        TypeDescriptor::Named { symbol, args: Vec::new() }
    }

    /// Replaces occurrences of `params` with the matching `args`.
    pub fn substitute(&self, params: &[String], args: &[TypeDescriptor]) -> TypeDescriptor {
        match self {
            TypeDescriptor::TypeParameter(name) => params
                .iter()
                .position(|p| p == name)
                .and_then(|i| args.get(i))
                .cloned()
                .unwrap_or_else(|| self.clone()),
            TypeDescriptor::Named { symbol, args: own } => TypeDescriptor::Named {
                symbol: *symbol,
                args: own.iter().map(|a| a.substitute(params, args)).collect(),
            },
            TypeDescriptor::Array { element, rank } => TypeDescriptor::Array {
                element: Box::new(element.substitute(params, args)),
                rank: *rank,
            },
            TypeDescriptor::Error(_) => self.clone(),
        }
    }
}

/// One declaration of a (possibly partial) type.
#[derive(Debug, Clone)]
pub struct TypePart {
    pub scope: ScopeId,
    /// Index of the declaring unit; `None` for framework declarations.
    pub source: Option<usize>,
    pub bases: Vec<TypeSyntax>,
    pub parameters: Vec<Parameter>,
    /// Nested types are registered as symbols of their own and left out here.
    pub members: Vec<Member>,
}

#[derive(Debug, Clone)]
pub struct TypeSymbol {
    pub name: String,
    pub namespace: String,
    pub containing: Option<SymbolId>,
    pub kind: DeclKind,
    pub type_params: Vec<String>,
    pub parts: Vec<TypePart>,
    pub special: SpecialType,
}

impl TypeSymbol {
    pub fn is_framework(&self) -> bool {
        self.parts.iter().all(|p| p.source.is_none())
    }
}

#[derive(Debug)]
struct Scope {
    parent: Option<ScopeId>,
    namespace: String,
    usings: Vec<UsingDirective>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Key {
    Top { namespace: String, name: String, arity: usize },
    Nested { parent: SymbolId, name: String, arity: usize },
}

/// Where a name is being looked up from.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub scope: ScopeId,
    pub container: Option<SymbolId>,
    /// Method type parameters in scope, on top of the containers' own.
    pub type_params: &'a [String],
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<TypeSymbol>,
    scopes: Vec<Scope>,
    index: HashMap<Key, SymbolId>,
    global_usings: Vec<(ScopeId, UsingDirective)>,
}

// ————————————————————————————————————————————————————————————————————————————
// REGISTRATION
// ————————————————————————————————————————————————————————————————————————————

impl SymbolTable {
    /// Builds the table from the framework stub followed by `units`, whose
    /// iteration index becomes each part's `source`.
    pub fn new<'a>(units: impl IntoIterator<Item = &'a CompilationUnit>) -> Self {
        let mut table = SymbolTable::default();
        match &*FRAMEWORK {
            Ok(unit) => table.register_unit(unit, None),
            Err(error) => tracing::error!(%error, "bundled framework declarations failed to parse"),
        }
        for (i, unit) in units.into_iter().enumerate() {
            table.register_unit(unit, Some(i));
        }
        tracing::debug!(symbols = table.symbols.len(), scopes = table.scopes.len(), "symbol table built");
        table
    }

    fn register_unit(&mut self, unit: &CompilationUnit, source: Option<usize>) {
        let root = self.push_scope(None, String::new(), &unit.usings);
        self.register_items(&unit.items, root, source);
    }

    fn push_scope(&mut self, parent: Option<ScopeId>, namespace: String, usings: &[UsingDirective]) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        let (global, local): (Vec<_>, Vec<_>) = usings.iter().cloned().partition(UsingDirective::is_global);
        self.global_usings.extend(global.into_iter().map(|u| (id, u)));
        self.scopes.push(Scope { parent, namespace, usings: local });
        id
    }

    fn register_items(&mut self, items: &[Item], scope: ScopeId, source: Option<usize>) {
        for item in items {
            match item {
                Item::Namespace(ns) => {
                    let full = qualify(&self.scopes[scope.0].namespace, &ns.name);
                    let inner = self.push_scope(Some(scope), full, &ns.usings);
                    self.register_items(&ns.items, inner, source);
                }
                Item::Type(decl) => {
                    self.register_type(decl, scope, None, source);
                }
            }
        }
    }

    fn register_type(
        &mut self,
        decl: &TypeDecl,
        scope: ScopeId,
        containing: Option<SymbolId>,
        source: Option<usize>,
    ) -> SymbolId {
        let namespace = self.scopes[scope.0].namespace.clone();
        let arity = decl.type_params.len();
        let key = match containing {
            Some(parent) => Key::Nested { parent, name: decl.name.clone(), arity },
            None => Key::Top { namespace: namespace.clone(), name: decl.name.clone(), arity },
        };
        let part = TypePart {
            scope,
            source,
            bases: decl.bases.clone(),
            parameters: decl.parameters.clone(),
            members: decl.members.iter().filter(|m| !matches!(m, Member::Type(_))).cloned().collect(),
        };
        let id = match self.index.get(&key) {
            Some(&id) => {
                self.symbols[id.0].parts.push(part);
                id
            }
            None => {
                let id = SymbolId(self.symbols.len());
                let special = match (source, containing) {
                    (None, None) => special_type_for(&namespace, &decl.name, arity),
                    _ => SpecialType::None,
                };
                self.symbols.push(TypeSymbol {
                    name: decl.name.clone(),
                    namespace,
                    containing,
                    kind: decl.kind,
                    type_params: decl.type_params.clone(),
                    parts: vec![part],
                    special,
                });
                self.index.insert(key, id);
                id
            }
        };
        for member in &decl.members {
            if let Member::Type(nested) = member {
                self.register_type(nested, scope, Some(id), source);
            }
        }
        id
    }
}

fn special_type_for(namespace: &str, name: &str, arity: usize) -> SpecialType {
    match (namespace, name, arity) {
        ("System", "Object", 0) => SpecialType::Object,
        ("System", "Void", 0) => SpecialType::Void,
        ("System", "Boolean", 0) => SpecialType::Boolean,
        ("System", "Char", 0) => SpecialType::Char,
        ("System", "SByte", 0) => SpecialType::SByte,
        ("System", "Byte", 0) => SpecialType::Byte,
        ("System", "Int16", 0) => SpecialType::Int16,
        ("System", "UInt16", 0) => SpecialType::UInt16,
        ("System", "Int32", 0) => SpecialType::Int32,
        ("System", "UInt32", 0) => SpecialType::UInt32,
        ("System", "Int64", 0) => SpecialType::Int64,
        ("System", "UInt64", 0) => SpecialType::UInt64,
        ("System", "Decimal", 0) => SpecialType::Decimal,
        ("System", "Single", 0) => SpecialType::Single,
        ("System", "Double", 0) => SpecialType::Double,
        ("System", "String", 0) => SpecialType::String,
        ("System", "DateTime", 0) => SpecialType::DateTime,
        ("System", "Nullable", 1) => SpecialType::NullableT,
        ("System.Collections.Generic", "IEnumerable", 1) => SpecialType::IEnumerableT,
        _ => SpecialType::None,
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() { name.to_string() } else { format!("{namespace}.{name}") }
}

/// `A.B` yields `A.B`, `A`, and the global namespace.
fn namespace_prefixes(namespace: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut ns = namespace;
    while !ns.is_empty() {
        out.push(ns);
        ns = ns.rfind('.').map_or("", |i| &ns[..i]);
    }
    out.push("");
    out
}

// ————————————————————————————————————————————————————————————————————————————
// QUERIES
// ————————————————————————————————————————————————————————————————————————————

impl SymbolTable {
    pub fn symbol(&self, id: SymbolId) -> &TypeSymbol {
        &self.symbols[id.0]
    }

    /// Types declared in the corpus, in registration order: units in order,
    /// each in document order with nested types after their parent.
    pub fn declared_types(&self) -> impl Iterator<Item = SymbolId> + '_ {
        (0..self.symbols.len()).map(SymbolId).filter(|id| !self.symbol(*id).is_framework())
    }

    /// Looks up a top-level type by namespace-qualified name.
    pub fn find(&self, full_name: &str, arity: usize) -> Option<SymbolId> {
        let (namespace, name) = full_name.rsplit_once('.').unwrap_or(("", full_name));
        self.find_top(namespace, name, arity)
    }

    pub fn qualified_name(&self, id: SymbolId) -> String {
        let sym = self.symbol(id);
        match sym.containing {
            Some(parent) => format!("{}.{}", self.qualified_name(parent), sym.name),
            None => qualify(&sym.namespace, &sym.name),
        }
    }

    /// Context for names written inside one part of a type.
    pub fn part_context<'a>(&self, symbol: SymbolId, part: &TypePart, type_params: &'a [String]) -> Context<'a> {
        Context { scope: part.scope, container: Some(symbol), type_params }
    }

    fn find_top(&self, namespace: &str, name: &str, arity: usize) -> Option<SymbolId> {
        let key = Key::Top { namespace: namespace.to_string(), name: name.to_string(), arity };
        self.index.get(&key).copied()
    }

    fn find_nested(&self, parent: SymbolId, name: &str, arity: usize) -> Option<SymbolId> {
        let key = Key::Nested { parent, name: name.to_string(), arity };
        self.index.get(&key).copied()
    }

    /// Using directives visible from `scope`: innermost declaration first,
    /// global usings last.
    fn usings_in_scope(&self, scope: ScopeId) -> Vec<(ScopeId, &UsingDirective)> {
        let mut out = Vec::new();
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            out.extend(scope.usings.iter().map(|u| (id, u)));
            current = scope.parent;
        }
        out.extend(self.global_usings.iter().map(|(id, u)| (*id, u)));
        out
    }
}

// ————————————————————————————————————————————————————————————————————————————
// NAME RESOLUTION
// ————————————————————————————————————————————————————————————————————————————

impl SymbolTable {
    pub fn resolve(&self, syntax: &TypeSyntax, ctx: &Context<'_>) -> TypeDescriptor {
        match syntax {
            TypeSyntax::Predefined(keyword) => self.predefined(keyword),
            TypeSyntax::Named { global, segments } => self
                .resolve_named(*global, segments, ctx)
                .unwrap_or_else(|| TypeDescriptor::Error(syntax.to_string())),
            TypeSyntax::Nullable(inner) => {
                let inner = self.resolve(inner, ctx);
                let nullable = match &inner {
                    TypeDescriptor::Named { symbol, .. } if self.symbol(*symbol).kind.is_value_type() => {
                        self.find_top("System", "Nullable", 1)
                    }
                    _ => None,
                };
                match nullable {
                    Some(symbol) => TypeDescriptor::Named { symbol, args: vec![inner] },
                    None => inner,
                }
            }
            TypeSyntax::Array { element, rank } => {
                TypeDescriptor::Array { element: Box::new(self.resolve(element, ctx)), rank: *rank }
            }
            TypeSyntax::Tuple(elems) => match self.find_top("System", "ValueTuple", elems.len()) {
                Some(symbol) => TypeDescriptor::Named {
                    symbol,
                    args: elems.iter().map(|e| self.resolve(e, ctx)).collect(),
                },
                None => TypeDescriptor::Error(syntax.to_string()),
            },
            TypeSyntax::Pointer(_) => TypeDescriptor::Error(syntax.to_string()),
        }
    }

    fn predefined(&self, keyword: &str) -> TypeDescriptor {
        let name = match keyword {
            "bool" => "Boolean",
            "byte" => "Byte",
            "sbyte" => "SByte",
            "char" => "Char",
            "decimal" => "Decimal",
            "double" => "Double",
            "float" => "Single",
            "int" => "Int32",
            "uint" => "UInt32",
            "long" => "Int64",
            "ulong" => "UInt64",
            "short" => "Int16",
            "ushort" => "UInt16",
            "object" | "dynamic" => "Object",
            "string" => "String",
            "void" => "Void",
            "nint" => "IntPtr",
            "nuint" => "UIntPtr",
            _ => return TypeDescriptor::Error(keyword.to_string()),
        };
        self.find_top("System", name, 0)
            .map(TypeDescriptor::named)
            .unwrap_or_else(|| TypeDescriptor::Error(keyword.to_string()))
    }

    fn resolve_named(&self, global: bool, segments: &[NameSegment], ctx: &Context<'_>) -> Option<TypeDescriptor> {
        let args = |seg: &NameSegment| -> Vec<TypeDescriptor> { seg.args.iter().map(|a| self.resolve(a, ctx)).collect() };
        let first = segments.first()?;
        let simple = if global { None } else { self.lookup_simple(&first.name, args(first), ctx) };
        let (mut current, consumed) = match simple {
            Some(ty) => (ty, 1),
            None => self.lookup_qualified(global, segments, &args, ctx)?,
        };
        for seg in &segments[consumed..] {
            let TypeDescriptor::Named { symbol, .. } = current else {
                return None;
            };
            let nested = self.find_nested(symbol, &seg.name, seg.args.len())?;
            current = TypeDescriptor::Named { symbol: nested, args: args(seg) };
        }
        Some(current)
    }

    fn lookup_simple(&self, name: &str, args: Vec<TypeDescriptor>, ctx: &Context<'_>) -> Option<TypeDescriptor> {
        let arity = args.len();
        if arity == 0 && ctx.type_params.iter().any(|p| p == name) {
            return Some(TypeDescriptor::TypeParameter(name.to_string()));
        }

        let mut container = ctx.container;
        while let Some(id) = container {
            let sym = self.symbol(id);
            if arity == 0 && sym.type_params.iter().any(|p| p == name) {
                return Some(TypeDescriptor::TypeParameter(name.to_string()));
            }
            if let Some(symbol) = self.find_nested(id, name, arity) {
                return Some(TypeDescriptor::Named { symbol, args });
            }
            container = sym.containing;
        }

        for ns in namespace_prefixes(&self.scopes[ctx.scope.0].namespace) {
            if let Some(symbol) = self.find_top(ns, name, arity) {
                return Some(TypeDescriptor::Named { symbol, args });
            }
        }

        let usings = self.usings_in_scope(ctx.scope);
        if arity == 0 {
            for (scope, using) in &usings {
                match using {
                    UsingDirective::Alias { alias, target, .. } if alias == name => {
                        if let Some(ty) = self.resolve_alias_target(target, *scope) {
                            return Some(ty);
                        }
                    }
                    _ => {}
                }
            }
        }
        for (_, using) in &usings {
            if let UsingDirective::Namespace { name: ns, .. } = using {
                if let Some(symbol) = self.find_top(ns, name, arity) {
                    return Some(TypeDescriptor::Named { symbol, args });
                }
            }
        }
        for owner in self.static_usings(&usings) {
            if let Some(symbol) = self.find_nested(owner, name, arity) {
                return Some(TypeDescriptor::Named { symbol, args });
            }
        }
        IMPLICIT_USINGS
            .iter()
            .find_map(|ns| self.find_top(ns, name, arity))
            .map(|symbol| TypeDescriptor::Named { symbol, args })
    }

    /// Resolves `A.B.C` where some leading segments name a namespace.
    fn lookup_qualified(
        &self,
        global: bool,
        segments: &[NameSegment],
        args: &dyn Fn(&NameSegment) -> Vec<TypeDescriptor>,
        ctx: &Context<'_>,
    ) -> Option<(TypeDescriptor, usize)> {
        let bases = if global { vec![""] } else { namespace_prefixes(&self.scopes[ctx.scope.0].namespace) };
        for k in (1..segments.len()).rev() {
            let head = &segments[..k];
            if head.iter().any(|s| !s.args.is_empty()) {
                continue;
            }
            let written = head.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(".");
            let mut candidates: Vec<String> = bases.iter().map(|b| qualify(b, &written)).collect();
            if !global {
                if let Some(target) = self.namespace_alias(&head[0].name, ctx.scope) {
                    let rest = head[1..].iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(".");
                    candidates.push(if rest.is_empty() { target } else { qualify(&target, &rest) });
                }
            }
            let seg = &segments[k];
            for ns in &candidates {
                if let Some(symbol) = self.find_top(ns, &seg.name, seg.args.len()) {
                    return Some((TypeDescriptor::Named { symbol, args: args(seg) }, k + 1));
                }
            }
        }
        None
    }

    /// `using Dtos = Company.Orders.Dtos;` read as a namespace alias.
    fn namespace_alias(&self, name: &str, scope: ScopeId) -> Option<String> {
        self.usings_in_scope(scope).into_iter().find_map(|(_, using)| match using {
            UsingDirective::Alias { alias, target: TypeSyntax::Named { segments, .. }, .. }
                if alias == name && segments.iter().all(|s| s.args.is_empty()) =>
            {
                Some(segments.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join("."))
            }
            _ => None,
        })
    }

    /// Alias targets are written fully qualified, or relative to the
    /// declarations enclosing the one that holds the alias.
    fn resolve_alias_target(&self, target: &TypeSyntax, declared_in: ScopeId) -> Option<TypeDescriptor> {
        let root = Context { scope: declared_in, container: None, type_params: &[] };
        let TypeSyntax::Named { segments, .. } = target else {
            return Some(self.resolve(target, &root));
        };
        if let Some(ty) = self.resolve_named(true, segments, &root) {
            return Some(ty);
        }
        let parent = self.scopes[declared_in.0].parent?;
        self.resolve_named(false, segments, &Context { scope: parent, container: None, type_params: &[] })
    }

    fn static_usings(&self, usings: &[(ScopeId, &UsingDirective)]) -> Vec<SymbolId> {
        usings
            .iter()
            .filter_map(|(scope, using)| match using {
                UsingDirective::Static { target, .. } => match self.resolve_alias_target(target, *scope) {
                    Some(TypeDescriptor::Named { symbol, .. }) => Some(symbol),
                    _ => None,
                },
                _ => None,
            })
            .collect()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONSTANTS
// ————————————————————————————————————————————————————————————————————————————

impl SymbolTable {
    /// Evaluates a string-constant expression: literals, `const` field
    /// references, `nameof`, and `+` concatenation.
    pub fn eval_const(&self, expr: &ConstExpr, ctx: &Context<'_>) -> Option<String> {
        self.eval_const_at(expr, ctx, 0)
    }

    fn eval_const_at(&self, expr: &ConstExpr, ctx: &Context<'_>, depth: usize) -> Option<String> {
        if depth > MAX_CONST_DEPTH {
            return None;
        }
        match expr {
            ConstExpr::Str(s) => Some(s.clone()),
            ConstExpr::NameOf(path) => path.last().cloned(),
            ConstExpr::Concat(lhs, rhs) => {
                let lhs = self.eval_const_at(lhs, ctx, depth)?;
                let rhs = self.eval_const_at(rhs, ctx, depth)?;
                Some(lhs + &rhs)
            }
            ConstExpr::Name(path) => {
                let (init, owner, scope) = self.find_const(path, ctx)?;
                let field_ctx = Context { scope, container: Some(owner), type_params: &[] };
                self.eval_const_at(init, &field_ctx, depth + 1)
            }
            ConstExpr::Other => None,
        }
    }

    fn find_const(&self, path: &[String], ctx: &Context<'_>) -> Option<(&ConstExpr, SymbolId, ScopeId)> {
        let (field, owner_path) = path.split_last()?;
        let owners = if owner_path.is_empty() {
            let mut owners = Vec::new();
            let mut container = ctx.container;
            while let Some(id) = container {
                owners.push(id);
                container = self.symbol(id).containing;
            }
            owners.extend(self.static_usings(&self.usings_in_scope(ctx.scope)));
            owners
        } else {
            let segments = owner_path.iter().map(|n| NameSegment { name: n.clone(), args: Vec::new() }).collect();
            match self.resolve(&TypeSyntax::Named { global: false, segments }, ctx) {
                TypeDescriptor::Named { symbol, .. } => vec![symbol],
                _ => Vec::new(),
            }
        };
        owners.into_iter().find_map(|owner| {
            self.symbol(owner).parts.iter().find_map(|part| {
                part.members.iter().find_map(|member| match member {
                    Member::Field(f) if f.modifiers.has("const") => f
                        .declarators
                        .iter()
                        .find(|d| &d.name == field)
                        .and_then(|d| d.initializer.as_ref())
                        .map(|init| (init, owner, part.scope)),
                    _ => None,
                })
            })
        })
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTROSPECTION
// ————————————————————————————————————————————————————————————————————————————

impl SymbolTable {
    /// Base-list entries with the type's own arguments substituted.
    fn declared_bases(&self, symbol: SymbolId, args: &[TypeDescriptor]) -> Vec<TypeDescriptor> {
        let sym = self.symbol(symbol);
        let mut out = Vec::new();
        for part in &sym.parts {
            let ctx = Context { scope: part.scope, container: sym.containing, type_params: &sym.type_params };
            for base in &part.bases {
                out.push(self.resolve(base, &ctx).substitute(&sym.type_params, args));
            }
        }
        out
    }

    fn collect_interfaces(&self, ty: &TypeDescriptor, out: &mut Vec<TypeDescriptor>, seen: &mut HashSet<SymbolId>) {
        let TypeDescriptor::Named { symbol, args } = ty else {
            return;
        };
        if !seen.insert(*symbol) {
            return;
        }
        for base in self.declared_bases(*symbol, args) {
            if let TypeDescriptor::Named { symbol: b, .. } = &base {
                if self.symbol(*b).kind == DeclKind::Interface && !out.contains(&base) {
                    out.push(base.clone());
                }
            }
            self.collect_interfaces(&base, out, seen);
        }
    }
}

impl TypeIntrospection for SymbolTable {
    type Type = TypeDescriptor;

    fn special_type(&self, ty: &TypeDescriptor) -> SpecialType {
        match ty {
            TypeDescriptor::Named { symbol, args } if args.is_empty() => self.symbol(*symbol).special,
            _ => SpecialType::None,
        }
    }

    fn original_definition(&self, ty: &TypeDescriptor) -> SpecialType {
        match ty {
            TypeDescriptor::Named { symbol, .. } => self.symbol(*symbol).special,
            _ => SpecialType::None,
        }
    }

    fn type_kind(&self, ty: &TypeDescriptor) -> TypeKind {
        match ty {
            TypeDescriptor::Named { symbol, .. } => match self.symbol(*symbol).kind {
                DeclKind::Class | DeclKind::RecordClass => TypeKind::Class,
                DeclKind::Struct | DeclKind::RecordStruct => TypeKind::Struct,
                DeclKind::Interface => TypeKind::Interface,
                DeclKind::Enum => TypeKind::Enum,
            },
            TypeDescriptor::Array { .. } => TypeKind::Array,
            TypeDescriptor::TypeParameter(_) => TypeKind::TypeParameter,
            TypeDescriptor::Error(_) => TypeKind::Error,
        }
    }

    fn type_arguments(&self, ty: &TypeDescriptor) -> Vec<TypeDescriptor> {
        match ty {
            TypeDescriptor::Named { args, .. } => args.clone(),
            _ => Vec::new(),
        }
    }

    fn generic_definition(&self, ty: &TypeDescriptor) -> TypeDescriptor {
        match ty {
            TypeDescriptor::Named { symbol, .. } => TypeDescriptor::Named { symbol: *symbol, args: Vec::new() },
            _ => ty.clone(),
        }
    }

    fn element_type(&self, ty: &TypeDescriptor) -> Option<TypeDescriptor> {
        match ty {
            TypeDescriptor::Array { element, .. } => Some((**element).clone()),
            _ => None,
        }
    }

    fn all_interfaces(&self, ty: &TypeDescriptor) -> Vec<TypeDescriptor> {
        match ty {
            TypeDescriptor::Named { .. } => {
                let mut out = Vec::new();
                self.collect_interfaces(ty, &mut out, &mut HashSet::new());
                out
            }
            TypeDescriptor::Array { element, .. } => self
                .find("System.Collections.Generic.IEnumerable", 1)
                .map(|symbol| TypeDescriptor::Named { symbol, args: vec![(**element).clone()] })
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }

    fn base_type(&self, ty: &TypeDescriptor) -> Option<TypeDescriptor> {
        let TypeDescriptor::Named { symbol, args } = ty else {
            return None;
        };
        if !matches!(self.symbol(*symbol).kind, DeclKind::Class | DeclKind::RecordClass) {
            return None;
        }
        self.declared_bases(*symbol, args).into_iter().find(|base| match base {
            TypeDescriptor::Named { symbol, .. } => {
                matches!(self.symbol(*symbol).kind, DeclKind::Class | DeclKind::RecordClass)
            }
            _ => false,
        })
    }

    fn declared_members(&self, ty: &TypeDescriptor) -> Vec<MemberSymbol<TypeDescriptor>> {
        let TypeDescriptor::Named { symbol, args } = ty else {
            return Vec::new();
        };
        let sym = self.symbol(*symbol);
        let default_access = match sym.kind {
            DeclKind::Interface => Accessibility::Public,
            _ => Accessibility::Private,
        };
        let is_record = matches!(sym.kind, DeclKind::RecordClass | DeclKind::RecordStruct);
        let mut out = Vec::new();
        for part in &sym.parts {
            let ctx = self.part_context(*symbol, part, &[]);
            let resolve = |syntax: &TypeSyntax| self.resolve(syntax, &ctx).substitute(&sym.type_params, args);
            if is_record {
                out.extend(part.parameters.iter().map(|p| MemberSymbol {
                    name: p.name.clone(),
                    ty: resolve(&p.ty),
                    kind: MemberKind::Property { readable: true },
                    accessibility: Accessibility::Public,
                    is_static: false,
                }));
            }
            for member in &part.members {
                match member {
                    Member::Property(p) if p.explicit_interface.is_none() => out.push(MemberSymbol {
                        name: p.name.clone(),
                        ty: resolve(&p.ty),
                        kind: MemberKind::Property {
                            readable: p.getter.as_ref().is_some_and(|g| g.modifiers.accessibility().is_none()),
                        },
                        accessibility: p.modifiers.accessibility().unwrap_or(default_access),
                        is_static: p.modifiers.is_static(),
                    }),
                    Member::Field(f) => {
                        let ty = resolve(&f.ty);
                        out.extend(f.declarators.iter().map(|d| MemberSymbol {
                            name: d.name.clone(),
                            ty: ty.clone(),
                            kind: MemberKind::Field { constant: f.modifiers.has("const") },
                            accessibility: f.modifiers.accessibility().unwrap_or(default_access),
                            is_static: f.modifiers.is_static(),
                        }));
                    }
                    _ => {}
                }
            }
        }
        out
    }

    fn full_name(&self, ty: &TypeDescriptor) -> String {
        match ty {
            TypeDescriptor::Named { symbol, .. } => self.qualified_name(*symbol),
            TypeDescriptor::Array { element, rank } => {
                format!("{}[{}]", self.full_name(element), ",".repeat(rank.saturating_sub(1)))
            }
            TypeDescriptor::TypeParameter(name) | TypeDescriptor::Error(name) => name.clone(),
        }
    }

    fn name(&self, ty: &TypeDescriptor) -> String {
        match ty {
            TypeDescriptor::Named { symbol, .. } => self.symbol(*symbol).name.clone(),
            TypeDescriptor::Array { element, rank } => {
                format!("{}[{}]", self.name(element), ",".repeat(rank.saturating_sub(1)))
            }
            TypeDescriptor::TypeParameter(name) | TypeDescriptor::Error(name) => name.clone(),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    fn table(sources: &[&str]) -> (SymbolTable, Vec<CompilationUnit>) {
        let units: Vec<CompilationUnit> = sources.iter().map(|s| source::parse_unit(s).unwrap()).collect();
        (SymbolTable::new(&units), units)
    }

    fn member_type(table: &SymbolTable, owner: &str, member: &str) -> TypeDescriptor {
        let id = table.find(owner, 0).expect("owner type");
        table
            .declared_members(&TypeDescriptor::named(id))
            .into_iter()
            .find(|m| m.name == member)
            .map(|m| m.ty)
            .expect("member")
    }

    #[test]
    fn framework_stub_parses() {
        assert!(FRAMEWORK.is_ok(), "{:?}", FRAMEWORK.as_ref().err());
        let (table, _) = table(&[]);
        assert!(table.find("System.Guid", 0).is_some());
        assert!(table.find("System.Collections.Generic.List", 1).is_some());
        assert_eq!(table.declared_types().count(), 0);
    }

    #[test]
    fn resolves_through_usings_namespaces_and_aliases() {
        let (table, _) = table(&[
            "namespace Acme.Orders.Dtos { public class OrderDto { } public class Outer { public class Inner { } } }",
            r#"
            using Acme.Orders.Dtos;
            using Dto = Acme.Orders.Dtos.OrderDto;
            using Ns = Acme.Orders.Dtos;
            namespace Acme.Orders.Client
            {
                public class Holder
                {
                    public OrderDto A { get; set; }
                    public Dto B { get; set; }
                    public Ns.OrderDto C { get; set; }
                    public Dtos.Outer.Inner D { get; set; }
                    public Guid E { get; set; }
                    public Missing F { get; set; }
                }
            }
            "#,
        ]);
        let dto = TypeDescriptor::named(table.find("Acme.Orders.Dtos.OrderDto", 0).unwrap());
        assert_eq!(member_type(&table, "Acme.Orders.Client.Holder", "A"), dto);
        assert_eq!(member_type(&table, "Acme.Orders.Client.Holder", "B"), dto);
        assert_eq!(member_type(&table, "Acme.Orders.Client.Holder", "C"), dto);
        let inner = member_type(&table, "Acme.Orders.Client.Holder", "D");
        assert_eq!(table.full_name(&inner), "Acme.Orders.Dtos.Outer.Inner");
        let guid = member_type(&table, "Acme.Orders.Client.Holder", "E");
        assert_eq!(table.full_name(&guid), "System.Guid");
        assert_eq!(
            member_type(&table, "Acme.Orders.Client.Holder", "F"),
            TypeDescriptor::Error("Missing".into())
        );
    }

    #[test]
    fn nullable_wraps_value_types_only() {
        let (table, _) = table(&["class C { public int? A; public string? B; public Kind? K; } enum Kind { X }"]);
        let a = member_type(&table, "C", "A");
        assert_eq!(table.original_definition(&a), SpecialType::NullableT);
        assert_eq!(table.special_type(&a), SpecialType::None);
        assert_eq!(table.type_arguments(&a).len(), 1);
        let b = member_type(&table, "C", "B");
        assert_eq!(table.special_type(&b), SpecialType::String);
        let k = member_type(&table, "C", "K");
        assert_eq!(table.original_definition(&k), SpecialType::NullableT);
    }

    #[test]
    fn substitutes_generic_arguments_and_walks_interfaces() {
        let (table, _) = table(&[
            "public class Page<T> { public List<T> Items { get; } public T First { get; } } public class Order { } public class Holder { public Page<Order> P { get; } }",
        ]);
        let page = member_type(&table, "Holder", "P");
        let members = table.declared_members(&page);
        let order = TypeDescriptor::named(table.find("Order", 0).unwrap());
        assert_eq!(members[1].ty, order);
        let items = &members[0].ty;
        assert_eq!(table.type_arguments(items), vec![order.clone()]);
        let interfaces = table.all_interfaces(items);
        assert!(interfaces.iter().any(|i| table.original_definition(i) == SpecialType::IEnumerableT
            && table.type_arguments(i) == vec![order.clone()]));
    }

    #[test]
    fn merges_partial_declarations_and_finds_base_class() {
        let (table, _) = table(&[
            "namespace N { public partial class A : Base, IDisposable { public int X { get; } } public class Base { } }",
            "namespace N { public partial class A { public int Y { get; } } }",
        ]);
        let a = table.find("N.A", 0).unwrap();
        assert_eq!(table.symbol(a).parts.len(), 2);
        let a = TypeDescriptor::named(a);
        assert_eq!(table.declared_members(&a).len(), 2);
        let base = table.base_type(&a).unwrap();
        assert_eq!(table.full_name(&base), "N.Base");
        assert_eq!(table.declared_types().count(), 2);
    }

    #[test]
    fn evaluates_constant_route_expressions() {
        let (table, units) = table(&[
            r#"
            namespace N
            {
                public static class Routes
                {
                    public const string Base = "/bifrost/" + Service;
                    private const string Service = "orders";
                }
                public interface IOrders
                {
                    [BifrostPath(Routes.Base + "/" + nameof(Get))] void Get();
                }
            }
            "#,
        ]);
        let iface = table.find("N.IOrders", 0).unwrap();
        let part = &table.symbol(iface).parts[0];
        let ctx = table.part_context(iface, part, &[]);
        let Member::Method(m) = &part.members[0] else { panic!() };
        assert_eq!(table.eval_const(&m.attributes[0].args[0].value, &ctx).as_deref(), Some("/bifrost/orders/Get"));
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn self_referential_constants_give_up() {
        let (table, _) = table(&["class C { const string A = B; const string B = A; }"]);
        let c = table.find("C", 0).unwrap();
        let ctx = table.part_context(c, &table.symbol(c).parts[0], &[]);
        assert_eq!(table.eval_const(&ConstExpr::Name(vec!["A".into()]), &ctx), None);
    }
}
