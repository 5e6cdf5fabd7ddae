//! The type-introspection capability the sample synthesizer runs against.
//!
//! The synthesizer never looks at syntax. It asks these questions of an
//! opaque type handle, and [`crate::symbols::SymbolTable`] answers them for
//! the parsed corpus.
use std::fmt::Debug;
use std::hash::Hash;

pub use crate::source::syntax::Accessibility;

/// Built-in type tags, keyed off the framework declaration a type comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpecialType {
    #[default]
    None,
    Object,
    Void,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Decimal,
    Single,
    Double,
    String,
    DateTime,
    /// `System.Nullable<T>`
    NullableT,
    /// `System.Collections.Generic.IEnumerable<T>`
    IEnumerableT,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Array,
    TypeParameter,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// `readable` is false for write-only properties and for getters with a
    /// narrower accessibility than the property.
    Property { readable: bool },
    Field { constant: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSymbol<T> {
    pub name: String,
    pub ty: T,
    pub kind: MemberKind,
    pub accessibility: Accessibility,
    pub is_static: bool,
}

pub trait TypeIntrospection {
    /// Identity-comparable type handle. Constructed generics compare by
    /// definition and type arguments.
    type Type: Clone + Eq + Hash + Debug;

    /// Tag of the type itself. Constructed generics have none.
    fn special_type(&self, ty: &Self::Type) -> SpecialType;

    /// Tag of the generic definition the type is constructed from.
    fn original_definition(&self, ty: &Self::Type) -> SpecialType;

    fn type_kind(&self, ty: &Self::Type) -> TypeKind;

    fn type_arguments(&self, ty: &Self::Type) -> Vec<Self::Type>;

    /// The generic definition a constructed type comes from, e.g. `Node<>`
    /// for `Node<int>`. Non-generic types are their own definition.
    fn generic_definition(&self, ty: &Self::Type) -> Self::Type;

    /// Element type of an array.
    fn element_type(&self, ty: &Self::Type) -> Option<Self::Type>;

    /// Every interface the type implements, directly or through its bases
    /// and other interfaces.
    fn all_interfaces(&self, ty: &Self::Type) -> Vec<Self::Type>;

    fn base_type(&self, ty: &Self::Type) -> Option<Self::Type>;

    /// Members declared on the type itself, in declaration order, with type
    /// arguments substituted.
    fn declared_members(&self, ty: &Self::Type) -> Vec<MemberSymbol<Self::Type>>;

    /// Namespace-qualified name without type arguments, e.g. `System.Guid`.
    fn full_name(&self, ty: &Self::Type) -> String;

    /// Simple name without namespace or type arguments, e.g. `Node`.
    fn name(&self, ty: &Self::Type) -> String;
}
