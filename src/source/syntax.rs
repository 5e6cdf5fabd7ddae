//! Declaration-level syntax tree. Bodies and initializers are not kept,
//! except constant expressions (attribute arguments, `const` initializers).
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilationUnit {
    pub usings: Vec<UsingDirective>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub name: String,
    pub usings: Vec<UsingDirective>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UsingDirective {
    Namespace { name: String, global: bool },
    Alias { alias: String, target: TypeSyntax, global: bool },
    /// `using static X;` brings members, not types, into scope.
    Static { target: TypeSyntax, global: bool },
}

impl UsingDirective {
    pub fn is_global(&self) -> bool {
        match self {
            UsingDirective::Namespace { global, .. }
            | UsingDirective::Alias { global, .. }
            | UsingDirective::Static { global, .. } => *global,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Class,
    Struct,
    Interface,
    Enum,
    RecordClass,
    RecordStruct,
}

impl DeclKind {
    pub fn is_value_type(self) -> bool {
        matches!(self, DeclKind::Struct | DeclKind::Enum | DeclKind::RecordStruct)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub kind: DeclKind,
    pub name: String,
    pub type_params: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub modifiers: Modifiers,
    /// Positional record parameters (or a class/struct primary constructor).
    pub parameters: Vec<Parameter>,
    pub bases: Vec<TypeSyntax>,
    pub members: Vec<Member>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Method(MethodDecl),
    Property(PropertyDecl),
    Field(FieldDecl),
    Type(TypeDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub type_params: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub modifiers: Modifiers,
    pub return_type: TypeSyntax,
    pub parameters: Vec<Parameter>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeSyntax,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub name: String,
    pub ty: TypeSyntax,
    pub modifiers: Modifiers,
    pub attributes: Vec<Attribute>,
    pub getter: Option<Accessor>,
    pub setter: Option<Accessor>,
    /// `int IFoo.Bar { get; }`
    pub explicit_interface: Option<TypeSyntax>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub ty: TypeSyntax,
    pub modifiers: Modifiers,
    pub declarators: Vec<Declarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: String,
    pub initializer: Option<ConstExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub args: Vec<AttributeArg>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeArg {
    pub name: Option<String>,
    pub value: ConstExpr,
}

/// The slice of expression syntax that can evaluate to a string constant.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstExpr {
    Str(String),
    Name(Vec<String>),
    NameOf(Vec<String>),
    Concat(Box<ConstExpr>, Box<ConstExpr>),
    Other,
}

// ------------------------------ Modifiers --------------------------------- //

pub const MODIFIER_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "internal", "static", "readonly", "const", "abstract",
    "virtual", "override", "sealed", "new", "partial", "async", "extern", "unsafe", "volatile",
    "required", "file", "ref", "fixed",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessibility {
    Public,
    ProtectedInternal,
    Internal,
    Protected,
    PrivateProtected,
    Private,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modifiers(pub Vec<String>);

impl Modifiers {
    pub fn has(&self, keyword: &str) -> bool {
        self.0.iter().any(|m| m == keyword)
    }

    /// Declared accessibility, if any keyword spells one.
    pub fn accessibility(&self) -> Option<Accessibility> {
        let (public, private, protected, internal) = (
            self.has("public"),
            self.has("private"),
            self.has("protected"),
            self.has("internal"),
        );
        match (public, private, protected, internal) {
            (true, ..) => Some(Accessibility::Public),
            (_, true, true, _) => Some(Accessibility::PrivateProtected),
            (_, true, ..) => Some(Accessibility::Private),
            (_, _, true, true) => Some(Accessibility::ProtectedInternal),
            (_, _, true, _) => Some(Accessibility::Protected),
            (_, _, _, true) => Some(Accessibility::Internal),
            _ => None,
        }
    }

    /// `const` members are implicitly static.
    pub fn is_static(&self) -> bool {
        self.has("static") || self.has("const")
    }
}

// ------------------------------ Type syntax ------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSyntax {
    Predefined(String),
    Named { global: bool, segments: Vec<NameSegment> },
    Nullable(Box<TypeSyntax>),
    Array { element: Box<TypeSyntax>, rank: usize },
    Tuple(Vec<TypeSyntax>),
    Pointer(Box<TypeSyntax>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameSegment {
    pub name: String,
    pub args: Vec<TypeSyntax>,
}

pub const PREDEFINED_TYPES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "long", "ulong",
    "short", "ushort", "object", "string", "void", "dynamic", "nint", "nuint",
];

impl TypeSyntax {
    pub fn simple(name: &str) -> Self {
        TypeSyntax::Named {
            global: false,
            segments: vec![NameSegment { name: name.to_string(), args: Vec::new() }],
        }
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSyntax::Predefined(k) => f.write_str(k),
            TypeSyntax::Named { global, segments } => {
                if *global {
                    f.write_str("global::")?;
                }
                for (i, seg) in segments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(&seg.name)?;
                    if !seg.args.is_empty() {
                        f.write_str("<")?;
                        write_list(f, &seg.args)?;
                        f.write_str(">")?;
                    }
                }
                Ok(())
            }
            TypeSyntax::Nullable(inner) => write!(f, "{inner}?"),
            TypeSyntax::Array { element, rank } => {
                write!(f, "{element}[{}]", ",".repeat(rank.saturating_sub(1)))
            }
            TypeSyntax::Tuple(elems) => {
                f.write_str("(")?;
                write_list(f, elems)?;
                f.write_str(")")
            }
            TypeSyntax::Pointer(inner) => write!(f, "{inner}*"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeSyntax]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
