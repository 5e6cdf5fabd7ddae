//! Decides which of the five shapes a type takes.
use crate::introspect::{SpecialType, TypeIntrospection, TypeKind};

use super::value::{SAMPLE_DATE, SampleValue};

const UUID_TYPE: &str = "System.Guid";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape<T> {
    Primitive(Primitive),
    Nullable(T),
    Collection(T),
    Enum,
    Composite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Text,
    Int32,
    Int64,
    Boolean,
    DateTime,
    Double,
    Single,
    Decimal,
    Char,
    Uuid,
}

impl Primitive {
    pub fn sample(self) -> SampleValue {
        match self {
            Primitive::Text => SampleValue::String(String::new()),
            Primitive::Int32 | Primitive::Int64 => SampleValue::Integer(1),
            Primitive::Boolean => SampleValue::Boolean(false),
            Primitive::DateTime => SampleValue::String(SAMPLE_DATE.to_string()),
            Primitive::Double | Primitive::Single | Primitive::Decimal => SampleValue::Float(1.0),
            Primitive::Char => SampleValue::String("A".to_string()),
            Primitive::Uuid => SampleValue::String("sample".to_string()),
        }
    }
}

/// Nullable is tested first; the caller unwraps and classifies again.
pub fn classify<I: TypeIntrospection>(intro: &I, ty: &I::Type) -> Shape<I::Type> {
    if intro.original_definition(ty) == SpecialType::NullableT {
        if let [inner] = intro.type_arguments(ty).as_slice() {
            return Shape::Nullable(inner.clone());
        }
    }
    if let Some(primitive) = primitive(intro, ty) {
        return Shape::Primitive(primitive);
    }
    if intro.type_kind(ty) == TypeKind::Enum {
        return Shape::Enum;
    }
    match collection_element(intro, ty) {
        Some(element) => Shape::Collection(element),
        None => Shape::Composite,
    }
}

fn primitive<I: TypeIntrospection>(intro: &I, ty: &I::Type) -> Option<Primitive> {
    let primitive = match intro.special_type(ty) {
        SpecialType::String => Primitive::Text,
        SpecialType::Int32 => Primitive::Int32,
        SpecialType::Int64 => Primitive::Int64,
        SpecialType::Boolean => Primitive::Boolean,
        SpecialType::DateTime => Primitive::DateTime,
        SpecialType::Double => Primitive::Double,
        SpecialType::Single => Primitive::Single,
        SpecialType::Decimal => Primitive::Decimal,
        SpecialType::Char => Primitive::Char,
        _ => return (intro.full_name(ty) == UUID_TYPE).then_some(Primitive::Uuid),
    };
    Some(primitive)
}

/// Arrays give their element. Other types qualify by implementing
/// `IEnumerable<T>` and give their own first type argument, falling back to
/// the `T` of the implemented interface.
fn collection_element<I: TypeIntrospection>(intro: &I, ty: &I::Type) -> Option<I::Type> {
    if let Some(element) = intro.element_type(ty) {
        return Some(element);
    }
    let is_enumerable = |t: &I::Type| intro.original_definition(t) == SpecialType::IEnumerableT;
    let implemented = if is_enumerable(ty) {
        ty.clone()
    } else {
        intro.all_interfaces(ty).into_iter().find(|i| is_enumerable(i))?
    };
    intro
        .type_arguments(ty)
        .into_iter()
        .next()
        .or_else(|| intro.type_arguments(&implemented).into_iter().next())
}
