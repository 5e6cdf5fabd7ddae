//! Visible instance members across an inheritance chain.
use indexmap::IndexMap;

use crate::introspect::{Accessibility, MemberKind, MemberSymbol, TypeIntrospection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor<T> {
    pub name: String,
    pub ty: T,
}

/// Base-most type first. A member redeclared further down keeps its
/// original position and takes the derived type.
pub fn resolve_members<I: TypeIntrospection>(intro: &I, ty: &I::Type) -> Vec<MemberDescriptor<I::Type>> {
    let mut chain = vec![ty.clone()];
    while let Some(base) = chain.last().and_then(|t| intro.base_type(t)) {
        if chain.contains(&base) {
            break;
        }
        chain.push(base);
    }

    let mut members: IndexMap<String, I::Type> = IndexMap::new();
    for ancestor in chain.iter().rev() {
        for member in intro.declared_members(ancestor) {
            if is_visible(&member) {
                members.insert(member.name, member.ty);
            }
        }
    }
    members.into_iter().map(|(name, ty)| MemberDescriptor { name, ty }).collect()
}

fn is_visible<T>(member: &MemberSymbol<T>) -> bool {
    let readable = match member.kind {
        MemberKind::Property { readable } => readable,
        MemberKind::Field { constant } => !constant,
    };
    readable && member.accessibility == Accessibility::Public && !member.is_static
}
