//! Type-driven sample synthesis.
//!
//! A declared type is walked structurally: nullable wrappers are peeled,
//! primitives and enums become canonical scalars, collections become a
//! one-element list, and composite types expand into a member map. The walk
//! keeps the path of composites currently being expanded; meeting one of them
//! again yields a circular-reference marker instead of recursing. Siblings that
//! share a type are both expanded in full, since only the active path counts.
pub mod classify;
pub mod members;
pub mod value;

use indexmap::IndexMap;

use crate::introspect::TypeIntrospection;

/// Composite nesting beyond this is cut with a circular marker.
pub const MAX_DEPTH: usize = 64;

pub use classify::{Primitive, Shape, classify};
pub use members::{MemberDescriptor, resolve_members};
pub use value::{SAMPLE_DATE, SampleValue};

/// One synthesis run. The visited path starts empty and is popped back to
/// empty by the time [`Synthesizer::synthesize`] returns.
pub struct Synthesizer<'a, I: TypeIntrospection> {
    intro: &'a I,
    path: Vec<I::Type>,
}

impl<'a, I: TypeIntrospection> Synthesizer<'a, I> {
    pub fn new(intro: &'a I) -> Self {
        Synthesizer { intro, path: Vec::new() }
    }

    /// An absent type gives an absent sample.
    pub fn synthesize(&mut self, ty: Option<&I::Type>) -> Option<SampleValue> {
        ty.map(|ty| self.value(ty))
    }

    fn value(&mut self, ty: &I::Type) -> SampleValue {
        let mut ty = ty.clone();
        loop {
            match classify(self.intro, &ty) {
                Shape::Nullable(inner) => ty = inner,
                Shape::Primitive(primitive) => return primitive.sample(),
                Shape::Enum => return SampleValue::Integer(0),
                Shape::Collection(element) => return SampleValue::List(Box::new(self.value(&element))),
                Shape::Composite => break,
            }
        }

        if self.path.contains(&ty) {
            tracing::trace!(ty = ?ty, "circular reference");
            return SampleValue::Circular(self.intro.name(&ty));
        }
        if self.is_expanding(&ty) {
            tracing::debug!(ty = ?ty, "expanding generic reference");
            return SampleValue::Circular(self.intro.name(&ty));
        }
        if self.path.len() >= MAX_DEPTH {
            tracing::warn!(ty = ?ty, depth = self.path.len(), "type graph too deep; cutting expansion");
            return SampleValue::Circular(self.intro.name(&ty));
        }

        self.path.push(ty.clone());
        let mut fields = IndexMap::new();
        for member in resolve_members(self.intro, &ty) {
            let value = self.value(&member.ty);
            fields.insert(member.name, value);
        }
        self.path.pop();
        SampleValue::Object(fields)
    }
}

impl<I: TypeIntrospection> Synthesizer<'_, I> {
    /// True when an ancestor on the path is built from the same generic
    /// definition and `ty`'s arguments strictly wrap that ancestor's, as
    /// `Node<List<int>>` wraps `Node<int>`. Such a chain never repeats an
    /// identity, so the plain path check cannot end it.
    fn is_expanding(&self, ty: &I::Type) -> bool {
        let args = self.intro.type_arguments(ty);
        if args.is_empty() {
            return false;
        }
        let definition = self.intro.generic_definition(ty);
        self.path
            .iter()
            .filter(|ancestor| self.intro.generic_definition(ancestor) == definition)
            .any(|ancestor| {
                let earlier = self.intro.type_arguments(ancestor);
                earlier.len() == args.len()
                    && args
                        .iter()
                        .zip(&earlier)
                        .any(|(arg, earlier)| arg != earlier && self.mentions(arg, earlier))
            })
    }

    fn mentions(&self, haystack: &I::Type, needle: &I::Type) -> bool {
        haystack == needle
            || self.intro.type_arguments(haystack).iter().any(|t| self.mentions(t, needle))
            || self.intro.element_type(haystack).is_some_and(|t| self.mentions(&t, needle))
    }
}

pub fn synthesize<I: TypeIntrospection>(intro: &I, ty: Option<&I::Type>) -> Option<SampleValue> {
    Synthesizer::new(intro).synthesize(ty)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_unit;
    use crate::symbols::{SymbolTable, TypeDescriptor};
    use serde_json::{Value, json};

    fn sample_of(src: &str, type_name: &str) -> Value {
        let unit = parse_unit(src).unwrap();
        let table = SymbolTable::new([&unit]);
        let (name, arity) = match type_name.split_once('`') {
            Some((name, arity)) => (name, arity.parse().unwrap()),
            None => (type_name, 0),
        };
        let symbol = table.find(name, arity).expect("type under test");
        let ty = TypeDescriptor::Named { symbol, args: Vec::new() };
        synthesize(&table, Some(&ty)).unwrap().to_json()
    }

    /// Sample of the type of `Holder.Value`, for constructed types.
    fn sample_of_member(src: &str) -> Value {
        sample_of(src, "Holder")["Value"].clone()
    }

    #[test]
    fn primitives_take_canonical_values() {
        let sample = sample_of(
            r#"
            public enum Status { Pending = 3, Shipped }
            public class Request
            {
                public string Text { get; set; }
                public int Count { get; set; }
                public long Big { get; set; }
                public bool Flag { get; set; }
                public DateTime At { get; set; }
                public double D { get; set; }
                public float F { get; set; }
                public decimal M { get; set; }
                public char C { get; set; }
                public Guid Id { get; set; }
                public Status Status { get; set; }
                public byte Raw { get; set; }
            }
            "#,
            "Request",
        );
        assert_eq!(
            sample,
            json!({
                "Text": "", "Count": 1, "Big": 1, "Flag": false, "At": SAMPLE_DATE,
                "D": 1.0, "F": 1.0, "M": 1.0, "C": "A", "Id": "sample", "Status": 0, "Raw": {}
            })
        );
    }

    #[test]
    fn nullable_wrappers_are_transparent() {
        let sample = sample_of(
            "class R { public int? A { get; set; } public DateTime? B { get; set; } public string? C { get; set; } public Nullable<bool> D { get; set; } }",
            "R",
        );
        assert_eq!(sample, json!({"A": 1, "B": SAMPLE_DATE, "C": "", "D": false}));
    }

    #[test]
    fn collections_hold_one_element() {
        let src = r#"
            public class Order { public int Id { get; set; } }
            public class OrderList : List<Order> { }
            public class R
            {
                public string[] Names { get; set; }
                public IEnumerable<int> Ids { get; set; }
                public IReadOnlyList<Order> Orders { get; set; }
                public Dictionary<string, Order> ByKey { get; set; }
                public OrderList Custom { get; set; }
                public int[,] Grid { get; set; }
                public List<List<bool>> Nested { get; set; }
            }
        "#;
        assert_eq!(
            sample_of(src, "R"),
            json!({
                "Names": [""],
                "Ids": [1],
                "Orders": [{"Id": 1}],
                "ByKey": [""],
                "Custom": [{"Id": 1}],
                "Grid": [1],
                "Nested": [[false]]
            })
        );
    }

    #[test]
    fn list_of_string_is_single_empty_string() {
        assert_eq!(sample_of_member("class Holder { public List<string> Value; }"), json!([""]));
    }

    #[test]
    fn self_reference_becomes_marker() {
        let sample = sample_of("public class Node { public Node Next { get; set; } public List<Node> Children { get; set; } }", "Node");
        assert_eq!(
            sample,
            json!({"Next": "!!CircularReference Node!!>", "Children": ["!!CircularReference Node!!>"]})
        );
    }

    #[test]
    fn mutual_recursion_cuts_at_the_ancestor() {
        let sample = sample_of("class A { public B B { get; set; } } class B { public A A { get; set; } }", "A");
        assert_eq!(sample, json!({"B": {"A": "!!CircularReference A!!>"}}));
    }

    #[test]
    fn siblings_of_the_same_type_both_expand() {
        let sample = sample_of(
            "class Point { public int X; public int Y; } class Line { public Point From { get; set; } public Point To { get; set; } }",
            "Line",
        );
        assert_eq!(sample, json!({"From": {"X": 1, "Y": 1}, "To": {"X": 1, "Y": 1}}));
    }

    #[test]
    fn derived_members_shadow_in_place() {
        let sample = sample_of(
            r#"
            public class Base { public string Name { get; set; } public int Id { get; set; } }
            public class Derived : Base { public new int Name { get; set; } public string Extra { get; set; } }
            "#,
            "Derived",
        );
        assert_eq!(serde_json::to_string(&sample).unwrap(), r#"{"Name":1,"Id":1,"Extra":""}"#);
    }

    #[test]
    fn generic_base_members_come_first_with_arguments_substituted() {
        let sample = sample_of(
            r#"
            public class Line { public int Qty { get; set; } }
            public class Base<T> { public T Item { get; set; } public string Note { get; set; } }
            public class Req : Base<Line> { public bool Urgent { get; set; } }
            "#,
            "Req",
        );
        assert_eq!(serde_json::to_string(&sample).unwrap(), r#"{"Item":{"Qty":1},"Note":"","Urgent":false}"#);
    }

    #[test]
    fn expanding_generics_are_cut() {
        let sample = sample_of(
            r#"
            public class Node<T> { public Node<List<T>> Next { get; set; } public T Value { get; set; } }
            public class Req { public Node<int> Root { get; set; } }
            "#,
            "Req",
        );
        assert_eq!(sample, json!({"Root": {"Next": "!!CircularReference Node!!>", "Value": 1}}));

        let sample = sample_of(
            r#"
            public class Chain<T> { public Chain<T[]> Deeper { get; set; } public Chain<T> Same { get; set; } }
            public class Req { public Chain<string> Start { get; set; } }
            "#,
            "Req",
        );
        assert_eq!(
            sample,
            json!({"Start": {"Deeper": "!!CircularReference Chain!!>", "Same": "!!CircularReference Chain!!>"}})
        );
    }

    #[test]
    fn differently_constructed_generics_still_expand() {
        let sample = sample_of(
            r#"
            public class Pair<T> { public T Left { get; set; } public Pair<string> Other { get; set; } }
            public class Req { public Pair<int> P { get; set; } }
            "#,
            "Req",
        );
        assert_eq!(
            sample,
            json!({"P": {"Left": 1, "Other": {"Left": "", "Other": "!!CircularReference Pair!!>"}}})
        );
    }

    #[test]
    fn only_public_readable_instance_members_count() {
        let sample = sample_of(
            r#"
            public class R
            {
                public string Visible { get; set; }
                public string Field;
                private string Hidden { get; set; }
                string DefaultPrivate { get; set; }
                protected string Prot { get; set; }
                internal string Internal { get; set; }
                public static string Shared { get; set; }
                public const string Constant = "x";
                public static readonly string ReadOnlyShared = "x";
                public string WriteOnly { set { } }
                public string PrivateGet { private get; set; }
                public string Computed => Visible;
                public int Init { get; init; }
            }
            "#,
            "R",
        );
        assert_eq!(sample, json!({"Visible": "", "Field": "", "Computed": "", "Init": 1}));
    }

    #[test]
    fn interface_and_record_members() {
        let sample = sample_of(
            "public interface IShape { string Name { get; } } public record Circle(double Radius, IShape Shape) { public string Label { get; init; } }",
            "Circle",
        );
        assert_eq!(sample, json!({"Radius": 1.0, "Shape": {"Name": ""}, "Label": ""}));
    }

    #[test]
    fn generic_members_are_substituted() {
        let sample = sample_of_member(
            "public class Page<T> { public List<T> Items { get; set; } public int Total { get; set; } } public class Order { public int Id; } public class Holder { public Page<Order> Value; }",
        );
        assert_eq!(sample, json!({"Items": [{"Id": 1}], "Total": 1}));
    }

    #[test]
    fn unresolved_types_are_empty_objects() {
        let sample = sample_of_member("class Holder { public Unknown.Thing Value; }");
        assert_eq!(sample, json!({}));
    }

    #[test]
    fn absent_type_gives_absent_sample() {
        let table = SymbolTable::new([]);
        assert_eq!(synthesize(&table, None), None);
    }
}
