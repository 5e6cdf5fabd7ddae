//! Locates route-marked operations.
use std::path::PathBuf;

use crate::corpus::Corpus;
use crate::source::syntax::{Attribute, DeclKind, Member, MethodDecl};
use crate::symbols::{Context, SymbolTable, TypeDescriptor};

pub const DEFAULT_ROUTE_MARKER: &str = "BifrostPath";

/// One annotated operation.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRecord {
    /// Simple name of the declaring type.
    pub group: String,
    pub method: String,
    pub route: String,
    /// First parameter's type; absent when there is none or it does not resolve.
    pub parameter: Option<TypeDescriptor>,
    pub source: PathBuf,
}

/// Walks every class, struct, record and interface in the corpus, in
/// document order, and records each directly declared method whose attribute
/// name contains `marker` and whose first attribute argument is a non-empty
/// string constant.
pub fn extract(corpus: &Corpus, table: &SymbolTable, marker: &str) -> Vec<EndpointRecord> {
    let mut records = Vec::new();
    for id in table.declared_types() {
        let symbol = table.symbol(id);
        if symbol.kind == DeclKind::Enum {
            continue;
        }
        for part in &symbol.parts {
            let source = part
                .source
                .and_then(|i| corpus.path_of(i))
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            for member in &part.members {
                let Member::Method(method) = member else {
                    continue;
                };
                let Some(attribute) = method.attributes.iter().find(|a| a.name.contains(marker)) else {
                    continue;
                };
                let ctx = table.part_context(id, part, &method.type_params);
                let Some(route) = route_of(table, attribute, &ctx) else {
                    tracing::debug!(
                        group = %symbol.name,
                        method = %method.name,
                        line = method.line,
                        "route attribute has no usable path; skipping"
                    );
                    continue;
                };
                records.push(EndpointRecord {
                    group: symbol.name.clone(),
                    method: method.name.clone(),
                    route,
                    parameter: parameter_type(table, method, &ctx),
                    source: source.clone(),
                });
            }
        }
    }
    tracing::info!(endpoints = records.len(), marker, "extracted endpoints");
    records
}

fn route_of(table: &SymbolTable, attribute: &Attribute, ctx: &Context<'_>) -> Option<String> {
    let arg = attribute.args.first()?;
    table.eval_const(&arg.value, ctx).filter(|route| !route.is_empty())
}

fn parameter_type(table: &SymbolTable, method: &MethodDecl, ctx: &Context<'_>) -> Option<TypeDescriptor> {
    let parameter = method.parameters.first()?;
    match table.resolve(&parameter.ty, ctx) {
        TypeDescriptor::Error(name) => {
            tracing::debug!(method = %method.name, ty = %name, "parameter type did not resolve");
            None
        }
        ty => Some(ty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(sources: &[(&str, &str)]) -> Vec<EndpointRecord> {
        let corpus = Corpus::from_sources(sources.iter().copied());
        let table = SymbolTable::new(corpus.units.iter().map(|u| &u.unit));
        extract(&corpus, &table, DEFAULT_ROUTE_MARKER)
    }

    #[test]
    fn finds_marked_methods_in_document_order() {
        let records = run(&[
            (
                "Services/Orders.cs",
                r#"
                namespace Acme.Orders.Client
                {
                    public interface IOrderService
                    {
                        [BifrostPath("/bifrost/order-service/get-order")]
                        Task<Order> GetOrder(GetOrderRequest request);

                        [Obsolete]
                        Task Legacy(GetOrderRequest request);

                        [Bifrost.BifrostPathAttribute(@"/bifrost/order-service/list")]
                        Task<List<Order>> ListOrders();
                    }
                    public class GetOrderRequest { public string OrderId { get; set; } }
                    public class Order { }
                }
                "#,
            ),
            (
                "Services/Users.cs",
                r#"
                public class UserService
                {
                    [BifrostPath("/bifrost/user-service/find")]
                    public Task Find(Missing.Type request) => null;
                }
                "#,
            ),
        ]);
        let summary: Vec<(&str, &str, &str, bool)> = records
            .iter()
            .map(|r| (r.group.as_str(), r.method.as_str(), r.route.as_str(), r.parameter.is_some()))
            .collect();
        assert_eq!(
            summary,
            [
                ("IOrderService", "GetOrder", "/bifrost/order-service/get-order", true),
                ("IOrderService", "ListOrders", "/bifrost/order-service/list", false),
                ("UserService", "Find", "/bifrost/user-service/find", false),
            ]
        );
        assert_eq!(records[0].source, PathBuf::from("Services/Orders.cs"));
    }

    #[test]
    fn unusable_route_arguments_skip_the_method() {
        let records = run(&[(
            "Services/S.cs",
            r#"
            public interface IS
            {
                [BifrostPath] void NoArgs(int x);
                [BifrostPath("")] void Empty(int x);
                [BifrostPath(SomeCall())] void NotConstant(int x);
                [BifrostPath(Unknown.Route)] void UnknownConstant(int x);
                [BifrostPath("/ok")] void Ok(int x);
            }
            "#,
        )]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].method, "Ok");
    }

    #[test]
    fn route_constants_and_generic_parameters_resolve() {
        let records = run(&[(
            "Services/S.cs",
            r#"
            namespace N
            {
                public static class Routes { public const string Prefix = "/bifrost/s"; }
                public interface IS
                {
                    [BifrostPath(Routes.Prefix + "/put")] void Put<T>(T item);
                    public class Nested
                    {
                        [BifrostPath(Routes.Prefix + "/nested")] void Inner(int x);
                    }
                }
            }
            "#,
        )]);
        assert_eq!(records[0].route, "/bifrost/s/put");
        assert_eq!(records[0].parameter, Some(TypeDescriptor::TypeParameter("T".into())));
        assert_eq!(records[1].group, "Nested");
        assert_eq!(records[1].route, "/bifrost/s/nested");
    }
}
