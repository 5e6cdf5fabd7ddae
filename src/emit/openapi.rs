//! OpenAPI 3.0 document with one `post` operation per route.
use serde_json::{Map, Value, json};

use super::ServiceNaming;
use super::schema::infer_schema;
use crate::generate::{Endpoint, Generation};

pub const OPENAPI_VERSION: &str = "3.0.1";

pub fn document(generation: &Generation, naming: &ServiceNaming) -> Value {
    let mut paths = Map::new();
    for group in &generation.groups {
        for endpoint in &group.endpoints {
            if paths.contains_key(&endpoint.route) {
                tracing::warn!(route = %endpoint.route, method = %endpoint.name, "duplicate route; keeping the last operation");
            }
            paths.insert(endpoint.route.clone(), json!({ "post": operation(endpoint) }));
        }
    }
    json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": format!("{} API", naming.qualified()),
            "description": format!("API for {} services", naming.service),
            "version": "1.0.0"
        },
        "paths": paths,
        "components": { "schemas": {} }
    })
}

fn operation(endpoint: &Endpoint) -> Value {
    let name = &endpoint.name;
    let media = match &endpoint.sample {
        Some(sample) => json!({ "schema": infer_schema(sample), "example": sample.to_json() }),
        None => json!({ "schema": { "type": "object" } }),
    };
    json!({
        "summary": name,
        "description": format!("Automatically generated endpoint for {name}"),
        "operationId": name.to_lowercase(),
        "parameters": [{
            "name": "hostname",
            "in": "query",
            "description": "Hostname of the API",
            "required": true,
            "schema": { "type": "string" }
        }],
        "requestBody": { "content": { "application/json": media } },
        "responses": {
            "200": {
                "description": "Successful operation",
                "content": { "application/json": { "schema": { "type": "object" } } }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::EndpointGroup;
    use crate::sample::SampleValue;

    fn endpoint(name: &str, route: &str, sample: Option<SampleValue>) -> Endpoint {
        Endpoint { name: name.into(), route: route.into(), sample }
    }

    #[test]
    fn one_post_operation_per_route() {
        let generation = Generation {
            groups: vec![EndpointGroup {
                name: "IOrderService".into(),
                endpoints: vec![
                    endpoint("GetOrder", "/orders/get", Some(SampleValue::List(Box::new(SampleValue::Integer(1))))),
                    endpoint("Ping", "/orders/ping", None),
                ],
            }],
            diagnostics: Vec::new(),
        };
        let naming = ServiceNaming { org: None, service: "Orders".into() };
        let doc = document(&generation, &naming);
        assert_eq!(doc["openapi"], "3.0.1");
        assert_eq!(doc["info"]["title"], "Orders API");
        assert_eq!(doc["info"]["description"], "API for Orders services");
        let get = &doc["paths"]["/orders/get"]["post"];
        assert_eq!(get["operationId"], "getorder");
        assert_eq!(get["parameters"][0]["in"], "query");
        let body = &get["requestBody"]["content"]["application/json"];
        assert_eq!(body["schema"], json!({"type": "array", "items": {"type": "integer"}}));
        assert_eq!(body["example"], json!([1]));
        let ping = &doc["paths"]["/orders/ping"]["post"]["requestBody"]["content"]["application/json"];
        assert_eq!(ping, &json!({"schema": {"type": "object"}}));
    }

    #[test]
    fn duplicate_routes_keep_the_last_operation() {
        let generation = Generation {
            groups: vec![
                EndpointGroup { name: "A".into(), endpoints: vec![endpoint("First", "/same", None)] },
                EndpointGroup { name: "B".into(), endpoints: vec![endpoint("Second", "/same", None)] },
            ],
            diagnostics: Vec::new(),
        };
        let naming = ServiceNaming { org: Some("Hudl".into()), service: "S".into() };
        let doc = document(&generation, &naming);
        assert_eq!(doc["paths"].as_object().unwrap().len(), 1);
        assert_eq!(doc["paths"]["/same"]["post"]["summary"], "Second");
        assert_eq!(doc["info"]["title"], "Hudl.S API");
    }
}
