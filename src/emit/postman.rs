//! Postman collection v2.1.
use serde::Serialize;

use super::ServiceNaming;
use crate::error::Result;
use crate::generate::{Endpoint, Generation};

pub const COLLECTION_SCHEMA: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";
pub const HOST: &str = "{{Hostname}}:{{Port}}";

#[derive(Debug, Clone, Serialize)]
pub struct Collection {
    pub info: Info,
    pub item: Vec<Folder>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Info {
    pub name: String,
    pub schema: String,
}

/// One folder per endpoint group.
#[derive(Debug, Clone, Serialize)]
pub struct Folder {
    pub name: String,
    pub item: Vec<Item>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub name: String,
    pub request: Request,
}

#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub method: String,
    pub header: Vec<Header>,
    pub url: Url,
    pub body: Body,
}

#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Url {
    pub raw: String,
    pub host: Vec<String>,
    pub path: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Body {
    pub mode: String,
    /// Pretty-printed sample; `null` for operations without a payload.
    pub raw: String,
}

pub fn collection(generation: &Generation, naming: &ServiceNaming) -> Result<Collection> {
    let item = generation
        .groups
        .iter()
        .map(|group| {
            let item = group.endpoints.iter().map(request_item).collect::<Result<Vec<_>>>()?;
            Ok(Folder { name: group.name.clone(), item })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Collection {
        info: Info {
            name: format!("{} Bifrost Endpoints", naming.qualified()),
            schema: COLLECTION_SCHEMA.to_string(),
        },
        item,
    })
}

fn request_item(endpoint: &Endpoint) -> Result<Item> {
    Ok(Item {
        name: endpoint.name.clone(),
        request: Request {
            method: "POST".to_string(),
            header: vec![Header { key: "Content-Type".to_string(), value: "application/json".to_string() }],
            url: Url {
                raw: endpoint.route.clone(),
                host: vec![HOST.to_string()],
                path: endpoint.route.split('/').filter(|s| !s.is_empty()).map(str::to_string).collect(),
            },
            body: Body { mode: "raw".to_string(), raw: serde_json::to_string_pretty(&endpoint.sample)? },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::EndpointGroup;
    use crate::sample::SampleValue;
    use indexmap::IndexMap;
    use serde_json::json;

    #[test]
    fn builds_one_folder_per_group() {
        let mut fields = IndexMap::new();
        fields.insert("OrderId".to_string(), SampleValue::String(String::new()));
        let generation = Generation {
            groups: vec![EndpointGroup {
                name: "IOrderService".into(),
                endpoints: vec![
                    Endpoint {
                        name: "GetOrder".into(),
                        route: "/bifrost/order-service/get-order".into(),
                        sample: Some(SampleValue::Object(fields)),
                    },
                    Endpoint { name: "Ping".into(), route: "/bifrost/order-service/ping".into(), sample: None },
                ],
            }],
            diagnostics: Vec::new(),
        };
        let naming = ServiceNaming { org: Some("Hudl".into()), service: "Orders".into() };
        let value = serde_json::to_value(collection(&generation, &naming).unwrap()).unwrap();
        assert_eq!(value["info"]["name"], "Hudl.Orders Bifrost Endpoints");
        assert_eq!(value["info"]["schema"], COLLECTION_SCHEMA);
        let get = &value["item"][0]["item"][0];
        assert_eq!(
            get["request"],
            json!({
                "method": "POST",
                "header": [{"key": "Content-Type", "value": "application/json"}],
                "url": {
                    "raw": "/bifrost/order-service/get-order",
                    "host": ["{{Hostname}}:{{Port}}"],
                    "path": ["bifrost", "order-service", "get-order"]
                },
                "body": {"mode": "raw", "raw": "{\n  \"OrderId\": \"\"\n}"}
            })
        );
        assert_eq!(value["item"][0]["item"][1]["request"]["body"]["raw"], "null");
    }
}
