//! Extraction plus synthesis: the grouped endpoint model the emitters consume.
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::corpus::Corpus;
use crate::error::{Diagnostic, Error, Result};
use crate::extract::extract;
use crate::sample::{SampleValue, synthesize};
use crate::symbols::SymbolTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
    pub name: String,
    pub route: String,
    /// `None` when the operation has no (resolvable) parameter.
    pub sample: Option<SampleValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointGroup {
    pub name: String,
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Generation {
    /// In order of first appearance.
    pub groups: Vec<EndpointGroup>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Generation {
    pub fn endpoint_count(&self) -> usize {
        self.groups.iter().map(|g| g.endpoints.len()).sum()
    }
}

pub fn generate(corpus: &Corpus, marker: &str) -> Generation {
    let table = SymbolTable::new(corpus.units.iter().map(|u| &u.unit));
    let mut groups: IndexMap<String, Vec<Endpoint>> = IndexMap::new();
    for record in extract(corpus, &table, marker) {
        let sample = synthesize(&table, record.parameter.as_ref());
        tracing::debug!(group = %record.group, method = %record.method, route = %record.route, "synthesized sample");
        groups.entry(record.group).or_default().push(Endpoint {
            name: record.method,
            route: record.route,
            sample,
        });
    }
    Generation {
        groups: groups.into_iter().map(|(name, endpoints)| EndpointGroup { name, endpoints }).collect(),
        diagnostics: corpus.diagnostics.clone(),
    }
}

/// Checks the client layout and runs the whole pipeline over the services
/// directory.
pub fn generate_from_dir(client_root: &Path, services_dir: &Path, marker: &str) -> Result<Generation> {
    let services = services_path(client_root, services_dir)?;
    let corpus = Corpus::load(&services)?;
    Ok(generate(&corpus, marker))
}

/// `services_dir` is taken relative to `client_root` unless absolute.
pub fn services_path(client_root: &Path, services_dir: &Path) -> Result<PathBuf> {
    if !client_root.is_dir() {
        return Err(Error::MissingClientRoot(client_root.to_path_buf()));
    }
    let services = client_root.join(services_dir);
    if !services.is_dir() {
        return Err(Error::MissingServicesDir { root: client_root.to_path_buf(), dir: services_dir.to_path_buf() });
    }
    Ok(services)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn groups_keep_first_appearance_order() {
        let corpus = Corpus::from_sources([
            (
                "A.cs",
                r#"
                public class Beta { [BifrostPath("/b/1")] public void One(Req r) { } }
                public class Alpha { [BifrostPath("/a/1")] public void One() { } }
                public partial class Beta { [BifrostPath("/b/2")] public void Two(Req r) { } }
                public class Req { public int N { get; set; } }
                "#,
            ),
            ("Broken.cs", "class {"),
        ]);
        let generation = generate(&corpus, "BifrostPath");
        let names: Vec<_> = generation.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Beta", "Alpha"]);
        assert_eq!(generation.groups[0].endpoints.len(), 2);
        assert_eq!(generation.endpoint_count(), 3);
        assert_eq!(generation.diagnostics.len(), 1);
        assert_eq!(
            serde_json::to_value(&generation.groups[1]).unwrap(),
            json!({"name": "Alpha", "endpoints": [{"name": "One", "route": "/a/1", "sample": null}]})
        );
    }
}
