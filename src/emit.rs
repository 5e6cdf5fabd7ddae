//! Output adapters: Postman collections and OpenAPI documents.
pub mod openapi;
pub mod postman;
pub mod schema;

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::generate::Generation;

/// `<Org>.<Service>.Client`
static CLIENT_FOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<org>[^.]+)\.(?P<service>.+)\.Client$").expect("client folder pattern should be valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum OutputFormat {
    Postman,
    #[value(name = "openapi")]
    OpenApi,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Postman, OutputFormat::OpenApi];

    pub fn display_name(self) -> &'static str {
        match self {
            OutputFormat::Postman => "Postman",
            OutputFormat::OpenApi => "OpenAPI",
        }
    }

    fn file_tag(self) -> &'static str {
        match self {
            OutputFormat::Postman => "postman",
            OutputFormat::OpenApi => "openapi",
        }
    }

    /// `<org>_<service>_<format>_generated.json`, lower-cased.
    pub fn file_name(self, naming: &ServiceNaming) -> String {
        let stem = match &naming.org {
            Some(org) => format!("{org}_{}", naming.service),
            None => naming.service.clone(),
        };
        format!("{}_{}_generated.json", stem.to_lowercase(), self.file_tag())
    }

    /// Pretty-printed document text.
    pub fn render(self, generation: &Generation, naming: &ServiceNaming) -> Result<String> {
        let text = match self {
            OutputFormat::Postman => serde_json::to_string_pretty(&postman::collection(generation, naming)?)?,
            OutputFormat::OpenApi => serde_json::to_string_pretty(&openapi::document(generation, naming))?,
        };
        Ok(text)
    }
}

/// Organisation and service names used in titles and file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceNaming {
    pub org: Option<String>,
    pub service: String,
}

impl ServiceNaming {
    pub const DEFAULT_SERVICE: &'static str = "Service";

    /// Reads `<Org>.<Service>.Client` off the client root's folder name.
    pub fn from_client_root(root: &Path) -> Self {
        let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let folder = resolved.file_name().map(|f| f.to_string_lossy().into_owned()).unwrap_or_default();
        match CLIENT_FOLDER.captures(&folder) {
            Some(caps) => ServiceNaming { org: Some(caps["org"].to_string()), service: caps["service"].to_string() },
            None => {
                tracing::debug!(%folder, "client folder does not follow <Org>.<Service>.Client");
                ServiceNaming { org: None, service: Self::DEFAULT_SERVICE.to_string() }
            }
        }
    }

    pub fn with_overrides(mut self, org: Option<String>, service: Option<String>) -> Self {
        if org.is_some() {
            self.org = org;
        }
        if let Some(service) = service {
            self.service = service;
        }
        self
    }

    /// `Org.Service`, or just `Service` without an org.
    pub fn qualified(&self) -> String {
        match &self.org {
            Some(org) => format!("{org}.{}", self.service),
            None => self.service.clone(),
        }
    }
}

/// Renders `format` and writes it into `out_dir`, returning the file path.
pub fn write_output(out_dir: &Path, format: OutputFormat, generation: &Generation, naming: &ServiceNaming) -> Result<PathBuf> {
    let text = format.render(generation, naming)?;
    std::fs::create_dir_all(out_dir).map_err(|source| Error::Write { path: out_dir.to_path_buf(), source })?;
    let path = out_dir.join(format.file_name(naming));
    std::fs::write(&path, text).map_err(|source| Error::Write { path: path.clone(), source })?;
    tracing::info!(path = %path.display(), format = format.display_name(), "wrote output");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naming_comes_from_the_client_folder() {
        let naming = ServiceNaming::from_client_root(Path::new("/nonexistent/Hudl.Ticketing.Client"));
        assert_eq!(naming, ServiceNaming { org: Some("Hudl".into()), service: "Ticketing".into() });
        assert_eq!(naming.qualified(), "Hudl.Ticketing");
        assert_eq!(OutputFormat::Postman.file_name(&naming), "hudl_ticketing_postman_generated.json");

        let plain = ServiceNaming::from_client_root(Path::new("/nonexistent/clients"));
        assert_eq!(plain.qualified(), "Service");
        assert_eq!(OutputFormat::OpenApi.file_name(&plain), "service_openapi_generated.json");
    }

    #[test]
    fn overrides_replace_derived_names() {
        let naming = ServiceNaming::from_client_root(Path::new("/nonexistent/Hudl.Ticketing.Client"))
            .with_overrides(None, Some("Orders".into()));
        assert_eq!(naming.qualified(), "Hudl.Orders");
        let naming = naming.with_overrides(Some("Acme".into()), None);
        assert_eq!(OutputFormat::OpenApi.file_name(&naming), "acme_orders_openapi_generated.json");
    }
}
