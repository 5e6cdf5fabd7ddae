//! CLI: client root → (postman | openapi) documents
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use dialoguer::MultiSelect;
use indexmap::IndexSet;

use crate::corpus::Corpus;
use crate::emit::{self, OutputFormat, ServiceNaming};
use crate::extract::DEFAULT_ROUTE_MARKER;
use crate::generate::{self, Generation};
use crate::logging::{self, LogFormat};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// scan a Bifrost client's service interfaces and emit Postman and OpenAPI
/// documents with synthesized sample request bodies
#[derive(Parser, Debug)]
#[command(name = "bifrost-sampler", version)]
pub struct CommandLineInterface {
    /// client project folder, conventionally named `<Org>.<Service>.Client`
    #[arg(env = "BIFROST_CLIENT_ROOT")]
    client_root: PathBuf,

    /// folder holding the service interfaces, relative to the client root
    #[arg(long, env = "BIFROST_SERVICES_DIR", default_value = "Services")]
    services_dir: PathBuf,

    /// output formats to generate (repeatable or comma separated)
    ///
    /// Without this flag you are prompted when stdin is a terminal; otherwise every format is generated.
    #[arg(long = "format", short, value_enum, env = "BIFROST_FORMATS", value_delimiter = ',')]
    formats: Vec<OutputFormat>,

    /// attribute marking remote-callable methods (matched as a substring of the attribute name)
    #[arg(long, env = "BIFROST_ROUTE_ATTRIBUTE", default_value = DEFAULT_ROUTE_MARKER)]
    route_attribute: String,

    /// directory the documents are written to
    #[arg(long, short, env = "BIFROST_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// service name; derived from the client folder when omitted
    #[arg(long, env = "BIFROST_SERVICE_NAME")]
    service_name: Option<String>,

    /// organisation name; derived from the client folder when omitted
    #[arg(long, env = "BIFROST_ORG_NAME")]
    org_name: Option<String>,

    /// print the documents to stdout instead of writing files
    #[arg(long, env = "BIFROST_STDOUT", default_value_t = false)]
    stdout: bool,

    /// raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// log line format
    #[arg(long, value_enum, env = "BIFROST_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        // debug path
        if self.no_op {
            eprintln!("{self:#?}");
            return Ok(())
        }
        logging::init(self.verbose, self.log_format);

        // 1) prerequisites
        let services = generate::services_path(&self.client_root, &self.services_dir)?;
        let naming = ServiceNaming::from_client_root(&self.client_root)
            .with_overrides(self.org_name.clone(), self.service_name.clone());
        let formats = self.formats()?;
        if formats.is_empty() {
            eprintln!("{} no output formats selected", "cancelled:".yellow().bold());
            return Ok(())
        }

        // 2) scan & synthesize
        let corpus = Corpus::load(&services)
            .with_context(|| format!("failed to load service sources from {}", services.display()))?;
        let generation = generate::generate(&corpus, &self.route_attribute);
        report_scan(&generation, &self.route_attribute);

        // 3) emit
        for format in &formats {
            if self.stdout {
                let text = format
                    .render(&generation, &naming)
                    .with_context(|| format!("failed to render the {} document", format.display_name()))?;
                println!("{text}");
            } else {
                let path = emit::write_output(&self.out_dir, *format, &generation, &naming)
                    .with_context(|| format!("failed to write the {} document", format.display_name()))?;
                eprintln!("{} {}", "wrote".green().bold(), path.display());
            }
        }
        if !self.stdout {
            let names = formats.iter().map(|f| f.display_name()).collect::<Vec<_>>().join(", ");
            eprintln!("{}", format!("Schema files generated successfully (Types: {names})").green());
        }
        Ok(())
    }
    fn formats(&self) -> anyhow::Result<Vec<OutputFormat>> {
        if !self.formats.is_empty() {
            return Ok(self.formats.iter().copied().collect::<IndexSet<_>>().into_iter().collect())
        }
        if !io::stdin().is_terminal() {
            return Ok(OutputFormat::ALL.to_vec())
        }
        let options = OutputFormat::ALL
            .iter()
            .map(|f| format!("Generate {} Schema", f.display_name()))
            .collect::<Vec<_>>();
        let picked = MultiSelect::new()
            .with_prompt("Select one or more output formats (space to toggle, enter to confirm)")
            .items(&options)
            .interact_opt()
            .context("failed to read the format selection")?;
        Ok(formats_from_selection(picked))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn report_scan(generation: &Generation, marker: &str) {
    let count = generation.endpoint_count();
    if count == 0 {
        eprintln!("{} no methods carry a `{marker}` attribute", "warning:".yellow().bold());
    } else {
        eprintln!(
            "{} {count} endpoint(s) in {} group(s)",
            "found".cyan().bold(),
            generation.groups.len(),
        );
    }
    if !generation.diagnostics.is_empty() {
        eprintln!(
            "{} skipped {} unreadable source file(s)",
            "warning:".yellow().bold(),
            generation.diagnostics.len(),
        );
    }
}

/// Confirming with nothing toggled means every format; cancelling means none.
fn formats_from_selection(picked: Option<Vec<usize>>) -> Vec<OutputFormat> {
    match picked {
        None => Vec::new(),
        Some(indices) if indices.is_empty() => OutputFormat::ALL.to_vec(),
        Some(indices) => indices.into_iter().filter_map(|i| OutputFormat::ALL.get(i).copied()).collect(),
    }
}

// ------ Tests ------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_accept_repeats_and_commas() {
        let cli = CommandLineInterface::try_parse_from([
            "bifrost-sampler",
            "Hudl.Orders.Client",
            "--format",
            "openapi,postman",
            "--format",
            "openapi",
        ])
        .unwrap();
        assert_eq!(cli.formats().unwrap(), vec![OutputFormat::OpenApi, OutputFormat::Postman]);
    }

    #[test]
    fn prompt_selection_maps_to_formats() {
        assert_eq!(formats_from_selection(Some(vec![1])), vec![OutputFormat::OpenApi]);
        assert_eq!(formats_from_selection(Some(vec![0, 1])), OutputFormat::ALL.to_vec());
        assert_eq!(formats_from_selection(Some(Vec::new())), OutputFormat::ALL.to_vec());
        assert_eq!(formats_from_selection(None), Vec::new());
    }

    #[test]
    fn defaults() {
        let cli = CommandLineInterface::try_parse_from(["bifrost-sampler", "client", "-vv"]).unwrap();
        assert_eq!(cli.services_dir, PathBuf::from("Services"));
        assert_eq!(cli.route_attribute, DEFAULT_ROUTE_MARKER);
        assert_eq!(cli.out_dir, PathBuf::from("."));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, LogFormat::Pretty);
        assert!(!cli.stdout);
    }

    #[test]
    fn rejects_unknown_formats() {
        assert!(CommandLineInterface::try_parse_from(["bifrost-sampler", "client", "--format", "swagger"]).is_err());
    }
}
