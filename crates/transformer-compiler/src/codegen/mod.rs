//! HTTP service generation from transformer functions.
//!
//! Generation is split in two steps:
//! - [`synthesize`] builds a [`GeneratedUnit`] tree from template functions
//!   (see [`builder`]): one import, the port configurable, a service with one
//!   POST resource per function and a payload record per function that takes
//!   parameters.
//! - a [`Formatter`] turns the tree into source text.
//!
//! The transformer functions themselves are not copied; the generated service
//! lives next to them in the same module and calls them by name.

pub mod builder;
mod formatter;
mod tree;

use serde::Serialize;

use crate::config::CodegenConfig;
use crate::ir::FunctionSpec;

pub use formatter::{Formatter, SourceFormatter};
pub use tree::{
    ConfigurableVar, GeneratedUnit, ImportDecl, PayloadParam, PayloadRecord, RecordField, ResourceMethod,
    ServiceDecl,
};

/// Extension of generated source files.
pub const SOURCE_EXTENSION: &str = "bal";

/// A formatted generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSource {
    /// Document name without extension.
    pub name: String,
    pub content: String,
}

impl GeneratedSource {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, SOURCE_EXTENSION)
    }
}

/// Builds the service unit for `functions`, in the given order.
pub fn synthesize(functions: &[FunctionSpec], config: &CodegenConfig) -> GeneratedUnit {
    let resources = functions
        .iter()
        .map(|func| builder::resource_method(func, config))
        .collect();
    let records = functions.iter().filter_map(builder::payload_record).collect();

    GeneratedUnit {
        imports: vec![builder::http_import(config)],
        configurables: vec![builder::port_configurable(config)],
        service: builder::service(resources, config),
        records,
    }
}

/// Synthesizes and formats the service document.
///
/// Returns `None` if the formatter rejects the unit; the failure is logged and
/// not reported as a diagnostic.
pub fn generate(
    functions: &[FunctionSpec],
    config: &CodegenConfig,
    formatter: &dyn Formatter,
) -> Option<GeneratedSource> {
    let unit = synthesize(functions, config);
    match formatter.format(&unit) {
        Ok(content) => {
            tracing::debug!(
                document = %config.document_name,
                resources = unit.service.resources.len(),
                records = unit.records.len(),
                "service generated"
            );
            Some(GeneratedSource {
                name: config.document_name.clone(),
                content,
            })
        }
        Err(err) => {
            tracing::warn!(error = %err, "service generation skipped");
            None
        }
    }
}
