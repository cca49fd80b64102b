//! `cgdir template`: print the scaffold outline currently in use.

use std::path::PathBuf;

use serde::Serialize;

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

use super::build_service;

#[derive(Debug, Serialize)]
struct TemplateDto {
    source: String,
    directories: Vec<PathBuf>,
}

pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = build_service(&config);
    let template = service.load_template()?;

    if output.is_json() {
        output.json(&TemplateDto {
            source: service.scaffold_origin(),
            directories: template.relative_paths(),
        })?;
        return Ok(());
    }

    output.header(&format!("Scaffold from {}", service.scaffold_origin()))?;
    output.print(template.to_outline().trim_end())?;
    output.print("")?;
    output.info(&format!("{} folders", template.directory_count()))?;
    Ok(())
}
