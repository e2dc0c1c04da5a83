//! Implementation of the `roost templates` command.

use tracing::instrument;

use roost_core::application::TemplateInfo;

use crate::{
    cli::{ListFormat, OutputFormat, TemplatesArgs},
    config::Settings,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: TemplatesArgs, settings: Settings, output: OutputManager) -> CliResult<()> {
    let templates = super::template_service(&settings)?.list()?;

    let format = if output.format() == OutputFormat::Json {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Json => output.json(&templates)?,
        ListFormat::List => {
            for template in &templates {
                output.print(&template.id)?;
            }
        }
        ListFormat::Table => {
            output.header(&format!("Available templates ({}):", templates.len()))?;
            for line in table_rows(&templates) {
                output.print(&line)?;
            }
        }
    }

    Ok(())
}

fn table_rows(templates: &[TemplateInfo]) -> Vec<String> {
    let width = templates.iter().map(|t| t.id.len()).max().unwrap_or(0);
    templates
        .iter()
        .map(|t| {
            let marker = if t.parameterized { "render" } else { "copy" };
            format!(
                "  {:<width$}  {:<6}  {:>7} B  {}",
                t.id, marker, t.size, t.origin
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str, parameterized: bool) -> TemplateInfo {
        TemplateInfo {
            id: id.into(),
            family: None,
            origin: "embedded".into(),
            size: 42,
            parameterized,
        }
    }

    #[test]
    fn rows_are_aligned_on_the_longest_id() {
        let rows = table_rows(&[info("_package.json", true), info("a.txt", false)]);
        assert_eq!(rows.len(), 2);
        let col = |row: &str| row.find("render").or_else(|| row.find("copy")).unwrap();
        assert_eq!(col(&rows[0]), col(&rows[1]));
        assert!(rows[0].contains("_package.json"));
    }

    #[test]
    fn empty_list_has_no_rows() {
        assert!(table_rows(&[]).is_empty());
    }
}
