//! Implementation of the `auditflow scaffold` command.
//!
//! Responsibility: translate CLI arguments into descriptors, call the core
//! scaffold service, and display results. No business logic lives here.

use tracing::{debug, info, instrument};

use auditflow_adapters::{LocalFilesystem, SubstitutionRenderer, service_templates};
use auditflow_core::{application::ScaffoldService, domain::ServiceDescriptor};

use crate::{
    cli::{ScaffoldArgs, global::GlobalArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `auditflow scaffold` command.
///
/// Dispatch sequence:
/// 1. Look up the skeleton template
/// 2. Build descriptors from `--service` flags (or the stock trio)
/// 3. Dry run: render the plan and print it, writing nothing
/// 4. Otherwise generate the trees and report counts
#[instrument(skip_all, fields(template = %args.template))]
pub fn execute(args: ScaffoldArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let template = service_templates::find_template(&args.template)
        .map_err(|e| CliError::Core(e.into()))?;

    let services = if args.services.is_empty() {
        service_templates::default_descriptors()
    } else {
        args.services
            .iter()
            .map(|name| ServiceDescriptor::from_name(name.as_str()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CliError::Core(e.into()))?
    };

    debug!(
        services = services.len(),
        output = %args.output.display(),
        "descriptors resolved"
    );

    let service = ScaffoldService::new(
        Box::new(SubstitutionRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );

    if args.dry_run {
        let trees = service
            .plan(&template, &services, &args.group_id, &args.output)
            .map_err(CliError::Core)?;

        output.info(&format!(
            "Dry run: would create {} service(s) under {}",
            trees.len(),
            args.output.display(),
        ))?;
        for tree in &trees {
            output.print(&format!("  {}/", tree.root().display()))?;
            for file in tree.files() {
                output.print(&format!("    {}", file.path.display()))?;
            }
        }
        return Ok(());
    }

    output.header(&format!(
        "Generating {} service(s) from '{}'...",
        services.len(),
        template.id,
    ))?;
    info!(output = %args.output.display(), "scaffold started");

    let report = service
        .generate(&template, &services, &args.group_id, &args.output)
        .map_err(CliError::Core)?;

    output.success(&format!(
        "Created {} service(s): {} directories, {} files",
        report.services, report.directories_created, report.files_written,
    ))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        for svc in &services {
            output.print(&format!("  cd {}/{}", args.output.display(), svc.name()))?;
        }
    }

    Ok(())
}
