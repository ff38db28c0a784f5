use anyhow::{Result, bail};

use pakt_core::{Context, DependencyPolicy, InstallRequest};
use pakt_logger;
use pakt_utils::{parse_pkg_spec, validate_name};

use super::print_header;

pub struct InstallHandler;

impl InstallHandler {
    pub fn handle_install(
        ctx: &Context,
        package: &str,
        version: Option<String>,
        repo: Option<String>,
        strict: bool,
    ) -> Result<()> {
        let (name, spec_version) = parse_pkg_spec(package);
        validate_name(&name)?;
        let version = match (version, spec_version) {
            (Some(flag), Some(spec)) if flag != spec => {
                bail!("Conflicting versions for {name}: {spec} and --version {flag}")
            }
            (flag, spec) => flag.or(spec),
        };

        print_header("install", Some(package));

        let policy = if strict {
            DependencyPolicy::Strict
        } else {
            DependencyPolicy::Lenient
        };
        let request = InstallRequest::new(name.as_str())
            .version(version)
            .repository(repo)
            .policy(policy);

        let report = pakt_core::install(ctx, &request)?;

        if !report.skipped.is_empty() {
            pakt_logger::debug(&format!("Already installed: {}", report.skipped.join(", ")));
        }
        if !report.missing.is_empty() {
            pakt_logger::warn(&format!(
                "Missing dependencies: {}",
                report.missing.join(", ")
            ));
        }
        for (dep, reason) in &report.failed {
            pakt_logger::warn(&format!("{dep} was not installed: {reason}"));
        }

        let summary = if report.installed.len() > 1 {
            format!(
                "Installed {name} and {} dependencies",
                report.installed.len() - 1
            )
        } else {
            format!("Installed {name}")
        };
        pakt_logger::finish(&summary);
        Ok(())
    }
}
