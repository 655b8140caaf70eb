//! Diff command
//!
//! Usage: flagdiff diff --old <FILE> --new <FILE> [--project-flags <FILE>]
//!        [--segments <FILE>] [--feature <ID> [--environment <ID>]]
//!        [--format json|summary] [--output <FILE>]

use clap::{Args, ValueEnum};
use flagdiff_core::diff::{
    diff_change_request, diff_feature, diff_feature_in_environment,
    render_change_request_summary, render_feature_summary,
};
use flagdiff_core::errors::{ExError, ExErrorKind, FlagDiffError, Result};
use flagdiff_core::model::{EnvironmentId, FeatureId, ProjectFlag, Segment};
use flagdiff_core::snapshot::{load_project_flags, load_segments, Snapshot};
use flagdiff_core::{log_op_end, log_op_error, log_op_start};
use flagdiff_core_types::RequestContext;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Live (old) snapshot file
    #[arg(long)]
    pub old: PathBuf,

    /// Proposed (new) snapshot file
    #[arg(long)]
    pub new: PathBuf,

    /// Project flag catalog (defines multivariate options)
    #[arg(long)]
    pub project_flags: Option<PathBuf>,

    /// Segment catalog (resolves segment names)
    #[arg(long)]
    pub segments: Option<PathBuf>,

    /// Restrict the diff to one feature
    #[arg(long)]
    pub feature: Option<FeatureId>,

    /// Environment of `--feature` (default: the first one found)
    #[arg(long, requires = "feature")]
    pub environment: Option<EnvironmentId>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Structured diff as pretty JSON
    Json,
    /// Markdown summary
    Summary,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> anyhow::Result<()> {
    let ctx = RequestContext::new();
    log_op_start!("cli_diff", request_id = ctx.request_id.as_str());

    match run(&args) {
        Ok(()) => {
            log_op_end!("cli_diff", duration_ms = ctx.elapsed_ms());
            Ok(())
        }
        Err(e) => {
            let e = e.with_request_id(ctx.request_id.clone());
            log_op_error!(
                "cli_diff",
                e.clone(),
                duration_ms = ctx.elapsed_ms(),
                request_id = ctx.request_id.as_str()
            );
            Err(e.into())
        }
    }
}

fn run(args: &DiffArgs) -> Result<()> {
    let live = load_snapshot(&args.old)?;
    let proposed = load_snapshot(&args.new)?;

    let project_flags: Vec<ProjectFlag> = match &args.project_flags {
        Some(path) => load_project_flags(&path.display().to_string(), &read(path)?)?,
        None => Vec::new(),
    };
    let segments: Vec<Segment> = match &args.segments {
        Some(path) => load_segments(&path.display().to_string(), &read(path)?)?,
        None => Vec::new(),
    };

    let rendered = match args.feature {
        Some(feature_id) => {
            let known = live.feature_ids().contains(&feature_id)
                || proposed.feature_ids().contains(&feature_id);
            if !known {
                return Err(ExError::new(ExErrorKind::InvalidInput)
                    .with_op("cli_diff")
                    .with_entity_id(feature_id.to_string())
                    .with_message("feature is not present in either snapshot"));
            }
            let project_flag = project_flags
                .iter()
                .find(|f| f.id == feature_id)
                .cloned()
                .unwrap_or_else(|| ProjectFlag::bare(feature_id));
            let diff = match args.environment {
                Some(environment_id) => diff_feature_in_environment(
                    &live.feature_states,
                    &proposed.feature_states,
                    &project_flag,
                    Some(environment_id),
                    &segments,
                ),
                None => diff_feature(
                    &live.feature_states,
                    &proposed.feature_states,
                    &project_flag,
                    &segments,
                ),
            };
            match args.format {
                OutputFormat::Json => to_json(&diff)?,
                OutputFormat::Summary => render_feature_summary(&diff),
            }
        }
        None => {
            let diff = diff_change_request(&live, &proposed, &project_flags, &segments);
            match args.format {
                OutputFormat::Json => to_json(&diff)?,
                OutputFormat::Summary => render_change_request_summary(&diff),
            }
        }
    };

    if let Some(output_path) = &args.output {
        std::fs::write(output_path, &rendered).map_err(|e| {
            ExError::from(FlagDiffError::WriteFailed {
                path: output_path.display().to_string(),
                reason: e.to_string(),
            })
            .with_op("write_output")
        })?;
        println!("✓ Diff written to {}", output_path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let snapshot = Snapshot::from_named_json_bytes(&path.display().to_string(), &read(path)?)?;
    tracing::debug!(
        path = %path.display(),
        states = snapshot.feature_states.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        ExError::from(FlagDiffError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
        .with_op("read_file")
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| ExError::from(FlagDiffError::from(e)))
}
