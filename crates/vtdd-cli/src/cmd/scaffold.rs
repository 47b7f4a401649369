use crate::output::{print_json, Style};
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use vtdd_core::{
    config::Config,
    io,
    pipeline,
    requirements::{FeatureRequirements, IssueMetadata},
};

#[derive(Args)]
pub struct ScaffoldArgs {
    /// Component name (PascalCase)
    pub name: String,
    /// JSON file with the feature requirements
    #[arg(long, short = 'r', conflicts_with = "criteria")]
    pub requirements: Option<PathBuf>,
    /// Acceptance criterion (repeatable)
    #[arg(long = "criterion", short = 'c')]
    pub criteria: Vec<String>,
    #[arg(long)]
    pub issue_number: Option<String>,
    #[arg(long)]
    pub issue_title: Option<String>,
    /// Print the files instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(root: &Path, args: ScaffoldArgs, style: Style, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    config.ensure_valid()?;

    let req = match &args.requirements {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            FeatureRequirements::from_json(&data)
                .with_context(|| format!("failed to parse requirements JSON in {}", path.display()))?
        }
        None => FeatureRequirements {
            acceptance_criteria: args.criteria.clone(),
            ..Default::default()
        },
    };
    let metadata = IssueMetadata::new(args.issue_number.clone(), args.issue_title.clone());

    if args.dry_run {
        let files = pipeline::prepare(&args.name, &req, Some(&metadata))?;
        println!("{}", style.dim(&format!("// {}", config.test_file(root, &args.name).display())));
        print!("{}", files.test_content);
        println!();
        println!("{}", style.dim(&format!("<!-- {} -->", config.component_file(root, &args.name).display())));
        print!("{}", files.component_content);
        return Ok(());
    }

    let written = write_scaffold(root, &config, &args.name, &req, Some(&metadata))?;

    if json {
        print_json(&serde_json::json!({
            "component": args.name,
            "component_file": written.component_file,
            "test_file": written.test_file,
            "summary": written.summary,
        }))?;
    } else {
        print_written(&written, style);
    }
    Ok(())
}

pub struct Written {
    pub component_file: PathBuf,
    pub test_file: PathBuf,
    pub summary: vtdd_core::content::ContentSummary,
}

/// Validate, generate and write the component/test pair. Neither file is
/// written if either path already exists.
pub fn write_scaffold(
    root: &Path,
    config: &Config,
    name: &str,
    req: &FeatureRequirements,
    metadata: Option<&IssueMetadata>,
) -> anyhow::Result<Written> {
    let files = pipeline::prepare(name, req, metadata)?;

    let component_file = config.component_file(root, name);
    let test_file = config.test_file(root, name);

    io::write_all_new(&[
        (component_file.as_path(), files.component_content.as_bytes()),
        (test_file.as_path(), files.test_content.as_bytes()),
    ])
    .with_context(|| format!("refusing to overwrite scaffold for '{name}'"))?;

    tracing::debug!(component = name, "scaffold written");

    Ok(Written {
        component_file,
        test_file,
        summary: files.report.summary,
    })
}

pub fn print_written(written: &Written, style: Style) {
    println!("{} {}", style.success("Created"), written.component_file.display());
    println!("{} {}", style.success("Created"), written.test_file.display());
    println!(
        "  {} tests, all red. Run your test runner to watch them fail, then implement.",
        written.summary.total_tests
    );
}
