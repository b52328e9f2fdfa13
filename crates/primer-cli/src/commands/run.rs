//! Implementation of the `primer run` command.
//!
//! Responsibility: turn flags and config into a preset, collect the rest of
//! the answers, call the core bootstrap service, and display results. No
//! business logic lives here.

use std::path::Path;
use std::time::Duration;

use chrono::Datelike;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tracing::{debug, info, instrument};

use primer_adapters::{BlueprintLoader, LocalFilesystem, SystemRunner};
use primer_core::{
    application::{
        Answers, BootstrapOptions, BootstrapPlan, BootstrapReport, BootstrapService, Preset,
        collect_answers, ports::Prompter,
    },
    domain::parse_yes_no,
};

use crate::{
    cli::{OutputFormat, RunArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt,
};

const CONFIRM_PROMPT: &str = "Continue? [Y/n]";

/// Execute the `primer run` command.
///
/// Dispatch sequence:
/// 1. Load the template's blueprint
/// 2. Collect answers (flags, then config, then prompts)
/// 3. Plan the bootstrap
/// 4. Confirm with user unless `--yes` or `--dry-run`
/// 5. Execute the plan
/// 6. Print the result
#[instrument(skip_all, fields(dir = %args.dir.display()))]
pub fn execute(
    args: RunArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let prompter = prompt::for_session();
    run_with(args, &global, &config, &output, prompter.as_ref())
}

fn run_with(
    args: RunArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
    prompter: &dyn Prompter,
) -> CliResult<()> {
    // 1. Template
    let root = args.dir.as_path();
    if !root.is_dir() {
        return Err(CliError::TemplateNotFound {
            path: root.to_path_buf(),
        });
    }
    let mut blueprint = BlueprintLoader::new(root).load()?;
    if let Some(message) = &config.git.commit_message {
        blueprint.git.commit_message = message.clone();
    }

    // 2. Answers
    let preset = preset(&args, config);
    let answers = collect_answers(prompter, &blueprint, preset)?;
    debug!(module = %answers.module, library = answers.library, "Answers collected");

    // 3. Plan
    let service = BootstrapService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(SystemRunner::new()),
    );
    let year = chrono::Local::now().year();
    let plan = service.plan(root, &blueprint, &answers, year)?;

    let options = BootstrapOptions {
        dry_run: args.dry_run,
        skip_install: args.skip_install || !config.tooling.install,
        skip_commit: args.no_commit || !config.git.commit,
    };

    // 4. Show and confirm
    if !global.json() {
        show_plan(&plan, &answers, options, output)?;
    }
    if !args.yes && !args.dry_run {
        let reply = prompter.ask(CONFIRM_PROMPT)?;
        if !parse_yes_no(&reply, true) {
            return Err(CliError::Cancelled);
        }
    }

    // 5. Execute
    info!(module = %answers.module, "Bootstrap started");
    let spinner = spinner(output, options);
    let result = service.execute(&plan, options);
    spinner.finish_and_clear();
    let report = result?;

    // 6. Result
    if output.format() == OutputFormat::Json {
        output.json(&report_json(&plan, &report, options))?;
    } else {
        show_report(&report, options, output)?;
    }
    Ok(())
}

/// Flags win over config; whatever is still missing is prompted for.
fn preset(args: &RunArgs, config: &AppConfig) -> Preset {
    Preset {
        author: args
            .author
            .clone()
            .or_else(|| config.defaults.author.clone()),
        module: args.module.clone(),
        classes: args.classes.iter().cloned().collect(),
        library: args.library().or(config.defaults.library),
    }
}

fn spinner(output: &OutputManager, options: BootstrapOptions) -> ProgressBar {
    let runs_commands = !(options.skip_install && options.skip_commit);
    if options.dry_run || !runs_commands || output.is_quiet() || !output.is_interactive() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Bootstrapping (this may take a while)...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn show_plan(
    plan: &BootstrapPlan,
    answers: &Answers,
    options: BootstrapOptions,
    output: &OutputManager,
) -> CliResult<()> {
    output.header(&format!("Bootstrapping {}", plan.root.display()))?;
    output.mapping(plan.substituter.table().iter())?;
    output.print(&format!(
        "  {} file(s) to rewrite, project type: {}",
        plan.files.len(),
        if answers.library { "library" } else { "application" },
    ))?;

    if options.dry_run {
        for file in plan.files.iter() {
            output.print(&format!("  rewrite  {}", file.display()))?;
        }
        for (from, to) in &plan.file_renames {
            output.print(&format!("  rename   {} -> {}", from.display(), to.display()))?;
        }
        let (from, to) = &plan.module_move;
        output.print(&format!("  move     {} -> {}", from.display(), to.display()))?;
        for rename in &plan.renames {
            output.print(&format!(
                "  rename   {} -> {}",
                rename.from.display(),
                rename.to.display()
            ))?;
        }
        for line in &plan.gitignore_removals {
            output.print(&format!("  unignore {line}"))?;
        }
    }
    Ok(())
}

fn show_report(
    report: &BootstrapReport,
    options: BootstrapOptions,
    output: &OutputManager,
) -> CliResult<()> {
    if options.dry_run {
        output.info("Dry run: no changes were made.")?;
        return Ok(());
    }

    output.print(&format!(
        "  {} file(s) rewritten, {} replacement(s), {} file(s) renamed",
        report.files_rewritten, report.replacements, report.files_renamed
    ))?;
    for command in &report.commands_run {
        output.print(&format!("  ran {command}"))?;
    }

    if report.committed {
        output.success("Bootstrapping complete. Changes committed. Please run:")?;
        output.print("  git push")?;
    } else {
        output.success("Bootstrapping complete. Changes were not committed.")?;
    }
    if !report.entry_point_removed {
        output.warning("Entry point was already gone; nothing removed.")?;
    }
    Ok(())
}

fn report_json(
    plan: &BootstrapPlan,
    report: &BootstrapReport,
    options: BootstrapOptions,
) -> serde_json::Value {
    let substitutions: serde_json::Map<String, serde_json::Value> = plan
        .substituter
        .table()
        .iter()
        .map(|(k, v)| (k.to_owned(), json!(v)))
        .collect();
    json!({
        "root": path_str(&plan.root),
        "dry_run": options.dry_run,
        "substitutions": substitutions,
        "files": plan.files.iter().map(path_str).collect::<Vec<_>>(),
        "files_rewritten": report.files_rewritten,
        "replacements": report.replacements,
        "files_renamed": report.files_renamed,
        "gitignore_lines_removed": report.gitignore_lines_removed,
        "commands_run": report.commands_run,
        "committed": report.committed,
        "entry_point_removed": report.entry_point_removed,
    })
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
