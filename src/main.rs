use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use tag_bump::cli::{
    run_bump_workflow, run_retag_workflow, RetagConfig, RunConfig, WorkflowSettings,
};
use tag_bump::config;
use tag_bump::domain::TagPattern;
use tag_bump::git::{self, Backend};
use tag_bump::ui;

/// Exit code for rejected input (bad release level, namespace or backend)
const EXIT_USAGE: i32 = 2;

#[derive(clap::Parser)]
#[command(
    name = "tag-bump",
    version,
    about = "Bump and publish semantic version tags for the packages of a shared repository"
)]
struct Args {
    #[arg(
        value_name = "RELEASE_LEVEL",
        help = "Release level: major, minor or patch [default: patch]"
    )]
    release_level: Option<String>,

    #[arg(value_name = "PACKAGE", help = "Package to bump [default: all packages]")]
    package: Option<String>,

    #[arg(
        value_name = "BUMP_PRERELEASE",
        help = "\"true\" advances the pre-release counter instead of finalizing [default: false]"
    )]
    bump_prerelease: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Directory whose subdirectories are the packages")]
    packages_root: Option<PathBuf>,

    #[arg(long, help = "Tag namespace in <namespace>/<package>@<version>")]
    namespace: Option<String>,

    #[arg(long, help = "Remote to fetch tags from and push tags to")]
    remote: Option<String>,

    #[arg(long, help = "Version-control backend: git or git2")]
    backend: Option<String>,

    #[arg(long, help = "Preview the new tags without creating or pushing them")]
    dry_run: bool,

    #[arg(long, help = "Exit with status 1 if any package could not be bumped")]
    strict: bool,

    #[arg(
        long,
        value_name = "REV",
        help = "Instead of bumping, move every namespace tag containing REV to --retag-to"
    )]
    retag: Option<String>,

    #[arg(
        long,
        value_name = "REV",
        default_value = "HEAD",
        requires = "retag",
        help = "Commit that --retag moves tags to"
    )]
    retag_to: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let run = match RunConfig::from_positional(
        args.release_level.as_deref(),
        args.package.as_deref(),
        args.bump_prerelease.as_deref(),
    ) {
        Ok(run) => run,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(EXIT_USAGE);
        }
    };

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let pattern = match TagPattern::new(args.namespace.unwrap_or(config.namespace)) {
        Ok(pattern) => pattern,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(EXIT_USAGE);
        }
    };

    let backend = match args.backend.as_deref().map(str::parse::<Backend>) {
        None => config.backend,
        Some(Ok(backend)) => backend,
        Some(Err(e)) => {
            ui::display_error(&e.to_string());
            std::process::exit(EXIT_USAGE);
        }
    };

    let settings = WorkflowSettings {
        packages_root: args.packages_root.unwrap_or(config.packages_root),
        pattern,
        remote: args.remote.unwrap_or(config.remote),
        dry_run: args.dry_run,
    };
    let strict = args.strict || config.behavior.strict;

    let repo = git::open_backend(backend);

    if let Some(from) = args.retag {
        let retag = RetagConfig {
            from,
            to: args.retag_to,
            package_name: run.package_name,
        };
        ui::display_status(&format!(
            "Moving {} tags containing {} to {} via {}",
            retag.package_name.as_deref().unwrap_or("all"),
            retag.from,
            retag.to,
            backend
        ));

        let summary = match run_retag_workflow(&retag, &settings, repo.as_ref()) {
            Ok(summary) => summary,
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        };
        ui::display_retag_summary(&summary);

        if strict && summary.has_failures() {
            std::process::exit(1);
        }
        return Ok(());
    }

    ui::display_status(&format!(
        "Bumping {} ({} level) under {} via {}",
        run.package_name.as_deref().unwrap_or("all packages"),
        run.release_level,
        settings.packages_root.display(),
        backend
    ));

    let summary = match run_bump_workflow(&run, &settings, repo.as_ref()) {
        Ok(summary) => summary,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    ui::display_summary(&summary);

    if strict && summary.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
