//! Main workflow orchestration logic
//!
//! Drives enumerate → resolve → bump → publish for every target package and
//! collects one [PackageOutcome] per package. The retag workflow moves the
//! namespace's tags to another commit and collects one [RetagOutcome] per tag.
//! Kept free of clap so both can be called programmatically.

use std::path::PathBuf;

use crate::domain::{version, ReleaseLevel, TagPattern};
use crate::error::Result;
use crate::git::TagRepository;
use crate::packages::enumerate_packages;
use crate::publisher::TagPublisher;
use crate::resolver::{Resolution, TagResolver};
use crate::retag::TagMover;
use crate::ui;

/// What to bump, built once at the entry point
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunConfig {
    pub release_level: ReleaseLevel,

    /// Single package to process; `None` processes every package
    pub package_name: Option<String>,

    /// Advance the pre-release counter instead of finalizing
    pub bump_prerelease: bool,
}

impl RunConfig {
    /// Build from the three positional arguments.
    ///
    /// A missing level means patch; the pre-release flag is true only for a
    /// case-insensitive "true". An unknown level is a configuration error.
    pub fn from_positional(
        release_level: Option<&str>,
        package_name: Option<&str>,
        bump_prerelease: Option<&str>,
    ) -> Result<Self> {
        let release_level = match release_level {
            Some(level) => level.parse::<ReleaseLevel>()?,
            None => ReleaseLevel::default(),
        };

        Ok(RunConfig {
            release_level,
            package_name: package_name.map(str::to_string),
            bump_prerelease: bump_prerelease
                .map(|flag| flag.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }
}

/// Where and how to publish
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub packages_root: PathBuf,
    pub pattern: TagPattern,
    pub remote: String,

    /// Resolve and compute only; create and push nothing
    pub dry_run: bool,
}

/// Result of processing one package
#[derive(Debug, Clone, PartialEq)]
pub enum PackageOutcome {
    /// Tag created and pushed
    Bumped {
        package: String,
        previous: String,
        next: String,
        tag: String,
    },
    /// Dry run: tag computed but not created
    Planned {
        package: String,
        previous: String,
        next: String,
        tag: String,
    },
    NoValidTag {
        package: String,
    },
    /// Bump computation or publishing failed
    Failed {
        package: String,
        message: String,
    },
}

/// Outcomes of a whole run, in processing order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSummary {
    pub outcomes: Vec<PackageOutcome>,
}

impl RunSummary {
    pub fn bumped_count(&self) -> usize {
        self.count(|o| matches!(o, PackageOutcome::Bumped { .. }))
    }

    pub fn planned_count(&self) -> usize {
        self.count(|o| matches!(o, PackageOutcome::Planned { .. }))
    }

    pub fn no_tag_count(&self) -> usize {
        self.count(|o| matches!(o, PackageOutcome::NoValidTag { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, PackageOutcome::Failed { .. }))
    }

    /// Whether any package ended without a new tag through a resolution or publish error
    pub fn has_failures(&self) -> bool {
        self.no_tag_count() > 0 || self.failed_count() > 0
    }

    /// Tags that were created and pushed
    pub fn published_tags(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                PackageOutcome::Bumped { tag, .. } => Some(tag.as_str()),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&PackageOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

/// Main bump workflow
///
/// Packages are processed one at a time; a failure in one package is
/// reported and recorded, never propagated.
///
/// # Returns
/// * `Ok(RunSummary)` - One outcome per enumerated package
/// * `Err` - Only if the packages root cannot be enumerated
pub fn run_bump_workflow<R: TagRepository + ?Sized>(
    run: &RunConfig,
    settings: &WorkflowSettings,
    repo: &R,
) -> Result<RunSummary> {
    let packages = enumerate_packages(&settings.packages_root, run.package_name.as_deref())?;

    let resolver = TagResolver::new(repo, &settings.pattern, &settings.remote);
    let publisher = TagPublisher::new(repo, &settings.pattern, &settings.remote);
    let mut summary = RunSummary::default();

    for package in &packages {
        ui::display_status(&format!("Resolving latest tag for {}", package));

        let report = resolver.resolve(package);
        for warning in &report.warnings {
            ui::display_boundary_warning(warning);
        }

        let previous = match report.resolution {
            Resolution::Found { version: current, .. } => current,
            Resolution::NotFound => {
                summary.outcomes.push(PackageOutcome::NoValidTag {
                    package: package.name.clone(),
                });
                continue;
            }
        };

        let next = match version::bump_version(
            &previous,
            run.release_level,
            version::is_prerelease(&previous),
            run.bump_prerelease,
        ) {
            Ok(next) => next,
            Err(e) => {
                let message = format!("Cannot bump version {}: {}", previous, e);
                ui::display_failure(&format!("{}: {}", package, message));
                summary.outcomes.push(PackageOutcome::Failed {
                    package: package.name.clone(),
                    message,
                });
                continue;
            }
        };

        if settings.dry_run {
            let tag = publisher.tag_name(package, &next);
            ui::display_dry_run(&package.name, &tag);
            summary.outcomes.push(PackageOutcome::Planned {
                package: package.name.clone(),
                previous,
                next,
                tag,
            });
            continue;
        }

        match publisher.publish(package, &next) {
            Ok(tag) => {
                ui::display_success(&format!(
                    "Updated {} to version {} ({})",
                    package, next, tag
                ));
                summary.outcomes.push(PackageOutcome::Bumped {
                    package: package.name.clone(),
                    previous,
                    next,
                    tag,
                });
            }
            Err(failure) => {
                ui::display_failure(&failure.to_string());
                summary.outcomes.push(PackageOutcome::Failed {
                    package: package.name.clone(),
                    message: failure.to_string(),
                });
            }
        }
    }

    Ok(summary)
}

/// Which tags to move and where
#[derive(Debug, Clone, PartialEq)]
pub struct RetagConfig {
    /// Tags containing this revision are moved
    pub from: String,

    /// Revision the tags are moved to
    pub to: String,

    /// Only move this package's tags; `None` moves every package's
    pub package_name: Option<String>,
}

/// Result of moving one tag
#[derive(Debug, Clone, PartialEq)]
pub enum RetagOutcome {
    Moved { tag: String, target: String },
    /// Dry run: tag would have been moved
    Planned { tag: String, target: String },
    Failed { tag: String, message: String },
}

/// Outcomes of a retag run, in processing order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RetagSummary {
    pub outcomes: Vec<RetagOutcome>,
}

impl RetagSummary {
    pub fn moved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RetagOutcome::Moved { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RetagOutcome::Failed { .. }))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }
}

/// Move every namespace tag containing `retag.from` to `retag.to`.
///
/// Tags are fetched first so remote-only tags are moved too. Each tag is
/// independent; a failed move is recorded and the next tag is processed.
///
/// # Returns
/// * `Ok(RetagSummary)` - One outcome per tag to move, possibly none
/// * `Err` - If fetching tags or resolving `retag.from` fails
pub fn run_retag_workflow<R: TagRepository + ?Sized>(
    retag: &RetagConfig,
    settings: &WorkflowSettings,
    repo: &R,
) -> Result<RetagSummary> {
    let path = settings.packages_root.as_path();
    let mover = TagMover::new(repo, &settings.pattern, &settings.remote);
    let mut summary = RetagSummary::default();

    ui::display_status(&format!("Fetching tags from {}", settings.remote));
    repo.fetch_tags(path, &settings.remote)?;

    let tags = mover.tags_to_move(path, &retag.from, retag.package_name.as_deref())?;
    if tags.is_empty() {
        ui::display_status(&format!(
            "No {} tags contain {}",
            settings.pattern.namespace(),
            retag.from
        ));
        return Ok(summary);
    }

    for tag in tags {
        if settings.dry_run {
            ui::display_retag_dry_run(&tag, &retag.to);
            summary.outcomes.push(RetagOutcome::Planned {
                tag,
                target: retag.to.clone(),
            });
            continue;
        }

        match mover.move_tag(path, &tag, &retag.to) {
            Ok(warnings) => {
                for warning in &warnings {
                    ui::display_boundary_warning(warning);
                }
                ui::display_success(&format!("Moved {} to {}", tag, retag.to));
                summary.outcomes.push(RetagOutcome::Moved {
                    tag,
                    target: retag.to.clone(),
                });
            }
            Err(failure) => {
                ui::display_failure(&failure.to_string());
                summary.outcomes.push(RetagOutcome::Failed {
                    tag,
                    message: failure.to_string(),
                });
            }
        }
    }

    Ok(summary)
}
