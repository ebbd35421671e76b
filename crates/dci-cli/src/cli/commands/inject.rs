//! `dci <LIBPATH> <LIBURL>` – replace (or with -d evict) the cache entries.

use anyhow::{Context, Result};
use dci_core::config::DciConfig;
use dci_core::inject::{inject, Action};

use crate::cli::{cache_roots, InjectArgs};

pub async fn run_inject(args: &InjectArgs, cfg: &DciConfig) -> Result<()> {
    let (Some(libpath), Some(liburl)) = (&args.libpath, &args.liburl) else {
        anyhow::bail!("both <LIBPATH> and <LIBURL> are required");
    };

    let action = Action::from_flags(args.delete, args.symlink);
    let mut options = cfg.inject_options(action);
    if let Some(jobs) = args.jobs {
        options.jobs = jobs.max(1);
    }
    options.keep_going |= args.keep_going;

    let roots = cache_roots(&args.common, cfg);
    let report = inject(roots.as_ref(), libpath, liburl, &options)
        .await
        .with_context(|| format!("cannot update the cache for {}", liburl))?;

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("failed: {}: {}", failure.url, failure.error);
        }
        anyhow::bail!(
            "{} of {} file(s) could not be updated",
            report.failures.len(),
            report.failures.len() + report.outcomes.len()
        );
    }

    tracing::debug!(
        files = report.outcomes.len(),
        removed = report.removed(),
        written = report.written(),
        "done"
    );

    if action == Action::Delete {
        println!(
            "All files for {} found in {} are removed from the cache",
            liburl,
            libpath.display()
        );
    } else {
        println!(
            "All files for {} in the cache are replaced with files in {}",
            liburl,
            libpath.display()
        );
    }
    Ok(())
}
