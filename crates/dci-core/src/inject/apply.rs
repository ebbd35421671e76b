//! Applying a plan: one unit per cache slot, bounded by `jobs`.

use tokio::task::JoinSet;

use crate::error::Result;
use crate::sidecar::MetadataSidecar;
use crate::storage;

use super::plan::PlannedSlot;
use super::report::{InjectReport, SlotFailure, SlotOutcome};
use super::{Action, InjectOptions};

/// Replaces one slot: ensure directory, remove occupant, place content, write sidecar.
pub(crate) async fn apply_slot(planned: PlannedSlot, action: Action) -> Result<SlotOutcome> {
    let dest = planned.slot.destination();
    let source = planned.source.path;

    storage::ensure_dir(&planned.slot.directory).await?;

    let replaced = storage::remove_occupant(&dest).await?;
    if replaced {
        tracing::info!("delete: {}", dest.display());
    }

    match action {
        Action::Delete => {}
        Action::Symlink => storage::link_into(&source, &dest).await?,
        Action::Copy => storage::copy_into(&source, &dest).await?,
    }

    if action != Action::Delete {
        tracing::info!("{}: {} => {}", action, source.display(), dest.display());
        let sidecar = MetadataSidecar::for_url(&planned.url).to_json()?;
        storage::write_atomic(&planned.slot.metadata_path(), sidecar.as_bytes()).await?;
    }

    Ok(SlotOutcome {
        url: planned.url,
        source,
        destination: dest,
        action,
        replaced,
    })
}

/// Runs every planned slot with at most `options.jobs` in flight.
///
/// Without `keep_going` the first failure is returned and unfinished units are
/// aborted. With it, failures are recorded and the rest still run.
pub(crate) async fn run_plan(
    plan: Vec<PlannedSlot>,
    options: &InjectOptions,
) -> Result<InjectReport> {
    let max_concurrent = options.jobs.max(1);
    let action = options.action;
    let mut pending = plan.into_iter();
    let mut join_set = JoinSet::new();
    let mut report = InjectReport::default();

    loop {
        while join_set.len() < max_concurrent {
            let Some(planned) = pending.next() else {
                break;
            };
            join_set.spawn(async move {
                let url = planned.url.clone();
                (url, apply_slot(planned, action).await)
            });
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let (url, outcome) = res?;
        match outcome {
            Ok(outcome) => report.outcomes.push(outcome),
            Err(error) if options.keep_going => {
                tracing::warn!(url = %url, "slot failed: {}", error);
                report.failures.push(SlotFailure { url, error });
            }
            Err(error) => return Err(error),
        }
    }

    report.sort();
    Ok(report)
}
