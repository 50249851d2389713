//! The weekly acquisition pipeline.
//!
//! Phase 1 fetches every court's room-assignment table in one concurrent
//! batch; the distinct dates and rooms discovered there parameterize phase
//! 2, which fetches one case table per (court, date, room). Phase 1 must
//! fully complete before phase 2's requests can even be built. Results are
//! assembled per court, projected to rows, and written. Any fetch, parse,
//! or alignment failure aborts the run before the sink or the state marker
//! is touched; partial court coverage is never produced.

use tracing::{info, warn};

use crate::assemble::{assemble_court_weeks, zip_exact, KeyedCases};
use crate::error::PipelineError;
use crate::models::{week_label, Court, WeekInfo};
use crate::portal::{
    build_case_queries, build_room_queries, dispatch_case_batches, dispatch_room_batch,
    extract_cases, extract_room_assignments, Fetch,
};
use crate::report::{project, CaptionFilter};
use crate::sink::Sink;
use crate::state::StateStore;

/// Knobs for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Process the week even when the marker says it was already done.
    pub force: bool,
    /// Run everything but write neither sheets nor marker.
    pub dry_run: bool,
}

/// What a run did.
#[derive(Debug)]
pub enum RunOutcome {
    /// The stored marker matched the computed week label; nothing fetched
    /// beyond phase 1, nothing written.
    Skipped { week_label: String },
    /// Full pipeline ran.
    Completed {
        week_label: String,
        courts: usize,
        rows: usize,
        filtered: usize,
    },
}

/// Run the full fetch-and-normalize pipeline for the current week.
pub async fn run_week(
    fetch: &dyn Fetch,
    courts: Vec<Court>,
    filter: &CaptionFilter,
    sink: &dyn Sink,
    state: &dyn StateStore,
    options: RunOptions,
) -> Result<RunOutcome, PipelineError> {
    if courts.is_empty() {
        return Err(PipelineError::Validation("court list is empty".into()));
    }

    // Phase 1: room assignments, one request per court, one batch.
    let room_queries = build_room_queries(&courts)?;
    info!(courts = courts.len(), "fetching room-assignment tables");
    let room_bodies = dispatch_room_batch(fetch, &room_queries).await?;

    let assignments_per_court = room_bodies
        .iter()
        .map(|body| extract_room_assignments(body))
        .collect::<Result<Vec<_>, _>>()?;

    let weeks_per_court: Vec<WeekInfo> = assignments_per_court
        .iter()
        .map(|assignments| WeekInfo::from_assignments(assignments))
        .collect();

    // The week label comes from the first court's date range, by convention.
    let label = week_label(&weeks_per_court[0].dates).ok_or_else(|| {
        PipelineError::Validation(
            "first court returned no room-assignment dates; cannot label the week".into(),
        )
    })?;
    info!(week = %label, "computed week label");

    if !options.force && state.last_week_label()?.as_deref() == Some(label.as_str()) {
        info!(week = %label, "week already processed; skipping");
        return Ok(RunOutcome::Skipped { week_label: label });
    }

    // Phase 2: one case request per (court, date, room) combination.
    let case_groups = {
        let pairs: Vec<(&Court, &WeekInfo)> =
            courts.iter().zip(weeks_per_court.iter()).collect();
        build_case_queries(&pairs)
    };
    let total_case_queries: usize = case_groups.iter().map(|g| g.len()).sum();
    info!(requests = total_case_queries, "fetching case tables");
    let case_bodies = dispatch_case_batches(fetch, &case_groups).await?;

    let keyed_cases_per_court = zip_exact(case_groups, case_bodies, "case bodies per court")?
        .into_iter()
        .map(|(queries, bodies)| {
            zip_exact(queries, bodies, "case bodies per query")?
                .into_iter()
                .map(|(query, body)| {
                    let cases = extract_cases(&body)?;
                    let (date, room) = (query.date, query.room);
                    Ok(((date, room), cases))
                })
                .collect::<Result<KeyedCases, PipelineError>>()
        })
        .collect::<Result<Vec<KeyedCases>, PipelineError>>()?;

    let court_weeks = assemble_court_weeks(
        courts,
        assignments_per_court,
        weeks_per_court,
        keyed_cases_per_court,
    )?;
    let report = project(&court_weeks, filter);
    info!(
        courts = court_weeks.len(),
        rows = report.all.len(),
        filtered = report.filtered.len(),
        "assembled weekly report"
    );

    if options.dry_run {
        warn!("dry run: sheets and marker not written");
    } else {
        sink.write_report(&label, &report)?;
        state.record_week_label(&label)?;
    }

    Ok(RunOutcome::Completed {
        week_label: label,
        courts: court_weeks.len(),
        rows: report.all.len(),
        filtered: report.filtered.len(),
    })
}
