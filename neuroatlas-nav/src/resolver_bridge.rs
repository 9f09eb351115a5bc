//! The bridge between the navigator and its region-resolution worker.
//!
//! Resolution crosses the lookup-table boundary and must never stall
//! navigation, so it runs on a dedicated thread fed over a channel. The
//! worker always drains its queue to the most recent request before
//! resolving — a burst of pointer drags collapses to one lookup — and the
//! navigator applies a response only while its coordinate still matches,
//! so a slow lookup can never clobber a newer one.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use tracing::debug;

use neuroatlas_core::{Coordinate, Region, RegionSource, RegionTable};

pub(crate) enum ResolverCommand {
    /// Resolve the regions at `coordinate`. `id` is a monotonically
    /// increasing request generation, carried through for observability.
    Resolve { id: u64, coordinate: Coordinate },
    /// Swap the lookup table. `None` degrades resolution to the
    /// background sentinel until a table arrives.
    SetTable(Option<Arc<RegionTable>>),
}

pub(crate) struct ResolveOutcome {
    pub(crate) id: u64,
    pub(crate) coordinate: Coordinate,
    pub(crate) regions: Vec<Region>,
}

/// Spawn the resolver worker thread.
///
/// Returns the send side for commands and the receive side for outcomes.
/// The thread runs until the command sender is dropped.
pub(crate) fn spawn_resolver_worker(
) -> (mpsc::Sender<ResolverCommand>, mpsc::Receiver<ResolveOutcome>) {
    let (command_tx, command_rx) = mpsc::channel::<ResolverCommand>();
    let (outcome_tx, outcome_rx) = mpsc::channel::<ResolveOutcome>();

    thread::Builder::new()
        .name("region-resolver".into())
        .spawn(move || {
            debug!("region resolver worker started");
            resolver_worker(command_rx, outcome_tx);
            debug!("region resolver worker exiting");
        })
        .expect("failed to spawn region resolver thread");

    (command_tx, outcome_rx)
}

fn resolver_worker(rx: mpsc::Receiver<ResolverCommand>, tx: mpsc::Sender<ResolveOutcome>) {
    let mut table: Option<Arc<RegionTable>> = None;

    while let Ok(first) = rx.recv() {
        // Drain to the latest resolve request, applying any table swaps
        // encountered on the way.
        let mut pending = None;
        let mut command = Some(first);
        while let Some(c) = command.take() {
            match c {
                ResolverCommand::SetTable(t) => table = t,
                ResolverCommand::Resolve { id, coordinate } => pending = Some((id, coordinate)),
            }
            command = rx.try_recv().ok();
        }

        let Some((id, coordinate)) = pending else {
            continue;
        };
        let regions = match &table {
            Some(table) => table.resolve(coordinate),
            None => vec![Region::background()],
        };
        if tx
            .send(ResolveOutcome {
                id,
                coordinate,
                regions,
            })
            .is_err()
        {
            return;
        }
    }
}
