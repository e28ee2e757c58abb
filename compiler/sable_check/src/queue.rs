//! Fixpoint driver for one package.
//!
//! Statements are checked in order; a requeued statement goes to the back
//! of the next pass. The loop ends when the queue drains or when a full
//! pass completes without a single statement finishing, which means the
//! remaining statements form an unsatisfiable dependency cycle.

use std::collections::VecDeque;

use sable_ir::{Decl, NodeId};
use tracing::debug;

use crate::checker::{CheckOutcome, Checker};
use crate::package::Package;
use crate::session::Session;

/// Terminal state of a package's checking run.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum QueueResult {
    /// Every statement finished (some may have poisoned their symbols).
    Complete { passes: u32 },
    /// A pass made no progress; the listed statements are mutually blocked
    /// on symbols that can never resolve.
    Stuck { unresolved: Vec<NodeId> },
}

/// Collect top-level symbols, then check all statements to a fixed point.
pub fn check_package(session: &Session, package: &mut Package, decls: &[Decl]) -> QueueResult {
    package.collect_symbols(decls, &*session.interner);

    let mut queue: VecDeque<&Decl> = decls.iter().collect();
    let mut passes = 0u32;

    while !queue.is_empty() {
        passes += 1;
        let mut requeued: VecDeque<&Decl> = VecDeque::new();
        let mut progressed = false;

        while let Some(decl) = queue.pop_front() {
            match Checker::new(session, package).check(decl) {
                CheckOutcome::Done => progressed = true,
                CheckOutcome::Requeue => requeued.push_back(decl),
            }
        }

        debug!(pass = passes, remaining = requeued.len(), "checking pass");

        if !requeued.is_empty() && !progressed {
            return QueueResult::Stuck {
                unresolved: requeued.iter().map(|d| d.id).collect(),
            };
        }
        queue = requeued;
    }

    QueueResult::Complete { passes }
}
