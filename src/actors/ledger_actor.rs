use chrono::{Local, NaiveDateTime};
use tokio::sync::{mpsc, oneshot};
use tokio::task::{spawn_blocking, JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::commands::Command;
use crate::engine::{LedgerEngine, Outcome};
use crate::models::LedgerError;
use crate::storage::Store;

const BACKPRESSURE: usize = 64;

struct Request {
    command: Command,
    reply: oneshot::Sender<Result<Outcome, LedgerError>>
}

/// Owns the ledger engine and runs commands strictly one after another.
///
/// Each command, including the read-then-append of a reimbursement, finishes
/// before the next one is received, so two requests can never both see the
/// same stale headroom.
pub struct LedgerActor {
    sender: mpsc::Sender<Request>,
    worker: JoinHandle<()>
}

impl LedgerActor {
    /// Spawns the actor on the blocking pool; store I/O is synchronous.
    pub fn new<S: Store>(engine: LedgerEngine<S>) -> Self {
        Self::with_clock(engine, || Local::now().naive_local())
    }

    /// Like [`LedgerActor::new`] with a custom source for the current time.
    pub fn with_clock<S: Store>(mut engine: LedgerEngine<S>, clock: fn() -> NaiveDateTime) -> Self {
        let (sender, mut receiver) = mpsc::channel::<Request>(BACKPRESSURE);

        let worker = spawn_blocking(move || {
            while let Some(request) = receiver.blocking_recv() {
                let result = engine.execute(request.command, clock());

                if request.reply.send(result).is_err() {
                    warn!("Ledger reply was dropped before it could be delivered");
                }
            }

            debug!("Ledger actor stopped");
        });

        Self {
            sender,
            worker
        }
    }

    /// Queues a command and waits for its outcome.
    pub async fn submit(&self, command: Command) -> Result<Outcome, LedgerError> {
        let (reply, response) = oneshot::channel();

        self.sender.send(Request { command, reply }).await
            .map_err(|_| LedgerError::Stopped)?;

        response.await.map_err(|_| LedgerError::Stopped)?
    }

    /// Stops accepting commands and waits for the queued ones to finish.
    pub async fn despawn(self) -> Result<(), JoinError> {
        drop(self.sender);
        self.worker.await
    }
}
