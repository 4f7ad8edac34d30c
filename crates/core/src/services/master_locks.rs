use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::models::MasterId;

type LockTable = StdMutex<HashMap<MasterId, Arc<Mutex<()>>>>;

/// Per-master mutual exclusion for check-then-write sequences.
///
/// Holding the guard for a master serializes every conflict check and the
/// write that follows it for that master's appointments. Different masters
/// never contend. An entry lives only while some caller holds or waits for
/// that master's lock.
#[derive(Debug, Default)]
pub struct MasterLocks {
    table: Arc<LockTable>,
}

/// Exclusive hold on one master's schedule. Released on drop.
#[derive(Debug)]
pub struct MasterGuard {
    master_id: MasterId,
    table: Arc<LockTable>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl MasterLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, master_id: MasterId) -> MasterGuard {
        // The table mutex is never held across an await.
        let lock = {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(table.entry(master_id).or_default())
        };

        MasterGuard {
            master_id,
            table: Arc::clone(&self.table),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Number of masters that currently have a holder or a waiter.
    pub fn tracked(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Drop for MasterGuard {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let idle = table
            .get(&self.master_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1);
        if idle {
            table.remove(&self.master_id);
        }
    }
}
