use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use craft_mesh_cpu::ChunkMesh;

use crate::{WorkItem, WorkerContext, process_item};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Busy,
    Done,
}

/// Depth-one mailbox between the main thread and a worker.
struct Slot {
    state: WorkerState,
    item: Option<WorkItem>,
    shutdown: bool,
}

struct Shared {
    slot: Mutex<Slot>,
    cnd: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A background thread that takes one item at a time.
///
/// Only the main thread moves a worker from Idle to Busy and from Done to
/// Idle; only the worker moves it from Busy to Done. A panic while
/// processing still ends in Done, with the item marked `failed`.
pub struct Worker {
    index: usize,
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    fn spawn(index: usize, ctx: Arc<WorkerContext>) -> io::Result<Self> {
        let shared = Arc::new(Shared {
            slot: Mutex::new(Slot {
                state: WorkerState::Idle,
                item: None,
                shutdown: false,
            }),
            cnd: Condvar::new(),
        });
        let thread_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name(format!("craft-worker-{index}"))
            .spawn(move || run(index, &thread_shared, &ctx))?;
        Ok(Self {
            index,
            shared,
            handle: Some(handle),
        })
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> WorkerState {
        self.shared.lock().state
    }

    /// Hands `item` to an idle worker and wakes it. A worker that is not
    /// idle refuses and returns the item.
    pub fn submit(&self, item: WorkItem) -> Result<(), WorkItem> {
        let mut slot = self.shared.lock();
        if slot.state != WorkerState::Idle {
            return Err(item);
        }
        log::trace!(target: "worker", "submit ({}, {}) to worker {}", item.coord.p, item.coord.q, self.index);
        slot.item = Some(item);
        slot.state = WorkerState::Busy;
        self.shared.cnd.notify_all();
        Ok(())
    }

    /// Collects a finished item and returns the worker to Idle.
    pub fn take_done(&self) -> Option<WorkItem> {
        let mut slot = self.shared.lock();
        if slot.state != WorkerState::Done {
            return None;
        }
        slot.state = WorkerState::Idle;
        slot.item.take()
    }

    /// Blocks until the worker is Done or `timeout` passes, then behaves
    /// like `take_done`.
    pub fn wait_done(&self, timeout: Duration) -> Option<WorkItem> {
        let deadline = Instant::now() + timeout;
        let mut slot = self.shared.lock();
        while slot.state == WorkerState::Busy {
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            slot = self
                .shared
                .cnd
                .wait_timeout(slot, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
        if slot.state != WorkerState::Done {
            return None;
        }
        slot.state = WorkerState::Idle;
        slot.item.take()
    }

    fn shutdown(&mut self) {
        {
            let mut slot = self.shared.lock();
            slot.shutdown = true;
            self.shared.cnd.notify_all();
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!(target: "worker", "worker {} panicked", self.index);
            }
        }
    }
}

fn run(index: usize, shared: &Shared, ctx: &WorkerContext) {
    loop {
        let mut item = {
            let mut slot = shared.lock();
            loop {
                if slot.shutdown {
                    log::trace!(target: "worker", "worker {} exiting", index);
                    return;
                }
                if slot.state == WorkerState::Busy {
                    if let Some(item) = slot.item.take() {
                        break item;
                    }
                }
                slot = shared.cnd.wait(slot).unwrap_or_else(PoisonError::into_inner);
            }
        };
        log::trace!(target: "worker", "worker {} woke for ({}, {}) load={}", index, item.coord.p, item.coord.q, item.load);
        if panic::catch_unwind(AssertUnwindSafe(|| process_item(&mut item, ctx))).is_err() {
            log::error!(target: "worker", "worker {} panicked on ({}, {})", index, item.coord.p, item.coord.q);
            item.failed = true;
            item.mesh = ChunkMesh::default();
        }
        log::trace!(
            target: "worker",
            "worker {} done ({}, {}): {} faces, load {}ms bake {}ms",
            index,
            item.coord.p,
            item.coord.q,
            item.mesh.faces,
            item.t_load_ms,
            item.t_bake_ms
        );
        let mut slot = shared.lock();
        slot.item = Some(item);
        slot.state = WorkerState::Done;
        shared.cnd.notify_all();
    }
}

/// Fixed set of workers. Dropping the pool stops and joins every thread.
pub struct WorkerPool {
    workers: Vec<Worker>,
}

impl WorkerPool {
    pub fn new(count: usize, ctx: WorkerContext) -> io::Result<Self> {
        let ctx = Arc::new(ctx);
        let workers = (0..count.max(1))
            .map(|i| Worker::spawn(i, Arc::clone(&ctx)))
            .collect::<io::Result<Vec<_>>>()?;
        log::info!(target: "worker", "started {} chunk workers", workers.len());
        Ok(Self { workers })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn state(&self, i: usize) -> WorkerState {
        self.workers[i].state()
    }

    pub fn submit(&self, i: usize, item: WorkItem) -> Result<(), WorkItem> {
        self.workers[i].submit(item)
    }

    pub fn take_done(&self, i: usize) -> Option<WorkItem> {
        self.workers[i].take_done()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        for worker in &mut self.workers {
            worker.shutdown();
        }
    }
}
