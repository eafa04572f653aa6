use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::types::Response;

const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(5 * 60);
const WORKER_NAME: &str = "googleanalytics-worker";

pub(crate) type Task = Box<dyn FnOnce() -> Response + Send + 'static>;

struct Job {
    task: Task,
    result: mpsc::SyncSender<Response>,
}

impl Job {
    fn run(self) {
        let response = (self.task)();
        // The caller may have dropped its handle; that is fine.
        let _ = self.result.send(response);
    }
}

enum State {
    Idle,
    Running {
        queue: mpsc::Sender<Job>,
        cancelled: Arc<AtomicBool>,
    },
    Closed,
}

/// Single-worker FIFO dispatch queue. Tasks run strictly in submission
/// order with at most one in flight; the backlog is unbounded. The worker
/// thread is spawned on first use, retires after sitting idle for the
/// configured timeout, and is respawned on demand. Dropping the executor
/// lets already-queued tasks drain; [`Executor::shutdown`] cancels them.
pub struct Executor {
    state: Arc<Mutex<State>>,
    idle_timeout: Duration,
}

impl Executor {
    pub fn new() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::Idle)),
            idle_timeout,
        }
    }

    /// Enqueues a task, returning a handle that resolves with its Response.
    /// Returns `None` once the executor has been shut down.
    pub(crate) fn submit(&self, task: Task) -> Option<ResponseHandle> {
        let (result_tx, result_rx) = mpsc::sync_channel(1);
        let mut job = Job {
            task,
            result: result_tx,
        };

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match &*state {
            State::Closed => return None,
            State::Idle => {}
            State::Running { queue, .. } => match queue.send(job) {
                Ok(()) => return Some(ResponseHandle::pending(result_rx)),
                // The worker died without the retire handshake (a task
                // panicked); fall through and respawn.
                Err(mpsc::SendError(returned)) => job = returned,
            },
        }

        let (queue, jobs) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        // The receiver is still alive in this scope, so the send cannot fail.
        let _ = queue.send(job);
        self.spawn_worker(jobs, cancelled.clone());
        *state = State::Running { queue, cancelled };

        Some(ResponseHandle::pending(result_rx))
    }

    fn spawn_worker(&self, jobs: mpsc::Receiver<Job>, cancelled: Arc<AtomicBool>) {
        let state = self.state.clone();
        let idle_timeout = self.idle_timeout;
        let spawned = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || worker_loop(jobs, cancelled, state, idle_timeout));
        if let Err(e) = spawned {
            // The queued job is dropped with the receiver; its handle
            // resolves to the unset Response.
            warn!(error = %e, "failed to spawn dispatch worker");
        }
    }

    /// Cancels every queued task and releases the worker. A task already
    /// running finishes its current send; worker threads cannot be
    /// interrupted mid-call. Idempotent; later submissions are rejected.
    pub fn shutdown(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if let State::Running { cancelled, .. } = &*state {
            cancelled.store(true, Ordering::Relaxed);
        }
        *state = State::Closed;
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

fn worker_loop(
    jobs: mpsc::Receiver<Job>,
    cancelled: Arc<AtomicBool>,
    state: Arc<Mutex<State>>,
    idle_timeout: Duration,
) {
    loop {
        match jobs.recv_timeout(idle_timeout) {
            Ok(job) => {
                if cancelled.load(Ordering::Relaxed) {
                    debug!("executor shut down, dropping queued tasks");
                    return;
                }
                job.run();
            }
            Err(RecvTimeoutError::Timeout) => {
                // A submission may slip into the queue between the timeout
                // and taking the lock; retire only if it is still empty.
                let mut guard = state.lock().unwrap_or_else(|e| e.into_inner());
                match jobs.try_recv() {
                    Ok(job) => {
                        drop(guard);
                        if cancelled.load(Ordering::Relaxed) {
                            return;
                        }
                        job.run();
                    }
                    Err(_) => {
                        if let State::Running {
                            cancelled: current, ..
                        } = &*guard
                        {
                            if Arc::ptr_eq(current, &cancelled) {
                                *guard = State::Idle;
                            }
                        }
                        debug!("dispatch worker idle, retiring");
                        return;
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}

/// The deferred outcome of a queued send. A handle whose task never ran
/// (client disabled, executor shut down) resolves to the unset Response.
#[derive(Debug)]
pub struct ResponseHandle {
    receiver: Option<mpsc::Receiver<Response>>,
    resolved: Option<Response>,
}

impl ResponseHandle {
    pub(crate) fn ready(response: Response) -> Self {
        Self {
            receiver: None,
            resolved: Some(response),
        }
    }

    pub(crate) fn pending(receiver: mpsc::Receiver<Response>) -> Self {
        Self {
            receiver: Some(receiver),
            resolved: None,
        }
    }

    /// Blocks until the send completes and returns its Response.
    pub fn wait(mut self) -> Response {
        if let Some(response) = self.resolved.take() {
            return response;
        }
        match self.receiver {
            Some(receiver) => receiver.recv().unwrap_or_default(),
            None => Response::default(),
        }
    }

    /// Returns the Response if the send has already completed.
    pub fn try_wait(&mut self) -> Option<Response> {
        if let Some(response) = &self.resolved {
            return Some(response.clone());
        }
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(response) => {
                self.resolved = Some(response.clone());
                Some(response)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                let response = Response::default();
                self.resolved = Some(response.clone());
                Some(response)
            }
        }
    }

    /// Blocks up to `timeout` for the Response.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Option<Response> {
        if let Some(response) = &self.resolved {
            return Some(response.clone());
        }
        let receiver = self.receiver.as_ref()?;
        match receiver.recv_timeout(timeout) {
            Ok(response) => {
                self.resolved = Some(response.clone());
                Some(response)
            }
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                let response = Response::default();
                self.resolved = Some(response.clone());
                Some(response)
            }
        }
    }
}
