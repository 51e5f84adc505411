// crates/darkframe-media/src/worker.rs
//
// ExportWorker: runs one export at a time on a background thread and
// reports through a channel, so the owner's event loop never blocks on
// ffmpeg.
//
// Constructed and shut down explicitly by the owning shell. There is no
// global instance.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use uuid::Uuid;

use darkframe_core::media_types::ExportEvent;

use crate::config::MediaConfig;
use crate::error::ExportError;
use crate::export::{export_timeline, ExportSpec};

pub struct ExportWorker {
    /// Progress / Done / Failed events for every job started on this worker.
    pub rx:   Receiver<ExportEvent>,
    tx:       Sender<ExportEvent>,
    config:   MediaConfig,
    /// Set while a job is running. At most one export in flight.
    busy:     Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
}

/// Clears the busy flag when the job thread is done with it, including on
/// panic inside ffmpeg handling.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ExportWorker {
    pub fn new(config: MediaConfig) -> Self {
        let (tx, rx) = bounded(512);
        Self {
            rx,
            tx,
            config,
            busy:     Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Start `spec` on a background thread and return its job id.
    ///
    /// Fails immediately (no thread, no events) if another export is still
    /// running, the plan is empty, or the worker has been shut down.
    pub fn start(&self, spec: ExportSpec) -> Result<Uuid, ExportError> {
        if self.shutdown.load(Ordering::Acquire) {
            return Err(ExportError::ShuttingDown);
        }
        if spec.plan.is_empty() {
            return Err(ExportError::EmptyPlan);
        }
        if self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ExportError::Busy);
        }

        let job_id = spec.job_id;
        let guard  = BusyGuard(Arc::clone(&self.busy));
        let tx     = self.tx.clone();
        let config = self.config.clone();

        log::info!("[worker] export job {job_id} started");
        thread::spawn(move || {
            let progress_tx = tx.clone();
            let result = export_timeline(&spec, &config, |percent| {
                let _ = progress_tx.send(ExportEvent::Progress { job_id, percent });
            });

            let event = match result {
                Ok(path) => ExportEvent::Done { job_id, path },
                Err(e) => {
                    log::error!("[worker] export job {job_id} failed: {e}");
                    ExportEvent::Failed { job_id, msg: e.to_string() }
                }
            };
            // Free the slot before announcing the result so the owner can
            // start the next job as soon as it sees Done / Failed.
            drop(guard);
            let _ = tx.send(event);
        });

        Ok(job_id)
    }

    /// Refuse further jobs. A job already running finishes and still
    /// reports its terminal event.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use darkframe_core::clip::SourceRef;
    use darkframe_core::media_types::{ExportPlan, ExportRange};

    use crate::export::ExportCodec;

    fn spec() -> ExportSpec {
        let plan = ExportPlan {
            ranges: vec![ExportRange { source: SourceRef::new("talk.mp4"), start: 0.0, end: 2.0 }],
        };
        ExportSpec::new(plan, PathBuf::from("out.mp4"), ExportCodec::StreamCopy)
    }

    fn broken_worker() -> ExportWorker {
        ExportWorker::new(MediaConfig {
            ffmpeg: "/nonexistent/darkframe-ffmpeg".into(),
            ..MediaConfig::default()
        })
    }

    #[test]
    fn failure_is_reported_as_terminal_event() {
        let worker = broken_worker();
        let job = worker.start(spec()).unwrap();

        let mut events = Vec::new();
        loop {
            let ev = worker.rx.recv_timeout(Duration::from_secs(10)).unwrap();
            let done = ev.is_terminal();
            events.push(ev);
            if done { break; }
        }
        assert!(events.iter().all(|e| e.job_id() == job));
        match events.last().unwrap() {
            ExportEvent::Failed { msg, .. } => assert!(msg.contains("not found"), "{msg}"),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(!worker.is_busy());
    }

    #[test]
    fn second_job_while_busy_is_rejected() {
        let worker = broken_worker();
        worker.busy.store(true, Ordering::Release);
        assert!(matches!(worker.start(spec()), Err(ExportError::Busy)));
    }

    #[test]
    fn empty_plan_and_shutdown_reject_synchronously() {
        let worker = broken_worker();
        let empty = ExportSpec::new(ExportPlan::default(), PathBuf::from("o.mp4"), ExportCodec::StreamCopy);
        assert!(matches!(worker.start(empty), Err(ExportError::EmptyPlan)));
        worker.shutdown();
        assert!(matches!(worker.start(spec()), Err(ExportError::ShuttingDown)));
        assert!(worker.rx.try_recv().is_err());
    }
}
