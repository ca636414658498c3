//! Frame reader thread feeding a single engine through a bounded queue.

mod dispatch;

pub use dispatch::dispatch_gesture;

use anyhow::{Result, anyhow};
use log::{debug, error, info, warn};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::{
    collections::BTreeMap,
    io::BufRead,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, RecvTimeoutError, SyncSender},
    },
    thread,
    time::Duration,
};

use crate::actions::EventSink;
use crate::config::Profile;
use crate::frame::Frame;
use crate::gestures::{Gesture, GestureEngine};
use crate::input;

const QUEUE_DEPTH: usize = 64;
const POLL: Duration = Duration::from_millis(100);

enum ReaderMsg {
    Frame(usize, Frame),
    BadLine(usize, String),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: usize,
    pub skipped_frames: usize,
    pub bad_lines: usize,
    pub events: BTreeMap<Gesture, usize>,
}

impl RunSummary {
    pub fn count(&self, g: Gesture) -> usize {
        self.events.get(&g).copied().unwrap_or(0)
    }

    pub fn total_events(&self) -> usize {
        self.events.values().sum()
    }
}

/// Set the returned flag on SIGINT/SIGTERM.
pub fn install_stop_handler() -> Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    let flag = stop.clone();
    thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            info!("received signal {sig}, stopping");
            flag.store(true, Ordering::SeqCst);
        }
    });
    Ok(stop)
}

/// Stream every frame from `source` through one engine, dispatching events to
/// `sink`, until EOF or `stop` is raised.
pub fn run_pipeline(
    profile: &Profile,
    source: Box<dyn BufRead + Send>,
    sink: &mut EventSink,
    stop: Arc<AtomicBool>,
) -> Result<RunSummary> {
    let mut engine = GestureEngine::new(profile.thresholds.clone())?;
    let (tx, rx) = mpsc::sync_channel::<ReaderMsg>(QUEUE_DEPTH);

    let reader_stop = stop.clone();
    let reader = thread::spawn(move || read_frames(source, tx, reader_stop));

    let mut summary = RunSummary::default();
    loop {
        if stop.load(Ordering::SeqCst) {
            break;
        }
        let msg = match rx.recv_timeout(POLL) {
            Ok(m) => m,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        match msg {
            ReaderMsg::BadLine(n, e) => {
                warn!("line {n}: unreadable frame: {e}");
                summary.bad_lines += 1;
            }
            ReaderMsg::Frame(n, frame) => {
                summary.frames += 1;
                match engine.process(&frame) {
                    Ok(Some(g)) => {
                        info!("{g} at t={:.3}", frame.timestamp);
                        *summary.events.entry(g).or_default() += 1;
                        if let Err(e) = dispatch_gesture(g, frame.timestamp, profile, sink) {
                            error!("dispatch failed: {e}");
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!("line {n}: skipping frame: {e}");
                        summary.skipped_frames += 1;
                    }
                }
            }
        }
    }

    // On a signal the reader may still be blocked on input; leave it behind.
    if !stop.load(Ordering::SeqCst) {
        reader
            .join()
            .map_err(|_| anyhow!("frame reader panicked"))??;
    }

    info!(
        "processed {} frames ({} skipped, {} bad lines), {} events",
        summary.frames,
        summary.skipped_frames,
        summary.bad_lines,
        summary.total_events()
    );
    Ok(summary)
}

fn read_frames(
    source: Box<dyn BufRead + Send>,
    tx: SyncSender<ReaderMsg>,
    stop: Arc<AtomicBool>,
) -> Result<()> {
    // split on raw bytes so one undecodable line is skipped, not fatal
    for (i, line) in source.split(b'\n').enumerate() {
        if stop.load(Ordering::SeqCst) {
            break;
        }
        let n = i + 1;
        let msg = match input::parse_bytes(&line?) {
            Ok(Some(frame)) => ReaderMsg::Frame(n, frame),
            Ok(None) => continue,
            Err(e) => ReaderMsg::BadLine(n, e.to_string()),
        };
        if tx.send(msg).is_err() {
            debug!("engine gone, reader exiting");
            break;
        }
    }
    Ok(())
}
