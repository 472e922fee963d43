//! Process-wide audio output handle.
//!
//! One lazily-initialized `OutputStream` for the whole process, opened on
//! first use and torn down explicitly from the app exit hook - never
//! re-instantiated per playback request. cpal streams are not `Send`, so
//! the handle lives in a thread-local on the UI thread that first touched
//! it; sinks borrow the mixer through [`with_mixer`].

use log::{info, warn};
use rodio::mixer::Mixer;
use rodio::{OutputStream, OutputStreamBuilder};
use std::cell::RefCell;

thread_local! {
    static OUTPUT: RefCell<Output> = const { RefCell::new(Output::Closed) };
}

enum Output {
    /// Not opened yet; first [`with_mixer`] call opens it.
    Closed,
    Open(OutputStream),
    /// Open attempted and failed; stays failed so every frame doesn't
    /// re-knock on a missing device.
    Failed,
    /// Explicitly torn down; no reopening afterwards.
    TornDown,
}

/// Run `f` with the global mixer, opening the output on first use.
///
/// `f` receives `None` when no audio device is available or after
/// [`teardown`]; callers fall back to silent playback in that case.
pub fn with_mixer<R>(f: impl FnOnce(Option<&Mixer>) -> R) -> R {
    OUTPUT.with(|cell| {
        let mut output = cell.borrow_mut();

        if matches!(*output, Output::Closed) {
            *output = match OutputStreamBuilder::open_default_stream() {
                Ok(stream) => {
                    info!("Audio output opened");
                    Output::Open(stream)
                }
                Err(e) => {
                    warn!("No audio output available: {}", e);
                    Output::Failed
                }
            };
        }

        match &*output {
            Output::Open(stream) => f(Some(stream.mixer())),
            _ => f(None),
        }
    })
}

/// Drop the output stream. Called from the app exit hook.
pub fn teardown() {
    OUTPUT.with(|cell| {
        let mut output = cell.borrow_mut();
        if matches!(*output, Output::Open(_)) {
            info!("Audio output torn down");
        }
        *output = Output::TornDown;
    });
}
