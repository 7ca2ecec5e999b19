//! Backend runtime for front ends whose UI thread has no tokio runtime.

use tokio::runtime::{Builder, Runtime};

use crate::error::BridgeError;

const BACKEND_THREAD_NAME: &str = "ladder-backend";

/// Builds the multi-threaded runtime that ladder fetches are spawned onto.
/// Pass `runtime.handle().clone()` to `LadderBridge::with_handle` and keep
/// the runtime alive for as long as the bridge.
pub fn build_backend_runtime(worker_threads: Option<usize>) -> Result<Runtime, BridgeError> {
    let mut builder = Builder::new_multi_thread();
    builder.enable_all().thread_name(BACKEND_THREAD_NAME);
    if let Some(threads) = worker_threads {
        builder.worker_threads(threads.max(1));
    }

    match builder.build() {
        Ok(runtime) => Ok(runtime),
        Err(err) => {
            tracing::error!("failed to build ladder backend runtime: {err}");
            Err(BridgeError::RuntimeBuild(err))
        }
    }
}
