//! Runtime abstraction layer for async operations
//!
//! The minimap core is single threaded; the only asynchronous work it starts
//! is the fire-and-forget friend location publish. This module lets that
//! work run on whatever executor the host has (Tokio, WASM, or inline).

use crate::prelude::{Future, Pin};

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(
        &self,
        future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
    ) -> Box<dyn AsyncHandle>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

/// Default spawner implementations
pub mod spawners {
    use super::*;

    /// Handle for work that already ran or was never started.
    pub struct CompletedHandle;

    impl AsyncHandle for CompletedHandle {
        fn is_finished(&self) -> bool {
            true
        }

        fn cancel(&self) {}
    }

    /// Forwards to whatever [`runtime()`] resolves to.
    pub struct GlobalSpawner;

    impl AsyncSpawner for GlobalSpawner {
        fn spawn_boxed(
            &self,
            future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
        ) -> Box<dyn AsyncHandle> {
            runtime().spawn_boxed(future)
        }
    }

    /// Runs each future to completion on the calling thread.
    ///
    /// Meant for tests and hosts without an executor; it blocks the caller.
    pub struct InlineSpawner;

    impl AsyncSpawner for InlineSpawner {
        fn spawn_boxed(
            &self,
            future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
        ) -> Box<dyn AsyncHandle> {
            futures::executor::block_on(future);
            Box::new(CompletedHandle)
        }
    }

    /// Drops every task. Used when no async runtime feature is enabled.
    pub struct DisabledSpawner;

    impl AsyncSpawner for DisabledSpawner {
        fn spawn_boxed(
            &self,
            _future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
        ) -> Box<dyn AsyncHandle> {
            log::warn!("no async runtime available, dropping background task");
            Box::new(CompletedHandle)
        }
    }

    #[cfg(feature = "tokio-runtime")]
    pub mod tokio_impl {
        use super::*;
        use ::tokio::task::JoinHandle;

        /// Tokio-based async spawner
        pub struct TokioSpawner;

        impl AsyncSpawner for TokioSpawner {
            fn spawn_boxed(
                &self,
                future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
            ) -> Box<dyn AsyncHandle> {
                match ::tokio::runtime::Handle::try_current() {
                    Ok(handle) => Box::new(TokioHandle(handle.spawn(future))),
                    Err(e) => {
                        log::warn!("not inside a tokio runtime, dropping task: {}", e);
                        Box::new(CompletedHandle)
                    }
                }
            }
        }

        struct TokioHandle(JoinHandle<()>);

        impl AsyncHandle for TokioHandle {
            fn is_finished(&self) -> bool {
                self.0.is_finished()
            }

            fn cancel(&self) {
                self.0.abort();
            }
        }
    }

    #[cfg(feature = "wasm")]
    pub mod wasm {
        use super::*;
        use crate::prelude::{Arc, Mutex};

        /// WASM-compatible async spawner
        pub struct WasmSpawner;

        impl AsyncSpawner for WasmSpawner {
            fn spawn_boxed(
                &self,
                future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
            ) -> Box<dyn AsyncHandle> {
                let finished = Arc::new(Mutex::new(false));
                let finished_clone = finished.clone();

                wasm_bindgen_futures::spawn_local(async move {
                    future.await;
                    if let Ok(mut f) = finished_clone.lock() {
                        *f = true;
                    }
                });

                Box::new(WasmHandle { finished })
            }
        }

        struct WasmHandle {
            finished: Arc<Mutex<bool>>,
        }

        impl AsyncHandle for WasmHandle {
            fn is_finished(&self) -> bool {
                self.finished.lock().map(|f| *f).unwrap_or(true)
            }

            fn cancel(&self) {
                // WASM tasks can't be cancelled easily, just mark as finished
                if let Ok(mut finished) = self.finished.lock() {
                    *finished = true;
                }
            }
        }
    }
}

/// Global runtime instance
static RUNTIME: std::sync::OnceLock<Box<dyn AsyncSpawner>> = std::sync::OnceLock::new();

/// Initialize the runtime with a specific spawner. Only the first call wins.
pub fn init_runtime(spawner: Box<dyn AsyncSpawner>) {
    let _ = RUNTIME.set(spawner);
}

/// Get the global runtime spawner
pub fn runtime() -> &'static dyn AsyncSpawner {
    RUNTIME
        .get_or_init(|| {
            #[cfg(feature = "tokio-runtime")]
            {
                Box::new(spawners::tokio_impl::TokioSpawner)
            }

            #[cfg(all(feature = "wasm", not(feature = "tokio-runtime")))]
            {
                Box::new(spawners::wasm::WasmSpawner)
            }

            #[cfg(not(any(feature = "tokio-runtime", feature = "wasm")))]
            {
                Box::new(spawners::DisabledSpawner)
            }
        })
        .as_ref()
}
