//! Async wrapper around [`DsrSdk`] for use in async runtimes (Tokio, etc.).
//!
//! The built-in rate provider uses a blocking HTTP client, so every SDK
//! operation is dispatched to Tokio's blocking pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use dsr_sdk::{AsyncDsrSdk, Commitments, IncomeProfile, Jurisdiction};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncDsrSdk::builder().build().await.unwrap();
//!
//!     let income = IncomeProfile::new(6000.0, 0.0, 0.0, Jurisdiction::Singapore);
//!     let result = sdk
//!         .calculate(income, Commitments::new(1500.0, 2500.0))
//!         .await
//!         .unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let max_loan = sdk.run(move |s| Ok(s.max_loan(&result))).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::config::CalculatorConfig;
use crate::error::{DsrError, Result};
use crate::models::{AppliedRate, Commitments, DsrResult, IncomeProfile, Jurisdiction};
use crate::rates::ExchangeRateProvider;
use crate::{DsrSdk, DsrSdkBuilder};

// ---------------------------------------------------------------------------
// AsyncDsrSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDsrSdk`] instance.
pub struct AsyncDsrSdkBuilder {
    inner: DsrSdkBuilder,
}

impl Default for AsyncDsrSdkBuilder {
    fn default() -> Self {
        Self {
            inner: DsrSdk::builder(),
        }
    }
}

impl AsyncDsrSdkBuilder {
    /// Set a custom directory for the persisted exchange-rate cache.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        let dir: PathBuf = path.as_ref().to_path_buf();
        self.inner = self.inner.cache_dir(dir);
        self
    }

    /// Keep exchange rates in memory only.
    pub fn in_memory_cache(mut self) -> Self {
        self.inner = self.inner.in_memory_cache();
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.inner = self.inner.offline(offline);
        self
    }

    /// Set the HTTP request timeout for rate fetches.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.inner = self.inner.refresh_interval(interval);
        self
    }

    pub fn config(mut self, config: CalculatorConfig) -> Self {
        self.inner = self.inner.config(config);
        self
    }

    pub fn rate_provider<P: ExchangeRateProvider + 'static>(mut self, provider: P) -> Self {
        self.inner = self.inner.rate_provider(provider);
        self
    }

    /// Build the async SDK.
    ///
    /// Opening the on-disk cache runs on the blocking thread pool so it won't
    /// block the async event loop.
    pub async fn build(self) -> Result<AsyncDsrSdk> {
        let builder = self.inner;
        tokio::task::spawn_blocking(move || {
            let sdk = builder.build()?;
            Ok(AsyncDsrSdk {
                inner: Arc::new(sdk),
            })
        })
        .await
        .map_err(|e| DsrError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncDsrSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`DsrSdk`].
///
/// The SDK holds no per-call state, so it is shared through an [`Arc`]
/// without a lock and calls may run concurrently.
#[derive(Clone)]
pub struct AsyncDsrSdk {
    inner: Arc<DsrSdk>,
}

impl AsyncDsrSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncDsrSdkBuilder {
        AsyncDsrSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives a `&DsrSdk` reference and should return a
    /// `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&DsrSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(|e| DsrError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Compute a DSR result without blocking the executor on the rate fetch.
    pub async fn calculate(
        &self,
        income: IncomeProfile,
        commitments: Commitments,
    ) -> Result<DsrResult> {
        self.run(move |s| Ok(s.calculate(&income, &commitments)))
            .await
    }

    /// Rate currently applied to `jurisdiction`'s income.
    pub async fn exchange_rate(&self, jurisdiction: Jurisdiction) -> Result<Option<AppliedRate>> {
        self.run(move |s| Ok(s.exchange_rate(jurisdiction))).await
    }

    /// Discard cached exchange rates.
    pub async fn refresh(&self) -> Result<()> {
        self.run(|s| s.refresh()).await
    }

    /// Release the SDK on the blocking pool.
    ///
    /// The blocking HTTP client must not be dropped inside an async context;
    /// call this instead of dropping the last handle from async code once a
    /// live rate has been fetched.
    pub async fn close(self) -> Result<()> {
        let sdk = self.inner;
        tokio::task::spawn_blocking(move || drop(sdk))
            .await
            .map_err(|e| DsrError::InvalidArgument(format!("Task join error: {e}")))
    }
}
