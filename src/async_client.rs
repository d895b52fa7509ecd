//! Async wrapper around [`Dashboard`] for use in async runtimes (Tokio, etc.).
//!
//! Render cycles block on HTTP and DuckDB, so every call is moved onto the
//! blocking thread pool via [`tokio::task::spawn_blocking`].
//!
//! # Example
//!
//! ```no_run
//! use crypto_dashboard::{AsyncDashboard, Selection};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let dashboard = AsyncDashboard::yahoo().await.unwrap();
//!     let selection = Selection::new("BTC-USD").unwrap().month(3);
//!     let (outcome, charts) = dashboard.render(selection).await.unwrap();
//!     println!("{:?} {}", outcome, charts.to_json());
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::chart::PlotlyRenderer;
use crate::dashboard::{Dashboard, RenderOutcome, Selection};
use crate::error::{DashboardError, Result};
use crate::source::{DataSource, YahooSource};

/// Async wrapper around [`Dashboard`].
///
/// The dashboard sits behind a [`Mutex`], so concurrent requests run one
/// render cycle at a time.
pub struct AsyncDashboard<S> {
    inner: Arc<Mutex<Dashboard<S>>>,
}

impl<S> Clone for AsyncDashboard<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl AsyncDashboard<YahooSource> {
    /// Build a Yahoo-backed dashboard on the blocking pool.
    pub async fn yahoo() -> Result<Self> {
        tokio::task::spawn_blocking(|| Dashboard::yahoo().map(Self::new))
            .await
            .map_err(|e| DashboardError::Task(format!("join error: {e}")))?
    }
}

impl<S: DataSource + Send + 'static> AsyncDashboard<S> {
    pub fn new(dashboard: Dashboard<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(dashboard)),
        }
    }

    /// Run a sync operation against the dashboard on the blocking pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Dashboard<S>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let dashboard = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = dashboard
                .lock()
                .map_err(|_| DashboardError::Task("dashboard lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| DashboardError::Task(format!("join error: {e}")))?
    }

    /// Render `selection` into a fresh [`PlotlyRenderer`].
    pub async fn render(&self, selection: Selection) -> Result<(RenderOutcome, PlotlyRenderer)> {
        self.run(move |d| {
            let mut renderer = PlotlyRenderer::new();
            let outcome = d.render(&selection, &mut renderer)?;
            Ok((outcome, renderer))
        })
        .await
    }
}
