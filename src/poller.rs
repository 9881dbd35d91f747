//! Periodic insight poller.
//!
//! Fetches `/api/insights` on a fixed period, caches the tooltip, alert and
//! recommendation slices, and renders tooltips and alerts into a [`Page`].
//! A failed fetch keeps the previous cache and renders nothing.
//!
//! Each tick launches its own refresh without waiting for the previous one,
//! so a slow response can land after a newer one and overwrite it.

use crate::dom::{Notice, Page};
use crate::errors::FetchError;
use crate::models::{AlertNotice, InsightsPayload, Recommendation, TooltipBinding};
use crate::source::InsightSource;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

pub const ALERT_CONTAINER_ID: &str = "agent-alerts";
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightCache {
    pub tooltips: Vec<TooltipBinding>,
    pub alerts: Vec<AlertNotice>,
    pub recommendations: Vec<Recommendation>,
}

impl InsightCache {
    fn replace(&mut self, payload: InsightsPayload) {
        self.tooltips = payload.tooltips;
        self.alerts = payload.alerts;
        self.recommendations = payload.recommendations;
    }
}

struct Inner<S, P> {
    source: S,
    page: Mutex<P>,
    cache: Mutex<InsightCache>,
    period: Duration,
    refreshes: AtomicU64,
    failures: AtomicU64,
}

pub struct InsightPoller<S, P> {
    inner: Arc<Inner<S, P>>,
}

impl<S, P> Clone for InsightPoller<S, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, P> InsightPoller<S, P>
where
    S: InsightSource + 'static,
    P: Page + 'static,
{
    pub fn new(source: S, page: P) -> Self {
        Self::with_period(source, page, DEFAULT_REFRESH_INTERVAL)
    }

    pub fn with_period(source: S, page: P, period: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                page: Mutex::new(page),
                cache: Mutex::new(InsightCache::default()),
                period,
                refreshes: AtomicU64::new(0),
                failures: AtomicU64::new(0),
            }),
        }
    }

    pub fn period(&self) -> Duration {
        self.inner.period
    }

    /// Sets up the page, runs the first cycle, then schedules the rest.
    ///
    /// The returned handle owns the recurring task; dropping it leaves the
    /// task running.
    pub async fn initialize(&self) -> RefreshHandle {
        {
            let mut page = self.inner.page.lock().await;
            if page.ensure_container(ALERT_CONTAINER_ID) {
                debug!("created alert container #{ALERT_CONTAINER_ID}");
            }
            for id in page.tooltip_triggers() {
                page.dispose_tooltip(&id);
                page.attach_tooltip(&id);
            }
        }

        let _ = self.refresh().await;
        info!(period_secs = self.inner.period.as_secs(), "insight poller active");
        self.schedule()
    }

    /// Runs one fetch-and-render cycle.
    pub async fn refresh(&self) -> Result<(), FetchError> {
        match self.inner.source.fetch().await {
            Ok(payload) => {
                self.inner.cache.lock().await.replace(payload);
                self.inner.refreshes.fetch_add(1, Ordering::Relaxed);
                self.render().await;
                Ok(())
            }
            Err(err) => {
                self.inner.failures.fetch_add(1, Ordering::Relaxed);
                warn!("insights refresh failed: {err}");
                Err(err)
            }
        }
    }

    pub async fn render(&self) {
        let cache = self.snapshot().await;
        let mut page = self.inner.page.lock().await;
        sync_tooltips(&mut *page, &cache.tooltips);
        render_alerts(&mut *page, &cache.alerts);
        debug!(
            tooltips = cache.tooltips.len(),
            alerts = cache.alerts.len(),
            recommendations = cache.recommendations.len(),
            "rendered insights"
        );
    }

    pub async fn snapshot(&self) -> InsightCache {
        self.inner.cache.lock().await.clone()
    }

    pub async fn page(&self) -> MutexGuard<'_, P> {
        self.inner.page.lock().await
    }

    /// Successful refresh cycles so far.
    pub fn refreshes(&self) -> u64 {
        self.inner.refreshes.load(Ordering::Relaxed)
    }

    /// Failed refresh cycles so far; one per logged diagnostic.
    pub fn failures(&self) -> u64 {
        self.inner.failures.load(Ordering::Relaxed)
    }

    fn schedule(&self) -> RefreshHandle {
        let task = tokio::spawn(self.clone().tick_loop());
        RefreshHandle { task }
    }

    async fn tick_loop(self) {
        let period = self.inner.period;
        // A period past the clock's range means the next cycle never comes due.
        let Some(first) = Instant::now().checked_add(period) else {
            warn!(period_secs = period.as_secs(), "refresh period out of range, no further cycles");
            return std::future::pending().await;
        };
        let mut ticker = tokio::time::interval_at(first, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut in_flight = JoinSet::new();
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let poller = self.clone();
                    in_flight.spawn(async move {
                        let _ = poller.refresh().await;
                    });
                }
                Some(_) = in_flight.join_next() => {}
            }
        }
    }
}

/// Binds every tooltip whose element exists, replacing any earlier binding.
pub fn sync_tooltips<P: Page + ?Sized>(page: &mut P, bindings: &[TooltipBinding]) {
    for binding in bindings {
        if !page.contains(&binding.element_id) {
            debug!("tooltip target #{} not on page", binding.element_id);
            continue;
        }
        page.mark_tooltip(&binding.element_id, &binding.message, binding.position);
        page.dispose_tooltip(&binding.element_id);
        page.attach_tooltip(&binding.element_id);
    }
}

/// Replaces the alert container content. An empty list leaves it untouched.
pub fn render_alerts<P: Page + ?Sized>(page: &mut P, alerts: &[AlertNotice]) {
    if alerts.is_empty() {
        return;
    }
    let notices = alerts.iter().map(Notice::from_alert).collect();
    if !page.replace_notices(ALERT_CONTAINER_ID, notices) {
        debug!("alert container #{ALERT_CONTAINER_ID} not on page");
    }
}

/// Handle to the recurring refresh task.
#[must_use = "dropping the handle leaves the refresh task running"]
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stops the ticker and aborts refreshes it started.
    pub fn cancel(self) {
        self.task.abort();
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}
