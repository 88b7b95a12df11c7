//! Periodic catalog refresh tied to the attach/detach lifecycle of a kiosk
//! session.
//!
//! The refresh timer runs on its own tokio task and never touches view state:
//! each tick fetches a snapshot and hands a [`UiMessage`] to the UI task over
//! a channel. Every attach and detach bumps a generation counter so the UI can
//! drop results from a fetch that was in flight when the session detached.

use crate::core::kiosk::KioskEngine;
use crate::domain::model::RenderRequest;
use crate::domain::ports::{CatalogSource, Clock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(15 * 60);

#[derive(Debug)]
pub enum UiMessage {
    Render {
        generation: u64,
        request: RenderRequest,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Attached,
    Detached,
}

pub struct DisplayScheduler<S: CatalogSource + 'static, K: Clock + 'static> {
    engine: Arc<KioskEngine<S, K>>,
    ui_tx: UnboundedSender<UiMessage>,
    period: Duration,
    generation: Arc<AtomicU64>,
    refresh_task: Option<JoinHandle<()>>,
}

impl<S: CatalogSource + 'static, K: Clock + 'static> DisplayScheduler<S, K> {
    pub fn new(engine: Arc<KioskEngine<S, K>>, ui_tx: UnboundedSender<UiMessage>) -> Self {
        Self::with_period(engine, ui_tx, DEFAULT_REFRESH_PERIOD)
    }

    pub fn with_period(
        engine: Arc<KioskEngine<S, K>>,
        ui_tx: UnboundedSender<UiMessage>,
        period: Duration,
    ) -> Self {
        Self {
            engine,
            ui_tx,
            period,
            generation: Arc::new(AtomicU64::new(0)),
            refresh_task: None,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.refresh_task.is_some() {
            SessionState::Attached
        } else {
            SessionState::Detached
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// 只有目前世代且仍在 Attached 狀態時才套用結果
    pub fn is_current(&self, generation: u64) -> bool {
        self.state() == SessionState::Attached && generation == self.generation()
    }

    /// Starts the fixed-rate refresh timer. The first tick fires one full
    /// period after attach; attaching twice restarts the timer from zero.
    pub fn attach(&mut self) {
        self.detach();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let engine = Arc::clone(&self.engine);
        let ui_tx = self.ui_tx.clone();
        let period = self.period;

        tracing::debug!("Attaching kiosk session (generation {})", generation);
        self.refresh_task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                ticker.tick().await;
                let request = engine.refresh().await;
                if ui_tx.send(UiMessage::Render { generation, request }).is_err() {
                    tracing::debug!("UI context closed, stopping refresh timer");
                    break;
                }
            }
        }));
    }

    /// Cancels the refresh timer without waiting for an in-flight fetch.
    /// Safe to call when already detached.
    pub fn detach(&mut self) {
        if let Some(task) = self.refresh_task.take() {
            task.abort();
            self.generation.fetch_add(1, Ordering::SeqCst);
            tracing::debug!("Kiosk session detached, refresh timer cancelled");
        }
    }

    /// 立即執行一次刷新 (啟動時的初始載入)，結果同樣經由 UI 通道送回
    pub fn refresh_now(&self) {
        let engine = Arc::clone(&self.engine);
        let ui_tx = self.ui_tx.clone();
        let generation = self.generation();
        tokio::spawn(async move {
            let request = engine.refresh().await;
            if ui_tx.send(UiMessage::Render { generation, request }).is_err() {
                tracing::debug!("UI context closed before initial load completed");
            }
        });
    }
}

impl<S: CatalogSource + 'static, K: Clock + 'static> Drop for DisplayScheduler<S, K> {
    fn drop(&mut self) {
        if let Some(task) = self.refresh_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::StaticCatalogSource;
    use crate::domain::model::{PricingEntry, Product};
    use crate::domain::ports::SystemClock;
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use tokio::sync::mpsc::{self, UnboundedReceiver};
    use tokio::time::sleep;

    const PERIOD: Duration = DEFAULT_REFRESH_PERIOD;

    fn scheduler() -> (
        DisplayScheduler<StaticCatalogSource, SystemClock>,
        UnboundedReceiver<UiMessage>,
        Arc<KioskEngine<StaticCatalogSource, SystemClock>>,
    ) {
        let engine = Arc::new(KioskEngine::new(StaticCatalogSource::sample()));
        let (tx, rx) = mpsc::unbounded_channel();
        (DisplayScheduler::new(Arc::clone(&engine), tx), rx, engine)
    }

    fn drain(rx: &mut UnboundedReceiver<UiMessage>) -> Vec<u64> {
        let mut generations = Vec::new();
        while let Ok(UiMessage::Render { generation, .. }) = rx.try_recv() {
            generations.push(generation);
        }
        generations
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_fires_every_period_while_attached() {
        let (mut scheduler, mut rx, _engine) = scheduler();
        scheduler.attach();
        assert_eq!(scheduler.state(), SessionState::Attached);

        sleep(PERIOD - Duration::from_secs(1)).await;
        assert!(drain(&mut rx).is_empty());

        sleep(Duration::from_secs(2)).await;
        assert_eq!(drain(&mut rx), vec![1]);

        sleep(PERIOD * 2).await;
        assert_eq!(drain(&mut rx).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_refresh_after_detach() {
        let (mut scheduler, mut rx, engine) = scheduler();
        scheduler.attach();
        sleep(PERIOD + Duration::from_secs(1)).await;
        assert_eq!(drain(&mut rx).len(), 1);

        scheduler.detach();
        assert_eq!(scheduler.state(), SessionState::Detached);
        let fetches = engine_fetches(&engine);

        sleep(PERIOD * 3).await;
        assert!(drain(&mut rx).is_empty());
        assert_eq!(engine_fetches(&engine), fetches);

        // 重複 detach 不會出錯
        scheduler.detach();
        scheduler.detach();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reattach_starts_fresh_timer() {
        let (mut scheduler, mut rx, _engine) = scheduler();
        scheduler.attach();
        sleep(PERIOD - Duration::from_secs(60)).await;
        scheduler.detach();
        scheduler.attach();

        // 舊計時器的 15 分鐘邊界已過，但新計時器從零開始
        sleep(Duration::from_secs(120)).await;
        assert!(drain(&mut rx).is_empty());

        sleep(PERIOD - Duration::from_secs(120) + Duration::from_secs(1)).await;
        let generations = drain(&mut rx);
        assert_eq!(generations.len(), 1);
        assert!(scheduler.is_current(generations[0]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_generation_is_not_current() {
        let (mut scheduler, mut rx, _engine) = scheduler();
        scheduler.attach();
        sleep(PERIOD + Duration::from_secs(1)).await;
        let generations = drain(&mut rx);
        assert!(scheduler.is_current(generations[0]));

        scheduler.detach();
        assert!(!scheduler.is_current(generations[0]));
        scheduler.attach();
        assert!(!scheduler.is_current(generations[0]));
    }

    #[tokio::test]
    async fn test_refresh_now_sends_immediately() {
        let (mut scheduler, mut rx, _engine) = scheduler();
        scheduler.attach();
        scheduler.refresh_now();

        let UiMessage::Render { generation, request } =
            rx.recv().await.expect("render message");
        assert!(scheduler.is_current(generation));
        assert!(!request.empty);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_now_tolerates_closed_ui_channel() {
        let (scheduler, rx, engine) = scheduler();
        drop(rx);

        scheduler.refresh_now();
        sleep(Duration::from_millis(10)).await;

        // 三個來源都抓過，送出失敗只記錄不中斷
        assert_eq!(engine_fetches(&engine), 3);
        assert_eq!(scheduler.state(), SessionState::Detached);
    }

    /// 每個來源都要花 `delay` 才回應
    struct SlowSource {
        inner: StaticCatalogSource,
        delay: Duration,
    }

    #[async_trait]
    impl CatalogSource for SlowSource {
        async fn fetch_donuts(&self) -> Result<Vec<Product>> {
            sleep(self.delay).await;
            self.inner.fetch_donuts().await
        }

        async fn fetch_rolls(&self) -> Result<Vec<Product>> {
            sleep(self.delay).await;
            self.inner.fetch_rolls().await
        }

        async fn fetch_pricing(&self) -> Result<Vec<PricingEntry>> {
            sleep(self.delay).await;
            self.inner.fetch_pricing().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_fetch_keeps_fixed_rate() {
        let fetch_time = Duration::from_secs(5 * 60);
        let engine = Arc::new(KioskEngine::new(SlowSource {
            inner: StaticCatalogSource::sample(),
            delay: fetch_time,
        }));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = DisplayScheduler::new(engine, tx);

        let start = Instant::now();
        scheduler.attach();

        // 計時器依固定頻率觸發，不會因抓取耗時而漂移
        for n in 1..=3u32 {
            let UiMessage::Render { generation, .. } = rx.recv().await.expect("render message");
            assert!(scheduler.is_current(generation));

            let elapsed = start.elapsed();
            let expected = PERIOD * n + fetch_time;
            assert!(
                elapsed >= expected && elapsed < expected + Duration::from_secs(1),
                "render {} arrived at {:?}, expected {:?}",
                n,
                elapsed,
                expected
            );
        }
    }

    fn engine_fetches(engine: &KioskEngine<StaticCatalogSource, SystemClock>) -> usize {
        engine.source().fetch_count()
    }
}
