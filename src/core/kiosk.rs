use crate::core::catalog::build_render_request;
use crate::domain::model::{CatalogSnapshot, RenderRequest, SourceKind, SourceOutcome};
use crate::domain::ports::{CatalogSource, Clock, SystemClock};
use crate::utils::error::Result;

/// 負責一次完整的刷新週期：抓取三個來源並整理成渲染請求
pub struct KioskEngine<S: CatalogSource, K: Clock = SystemClock> {
    source: S,
    clock: K,
}

impl<S: CatalogSource> KioskEngine<S, SystemClock> {
    pub fn new(source: S) -> Self {
        Self::with_clock(source, SystemClock)
    }
}

impl<S: CatalogSource, K: Clock> KioskEngine<S, K> {
    pub fn with_clock(source: S, clock: K) -> Self {
        Self { source, clock }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches all three sources concurrently. A failing source becomes
    /// [`SourceOutcome::Unavailable`] and never affects the other two.
    pub async fn load_snapshot(&self) -> CatalogSnapshot {
        let (donuts, rolls, pricing) = tokio::join!(
            self.source.fetch_donuts(),
            self.source.fetch_rolls(),
            self.source.fetch_pricing(),
        );

        let snapshot = CatalogSnapshot {
            donuts: into_outcome(SourceKind::Donuts, donuts),
            rolls: into_outcome(SourceKind::Rolls, rolls),
            pricing: into_outcome(SourceKind::Pricing, pricing),
        };

        tracing::debug!(
            "Loaded {} donuts, {} rolls, {} pricing entries",
            snapshot.donuts.items().len(),
            snapshot.rolls.items().len(),
            snapshot.pricing.items().len()
        );
        snapshot
    }

    pub async fn refresh(&self) -> RenderRequest {
        tracing::info!("Refreshing kiosk products");
        let snapshot = self.load_snapshot().await;

        let failed = snapshot.unavailable_sources();
        if failed.len() == 3 {
            tracing::warn!("⚠️ All catalog sources unavailable, showing empty state");
        }

        build_render_request(snapshot, self.clock.now())
    }
}

fn into_outcome<T>(kind: SourceKind, result: Result<Vec<T>>) -> SourceOutcome<T> {
    match result {
        Ok(items) => SourceOutcome::Loaded(items),
        Err(e) => {
            tracing::warn!("Could not load {}: {}", kind, e);
            SourceOutcome::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}
