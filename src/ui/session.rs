//! The kiosk session is the single UI execution context: it owns the view
//! state, the renderer and the specials carousel, and is the only place any
//! of them are mutated. Refresh results arrive over the scheduler's channel.

use crate::config::DisplaySettings;
use crate::core::kiosk::KioskEngine;
use crate::core::scheduler::{DisplayScheduler, SessionState, UiMessage};
use crate::domain::model::RenderRequest;
use crate::domain::ports::{CatalogSource, Clock};
use crate::ui::carousel::{CarouselStep, CarouselTimer};
use crate::ui::view::ViewState;
use crate::ui::Renderer;
use crate::utils::error::{KioskError, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

pub struct KioskSession<S, K, R>
where
    S: CatalogSource + 'static,
    K: Clock + 'static,
    R: Renderer,
{
    scheduler: DisplayScheduler<S, K>,
    ui_rx: UnboundedReceiver<UiMessage>,
    renderer: R,
    settings: DisplaySettings,
    view: Option<ViewState>,
    carousel_timer: Option<CarouselTimer>,
}

impl<S, K, R> KioskSession<S, K, R>
where
    S: CatalogSource + 'static,
    K: Clock + 'static,
    R: Renderer,
{
    pub fn new(engine: Arc<KioskEngine<S, K>>, renderer: R, settings: DisplaySettings) -> Self {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let scheduler = DisplayScheduler::with_period(engine, ui_tx, settings.refresh_period);
        Self {
            scheduler,
            ui_rx,
            renderer,
            settings,
            view: None,
            carousel_timer: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.scheduler.state()
    }

    pub fn view(&self) -> Option<&ViewState> {
        self.view.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn has_carousel_timer(&self) -> bool {
        self.carousel_timer.is_some()
    }

    /// 啟動刷新計時器並立即載入一次
    pub fn attach(&mut self) {
        self.scheduler.attach();
        self.scheduler.refresh_now();
    }

    pub fn detach(&mut self) {
        self.scheduler.detach();
        self.carousel_timer = None;
    }

    /// Applies a render from the scheduler. Returns `false` when the message
    /// belongs to an earlier attach and was dropped.
    pub fn handle_message(&mut self, message: UiMessage) -> Result<bool> {
        match message {
            UiMessage::Render {
                generation,
                request,
            } => {
                if !self.scheduler.is_current(generation) {
                    tracing::debug!("Dropping stale render from generation {}", generation);
                    return Ok(false);
                }
                self.apply(&request)?;
                Ok(true)
            }
        }
    }

    fn apply(&mut self, request: &RenderRequest) -> Result<()> {
        // 先停掉舊的輪播計時器，避免重疊輪播
        self.carousel_timer = None;

        let view = ViewState::from_request(&self.settings.brand, request);
        self.renderer.render(&view)?;
        tracing::info!(
            "🍩 Rendered {} sections, {} pricing rows, {} specials",
            view.sections.len(),
            view.pricing.len(),
            view.specials.len()
        );

        if view.carousel.rotates() {
            self.carousel_timer = Some(CarouselTimer::new(
                self.settings.carousel_interval,
                self.settings.fade_duration,
            ));
        }
        self.view = Some(view);
        Ok(())
    }

    pub fn on_carousel_step(&mut self, step: CarouselStep) -> Result<()> {
        let (Some(view), Some(timer)) = (self.view.as_mut(), self.carousel_timer.as_mut()) else {
            return Ok(());
        };

        match step {
            CarouselStep::Rotate => {
                if let Some(rotation) = view.carousel.begin_rotation() {
                    tracing::debug!(
                        "Fading special {} out, {} next",
                        rotation.outgoing,
                        rotation.incoming
                    );
                    timer.start_fade();
                }
            }
            CarouselStep::FadeComplete => {
                if view.carousel.finish_rotation().is_some() {
                    self.renderer.render_special(view)?;
                }
            }
        }
        Ok(())
    }

    /// Runs the session until `shutdown` resolves, then detaches. A failed
    /// draw is logged and the session keeps going; only a closed UI channel
    /// ends the loop early.
    pub async fn run<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        self.attach();
        tracing::info!("🚀 Kiosk session attached");

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutting down kiosk session");
                    break;
                }
                message = self.ui_rx.recv() => match message {
                    Some(message) => {
                        if let Err(e) = self.handle_message(message) {
                            tracing::warn!("⚠️ Render failed, keeping previous view: {}", e);
                        }
                    }
                    None => return Err(KioskError::ChannelClosed),
                },
                step = next_carousel_step(&mut self.carousel_timer) => {
                    if let Err(e) = self.on_carousel_step(step) {
                        tracing::warn!("⚠️ Special card redraw failed: {}", e);
                    }
                }
            }
        }

        self.detach();
        Ok(())
    }
}

async fn next_carousel_step(timer: &mut Option<CarouselTimer>) -> CarouselStep {
    match timer {
        Some(timer) => timer.next_step().await,
        None => std::future::pending().await,
    }
}
