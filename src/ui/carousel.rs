//! Specials carousel: one visible card at a time, crossfading to the next
//! every rotation interval.

use std::time::Duration;
use tokio::time::{interval_at, sleep_until, Instant, Interval, MissedTickBehavior};

pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_FADE_DURATION: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyle {
    pub displayed: bool,
    pub opaque: bool,
}

impl CardStyle {
    const VISIBLE: CardStyle = CardStyle {
        displayed: true,
        opaque: true,
    };
    const HIDDEN: CardStyle = CardStyle {
        displayed: false,
        opaque: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    pub outgoing: usize,
    pub incoming: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialsCarousel {
    styles: Vec<CardStyle>,
    current: usize,
    pending: Option<Rotation>,
}

impl SpecialsCarousel {
    /// 第一張卡片顯示，其餘隱藏且透明
    pub fn new(count: usize) -> Self {
        let styles = (0..count)
            .map(|i| if i == 0 { CardStyle::VISIBLE } else { CardStyle::HIDDEN })
            .collect();
        Self {
            styles,
            current: 0,
            pending: None,
        }
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn style(&self, index: usize) -> Option<CardStyle> {
        self.styles.get(index).copied()
    }

    /// 兩張以上才需要輪播計時器
    pub fn rotates(&self) -> bool {
        self.styles.len() > 1
    }

    pub fn is_fading(&self) -> bool {
        self.pending.is_some()
    }

    /// Fades the current card out and picks `(current + 1) % len` as the
    /// incoming card. Returns `None` when there is nothing to rotate or a
    /// fade is already in progress.
    pub fn begin_rotation(&mut self) -> Option<Rotation> {
        if !self.rotates() || self.pending.is_some() {
            return None;
        }
        let rotation = Rotation {
            outgoing: self.current,
            incoming: (self.current + 1) % self.styles.len(),
        };
        self.styles[rotation.outgoing].opaque = false;
        self.pending = Some(rotation);
        Some(rotation)
    }

    /// Hides the outgoing card and fades the incoming one in.
    pub fn finish_rotation(&mut self) -> Option<usize> {
        let rotation = self.pending.take()?;
        self.styles[rotation.outgoing] = CardStyle::HIDDEN;
        self.styles[rotation.incoming] = CardStyle::VISIBLE;
        self.current = rotation.incoming;
        Some(self.current)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselStep {
    Rotate,
    FadeComplete,
}

/// 輪播計時器；每次渲染重新建立，丟棄舊的即取消舊計時器
#[derive(Debug)]
pub struct CarouselTimer {
    ticker: Interval,
    fade: Duration,
    fade_deadline: Option<Instant>,
}

impl CarouselTimer {
    pub fn new(interval: Duration, fade: Duration) -> Self {
        let mut ticker = interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            ticker,
            fade,
            fade_deadline: None,
        }
    }

    pub fn start_fade(&mut self) {
        self.fade_deadline = Some(Instant::now() + self.fade);
    }

    /// Waits for the end of a running fade, otherwise for the next rotation
    /// tick. Cancel-safe: a pending fade deadline survives a dropped future.
    pub async fn next_step(&mut self) -> CarouselStep {
        if let Some(deadline) = self.fade_deadline {
            sleep_until(deadline).await;
            self.fade_deadline = None;
            return CarouselStep::FadeComplete;
        }
        self.ticker.tick().await;
        CarouselStep::Rotate
    }
}
