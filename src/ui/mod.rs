// UI layer: view model, specials carousel, renderers and the session loop
// that owns all view state.

pub mod carousel;
pub mod console;
pub mod session;
pub mod view;

use crate::utils::error::Result;
use view::ViewState;

/// 渲染層介面；只會在 UI 任務中被呼叫
pub trait Renderer {
    /// Draws the full view after a refresh.
    fn render(&mut self, view: &ViewState) -> Result<()>;

    /// Redraws the specials sidebar after the carousel switched cards.
    fn render_special(&mut self, view: &ViewState) -> Result<()>;
}
