use crate::ui::view::{ProductCard, ViewState};
use crate::ui::Renderer;
use crate::utils::error::Result;
use std::io::Write;

const TICKER_SEPARATOR: &str = " • ";

/// 以純文字輸出畫面；終端機即為顯示器
pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_card(&mut self, card: &ProductCard) -> Result<()> {
        write!(self.out, "  {}", card.name)?;
        if let Some(price) = &card.price {
            write!(self.out, "  {}", price)?;
        }
        if let Some(days) = &card.days {
            write!(self.out, "  [{}]", days)?;
        }
        match &card.image_url {
            Some(url) => writeln!(self.out, "  <{}>", url)?,
            None => writeln!(self.out)?,
        }
        Ok(())
    }

    fn write_special(&mut self, view: &ViewState) -> Result<()> {
        if let Some(card) = view.current_special() {
            write!(
                self.out,
                "★ Special {}/{}:",
                view.carousel.current() + 1,
                view.carousel.len()
            )?;
            self.write_card(card)?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, view: &ViewState) -> Result<()> {
        writeln!(
            self.out,
            "==== {} ==== {} | {}",
            view.header.brand, view.header.date, view.header.last_refreshed
        )?;

        for section in &view.sections {
            writeln!(
                self.out,
                "-- {} (loop {}s) --",
                section.label,
                section.track.duration().as_secs()
            )?;
            for card in section.track.cards() {
                self.write_card(card)?;
            }
            let ticker: Vec<&str> = section.track.passes().map(|c| c.name.as_str()).collect();
            writeln!(self.out, "  >> {}", ticker.join(TICKER_SEPARATOR))?;
        }

        if let Some(message) = view.empty_message {
            writeln!(self.out, "{}", message)?;
        }

        writeln!(self.out, "-- Prices --")?;
        for row in &view.pricing {
            writeln!(self.out, "  {:<24} {:<10} {:>8}", row.description, row.unit, row.price)?;
        }

        if !view.specials.is_empty() {
            writeln!(self.out, "-- Specials --")?;
            self.write_special(view)?;
        }

        self.out.flush()?;
        Ok(())
    }

    fn render_special(&mut self, view: &ViewState) -> Result<()> {
        self.write_special(view)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DisplayGroup, GroupLabel, Product, RenderRequest};
    use chrono::{Local, TimeZone};
    use std::sync::Arc;

    fn request(empty: bool) -> RenderRequest {
        let glazed = Arc::new(Product {
            description: Some("Glazed".to_string()),
            price: Some(1.25),
            ..Default::default()
        });
        RenderRequest {
            groups: if empty {
                vec![]
            } else {
                vec![DisplayGroup {
                    label: GroupLabel::Donuts,
                    items: vec![Arc::clone(&glazed)],
                }]
            },
            pricing: vec![],
            specials: if empty { vec![] } else { vec![glazed] },
            last_refreshed_at: Local.with_ymd_and_hms(2026, 10, 16, 7, 45, 0).unwrap(),
            empty,
        }
    }

    fn rendered(request: &RenderRequest) -> String {
        let view = ViewState::from_request("Randy's Donuts", request);
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer.render(&view).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_render_sections_and_specials() {
        let output = rendered(&request(false));
        assert!(output.contains("Randy's Donuts"));
        assert!(output.contains("Friday, 16 October 2026"));
        assert!(output.contains("Last refreshed: 7:45 AM"));
        assert!(output.contains("-- Donuts (loop 12s) --"));
        assert!(output.contains(">> Glazed • Glazed"));
        assert!(output.contains("★ Special 1/1:  Glazed  $1.25"));
        assert!(!output.contains("No products available"));
    }

    #[test]
    fn test_render_empty_state() {
        let output = rendered(&request(true));
        assert!(output.contains("No products available at this time."));
        assert!(!output.contains("-- Specials --"));
    }
}
