//! One-shot fade-in of cards as they scroll into view.

/// Fraction of the card that must be visible
pub const VISIBILITY_THRESHOLD: f64 = 0.1;
/// The viewport's bottom edge is pulled up by this much
pub const BOTTOM_MARGIN_PX: f64 = 50.0;
/// Class added to a card once it has been seen
pub const VISIBLE_CLASS: &str = "fade-in-visible";

/// Vertical extent of an element relative to the viewport top
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Share of `rect` inside `[0, viewport_height - BOTTOM_MARGIN_PX]`
pub fn intersection_ratio(rect: Rect, viewport_height: f64) -> f64 {
    let height = rect.height();
    if height <= 0.0 {
        return 0.0;
    }
    let visible_bottom = (viewport_height - BOTTOM_MARGIN_PX).max(0.0);
    let overlap = rect.bottom.min(visible_bottom) - rect.top.max(0.0);
    (overlap / height).clamp(0.0, 1.0)
}

#[derive(Debug)]
struct Observed {
    id: String,
    visible: bool,
}

/// Watches a fixed set of cards and reveals each one the first time it is seen
#[derive(Debug, Default)]
pub struct FadeInObserver {
    cards: Vec<Observed>,
}

impl FadeInObserver {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cards: ids
                .into_iter()
                .map(|id| Observed {
                    id: id.into(),
                    visible: false,
                })
                .collect(),
        }
    }

    /// Feed current card positions; returns the ids revealed by this update.
    ///
    /// Positions for unknown ids are ignored. Revealed cards stay revealed.
    pub fn update(&mut self, viewport_height: f64, positions: &[(&str, Rect)]) -> Vec<String> {
        let mut revealed = Vec::new();
        for (id, rect) in positions {
            let Some(card) = self.cards.iter_mut().find(|c| c.id == *id) else {
                continue;
            };
            if !card.visible && intersection_ratio(*rect, viewport_height) >= VISIBILITY_THRESHOLD {
                card.visible = true;
                revealed.push(card.id.clone());
            }
        }
        revealed
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.cards.iter().any(|c| c.id == id && c.visible)
    }
}
