use std::time::Duration;

use crate::aqi::{aqi_color, day_name, Rgb};
use crate::error::DashboardError;
use crate::models::ForecastDay;

/// Delay between the entrance of consecutive cards.
pub const CARD_STAGGER: Duration = Duration::from_millis(80);

#[derive(Debug, Clone, PartialEq)]
pub struct DayCard {
    pub index: usize,
    pub title: String,
    pub category: String,
    pub badge_color: Rgb,
    pub pm25: f64,
    pub selected: bool,
    pub enter_delay: Duration,
    pub entered: bool,
}

impl DayCard {
    fn new(index: usize, day: &ForecastDay) -> Self {
        let enter_delay = CARD_STAGGER * u32::try_from(index).unwrap_or(u32::MAX);
        Self {
            index,
            title: day_name(day.day),
            category: day.aqi_category.clone(),
            badge_color: aqi_color(&day.aqi_category),
            pm25: day.pm25,
            selected: false,
            enter_delay,
            entered: enter_delay.is_zero(),
        }
    }

    pub fn pm25_label(&self) -> String {
        format!("{} µg/m³", self.pm25)
    }

    /// Only the first nine cards have a digit key.
    pub fn detail_hint(&self) -> String {
        if self.index < 9 {
            format!("Press {} for details", self.index + 1)
        } else {
            "Use ←/→ for details".to_string()
        }
    }
}

/// The forecast strip: one card per forecast day, in the order received.
#[derive(Debug, Clone, Default)]
pub struct ForecastPanel {
    days: Vec<ForecastDay>,
    cards: Vec<DayCard>,
    selected: Option<usize>,
    elapsed: Duration,
}

impl ForecastPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.days.clear();
        self.cards.clear();
        self.selected = None;
        self.elapsed = Duration::ZERO;
    }

    /// Replaces all cards and restarts the entrance animation.
    pub fn render(&mut self, days: &[ForecastDay]) {
        self.clear();
        self.days = days.to_vec();
        self.cards = days
            .iter()
            .enumerate()
            .map(|(index, day)| DayCard::new(index, day))
            .collect();
    }

    pub fn cards(&self) -> &[DayCard] {
        &self.cards
    }

    pub fn day(&self, index: usize) -> Option<&ForecastDay> {
        self.days.get(index)
    }

    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_day(&self) -> Option<&ForecastDay> {
        self.selected.and_then(|index| self.days.get(index))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Moves the selection highlight to card `index`.
    pub fn select(&mut self, index: usize) -> Result<&ForecastDay, DashboardError> {
        if index >= self.cards.len() {
            return Err(DashboardError::DayOutOfRange {
                index,
                len: self.cards.len(),
            });
        }

        for card in &mut self.cards {
            card.selected = card.index == index;
        }
        self.selected = Some(index);
        Ok(&self.days[index])
    }

    pub fn visible_count(&self) -> usize {
        self.cards.iter().filter(|card| card.entered).count()
    }

    pub fn tick(&mut self, delta: Duration) {
        self.elapsed += delta;
        for card in &mut self.cards {
            if !card.entered && self.elapsed >= card.enter_delay {
                card.entered = true;
            }
        }
    }
}
