//! Owned view of one located market section

/// One betting control inside a market section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BetUnit {
    pub label: String,
    pub odds_text: String,
    /// Text describing the row the unit sits in, e.g. a goal line
    pub row_context: Option<String>,
    /// Index of the unit within its row
    pub position: usize,
    pub spacer: bool,
}

impl BetUnit {
    pub fn new(label: &str, odds_text: &str) -> Self {
        Self {
            label: label.to_string(),
            odds_text: odds_text.to_string(),
            ..Default::default()
        }
    }

    pub fn in_row(mut self, context: &str, position: usize) -> Self {
        self.row_context = Some(context.to_string());
        self.position = position;
        self
    }

    pub fn spacer() -> Self {
        Self {
            spacer: true,
            ..Default::default()
        }
    }
}

/// Betting controls found under one market heading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketSection {
    pub heading: String,
    pub units: Vec<BetUnit>,
}

impl MarketSection {
    pub fn new(heading: &str, units: Vec<BetUnit>) -> Self {
        Self {
            heading: heading.to_string(),
            units,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
