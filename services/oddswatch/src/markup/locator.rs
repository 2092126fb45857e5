//! Locate market sections in a captured page by their heading text

use scraper::{ElementRef, Html};
use crate::markup::profile::CompiledProfile;
use crate::markup::section::{BetUnit, MarketSection};

/// A parsed page
pub struct MarketDocument {
    html: Html,
}

impl MarketDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    pub(crate) fn html(&self) -> &Html {
        &self.html
    }

    /// Find the section whose heading reads exactly `phrase`.
    ///
    /// Returns the smallest container around the heading that holds betting
    /// controls and no other market heading. `None` means the market is not
    /// offered on this page.
    pub fn locate(&self, phrase: &str, profile: &CompiledProfile) -> Option<MarketSection> {
        let wanted = collapse_ws(phrase);
        if wanted.is_empty() {
            return None;
        }

        for heading in self.html.select(&profile.heading) {
            if element_text(heading) != wanted {
                continue;
            }

            for ancestor in heading.ancestors().filter_map(ElementRef::wrap) {
                if ancestor.select(&profile.heading).count() > 1 {
                    tracing::debug!("Heading {:?} has no controls of its own", wanted);
                    break;
                }
                if has_controls(ancestor, profile) {
                    return Some(MarketSection::new(&wanted, collect_units(ancestor, profile)));
                }
            }
        }

        None
    }
}

fn has_controls(container: ElementRef, profile: &CompiledProfile) -> bool {
    container.select(&profile.bet_unit).next().is_some()
        || container.select(&profile.row_bet).next().is_some()
}

fn collect_units(container: ElementRef, profile: &CompiledProfile) -> Vec<BetUnit> {
    let rows: Vec<ElementRef> = container.select(&profile.row).collect();

    if !rows.is_empty() {
        let mut units = Vec::new();
        for row in rows {
            let context = row.select(&profile.row_info).next().map(element_text);
            for (position, bet) in row.select(&profile.row_bet).enumerate() {
                units.push(BetUnit {
                    label: first_text(bet, &profile.unit_label).unwrap_or_default(),
                    odds_text: first_text(bet, &profile.unit_odds).unwrap_or_else(|| element_text(bet)),
                    row_context: context.clone(),
                    position,
                    spacer: false,
                });
            }
        }
        return units;
    }

    container
        .select(&profile.bet_unit)
        .map(|unit| BetUnit {
            label: first_text(unit, &profile.unit_label).unwrap_or_default(),
            odds_text: first_text(unit, &profile.unit_odds).unwrap_or_default(),
            row_context: None,
            position: 0,
            spacer: unit.value().classes().any(|c| c == profile.spacer_class),
        })
        .collect()
}

fn first_text(scope: ElementRef, selector: &scraper::Selector) -> Option<String> {
    scope.select(selector).next().map(element_text)
}

/// Element text with whitespace collapsed to single spaces
pub fn element_text(element: ElementRef) -> String {
    collapse_ws(&element.text().collect::<Vec<_>>().join(" "))
}

pub fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::profile::MarkupProfile;

    const DETAIL_PAGE: &str = r#"
<html><body>
  <div class="t3-match-details__entry">
    <div class="t3-match-details__entry-header">Fällt für beide Teams mindestens je ein Tor?</div>
    <div class="t3-match-details__entry-content">
      <div class="t3-bet-element">
        <div class="t3-bet-element__label">Ja</div>
        <div class="t3-bet-element__field"><button class="t3-bet-button"><span class="t3-bet-button__text">1,80</span></button></div>
      </div>
      <div class="t3-bet-element">
        <div class="t3-bet-element__label">Nein</div>
        <div class="t3-bet-element__field"><button class="t3-bet-button"><span class="t3-bet-button__text">2,10</span></button></div>
      </div>
    </div>
  </div>
  <div class="t3-match-details__entry">
    <div class="t3-match-details__entry-header">Wie viele Tore werden erzielt?</div>
    <div class="t3-match-details__entry-content">
      <div class="t3-list-entry">
        <div class="t3-list-entry__info-muted">2,5 Tore</div>
        <div class="t3-list-entry__bet"><button class="t3-bet-button"><span class="t3-bet-button__text">1,95</span></button></div>
        <div class="t3-list-entry__bet"><button class="t3-bet-button"><span class="t3-bet-button__text">1,80</span></button></div>
      </div>
    </div>
  </div>
  <div class="t3-match-details__entry">
    <div class="t3-match-details__entry-header">Resultatwette</div>
  </div>
</body></html>
"#;

    fn profile() -> CompiledProfile {
        MarkupProfile::tipp3().compile().unwrap()
    }

    #[test]
    fn test_locate_btts_section() {
        let doc = MarketDocument::parse(DETAIL_PAGE);
        let section = doc
            .locate("Fällt für beide Teams mindestens je ein Tor?", &profile())
            .unwrap();

        assert_eq!(section.units.len(), 2);
        assert_eq!(section.units[0], BetUnit::new("Ja", "1,80"));
        assert_eq!(section.units[1], BetUnit::new("Nein", "2,10"));
    }

    #[test]
    fn test_locate_row_section() {
        let doc = MarketDocument::parse(DETAIL_PAGE);
        let section = doc.locate("Wie viele Tore werden erzielt?", &profile()).unwrap();

        assert_eq!(section.units.len(), 2);
        assert_eq!(section.units[0].row_context.as_deref(), Some("2,5 Tore"));
        assert_eq!(section.units[1].position, 1);
        assert_eq!(section.units[1].odds_text, "1,80");
    }

    #[test]
    fn test_locate_missing_phrase() {
        let doc = MarketDocument::parse(DETAIL_PAGE);
        assert!(doc.locate("Halbzeit/Endstand", &profile()).is_none());
        assert!(doc.locate("", &profile()).is_none());
    }

    #[test]
    fn test_locate_is_exact_and_case_sensitive() {
        let doc = MarketDocument::parse(DETAIL_PAGE);
        assert!(doc.locate("resultatwette", &profile()).is_none());
        assert!(doc.locate("Wie viele Tore", &profile()).is_none());
    }

    #[test]
    fn test_heading_without_controls_does_not_borrow_neighbours() {
        let doc = MarketDocument::parse(DETAIL_PAGE);
        assert!(doc.locate("Resultatwette", &profile()).is_none());
    }
}
