// src/specs/winner.rs
//
// Winner detection. Editors have marked winners in many ways over the years;
// each is checked on its own and the results combined.
//
// Precedence:
//   1. any primary signal (highlight colour, exact "won"-style cell, check glyph, winner class)
//   2. bold + italic, but only when the row text also mentions "win"
//   3. otherwise the first nominee listed for the year is taken as the winner.
// Step 3 is a best-effort convention for unmarked tables, not a certainty.

use scraper::ElementRef;

use crate::config::Policy;
use crate::core::html::{attr, elements, has_class, has_descendant, row_cells, text_of};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WinnerSignals {
    pub highlight: bool,
    pub exact_text: bool,
    pub glyph: bool,
    pub class: bool,
    pub bold_italic: bool,
    pub mentions_win: bool,
}

impl WinnerSignals {
    pub fn primary(&self) -> bool {
        self.highlight || self.exact_text || self.glyph || self.class
    }

    pub fn weak(&self) -> bool {
        self.bold_italic && self.mentions_win
    }

    pub fn any(&self) -> bool {
        self.primary() || self.weak()
    }
}

pub fn winner_signals(row: ElementRef, policy: &Policy) -> WinnerSignals {
    let wp = &policy.winner;
    let row_text = text_of(row);
    let row_lc = row_text.to_lowercase();
    let cells = row_cells(row);

    WinnerSignals {
        highlight: std::iter::once(row).chain(elements(row)).any(|el| has_highlight(&el, &wp.colors)),
        exact_text: cells.iter().any(|c| {
            let t = text_of(*c).to_lowercase();
            wp.texts.iter().any(|w| *w == t)
        }),
        glyph: wp.glyphs.iter().any(|g| row_text.contains(g.as_str())),
        class: std::iter::once(row)
            .chain(cells.iter().copied())
            .any(|el| wp.classes.iter().any(|c| has_class(&el, c))),
        bold_italic: has_descendant(row, &["b", "strong"]) && has_descendant(row, &["i", "em"]),
        mentions_win: !wp.weak_keyword.is_empty() && row_lc.contains(&wp.weak_keyword.to_lowercase()),
    }
}

/// `ordinal` is the row's 1-based position among the current year's nominees.
pub fn is_winner(row: ElementRef, ordinal: u32, policy: &Policy) -> bool {
    let signals = winner_signals(row, policy);
    if signals.any() {
        return true;
    }
    ordinal == 1
}

fn has_highlight(el: &ElementRef, colors: &[String]) -> bool {
    let style = attr(el, "style")
        .map(|s| s.to_lowercase().replace(' ', ""))
        .filter(|s| s.contains("background"));
    let bgcolor = attr(el, "bgcolor").map(str::to_lowercase);

    colors.iter().any(|c| {
        let c = c.trim_start_matches('#').to_lowercase();
        style.as_deref().is_some_and(|s| s.contains(&c)) || bgcolor.as_deref().is_some_and(|b| b.contains(&c))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::find_first;
    use scraper::Html;

    fn check(row: &str, ordinal: u32) -> (WinnerSignals, bool) {
        let p = Policy::default();
        let doc = Html::parse_fragment(&format!("<table>{row}</table>"));
        let tr = find_first(doc.root_element(), "tr").unwrap();
        (winner_signals(tr, &p), is_winner(tr, ordinal, &p))
    }

    #[test]
    fn each_primary_signal_wins_regardless_of_ordinal() {
        let rows = [
            r#"<tr style="background:#FAEB86"><td>Parasite</td><td>Bong Joon-ho</td></tr>"#,
            r#"<tr><td style="background-color: #faeb86">Parasite</td><td>Bong</td></tr>"#,
            r##"<tr bgcolor="#FAEB86"><td>Parasite</td><td>Bong</td></tr>"##,
            r#"<tr><td>Parasite</td><td>Won</td></tr>"#,
            r#"<tr><td>Parasite ✓</td><td>Bong</td></tr>"#,
            r#"<tr class="winner"><td>Parasite</td><td>Bong</td></tr>"#,
            r#"<tr><td class="yes">Parasite</td><td>Bong</td></tr>"#,
        ];
        for row in rows {
            for ordinal in [1, 2, 7] {
                let (signals, won) = check(row, ordinal);
                assert!(signals.primary(), "{row}");
                assert!(won, "{row} at ordinal {ordinal}");
            }
        }
    }

    #[test]
    fn no_signals_falls_back_to_ordinal() {
        let row = "<tr><td>1917</td><td>Sam Mendes</td></tr>";
        let (signals, first) = check(row, 1);
        assert!(!signals.any());
        assert!(first);
        assert!(!check(row, 2).1);
        assert!(!check(row, 5).1);
    }

    #[test]
    fn exact_text_is_exact() {
        let (signals, won) = check("<tr><td>Joker</td><td>He won a BAFTA</td></tr>", 2);
        assert!(!signals.exact_text);
        assert!(!won);
    }

    #[test]
    fn bold_italic_needs_win_mention() {
        let (signals, won) = check("<tr><td><b><i>Joker</i></b></td><td>Todd Phillips</td></tr>", 2);
        assert!(signals.bold_italic);
        assert!(!signals.weak());
        assert!(!won);

        let (signals, won) = check("<tr><td><b><i>Joker</i></b></td><td>Todd Phillips (winner)</td></tr>", 2);
        assert!(signals.weak());
        assert!(won);
    }

    #[test]
    fn other_colours_do_not_count() {
        let (signals, won) = check(r#"<tr style="background:#eee"><td>Joker</td><td>Todd</td></tr>"#, 3);
        assert!(!signals.highlight);
        assert!(!won);
    }
}
