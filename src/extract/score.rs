//! Score-table extraction.
//!
//! The first 4 columns of the table are roster columns (seat, id, name,
//! class); everything after pairs a grading-item header with the student's
//! raw score cell. Header text may carry the item's weight in parentheses.

use once_cell::sync::Lazy;
use scraper::Html;

use crate::error::{ExtractError, Result};
use crate::models::ScoreComponent;
use crate::query;
use crate::text::Pat;

use super::{SCORES_CLOSED_MARKER, TD, TR, has_marker, main_block};

static WEIGHT: Lazy<Pat> = Lazy::new(|| Pat::new(r"\((.*)\)"));

/// Number of leading roster columns before the grading items start.
const ROSTER_COLUMNS: usize = 4;

/// Extract the grade components, or `None` when the page carries the
/// "not open" marker (grades unavailable is a state, not a failure).
pub fn parse_score(html: &str) -> Result<Option<Vec<ScoreComponent>>> {
    const CTX: &str = "score table";
    let doc = Html::parse_document(html);
    let main = main_block(&doc, CTX)?;
    if has_marker(main, SCORES_CLOSED_MARKER) {
        return Ok(None);
    }

    let rows = TR.all(main);
    let header: Vec<_> = TD
        .all(query::nth(&rows, 0, "tr", CTX)?)
        .into_iter()
        .skip(ROSTER_COLUMNS)
        .collect();
    let scores: Vec<_> = TD
        .all(query::nth(&rows, 1, "tr", CTX)?)
        .into_iter()
        .skip(ROSTER_COLUMNS)
        .collect();
    if header.len() != scores.len() {
        return Err(ExtractError::CountMismatch {
            context: CTX,
            expected: header.len(),
            found: scores.len(),
        });
    }

    let components = header
        .into_iter()
        .zip(scores)
        .map(|(head, cell)| {
            let label = query::text(head);
            ScoreComponent {
                name: WEIGHT.strip(&label),
                percent: WEIGHT.capture_opt(&label).unwrap_or_default(),
                score: query::text(cell),
            }
        })
        .collect();
    Ok(Some(components))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCORE_PAGE: &str = r#"
<div id="main">
  <table>
    <tr>
      <td>座號</td><td>學號</td><td>姓名</td><td>班級</td>
      <td>作業(30%)</td><td>期中考(30%)</td><td>期末考</td>
    </tr>
    <tr>
      <td>1</td><td>104000001</td><td>王小明</td><td>資工16</td>
      <td>88</td><td>72</td><td>未公布</td>
    </tr>
  </table>
</div>"#;

    const CLOSED_PAGE: &str = r#"<div id="main">成績不開放查詢</div>"#;

    #[test]
    fn test_score_skips_roster_columns() {
        let components = parse_score(SCORE_PAGE).unwrap().unwrap();
        assert_eq!(components.len(), 3);
        assert_eq!(components[0].name, "作業");
        assert_eq!(components[0].percent, "30%");
        assert_eq!(components[0].score, "88");
    }

    #[test]
    fn test_score_weight_defaults_to_empty() {
        let components = parse_score(SCORE_PAGE).unwrap().unwrap();
        assert_eq!(components[2].name, "期末考");
        assert_eq!(components[2].percent, "");
        assert_eq!(components[2].score, "未公布");
    }

    #[test]
    fn test_score_closed_page_is_none() {
        assert!(parse_score(CLOSED_PAGE).unwrap().is_none());
    }

    #[test]
    fn test_score_column_mismatch_is_typed() {
        let page = SCORE_PAGE.replace("<td>88</td>", "");
        let err = parse_score(&page).unwrap_err();
        assert!(matches!(err, ExtractError::CountMismatch { .. }));
    }
}
