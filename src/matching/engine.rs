use super::config::MatchConfig;
use crate::analysis::{MatchProvenance, MatchedPosting};
use crate::catalog::{Catalog, ScoreRange};

/// Percentage of the way `score` sits through `range`, rounded to the nearest
/// integer (halves round up).
///
/// Returns `None` when the score is outside the range or not finite. A
/// degenerate range (`low == high`) only admits `score == low`, which is a
/// full match: 100.
pub fn match_percentage(score: f64, range: ScoreRange) -> Option<u8> {
    if !range.contains(score) {
        return None;
    }
    if range.is_degenerate() {
        return Some(100);
    }

    let low = f64::from(range.low());
    let span = f64::from(range.high()) - low;
    let pct = ((score - low) / span * 100.0).round();
    Some(pct.clamp(0.0, 100.0) as u8)
}

/// Select the postings whose score range contains `score`.
///
/// Catalog order is preserved and the result is cut to `config.limit`. No
/// match is a valid, empty result.
pub fn match_postings(score: f64, catalog: &Catalog, config: &MatchConfig) -> Vec<MatchedPosting> {
    let limit = config.limit.unwrap_or(usize::MAX);

    let matched: Vec<MatchedPosting> = catalog
        .iter()
        .filter_map(|posting| {
            match_percentage(score, posting.score_range).map(|pct| MatchedPosting {
                posting: posting.clone(),
                match_percentage: pct,
                provenance: MatchProvenance::ScoreRange,
            })
        })
        .take(limit)
        .collect();

    tracing::debug!(score, matched = matched.len(), ?config.limit, "matched postings");
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{builtin_postings, InternshipPosting};
    use pretty_assertions::assert_eq;

    fn ids(matched: &[MatchedPosting]) -> Vec<u32> {
        matched.iter().map(|m| m.posting.id).collect()
    }

    fn posting(id: u32, low: i32, high: i32) -> InternshipPosting {
        InternshipPosting {
            id,
            title: format!("Posting {}", id),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            category: "Testing".to_string(),
            description: "desc".to_string(),
            skills_required: vec![],
            score_range: ScoreRange::new(low, high).unwrap(),
        }
    }

    #[test]
    fn test_score_7_5_matches_first_five_in_catalog_order() {
        let matched = match_postings(7.5, &Catalog::builtin(), &MatchConfig::default());
        assert_eq!(ids(&matched), vec![9, 11, 13, 14, 15]);
    }

    #[test]
    fn test_score_7_5_unlimited_matches_all_eligible() {
        let matched = match_postings(7.5, &Catalog::builtin(), &MatchConfig::unlimited());
        assert_eq!(ids(&matched), vec![9, 11, 13, 14, 15, 16, 17, 18, 19, 20]);
    }

    #[test]
    fn test_score_6_2_matches() {
        let matched = match_postings(6.2, &Catalog::builtin(), &MatchConfig::unlimited());
        // [5,7] and [6,8] contain 6.2; [7,9] does not
        assert_eq!(ids(&matched), vec![9, 10, 12, 14, 15, 17, 19]);
    }

    #[test]
    fn test_inclusion_iff_in_range() {
        let catalog = Catalog::builtin();
        for tenth in 0..=100 {
            let score = f64::from(tenth) / 10.0;
            let matched = match_postings(score, &catalog, &MatchConfig::unlimited());
            let expected: Vec<u32> = catalog
                .iter()
                .filter(|p| {
                    f64::from(p.score_range.low()) <= score
                        && score <= f64::from(p.score_range.high())
                })
                .map(|p| p.id)
                .collect();
            assert_eq!(ids(&matched), expected, "score {}", score);
        }
    }

    #[test]
    fn test_never_more_than_default_limit() {
        let catalog = Catalog::builtin();
        for tenth in 0..=100 {
            let score = f64::from(tenth) / 10.0;
            let matched = match_postings(score, &catalog, &MatchConfig::default());
            assert!(matched.len() <= 5, "score {}", score);
        }
    }

    #[test]
    fn test_order_is_catalog_order_not_proximity() {
        // Posting 2 is the closer fit for 8.0 but comes second in the catalog
        let catalog =
            Catalog::from_postings(vec![posting(1, 0, 10), posting(2, 8, 8), posting(3, 7, 9)])
                .unwrap();
        let matched = match_postings(8.0, &catalog, &MatchConfig::unlimited());
        assert_eq!(ids(&matched), vec![1, 2, 3]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let matched = match_postings(2.0, &Catalog::builtin(), &MatchConfig::default());
        assert!(matched.is_empty());
    }

    #[test]
    fn test_out_of_scale_scores_are_not_clamped() {
        let catalog = Catalog::builtin();
        assert!(match_postings(11.0, &catalog, &MatchConfig::default()).is_empty());
        assert!(match_postings(-1.0, &catalog, &MatchConfig::default()).is_empty());
    }

    #[test]
    fn test_non_finite_scores_match_nothing() {
        let catalog = Catalog::from_postings(vec![posting(1, 0, 10)]).unwrap();
        assert!(match_postings(f64::NAN, &catalog, &MatchConfig::default()).is_empty());
        assert!(match_postings(f64::INFINITY, &catalog, &MatchConfig::default()).is_empty());
    }

    #[test]
    fn test_limit_is_applied_after_filtering() {
        let matched = match_postings(7.5, &Catalog::builtin(), &MatchConfig::with_limit(2));
        assert_eq!(ids(&matched), vec![9, 11]);
    }

    #[test]
    fn test_percentages_for_7_5() {
        let matched = match_postings(7.5, &Catalog::builtin(), &MatchConfig::default());
        let pcts: Vec<u8> = matched.iter().map(|m| m.match_percentage).collect();
        // [6,8] -> 75, [7,9] -> 25
        assert_eq!(pcts, vec![75, 25, 25, 75, 75]);
        assert!(matched
            .iter()
            .all(|m| m.provenance == MatchProvenance::ScoreRange));
    }

    #[test]
    fn test_percentage_bounds() {
        let range = ScoreRange::new(6, 8).unwrap();
        assert_eq!(match_percentage(6.0, range), Some(0));
        assert_eq!(match_percentage(8.0, range), Some(100));
        assert_eq!(match_percentage(6.2, range), Some(10));
    }

    #[test]
    fn test_percentage_rounds_to_nearest() {
        let range = ScoreRange::new(0, 8).unwrap();
        // 1.25 -> 1, 1.75 -> 2
        assert_eq!(match_percentage(0.1, range), Some(1));
        assert_eq!(match_percentage(0.14, range), Some(2));
    }

    #[test]
    fn test_percentage_outside_range_is_none() {
        let range = ScoreRange::new(6, 8).unwrap();
        assert_eq!(match_percentage(5.9, range), None);
        assert_eq!(match_percentage(8.1, range), None);
        assert_eq!(match_percentage(f64::NAN, range), None);
    }

    #[test]
    fn test_degenerate_range_is_full_match() {
        let range = ScoreRange::new(7, 7).unwrap();
        assert_eq!(match_percentage(7.0, range), Some(100));
        assert_eq!(match_percentage(7.01, range), None);

        let catalog = Catalog::from_postings(vec![posting(1, 7, 7)]).unwrap();
        let matched = match_postings(7.0, &catalog, &MatchConfig::default());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].match_percentage, 100);
    }

    #[test]
    fn test_catalog_is_untouched() {
        let catalog = Catalog::builtin();
        let _ = match_postings(7.5, &catalog, &MatchConfig::default());
        assert_eq!(catalog.postings(), builtin_postings().as_slice());
    }
}
