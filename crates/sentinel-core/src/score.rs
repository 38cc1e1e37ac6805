use crate::checks::{round2, CheckResult};
use crate::types::Category;
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// ScoreCard
// ---------------------------------------------------------------------------

/// Category percentages and the weighted overall score, each in [0, 100].
/// Serialized to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    #[serde(serialize_with = "two_decimals")]
    pub usefulness: f64,
    #[serde(serialize_with = "two_decimals")]
    pub impact: f64,
    #[serde(serialize_with = "two_decimals")]
    pub execution: f64,
    #[serde(serialize_with = "two_decimals")]
    pub innovation: f64,
    #[serde(serialize_with = "two_decimals")]
    pub overall: f64,
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round2(*value))
}

impl ScoreCard {
    pub fn category(&self, category: Category) -> f64 {
        match category {
            Category::Usefulness => self.usefulness,
            Category::Impact => self.impact,
            Category::Execution => self.execution,
            Category::Innovation => self.innovation,
        }
    }
}

/// Aggregate check results into a scorecard. A category with no possible
/// points scores 0.
pub fn compute_scorecard(checks: &[CheckResult]) -> ScoreCard {
    let mut earned = [0.0_f64; 4];
    let mut possible = [0.0_f64; 4];
    for check in checks {
        let i = check.category.index();
        earned[i] += check.points();
        possible[i] += f64::from(check.weight);
    }

    let pct = |c: Category| {
        let i = c.index();
        if possible[i] > 0.0 {
            earned[i] / possible[i] * 100.0
        } else {
            0.0
        }
    };

    let usefulness = pct(Category::Usefulness);
    let impact = pct(Category::Impact);
    let execution = pct(Category::Execution);
    let innovation = pct(Category::Innovation);
    let overall = Category::all()
        .iter()
        .map(|&c| c.overall_weight() * pct(c))
        .sum::<f64>()
        .clamp(0.0, 100.0);

    ScoreCard {
        usefulness,
        impact,
        execution,
        innovation,
        overall,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::tests::{audit, touch};
    use crate::checks::default_checks;
    use crate::types::Severity;
    use tempfile::TempDir;

    #[test]
    fn empty_list_is_all_zeros() {
        assert_eq!(compute_scorecard(&[]), ScoreCard::default());
    }

    #[test]
    fn all_pass_is_one_hundred() {
        let results: Vec<_> = default_checks().iter().map(|c| c.spec.pass("ok")).collect();
        let card = compute_scorecard(&results);
        for c in Category::all() {
            assert!((card.category(*c) - 100.0).abs() < 1e-9);
        }
        assert!((card.overall - 100.0).abs() < 1e-9);
    }

    #[test]
    fn all_warn_is_fifty() {
        let results: Vec<_> = default_checks()
            .iter()
            .map(|c| c.spec.warn(Severity::Low, "d", "r"))
            .collect();
        let card = compute_scorecard(&results);
        assert!((card.overall - 50.0).abs() < 1e-9);
    }

    #[test]
    fn overall_is_weighted_sum_and_bounded() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "README.md", "problem\ninstall\nusage\n");
        touch(dir.path(), "LICENSE", "MIT");
        let card = compute_scorecard(&audit(&dir));

        let expected = 0.40 * card.usefulness
            + 0.25 * card.impact
            + 0.20 * card.execution
            + 0.15 * card.innovation;
        assert!((card.overall - expected).abs() < 1e-9);
        for c in Category::all() {
            assert!((0.0..=100.0).contains(&card.category(*c)));
        }
    }

    #[test]
    fn missing_category_scores_zero() {
        let only_usefulness: Vec<_> = default_checks()
            .iter()
            .filter(|c| c.spec.category == Category::Usefulness)
            .map(|c| c.spec.pass("ok"))
            .collect();
        let card = compute_scorecard(&only_usefulness);
        assert_eq!(card.impact, 0.0);
        assert!((card.overall - 40.0).abs() < 1e-9);
    }

    #[test]
    fn serializes_two_decimals() {
        let card = ScoreCard {
            usefulness: 100.0 / 3.0,
            ..ScoreCard::default()
        };
        let value = serde_json::to_value(card).unwrap();
        assert_eq!(value["usefulness"], 33.33);
    }
}
