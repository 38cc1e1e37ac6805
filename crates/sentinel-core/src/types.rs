use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pass,
    Warn,
    Fail,
}

impl Status {
    /// Share of a check's weight it earns.
    pub fn multiplier(self) -> f64 {
        match self {
            Status::Pass => 1.0,
            Status::Warn => 0.5,
            Status::Fail => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Warn => "warn",
            Status::Fail => "fail",
        }
    }

    /// Upper-case label used in rendered tables.
    pub fn label(self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Warn => "WARN",
            Status::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Triage rank: high sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }

    pub fn estimated_minutes(self) -> u32 {
        match self {
            Severity::High => 30,
            Severity::Medium => 20,
            Severity::Low => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Usefulness,
    Impact,
    Execution,
    Innovation,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Usefulness,
            Category::Impact,
            Category::Execution,
            Category::Innovation,
        ]
    }

    /// Contribution of this category to the overall score.
    pub fn overall_weight(self) -> f64 {
        match self {
            Category::Usefulness => 0.40,
            Category::Impact => 0.25,
            Category::Execution => 0.20,
            Category::Innovation => 0.15,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Usefulness => "usefulness",
            Category::Impact => "impact",
            Category::Execution => "execution",
            Category::Innovation => "innovation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_weights_sum_to_one() {
        let total: f64 = Category::all().iter().map(|c| c.overall_weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn severity_rank_orders_high_first() {
        assert!(Severity::High.rank() < Severity::Medium.rank());
        assert!(Severity::Medium.rank() < Severity::Low.rank());
    }

    #[test]
    fn estimated_minutes_by_severity() {
        assert_eq!(Severity::High.estimated_minutes(), 30);
        assert_eq!(Severity::Medium.estimated_minutes(), 20);
        assert_eq!(Severity::Low.estimated_minutes(), 10);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Status::Warn).unwrap(), "\"warn\"");
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&Category::Innovation).unwrap(),
            "\"innovation\""
        );
        let parsed: Category = serde_json::from_str("\"execution\"").unwrap();
        assert_eq!(parsed, Category::Execution);
    }

    #[test]
    fn multipliers() {
        assert_eq!(Status::Pass.multiplier(), 1.0);
        assert_eq!(Status::Warn.multiplier(), 0.5);
        assert_eq!(Status::Fail.multiplier(), 0.0);
    }
}
