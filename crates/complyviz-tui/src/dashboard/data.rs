//! Demo compliance data shown until the backend provides live figures

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub label: String,
    pub value: f64,
}

impl Score {
    fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskMatrix {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// Row-major risk levels, 0 (none) to 4 (critical)
    pub levels: Vec<u8>,
}

impl RiskMatrix {
    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    pub fn level(&self, row: usize, column: usize) -> u8 {
        self.levels
            .get(row * self.columns.len() + column)
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub date: NaiveDate,
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub metric: String,
    pub before_label: String,
    pub after_label: String,
    pub before: f64,
    pub after: f64,
    pub suffix: String,
}

pub fn framework_scores() -> Vec<Score> {
    vec![
        Score::new("ISO 27001", 92.0),
        Score::new("NIS2", 78.0),
        Score::new("GDPR", 85.0),
        Score::new("DORA", 64.0),
        Score::new("SOC 2", 71.0),
    ]
}

pub fn control_coverage() -> Vec<Score> {
    vec![
        Score::new("Access", 88.0),
        Score::new("Backup", 73.0),
        Score::new("Logging", 56.0),
        Score::new("Vendors", 41.0),
    ]
}

pub fn maturity_axes() -> Vec<Score> {
    vec![
        Score::new("Govern", 72.0),
        Score::new("Identify", 84.0),
        Score::new("Protect", 79.0),
        Score::new("Detect", 58.0),
        Score::new("Respond", 66.0),
        Score::new("Recover", 49.0),
    ]
}

pub fn risk_matrix() -> RiskMatrix {
    RiskMatrix {
        rows: ["Finance", "HR", "IT Ops", "Sales", "Legal"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        columns: ["Conf.", "Integr.", "Avail.", "Privacy", "Vendor", "Physical"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        levels: vec![
            2, 1, 1, 3, 2, 0, //
            1, 0, 1, 4, 1, 0, //
            3, 2, 4, 1, 3, 1, //
            1, 1, 0, 2, 2, 0, //
            2, 1, 0, 3, 1, 0, //
        ],
    }
}

pub fn breach_timeline() -> Vec<Milestone> {
    let milestone = |y, m, d, title: &str, detail: &str| Milestone {
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        title: title.to_string(),
        detail: detail.to_string(),
    };
    vec![
        milestone(2026, 3, 2, "Detected", "Anomalous login burst flagged by SIEM"),
        milestone(2026, 3, 2, "Contained", "Affected accounts locked within 40 minutes"),
        milestone(2026, 3, 3, "Notified", "Supervisory authority informed inside 24 hours"),
        milestone(2026, 3, 9, "Remediated", "MFA enforced for all remote access"),
        milestone(2026, 4, 1, "Reviewed", "Lessons learned folded into the ISMS"),
    ]
}

pub fn incident_response() -> Comparison {
    Comparison {
        metric: "Days to report an incident".to_string(),
        before_label: "Spreadsheets".to_string(),
        after_label: "complyviz".to_string(),
        before: 40.0,
        after: 4.0,
        suffix: " days".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_matrix_is_complete() {
        let matrix = risk_matrix();
        assert_eq!(matrix.levels.len(), matrix.cell_count());
        assert!(matrix.levels.iter().all(|&l| l <= 4));
        assert_eq!(matrix.level(2, 2), 4);
        assert_eq!(matrix.level(99, 0), 0);
    }

    #[test]
    fn test_timeline_is_chronological() {
        let steps = breach_timeline();
        assert!(steps.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_scores_are_percentages() {
        for score in framework_scores()
            .iter()
            .chain(control_coverage().iter())
            .chain(maturity_axes().iter())
        {
            assert!((0.0..=100.0).contains(&score.value), "{}", score.label);
        }
    }
}
