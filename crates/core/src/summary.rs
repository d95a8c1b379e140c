//! Dashboard reports. Pure functions of session counters, recomputed every
//! time a summary view is entered.

use crate::model::LabTally;

/// Bars never scale against fewer than this many analyses, so a single run
/// does not fill the chart.
pub const BAR_FLOOR: u32 = 5;

/// Circumference of the email pie, in stroke units.
pub const PIE_CIRCUMFERENCE: f64 = 158.0;

/// Label of the larger of two counters. Ties go to `second`; two zeros have
/// no majority.
#[must_use]
pub fn majority<'a>(first: (&'a str, u32), second: (&'a str, u32)) -> Option<&'a str> {
    match (first.1, second.1) {
        (0, 0) => None,
        (a, b) if a > b => Some(first.0),
        _ => Some(second.0),
    }
}

/// `value / max(largest, floor)` mapped onto `0..=range`, rounded down.
#[must_use]
pub fn magnitude(value: u32, largest: u32, floor: u32, range: u32) -> u32 {
    let denominator = largest.max(floor).max(1);
    let scaled = u64::from(value.min(denominator)) * u64::from(range) / u64::from(denominator);
    u32::try_from(scaled).unwrap_or(range)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bar {
    pub label: &'static str,
    pub value: u32,
    /// Percent of the chart height.
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabReport {
    pub total: u32,
    /// Markdown paragraph shown above the charts.
    pub narrative: String,
    pub vision_majority: Option<&'static str>,
    pub email_majority: Option<&'static str>,
    pub bars: [Bar; 4],
    pub spam_arc: f64,
    pub real_arc: f64,
    /// Start angle of the "real" arc, in degrees.
    pub real_rotation: f64,
    pub loss_end_y: u32,
    pub loss_path: String,
}

impl LabReport {
    #[must_use]
    pub fn from_tally(tally: &LabTally) -> Self {
        let vision_majority = majority(("Cats", tally.cat), ("Dogs", tally.dog));
        let email_majority = majority(("Spam", tally.spam), ("Real", tally.ham));

        let mut narrative = format!("You completed {} total analyses. ", tally.total);
        if tally.total == 0 {
            narrative.push_str("However, no data points were processed. Try running the labs first.");
        } else {
            match vision_majority {
                Some(label) => narrative.push_str(&format!(
                    "In the Vision Lab, you focused primarily on **{label}**. "
                )),
                None => narrative.push_str("The Vision Lab was not used. "),
            }
            match email_majority {
                Some(label) => {
                    narrative.push_str(&format!("For NLP, you tested more **{label}** emails. "));
                }
                None => narrative.push_str("No emails were checked for spam. "),
            }
            narrative.push_str("The model is showing stable learning patterns with increasing accuracy.");
        }

        let largest = tally.cat.max(tally.dog).max(tally.spam).max(tally.ham);
        let bar = |label, value| Bar {
            label,
            value,
            height: magnitude(value, largest, BAR_FLOOR, 100),
        };

        let emails = (tally.spam + tally.ham).max(1);
        let spam_ratio = f64::from(tally.spam) / f64::from(emails);

        let loss_end_y = 90_u32.saturating_sub(tally.total.saturating_mul(5)).max(10);
        let control_y = f64::from(90 + loss_end_y) / 2.0 - 20.0;

        Self {
            total: tally.total,
            narrative,
            vision_majority,
            email_majority,
            bars: [
                bar("Cat", tally.cat),
                bar("Dog", tally.dog),
                bar("Spam", tally.spam),
                bar("Ham", tally.ham),
            ],
            spam_arc: PIE_CIRCUMFERENCE * spam_ratio,
            real_arc: PIE_CIRCUMFERENCE * (1.0 - spam_ratio),
            real_rotation: -90.0 + 360.0 * spam_ratio,
            loss_end_y,
            loss_path: format!("M0,90 Q100,{control_y} 200,{loss_end_y}"),
        }
    }
}

/// The prompt-framework dashboard. Its numbers are fixed content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptReport {
    pub bars: [Bar; 3],
    pub impact: u32,
    pub timeline_path: &'static str,
    pub summary: &'static str,
}

impl PromptReport {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bars: [
                Bar {
                    label: "Clarity",
                    value: 85,
                    height: 85,
                },
                Bar {
                    label: "Actionability",
                    value: 92,
                    height: 92,
                },
                Bar {
                    label: "Brevity",
                    value: 78,
                    height: 78,
                },
            ],
            impact: 94,
            timeline_path: "M0,100 Q50,90 80,70 T150,50 T220,30 T300,10",
            summary: "**Analysis Complete:** By applying the Framework, you increased Clarity by +45% and Actionability by +60%. Your prompt effectively constrained the model to produce a high-value output.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_prefers_larger_count() {
        assert_eq!(majority(("a", 3), ("b", 1)), Some("a"));
        assert_eq!(majority(("a", 1), ("b", 3)), Some("b"));
        assert_eq!(majority(("a", 2), ("b", 2)), Some("b"));
        assert_eq!(majority(("a", 0), ("b", 0)), None);
    }

    #[test]
    fn magnitude_uses_floor_and_never_divides_by_zero() {
        assert_eq!(magnitude(1, 1, 5, 100), 20);
        assert_eq!(magnitude(3, 12, 5, 100), 25);
        assert_eq!(magnitude(0, 0, 0, 100), 0);
        assert_eq!(magnitude(7, 7, 5, 100), 100);
    }

    #[test]
    fn empty_tally_renders_no_data_fallback() {
        let report = LabReport::from_tally(&LabTally::default());
        assert_eq!(
            report.narrative,
            "You completed 0 total analyses. However, no data points were processed. Try running the labs first."
        );
        assert!(report.bars.iter().all(|bar| bar.height == 0));
        assert!((report.spam_arc - 0.0).abs() < f64::EPSILON);
        assert!((report.real_rotation + 90.0).abs() < f64::EPSILON);
        assert_eq!(report.loss_end_y, 90);
        assert_eq!(report.loss_path, "M0,90 Q100,70 200,90");
    }

    #[test]
    fn mixed_tally_names_majorities_and_scales_bars() {
        let tally = LabTally {
            cat: 3,
            dog: 1,
            spam: 1,
            ham: 3,
            total: 8,
        };
        let report = LabReport::from_tally(&tally);

        assert_eq!(report.vision_majority, Some("Cats"));
        assert_eq!(report.email_majority, Some("Real"));
        assert!(report.narrative.contains("focused primarily on **Cats**"));
        assert!(report.narrative.contains("tested more **Real** emails"));
        let heights: Vec<u32> = report.bars.iter().map(|bar| bar.height).collect();
        assert_eq!(heights, vec![60, 20, 20, 60]);
        assert!((report.spam_arc - 39.5).abs() < 1e-9);
        assert!((report.real_arc - 118.5).abs() < 1e-9);
        assert_eq!(report.loss_end_y, 50);
        assert_eq!(report.loss_path, "M0,90 Q100,50 200,50");
    }

    #[test]
    fn unused_lab_is_named_instead_of_a_tie_winner() {
        let vision_only = LabReport::from_tally(&LabTally {
            cat: 2,
            total: 2,
            ..LabTally::default()
        });
        assert_eq!(vision_only.email_majority, None);
        assert_eq!(
            vision_only.narrative,
            "You completed 2 total analyses. In the Vision Lab, you focused primarily on **Cats**. \
             No emails were checked for spam. The model is showing stable learning patterns with increasing accuracy."
        );

        let spam_only = LabReport::from_tally(&LabTally {
            spam: 1,
            total: 1,
            ..LabTally::default()
        });
        assert_eq!(spam_only.vision_majority, None);
        assert!(spam_only.narrative.contains("The Vision Lab was not used. "));
        assert!(spam_only.narrative.contains("tested more **Spam** emails"));
        assert!(!spam_only.narrative.contains("Dogs"));
    }

    #[test]
    fn loss_curve_bottoms_out() {
        let tally = LabTally {
            cat: 20,
            total: 20,
            ..LabTally::default()
        };
        assert_eq!(LabReport::from_tally(&tally).loss_end_y, 10);
    }
}
