//! Static narrative text shown alongside the statistics.

use crate::ColumnId;

pub const DATASET_INTRODUCTION: &str = "This dataset contains exam marks for 1000 students in six \
subjects: Hindi, English, Science, Maths, History, and Geography. It also includes three \
additional columns: Total Marks, Results, and Division. It can be used for both binary \
classification (pass/fail) and multi-class classification (division categories).";

pub const EXPLORATION_PURPOSE: &str = "The purpose of this exploration is to analyze the \
performance of students across different subjects, identify trends in their results, and \
assess the factors that may contribute to their success or failure.";

/// Meaning of the derived columns.
pub const COLUMN_LEGEND: [(ColumnId, &str); 3] = [
    (ColumnId::Total, "The sum of marks across all subjects."),
    (ColumnId::Results, "Whether a student passed (1) or failed (0)."),
    (ColumnId::Div, "Overall performance category, see the division legend."),
];

/// Meaning of each `Div` value.
pub const DIVISION_LEGEND: [(u8, &str); 4] = [
    (0, "Failed"),
    (1, "First Division (high marks)"),
    (2, "Second Division (satisfactory performance)"),
    (3, "Third Division (just passed)"),
];

/// Closing observations, as `(heading, text)` pairs.
pub const CONCLUSIONS: [(&str, &str); 3] = [
    (
        "Subject Difficulty",
        "Maths appears to be the subject with the highest struggles while Hindi and History \
         appear to be doing relatively better.",
    ),
    (
        "Possible Knowledge / Skill Gaps",
        "The bimodal distribution for English suggests a potential extreme divergence of \
         language abilities in the student population. This could potentially require more \
         tailor-made teaching strategies.",
    ),
    (
        "Outliers & Performance Gaps",
        "In some subjects, there is such a wide range of scores - for example, Geography and \
         Science - that it would seem that most children are performing reasonably well but \
         one or two must be lagging behind and requiring additional support.",
    ),
];

/// One-line observation about a subject, if there is one.
#[must_use]
pub const fn subject_insight(column: ColumnId) -> Option<&'static str> {
    match column {
        ColumnId::Hindi => Some("Relatively strong results across the cohort."),
        ColumnId::English => Some("Bimodal distribution: language ability diverges sharply."),
        ColumnId::Science => Some("Wide range of scores with a lagging tail."),
        ColumnId::Maths => Some("The subject students struggle with most."),
        ColumnId::History => Some("Relatively strong results across the cohort."),
        ColumnId::Geography => Some("Wide range of scores with a lagging tail."),
        ColumnId::Total | ColumnId::Results | ColumnId::Div => None,
    }
}

/// Label of a `Div` value, if it is a known division.
#[must_use]
pub fn division_label(div: u8) -> Option<&'static str> {
    DIVISION_LEGEND
        .iter()
        .find_map(|&(value, label)| (value == div).then_some(label))
}
