use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ColumnId, PaginationCursor, PagingPolicy};

/// Top-level sections of the explorer, in navigation order.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum Section {
    #[default]
    Introduction,
    DescriptiveStatistics,
    Histograms,
    BoxPlots,
    CorrelationMatrix,
    Conclusion,
}

impl Section {
    pub const ALL: [Self; 6] = [
        Self::Introduction,
        Self::DescriptiveStatistics,
        Self::Histograms,
        Self::BoxPlots,
        Self::CorrelationMatrix,
        Self::Conclusion,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Introduction => "Introduction",
            Self::DescriptiveStatistics => "Descriptive Statistics",
            Self::Histograms => "Histograms",
            Self::BoxPlots => "Box Plots",
            Self::CorrelationMatrix => "Correlation Matrix",
            Self::Conclusion => "Conclusion",
        }
    }

    #[must_use]
    pub fn position(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    /// The following section, wrapping around to the first.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// The preceding section, wrapping around to the last.
    #[must_use]
    pub fn previous(self) -> Self {
        Self::ALL[self
            .position()
            .checked_sub(1)
            .unwrap_or(Self::ALL.len() - 1)]
    }

    /// Whether this section pages through subjects.
    #[must_use]
    pub fn is_paged(self) -> bool {
        matches!(self, Self::Histograms | Self::BoxPlots)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Per-user browsing state.
///
/// Each paged section keeps its own cursor, so switching sections does not
/// lose the position in another one. A session is created when browsing
/// starts and dropped when it ends; nothing is shared between sessions.
#[derive(Debug, Clone)]
pub struct ExplorerSession {
    section: Section,
    histogram_cursor: PaginationCursor<ColumnId>,
    box_plot_cursor: PaginationCursor<ColumnId>,
    show_raw_data: bool,
}

impl Default for ExplorerSession {
    fn default() -> Self {
        Self::with_box_plot_policy(PagingPolicy::TwoThenOne)
    }
}

impl ExplorerSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session whose histograms show one subject per page and whose
    /// box plots follow `policy`.
    #[must_use]
    pub fn with_box_plot_policy(policy: PagingPolicy) -> Self {
        Self {
            section: Section::default(),
            histogram_cursor: PaginationCursor::new(
                ColumnId::SUBJECTS.to_vec(),
                PagingPolicy::OnePerPage,
            ),
            box_plot_cursor: PaginationCursor::new(ColumnId::SUBJECTS.to_vec(), policy),
            show_raw_data: false,
        }
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    pub fn select_section(&mut self, section: Section) {
        self.section = section;
    }

    #[must_use]
    pub fn show_raw_data(&self) -> bool {
        self.show_raw_data
    }

    pub fn toggle_raw_data(&mut self) {
        self.show_raw_data = !self.show_raw_data;
    }

    /// The cursor driving `section`, if it is paged.
    #[must_use]
    pub fn cursor_for(&self, section: Section) -> Option<&PaginationCursor<ColumnId>> {
        match section {
            Section::Histograms => Some(&self.histogram_cursor),
            Section::BoxPlots => Some(&self.box_plot_cursor),
            _ => None,
        }
    }

    #[must_use]
    pub fn cursor_for_mut(&mut self, section: Section) -> Option<&mut PaginationCursor<ColumnId>> {
        match section {
            Section::Histograms => Some(&mut self.histogram_cursor),
            Section::BoxPlots => Some(&mut self.box_plot_cursor),
            _ => None,
        }
    }

    /// Pages back in the current section. Returns `false` if nothing moved.
    pub fn previous_page(&mut self) -> bool {
        self.cursor_for_mut(self.section)
            .is_some_and(PaginationCursor::previous)
    }

    /// Pages forward in the current section. Returns `false` if nothing moved.
    pub fn next_page(&mut self) -> bool {
        self.cursor_for_mut(self.section)
            .is_some_and(PaginationCursor::next)
    }

    /// Subjects shown on the current page of the current section.
    #[must_use]
    pub fn current_subjects(&self) -> &[ColumnId] {
        self.cursor_for(self.section)
            .map(PaginationCursor::current_items)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_navigation_wraps() {
        assert_eq!(Section::Introduction.previous(), Section::Conclusion);
        assert_eq!(Section::Conclusion.next(), Section::Introduction);
        assert_eq!(Section::Histograms.next(), Section::BoxPlots);
        for section in Section::ALL {
            assert_eq!(section.next().previous(), section);
        }
    }

    #[test]
    fn test_cursors_are_independent() {
        let mut session = ExplorerSession::new();
        session.select_section(Section::Histograms);
        assert!(session.next_page());
        assert!(session.next_page());
        assert_eq!(session.current_subjects(), &[ColumnId::Science]);

        session.select_section(Section::BoxPlots);
        assert_eq!(
            session.current_subjects(),
            &[ColumnId::Hindi, ColumnId::English]
        );
        assert!(session.next_page());
        assert_eq!(
            session.current_subjects(),
            &[ColumnId::Science, ColumnId::Maths]
        );

        session.select_section(Section::Histograms);
        assert_eq!(session.current_subjects(), &[ColumnId::Science]);
    }

    #[test]
    fn test_unpaged_sections_ignore_paging() {
        let mut session = ExplorerSession::new();
        session.select_section(Section::CorrelationMatrix);
        assert!(!session.next_page());
        assert!(!session.previous_page());
        assert!(session.current_subjects().is_empty());
        assert!(session.cursor_for(Section::Conclusion).is_none());
    }

    #[test]
    fn test_box_plot_policy() {
        let session = ExplorerSession::with_box_plot_policy(PagingPolicy::OnePerPage);
        let cursor = session.cursor_for(Section::BoxPlots).unwrap();
        assert_eq!(cursor.page_count(), 6);
        assert_eq!(ExplorerSession::new().cursor_for(Section::BoxPlots).unwrap().page_count(), 3);
    }

    #[test]
    fn test_raw_data_toggle() {
        let mut session = ExplorerSession::new();
        assert!(!session.show_raw_data());
        session.toggle_raw_data();
        assert!(session.show_raw_data());
    }
}
