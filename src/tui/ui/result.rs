//! Result panel: disease name, confidence gauge, description and the
//! symptoms / prevention tabs.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::domain::PredictionResult;
use crate::tui::styles::LeafTheme;

/// Which list the result panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultTab {
    #[default]
    Symptoms,
    Prevention,
}

impl ResultTab {
    pub const ALL: [ResultTab; 2] = [ResultTab::Symptoms, ResultTab::Prevention];

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Symptoms => "Symptoms",
            Self::Prevention => "Treatment & Prevention",
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Symptoms => 0,
            Self::Prevention => 1,
        }
    }

    #[must_use]
    pub fn toggled(&self) -> Self {
        match self {
            Self::Symptoms => Self::Prevention,
            Self::Prevention => Self::Symptoms,
        }
    }

    /// The sequence this tab lists.
    #[must_use]
    pub fn items<'a>(&self, result: &'a PredictionResult) -> &'a [String] {
        match self {
            Self::Symptoms => &result.details.symptoms,
            Self::Prevention => &result.details.prevention,
        }
    }
}

/// UI-only state of the result panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultViewState {
    pub active_tab: ResultTab,
}

impl ResultViewState {
    pub fn select(&mut self, tab: ResultTab) {
        self.active_tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.toggled();
    }
}

/// Render the result panel
pub fn render_result(
    f: &mut Frame,
    area: Rect,
    result: &PredictionResult,
    state: &ResultViewState,
) {
    let block = Block::default()
        .title(Span::styled(" Analysis Complete ", LeafTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(LeafTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Disease name
            Constraint::Length(3), // Gauge
            Constraint::Length(3), // Description
            Constraint::Length(2), // Tabs
            Constraint::Min(0),    // Tab content
        ])
        .margin(1)
        .split(inner);

    let name = Paragraph::new(Line::from(Span::styled(
        result.disease_name.as_str(),
        LeafTheme::title(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(name, chunks[0]);

    let confidence = result.gauge();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(LeafTheme::border()),
        )
        .gauge_style(LeafTheme::gauge(confidence.level))
        .ratio(confidence.ratio())
        .label(Span::styled(confidence.label(), LeafTheme::title()));
    f.render_widget(gauge, chunks[1]);

    let description = Paragraph::new(result.details.description.as_str())
        .style(LeafTheme::text_secondary())
        .wrap(Wrap { trim: true });
    f.render_widget(description, chunks[2]);

    let tabs = Tabs::new(ResultTab::ALL.iter().map(|t| t.title()))
        .select(state.active_tab.index())
        .style(LeafTheme::text_secondary())
        .highlight_style(LeafTheme::selected())
        .divider(Span::styled("│", LeafTheme::text_muted()))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(LeafTheme::border()),
        );
    f.render_widget(tabs, chunks[3]);

    let items: Vec<ListItem> = state
        .active_tab
        .items(result)
        .iter()
        .enumerate()
        .map(|(i, item)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), LeafTheme::key_hint()),
                Span::styled(item.as_str(), LeafTheme::text()),
            ]))
        })
        .collect();
    f.render_widget(List::new(items), chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DiseaseDetails;
    use ratatui::{backend::TestBackend, Terminal};

    fn result() -> PredictionResult {
        PredictionResult {
            disease_name: "Grape Black Rot".to_string(),
            confidence: 0.97,
            details: DiseaseDetails {
                description: "Fungal disease of grapes.".to_string(),
                symptoms: vec!["Brown circular lesions".to_string()],
                prevention: vec!["Prune infected canes".to_string()],
            },
        }
    }

    fn render_to_text(state: &ResultViewState) -> String {
        let backend = TestBackend::new(70, 24);
        let mut terminal = Terminal::new(backend).expect("terminal");
        let result = result();
        terminal
            .draw(|f| render_result(f, f.area(), &result, state))
            .expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_default_tab_is_symptoms() {
        assert_eq!(ResultViewState::default().active_tab, ResultTab::Symptoms);
    }

    #[test]
    fn test_tab_switch_is_local() {
        let mut state = ResultViewState::default();
        state.next_tab();
        assert_eq!(state.active_tab, ResultTab::Prevention);
        state.next_tab();
        assert_eq!(state.active_tab, ResultTab::Symptoms);
        state.select(ResultTab::Prevention);
        assert_eq!(state.active_tab, ResultTab::Prevention);
    }

    #[test]
    fn test_tab_items() {
        let result = result();
        assert_eq!(ResultTab::Symptoms.items(&result), ["Brown circular lesions".to_string()]);
        assert_eq!(ResultTab::Prevention.items(&result), ["Prune infected canes".to_string()]);
    }

    #[test]
    fn test_render_shows_active_list_only() {
        let symptoms = render_to_text(&ResultViewState::default());
        assert!(symptoms.contains("Grape Black Rot"));
        assert!(symptoms.contains("97.0% Confidence"));
        assert!(symptoms.contains("Brown circular lesions"));
        assert!(!symptoms.contains("Prune infected canes"));

        let prevention = render_to_text(&ResultViewState {
            active_tab: ResultTab::Prevention,
        });
        assert!(prevention.contains("Prune infected canes"));
        assert!(!prevention.contains("Brown circular lesions"));
    }

    #[test]
    fn test_render_empty_list() {
        let mut empty = result();
        empty.details.symptoms.clear();
        let backend = TestBackend::new(70, 24);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|f| render_result(f, f.area(), &empty, &ResultViewState::default()))
            .expect("draw");
    }
}
