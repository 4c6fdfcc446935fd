//! UI module: View components for the TUI.

pub mod result;
pub mod upload;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{Session, SessionPhase};
use crate::tui::styles::LeafTheme;

pub fn render_header(f: &mut Frame, area: Rect, endpoint: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", LeafTheme::text()),
        Span::styled("Agri-Detect", LeafTheme::title()),
        Span::styled(" │ ", LeafTheme::text_muted()),
        Span::styled(
            "Upload a plant leaf image to detect diseases in real-time.",
            LeafTheme::text_secondary(),
        ),
        Span::styled(format!("  ({endpoint})"), LeafTheme::text_muted()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(LeafTheme::border()),
    );

    f.render_widget(header, area);
}

pub fn render_footer(f: &mut Frame, area: Rect, session: &Session) {
    let mut hints = vec![
        Span::styled("[Enter] ", LeafTheme::key_hint()),
        Span::styled("Drop path / Analyze ", LeafTheme::key_desc()),
        Span::styled("[Esc] ", LeafTheme::key_hint()),
        Span::styled("Clear ", LeafTheme::key_desc()),
    ];
    if session.phase() == SessionPhase::Resulted {
        hints.push(Span::styled("[Tab/←→] ", LeafTheme::key_hint()));
        hints.push(Span::styled("Switch Tab ", LeafTheme::key_desc()));
    }
    hints.push(Span::styled("[Ctrl+Q] ", LeafTheme::key_hint()));
    hints.push(Span::styled("Quit", LeafTheme::key_desc()));

    let text = vec![
        Line::from(hints),
        Line::from(Span::styled(
            "Predictions are indicative; confirm serious infections with an agronomist.",
            LeafTheme::text_muted(),
        )),
    ];

    let footer = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(LeafTheme::border()),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}
