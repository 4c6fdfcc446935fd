//! Upload panel: drop zone, preview, actions, loader and error area.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{ImageUpload, Session};
use crate::tui::styles::LeafTheme;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Text entry of the drop zone.
#[derive(Debug, Clone, Default)]
pub struct DropZoneState {
    /// Path typed so far
    pub input: String,
    /// Why the last drop was rejected, until the next edit
    pub notice: Option<String>,
}

impl DropZoneState {
    pub fn input_char(&mut self, c: char) {
        self.input.push(c);
        self.notice = None;
    }

    pub fn delete_char(&mut self) {
        self.input.pop();
        self.notice = None;
    }

    /// Take the typed path, leaving the field empty.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    pub fn reject(&mut self, reason: impl Into<String>) {
        self.notice = Some(reason.into());
    }
}

/// Render the upload panel
pub fn render_upload(
    f: &mut Frame,
    area: Rect,
    session: &Session,
    drop_zone: &DropZoneState,
    tick: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Drop zone / preview
            Constraint::Length(3), // Path input
            Constraint::Length(1), // Buttons
            Constraint::Length(3), // Loader / error
        ])
        .split(area);

    match session.selected_file() {
        None => render_drop_hint(f, chunks[0]),
        Some(upload) => render_preview(f, chunks[0], upload, session.preview_url()),
    }
    render_path_input(f, chunks[1], drop_zone);
    render_buttons(f, chunks[2], session);
    render_status(f, chunks[3], session, tick);
}

fn render_drop_hint(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Drag & drop an image here, or type its path below",
            LeafTheme::text_secondary(),
        )),
        Line::from(Span::styled(
            "(Supports .jpg, .jpeg, .png)",
            LeafTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(" Leaf Photo ", LeafTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(LeafTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_preview(f: &mut Frame, area: Rect, upload: &ImageUpload, preview_url: Option<&str>) {
    let dimensions = upload
        .dimensions()
        .map(|(w, h)| format!("{w}×{h} px"))
        .unwrap_or_else(|| "unknown size".to_string());

    let reference = preview_url
        .map(|u| {
            let head: String = u.chars().take(40).collect();
            format!("{head}…")
        })
        .unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(upload.file_name().to_string(), LeafTheme::title())),
        Line::from(vec![
            Span::styled(upload.kind().mime(), LeafTheme::text_secondary()),
            Span::styled(" │ ", LeafTheme::text_muted()),
            Span::styled(format_size(upload.size_bytes()), LeafTheme::text_secondary()),
            Span::styled(" │ ", LeafTheme::text_muted()),
            Span::styled(dimensions, LeafTheme::text_secondary()),
        ]),
        Line::from(Span::styled(reference, LeafTheme::text_muted())),
    ];

    let preview = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(" Selected Leaf ", LeafTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(LeafTheme::border_focused()),
        );

    f.render_widget(preview, area);
}

fn render_path_input(f: &mut Frame, area: Rect, drop_zone: &DropZoneState) {
    let line = match (&drop_zone.notice, drop_zone.input.is_empty()) {
        (Some(notice), true) => Line::from(vec![
            Span::styled("! ", LeafTheme::danger()),
            Span::styled(notice.as_str(), LeafTheme::danger()),
        ]),
        (_, true) => Line::from(vec![
            Span::styled("/path/to/leaf.jpg", LeafTheme::text_muted()),
            Span::styled("▌", LeafTheme::cursor()),
        ]),
        (_, false) => Line::from(vec![
            Span::styled(drop_zone.input.as_str(), LeafTheme::text()),
            Span::styled("▌", LeafTheme::cursor()),
        ]),
    };

    let input = Paragraph::new(line).block(
        Block::default()
            .title(Span::styled(" Path ", LeafTheme::text_secondary()))
            .borders(Borders::ALL)
            .border_style(LeafTheme::border()),
    );

    f.render_widget(input, area);
}

fn render_buttons(f: &mut Frame, area: Rect, session: &Session) {
    let analyze_label = if session.is_loading() {
        " Analyzing... "
    } else {
        " [Enter] Analyze Disease "
    };
    let analyze_style = if session.can_submit() {
        LeafTheme::selected()
    } else {
        LeafTheme::disabled()
    };
    let clear_style = if session.can_clear() {
        LeafTheme::key_hint()
    } else {
        LeafTheme::disabled()
    };

    let buttons = Paragraph::new(Line::from(vec![
        Span::styled(analyze_label, analyze_style),
        Span::raw("   "),
        Span::styled(" [Esc] Clear ", clear_style),
    ]))
    .alignment(Alignment::Center);

    f.render_widget(buttons, area);
}

fn render_status(f: &mut Frame, area: Rect, session: &Session, tick: usize) {
    let lines = if session.is_loading() {
        vec![Line::from(vec![
            Span::styled(SPINNER[tick % SPINNER.len()], LeafTheme::subtitle()),
            Span::styled(" Analyzing leaf...", LeafTheme::text_secondary()),
        ])]
    } else if let Some(error) = session.error() {
        vec![Line::from(vec![
            Span::styled(
                "Error: ",
                LeafTheme::danger().add_modifier(ratatui::style::Modifier::BOLD),
            ),
            Span::styled(error, LeafTheme::danger()),
        ])]
    } else {
        vec![]
    };

    let status = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(status, area);
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
