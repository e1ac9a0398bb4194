// Notification overlay: a modal message that blocks input until the user
// dismisses it with Enter or Esc.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::centered_rect;
use crate::protocol::{Notification, Severity};

const DIALOG_WIDTH: u16 = 64;
const DIALOG_HEIGHT: u16 = 8;

pub fn render(frame: &mut Frame, area: Rect, notification: &Notification) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let color = match notification.severity {
        Severity::Info => Color::Cyan,
        Severity::Error => Color::Red,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", notification.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(" Enter to dismiss ").right_aligned());

    let paragraph = Paragraph::new(notification.message.clone())
        .block(block)
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(paragraph, dialog_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_title_and_message() {
        let backend = ratatui::backend::TestBackend::new(80, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let notification =
            Notification::error("Update salary failed", "Player not found on the server");
        terminal
            .draw(|frame| render(frame, frame.area(), &notification))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Update salary failed"));
        assert!(text.contains("Player not found on the server"));
        assert!(text.contains("Enter to dismiss"));
    }
}
