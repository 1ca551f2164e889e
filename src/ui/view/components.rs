//! 通用 UI 组件
//!
//! 对话框、输入框等通用组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// [组件] 弹窗基础框架，返回内部可用区域
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 单行输入框，获得焦点时高亮并显示光标
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    is_focused: bool,
    active_color: Color,
) {
    let (style, text) = if is_focused {
        (
            Style::default()
                .fg(active_color)
                .add_modifier(Modifier::BOLD),
            format!("{}▏", value),
        )
    } else {
        (Style::default().fg(Color::Gray), value.to_string())
    };

    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(input, area);
}
