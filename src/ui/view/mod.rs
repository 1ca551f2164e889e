//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, AppMode, ConfirmAction, InputField};
use crate::models::ShoppingItem;
use components::{render_dialog_framework, render_input_widget};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(8),    // 清单
            Constraint::Length(5), // 详情
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_details(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);

    // 渲染弹窗
    match &app.mode {
        AppMode::AddingItem => render_add_dialog(frame, app),
        AppMode::Confirm(action) => render_confirm_dialog(frame, app, action),
        AppMode::Normal | AppMode::EditingItem(_) => {} // 编辑在行内完成
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let text = format!(
        "🛒 购物清单  共 {} 项 / {} 件",
        app.list.len(),
        app.list.total_quantity()
    );
    let title = Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

/// 普通行
fn item_line(item: &ShoppingItem, selected: bool) -> Line<'static> {
    let style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Green)
    };

    Line::from(vec![
        Span::styled(format!("{}  ", item.name), style),
        Span::styled(
            format!("x{}", item.quantity),
            style.add_modifier(Modifier::DIM),
        ),
    ])
}

/// 编辑中的行：显示编辑缓冲，当前字段加光标
fn editor_line(app: &App) -> Line<'static> {
    let field_style = |field: InputField| {
        if app.input_field == field {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Black).bg(Color::Gray)
        }
    };
    let cursor = |field: InputField| if app.input_field == field { "▏" } else { "" };

    Line::from(vec![
        Span::raw("✎ "),
        Span::styled(
            format!("{}{}", app.edit_name, cursor(InputField::Name)),
            field_style(InputField::Name),
        ),
        Span::raw("  x"),
        Span::styled(
            format!("{}{}", app.edit_quantity, cursor(InputField::Quantity)),
            field_style(InputField::Quantity),
        ),
    ])
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .list
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let line = if item.is_editing {
                editor_line(app)
            } else {
                item_line(item, i == app.selected_index)
            };
            ListItem::new(line)
        })
        .collect();

    let list_widget = List::new(items)
        .block(Block::default().title("清单").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !app.list.is_empty() {
        state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(list_widget, area, &mut state);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(item) = app.list.editing_item() {
        format!("正在编辑 #{}  原数量: {}", item.id, item.quantity)
    } else if let Some(item) = app.selected_item() {
        format!(
            "#{}  {}  数量: {}\n添加于: {}",
            item.id,
            item.name,
            item.quantity,
            item.added_at.format("%Y-%m-%d %H:%M"),
        )
    } else {
        "清单是空的，按 'a' 添加第一项".to_string()
    };

    let details = Paragraph::new(content)
        .block(Block::default().title("详情").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(details, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.mode {
        AppMode::Normal => "[a] 添加  [e/Enter] 编辑  [d] 删除  [j/k] 导航  [q] 退出",
        AppMode::AddingItem => "[Tab] 切换字段  [Enter] 添加  [Esc] 取消",
        AppMode::EditingItem(_) => "[Tab] 切换字段  [Enter] 保存  [Esc] 取消",
        AppMode::Confirm(_) => "[y] 确认  [n] 取消",
    };

    let text = match app.message.as_deref() {
        Some(message) if !message.is_empty() => format!("{}  |  {}", help_text, message),
        _ => help_text.to_string(),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_add_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 50, frame.area());
    let inner = render_dialog_framework(frame, area, "添加购物条目");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    render_input_widget(
        frame,
        chunks[0],
        "名称",
        app.list.draft_name(),
        app.input_field == InputField::Name,
        Color::Yellow,
    );
    render_input_widget(
        frame,
        chunks[1],
        "数量",
        app.list.draft_quantity(),
        app.input_field == InputField::Quantity,
        Color::Yellow,
    );

    let hint = format!(
        "数量留空或无效时按 {} 计",
        app.config.fallback_quantity
    );
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::Gray)),
        chunks[2],
    );
}

fn render_confirm_dialog(frame: &mut Frame, app: &App, action: &ConfirmAction) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let message = match action {
        ConfirmAction::Delete(id) => match app.list.get(*id) {
            Some(item) => format!("确认删除 \"{}\"？", item.name),
            None => "确认删除该条目？".to_string(),
        },
    };

    let dialog = Paragraph::new(format!("{}\n\n[y] 确认  [n] 取消", message))
        .style(Style::default().fg(Color::Red))
        .block(Block::default().title("⚠️ 确认操作").borders(Borders::ALL));

    frame.render_widget(dialog, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ui::actions::Action;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_render_items() {
        let mut app = App::new(Config::default());
        app.list.add_item("Milk", "2");
        app.list.add_item("Eggs", "12");

        let text = screen_text(&app);
        assert!(text.contains("Milk"));
        assert!(text.contains("x12"));
    }

    #[test]
    fn test_render_add_dialog() {
        let mut app = App::new(Config::default());
        app.dispatch(Action::StartAddItem);
        for c in "Tofu".chars() {
            app.dispatch(Action::Input(c));
        }

        let text = screen_text(&app);
        assert!(app.list.is_add_dialog_open());
        assert!(text.contains("Tofu"));
    }

    #[test]
    fn test_render_inline_editor() {
        let mut app = App::new(Config::default());
        app.list.add_item("Milk", "2");
        app.list.add_item("Eggs", "12");
        app.selected_index = 1;
        app.dispatch(Action::StartEditItem);
        app.dispatch(Action::Input('!'));

        let text = screen_text(&app);
        assert!(text.contains("Eggs!▏"));
        assert!(text.contains("x12"));
        assert!(text.contains("#2"));
    }

    #[test]
    fn test_render_delete_confirm() {
        let mut app = App::new(Config {
            confirm_delete: true,
            ..Config::default()
        });
        app.list.add_item("Milk", "2");
        app.dispatch(Action::StartDeleteItem);

        let text = screen_text(&app);
        assert!(text.contains("\"Milk\""));
        assert_eq!(app.list.len(), 1);
    }

    #[test]
    fn test_render_empty_list() {
        let app = App::new(Config::default());
        let text = screen_text(&app);
        assert!(text.contains("'a'"));
    }
}
