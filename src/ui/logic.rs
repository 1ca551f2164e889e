//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑，把 Action 转换为对购物清单模型的调用

use super::actions::Action;
use super::state::{App, AppMode, ConfirmAction, InputField};

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        log::trace!("dispatch {:?} in {:?}", action, self.mode);

        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::StartAddItem => self.start_add_item(),
            Action::StartEditItem => self.start_edit_item(),
            Action::StartDeleteItem => self.start_delete_item(),

            Action::SwitchField => {
                if matches!(self.mode, AppMode::AddingItem | AppMode::EditingItem(_)) {
                    self.input_field = self.input_field.toggle();
                }
            }

            Action::Cancel => self.cancel(),

            Action::Submit => match &self.mode {
                AppMode::AddingItem => self.confirm_add_item(),
                AppMode::EditingItem(id) => {
                    let id = *id;
                    self.confirm_edit_item(id);
                }
                AppMode::Confirm(_) => self.execute_confirm(),
                AppMode::Normal => {}
            },

            Action::Input(c) => {
                if let Some(buffer) = self.active_buffer_mut() {
                    buffer.push(c);
                }
            }

            Action::DeleteChar => {
                if let Some(buffer) = self.active_buffer_mut() {
                    buffer.pop();
                }
            }
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.list.len() {
            self.selected_index += 1;
        }
    }

    // ============ 添加相关 ============

    /// 打开添加对话框
    pub fn start_add_item(&mut self) {
        self.list.open_add_dialog();
        self.mode = AppMode::AddingItem;
        self.input_field = InputField::Name;
        self.message = None;
    }

    /// 确认添加
    pub fn confirm_add_item(&mut self) {
        match self.list.confirm_add() {
            Some(id) => {
                self.selected_index = self.list.len() - 1;
                self.mode = AppMode::Normal;
                self.message = Some(format!("已添加条目 #{}", id));
            }
            None if self.list.draft_name().trim().is_empty() => {
                self.input_field = InputField::Name;
                self.message = Some("名称不能为空".to_string());
            }
            None => self.message = Some("无法添加更多条目".to_string()),
        }
    }

    // ============ 编辑相关 ============

    /// 选中条目进入行内编辑
    pub fn start_edit_item(&mut self) {
        let Some((id, name, quantity)) = self
            .selected_item()
            .map(|item| (item.id, item.name.clone(), item.quantity))
        else {
            return;
        };
        self.edit_name = name;
        self.edit_quantity = quantity.to_string();

        if self.list.begin_edit(id) {
            self.mode = AppMode::EditingItem(id);
            self.input_field = InputField::Name;
            self.message = None;
        }
    }

    /// 保存编辑结果
    pub fn confirm_edit_item(&mut self, id: u32) {
        let name = std::mem::take(&mut self.edit_name);
        let quantity = std::mem::take(&mut self.edit_quantity);
        self.message = if self.list.commit_edit(id, &name, &quantity) {
            Some("条目已更新".to_string())
        } else {
            Some(format!("条目 #{} 不存在", id))
        };
        self.mode = AppMode::Normal;
    }

    // ============ 删除相关 ============

    /// 删除选中条目（按配置决定是否先确认）
    pub fn start_delete_item(&mut self) {
        let Some(id) = self.selected_item_id() else {
            return;
        };
        if self.config.confirm_delete {
            self.mode = AppMode::Confirm(ConfirmAction::Delete(id));
        } else {
            self.delete_item(id);
        }
    }

    fn delete_item(&mut self, id: u32) {
        if let Some(item) = self.list.delete_item(id) {
            self.message = Some(format!("已删除 {}", item.name));
        }
        self.clamp_selection();
    }

    /// 执行确认操作
    pub fn execute_confirm(&mut self) {
        if let AppMode::Confirm(ConfirmAction::Delete(id)) = self.mode {
            self.delete_item(id);
        }
        self.mode = AppMode::Normal;
    }

    // ============ 通用操作 ============

    /// 取消当前操作
    pub fn cancel(&mut self) {
        match self.mode {
            AppMode::AddingItem => self.list.cancel_add_dialog(),
            AppMode::EditingItem(_) => {
                self.list.cancel_edit();
                self.edit_name.clear();
                self.edit_quantity.clear();
            }
            _ => {}
        }
        self.mode = AppMode::Normal;
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.dispatch(Action::Input(c));
        }
    }

    fn add(app: &mut App, name: &str, quantity: &str) {
        app.dispatch(Action::StartAddItem);
        type_text(app, name);
        app.dispatch(Action::SwitchField);
        type_text(app, quantity);
        app.dispatch(Action::Submit);
    }

    fn app_with_items() -> App {
        let mut app = App::new(Config::default());
        add(&mut app, "Milk", "2");
        add(&mut app, "Eggs", "12");
        add(&mut app, "Bread", "1");
        app
    }

    #[test]
    fn test_add_via_dialog() {
        let mut app = App::new(Config::default());
        app.dispatch(Action::StartAddItem);
        assert_eq!(app.mode, AppMode::AddingItem);
        assert!(app.list.is_add_dialog_open());

        type_text(&mut app, "Milkk");
        app.dispatch(Action::DeleteChar);
        app.dispatch(Action::SwitchField);
        type_text(&mut app, "2");
        app.dispatch(Action::Submit);

        assert_eq!(app.mode, AppMode::Normal);
        assert!(!app.list.is_add_dialog_open());
        assert_eq!(app.list.len(), 1);
        let item = &app.list.items()[0];
        assert_eq!(item.name, "Milk");
        assert_eq!(item.quantity, 2);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_add_blank_name_keeps_dialog_open() {
        let mut app = App::new(Config::default());
        app.dispatch(Action::StartAddItem);
        type_text(&mut app, "  ");
        app.dispatch(Action::Submit);

        assert_eq!(app.mode, AppMode::AddingItem);
        assert!(app.list.is_empty());
        assert!(app.message.is_some());
    }

    #[test]
    fn test_cancel_add_dialog() {
        let mut app = App::new(Config::default());
        app.dispatch(Action::StartAddItem);
        type_text(&mut app, "Tea");
        app.dispatch(Action::Cancel);

        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.list.draft_name().is_empty());
        assert!(app.list.is_empty());
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(Config::default());
        assert!(app.dispatch(Action::Quit));
    }

    #[test]
    fn test_edit_selected_item() {
        let mut app = app_with_items();
        app.selected_index = 1;
        app.dispatch(Action::StartEditItem);

        assert_eq!(app.mode, AppMode::EditingItem(2));
        assert_eq!(app.edit_name, "Eggs");
        assert_eq!(app.edit_quantity, "12");
        assert_eq!(app.list.editing_item().map(|item| item.id), Some(2));

        app.dispatch(Action::SwitchField);
        app.dispatch(Action::DeleteChar);
        app.dispatch(Action::DeleteChar);
        type_text(&mut app, "6");
        app.dispatch(Action::Submit);

        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.list.editing_item().is_none());
        assert_eq!(app.list.get(2).unwrap().quantity, 6);
        assert_eq!(app.list.get(2).unwrap().name, "Eggs");
    }

    #[test]
    fn test_edit_with_junk_quantity() {
        let mut app = app_with_items();
        app.selected_index = 0;
        app.dispatch(Action::StartEditItem);
        assert_eq!(app.mode, AppMode::EditingItem(1));

        app.dispatch(Action::SwitchField);
        app.dispatch(Action::DeleteChar);
        assert!(app.edit_quantity.is_empty());
        type_text(&mut app, "abc");
        app.dispatch(Action::Submit);

        let item = app.list.get(1).unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_cancel_edit_keeps_item() {
        let mut app = app_with_items();
        app.selected_index = 0;
        app.dispatch(Action::StartEditItem);
        assert_eq!(app.list.editing_item().map(|item| item.id), Some(1));

        type_text(&mut app, "zzz");
        app.dispatch(Action::SwitchField);
        type_text(&mut app, "9");
        assert_eq!(app.edit_name, "Milkzzz");
        app.dispatch(Action::Cancel);

        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.list.editing_item().is_none());
        let item = app.list.get(1).unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_submit_edit_for_removed_item() {
        let mut app = app_with_items();
        app.selected_index = 0;
        app.dispatch(Action::StartEditItem);
        app.list.delete_item(1);
        app.dispatch(Action::Submit);

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.message.as_deref(), Some("条目 #1 不存在"));
        assert!(app.list.editing_item().is_none());
        assert_eq!(app.list.len(), 2);
    }

    #[test]
    fn test_delete_without_confirm() {
        let mut app = app_with_items();
        app.selected_index = 2;
        app.dispatch(Action::StartDeleteItem);

        assert_eq!(app.list.len(), 2);
        assert_eq!(app.selected_index, 1);
        assert!(app.list.get(3).is_none());
    }

    #[test]
    fn test_delete_with_confirm() {
        let mut app = app_with_items();
        app.config.confirm_delete = true;
        app.selected_index = 1;

        app.dispatch(Action::StartDeleteItem);
        assert_eq!(app.mode, AppMode::Confirm(ConfirmAction::Delete(2)));
        app.dispatch(Action::Cancel);
        assert_eq!(app.list.len(), 3);

        app.dispatch(Action::StartDeleteItem);
        app.dispatch(Action::Submit);
        assert_eq!(app.mode, AppMode::Normal);
        let names: Vec<&str> = app.list.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Bread"]);
    }

    #[test]
    fn test_actions_on_empty_list() {
        let mut app = App::new(Config::default());
        app.dispatch(Action::StartEditItem);
        app.dispatch(Action::StartDeleteItem);
        app.dispatch(Action::MoveSelectionDown);

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_selection_bounds() {
        let mut app = app_with_items();
        app.selected_index = 0;
        app.dispatch(Action::MoveSelectionUp);
        assert_eq!(app.selected_index, 0);
        for _ in 0..5 {
            app.dispatch(Action::MoveSelectionDown);
        }
        assert_eq!(app.selected_index, 2);
    }
}
