//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use crate::config::Config;
use crate::models::{ShoppingItem, ShoppingList};

/// 应用状态
pub struct App {
    pub list: ShoppingList,
    pub config: Config,
    pub selected_index: usize,
    pub mode: AppMode,
    pub input_field: InputField,
    pub edit_name: String,     // 行内编辑器的名称缓冲
    pub edit_quantity: String, // 行内编辑器的数量缓冲
    pub message: Option<String>,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    AddingItem,
    EditingItem(u32), // 正在编辑的条目 ID
    Confirm(ConfirmAction),
}

/// 确认操作类型
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    Delete(u32),
}

/// 输入字段类型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputField {
    Name,
    Quantity,
}

impl InputField {
    pub fn toggle(self) -> Self {
        match self {
            InputField::Name => InputField::Quantity,
            InputField::Quantity => InputField::Name,
        }
    }
}

impl App {
    /// 创建新的应用实例
    pub fn new(config: Config) -> Self {
        Self {
            list: ShoppingList::with_fallback_quantity(config.fallback_quantity),
            config,
            selected_index: 0,
            mode: AppMode::Normal,
            input_field: InputField::Name,
            edit_name: String::new(),
            edit_quantity: String::new(),
            message: None,
        }
    }

    /// 确保选中索引有效
    pub fn clamp_selection(&mut self) {
        if self.list.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.list.len() {
            self.selected_index = self.list.len() - 1;
        }
    }

    /// 获取当前选中的条目
    pub fn selected_item(&self) -> Option<&ShoppingItem> {
        self.list.items().get(self.selected_index)
    }

    /// 获取当前选中的条目 ID
    pub fn selected_item_id(&self) -> Option<u32> {
        self.selected_item().map(|item| item.id)
    }

    /// 当前获得焦点的输入缓冲
    pub fn active_buffer_mut(&mut self) -> Option<&mut String> {
        match (&self.mode, self.input_field) {
            (AppMode::AddingItem, InputField::Name) => self.list.draft_name_mut(),
            (AppMode::AddingItem, InputField::Quantity) => self.list.draft_quantity_mut(),
            (AppMode::EditingItem(_), InputField::Name) => Some(&mut self.edit_name),
            (AppMode::EditingItem(_), InputField::Quantity) => Some(&mut self.edit_quantity),
            _ => None,
        }
    }
}
