use chrono::{DateTime, Local};

use crate::error::QuantityError;

/// 数量解析失败时使用的默认值
pub const DEFAULT_QUANTITY: u32 = 1;

/// 购物清单条目
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingItem {
    pub id: u32,
    pub name: String,
    pub quantity: u32,
    pub is_editing: bool, // 是否处于编辑状态
    pub added_at: DateTime<Local>,
}

impl ShoppingItem {
    pub fn new(id: u32, name: String, quantity: u32) -> Self {
        Self {
            id,
            name,
            quantity,
            is_editing: false,
            added_at: Local::now(),
        }
    }
}

/// 解析用户输入的数量文本
pub fn parse_quantity(text: &str) -> Result<u32, QuantityError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(QuantityError::Empty);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| QuantityError::Invalid(trimmed.to_string()))
}

/// 购物清单状态模型
///
/// 持有全部条目、添加对话框的开关以及草稿字段。
/// 所有修改都必须经过这里的方法，以保证：
/// - `id` 在清单生命周期内唯一（单调递增，删除后也不复用）
/// - 同一时刻最多只有一个条目处于编辑状态
#[derive(Debug, Clone)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
    next_id: u32,
    fallback_quantity: u32,
    add_dialog_open: bool,
    draft_name: String,
    draft_quantity: String,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::with_fallback_quantity(DEFAULT_QUANTITY)
    }

    pub fn with_fallback_quantity(fallback_quantity: u32) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            fallback_quantity,
            add_dialog_open: false,
            draft_name: String::new(),
            draft_quantity: String::new(),
        }
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn is_add_dialog_open(&self) -> bool {
        self.add_dialog_open
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    pub fn draft_quantity(&self) -> &str {
        &self.draft_quantity
    }

    /// 草稿名称输入缓冲，仅在对话框打开时可写
    pub fn draft_name_mut(&mut self) -> Option<&mut String> {
        self.add_dialog_open.then_some(&mut self.draft_name)
    }

    /// 草稿数量输入缓冲，仅在对话框打开时可写
    pub fn draft_quantity_mut(&mut self) -> Option<&mut String> {
        self.add_dialog_open.then_some(&mut self.draft_quantity)
    }

    /// 当前处于编辑状态的条目
    pub fn editing_item(&self) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.is_editing)
    }

    /// 所有条目数量之和
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    fn quantity_or_fallback(&self, text: &str) -> u32 {
        match parse_quantity(text) {
            Ok(quantity) => quantity,
            Err(e) => {
                log::debug!("{}，使用默认数量 {}", e, self.fallback_quantity);
                self.fallback_quantity
            }
        }
    }

    // ============ 添加对话框 ============

    pub fn open_add_dialog(&mut self) {
        self.add_dialog_open = true;
    }

    pub fn cancel_add_dialog(&mut self) {
        self.add_dialog_open = false;
        self.draft_name.clear();
        self.draft_quantity.clear();
    }

    /// 用草稿字段确认添加
    pub fn confirm_add(&mut self) -> Option<u32> {
        let name = std::mem::take(&mut self.draft_name);
        let quantity = std::mem::take(&mut self.draft_quantity);
        let added = self.add_item(&name, &quantity);
        if added.is_none() {
            // 添加失败，保留草稿继续输入
            self.draft_name = name;
            self.draft_quantity = quantity;
        }
        added
    }

    /// 添加新条目，名称为空白或 ID 用尽时不做任何修改
    pub fn add_item(&mut self, name: &str, quantity_text: &str) -> Option<u32> {
        if name.trim().is_empty() {
            return None;
        }

        let Some(next_id) = self.next_id.checked_add(1) else {
            log::warn!("条目 ID 已用尽，拒绝添加 {:?}", name);
            return None;
        };
        let quantity = self.quantity_or_fallback(quantity_text);
        let id = self.next_id;
        self.next_id = next_id;
        self.items
            .push(ShoppingItem::new(id, name.to_string(), quantity));

        self.add_dialog_open = false;
        self.draft_name.clear();
        self.draft_quantity.clear();

        log::info!("添加条目 #{} {:?} x{}", id, name, quantity);
        Some(id)
    }

    // ============ 编辑 ============

    /// 进入编辑模式，其余条目全部退出编辑
    pub fn begin_edit(&mut self, id: u32) -> bool {
        let mut found = false;
        for item in &mut self.items {
            item.is_editing = item.id == id;
            found |= item.is_editing;
        }
        found
    }

    /// 提交编辑结果
    pub fn commit_edit(&mut self, id: u32, new_name: &str, new_quantity_text: &str) -> bool {
        self.cancel_edit();
        let quantity = self.quantity_or_fallback(new_quantity_text);

        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.name = new_name.to_string();
                item.quantity = quantity;
                log::info!("更新条目 #{} {:?} x{}", id, new_name, quantity);
                true
            }
            None => false,
        }
    }

    /// 放弃编辑
    pub fn cancel_edit(&mut self) {
        for item in &mut self.items {
            item.is_editing = false;
        }
    }

    // ============ 删除 ============

    pub fn delete_item(&mut self, id: u32) -> Option<ShoppingItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let removed = self.items.remove(index);
        log::info!("删除条目 #{} {:?}", removed.id, removed.name);
        Some(removed)
    }
}

impl Default for ShoppingList {
    fn default() -> Self {
        Self::new()
    }
}
