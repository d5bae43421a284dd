//! Page title and header actions, pushed by a page into the layout that
//! hosts it.
//!
//! Pages receive a [`ViewControlsPort`] explicitly instead of reaching for
//! shared ambient state. The layout reads [`ViewControls`] back and routes
//! clicks through [`ViewControlsPort::dispatch`].

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::goals::goals_model::Goal;

pub const ACTION_SET_DISPLAY_GRID: &str = "set-display-grid";
pub const ACTION_SET_DISPLAY_TABLE: &str = "set-display-table";
pub const ACTION_NEW_GOAL: &str = "new-goal";
pub const ACTION_BACK: &str = "back";
pub const ACTION_NEW_RECORD: &str = "new-record";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionVariant {
    Filled,
    Default,
    Subtle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub variant: ActionVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ActionItem {
    pub fn button(id: &str, variant: ActionVariant, content: impl Into<String>) -> Self {
        ActionItem {
            id: id.to_string(),
            variant,
            aria_label: None,
            content: Some(content.into()),
        }
    }

    pub fn icon(id: &str, variant: ActionVariant, aria_label: impl Into<String>) -> Self {
        ActionItem {
            id: id.to_string(),
            variant,
            aria_label: Some(aria_label.into()),
            content: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "items", rename_all = "kebab-case")]
pub enum ViewAction {
    Button(ActionItem),
    IconGroup(Vec<ActionItem>),
}

impl ViewAction {
    pub fn action_ids(&self) -> Vec<&str> {
        match self {
            ViewAction::Button(item) => vec![item.id.as_str()],
            ViewAction::IconGroup(items) => items.iter().map(|i| i.id.as_str()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewControls {
    pub title: Option<String>,
    pub leading_action: Option<ViewAction>,
    pub trailing_action: Option<ViewAction>,
}

pub type ActionHandler = Box<dyn Fn(&str) + Send + Sync>;

pub trait ViewControlsPort: Send + Sync {
    fn set_title(&self, title: Option<&str>);
    fn set_leading_action(&self, action: Option<ViewAction>);
    fn set_trailing_action(&self, action: Option<ViewAction>);
    fn on_action(&self, handler: ActionHandler);
    /// Route a click to the registered handler. False when none is set.
    fn dispatch(&self, action_id: &str) -> bool;
    fn controls(&self) -> ViewControls;

    fn apply(&self, controls: ViewControls) {
        self.set_title(controls.title.as_deref());
        self.set_leading_action(controls.leading_action);
        self.set_trailing_action(controls.trailing_action);
    }
}

#[derive(Default)]
pub struct InMemoryViewControls {
    state: RwLock<ViewControls>,
    handler: RwLock<Option<ActionHandler>>,
}

impl InMemoryViewControls {
    pub fn new() -> Self {
        Self::default()
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, ViewControls> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn state(&self) -> RwLockReadGuard<'_, ViewControls> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ViewControlsPort for InMemoryViewControls {
    fn set_title(&self, title: Option<&str>) {
        self.state_mut().title = title.map(str::to_string);
    }

    fn set_leading_action(&self, action: Option<ViewAction>) {
        self.state_mut().leading_action = action;
    }

    fn set_trailing_action(&self, action: Option<ViewAction>) {
        self.state_mut().trailing_action = action;
    }

    fn on_action(&self, handler: ActionHandler) {
        let mut slot = self.handler.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(handler);
    }

    fn dispatch(&self, action_id: &str) -> bool {
        let slot = self.handler.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        match slot.as_ref() {
            Some(handler) => {
                handler(action_id);
                true
            }
            None => false,
        }
    }

    fn controls(&self) -> ViewControls {
        self.state().clone()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Grid,
    Table,
}

/// Actions the goals list page reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalsPageAction {
    SetDisplay(DisplayMode),
    NewGoal,
}

impl GoalsPageAction {
    pub fn from_action_id(action_id: &str) -> Option<Self> {
        match action_id {
            ACTION_SET_DISPLAY_GRID => Some(GoalsPageAction::SetDisplay(DisplayMode::Grid)),
            ACTION_SET_DISPLAY_TABLE => Some(GoalsPageAction::SetDisplay(DisplayMode::Table)),
            ACTION_NEW_GOAL => Some(GoalsPageAction::NewGoal),
            _ => None,
        }
    }
}

pub fn goals_page_controls(display_mode: DisplayMode) -> ViewControls {
    let variant_for = |mode: DisplayMode| {
        if display_mode == mode {
            ActionVariant::Filled
        } else {
            ActionVariant::Default
        }
    };

    ViewControls {
        title: Some("Goals".to_string()),
        leading_action: Some(ViewAction::IconGroup(vec![
            ActionItem::icon(ACTION_SET_DISPLAY_GRID, variant_for(DisplayMode::Grid), "Gallery"),
            ActionItem::icon(ACTION_SET_DISPLAY_TABLE, variant_for(DisplayMode::Table), "Table"),
        ])),
        trailing_action: Some(ViewAction::Button(ActionItem::button(
            ACTION_NEW_GOAL,
            ActionVariant::Filled,
            "New goal",
        ))),
    }
}

pub fn goal_page_controls(goal: &Goal) -> ViewControls {
    ViewControls {
        title: Some(goal.name.clone()),
        leading_action: Some(ViewAction::Button(ActionItem::button(
            ACTION_BACK,
            ActionVariant::Subtle,
            "Back",
        ))),
        trailing_action: Some(ViewAction::Button(ActionItem::button(
            ACTION_NEW_RECORD,
            ActionVariant::Filled,
            format!("Log {}", goal.name.to_lowercase()),
        ))),
    }
}
