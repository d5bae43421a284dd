//! Export of goal snapshots to home-screen widgets.
//!
//! The native side is reached through [`WidgetBridge`]. Targets without
//! native widgets use [`NoopWidgetBridge`].

pub mod widget_bridge;
pub mod widget_model;
pub mod widget_sync_service;

pub use widget_bridge::{InMemoryWidgetBridge, NoopWidgetBridge, WidgetBridge};
pub use widget_model::WidgetSnapshot;
pub use widget_sync_service::WidgetSyncService;
