//! Typed panel change notifications.

use crate::types::PanelId;

/// Why a [`PanelEvent`] was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelChangeReason {
    /// Width or height changed through a resize handle.
    Resized,
    /// Minimized state toggled by a click or restored from saved state.
    MinimizedChanged,
}

/// Notification about a panel whose size or state changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEvent {
    pub panel: PanelId,
    pub name: String,
    pub reason: PanelChangeReason,
    pub minimized: bool,
    pub width: i32,
    pub height: i32,
}

/// Callback receiving panel notifications.
pub type PanelListener = Box<dyn FnMut(&PanelEvent)>;

/// Handle returned on subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

struct Subscription {
    id: ListenerId,
    /// `None` listens to every panel.
    panel: Option<PanelId>,
    listener: PanelListener,
}

/// Fan-out of panel notifications to subscribed listeners.
#[derive(Default)]
pub(crate) struct EventDispatcher {
    subscriptions: Vec<Subscription>,
    next_id: u32,
}

impl EventDispatcher {
    pub fn subscribe(&mut self, panel: Option<PanelId>, listener: PanelListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            panel,
            listener,
        });
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    pub fn emit(&mut self, event: &PanelEvent) {
        for subscription in &mut self.subscriptions {
            if subscription.panel.is_none_or(|p| p == event.panel) {
                (subscription.listener)(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscriptions", &self.len())
            .finish()
    }
}
