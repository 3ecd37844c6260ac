// ui.rs
//
// Fire-and-forget UI side effects: tray scroll lock and feedback text.
// Both are surfaced to the host page as GameEvents.

use std::collections::HashMap;

use tower_engine::{EngineContext, GameEvent};

/// a = 1.0 when the tray scroll is locked, 0.0 when released.
pub const EVENT_SCROLL_LOCK: u32 = 1;
/// a = message code.
pub const EVENT_FEEDBACK: u32 = 2;
/// a = number of blocks in the tower after a save.
pub const EVENT_TOWER_SAVED: u32 = 3;

/// Feedback messages shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    BlockPickedUp,
    BlockDestroyed,
    BlockTrashed,
    BlockPlaced,
    BlockRemoved,
    NoMoreSpace,
    StartGame,
}

impl Message {
    pub const ALL: [Message; 7] = [
        Message::BlockPickedUp,
        Message::BlockDestroyed,
        Message::BlockTrashed,
        Message::BlockPlaced,
        Message::BlockRemoved,
        Message::NoMoreSpace,
        Message::StartGame,
    ];

    /// Localization key.
    pub fn key(self) -> &'static str {
        match self {
            Message::BlockPickedUp => "BlockPickedUpText",
            Message::BlockDestroyed => "BlockDestroyedText",
            Message::BlockTrashed => "BlockTrashedText",
            Message::BlockPlaced => "BlockPlacedText",
            Message::BlockRemoved => "BlockRemovedText",
            Message::NoMoreSpace => "NoMoreSpaceText",
            Message::StartGame => "StartGameText",
        }
    }

    /// Numeric code sent to the host.
    pub fn code(self) -> u32 {
        match self {
            Message::BlockPickedUp => 1,
            Message::BlockDestroyed => 2,
            Message::BlockTrashed => 3,
            Message::BlockPlaced => 4,
            Message::BlockRemoved => 5,
            Message::NoMoreSpace => 6,
            Message::StartGame => 7,
        }
    }
}

/// Looks up display text for a localization key.
pub trait TextResolver {
    fn resolve(&self, key: &str) -> Option<String>;
}

/// Flat key → text table.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    entries: HashMap<String, String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn english() -> Self {
        let mut table = Self::new();
        for message in Message::ALL {
            let text = match message {
                Message::BlockPickedUp => "Block picked up",
                Message::BlockDestroyed => "Oops, block destroyed",
                Message::BlockTrashed => "Block sent to trash",
                Message::BlockPlaced => "Block placed in tower",
                Message::BlockRemoved => "Block removed from tower",
                Message::NoMoreSpace => "No more space",
                Message::StartGame => "Tap to start",
            };
            table.insert(message.key(), text);
        }
        table
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }
}

impl TextResolver for StringTable {
    fn resolve(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Tray scroll suppression. Only real changes reach the host.
#[derive(Debug, Default)]
pub struct ScrollLock {
    blocked: bool,
}

impl ScrollLock {
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn block(&mut self, ctx: &mut EngineContext) {
        self.set(ctx, true);
    }

    pub fn unblock(&mut self, ctx: &mut EngineContext) {
        self.set(ctx, false);
    }

    fn set(&mut self, ctx: &mut EngineContext, blocked: bool) {
        if self.blocked == blocked {
            return;
        }
        self.blocked = blocked;
        ctx.emit_event(GameEvent::new(EVENT_SCROLL_LOCK, if blocked { 1.0 } else { 0.0 }, 0.0, 0.0));
    }
}

pub struct Ui {
    pub scroll: ScrollLock,
    text: Box<dyn TextResolver>,
    last_message: Option<Message>,
    last_text: Option<String>,
}

impl Ui {
    pub fn new(text: Box<dyn TextResolver>) -> Self {
        Self {
            scroll: ScrollLock::default(),
            text,
            last_message: None,
            last_text: None,
        }
    }

    /// Show a feedback popup. Unknown keys display the key itself.
    pub fn show(&mut self, ctx: &mut EngineContext, message: Message) {
        let text = self.text.resolve(message.key()).unwrap_or_else(|| {
            log::warn!("no text for '{}'", message.key());
            message.key().to_owned()
        });
        log::debug!("feedback: {}", text);
        self.last_message = Some(message);
        self.last_text = Some(text);
        ctx.emit_event(GameEvent::new(EVENT_FEEDBACK, message.code() as f32, 0.0, 0.0));
    }

    pub fn last_message(&self) -> Option<Message> {
        self.last_message
    }

    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_lock_emits_only_on_change() {
        let mut ctx = EngineContext::new();
        let mut lock = ScrollLock::default();
        lock.block(&mut ctx);
        lock.block(&mut ctx);
        lock.unblock(&mut ctx);
        lock.unblock(&mut ctx);
        assert_eq!(ctx.events.len(), 2);
        assert!(!lock.is_blocked());
    }

    #[test]
    fn english_table_covers_every_message() {
        let table = StringTable::english();
        for message in Message::ALL {
            assert!(table.resolve(message.key()).is_some(), "{:?}", message);
        }
        assert_eq!(table.resolve("NoMoreSpaceText").as_deref(), Some("No more space"));
    }

    #[test]
    fn missing_text_falls_back_to_key() {
        let mut ctx = EngineContext::new();
        let mut ui = Ui::new(Box::new(StringTable::new()));
        ui.show(&mut ctx, Message::BlockPlaced);
        assert_eq!(ui.last_text(), Some("BlockPlacedText"));
        assert_eq!(ctx.events[0], GameEvent::new(EVENT_FEEDBACK, 4.0, 0.0, 0.0));
    }
}
