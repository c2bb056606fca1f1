use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
const AUTO_DISMISS_MS: u32 = 5_000;

/// Issues sequence numbers for notices. Never reused, so a dismissal timer
/// armed for a notice that was closed early can never match a later one.
static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notification notification-success",
            NoticeKind::Error => "notification notification-error",
        }
    }
}

/// A transient user-visible message. One at a time: pushing a new notice
/// replaces whatever is currently showing.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    seq: u64,
}

fn make_notice(kind: NoticeKind, message: impl Into<String>) -> Notice {
    Notice {
        kind,
        message: message.into(),
        seq: NEXT_SEQ.fetch_add(1, Ordering::Relaxed),
    }
}

/// Whether the notice a dismissal timer was armed for is still the one on
/// screen.
#[cfg(any(target_arch = "wasm32", test))]
fn still_showing(slot: &Option<Notice>, seq: u64) -> bool {
    slot.as_ref().map(|notice| notice.seq) == Some(seq)
}

/// Shows a notice and schedules its auto-dismissal. The sequence number
/// keeps a stale dismissal from clearing a notice that replaced this one.
pub fn push_notice(mut slot: Signal<Option<Notice>>, kind: NoticeKind, message: impl Into<String>) {
    let notice = make_notice(kind, message);
    #[cfg(target_arch = "wasm32")]
    let seq = notice.seq;
    slot.set(Some(notice));
    #[cfg(target_arch = "wasm32")]
    spawn(async move {
        gloo_timers::future::TimeoutFuture::new(AUTO_DISMISS_MS).await;
        if still_showing(&slot.peek(), seq) {
            slot.set(None);
        }
    });
}

#[component]
pub fn NotificationHost() -> Element {
    let mut slot = use_context::<Signal<Option<Notice>>>();
    let Some(notice) = slot() else {
        return rsx! {};
    };
    rsx! {
        div { class: notice.kind.class(), role: "status",
            div { class: "notification-content",
                span { class: "notification-message", "{notice.message}" }
                button {
                    r#type: "button",
                    class: "notification-close",
                    aria_label: "Dismiss notification",
                    onclick: move |_| slot.set(None),
                    "×"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_maps_to_distinct_classes() {
        assert_ne!(NoticeKind::Success.class(), NoticeKind::Error.class());
        assert!(NoticeKind::Error.class().contains("notification-error"));
    }

    #[test]
    fn replacement_after_manual_clear_gets_fresh_sequence() {
        // First notice is shown, then closed by hand before its timer fires.
        let first = make_notice(NoticeKind::Success, "sent");
        // Second notice arrives into the now-empty slot.
        let second = make_notice(NoticeKind::Error, "failed");
        assert!(second.seq > first.seq);

        // The first notice's timer must not clear the second.
        let slot = Some(second.clone());
        assert!(!still_showing(&slot, first.seq));
        assert!(still_showing(&slot, second.seq));
        assert!(!still_showing(&None, first.seq));
    }
}
