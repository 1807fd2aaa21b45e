use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;

use crate::vm::{NoticeKind, NoticeQueue, NoticeVm};

const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Handle for raising toasts from any view.
#[derive(Clone, Copy, PartialEq)]
pub struct Notices {
    queue: Signal<NoticeQueue>,
}

impl Notices {
    pub fn error(self, message: &str) {
        self.push(NoticeKind::Error, message);
    }

    pub fn success(self, message: &str) {
        self.push(NoticeKind::Success, message);
    }

    pub fn dismiss(self, id: u64) {
        let mut queue = self.queue;
        queue.write().dismiss(id);
    }

    fn push(self, kind: NoticeKind, message: &str) {
        let mut queue = self.queue;
        queue.write().push(kind, message);
    }
}

/// Install the notice queue for everything below the calling component.
pub fn use_notice_provider() -> Notices {
    use_context_provider(|| Notices {
        queue: Signal::new(NoticeQueue::default()),
    })
}

#[must_use]
pub fn use_notices() -> Notices {
    use_context::<Notices>()
}

/// Renders the active notices and expires each one after a fixed delay.
#[component]
pub fn NoticeTray() -> Element {
    let notices = use_notices();
    let scheduled = use_hook(|| Rc::new(RefCell::new(HashSet::<u64>::new())));

    use_effect(move || {
        let ids = notices.queue.read().ids();
        let mut seen = scheduled.borrow_mut();
        seen.retain(|id| ids.contains(id));
        for id in ids {
            if seen.insert(id) {
                spawn(async move {
                    tokio::time::sleep(NOTICE_TTL).await;
                    notices.dismiss(id);
                });
            }
        }
    });

    let items = notices.queue.read().items().to_vec();

    rsx! {
        div { class: "notice-tray",
            for notice in items {
                NoticeCard {
                    key: "{notice.id}",
                    notice: notice.clone(),
                    on_dismiss: move |id| notices.dismiss(id),
                }
            }
        }
    }
}

#[component]
fn NoticeCard(notice: NoticeVm, on_dismiss: EventHandler<u64>) -> Element {
    let id = notice.id;
    rsx! {
        div { class: notice.kind.class(), role: "status",
            div { class: "notice__body",
                strong { class: "notice__title", "{notice.kind.title()}" }
                p { class: "notice__message", "{notice.message}" }
            }
            button {
                class: "notice__dismiss",
                onclick: move |_| on_dismiss.call(id),
                "×"
            }
        }
    }
}
