//! Notification Dropdown Component
//!
//! Bell icon in the header with the unread badge and the newest few
//! notifications. Both queries are refreshed on a timer while mounted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, use_api};
use crate::components::NavLink;
use crate::config::use_config;
use crate::context::use_app_context;
use crate::format::{now, time_ago_str};
use crate::models::Notification;
use crate::notification_center::dropdown_items;
use crate::query::{use_query, use_query_client, QueryKey};
use crate::routes::Route;

pub const NOTIFICATION_KEYS: [&str; 2] = ["my-notifications", "unread-count"];

/// Route for a notification's link, if it points inside the app
pub fn link_route(link: &str) -> Option<Route> {
    let (path, query) = link.split_once('?').unwrap_or((link, ""));
    if !path.starts_with('/') || path.starts_with("//") {
        return None;
    }
    match Route::parse(path, query) {
        Route::NotFound => None,
        route => Some(route),
    }
}

/// Re-fetch the notification queries every poll interval until unmounted
fn start_polling() {
    let client = use_query_client();
    let interval = use_config().notification_poll_interval.as_millis() as u32;
    let alive = Arc::new(AtomicBool::new(true));

    let flag = alive.clone();
    on_cleanup(move || flag.store(false, Ordering::Relaxed));

    spawn_local(async move {
        loop {
            TimeoutFuture::new(interval).await;
            if !alive.load(Ordering::Relaxed) {
                break;
            }
            client.invalidate_many(&NOTIFICATION_KEYS);
        }
    });
}

#[component]
pub fn NotificationDropdown() -> impl IntoView {
    let api = use_api();
    let client = use_query_client();
    let ctx = use_app_context();
    let (open, set_open) = signal(false);

    let unread = use_query(|| QueryKey::from("unread-count"), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_unread_count(&api).await }
        }
    });
    let notifications = use_query(|| QueryKey::from("my-notifications"), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_my_notifications(&api).await }
        }
    });

    start_polling();

    let unread_count = move || unread.get().and_then(|r| r.ok()).unwrap_or(0);

    let mark_all = {
        let api = api.clone();
        move |_: web_sys::MouseEvent| {
            let api = api.clone();
            spawn_local(async move {
                match api::mark_all_as_read(&api).await {
                    Ok(()) => client.invalidate_many(&NOTIFICATION_KEYS),
                    Err(e) => log::warn!("mark all read failed: {}", e),
                }
            });
        }
    };

    let open_item = move |n: Notification| {
        let api = api.clone();
        set_open.set(false);
        if !n.is_read {
            let id = n.notification_id;
            spawn_local(async move {
                if api::mark_as_read(&api, id).await.is_ok() {
                    client.invalidate_many(&NOTIFICATION_KEYS);
                }
            });
        }
        if let Some(route) = n.link.as_deref().and_then(link_route) {
            ctx.navigate(route);
        }
    };

    view! {
        <div class="notification-dropdown">
            <button class="bell-btn" aria-label="알림" on:click=move |_| set_open.update(|o| *o = !*o)>
                "🔔"
                <Show when=move || { unread_count() > 0 }>
                    <span class="badge unread-badge">
                        {move || if unread_count() > 99 { "99+".to_string() } else { unread_count().to_string() }}
                    </span>
                </Show>
            </button>
            <Show when=move || open.get()>
                <div class="dropdown-panel">
                    <div class="dropdown-header">
                        <strong>"알림"</strong>
                        <button class="link-btn" on:click=mark_all.clone()>"모두 읽음"</button>
                    </div>
                    {
                        let open_item = open_item.clone();
                        move || {
                            let items = notifications
                                .get()
                                .and_then(|r| r.ok())
                                .map(|list| dropdown_items(&list))
                                .unwrap_or_default();
                            if items.is_empty() {
                                return view! { <p class="empty-state">"새로운 알림이 없습니다."</p> }.into_any();
                            }
                            let now = now();
                            items
                                .into_iter()
                                .map(|n| {
                                    let open_item = open_item.clone();
                                    let class = if n.is_read { "dropdown-item" } else { "dropdown-item unread" };
                                    let when = time_ago_str(&n.created_at, now);
                                    let item = n.clone();
                                    view! {
                                        <button class=class on:click=move |_| open_item(item.clone())>
                                            <span class="icon">{n.icon()}</span>
                                            <span class="dropdown-item-body">
                                                <strong>{n.title.clone()}</strong>
                                                <span>{n.message.clone()}</span>
                                                <small>{when}</small>
                                            </span>
                                        </button>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }
                    }
                    <div class="dropdown-footer" on:click=move |_| set_open.set(false)>
                        <NavLink to=Route::Notifications>"전체 보기"</NavLink>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_route() {
        assert_eq!(link_route("/projects/12"), Some(Route::ProjectDetail(12)));
        assert_eq!(link_route("/community/3?tab=comments"), Some(Route::CommunityPost(3)));
        assert_eq!(link_route("https://example.com/projects/1"), None);
        assert_eq!(link_route("//evil.example.com"), None);
        assert_eq!(link_route("/nope/nope"), None);
    }
}
