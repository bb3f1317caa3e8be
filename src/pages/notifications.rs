//! Notifications Page
//!
//! Full notification center: tabs with counts, category and date filters,
//! text search, optional grouping by project and bulk delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, use_api, ApiClient};
use crate::components::{link_route, DeleteConfirmButton, EmptyState, NOTIFICATION_KEYS};
use crate::context::{alert, use_app_context};
use crate::format::{now, time_ago_str};
use crate::models::{Notification, NotificationCategory, Priority};
use crate::notification_center::{
    count_notifications, group_notifications, DateRange, NotificationFilter, Selection, Tab,
};
use crate::pages::query_view;
use crate::query::{use_query, use_query_client, QueryClient, QueryKey};

/// Run one request per id, then refresh the notification queries once
fn run_for_each<F, Fut>(client: QueryClient, api: ApiClient, ids: Vec<u64>, request: F)
where
    F: Fn(ApiClient, u64) -> Fut + 'static,
    Fut: std::future::Future<Output = crate::error::ApiResult<()>> + 'static,
{
    spawn_local(async move {
        let mut failed = 0;
        for id in ids {
            if let Err(e) = request(api.clone(), id).await {
                log::warn!("notification {} request failed: {}", id, e);
                failed += 1;
            }
        }
        if failed > 0 {
            alert(&format!("{}건을 처리하지 못했습니다.", failed));
        }
        client.invalidate_many(&NOTIFICATION_KEYS);
    });
}

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let api = use_api();
    let client = use_query_client();
    let ctx = use_app_context();
    let filter = RwSignal::new(NotificationFilter::default());
    let selection = RwSignal::new(Selection::default());
    let (grouped, set_grouped) = signal(false);

    let notifications = use_query(|| QueryKey::from("my-notifications"), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_my_notifications(&api).await }
        }
    });

    let mark_read = {
        let api = api.clone();
        move |id: u64| run_for_each(client, api.clone(), vec![id], |api, id| async move { api::mark_as_read(&api, id).await })
    };
    let mark_all = {
        let api = api.clone();
        move |_: web_sys::MouseEvent| {
            let api = api.clone();
            spawn_local(async move {
                match api::mark_all_as_read(&api).await {
                    Ok(()) => client.invalidate_many(&NOTIFICATION_KEYS),
                    Err(e) => alert(&e.user_message()),
                }
            });
        }
    };
    let delete_one = {
        let api = api.clone();
        move |id: u64| {
            selection.update(|s| {
                if s.contains(id) {
                    s.toggle(id);
                }
            });
            run_for_each(client, api.clone(), vec![id], |api, id| async move { api::delete_notification(&api, id).await })
        }
    };
    let delete_selected = move |_: ()| {
        let ids = selection.try_update(|s| s.take()).unwrap_or_default();
        if ids.is_empty() {
            return;
        }
        run_for_each(client, api.clone(), ids, |api, id| async move { api::delete_notification(&api, id).await })
    };

    let open = move |n: &Notification| {
        if !n.is_read {
            mark_read(n.notification_id);
        }
        if let Some(route) = n.link.as_deref().and_then(link_route) {
            ctx.navigate(route);
        }
    };

    let row = move |n: Notification, now: chrono::NaiveDateTime| {
        let id = n.notification_id;
        let open = open.clone();
        let delete_one = delete_one.clone();
        let mut class = String::from("notification-row");
        if !n.is_read {
            class.push_str(" unread");
        }
        if n.priority() == Priority::High {
            class.push_str(" high");
        }
        let time = time_ago_str(&n.created_at, now);
        let clicked = n.clone();
        view! {
            <li class=class>
                <input
                    type="checkbox"
                    prop:checked=move || selection.with(|s| s.contains(id))
                    on:change=move |_| selection.update(|s| s.toggle(id))
                />
                <div class="notification-body" on:click=move |_| open(&clicked)>
                    <span class="icon">{n.icon()}</span>
                    <strong>{n.title.clone()}</strong>
                    <p>{n.message.clone()}</p>
                    <small>{n.category.label()} " · " {time}</small>
                </div>
                <DeleteConfirmButton button_class="delete-btn" on_confirm=move |_: ()| delete_one(id) />
            </li>
        }
    };

    view! {
        <h1>"알림"</h1>

        {move || query_view(notifications.get(), {
            let row = row.clone();
            let mark_all = mark_all.clone();
            let delete_selected = delete_selected.clone();
            move |list| {
                let counts = count_notifications(&list);
                let now = now();
                let current = filter.get();
                let groups: Vec<(String, Vec<Notification>)> = group_notifications(current.apply(&list, now), grouped.get())
                    .into_iter()
                    .map(|g| (g.name, g.items.into_iter().cloned().collect()))
                    .collect();
                let count_for = move |t: Tab| match t {
                    Tab::All => counts.all,
                    Tab::Unread => counts.unread,
                    Tab::Archived => counts.archived,
                };
                view! {
                    <nav class="tabs">
                        {Tab::ALL
                            .into_iter()
                            .map(|t| view! {
                                <button
                                    class=move || if filter.with(|f| f.tab == t) { "tab active" } else { "tab" }
                                    on:click=move |_| filter.update(|f| f.tab = t)
                                >
                                    {format!("{} ({})", t.label(), count_for(t))}
                                </button>
                            })
                            .collect_view()}
                    </nav>

                    <div class="filter-bar">
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            let category = NotificationCategory::ALL.into_iter().find(|c| c.label() == value);
                            filter.update(|f| f.category = category);
                        }>
                            <option value="" selected=current.category.is_none()>"전체 분류"</option>
                            {NotificationCategory::ALL
                                .into_iter()
                                .map(|c| view! {
                                    <option value=c.label() selected=current.category == Some(c)>{c.label()}</option>
                                })
                                .collect_view()}
                        </select>
                        <select on:change=move |ev| {
                            let date = DateRange::from_str(&event_target_value(&ev));
                            filter.update(|f| f.date = date);
                        }>
                            {DateRange::ALL
                                .into_iter()
                                .map(|d| view! { <option value=d.as_str() selected=current.date == d>{d.label()}</option> })
                                .collect_view()}
                        </select>
                        <input
                            type="search"
                            placeholder="알림 검색"
                            prop:value=current.query.clone()
                            on:change=move |ev| {
                                let query = event_target_value(&ev);
                                filter.update(|f| f.query = query);
                            }
                        />
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || grouped.get()
                                on:change=move |ev| set_grouped.set(event_target_checked(&ev))
                            />
                            "프로젝트별 보기"
                        </label>
                    </div>

                    <div class="bulk-actions">
                        <button class="btn" disabled=counts.unread == 0 on:click=mark_all.clone()>"모두 읽음"</button>
                        <span>{move || format!("{}개 선택", selection.with(|s| s.len()))}</span>
                        <DeleteConfirmButton button_class="btn" label="선택 삭제" on_confirm=delete_selected.clone() />
                        <button class="link-btn" on:click=move |_| selection.update(|s| s.clear())>"선택 해제"</button>
                    </div>

                    {if groups.iter().all(|(_, items)| items.is_empty()) {
                        view! { <EmptyState message="알림이 없습니다." /> }.into_any()
                    } else {
                        groups
                            .into_iter()
                            .map(|(name, items)| {
                                let row = row.clone();
                                view! {
                                    <section class="notification-group">
                                        <h2>{format!("{} ({})", name, items.len())}</h2>
                                        <ul class="notification-list">
                                            {items.into_iter().map(|n| row(n, now)).collect_view()}
                                        </ul>
                                    </section>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                }
                .into_any()
            }
        })}
    }
}
