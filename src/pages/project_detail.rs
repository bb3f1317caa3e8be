//! Project Detail Page
//!
//! Header with progress and actions, then intro/budget/donors/messages tabs.
//! Donating and favoriting require a login.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, use_api};
use crate::components::{DonationModal, EmptyState, ProgressBar};
use crate::context::{alert, use_app_context};
use crate::format::{category_label, format_won, now, short_date, time_ago_str};
use crate::models::{Donor, ProjectStatus};
use crate::pages::query_view;
use crate::query::{use_query, use_query_client, QueryKey};
use crate::routes::Route;
use crate::store::{use_app_store, AppStateStoreFields};

pub const FAVORITE_KEYS: [&str; 4] = ["favorite-projects", "favorite-project-ids", "projects", "popular-projects"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Intro,
    Budget,
    Donors,
    Messages,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Intro, Tab::Budget, Tab::Donors, Tab::Messages];

    fn label(&self) -> &'static str {
        match self {
            Tab::Intro => "프로젝트 소개",
            Tab::Budget => "예산 계획",
            Tab::Donors => "기부자",
            Tab::Messages => "응원 메시지",
        }
    }
}

/// Organization homepage as (href, label). Bare hosts get https and other
/// schemes are dropped.
fn website_link(url: &str) -> Option<(String, String)> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    let href = if url.starts_with("https://") || url.starts_with("http://") {
        url.to_string()
    } else if url.contains(':') {
        return None;
    } else {
        format!("https://{}", url)
    };
    let label = href
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_string();
    Some((href, label))
}

#[component]
pub fn ProjectDetailPage(id: u64) -> impl IntoView {
    let api = use_api();
    let client = use_query_client();
    let ctx = use_app_context();
    let store = use_app_store();
    let logged_in = move || store.session().with(|s| s.is_some());

    let (tab, set_tab) = signal(Tab::Intro);
    let (show_donate, set_show_donate) = signal(false);
    let (show_anonymous, set_show_anonymous) = signal(true);

    let project = use_query(move || QueryKey::new(["project".to_string(), id.to_string()]), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_project(&api, id).await }
        }
    });
    let options = use_query(move || QueryKey::new(["donation-options".to_string(), id.to_string()]), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_donation_options(&api, id).await }
        }
    });
    let favorite_ids = use_query(|| QueryKey::from("favorite-project-ids"), {
        let api = api.clone();
        move || {
            let api = api.clone();
            let logged_in = logged_in();
            async move {
                if logged_in {
                    api::get_favorite_project_ids(&api).await
                } else {
                    Ok(Vec::new())
                }
            }
        }
    });
    let is_favorite = move || favorite_ids.get().and_then(|r| r.ok()).is_some_and(|ids| ids.contains(&id));

    let require_login = move || {
        if logged_in() {
            return true;
        }
        ctx.navigate(Route::Login { redirect: Some(Route::ProjectDetail(id).to_path()) });
        false
    };

    let toggle_favorite = {
        let api = api.clone();
        move |_: web_sys::MouseEvent| {
            if !require_login() {
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                match api::toggle_favorite_project(&api, id).await {
                    Ok(()) => client.invalidate_many(&FAVORITE_KEYS),
                    Err(e) => alert(&e.user_message()),
                }
            });
        }
    };

    let donors_view = {
        let api = api.clone();
        move || {
            let api = api.clone();
            view! { <DonorList project_id=id show_anonymous=show_anonymous set_show_anonymous=set_show_anonymous api=api /> }
        }
    };
    let messages_view = move || {
        let api = api.clone();
        view! { <MessageList project_id=id api=api /> }
    };

    view! {
        {move || query_view(project.get(), {
            let toggle_favorite = toggle_favorite.clone();
            let donors_view = donors_view.clone();
            let messages_view = messages_view.clone();
            move |p| {
                let open = p.status == ProjectStatus::Approved && p.dday >= 0;
                let org = p.organization_name().to_string();
                let title = p.title.clone();
                let budget = p.budget_plan.clone();
                let plan_url = p.plan_document_url.clone().filter(|_| p.is_plan_public.unwrap_or(false));
                let description = p.description.clone();
                let intro_org = p.organization.clone();
                view! {
                    <article class="project-detail">
                        <header class="project-header">
                            <img class="project-hero" src=p.image.clone() alt=p.title.clone() />
                            <div class="project-summary">
                                <span class="badge">{category_label(&p.category).to_string()}</span>
                                <h1>{p.title.clone()}</h1>
                                <p class="muted">{org.clone()}</p>
                                <ProgressBar current=p.current_amount target=p.target_amount />
                                <dl class="project-numbers">
                                    <dt>"모금액"</dt>
                                    <dd>{format_won(p.current_amount)}</dd>
                                    <dt>"목표액"</dt>
                                    <dd>{format_won(p.target_amount)}</dd>
                                    <dt>"참여자"</dt>
                                    <dd>{format!("{}명", p.donors)}</dd>
                                    <dt>"기간"</dt>
                                    <dd>{format!("{} ~ {}", short_date(&p.start_date), short_date(&p.end_date))}</dd>
                                </dl>
                                {p.rejection_reason.clone().map(|reason| view! {
                                    <p class="rejection">"반려 사유: " {reason}</p>
                                })}
                                <div class="project-actions">
                                    <button
                                        class="btn primary"
                                        disabled=!open
                                        on:click=move |_| {
                                            if require_login() {
                                                set_show_donate.set(true);
                                            }
                                        }
                                    >
                                        {if open { "기부하기" } else { "모금 종료" }}
                                    </button>
                                    <button class="btn favorite-btn" on:click=toggle_favorite.clone()>
                                        {move || if is_favorite() { "♥ 관심 해제" } else { "♡ 관심 등록" }}
                                    </button>
                                </div>
                            </div>
                        </header>

                        <nav class="tabs">
                            {Tab::ALL
                                .into_iter()
                                .map(|t| view! {
                                    <button
                                        class=move || if tab.get() == t { "tab active" } else { "tab" }
                                        on:click=move |_| set_tab.set(t)
                                    >
                                        {t.label()}
                                    </button>
                                })
                                .collect_view()}
                        </nav>

                        <section class="tab-panel">
                            {
                                let donors_view = donors_view.clone();
                                let messages_view = messages_view.clone();
                                move || match tab.get() {
                                    Tab::Intro => view! {
                                        <p class="description">{description.clone()}</p>
                                        {intro_org.clone().map(|o| view! {
                                            <div class="org-info">
                                                <h3>{o.name}</h3>
                                                <p>{o.introduction}</p>
                                                {o.website_url.as_deref().and_then(website_link).map(|(href, label)| view! {
                                                    <a href=href target="_blank" rel="noopener">{label}</a>
                                                })}
                                            </div>
                                        })}
                                    }
                                    .into_any(),
                                    Tab::Budget => view! {
                                        {budget.clone().map(|b| view! { <pre class="budget-plan">{b}</pre> })}
                                        {plan_url.clone().map(|url| view! {
                                            <a class="btn" href=url target="_blank" rel="noopener">"사업계획서 보기"</a>
                                        })}
                                        <Show when={
                                            let none = budget.is_none() && plan_url.is_none();
                                            move || none
                                        }>
                                            <EmptyState message="공개된 예산 계획이 없습니다." />
                                        </Show>
                                    }
                                    .into_any(),
                                    Tab::Donors => donors_view().into_any(),
                                    Tab::Messages => messages_view().into_any(),
                                }
                            }
                        </section>

                        <Show when=move || show_donate.get()>
                            {
                                let title = title.clone();
                                move || view! {
                                    <DonationModal
                                        project_id=id
                                        project_title=title.clone()
                                        options=options.get().and_then(|r| r.ok()).unwrap_or_default()
                                        on_close=move |_: ()| set_show_donate.set(false)
                                    />
                                }
                            }
                        </Show>
                    </article>
                }
            }
        })}
    }
}

#[component]
fn DonorList(
    project_id: u64,
    show_anonymous: ReadSignal<bool>,
    set_show_anonymous: WriteSignal<bool>,
    api: api::ApiClient,
) -> impl IntoView {
    let donors = use_query(
        move || QueryKey::new(["project-donors".to_string(), project_id.to_string(), show_anonymous.get().to_string()]),
        move || {
            let api = api.clone();
            let show = show_anonymous.get();
            async move { api::get_project_donors(&api, project_id, show).await }
        },
    );

    view! {
        <label class="checkbox">
            <input
                type="checkbox"
                prop:checked=move || show_anonymous.get()
                on:change=move |ev| set_show_anonymous.set(event_target_checked(&ev))
            />
            "익명 기부자 포함"
        </label>
        {move || query_view(donors.get(), |list| donor_rows(list, false))}
    }
}

#[component]
fn MessageList(project_id: u64, api: api::ApiClient) -> impl IntoView {
    let messages = use_query(
        move || QueryKey::new(["project-messages".to_string(), project_id.to_string()]),
        move || {
            let api = api.clone();
            async move { api::get_project_messages(&api, project_id).await }
        },
    );
    view! { {move || query_view(messages.get(), |list| donor_rows(list, true))} }
}

fn donor_rows(list: Vec<Donor>, messages_only: bool) -> AnyView {
    let rows: Vec<Donor> = if messages_only {
        list.into_iter().filter(|d| d.message.as_deref().is_some_and(|m| !m.trim().is_empty())).collect()
    } else {
        list
    };
    if rows.is_empty() {
        let message = if messages_only { "아직 응원 메시지가 없습니다." } else { "아직 기부자가 없습니다." };
        return view! { <EmptyState message=message /> }.into_any();
    }
    let now = now();
    view! {
        <ul class="donor-list">
            {rows
                .into_iter()
                .map(|d| {
                    let name = if d.is_anonymous { "익명".to_string() } else { d.name.clone() };
                    view! {
                        <li>
                            <strong>{name}</strong>
                            <span>{format_won(d.amount)}</span>
                            <small>{time_ago_str(&d.date, now)}</small>
                            {d.message.clone().map(|m| view! { <p class="donor-message">{m}</p> })}
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_website_link() {
        assert_eq!(
            website_link("https://hope.or.kr/"),
            Some(("https://hope.or.kr/".to_string(), "hope.or.kr".to_string()))
        );
        assert_eq!(
            website_link(" hope.or.kr "),
            Some(("https://hope.or.kr".to_string(), "hope.or.kr".to_string()))
        );
        assert_eq!(website_link("javascript:alert(1)"), None);
        assert_eq!(website_link("   "), None);
    }
}
