//! Home Page
//!
//! Platform totals, popular projects and the live donation feed.

use leptos::prelude::*;

use crate::api::{self, use_api};
use crate::components::{NavLink, ProjectCard};
use crate::format::{format_amount, now, time_ago_str};
use crate::pages::query_view;
use crate::query::{use_query, QueryKey};
use crate::routes::Route;

const POPULAR_LIMIT: u32 = 6;
const RECENT_LIMIT: u32 = 10;

#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_api();

    let summary = use_query(|| QueryKey::from("statistics-summary"), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_statistics_summary(&api).await }
        }
    });
    let popular = use_query(|| QueryKey::from("popular-projects"), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_popular_projects(&api, POPULAR_LIMIT).await }
        }
    });
    let recent = use_query(|| QueryKey::from("recent-donations"), move || {
        let api = api.clone();
        async move { api::get_recent_donations(&api, RECENT_LIMIT).await }
    });

    view! {
        <section class="hero">
            <h1>"투명하게 공개된 금액, 검증된 프로젝트"</h1>
            <p>"기부금이 어디에 쓰이는지 끝까지 확인하세요."</p>
            <NavLink to=Route::Projects class="btn primary">"프로젝트 둘러보기"</NavLink>
        </section>

        <section class="stats-summary">
            {move || query_view(summary.get(), |s| view! {
                <div class="stat">
                    <strong>{format!("{}원", format_amount(s.total_donation_amount))}</strong>
                    <span>"누적 기부금액"</span>
                </div>
                <div class="stat">
                    <strong>{format!("{}명", format_amount(s.total_donors as i64))}</strong>
                    <span>"참여 기부자"</span>
                </div>
                <div class="stat">
                    <strong>{s.active_projects}</strong>
                    <span>"진행중인 프로젝트"</span>
                </div>
                <div class="stat">
                    <strong>{s.completed_projects}</strong>
                    <span>"완료된 프로젝트"</span>
                </div>
            })}
        </section>

        <section class="popular-projects">
            <h2>"지금 주목받는 프로젝트"</h2>
            <div class="project-grid">
                {move || query_view(popular.get(), |projects| {
                    projects
                        .into_iter()
                        .map(|project| view! { <ProjectCard project=project /> })
                        .collect_view()
                })}
            </div>
        </section>

        <section class="recent-donations">
            <h2>"실시간 기부 현황"</h2>
            {move || query_view(recent.get(), |donations| {
                let now = now();
                view! {
                    <ul class="donation-feed">
                        {donations
                            .into_iter()
                            .map(|d| view! {
                                <li>
                                    <strong>{d.donor_name}</strong>
                                    "님이 "
                                    <em>{d.project_title}</em>
                                    "에 "
                                    <strong>{format!("{}원", format_amount(d.amount))}</strong>
                                    " 기부"
                                    <small>{time_ago_str(&d.timestamp, now)}</small>
                                </li>
                            })
                            .collect_view()}
                    </ul>
                }
            })}
        </section>
    }
}
