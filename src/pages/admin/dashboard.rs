//! Admin Dashboard

use leptos::prelude::*;

use crate::api::{self, use_api};
use crate::components::NavLink;
use crate::format::{category_label, format_won, short_date};
use crate::models::{AdminDashboard, CategoryShare, Metrics, MetricsPeriod};
use crate::pages::query_view;
use crate::query::{use_query, QueryKey};
use crate::routes::Route;

use super::DASHBOARD_KEY;

const WEEKDAYS: [&str; 7] = ["월", "화", "수", "목", "금", "토", "일"];

/// Signed percent change, e.g. `+12.5%`
fn change_label(change: f64) -> String {
    if change >= 0.0 {
        format!("+{:.1}%", change)
    } else {
        format!("{:.1}%", change)
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let (period, set_period) = signal(MetricsPeriod::Daily);

    let dashboard = use_query(|| QueryKey::from(DASHBOARD_KEY), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_admin_dashboard(&api).await }
        }
    });
    let categories = use_query(|| QueryKey::from("admin-category-distribution"), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_category_distribution(&api).await }
        }
    });
    let metrics = use_query(
        move || QueryKey::new(["admin-metrics", period.get().as_str()]),
        move || {
            let api = api.clone();
            let period = period.get();
            async move { api::get_metrics(&api, period).await }
        },
    );

    view! {
        {move || query_view(dashboard.get(), dashboard_body)}
        {move || query_view(categories.get(), category_list)}

        <section class="admin-metrics">
            <div class="section-header">
                <h2>"운영 지표"</h2>
                <div class="category-chips">
                    {[(MetricsPeriod::Daily, "일별"), (MetricsPeriod::Weekly, "주별"), (MetricsPeriod::Monthly, "월별")]
                        .into_iter()
                        .map(|(p, label)| view! {
                            <button class=move || if period.get() == p { "chip active" } else { "chip" } on:click=move |_| set_period.set(p)>
                                {label}
                            </button>
                        })
                        .collect_view()}
                </div>
            </div>
            {move || query_view(metrics.get(), move |m| metrics_table(m, period.get_untracked()))}
        </section>
    }
}

fn dashboard_body(d: AdminDashboard) -> impl IntoView {
    let heights = d.weekly_bar_heights();
    let stats = d.stats.clone();
    view! {
        <section class="admin-stats">
            <div class="stat">
                <strong>{format_won(stats.today_donation)}</strong>
                <span>"오늘 기부금"</span>
                <small>{change_label(stats.donation_change)}</small>
            </div>
            <div class="stat">
                <strong>{stats.new_users}</strong>
                <span>"신규 회원"</span>
                <small>{change_label(stats.user_change)}</small>
            </div>
            <div class="stat">
                <NavLink to=Route::AdminProjects>
                    <strong>{stats.pending_approvals}</strong>
                </NavLink>
                <span>"승인 대기 프로젝트"</span>
            </div>
            <div class="stat">
                <NavLink to=Route::AdminSettlements>
                    <strong>{stats.pending_settlements}</strong>
                </NavLink>
                <span>"정산 대기"</span>
            </div>
        </section>

        <section class="weekly-chart">
            <h2>"주간 기부 추이"</h2>
            <div class="bars">
                {heights
                    .into_iter()
                    .zip(d.weekly_donations.iter().copied())
                    .enumerate()
                    .map(|(i, (height, value))| view! {
                        <div class="bar" title=format_won(value.round() as i64)>
                            <span class="bar-fill" style=format!("height: {}%", height)></span>
                            <small>{WEEKDAYS.get(i).copied().unwrap_or("")}</small>
                        </div>
                    })
                    .collect_view()}
            </div>
        </section>

        <section class="recent-projects">
            <h2>"최근 등록 프로젝트"</h2>
            <table>
                <thead>
                    <tr>
                        <th>"프로젝트"</th>
                        <th>"기관"</th>
                        <th>"카테고리"</th>
                        <th>"금액"</th>
                        <th>"상태"</th>
                        <th>"등록일"</th>
                    </tr>
                </thead>
                <tbody>
                    {d.recent_projects
                        .into_iter()
                        .map(|p| view! {
                            <tr>
                                <td>{p.title}</td>
                                <td>{p.org}</td>
                                <td>{category_label(&p.category).to_string()}</td>
                                <td>{format_won(p.amount)}</td>
                                <td>{p.status}</td>
                                <td>{short_date(&p.date)}</td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
        </section>
    }
}

fn category_list(shares: Vec<CategoryShare>) -> impl IntoView {
    view! {
        <section class="category-distribution">
            <h2>"카테고리 분포"</h2>
            <ul>
                {shares
                    .into_iter()
                    .map(|c| view! {
                        <li>
                            <span class="swatch" style=format!("background: {}", c.color)></span>
                            {category_label(&c.name).to_string()}
                            <strong>{format!("{:.1}%", c.percent)}</strong>
                        </li>
                    })
                    .collect_view()}
            </ul>
        </section>
    }
}

fn metrics_table(m: Metrics, period: MetricsPeriod) -> AnyView {
    let rows: Vec<[String; 4]> = match period {
        MetricsPeriod::Daily => m
            .daily
            .into_iter()
            .map(|r| [r.date, format_won(r.total_donations), format!("{}건", r.donation_count), format!("{}명", r.new_users)])
            .collect(),
        MetricsPeriod::Weekly => m
            .weekly
            .into_iter()
            .map(|r| [r.week_start, format_won(r.total_donations), format_won(r.avg_donation), format!("{}개", r.new_projects)])
            .collect(),
        MetricsPeriod::Monthly => m
            .monthly
            .into_iter()
            .map(|r| [r.month, format_won(r.total_donations), format!("{}명", r.new_users), format!("{}개", r.completed_projects)])
            .collect(),
    };
    let headers = match period {
        MetricsPeriod::Daily => ["날짜", "기부금", "기부 건수", "신규 회원"],
        MetricsPeriod::Weekly => ["주 시작일", "기부금", "평균 기부액", "신규 프로젝트"],
        MetricsPeriod::Monthly => ["월", "기부금", "신규 회원", "완료 프로젝트"],
    };
    view! {
        <table class="metrics-table">
            <thead>
                <tr>{headers.into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}</tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| view! { <tr>{row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}</tr> })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_label_sign() {
        assert_eq!(change_label(12.46), "+12.5%");
        assert_eq!(change_label(0.0), "+0.0%");
        assert_eq!(change_label(-3.0), "-3.0%");
    }
}
