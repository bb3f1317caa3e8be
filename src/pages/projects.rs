//! Project List Page
//!
//! Category chips, sort order, keyword search and pagination over approved
//! projects.

use leptos::prelude::*;

use crate::api::{self, query_string, use_api};
use crate::components::{EmptyState, Pagination, ProjectCard};
use crate::format::category_options;
use crate::models::{ProjectFilters, ProjectSort};
use crate::pages::query_view;
use crate::query::{use_query, QueryKey};

const PAGE_SIZE: u32 = 12;

#[component]
pub fn ProjectListPage() -> impl IntoView {
    let api = use_api();
    let filters = RwSignal::new(ProjectFilters { size: PAGE_SIZE, ..Default::default() });
    let (search, set_search) = signal(String::new());

    let projects = use_query(
        move || QueryKey::new(["projects".to_string(), query_string(&filters.get().query_pairs())]),
        move || {
            let api = api.clone();
            let filters = filters.get();
            async move { api::get_projects(&api, &filters).await }
        },
    );

    let set_category = move |category: Option<String>| {
        filters.update(|f| {
            f.category = category;
            f.page = 0;
        })
    };

    view! {
        <h1>"프로젝트 둘러보기"</h1>

        <div class="filter-bar">
            <div class="category-chips">
                <button
                    class=move || if filters.with(|f| f.category.is_none()) { "chip active" } else { "chip" }
                    on:click=move |_| set_category(None)
                >
                    "전체"
                </button>
                {category_options()
                    .map(|(key, label)| {
                        let is_active = move || filters.with(|f| f.category.as_deref() == Some(key));
                        view! {
                            <button
                                class=move || if is_active() { "chip active" } else { "chip" }
                                on:click=move |_| set_category(Some(key.to_string()))
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <form
                class="search-form"
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    let keyword = search.get_untracked().trim().to_string();
                    filters.update(|f| {
                        f.keyword = Some(keyword).filter(|k| !k.is_empty());
                        f.page = 0;
                    });
                }
            >
                <input
                    type="search"
                    placeholder="프로젝트 검색..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
                <button type="submit">"검색"</button>
            </form>

            <select
                class="sort-select"
                on:change=move |ev| {
                    let sort = ProjectSort::from_str(&event_target_value(&ev));
                    filters.update(|f| {
                        f.sort = sort;
                        f.page = 0;
                    });
                }
            >
                {ProjectSort::ALL
                    .into_iter()
                    .map(|sort| view! {
                        <option value=sort.as_str() selected=move || filters.with(|f| f.sort == sort)>
                            {sort.label()}
                        </option>
                    })
                    .collect_view()}
            </select>
        </div>

        {move || query_view(projects.get(), move |page| {
            if page.content.is_empty() {
                return view! { <EmptyState message="조건에 맞는 프로젝트가 없습니다." /> }.into_any();
            }
            let total_pages = page.total_pages;
            view! {
                <p class="result-count">{format!("총 {}개", page.total_elements)}</p>
                <div class="project-grid">
                    {page.content.into_iter().map(|project| view! { <ProjectCard project=project /> }).collect_view()}
                </div>
                <Pagination
                    page=Signal::derive(move || filters.with(|f| f.page))
                    total_pages=Signal::derive(move || total_pages)
                    on_change=move |p: u32| filters.update(|f| f.page = p)
                />
            }
            .into_any()
        })}
    }
}
