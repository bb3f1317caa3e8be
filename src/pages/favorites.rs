//! Favorites Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, use_api};
use crate::components::{EmptyState, NavLink, ProgressBar};
use crate::context::alert;
use crate::format::format_won;
use crate::pages::project_detail::FAVORITE_KEYS;
use crate::pages::query_view;
use crate::query::{use_query, use_query_client, QueryKey};
use crate::routes::Route;

#[component]
pub fn FavoritesPage() -> impl IntoView {
    let api = use_api();
    let client = use_query_client();

    let favorites = use_query(|| QueryKey::from("favorite-projects"), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_favorite_projects(&api).await }
        }
    });

    let unfavorite = move |id: u64| {
        let api = api.clone();
        spawn_local(async move {
            match api::toggle_favorite_project(&api, id).await {
                Ok(()) => client.invalidate_many(&FAVORITE_KEYS),
                Err(e) => alert(&e.user_message()),
            }
        });
    };

    view! {
        <h1>"관심 프로젝트"</h1>
        {move || query_view(favorites.get(), {
            let unfavorite = unfavorite.clone();
            move |list| {
                if list.is_empty() {
                    return view! { <EmptyState message="관심 등록한 프로젝트가 없습니다." /> }.into_any();
                }
                view! {
                    <div class="project-grid">
                        {list
                            .into_iter()
                            .map(|f| {
                                let unfavorite = unfavorite.clone();
                                let id = f.project_id;
                                view! {
                                    <div class="project-card">
                                        <NavLink to=Route::ProjectDetail(id)>
                                            <img src=f.image.clone() alt=f.title.clone() loading="lazy" />
                                            <h3>{f.title.clone()}</h3>
                                        </NavLink>
                                        <ProgressBar current=f.current_amount target=f.target_amount />
                                        <p class="muted">{format!("{} / {}", format_won(f.current_amount), format_won(f.target_amount))}</p>
                                        <button class="btn" on:click=move |_| unfavorite(id)>"♥ 관심 해제"</button>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }
        })}
    }
}
