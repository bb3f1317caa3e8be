//! Donation Platform App
//!
//! Root component: provides config, session store, query cache and
//! navigation through context, then renders the current route inside its
//! layout shell. Routes the visitor may not see are swapped for the guard's
//! redirect before anything renders.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{AdminLayout, AuthLayout, Loading, MainLayout};
use crate::config::AppConfig;
use crate::context::{current_route, listen_popstate, AppContext};
use crate::pages::page_view;
use crate::query::QueryClient;
use crate::routes::{guard, Layout, Route};
use crate::storage::SessionStore;
use crate::store::{AppState, AppStateStoreFields, AppStore};

const SITE_NAME: &str = "함께기부";

/// Session from localStorage, or logged out when storage is unavailable
fn initial_state() -> AppState {
    match SessionStore::local() {
        Ok(persist) => AppState::restore(&persist),
        Err(e) => {
            log::warn!("localStorage unavailable: {}", e);
            AppState::default()
        }
    }
}

fn document_title(route: &Route) -> String {
    format!("{} | {}", route.title(), SITE_NAME)
}

fn render(route: Route) -> AnyView {
    match route.layout() {
        Layout::Main => view! { <MainLayout>{page_view(route)}</MainLayout> }.into_any(),
        Layout::Admin => view! { <AdminLayout>{page_view(route)}</AdminLayout> }.into_any(),
        Layout::Auth => view! { <AuthLayout>{page_view(route)}</AuthLayout> }.into_any(),
        Layout::Bare => page_view(route),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    let store: AppStore = Store::new(initial_state());
    let client = QueryClient::new(&config);
    let ctx = AppContext::new(signal(current_route()));

    provide_context(config);
    provide_context(store);
    provide_context(client);
    provide_context(ctx);

    listen_popstate(ctx);

    // Redirect guarded routes; re-evaluated on login/logout too
    Effect::new(move |_| {
        let route = ctx.route.get();
        let redirect = store.session().with(|s| guard(&route, s.as_ref()));
        if let Some(target) = redirect {
            log::info!("route {} redirected to {}", route.to_path(), target.to_path());
            ctx.replace(target);
        }
    });

    Effect::new(move |_| {
        let title = ctx.route.with(document_title);
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(&title);
        }
    });

    view! {
        {move || {
            let route = ctx.route.get();
            let blocked = store.session().with(|s| guard(&route, s.as_ref()).is_some());
            if blocked {
                view! { <Loading /> }.into_any()
            } else {
                render(route)
            }
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_title_includes_site_name() {
        assert_eq!(document_title(&Route::Projects), format!("{} | 함께기부", Route::Projects.title()));
    }
}
