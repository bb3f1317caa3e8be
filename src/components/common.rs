//! Common Building Blocks
//!
//! Small pieces every page uses: in-app links, loading and error states,
//! pagination and file picking.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::use_app_context;
use crate::error::ApiError;
use crate::routes::Route;

/// Anchor that navigates inside the app; modified clicks open normally
#[component]
pub fn NavLink(#[prop(into)] to: Route, #[prop(optional, into)] class: String, children: Children) -> impl IntoView {
    let ctx = use_app_context();
    let href = to.to_path();

    view! {
        <a
            href=href
            class=class
            on:click=move |ev: web_sys::MouseEvent| {
                if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
                    return;
                }
                ev.prevent_default();
                ctx.navigate(to.clone());
            }
        >
            {children()}
        </a>
    }
}

#[component]
pub fn Loading(#[prop(optional, into)] message: Option<String>) -> impl IntoView {
    view! {
        <div class="loading">
            <span class="spinner"></span>
            <span>{message.unwrap_or_else(|| "불러오는 중...".to_string())}</span>
        </div>
    }
}

/// Inline error with an optional retry button
#[component]
pub fn ErrorBanner(error: ApiError, #[prop(optional, into)] on_retry: Option<Callback<()>>) -> impl IntoView {
    view! {
        <div class="error-banner" role="alert">
            <span>{error.user_message()}</span>
            {on_retry.map(|retry| view! {
                <button class="retry-btn" on:click=move |_| retry.run(())>"다시 시도"</button>
            })}
        </div>
    }
}

#[component]
pub fn EmptyState(#[prop(into)] message: String) -> impl IntoView {
    view! { <div class="empty-state">{message}</div> }
}

/// Previous/next pager over zero-based pages
#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    #[prop(into)] on_change: Callback<u32>,
) -> impl IntoView {
    view! {
        <Show when=move || { total_pages.get() > 1 }>
            <nav class="pagination">
                <button
                    disabled=move || page.get() == 0
                    on:click=move |_| on_change.run(page.get().saturating_sub(1))
                >
                    "이전"
                </button>
                <span class="page-indicator">
                    {move || format!("{} / {}", page.get() + 1, total_pages.get())}
                </span>
                <button
                    disabled=move || page.get() + 1 >= total_pages.get()
                    on:click=move |_| on_change.run(page.get() + 1)
                >
                    "다음"
                </button>
            </nav>
        </Show>
    }
}

/// Files chosen in an `<input type="file">` change event
pub fn selected_files(ev: &web_sys::Event) -> Vec<web_sys::File> {
    let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
        return Vec::new();
    };
    let Some(list) = input.files() else {
        return Vec::new();
    };
    let files = (0..list.length()).filter_map(|i| list.get(i)).collect();
    // Allow picking the same file again
    input.set_value("");
    files
}
