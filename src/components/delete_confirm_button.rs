//! Delete Confirm Button Component
//!
//! Two-step delete for posts, comments and notifications: the first click
//! arms the button, the second runs `on_confirm`.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Armed,
}

/// Inline delete confirmation button
///
/// # Arguments
/// * `button_class` - CSS class for the idle button (e.g. "delete-btn" or "link-btn")
/// * `label` - Idle button text, "삭제" by default
/// * `question` - Text shown while armed, "삭제하시겠습니까?" by default
/// * `on_confirm` - Runs once the user confirms
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional, into)] question: Option<String>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let stage = RwSignal::new(Stage::Idle);
    let label = label.unwrap_or_else(|| "삭제".to_string());
    let question = question.unwrap_or_else(|| "삭제하시겠습니까?".to_string());

    move || match stage.get() {
        Stage::Idle => view! {
            <button
                class=button_class.clone()
                on:click=move |ev| {
                    ev.stop_propagation();
                    stage.set(Stage::Armed);
                }
            >
                {label.clone()}
            </button>
        }
        .into_any(),
        Stage::Armed => view! {
            <span class="delete-confirm">
                <span class="delete-confirm-text">{question.clone()}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        stage.set(Stage::Idle);
                        on_confirm.run(());
                    }
                >
                    "예"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        stage.set(Stage::Idle);
                    }
                >
                    "아니오"
                </button>
            </span>
        }
        .into_any(),
    }
}
