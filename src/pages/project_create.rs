//! Project Create Page
//!
//! Four-step wizard for organizations. Files are read into memory when picked
//! so the final submit is a single multipart request.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, use_api, UploadFile};
use crate::components::selected_files;
use crate::context::{alert, confirm, use_app_context};
use crate::format::format_amount;
use crate::query::use_query_client;
use crate::routes::Route;
use crate::wizard::{ProjectWizard, LAST_STEP, MAX_IMAGES, STEP_TITLES, WIZARD_CATEGORIES};

/// Read picked files; unreadable ones are reported and skipped
async fn read_files(files: Vec<web_sys::File>) -> Vec<UploadFile> {
    let mut out = Vec::with_capacity(files.len());
    for file in files {
        match UploadFile::from_file(&file).await {
            Ok(upload) => out.push(upload),
            Err(e) => {
                log::warn!("could not read {}: {}", file.name(), e);
                alert(&format!("{} 파일을 읽을 수 없습니다.", file.name()));
            }
        }
    }
    out
}

#[component]
pub fn ProjectCreatePage() -> impl IntoView {
    let api = use_api();
    let client = use_query_client();
    let ctx = use_app_context();
    let wizard = RwSignal::new(ProjectWizard::new());
    let (submitting, set_submitting) = signal(false);

    let next = move |_: web_sys::MouseEvent| {
        if let Err(message) = wizard.try_update(|w| w.next()).unwrap_or(Ok(0)) {
            alert(&message);
        }
    };
    let prev = move |_: web_sys::MouseEvent| {
        wizard.update(|w| {
            w.prev();
        });
    };

    let submit = move |_: web_sys::MouseEvent| {
        if submitting.get_untracked() {
            return;
        }
        let body = match wizard.with_untracked(|w| {
            if w.needs_plan_confirmation() && !confirm("사업계획서 없이 등록하시겠습니까?") {
                return None;
            }
            Some(w.to_multipart())
        }) {
            None => return,
            Some(Ok(body)) => body,
            Some(Err(message)) => {
                alert(&message);
                return;
            }
        };
        let api = api.clone();
        set_submitting.set(true);
        spawn_local(async move {
            match api::create_project(&api, body).await {
                Ok(project) => {
                    log::info!("project {} submitted for review", project.id);
                    client.invalidate("projects");
                    alert("프로젝트가 등록되었습니다. 관리자 승인 후 공개됩니다.");
                    ctx.navigate(Route::ProjectDetail(project.id));
                }
                Err(e) => alert(&e.user_message()),
            }
            set_submitting.set(false);
        });
    };

    let on_images = move |ev: web_sys::Event| {
        let files = selected_files(&ev);
        spawn_local(async move {
            let uploads = read_files(files).await;
            if let Some(Err(message)) = wizard.try_update(|w| w.add_images(uploads)) {
                alert(&message);
            }
        });
    };
    let on_plan = move |ev: web_sys::Event| {
        let files = selected_files(&ev);
        spawn_local(async move {
            let Some(upload) = read_files(files).await.into_iter().next() else { return };
            if let Some(Err(message)) = wizard.try_update(|w| w.set_plan_document(upload)) {
                alert(&message);
            }
        });
    };

    let text_field = move |label: &'static str, kind: &'static str, get: fn(&ProjectWizard) -> String, set: fn(&mut ProjectWizard, String)| {
        view! {
            <label class="field">
                <span>{label}</span>
                <input
                    type=kind
                    prop:value=move || wizard.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        wizard.update(|w| set(w, value));
                    }
                />
            </label>
        }
    };

    let step_one = move || view! {
        {text_field("프로젝트명", "text", |w| w.title.clone(), |w, v| w.title = v)}
        <label class="field">
            <span>"카테고리"</span>
            <select on:change=move |ev| {
                let value = event_target_value(&ev);
                wizard.update(|w| w.category = value);
            }>
                <option value="" selected=move || wizard.with(|w| w.category.is_empty())>"선택하세요"</option>
                {WIZARD_CATEGORIES
                    .into_iter()
                    .map(|c| view! {
                        <option value=c selected=move || wizard.with(|w| w.category == c)>{c}</option>
                    })
                    .collect_view()}
            </select>
        </label>
        {text_field("기관명", "text", |w| w.organization.clone(), |w, v| w.organization = v)}
    };

    let step_two = move || view! {
        {text_field("목표 금액 (원)", "text", |w| w.target_amount.clone(), |w, v| w.target_amount = v)}
        <p class="hint">
            {move || wizard.with(|w| w.target().map(|t| format!("{}원", format_amount(t))).unwrap_or_default())}
        </p>
        {text_field("시작일", "date", |w| w.start_date.clone(), |w, v| w.start_date = v)}
        {text_field("종료일", "date", |w| w.end_date.clone(), |w, v| w.end_date = v)}
    };

    let step_three = move || view! {
        <label class="field">
            <span>"상세 설명"</span>
            <textarea
                rows="12"
                prop:value=move || wizard.with(|w| w.description.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    wizard.update(|w| w.description = value);
                }
            ></textarea>
        </label>
    };

    let step_four = move || view! {
        <label class="field">
            <span>{format!("이미지 (최대 {}개)", MAX_IMAGES)}</span>
            <input type="file" accept="image/*" multiple=true on:change=on_images />
        </label>
        <ul class="file-list">
            {move || wizard.with(|w| {
                w.images
                    .iter()
                    .enumerate()
                    .map(|(i, img)| view! {
                        <li>
                            {img.name.clone()}
                            <button type="button" class="link-btn" on:click=move |_| wizard.update(|w| w.remove_image(i))>
                                "삭제"
                            </button>
                        </li>
                    })
                    .collect_view()
            })}
        </ul>
        <label class="field">
            <span>"사업계획서 (PDF, DOC, DOCX / 10MB 이하)"</span>
            <input type="file" accept=".pdf,.doc,.docx" on:change=on_plan />
        </label>
        <p class="hint">
            {move || wizard.with(|w| w.plan_document.as_ref().map(|p| p.name.clone()).unwrap_or_else(|| "선택된 파일 없음".to_string()))}
        </p>
    };

    view! {
        <div class="project-create">
            <h1>"프로젝트 등록"</h1>
            <ol class="wizard-steps">
                {STEP_TITLES
                    .iter()
                    .enumerate()
                    .map(|(i, title)| {
                        let step = i as u8 + 1;
                        view! {
                            <li class=move || if wizard.with(|w| w.step) == step { "active" } else { "" }>
                                {format!("{}. {}", step, title)}
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>

            <div class="wizard-body">
                {move || match wizard.with(|w| w.step) {
                    1 => step_one().into_any(),
                    2 => step_two().into_any(),
                    3 => step_three().into_any(),
                    _ => step_four().into_any(),
                }}
            </div>

            <div class="wizard-nav">
                <button type="button" class="btn" disabled=move || wizard.with(|w| w.step == 1) on:click=prev>
                    "이전"
                </button>
                <Show
                    when=move || wizard.with(|w| w.step == LAST_STEP)
                    fallback=move || view! { <button type="button" class="btn primary" on:click=next>"다음"</button> }
                >
                    <button
                        type="button"
                        class="btn primary"
                        disabled=move || submitting.get()
                        on:click=submit.clone()
                    >
                        {move || if submitting.get() { "등록 중..." } else { "등록하기" }}
                    </button>
                </Show>
            </div>
        </div>
    }
}
