//! Profile Page
//!
//! Profile edit, notification channels and password change, one tab each.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, use_api, ApiClient, ChangePasswordRequest, UploadFile};
use crate::components::selected_files;
use crate::context::alert;
use crate::format::short_date;
use crate::models::{AuthUserPatch, ChannelSettings, NotificationSettings, UpdateProfileRequest, UserProfile};
use crate::pages::query_view;
use crate::query::{use_query, use_query_client, QueryKey};
use crate::store::{store_update_user, use_app_store};
use crate::validation::validate_password;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Profile,
    Notifications,
    Password,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Profile, Tab::Notifications, Tab::Password];

    fn label(&self) -> &'static str {
        match self {
            Tab::Profile => "프로필",
            Tab::Notifications => "알림 설정",
            Tab::Password => "비밀번호 변경",
        }
    }
}

/// Blank inputs are left out of the request
fn non_empty(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let api = use_api();
    let (tab, set_tab) = signal(Tab::Profile);

    view! {
        <h1>"내 정보"</h1>
        <nav class="tabs">
            {Tab::ALL
                .into_iter()
                .map(|t| view! {
                    <button class=move || if tab.get() == t { "tab active" } else { "tab" } on:click=move |_| set_tab.set(t)>
                        {t.label()}
                    </button>
                })
                .collect_view()}
        </nav>
        {move || {
            let api = api.clone();
            match tab.get() {
                Tab::Profile => view! { <ProfileForm api=api /> }.into_any(),
                Tab::Notifications => view! { <NotificationSettingsForm api=api /> }.into_any(),
                Tab::Password => view! { <PasswordForm api=api /> }.into_any(),
            }
        }}
    }
}

#[component]
fn ProfileForm(api: ApiClient) -> impl IntoView {
    let profile = use_query(|| QueryKey::from("my-profile"), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_my_profile(&api).await }
        }
    });

    view! { {move || query_view(profile.get(), { let api = api.clone(); move |p| view! { <ProfileEditor profile=p api=api /> } })} }
}

#[component]
fn ProfileEditor(profile: UserProfile, api: ApiClient) -> impl IntoView {
    let store = use_app_store();
    let client = use_query_client();
    let draft = RwSignal::new(UpdateProfileRequest {
        user_name: Some(profile.user_name.clone()),
        phone: profile.phone.clone(),
        address: profile.address.clone(),
        birth_date: profile.birth_date.clone(),
    });
    let (image_url, set_image_url) = signal(profile.profile_image_url.clone());
    let (saving, set_saving) = signal(false);

    let save = {
        let api = api.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let request = draft.with_untracked(|d| UpdateProfileRequest {
                user_name: d.user_name.as_deref().and_then(non_empty),
                phone: d.phone.as_deref().and_then(non_empty),
                address: d.address.as_deref().and_then(non_empty),
                birth_date: d.birth_date.as_deref().and_then(non_empty),
            });
            if request.user_name.is_none() {
                alert("이름을 입력해주세요.");
                return;
            }
            let api = api.clone();
            set_saving.set(true);
            spawn_local(async move {
                match api::update_profile(&api, &request).await {
                    Ok(updated) => {
                        store_update_user(
                            &store,
                            AuthUserPatch {
                                user_name: Some(updated.user_name),
                                phone: updated.phone,
                                profile_image_url: None,
                            },
                        );
                        client.invalidate("my-profile");
                        alert("프로필이 저장되었습니다.");
                    }
                    Err(e) => alert(&e.user_message()),
                }
                set_saving.set(false);
            });
        }
    };

    let on_image = move |ev: web_sys::Event| {
        let Some(file) = selected_files(&ev).into_iter().next() else { return };
        let api = api.clone();
        spawn_local(async move {
            let upload = match UploadFile::from_file(&file).await {
                Ok(upload) => upload,
                Err(e) => {
                    log::warn!("could not read {}: {}", file.name(), e);
                    alert("이미지를 읽을 수 없습니다.");
                    return;
                }
            };
            match api::upload_profile_image(&api, upload).await {
                Ok(image) => {
                    set_image_url.set(Some(image.image_url.clone()));
                    store_update_user(
                        &store,
                        AuthUserPatch { profile_image_url: Some(image.image_url), ..Default::default() },
                    );
                }
                Err(e) => alert(&e.user_message()),
            }
        });
    };

    let field = move |label: &'static str, kind: &'static str, get: fn(&UpdateProfileRequest) -> Option<String>, set: fn(&mut UpdateProfileRequest, String)| {
        view! {
            <label class="field">
                <span>{label}</span>
                <input
                    type=kind
                    prop:value=move || draft.with(get).unwrap_or_default()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| set(d, value));
                    }
                />
            </label>
        }
    };

    view! {
        <form class="profile-form" on:submit=save>
            <div class="avatar">
                {move || match image_url.get() {
                    Some(url) => view! { <img src=url alt="프로필 이미지" /> }.into_any(),
                    None => view! { <div class="avatar-placeholder">"👤"</div> }.into_any(),
                }}
                <input type="file" accept="image/*" on:change=on_image />
            </div>
            <dl class="profile-meta">
                <dt>"이메일"</dt>
                <dd>{profile.email.clone()}</dd>
                <dt>"회원 유형"</dt>
                <dd>{profile.user_type.label()}</dd>
                <dt>"가입일"</dt>
                <dd>{short_date(&profile.created_at)}</dd>
            </dl>
            {field("이름", "text", |d| d.user_name.clone(), |d, v| d.user_name = Some(v))}
            {field("연락처", "tel", |d| d.phone.clone(), |d, v| d.phone = Some(v))}
            {field("주소", "text", |d| d.address.clone(), |d, v| d.address = Some(v))}
            {field("생년월일", "date", |d| d.birth_date.clone(), |d, v| d.birth_date = Some(v))}
            <button type="submit" class="btn primary" disabled=move || saving.get()>"저장"</button>
        </form>
    }
}

type ChannelAccess = fn(&mut NotificationSettings) -> &mut ChannelSettings;

fn donation(s: &mut NotificationSettings) -> &mut ChannelSettings {
    &mut s.donation
}
fn comment(s: &mut NotificationSettings) -> &mut ChannelSettings {
    &mut s.comment
}
fn project(s: &mut NotificationSettings) -> &mut ChannelSettings {
    &mut s.project
}
fn settlement(s: &mut NotificationSettings) -> &mut ChannelSettings {
    &mut s.settlement
}
fn deadline(s: &mut NotificationSettings) -> &mut ChannelSettings {
    &mut s.deadline
}

const CHANNEL_ROWS: [(&str, ChannelAccess); 5] = [
    ("기부", donation),
    ("댓글", comment),
    ("프로젝트", project),
    ("정산", settlement),
    ("마감 임박", deadline),
];

fn enabled(c: &mut ChannelSettings) -> &mut bool {
    &mut c.enabled
}
fn email(c: &mut ChannelSettings) -> &mut bool {
    &mut c.email
}
fn sms(c: &mut ChannelSettings) -> &mut bool {
    &mut c.sms
}
fn push(c: &mut ChannelSettings) -> &mut bool {
    &mut c.push
}

#[component]
fn NotificationSettingsForm(api: ApiClient) -> impl IntoView {
    let settings = use_query(|| QueryKey::from("notification-settings"), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_notification_settings(&api).await }
        }
    });

    view! {
        {move || query_view(settings.get(), {
            let api = api.clone();
            move |loaded| view! { <ChannelTable settings=loaded api=api /> }
        })}
    }
}

#[component]
fn ChannelTable(settings: NotificationSettings, api: ApiClient) -> impl IntoView {
    let client = use_query_client();
    let draft = RwSignal::new(settings);

    let checkbox = move |access: ChannelAccess, pick: fn(&mut ChannelSettings) -> &mut bool| {
        view! {
            <td>
                <input
                    type="checkbox"
                    prop:checked=move || {
                        let mut s = draft.get();
                        *pick(access(&mut s))
                    }
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        draft.update(|s| *pick(access(s)) = checked);
                    }
                />
            </td>
        }
    };

    let save = move |_: web_sys::MouseEvent| {
        let api = api.clone();
        let settings = draft.get_untracked();
        spawn_local(async move {
            match api::update_notification_settings(&api, &settings).await {
                Ok(saved) => {
                    draft.set(saved);
                    client.invalidate("notification-settings");
                    alert("알림 설정이 저장되었습니다.");
                }
                Err(e) => alert(&e.user_message()),
            }
        });
    };

    view! {
        <table class="channel-table">
            <thead>
                <tr>
                    <th>"항목"</th>
                    <th>"받기"</th>
                    <th>"이메일"</th>
                    <th>"SMS"</th>
                    <th>"푸시"</th>
                </tr>
            </thead>
            <tbody>
                {CHANNEL_ROWS
                    .into_iter()
                    .map(|(label, access)| view! {
                        <tr>
                            <th>{label}</th>
                            {checkbox(access, enabled)}
                            {checkbox(access, email)}
                            {checkbox(access, sms)}
                            {checkbox(access, push)}
                        </tr>
                    })
                    .collect_view()}
            </tbody>
        </table>
        <button class="btn primary" on:click=save>"저장"</button>
    }
}

#[derive(Debug, Clone, Default)]
struct PasswordDraft {
    current: String,
    new: String,
    confirm: String,
}

impl PasswordDraft {
    fn validate(&self) -> Result<ChangePasswordRequest, String> {
        if self.current.is_empty() {
            return Err("현재 비밀번호를 입력해주세요.".to_string());
        }
        validate_password(&self.new)?;
        if self.new != self.confirm {
            return Err("비밀번호가 일치하지 않습니다.".to_string());
        }
        Ok(ChangePasswordRequest { current_password: self.current.clone(), new_password: self.new.clone() })
    }
}

#[component]
fn PasswordForm(api: ApiClient) -> impl IntoView {
    let draft = RwSignal::new(PasswordDraft::default());
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match draft.with_untracked(|d| d.validate()) {
            Ok(request) => request,
            Err(message) => {
                set_error.set(Some(message));
                return;
            }
        };
        set_error.set(None);
        let api = api.clone();
        spawn_local(async move {
            match api::change_password(&api, &request).await {
                Ok(()) => {
                    draft.set(PasswordDraft::default());
                    alert("비밀번호가 변경되었습니다.");
                }
                Err(e) => set_error.set(Some(e.user_message())),
            }
        });
    };

    let field = move |label: &'static str, get: fn(&PasswordDraft) -> String, set: fn(&mut PasswordDraft, String)| {
        view! {
            <label class="field">
                <span>{label}</span>
                <input
                    type="password"
                    prop:value=move || draft.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| set(d, value));
                    }
                />
            </label>
        }
    };

    view! {
        <form class="password-form" on:submit=submit>
            {field("현재 비밀번호", |d| d.current.clone(), |d, v| d.current = v)}
            {field("새 비밀번호", |d| d.new.clone(), |d, v| d.new = v)}
            {field("새 비밀번호 확인", |d| d.confirm.clone(), |d, v| d.confirm = v)}
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <button type="submit" class="btn primary">"변경"</button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_draft_validation() {
        let mut draft = PasswordDraft::default();
        assert!(draft.validate().is_err());

        draft.current = "old-pass!".to_string();
        draft.new = "short".to_string();
        assert!(draft.validate().is_err());

        draft.new = "longenough!".to_string();
        draft.confirm = "different!".to_string();
        assert_eq!(draft.validate().unwrap_err(), "비밀번호가 일치하지 않습니다.");

        draft.confirm = "longenough!".to_string();
        let request = draft.validate().unwrap();
        assert_eq!(request.current_password, "old-pass!");
        assert_eq!(request.new_password, "longenough!");
    }

    #[test]
    fn test_channel_rows_reach_each_category() {
        let mut settings = NotificationSettings::default();
        for (_, access) in CHANNEL_ROWS {
            access(&mut settings).email = true;
        }
        assert!(settings.donation.email && settings.comment.email && settings.deadline.email);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" 서울 "), Some("서울".to_string()));
    }
}
