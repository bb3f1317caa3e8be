//! Community Pages
//!
//! Board list, post detail with threaded comments, and the post editor used
//! for both writing and editing.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, query_string, use_api, ApiClient};
use crate::components::{DeleteConfirmButton, EmptyState, NavLink, Pagination};
use crate::context::{alert, use_app_context};
use crate::format::{now, short_date, time_ago_str};
use crate::markdown::{parse_markdown, plain_preview};
use crate::models::{
    order_posts, thread_comments, Comment, CreateCommentRequest, CreatePostRequest, PostFilters, PostType,
    UpdatePostRequest, UserType,
};
use crate::pages::query_view;
use crate::query::{use_query, use_query_client, QueryClient, QueryKey};
use crate::routes::Route;
use crate::store::{use_app_store, AppStateStoreFields};

const PAGE_SIZE: u32 = 20;
const PREVIEW_CHARS: usize = 80;

fn post_key(id: u64) -> QueryKey {
    QueryKey::new([format!("post:{}", id)])
}

fn comments_key(id: u64) -> QueryKey {
    QueryKey::new([format!("comments:{}", id)])
}

/// Everything a post or comment mutation can change
fn invalidate_post(client: QueryClient, id: u64) {
    client.invalidate("posts");
    client.invalidate(post_key(id));
    client.invalidate(comments_key(id));
}

/// Logged-in user id and whether they are an admin
fn use_viewer() -> impl Fn() -> (Option<u64>, bool) + Copy + 'static {
    let store = use_app_store();
    move || {
        store.session().with(|s| match s {
            Some(s) => (Some(s.user.user_id), s.user.user_type == UserType::Admin),
            None => (None, false),
        })
    }
}

#[component]
pub fn BoardPage() -> impl IntoView {
    let api = use_api();
    let viewer = use_viewer();
    let filters = RwSignal::new(PostFilters { size: PAGE_SIZE, ..Default::default() });
    let (keyword, set_keyword) = signal(String::new());

    let posts = use_query(
        move || QueryKey::new(["posts".to_string(), query_string(&filters.get().query_pairs())]),
        move || {
            let api = api.clone();
            let filters = filters.get();
            async move { api::get_posts(&api, &filters).await }
        },
    );

    let set_type = move |post_type: Option<PostType>| {
        filters.update(|f| {
            f.post_type = post_type;
            f.page = 0;
        })
    };

    view! {
        <div class="board-header">
            <h1>"커뮤니티"</h1>
            <Show when=move || viewer().0.is_some()>
                <NavLink to=Route::CommunityWrite class="btn primary">"글쓰기"</NavLink>
            </Show>
        </div>

        <div class="filter-bar">
            <div class="category-chips">
                <button
                    class=move || if filters.with(|f| f.post_type.is_none()) { "chip active" } else { "chip" }
                    on:click=move |_| set_type(None)
                >
                    "전체"
                </button>
                {PostType::ALL
                    .into_iter()
                    .map(|t| view! {
                        <button
                            class=move || if filters.with(|f| f.post_type == Some(t)) { "chip active" } else { "chip" }
                            on:click=move |_| set_type(Some(t))
                        >
                            {t.label()}
                        </button>
                    })
                    .collect_view()}
            </div>
            <form
                class="search-form"
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    let value = keyword.get_untracked().trim().to_string();
                    filters.update(|f| {
                        f.keyword = Some(value).filter(|k| !k.is_empty());
                        f.page = 0;
                    });
                }
            >
                <input
                    type="search"
                    placeholder="제목, 내용 검색"
                    prop:value=move || keyword.get()
                    on:input=move |ev| set_keyword.set(event_target_value(&ev))
                />
                <button type="submit">"검색"</button>
            </form>
        </div>

        {move || query_view(posts.get(), move |mut page| {
            if page.content.is_empty() {
                return view! { <EmptyState message="게시글이 없습니다." /> }.into_any();
            }
            order_posts(&mut page.content);
            let total_pages = page.total_pages;
            let now = now();
            view! {
                <ul class="post-list">
                    {page.content
                        .into_iter()
                        .map(|post| {
                            let class = if post.is_pinned { "post-row pinned" } else { "post-row" };
                            view! {
                                <li class=class>
                                    <span class="badge">{post.post_type.label()}</span>
                                    <NavLink to=Route::CommunityPost(post.post_id)>
                                        <strong>{post.title.clone()}</strong>
                                    </NavLink>
                                    <p class="muted">{plain_preview(&post.content, PREVIEW_CHARS)}</p>
                                    <small>
                                        {post.author.user_name.clone()}
                                        {format!(" · {} · 조회 {} · 좋아요 {} · 댓글 {}", time_ago_str(&post.created_at, now), post.view_count, post.like_count, post.comment_count)}
                                    </small>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
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

#[component]
pub fn PostDetailPage(id: u64) -> impl IntoView {
    let api = use_api();
    let client = use_query_client();
    let ctx = use_app_context();
    let viewer = use_viewer();

    let post = use_query(move || post_key(id), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_post(&api, id).await }
        }
    });

    let like = {
        let api = api.clone();
        move |_: web_sys::MouseEvent| {
            if viewer().0.is_none() {
                ctx.navigate(Route::Login { redirect: Some(Route::CommunityPost(id).to_path()) });
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                match api::like_post(&api, id).await {
                    Ok(count) => {
                        log::debug!("post {} now has {} likes", id, count);
                        invalidate_post(client, id);
                    }
                    Err(e) => alert(&e.user_message()),
                }
            });
        }
    };

    let delete = {
        let api = api.clone();
        move |_: ()| {
            let api = api.clone();
            spawn_local(async move {
                match api::delete_post(&api, id).await {
                    Ok(()) => {
                        client.invalidate("posts");
                        ctx.navigate(Route::Community);
                    }
                    Err(e) => alert(&e.user_message()),
                }
            });
        }
    };

    view! {
        {move || query_view(post.get(), {
            let like = like.clone();
            let delete = delete.clone();
            move |p| {
                let (user_id, is_admin) = viewer();
                let is_author = user_id == Some(p.author.user_id);
                view! {
                    <article class="post-detail">
                        <header>
                            <span class="badge">{p.post_type.label()}</span>
                            <h1>{p.title.clone()}</h1>
                            <p class="muted">
                                {p.author.user_name.clone()}
                                {format!(" · {} · 조회 {}", short_date(&p.created_at), p.view_count)}
                                {p.updated_at.clone().map(|_| " (수정됨)")}
                            </p>
                        </header>
                        <div class="markdown-body" inner_html=parse_markdown(&p.content)></div>
                        <div class="post-images">
                            {p.images
                                .iter()
                                .map(|img| view! {
                                    <figure>
                                        <img src=img.image_url.clone() loading="lazy" alt="" />
                                        {img.caption.clone().map(|c| view! { <figcaption>{c}</figcaption> })}
                                    </figure>
                                })
                                .collect_view()}
                        </div>
                        <div class="post-actions">
                            <button class="btn" on:click=like.clone()>{format!("♥ 좋아요 {}", p.like_count)}</button>
                            {is_author.then(|| view! {
                                <NavLink to=Route::CommunityEdit(id) class="btn">"수정"</NavLink>
                            })}
                            {(is_author || is_admin).then(|| view! {
                                <DeleteConfirmButton button_class="btn danger" on_confirm=delete.clone() />
                            })}
                            <NavLink to=Route::Community class="btn">"목록"</NavLink>
                        </div>
                    </article>
                }
            }
        })}
        <CommentSection post_id=id api=api />
    }
}

#[component]
fn CommentSection(post_id: u64, api: ApiClient) -> impl IntoView {
    let client = use_query_client();
    let viewer = use_viewer();
    let (draft, set_draft) = signal(String::new());

    let comments = use_query(move || comments_key(post_id), {
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api::get_comments(&api, post_id).await.map(thread_comments) }
        }
    });

    let submit = {
        let api = api.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let content = draft.get_untracked().trim().to_string();
            if content.is_empty() {
                alert("댓글 내용을 입력해주세요.");
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                let request = CreateCommentRequest { content, parent_comment_id: None };
                match api::create_comment(&api, post_id, &request).await {
                    Ok(_) => {
                        set_draft.set(String::new());
                        invalidate_post(client, post_id);
                    }
                    Err(e) => alert(&e.user_message()),
                }
            });
        }
    };

    view! {
        <section class="comments">
            <h2>"댓글"</h2>
            <Show
                when=move || viewer().0.is_some()
                fallback=|| view! { <p class="muted">"댓글을 작성하려면 로그인하세요."</p> }
            >
                <form class="comment-form" on:submit=submit.clone()>
                    <textarea
                        rows="3"
                        placeholder="댓글을 입력하세요"
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    ></textarea>
                    <button type="submit" class="btn primary">"등록"</button>
                </form>
            </Show>
            {move || query_view(comments.get(), {
                let api = api.clone();
                move |list| {
                    if list.is_empty() {
                        return view! { <EmptyState message="첫 댓글을 남겨주세요." /> }.into_any();
                    }
                    view! {
                        <ul class="comment-list">
                            {list
                                .into_iter()
                                .map(|c| view! { <CommentItem comment=c post_id=post_id api=api.clone() depth=0 /> })
                                .collect_view()}
                        </ul>
                    }
                    .into_any()
                }
            })}
        </section>
    }
}

#[component]
fn CommentItem(comment: Comment, post_id: u64, api: ApiClient, depth: u8) -> AnyView {
    let client = use_query_client();
    let viewer = use_viewer();
    let (user_id, is_admin) = viewer();
    let id = comment.comment_id;
    let is_author = user_id == Some(comment.author.user_id);
    let (editing, set_editing) = signal(false);
    let (replying, set_replying) = signal(false);
    let (text, set_text) = signal(String::new());
    let original = comment.content.clone();

    let save_edit = {
        let api = api.clone();
        move |_: web_sys::MouseEvent| {
            let content = text.get_untracked().trim().to_string();
            if content.is_empty() {
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                match api::update_comment(&api, id, &content).await {
                    Ok(_) => {
                        set_editing.set(false);
                        invalidate_post(client, post_id);
                    }
                    Err(e) => alert(&e.user_message()),
                }
            });
        }
    };
    let send_reply = {
        let api = api.clone();
        move |_: web_sys::MouseEvent| {
            let content = text.get_untracked().trim().to_string();
            if content.is_empty() {
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                let request = CreateCommentRequest { content, parent_comment_id: Some(id) };
                match api::create_comment(&api, post_id, &request).await {
                    Ok(_) => {
                        set_replying.set(false);
                        set_text.set(String::new());
                        invalidate_post(client, post_id);
                    }
                    Err(e) => alert(&e.user_message()),
                }
            });
        }
    };
    let delete = {
        let api = api.clone();
        move |_: ()| {
            let api = api.clone();
            spawn_local(async move {
                match api::delete_comment(&api, id).await {
                    Ok(()) => invalidate_post(client, post_id),
                    Err(e) => alert(&e.user_message()),
                }
            });
        }
    };
    let like = {
        let api = api.clone();
        move |_: web_sys::MouseEvent| {
            let api = api.clone();
            spawn_local(async move {
                match api::like_comment(&api, id).await {
                    Ok(_) => client.invalidate(comments_key(post_id)),
                    Err(e) => alert(&e.user_message()),
                }
            });
        }
    };

    let editor = move |on_save: Box<dyn Fn(web_sys::MouseEvent) + Send + Sync>, on_cancel: WriteSignal<bool>| {
        view! {
            <div class="comment-editor">
                <textarea
                    rows="2"
                    prop:value=move || text.get()
                    on:input=move |ev| set_text.set(event_target_value(&ev))
                ></textarea>
                <button class="btn primary" on:click=move |ev| on_save(ev)>"저장"</button>
                <button class="btn" on:click=move |_| on_cancel.set(false)>"취소"</button>
            </div>
        }
    };

    // Only top-level comments take replies
    let can_reply = depth == 0 && user_id.is_some();
    let replies = comment.replies.clone();

    view! {
        <li class={if depth > 0 { "comment reply" } else { "comment" }}>
            <p class="comment-meta">
                <strong>{comment.author.user_name.clone()}</strong>
                <small>{time_ago_str(&comment.created_at, now())}</small>
            </p>
            <Show
                when=move || editing.get()
                fallback={
                    let content = comment.content.clone();
                    move || view! { <p class="comment-body">{content.clone()}</p> }
                }
            >
                {
                    let save_edit = save_edit.clone();
                    move || editor(Box::new(save_edit.clone()), set_editing)
                }
            </Show>
            <div class="comment-actions">
                <button class="link-btn" on:click=like>{format!("♥ {}", comment.like_count)}</button>
                {can_reply.then(|| view! {
                    <button class="link-btn" on:click=move |_| {
                        set_text.set(String::new());
                        set_replying.set(true);
                    }>"답글"</button>
                })}
                {is_author.then(|| view! {
                    <button class="link-btn" on:click=move |_| {
                        set_text.set(original.clone());
                        set_editing.set(true);
                    }>"수정"</button>
                })}
                {(is_author || is_admin).then(|| view! {
                    <DeleteConfirmButton button_class="link-btn" on_confirm=delete />
                })}
            </div>
            <Show when=move || replying.get()>
                {
                    let send_reply = send_reply.clone();
                    move || editor(Box::new(send_reply.clone()), set_replying)
                }
            </Show>
            {(!replies.is_empty()).then(|| view! {
                <ul class="reply-list">
                    {replies
                        .into_iter()
                        .map(|r| view! { <CommentItem comment=r post_id=post_id api=api.clone() depth={depth + 1} /> })
                        .collect_view()}
                </ul>
            })}
        </li>
    }
    .into_any()
}

#[component]
pub fn PostEditorPage(post_id: Option<u64>) -> impl IntoView {
    let api = use_api();
    let client = use_query_client();
    let ctx = use_app_context();
    let (post_type, set_post_type) = signal(PostType::General);
    let (title, set_title) = signal(String::new());
    let (content, set_content) = signal(String::new());
    let (preview, set_preview) = signal(false);
    let (submitting, set_submitting) = signal(false);

    // Editing starts from the stored post
    if let Some(id) = post_id {
        let api = api.clone();
        spawn_local(async move {
            match api::get_post(&api, id).await {
                Ok(post) => {
                    set_post_type.set(post.post_type);
                    set_title.set(post.title);
                    set_content.set(post.content);
                }
                Err(e) => alert(&e.user_message()),
            }
        });
    }

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title_value = title.get_untracked().trim().to_string();
        let content_value = content.get_untracked().trim().to_string();
        if title_value.is_empty() || content_value.is_empty() {
            alert("제목과 내용을 입력해주세요.");
            return;
        }
        if submitting.get_untracked() {
            return;
        }
        let api = api.clone();
        set_submitting.set(true);
        spawn_local(async move {
            let result = match post_id {
                Some(id) => {
                    let request = UpdatePostRequest { title: Some(title_value), content: Some(content_value) };
                    api::update_post(&api, id, &request).await
                }
                None => {
                    let request =
                        CreatePostRequest { post_type: post_type.get_untracked(), title: title_value, content: content_value };
                    api::create_post(&api, &request).await
                }
            };
            match result {
                Ok(post) => {
                    invalidate_post(client, post.post_id);
                    ctx.navigate(Route::CommunityPost(post.post_id));
                }
                Err(e) => alert(&e.user_message()),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <h1>{if post_id.is_some() { "글 수정" } else { "글쓰기" }}</h1>
        <form class="post-editor" on:submit=submit>
            <select disabled=post_id.is_some() on:change=move |ev| {
                if let Some(t) = PostType::from_str(&event_target_value(&ev)) {
                    set_post_type.set(t);
                }
            }>
                {PostType::ALL
                    .into_iter()
                    .map(|t| view! { <option value=t.as_str() selected=move || post_type.get() == t>{t.label()}</option> })
                    .collect_view()}
            </select>
            <input
                type="text"
                placeholder="제목"
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <div class="editor-tabs">
                <button type="button" class=move || if preview.get() { "tab" } else { "tab active" } on:click=move |_| set_preview.set(false)>
                    "작성"
                </button>
                <button type="button" class=move || if preview.get() { "tab active" } else { "tab" } on:click=move |_| set_preview.set(true)>
                    "미리보기"
                </button>
            </div>
            <Show
                when=move || preview.get()
                fallback=move || view! {
                    <textarea
                        rows="16"
                        placeholder="마크다운을 사용할 수 있습니다"
                        prop:value=move || content.get()
                        on:input=move |ev| set_content.set(event_target_value(&ev))
                    ></textarea>
                }
            >
                <div class="markdown-body" inner_html=move || content.with(|c| parse_markdown(c))></div>
            </Show>
            <button type="submit" class="btn primary" disabled=move || submitting.get()>
                {if post_id.is_some() { "수정하기" } else { "등록하기" }}
            </button>
        </form>
    }
}
