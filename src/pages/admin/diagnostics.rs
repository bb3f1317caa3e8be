//! Admin Diagnostics
//!
//! Client-side view of the running app: effective configuration and the
//! records held by the in-memory logger.

use leptos::prelude::*;
use log::Level;
use rolling_logger::LogEntry;

use crate::config::use_config;
use crate::query::use_query_client;

/// Records at `min` severity or worse, newest first
fn filter_entries(entries: Vec<LogEntry>, min: Level) -> Vec<LogEntry> {
    let mut kept: Vec<LogEntry> = entries.into_iter().filter(|e| e.level <= min).collect();
    kept.reverse();
    kept
}

fn level_from_str(s: &str) -> Level {
    match s {
        "error" => Level::Error,
        "warn" => Level::Warn,
        "info" => Level::Info,
        _ => Level::Debug,
    }
}

#[component]
pub fn DiagnosticsPage() -> impl IntoView {
    let config = use_config();
    let client = use_query_client();
    let (entries, set_entries) = signal(rolling_logger::recent());
    let (min_level, set_min_level) = signal(Level::Debug);

    let refresh = move |_: web_sys::MouseEvent| set_entries.set(rolling_logger::recent());
    let clear = move |_: web_sys::MouseEvent| {
        rolling_logger::clear();
        set_entries.set(Vec::new());
    };

    view! {
        <section class="diagnostics-config">
            <h2>"설정"</h2>
            <dl>
                <dt>"API 주소"</dt>
                <dd>{config.api_base_url.clone()}</dd>
                <dt>"요청 제한 시간"</dt>
                <dd>{format!("{}초", config.request_timeout.as_secs())}</dd>
                <dt>"캐시 유효 시간"</dt>
                <dd>{format!("{}초", config.query_stale_time.as_secs())}</dd>
                <dt>"알림 갱신 주기"</dt>
                <dd>{format!("{}초", config.notification_poll_interval.as_secs())}</dd>
                <dt>"로그 보관 개수"</dt>
                <dd>{config.log_capacity}</dd>
            </dl>
            <button class="btn" on:click=move |_| client.invalidate_all()>"캐시 새로고침"</button>
        </section>

        <section class="diagnostics-logs">
            <div class="section-header">
                <h2>"클라이언트 로그"</h2>
                <select on:change=move |ev| set_min_level.set(level_from_str(&event_target_value(&ev)))>
                    <option value="debug">"전체"</option>
                    <option value="info">"INFO 이상"</option>
                    <option value="warn">"WARN 이상"</option>
                    <option value="error">"ERROR"</option>
                </select>
                <button class="btn" on:click=refresh>"새로고침"</button>
                <button class="btn" on:click=clear>"비우기"</button>
            </div>
            <pre class="log-view">
                {move || {
                    let lines = filter_entries(entries.get(), min_level.get());
                    if lines.is_empty() {
                        "기록된 로그가 없습니다.".to_string()
                    } else {
                        lines.iter().map(LogEntry::format_line).collect::<Vec<_>>().join("\n")
                    }
                }}
            </pre>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn entry(level: Level, message: &str) -> LogEntry {
        LogEntry { timestamp: Local::now(), level, target: "test".to_string(), message: message.to_string() }
    }

    #[test]
    fn test_filter_entries_by_severity() {
        let entries = vec![entry(Level::Info, "a"), entry(Level::Error, "b"), entry(Level::Debug, "c"), entry(Level::Warn, "d")];
        let kept = filter_entries(entries, Level::Warn);
        let messages: Vec<&str> = kept.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["d", "b"]);
    }

    #[test]
    fn test_level_from_str_defaults_to_debug() {
        assert_eq!(level_from_str("warn"), Level::Warn);
        assert_eq!(level_from_str("anything"), Level::Debug);
    }
}
