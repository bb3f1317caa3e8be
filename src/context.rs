//! Application Context
//!
//! Shared navigation state provided via Leptos Context API. The current
//! route mirrors `window.location`; `navigate` pushes a history entry and
//! a `popstate` listener keeps the signal in sync with back/forward.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::routes::Route;

/// App-wide navigation signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current route - read
    pub route: ReadSignal<Route>,
    /// Current route - write
    set_route: WriteSignal<Route>,
}

impl AppContext {
    pub fn new(route: (ReadSignal<Route>, WriteSignal<Route>)) -> Self {
        Self { route: route.0, set_route: route.1 }
    }

    /// Push a history entry and show `route`
    pub fn navigate(&self, route: Route) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&route.to_path())) {
                log::warn!("pushState failed: {:?}", e);
            }
        }
        scroll_to_top();
        self.set_route.set(route);
    }

    /// Replace the current history entry (guard redirects)
    pub fn replace(&self, route: Route) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&route.to_path())) {
                log::warn!("replaceState failed: {:?}", e);
            }
        }
        self.set_route.set(route);
    }

    /// Re-read the route from the address bar
    pub fn sync_from_location(&self) {
        self.set_route.set(current_route());
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

/// Route for the browser's current location
pub fn current_route() -> Route {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return Route::Home;
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let query = location.search().unwrap_or_default();
    Route::parse(&path, &query)
}

/// Keep the route signal in sync with back/forward buttons
pub fn listen_popstate(ctx: AppContext) {
    let Some(window) = web_sys::window() else { return };
    let closure = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(move |_ev: web_sys::PopStateEvent| {
        ctx.sync_from_location();
    });
    if let Err(e) = window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref()) {
        log::error!("popstate listener not installed: {:?}", e);
    }
    // Lives for the whole page
    closure.forget();
}

/// Full page load, for gateway redirects outside the app
pub fn redirect_external(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(url) {
            log::error!("redirect to {} failed: {:?}", url, e);
        }
    }
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// Log a dialog the browser refused to show (sandboxed frame, blocked popups)
fn dialog_result<T, E: std::fmt::Debug>(dialog: &str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("{} dialog failed: {:?}", dialog, e);
            None
        }
    }
}

/// Browser alert dialog
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        dialog_result("alert", window.alert_with_message(message));
    }
}

/// Browser prompt; `None` when cancelled or left blank
pub fn prompt(message: &str) -> Option<String> {
    web_sys::window()
        .and_then(|w| dialog_result("prompt", w.prompt_with_message(message)).flatten())
        .map(|answer| answer.trim().to_string())
        .filter(|answer| !answer.is_empty())
}

/// Browser confirm dialog; `false` when unavailable
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| dialog_result("confirm", w.confirm_with_message(message)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_result_passes_value_and_swallows_error() {
        assert_eq!(dialog_result::<bool, &str>("confirm", Ok(true)), Some(true));
        assert_eq!(dialog_result::<(), &str>("alert", Err("blocked")), None);
        assert_eq!(dialog_result::<Option<String>, &str>("prompt", Ok(None)), Some(None));
    }
}
