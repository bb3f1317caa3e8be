//! Route Table
//!
//! Maps URL paths to pages, picks the layout shell for each page and decides
//! who may see it.

use percent_encoding::percent_decode_str;

use crate::api::encode_component;
use crate::models::{AuthSession, UserType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login { redirect: Option<String> },
    Signup,
    Projects,
    ProjectCreate,
    ProjectDetail(u64),
    Community,
    CommunityWrite,
    CommunityPost(u64),
    CommunityEdit(u64),
    Profile,
    Donations,
    Favorites,
    PiggyBank,
    Notifications,
    PaymentSuccess { pg_token: Option<String>, order_id: Option<String> },
    PaymentCancel { order_id: Option<String> },
    PaymentFail { order_id: Option<String> },
    AdminDashboard,
    AdminUsers,
    AdminOrganizations,
    AdminProjects,
    AdminSettlements,
    AdminDiagnostics,
    NotFound,
}

/// Shell a page renders inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Header, content, footer
    Main,
    /// Sidebar back-office
    Admin,
    /// Centered card for login/signup
    Auth,
    /// Nothing around the page (gateway return pages)
    Bare,
}

/// Who may see a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Public,
    /// Only when logged out
    Guest,
    LoggedIn,
    Organization,
    Admin,
}

impl Route {
    /// Parse a pathname plus raw query string (with or without leading `?`)
    pub fn parse(path: &str, query: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let param = |name: &str| query_param(query, name);

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login { redirect: param("redirect") },
            ["signup"] => Route::Signup,
            ["projects"] => Route::Projects,
            ["projects", "create"] => Route::ProjectCreate,
            ["projects", id] => parse_id(id).map(Route::ProjectDetail).unwrap_or(Route::NotFound),
            ["community"] => Route::Community,
            ["community", "write"] => Route::CommunityWrite,
            ["community", "edit", id] => parse_id(id).map(Route::CommunityEdit).unwrap_or(Route::NotFound),
            ["community", id] => parse_id(id).map(Route::CommunityPost).unwrap_or(Route::NotFound),
            ["profile"] => Route::Profile,
            ["donations"] => Route::Donations,
            ["favorites"] => Route::Favorites,
            ["piggy-bank"] => Route::PiggyBank,
            ["notifications"] => Route::Notifications,
            // `access` is the gateway's test-mode return path
            ["payment", "success"] | ["payment", "access"] => Route::PaymentSuccess {
                pg_token: param("pg_token"),
                order_id: param("orderId"),
            },
            ["payment", "cancel"] => Route::PaymentCancel { order_id: param("orderId") },
            ["payment", "fail"] => Route::PaymentFail { order_id: param("orderId") },
            ["admin"] | ["admin", "dashboard"] => Route::AdminDashboard,
            ["admin", "users"] => Route::AdminUsers,
            ["admin", "organizations"] => Route::AdminOrganizations,
            ["admin", "projects"] => Route::AdminProjects,
            ["admin", "settlements"] => Route::AdminSettlements,
            ["admin", "diagnostics"] => Route::AdminDiagnostics,
            _ => Route::NotFound,
        }
    }

    /// Path with query string, suitable for `pushState`
    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login { redirect: None } => "/login".to_string(),
            Route::Login { redirect: Some(target) } => format!("/login?redirect={}", encode_component(target)),
            Route::Signup => "/signup".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::ProjectCreate => "/projects/create".to_string(),
            Route::ProjectDetail(id) => format!("/projects/{}", id),
            Route::Community => "/community".to_string(),
            Route::CommunityWrite => "/community/write".to_string(),
            Route::CommunityPost(id) => format!("/community/{}", id),
            Route::CommunityEdit(id) => format!("/community/edit/{}", id),
            Route::Profile => "/profile".to_string(),
            Route::Donations => "/donations".to_string(),
            Route::Favorites => "/favorites".to_string(),
            Route::PiggyBank => "/piggy-bank".to_string(),
            Route::Notifications => "/notifications".to_string(),
            Route::PaymentSuccess { pg_token, order_id } => {
                with_query("/payment/success", &[("pg_token", pg_token), ("orderId", order_id)])
            }
            Route::PaymentCancel { order_id } => with_query("/payment/cancel", &[("orderId", order_id)]),
            Route::PaymentFail { order_id } => with_query("/payment/fail", &[("orderId", order_id)]),
            Route::AdminDashboard => "/admin/dashboard".to_string(),
            Route::AdminUsers => "/admin/users".to_string(),
            Route::AdminOrganizations => "/admin/organizations".to_string(),
            Route::AdminProjects => "/admin/projects".to_string(),
            Route::AdminSettlements => "/admin/settlements".to_string(),
            Route::AdminDiagnostics => "/admin/diagnostics".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            Route::Login { .. } | Route::Signup => Layout::Auth,
            Route::PaymentSuccess { .. } | Route::PaymentCancel { .. } | Route::PaymentFail { .. } => Layout::Bare,
            Route::AdminDashboard
            | Route::AdminUsers
            | Route::AdminOrganizations
            | Route::AdminProjects
            | Route::AdminSettlements
            | Route::AdminDiagnostics => Layout::Admin,
            _ => Layout::Main,
        }
    }

    fn access(&self) -> Access {
        match self {
            Route::Login { .. } | Route::Signup => Access::Guest,
            Route::ProjectCreate => Access::Organization,
            Route::CommunityWrite
            | Route::CommunityEdit(_)
            | Route::Profile
            | Route::Donations
            | Route::Favorites
            | Route::PiggyBank
            | Route::Notifications => Access::LoggedIn,
            _ if self.layout() == Layout::Admin => Access::Admin,
            _ => Access::Public,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "홈",
            Route::Login { .. } => "로그인",
            Route::Signup => "회원가입",
            Route::Projects => "프로젝트",
            Route::ProjectCreate => "프로젝트 등록",
            Route::ProjectDetail(_) => "프로젝트 상세",
            Route::Community => "커뮤니티",
            Route::CommunityWrite => "글쓰기",
            Route::CommunityPost(_) => "게시글",
            Route::CommunityEdit(_) => "게시글 수정",
            Route::Profile => "내 정보",
            Route::Donations => "기부 내역",
            Route::Favorites => "관심 프로젝트",
            Route::PiggyBank => "저금통",
            Route::Notifications => "알림",
            Route::PaymentSuccess { .. } => "결제 완료",
            Route::PaymentCancel { .. } => "결제 취소",
            Route::PaymentFail { .. } => "결제 실패",
            Route::AdminDashboard => "대시보드",
            Route::AdminUsers => "회원 관리",
            Route::AdminOrganizations => "기관 승인",
            Route::AdminProjects => "프로젝트 관리",
            Route::AdminSettlements => "정산 관리",
            Route::AdminDiagnostics => "진단",
            Route::NotFound => "페이지를 찾을 수 없음",
        }
    }
}

/// Where to send the visitor instead, or `None` to render the route
pub fn guard(route: &Route, session: Option<&AuthSession>) -> Option<Route> {
    let user_type = session.map(|s| s.user.user_type);
    let login = || Route::Login { redirect: Some(route.to_path()) };

    match (route.access(), user_type) {
        (Access::Public, _) => None,
        (Access::Guest, None) => None,
        (Access::Guest, Some(_)) => Some(Route::Home),
        (_, None) => Some(login()),
        (Access::LoggedIn, Some(_)) => None,
        (Access::Organization, Some(UserType::Organization | UserType::Admin)) => None,
        (Access::Organization, Some(_)) => Some(Route::Home),
        (Access::Admin, Some(UserType::Admin)) => None,
        (Access::Admin, Some(_)) => Some(Route::Home),
    }
}

/// Post-login destination from a `redirect` value; only site-relative paths
pub fn redirect_target(redirect: Option<&str>) -> Route {
    let Some(target) = redirect.map(str::trim) else { return Route::Home };
    if !target.starts_with('/') || target.starts_with("//") || target.contains('\\') {
        return Route::Home;
    }
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    match Route::parse(path, query) {
        Route::NotFound | Route::Login { .. } => Route::Home,
        route => route,
    }
}

fn parse_id(segment: &str) -> Option<u64> {
    segment.parse().ok()
}

/// Decoded value of `name` in a raw query string
pub fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode_str(&value.replace('+', " ")).decode_utf8_lossy().into_owned())
        .filter(|value| !value.is_empty())
}

fn with_query(path: &str, pairs: &[(&str, &Option<String>)]) -> String {
    let owned: Vec<(&str, Option<String>)> = pairs.iter().map(|(k, v)| (*k, (*v).clone())).collect();
    format!("{}{}", path, crate::api::query_string(&owned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthUser;

    fn session(user_type: UserType) -> AuthSession {
        AuthSession {
            token: "t".to_string(),
            user: AuthUser {
                user_id: 1,
                email: "u@example.com".to_string(),
                user_name: "사용자".to_string(),
                user_type,
                phone: None,
                profile_image_url: None,
            },
        }
    }

    #[test]
    fn test_parse_and_to_path_agree() {
        let routes = vec![
            Route::Home,
            Route::Login { redirect: None },
            Route::Login { redirect: Some("/projects/3".to_string()) },
            Route::Signup,
            Route::Projects,
            Route::ProjectCreate,
            Route::ProjectDetail(42),
            Route::Community,
            Route::CommunityWrite,
            Route::CommunityPost(7),
            Route::CommunityEdit(7),
            Route::Profile,
            Route::Donations,
            Route::Favorites,
            Route::PiggyBank,
            Route::Notifications,
            Route::PaymentSuccess { pg_token: Some("pg 1".to_string()), order_id: Some("ORD-9".to_string()) },
            Route::PaymentCancel { order_id: Some("ORD-9".to_string()) },
            Route::PaymentFail { order_id: None },
            Route::AdminDashboard,
            Route::AdminUsers,
            Route::AdminOrganizations,
            Route::AdminProjects,
            Route::AdminSettlements,
            Route::AdminDiagnostics,
        ];
        for route in routes {
            let full = route.to_path();
            let (path, query) = full.split_once('?').unwrap_or((full.as_str(), ""));
            assert_eq!(Route::parse(path, query), route, "{}", full);
        }
    }

    #[test]
    fn test_parse_aliases_and_unknown() {
        assert_eq!(Route::parse("/admin", ""), Route::AdminDashboard);
        assert_eq!(Route::parse("/projects/", ""), Route::Projects);
        assert_eq!(
            Route::parse("/payment/access", "?pg_token=abc&orderId=1"),
            Route::PaymentSuccess { pg_token: Some("abc".to_string()), order_id: Some("1".to_string()) }
        );
        assert_eq!(Route::parse("/projects/abc", ""), Route::NotFound);
        assert_eq!(Route::parse("/nowhere", ""), Route::NotFound);
    }

    #[test]
    fn test_layouts() {
        assert_eq!(Route::Home.layout(), Layout::Main);
        assert_eq!(Route::Notifications.layout(), Layout::Main);
        assert_eq!(Route::Signup.layout(), Layout::Auth);
        assert_eq!(Route::PaymentFail { order_id: None }.layout(), Layout::Bare);
        assert_eq!(Route::AdminUsers.layout(), Layout::Admin);
        assert_eq!(Route::AdminOrganizations.layout(), Layout::Admin);
    }

    #[test]
    fn test_guard_redirects_guests_with_encoded_path() {
        assert_eq!(
            guard(&Route::Profile, None),
            Some(Route::Login { redirect: Some("/profile".to_string()) })
        );
        assert_eq!(
            Route::Login { redirect: Some("/community/edit/3".to_string()) }.to_path(),
            "/login?redirect=%2Fcommunity%2Fedit%2F3"
        );
        assert_eq!(guard(&Route::Projects, None), None);
        assert_eq!(guard(&Route::Login { redirect: None }, None), None);
    }

    #[test]
    fn test_guard_roles() {
        let individual = session(UserType::Individual);
        let org = session(UserType::Organization);
        let admin = session(UserType::Admin);

        assert_eq!(guard(&Route::AdminDashboard, Some(&individual)), Some(Route::Home));
        assert_eq!(guard(&Route::AdminSettlements, Some(&org)), Some(Route::Home));
        assert_eq!(guard(&Route::AdminSettlements, Some(&admin)), None);
        assert_eq!(guard(&Route::AdminOrganizations, Some(&org)), Some(Route::Home));
        assert_eq!(
            guard(&Route::AdminUsers, None),
            Some(Route::Login { redirect: Some("/admin/users".to_string()) })
        );

        assert_eq!(guard(&Route::ProjectCreate, Some(&individual)), Some(Route::Home));
        assert_eq!(guard(&Route::ProjectCreate, Some(&org)), None);
        assert_eq!(guard(&Route::ProjectCreate, Some(&admin)), None);

        assert_eq!(guard(&Route::Signup, Some(&individual)), Some(Route::Home));
    }

    #[test]
    fn test_redirect_target_only_relative() {
        assert_eq!(redirect_target(Some("/projects/5")), Route::ProjectDetail(5));
        assert_eq!(redirect_target(None), Route::Home);
        assert_eq!(redirect_target(Some("https://evil.example")), Route::Home);
        assert_eq!(redirect_target(Some("//evil.example/x")), Route::Home);
        assert_eq!(redirect_target(Some("/login?redirect=/profile")), Route::Home);
        assert_eq!(redirect_target(Some("/no/such/page")), Route::Home);
    }

    #[test]
    fn test_query_param_decoding() {
        assert_eq!(query_param("?redirect=%2Fprofile", "redirect").as_deref(), Some("/profile"));
        assert_eq!(query_param("a=1&b=x+y", "b").as_deref(), Some("x y"));
        assert_eq!(query_param("a=", "a"), None);
        assert_eq!(query_param("", "a"), None);
    }
}
