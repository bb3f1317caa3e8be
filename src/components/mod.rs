//! UI Components
//!
//! Reusable Leptos components.

mod common;
mod delete_confirm_button;
mod donation_modal;
mod layout;
mod notification_dropdown;
mod project_card;
mod settlement_modal;

pub use common::{selected_files, EmptyState, ErrorBanner, Loading, NavLink, Pagination};
pub use delete_confirm_button::DeleteConfirmButton;
pub use donation_modal::DonationModal;
pub use layout::{AdminLayout, AuthLayout, MainLayout};
pub use notification_dropdown::{link_route, NotificationDropdown, NOTIFICATION_KEYS};
pub use project_card::{ProgressBar, ProjectCard};
pub use settlement_modal::{SettlementModal, SETTLEMENT_KEYS};
