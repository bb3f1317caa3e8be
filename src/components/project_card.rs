//! Project Card Component
//!
//! Summary tile used by the home page, the project list and favorites.

use leptos::prelude::*;

use crate::components::NavLink;
use crate::format::{calculate_percentage, category_label, format_won};
use crate::models::{Project, ProjectStatus};
use crate::routes::Route;

/// Funding progress bar with the rate as label
#[component]
pub fn ProgressBar(current: i64, target: i64) -> impl IntoView {
    let percent = calculate_percentage(current, target);
    view! {
        <div class="progress">
            <div class="progress-bar" style=format!("width: {}%", percent)></div>
        </div>
        <span class="progress-label">{format!("{}%", percent)}</span>
    }
}

#[component]
pub fn ProjectCard(project: Project) -> impl IntoView {
    let dday = match project.dday {
        d if d < 0 => "마감".to_string(),
        0 => "D-Day".to_string(),
        d => format!("D-{}", d),
    };
    let pending = project.status != ProjectStatus::Approved;
    let status_label = project.status.label();

    view! {
        <NavLink to=Route::ProjectDetail(project.id) class="project-card">
            <img class="project-card-image" src=project.image.clone() alt=project.title.clone() loading="lazy" />
            <div class="project-card-body">
                <div class="project-card-meta">
                    <span class="badge">{category_label(&project.category).to_string()}</span>
                    <span class="dday">{dday}</span>
                    <Show when=move || pending>
                        <span class="badge muted">{status_label}</span>
                    </Show>
                </div>
                <h3 class="project-card-title">{project.title.clone()}</h3>
                <p class="project-card-org">{project.organization.clone()}</p>
                <ProgressBar current=project.current_amount target=project.target_amount />
                <div class="project-card-footer">
                    <strong>{format_won(project.current_amount)}</strong>
                    <span>{format!("{}명 참여", project.donors)}</span>
                </div>
            </div>
        </NavLink>
    }
}
