use contracts::domain::course::enrollment::EnrolledCourse;
use leptos::prelude::*;
use thaw::*;

use crate::domain::course::api;
use crate::shared::components::error_banner::{EmptyState, ErrorBanner};
use crate::shared::components::spinner::PageSpinner;
use crate::shared::date_utils::{format_date, format_optional_date};
use crate::shared::load_state::{LoadState, RequestGuard};

#[component]
fn EnrolledRow(item: EnrolledCourse) -> impl IntoView {
    let href = format!("/dashboard/my-courses/{}", item.course.id);
    let enrolled = item
        .enrolled_on()
        .map(|d| format_date(&d.to_string()))
        .unwrap_or_else(|| format_optional_date(item.enrolled_at.as_deref()));
    let completed = item.is_completed();
    let status = if completed { "Completed" } else { "In progress" };
    let badge_color = if completed { BadgeColor::Success } else { BadgeColor::Informative };
    let progress = item.progress;

    view! {
        <li class="enrolled-row">
            <a class="enrolled-row__title" href=href>{item.title}</a>
            <span class="enrolled-row__teacher">{item.teacher_name}</span>
            <ProgressBar value={progress / 100.0} />
            <span class="enrolled-row__progress">{format!("{:.0}%", progress)}</span>
            <span class="text-muted">"Enrolled " {enrolled}</span>
            <Badge appearance=BadgeAppearance::Tint color=badge_color>
                {status}
            </Badge>
        </li>
    }
}

/// The student's enrollments with progress. `limit` trims the list for the
/// dashboard preview.
#[component]
pub fn EnrolledCourseList(#[prop(optional)] limit: Option<usize>) -> impl IntoView {
    let items = RwSignal::new(LoadState::<Vec<EnrolledCourse>>::Loading);
    let loads = RequestGuard::new();
    let reload = move || loads.load(items, api::fetch_enrolled_courses());
    reload();
    let retry = Callback::new(move |_: ()| reload());

    move || match items.get() {
        LoadState::Loading => view! { <PageSpinner label="Loading your courses..." /> }.into_any(),
        LoadState::Failed(message) => view! {
            <ErrorBanner
                title="Couldn't load your courses"
                message=Signal::derive(move || message.clone())
                on_retry=retry
            />
        }.into_any(),
        LoadState::Ready(list) if list.is_empty() => view! {
            <EmptyState title="You are not enrolled in any course yet" hint="Browse the catalogue to get started.">
                <a class="button button--primary" href="/courses">"Browse courses"</a>
            </EmptyState>
        }.into_any(),
        LoadState::Ready(list) => {
            let shown = limit.unwrap_or(list.len());
            view! {
                <ul class="enrolled-list">
                    {list
                        .into_iter()
                        .take(shown)
                        .map(|item| view! { <EnrolledRow item=item /> })
                        .collect_view()}
                </ul>
            }.into_any()
        }
    }
}

/// `/dashboard/my-courses`
#[component]
pub fn MyCoursesPage() -> impl IntoView {
    view! {
        <div class="page">
            <div class="page__header">
                <h1>"My Courses"</h1>
            </div>
            <EnrolledCourseList />
        </div>
    }
}
