pub mod state;

use contracts::domain::course::{Course, CourseStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::state::TeacherCoursesState;
use crate::domain::course::api;
use crate::shared::components::course_card::RatingStars;
use crate::shared::components::error_banner::{EmptyState, ErrorBanner};
use crate::shared::components::spinner::PageSpinner;
use crate::shared::icons::icon;
use crate::shared::load_state::{LoadState, RequestGuard};

const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this course? This action cannot be undone.";

fn confirm_delete() -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(DELETE_CONFIRMATION).ok())
        .unwrap_or(false)
}

/// `/dashboard/teacher/courses`
#[component]
pub fn TeacherCourseList() -> impl IntoView {
    let state = TeacherCoursesState::new();
    let loads = RequestGuard::new();
    let reload = move || loads.load(state.courses, api::fetch_teacher_courses());
    reload();
    let retry = Callback::new(move |_: ()| reload());

    let handle_delete = move |id: i64| {
        if state.pending.get_untracked().is_some() || !confirm_delete() {
            return;
        }
        state.pending.set(Some(id));
        state.action_error.set(None);
        spawn_local(async move {
            match api::delete_course(id).await {
                Ok(()) => state.remove(id),
                Err(e) => {
                    log::error!("failed to delete course {}: {}", id, e);
                    state.action_error.set(Some(format!("Failed to delete course: {}", e)));
                }
            }
            state.pending.set(None);
        });
    };

    let handle_toggle = move |id: i64, current: CourseStatus| {
        if state.pending.get_untracked().is_some() {
            return;
        }
        let next = current.toggled();
        state.pending.set(Some(id));
        state.action_error.set(None);
        spawn_local(async move {
            match api::set_course_status(id, next).await {
                Ok(_) => state.set_status(id, next),
                Err(e) => {
                    log::error!("failed to change visibility of course {}: {}", id, e);
                    state
                        .action_error
                        .set(Some(format!("Failed to update course visibility: {}", e)));
                }
            }
            state.pending.set(None);
        });
    };

    let row = move |course: Course| {
        let id = course.id;
        let published = course.is_published();
        let status = course.status;
        let busy = Signal::derive(move || state.pending.get() == Some(id));
        view! {
            <tr>
                <td><a href=format!("/courses/{}", id)>{course.display_title().to_string()}</a></td>
                <td>{course.category_name.clone().unwrap_or_else(|| "—".to_string())}</td>
                <td>{course.current_students.unwrap_or(0)}</td>
                <td><RatingStars rating=course.rating_value() /></td>
                <td>{course.price_label()}</td>
                <td>
                    <Badge
                        appearance=BadgeAppearance::Tint
                        color={if published { BadgeColor::Success } else { BadgeColor::Warning }}
                    >
                        {if published { "Published" } else { "Draft" }}
                    </Badge>
                </td>
                <td>
                    <Flex gap=FlexGap::Small>
                        <a class="button" href=format!("/dashboard/teacher/courses/{}/view", id)>"Lessons"</a>
                        <a class="button" href=format!("/dashboard/teacher/courses/{}/edit", id)>"Edit"</a>
                        <Button
                            disabled=busy
                            on_click=move |_| handle_toggle(id, status)
                        >
                            {if published { "Unpublish" } else { "Publish" }}
                        </Button>
                        <Button disabled=busy on_click=move |_| handle_delete(id)>
                            {move || if busy.get() { "Working..." } else { "Delete" }}
                        </Button>
                    </Flex>
                </td>
            </tr>
        }
    };

    view! {
        <div class="page">
            <div class="page__header">
                <h1>"My Courses"</h1>
                <a class="button button--primary" href="/dashboard/teacher/courses/new">
                    {icon("plus")} " Create course"
                </a>
            </div>

            {move || state.action_error.get().map(|e| view! {
                <div class="alert alert--error" role="alert">{e}</div>
            })}

            {move || match state.courses.get() {
                LoadState::Loading => view! { <PageSpinner label="Loading your courses..." /> }.into_any(),
                LoadState::Failed(message) => view! {
                    <ErrorBanner
                        title="Couldn't load your courses"
                        message=Signal::derive(move || message.clone())
                        on_retry=retry
                    />
                }.into_any(),
                LoadState::Ready(list) if list.is_empty() => view! {
                    <EmptyState title="You haven't created any courses yet">
                        <a class="button button--primary" href="/dashboard/teacher/courses/new">"Create your first course"</a>
                    </EmptyState>
                }.into_any(),
                LoadState::Ready(list) => view! {
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Title"</th>
                                <th>"Category"</th>
                                <th>"Students"</th>
                                <th>"Rating"</th>
                                <th>"Price"</th>
                                <th>"Status"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {list.into_iter().map(row).collect_view()}
                        </tbody>
                    </table>
                }.into_any(),
            }}
        </div>
    }
}
