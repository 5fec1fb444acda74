pub mod form;
pub mod state;

use contracts::domain::course::lesson::{Lesson, LessonDraft};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use thaw::*;

use self::state::{total_minutes, CourseLessons, CourseLessonsState};
use crate::domain::course::api;
use crate::shared::components::error_banner::{EmptyState, ErrorBanner};
use crate::shared::components::spinner::PageSpinner;
use crate::shared::components::stat_card::StatCard;
use crate::shared::icons::icon;
use crate::shared::load_state::{LoadState, RequestGuard};

const DELETE_CONFIRMATION: &str = "Delete this lesson? Student progress on it will be lost.";

fn confirm_delete() -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(DELETE_CONFIRMATION).ok())
        .unwrap_or(false)
}

async fn load_course_lessons(id: i64) -> Result<CourseLessons, String> {
    let course = api::fetch_course(id).await?;
    let lessons = api::fetch_lessons(id).await?;
    Ok(CourseLessons { course, lessons })
}

/// `/dashboard/teacher/courses/:id/view`
#[component]
pub fn TeacherCourseView() -> impl IntoView {
    let params = use_params_map();
    let state = CourseLessonsState::new();
    let loads = RequestGuard::new();

    let course_id = Memo::new(move |_| params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok())));

    let reload = move || match course_id.get_untracked() {
        Some(id) => loads.load(state.data, load_course_lessons(id)),
        None => state.data.set(LoadState::Failed("Course not found".to_string())),
    };
    Effect::new(move |_| {
        course_id.track();
        reload();
    });
    let retry = Callback::new(move |_: ()| reload());

    let handle_delete = move |id: i64| {
        if state.pending.get_untracked().is_some() || !confirm_delete() {
            return;
        }
        state.pending.set(Some(id));
        state.action_error.set(None);
        spawn_local(async move {
            match api::delete_lesson(id).await {
                Ok(()) => state.remove(id),
                Err(e) => {
                    log::error!("failed to delete lesson {}: {}", id, e);
                    state.action_error.set(Some(format!("Failed to delete lesson: {}", e)));
                }
            }
            state.pending.set(None);
        });
    };

    let handle_publish = move |lesson: Lesson| {
        if state.pending.get_untracked().is_some() {
            return;
        }
        let mut draft = LessonDraft::from_lesson(&lesson);
        draft.is_published = !lesson.is_published;
        let payload = match draft.to_payload() {
            Ok(payload) => payload,
            Err(_) => {
                state.action_error.set(Some(
                    "This lesson is missing required details. Edit it before publishing.".to_string(),
                ));
                return;
            }
        };
        let id = lesson.id;
        state.pending.set(Some(id));
        state.action_error.set(None);
        spawn_local(async move {
            match api::update_lesson(id, &payload).await {
                Ok(updated) => state.replace(updated),
                Err(e) => {
                    log::error!("failed to change visibility of lesson {}: {}", id, e);
                    state.action_error.set(Some(format!("Failed to update lesson: {}", e)));
                }
            }
            state.pending.set(None);
        });
    };

    let row = move |course_id: i64, lesson: Lesson| {
        let id = lesson.id;
        let published = lesson.is_published;
        let busy = Signal::derive(move || state.pending.get() == Some(id));
        let minutes = lesson
            .duration_minutes
            .map(|m| format!("{} min", m))
            .unwrap_or_else(|| "—".to_string());
        let title = lesson.display_title().to_string();
        let kind = lesson.lesson_type.label();
        let order = lesson.order;
        view! {
            <tr>
                <td>{order}</td>
                <td>{title}</td>
                <td>{kind}</td>
                <td>{minutes}</td>
                <td>
                    <Badge
                        appearance=BadgeAppearance::Tint
                        color={if published { BadgeColor::Success } else { BadgeColor::Warning }}
                    >
                        {if published { "Published" } else { "Hidden" }}
                    </Badge>
                </td>
                <td>
                    <Flex gap=FlexGap::Small>
                        <a
                            class="button"
                            href=format!("/dashboard/teacher/courses/{}/lessons/{}/edit", course_id, id)
                        >
                            "Edit"
                        </a>
                        <Button disabled=busy on_click=move |_| handle_publish(lesson.clone())>
                            {if published { "Hide" } else { "Publish" }}
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
            {move || state.action_error.get().map(|e| view! {
                <div class="alert alert--error" role="alert">{e}</div>
            })}

            {move || match state.data.get() {
                LoadState::Loading => view! { <PageSpinner label="Loading course..." /> }.into_any(),
                LoadState::Failed(message) => view! {
                    <ErrorBanner
                        title="Couldn't load this course"
                        message=Signal::derive(move || message.clone())
                        on_retry=retry
                    />
                }.into_any(),
                LoadState::Ready(CourseLessons { course, lessons }) => {
                    let id = course.id;
                    let new_lesson = format!("/dashboard/teacher/courses/{}/lessons/new", id);
                    let published = lessons.iter().filter(|l| l.is_published).count() as u64;
                    let minutes = total_minutes(&lessons);
                    let lesson_count = lessons.len() as u64;
                    let new_lesson_empty = new_lesson.clone();
                    view! {
                        <div class="page__header">
                            <div>
                                <h1>{course.display_title().to_string()}</h1>
                                <Badge appearance=BadgeAppearance::Outline>{course.status.as_str()}</Badge>
                            </div>
                            <Flex gap=FlexGap::Small>
                                <a class="button" href=format!("/dashboard/teacher/courses/{}/edit", id)>"Edit course"</a>
                                <a class="button button--primary" href=new_lesson.clone()>
                                    {icon("plus")} " Add lesson"
                                </a>
                            </Flex>
                        </div>
                        <Flex gap=FlexGap::Medium>
                            <StatCard label="Lessons" icon_name="courses" value=lesson_count />
                            <StatCard label="Published" icon_name="dashboard" value=published />
                            <StatCard label="Minutes" icon_name="clock" value=minutes />
                            <StatCard
                                label="Students"
                                icon_name="users"
                                value=u64::from(course.current_students.unwrap_or(0))
                            />
                        </Flex>
                        {if lessons.is_empty() {
                            view! {
                                <EmptyState title="This course has no lessons yet">
                                    <a class="button button--primary" href=new_lesson_empty>"Add the first lesson"</a>
                                </EmptyState>
                            }.into_any()
                        } else {
                            view! {
                                <table class="table">
                                    <thead>
                                        <tr>
                                            <th>"#"</th>
                                            <th>"Title"</th>
                                            <th>"Type"</th>
                                            <th>"Duration"</th>
                                            <th>"Status"</th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {lessons.into_iter().map(|l| row(id, l)).collect_view()}
                                    </tbody>
                                </table>
                            }.into_any()
                        }}
                    }.into_any()
                }
            }}
            <a href="/dashboard/teacher/courses">"Back to my courses"</a>
        </div>
    }
}
