//! Student view of an enrolled course: lessons, progress and local notes.

use contracts::domain::course::lesson::{resume_lesson, CourseProgress, Lesson};
use contracts::domain::course::Course;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use thaw::*;

use crate::domain::course::{api, notes};
use crate::shared::components::error_banner::{EmptyState, ErrorBanner};
use crate::shared::components::spinner::PageSpinner;
use crate::shared::date_utils::format_date;
use crate::shared::load_state::{LoadState, RequestGuard};

#[derive(Clone, Debug, PartialEq)]
struct Learning {
    course: Course,
    lessons: Vec<Lesson>,
}

async fn load_learning(id: i64) -> Result<(Learning, CourseProgress), String> {
    let course = api::fetch_course(id).await?;
    let lessons = api::fetch_lessons(id).await?;
    let progress = api::fetch_course_progress(id).await?;
    Ok((Learning { course, lessons }, progress))
}

#[component]
fn LessonBody(lesson: Lesson) -> impl IntoView {
    let video = lesson.video_url.clone().filter(|u| !u.trim().is_empty());
    let scheduled = lesson.scheduled_at.clone();
    view! {
        <div class="lesson-body">
            <h2>{lesson.display_title().to_string()}</h2>
            <Flex gap=FlexGap::Small>
                <Badge appearance=BadgeAppearance::Outline>{lesson.lesson_type.label()}</Badge>
                {lesson.duration_minutes.map(|m| view! { <span class="text-muted">{format!("{} min", m)}</span> })}
            </Flex>
            <p>{lesson.description.clone()}</p>
            {video.map(|url| view! {
                <a class="button" href=url target="_blank" rel="noopener">"Open video"</a>
            })}
            {scheduled.map(|at| view! {
                <p class="text-muted">"Scheduled for " {format_date(&at)}</p>
            })}
            {lesson.content.clone().map(|c| view! { <div class="lesson-body__content">{c}</div> })}
        </div>
    }
}

/// `/dashboard/my-courses/:id`
#[component]
pub fn StudentCoursePage() -> impl IntoView {
    let params = use_params_map();
    let learning = RwSignal::new(LoadState::<Learning>::Loading);
    let progress = RwSignal::new(CourseProgress::default());
    let active = RwSignal::new(Option::<i64>::None);
    let note_text = RwSignal::new(String::new());
    let notice = RwSignal::new(Option::<String>::None);
    let action_error = RwSignal::new(Option::<String>::None);
    let marking = RwSignal::new(false);
    let loads = RequestGuard::new();

    let course_id = Memo::new(move |_| params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok())));

    let reload = move || {
        let Some(id) = course_id.get_untracked() else {
            learning.set(LoadState::Failed("Course not found".to_string()));
            return;
        };
        let ticket = loads.begin();
        learning.set(LoadState::Loading);
        spawn_local(async move {
            let result = load_learning(id).await;
            if !loads.is_current(ticket) {
                return;
            }
            match result {
                Ok((data, loaded)) => {
                    active.set(resume_lesson(&data.lessons, &loaded).map(|l| l.id));
                    progress.set(loaded);
                    learning.set(LoadState::Ready(data));
                }
                Err(e) => learning.set(LoadState::Failed(e)),
            }
        });
    };
    Effect::new(move |_| {
        course_id.track();
        reload();
    });
    let retry = Callback::new(move |_: ()| reload());

    // Notes follow the selected lesson
    Effect::new(move |_| {
        let text = match (course_id.get(), active.get()) {
            (Some(course), Some(lesson)) => notes::load_notes(course, lesson),
            _ => String::new(),
        };
        note_text.set(text);
        notice.set(None);
    });

    let mark_complete = move |lesson_id: i64| {
        if marking.get_untracked() {
            return;
        }
        marking.set(true);
        action_error.set(None);
        spawn_local(async move {
            match api::mark_lesson_complete(lesson_id).await {
                Ok(()) => progress.update(|p| p.mark_completed(lesson_id)),
                Err(e) => {
                    log::warn!("marking lesson {} complete failed: {}", lesson_id, e);
                    action_error.set(Some(format!("Failed to mark lesson as complete: {}", e)));
                }
            }
            marking.set(false);
        });
    };

    let save_notes = move |_: leptos::ev::MouseEvent| {
        let (Some(course), Some(lesson)) = (course_id.get_untracked(), active.get_untracked()) else {
            return;
        };
        match notes::save_notes(course, lesson, &note_text.get_untracked()) {
            Ok(()) => notice.set(Some("Notes saved on this device".to_string())),
            Err(e) => {
                log::warn!("{}", e);
                notice.set(Some(e));
            }
        }
    };

    let lesson_item = move |lesson: Lesson| {
        let id = lesson.id;
        let title = lesson.display_title().to_string();
        let done = Signal::derive(move || progress.with(|p| p.is_completed(id)));
        view! {
            <li
                class="lesson-list__item"
                class:lesson-list__item--active=move || active.get() == Some(id)
                on:click=move |_| active.set(Some(id))
            >
                <span>{move || if done.get() { "✓" } else { "○" }}</span>
                <span>{format!("{}. {}", lesson.order, title)}</span>
            </li>
        }
    };

    view! {
        <div class="page">
            {move || match learning.get() {
                LoadState::Loading => view! { <PageSpinner label="Loading course..." /> }.into_any(),
                LoadState::Failed(message) => view! {
                    <ErrorBanner
                        title="Couldn't load this course"
                        message=Signal::derive(move || message.clone())
                        on_retry=retry
                    />
                }.into_any(),
                LoadState::Ready(Learning { course, lessons }) if lessons.is_empty() => view! {
                    <h1>{course.display_title().to_string()}</h1>
                    <EmptyState title="No lessons are available yet" hint="Check back once your teacher publishes them." />
                }.into_any(),
                LoadState::Ready(Learning { course, lessons }) => {
                    let selected = lessons.clone();
                    view! {
                        <div class="page__header">
                            <h1>{course.display_title().to_string()}</h1>
                            <a href="/dashboard/my-courses">"Back to my courses"</a>
                        </div>
                        <Card>
                            <ProgressBar value=Signal::derive(move || progress.with(|p| p.percent()) / 100.0) />
                            <Flex gap=FlexGap::Large>
                                <span>{move || format!("{:.0}% complete", progress.with(|p| p.percent()))}</span>
                                <span>{move || format!("{} completed", progress.with(|p| p.completed_lessons))}</span>
                                <span>{move || format!("{} remaining", progress.with(|p| p.remaining()))}</span>
                            </Flex>
                        </Card>
                        <div class="learn-layout">
                            <ul class="lesson-list">
                                {lessons.into_iter().map(lesson_item).collect_view()}
                            </ul>
                            <section class="learn-layout__main">
                                {move || action_error.get().map(|e| view! {
                                    <div class="alert alert--error" role="alert">{e}</div>
                                })}
                                {move || {
                                    let current = active.get();
                                    selected.iter().find(|l| Some(l.id) == current).cloned().map(|lesson| {
                                        let id = lesson.id;
                                        let done = progress.with(|p| p.is_completed(id));
                                        view! {
                                            <LessonBody lesson=lesson />
                                            {if done {
                                                view! {
                                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Completed"</Badge>
                                                }.into_any()
                                            } else {
                                                view! {
                                                    <Button
                                                        appearance=ButtonAppearance::Primary
                                                        disabled=Signal::derive(move || marking.get())
                                                        on_click=move |_| mark_complete(id)
                                                    >
                                                        "Mark as complete"
                                                    </Button>
                                                }.into_any()
                                            }}
                                        }
                                    })
                                }}
                                <div class="lesson-notes">
                                    <h3>"My notes"</h3>
                                    <Textarea value=note_text placeholder="Take notes about this lesson..." />
                                    <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                                        <span class="text-muted">{move || format!("{} characters", note_text.with(|t| t.chars().count()))}</span>
                                        <Button on_click=save_notes>"Save notes"</Button>
                                    </Flex>
                                    {move || notice.get().map(|n| view! { <p class="text-muted">{n}</p> })}
                                </div>
                            </section>
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}
