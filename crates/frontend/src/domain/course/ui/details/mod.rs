use contracts::domain::course::Course;
use contracts::system::auth::UserRole;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use thaw::*;

use crate::domain::course::api;
use crate::domain::course::ui::reviews::CourseReviews;
use crate::shared::api_utils::media_url;
use crate::shared::components::course_card::{RatingStars, DEFAULT_THUMBNAIL};
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::spinner::PageSpinner;
use crate::shared::load_state::{LoadState, RequestGuard};
use crate::system::auth::context::use_auth;

/// Sign-in link that brings the user back to this course afterwards.
fn login_link(course_id: i64) -> String {
    let back = format!("/courses/{}", course_id);
    format!("/login?next={}", urlencoding::encode(&back))
}

#[component]
pub fn CourseDetails() -> impl IntoView {
    let params = use_params_map();
    let session = use_auth();
    let course = RwSignal::new(LoadState::<Course>::Loading);
    let action_error = RwSignal::new(Option::<String>::None);
    let working = RwSignal::new(false);
    let loads = RequestGuard::new();

    let course_id = Memo::new(move |_| params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok())));

    let reload = move || match course_id.get_untracked() {
        Some(id) => loads.load(course, api::fetch_course(id)),
        None => course.set(LoadState::Failed("Course not found".to_string())),
    };

    Effect::new(move |_| {
        course_id.track();
        reload();
    });

    // Enroll or leave, then refetch so counts and flags come from the server
    let toggle_enrollment = move |enrolled: bool| {
        let Some(id) = course_id.get_untracked() else {
            return;
        };
        working.set(true);
        action_error.set(None);
        spawn_local(async move {
            let result = if enrolled { api::unenroll(id).await } else { api::enroll(id).await };
            match result {
                Ok(()) => reload(),
                Err(e) => {
                    log::warn!("enrollment change for course {} failed: {}", id, e);
                    action_error.set(Some(e));
                }
            }
            working.set(false);
        });
    };

    let retry = Callback::new(move |_: ()| reload());

    let enrollment_action = move |c: &Course| {
        let id = c.id;
        let enrolled = c.is_enrolled;
        session.with(|s| match s.role() {
            _ if !s.is_authenticated() => view! {
                <a class="button button--primary" href=login_link(id)>"Sign in to enroll"</a>
            }
            .into_any(),
            UserRole::Student => view! {
                <Button
                    appearance={if enrolled { ButtonAppearance::Secondary } else { ButtonAppearance::Primary }}
                    disabled=Signal::derive(move || working.get())
                    on_click=move |_| toggle_enrollment(enrolled)
                >
                    {if enrolled { "Leave course" } else { "Enroll now" }}
                </Button>
            }
            .into_any(),
            _ => ().into_any(),
        })
    };

    view! {
        <div class="page">
            {move || match course.get() {
                LoadState::Loading => view! { <PageSpinner label="Loading course..." /> }.into_any(),
                LoadState::Failed(message) => view! {
                    <ErrorBanner
                        title="Couldn't load this course"
                        message=Signal::derive(move || message.clone())
                        on_retry=retry
                    />
                }.into_any(),
                LoadState::Ready(c) => {
                    let thumbnail = media_url(c.thumbnail.as_deref())
                        .unwrap_or_else(|| DEFAULT_THUMBNAIL.to_string());
                    let action = enrollment_action(&c);
                    let enrolled = c.is_enrolled;
                    let can_review = Signal::derive(move || enrolled && session.with(|s| s.is_student()));
                    let user_id = Signal::derive(move || session.with(|s| s.user().map(|u| u.id)));
                    let badges = c.clone();
                    view! {
                        <article class="course-details">
                            <img class="course-details__thumb" src=thumbnail alt=c.display_title().to_string() />
                            <h1>{c.display_title().to_string()}</h1>
                            <Flex gap=FlexGap::Small>
                                {badges.level().map(|l| view! {
                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>{l.label()}</Badge>
                                })}
                                {badges.category_name.clone().map(|name| view! {
                                    <Badge appearance=BadgeAppearance::Outline>{name}</Badge>
                                })}
                                {badges.is_enrolled.then(|| view! {
                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Enrolled"</Badge>
                                })}
                            </Flex>
                            <RatingStars rating=c.rating_value() />
                            {c.display_teacher().map(|t| view! { <p class="course-details__teacher">"By " {t.to_string()}</p> })}
                            <p class="course-details__description">{c.description.clone().unwrap_or_default()}</p>
                            <dl class="course-details__facts">
                                <dt>"Price"</dt><dd>{c.price_label()}</dd>
                                <dt>"Duration"</dt>
                                <dd>{c.duration_weeks.map(|w| format!("{} weeks", w)).unwrap_or_else(|| "—".to_string())}</dd>
                                <dt>"Students"</dt>
                                <dd>{format!(
                                    "{} / {}",
                                    c.current_students.unwrap_or(0),
                                    c.max_students.map(|m| m.to_string()).unwrap_or_else(|| "—".to_string())
                                )}</dd>
                            </dl>
                            {move || action_error.get().map(|e| view! {
                                <div class="alert alert--error" role="alert">{e}</div>
                            })}
                            <Flex gap=FlexGap::Small>
                                {action}
                                {enrolled.then(|| view! {
                                    <a class="button" href=format!("/dashboard/my-courses/{}", c.id)>"Continue learning"</a>
                                })}
                            </Flex>
                            <CourseReviews course_id=c.id can_review=can_review user_id=user_id />
                        </article>
                    }.into_any()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_link_round_trips_course_path() {
        assert_eq!(login_link(12), "/login?next=%2Fcourses%2F12");
    }
}
