use contracts::domain::course::Course;
use contracts::system::auth::UserRole;
use leptos::prelude::*;
use thaw::*;

use crate::domain::course::api;
use crate::domain::course::ui::featured::FeaturedCourses;
use crate::domain::course::ui::my_courses::EnrolledCourseList;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::spinner::PageSpinner;
use crate::shared::components::stat_card::StatCard;
use crate::shared::load_state::{LoadState, RequestGuard};
use crate::system::auth::context::use_auth;

const ENROLLED_PREVIEW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct TeachingSummary {
    total: usize,
    published: usize,
    students: u64,
}

fn summarize(courses: &[Course]) -> TeachingSummary {
    TeachingSummary {
        total: courses.len(),
        published: courses.iter().filter(|c| c.is_published()).count(),
        students: courses.iter().filter_map(|c| c.current_students).map(u64::from).sum(),
    }
}

#[component]
fn TeacherOverview() -> impl IntoView {
    let summary = RwSignal::new(LoadState::<TeachingSummary>::Loading);
    let loads = RequestGuard::new();
    let reload = move || {
        loads.load(summary, async {
            api::fetch_teacher_courses().await.map(|courses| summarize(&courses))
        })
    };
    reload();
    let retry = Callback::new(move |_: ()| reload());

    view! {
        <section>
            <div class="page__header">
                <h2>"Your teaching"</h2>
                <a class="button button--primary" href="/dashboard/teacher/courses/new">"Create course"</a>
            </div>
            {move || match summary.get() {
                LoadState::Loading => view! { <PageSpinner /> }.into_any(),
                LoadState::Failed(message) => view! {
                    <ErrorBanner
                        title="Couldn't load your courses"
                        message=Signal::derive(move || message.clone())
                        on_retry=retry
                    />
                }.into_any(),
                LoadState::Ready(s) => view! {
                    <Flex gap=FlexGap::Medium>
                        <StatCard label="Courses" icon_name="courses" value={s.total as u64} />
                        <StatCard label="Published" icon_name="dashboard" value={s.published as u64} />
                        <StatCard label="Students" icon_name="users" value=s.students />
                    </Flex>
                    <a href="/dashboard/teacher/courses">"Manage your courses"</a>
                }.into_any(),
            }}
        </section>
    }
}

#[component]
fn StudentOverview() -> impl IntoView {
    view! {
        <section>
            <div class="page__header">
                <h2>"Continue learning"</h2>
                <a href="/dashboard/my-courses">"View all"</a>
            </div>
            <EnrolledCourseList limit=ENROLLED_PREVIEW />
        </section>
        <FeaturedCourses />
    }
}

/// `/dashboard`: overview for whichever kind of account is signed in.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_auth();
    let greeting = move || {
        session.with(|s| {
            s.user()
                .map(|u| format!("Welcome back, {}!", u.display_name()))
                .unwrap_or_else(|| "Welcome back!".to_string())
        })
    };
    let role = Memo::new(move |_| session.with(|s| s.role()));

    view! {
        <div class="page">
            <h1>{greeting}</h1>
            {move || match role.get() {
                UserRole::Teacher => view! { <TeacherOverview /> }.into_any(),
                UserRole::Student => view! { <StudentOverview /> }.into_any(),
                UserRole::None => view! {
                    <p class="text-muted">"Your account has no role yet. Browse the catalogue in the meantime."</p>
                    <a class="button button--primary" href="/courses">"Browse courses"</a>
                }.into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize() {
        let courses: Vec<Course> = serde_json::from_value(serde_json::json!([
            { "id": 1, "status": "published", "current_students": 12 },
            { "id": 2, "status": "draft", "current_students": 3 },
            { "id": 3, "status": "published" }
        ]))
        .unwrap();
        assert_eq!(
            summarize(&courses),
            TeachingSummary { total: 3, published: 2, students: 15 }
        );
        assert_eq!(summarize(&[]), TeachingSummary::default());
    }

    #[test]
    fn test_summarize_student_total_exceeds_u32() {
        let courses: Vec<Course> = serde_json::from_value(serde_json::json!([
            { "id": 1, "status": "published", "current_students": 4294967295u32 },
            { "id": 2, "status": "published", "current_students": 4294967295u32 }
        ]))
        .unwrap();
        assert_eq!(summarize(&courses).students, 8_589_934_590);
    }
}
