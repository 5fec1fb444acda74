use contracts::domain::course::catalog::featured;
use contracts::domain::course::Course;
use leptos::prelude::*;

use crate::domain::course::api;
use crate::shared::components::course_card::CourseCard;
use crate::shared::components::error_banner::{EmptyState, ErrorBanner};
use crate::shared::components::spinner::PageSpinner;
use crate::shared::load_state::{LoadState, RequestGuard};

/// Top rated courses strip on the student dashboard.
#[component]
pub fn FeaturedCourses() -> impl IntoView {
    let courses = RwSignal::new(LoadState::<Vec<Course>>::Loading);
    let loads = RequestGuard::new();
    let reload = move || loads.load(courses, async { api::fetch_courses().await.map(|all| featured(&all)) });
    reload();
    let retry = Callback::new(move |_: ()| reload());

    view! {
        <section class="featured">
            <h2>"Top rated courses"</h2>
            {move || match courses.get() {
                LoadState::Loading => view! { <PageSpinner /> }.into_any(),
                LoadState::Failed(message) => view! {
                    <ErrorBanner
                        title="Couldn't load courses"
                        message=Signal::derive(move || message.clone())
                        on_retry=retry
                    />
                }.into_any(),
                LoadState::Ready(list) if list.is_empty() => view! {
                    <EmptyState title="No courses available yet" />
                }.into_any(),
                LoadState::Ready(list) => view! {
                    <div class="course-strip">
                        {list.into_iter().map(|course| view! { <CourseCard course=course /> }).collect_view()}
                    </div>
                }.into_any(),
            }}
        </section>
    }
}
