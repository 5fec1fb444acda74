pub mod state;

use contracts::domain::course::catalog::{browse, CourseSort};
use contracts::domain::course::DifficultyLevel;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;
use thaw::*;

use self::state::{CatalogState, ALL};
use crate::domain::course::api;
use crate::shared::components::course_card::CourseCard;
use crate::shared::components::error_banner::{EmptyState, ErrorBanner};
use crate::shared::components::spinner::PageSpinner;
use crate::shared::load_state::{LoadState, RequestGuard};

const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Public course catalogue at `/courses`.
#[component]
pub fn CourseCatalog() -> impl IntoView {
    let query = use_query_map();
    let initial_search = query.with_untracked(|q| q.get("search")).unwrap_or_default();
    let state = CatalogState::new(initial_search);

    let loads = RequestGuard::new();
    let reload = move || loads.load(state.courses, api::fetch_courses());
    reload();

    spawn_local(async move {
        match api::fetch_categories().await {
            Ok(categories) => {
                let _ = state.categories.try_set(categories);
            }
            Err(e) => log::warn!("categories unavailable: {}", e),
        }
    });

    // Debounce typing into the applied search term
    let typing = RequestGuard::new();
    Effect::new(move |prev: Option<String>| {
        let input = state.search_input.get();
        if prev.is_some() {
            let ticket = typing.begin();
            let value = input.clone();
            spawn_local(async move {
                TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
                if typing.is_current(ticket) {
                    state.search.set(value);
                }
            });
        }
        input
    });

    let visible = Memo::new(move |_| {
        let filter = state.filter();
        let sort = state.sort_order();
        state.courses.with(|s| s.ready().map(|courses| browse(courses, &filter, sort)))
    });

    let retry = Callback::new(move |_: ()| reload());

    view! {
        <div class="page">
            <div class="page__header">
                <h1>"Explore Courses"</h1>
                <p class="text-muted">"Find the right course and start learning today"</p>
            </div>

            <Flex gap=FlexGap::Medium class="filter-bar">
                <Input value=state.search_input placeholder="Search by title or teacher" />
                <Select value=state.level>
                    <option value=ALL>"All levels"</option>
                    {DifficultyLevel::ALL
                        .into_iter()
                        .map(|l| view! { <option value=l.as_str()>{l.label()}</option> })
                        .collect_view()}
                </Select>
                <Select value=state.category>
                    <option value=ALL>"All categories"</option>
                    <For
                        each=move || state.categories.get()
                        key=|c| c.id
                        children=|c| view! { <option value=c.id.to_string()>{c.name}</option> }
                    />
                </Select>
                <Select value=state.sort>
                    {CourseSort::ALL
                        .into_iter()
                        .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                        .collect_view()}
                </Select>
            </Flex>

            {move || match state.courses.get() {
                LoadState::Loading => view! { <PageSpinner label="Loading courses..." /> }.into_any(),
                LoadState::Failed(message) => view! {
                    <ErrorBanner
                        title="Couldn't load courses"
                        message=Signal::derive(move || message.clone())
                        on_retry=retry
                    />
                }.into_any(),
                LoadState::Ready(_) => {
                    let courses = visible.get().unwrap_or_default();
                    if courses.is_empty() {
                        view! {
                            <EmptyState title="No courses found" hint="Try a different search or clear the filters.">
                                <Button on_click=move |_| state.reset()>"Clear filters"</Button>
                            </EmptyState>
                        }.into_any()
                    } else {
                        view! {
                            <p class="text-muted">{format!("{} courses", courses.len())}</p>
                            <div class="course-grid">
                                {courses
                                    .into_iter()
                                    .map(|course| view! { <CourseCard course=course /> })
                                    .collect_view()}
                            </div>
                        }.into_any()
                    }
                }
            }}
        </div>
    }
}
