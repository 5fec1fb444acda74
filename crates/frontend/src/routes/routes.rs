use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Route, Router, Routes};
use leptos_router::path;

use crate::domain::course::ui::catalog::CourseCatalog;
use crate::domain::course::ui::details::CourseDetails;
use crate::domain::course::ui::form::CourseForm;
use crate::domain::course::ui::learn::StudentCoursePage;
use crate::domain::course::ui::lessons::form::LessonForm;
use crate::domain::course::ui::lessons::TeacherCourseView;
use crate::domain::course::ui::my_courses::MyCoursesPage;
use crate::domain::course::ui::teacher_list::TeacherCourseList;
use crate::layout::{DashboardShell, Shell};
use crate::pages::dashboard::DashboardPage;
use crate::pages::landing::LandingPage;
use crate::shared::components::error_banner::EmptyState;
use crate::system::auth::guard::{PrivateRoute, StudentRoute, TeacherRoute};
use crate::system::pages::login::LoginPage;
use crate::system::pages::profile::ProfilePage;
use crate::system::pages::register::RegisterPage;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <EmptyState title="Page not found" hint="The page you are looking for does not exist.">
            <a class="button button--primary" href="/">"Back to home"</a>
        </EmptyState>
    }
}

/// Signed-in area; the shell only renders once the session is confirmed.
#[component]
fn ProtectedShell() -> impl IntoView {
    view! {
        <PrivateRoute>
            <DashboardShell />
        </PrivateRoute>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound /> }>
                <ParentRoute path=path!("/dashboard") view=ProtectedShell>
                    <Route path=path!("") view=DashboardPage />
                    <Route
                        path=path!("my-courses")
                        view=|| view! { <StudentRoute><MyCoursesPage /></StudentRoute> }
                    />
                    <Route
                        path=path!("my-courses/:id")
                        view=|| view! { <StudentRoute><StudentCoursePage /></StudentRoute> }
                    />
                    <Route path=path!("profile") view=ProfilePage />
                    <Route
                        path=path!("teacher/courses")
                        view=|| view! { <TeacherRoute><TeacherCourseList /></TeacherRoute> }
                    />
                    <Route
                        path=path!("teacher/courses/new")
                        view=|| view! { <TeacherRoute><CourseForm /></TeacherRoute> }
                    />
                    <Route
                        path=path!("teacher/courses/:id/edit")
                        view=|| view! { <TeacherRoute><CourseForm /></TeacherRoute> }
                    />
                    <Route
                        path=path!("teacher/courses/:id/view")
                        view=|| view! { <TeacherRoute><TeacherCourseView /></TeacherRoute> }
                    />
                    <Route
                        path=path!("teacher/courses/:course_id/lessons/new")
                        view=|| view! { <TeacherRoute><LessonForm /></TeacherRoute> }
                    />
                    <Route
                        path=path!("teacher/courses/:course_id/lessons/:lesson_id/edit")
                        view=|| view! { <TeacherRoute><LessonForm /></TeacherRoute> }
                    />
                </ParentRoute>
                <ParentRoute path=path!("") view=Shell>
                    <Route path=path!("") view=LandingPage />
                    <Route path=path!("courses") view=CourseCatalog />
                    <Route path=path!("courses/:id") view=CourseDetails />
                    <Route path=path!("login") view=LoginPage />
                    <Route path=path!("register") view=RegisterPage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
