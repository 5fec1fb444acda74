//! Dashboard navigation, by account kind.

use contracts::system::auth::UserRole;
use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

#[derive(Clone, Debug, PartialEq)]
struct MenuItem {
    path: &'static str,
    label: &'static str,
    icon: &'static str,
}

fn menu_for(role: UserRole) -> Vec<MenuItem> {
    let mut items = vec![MenuItem {
        path: "/dashboard",
        label: "Overview",
        icon: "dashboard",
    }];
    match role {
        UserRole::Student => items.push(MenuItem {
            path: "/dashboard/my-courses",
            label: "My Courses",
            icon: "courses",
        }),
        UserRole::Teacher => items.extend([
            MenuItem {
                path: "/dashboard/teacher/courses",
                label: "My Courses",
                icon: "courses",
            },
            MenuItem {
                path: "/dashboard/teacher/courses/new",
                label: "Create Course",
                icon: "plus",
            },
        ]),
        UserRole::None => {}
    }
    items.push(MenuItem {
        path: "/courses",
        label: "Browse Catalogue",
        icon: "search",
    });
    items.push(MenuItem {
        path: "/dashboard/profile",
        label: "Profile & Settings",
        icon: "user",
    });
    items
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let session = use_auth();
    let location = use_location();

    view! {
        <aside class="sidebar">
            <nav>
                {move || {
                    let current = location.pathname.get();
                    menu_for(session.with(|s| s.role()))
                        .into_iter()
                        .map(|item| {
                            let active = current == item.path;
                            view! {
                                <a class="sidebar__item" class:sidebar__item--active=active href=item.path>
                                    {icon(item.icon)}
                                    <span>{item.label}</span>
                                </a>
                            }
                        })
                        .collect_view()
                }}
            </nav>
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(role: UserRole) -> Vec<&'static str> {
        menu_for(role).into_iter().map(|i| i.path).collect()
    }

    #[test]
    fn test_student_menu() {
        assert_eq!(
            paths(UserRole::Student),
            vec!["/dashboard", "/dashboard/my-courses", "/courses", "/dashboard/profile"]
        );
    }

    #[test]
    fn test_teacher_menu() {
        let teacher = paths(UserRole::Teacher);
        assert!(teacher.contains(&"/dashboard/teacher/courses"));
        assert!(!teacher.contains(&"/dashboard/my-courses"));
        assert!(teacher.contains(&"/dashboard/profile"));
    }
}
