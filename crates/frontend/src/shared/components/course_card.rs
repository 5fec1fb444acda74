use contracts::domain::course::Course;
use leptos::prelude::*;
use thaw::*;

use crate::shared::api_utils::media_url;

/// Fallback image for courses without a thumbnail
pub const DEFAULT_THUMBNAIL: &str = "https://images.unsplash.com/photo-1509062522246-3755977927d7?auto=format&fit=crop&w=1332&q=80";

/// Five-star rating widget; missing or non-numeric ratings show as zero.
#[component]
pub fn RatingStars(rating: f64) -> impl IntoView {
    let filled = rating.clamp(0.0, 5.0).floor() as usize;
    view! {
        <span class="rating" title=format!("{:.1}", rating)>
            {(0..5)
                .map(|i| if i < filled { "★" } else { "☆" })
                .collect::<String>()}
            <span class="rating__value">{format!(" {:.1}", rating)}</span>
        </span>
    }
}

/// Catalogue card linking to the public course page.
#[component]
pub fn CourseCard(course: Course) -> impl IntoView {
    let href = format!("/courses/{}", course.id);
    let thumbnail = media_url(course.thumbnail.as_deref())
        .unwrap_or_else(|| DEFAULT_THUMBNAIL.to_string());
    let title = course.display_title().to_string();
    let teacher = course.display_teacher().map(str::to_string);
    let level = course.level().map(|l| l.label());
    let rating = course.rating_value();
    let price = course.price_label();

    view! {
        <a class="course-card" href=href>
            <img class="course-card__thumb" src=thumbnail alt=title.clone() />
            <div class="course-card__body">
                <h3 class="course-card__title">{title}</h3>
                {teacher.map(|t| view! { <p class="course-card__teacher">{t}</p> })}
                <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                    <RatingStars rating=rating />
                    {level.map(|l| view! {
                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>{l}</Badge>
                    })}
                </Flex>
                <span class="course-card__price">{price}</span>
            </div>
        </a>
    }
}
