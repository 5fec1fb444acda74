use contracts::domain::course::review::{average_rating, has_reviewed, CourseReview, ReviewDraft};
use contracts::shared::validation::ValidationResult;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::course::api;
use crate::shared::components::course_card::RatingStars;
use crate::shared::components::form_field::FormField;
use crate::shared::date_utils::format_optional_date;
use crate::shared::load_state::{LoadState, RequestGuard};
use crate::system::pages::field_error;

#[component]
fn ReviewItem(review: CourseReview) -> impl IntoView {
    let author = review.author();
    let date = format_optional_date(review.created_at.as_deref());
    view! {
        <li class="review">
            <Flex justify=FlexJustify::SpaceBetween>
                <strong>{author}</strong>
                <span class="text-muted">{date}</span>
            </Flex>
            <RatingStars rating=f64::from(review.rating) />
            {(!review.comment.is_empty()).then(|| view! { <p>{review.comment.clone()}</p> })}
        </li>
    }
}

/// Reviews of one course. Enrolled students who have not reviewed yet get
/// the form.
#[component]
pub fn CourseReviews(
    course_id: i64,
    #[prop(into)] can_review: Signal<bool>,
    #[prop(into)] user_id: Signal<Option<i64>>,
) -> impl IntoView {
    let reviews = RwSignal::new(LoadState::<Vec<CourseReview>>::Loading);
    let rating = RwSignal::new(String::new());
    let comment = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationResult::valid());
    let submit_error = RwSignal::new(Option::<String>::None);
    let submitting = RwSignal::new(false);
    let loads = RequestGuard::new();

    let reload = move || loads.load(reviews, api::fetch_reviews(course_id));
    reload();

    let show_form = Signal::derive(move || {
        let reviewed = match (user_id.get(), reviews.with(|r| r.ready().cloned())) {
            (Some(uid), Some(list)) => has_reviewed(&list, uid),
            _ => false,
        };
        can_review.get() && !reviewed
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let draft = ReviewDraft {
            rating: rating.get_untracked().parse().unwrap_or(0),
            comment: comment.get_untracked(),
        };
        let payload = match draft.to_payload() {
            Ok(payload) => payload,
            Err(result) => {
                errors.set(result);
                return;
            }
        };
        errors.set(ValidationResult::valid());
        submit_error.set(None);
        submitting.set(true);
        spawn_local(async move {
            match api::add_review(course_id, &payload).await {
                Ok(_) => {
                    rating.set(String::new());
                    comment.set(String::new());
                    reload();
                }
                Err(e) => {
                    log::warn!("review for course {} rejected: {}", course_id, e);
                    submit_error.set(Some(e));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="reviews">
            <h2>"Reviews"</h2>
            {move || match reviews.get() {
                LoadState::Loading => view! { <Spinner /> }.into_any(),
                LoadState::Failed(message) => view! {
                    <p class="text-muted">{format!("Reviews are unavailable: {}", message)}</p>
                }.into_any(),
                LoadState::Ready(list) if list.is_empty() => view! {
                    <p class="text-muted">"No reviews yet."</p>
                }.into_any(),
                LoadState::Ready(list) => {
                    let average = average_rating(&list).unwrap_or(0.0);
                    let count = list.len();
                    view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::Center>
                            <RatingStars rating=average />
                            <span class="text-muted">{format!("{} review{}", count, if count == 1 { "" } else { "s" })}</span>
                        </Flex>
                        <ul class="review-list">
                            {list.into_iter().map(|r| view! { <ReviewItem review=r /> }).collect_view()}
                        </ul>
                    }.into_any()
                }
            }}

            <form class="review-form" class:hidden=move || !show_form.get() on:submit=on_submit novalidate>
                <h3>"Leave a review"</h3>
                {move || submit_error.get().map(|e| view! {
                    <div class="alert alert--error" role="alert">{e}</div>
                })}
                <FormField label="Rating" error=field_error(errors, "rating")>
                    <Select value=rating>
                        <option value="">"Choose a rating"</option>
                        {(1..=5u8).rev().map(|n| view! {
                            <option value=n.to_string()>{format!("{} star{}", n, if n == 1 { "" } else { "s" })}</option>
                        }).collect_view()}
                    </Select>
                </FormField>
                <FormField label="Comment" error=field_error(errors, "comment")>
                    <Textarea value=comment placeholder="What did you think of this course?" />
                </FormField>
                <Button
                    appearance=ButtonAppearance::Primary
                    button_type=ButtonType::Submit
                    disabled=Signal::derive(move || submitting.get())
                >
                    {move || if submitting.get() { "Submitting..." } else { "Submit review" }}
                </Button>
            </form>
        </section>
    }
}
