//! Account settings: profile details, password change and account deletion.

use contracts::shared::media::check_image_upload;
use contracts::shared::validation::ValidationResult;
use contracts::system::auth::profile::{
    validate_password_change, DeleteAccountRequest, PasswordChangeForm, ProfileForm, UserProfile,
};
use contracts::system::auth::UserRole;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;
use web_sys::File;

use super::{clear_on_input, field_error};
use crate::shared::api_utils::media_url;
use crate::shared::components::form_field::FormField;
use crate::shared::components::spinner::PageSpinner;
use crate::system::auth::api;
use crate::system::auth::context::{do_delete_account, replace_user, use_auth};

const PASSWORD_CHANGED: &str = "Password updated successfully";
const DELETE_CONFIRMATION: &str =
    "Delete your account permanently? Your enrollments and courses will be removed.";

#[derive(Clone, Copy)]
struct ProfileFields {
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    bio: RwSignal<String>,
    phone_number: RwSignal<String>,
    specialization: RwSignal<String>,
    experience: RwSignal<String>,
    qualifications: RwSignal<String>,
    grade_level: RwSignal<String>,
    school: RwSignal<String>,
    learning_goals: RwSignal<String>,
}

impl ProfileFields {
    fn new() -> Self {
        Self {
            first_name: RwSignal::new(String::new()),
            last_name: RwSignal::new(String::new()),
            bio: RwSignal::new(String::new()),
            phone_number: RwSignal::new(String::new()),
            specialization: RwSignal::new(String::new()),
            experience: RwSignal::new(String::new()),
            qualifications: RwSignal::new(String::new()),
            grade_level: RwSignal::new(String::new()),
            school: RwSignal::new(String::new()),
            learning_goals: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, form: &ProfileForm) {
        self.first_name.set(form.first_name.clone());
        self.last_name.set(form.last_name.clone());
        self.bio.set(form.bio.clone());
        self.phone_number.set(form.phone_number.clone());
        self.specialization.set(form.specialization.clone());
        self.experience.set(form.experience.clone());
        self.qualifications.set(form.qualifications.clone());
        self.grade_level.set(form.grade_level.clone());
        self.school.set(form.school.clone());
        self.learning_goals.set(form.learning_goals.clone());
    }

    fn form(&self) -> ProfileForm {
        ProfileForm {
            first_name: self.first_name.get_untracked(),
            last_name: self.last_name.get_untracked(),
            bio: self.bio.get_untracked(),
            phone_number: self.phone_number.get_untracked(),
            specialization: self.specialization.get_untracked(),
            experience: self.experience.get_untracked(),
            qualifications: self.qualifications.get_untracked(),
            grade_level: self.grade_level.get_untracked(),
            school: self.school.get_untracked(),
            learning_goals: self.learning_goals.get_untracked(),
        }
    }
}

#[component]
fn ProfileSection() -> impl IntoView {
    let session = use_auth();
    let fields = ProfileFields::new();
    let role = RwSignal::new(UserRole::None);
    let email = RwSignal::new(String::new());
    let picture = RwSignal::new(Option::<String>::None);
    let picked: StoredValue<Option<File>, LocalStorage> = StoredValue::new_local(None);
    let picked_name = RwSignal::new(Option::<String>::None);
    let picture_error = RwSignal::new(Option::<String>::None);
    let errors = RwSignal::new(ValidationResult::valid());
    let load_error = RwSignal::new(Option::<String>::None);
    let message = RwSignal::new(Option::<String>::None);
    let save_error = RwSignal::new(Option::<String>::None);
    let loading = RwSignal::new(true);
    let saving = RwSignal::new(false);

    clear_on_input(fields.bio, errors, "bio");
    clear_on_input(fields.phone_number, errors, "phone_number");

    let apply = move |profile: &UserProfile| {
        fields.fill(&ProfileForm::from_profile(profile));
        role.set(profile.role());
        email.set(profile.email.clone());
        picture.set(profile.profile_picture.clone());
    };

    spawn_local(async move {
        match api::fetch_profile().await {
            Ok(profile) => apply(&profile),
            Err(e) => {
                log::warn!("profile failed to load: {}", e);
                load_error.set(Some(e));
            }
        }
        loading.set(false);
    });

    let pick_picture = move |file: Option<File>| {
        let accepted = file.filter(|f| match check_image_upload(&f.type_(), f.size()) {
            Some(problem) => {
                picture_error.set(Some(problem));
                false
            }
            None => {
                picture_error.set(None);
                true
            }
        });
        picked_name.set(accepted.as_ref().map(File::name));
        picked.set_value(accepted);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let update = match fields.form().to_update(role.get_untracked()) {
            Ok(update) => update,
            Err(result) => {
                errors.set(result);
                return;
            }
        };
        let file = picked.get_value();
        saving.set(true);
        message.set(None);
        save_error.set(None);
        spawn_local(async move {
            match api::update_profile(&update, file).await {
                Ok(profile) => {
                    apply(&profile);
                    replace_user(session, profile.user_info());
                    picked.set_value(None);
                    picked_name.set(None);
                    message.set(Some("Profile updated successfully".to_string()));
                }
                Err(e) => {
                    log::error!("profile update failed: {}", e);
                    save_error.set(Some(e));
                }
            }
            saving.set(false);
        });
    };

    let busy = Signal::derive(move || saving.get() || loading.get());
    let is_teacher = move || role.get() == UserRole::Teacher;
    let is_student = move || role.get() == UserRole::Student;

    view! {
        <section class="settings-section">
            <h2>"Profile"</h2>
            {move || loading.get().then(|| view! { <PageSpinner label="Loading profile..." /> })}
            {move || load_error.get().map(|e| view! {
                <div class="alert alert--error" role="alert">{format!("Couldn't load your profile: {}", e)}</div>
            })}
            {move || message.get().map(|m| view! { <div class="alert alert--success">{m}</div> })}
            {move || save_error.get().map(|e| view! {
                <div class="alert alert--error" role="alert">{e}</div>
            })}

            <form class:hidden=move || loading.get() on:submit=on_submit novalidate>
                <Flex gap=FlexGap::Medium align=FlexAlign::Center>
                    {move || picture.get().and_then(|p| media_url(Some(&p))).map(|src| view! {
                        <img class="profile__avatar" src=src alt="Profile picture" />
                    })}
                    <FormField label="Profile picture" error=Signal::derive(move || picture_error.get())>
                        <input
                            type="file"
                            accept="image/*"
                            disabled=move || busy.get()
                            on:change=move |ev| {
                                let input = event_target::<web_sys::HtmlInputElement>(&ev);
                                pick_picture(input.files().and_then(|files| files.get(0)));
                            }
                        />
                        {move || picked_name.get().map(|n| view! { <span class="text-muted">{n}</span> })}
                    </FormField>
                </Flex>

                <Flex gap=FlexGap::Medium>
                    <FormField label="First name" error=Signal::derive(|| None::<String>)>
                        <Input value=fields.first_name disabled=busy />
                    </FormField>
                    <FormField label="Last name" error=Signal::derive(|| None::<String>)>
                        <Input value=fields.last_name disabled=busy />
                    </FormField>
                </Flex>
                <FormField label="Email" error=Signal::derive(|| None::<String>)>
                    <Input value=email input_type=InputType::Email disabled=true />
                </FormField>
                <FormField label="Phone number" error=field_error(errors, "phone_number")>
                    <Input value=fields.phone_number disabled=busy />
                </FormField>
                <FormField label="Bio" error=field_error(errors, "bio")>
                    <Textarea value=fields.bio disabled=busy />
                </FormField>

                <div class:hidden=move || !is_teacher()>
                    <FormField label="Specialization" error=Signal::derive(|| None::<String>)>
                        <Input value=fields.specialization disabled=busy />
                    </FormField>
                    <FormField label="Experience" error=Signal::derive(|| None::<String>)>
                        <Input value=fields.experience disabled=busy />
                    </FormField>
                    <FormField label="Qualifications" error=Signal::derive(|| None::<String>)>
                        <Textarea value=fields.qualifications disabled=busy />
                    </FormField>
                </div>
                <div class:hidden=move || !is_student()>
                    <FormField label="Grade level" error=Signal::derive(|| None::<String>)>
                        <Input value=fields.grade_level disabled=busy />
                    </FormField>
                    <FormField label="School" error=Signal::derive(|| None::<String>)>
                        <Input value=fields.school disabled=busy />
                    </FormField>
                    <FormField label="Learning goals" error=Signal::derive(|| None::<String>)>
                        <Textarea value=fields.learning_goals disabled=busy />
                    </FormField>
                </div>

                <Button appearance=ButtonAppearance::Primary button_type=ButtonType::Submit disabled=busy>
                    {move || if saving.get() { "Saving..." } else { "Save profile" }}
                </Button>
            </form>
        </section>
    }
}

#[component]
fn PasswordSection() -> impl IntoView {
    let current_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationResult::valid());
    let message = RwSignal::new(Option::<String>::None);
    let submit_error = RwSignal::new(Option::<String>::None);
    let submitting = RwSignal::new(false);

    clear_on_input(current_password, errors, "current_password");
    clear_on_input(new_password, errors, "new_password");
    clear_on_input(confirm_password, errors, "confirm_password");

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let form = PasswordChangeForm {
            current_password: current_password.get_untracked(),
            new_password: new_password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        let request = match form.to_request() {
            Ok(request) => request,
            Err(result) => {
                errors.set(result);
                return;
            }
        };
        errors.set(ValidationResult::valid());
        message.set(None);
        submit_error.set(None);
        submitting.set(true);
        spawn_local(async move {
            match api::change_password(&request).await {
                Ok(response) => {
                    current_password.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                    errors.set(ValidationResult::valid());
                    message.set(Some(response.message.unwrap_or_else(|| PASSWORD_CHANGED.to_string())));
                }
                Err(e) => {
                    log::warn!("password change failed: {}", e);
                    submit_error.set(Some(e));
                }
            }
            submitting.set(false);
        });
    };

    // Live checklist while typing; the submit check is the same validator.
    let live_error = move |field: &'static str| {
        Signal::derive(move || {
            let form = PasswordChangeForm {
                current_password: current_password.get(),
                new_password: new_password.get(),
                confirm_password: confirm_password.get(),
            };
            if form.new_password.is_empty() {
                return None;
            }
            validate_password_change(&form).error(field).map(str::to_string)
        })
    };
    let submitted_error = move |field: &str| errors.with(|e| e.error(field).map(str::to_string));
    let new_password_hint = live_error("new_password");
    let confirm_hint = live_error("confirm_password");
    let busy = Signal::derive(move || submitting.get());

    view! {
        <section class="settings-section">
            <h2>"Change password"</h2>
            {move || message.get().map(|m| view! { <div class="alert alert--success">{m}</div> })}
            {move || submit_error.get().map(|e| view! {
                <div class="alert alert--error" role="alert">{e}</div>
            })}
            <form on:submit=on_submit novalidate>
                <FormField label="Current password" error=field_error(errors, "current_password")>
                    <Input value=current_password input_type=InputType::Password disabled=busy />
                </FormField>
                <FormField
                    label="New password"
                    error=Signal::derive(move || submitted_error("new_password").or_else(|| new_password_hint.get()))
                >
                    <Input value=new_password input_type=InputType::Password disabled=busy />
                </FormField>
                <FormField
                    label="Confirm new password"
                    error=Signal::derive(move || submitted_error("confirm_password").or_else(|| confirm_hint.get()))
                >
                    <Input value=confirm_password input_type=InputType::Password disabled=busy />
                </FormField>
                <Button appearance=ButtonAppearance::Primary button_type=ButtonType::Submit disabled=busy>
                    {move || if submitting.get() { "Updating..." } else { "Update password" }}
                </Button>
            </form>
        </section>
    }
}

#[component]
fn DeleteAccountSection() -> impl IntoView {
    let session = use_auth();
    let navigate = use_navigate();
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let deleting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if deleting.get_untracked() {
            return;
        }
        let request = match DeleteAccountRequest::confirmed(&password.get_untracked()) {
            Ok(request) => request,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(DELETE_CONFIRMATION).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        error.set(None);
        deleting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match do_delete_account(session, request).await {
                Ok(()) => {
                    log::info!("account deleted");
                    navigate("/", Default::default());
                }
                Err(e) => {
                    log::warn!("account deletion failed: {}", e);
                    error.set(Some(e));
                    deleting.set(false);
                }
            }
        });
    };

    let busy = Signal::derive(move || deleting.get());

    view! {
        <section class="settings-section settings-section--danger">
            <h2>"Delete account"</h2>
            <p class="text-muted">"This permanently removes your account and cannot be undone."</p>
            <form on:submit=on_submit novalidate>
                <FormField label="Password" error=Signal::derive(move || error.get())>
                    <Input value=password input_type=InputType::Password disabled=busy />
                </FormField>
                <Button button_type=ButtonType::Submit disabled=busy>
                    {move || if deleting.get() { "Deleting..." } else { "Delete my account" }}
                </Button>
            </form>
        </section>
    }
}

/// `/dashboard/profile`
#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <div class="page">
            <div class="page__header">
                <h1>"Profile & settings"</h1>
            </div>
            <ProfileSection />
            <PasswordSection />
            <DeleteAccountSection />
        </div>
    }
}
