use crate::{
    api::shared_client,
    models::{BoardState, StoreDispatcher},
    routes::MainRoute,
};
use shared::models::{SignInRequest, SignUpRequest};
use shared::store::thunks;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::hooks::use_navigator;
use yewdux::prelude::use_dispatch;

/// Either form's submission, checked and ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Submission {
    SignIn(SignInRequest),
    SignUp(SignUpRequest),
}

fn prepare(is_signup: bool, form: &SignUpRequest) -> Result<Submission, String> {
    if is_signup {
        form.validate()?;
        return Ok(Submission::SignUp(form.clone()));
    }
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Err("Email and password are required".to_string());
    }
    Ok(Submission::SignIn(SignInRequest {
        email: form.email.trim().to_string(),
        password: form.password.clone(),
    }))
}

fn field_setter(
    form: &UseStateHandle<SignUpRequest>,
    apply: fn(&mut SignUpRequest, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            let mut next = (*form).clone();
            apply(&mut next, input.value());
            form.set(next);
        }
    })
}

#[function_component(AuthPage)]
pub fn auth_page() -> Html {
    let dispatch = use_dispatch::<BoardState>();
    let navigator = use_navigator();
    let is_signup = use_state(|| false);
    let show_password = use_state(|| false);
    let form = use_state(SignUpRequest::default);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let onsubmit = {
        let form = form.clone();
        let is_signup = is_signup.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let submission = match prepare(*is_signup, &form) {
                Ok(submission) => submission,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };

            let (dispatch, navigator) = (dispatch.clone(), navigator.clone());
            let (error, loading) = (error.clone(), loading.clone());
            loading.set(true);
            error.set(None);
            spawn_local(async move {
                let dispatch = StoreDispatcher(dispatch);
                let result = match shared_client() {
                    Ok(client) => match &submission {
                        Submission::SignIn(request) => {
                            thunks::sign_in(&client, request, &dispatch).await
                        }
                        Submission::SignUp(request) => {
                            thunks::sign_up(&client, request, &dispatch).await
                        }
                    },
                    Err(err) => Err(err),
                };
                loading.set(false);
                match result {
                    Ok(_) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&MainRoute::Home);
                        }
                    }
                    Err(err) => error.set(Some(err.user_message())),
                }
            });
        })
    };

    let switch_mode = {
        let is_signup = is_signup.clone();
        let show_password = show_password.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            is_signup.set(!*is_signup);
            show_password.set(false);
            error.set(None);
        })
    };

    let toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_: MouseEvent| show_password.set(!*show_password))
    };

    let password_type = if *show_password { "text" } else { "password" };
    let signup = *is_signup;
    let busy = *loading;

    html! {
        <div class="flex items-center justify-center py-10">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" {onsubmit}>
                    <h2 class="card-title text-2xl">
                        <i class="fa-solid fa-lock"></i>
                        {if signup { "Sign up" } else { "Sign in" }}
                    </h2>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    if signup {
                        <div class="flex gap-2">
                            <input
                                class="input input-bordered w-1/2"
                                placeholder="First Name"
                                value={form.first_name.clone()}
                                oninput={field_setter(&form, |form, value| form.first_name = value)}
                            />
                            <input
                                class="input input-bordered w-1/2"
                                placeholder="Last Name"
                                value={form.last_name.clone()}
                                oninput={field_setter(&form, |form, value| form.last_name = value)}
                            />
                        </div>
                    }
                    <input
                        class="input input-bordered"
                        type="email"
                        placeholder="Email Address"
                        value={form.email.clone()}
                        oninput={field_setter(&form, |form, value| form.email = value)}
                    />
                    <div class="join w-full">
                        <input
                            class="input input-bordered join-item w-full"
                            type={password_type}
                            placeholder="Password"
                            value={form.password.clone()}
                            oninput={field_setter(&form, |form, value| form.password = value)}
                        />
                        <button class="btn join-item" type="button" onclick={toggle_password}>
                            <i class={if *show_password { "fa-solid fa-eye-slash" } else { "fa-solid fa-eye" }}></i>
                        </button>
                    </div>
                    if signup {
                        <input
                            class="input input-bordered"
                            type="password"
                            placeholder="Repeat Password"
                            value={form.confirm_password.clone()}
                            oninput={field_setter(&form, |form, value| form.confirm_password = value)}
                        />
                    }
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={busy}>
                            {match (busy, signup) {
                                (true, _) => "Please wait...",
                                (false, true) => "Sign Up",
                                (false, false) => "Sign In",
                            }}
                        </button>
                    </div>
                    <button class="btn btn-link" type="button" onclick={switch_mode}>
                        {if signup {
                            "Already have an account? Sign in"
                        } else {
                            "Don't have an account? Sign Up"
                        }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SignUpRequest {
        SignUpRequest {
            first_name: "Ana".into(),
            last_name: "Lima".into(),
            email: " ana@example.com ".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
        }
    }

    #[test]
    fn sign_in_trims_email() {
        match prepare(false, &filled()).unwrap() {
            Submission::SignIn(request) => assert_eq!(request.email, "ana@example.com"),
            Submission::SignUp(_) => panic!("expected sign in"),
        }
    }

    #[test]
    fn sign_in_needs_both_fields() {
        let form = SignUpRequest {
            password: String::new(),
            ..filled()
        };
        assert!(prepare(false, &form).is_err());
    }

    #[test]
    fn sign_up_rejects_mismatched_passwords() {
        let form = SignUpRequest {
            confirm_password: "other".into(),
            ..filled()
        };
        assert_eq!(
            prepare(true, &form),
            Err("Passwords do not match".to_string())
        );
    }

    #[test]
    fn valid_sign_up_is_sent_whole() {
        assert_eq!(prepare(true, &filled()), Ok(Submission::SignUp(filled())));
    }
}
