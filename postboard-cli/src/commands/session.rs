use anyhow::{Context, Result, bail};
use clap::Args;
use rpassword::prompt_password;
use shared::models::{AuthProfile, SignInRequest, SignUpRequest};
use shared::store::thunks;

use super::Session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long, short)]
    pub email: String,

    /// Read from the environment instead of prompting
    #[arg(long, env = "POSTBOARD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct SignupArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long, short)]
    pub email: String,

    /// Read from the environment instead of prompting twice
    #[arg(long, env = "POSTBOARD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

fn password_or_prompt(given: Option<String>, message: &str) -> Result<String> {
    let password = match given {
        Some(password) => password,
        None => prompt_password(message).context("failed to read password")?,
    };
    if password.is_empty() {
        bail!("password must not be empty");
    }
    Ok(password)
}

/// Human summary of who a profile belongs to.
pub fn describe(profile: &AuthProfile) -> String {
    let name = profile.display_name().unwrap_or("an unnamed user");
    match profile.result.as_ref().and_then(|user| user.email.as_deref()) {
        Some(email) if Some(email) != profile.display_name() => format!("{name} <{email}>"),
        _ => name.to_string(),
    }
}

pub async fn login(session: &Session, args: LoginArgs) -> Result<()> {
    let password = password_or_prompt(args.password, "Password: ")?;
    let request = SignInRequest {
        email: args.email,
        password,
    };

    let profile = thunks::sign_in(&session.client, &request, &session.store)
        .await
        .context("sign in failed")?;
    println!("Signed in as {}", describe(&profile));
    Ok(())
}

pub async fn signup(session: &Session, args: SignupArgs) -> Result<()> {
    let (password, confirm_password) = match args.password {
        Some(password) => (password.clone(), password),
        None => (
            password_or_prompt(None, "Password: ")?,
            password_or_prompt(None, "Repeat password: ")?,
        ),
    };
    let request = SignUpRequest {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        password,
        confirm_password,
    };
    if let Err(message) = request.validate() {
        bail!(message);
    }

    let profile = thunks::sign_up(&session.client, &request, &session.store)
        .await
        .context("sign up failed")?;
    println!("Signed up as {}", describe(&profile));
    Ok(())
}

pub fn logout(session: &Session) {
    let was_signed_in = session.store.state().auth.is_signed_in();
    thunks::logout(&session.store);
    session.client.set_token(None);

    if was_signed_in {
        println!("Signed out.");
    } else {
        println!("Not signed in.");
    }
}

pub fn whoami(session: &Session) {
    match &session.store.state().auth.auth_data {
        Some(profile) => println!("Signed in as {}", describe(profile)),
        None => println!("Not signed in."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::UserProfile;

    fn profile(name: Option<&str>, email: Option<&str>) -> AuthProfile {
        AuthProfile {
            result: Some(UserProfile {
                id: Some("u1".into()),
                name: name.map(Into::into),
                email: email.map(Into::into),
                image_url: None,
            }),
            token: Some("jwt".into()),
            ..AuthProfile::default()
        }
    }

    #[test]
    fn describe_prefers_name_and_email() {
        assert_eq!(
            describe(&profile(Some("Ana"), Some("ana@example.com"))),
            "Ana <ana@example.com>"
        );
    }

    #[test]
    fn describe_does_not_repeat_email() {
        assert_eq!(
            describe(&profile(None, Some("ana@example.com"))),
            "ana@example.com"
        );
    }

    #[test]
    fn describe_token_only_profile() {
        assert_eq!(describe(&AuthProfile::with_token("jwt")), "an unnamed user");
    }

    #[test]
    fn given_password_skips_prompt() {
        assert_eq!(
            password_or_prompt(Some("secret".into()), "unused").unwrap(),
            "secret"
        );
        assert!(password_or_prompt(Some(String::new()), "unused").is_err());
    }
}
