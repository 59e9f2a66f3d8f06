use crate::{
    api::shared_client,
    models::{BoardState, StoreDispatcher},
    routes::MainRoute,
};
use shared::store::thunks;
use yew::prelude::*;
use yew_router::hooks::use_navigator;
use yew_router::prelude::Link;
use yewdux::prelude::{use_dispatch, use_selector};

/// Initial shown in the avatar bubble.
fn initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default()
}

#[function_component(Header)]
pub fn header() -> Html {
    let navigator = use_navigator();
    let dispatch = use_dispatch::<BoardState>();
    let profile = use_selector(|state: &BoardState| state.app.auth.auth_data.clone());

    let on_logout = {
        let dispatch = dispatch.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            thunks::logout(&StoreDispatcher(dispatch.clone()));
            match shared_client() {
                Ok(client) => client.set_token(None),
                Err(err) => tracing::warn!(error = %err, "no api client to sign out of"),
            }
            if let Some(navigator) = &navigator {
                navigator.push(&MainRoute::Home);
            }
        })
    };

    let user = (*profile).as_ref().map(|profile| {
        let name = profile.display_name().unwrap_or("Anonymous").to_string();
        let image = profile
            .result
            .as_ref()
            .and_then(|user| user.image_url.clone());
        (name, image)
    });

    html! {
        <nav class="navbar justify-between bg-base-300 rounded-box mb-6">
            <Link<MainRoute> to={MainRoute::Home} classes="btn btn-ghost text-xl">
                <i class="fa-solid fa-images text-primary"></i>
                {"Postboard"}
            </Link<MainRoute>>
            {
                user.map_or_else(
                    || html! {
                        <Link<MainRoute> to={MainRoute::Auth} classes="btn btn-primary btn-sm">
                            {"Sign In"}
                        </Link<MainRoute>>
                    },
                    |(name, image)| html! {
                        <div class="flex items-center gap-3">
                            <div class="avatar placeholder">
                                <div class="bg-secondary text-secondary-content w-9 rounded-full">
                                    {
                                        match image {
                                            Some(src) => html! { <img {src} alt={name.clone()} /> },
                                            None => html! { <span>{ initial(&name) }</span> },
                                        }
                                    }
                                </div>
                            </div>
                            <span class="text-sm font-semibold">{ name }</span>
                            <button class="btn btn-outline btn-sm" onclick={on_logout}>
                                <i class="fa-solid fa-right-from-bracket"></i>
                                {"Logout"}
                            </button>
                        </div>
                    },
                )
            }
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_is_uppercased_first_letter() {
        assert_eq!(initial("ana"), "A");
        assert_eq!(initial(""), "");
    }
}
