use crate::routes::MainRoute;
use yew::{Html, function_component, html};
use yew_router::prelude::Link;

/// `ErrorPage` page component
#[function_component(ErrorPage)]
pub fn error_page() -> Html {
    html! {
        <div class="hero py-16">
            <div class="hero-content text-center flex-col">
                <h1 class="text-4xl font-bold">{ "Page not found" }</h1>
                <p>{ "There is nothing posted here." }</p>
                <Link<MainRoute> to={MainRoute::Home} classes="btn btn-primary">
                    { "Back to the board" }
                </Link<MainRoute>>
            </div>
        </div>
    }
}
