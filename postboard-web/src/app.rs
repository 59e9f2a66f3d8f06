use crate::routes::{MainRoute, switch};
use yew::{Html, function_component, html};
use yew_router::prelude::*;
use yewdux::YewduxRoot;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<MainRoute> render={switch} />
        </BrowserRouter>
    }
}

/// Provides the yewdux context the whole tree reads from.
#[function_component(Root)]
pub fn root() -> Html {
    html! {
        <YewduxRoot>
            <App />
        </YewduxRoot>
    }
}
