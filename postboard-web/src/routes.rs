use crate::{containers::layout::Layout, models::BoardState, pages::*};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// The main routes
#[derive(Debug, Clone, PartialEq, Eq, Routable)]
pub enum MainRoute {
    #[at("/")]
    Home,
    #[at("/auth")]
    Auth,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[derive(Properties, PartialEq)]
pub struct MainRouteViewProps {
    pub route: MainRoute,
}

#[function_component(MainRouteView)]
fn main_route_view(props: &MainRouteViewProps) -> Html {
    let signed_in = use_selector(|state: &BoardState| state.app.auth.is_signed_in());

    match props.route {
        MainRoute::Home => html! {
            <Layout><HomePage /></Layout>
        },
        MainRoute::Auth => {
            if *signed_in {
                html! { <Redirect<MainRoute> to={MainRoute::Home} /> }
            } else {
                html! { <Layout><AuthPage /></Layout> }
            }
        }
        MainRoute::NotFound => html! {
            <Layout><ErrorPage /></Layout>
        },
    }
}

/// Switch function for the main routes.
pub fn switch(route: MainRoute) -> Html {
    tracing::debug!(?route, "switching route");
    html! { <MainRouteView {route} /> }
}
