use yew::{Html, function_component, html};

#[function_component(Loading)]
pub fn loading() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center py-16">
            <span class="loading loading-spinner loading-lg text-primary"></span>
            <span class="mt-3 text-base-content/70">{"Loading posts"}</span>
        </div>
    }
}
