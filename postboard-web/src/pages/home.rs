use crate::{
    api::shared_client,
    components::{post_form::PostForm, post_list::PostList},
    models::{BoardState, StoreDispatcher},
};
use shared::models::PostId;
use shared::store::thunks;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yewdux::prelude::use_dispatch;

/// Feed page: the post list beside the create/edit form.
#[function_component(HomePage)]
pub fn home_page() -> Html {
    let dispatch = use_dispatch::<BoardState>();
    let current_id = use_state(|| None::<PostId>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    {
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with((), move |()| {
            spawn_local(async move {
                let result = match shared_client() {
                    Ok(client) => thunks::get_posts(&client, &StoreDispatcher(dispatch))
                        .await
                        .map(|_| ()),
                    Err(err) => Err(err),
                };
                error.set(result.err().map(|err| err.user_message()));
                loading.set(false);
            });
            || ()
        });
    }

    let on_edit = {
        let current_id = current_id.clone();
        Callback::from(move |id: PostId| current_id.set(Some(id)))
    };

    let on_done = {
        let current_id = current_id.clone();
        Callback::from(move |()| current_id.set(None))
    };

    html! {
        <div class="grid gap-6 lg:grid-cols-4">
            <section class="lg:col-span-3 space-y-4">
                if let Some(message) = &*error {
                    <div class="alert alert-warning">
                        <i class="fa-solid fa-triangle-exclamation"></i>
                        <span>{ message.clone() }</span>
                    </div>
                }
                <PostList loading={*loading} {on_edit} />
            </section>
            <aside>
                <PostForm current_id={(*current_id).clone()} {on_done} />
            </aside>
        </div>
    }
}
