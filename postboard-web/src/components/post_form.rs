use crate::{
    api::shared_client,
    models::{BoardState, StoreDispatcher},
};
use shared::models::{Post, PostDraft, PostId};
use shared::store::thunks;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yewdux::prelude::{use_dispatch, use_store_value};

#[derive(Properties, PartialEq)]
pub struct PostFormProps {
    /// Post being edited; `None` creates a new one.
    #[prop_or_default]
    pub current_id: Option<PostId>,
    /// Fired after a successful submit and on clear.
    pub on_done: Callback<()>,
}

/// Raw text of the form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Fields {
    title: String,
    message: String,
    tags: String,
    selected_file: String,
}

impl Fields {
    fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            message: post.message.clone(),
            tags: post.tags.join(","),
            selected_file: post.selected_file.clone().unwrap_or_default(),
        }
    }

    fn to_draft(&self, creator: &str) -> PostDraft {
        let selected_file = self.selected_file.trim();
        PostDraft {
            title: self.title.trim().to_string(),
            message: self.message.trim().to_string(),
            creator: creator.to_string(),
            tags: PostDraft::parse_tags(&self.tags),
            selected_file: (!selected_file.is_empty()).then(|| selected_file.to_string()),
        }
    }
}

fn input_setter(fields: &UseStateHandle<Fields>, apply: fn(&mut Fields, String)) -> Callback<InputEvent> {
    let fields = fields.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            let mut next = (*fields).clone();
            apply(&mut next, input.value());
            fields.set(next);
        }
    })
}

#[function_component(PostForm)]
pub fn post_form(props: &PostFormProps) -> Html {
    let state = use_store_value::<BoardState>();
    let dispatch = use_dispatch::<BoardState>();
    let fields = use_state(Fields::default);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let editing = props
        .current_id
        .as_ref()
        .and_then(|id| state.app.posts.find(id).cloned());

    {
        let fields = fields.clone();
        let error = error.clone();
        let editing = editing.clone();
        use_effect_with(props.current_id.clone(), move |_| {
            fields.set(editing.as_ref().map(Fields::from_post).unwrap_or_default());
            error.set(None);
            || ()
        });
    }

    let Some(profile) = state.app.auth.auth_data.clone() else {
        return html! {
            <div class="card bg-base-100 shadow-md">
                <div class="card-body">
                    <p class="text-center">
                        {"Please sign in to create your own posts and like other's posts."}
                    </p>
                </div>
            </div>
        };
    };
    let creator = profile
        .user_id()
        .or(profile.display_name())
        .unwrap_or_default()
        .to_string();

    let on_clear = {
        let fields = fields.clone();
        let error = error.clone();
        let on_done = props.on_done.clone();
        Callback::from(move |_: MouseEvent| {
            fields.set(Fields::default());
            error.set(None);
            on_done.emit(());
        })
    };

    let onsubmit = {
        let fields = fields.clone();
        let error = error.clone();
        let busy = busy.clone();
        let on_done = props.on_done.clone();
        let current_id = props.current_id.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let draft = fields.to_draft(&creator);
            if draft.is_blank() {
                error.set(Some("A post needs a title or a message.".to_string()));
                return;
            }

            let (fields, error, busy, on_done) =
                (fields.clone(), error.clone(), busy.clone(), on_done.clone());
            let (dispatch, current_id) = (dispatch.clone(), current_id.clone());
            busy.set(true);
            error.set(None);
            spawn_local(async move {
                let dispatch = StoreDispatcher(dispatch);
                let result = match shared_client() {
                    Ok(client) => match &current_id {
                        Some(id) => thunks::update_post(&client, id, &draft, &dispatch).await,
                        None => thunks::create_post(&client, &draft, &dispatch).await,
                    },
                    Err(err) => Err(err),
                };
                match result {
                    Ok(_) => {
                        fields.set(Fields::default());
                        on_done.emit(());
                    }
                    Err(err) => error.set(Some(err.user_message())),
                }
                busy.set(false);
            });
        })
    };

    let on_message = {
        let fields = fields.clone();
        Callback::from(move |event: InputEvent| {
            let target: HtmlTextAreaElement = event.target_unchecked_into();
            let mut next = (*fields).clone();
            next.message = target.value();
            fields.set(next);
        })
    };

    let heading = if editing.is_some() {
        "Editing a post"
    } else {
        "Creating a post"
    };

    html! {
        <div class="card bg-base-100 shadow-md">
            <form class="card-body gap-3" {onsubmit}>
                <h2 class="card-title">{ heading }</h2>
                if let Some(message) = &*error {
                    <div class="alert alert-error">
                        <span>{ message.clone() }</span>
                    </div>
                }
                <input
                    class="input input-bordered w-full"
                    placeholder="Title"
                    value={fields.title.clone()}
                    oninput={input_setter(&fields, |fields, value| fields.title = value)}
                />
                <textarea
                    class="textarea textarea-bordered w-full min-h-[6rem]"
                    placeholder="Message"
                    value={fields.message.clone()}
                    oninput={on_message}
                />
                <input
                    class="input input-bordered w-full"
                    placeholder="Tags (comma separated)"
                    value={fields.tags.clone()}
                    oninput={input_setter(&fields, |fields, value| fields.tags = value)}
                />
                <input
                    class="input input-bordered w-full"
                    placeholder="Image URL"
                    value={fields.selected_file.clone()}
                    oninput={input_setter(&fields, |fields, value| fields.selected_file = value)}
                />
                <button class="btn btn-primary" type="submit" disabled={*busy}>
                    {if *busy { "Saving..." } else { "Submit" }}
                </button>
                <button class="btn btn-secondary btn-sm" type="button" onclick={on_clear}>
                    {"Clear"}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_trims_and_splits_tags() {
        let fields = Fields {
            title: "  Hello ".into(),
            message: "world".into(),
            tags: "rust, yew,,".into(),
            selected_file: "   ".into(),
        };
        let draft = fields.to_draft("u1");
        assert_eq!(draft.title, "Hello");
        assert_eq!(draft.creator, "u1");
        assert_eq!(draft.tags, vec!["rust", "yew"]);
        assert_eq!(draft.selected_file, None);
    }

    #[test]
    fn fields_prefill_from_post() {
        let mut post = Post::new("1", "Title");
        post.tags = vec!["a".into(), "b".into()];
        post.selected_file = Some("https://img".into());

        let fields = Fields::from_post(&post);
        assert_eq!(fields.tags, "a,b");
        assert_eq!(fields.selected_file, "https://img");
        assert_eq!(fields.to_draft("").tags, post.tags);
    }

    #[test]
    fn empty_fields_make_a_blank_draft() {
        assert!(Fields::default().to_draft("u1").is_blank());
    }
}
