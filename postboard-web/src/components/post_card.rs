use crate::{
    api::shared_client,
    models::{BoardState, StoreDispatcher},
};
use shared::models::{Post, PostId, Timestamp};
use shared::store::thunks;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{use_dispatch, use_selector};

#[derive(Properties, PartialEq)]
pub struct PostCardProps {
    pub post: Post,
    /// Asks the form to start editing this post.
    pub on_edit: Callback<PostId>,
}

fn like_label(count: i64) -> String {
    match count {
        0 => "Like".to_string(),
        1 => "1 Like".to_string(),
        n => format!("{n} Likes"),
    }
}

fn tag_line(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[function_component(PostCard)]
pub fn post_card(props: &PostCardProps) -> Html {
    let dispatch = use_dispatch::<BoardState>();
    let user_id = use_selector(BoardState::user_id);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);

    let post = &props.post;
    let is_owner = (*user_id)
        .as_deref()
        .is_some_and(|user_id| post.is_owned_by(user_id));
    let signed_in = user_id.is_some();

    let on_like = {
        let dispatch = dispatch.clone();
        let busy = busy.clone();
        let error = error.clone();
        let id = post.id.clone();
        Callback::from(move |_: MouseEvent| {
            let (dispatch, busy, error, id) =
                (dispatch.clone(), busy.clone(), error.clone(), id.clone());
            busy.set(true);
            spawn_local(async move {
                let result = match shared_client() {
                    Ok(client) => thunks::like_post(&client, &id, &StoreDispatcher(dispatch))
                        .await
                        .map(|_| ()),
                    Err(err) => Err(err),
                };
                error.set(result.err().map(|err| err.user_message()));
                busy.set(false);
            });
        })
    };

    let on_delete = {
        let busy = busy.clone();
        let error = error.clone();
        let id = post.id.clone();
        Callback::from(move |_: MouseEvent| {
            let (dispatch, busy, error, id) =
                (dispatch.clone(), busy.clone(), error.clone(), id.clone());
            busy.set(true);
            spawn_local(async move {
                let result = match shared_client() {
                    Ok(client) => {
                        thunks::delete_post(&client, &id, &StoreDispatcher(dispatch)).await
                    }
                    Err(err) => Err(err),
                };
                // A successful delete unmounts this card.
                if let Err(err) = result {
                    error.set(Some(err.user_message()));
                    busy.set(false);
                }
            });
        })
    };

    let on_edit = {
        let on_edit = props.on_edit.clone();
        let id = post.id.clone();
        Callback::from(move |_: MouseEvent| on_edit.emit(id.clone()))
    };

    let author = post.name.clone().unwrap_or_else(|| post.creator.clone());
    let created = post
        .created_at
        .map(|created| created.relative_to(Timestamp::now().0));

    html! {
        <div class="card bg-base-100 shadow-md">
            {
                post.selected_file.as_ref().map_or_else(
                    || html! {},
                    |src| html! {
                        <figure class="h-48 overflow-hidden">
                            <img class="object-cover w-full" src={src.clone()} alt={post.title.clone()} />
                        </figure>
                    },
                )
            }
            <div class="card-body gap-2">
                <div class="flex items-start justify-between">
                    <div>
                        <div class="font-semibold">{ author }</div>
                        if let Some(created) = created {
                            <div class="text-xs text-base-content/60">{ created }</div>
                        }
                    </div>
                    if is_owner {
                        <button class="btn btn-ghost btn-xs" onclick={on_edit} aria-label="Edit post">
                            <i class="fa-solid fa-ellipsis"></i>
                        </button>
                    }
                </div>
                <div class="text-xs text-base-content/60">{ tag_line(&post.tags) }</div>
                <h2 class="card-title">{ post.title.clone() }</h2>
                <p class="whitespace-pre-line">{ post.message.clone() }</p>
                if let Some(message) = &*error {
                    <div class="alert alert-error py-1 text-sm">
                        <span>{ message.clone() }</span>
                    </div>
                }
                <div class="card-actions justify-between">
                    <button
                        class="btn btn-ghost btn-sm text-primary"
                        onclick={on_like}
                        disabled={!signed_in || *busy}
                    >
                        <i class="fa-solid fa-thumbs-up"></i>
                        { like_label(post.total_likes()) }
                    </button>
                    if is_owner {
                        <button
                            class="btn btn-ghost btn-sm text-error"
                            onclick={on_delete}
                            disabled={*busy}
                        >
                            <i class="fa-solid fa-trash"></i>
                            {"Delete"}
                        </button>
                    }
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_label_pluralizes() {
        assert_eq!(like_label(0), "Like");
        assert_eq!(like_label(1), "1 Like");
        assert_eq!(like_label(12), "12 Likes");
    }

    #[test]
    fn tags_are_hashed() {
        let tags = vec!["rust".to_string(), "yew".to_string()];
        assert_eq!(tag_line(&tags), "#rust #yew");
        assert_eq!(tag_line(&[]), "");
    }
}
