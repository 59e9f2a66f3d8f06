use crate::components::{loading::Loading, post_card::PostCard};
use crate::models::BoardState;
use shared::models::PostId;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub struct PostListProps {
    /// True until the first fetch settles.
    #[prop_or(false)]
    pub loading: bool,
    pub on_edit: Callback<PostId>,
}

#[function_component(PostList)]
pub fn post_list(props: &PostListProps) -> Html {
    let posts = use_selector(|state: &BoardState| state.app.posts.clone());

    if posts.is_empty() {
        return if props.loading {
            html! { <Loading /> }
        } else {
            html! {
                <div class="alert">
                    <i class="fa-solid fa-circle-info"></i>
                    <span>{"No posts yet."}</span>
                </div>
            }
        };
    }

    html! {
        <div class="grid gap-4 sm:grid-cols-2 xl:grid-cols-3">
            { for posts.posts().iter().map(|post| html! {
                <PostCard key={post.id.as_str()} post={post.clone()} on_edit={props.on_edit.clone()} />
            }) }
        </div>
    }
}
