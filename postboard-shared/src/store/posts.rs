//! Feed slice and its reducer.

use std::rc::Rc;

use super::Action;
use crate::models::{Post, PostId};

/// The feed: posts in the order the server delivered them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostsState {
    posts: Vec<Post>,
}

impl PostsState {
    /// A feed holding `posts` in the given order.
    #[must_use]
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Every post, in arrival order.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// The post with `id`, if the feed has it.
    #[must_use]
    pub fn find(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|post| &post.id == id)
    }

    fn position(&self, id: &PostId) -> Option<usize> {
        self.posts.iter().position(|post| &post.id == id)
    }

    /// Number of posts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// True when the feed has no posts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Fold `action` into the feed.
///
/// Never touches `state`; a changed feed is always a new allocation, and an
/// action that changes nothing hands back the same `Rc` so views can compare
/// by pointer.
#[must_use]
pub fn posts_reducer(state: &Rc<PostsState>, action: &Action) -> Rc<PostsState> {
    match action {
        Action::FetchAll(posts) => Rc::new(PostsState::new(posts.clone())),
        Action::Create(post) => {
            let mut posts = state.posts.clone();
            match state.position(&post.id) {
                Some(index) => posts[index] = post.clone(),
                None => posts.push(post.clone()),
            }
            Rc::new(PostsState::new(posts))
        }
        Action::Update(post) => match state.position(&post.id) {
            Some(index) => {
                let mut posts = state.posts.clone();
                posts[index] = post.clone();
                Rc::new(PostsState::new(posts))
            }
            None => {
                tracing::debug!(post_id = %post.id, "update for unknown post ignored");
                Rc::clone(state)
            }
        },
        Action::Delete(id) => {
            if state.position(id).is_none() {
                return Rc::clone(state);
            }
            let posts = state
                .posts
                .iter()
                .filter(|post| &post.id != id)
                .cloned()
                .collect();
            Rc::new(PostsState::new(posts))
        }
        Action::Auth(_) | Action::Logout => Rc::clone(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn feed(ids: &[&str]) -> Rc<PostsState> {
        Rc::new(PostsState::new(
            ids.iter().map(|id| Post::new(*id, format!("post {id}"))).collect(),
        ))
    }

    fn ids(state: &PostsState) -> Vec<&str> {
        state.posts().iter().map(|post| post.id.as_str()).collect()
    }

    #[test_case(&["a", "b"], Action::FetchAll(vec![Post::new("c", "c"), Post::new("d", "d")]), &["c", "d"], false ; "fetch all swaps the feed")]
    #[test_case(&["a"], Action::FetchAll(vec![]), &[], false ; "fetch all with empty snapshot")]
    #[test_case(&["a", "b"], Action::Create(Post::new("c", "new")), &["a", "b", "c"], false ; "create appends")]
    #[test_case(&["a", "b"], Action::Create(Post::new("a", "again")), &["a", "b"], false ; "create with known id replaces in place")]
    #[test_case(&["a", "b", "c"], Action::Update(Post::new("b", "edited")), &["a", "b", "c"], false ; "update keeps order")]
    #[test_case(&["a"], Action::Update(Post::new("zzz", "x")), &["a"], true ; "update for unknown post")]
    #[test_case(&["a", "b", "c"], Action::Delete(PostId::from("b")), &["a", "c"], false ; "delete removes")]
    #[test_case(&["a"], Action::Delete(PostId::from("zzz")), &["a"], true ; "delete for unknown post")]
    #[test_case(&["a"], Action::Logout, &["a"], true ; "logout")]
    #[test_case(&["a"], Action::Auth(None), &["a"], true ; "auth")]
    fn reducer_table(before: &[&str], action: Action, after: &[&str], unchanged: bool) {
        let state = feed(before);
        let next = posts_reducer(&state, &action);

        assert_eq!(ids(&next), after);
        assert_eq!(Rc::ptr_eq(&state, &next), unchanged);
        assert_eq!(ids(&state), before);
    }

    #[test]
    fn create_with_existing_id_takes_new_fields() {
        let next = posts_reducer(&feed(&["a", "b"]), &Action::Create(Post::new("a", "again")));
        assert_eq!(next.posts()[0].title, "again");
    }

    #[test]
    fn update_replaces_only_matching_post() {
        let state = feed(&["a", "b", "c"]);
        let mut updated = Post::new("b", "edited");
        updated.like_count = 4;

        let next = posts_reducer(&state, &Action::Update(updated.clone()));
        assert_eq!(next.len(), 3);
        assert_eq!(ids(&next), vec!["a", "b", "c"]);
        assert_eq!(next.find(&PostId::from("b")), Some(&updated));
        assert_eq!(next.posts()[0], state.posts()[0]);
        assert_eq!(next.posts()[2], state.posts()[2]);
        assert!(!Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn delete_is_idempotent() {
        let state = feed(&["a", "b"]);
        let action = Action::Delete(PostId::from("a"));
        let once = posts_reducer(&state, &action);
        let twice = posts_reducer(&once, &action);
        assert_eq!(once, twice);
        assert!(Rc::ptr_eq(&once, &twice));
    }
}
