use anyhow::{Context, Result, bail};
use clap::Args;
use shared::models::{Post, PostDraft, PostId, Timestamp};
use shared::store::thunks;

use super::Session;

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long, short)]
    pub title: String,

    #[arg(long, short, default_value = "")]
    pub message: String,

    /// Author id; defaults to the signed-in user
    #[arg(long)]
    pub creator: Option<String>,

    /// Comma separated tags, e.g. `rust,yew`
    #[arg(long)]
    pub tags: Option<String>,

    /// Image URL or data URL shown with the post
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Id of the post to change
    pub id: String,

    #[arg(long, short)]
    pub title: Option<String>,

    #[arg(long, short)]
    pub message: Option<String>,

    /// Replaces all tags (comma separated)
    #[arg(long)]
    pub tags: Option<String>,

    #[arg(long)]
    pub file: Option<String>,
}

/// One-line summary of a post for terminal output.
pub fn format_post(post: &Post, now: Timestamp) -> String {
    let author = post.name.as_deref().unwrap_or(&post.creator);
    let mut line = format!(
        "{}  {}  [{} likes]",
        post.id,
        post.title,
        post.total_likes()
    );
    if !author.is_empty() {
        line.push_str(&format!("  by {author}"));
    }
    if let Some(created) = post.created_at {
        line.push_str(&format!(", {}", created.relative_to(now.0)));
    }
    if !post.tags.is_empty() {
        let tags: Vec<String> = post.tags.iter().map(|tag| format!("#{tag}")).collect();
        line.push_str(&format!("  {}", tags.join(" ")));
    }
    line
}

fn apply_update(mut draft: PostDraft, args: UpdateArgs) -> PostDraft {
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(message) = args.message {
        draft.message = message;
    }
    if let Some(tags) = args.tags {
        draft.tags = PostDraft::parse_tags(&tags);
    }
    if let Some(file) = args.file {
        draft.selected_file = Some(file).filter(|file| !file.trim().is_empty());
    }
    draft
}

pub async fn list(session: &Session) -> Result<()> {
    let posts = thunks::get_posts(&session.client, &session.store)
        .await
        .context("failed to fetch posts")?;

    if posts.is_empty() {
        println!("No posts yet.");
        return Ok(());
    }
    let now = Timestamp::now();
    for post in &posts {
        println!("{}", format_post(post, now));
    }
    Ok(())
}

pub async fn create(session: &Session, args: CreateArgs) -> Result<()> {
    let state = session.store.state();
    let creator = match args.creator {
        Some(creator) => creator,
        None => state
            .auth
            .auth_data
            .as_ref()
            .and_then(|profile| profile.user_id().or(profile.display_name()))
            .map(ToString::to_string)
            .context("no creator given and nobody is signed in; pass --creator or run `postboard login`")?,
    };

    let draft = PostDraft {
        title: args.title,
        message: args.message,
        creator,
        tags: args.tags.as_deref().map(PostDraft::parse_tags).unwrap_or_default(),
        selected_file: args.file,
    };
    if draft.is_blank() {
        bail!("a post needs a title or a message");
    }

    let post = thunks::create_post(&session.client, &draft, &session.store)
        .await
        .context("failed to create post")?;
    println!("Created {}", format_post(&post, Timestamp::now()));
    Ok(())
}

pub async fn update(session: &Session, args: UpdateArgs) -> Result<()> {
    let id = PostId::new(args.id.clone());
    thunks::get_posts(&session.client, &session.store)
        .await
        .context("failed to fetch posts")?;
    let current = session
        .store
        .state()
        .posts
        .find(&id)
        .map(Post::to_draft)
        .with_context(|| format!("no post with id {id}"))?;

    let draft = apply_update(current, args);
    let post = thunks::update_post(&session.client, &id, &draft, &session.store)
        .await
        .context("failed to update post")?;
    println!("Updated {}", format_post(&post, Timestamp::now()));
    Ok(())
}

pub async fn delete(session: &Session, id: String) -> Result<()> {
    let id = PostId::new(id);
    thunks::delete_post(&session.client, &id, &session.store)
        .await
        .context("failed to delete post")?;
    println!("Deleted {id}");
    Ok(())
}

pub async fn like(session: &Session, id: String) -> Result<()> {
    let id = PostId::new(id);
    let post = thunks::like_post(&session.client, &id, &session.store)
        .await
        .context("failed to like post")?;
    println!("Liked {}", format_post(&post, Timestamp::now()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        "2024-05-01T12:00:00Z".parse().map(Timestamp).unwrap()
    }

    #[test]
    fn formats_a_full_post() {
        let mut post = Post::new("p1", "Hello");
        post.name = Some("Ana".into());
        post.like_count = 3;
        post.tags = vec!["rust".into(), "cli".into()];
        post.created_at = Some("2024-05-01T10:00:00Z".parse().map(Timestamp).unwrap());

        assert_eq!(
            format_post(&post, now()),
            "p1  Hello  [3 likes]  by Ana, 2 hours ago  #rust #cli"
        );
    }

    #[test]
    fn formats_a_bare_post() {
        assert_eq!(
            format_post(&Post::new("p2", "Bare"), now()),
            "p2  Bare  [0 likes]"
        );
    }

    #[test]
    fn update_only_touches_given_fields() {
        let draft = PostDraft {
            title: "old".into(),
            message: "keep".into(),
            creator: "u1".into(),
            tags: vec!["a".into()],
            selected_file: Some("https://img".into()),
        };
        let args = UpdateArgs {
            id: "p1".into(),
            title: Some("new".into()),
            message: None,
            tags: Some("x, y".into()),
            file: Some(String::new()),
        };

        let updated = apply_update(draft, args);
        assert_eq!(updated.title, "new");
        assert_eq!(updated.message, "keep");
        assert_eq!(updated.tags, vec!["x", "y"]);
        assert_eq!(updated.selected_file, None);
        assert_eq!(updated.creator, "u1");
    }
}
