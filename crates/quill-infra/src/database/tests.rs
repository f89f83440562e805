#[cfg(test)]
mod tests {
    use crate::database::entity::{post, user};
    use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};
    use quill_core::domain::Post;
    use quill_core::ports::{BaseRepository, PostRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                author_id,
                title: "Test Post".to_owned(),
                content: "Content".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.author_id, author_id);
    }

    #[tokio::test]
    async fn find_user_by_username() {
        let user_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                username: "alice".to_owned(),
                password_hash: "$argon2id$opaque".to_owned(),
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let user = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn find_by_author_maps_all_rows() {
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let rows: Vec<post::Model> = (0..2)
            .map(|i| post::Model {
                id: uuid::Uuid::new_v4(),
                author_id,
                title: format!("post {i}"),
                content: String::new(),
                created_at: now.into(),
                updated_at: now.into(),
            })
            .collect();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![rows])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let posts = repo.find_by_author(author_id).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.author_id == author_id));
    }
}
