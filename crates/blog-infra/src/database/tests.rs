use blog_core::domain::{Author, BlogPost, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use crate::database::entity::post;
use crate::database::{DatabaseConfig, SqlPostRepository, connect, ensure_schema};
use crate::seed::{FixedPostFactory, PostFactory, seed_posts};

fn model(title: &str) -> post::Model {
    post::Model {
        id: uuid::Uuid::new_v4(),
        author_first_name: "Jane".to_owned(),
        author_last_name: "Doe".to_owned(),
        title: title.to_owned(),
        content: "Content".to_owned(),
        created: chrono::Utc::now().into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let row = model("Test Post");
    let post_id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();

    let repo = SqlPostRepository::new(db);

    let result: Option<BlogPost> = repo.find_by_id(post_id).await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.author.first_name, "Jane");
    assert_eq!(post.author.last_name, "Doe");
}

#[tokio::test]
async fn test_list_maps_every_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model("a"), model("b"), model("c")]])
        .into_connection();

    let posts = SqlPostRepository::new(db).list().await.unwrap();

    let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["a", "b", "c"]);
}

#[tokio::test]
async fn test_delete_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let err = SqlPostRepository::new(db)
        .delete(uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_update_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let post: BlogPost = model("gone").into();
    let err = SqlPostRepository::new(db).update(post).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

async fn sqlite_repo(dir: &tempfile::TempDir) -> SqlPostRepository {
    let path = dir.path().join("posts.db");
    let config = DatabaseConfig::new(format!("sqlite://{}?mode=rwc", path.display()));
    let conn = connect(&config).await.unwrap();
    ensure_schema(&conn).await.unwrap();
    SqlPostRepository::new(conn)
}

#[tokio::test]
async fn test_sqlite_crud_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let repo = sqlite_repo(&dir).await;

    let seeded = seed_posts(&repo, &mut FixedPostFactory::default(), 4)
        .await
        .unwrap();
    assert_eq!(repo.count().await.unwrap(), 4);
    assert_eq!(repo.list().await.unwrap().len(), 4);

    let mut target = seeded[0].clone();
    target.title = "Updated".to_string();
    target.author = Author {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
    };
    repo.update(target.clone()).await.unwrap();

    let stored = repo.find_by_id(target.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Updated");
    assert_eq!(stored.author.last_name, "Lovelace");
    assert_eq!(stored.created.timestamp(), seeded[0].created.timestamp());

    repo.delete(target.id).await.unwrap();
    assert!(repo.find_by_id(target.id).await.unwrap().is_none());
    assert!(matches!(
        repo.delete(target.id).await,
        Err(RepoError::NotFound)
    ));

    repo.clear().await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 0);
    assert!(repo.find_one().await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_fields_on_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let patch = PostPatch {
        title: Some("gone".to_string()),
        ..PostPatch::default()
    };
    let err = SqlPostRepository::new(db)
        .update_fields(uuid::Uuid::new_v4(), patch)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_sqlite_update_fields_writes_only_patched_columns() {
    let dir = tempfile::tempdir().unwrap();
    let repo = sqlite_repo(&dir).await;
    let original = repo
        .insert(BlogPost::create(FixedPostFactory::default().generate()))
        .await
        .unwrap();

    // Another request changes the content; a later title-only write must keep it.
    repo.update_fields(
        original.id,
        PostPatch {
            content: Some("written meanwhile".to_string()),
            ..PostPatch::default()
        },
    )
    .await
    .unwrap();
    repo.update_fields(
        original.id,
        PostPatch {
            title: Some("only the title".to_string()),
            ..PostPatch::default()
        },
    )
    .await
    .unwrap();

    let stored = repo.find_by_id(original.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "only the title");
    assert_eq!(stored.content, "written meanwhile");
    assert_eq!(stored.author, original.author);

    repo.update_fields(original.id, PostPatch::default())
        .await
        .unwrap();
    assert!(matches!(
        repo.update_fields(uuid::Uuid::new_v4(), PostPatch::default())
            .await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn test_sqlite_seeds_large_batches() {
    let dir = tempfile::tempdir().unwrap();
    let repo = sqlite_repo(&dir).await;

    seed_posts(&repo, &mut FixedPostFactory::default(), 6000)
        .await
        .unwrap();
    assert_eq!(repo.count().await.unwrap(), 6000);
}

#[tokio::test]
async fn test_sqlite_insert_many_is_all_or_nothing_across_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let repo = sqlite_repo(&dir).await;
    let existing = repo
        .insert(BlogPost::create(FixedPostFactory::default().generate()))
        .await
        .unwrap();

    let mut factory = FixedPostFactory::default();
    let mut batch: Vec<BlogPost> = (0..2500)
        .map(|_| BlogPost::create(factory.generate()))
        .collect();
    batch.push(existing);

    let err = repo.insert_many(batch).await.unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));
    assert_eq!(repo.count().await.unwrap(), 1);
}
