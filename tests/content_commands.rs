// tests/content_commands.rs
mod support;

use mebel_blog::application::{
    commands::{
        authors::{
            CreateAuthorCommand, DeleteAuthorCommand, ImportAuthorItem, UpdateAuthorCommand,
        },
        categories::{CreateCategoryCommand, DeleteCategoryCommand, ImportCategoryItem},
        posts::{CreatePostCommand, DeletePostCommand, ImportPostItem, UpdatePostCommand},
    },
    error::ApplicationError,
    queries::posts::{GetPostByIdQuery, GetPostBySlugQuery},
};
use mebel_blog::domain::errors::DomainError;
use std::sync::Arc;
use support::{InMemoryBlog, build_services};

fn import_item(title: &str, category: &str) -> ImportPostItem {
    ImportPostItem {
        title: title.into(),
        content: format!("{title}: текст"),
        category: category.into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn category_lookup_by_name_is_case_insensitive() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);

    let first = services
        .category_commands
        .create_category(CreateCategoryCommand {
            name: "Детская".into(),
            slug: None,
        })
        .await
        .unwrap();
    let again = services
        .category_commands
        .create_category(CreateCategoryCommand {
            name: "  ДЕТСКАЯ ".into(),
            slug: None,
        })
        .await
        .unwrap();

    assert_eq!(first.id, again.id);
    assert_eq!(store.category_count(), 1);
}

#[tokio::test]
async fn post_requires_category_and_content() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);

    let no_category = services
        .post_commands
        .create_post(CreatePostCommand {
            title: "Стол".into(),
            content: "Текст".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    let blank_content = services
        .post_commands
        .create_post(CreatePostCommand {
            title: "Стол".into(),
            content: "   ".into(),
            category_name: Some("Кухня".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    let unknown_category = services
        .post_commands
        .create_post(CreatePostCommand {
            title: "Стол".into(),
            content: "Текст".into(),
            category_id: Some(999),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(no_category, ApplicationError::Validation(_)));
    assert!(matches!(blank_content, ApplicationError::Validation(_)));
    assert!(matches!(unknown_category, ApplicationError::NotFound(_)));
    assert_eq!(store.post_count(), 0);
}

#[tokio::test]
async fn blank_optional_fields_are_cleared_on_update() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);
    let created = services
        .post_commands
        .create_post(CreatePostCommand {
            title: "Полка".into(),
            subtitle: Some("Навесная".into()),
            content: "Текст".into(),
            category_name: Some("Кухня".into()),
            author_name: Some("Мария".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let updated = services
        .post_commands
        .update_post(UpdatePostCommand {
            id: created.id,
            subtitle: Some("  ".into()),
            remove_author: true,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(updated.subtitle, None);
    assert!(updated.author.is_none());
    assert_eq!(updated.slug, "polka");
}

#[tokio::test]
async fn category_with_posts_cannot_be_deleted() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);
    let created = services
        .post_commands
        .create_post(CreatePostCommand {
            title: "Тумба".into(),
            content: "Текст".into(),
            category_name: Some("Спальня".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let err = services
        .category_commands
        .delete_category(DeleteCategoryCommand {
            id: created.category.id,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(DomainError::Conflict(_))), "{err:?}");

    services
        .post_commands
        .delete_post(DeletePostCommand { id: created.id })
        .await
        .unwrap();
    services
        .category_commands
        .delete_category(DeleteCategoryCommand {
            id: created.category.id,
        })
        .await
        .unwrap();
    assert_eq!(store.category_count(), 0);
}

#[tokio::test]
async fn deleting_an_author_detaches_their_posts() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);
    let author = services
        .author_commands
        .create_author(CreateAuthorCommand {
            name: "Ольга Ёжикова".into(),
            slug: None,
            bio: Some("Дизайнер".into()),
            avatar_url: None,
        })
        .await
        .unwrap();
    assert_eq!(author.slug, "olga-ezhikova");

    let created = services
        .post_commands
        .create_post(CreatePostCommand {
            title: "Комод".into(),
            content: "Текст".into(),
            category_name: Some("Спальня".into()),
            author_id: Some(author.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.author.as_ref().map(|a| a.id), Some(author.id));

    services
        .author_commands
        .delete_author(DeleteAuthorCommand { id: author.id })
        .await
        .unwrap();

    let post = services
        .post_queries
        .get_post_by_slug(GetPostBySlugQuery {
            slug: created.slug.clone(),
        })
        .await
        .unwrap();
    assert!(post.author.is_none());
    assert_eq!(store.author_count(), 0);
}

#[tokio::test]
async fn author_bio_update_keeps_slug() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);
    let author = services
        .author_commands
        .create_author(CreateAuthorCommand {
            name: "Пётр".into(),
            slug: None,
            bio: None,
            avatar_url: None,
        })
        .await
        .unwrap();

    let updated = services
        .author_commands
        .update_author(UpdateAuthorCommand {
            id: author.id,
            name: Some("Пётр".into()),
            slug: None,
            bio: Some("Столяр".into()),
            avatar_url: None,
        })
        .await
        .unwrap();

    assert_eq!(updated.slug, "petr");
    assert_eq!(updated.bio.as_deref(), Some("Столяр"));
}

#[tokio::test]
async fn invalid_import_writes_nothing() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);

    let err = services
        .post_commands
        .import_posts(vec![
            import_item("Кровать", "Спальня"),
            import_item("   ", "Спальня"),
        ])
        .await
        .unwrap_err();

    match err {
        ApplicationError::Validation(message) => assert!(message.starts_with("item 1:"), "{message}"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(store.post_count(), 0);
    assert_eq!(store.category_count(), 0);
}

#[tokio::test]
async fn import_upserts_by_slug() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);

    let first = services
        .post_commands
        .import_posts(vec![
            import_item("Кровать", "Спальня"),
            ImportPostItem {
                author: Some("Анна".into()),
                ..import_item("Диван", "Гостиная")
            },
        ])
        .await
        .unwrap();
    assert_eq!((first.created, first.updated), (2, 0));
    assert_eq!(store.category_count(), 2);
    assert_eq!(store.author_count(), 1);

    let second = services
        .post_commands
        .import_posts(vec![
            ImportPostItem {
                content: "Обновлённый текст".into(),
                ..import_item("Кровать", "Спальня")
            },
            import_item("Шкаф", "спальня"),
        ])
        .await
        .unwrap();

    assert_eq!((second.created, second.updated), (1, 1));
    assert_eq!(second.posts[0].slug, "krovat");
    assert_eq!(second.posts[0].content, "Обновлённый текст");
    assert_eq!(second.posts[1].category.slug, "spalnya");
    assert_eq!(store.post_count(), 3);
    assert_eq!(store.category_count(), 2);
}

#[tokio::test]
async fn import_accepts_missing_content() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);

    let report = services
        .post_commands
        .import_posts(vec![ImportPostItem {
            content: String::new(),
            ..import_item("Садовая мебель", "Сад")
        }])
        .await
        .unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.posts[0].slug, "sadovaya-mebel");
    assert_eq!(report.posts[0].content, "");
}

#[tokio::test]
async fn category_import_finds_or_creates_by_slug() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);

    let imported = services
        .category_commands
        .import_categories(
            ["Кухня", "Спальня", "кухня"]
                .into_iter()
                .map(|name| ImportCategoryItem { name: name.into() })
                .collect(),
        )
        .await
        .unwrap();

    assert_eq!(imported.len(), 3);
    assert_eq!(imported[0].slug, "kuhnya");
    assert_eq!(imported[1].slug, "spalnya");
    assert_eq!(imported[2].id, imported[0].id);
    assert_eq!(store.category_count(), 2);
}

#[tokio::test]
async fn author_import_keeps_existing_rows() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);
    let anna = services
        .author_commands
        .create_author(CreateAuthorCommand {
            name: "Анна".into(),
            slug: None,
            bio: Some("Дизайнер".into()),
            avatar_url: None,
        })
        .await
        .unwrap();

    let imported = services
        .author_commands
        .import_authors(vec![
            ImportAuthorItem {
                name: "Анна".into(),
                bio: Some("Другая биография".into()),
                ..Default::default()
            },
            ImportAuthorItem {
                name: "Олег".into(),
                bio: Some("Столяр".into()),
                avatar_url: Some("/img/oleg.png".into()),
            },
        ])
        .await
        .unwrap();

    assert_eq!(imported[0].id, anna.id);
    assert_eq!(imported[0].bio.as_deref(), Some("Дизайнер"));
    assert_eq!(imported[1].slug, "oleg");
    assert_eq!(imported[1].avatar_url.as_deref(), Some("/img/oleg.png"));
    assert_eq!(store.author_count(), 2);
}

#[tokio::test]
async fn invalid_author_import_writes_nothing() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);

    let err = services
        .author_commands
        .import_authors(vec![
            ImportAuthorItem {
                name: "Пётр".into(),
                ..Default::default()
            },
            ImportAuthorItem {
                name: "  ".into(),
                ..Default::default()
            },
        ])
        .await
        .unwrap_err();

    match err {
        ApplicationError::Validation(message) => assert!(message.starts_with("item 1:"), "{message}"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(store.author_count(), 0);
}

#[tokio::test]
async fn category_created_concurrently_is_returned_not_conflict() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);
    let first = services
        .category_commands
        .create_category(CreateCategoryCommand {
            name: "Кухня".into(),
            slug: None,
        })
        .await
        .unwrap();

    store.miss_name_lookups(1);
    let again = services
        .category_commands
        .create_category(CreateCategoryCommand {
            name: "кухня".into(),
            slug: None,
        })
        .await
        .unwrap();

    assert_eq!(again.id, first.id);
    assert_eq!(store.category_count(), 1);
}

#[tokio::test]
async fn author_created_concurrently_is_returned_not_conflict() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);
    let command = || CreateAuthorCommand {
        name: "Мария".into(),
        slug: None,
        bio: None,
        avatar_url: None,
    };
    let first = services.author_commands.create_author(command()).await.unwrap();

    store.miss_name_lookups(1);
    let again = services.author_commands.create_author(command()).await.unwrap();

    assert_eq!(again.id, first.id);
    assert_eq!(again.slug, "mariya");
    assert_eq!(store.author_count(), 1);
}

#[tokio::test]
async fn post_is_loaded_by_id_with_relations() {
    let store = Arc::new(InMemoryBlog::default());
    let services = build_services(&store);
    let created = services
        .post_commands
        .create_post(CreatePostCommand {
            title: "Комод".into(),
            content: "Текст".into(),
            category_name: Some("Спальня".into()),
            author_name: Some("Анна".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let loaded = services
        .post_queries
        .get_post_by_id(GetPostByIdQuery { id: created.id })
        .await
        .unwrap();
    assert_eq!(loaded.slug, "komod");
    assert_eq!(loaded.category.slug, "spalnya");
    assert_eq!(loaded.author.map(|a| a.name).as_deref(), Some("Анна"));

    let missing = services
        .post_queries
        .get_post_by_id(GetPostByIdQuery { id: created.id + 100 })
        .await
        .unwrap_err();
    assert!(matches!(missing, ApplicationError::NotFound(_)));
}
