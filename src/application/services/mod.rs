// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            authors::AuthorCommandService, categories::CategoryCommandService,
            posts::PostCommandService,
        },
        ports::{time::Clock, util::SlugGenerator},
        queries::{
            authors::AuthorQueryService, categories::CategoryQueryService,
            forms::FormQueryService, posts::PostQueryService,
        },
    },
    domain::{
        author::AuthorRepository,
        category::CategoryRepository,
        post::{PostReadRepository, PostWriteRepository},
        slug::{SlugRepository, SlugService},
    },
};

pub struct ApplicationServices {
    pub post_commands: Arc<PostCommandService>,
    pub post_queries: Arc<PostQueryService>,
    pub category_commands: Arc<CategoryCommandService>,
    pub category_queries: Arc<CategoryQueryService>,
    pub author_commands: Arc<AuthorCommandService>,
    pub author_queries: Arc<AuthorQueryService>,
    pub forms: Arc<FormQueryService>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        post_write_repo: Arc<dyn PostWriteRepository>,
        post_read_repo: Arc<dyn PostReadRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        author_repo: Arc<dyn AuthorRepository>,
        slug_repo: Arc<dyn SlugRepository>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        let slug_service = Arc::new(SlugService::new(slug_repo, Arc::clone(&slugger)));

        let category_commands = Arc::new(CategoryCommandService::new(
            Arc::clone(&category_repo),
            Arc::clone(&slug_service),
            Arc::clone(&clock),
        ));
        let author_commands = Arc::new(AuthorCommandService::new(
            Arc::clone(&author_repo),
            Arc::clone(&slug_service),
            Arc::clone(&clock),
        ));
        let post_commands = Arc::new(PostCommandService::new(
            post_write_repo,
            Arc::clone(&post_read_repo),
            Arc::clone(&category_repo),
            Arc::clone(&author_repo),
            Arc::clone(&category_commands),
            Arc::clone(&author_commands),
            slug_service,
            clock,
        ));

        let post_queries = Arc::new(PostQueryService::new(
            post_read_repo,
            Arc::clone(&category_repo),
            Arc::clone(&author_repo),
        ));
        let category_queries = Arc::new(CategoryQueryService::new(category_repo));
        let author_queries = Arc::new(AuthorQueryService::new(author_repo));
        let forms = Arc::new(FormQueryService::new(slugger));

        Self {
            post_commands,
            post_queries,
            category_commands,
            category_queries,
            author_commands,
            author_queries,
            forms,
        }
    }
}
