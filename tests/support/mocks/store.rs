// tests/support/mocks/store.rs
//! In-memory stand-in for the Postgres repositories. Uniqueness and
//! foreign-key rules mirror the migration.
use async_trait::async_trait;
use mebel_blog::domain::{
    author::{Author, AuthorId, AuthorName, AuthorRepository, AuthorUpdate, NewAuthor},
    category::{Category, CategoryId, CategoryName, CategoryRepository, CategoryUpdate, NewCategory},
    errors::{DomainError, DomainResult},
    listing::{OrderSpec, PostFilter, PostScope},
    post::{
        NewPost, Post, PostId, PostReadRepository, PostUpdate, PostView, PostWriteRepository,
        RelatedRef,
    },
    slug::{Slug, SlugNamespace, SlugRepository},
};
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

#[derive(Default)]
struct BlogState {
    last_id: i64,
    posts: Vec<Post>,
    categories: Vec<Category>,
    authors: Vec<Author>,
}

impl BlogState {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn view(&self, post: &Post) -> PostView {
        let category = self
            .categories
            .iter()
            .find(|c| c.id == post.category_id)
            .map(RelatedRef::from)
            .expect("post without category");
        let author = post
            .author_id
            .and_then(|id| self.authors.iter().find(|a| a.id == id))
            .map(RelatedRef::from);
        PostView {
            post: post.clone(),
            category,
            author,
        }
    }

    fn slug_taken(&self, namespace: SlugNamespace, slug: &str, exclude_id: Option<i64>) -> bool {
        let other = |id: i64| Some(id) != exclude_id;
        match namespace {
            SlugNamespace::Post => self
                .posts
                .iter()
                .any(|p| p.slug.as_str() == slug && other(p.id.0)),
            SlugNamespace::Category => self
                .categories
                .iter()
                .any(|c| c.slug.as_str() == slug && other(c.id.0)),
            SlugNamespace::Author => self
                .authors
                .iter()
                .any(|a| a.slug.as_str() == slug && other(a.id.0)),
        }
    }
}

#[derive(Default)]
pub struct InMemoryBlog {
    state: Mutex<BlogState>,
    page_fetches: AtomicUsize,
    forced_slug_conflicts: AtomicUsize,
    missed_name_lookups: AtomicUsize,
}

impl InMemoryBlog {
    /// Number of `fetch_page` calls served so far.
    pub fn page_fetches(&self) -> usize {
        self.page_fetches.load(Ordering::SeqCst)
    }

    /// Make the next `n` slug writes fail as if a concurrent writer had just
    /// taken the slug.
    pub fn force_slug_conflicts(&self, n: usize) {
        self.forced_slug_conflicts.store(n, Ordering::SeqCst);
    }

    /// Make the next `n` category or author name lookups miss, as if the row
    /// were inserted by another request right after the lookup.
    pub fn miss_name_lookups(&self, n: usize) {
        self.missed_name_lookups.store(n, Ordering::SeqCst);
    }

    fn take_missed_lookup(&self) -> bool {
        self.missed_name_lookups
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    pub fn post_count(&self) -> usize {
        self.state.lock().unwrap().posts.len()
    }

    pub fn category_count(&self) -> usize {
        self.state.lock().unwrap().categories.len()
    }

    pub fn author_count(&self) -> usize {
        self.state.lock().unwrap().authors.len()
    }

    fn take_forced_conflict(&self) -> bool {
        self.forced_slug_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn guard_slug(
        &self,
        state: &BlogState,
        namespace: SlugNamespace,
        slug: &Slug,
        own_id: Option<i64>,
    ) -> DomainResult<()> {
        if self.take_forced_conflict() || state.slug_taken(namespace, slug.as_str(), own_id) {
            return Err(DomainError::SlugTaken(namespace));
        }
        Ok(())
    }
}

#[async_trait]
impl SlugRepository for InMemoryBlog {
    async fn exists_by_slug(
        &self,
        namespace: SlugNamespace,
        candidate: &str,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .slug_taken(namespace, candidate, exclude_id))
    }
}

#[async_trait]
impl PostWriteRepository for InMemoryBlog {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        let mut state = self.state.lock().unwrap();
        self.guard_slug(&state, SlugNamespace::Post, &post.slug, None)?;
        if !state.categories.iter().any(|c| c.id == post.category_id) {
            return Err(DomainError::NotFound("category not found".into()));
        }
        let id = PostId::new(state.next_id())?;
        let stored = Post {
            id,
            title: post.title,
            subtitle: post.subtitle,
            slug: post.slug,
            content: post.content,
            image_url: post.image_url,
            meta_title: post.meta_title,
            meta_description: post.meta_description,
            category_id: post.category_id,
            author_id: post.author_id,
            published_at: post.published_at,
            created_at: post.created_at,
            updated_at: post.created_at,
        };
        state.posts.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Post> {
        let mut state = self.state.lock().unwrap();
        if let Some(slug) = &update.slug {
            self.guard_slug(&state, SlugNamespace::Post, slug, Some(update.id.0))?;
        }
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == update.id)
            .ok_or_else(|| DomainError::NotFound("post not found".into()))?;
        update.apply_to(post);
        Ok(post.clone())
    }

    async fn delete(&self, id: PostId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        if state.posts.len() == before {
            return Err(DomainError::NotFound("post not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PostReadRepository for InMemoryBlog {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<PostView>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .posts
            .iter()
            .find(|p| &p.slug == slug)
            .map(|p| state.view(p)))
    }

    async fn fetch_page(
        &self,
        filter: &PostFilter,
        skip: u64,
        take: u32,
        order: OrderSpec,
    ) -> DomainResult<(Vec<PostView>, u64)> {
        self.page_fetches.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();

        let mut views: Vec<PostView> = state
            .posts
            .iter()
            .filter(|p| match filter.scope {
                PostScope::All => true,
                PostScope::Category(id) => p.category_id == id,
                PostScope::Author(id) => p.author_id == Some(id),
            })
            .map(|p| state.view(p))
            .filter(|v| {
                filter.text.matches(&[
                    Some(v.post.title.as_str()),
                    v.post.subtitle.as_deref(),
                    Some(v.post.content.as_str()),
                    v.author.as_ref().map(|a| a.name.as_str()),
                ])
            })
            .collect();

        order.sort(&mut views, |v| (v.post.published_at, v.post.title.as_str()));
        let total = views.len() as u64;
        let page = views
            .into_iter()
            .skip(usize::try_from(skip).unwrap())
            .take(take as usize)
            .collect();
        Ok((page, total))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryBlog {
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        let state = self.state.lock().unwrap();
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Category>> {
        let state = self.state.lock().unwrap();
        Ok(state.categories.iter().find(|c| &c.slug == slug).cloned())
    }

    async fn find_by_name(&self, name: &CategoryName) -> DomainResult<Option<Category>> {
        if self.take_missed_lookup() {
            return Ok(None);
        }
        let state = self.state.lock().unwrap();
        let wanted = name.as_str().to_lowercase();
        Ok(state
            .categories
            .iter()
            .find(|c| c.name.as_str().to_lowercase() == wanted)
            .cloned())
    }

    async fn list(&self, order: OrderSpec) -> DomainResult<Vec<Category>> {
        let mut categories = self.state.lock().unwrap().categories.clone();
        order.sort(&mut categories, |c| (c.created_at, c.name.as_str()));
        Ok(categories)
    }

    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let mut state = self.state.lock().unwrap();
        self.guard_slug(&state, SlugNamespace::Category, &category.slug, None)?;
        let wanted = category.name.as_str().to_lowercase();
        if state.categories.iter().any(|c| c.name.as_str().to_lowercase() == wanted) {
            return Err(DomainError::Conflict("category name already exists".into()));
        }
        let id = CategoryId::new(state.next_id())?;
        let stored = Category {
            id,
            name: category.name,
            slug: category.slug,
            created_at: category.created_at,
        };
        state.categories.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category> {
        let mut state = self.state.lock().unwrap();
        if let Some(slug) = &update.slug {
            self.guard_slug(&state, SlugNamespace::Category, slug, Some(update.id.0))?;
        }
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or_else(|| DomainError::NotFound("category not found".into()))?;
        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(slug) = update.slug {
            category.slug = slug;
        }
        Ok(category.clone())
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.posts.iter().any(|p| p.category_id == id) {
            return Err(DomainError::Conflict("category still has posts".into()));
        }
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        if state.categories.len() == before {
            return Err(DomainError::NotFound("category not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthorRepository for InMemoryBlog {
    async fn find_by_id(&self, id: AuthorId) -> DomainResult<Option<Author>> {
        let state = self.state.lock().unwrap();
        Ok(state.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Author>> {
        let state = self.state.lock().unwrap();
        Ok(state.authors.iter().find(|a| &a.slug == slug).cloned())
    }

    async fn find_by_name(&self, name: &AuthorName) -> DomainResult<Option<Author>> {
        if self.take_missed_lookup() {
            return Ok(None);
        }
        let state = self.state.lock().unwrap();
        let wanted = name.as_str().to_lowercase();
        Ok(state
            .authors
            .iter()
            .find(|a| a.name.as_str().to_lowercase() == wanted)
            .cloned())
    }

    async fn list(&self, order: OrderSpec) -> DomainResult<Vec<Author>> {
        let mut authors = self.state.lock().unwrap().authors.clone();
        order.sort(&mut authors, |a| (a.created_at, a.name.as_str()));
        Ok(authors)
    }

    async fn insert(&self, author: NewAuthor) -> DomainResult<Author> {
        let mut state = self.state.lock().unwrap();
        self.guard_slug(&state, SlugNamespace::Author, &author.slug, None)?;
        let wanted = author.name.as_str().to_lowercase();
        if state.authors.iter().any(|a| a.name.as_str().to_lowercase() == wanted) {
            return Err(DomainError::Conflict("author name already exists".into()));
        }
        let id = AuthorId::new(state.next_id())?;
        let stored = Author {
            id,
            name: author.name,
            slug: author.slug,
            bio: author.bio,
            avatar_url: author.avatar_url,
            created_at: author.created_at,
        };
        state.authors.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: AuthorUpdate) -> DomainResult<Author> {
        let mut state = self.state.lock().unwrap();
        if let Some(slug) = &update.slug {
            self.guard_slug(&state, SlugNamespace::Author, slug, Some(update.id.0))?;
        }
        let author = state
            .authors
            .iter_mut()
            .find(|a| a.id == update.id)
            .ok_or_else(|| DomainError::NotFound("author not found".into()))?;
        if let Some(name) = update.name {
            author.name = name;
        }
        if let Some(slug) = update.slug {
            author.slug = slug;
        }
        if let Some(bio) = update.bio {
            author.bio = bio;
        }
        if let Some(avatar_url) = update.avatar_url {
            author.avatar_url = avatar_url;
        }
        Ok(author.clone())
    }

    async fn delete(&self, id: AuthorId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.authors.len();
        state.authors.retain(|a| a.id != id);
        if state.authors.len() == before {
            return Err(DomainError::NotFound("author not found".into()));
        }
        for post in state.posts.iter_mut().filter(|p| p.author_id == Some(id)) {
            post.author_id = None;
        }
        Ok(())
    }
}
