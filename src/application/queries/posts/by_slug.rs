use super::PostQueryService;
use crate::application::{
    dto::PostDto,
    error::{ApplicationError, ApplicationResult},
    queries::path_slug,
};

pub struct GetPostBySlugQuery {
    pub slug: String,
}

impl PostQueryService {
    pub async fn get_post_by_slug(&self, query: GetPostBySlugQuery) -> ApplicationResult<PostDto> {
        let slug = path_slug(&query.slug, "post")?;
        self.read_repo
            .find_by_slug(&slug)
            .await?
            .map(PostDto::from)
            .ok_or_else(|| ApplicationError::not_found("post not found"))
    }
}
