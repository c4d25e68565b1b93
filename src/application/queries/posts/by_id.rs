use super::PostQueryService;
use crate::{
    application::{
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::post::{PostId, RelatedRef},
};

/// Admin lookup used by the edit form.
pub struct GetPostByIdQuery {
    pub id: i64,
}

impl PostQueryService {
    pub async fn get_post_by_id(&self, query: GetPostByIdQuery) -> ApplicationResult<PostDto> {
        let post = self
            .read_repo
            .find_by_id(PostId::new(query.id)?)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        let category = self
            .categories
            .find_by_id(post.category_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post category not found"))?;
        let author = match post.author_id {
            Some(id) => self.authors.find_by_id(id).await?,
            None => None,
        };

        Ok(PostDto::from_parts(
            post,
            RelatedRef::from(&category),
            author.as_ref().map(RelatedRef::from),
        ))
    }
}
