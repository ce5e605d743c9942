use crate::{
    abstract_trait::{
        DynProductCommandRepository, DynProductQueryRepository, ProductCommandServiceTrait,
        ProductQueryServiceTrait,
    },
    cache::CacheStore,
    domain::{
        requests::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
        responses::{
            ApiResponse, ApiResponsePagination, Pagination, ProductResponse,
            ProductResponseDeleteAt,
        },
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use chrono::Duration;
use tracing::info;
use uuid::Uuid;

const CACHE_TTL_MINUTES: i64 = 5;
const CATALOG_NAMESPACE: &str = "products";

// The namespace version is baked into list keys, so every cached page is
// retired at once when the catalog changes.
fn list_cache_key(version: u64, req: &FindAllProducts) -> String {
    format!(
        "products:v{}:list:{}:{}:{}:{}",
        version,
        req.page,
        req.page_size,
        req.search.trim(),
        req.category.as_deref().unwrap_or("")
    )
}

fn detail_cache_key(id: Uuid) -> String {
    format!("products:detail:{id}")
}

pub struct ProductQueryService {
    query: DynProductQueryRepository,
    cache: CacheStore,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, cache: CacheStore) -> Self {
        Self { query, cache }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        let version = self.cache.namespace_version(CATALOG_NAMESPACE).await;
        let cache_key = list_cache_key(version, req);

        if let Some(cached) = self
            .cache
            .get_json::<ApiResponsePagination<Vec<ProductResponse>>>(&cache_key)
            .await
        {
            info!("📦 Product list served from cache");
            return Ok(cached);
        }

        let (products, total) = self.query.find_all(req).await?;

        let data: Vec<ProductResponse> = products.into_iter().map(Into::into).collect();
        let response = ApiResponsePagination::success(
            "Products retrieved",
            data,
            Pagination::new(req.page, req.page_size, total),
        );

        self.cache
            .put_json(&cache_key, &response, Duration::minutes(CACHE_TTL_MINUTES))
            .await;

        Ok(response)
    }

    async fn find_trashed(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponseDeleteAt>>, ServiceError> {
        let (products, total) = self.query.find_trashed(req).await?;

        let data: Vec<ProductResponseDeleteAt> = products.into_iter().map(Into::into).collect();

        Ok(ApiResponsePagination::success(
            "Trashed products retrieved",
            data,
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let cache_key = detail_cache_key(id);

        if let Some(cached) = self
            .cache
            .get_json::<ApiResponse<ProductResponse>>(&cache_key)
            .await
        {
            return Ok(cached);
        }

        let product = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("product {id} not found")))?;

        let response = ApiResponse::success("Product retrieved", product.into());

        self.cache
            .put_json(&cache_key, &response, Duration::minutes(CACHE_TTL_MINUTES))
            .await;

        Ok(response)
    }
}

pub struct ProductCommandService {
    command: DynProductCommandRepository,
    cache: CacheStore,
}

impl ProductCommandService {
    pub fn new(command: DynProductCommandRepository, cache: CacheStore) -> Self {
        Self { command, cache }
    }

    async fn invalidate(&self, id: Uuid) {
        self.cache.forget(&detail_cache_key(id)).await;
        self.cache.bump_namespace(CATALOG_NAMESPACE).await;
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let product = self.command.create_product(req).await?;

        // No detail entry exists yet, but cached listings must pick it up.
        self.cache.bump_namespace(CATALOG_NAMESPACE).await;

        Ok(ApiResponse::success("Product created", product.into()))
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let product = self.command.update_product(req).await?;

        self.invalidate(product.product_id).await;
        Ok(ApiResponse::success("Product updated", product.into()))
    }

    async fn trash_product(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<ProductResponseDeleteAt>, ServiceError> {
        let product = self.command.trash_product(id).await?;

        self.invalidate(id).await;
        Ok(ApiResponse::success("Product trashed", product.into()))
    }

    async fn restore_product(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let product = self.command.restore_product(id).await?;

        self.invalidate(id).await;
        Ok(ApiResponse::success("Product restored", product.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(page: i32, search: &str, category: Option<&str>) -> FindAllProducts {
        FindAllProducts {
            page,
            page_size: 20,
            search: search.to_string(),
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn list_keys_embed_the_namespace_version() {
        let req = listing(1, "serum", None);

        assert_eq!(list_cache_key(3, &req), "products:v3:list:1:20:serum:");
        assert_ne!(list_cache_key(3, &req), list_cache_key(4, &req));
    }

    #[test]
    fn list_keys_separate_pages_and_filters() {
        let base = listing(1, "", Some("skincare"));

        assert_ne!(
            list_cache_key(0, &base),
            list_cache_key(0, &listing(2, "", Some("skincare")))
        );
        assert_ne!(
            list_cache_key(0, &base),
            list_cache_key(0, &listing(1, "", Some("haircare")))
        );
    }
}
