//! Mock fetch-seam implementations for isolating controllers in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::fetch::errors::FetchResult;
use crate::fetch::{FetchParams, ResourceFetcher, ResourceWriter, ResultPage};

mock! {
    pub Fetcher<T: Clone + Send + Sync + 'static> {}

    #[async_trait]
    impl<T: Clone + Send + Sync + 'static> ResourceFetcher<T> for Fetcher<T> {
        async fn fetch(&self, params: &FetchParams) -> FetchResult<ResultPage<T>>;
    }
}

mock! {
    pub Writer<N: Send + Sync + 'static, U: Send + Sync + 'static> {}

    #[async_trait]
    impl<N: Send + Sync + 'static, U: Send + Sync + 'static> ResourceWriter<N, U> for Writer<N, U> {
        async fn create(&self, payload: &N) -> FetchResult<()>;
        async fn update(&self, id: i64, payload: &U) -> FetchResult<()>;
        async fn delete(&self, id: i64) -> FetchResult<()>;
    }
}
