use uuid::Uuid;

use loyalty_domain::pagination::PageRequest;

use crate::domain::repository::UsageRepository;
use crate::domain::types::{HistorySortBy, UsageHistoryEntry};
use crate::error::PointsServiceError;

pub struct TokenHistoryUseCase<S: UsageRepository> {
    pub usages: S,
}

impl<S: UsageRepository> TokenHistoryUseCase<S> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        sort_by: HistorySortBy,
        page: PageRequest,
    ) -> Result<Vec<UsageHistoryEntry>, PointsServiceError> {
        self.usages
            .list_history(user_id, sort_by, page.clamped())
            .await
    }
}
