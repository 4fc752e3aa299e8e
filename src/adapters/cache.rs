use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::leave::ports::{EmployeeLookup, RepositoryError};
use crate::model::employee::{Employee, EmployeeId};

/// Keeps employees found by `inner` in memory.
///
/// Employee records are not changed by this service, so a hit is served
/// without asking `inner`. Misses and failures are never cached.
pub struct CachedEmployeeLookup {
    inner: Arc<dyn EmployeeLookup>,
    cache: Cache<EmployeeId, Employee>,
}

impl CachedEmployeeLookup {
    pub fn new(inner: Arc<dyn EmployeeLookup>, max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { inner, cache }
    }
}

#[async_trait]
impl EmployeeLookup for CachedEmployeeLookup {
    async fn find_by_id(&self, id: &EmployeeId) -> Result<Employee, RepositoryError> {
        if let Some(employee) = self.cache.get(id).await {
            debug!(employee_id = %id, "employee cache hit");
            return Ok(employee);
        }
        let employee = self.inner.find_by_id(id).await?;
        self.cache.insert(id.clone(), employee.clone()).await;
        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leave::testing::{MemoryEmployees, date};

    fn cached(inner: Arc<MemoryEmployees>) -> CachedEmployeeLookup {
        CachedEmployeeLookup::new(inner, 100, Duration::from_secs(60))
    }

    #[actix_web::test]
    async fn second_lookup_is_served_from_memory() {
        let inner = Arc::new(MemoryEmployees::default());
        inner.insert("E-1", date(2024, 1, 1));
        let lookup = cached(inner.clone());
        let id = EmployeeId::from("E-1");

        let first = lookup.find_by_id(&id).await.expect("found");
        let second = lookup.find_by_id(&id).await.expect("found");

        assert_eq!(first, second);
        assert_eq!(inner.lookups(), 1);
    }

    #[actix_web::test]
    async fn misses_are_not_remembered() {
        let inner = Arc::new(MemoryEmployees::default());
        let lookup = cached(inner.clone());
        let id = EmployeeId::from("E-9");

        assert_eq!(lookup.find_by_id(&id).await, Err(RepositoryError::NotFound));
        inner.insert("E-9", date(2024, 1, 1));
        assert!(lookup.find_by_id(&id).await.is_ok());
        assert_eq!(inner.lookups(), 2);
    }

    #[actix_web::test]
    async fn failures_pass_through() {
        let inner = Arc::new(MemoryEmployees::default());
        inner.fail_with("db down");
        let lookup = cached(inner.clone());

        assert!(matches!(
            lookup.find_by_id(&EmployeeId::from("E-1")).await,
            Err(RepositoryError::Unavailable(_))
        ));
    }
}
