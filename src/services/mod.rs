//! Business logic services

pub mod attendance;
pub mod users;

use std::sync::Arc;

use crate::{
    config::AuthConfig,
    repository::{RecordStore, Repository},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub attendance: attendance::AttendanceService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        let records = Arc::new(repository.attendance.clone());
        Self::with_record_store(repository, records, auth_config)
    }

    /// Create all services, keeping attendance records in `records`
    pub fn with_record_store(
        repository: Repository,
        records: Arc<dyn RecordStore>,
        auth_config: AuthConfig,
    ) -> Self {
        Self {
            attendance: attendance::AttendanceService::new(records),
            users: users::UsersService::new(repository, auth_config),
        }
    }
}
