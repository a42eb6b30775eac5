//! Service-level tests driving validation chains through a mocked repository.
//!
//! These tests check that repository probes only run when the synchronous
//! rules pass, that `when_valid` writes happen only after every probe, and
//! that failures carry the expected codes.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use service_validation::domain::{
    IdKind, ServiceErrorCode, ServiceResult, ServiceValidate, SpecializedId,
};

struct EquipmentKind;

impl IdKind for EquipmentKind {
    const PREFIX: &'static str = "equipment";
}

type EquipmentId = SpecializedId<EquipmentKind>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Equipment {
    id: EquipmentId,
    name: String,
}

/// Port for equipment persistence.
#[automock]
#[async_trait]
trait EquipmentRepository: Send + Sync {
    /// Whether an equipment item already uses `name`.
    async fn name_exists(&self, name: &str) -> bool;

    /// Whether the equipment item exists.
    async fn exists(&self, id: EquipmentId) -> bool;

    /// Store a new equipment item.
    async fn create(&self, name: &str) -> Equipment;

    /// Rename an existing equipment item.
    async fn rename(&self, id: EquipmentId, name: &str) -> Equipment;
}

struct EquipmentService<R> {
    repository: Arc<R>,
}

impl<R: EquipmentRepository> EquipmentService<R> {
    fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    async fn create(&self, name: &str) -> ServiceResult<Option<Equipment>> {
        let repository = self.repository.as_ref();
        ServiceValidate::build()
            .ensure_not_white_space(name, "Equipment name is required")
            .ensure_max_length(name, 100, "Equipment name must not exceed 100 characters")
            .ensure_name_is_unique_async(
                move || async move { !repository.name_exists(name).await },
                "Equipment",
                name,
            )
            .match_or_failure(move || async move {
                ServiceResult::success(Some(repository.create(name).await))
            })
            .await
    }

    async fn rename(&self, raw_id: &str, name: &str) -> ServiceResult<Option<Equipment>> {
        let repository = self.repository.as_ref();
        let id = EquipmentId::parse_or_empty(raw_id);
        ServiceValidate::build()
            .ensure_valid_id(
                Some(&id),
                format!(
                    "Invalid equipment ID. Expected format: {}",
                    EquipmentId::expected_format()
                ),
            )
            .ensure_not_white_space(name, "Equipment name is required")
            .ensure_exists_async(move || async move { repository.exists(id).await }, "Equipment")
            .ensure_name_is_unique_async_when_valid(
                move || async move { !repository.name_exists(name).await },
                "Equipment",
                name,
            )
            .match_or_failure(move || async move {
                ServiceResult::success(Some(repository.rename(id, name).await))
            })
            .await
    }
}

#[tokio::test]
async fn create_persists_when_name_is_free() {
    let mut repo = MockEquipmentRepository::new();
    repo.expect_name_exists().times(1).return_const(false);
    repo.expect_create().times(1).returning(|name| Equipment {
        id: EquipmentId::random(),
        name: name.to_owned(),
    });

    let result = EquipmentService::new(repo).create("Barbell").await;

    assert!(result.is_success());
    let created = result.into_data().expect("created equipment");
    assert_eq!(created.name, "Barbell");
}

#[tokio::test]
async fn create_rejects_blank_name_without_probing() {
    let mut repo = MockEquipmentRepository::new();
    repo.expect_name_exists().times(0);
    repo.expect_create().times(0);

    let result = EquipmentService::new(repo).create("   ").await;

    assert!(!result.is_success());
    assert!(result.data().is_none());
    assert_eq!(result.errors(), ["Equipment name is required"]);
    assert_eq!(
        result.primary_error_code(),
        Some(ServiceErrorCode::ValidationFailed)
    );
}

#[tokio::test]
async fn create_reports_duplicate_name() {
    let mut repo = MockEquipmentRepository::new();
    repo.expect_name_exists().times(1).return_const(true);
    repo.expect_create().times(0);

    let result = EquipmentService::new(repo).create("Barbell").await;

    assert_eq!(
        result.primary_error_code(),
        Some(ServiceErrorCode::AlreadyExists)
    );
    assert_eq!(
        result.errors(),
        ["Equipment with value 'Barbell' already exists"]
    );
}

#[tokio::test]
async fn rename_rejects_malformed_id_before_any_lookup() {
    let mut repo = MockEquipmentRepository::new();
    repo.expect_exists().times(0);
    repo.expect_name_exists().times(0);
    repo.expect_rename().times(0);

    let result = EquipmentService::new(repo)
        .rename("bogus-123", "Kettlebell")
        .await;

    assert_eq!(
        result.primary_error_code(),
        Some(ServiceErrorCode::InvalidFormat)
    );
    assert_eq!(
        result.errors(),
        ["Invalid equipment ID. Expected format: equipment-{guid}"]
    );
}

#[tokio::test]
async fn rename_skips_uniqueness_probe_when_missing() {
    let mut repo = MockEquipmentRepository::new();
    repo.expect_exists().times(1).return_const(false);
    repo.expect_name_exists().times(0);
    repo.expect_rename().times(0);

    let id = EquipmentId::random();
    let result = EquipmentService::new(repo)
        .rename(&id.to_string(), "Kettlebell")
        .await;

    assert_eq!(result.primary_error_code(), Some(ServiceErrorCode::NotFound));
    assert_eq!(result.errors(), ["Equipment not found"]);
}

#[tokio::test]
async fn rename_runs_every_probe_before_writing() {
    let id = EquipmentId::random();
    let mut repo = MockEquipmentRepository::new();
    let mut sequence = mockall::Sequence::new();
    repo.expect_exists()
        .times(1)
        .in_sequence(&mut sequence)
        .return_const(true);
    repo.expect_name_exists()
        .times(1)
        .in_sequence(&mut sequence)
        .return_const(false);
    repo.expect_rename()
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|id, name| Equipment {
            id,
            name: name.to_owned(),
        });

    let result = EquipmentService::new(repo)
        .rename(&id.to_string(), "Kettlebell")
        .await;

    let renamed = result.into_result().expect("rename succeeds").expect("data");
    assert_eq!(renamed.id, id);
    assert_eq!(renamed.name, "Kettlebell");
}
