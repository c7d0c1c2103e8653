//! Item workflow scenarios run through `ItemService` over the in-memory store.

use std::sync::Arc;

use marketplace::domain::ports::ItemRepository;
use marketplace::domain::{
    ItemDraft, ItemId, ItemService, ItemStatus, ItemType, ItemValidationError, ItemWorkflowError,
};
use marketplace::test_support::InMemoryItemRepository;
use rstest::{fixture, rstest};

#[fixture]
fn draft() -> ItemDraft {
    ItemDraft {
        code: "sa4123".to_owned(),
        title: "my-title".to_owned(),
        description: "my-description".to_owned(),
        price: 50,
        stock: 150,
        item_type: ItemType::Seller,
        leader: true,
        leader_level: "PLATINUM".to_owned(),
        photos: vec!["url1".to_owned(), "url2".to_owned()],
    }
}

#[fixture]
fn repo() -> Arc<InMemoryItemRepository> {
    Arc::new(InMemoryItemRepository::new())
}

#[rstest]
#[tokio::test]
async fn leader_seller_is_created_active(draft: ItemDraft, repo: Arc<InMemoryItemRepository>) {
    let service = ItemService::new(repo);

    let stored = service.create(draft).await.expect("create succeeds");

    assert!(stored.id().get() > 0);
    assert_eq!(stored.item().status(), ItemStatus::Active);
    assert_eq!(stored.item().leader_level(), "PLATINUM");
}

#[rstest]
#[tokio::test]
async fn zero_stock_is_created_inactive(mut draft: ItemDraft, repo: Arc<InMemoryItemRepository>) {
    draft.stock = 0;
    let service = ItemService::new(repo);

    let stored = service.create(draft).await.expect("create succeeds");

    assert_eq!(stored.item().status(), ItemStatus::Inactive);
}

#[rstest]
#[tokio::test]
async fn non_leader_seller_has_level_cleared(
    mut draft: ItemDraft,
    repo: Arc<InMemoryItemRepository>,
) {
    draft.leader = false;
    let service = ItemService::new(repo);

    let stored = service.create(draft).await.expect("create succeeds");

    assert_eq!(stored.item().leader_level(), "");
}

#[rstest]
#[tokio::test]
async fn empty_photos_are_rejected_without_a_write(
    mut draft: ItemDraft,
    repo: Arc<InMemoryItemRepository>,
) {
    draft.photos.clear();
    let service = ItemService::new(repo.clone());

    let err = service.create(draft).await.expect_err("photos required");

    assert_eq!(
        err,
        ItemWorkflowError::Validation(ItemValidationError::MissingPhotos)
    );
    assert!(repo.is_empty());
}

#[rstest]
#[tokio::test]
async fn unknown_leader_level_is_named_in_the_error(
    mut draft: ItemDraft,
    repo: Arc<InMemoryItemRepository>,
) {
    draft.leader_level = "DIAMOND".to_owned();
    let service = ItemService::new(repo.clone());

    let err = service.create(draft).await.expect_err("unknown level");

    assert!(matches!(err, ItemWorkflowError::Validation(_)));
    assert!(err.to_string().contains("DIAMOND"));
    assert!(repo.is_empty());
}

#[rstest]
#[tokio::test]
async fn duplicate_code_keeps_the_first_item(draft: ItemDraft, repo: Arc<InMemoryItemRepository>) {
    let service = ItemService::new(repo);
    let first = service.create(draft.clone()).await.expect("first create");

    let mut second = draft;
    second.title = "another-title".to_owned();
    let err = service.create(second).await.expect_err("duplicate code");

    assert_eq!(
        err,
        ItemWorkflowError::DuplicateCode {
            code: "sa4123".to_owned()
        }
    );
    let fetched = service.get(first.id()).await.expect("first item remains");
    assert_eq!(fetched, first);
}

#[rstest]
#[tokio::test]
async fn unknown_id_is_not_found(repo: Arc<InMemoryItemRepository>) {
    let service = ItemService::new(repo);
    let id = ItemId::new(999_999).expect("positive id");

    let err = service.get(id).await.expect_err("empty store");

    assert_eq!(err, ItemWorkflowError::NotFound { id });
}

#[rstest]
#[case(ItemType::Seller, true, "GOLD", 3)]
#[case(ItemType::Seller, false, "", 0)]
#[case(ItemType::Own, false, "anything", 12)]
#[tokio::test]
async fn saved_items_round_trip(
    mut draft: ItemDraft,
    repo: Arc<InMemoryItemRepository>,
    #[case] item_type: ItemType,
    #[case] leader: bool,
    #[case] leader_level: &str,
    #[case] stock: i64,
) {
    draft.item_type = item_type;
    draft.leader = leader;
    draft.leader_level = leader_level.to_owned();
    draft.stock = stock;
    let service = ItemService::new(repo);

    let created = service.create(draft).await.expect("create succeeds");
    let fetched = service.get(created.id()).await.expect("lookup succeeds");

    assert_eq!(fetched.item(), created.item());
    assert_eq!(fetched.created_at(), fetched.updated_at());
    assert_eq!(fetched.item().photos(), ["url1", "url2"]);
}

#[rstest]
#[tokio::test]
async fn store_assigns_distinct_ids(draft: ItemDraft, repo: Arc<InMemoryItemRepository>) {
    let mut other = draft.clone();
    other.code = "sa4124".to_owned();
    let service = ItemService::new(repo.clone());

    let first = service.create(draft).await.expect("first create");
    let second = service.create(other).await.expect("second create");

    assert_ne!(first.id(), second.id());
    let direct = repo.find_by_id(second.id()).await.expect("stored");
    assert_eq!(direct.item().code(), "sa4124");
}
