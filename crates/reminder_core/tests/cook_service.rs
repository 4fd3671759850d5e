use reminder_core::db::open_db_in_memory;
use reminder_core::{
    CookService, EpochMillis, ListItem, ListOrder, RecordId, RepoError, ServiceError,
    SqliteCookRepository, MILLIS_PER_DAY,
};

const DAY: u64 = MILLIS_PER_DAY;

fn names(items: &[ListItem<reminder_core::Cook>]) -> Vec<String> {
    items
        .iter()
        .map(|item| match item {
            ListItem::Header { day_number } => format!("#{day_number}"),
            ListItem::Record { record } => record.name.clone(),
        })
        .collect()
}

#[test]
fn add_cook_trims_and_reads_back() {
    let conn = open_db_in_memory().unwrap();
    let service = CookService::new(SqliteCookRepository::new(&conn));

    let cook = service.add_cook("  shakshuka ", EpochMillis(7)).unwrap();
    assert_eq!(cook.name, "shakshuka");
    assert_eq!(cook.last_cooked, EpochMillis(7));
    assert!(service.has_cooks().unwrap());
}

#[test]
fn add_cook_with_blank_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = CookService::new(SqliteCookRepository::new(&conn));

    assert!(matches!(
        service.add_cook("", EpochMillis(1)),
        Err(ServiceError::EmptyName)
    ));
    assert!(!service.has_cooks().unwrap());
}

#[test]
fn add_cook_beyond_storage_range_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = CookService::new(SqliteCookRepository::new(&conn));

    assert!(matches!(
        service.add_cook("x", EpochMillis(u64::MAX)),
        Err(ServiceError::Repo(RepoError::Validation(_)))
    ));
    assert!(!service.has_cooks().unwrap());
}

#[test]
fn cook_list_groups_by_day_in_both_orders() {
    let conn = open_db_in_memory().unwrap();
    let service = CookService::new(SqliteCookRepository::new(&conn));

    service.add_cook("porridge", EpochMillis(10)).unwrap();
    service.add_cook("curry", EpochMillis(DAY + 10)).unwrap();
    service.add_cook("toast", EpochMillis(5)).unwrap();

    assert_eq!(
        names(&service.cook_list(ListOrder::Ascending).unwrap()),
        ["#1", "porridge", "toast", "#0", "curry"]
    );
    assert_eq!(
        names(&service.cook_list(ListOrder::Descending).unwrap()),
        ["#0", "curry", "#1", "porridge", "toast"]
    );
}

#[test]
fn marking_cooked_moves_the_row_to_the_newest_day() {
    let conn = open_db_in_memory().unwrap();
    let service = CookService::new(SqliteCookRepository::new(&conn));

    let soup = service.add_cook("soup", EpochMillis(10)).unwrap();
    service.add_cook("salad", EpochMillis(DAY + 10)).unwrap();

    service.mark_cooked(soup.id, EpochMillis(2 * DAY)).unwrap();

    assert_eq!(
        names(&service.cook_list(ListOrder::Descending).unwrap()),
        ["#0", "soup", "#1", "salad"]
    );
}

#[test]
fn rebuild_after_change_keeps_record_identity() {
    let conn = open_db_in_memory().unwrap();
    let service = CookService::new(SqliteCookRepository::new(&conn));

    let stew = service.add_cook("stew", EpochMillis(10)).unwrap();
    let before = service.cook_list(ListOrder::Descending).unwrap();
    service.mark_cooked(stew.id, EpochMillis(20)).unwrap();
    let after = service.cook_list(ListOrder::Descending).unwrap();

    assert!(before[1].same_item(&after[1]));
    assert!(!before[1].same_content(&after[1]));
    assert!(before[0].same_content(&after[0]));
}

#[test]
fn missing_ids_surface_as_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = CookService::new(SqliteCookRepository::new(&conn));

    assert!(matches!(
        service.mark_cooked(RecordId(99), EpochMillis(1)),
        Err(ServiceError::NotFound(RecordId(99)))
    ));
    assert!(matches!(
        service.delete_cook(RecordId(99)),
        Err(ServiceError::NotFound(RecordId(99)))
    ));
}

#[test]
fn rename_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let service = CookService::new(SqliteCookRepository::new(&conn));

    let cook = service.add_cook("pasta", EpochMillis(1)).unwrap();
    let renamed = service.rename_cook(cook.id, " pasta alla norma ").unwrap();
    assert_eq!(renamed.name, "pasta alla norma");
    assert!(matches!(
        service.rename_cook(cook.id, " "),
        Err(ServiceError::EmptyName)
    ));

    service.delete_cook(cook.id).unwrap();
    assert!(service.get_cook(cook.id).unwrap().is_none());
    assert!(service.cook_list(ListOrder::Ascending).unwrap().is_empty());
}

#[test]
fn clear_removes_everything() {
    let conn = open_db_in_memory().unwrap();
    let service = CookService::new(SqliteCookRepository::new(&conn));

    service.add_cook("a", EpochMillis(1)).unwrap();
    service.add_cook("b", EpochMillis(DAY * 3)).unwrap();

    assert_eq!(service.clear().unwrap(), 2);
    assert!(service.cooks().unwrap().is_empty());
}
