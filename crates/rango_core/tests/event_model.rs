use rango_core::{
    Assignment, Event, EventStatus, Family, FoodItem, NewFamily, NewFoodItem, ValidationError,
    MAX_ITEM_QUANTITY,
};
use uuid::Uuid;

#[test]
fn event_new_sets_defaults() {
    let event = Event::new(" Natal ", "2026-12-24").unwrap();

    assert!(!event.id.is_nil());
    assert_eq!(event.title, "Natal");
    assert_eq!(event.status, EventStatus::Draft);
    assert!(event.items.is_empty());
    assert!(event.families.is_empty());
    assert!(event.assignments.is_none());
    assert_eq!(event.total_units(), 0);
}

#[test]
fn food_item_requires_name_and_bounded_quantity() {
    assert_eq!(
        FoodItem::new("  ", 2).unwrap_err(),
        ValidationError::EmptyName
    );
    assert_eq!(
        FoodItem::new("Soda", 0).unwrap_err(),
        ValidationError::ZeroQuantity
    );

    assert_eq!(
        FoodItem::new("Soda", u32::MAX).unwrap_err(),
        ValidationError::QuantityTooLarge(u32::MAX)
    );
    assert_eq!(
        FoodItem::new("Soda", MAX_ITEM_QUANTITY).unwrap().quantity,
        MAX_ITEM_QUANTITY
    );

    let item = FoodItem::try_from(&NewFoodItem::new(" Farofa  de  bacon ", 2)).unwrap();
    assert_eq!(item.name, "Farofa de bacon");
    assert_eq!(item.quantity, 2);
}

#[test]
fn family_contact_is_optional() {
    let family = Family::try_from(&NewFamily::new("Silva").with_contact("silva@example.com"))
        .unwrap();
    assert_eq!(family.contact.as_deref(), Some("silva@example.com"));

    let family = Family::try_from(&NewFamily::new("Souza")).unwrap();
    assert_eq!(family.contact, None);
}

#[test]
fn event_serialization_uses_expected_wire_fields() {
    let event_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let family_id = Uuid::parse_str("66666666-7777-4888-9999-000000000000").unwrap();

    let mut event = Event::new("Festa", "2026-06-24").unwrap();
    event.id = event_id;
    event.created_at = 1_782_259_200_000;
    event.status = EventStatus::Completed;
    event.assignments = Some(vec![Assignment {
        family_id,
        family_name: "Silva".to_string(),
        items: vec!["Soda (1)".to_string()],
    }]);

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["id"], event_id.to_string());
    assert_eq!(json["date"], "2026-06-24");
    assert_eq!(json["status"], "completed");
    assert_eq!(json["createdAt"], 1_782_259_200_000_i64);
    assert_eq!(json["assignments"][0]["familyId"], family_id.to_string());
    assert_eq!(json["assignments"][0]["familyName"], "Silva");
    assert_eq!(json["assignments"][0]["items"][0], "Soda (1)");

    let decoded: Event = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, event);
}

#[test]
fn draft_event_omits_assignments_on_the_wire() {
    let event = Event::new("Festa", "2026-06-24").unwrap();
    let json = serde_json::to_value(&event).unwrap();

    assert_eq!(json["status"], "draft");
    assert!(json.get("assignments").is_none());
}
