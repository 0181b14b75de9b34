use super::{Edit, EditPlan, Position};

#[test]
fn test_plan_json_shape() {
    let plan = EditPlan::new(vec![
        Edit::insert(Position::line_start(2), "#"),
        Edit::delete(Position::new(0, 0), Position::new(0, 1)),
    ])
    .with_selection(Position::new(2, 3));
    let json = serde_json::to_value(&plan).unwrap();
    println!("{json:#}");

    assert_eq!(json["edits"][0]["from"]["line"], 2);
    assert_eq!(json["edits"][0]["text"], "#");
    // Insertions carry no end position.
    assert!(json["edits"][0].get("to").is_none());
    assert_eq!(json["edits"][1]["to"]["column"], 1);
    assert_eq!(json["selection"]["column"], 3);

    let back: EditPlan = serde_json::from_value(json).unwrap();
    assert_eq!(back, plan);
}

#[test]
fn test_plan_without_selection() {
    let plan: EditPlan =
        serde_json::from_str(r#"{"edits":[{"from":{"line":1,"column":0},"text":"x"}]}"#).unwrap();
    assert_eq!(plan.selection, None);
    assert_eq!(plan.edits, vec![Edit::insert(Position::line_start(1), "x")]);
    assert!(!plan.is_empty());
    assert!(EditPlan::default().is_empty());
}

#[test]
fn test_positions_order_by_line_then_column() {
    assert!(Position::new(1, 9) < Position::new(2, 0));
    assert!(Position::new(2, 1) > Position::line_start(2));
}
