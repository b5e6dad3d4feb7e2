//! End-to-end tests for ad-hoc validation

use dynamodel::prelude::*;
use proptest::prelude::*;
use serde_json::json;

fn object(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

#[test]
fn test_valid_data_has_no_errors() {
    let model = validate_data(
        [("name", "testname"), ("email", "test@email.com")],
        [
            json!(["name,email", "length", {"max": 64}]),
            json!(["email", "email"]),
        ],
    )
    .unwrap();

    assert!(!model.has_errors(None));
}

#[test]
fn test_invalid_email_is_reported() {
    let model = validate_data(
        [("name", "testname"), ("email", "test.email.com")],
        [
            json!(["name,email", "length", {"max": 64}]),
            json!(["email", "email"]),
        ],
    )
    .unwrap();

    assert!(model.has_errors(None));
    assert!(model.has_errors(Some("email")));
    assert!(!model.has_errors(Some("name")));
}

#[test]
fn test_too_long_values_are_reported() {
    let model = validate_data(
        [("name", "testname"), ("email", "test@email.com")],
        [
            json!(["name,email", "length", {"max": 4}]),
            json!(["email", "email"]),
        ],
    )
    .unwrap();

    assert!(model.has_errors(None));
    assert_eq!(
        model.errors().first("name"),
        Some("Name is too long (maximum is 4 characters).")
    );
    assert!(model.has_errors(Some("email")));
}

#[test]
fn test_attribute_access() {
    let model = new_model([("name", "long name"), ("email", "invalid")]);

    assert_eq!(model.get("email").unwrap(), json!("invalid"));
    let err = model.get("age").unwrap_err();
    assert!(err.is_attribute_not_found());
    assert_eq!(
        err.to_string(),
        "Property \"DynamicModel.age\" is not defined"
    );
}

#[test]
fn test_mass_assignment_then_validation() {
    let mut model = new_model(["name", "email"]);
    assert_eq!(model.get("name").unwrap(), json!(null));
    assert_eq!(model.get("email").unwrap(), json!(null));

    model
        .add_rule(json!(["name,email", "length", {"max": 128}]))
        .unwrap()
        .add_rule(json!(["email", "email"]))
        .unwrap();

    model
        .set_attributes(
            object(json!({"name": "test1", "email": "test@company.com"})),
            true,
        )
        .unwrap();

    assert_eq!(model.get("name").unwrap(), json!("test1"));
    assert_eq!(model.get("email").unwrap(), json!("test@company.com"));
    assert!(model.validate().unwrap());
    assert!(!model.has_errors(None));
}

#[test]
fn test_rule_missing_kind_fails_fast() {
    let mut model = new_model(["name"]);
    let err = model.add_rule(json!(["name"])).unwrap_err();
    assert!(err.is_configuration());
    assert!(
        err.to_string()
            .contains("a rule must specify both attribute names and validator type")
    );
    assert!(model.get_validators(None).is_empty());
}

#[test]
fn test_rule_governs_parsed_names() {
    let mut model = new_model(["name", "email"]);
    model.add_rule(json!([" name , email ", "required"])).unwrap();

    let validators = model.get_validators(None);
    assert_eq!(validators.len(), 1);
    assert_eq!(validators[0].attributes(), ["name", "email"]);
}

#[test]
fn test_scenario_filtering() {
    let mut model = new_model(["name"]);
    model
        .add_rule(RuleSpec::new("name", "required").on("update"))
        .unwrap();

    assert!(model.get_validators(None).is_empty());
    model.set_scenario("update");
    assert_eq!(model.get_validators(None).len(), 1);
    assert_eq!(model.get_validators(Some("name")).len(), 1);
    assert!(model.get_validators(Some("email")).is_empty());
}

#[test]
fn test_scenario_through_config_and_accessor() {
    let mut model = DynamicModel::with_config(
        ["name"],
        ModelConfig::new().scenario("update"),
        default_catalog(),
    )
    .unwrap();
    assert_eq!(model.get("scenario").unwrap(), json!("update"));

    model.set("scenario", json!("import")).unwrap();
    assert_eq!(model.scenario(), "import");
}

#[test]
fn test_define_and_undefine() {
    let mut model = new_model(Vec::<String>::new());
    model.define_attribute("age", 30);
    assert_eq!(model.attribute_names(), vec!["age".to_string()]);

    model.undefine_attribute("age");
    assert!(model.attribute_names().is_empty());
    assert!(model.get("age").unwrap_err().is_attribute_not_found());
    assert!(model.set("age", json!(1)).unwrap_err().is_attribute_not_found());
}

#[test]
fn test_errors_as_json() {
    let model = validate_data(
        [("name", ""), ("email", "nope")],
        [json!(["name", "required"]), json!(["email", "email"])],
    )
    .unwrap();

    assert_eq!(
        model.errors().to_json(),
        json!({
            "name": ["Name cannot be blank."],
            "email": ["Email is not a valid email address."]
        })
    );
}

#[test]
fn test_object_data_keeps_key_order() {
    let model = validate_data(
        object(json!({"zeta": "", "alpha": ""})),
        [json!(["zeta, alpha", "required"])],
    )
    .unwrap();

    assert_eq!(model.attribute_names(), vec!["zeta", "alpha"]);
    assert_eq!(
        serde_json::to_string(&model.errors().to_json()).unwrap(),
        r#"{"zeta":["Zeta cannot be blank."],"alpha":["Alpha cannot be blank."]}"#
    );
}

fn data_strategy() -> impl Strategy<Value = Vec<(String, serde_json::Value)>> {
    prop::collection::vec(
        (
            "[a-z]{1,8}",
            prop_oneof![
                Just(serde_json::Value::Null),
                any::<i64>().prop_map(serde_json::Value::from),
                "[a-zA-Z@. ]{0,12}".prop_map(serde_json::Value::from),
            ],
        ),
        0..6,
    )
    .prop_map(|pairs| {
        let mut seen = std::collections::HashSet::new();
        pairs
            .into_iter()
            .filter(|(name, _)| seen.insert(name.clone()))
            .collect()
    })
}

fn rules_for(names: &[String]) -> Vec<serde_json::Value> {
    names
        .iter()
        .flat_map(|name| {
            [
                json!([name, "required"]),
                json!([name, "length", {"max": 5}]),
            ]
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_attribute_names_match_data(data in data_strategy()) {
        let names: Vec<String> = data.iter().map(|(name, _)| name.clone()).collect();
        let model = validate_data(data, rules_for(&names)).unwrap();
        prop_assert_eq!(model.attribute_names(), names);
    }

    #[test]
    fn prop_object_data_keeps_key_order(data in data_strategy()) {
        let names: Vec<String> = data.iter().map(|(name, _)| name.clone()).collect();
        let map: serde_json::Map<String, serde_json::Value> = data.into_iter().collect();
        let model = validate_data(map, rules_for(&names)).unwrap();
        prop_assert_eq!(model.attribute_names(), names);
    }

    #[test]
    fn prop_no_rules_no_errors(data in data_strategy()) {
        let model = validate_data(data, Vec::<serde_json::Value>::new()).unwrap();
        prop_assert!(!model.has_errors(None));
    }

    #[test]
    fn prop_revalidation_is_deterministic(data in data_strategy()) {
        let names: Vec<String> = data.iter().map(|(name, _)| name.clone()).collect();
        let mut model = validate_data(data, rules_for(&names)).unwrap();
        let first = model.errors().clone();
        model.validate().unwrap();
        prop_assert_eq!(model.errors(), &first);
    }
}
