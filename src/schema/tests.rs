//! Schema inference tests

use super::*;
use crate::types::{document_from_json, DocValue, Document};
use serde_json::{json, Value};
use test_case::test_case;

fn docs(values: Vec<Value>) -> Vec<Document> {
    values
        .into_iter()
        .map(|v| document_from_json(v).unwrap())
        .collect()
}

fn infer(values: Vec<Value>, name: &str) -> (RecordSchema, SchemaRegistry) {
    let mut registry = SchemaRegistry::new();
    let schema = infer_schema(&docs(values), name, &mut registry);
    (schema, registry)
}

fn rendered(schema: &RecordSchema, field: &str) -> String {
    schema.get_field(field).unwrap().resolve().to_string()
}

fn tag_of(value: Value) -> String {
    let mut registry = SchemaRegistry::new();
    infer_type(&DocValue::from_json(value), "f", "C", &mut registry).to_string()
}

// ============================================================================
// Naming
// ============================================================================

#[test_case("snake_case", "SnakeCase")]
#[test_case("kebab-case", "KebabCase")]
#[test_case("alreadyPascal", "Alreadypascal")]
#[test_case("with spaces", "WithSpaces")]
#[test_case("Users", "Users")]
#[test_case("user2name", "User2Name")]
#[test_case("full name", "FullName")]
#[test_case("", "")]
fn test_to_pascal_case(input: &str, expected: &str) {
    assert_eq!(to_pascal_case(input), expected);
}

#[test]
fn test_to_pascal_case_strips_invalid_characters() {
    assert_eq!(to_pascal_case("Users.v2"), "Usersv2");
    assert_eq!(to_pascal_case("order.items"), "OrderItems");
}

#[test]
fn test_nested_record_name() {
    assert_eq!(nested_record_name("Users", "profile"), "UsersProfile");
    assert_eq!(nested_record_name("users", "home_address"), "UsersHomeAddress");
}

// ============================================================================
// Single Value Tags
// ============================================================================

#[test]
fn test_primitive_tags() {
    assert_eq!(tag_of(json!("hello")), "str");
    assert_eq!(tag_of(json!(123)), "int");
    assert_eq!(tag_of(json!(123.45)), "float");
    assert_eq!(tag_of(json!(true)), "bool");
    assert_eq!(tag_of(json!({"$date": "2024-01-15T10:30:00Z"})), "datetime");
    assert_eq!(tag_of(json!({"$oid": "507f1f77bcf86cd799439011"})), "ObjectId");
    assert_eq!(tag_of(json!(null)), "Any");
}

#[test]
fn test_bool_is_not_int() {
    assert_eq!(tag_of(json!([true, false])), "List[bool]");
    assert_eq!(tag_of(json!([true, 1])), "List[Union[bool, int]]");
}

#[test]
fn test_list_tags() {
    assert_eq!(tag_of(json!([])), "List[Any]");
    assert_eq!(tag_of(json!([1, 2])), "List[int]");
    assert_eq!(tag_of(json!([1, "a"])), "List[Union[int, str]]");
    assert_eq!(tag_of(json!(["a", 1])), "List[Union[int, str]]");
}

#[test]
fn test_list_nulls_are_dropped() {
    assert_eq!(tag_of(json!([1, null])), "List[int]");
    assert_eq!(tag_of(json!([null, null])), "List[Any]");
}

#[test]
fn test_nested_lists_merge() {
    assert_eq!(tag_of(json!([[1], ["a"]])), "List[List[Union[int, str]]]");
    assert_eq!(tag_of(json!([[], [1]])), "List[List[int]]");
}

// ============================================================================
// Type Sets
// ============================================================================

#[test]
fn test_type_set_sorts_by_rendered_name() {
    let set: TypeSet = vec![TypeTag::Str, TypeTag::Int, TypeTag::Any, TypeTag::ObjectId]
        .into_iter()
        .collect();
    assert_eq!(set.names(), vec!["Any", "ObjectId", "int", "str"]);
}

#[test]
fn test_type_set_merges_lists() {
    let mut set = TypeSet::new();
    set.insert(TypeTag::List(vec![TypeTag::Str]));
    set.insert(TypeTag::List(vec![TypeTag::Int]));
    set.insert(TypeTag::Int);

    assert_eq!(set.len(), 2);
    assert_eq!(set.names(), vec!["List[Union[int, str]]", "int"]);
}

#[test]
fn test_record_named_like_primitive_is_distinct() {
    let set: TypeSet = vec![TypeTag::Any, TypeTag::Record("Any".to_string())]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 2);
}

// ============================================================================
// Record Inference
// ============================================================================

#[test]
fn test_optional_field() {
    let (schema, _) = infer(
        vec![json!({"name": "Alice", "age": 30}), json!({"name": "Bob"})],
        "Users",
    );

    let name = schema.get_field("name").unwrap();
    assert!(!name.is_optional);
    assert_eq!(name.present_count, 2);
    assert_eq!(rendered(&schema, "name"), "str");

    let age = schema.get_field("age").unwrap();
    assert!(age.is_optional);
    assert_eq!(age.present_count, 1);
    assert_eq!(rendered(&schema, "age"), "NotRequired[int]");
}

#[test]
fn test_nullable_field_is_not_optional() {
    let (schema, _) = infer(vec![json!({"age": 30}), json!({"age": null})], "Users");

    let age = schema.get_field("age").unwrap();
    assert!(!age.is_optional);
    assert_eq!(age.types.names(), vec!["Any", "int"]);
    assert_eq!(rendered(&schema, "age"), "Optional[int]");
}

#[test]
fn test_optional_and_nullable_field() {
    let (schema, _) = infer(
        vec![json!({"a": 1, "b": null}), json!({"a": 2}), json!({"a": 3, "b": "x"})],
        "Things",
    );
    assert_eq!(rendered(&schema, "b"), "NotRequired[Optional[str]]");
}

#[test]
fn test_always_null_field() {
    let (schema, _) = infer(vec![json!({"x": null}), json!({"x": null})], "Things");

    let x = schema.get_field("x").unwrap();
    assert_eq!(x.types.names(), vec!["Any"]);

    let resolved = x.resolve();
    assert_eq!(resolved.tags, vec![TypeTag::Any]);
    assert!(resolved.nullable);
    assert_eq!(resolved.base(), "Any");
}

#[test]
fn test_union_field() {
    let (schema, _) = infer(
        vec![json!({"v": "a"}), json!({"v": 1}), json!({"v": 2.5})],
        "Things",
    );
    assert_eq!(rendered(&schema, "v"), "Union[float, int, str]");
}

#[test]
fn test_union_with_null() {
    let (schema, _) = infer(
        vec![json!({"v": "a"}), json!({"v": 1}), json!({"v": null})],
        "Things",
    );
    assert_eq!(rendered(&schema, "v"), "Optional[Union[int, str]]");
}

#[test]
fn test_list_observations_merge_across_documents() {
    let (schema, _) = infer(
        vec![json!({"tags": ["a", "b"]}), json!({"tags": [1, 2]})],
        "Things",
    );
    assert_eq!(rendered(&schema, "tags"), "List[Union[int, str]]");
}

#[test]
fn test_empty_list_then_values() {
    let (schema, _) = infer(vec![json!({"tags": []}), json!({"tags": ["a"]})], "Things");
    assert_eq!(rendered(&schema, "tags"), "List[str]");
}

#[test]
fn test_identifier_override() {
    let (schema, _) = infer(
        vec![json!({"_id": "not-an-oid"}), json!({"_id": 7})],
        "Things",
    );
    let id = schema.get_field("_id").unwrap();
    assert_eq!(id.resolve().base(), "Union[int, str]");
    assert_eq!(id.resolve_as_identifier().to_string(), "ObjectId");
}

#[test]
fn test_empty_sample() {
    let (schema, registry) = infer(vec![], "Things");
    assert!(schema.is_empty());
    assert_eq!(schema.sample_size, 0);
    assert!(registry.is_empty());
}

#[test]
fn test_empty_document() {
    let (schema, _) = infer(vec![json!({})], "Things");
    assert!(schema.is_empty());
    assert_eq!(schema.sample_size, 1);
}

#[test]
fn test_document_order_does_not_change_result() {
    let a = vec![
        json!({"name": "Alice", "age": 30, "tags": ["x"]}),
        json!({"name": "Bob", "age": null, "score": 1.5}),
        json!({"name": 3, "tags": [1]}),
    ];
    let mut b = a.clone();
    b.reverse();

    let (schema_a, _) = infer(a, "Users");
    let (schema_b, _) = infer(b, "Users");
    assert_eq!(schema_a, schema_b);
}

// ============================================================================
// Nested Records
// ============================================================================

#[test]
fn test_nested_document_registers_record() {
    let (schema, registry) = infer(vec![json!({"profile": {"bio": "x"}})], "Users");

    assert_eq!(rendered(&schema, "profile"), "UsersProfile");

    let nested = registry.get("UsersProfile").unwrap();
    assert_eq!(nested.name, "UsersProfile");
    assert_eq!(rendered(nested, "bio"), "str");

    let deps: Vec<&str> = registry.dependencies_of("Users").collect();
    assert_eq!(deps, vec!["UsersProfile"]);
}

#[test]
fn test_nested_name_uses_owner_record() {
    let (_, registry) = infer(
        vec![json!({"profile": {"address": {"city": "Paris"}}})],
        "Users",
    );

    assert!(registry.get("UsersProfile").is_some());
    let address = registry.get("UsersProfileAddress").unwrap();
    assert_eq!(rendered(address, "city"), "str");

    let deps: Vec<&str> = registry.dependencies_of("UsersProfile").collect();
    assert_eq!(deps, vec!["UsersProfileAddress"]);
}

#[test]
fn test_repeated_nested_documents_are_not_duplicated() {
    let (schema, registry) = infer(
        vec![
            json!({"profile": {"bio": "Developer", "website": "https://a.com"}}),
            json!({"profile": {"bio": "Scientist"}}),
        ],
        "Users",
    );

    assert_eq!(registry.len(), 1);
    assert_eq!(schema.get_field("profile").unwrap().types.len(), 1);

    // First occurrence claims the name and defines the shape
    let nested = registry.get("UsersProfile").unwrap();
    assert_eq!(nested.sample_size, 1);
    assert!(nested.get_field("website").is_some());
}

#[test]
fn test_nested_documents_inside_lists() {
    let (schema, registry) = infer(
        vec![json!({"items": [{"sku": "a"}, {"sku": "b"}]})],
        "Orders",
    );

    assert_eq!(rendered(&schema, "items"), "List[OrdersItems]");
    assert!(registry.get("OrdersItems").is_some());
    assert_eq!(
        schema.referenced_records().into_iter().collect::<Vec<_>>(),
        vec!["OrdersItems".to_string()]
    );
}

#[test]
fn test_claimed_name_short_circuits() {
    let mut registry = SchemaRegistry::new();
    assert!(registry.claim("UsersProfile"));

    let value = DocValue::from_json(json!({"bio": "x"}));
    let tag = infer_type(&value, "profile", "Users", &mut registry);

    assert_eq!(tag, TypeTag::Record("UsersProfile".to_string()));
    assert!(registry.get("UsersProfile").is_none());
    assert!(registry.is_claimed("UsersProfile"));
}

#[test]
fn test_self_similar_field_name() {
    // A field whose PascalCase form is empty derives its owner's own name
    let mut registry = SchemaRegistry::new();
    registry.claim("Users");
    let schema = infer_schema(&docs(vec![json!({"_": {"a": 1}})]), "Users", &mut registry);

    assert_eq!(rendered(&schema, "_"), "Users");
    assert_eq!(registry.dependencies().count(), 0);
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_registry_claim_and_clear() {
    let mut registry = SchemaRegistry::new();
    assert!(registry.claim("A"));
    assert!(!registry.claim("A"));
    assert!(registry.get("A").is_none());

    registry.resolve(RecordSchema::new("A", 1));
    assert!(registry.get("A").is_some());
    assert_eq!(registry.schemas().count(), 1);

    registry.add_dependency("A", "B");
    registry.add_dependency("A", "A");
    assert_eq!(registry.dependencies().collect::<Vec<_>>(), vec![("A", "B")]);

    registry.clear();
    assert!(registry.is_empty());
    assert_eq!(registry.dependencies().count(), 0);
}
