
use crate::{
    driver::{MetadataDriver, SkipReason, TreeConfig, TreeDriver},
    error::TreeMappingError,
    model::{AssociationMapping, FieldMapping, PropertyModel, TypeModel},
    obs::{DriverEvent, DriverSink, PassOutcome, driver_report, driver_reset, with_driver_sink},
    role::{Marker, MarkerNamespace, MarkerReader, RoleTable, TreeRole},
    types::{AssociationKind, StorageKind, Visibility},
};
use std::{cell::RefCell, rc::Rc};

fn driver() -> TreeDriver {
    TreeDriver::default()
}

fn marked(name: &str, role: TreeRole) -> PropertyModel {
    PropertyModel::new(name).marker(Marker::tree(role))
}

fn column(kind: StorageKind) -> FieldMapping {
    FieldMapping::new(kind)
}

fn to_one(target: &str) -> AssociationMapping {
    AssociationMapping::new(AssociationKind::ManyToOne, target)
}

fn full_tree() -> TypeModel {
    TypeModel::new("Category")
        .field(PropertyModel::new("id"), column(StorageKind::Integer))
        .field(marked("lft", TreeRole::Left), column(StorageKind::Integer))
        .field(marked("rgt", TreeRole::Right), column(StorageKind::Integer))
        .association(marked("parent", TreeRole::Parent), to_one("Category"))
        .field(marked("lvl", TreeRole::Level), column(StorageKind::Integer))
}

fn tree_without_level() -> TypeModel {
    TypeModel::new("Category")
        .field(marked("lft", TreeRole::Left), column(StorageKind::Integer))
        .field(marked("rgt", TreeRole::Right), column(StorageKind::BigInt))
        .association(marked("parent", TreeRole::Parent), to_one("Category"))
        .field(PropertyModel::new("lvl"), column(StorageKind::Integer))
}

///
/// RecordingSink
///

#[derive(Default)]
struct RecordingSink {
    events: RefCell<Vec<String>>,
}

impl DriverSink for RecordingSink {
    fn record(&self, event: &DriverEvent<'_>) {
        self.events.borrow_mut().push(format!("{event:?}"));
    }
}

//
// extraction
//

#[test]
fn full_tree_yields_every_role() {
    let driver = driver();
    let model = full_tree();

    let config = driver.extract(&model).expect("extraction should succeed");
    driver
        .validate_complete(&model, &config)
        .expect("complete config should validate");

    assert_eq!(config.get(TreeRole::Left), Some("lft"));
    assert_eq!(config.get(TreeRole::Right), Some("rgt"));
    assert_eq!(config.get(TreeRole::Parent), Some("parent"));
    assert_eq!(config.get(TreeRole::Level), Some("lvl"));
}

#[test]
fn level_is_optional() {
    let driver = driver();
    let mapping = driver
        .load(&tree_without_level())
        .expect("level is optional")
        .expect("type declares tree roles");

    assert_eq!(mapping.left(), "lft");
    assert_eq!(mapping.right(), "rgt");
    assert_eq!(mapping.parent(), "parent");
    assert_eq!(mapping.level(), None);

    let json = serde_json::to_value(&mapping).expect("mapping should serialize");
    assert_eq!(
        json,
        serde_json::json!({ "left": "lft", "right": "rgt", "parent": "parent" })
    );
}

#[test]
fn type_without_roles_is_not_a_tree() {
    let driver = driver();
    let model = TypeModel::new("Article")
        .field(PropertyModel::new("id"), column(StorageKind::Integer))
        .field(PropertyModel::new("title"), column(StorageKind::String));

    let config = driver.extract(&model).expect("no roles is not an error");
    assert!(config.is_empty());
    driver
        .validate_complete(&model, &config)
        .expect("empty config validates trivially");
    assert_eq!(driver.load(&model), Ok(None));
}

#[test]
fn left_marker_on_missing_field_is_rejected() {
    let model = TypeModel::new("Category").property(marked("lft", TreeRole::Left));

    let err = driver()
        .extract(&model)
        .expect_err("unmapped property cannot hold a boundary");

    assert_eq!(
        err,
        TreeMappingError::MissingField {
            role: TreeRole::Left,
            field: "lft".to_string(),
            type_name: "Category".to_string(),
        }
    );
}

#[test]
fn association_is_not_a_field_for_boundaries() {
    let model =
        TypeModel::new("Category").association(marked("rgt", TreeRole::Right), to_one("Category"));

    let err = driver()
        .extract(&model)
        .expect_err("association cannot hold a boundary");

    assert!(matches!(
        err,
        TreeMappingError::MissingField { role: TreeRole::Right, .. }
    ));
}

#[test]
fn non_integer_boundary_types_are_rejected_per_role() {
    for role in [TreeRole::Left, TreeRole::Right, TreeRole::Level] {
        let model = TypeModel::new("Category")
            .field(marked("bound", role), column(StorageKind::String));

        let err = driver()
            .extract(&model)
            .expect_err("string boundary must fail");

        assert_eq!(
            err,
            TreeMappingError::InvalidFieldType {
                role,
                field: "bound".to_string(),
                type_name: "Category".to_string(),
                expected: StorageKind::Integer,
                found: Some(StorageKind::String),
            }
        );
        assert!(err.to_string().contains(&format!("tree {role} field")));
    }
}

#[test]
fn storage_names_are_not_normalised() {
    for name in ["int", "INTEGER", "BigInt"] {
        let model = TypeModel::new("Category")
            .field(marked("lft", TreeRole::Left), column(StorageKind::from_name(name)));

        let err = driver()
            .extract(&model)
            .expect_err("only exact integer names are accepted");

        assert_eq!(
            err,
            TreeMappingError::InvalidFieldType {
                role: TreeRole::Left,
                field: "lft".to_string(),
                type_name: "Category".to_string(),
                expected: StorageKind::Integer,
                found: Some(StorageKind::Other(name.to_string())),
            }
        );
    }
}

#[test]
fn smallint_and_bigint_are_accepted() {
    let model = TypeModel::new("Category")
        .field(marked("lft", TreeRole::Left), column(StorageKind::SmallInt))
        .field(marked("rgt", TreeRole::Right), column(StorageKind::BigInt))
        .field(marked("lvl", TreeRole::Level), column(StorageKind::SmallInt));

    let config = driver()
        .extract(&model)
        .expect("integer-like kinds are accepted");

    assert_eq!(config.iter().count(), 3);
}

#[test]
fn collection_parent_is_rejected() {
    let model = TypeModel::new("Category").association(
        marked("children", TreeRole::Parent),
        AssociationMapping::new(AssociationKind::OneToMany, "Category"),
    );

    let err = driver()
        .extract(&model)
        .expect_err("collection association cannot be the parent");

    assert_eq!(
        err,
        TreeMappingError::InvalidAssociation {
            field: "children".to_string(),
            type_name: "Category".to_string(),
        }
    );
}

#[test]
fn scalar_parent_is_rejected() {
    let model = TypeModel::new("Category")
        .field(marked("parent_id", TreeRole::Parent), column(StorageKind::Integer));

    assert!(matches!(
        driver().extract(&model),
        Err(TreeMappingError::InvalidAssociation { .. })
    ));
}

#[test]
fn one_to_one_parent_is_accepted() {
    let model = TypeModel::new("Category").association(
        marked("parent", TreeRole::Parent),
        AssociationMapping::new(AssociationKind::OneToOne, "Category"),
    );

    let config = driver()
        .extract(&model)
        .expect("one-to-one is single valued");

    assert_eq!(config.get(TreeRole::Parent), Some("parent"));
}

#[test]
fn duplicate_role_is_last_declared_wins() {
    let model = full_tree().field(marked("lft2", TreeRole::Left), column(StorageKind::Integer));

    let config = driver()
        .extract(&model)
        .expect("duplicate roles are not an error");

    assert_eq!(config.get(TreeRole::Left), Some("lft2"));
}

#[test]
fn first_violation_aborts_the_pass() {
    let model = TypeModel::new("Category")
        .field(marked("lft", TreeRole::Left), column(StorageKind::Text))
        .association(
            marked("children", TreeRole::Parent),
            AssociationMapping::new(AssociationKind::OneToMany, "Category"),
        );

    let err = driver()
        .extract(&model)
        .expect_err("pass must fail");

    assert!(matches!(err, TreeMappingError::InvalidFieldType { .. }));
}

#[test]
fn property_with_several_roles_applies_each_in_check_order() {
    let model = TypeModel::new("Category").field(
        PropertyModel::new("bound")
            .marker(Marker::tree(TreeRole::Level))
            .marker(Marker::tree(TreeRole::Left)),
        column(StorageKind::Integer),
    );

    let config = driver()
        .extract(&model)
        .expect("integer field can carry several boundary roles");

    assert_eq!(
        config.iter().collect::<Vec<_>>(),
        vec![(TreeRole::Left, "bound"), (TreeRole::Level, "bound")]
    );
}

//
// exclusion
//

#[test]
fn mapped_superclass_skips_non_private_members() {
    let model = TypeModel::new("AbstractNode")
        .mapped_superclass(true)
        .field(
            marked("lft", TreeRole::Left).visibility(Visibility::Protected),
            column(StorageKind::String),
        )
        .field(
            marked("rgt", TreeRole::Right).visibility(Visibility::Public),
            column(StorageKind::Integer),
        )
        .field(marked("lvl", TreeRole::Level), column(StorageKind::Integer));

    let config = driver()
        .extract(&model)
        .expect("skipped members are never checked");

    assert_eq!(config.iter().collect::<Vec<_>>(), vec![(TreeRole::Level, "lvl")]);
}

#[test]
fn inherited_members_are_skipped() {
    let model = TypeModel::new("Category")
        .field(
            marked("lft", TreeRole::Left),
            column(StorageKind::String).inherited(),
        )
        .association(
            marked("parent", TreeRole::Parent),
            AssociationMapping::new(AssociationKind::OneToMany, "Node").inherited(),
        );

    let config = driver()
        .extract(&model)
        .expect("inherited members contribute nothing");

    assert!(config.is_empty());
}

#[test]
fn skip_reason_prefers_mapped_superclass_rule() {
    let model = TypeModel::new("AbstractNode")
        .mapped_superclass(true)
        .field(
            PropertyModel::new("lft").visibility(Visibility::Public),
            column(StorageKind::Integer).inherited(),
        );
    let properties = crate::model::TypeDescriptor::properties(&model);

    assert_eq!(
        super::skip_reason(&model, &properties[0]),
        Some(SkipReason::MappedSuperclassMember)
    );
}

//
// completeness
//

#[test]
fn missing_roles_are_aggregated_with_ancestor_label() {
    let model = TypeModel::new("Category")
        .field(marked("lft", TreeRole::Left), column(StorageKind::Integer));
    let driver = driver();

    let config = driver.extract(&model).expect("left alone extracts");
    let err = driver
        .validate_complete(&model, &config)
        .expect_err("parent and right are mandatory");

    assert_eq!(
        err,
        TreeMappingError::MissingRoles {
            type_name: "Category".to_string(),
            roles: vec![TreeRole::Parent, TreeRole::Right],
        }
    );
    assert_eq!(
        err.to_string(),
        "missing properties: ancestor, right in type - Category"
    );
}

#[test]
fn level_alone_still_requires_mandatory_roles() {
    let model = TypeModel::new("Category")
        .field(marked("lvl", TreeRole::Level), column(StorageKind::Integer));

    let err = driver()
        .load(&model)
        .expect_err("level alone makes a tree type");

    assert_eq!(
        err.to_string(),
        "missing properties: ancestor, left, right in type - Category"
    );
}

#[test]
fn trait_phases_fill_a_caller_owned_config() {
    let driver = driver();
    let model = full_tree();
    let mut config = TreeConfig::new();

    driver
        .read_extended_metadata(&model, &mut config)
        .expect("collecting phase succeeds");
    driver
        .validate_full_metadata(&model, &config)
        .expect("verifying phase succeeds");

    assert_eq!(config.get(TreeRole::Level), Some("lvl"));
}

//
// resolvers
//

#[test]
fn driver_honours_configured_namespace() {
    let model = TypeModel::new("Category")
        .field(
            PropertyModel::new("lft").marker(Marker::parse("acme:TreeLeft")),
            column(StorageKind::Integer),
        )
        .field(
            PropertyModel::new("rgt").marker(Marker::parse("acme:TreeRight")),
            column(StorageKind::Integer),
        )
        .association(
            PropertyModel::new("parent").marker(Marker::parse("acme:TreeParent")),
            to_one("Category"),
        );

    let default_driver = driver();
    let acme_driver = TreeDriver::new(MarkerReader::new(MarkerNamespace::new("acme")));

    assert_eq!(default_driver.load(&model), Ok(None));
    assert!(acme_driver.load(&model).expect("acme markers resolve").is_some());
}

#[test]
fn driver_works_with_role_table() {
    let model = TypeModel::new("Comment")
        .field(PropertyModel::new("lft"), column(StorageKind::Integer))
        .field(PropertyModel::new("rgt"), column(StorageKind::Integer))
        .association(PropertyModel::new("thread"), to_one("Comment"));
    let table = RoleTable::new()
        .with("Comment", "lft", TreeRole::Left)
        .with("Comment", "rgt", TreeRole::Right)
        .with("Comment", "thread", TreeRole::Parent);

    let mapping = TreeDriver::new(&table)
        .load(&model)
        .expect("registered roles validate")
        .expect("comment is a tree type");

    assert_eq!(mapping.parent(), "thread");
}

//
// observability
//

#[test]
fn load_reports_pass_events_in_order() {
    let sink = Rc::new(RecordingSink::default());
    let model = tree_without_level().field(marked("lft2", TreeRole::Left), column(StorageKind::Integer));

    with_driver_sink(sink.clone(), || {
        driver()
            .load(&model)
            .expect("tree should load");
    });

    let events = sink.events.borrow();
    assert_eq!(events.len(), 6);
    assert!(events[0].starts_with("PassStart"));
    assert!(events[4].starts_with("RoleOverwritten"));
    assert!(events[4].contains("previous: \"lft\""));
    assert_eq!(
        events[5],
        format!(
            "{:?}",
            DriverEvent::PassFinish {
                type_name: "Category",
                outcome: PassOutcome::Tree
            }
        )
    );
}

#[test]
fn global_counters_track_outcomes() {
    driver_reset();
    let driver = driver();

    driver.load(&full_tree()).expect("tree loads");
    driver
        .load(&TypeModel::new("Article"))
        .expect("plain type loads");
    let _ = driver.load(
        &TypeModel::new("Broken").field(marked("lft", TreeRole::Left), column(StorageKind::Text)),
    );

    let report = driver_report();
    assert_eq!(report.totals.passes, 3);
    assert_eq!(report.totals.tree_types, 1);
    assert_eq!(report.totals.plain_types, 1);
    assert_eq!(report.totals.failures, 1);
    assert_eq!(report.totals.roles_assigned, 4);
    assert_eq!(report.types["Broken"].failures, 1);
}
