//! Schema types

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

/// Observed type of a value.
///
/// Tags order by their rendered name so unions always print the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// No concrete type information (null or empty observation)
    Any,
    Str,
    Bool,
    Int,
    Float,
    DateTime,
    ObjectId,
    /// List with its element tags, sorted and deduplicated
    List(Vec<TypeTag>),
    /// Reference to a named record
    Record(String),
}

impl TypeTag {
    /// Build a list tag from the element tags observed in it.
    ///
    /// `Any` is dropped when concrete element types are present, and an
    /// empty element set becomes `List[Any]`.
    pub fn list(elements: TypeSet) -> Self {
        let mut tags: Vec<TypeTag> = elements.into_iter().collect();
        if tags.len() > 1 {
            tags.retain(|t| *t != TypeTag::Any);
        }
        if tags.is_empty() {
            tags.push(TypeTag::Any);
        }
        TypeTag::List(tags)
    }

    /// Check if this is the any-marker
    pub fn is_any(&self) -> bool {
        matches!(self, TypeTag::Any)
    }

    /// Check if this is a list tag
    pub fn is_list(&self) -> bool {
        matches!(self, TypeTag::List(_))
    }

    /// Name of the record this tag references, if any
    pub fn record_name(&self) -> Option<&str> {
        match self {
            TypeTag::Record(name) => Some(name),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            TypeTag::Any => 0,
            TypeTag::Str => 1,
            TypeTag::Bool => 2,
            TypeTag::Int => 3,
            TypeTag::Float => 4,
            TypeTag::DateTime => 5,
            TypeTag::ObjectId => 6,
            TypeTag::List(_) => 7,
            TypeTag::Record(_) => 8,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Any => write!(f, "Any"),
            TypeTag::Str => write!(f, "str"),
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::Int => write!(f, "int"),
            TypeTag::Float => write!(f, "float"),
            TypeTag::DateTime => write!(f, "datetime"),
            TypeTag::ObjectId => write!(f, "ObjectId"),
            TypeTag::List(items) => write!(f, "List[{}]", union_expr(items)),
            TypeTag::Record(name) => write!(f, "{name}"),
        }
    }
}

impl Ord for TypeTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_string()
            .cmp(&other.to_string())
            .then_with(|| self.rank().cmp(&other.rank()))
            .then_with(|| match (self, other) {
                (TypeTag::List(a), TypeTag::List(b)) => a.cmp(b),
                _ => Ordering::Equal,
            })
    }
}

impl PartialOrd for TypeTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Render tags bare when there is one, as `Union[..]` otherwise
fn union_expr(tags: &[TypeTag]) -> String {
    match tags {
        [single] => single.to_string(),
        _ => {
            let parts: Vec<String> = tags.iter().map(ToString::to_string).collect();
            format!("Union[{}]", parts.join(", "))
        }
    }
}

/// Ordered set of observed tags.
///
/// Holds at most one list tag: a second list merges its element types
/// into the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeSet(BTreeSet<TypeTag>);

impl TypeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag, merging list tags
    pub fn insert(&mut self, tag: TypeTag) {
        match tag {
            TypeTag::List(new_items) => {
                let mut elements = TypeSet::new();
                if let Some(existing) = self.0.iter().find(|t| t.is_list()).cloned() {
                    self.0.remove(&existing);
                    if let TypeTag::List(old_items) = existing {
                        elements.extend(old_items);
                    }
                }
                elements.extend(new_items);
                self.0.insert(TypeTag::list(elements));
            }
            other => {
                self.0.insert(other);
            }
        }
    }

    /// Check if the any-marker was observed
    pub fn contains_any(&self) -> bool {
        self.0.contains(&TypeTag::Any)
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate tags in rendering order
    pub fn iter(&self) -> impl Iterator<Item = &TypeTag> {
        self.0.iter()
    }

    /// Rendered tag names, sorted
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl Extend<TypeTag> for TypeSet {
    fn extend<I: IntoIterator<Item = TypeTag>>(&mut self, iter: I) {
        for tag in iter {
            self.insert(tag);
        }
    }
}

impl FromIterator<TypeTag> for TypeSet {
    fn from_iter<I: IntoIterator<Item = TypeTag>>(iter: I) -> Self {
        let mut set = TypeSet::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for TypeSet {
    type Item = TypeTag;
    type IntoIter = std::collections::btree_set::IntoIter<TypeTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Inferred schema of one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    /// Every tag observed for this field
    pub types: TypeSet,

    /// Number of sampled documents containing the field
    pub present_count: usize,

    /// Whether the field was missing from at least one document
    pub is_optional: bool,
}

impl FieldSchema {
    /// Resolve the observed tags into a type expression
    pub fn resolve(&self) -> ResolvedType {
        let can_be_null = self.types.contains_any();
        let mut tags: Vec<TypeTag> = self.types.iter().cloned().collect();
        if tags.len() > 1 {
            tags.retain(|t| !t.is_any());
        }
        if tags.is_empty() {
            tags.push(TypeTag::Any);
        }

        ResolvedType {
            tags,
            nullable: can_be_null,
            optional: self.is_optional,
        }
    }

    /// Resolve as the store's identifier field: the base type is always
    /// `ObjectId`, the wrappers still follow the observations.
    pub fn resolve_as_identifier(&self) -> ResolvedType {
        ResolvedType {
            tags: vec![TypeTag::ObjectId],
            ..self.resolve()
        }
    }
}

/// Final type expression of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Union members, sorted, without a redundant `Any`
    pub tags: Vec<TypeTag>,
    /// Value may be null
    pub nullable: bool,
    /// Key may be absent
    pub optional: bool,
}

impl ResolvedType {
    /// Type expression without the optional/nullable wrappers
    pub fn base(&self) -> String {
        union_expr(&self.tags)
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.base();
        match (self.optional, self.nullable) {
            (false, false) => write!(f, "{base}"),
            (false, true) => write!(f, "Optional[{base}]"),
            (true, false) => write!(f, "NotRequired[{base}]"),
            (true, true) => write!(f, "NotRequired[Optional[{base}]]"),
        }
    }
}

/// Inferred schema of one record shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSchema {
    /// Record name
    pub name: String,

    /// Number of documents the schema was inferred from
    pub sample_size: usize,

    /// Fields, ordered by name
    pub fields: BTreeMap<String, FieldSchema>,
}

impl RecordSchema {
    /// Create an empty record schema
    pub fn new(name: impl Into<String>, sample_size: usize) -> Self {
        Self {
            name: name.into(),
            sample_size,
            fields: BTreeMap::new(),
        }
    }

    /// Get a field
    pub fn get_field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of the records this one references
    pub fn referenced_records(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for field in self.fields.values() {
            for tag in field.types.iter() {
                collect_records(tag, &mut names);
            }
        }
        names
    }
}

fn collect_records(tag: &TypeTag, names: &mut BTreeSet<String>) {
    match tag {
        TypeTag::Record(name) => {
            names.insert(name.clone());
        }
        TypeTag::List(items) => {
            for item in items {
                collect_records(item, names);
            }
        }
        _ => {}
    }
}
