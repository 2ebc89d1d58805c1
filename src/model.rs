//! Owned snapshot of a parsed specification, ready for rendering or export.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::parser::{Field, Object, ParseError, Release, Specification, Union, Variant};

/// Accessor failure located inside the specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {source}")]
pub struct CollectError {
    pub path: String,
    #[source]
    pub source: ParseError,
}

impl CollectError {
    fn at(path: impl Into<String>) -> impl FnOnce(ParseError) -> CollectError {
        let path = path.into();
        move |source| CollectError { path, source }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Api {
    pub release: Option<ReleaseDef>,
    pub objects: Vec<ObjectDef>,
    pub unions: Vec<UnionDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseDef {
    /// Changelog anchor, e.g. `#february-9-2026`.
    pub id: String,
    pub version: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    pub name: String,
    pub json_key: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub variants: Vec<VariantDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantDef {
    pub id: String,
    pub name: String,
}

impl Api {
    /// Materialize every definition, stopping at the first failing accessor.
    pub fn collect<S: Specification>(spec: &S) -> Result<Api, CollectError> {
        let release = spec
            .latest_release()
            .map(|release| collect_release(&release))
            .transpose()?;
        let objects = spec
            .objects()
            .enumerate()
            .map(|(i, object)| collect_object(i, &object))
            .collect::<Result<Vec<_>, _>>()?;
        let unions = spec
            .unions()
            .enumerate()
            .map(|(i, union)| collect_union(i, &union))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            objects = objects.len(),
            unions = unions.len(),
            "collected specification"
        );
        Ok(Api {
            release,
            objects,
            unions,
        })
    }
}

/// Every accessor failure in the specification, in document order. Unlike
/// [`Api::collect`] this never stops early.
pub fn diagnose<S: Specification>(spec: &S) -> Vec<CollectError> {
    let mut errors = Vec::new();
    let mut check = |path: &str, result: Result<(), ParseError>| {
        if let Err(source) = result {
            errors.push(CollectError {
                path: path.to_string(),
                source,
            });
        }
    };

    if let Some(release) = spec.latest_release() {
        check("latest release", release.id().map(drop));
        check("latest release", release.version().map(drop));
        check("latest release", release.date().map(drop));
    }
    for (i, object) in spec.objects().enumerate() {
        let path = object_path(i, &object);
        check(&path, object.id().map(drop));
        check(&path, object.name().map(drop));
        check(&path, object.description().map(drop));
        for (j, field) in object.fields().enumerate() {
            let path = format!("{path}, field {}", j + 1);
            check(&path, field.json_key().map(drop));
            check(&path, field.type_name().map(drop));
            check(&path, field.description().map(drop));
        }
    }
    for (i, union) in spec.unions().enumerate() {
        let path = union_path(i, &union);
        check(&path, union.id().map(drop));
        check(&path, union.name().map(drop));
        check(&path, union.description().map(drop));
        for (j, variant) in union.variants().enumerate() {
            let path = format!("{path}, variant {}", j + 1);
            check(&path, variant.id().map(drop));
            check(&path, variant.name().map(drop));
        }
    }
    errors
}

fn object_path(index: usize, object: &impl Object) -> String {
    match object.id() {
        Ok(id) => format!("object {id}"),
        Err(_) => format!("object {}", index + 1),
    }
}

fn union_path(index: usize, union: &impl Union) -> String {
    match union.id() {
        Ok(id) => format!("union {id}"),
        Err(_) => format!("union {}", index + 1),
    }
}

fn collect_release(release: &impl Release) -> Result<ReleaseDef, CollectError> {
    Ok(ReleaseDef {
        id: release.id().map_err(CollectError::at("latest release"))?,
        version: release.version().map_err(CollectError::at("latest release"))?,
        date: release.date().map_err(CollectError::at("latest release"))?,
    })
}

fn collect_object(index: usize, object: &impl Object) -> Result<ObjectDef, CollectError> {
    let path = object_path(index, object);
    let id = object.id().map_err(CollectError::at(&path))?;
    let name = object.name().map_err(CollectError::at(&path))?;
    let description = object.description().map_err(CollectError::at(&path))?;
    let fields = object
        .fields()
        .enumerate()
        .map(|(j, field)| collect_field(&format!("{path}, field {}", j + 1), &field))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ObjectDef {
        id,
        name,
        description,
        fields,
    })
}

fn collect_field(path: &str, field: &impl Field) -> Result<FieldDef, CollectError> {
    Ok(FieldDef {
        name: field.name().map_err(CollectError::at(path))?,
        json_key: field.json_key().map_err(CollectError::at(path))?,
        type_name: field.type_name().map_err(CollectError::at(path))?,
        description: field.description().map_err(CollectError::at(path))?,
        optional: field.is_optional().map_err(CollectError::at(path))?,
    })
}

fn collect_union(index: usize, union: &impl Union) -> Result<UnionDef, CollectError> {
    let path = union_path(index, union);
    let id = union.id().map_err(CollectError::at(&path))?;
    let name = union.name().map_err(CollectError::at(&path))?;
    let description = union.description().map_err(CollectError::at(&path))?;
    let variants = union
        .variants()
        .enumerate()
        .map(|(j, variant)| -> Result<VariantDef, CollectError> {
            let at = format!("{path}, variant {}", j + 1);
            Ok(VariantDef {
                id: variant.id().map_err(CollectError::at(&at))?,
                name: variant.name().map_err(CollectError::at(&at))?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(UnionDef {
        id,
        name,
        description,
        variants,
    })
}

// ── Tests ──
