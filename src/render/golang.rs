//! Go source target: one struct per object, one sealed interface per union.

use std::collections::HashSet;
use std::io::Write;

use anyhow::{bail, Result};

use super::{Artifacts, View};
use crate::model::{Api, FieldDef, ObjectDef, UnionDef};

const DOCS_URL: &str = "https://core.telegram.org/bots/api";
const ARRAY_PREFIX: &str = "Array of ";
const ALTERNATIVE: &str = " or ";

/// Words Go spells in all caps inside identifiers.
const INITIALISMS: [&str; 6] = ["ID", "URL", "HTTP", "IP", "JSON", "API"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Objects,
    Unions,
}

impl Template {
    pub const ALL: [Template; 2] = [Template::Objects, Template::Unions];

    pub fn name(self) -> &'static str {
        match self {
            Template::Objects => "objects",
            Template::Unions => "unions",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match Self::ALL.into_iter().find(|t| t.name() == name) {
            Some(template) => Ok(template),
            None => bail!("template {name:?} not defined"),
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.go", self.name())
    }
}

/// Renders one template against a collected [`Api`].
pub struct GoView<'a> {
    template: Template,
    api: &'a Api,
    package: &'a str,
}

impl<'a> GoView<'a> {
    pub fn new(template: Template, api: &'a Api, package: &'a str) -> Self {
        Self {
            template,
            api,
            package,
        }
    }

    fn header(&self, w: &mut dyn Write) -> Result<()> {
        match &self.api.release {
            Some(release) => writeln!(
                w,
                "// Code generated by tgen from Telegram Bot API {} ({}). DO NOT EDIT.",
                release.version, release.date
            )?,
            None => writeln!(w, "// Code generated by tgen. DO NOT EDIT.")?,
        }
        writeln!(w)?;
        writeln!(w, "package {}", self.package)?;
        Ok(())
    }

    fn objects(&self, w: &mut dyn Write) -> Result<()> {
        let unions = union_names(self.api);
        for object in &self.api.objects {
            writeln!(w)?;
            write_object(w, object, &unions)?;
        }
        Ok(())
    }

    fn unions(&self, w: &mut dyn Write) -> Result<()> {
        for union in &self.api.unions {
            writeln!(w)?;
            write_union(w, union)?;
        }
        Ok(())
    }
}

impl View for GoView<'_> {
    fn render(&self, w: &mut dyn Write) -> Result<()> {
        self.header(w)?;
        match self.template {
            Template::Objects => self.objects(w),
            Template::Unions => self.unions(w),
        }
    }
}

/// Go files for the given templates, keyed by file name.
pub fn artifacts<'a>(api: &'a Api, package: &'a str, templates: &[Template]) -> Artifacts<'a> {
    let mut artifacts = Artifacts::new();
    for &template in templates {
        artifacts.insert(
            template.file_name(),
            Box::new(GoView::new(template, api, package)),
        );
    }
    artifacts
}

fn union_names(api: &Api) -> HashSet<&str> {
    api.unions.iter().map(|u| u.name.as_str()).collect()
}

fn write_doc(w: &mut dyn Write, indent: &str, description: &str) -> Result<()> {
    if !description.is_empty() {
        writeln!(w, "{indent}// {description}")?;
    }
    Ok(())
}

fn write_object(w: &mut dyn Write, object: &ObjectDef, unions: &HashSet<&str>) -> Result<()> {
    write_doc(w, "", &object.description)?;
    writeln!(w, "//")?;
    writeln!(w, "// {DOCS_URL}{}", object.id)?;
    if object.fields.is_empty() {
        writeln!(w, "type {} struct{{}}", object.name)?;
        return Ok(());
    }
    writeln!(w, "type {} struct {{", object.name)?;
    for field in &object.fields {
        write_doc(w, "\t", &field.description)?;
        writeln!(
            w,
            "\t{} {} `json:\"{}\"`",
            field_name(&field.json_key),
            field_type(field, unions),
            json_tag(field)
        )?;
    }
    writeln!(w, "}}")?;
    Ok(())
}

fn write_union(w: &mut dyn Write, union: &UnionDef) -> Result<()> {
    let marker = format!("is{}", union.name);
    write_doc(w, "", &union.description)?;
    writeln!(w, "//")?;
    writeln!(w, "// {DOCS_URL}{}", union.id)?;
    writeln!(w, "type {} interface {{", union.name)?;
    writeln!(w, "\t{marker}()")?;
    writeln!(w, "}}")?;
    if !union.variants.is_empty() {
        writeln!(w)?;
    }
    for variant in &union.variants {
        writeln!(w, "func ({}) {marker}() {{}}", variant.name)?;
    }
    Ok(())
}

fn json_tag(field: &FieldDef) -> String {
    if field.optional {
        format!("{},omitempty", field.json_key)
    } else {
        field.json_key.clone()
    }
}

fn field_type(field: &FieldDef, unions: &HashSet<&str>) -> String {
    go_type(&field.type_name, unions, field.optional)
}

/// Go spelling of a documented type. Optional references to structs become
/// pointers; arrays, interfaces and scalars never do.
fn go_type(type_name: &str, unions: &HashSet<&str>, optional: bool) -> String {
    if let Some(element) = type_name.strip_prefix(ARRAY_PREFIX) {
        return format!("[]{}", go_type(element, unions, false));
    }
    if type_name.contains(ALTERNATIVE) {
        return "any".to_string();
    }
    match type_name {
        "Integer" | "Int" => "int64".to_string(),
        "String" => "string".to_string(),
        "Boolean" | "True" | "False" => "bool".to_string(),
        "Float" | "Float number" => "float64".to_string(),
        name if unions.contains(name) => name.to_string(),
        name if optional => format!("*{name}"),
        name => name.to_string(),
    }
}

/// `chat_id` → `ChatID`, `photo_url` → `PhotoURL`.
fn field_name(json_key: &str) -> String {
    json_key
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let upper = part.to_ascii_uppercase();
            if INITIALISMS.contains(&upper.as_str()) {
                return upper;
            }
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

// ── Tests ──
