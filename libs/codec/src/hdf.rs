//! # Hierarchical Backend Adapter
//!
//! ## Purpose
//!
//! Translates between [`Variable`]s and the hierarchical (HDF-style)
//! containers used by the 7.3 format family. The storage engine itself is
//! external; this module defines the collaborator interface as traits
//! ([`Backend`], [`Group`], [`Dataset`]) and the two translation
//! operations over them:
//!
//! - [`store_variable`]: one variable becomes one dataset tagged with a
//!   class-name attribute; a complex variable becomes a group holding
//!   `real` and `imag` datasets plus a complex-marker attribute.
//! - [`load_variables`]: recursive traversal of a group tree, detecting
//!   complex groups by their marker and mapping class attributes back to
//!   element types.

use crate::error::{CodecError, CodecResult};
use matbin_types::{ElementType, NumericPayload, Variable};
use tracing::debug;

/// Attribute naming the stored element class ("double", "int32", ...).
pub const CLASS_ATTRIBUTE: &str = "MATLAB_class";

/// Marker attribute present on groups that hold a complex variable.
pub const COMPLEX_ATTRIBUTE: &str = "MATLAB_complex";

/// Attribute value as hierarchical backends represent them.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    UInt(u64),
    Int(i64),
    Float(f64),
}

/// One child of a group.
pub enum Node<G, D> {
    Group(G),
    Dataset(D),
}

/// A leaf array in the hierarchy.
pub trait Dataset {
    fn name(&self) -> String;
    fn write(&mut self, payload: &NumericPayload) -> CodecResult<()>;
    fn read(&self) -> CodecResult<NumericPayload>;
    fn write_attribute(&mut self, name: &str, value: AttrValue) -> CodecResult<()>;
    fn read_attribute(&self, name: &str) -> Option<AttrValue>;
}

/// A container node in the hierarchy.
pub trait Group: Sized {
    type Dataset: Dataset;

    fn name(&self) -> String;
    fn children(&self) -> CodecResult<Vec<Node<Self, Self::Dataset>>>;
    fn write_attribute(&mut self, name: &str, value: AttrValue) -> CodecResult<()>;
    fn read_attribute(&self, name: &str) -> Option<AttrValue>;
}

/// A hierarchical storage engine. Paths are slash-separated and absolute
/// (`/name`, `/name/real`).
pub trait Backend {
    type Dataset: Dataset;
    type Group: Group<Dataset = Self::Dataset>;

    fn root(&self) -> CodecResult<Self::Group>;
    fn create_group(&mut self, path: &str) -> CodecResult<Self::Group>;
    fn create_dataset(
        &mut self,
        path: &str,
        element_type: ElementType,
        dimensions: &[i32],
    ) -> CodecResult<Self::Dataset>;
}

/// Class-attribute string for an element type. Unknown and aggregate kinds
/// never reach here on the store path.
pub fn class_name(element_type: ElementType) -> &'static str {
    match element_type {
        ElementType::Double => "double",
        ElementType::Single => "single",
        ElementType::Int8 => "int8",
        ElementType::UInt8 => "uint8",
        ElementType::Int16 => "int16",
        ElementType::UInt16 => "uint16",
        ElementType::Int32 => "int32",
        ElementType::UInt32 => "uint32",
        ElementType::Int64 => "int64",
        ElementType::UInt64 => "uint64",
        ElementType::Char => "char",
        ElementType::Struct => "struct",
        ElementType::Cell => "cell",
        _ => "double",
    }
}

/// Inverse of [`class_name`]; unrecognized strings map to
/// [`ElementType::Unknown`].
pub fn class_from_name(name: &str) -> ElementType {
    match name {
        "double" => ElementType::Double,
        "single" => ElementType::Single,
        "int8" => ElementType::Int8,
        "uint8" => ElementType::UInt8,
        "int16" => ElementType::Int16,
        "uint16" => ElementType::UInt16,
        "int32" => ElementType::Int32,
        "uint32" => ElementType::UInt32,
        "int64" => ElementType::Int64,
        "uint64" => ElementType::UInt64,
        "char" => ElementType::Char,
        "struct" => ElementType::Struct,
        "cell" => ElementType::Cell,
        _ => ElementType::Unknown,
    }
}

/// Store one variable into a hierarchical backend.
pub fn store_variable<B: Backend>(backend: &mut B, v: &Variable) -> CodecResult<()> {
    crate::validation::validate_variable(v)?;
    if !v.element_type.is_numeric() {
        return Err(CodecError::unencodable_type(v.element_type));
    }

    if v.is_complex {
        store_complex(backend, v)
    } else {
        let mut dataset =
            backend.create_dataset(&format!("/{}", v.name), v.element_type, &v.dimensions)?;
        dataset.write(&v.real)?;
        dataset.write_attribute(
            CLASS_ATTRIBUTE,
            AttrValue::Text(class_name(v.element_type).to_string()),
        )?;
        Ok(())
    }
}

/// Complex layout: a group carrying the class and complex-marker
/// attributes, with `real` and `imag` datasets nested inside.
fn store_complex<B: Backend>(backend: &mut B, v: &Variable) -> CodecResult<()> {
    let imag = v
        .imag
        .as_ref()
        .ok_or_else(|| CodecError::missing_payload("imaginary"))?;
    let class = AttrValue::Text(class_name(v.element_type).to_string());

    let mut group = backend.create_group(&format!("/{}", v.name))?;
    group.write_attribute(CLASS_ATTRIBUTE, class.clone())?;
    group.write_attribute(COMPLEX_ATTRIBUTE, AttrValue::UInt(1))?;

    let mut real = backend.create_dataset(
        &format!("/{}/real", v.name),
        v.element_type,
        &v.dimensions,
    )?;
    real.write(&v.real)?;
    // Loaders that cannot read group attributes find the class here too.
    real.write_attribute(CLASS_ATTRIBUTE, class)?;

    let mut imag_ds = backend.create_dataset(
        &format!("/{}/imag", v.name),
        v.element_type,
        &v.dimensions,
    )?;
    imag_ds.write(imag)?;

    Ok(())
}

/// Load every variable reachable from `group`, usually the backend root.
/// Nested groups without the complex marker contribute their name as a
/// path segment (`outer/inner`).
pub fn load_variables<G: Group>(group: &G) -> CodecResult<Vec<Variable>> {
    let mut variables = Vec::new();
    collect(group, "", &mut variables)?;
    Ok(variables)
}

fn collect<G: Group>(group: &G, path: &str, out: &mut Vec<Variable>) -> CodecResult<()> {
    if group.read_attribute(COMPLEX_ATTRIBUTE).is_some() {
        match load_complex_group(group, path) {
            Ok(variable) => {
                out.push(variable);
                return Ok(());
            }
            // A marked group missing its parts is traversed like any other.
            Err(err) => debug!(path, %err, "complex group not convertible"),
        }
    }

    for child in group.children()? {
        match child {
            Node::Dataset(dataset) => out.push(load_dataset(&dataset, path)?),
            Node::Group(sub) => {
                let sub_path = join(path, &sub.name());
                collect(&sub, &sub_path, out)?;
            }
        }
    }
    Ok(())
}

fn load_dataset<D: Dataset>(dataset: &D, path: &str) -> CodecResult<Variable> {
    let element_type = match dataset.read_attribute(CLASS_ATTRIBUTE) {
        Some(AttrValue::Text(class)) => class_from_name(&class),
        // Absent class attribute defaults to double
        _ => ElementType::Double,
    };
    let real = dataset.read()?;
    let dimensions = vec![real.len() as i32];

    Ok(Variable {
        name: join(path, &dataset.name()),
        dimensions,
        element_type,
        is_complex: false,
        is_sparse: false,
        real,
        imag: None,
    })
}

fn load_complex_group<G: Group>(group: &G, name: &str) -> CodecResult<Variable> {
    let mut real_ds = None;
    let mut imag_ds = None;
    for child in group.children()? {
        if let Node::Dataset(dataset) = child {
            match dataset.name().as_str() {
                "real" => real_ds = Some(dataset),
                "imag" => imag_ds = Some(dataset),
                _ => {}
            }
        }
    }
    let real_ds =
        real_ds.ok_or_else(|| CodecError::Backend("complex group missing 'real' dataset".into()))?;
    let imag_ds =
        imag_ds.ok_or_else(|| CodecError::Backend("complex group missing 'imag' dataset".into()))?;

    let mut element_type = match real_ds.read_attribute(CLASS_ATTRIBUTE) {
        Some(AttrValue::Text(class)) => class_from_name(&class),
        _ => ElementType::Unknown,
    };
    if element_type == ElementType::Unknown {
        element_type = ElementType::Double;
    }

    let real = real_ds.read()?;
    let imag = imag_ds.read()?;
    let dimensions = vec![real.len() as i32];

    Ok(Variable {
        name: name.to_string(),
        dimensions,
        element_type,
        is_complex: true,
        is_sparse: false,
        real,
        imag: Some(imag),
    })
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}/{name}")
    }
}
